// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Shared plumbing for service callers: build and sign a query request, send
//! it, decode the XML response.

use bytes::Bytes;
use http::{StatusCode, Uri};
use querysign_aws_v2::{Credential, RequestSigner, SigningProfile};
use querysign_core::{Context, Error, Result, SigningCredential, SigningRequest};
use quick_xml::de;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Build a `GET {base}?{params}` request signed with the given profile.
pub(crate) fn signed_request(
    profile: SigningProfile,
    cred: &Credential,
    base: &str,
    params: &[(&str, &str)],
) -> Result<http::Request<Bytes>> {
    if !cred.is_valid() {
        return Err(Error::credential_invalid(
            "access key id and secret access key must not be empty",
        ));
    }

    let uri = format!("{base}?{}", SigningRequest::query_to_form_string(params));
    let (mut parts, body) = http::Request::get(uri).body(Bytes::new())?.into_parts();

    let mut req = SigningRequest::build(&mut parts)?;
    RequestSigner::new(profile).sign(&mut req, cred);
    req.apply(&mut parts)?;

    Ok(http::Request::from_parts(parts, body))
}

/// Send the request and decode a successful response body as `T`.
pub(crate) async fn send<T: DeserializeOwned>(
    ctx: &Context,
    req: http::Request<Bytes>,
    action: &str,
) -> Result<T> {
    let endpoint = endpoint(req.uri());
    let resp = ctx.http_send_as_string(req).await.map_err(|e| {
        Error::unexpected(format!("failed to send {action} request"))
            .with_source(e)
            .with_context(format!("endpoint: {endpoint}"))
    })?;

    let status = resp.status();
    let body = resp.into_body();
    if !status.is_success() {
        return Err(parse_error(action, status, &body).with_context(format!("endpoint: {endpoint}")));
    }

    de::from_str(&body).map_err(|e| {
        Error::unexpected(format!("failed to parse {action} response"))
            .with_source(e)
            .with_context(format!("response_length: {}", body.len()))
            .with_context(format!("endpoint: {endpoint}"))
    })
}

/// Send the request and only check that it got through.
pub(crate) async fn send_ignore_body(
    ctx: &Context,
    req: http::Request<Bytes>,
    action: &str,
) -> Result<()> {
    let endpoint = endpoint(req.uri());
    let resp = ctx.http_send(req).await.map_err(|e| {
        Error::unexpected(format!("failed to send {action} request"))
            .with_source(e)
            .with_context(format!("endpoint: {endpoint}"))
    })?;

    if !resp.status().is_success() {
        log::warn!("{action} to {endpoint} returned status {}", resp.status());
    }
    Ok(())
}

/// Endpoint without query, the query carries the signature.
fn endpoint(uri: &Uri) -> String {
    format!(
        "{}://{}{}",
        uri.scheme_str().unwrap_or("https"),
        uri.authority().map(|v| v.as_str()).unwrap_or_default(),
        uri.path()
    )
}

fn parse_error(action: &str, status: StatusCode, body: &str) -> Error {
    let parsed: Option<ServiceErrorBody> = de::from_str(body).ok();
    let request_id = parsed
        .as_ref()
        .map(|v| v.request_id())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let err = match parsed.as_ref().and_then(|v| v.first()) {
        Some(detail) => Error::request_invalid(format!(
            "{action} failed: {}: {}",
            detail.code, detail.message
        )),
        None => Error::unexpected(format!("{action} returned unexpected status"))
            .with_context(format!("response_length: {}", body.len())),
    };

    let err = err.with_context(format!("status: {status}"));
    match request_id {
        Some(id) => err.with_context(format!("request_id: {id}")),
        None => err,
    }
}

/// `<ResponseMetadata><RequestId>...</RequestId></ResponseMetadata>`
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ResponseMetadata {
    pub(crate) request_id: String,
}

/// A single reported error.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorDetail {
    pub(crate) code: String,
    pub(crate) message: String,
}

/// `<Errors><Error>...</Error></Errors>`, as reported by FPS.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorList {
    pub(crate) error: Vec<ErrorDetail>,
}

impl ErrorList {
    pub(crate) fn first(&self) -> Option<&ErrorDetail> {
        self.error.first()
    }
}

/// Error body of both `<ErrorResponse><Error>` (SNS, SQS) and
/// `<Response><Errors><Error>` (FPS).
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ServiceErrorBody {
    error: Vec<ErrorDetail>,
    errors: ErrorList,
    request_id: String,
    #[serde(rename = "RequestID")]
    request_id_upper: String,
}

impl ServiceErrorBody {
    fn first(&self) -> Option<&ErrorDetail> {
        self.error.first().or_else(|| self.errors.first())
    }

    fn request_id(&self) -> &str {
        if self.request_id.is_empty() {
            &self.request_id_upper
        } else {
            &self.request_id
        }
    }
}
