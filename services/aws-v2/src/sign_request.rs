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

use crate::constants::AWS_QUERY_ENCODE_SET;
use crate::{Credential, SigningProfile};
use async_trait::async_trait;
use http::request::Parts;
use log::debug;
use percent_encoding::utf8_percent_encode;
use querysign_core::hash::base64_hmac_sha256;
use querysign_core::time::{now, DateTime};
use querysign_core::{Context, Error, Result, SignRequest, SigningRequest};
use std::time::Duration;

/// RequestSigner that implement AWS signature version 2 for query requests.
///
/// - [Signature Version 2 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-2.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    profile: SigningProfile,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given profile.
    pub fn new(profile: SigningProfile) -> Self {
        Self {
            profile,

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing or replaying a request.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Profile used by this signer.
    pub fn profile(&self) -> SigningProfile {
        self.profile
    }

    /// Sign the request in place.
    ///
    /// The baseline parameters of the profile and the signature are merged
    /// into `req.query`, which is left sorted by key.
    pub fn sign(&self, req: &mut SigningRequest, cred: &Credential) {
        let now = self.time.unwrap_or_else(now);

        // The service verifies over the query without its signature, so a
        // signature left over from an earlier signing is dropped first.
        req.query_remove(self.profile.signature_key());
        self.profile.apply_values(req, cred, now);

        let string_to_sign = string_to_sign(req);
        debug!("calculated string to sign: {string_to_sign}");

        let signature =
            base64_hmac_sha256(cred.secret_access_key.as_bytes(), string_to_sign.as_bytes());
        self.profile.attach_signature(req, signature);
        req.query_sort_by_key();
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if let Some(expires_in) = expires_in {
            return Err(Error::request_invalid(
                "signature version 2 does not support expiring signatures",
            )
            .with_context(format!("expires_in: {}s", expires_in.as_secs())));
        }
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "no valid credential found to sign the request",
            ));
        };

        let mut signing_req = SigningRequest::build(req)?;
        self.sign(&mut signing_req, cred);
        signing_req.apply(req)
    }
}

/// Form-encode a key or value: unreserved characters are kept, space becomes
/// `+` and every other byte is written as uppercase `%XX`.
fn form_encode(s: &str) -> String {
    s.split(' ')
        .map(|part| utf8_percent_encode(part, &AWS_QUERY_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Build the canonical query string.
///
/// Pairs are sorted as whole `key=value` strings, not by key.
fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
        .collect();
    pairs.sort_unstable();

    pairs
        .join("&")
        .replace('+', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// StringToSign:
///
/// ```text
/// GET
/// sqs.us-east-1.amazonaws.com
/// /
/// AWSAccessKeyId=...&Action=ReceiveMessage&...
/// ```
fn string_to_sign(req: &SigningRequest) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        req.method.as_str().to_uppercase(),
        req.host(),
        req.path_percent_decoded(),
        canonical_query_string(&req.query)
    )
}
