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

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use querysign::aws::Credential;
use querysign::{Context, HttpSend, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// HttpSend that records requests and replies with a canned response.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<(http::Method, http::Uri)>>>,
}

impl MockHttpSend {
    pub fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    pub fn ok(body: &'static str) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn context(&self) -> Context {
        let _ = env_logger::builder().is_test(true).try_init();

        Context::new().with_http_send(self.clone())
    }

    pub fn requests(&self) -> Vec<(http::Method, http::Uri)> {
        self.requests.lock().expect("lock poisoned").clone()
    }

    /// Decoded query of the only request sent.
    pub fn only_query(&self) -> HashMap<String, String> {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "exactly one request must be sent");
        let (method, uri) = &requests[0];
        assert_eq!(*method, http::Method::GET);

        form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push((req.method().clone(), req.uri().clone()));

        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

pub fn credential() -> Credential {
    Credential::new("AKIDEXAMPLE", "secret")
}

/// Assert the parameters every default-profile request carries.
pub fn assert_default_signed(query: &HashMap<String, String>) {
    assert_eq!(query["AWSAccessKeyId"], "AKIDEXAMPLE");
    assert_eq!(query["SignatureVersion"], "2");
    assert_eq!(query["SignatureMethod"], "HmacSHA256");
    assert!(query.contains_key("Timestamp"));
    assert!(query.contains_key("Signature"));
}
