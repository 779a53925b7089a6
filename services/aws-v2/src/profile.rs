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

use crate::constants::*;
use crate::Credential;
use querysign_core::time::{format_rfc3339, DateTime};
use querysign_core::SigningRequest;

/// SigningProfile selects the parameter naming convention used to sign a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigningProfile {
    /// Query APIs such as SNS, SQS and FPS.
    ///
    /// Writes `Timestamp`, `AWSAccessKeyId`, `SignatureVersion`,
    /// `SignatureMethod` and, for temporary credentials, `SecurityToken`.
    /// The signature goes to `Signature`.
    #[default]
    Default,
    /// Simple Pay purchase pipeline.
    ///
    /// Writes `accessKey`, `signatureVersion` and `signatureMethod`.
    /// The signature goes to `signature`. No timestamp is included.
    Purchase,
}

impl SigningProfile {
    /// Baseline parameters this profile adds before signing.
    pub fn values_for(self, cred: &Credential, now: DateTime) -> Vec<(&'static str, String)> {
        match self {
            SigningProfile::Default => {
                let mut values = vec![
                    (TIMESTAMP, format_rfc3339(now)),
                    (AWS_ACCESS_KEY_ID_PARAM, cred.access_key_id.clone()),
                    (SIGNATURE_VERSION, SIGNATURE_VERSION_VALUE.to_string()),
                    (SIGNATURE_METHOD, HMAC_SHA256.to_string()),
                ];
                if let Some(token) = &cred.session_token {
                    values.push((SECURITY_TOKEN, token.clone()));
                }
                values
            }
            SigningProfile::Purchase => vec![
                (ACCESS_KEY, cred.access_key_id.clone()),
                (SIGNATURE_VERSION_LOWER, SIGNATURE_VERSION_VALUE.to_string()),
                (SIGNATURE_METHOD_LOWER, HMAC_SHA256.to_string()),
            ],
        }
    }

    /// Query parameter name the signature is written to.
    pub fn signature_key(self) -> &'static str {
        match self {
            SigningProfile::Default => SIGNATURE,
            SigningProfile::Purchase => SIGNATURE_LOWER,
        }
    }

    /// Write the baseline parameters into the request, replacing existing values.
    pub(crate) fn apply_values(self, req: &mut SigningRequest, cred: &Credential, now: DateTime) {
        for (k, v) in self.values_for(cred, now) {
            req.query_set(k, v);
        }
    }

    /// Write the signature into the request, replacing any previous one.
    pub fn attach_signature(self, req: &mut SigningRequest, signature: String) {
        req.query_set(self.signature_key(), signature);
    }
}
