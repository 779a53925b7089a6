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

//! Amazon Simple Notification Service.

use querysign_aws_v2::{Credential, SigningProfile};
use querysign_core::{Context, Result};
use serde::Deserialize;

use crate::service::{self, ResponseMetadata};

/// An SNS topic identified by its endpoint host and ARN.
#[derive(Debug, Clone)]
pub struct Topic {
    host: String,
    arn: String,
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutput {
    /// Id assigned to the published message.
    pub message_id: String,
    /// Id of the request, useful when contacting support.
    pub request_id: String,
}

impl Topic {
    /// Create a topic for a host such as `sns.us-east-1.amazonaws.com`.
    pub fn new(host: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            arn: arn.into(),
        }
    }

    /// Publish a message to this topic.
    pub async fn publish(
        &self,
        ctx: &Context,
        cred: &Credential,
        message: &str,
    ) -> Result<PublishOutput> {
        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            &format!("https://{}/", self.host),
            &[
                ("Action", "Publish"),
                ("TopicArn", self.arn.as_str()),
                ("Message", message),
            ],
        )
        .map_err(|e| e.with_context(format!("topic: {}", self.arn)))?;

        let resp: PublishResponse = service::send(ctx, req, "Publish")
            .await
            .map_err(|e| e.with_context(format!("topic: {}", self.arn)))?;

        Ok(PublishOutput {
            message_id: resp.publish_result.message_id,
            request_id: resp.response_metadata.request_id,
        })
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PublishResponse {
    publish_result: PublishResult,
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PublishResult {
    message_id: String,
}
