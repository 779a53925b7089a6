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

//! Amazon Simple Queue Service.

use std::time::Duration;

use querysign_aws_v2::{Credential, SigningProfile};
use querysign_core::{Context, Error, Result};
use serde::Deserialize;

use crate::service::{self, ResponseMetadata};

const VERSION: &str = "2009-02-01";
const VISIBILITY_TIMEOUT: &str = "5";
const MAX_WAIT_SECONDS: u64 = 20;
const MAX_MESSAGES: usize = 10;

/// An SQS queue identified by its url.
#[derive(Debug, Clone)]
pub struct Queue {
    url: String,
}

/// A received message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Handle used to delete this message.
    pub receipt_handle: String,
    /// Message body.
    pub body: String,
}

impl Queue {
    /// Create a queue from its url, like
    /// `https://sqs.us-east-1.amazonaws.com/123456789012/jobs`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.url.trim_end_matches('/'))
    }

    /// Receive at most `max` messages, waiting up to `wait` for them to arrive.
    ///
    /// Received messages stay invisible to other consumers for 5 seconds.
    pub async fn receive_messages(
        &self,
        ctx: &Context,
        cred: &Credential,
        max: usize,
        wait: Duration,
    ) -> Result<Vec<Message>> {
        let seconds = wait.as_secs();
        if seconds > MAX_WAIT_SECONDS {
            return Err(Error::request_invalid(format!(
                "wait time must be no longer than {MAX_WAIT_SECONDS} seconds"
            ))
            .with_context(format!("wait: {seconds}s"))
            .with_context(format!("queue: {}", self.url)));
        }
        if max > MAX_MESSAGES {
            return Err(Error::request_invalid(format!(
                "max messages must be no larger than {MAX_MESSAGES}"
            ))
            .with_context(format!("max: {max}"))
            .with_context(format!("queue: {}", self.url)));
        }

        let max = max.to_string();
        let seconds = seconds.to_string();
        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            &self.endpoint(),
            &[
                ("Action", "ReceiveMessage"),
                ("MaxNumberOfMessages", max.as_str()),
                ("VisibilityTimeout", VISIBILITY_TIMEOUT),
                ("WaitTimeSeconds", seconds.as_str()),
                ("Version", VERSION),
            ],
        )?;

        let resp: ReceiveMessageResponse = service::send(ctx, req, "ReceiveMessage")
            .await
            .map_err(|e| e.with_context(format!("queue: {}", self.url)))?;
        log::debug!(
            "received {} messages from {}, request id {}",
            resp.receive_message_result.message.len(),
            self.url,
            resp.response_metadata.request_id
        );

        Ok(resp
            .receive_message_result
            .message
            .into_iter()
            .map(|m| Message {
                receipt_handle: m.receipt_handle,
                body: m.body,
            })
            .collect())
    }

    /// Delete a message by its receipt handle.
    ///
    /// Succeeds once the request has been sent, the response is not inspected.
    pub async fn delete_message(
        &self,
        ctx: &Context,
        cred: &Credential,
        receipt_handle: &str,
    ) -> Result<()> {
        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            &self.endpoint(),
            &[
                ("Action", "DeleteMessage"),
                ("ReceiptHandle", receipt_handle),
                ("Version", VERSION),
            ],
        )?;

        service::send_ignore_body(ctx, req, "DeleteMessage")
            .await
            .map_err(|e| e.with_context(format!("queue: {}", self.url)))
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ReceiveMessageResponse {
    receive_message_result: ReceiveMessageResult,
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ReceiveMessageResult {
    message: Vec<SqsMessage>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SqsMessage {
    receipt_handle: String,
    body: String,
}
