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

use super::mock::{assert_default_signed, credential, MockHttpSend};
use querysign::sqs::{Message, Queue};
use querysign::ErrorKind;
use std::time::Duration;

const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/jobs";

#[tokio::test]
async fn test_receive_messages() -> anyhow::Result<()> {
    let mock = MockHttpSend::ok(
        r#"<ReceiveMessageResponse>
  <ReceiveMessageResult>
    <Message>
      <MessageId>5fea7756-0ea4-451a-a703-a558b933e274</MessageId>
      <ReceiptHandle>handle-1</ReceiptHandle>
      <Body>first</Body>
    </Message>
    <Message>
      <MessageId>7a2c1f0e-3b4d-4e5f-8a9b-0c1d2e3f4a5b</MessageId>
      <ReceiptHandle>handle-2</ReceiptHandle>
      <Body>second</Body>
    </Message>
  </ReceiveMessageResult>
  <ResponseMetadata>
    <RequestId>b6633655-283d-45b4-aee4-4e84e0ae6afa</RequestId>
  </ResponseMetadata>
</ReceiveMessageResponse>"#,
    );

    let messages = Queue::new(QUEUE_URL)
        .receive_messages(&mock.context(), &credential(), 10, Duration::from_millis(20_900))
        .await?;

    assert_eq!(
        messages,
        vec![
            Message {
                receipt_handle: "handle-1".to_string(),
                body: "first".to_string(),
            },
            Message {
                receipt_handle: "handle-2".to_string(),
                body: "second".to_string(),
            },
        ]
    );

    let (_, uri) = &mock.requests()[0];
    assert_eq!(uri.path(), "/123456789012/jobs/");

    let query = mock.only_query();
    assert_default_signed(&query);
    assert_eq!(query["Action"], "ReceiveMessage");
    assert_eq!(query["MaxNumberOfMessages"], "10");
    assert_eq!(query["VisibilityTimeout"], "5");
    assert_eq!(query["WaitTimeSeconds"], "20");
    assert_eq!(query["Version"], "2009-02-01");
    Ok(())
}

#[tokio::test]
async fn test_receive_messages_rejects_long_wait() {
    let mock = MockHttpSend::ok("");

    let err = Queue::new(QUEUE_URL)
        .receive_messages(&mock.context(), &credential(), 1, Duration::from_secs(21))
        .await
        .expect_err("wait above 20 seconds must be rejected");

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(err.message(), "wait time must be no longer than 20 seconds");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_receive_messages_rejects_too_many() {
    let mock = MockHttpSend::ok("");

    let err = Queue::new(QUEUE_URL)
        .receive_messages(&mock.context(), &credential(), 11, Duration::ZERO)
        .await
        .expect_err("more than 10 messages must be rejected");

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_delete_message() -> anyhow::Result<()> {
    let mock = MockHttpSend::ok("<DeleteMessageResponse/>");

    Queue::new(QUEUE_URL)
        .delete_message(&mock.context(), &credential(), "MbZj6wDWli+JvwwJaBV+3dcjk2YW2vA3")
        .await?;

    let query = mock.only_query();
    assert_default_signed(&query);
    assert_eq!(query["Action"], "DeleteMessage");
    assert_eq!(query["ReceiptHandle"], "MbZj6wDWli+JvwwJaBV+3dcjk2YW2vA3");
    assert_eq!(query["Version"], "2009-02-01");
    Ok(())
}
