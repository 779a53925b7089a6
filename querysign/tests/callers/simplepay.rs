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
use http::StatusCode;
use pretty_assertions::assert_eq;
use querysign::simplepay::{Purchase, Store, Transaction};
use querysign::ErrorKind;

fn store() -> Store {
    Store {
        sandbox: false,
        return_url: "https://shop.example.com/return".to_string(),
    }
}

#[test]
fn test_create_purchase_url() -> anyhow::Result<()> {
    let item = Purchase {
        description: "Blue Widget".to_string(),
        price: "USD 10.00".to_string(),
        reference_id: Some("order-1".to_string()),
    };

    let url = store().create_purchase_url(&credential(), &item)?;
    assert_eq!(
        url,
        "https://authorize.payments.amazon.com/pba/paypipeline?accessKey=AKIDEXAMPLE&amount=USD+10.00&cobrandingStyle=logo&description=Blue+Widget&immediateReturn=1&processImmediate=0&referenceId=order-1&returnURL=https%3A%2F%2Fshop.example.com%2Freturn&signature=%2BVSTiK21sEPiFfrn9kFJMdIxxzXeTIxffpoclHgnCyo%3D&signatureMethod=HmacSHA256&signatureVersion=2"
    );
    Ok(())
}

#[test]
fn test_create_purchase_url_in_sandbox() -> anyhow::Result<()> {
    let store = Store {
        sandbox: true,
        ..store()
    };
    let item = Purchase {
        description: "Blue Widget".to_string(),
        price: "USD 10.00".to_string(),
        reference_id: None,
    };

    let url = store.create_purchase_url(&credential(), &item)?;
    assert!(url.starts_with("https://authorize.payments-sandbox.amazon.com/pba/paypipeline?"));
    assert!(!url.contains("referenceId"));
    assert!(!url.contains("Timestamp"));
    Ok(())
}

#[test]
fn test_create_purchase_url_rejects_non_usd() {
    let item = Purchase {
        description: "Blue Widget".to_string(),
        price: "EUR 10.00".to_string(),
        reference_id: None,
    };

    let err = store()
        .create_purchase_url(&credential(), &item)
        .expect_err("non USD price must be rejected");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

#[tokio::test]
async fn test_get_transaction_status() -> anyhow::Result<()> {
    let mock = MockHttpSend::ok(
        r#"<GetTransactionStatusResponse xmlns="http://fps.amazonaws.com/doc/2008-09-17/">
  <GetTransactionStatusResult>
    <TransactionId>14GK6F2QU755ODS27SGHEURLKPG72Z54KMF</TransactionId>
    <TransactionStatus>Success</TransactionStatus>
    <StatusCode>Success</StatusCode>
    <StatusMessage>The transaction was successful.</StatusMessage>
  </GetTransactionStatusResult>
</GetTransactionStatusResponse>"#,
    );

    let transaction = store()
        .get_transaction_status(&mock.context(), &credential(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF")
        .await?;
    assert_eq!(
        transaction,
        Transaction {
            transaction_id: "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF".to_string(),
            transaction_status: "Success".to_string(),
        }
    );

    let (_, uri) = &mock.requests()[0];
    assert_eq!(uri.host(), Some("fps.amazonaws.com"));

    let query = mock.only_query();
    assert_default_signed(&query);
    assert_eq!(query["Action"], "GetTransactionStatus");
    assert_eq!(query["TransactionId"], "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF");
    assert_eq!(query["Version"], "2008-09-17");
    Ok(())
}

#[tokio::test]
async fn test_get_transaction_status_pending() {
    let mock = MockHttpSend::ok(
        r#"<GetTransactionStatusResponse>
  <GetTransactionStatusResult>
    <TransactionId>14GK6F2QU755ODS27SGHEURLKPG72Z54KMF</TransactionId>
    <TransactionStatus>Pending</TransactionStatus>
    <StatusCode>PendingNetworkResponse</StatusCode>
    <StatusMessage>Awaiting response from the network.</StatusMessage>
  </GetTransactionStatusResult>
</GetTransactionStatusResponse>"#,
    );

    let err = store()
        .get_transaction_status(&mock.context(), &credential(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF")
        .await
        .expect_err("non success status must fail");
    assert_eq!(
        err.message(),
        "transaction has invalid status: (PendingNetworkResponse) Awaiting response from the network."
    );
}

#[tokio::test]
async fn test_settle_transaction() -> anyhow::Result<()> {
    let mock = MockHttpSend::ok(
        r#"<SettleResponse xmlns="http://fps.amazonaws.com/doc/2008-09-17/">
  <SettleResult>
    <TransactionId>14GK6F2QU755ODS27SGHEURLKPG72Z54KMF</TransactionId>
    <TransactionStatus>Pending</TransactionStatus>
  </SettleResult>
</SettleResponse>"#,
    );

    let transaction = store()
        .settle_transaction(&mock.context(), &credential(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF", "USD 10.00")
        .await?;
    assert_eq!(transaction.transaction_status, "Pending");

    let query = mock.only_query();
    assert_default_signed(&query);
    assert_eq!(query["Action"], "Settle");
    assert_eq!(query["ReserveTransactionId"], "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF");
    assert_eq!(query["TransactionAmount.CurrencyCode"], "USD");
    assert_eq!(query["TransactionAmount.Value"], "10.00");
    Ok(())
}

#[tokio::test]
async fn test_settle_transaction_reported_error() {
    let mock = MockHttpSend::ok(
        r#"<Response>
  <Errors>
    <Error>
      <Code>InvalidTransactionState</Code>
      <Message>The transaction is not in a state that can be settled.</Message>
    </Error>
  </Errors>
  <RequestID>0a9f1e3c-5b7d-4a1e-9c2f-8d6b4e2a1c3f</RequestID>
</Response>"#,
    );

    let err = store()
        .settle_transaction(&mock.context(), &credential(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF", "USD 10.00")
        .await
        .expect_err("reported error must fail");
    assert_eq!(
        err.message(),
        "Settle failed: InvalidTransactionState: The transaction is not in a state that can be settled."
    );
}

#[tokio::test]
async fn test_settle_transaction_rejects_non_usd() {
    let mock = MockHttpSend::ok("");

    let err = store()
        .settle_transaction(&mock.context(), &credential(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF", "10.00")
        .await
        .expect_err("non USD amount must be rejected");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_verify_payment_params() -> anyhow::Result<()> {
    let mock = MockHttpSend::ok(
        r#"<VerifySignatureResponse xmlns="http://fps.amazonaws.com/doc/2008-09-17/">
  <VerifySignatureResult>
    <VerificationStatus>Success</VerificationStatus>
  </VerifySignatureResult>
</VerifySignatureResponse>"#,
    );

    let params = vec![
        ("transactionId".to_string(), "14GK6F2QU755ODS27SGHEURLKPG72Z54KMF".to_string()),
        ("status".to_string(), "PR".to_string()),
        ("referenceId".to_string(), "order 1".to_string()),
    ];
    store()
        .verify_payment_params(&mock.context(), &credential(), &params)
        .await?;

    let query = mock.only_query();
    assert_default_signed(&query);
    assert_eq!(query["Action"], "VerifySignature");
    assert_eq!(query["UrlEndPoint"], "https://shop.example.com/return");
    assert_eq!(
        query["HttpParameters"],
        "referenceId=order+1&status=PR&transactionId=14GK6F2QU755ODS27SGHEURLKPG72Z54KMF"
    );
    Ok(())
}

#[tokio::test]
async fn test_verify_payment_params_failure() {
    let mock = MockHttpSend::ok(
        r#"<VerifySignatureResponse>
  <VerifySignatureResult>
    <VerificationStatus>Failure</VerificationStatus>
  </VerifySignatureResult>
</VerifySignatureResponse>"#,
    );

    let err = store()
        .verify_payment_params(&mock.context(), &credential(), &[])
        .await
        .expect_err("failed verification must be reported");
    assert_eq!(err.message(), "invalid signature verification: Failure");
}

#[tokio::test]
async fn test_fps_error_status() {
    let mock = MockHttpSend::new(
        StatusCode::BAD_REQUEST,
        r#"<Response>
  <Errors>
    <Error>
      <Code>InvalidParams</Code>
      <Message>Transaction id is malformed.</Message>
    </Error>
  </Errors>
  <RequestID>0a9f1e3c-5b7d-4a1e-9c2f-8d6b4e2a1c3f</RequestID>
</Response>"#,
    );

    let err = store()
        .get_transaction_status(&mock.context(), &credential(), "bad")
        .await
        .expect_err("error status must fail");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(
        err.message(),
        "GetTransactionStatus failed: InvalidParams: Transaction id is malformed."
    );
}
