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

//! Amazon Simple Pay and Flexible Payments Service.
//!
//! Purchase links are signed with [`SigningProfile::Purchase`], FPS API calls
//! with [`SigningProfile::Default`].

use querysign_aws_v2::{Credential, SigningProfile};
use querysign_core::{Context, Error, Result, SigningRequest};
use serde::Deserialize;

use crate::service::{self, ErrorList};

const FPS_VERSION: &str = "2008-09-17";
const USD_PREFIX: &str = "USD ";

/// Store-wide settings.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Use the sandbox endpoints.
    pub sandbox: bool,
    /// Where buyers are sent back after a purchase.
    pub return_url: String,
}

/// A purchasable item.
#[derive(Debug, Clone, Default)]
pub struct Purchase {
    /// Shown to the buyer.
    pub description: String,
    /// Price like `USD 10.00`. Only USD is supported.
    pub price: String,
    /// Caller's own reference, echoed back on return.
    pub reference_id: Option<String>,
}

/// Status of a transaction reported by FPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction id.
    pub transaction_id: String,
    /// Status such as `Pending` or `Success`.
    pub transaction_status: String,
}

impl Store {
    fn pipeline_url(&self) -> &'static str {
        if self.sandbox {
            "https://authorize.payments-sandbox.amazon.com/pba/paypipeline"
        } else {
            "https://authorize.payments.amazon.com/pba/paypipeline"
        }
    }

    fn fps_url(&self) -> &'static str {
        if self.sandbox {
            "https://fps.sandbox.amazonaws.com/"
        } else {
            "https://fps.amazonaws.com/"
        }
    }

    /// Create a signed url the buyer can follow to purchase `item`.
    ///
    /// No request is sent.
    pub fn create_purchase_url(&self, cred: &Credential, item: &Purchase) -> Result<String> {
        if !item.price.starts_with(USD_PREFIX) {
            return Err(Error::request_invalid("only USD prices are supported")
                .with_context(format!("price: {}", item.price)));
        }

        let mut params = vec![
            ("description", item.description.as_str()),
            ("amount", item.price.as_str()),
            ("cobrandingStyle", "logo"),
            ("immediateReturn", "1"),
            ("processImmediate", "0"),
        ];
        if let Some(reference_id) = item.reference_id.as_deref().filter(|v| !v.is_empty()) {
            params.push(("referenceId", reference_id));
        }
        params.push(("returnURL", self.return_url.as_str()));

        let req = service::signed_request(
            SigningProfile::Purchase,
            cred,
            self.pipeline_url(),
            &params,
        )?;
        Ok(req.uri().to_string())
    }

    /// Get the status of a transaction.
    ///
    /// Fails unless FPS reports the status code `Success`.
    pub async fn get_transaction_status(
        &self,
        ctx: &Context,
        cred: &Credential,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            self.fps_url(),
            &[
                ("Action", "GetTransactionStatus"),
                ("TransactionId", transaction_id),
                ("Version", FPS_VERSION),
            ],
        )?;

        let resp: GetTransactionStatusResponse =
            service::send(ctx, req, "GetTransactionStatus")
                .await
                .map_err(|e| e.with_context(format!("transaction_id: {transaction_id}")))?;
        let result = resp.get_transaction_status_result;
        if result.status_code != "Success" {
            return Err(Error::request_invalid(format!(
                "transaction has invalid status: ({}) {}",
                result.status_code, result.status_message
            ))
            .with_context(format!("transaction_id: {transaction_id}")));
        }

        Ok(Transaction {
            transaction_id: result.transaction_id,
            transaction_status: result.transaction_status,
        })
    }

    /// Settle a reserved transaction for `amount`, like `USD 10.00`.
    pub async fn settle_transaction(
        &self,
        ctx: &Context,
        cred: &Credential,
        transaction_id: &str,
        amount: &str,
    ) -> Result<Transaction> {
        let Some(value) = amount.strip_prefix(USD_PREFIX) else {
            return Err(Error::request_invalid("only USD transactions can be settled")
                .with_context(format!("amount: {amount}"))
                .with_context(format!("transaction_id: {transaction_id}")));
        };

        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            self.fps_url(),
            &[
                ("Action", "Settle"),
                ("ReserveTransactionId", transaction_id),
                ("TransactionAmount.CurrencyCode", "USD"),
                ("TransactionAmount.Value", value),
                ("Version", FPS_VERSION),
            ],
        )?;

        let resp: SettleResponse = service::send(ctx, req, "Settle")
            .await
            .map_err(|e| e.with_context(format!("transaction_id: {transaction_id}")))?;
        if let Some(err) = resp.errors.first() {
            return Err(Error::request_invalid(format!(
                "Settle failed: {}: {}",
                err.code, err.message
            ))
            .with_context(format!("transaction_id: {transaction_id}")));
        }

        Ok(Transaction {
            transaction_id: resp.settle_result.transaction_id,
            transaction_status: resp.settle_result.transaction_status,
        })
    }

    /// Ask FPS to verify the signature of parameters received on
    /// [`Store::return_url`].
    pub async fn verify_payment_params(
        &self,
        ctx: &Context,
        cred: &Credential,
        params: &[(String, String)],
    ) -> Result<()> {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort_by(|l, r| l.0.cmp(&r.0));
        let sorted: Vec<(&str, &str)> = sorted
            .into_iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let http_parameters = SigningRequest::query_to_form_string(&sorted);

        let req = service::signed_request(
            SigningProfile::Default,
            cred,
            self.fps_url(),
            &[
                ("Action", "VerifySignature"),
                ("UrlEndPoint", self.return_url.as_str()),
                ("HttpParameters", http_parameters.as_str()),
                ("Version", FPS_VERSION),
            ],
        )?;

        let resp: VerifySignatureResponse = service::send(ctx, req, "VerifySignature").await?;
        if let Some(err) = resp.errors.first() {
            return Err(Error::request_invalid(format!(
                "failed to validate signature: {}",
                err.message
            ))
            .with_context(format!("code: {}", err.code)));
        }

        let status = resp.verify_signature_result.verification_status;
        if status != "Success" {
            return Err(Error::request_invalid(format!(
                "invalid signature verification: {status}"
            )));
        }

        Ok(())
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct GetTransactionStatusResponse {
    get_transaction_status_result: GetTransactionStatusResult,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct GetTransactionStatusResult {
    transaction_id: String,
    transaction_status: String,
    status_code: String,
    status_message: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SettleResponse {
    settle_result: SettleResult,
    errors: ErrorList,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SettleResult {
    transaction_id: String,
    transaction_status: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct VerifySignatureResponse {
    verify_signature_result: VerifySignatureResult,
    errors: ErrorList,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct VerifySignatureResult {
    verification_status: String,
}
