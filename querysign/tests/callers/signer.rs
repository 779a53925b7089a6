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

use querysign::aws::{
    DefaultCredentialProvider, RequestSigner, SigningProfile, StaticCredentialProvider,
    AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY,
};
use querysign::time::parse_rfc3339;
use querysign::{Context, Signer, StaticEnv};
use std::collections::HashMap;

fn parts(uri: &str) -> anyhow::Result<http::request::Parts> {
    Ok(http::Request::get(uri).body(())?.into_parts().0)
}

#[tokio::test]
async fn test_signer_with_env_credential() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            (AWS_ACCESS_KEY_ID.to_string(), "AKIDEXAMPLE".to_string()),
            (AWS_SECRET_ACCESS_KEY.to_string(), "secret".to_string()),
        ]),
    });
    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new(),
        RequestSigner::new(SigningProfile::Default)
            .with_time(parse_rfc3339("2020-01-01T00:00:00Z")?),
    );

    let mut req = parts("https://sqs.example.com/?Action=ReceiveMessage&Version=2009-02-01")?;
    signer.sign(&mut req, None).await?;

    assert_eq!(
        req.uri.to_string(),
        "https://sqs.example.com/?AWSAccessKeyId=AKIDEXAMPLE&Action=ReceiveMessage&Signature=rnT6hCW8rfh15Z3q9OOdPsDO16Zql336zSodfjXtdXc%3D&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=2020-01-01T00%3A00%3A00Z&Version=2009-02-01"
    );
    Ok(())
}

#[tokio::test]
async fn test_signer_without_credential() -> anyhow::Result<()> {
    let signer = Signer::new(
        Context::new().with_env(StaticEnv::default()),
        DefaultCredentialProvider::new(),
        RequestSigner::new(SigningProfile::Default),
    );

    let mut req = parts("https://sqs.example.com/?Action=ListQueues")?;
    let err = signer
        .sign(&mut req, None)
        .await
        .expect_err("signing without credential must fail");
    assert!(err.is_credential_error());
    Ok(())
}

#[tokio::test]
async fn test_signer_with_credential_provider() -> anyhow::Result<()> {
    let signer = Signer::new(
        Context::new(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(SigningProfile::Purchase),
    )
    .with_credential_provider(StaticCredentialProvider::new("AKIDEXAMPLE", "secret"));

    let mut req = parts("https://authorize.payments.amazon.com/pba/paypipeline?amount=USD+1.00")?;
    signer.sign(&mut req, None).await?;

    let query: HashMap<String, String> =
        form_urlencoded::parse(req.uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect();
    assert_eq!(query["accessKey"], "AKIDEXAMPLE");
    assert!(query.contains_key("signature"));
    assert!(!query.contains_key("Signature"));
    Ok(())
}
