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

//! AWS signature version 2 signing.

pub use querysign_aws_v2::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Default AWS signature version 2 signer.
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Create a signer for the given profile with the default context and the
/// default credential provider.
#[cfg(feature = "default-context")]
pub fn default_signer(profile: SigningProfile) -> DefaultSigner {
    let ctx = default_context();
    let provider = DefaultCredentialProvider::new();
    let signer = RequestSigner::new(profile);
    Signer::new(ctx, provider, signer)
}
