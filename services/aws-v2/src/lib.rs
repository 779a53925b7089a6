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

//! AWS signature version 2 query signer.
//!
//! Signature version 2 signs the query string of a request instead of its
//! headers. Two parameter naming conventions are in use across services and
//! are modeled by [`SigningProfile`]:
//!
//! - [`SigningProfile::Default`]: SNS, SQS, FPS and other query APIs
//!   (`AWSAccessKeyId`, `Timestamp`, `Signature`, ...)
//! - [`SigningProfile::Purchase`]: Simple Pay purchase pipeline links
//!   (`accessKey`, `signature`, ...)
//!
//! ## Example
//!
//! ```
//! use querysign_aws_v2::{Credential, RequestSigner, SigningProfile};
//! use querysign_core::SigningRequest;
//!
//! # fn main() -> querysign_core::Result<()> {
//! let (mut parts, _) = http::Request::get("https://sqs.us-east-1.amazonaws.com/?Action=ListQueues")
//!     .body(())?
//!     .into_parts();
//!
//! let cred = Credential::new("AKIDEXAMPLE", "secret");
//! let mut req = SigningRequest::build(&mut parts)?;
//! RequestSigner::new(SigningProfile::Default).sign(&mut req, &cred);
//! req.apply(&mut parts)?;
//!
//! assert!(parts.uri.query().unwrap_or_default().contains("Signature="));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod profile;
pub use profile::SigningProfile;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;
