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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used to load credentials.
/// Env name of the access key id.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Env name of the secret access key.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Env name of the session token.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

// Query parameters written by the default profile.
pub(crate) const TIMESTAMP: &str = "Timestamp";
pub(crate) const AWS_ACCESS_KEY_ID_PARAM: &str = "AWSAccessKeyId";
pub(crate) const SIGNATURE_VERSION: &str = "SignatureVersion";
pub(crate) const SIGNATURE_METHOD: &str = "SignatureMethod";
pub(crate) const SECURITY_TOKEN: &str = "SecurityToken";
pub(crate) const SIGNATURE: &str = "Signature";

// Query parameters written by the purchase profile.
pub(crate) const ACCESS_KEY: &str = "accessKey";
pub(crate) const SIGNATURE_VERSION_LOWER: &str = "signatureVersion";
pub(crate) const SIGNATURE_METHOD_LOWER: &str = "signatureMethod";
pub(crate) const SIGNATURE_LOWER: &str = "signature";

pub(crate) const SIGNATURE_VERSION_VALUE: &str = "2";
pub(crate) const HMAC_SHA256: &str = "HmacSHA256";

/// AsciiSet used to form-encode query keys and values before signing.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is handled by the caller and becomes `+`.
pub(crate) static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
