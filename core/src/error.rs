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

use std::fmt;

/// Error returned by querysign.
///
/// Besides a [`ErrorKind`] and a message, an error may carry the error that
/// caused it and a list of context lines such as `uri: https://...`. Context
/// lines are rendered after the message:
///
/// ```
/// use querysign_core::Error;
///
/// let err = Error::request_invalid("max messages must be in 1..=10").with_context("max: 11");
/// assert_eq!(err.to_string(), "max messages must be in 1..=10 (max: 11)");
/// ```
#[derive(thiserror::Error, Debug)]
#[error("{message}{}", ContextLines(.context))]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
}

/// What went wrong, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential could be loaded, or the loaded one is empty.
    CredentialInvalid,
    /// The request can't be signed, or the service refused it.
    RequestInvalid,
    /// Transport failures and responses we can't understand.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::CredentialInvalid => "credential invalid",
            ErrorKind::RequestInvalid => "request invalid",
            ErrorKind::Unexpected => "unexpected",
        })
    }
}

/// Result with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an error of `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            source: None,
            context: vec![],
        }
    }

    /// Shorthand for [`ErrorKind::CredentialInvalid`].
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::CredentialInvalid, message)
    }

    /// Shorthand for [`ErrorKind::RequestInvalid`].
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::RequestInvalid, message)
    }

    /// Shorthand for [`ErrorKind::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Unexpected, message)
    }

    /// Set the underlying cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append one context line.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message without the context lines.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context lines in the order they were added.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Whether this error is about the credential.
    pub fn is_credential_error(&self) -> bool {
        matches!(self.kind, ErrorKind::CredentialInvalid)
    }
}

struct ContextLines<'a>(&'a [String]);

impl fmt::Display for ContextLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => Ok(()),
            lines => write!(f, " ({})", lines.join(", ")),
        }
    }
}

/// Malformed uris and requests can only come from the caller.
macro_rules! request_invalid_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Error::request_invalid(err.to_string()).with_source(err)
                }
            }
        )+
    };
}

request_invalid_from!(
    http::Error,
    http::uri::InvalidUri,
    http::uri::InvalidUriParts,
);
