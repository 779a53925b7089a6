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

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Context carries the pluggable pieces a signer or service caller may need:
/// an HTTP transport and a view of environment variables.
///
/// A fresh context can neither send requests nor see any environment
/// variable. Plug in what you need:
///
/// ```
/// use querysign_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// assert!(ctx.env_var("QUERYSIGN_SURELY_UNSET_VARIABLE").is_none());
/// ```
#[derive(Clone)]
pub struct Context {
    transport: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Context {
    /// Create a context without transport and with an empty environment.
    pub fn new() -> Self {
        Self {
            transport: Arc::new(NoopHttpSend),
            env: Arc::new(StaticEnv::default()),
        }
    }

    /// Use `transport` to send requests.
    pub fn with_http_send(mut self, transport: impl HttpSend) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Read environment variables from `env`.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Send a request through the configured transport.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.transport.http_send(req).await
    }

    /// Send a request and decode the response body as UTF-8, replacing
    /// invalid sequences.
    pub async fn http_send_as_string(
        &self,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<String>> {
        let resp = self.transport.http_send(req).await?;
        Ok(resp.map(|body| String::from_utf8_lossy(&body).into_owned()))
    }

    /// Look up an environment variable. Missing and non UTF-8 values are `None`.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("transport", &self.transport)
            .field("env", &self.env)
            .finish()
    }
}

/// HttpSend sends the signed requests built by service callers.
#[async_trait::async_trait]
pub trait HttpSend: fmt::Debug + Send + Sync + 'static {
    /// Send `req` and collect the whole response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env is the source of environment variables, so credentials can be loaded
/// from a fixed map in tests.
pub trait Env: fmt::Debug + Send + Sync + 'static {
    /// Get an environment variable.
    fn var(&self, key: &str) -> Option<String>;
}

/// Environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of environment variables.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Variables visible through this env.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// Transport of a context nobody configured, every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected("no http transport configured in context")
            .with_context(format!("uri: {}", req.uri())))
    }
}
