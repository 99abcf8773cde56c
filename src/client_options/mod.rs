// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Configuration of the publisher client.

use std::time::Duration;

pub mod retry_policy;

pub use retry_policy::RetryPolicy;


/// Address of the publisher service on a local development setup.
pub const DEFAULT_PUBLISHER_SERVICE_ADDRESS: &str = "http://localhost:9080";

/// User agent that is sent if no other one is configured.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Immutable settings of a publisher client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    base_uri: String,
    retry_policy: RetryPolicy,
    user_agent: String,
    request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptionsBuilder::new().build()
    }
}

impl ClientOptions {
    /// Base uri without trailing slash.
    pub fn get_base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn get_retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn get_user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Timeout of a single send. `None` means no timeout besides the one of the transport.
    pub fn get_request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Helper struct to build the client options.
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl Default for ClientOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: ClientOptions {
                base_uri: DEFAULT_PUBLISHER_SERVICE_ADDRESS.to_string(),
                retry_policy: RetryPolicy::default(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                request_timeout: None,
            },
        }
    }

    /// Allows to specify a different service address.
    ///
    /// If not specified, uses [`DEFAULT_PUBLISHER_SERVICE_ADDRESS`].
    /// Trailing slashes are removed.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        let base_uri: String = base_uri.into();
        self.options.base_uri = base_uri.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.options.retry_policy = retry_policy;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Limits the time of a single send, including reading the response body.
    ///
    /// A timed out send fails with a transport error and is retried like other transport failures.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }

    /// Builds the client options.
    pub fn build(self) -> ClientOptions {
        self.options
    }
}
