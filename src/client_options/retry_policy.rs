// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Retry-on-status-code policy of the request dispatcher.

use std::{collections::HashSet, time::Duration};

use hyper::StatusCode;

/// Status codes that are retried by default.
pub const DEFAULT_RETRY_STATUS_CODES: [StatusCode; 6] = [
    StatusCode::REQUEST_TIMEOUT,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Default number of sends per request, including the first one.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between two sends of the same request.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Determines which responses are resent and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    status_codes: HashSet<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            status_codes: HashSet::from(DEFAULT_RETRY_STATUS_CODES),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy that sends every request exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Sets the maximum number of sends per request, including the first one.
    ///
    /// Values below 1 are treated as 1.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the delay between two sends.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the set of retryable status codes.
    pub fn status_codes(mut self, status_codes: impl IntoIterator<Item = StatusCode>) -> Self {
        self.status_codes = status_codes.into_iter().collect();
        self
    }

    pub fn get_max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn get_delay(&self) -> Duration {
        self.delay
    }

    /// Returns true if a response with this status should be sent again.
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.status_codes.contains(&status)
    }
}
