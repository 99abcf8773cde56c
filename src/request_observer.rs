// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Observability hooks of the request dispatcher.
//!
//! An observer is passed to the client at construction time. By default a [`TracingObserver`] is used.

use std::time::Duration;

use hyper::{Method, StatusCode};
use tracing::{debug, trace, warn};

use crate::error::ClientError;

/// Receives notifications about every dispatched operation.
///
/// Implementations must be cheap, they are called inline on the request path.
pub trait RequestObserver: Send + Sync {
    /// Called once before the first send of an operation.
    fn on_start(&self, _operation: &'static str, _method: &Method, _url: &str) {}

    /// Called before a send is repeated.
    ///
    /// `status` is the retryable status of the previous response, `None` after a transport failure.
    fn on_retry(&self, _operation: &'static str, _attempt: u32, _status: Option<StatusCode>) {}

    /// Called once when the operation has finished.
    ///
    /// `status` is the status of the last received response, if any.
    fn on_end(
        &self,
        _operation: &'static str,
        _status: Option<StatusCode>,
        _error: Option<&ClientError>,
        _elapsed: Duration,
    ) {
    }
}

/// Observer that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_start(&self, operation: &'static str, method: &Method, url: &str) {
        trace!("Starting `{operation}`: {method} {url}");
    }

    fn on_retry(&self, operation: &'static str, attempt: u32, status: Option<StatusCode>) {
        match status {
            Some(status) => debug!("Retrying `{operation}` after status {status}, attempt {attempt}"),
            None => debug!("Retrying `{operation}` after transport failure, attempt {attempt}"),
        }
    }

    fn on_end(
        &self,
        operation: &'static str,
        status: Option<StatusCode>,
        error: Option<&ClientError>,
        elapsed: Duration,
    ) {
        let status = status.map_or(-1, |s| i32::from(s.as_u16()));
        match error {
            Some(e) => warn!("`{operation}` failed with status {status} after {elapsed:?}: {e}"),
            None => debug!("`{operation}` finished with status {status} after {elapsed:?}"),
        }
    }
}

/// Observer that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}
