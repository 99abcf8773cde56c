// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Abstraction of the http transport used by the request dispatcher.
//!
//! The dispatcher only needs a single request/response exchange with a fully read body,
//! so alternative transports or test fakes can be plugged in via [`HttpSender`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use hyper::{Method, StatusCode};

mod reqwest_sender;

pub use reqwest_sender::ReqwestSender;

/// Error of a transport that did not produce a response.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// A fully prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: Method,
    /// Absolute url including the escaped path and query.
    pub url: String,
    pub content_type: Option<&'static str>,
    pub body: Option<Bytes>,
}

/// A received response with its complete body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundResponse {
    pub status: StatusCode,
    pub body: Bytes,
    /// Delay requested by the service with a `Retry-After` header.
    pub retry_after: Option<Duration>,
}

impl InboundResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

/// Sends a single request and returns the response.
///
/// Implementations must read or drop the whole response body before returning,
/// so no connection stays blocked by an unread body.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<InboundResponse, TransportError>;
}
