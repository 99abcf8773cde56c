// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Error type shared by all client operations.

use hyper::StatusCode;
use thiserror::Error;

pub use crate::request_validator::ValidationError;

use crate::http_sender::TransportError;

/// Error returned by the publisher client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request was rejected locally and nothing was sent.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// No response was received, e.g. because the connection failed or timed out.
    #[error("Transport error during `{operation}`: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },
    /// The service answered with a status other than 200.
    #[error("Service returned {status} for `{operation}`: {body}")]
    Service {
        operation: &'static str,
        status: StatusCode,
        /// Raw response body for diagnostics.
        body: String,
    },
    /// The request body could not be serialized.
    #[error("Failed to encode the request of `{operation}`: {source}")]
    Encoding {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The 200 response body did not match the expected json shape.
    #[error("Failed to decode the response of `{operation}`: {source}")]
    Decoding {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns the http status if the error was caused by a service response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type of the publisher client.
pub type Result<T> = std::result::Result<T, ClientError>;
