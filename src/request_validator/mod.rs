// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! This module contains the client side validation of requests.
//!
//! The checks only catch obviously malformed requests before anything is sent.
//! The service performs its own validation and stays authoritative.

use thiserror::Error;

use crate::publisher_types::{PublishStartRequest, PublishStopRequest};


/// Errors when validating a request before it is sent.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A required parameter is empty.
    #[error("The parameter `{0}` must not be empty")]
    EmptyParameter(&'static str),
    /// A required property of the request body is missing.
    #[error("The property `{0}` is required")]
    MissingProperty(&'static str),
    /// The page has no continuation token, so there is nothing to fetch.
    #[error("There is no continuation token to fetch a next page with")]
    NoMorePages,
    /// The configured base uri cannot be combined with the request path.
    #[error("Invalid base uri `{0}`")]
    InvalidBaseUri(String),
}

/// Checks that a path or query parameter is not empty.
pub fn validate_parameter(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyParameter(name));
    }
    Ok(())
}

impl PublishStartRequest {
    /// Checks if the request names an item with a node id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let item = self
            .item
            .as_ref()
            .ok_or(ValidationError::MissingProperty("item"))?;

        if item.node_id.is_empty() {
            return Err(ValidationError::MissingProperty("item.nodeId"));
        }

        Ok(())
    }
}

impl PublishStopRequest {
    /// Checks if the request carries a node id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.node_id.is_empty() {
            return Err(ValidationError::MissingProperty("nodeId"));
        }
        Ok(())
    }
}
