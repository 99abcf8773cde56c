// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Request and response types of the publisher service API.
//!
//! The structure of these types is owned by the service schema.
//! Optional properties are omitted from the request json if unset and unknown response properties are ignored.

use serde::{Deserialize, Serialize};

use crate::paginator::Page;

/// A node whose values are published by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItem {
    /// Node id of the published variable.
    pub node_id: String,
    /// Display name of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Publishing interval, as a duration string in the service format (e.g. `00:00:01`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_interval: Option<String>,
    /// Sampling interval, as a duration string in the service format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_interval: Option<String>,
    /// Heartbeat interval, as a duration string in the service format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_interval: Option<String>,
}

impl PublishedItem {
    /// Creates a published item with only the node id set.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Default::default()
        }
    }
}

/// Request body for the first page of published nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItemListRequest {
    /// Continuation token to start the listing from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// One page of published nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItemListResponse {
    /// The published items of this page.
    #[serde(default)]
    pub items: Option<Vec<PublishedItem>>,
    /// Token to fetch the next page. Absent or empty on the last page.
    #[serde(default)]
    pub continuation_token: Option<String>,
}

impl From<PublishedItemListResponse> for Page<PublishedItem> {
    fn from(response: PublishedItemListResponse) -> Self {
        Page::new(
            response.items.unwrap_or_default(),
            response.continuation_token,
        )
    }
}

/// Request body to start publishing a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStartRequest {
    /// The item to publish. Required.
    #[serde(default)]
    pub item: Option<PublishedItem>,
    /// Optional request header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<RequestHeader>,
}

impl PublishStartRequest {
    /// Creates a start request for the given item.
    pub fn new(item: PublishedItem) -> Self {
        Self {
            item: Some(item),
            header: None,
        }
    }
}

/// Result of a start publishing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStartResponse {
    /// Service result, if the service reported a problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ServiceResult>,
}

/// Request body to stop publishing a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStopRequest {
    /// Node id of the item to stop publishing. Required.
    pub node_id: String,
    /// Optional request header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<RequestHeader>,
}

impl PublishStopRequest {
    /// Creates a stop request for the given node id.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            header: None,
        }
    }
}

/// Result of a stop publishing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStopResponse {
    /// Service result, if the service reported a problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ServiceResult>,
}

/// Status information reported by the service for a single operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult {
    /// OPC UA status code, 0 means good.
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Service specific diagnostics, passed through as raw json.
    #[serde(default)]
    pub diagnostics: Option<serde_json::Value>,
}

impl ServiceResult {
    /// Returns true if the result carries neither a bad status code nor an error message.
    pub fn is_good(&self) -> bool {
        self.status_code.unwrap_or(0) == 0 && self.error_message.is_none()
    }
}

/// Optional header of publish requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    /// Credential to elevate the session with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<Credential>,
    /// Preferred locales of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsOptions>,
}

/// Credential passed in a [`RequestHeader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    /// Credential value, the structure depends on the credential type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Type of a [`Credential`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialType {
    None,
    UserName,
    X509Certificate,
    JwtToken,
}

/// Diagnostics requested for an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<DiagnosticsLevel>,
    /// Client supplied id to correlate the operation in the audit log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<String>,
    /// Client timestamp, as an RFC 3339 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
}

/// Amount of diagnostics returned by the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticsLevel {
    None,
    Status,
    Operations,
    Diagnostics,
    Verbose,
}
