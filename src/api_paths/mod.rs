// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! Contains constants and functions for building the publisher service request paths.
//!
//! Every path parameter is escaped as a single path segment, so callers can pass
//! raw endpoint and user ids.
use const_format::formatcp;


/// API version prefix of all publisher service routes.
pub const VERSION_PREFIX: &str = "v2";
/// Route prefix of the publishing operations.
//Safety: formatcp uses unchecked indexing internally, so this creates a false positive for us.
#[allow(clippy::indexing_slicing)]
pub const PUBLISH_PREFIX: &str = formatcp!("/{VERSION_PREFIX}/publish");
/// Route prefix of the sample monitoring operations.
#[allow(clippy::indexing_slicing)]
pub const MONITOR_PREFIX: &str = formatcp!("/{VERSION_PREFIX}/monitor");

/// Name of the query parameter carrying the continuation token.
pub const CONTINUATION_TOKEN_QUERY: &str = "continuationToken";

/// Escapes a value for use as a single url path segment.
#[inline(always)]
pub fn escape_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds a query string (without the leading `?`) from name/value pairs.
///
/// Names and values are escaped for the query component. Returns an empty string if no pairs are given.
pub fn build_query_string(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Path for listing the published nodes of an endpoint.
///
/// Used with `POST` for the first page and with `GET` plus [`CONTINUATION_TOKEN_QUERY`] for the following pages.
#[inline(always)]
pub fn published_nodes(endpoint_id: &str) -> String {
    format!("{PUBLISH_PREFIX}/{}", escape_path_segment(endpoint_id))
}

/// Path to start publishing node values of an endpoint.
#[inline(always)]
pub fn start_publishing(endpoint_id: &str) -> String {
    format!("{PUBLISH_PREFIX}/{}/start", escape_path_segment(endpoint_id))
}

/// Path to stop publishing node values of an endpoint.
#[inline(always)]
pub fn stop_publishing(endpoint_id: &str) -> String {
    format!("{PUBLISH_PREFIX}/{}/stop", escape_path_segment(endpoint_id))
}

/// Path to register a user for the sample notifications of an endpoint.
#[inline(always)]
pub fn samples_subscription(endpoint_id: &str) -> String {
    format!("{MONITOR_PREFIX}/{}/samples", escape_path_segment(endpoint_id))
}

/// Path to unregister a user from the sample notifications of an endpoint.
#[inline(always)]
pub fn samples_unsubscription(endpoint_id: &str, user_id: &str) -> String {
    format!(
        "{MONITOR_PREFIX}/{}/samples/{}",
        escape_path_segment(endpoint_id),
        escape_path_segment(user_id)
    )
}
