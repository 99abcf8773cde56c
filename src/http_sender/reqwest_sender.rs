// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;
use hyper::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};

use crate::client_options::ClientOptions;

use super::{HttpSender, InboundResponse, OutboundRequest, TransportError};

/// [`HttpSender`] backed by a [`reqwest::Client`].
///
/// The connection pool is owned by the reqwest client, so clones share their connections.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    /// Creates a reqwest client with the user agent and request timeout of the options.
    pub fn new(options: &ClientOptions) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(options.get_user_agent());

        if let Some(timeout) = options.get_request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Uses an already configured reqwest client, e.g. one with custom tls settings.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: &OutboundRequest) -> Result<InboundResponse, TransportError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = response.bytes().await?;

        Ok(InboundResponse {
            status,
            body,
            retry_after,
        })
    }
}

/// Reads a `Retry-After` header given in seconds. Http dates are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(seconds))
}
