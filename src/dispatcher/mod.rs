// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! The request dispatcher turns an [`Operation`] into an http exchange.
//!
//! Every publisher operation goes through the same steps:
//! 1. build the url from the base uri, the escaped path and the query parameters,
//! 2. send the request, repeating it for retryable status codes and transport failures,
//! 3. map non-200 responses to [`ClientError::Service`] and decode the json body.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use bytes::Bytes;
use hyper::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use crate::{
    api_paths,
    client_options::{ClientOptions, RetryPolicy},
    error::{ClientError, Result, ValidationError},
    http_sender::{HttpSender, InboundResponse, OutboundRequest},
    request_observer::RequestObserver,
};


/// Content type of all request bodies.
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json; charset=utf-8";

/// A single logical call of the publisher service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Name of the operation, used for errors and observability.
    pub name: &'static str,
    pub method: Method,
    /// Already escaped path, see [`api_paths`].
    pub path: String,
    /// Unescaped query parameters.
    pub query: Vec<(&'static str, String)>,
    /// Serialized json body.
    pub body: Option<Bytes>,
}

impl Operation {
    pub fn new(name: &'static str, method: Method, path: String) -> Self {
        Self {
            name,
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Serializes the body as json.
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(|source| ClientError::Encoding {
            operation: self.name,
            source,
        })?;
        self.body = Some(Bytes::from(body));
        Ok(self)
    }
}

/// Executes operations against the publisher service.
///
/// The dispatcher only holds immutable configuration, so it can be shared between tasks.
pub struct RequestDispatcher {
    base_uri: String,
    retry_policy: RetryPolicy,
    sender: Arc<dyn HttpSender>,
    observer: Arc<dyn RequestObserver>,
}

impl RequestDispatcher {
    /// Creates a dispatcher. Fails if the base uri of the options is not an absolute http(s) uri
    /// without query and fragment.
    pub fn new(
        options: &ClientOptions,
        sender: Arc<dyn HttpSender>,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self> {
        let base_uri = options.get_base_uri();
        let parsed = reqwest::Url::parse(base_uri)
            .map_err(|_| ValidationError::InvalidBaseUri(base_uri.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.cannot_be_a_base()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(ValidationError::InvalidBaseUri(base_uri.to_string()).into());
        }

        Ok(Self {
            base_uri: base_uri.to_string(),
            retry_policy: options.get_retry_policy().clone(),
            sender,
            observer,
        })
    }

    pub fn get_base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Executes the operation and decodes the json response into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, operation: Operation) -> Result<T> {
        self.dispatch(operation, |name, body| {
            serde_json::from_slice(body).map_err(|source| ClientError::Decoding {
                operation: name,
                source,
            })
        })
        .await
    }

    /// Executes an operation that has no response body.
    pub async fn execute_no_content(&self, operation: Operation) -> Result<()> {
        self.dispatch(operation, |_, _| Ok(())).await
    }

    /// Builds the outbound request of an operation.
    pub fn prepare(&self, operation: &Operation) -> OutboundRequest {
        let mut url = format!("{}{}", self.base_uri, operation.path);

        if !operation.query.is_empty() {
            url.push('?');
            url.push_str(&api_paths::build_query_string(&operation.query));
        }

        OutboundRequest {
            method: operation.method.clone(),
            url,
            content_type: operation.body.as_ref().map(|_| JSON_PATCH_CONTENT_TYPE),
            body: operation.body.clone(),
        }
    }

    async fn dispatch<T>(
        &self,
        operation: Operation,
        decode: impl FnOnce(&'static str, &[u8]) -> Result<T>,
    ) -> Result<T> {
        let started = Instant::now();
        let name = operation.name;
        let request = self.prepare(&operation);

        self.observer.on_start(name, &request.method, &request.url);

        let (status, result) = match self.send_with_retry(name, &request).await {
            Ok(response) => {
                let status = response.status;
                let result = Self::check_status(name, response)
                    .and_then(|body| decode(name, body.as_ref()));
                (Some(status), result)
            }
            Err(e) => (None, Err(e)),
        };

        self.observer
            .on_end(name, status, result.as_ref().err(), started.elapsed());

        result
    }

    /// Sends the request until a non retryable status is received or the attempts are used up.
    ///
    /// Transport failures are repeated like retryable statuses. Once the attempts are used up,
    /// the last response is returned regardless of its status, or the last transport error.
    async fn send_with_retry(
        &self,
        name: &'static str,
        request: &OutboundRequest,
    ) -> Result<InboundResponse> {
        let max_attempts = self.retry_policy.get_max_attempts();
        let mut attempt = 1;

        loop {
            // The body of a discarded response is released before waiting.
            let (status, delay) = match self.sender.send(request).await {
                Ok(response) => {
                    trace!("`{name}` attempt {attempt} returned {}", response.status);

                    if attempt >= max_attempts || !self.retry_policy.is_retryable(response.status)
                    {
                        return Ok(response);
                    }
                    (Some(response.status), self.retry_delay(&response))
                }
                Err(source) => {
                    debug!("`{name}` attempt {attempt} failed: {source}");

                    if attempt >= max_attempts {
                        return Err(ClientError::Transport {
                            operation: name,
                            source,
                        });
                    }
                    (None, self.retry_policy.get_delay())
                }
            };

            attempt += 1;
            self.observer.on_retry(name, attempt, status);
            tokio::time::sleep(delay).await;
        }
    }

    /// A `Retry-After` of a 429 or 503 response takes precedence over the policy delay.
    fn retry_delay(&self, response: &InboundResponse) -> Duration {
        match response.retry_after {
            Some(retry_after)
                if matches!(
                    response.status,
                    StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
                ) =>
            {
                retry_after
            }
            _ => self.retry_policy.get_delay(),
        }
    }

    fn check_status(name: &'static str, response: InboundResponse) -> Result<Bytes> {
        if response.status != StatusCode::OK {
            return Err(ClientError::Service {
                operation: name,
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response.body)
    }
}
