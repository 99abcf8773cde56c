// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! This module provides the high-level API of the publisher service.
//!
//! All operations require an endpoint that was activated and connected before,
//! and the publisher module and the OPC UA server must trust each other.
//!
//! ```no_run
//! use opc_publisher_client::{
//!     client_options::ClientOptionsBuilder,
//!     publisher_types::{PublishStartRequest, PublishedItem},
//!     PublisherClient,
//! };
//!
//! async fn start_publishing() -> anyhow::Result<()> {
//!     let options = ClientOptionsBuilder::new()
//!         .with_base_uri("http://localhost:9080")
//!         .build();
//!     let client = PublisherClient::new(&options)?;
//!
//!     let request = PublishStartRequest::new(PublishedItem::new("ns=2;s=Temperature"));
//!     let response = client.start_publishing_values("my-endpoint", &request).await?;
//!
//!     if let Some(error_info) = response.error_info {
//!         eprintln!("Publishing was rejected: {error_info:?}");
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use futures::{FutureExt, Stream, StreamExt};
use hyper::Method;

use crate::{
    api_paths,
    client_options::ClientOptions,
    dispatcher::{Operation, RequestDispatcher},
    error::{ClientError, Result},
    http_sender::{HttpSender, ReqwestSender},
    paginator::{FetchNextPage, Page, Paginator},
    publisher_types::{
        PublishStartRequest, PublishStartResponse, PublishStopRequest, PublishStopResponse,
        PublishedItem, PublishedItemListRequest, PublishedItemListResponse,
    },
    request_observer::{RequestObserver, TracingObserver},
    request_validator::validate_parameter,
};


/// Client of the publisher service.
///
/// Cloning is cheap, all clones share the same transport and configuration.
#[derive(Clone)]
pub struct PublisherClient {
    dispatcher: Arc<RequestDispatcher>,
}

impl PublisherClient {
    /// Creates a client that talks to the service via reqwest and reports to `tracing`.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let sender = ReqwestSender::new(options).map_err(|e| ClientError::Transport {
            operation: "CreateClient",
            source: e.into(),
        })?;

        Self::with_sender(options, Arc::new(sender), Arc::new(TracingObserver))
    }

    /// Creates a client with a custom transport and observer.
    pub fn with_sender(
        options: &ClientOptions,
        sender: Arc<dyn HttpSender>,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self> {
        let dispatcher = RequestDispatcher::new(options, sender, observer)?;
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// Allows access to the low level dispatcher.
    pub fn get_dispatcher(&self) -> &Arc<RequestDispatcher> {
        &self.dispatcher
    }

    /// Returns the first page of currently published node ids of an endpoint.
    pub async fn get_first_list_of_published_nodes(
        &self,
        endpoint_id: &str,
        request: &PublishedItemListRequest,
    ) -> Result<PublishedItemListResponse> {
        validate_parameter("endpointId", endpoint_id)?;

        let operation = Operation::new(
            "GetFirstListOfPublishedNodes",
            Method::POST,
            api_paths::published_nodes(endpoint_id),
        )
        .with_json_body(request)?;

        self.dispatcher.execute(operation).await
    }

    /// Returns the page of published node ids that follows the continuation token.
    pub async fn get_next_list_of_published_nodes(
        &self,
        endpoint_id: &str,
        continuation_token: &str,
    ) -> Result<PublishedItemListResponse> {
        validate_parameter("endpointId", endpoint_id)?;
        validate_parameter(api_paths::CONTINUATION_TOKEN_QUERY, continuation_token)?;

        let operation = Operation::new(
            "GetNextListOfPublishedNodes",
            Method::GET,
            api_paths::published_nodes(endpoint_id),
        )
        .with_query(api_paths::CONTINUATION_TOKEN_QUERY, continuation_token);

        self.dispatcher.execute(operation).await
    }

    /// Fetches the first page of published nodes and returns a paginator over the following pages.
    pub async fn list_published_nodes(
        &self,
        endpoint_id: &str,
        request: &PublishedItemListRequest,
    ) -> Result<Paginator<PublishedItem>> {
        let first_page = self
            .get_first_list_of_published_nodes(endpoint_id, request)
            .await?;

        Ok(Paginator::new(
            first_page.into(),
            self.fetch_next_published_nodes(endpoint_id),
        ))
    }

    /// Fetches the page that follows the continuation token and returns a paginator starting there.
    pub async fn list_published_nodes_from(
        &self,
        endpoint_id: &str,
        continuation_token: &str,
    ) -> Result<Paginator<PublishedItem>> {
        let page = self
            .get_next_list_of_published_nodes(endpoint_id, continuation_token)
            .await?;

        Ok(Paginator::new(
            page.into(),
            self.fetch_next_published_nodes(endpoint_id),
        ))
    }

    /// Returns a stream of all published items of an endpoint, crossing page boundaries as required.
    ///
    /// Nothing is sent before the stream is polled. The first error ends the stream.
    pub fn published_nodes_stream(
        &self,
        endpoint_id: &str,
    ) -> impl Stream<Item = Result<PublishedItem>> + Send {
        let client = self.clone();
        let endpoint_id = endpoint_id.to_string();

        let first_page = async move {
            client
                .list_published_nodes(&endpoint_id, &PublishedItemListRequest::default())
                .await
        };

        first_page
            .map(|result| match result {
                Ok(paginator) => paginator.into_stream().left_stream(),
                Err(e) => futures::stream::once(async move { Result::<PublishedItem>::Err(e) })
                    .right_stream(),
            })
            .flatten_stream()
    }

    /// Starts publishing the values of a variable node.
    pub async fn start_publishing_values(
        &self,
        endpoint_id: &str,
        request: &PublishStartRequest,
    ) -> Result<PublishStartResponse> {
        validate_parameter("endpointId", endpoint_id)?;
        request.validate()?;

        let operation = Operation::new(
            "StartPublishingValues",
            Method::POST,
            api_paths::start_publishing(endpoint_id),
        )
        .with_json_body(request)?;

        self.dispatcher.execute(operation).await
    }

    /// Stops publishing the values of a variable node.
    pub async fn stop_publishing_values(
        &self,
        endpoint_id: &str,
        request: &PublishStopRequest,
    ) -> Result<PublishStopResponse> {
        validate_parameter("endpointId", endpoint_id)?;
        request.validate()?;

        let operation = Operation::new(
            "StopPublishingValues",
            Method::POST,
            api_paths::stop_publishing(endpoint_id),
        )
        .with_json_body(request)?;

        self.dispatcher.execute(operation).await
    }

    /// Registers a user to receive the published samples of an endpoint.
    ///
    /// The user id is sent as json string body. An empty user id is sent without body.
    pub async fn subscribe(&self, endpoint_id: &str, user_id: &str) -> Result<()> {
        validate_parameter("endpointId", endpoint_id)?;

        let mut operation = Operation::new(
            "Subscribe",
            Method::PUT,
            api_paths::samples_subscription(endpoint_id),
        );

        if !user_id.is_empty() {
            operation = operation.with_json_body(user_id)?;
        }

        self.dispatcher.execute_no_content(operation).await
    }

    /// Unregisters a user so that it stops receiving samples of an endpoint.
    pub async fn unsubscribe(&self, endpoint_id: &str, user_id: &str) -> Result<()> {
        validate_parameter("endpointId", endpoint_id)?;
        validate_parameter("userId", user_id)?;

        let operation = Operation::new(
            "Unsubscribe",
            Method::DELETE,
            api_paths::samples_unsubscription(endpoint_id, user_id),
        );

        self.dispatcher.execute_no_content(operation).await
    }

    /// Binds the next page request to the endpoint, for use by a paginator.
    fn fetch_next_published_nodes(&self, endpoint_id: &str) -> FetchNextPage<PublishedItem> {
        let client = self.clone();
        let endpoint_id = endpoint_id.to_string();

        Box::new(move |token: String| {
            let client = client.clone();
            let endpoint_id = endpoint_id.clone();
            async move {
                client
                    .get_next_list_of_published_nodes(&endpoint_id, &token)
                    .await
                    .map(Page::from)
            }
            .boxed()
        })
    }
}
