//! Welcome to the OPC UA Publisher service client library.
//!
//! This library exposes the REST API of the publisher service as typed async methods:
//! listing the published nodes of an endpoint page by page, starting and stopping the
//! publishing of node values and subscribing users to sample notifications.
//!
//! As a starting point, please take a look at the [client] module documentation.
//! Paging is described in the [paginator] module.

pub mod api_paths;
pub mod client;
pub mod client_options;
pub mod dispatcher;
pub mod error;
pub mod http_sender;
pub mod paginator;
pub mod publisher_types;
pub mod request_observer;
pub mod request_validator;


pub use client::PublisherClient;

/// Commonly used imports for the publisher client library.
pub mod prelude {
    pub use crate::client::PublisherClient;
    pub use crate::client_options::{
        ClientOptions, ClientOptionsBuilder, RetryPolicy, DEFAULT_PUBLISHER_SERVICE_ADDRESS,
    };
    pub use crate::error::{ClientError, Result, ValidationError};
    pub use crate::paginator::{Page, Paginator};
    pub use crate::publisher_types::{
        PublishStartRequest, PublishStartResponse, PublishStopRequest, PublishStopResponse,
        PublishedItem, PublishedItemListRequest, PublishedItemListResponse, ServiceResult,
    };
    pub use crate::request_observer::{RequestObserver, TracingObserver};
}
