use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use hyper::{Method, StatusCode};
use opc_publisher_client::{
    http_sender::{HttpSender, InboundResponse, OutboundRequest, TransportError},
    publisher_types::{
        PublishStartRequest, PublishStopRequest, PublishedItem, PublishedItemListResponse,
        ServiceResult,
    },
};
use serde_json::json;

use super::FAKE_SERVICE_ADDRESS;

#[derive(Debug, Default)]
pub struct FakePublisherState {
    /// Published items per endpoint, ordered by node id.
    published: HashMap<String, BTreeMap<String, PublishedItem>>,
    /// Subscribed users per endpoint.
    subscribers: HashMap<String, HashSet<String>>,
    /// Continuation tokens that were issued and not consumed yet, mapped to their offset.
    open_tokens: HashMap<String, usize>,
    next_token_id: u64,
    /// Number of upcoming requests that are answered with 503.
    unavailable_for: usize,
    requests: Vec<OutboundRequest>,
}

type SharedFakePublisherState = Arc<Mutex<FakePublisherState>>;

/// In-memory stand-in for the publisher service.
///
/// Only endpoints added via [`Self::activate_endpoint`] are known, all others answer with 404.
/// Continuation tokens are one-shot, a consumed token answers with 400.
#[derive(Clone)]
pub struct FakePublisherService {
    state: SharedFakePublisherState,
    page_size: usize,
}

impl FakePublisherService {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: Arc::default(),
            page_size,
        }
    }

    pub fn activate_endpoint(&self, endpoint_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.published.entry(endpoint_id.to_string()).or_default();
        state.subscribers.entry(endpoint_id.to_string()).or_default();
    }

    pub fn set_unavailable_for(&self, requests: usize) {
        self.state.lock().unwrap().unavailable_for = requests;
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn subscribers(&self, endpoint_id: &str) -> HashSet<String> {
        self.state
            .lock()
            .unwrap()
            .subscribers
            .get(endpoint_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn published_node_ids(&self, endpoint_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .published
            .get(endpoint_id)
            .map(|items| items.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn handle(&self, request: &OutboundRequest) -> InboundResponse {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state.unavailable_for > 0 {
            state.unavailable_for -= 1;
            return InboundResponse::new(StatusCode::SERVICE_UNAVAILABLE, "busy");
        }

        let Some(relative) = request.url.strip_prefix(FAKE_SERVICE_ADDRESS) else {
            return InboundResponse::new(StatusCode::BAD_REQUEST, "unknown host");
        };
        let (path, query) = relative.split_once('?').unwrap_or((relative, ""));
        let segments: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::decode(segment).unwrap().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let endpoint_id = match segments.as_slice() {
            ["v2", _, endpoint_id, ..] => endpoint_id.to_string(),
            _ => return InboundResponse::new(StatusCode::NOT_FOUND, "unknown route"),
        };
        if !state.published.contains_key(&endpoint_id) {
            return InboundResponse::new(StatusCode::NOT_FOUND, "endpoint not activated");
        }

        let body: serde_json::Value = request
            .body
            .as_ref()
            .map(|body| serde_json::from_slice(body).unwrap())
            .unwrap_or(serde_json::Value::Null);

        match (&request.method, segments.as_slice()) {
            (&Method::POST, ["v2", "publish", _]) => self.list(&mut state, &endpoint_id, 0),
            (&Method::GET, ["v2", "publish", _]) => {
                let token = query
                    .strip_prefix("continuationToken=")
                    .map(|token| urlencoding::decode(token).unwrap().into_owned())
                    .unwrap_or_default();
                match state.open_tokens.remove(&token) {
                    Some(offset) => self.list(&mut state, &endpoint_id, offset),
                    None => InboundResponse::new(StatusCode::BAD_REQUEST, "invalid token"),
                }
            }
            (&Method::POST, ["v2", "publish", _, "start"]) => {
                let request: PublishStartRequest = serde_json::from_value(body).unwrap();
                let item = request.item.unwrap();
                let error_info = if item.node_id.starts_with("bad") {
                    Some(ServiceResult {
                        status_code: Some(0x8034_0000),
                        error_message: Some("BadNodeIdUnknown".to_string()),
                        diagnostics: None,
                    })
                } else {
                    state
                        .published
                        .entry(endpoint_id)
                        .or_default()
                        .insert(item.node_id.clone(), item);
                    None
                };
                InboundResponse::new(StatusCode::OK, json!({ "errorInfo": error_info }).to_string())
            }
            (&Method::POST, ["v2", "publish", _, "stop"]) => {
                let request: PublishStopRequest = serde_json::from_value(body).unwrap();
                let removed = state
                    .published
                    .entry(endpoint_id)
                    .or_default()
                    .remove(&request.node_id);
                let body = match removed {
                    Some(_) => json!({}),
                    None => json!({ "errorInfo": { "statusCode": 0x8034_0000_u32, "errorMessage": "not published" } }),
                };
                InboundResponse::new(StatusCode::OK, body.to_string())
            }
            (&Method::PUT, ["v2", "monitor", _, "samples"]) => {
                let Some(user_id) = body.as_str() else {
                    return InboundResponse::new(StatusCode::BAD_REQUEST, "user id required");
                };
                state
                    .subscribers
                    .entry(endpoint_id)
                    .or_default()
                    .insert(user_id.to_string());
                InboundResponse::new(StatusCode::OK, "")
            }
            (&Method::DELETE, ["v2", "monitor", _, "samples", user_id]) => {
                let removed = state
                    .subscribers
                    .entry(endpoint_id)
                    .or_default()
                    .remove(*user_id);
                if removed {
                    InboundResponse::new(StatusCode::OK, "")
                } else {
                    InboundResponse::new(StatusCode::NOT_FOUND, "not subscribed")
                }
            }
            _ => InboundResponse::new(StatusCode::METHOD_NOT_ALLOWED, "unsupported"),
        }
    }

    fn list(
        &self,
        state: &mut FakePublisherState,
        endpoint_id: &str,
        offset: usize,
    ) -> InboundResponse {
        let all: Vec<PublishedItem> = state
            .published
            .get(endpoint_id)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default();

        let items: Vec<PublishedItem> = all.iter().skip(offset).take(self.page_size).cloned().collect();
        let next_offset = offset + items.len();

        let continuation_token = if next_offset < all.len() {
            state.next_token_id += 1;
            let token = format!("token/{}+{}", state.next_token_id, next_offset);
            state.open_tokens.insert(token.clone(), next_offset);
            Some(token)
        } else {
            None
        };

        let response = PublishedItemListResponse {
            items: Some(items),
            continuation_token,
        };
        InboundResponse::new(StatusCode::OK, serde_json::to_string(&response).unwrap())
    }
}

#[async_trait]
impl HttpSender for FakePublisherService {
    async fn send(&self, request: &OutboundRequest) -> Result<InboundResponse, TransportError> {
        Ok(self.handle(request))
    }
}
