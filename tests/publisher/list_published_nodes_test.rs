use futures::StreamExt;
use hyper::Method;
use opc_publisher_client::{
    error::{ClientError, ValidationError},
    publisher_types::{PublishStartRequest, PublishedItem, PublishedItemListRequest},
    PublisherClient,
};

use crate::utils::{self, fake_publisher_service::FakePublisherService};

const ENDPOINT_ID: &str = "list_published_nodes_test";

async fn publish_nodes(client: &PublisherClient, count: usize) {
    for i in 0..count {
        let request = PublishStartRequest::new(PublishedItem::new(format!("i={i:03}")));
        client
            .start_publishing_values(ENDPOINT_ID, &request)
            .await
            .expect("publishing should succeed");
    }
}

#[tokio::test]
async fn test_paginator_visits_every_page_once() {
    // Prepare
    let service = FakePublisherService::new(3);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);
    publish_nodes(&client, 7).await;

    // act
    let mut paginator = client
        .list_published_nodes(ENDPOINT_ID, &PublishedItemListRequest::default())
        .await
        .expect("first page should be returned");

    let mut page_sizes = vec![paginator.current().items().len()];
    while paginator.has_next() {
        let page = utils::run_with_timeout(paginator.next())
            .await
            .expect("next page should be returned");
        page_sizes.push(page.items().len());
    }

    // assert
    assert_eq!(page_sizes, vec![3, 3, 1]);

    let list_requests: Vec<_> = service
        .requests()
        .into_iter()
        .filter(|r| r.url.contains("/v2/publish/") && !r.url.ends_with("/start"))
        .collect();
    assert_eq!(list_requests.len(), 3);
    assert_eq!(list_requests[0].method, Method::POST);
    assert!(list_requests[1..]
        .iter()
        .all(|r| r.method == Method::GET && r.url.contains("?continuationToken=token%2F")));
}

#[tokio::test]
async fn test_stream_returns_all_items_in_order() {
    let service = FakePublisherService::new(2);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);
    publish_nodes(&client, 5).await;

    let node_ids: Vec<String> = utils::run_with_timeout(
        client
            .published_nodes_stream(ENDPOINT_ID)
            .map(|item| item.expect("item should be returned").node_id)
            .collect::<Vec<_>>(),
    )
    .await;

    assert_eq!(node_ids, vec!["i=000", "i=001", "i=002", "i=003", "i=004"]);
}

#[tokio::test]
async fn test_empty_endpoint_yields_single_terminal_page() {
    let service = FakePublisherService::new(2);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);

    let mut paginator = client
        .list_published_nodes(ENDPOINT_ID, &PublishedItemListRequest::default())
        .await
        .unwrap();

    assert!(paginator.current().items().is_empty());
    assert!(!paginator.has_next());
    assert!(matches!(
        paginator.next().await,
        Err(ClientError::Validation(ValidationError::NoMorePages))
    ));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_consumed_token_is_rejected_by_service() {
    let service = FakePublisherService::new(1);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);
    publish_nodes(&client, 3).await;

    let first = client
        .get_first_list_of_published_nodes(ENDPOINT_ID, &PublishedItemListRequest::default())
        .await
        .unwrap();
    let token = first.continuation_token.expect("there should be a token");

    let second = client
        .get_next_list_of_published_nodes(ENDPOINT_ID, &token)
        .await
        .unwrap();
    assert_eq!(second.items.unwrap()[0].node_id, "i=001");

    let replayed = client.get_next_list_of_published_nodes(ENDPOINT_ID, &token).await;
    assert_eq!(replayed.unwrap_err().status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn test_continue_enumeration_from_token() {
    let service = FakePublisherService::new(2);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);
    publish_nodes(&client, 5).await;

    let first = client
        .get_first_list_of_published_nodes(ENDPOINT_ID, &PublishedItemListRequest::default())
        .await
        .unwrap();
    let token = first.continuation_token.unwrap();

    let rest: Vec<String> = client
        .list_published_nodes_from(ENDPOINT_ID, &token)
        .await
        .unwrap()
        .into_stream()
        .map(|item| item.unwrap().node_id)
        .collect()
        .await;

    assert_eq!(rest, vec!["i=002", "i=003", "i=004"]);
}
