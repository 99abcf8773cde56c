use std::collections::HashSet;

use hyper::{Method, StatusCode};

use crate::utils::{self, fake_publisher_service::FakePublisherService};

const ENDPOINT_ID: &str = "sample_subscription_test";

#[tokio::test]
async fn test_subscribe_and_unsubscribe() {
    // Prepare
    let service = FakePublisherService::new(10);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);

    // act
    utils::run_with_timeout(client.subscribe(ENDPOINT_ID, "user-42"))
        .await
        .expect("subscribe should succeed");

    // assert
    assert_eq!(
        service.subscribers(ENDPOINT_ID),
        HashSet::from(["user-42".to_string()])
    );
    let request = service.requests().pop().unwrap();
    assert_eq!(request.method, Method::PUT);
    assert!(request.url.ends_with("/v2/monitor/sample_subscription_test/samples"));

    // act
    utils::run_with_timeout(client.unsubscribe(ENDPOINT_ID, "user-42"))
        .await
        .expect("unsubscribe should succeed");

    // assert
    assert!(service.subscribers(ENDPOINT_ID).is_empty());
}

#[tokio::test]
async fn test_unsubscribe_unknown_user_is_service_error() {
    let service = FakePublisherService::new(10);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);

    let result = client.unsubscribe(ENDPOINT_ID, "nobody").await;

    assert_eq!(result.unwrap_err().status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_subscribe_without_user_is_rejected_by_service() {
    let service = FakePublisherService::new(10);
    service.activate_endpoint(ENDPOINT_ID);
    let client = utils::create_client(&service);

    let result = client.subscribe(ENDPOINT_ID, "").await;

    assert_eq!(result.unwrap_err().status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(service.requests()[0].body, None);
}
