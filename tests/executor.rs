use std::time::Duration;

use serde_json::json;
use tinypost::{Header, HttpExecutor, HttpMethod, RequestDescriptor, ResponseOutcome, Transport};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn executor() -> HttpExecutor {
    HttpExecutor::new(Duration::from_secs(5))
}

fn descriptor(method: HttpMethod, url: String) -> RequestDescriptor {
    RequestDescriptor {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

#[tokio::test]
async fn json_body_and_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("x-trace", "abc"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "widget", "tags": ["a"]})))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":7}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = descriptor(HttpMethod::POST, format!("{}/items", server.uri()));
    request.headers = vec![Header::new("X-Trace", "abc")];
    request.body = Some(json!({"name": "widget", "tags": ["a"]}));

    let ResponseOutcome::Success(success) = executor().execute(&request).await else {
        panic!("expected success");
    };
    assert_eq!(success.status, 201);
    assert_eq!(success.raw_body, r#"{"id":7}"#);
    assert_eq!(success.structured, Some(json!({"id": 7})));
    assert!(success.elapsed_ms >= 0.0);
}

#[tokio::test]
async fn duplicate_request_headers_all_go_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut request = descriptor(HttpMethod::GET, format!("{}/tags", server.uri()));
    request.headers = vec![Header::new("X-Tag", "a"), Header::new("X-Tag", "b")];
    assert!(executor().execute(&request).await.is_success());

    let received = server.received_requests().await.unwrap();
    let tags: Vec<&str> = received[0]
        .headers
        .get_all("x-tag")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(tags, ["a", "b"]);
}

#[tokio::test]
async fn absent_body_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let request = descriptor(HttpMethod::PUT, format!("{}/empty", server.uri()));
    let outcome = executor().execute(&request).await;
    assert!(outcome.is_success());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
    assert!(received[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn user_content_type_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(header("content-type", "application/merge-patch+json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = descriptor(HttpMethod::PATCH, format!("{}/x", server.uri()));
    request.headers = vec![Header::new("Content-Type", "application/merge-patch+json")];
    request.body = Some(json!({"a": null}));

    assert!(executor().execute(&request).await.is_success());
}

#[tokio::test]
async fn error_statuses_are_still_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&server)
        .await;

    let request = descriptor(HttpMethod::DELETE, format!("{}/things/1", server.uri()));
    let ResponseOutcome::Success(success) = executor().execute(&request).await else {
        panic!("expected success");
    };
    assert_eq!(success.status, 503);
    assert_eq!(success.raw_body, "down for maintenance");
    assert_eq!(success.structured, None);
}

#[tokio::test]
async fn duplicate_response_headers_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "b=2"),
        )
        .mount(&server)
        .await;

    let request = descriptor(HttpMethod::GET, server.uri());
    let ResponseOutcome::Success(success) = executor().execute(&request).await else {
        panic!("expected success");
    };
    let cookies: Vec<&str> = success
        .headers
        .iter()
        .filter(|h| h.key == "set-cookie")
        .map(|h| h.value.as_str())
        .collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
}

#[tokio::test]
async fn connection_refused_is_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let request = descriptor(HttpMethod::GET, format!("http://127.0.0.1:{}/", port));
    let ResponseOutcome::Failure { message } = executor().execute(&request).await else {
        panic!("expected failure");
    };
    assert!(message.starts_with("Connection failed"), "{}", message);
}

#[tokio::test]
async fn timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(Duration::from_millis(200));
    let request = descriptor(HttpMethod::GET, server.uri());
    let ResponseOutcome::Failure { message } = executor.execute(&request).await else {
        panic!("expected failure");
    };
    assert_eq!(message, "Request timed out after 200ms");
}

#[tokio::test]
async fn malformed_requests_are_failures() {
    let outcome = executor()
        .execute(&descriptor(HttpMethod::GET, "not a url".to_string()))
        .await;
    assert!(matches!(outcome, ResponseOutcome::Failure { .. }));

    let server = MockServer::start().await;
    let mut request = descriptor(HttpMethod::GET, server.uri());
    request.headers = vec![Header::new("bad name", "x")];
    let outcome = executor().execute(&request).await;
    assert!(matches!(outcome, ResponseOutcome::Failure { .. }));
}
