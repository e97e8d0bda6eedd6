use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use itemfeed_core::Record;
use itemfeed_engine::{FetchSettings, NetworkFailure, RemoteSource, ReqwestSource, SourceError};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"[
    {"id": 755, "listId": 2, "name": ""},
    {"id": 203, "listId": 2, "name": "Item 203"},
    {"id": 906, "listId": 2, "name": null},
    {"id": 684, "listId": 1, "name": "Item 684"}
]"#;

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn source_for(server: &MockServer, route: &str) -> ReqwestSource {
    ReqwestSource::new(FetchSettings {
        endpoint: format!("{}{}", server.uri(), route),
        ..FetchSettings::default()
    })
}

#[tokio::test]
async fn source_decodes_feed_in_wire_order() {
    let server = serve(
        "/hiring.json",
        ResponseTemplate::new(200).set_body_raw(FEED, "application/json"),
    )
    .await;

    let records = source_for(&server, "/hiring.json").fetch().await.expect("fetch ok");

    assert_eq!(
        records,
        vec![
            Record::new(755, 2, ""),
            Record::new(203, 2, "Item 203"),
            Record::unnamed(906, 2),
            Record::new(684, 1, "Item 684"),
        ]
    );
}

#[tokio::test]
async fn source_accepts_any_content_type() {
    let server = serve(
        "/feed",
        ResponseTemplate::new(200).set_body_raw("[]", "binary/octet-stream"),
    )
    .await;

    let records = source_for(&server, "/feed").fetch().await.expect("fetch ok");
    assert!(records.is_empty());
}

#[tokio::test]
async fn source_fails_on_http_status() {
    let server = serve("/missing", ResponseTemplate::new(404)).await;

    let err = source_for(&server, "/missing").fetch().await.unwrap_err();

    assert_eq!(err.network_kind(), Some(&NetworkFailure::HttpStatus(404)));
}

#[tokio::test]
async fn source_fails_on_server_error() {
    let server = serve("/feed", ResponseTemplate::new(503)).await;

    let err = source_for(&server, "/feed").fetch().await.unwrap_err();

    assert_eq!(err.network_kind(), Some(&NetworkFailure::HttpStatus(503)));
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("[]"),
        )
        .mount(&server)
        .await;

    let source = ReqwestSource::new(FetchSettings {
        endpoint: format!("{}/slow", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.network_kind(), Some(&NetworkFailure::Timeout));
}

#[tokio::test]
async fn source_rejects_too_large_response() {
    let server = serve(
        "/large",
        ResponseTemplate::new(200).set_body_string("[1234567890]"),
    )
    .await;

    let source = ReqwestSource::new(FetchSettings {
        endpoint: format!("{}/large", server.uri()),
        max_bytes: 10,
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert_eq!(
        err.network_kind(),
        Some(&NetworkFailure::TooLarge {
            max_bytes: 10,
            actual: Some(12)
        })
    );
}

#[tokio::test]
async fn source_reports_malformed_json_as_decode_error() {
    let server = serve(
        "/feed",
        ResponseTemplate::new(200).set_body_raw("[{\"id\": 1,", "application/json"),
    )
    .await;

    let err = source_for(&server, "/feed").fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn source_fails_whole_payload_on_one_bad_entry() {
    let body = r#"[{"id": 1, "listId": 1, "name": "Item 1"}, {"id": 2, "listId": 1}]"#;
    let server = serve(
        "/feed",
        ResponseTemplate::new(200).set_body_raw(body, "application/json"),
    )
    .await;

    let err = source_for(&server, "/feed").fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn source_rejects_invalid_endpoint() {
    let source = ReqwestSource::new(FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.network_kind(), Some(&NetworkFailure::InvalidUrl));
}

#[tokio::test]
async fn source_reports_unreachable_host_as_network_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/feed", server.uri());
    drop(server);

    let source = ReqwestSource::new(FetchSettings {
        endpoint,
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Network { .. }));
}

#[tokio::test]
async fn source_stops_after_redirect_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(FetchSettings {
        endpoint: format!("{}/loop", server.uri()),
        redirect_limit: 2,
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.network_kind(), Some(&NetworkFailure::RedirectLimitExceeded));
}

/// Serves one chunked response, which carries no `Content-Length` header.
async fn serve_chunked(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/feed")
}

#[tokio::test]
async fn source_rejects_oversized_stream_without_content_length() {
    let body = r#"[{"id": 1, "listId": 1, "name": "Item 1"}]"#;
    let endpoint = serve_chunked(body).await;

    let source = ReqwestSource::new(FetchSettings {
        endpoint,
        max_bytes: 16,
        ..FetchSettings::default()
    });

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(
        err.network_kind(),
        Some(NetworkFailure::TooLarge {
            max_bytes: 16,
            actual: Some(actual),
        }) if *actual > 16 && *actual <= body.len() as u64
    ));
}

#[tokio::test]
async fn source_accepts_chunked_body_within_limit() {
    let body = r#"[{"id": 1, "listId": 1, "name": "Item 1"}]"#;
    let endpoint = serve_chunked(body).await;

    let source = ReqwestSource::new(FetchSettings {
        endpoint,
        ..FetchSettings::default()
    });

    let records = source.fetch().await.expect("fetch ok");
    assert_eq!(records, vec![Record::new(1, 1, "Item 1")]);
}
