use pdf_batch_submit::error::RemoteError;
use pdf_batch_submit::models::{FileHandle, SplitParameters};
use pdf_batch_submit::{Config, PdfServiceClient, RemoteProcessor};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout_secs: u64) -> PdfServiceClient {
    let config = Config {
        service_base_url: server.uri(),
        request_timeout_secs: timeout_secs,
        ..Config::default()
    };
    PdfServiceClient::new(&config).unwrap()
}

fn pdf(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, format!("%PDF-1.4 {}", name).into_bytes())
}

#[tokio::test]
async fn test_merge_posts_files_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .and(body_string_contains("name=\"files\"; filename=\"a.pdf\""))
        .and(body_string_contains("name=\"files\"; filename=\"b.pdf\""))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=merged.pdf")
                .set_body_bytes(b"%PDF-1.7 merged".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let payload = client.merge(&[pdf("a.pdf"), pdf("b.pdf")]).await.unwrap();
    assert_eq!(payload.as_ref(), b"%PDF-1.7 merged");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    let first = body.find("filename=\"a.pdf\"").unwrap();
    let second = body.find("filename=\"b.pdf\"").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_split_sends_page_range_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/split"))
        .and(body_string_contains("name=\"file\"; filename=\"x.pdf\""))
        .and(body_string_contains("name=\"start_page\"\r\n\r\n2"))
        .and(body_string_contains("name=\"end_page\"\r\n\r\n4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF split".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let payload = client
        .split(&pdf("x.pdf"), SplitParameters::new(2, 4))
        .await
        .unwrap();
    assert_eq!(payload.as_ref(), b"%PDF split");
}

#[tokio::test]
async fn test_convert_uses_images_field_and_mime() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert"))
        .and(body_string_contains("name=\"images\"; filename=\"scan.png\""))
        .and(body_string_contains("Content-Type: image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF converted".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let image = FileHandle::from_bytes("scan.png", b"not really a png".to_vec());
    assert!(client.convert(&[image]).await.is_ok());
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "No files uploaded" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let err = client.merge(&[pdf("a.pdf")]).await.unwrap_err();

    match err {
        RemoteError::BadResponse {
            endpoint,
            status,
            message,
        } => {
            assert_eq!(endpoint, "merge");
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("No files uploaded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let err = client.convert(&[pdf("1.png")]).await.unwrap_err();
    assert!(matches!(err, RemoteError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/merge"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let err = client.merge(&[pdf("a.pdf")]).await.unwrap_err();
    assert!(matches!(err, RemoteError::Timeout { secs: 1, .. }));
}

#[tokio::test]
async fn test_unreadable_input_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let missing = FileHandle::from_path("/definitely/not/here.pdf");
    let err = client.merge(&[pdf("a.pdf"), missing]).await.unwrap_err();

    match err {
        RemoteError::Input { name, .. } => assert_eq!(name, "here.pdf"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let config = Config {
        service_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    let client = PdfServiceClient::new(&config).unwrap();

    let err = client.merge(&[pdf("a.pdf")]).await.unwrap_err();
    assert!(matches!(
        err,
        RemoteError::Request { .. } | RemoteError::Timeout { .. }
    ));
}
