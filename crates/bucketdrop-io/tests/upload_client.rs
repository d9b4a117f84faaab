//! Integration test: send uploads through the real HTTP client to a
//! one-shot stub server and check both the request and the decoded reply.

#![cfg(not(target_arch = "wasm32"))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use bucketdrop_core::types::DEFAULT_UPLOAD_FAILURE;
use bucketdrop_core::{FileInfo, SelectedFile, UploadError};
use bucketdrop_io::{ClientConfig, UploadClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Start a server that answers exactly one request with `status` and
/// `body`, and returns the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (format!("http://{addr}/api"), handle)
}

/// Read one HTTP request (headers plus a `Content-Length` body).
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client_for(base_url: &str) -> UploadClient {
    UploadClient::new(ClientConfig::new(base_url).unwrap())
}

fn cat_png() -> SelectedFile {
    SelectedFile::new(
        FileInfo::new("cat.png", 11, "image/png"),
        b"not-a-png!!".to_vec(),
    )
}

#[tokio::test]
async fn successful_upload_posts_multipart_file_field() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"success":true,"message":"Archivo subido exitosamente","fileName":"cat.png"}"#,
    )
    .await;

    let resp = client_for(&base_url).upload(&cat_png()).await.unwrap();
    assert!(resp.success);
    assert_eq!(resp.file_name, "cat.png");

    let request = server.await.unwrap();
    assert!(
        request.starts_with("POST /api/v1/files HTTP/1.1\r\n"),
        "unexpected request line: {request}"
    );

    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("content-type: multipart/form-data; boundary="));
    assert!(lower.contains(r#"form-data; name="file"; filename="cat.png""#));
    assert!(lower.contains("content-type: image/png"));
    assert!(request.contains("not-a-png!!"));
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let (base_url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"success":false,"message":"Bucket not found","fileName":"cat.png"}"#,
    )
    .await;

    let err = client_for(&base_url).upload(&cat_png()).await.unwrap_err();
    assert_eq!(
        err,
        UploadError::Server {
            status: 500,
            message: Some("Bucket not found".into()),
        }
    );
    assert_eq!(err.user_message(), "Bucket not found");
    server.await.unwrap();
}

#[tokio::test]
async fn server_error_without_message_uses_default() {
    let (base_url, server) = serve_once("413 Payload Too Large", "{}").await;

    let err = client_for(&base_url).upload(&cat_png()).await.unwrap_err();
    assert!(matches!(
        err,
        UploadError::Server {
            status: 413,
            message: None
        }
    ));
    assert_eq!(err.user_message(), DEFAULT_UPLOAD_FAILURE);
    server.await.unwrap();
}

#[tokio::test]
async fn file_without_mime_type_is_still_sent() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"success":true,"message":"ok","fileName":"blob"}"#,
    )
    .await;

    let file = SelectedFile::new(FileInfo::new("blob", 3, ""), b"abc".to_vec());
    client_for(&base_url).upload(&file).await.unwrap();

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.contains(r#"name="file"; filename="blob""#));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind to get a free port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{addr}/api"))
        .upload(&cat_png())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Transport(_)), "got {err:?}");
    assert_eq!(err.user_message(), DEFAULT_UPLOAD_FAILURE);
}
