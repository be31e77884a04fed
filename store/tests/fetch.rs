use std::{
    num::NonZeroU32,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

use store::{HttpObjectStore, ObjectRef, ObjectStore, RetryPolicy, StoreConfig, StoreErr};

fn fast_config(max_attempts: u32) -> StoreConfig {
    StoreConfig {
        retry: RetryPolicy {
            max_attempts: NonZeroU32::new(max_attempts).unwrap(),
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
            multiplier: 2.0,
        },
        ..StoreConfig::default()
    }
}

fn http_response(status_line: &str, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Serves one canned response per accepted connection, counting hits.
async fn serve(listener: TcpListener, responses: Vec<Vec<u8>>, hits: Arc<AtomicU32>) {
    for response in responses {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        hits.fetch_add(1, Ordering::SeqCst);

        let mut buf = [0u8; 2048];
        let _ = socket.read(&mut buf).await;
        let _ = socket.write_all(&response).await;
        let _ = socket.shutdown().await;
    }
}

async fn store_against(
    responses: Vec<Vec<u8>>,
    max_attempts: u32,
) -> (HttpObjectStore, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));

    tokio::spawn(serve(listener, responses, Arc::clone(&hits)));

    let store = HttpObjectStore::new(format!("http://{addr}"), fast_config(max_attempts)).unwrap();
    (store, hits)
}

#[tokio::test]
async fn fetch_returns_object_bytes() {
    let body = b"model artifact bytes".to_vec();
    let (store, hits) = store_against(vec![http_response("200 OK", &body)], 3).await;

    let object = ObjectRef::new("bucket", "key");
    let bytes = store.fetch(&object).await.unwrap();

    assert_eq!(bytes, body);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_retries_transient_server_errors() {
    let responses = vec![
        http_response("500 Internal Server Error", b"boom"),
        http_response("200 OK", b"recovered"),
    ];
    let (store, hits) = store_against(responses, 5).await;

    let object = ObjectRef::new("bucket", "key");
    let bytes = store.fetch(&object).await.unwrap();

    assert_eq!(bytes, b"recovered");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fetch_does_not_retry_missing_objects() {
    let responses = vec![
        http_response("404 Not Found", b""),
        http_response("200 OK", b"should never be reached"),
    ];
    let (store, hits) = store_against(responses, 5).await;

    let object = ObjectRef::new("bucket", "missing-key");
    let err = store.fetch(&object).await.unwrap_err();

    assert!(matches!(err, StoreErr::NoSuchObject { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_exhausts_budget_then_reports_unavailable() {
    let responses = vec![
        http_response("503 Service Unavailable", b""),
        http_response("503 Service Unavailable", b""),
        http_response("503 Service Unavailable", b""),
    ];
    let (store, hits) = store_against(responses, 3).await;

    let object = ObjectRef::new("bucket", "key");
    let err = store.fetch(&object).await.unwrap_err();

    match err {
        StoreErr::Unavailable { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, StoreErr::Status { status: 503 }));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}
