use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{OriginalUri, State},
    http::{HeaderMap, Request, StatusCode, header},
    routing::get,
};
use luminous::providers::policy::UNSPLASH_PLACEHOLDER_KEY;
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

#[derive(Clone, Default)]
struct CaptureState {
    reqs: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Debug, Clone)]
struct Captured {
    uri: String,
    headers: HeaderMap,
}

impl CaptureState {
    fn record(&self, uri: &OriginalUri, headers: &HeaderMap) {
        self.reqs.lock().expect("capture lock poisoned").push(Captured {
            uri: uri.0.to_string(),
            headers: headers.clone(),
        });
    }

    fn hits(&self, path: &str) -> Vec<Captured> {
        self.reqs
            .lock()
            .expect("capture lock poisoned")
            .iter()
            .filter(|c| c.uri.starts_with(path))
            .cloned()
            .collect()
    }
}

fn unique_sqlite_path(prefix: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "luminous-{prefix}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn spawn_test_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{addr}")).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    base
}

/// One local server standing in for Unsplash, Pexels and an image host.
fn mock_upstream(capture: CaptureState) -> Router {
    Router::new()
        .route(
            "/photos/random",
            get(
                |State(capture): State<CaptureState>, uri: OriginalUri, headers: HeaderMap| async move {
                    capture.record(&uri, &headers);
                    Json(json!({
                        "id": "unsplash-1",
                        "urls": { "raw": "https://images.unsplash.com/photo-1?ixid=abc" },
                        "user": { "name": "Ada", "links": { "html": "https://unsplash.com/@ada" } },
                        "links": {
                            "html": "https://unsplash.com/photos/unsplash-1",
                            "download_location": "https://api.unsplash.com/photos/unsplash-1/download"
                        }
                    }))
                },
            ),
        )
        .route(
            "/v1/search",
            get(
                |State(capture): State<CaptureState>, uri: OriginalUri, headers: HeaderMap| async move {
                    capture.record(&uri, &headers);
                    Json(json!({
                        "page": 1,
                        "photos": [{
                            "id": 77,
                            "url": "https://www.pexels.com/photo/77/",
                            "photographer": "Grace",
                            "photographer_url": "https://www.pexels.com/@grace",
                            "src": { "original": "https://images.pexels.com/77.jpeg" }
                        }]
                    }))
                },
            ),
        )
        .route(
            "/photos/unsplash-1/download",
            get(
                |State(capture): State<CaptureState>, uri: OriginalUri, headers: HeaderMap| async move {
                    capture.record(&uri, &headers);
                    Json(json!({ "url": "https://images.unsplash.com/photo-1" }))
                },
            ),
        )
        .route(
            "/img/plain.bin",
            get(|| async { vec![1u8, 2, 3, 4] }),
        )
        .route(
            "/img/typed.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![9u8, 9]) }),
        )
        .with_state(capture)
}

async fn app_with(cfg_edit: impl FnOnce(&mut luminous::config::Config), prefix: &str) -> Router {
    let temp_path = unique_sqlite_path(prefix);
    let db = luminous::db::spawn(&format!("sqlite:{}", temp_path.display())).await;

    let mut cfg = luminous::config::Config::default();
    cfg.providers.defaults.timeout_secs = 2;
    cfg_edit(&mut cfg);

    let providers = luminous::providers::Providers::new(&cfg);
    let state = luminous::server::LuminousState::new(providers, db, cfg.backgrounds);
    luminous::server::luminous_router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, headers, body.to_vec())
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

#[tokio::test]
async fn unsplash_serves_first_with_client_id_header() {
    let capture = CaptureState::default();
    let base = spawn_test_server(mock_upstream(capture.clone())).await;
    let app = app_with(
        |cfg| {
            cfg.providers.unsplash.api_url = base.clone();
            cfg.providers.unsplash.access_key = Some("unsplash-key".to_string());
            cfg.providers.pexels.api_url = base.clone();
            cfg.providers.pexels.api_key = Some("pexels-key".to_string());
        },
        "bg-unsplash",
    )
    .await;

    let (status, _, body) = send(&app, get_req("/backgrounds/random?terms=ocean")).await;
    assert_eq!(status, StatusCode::OK);
    let photo: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(photo["origin"], "unsplash");
    assert_eq!(
        photo["url"],
        "https://images.unsplash.com/photo-1?ixid=abc&w=1920&q=80"
    );
    assert_eq!(
        photo["attributionProfileUrl"],
        "https://unsplash.com/@ada?utm_source=luminous&utm_medium=referral"
    );

    let hits = capture.hits("/photos/random");
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0]
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some("Client-ID unsplash-key")
    );
    assert!(hits[0].uri.contains("query=ocean"));
    assert!(hits[0].uri.contains("orientation=landscape"));
    assert!(capture.hits("/v1/search").is_empty());
}

#[tokio::test]
async fn posted_settings_pick_pexels_and_skip_placeholder_unsplash() {
    let capture = CaptureState::default();
    let base = spawn_test_server(mock_upstream(capture.clone())).await;
    let app = app_with(
        |cfg| {
            cfg.providers.unsplash.api_url = base.clone();
            cfg.providers.unsplash.access_key = Some(UNSPLASH_PLACEHOLDER_KEY.to_string());
            cfg.providers.pexels.api_url = base.clone();
            cfg.providers.pexels.api_key = Some("pexels-key".to_string());
        },
        "bg-pexels",
    )
    .await;

    let (status, _, body) = send(
        &app,
        post_json(
            "/backgrounds/random",
            &json!({
                "imageServices": [
                    { "name": "unsplash", "enabled": true, "priority": 1 },
                    { "name": "pexels", "enabled": true, "priority": 2 }
                ],
                "searchTerms": ["forest"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let photo: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(photo["origin"], "pexels");
    assert_eq!(photo["id"], "77");
    assert_eq!(photo["url"], "https://images.pexels.com/77.jpeg");

    assert!(capture.hits("/photos/random").is_empty());
    let hits = capture.hits("/v1/search");
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0]
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some("pexels-key")
    );
    assert!(hits[0].uri.contains("query=forest"));
}

#[tokio::test]
async fn disabled_services_serve_static_background() {
    let capture = CaptureState::default();
    let base = spawn_test_server(mock_upstream(capture.clone())).await;
    let app = app_with(
        |cfg| {
            cfg.providers.unsplash.api_url = base.clone();
            cfg.providers.unsplash.access_key = Some("unsplash-key".to_string());
            cfg.providers.pexels.api_url = base.clone();
            cfg.providers.pexels.api_key = Some("pexels-key".to_string());
        },
        "bg-static",
    )
    .await;

    let (status, _, body) = send(
        &app,
        post_json(
            "/backgrounds/random",
            &json!({
                "imageServices": [
                    { "name": "unsplash", "enabled": false, "priority": 1 },
                    { "name": "pexels", "enabled": false, "priority": 2 }
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let photo: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(photo["origin"], "static");
    assert_eq!(photo["id"], "fallback");
    assert!(
        luminous::providers::fallback::STATIC_BACKGROUND_URLS
            .iter()
            .any(|u| photo["url"] == *u)
    );
    assert!(capture.reqs.lock().expect("capture lock poisoned").is_empty());
}

#[tokio::test]
async fn download_tracking_pings_unsplash_in_background() {
    let capture = CaptureState::default();
    let base = spawn_test_server(mock_upstream(capture.clone())).await;
    let app = app_with(
        |cfg| {
            cfg.providers.unsplash.api_url = base.clone();
            cfg.providers.unsplash.access_key = Some("unsplash-key".to_string());
        },
        "bg-download",
    )
    .await;

    let location = base
        .join("/photos/unsplash-1/download")
        .expect("download url");
    let (status, _, _) = send(
        &app,
        post_json(
            "/backgrounds/download",
            &json!({ "downloadLocation": location.as_str() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let mut hits = Vec::new();
    for _ in 0..50 {
        hits = capture.hits("/photos/unsplash-1/download");
        if !hits.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0]
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some("Client-ID unsplash-key")
    );

    // Locations on other hosts never receive the access key.
    let (status, _, _) = send(
        &app,
        post_json(
            "/backgrounds/download",
            &json!({ "downloadLocation": "https://evil.test/collect" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, post_json("/backgrounds/download", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proxy_image_relays_bytes_and_content_type() {
    let base = spawn_test_server(mock_upstream(CaptureState::default())).await;
    let app = app_with(|_| {}, "proxy").await;

    let typed = base.join("/img/typed.png").expect("typed url");
    let (status, headers, body) = send(
        &app,
        get_req(&format!("/proxy-image?url={}", urlencode(typed.as_str()))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(body, vec![9u8, 9]);

    let missing = base.join("/img/absent.jpg").expect("missing url");
    let (status, _, _) = send(
        &app,
        get_req(&format!("/proxy-image?url={}", urlencode(missing.as_str()))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _, body) = send(&app, get_req("/proxy-image")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(body["error"]["code"], "MISSING_URL");
}

fn urlencode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
