use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use oravision_config::OraConfig;
use oravision_core::{AnalysisResult, FeatureKind, ImageRef, OravisionError, VisionBackend};
use oravision_gateway::{GatewayState, MAX_BODY_BYTES, build_router};
use oravision_responder::OraClient;
use oravision_understanding::VisionAdapter;

const CAT_SENTENCE: &str = "The image shows a cat. Cats are domestic felines known for their independent nature and grooming habits. They are popular pets worldwide.";

struct UnreachableVision;

#[async_trait]
impl VisionBackend for UnreachableVision {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn annotate(
        &self,
        _image: &ImageRef,
        _features: &[FeatureKind],
    ) -> Result<AnalysisResult, OravisionError> {
        Err(OravisionError::VisionApi { status: 503, message: "unavailable".into() })
    }
}

fn app() -> Router {
    build_router(GatewayState::new(
        VisionAdapter::fixtures_only(),
        OraClient::simulated(&OraConfig::default()),
    ))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(app(), Method::POST, uri, Some(body)).await
}

#[tokio::test]
async fn missing_fields_are_bad_requests() {
    let cases = [
        ("/api/analyze-image", json!({})),
        ("/api/analyze-image", json!({ "imageUrl": "" })),
        ("/api/query-ora", json!({ "query": "what is it" })),
        ("/api/query-ora", json!({ "imageAnalysis": { "labels": [] } })),
        ("/api/analyze-and-query", json!({ "imageUrl": "https://x.test/a.jpg" })),
        ("/api/analyze-and-query", json!({ "query": "hi", "imageUrl": null })),
    ];
    for (uri, body) in cases {
        let (status, json) = post(uri, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert!(
            json["error"].as_str().unwrap().starts_with("Missing required field: "),
            "{uri} {body}"
        );
    }
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/query-ora")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn unknown_paths_and_methods_are_not_found() {
    let (status, json) = send(app(), Method::GET, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Not Found" }));

    let (status, json) = send(app(), Method::GET, "/api/analyze-image", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn analyze_image_returns_fixture_data() {
    let (status, json) =
        post("/api/analyze-image", json!({ "imageUrl": "https://x.test/a.jpg" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data: AnalysisResult = serde_json::from_value(json["data"].clone()).unwrap();
    assert!(!data.labels.is_empty());
}

#[tokio::test]
async fn analysis_failures_are_reported_in_body() {
    let (status, json) = post(
        "/api/analyze-image",
        json!({ "imageUrl": "https://x.test/a.jpg", "features": ["SMELL_DETECTION"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("SMELL_DETECTION"));

    let (status, json) =
        post("/api/analyze-image", json!({ "imageUrl": "ftp://x.test/a.jpg" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn analyze_and_query_fails_with_500_on_bad_image() {
    let (status, json) = post(
        "/api/analyze-and-query",
        json!({ "imageUrl": "data:image/png;base64,!!!", "query": "what is this" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn query_ora_answers_the_cat_example() {
    let analysis = json!({
        "labels": [{ "description": "Cat", "score": 0.97 }],
        "text": "",
        "objects": [{ "name": "Cat", "score": 0.91 }]
    });
    let (status, json) = post(
        "/api/query-ora",
        json!({ "imageAnalysis": analysis, "query": "What animal is this?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "completion": CAT_SENTENCE }));
}

#[tokio::test]
async fn query_ora_reports_malformed_analysis() {
    let (status, json) = post(
        "/api/query-ora",
        json!({ "imageAnalysis": { "labels": "Cat" }, "query": "what is it" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid imageAnalysis"));
    assert!(json.get("completion").is_none());
}

#[tokio::test]
async fn combined_route_matches_the_two_step_flow() {
    for (image, query) in [
        ("https://x.test/hills.jpg", "Describe this"),
        ("data:image/jpeg;base64,/9j/4AAQSkZJRg==", "What brand is this?"),
        ("data:image/png;base64,iVBORw0KGgo=", "What color is it?"),
    ] {
        let (_, analyzed) = post("/api/analyze-image", json!({ "imageUrl": image })).await;
        let (_, answered) = post(
            "/api/query-ora",
            json!({ "imageAnalysis": analyzed["data"], "query": query }),
        )
        .await;
        let (status, combined) =
            post("/api/analyze-and-query", json!({ "imageUrl": image, "query": query })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(combined["success"], true);
        assert_eq!(combined["imageAnalysis"], analyzed["data"], "{image}");
        assert_eq!(combined["oraResponse"], answered, "{image}");
    }
}

#[tokio::test]
async fn live_backend_failure_falls_back_to_fixtures() {
    let app = build_router(GatewayState::new(
        VisionAdapter::new(Arc::new(UnreachableVision)),
        OraClient::simulated(&OraConfig::default()),
    ));
    let (status, json) = send(
        app,
        Method::POST,
        "/api/analyze-image",
        Some(json!({ "imageUrl": "https://x.test/a.jpg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(!json["data"]["labels"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_backends() {
    let (status, json) = send(app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "oravision");
    assert_eq!(json["visionBackend"], "fixtures");
}

#[tokio::test]
async fn cors_is_permissive() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/query-ora")
        .header(header::ORIGIN, "https://elsewhere.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn index_page_is_html() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/api/analyze-and-query"));
    assert!(page.contains("fixtures"));
}

/// A phone photo sent inline is several megabytes of base64.
fn inline_jpeg(len: usize) -> String {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len, 0x5A);
    ImageRef::from_bytes(&bytes, "image/jpeg").to_uri()
}

#[tokio::test]
async fn multi_megabyte_inline_photo_is_accepted() {
    let image = inline_jpeg(3 * 1024 * 1024);
    assert!(image.len() > 2 * 1024 * 1024);

    let (status, json) = post(
        "/api/analyze-and-query",
        json!({ "imageUrl": image, "query": "What brand is this watch?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["imageAnalysis"]["labels"][0]["description"], "Watch");
}

#[tokio::test]
async fn body_over_the_cap_is_rejected() {
    let image = inline_jpeg(MAX_BODY_BYTES);
    let (status, json) = post("/api/analyze-image", json!({ "imageUrl": image })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json["error"].is_string());
}
