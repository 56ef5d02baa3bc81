//! # Server Tests
//!
//! Drives the HTTP router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use adcard::font::BitmapTypeface;
use adcard::server::{AppState, router};

fn app() -> Router {
    router(Arc::new(AppState::new(Arc::new(BitmapTypeface::new()))))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn card() -> Value {
    json!({
        "template": 3,
        "title": "Plot for sale",
        "body": "30x40 site, east facing",
        "phones": "9876543210, 9123456780",
        "phone_layout": "horizontal",
        "watermark": true
    })
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_templates_catalog() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/templates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let templates: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let ids: Vec<u64> = templates
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(templates[2]["border"], "#0D47A1");
}

#[tokio::test]
async fn test_index_serves_editor() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("/api/classified/render"));
    // Stale render responses are discarded
    assert!(html.contains("const seq = ++latestRender;"));
    assert!(html.contains("if (seq !== latestRender) return;"));
}

#[tokio::test]
async fn test_preview_returns_png() {
    let response = app()
        .oneshot(post_json("/api/classified/preview", card()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[tokio::test]
async fn test_preview_without_template_is_empty() {
    let response = app()
        .oneshot(post_json(
            "/api/classified/preview",
            json!({"title": "No template yet"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_render_reports_layout() {
    let response = app()
        .oneshot(post_json("/api/classified/render", card()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["success"], true);
    let artifact = &json["artifact"];
    assert!(
        artifact["data_url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
    assert_eq!(artifact["width"], 680);
    assert_eq!(artifact["height"], 565);

    let kinds: Vec<&str> = artifact["layout"]["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds.first(), Some(&"title"));
    assert_eq!(kinds.last(), Some(&"watermark"));
    assert_eq!(kinds.iter().filter(|k| **k == "phone").count(), 1);
}

#[tokio::test]
async fn test_render_blank_title_has_no_artifact() {
    let response = app()
        .oneshot(post_json(
            "/api/classified/render",
            json!({"template": 1, "title": "   "}),
        ))
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["artifact"], Value::Null);
}

#[tokio::test]
async fn test_export_png_attachment() {
    let response = app()
        .oneshot(post_json("/api/classified/export/png", card()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"classified-"));
    assert!(disposition.ends_with(".png\""));
}

#[tokio::test]
async fn test_export_pdf_attachment() {
    let response = app()
        .oneshot(post_json("/api/classified/export/pdf", card()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_without_render_conflicts() {
    for kind in ["png", "pdf"] {
        let response = app()
            .oneshot(post_json(
                &format!("/api/classified/export/{}", kind),
                json!({"template": 2, "title": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["success"], false);
    }
}

#[tokio::test]
async fn test_out_of_range_style_is_clamped() {
    let mut body = card();
    body["style"] = json!({"title_size": 500.0, "body_size": 1.0});
    let response = app()
        .oneshot(post_json("/api/classified/render", body))
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let lines = json["artifact"]["layout"]["lines"].as_array().unwrap();
    let title = lines.iter().find(|l| l["kind"] == "title").unwrap();
    let body = lines.iter().find(|l| l["kind"] == "body").unwrap();
    assert!(title["font_size"].as_f64().unwrap() <= 80.0);
    assert_eq!(body["font_size"], 16.0);
}
