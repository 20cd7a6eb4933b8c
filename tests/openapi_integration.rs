use axum::http::StatusCode;

mod support;

use support::TestApp;

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let (status, body) = app.get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let paths = body["paths"].as_object().expect("paths object");
    for path in [
        "/blog/{year}/{month}",
        "/blog/categories/{slug}",
        "/blog/widgets/entries-for-month/{year}/{month}",
        "/admin/entries/{id}/actions",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(body["components"]["securitySchemes"]["bearerAuth"].is_object());
}
