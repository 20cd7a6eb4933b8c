use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{AUTHOR_TOKEN, TestApp, assert_error, at, fixed_now, ids};

#[tokio::test]
async fn create_update_and_delete_an_entry() {
    let app = TestApp::new();
    let news = app.create_category("News").await;

    let (status, created) = app
        .admin(
            Method::POST,
            "/admin/entries",
            Some(json!({
                "title": "Hello World",
                "content": "body",
                "tags": "Rust, Web",
                "category_ids": [news]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["slug"], "hello-world");
    assert_eq!(created["state"], "draft");
    assert_eq!(created["tags"], json!(["rust", "web"]));
    assert_eq!(created["allow_comments"], true);
    assert_eq!(created["author_id"], 1);
    assert!(created["publish_at"].is_null());
    let id = created["id"].as_i64().unwrap();

    app.clock.set(fixed_now() + chrono::Duration::hours(2));
    let (status, updated) = app
        .admin(
            Method::PUT,
            &format!("/admin/entries/{id}"),
            Some(json!({ "title": "Hello Again", "extract": "short", "category_ids": [] })),
        )
        .await;
    app.clock.reset();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Hello Again");
    assert_eq!(updated["slug"], "hello-world");
    assert_eq!(updated["extract"], "short");
    assert_eq!(updated["category_ids"], json!([]));
    assert_ne!(updated["modified_at"], created["modified_at"]);

    let (status, body) = app
        .admin(Method::DELETE, &format!("/admin/entries/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, body) = app
        .admin(Method::GET, &format!("/admin/entries/{id}"), None)
        .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn colliding_titles_get_numbered_slugs() {
    let app = TestApp::new();
    let first = app
        .create_entry(json!({ "title": "Same Title", "content": "a" }))
        .await;
    let second = app
        .create_entry(json!({ "title": "Same Title", "content": "b" }))
        .await;

    let (_, listed) = app.admin(Method::GET, "/admin/entries", None).await;
    let slugs: Vec<&str> = listed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(listed["total"], 2);
    assert!(slugs.contains(&"same-title"));
    assert!(slugs.contains(&"same-title-1"));
    assert_ne!(first, second);
}

#[tokio::test]
async fn explicit_duplicate_slug_is_a_conflict() {
    let app = TestApp::new();
    app.create_entry(json!({ "title": "One", "slug": "taken", "content": "a" }))
        .await;

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries",
            Some(json!({ "title": "Two", "slug": "taken", "content": "b" })),
        )
        .await;
    assert_error(status, &body, StatusCode::CONFLICT);
}

#[tokio::test]
async fn slugs_fit_the_column_width() {
    let app = TestApp::new();
    let long_title = "ß".repeat(200);

    let first = app
        .create_entry(json!({ "title": long_title, "content": "a" }))
        .await;
    let second = app
        .create_entry(json!({ "title": long_title, "content": "b" }))
        .await;
    let stem = app.entry(first).await.slug.into_inner();
    let numbered = app.entry(second).await.slug.into_inner();
    assert!(stem.len() <= 255);
    assert!(stem.starts_with("ssss"));
    assert_eq!(numbered, format!("{stem}-1"));

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries",
            Some(json!({ "title": "Wide", "slug": "a".repeat(300), "content": "body" })),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/categories",
            Some(json!({ "title": "Wide", "slug": "c".repeat(256) })),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries",
            Some(json!({ "title": "  ", "content": "body" })),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries",
            Some(json!({ "title": "Orphan", "content": "body", "category_ids": [99] })),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let id = app
        .create_entry(json!({ "title": "Fine", "content": "body" }))
        .await;
    let (status, body) = app.act(id, "teleport").await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/admin/entries").await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::GET, "/admin/entries", Some("forged"), None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(
            Method::POST,
            "/admin/categories",
            Some(AUTHOR_TOKEN),
            Some(json!({ "title": "Mine" })),
        )
        .await;
    assert_error(status, &body, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn categories_can_be_managed() {
    let app = TestApp::new();
    let id = app.create_category("Rust News").await;

    let (status, updated) = app
        .admin(
            Method::PUT,
            &format!("/admin/categories/{id}"),
            Some(json!({ "description": "Crates and releases" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "rust-news");
    assert_eq!(updated["description"], "Crates and releases");

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/categories",
            Some(json!({ "title": "Other", "slug": "rust-news" })),
        )
        .await;
    assert_error(status, &body, StatusCode::CONFLICT);

    let (_, listed) = app.admin(Method::GET, "/admin/categories", None).await;
    assert_eq!(ids(&listed), vec![id]);
}

#[tokio::test]
async fn deleting_a_category_keeps_its_entries() {
    let app = TestApp::new();
    let news = app.create_category("News").await;
    let entry = app
        .create_entry(json!({ "title": "Kept", "content": "x", "category_ids": [news] }))
        .await;

    let (status, _) = app
        .admin(Method::DELETE, &format!("/admin/categories/{news}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .admin(Method::GET, &format!("/admin/entries/{entry}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_ids"], json!([]));

    let (status, body) = app.get("/blog/categories/news").await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_publish_skips_entries_that_cannot_move() {
    let app = TestApp::new();
    let draft = app
        .create_entry(json!({ "title": "Draft", "content": "x" }))
        .await;
    let published = app
        .create_entry(json!({ "title": "Live", "content": "x" }))
        .await;
    let original = app.publish_on(published, at(2024, 1, 1)).await;

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "publish", "ids": [draft, published, 404] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "publish");
    assert_eq!(body["applied"], json!([draft]));
    let skipped: Vec<i64> = body["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(skipped, vec![published, 404]);
    assert!(body["skipped"][0]["reason"].as_str().unwrap().contains("publish"));

    let (_, live) = app
        .admin(Method::GET, &format!("/admin/entries/{published}"), None)
        .await;
    assert_eq!(live["publish_at"], original["publish_at"]);
}

#[tokio::test]
async fn bulk_retract_handles_review_and_published() {
    let app = TestApp::new();
    let in_review = app
        .create_entry(json!({ "title": "Review", "content": "x" }))
        .await;
    let live = app
        .create_entry(json!({ "title": "Live", "content": "x" }))
        .await;
    let draft = app
        .create_entry(json!({ "title": "Draft", "content": "x" }))
        .await;
    app.act(in_review, "submit").await;
    app.publish_on(live, at(2024, 1, 1)).await;

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "retract", "ids": [in_review, live, draft] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], json!([in_review, live]));
    assert_eq!(body["skipped"][0]["id"], draft);

    for id in [in_review, live] {
        let (_, entry) = app
            .admin(Method::GET, &format!("/admin/entries/{id}"), None)
            .await;
        assert_eq!(entry["state"], "draft");
    }
}

#[tokio::test]
async fn bulk_comment_toggles_and_review() {
    let app = TestApp::new();
    let a = app
        .create_entry(json!({ "title": "A", "content": "x" }))
        .await;
    let b = app
        .create_entry(json!({ "title": "B", "content": "x", "allow_comments": false }))
        .await;

    let (_, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "disallow_comments", "ids": [a, b] })),
        )
        .await;
    assert_eq!(body["applied"], json!([a, b]));
    assert!(!app.entry(a).await.allow_comments);

    let (_, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "allow_comments", "ids": [b] })),
        )
        .await;
    assert_eq!(body["applied"], json!([b]));
    assert!(app.entry(b).await.allow_comments);

    let (_, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "review", "ids": [a] })),
        )
        .await;
    assert_eq!(body["applied"], json!([a]));

    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/entries/actions",
            Some(json!({ "action": "explode", "ids": [a] })),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn authors_cannot_run_bulk_actions() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/admin/entries/actions",
            Some(AUTHOR_TOKEN),
            Some(json!({ "action": "publish", "ids": [1] })),
        )
        .await;
    assert_error(status, &body, StatusCode::FORBIDDEN);
}

async fn filtered(app: &TestApp, query: &str) -> Vec<i64> {
    let (status, body) = app
        .admin(Method::GET, &format!("/admin/entries?{query}"), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{query}: {body}");
    ids(&body["items"])
}

#[tokio::test]
async fn entry_list_can_be_filtered_and_searched() {
    let app = TestApp::new();
    let rust = app
        .create_entry(json!({
            "title": "Rust Notes",
            "extract": "Borrow checker tips",
            "content": "a"
        }))
        .await;
    let old = app
        .create_entry(json!({ "title": "Old News", "content": "c" }))
        .await;
    let (status, body) = app
        .send(
            Method::POST,
            "/admin/entries",
            Some(AUTHOR_TOKEN),
            Some(json!({
                "title": "Guest Post",
                "content": "Written by an AUTHOR",
                "allow_comments": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let guest = body["id"].as_i64().unwrap();

    app.publish_on(rust, at(2024, 5, 3)).await;
    app.publish_on(old, at(2023, 12, 1)).await;

    assert_eq!(filtered(&app, "").await, vec![rust, old, guest]);
    assert_eq!(filtered(&app, "author_id=2").await, vec![guest]);
    assert_eq!(filtered(&app, "state=draft").await, vec![guest]);
    assert_eq!(filtered(&app, "state=published").await, vec![rust, old]);
    assert_eq!(filtered(&app, "allow_comments=false").await, vec![guest]);
    assert_eq!(filtered(&app, "q=borrow").await, vec![rust]);
    assert_eq!(filtered(&app, "q=author").await, vec![guest]);
    assert_eq!(filtered(&app, "year=2024").await, vec![rust]);
    assert_eq!(filtered(&app, "year=2023&month=12").await, vec![old]);
    assert!(filtered(&app, "year=2024&month=1").await.is_empty());
    assert_eq!(
        filtered(&app, "state=published&author_id=1&per_page=1&page=2").await,
        vec![old]
    );

    for bad in ["state=lost", "month=5", "year=2024&month=13", "author_id=0"] {
        let (status, body) = app
            .admin(Method::GET, &format!("/admin/entries?{bad}"), None)
            .await;
        assert_error(status, &body, StatusCode::BAD_REQUEST);
    }
}
