use axum::http::StatusCode;
use mokkan_blog::application::services::BlogSettings;
use serde_json::json;

mod support;

use support::{TestApp, assert_error, at, ids};

#[tokio::test]
async fn category_list_skips_categories_without_public_entries() {
    let app = TestApp::new();
    let news = app.create_category("News").await;
    let empty = app.create_category("Empty").await;
    let drafts = app.create_category("Drafts only").await;

    let a = app
        .create_entry(json!({ "title": "A", "content": "a", "category_ids": [news] }))
        .await;
    app.create_entry(json!({ "title": "B", "content": "b", "category_ids": [drafts] }))
        .await;
    app.publish_on(a, at(2024, 1, 1)).await;
    let _ = empty;

    let (status, body) = app.get("/blog/widgets/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["slug"], "news");
    assert_eq!(body[0]["url"], "/blog/categories/news");
}

#[tokio::test]
async fn tag_cloud_counts_public_entries_only() {
    let app = TestApp::new();
    for (title, tags, publish) in [
        ("One", "rust web", true),
        ("Two", "rust", true),
        ("Three", "\"web dev\" rust", true),
        ("Four", "rust hidden", false),
    ] {
        let id = app
            .create_entry(json!({ "title": title, "content": "x", "tags": tags }))
            .await;
        if publish {
            app.publish_on(id, at(2024, 2, 1)).await;
        }
    }

    let (_, body) = app.get("/blog/widgets/tags").await;
    assert_eq!(
        body,
        json!([
            { "tag": "rust", "count": 3 },
            { "tag": "web", "count": 1 },
            { "tag": "web dev", "count": 1 }
        ])
    );

    let (_, capped) = app.get("/blog/widgets/tags?count=1").await;
    assert_eq!(capped, json!([{ "tag": "rust", "count": 3 }]));
}

#[tokio::test]
async fn tag_cloud_is_empty_without_tagging() {
    let app = TestApp::with(BlogSettings::default(), false);
    let id = app
        .create_entry(json!({ "title": "One", "content": "x", "tags": "rust" }))
        .await;
    app.publish_on(id, at(2024, 2, 1)).await;

    let (status, body) = app.get("/blog/widgets/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn date_widgets_bucket_public_entries() {
    let app = TestApp::new();
    for (title, when) in [
        ("Jan a", at(2024, 1, 3)),
        ("Jan b", at(2024, 1, 3)),
        ("Feb", at(2024, 2, 20)),
        ("Dec", at(2023, 12, 31)),
    ] {
        let id = app
            .create_entry(json!({ "title": title, "content": "x" }))
            .await;
        app.publish_on(id, when).await;
    }
    app.create_entry(json!({ "title": "Draft", "content": "x" }))
        .await;

    let (_, hierarchy) = app.get("/blog/widgets/date-hierarchy").await;
    let days: Vec<(i64, i64, i64, i64)> = hierarchy
        .as_array()
        .unwrap()
        .iter()
        .map(|b| {
            (
                b["year"].as_i64().unwrap(),
                b["month"].as_i64().unwrap(),
                b["day"].as_i64().unwrap(),
                b["count"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(days, vec![(2024, 2, 20, 1), (2024, 1, 3, 2), (2023, 12, 31, 1)]);

    let (_, months) = app.get("/blog/widgets/dates?count=2").await;
    assert_eq!(
        months,
        json!([
            { "year": 2024, "month": 2, "count": 1, "url": "/blog/2024/02" },
            { "year": 2024, "month": 1, "count": 2, "url": "/blog/2024/01" }
        ])
    );

    let (_, january) = app.get("/blog/widgets/entries-for-month/2024/01").await;
    assert_eq!(january, json!({ "year": 2024, "month": 1, "count": 2 }));

    let (status, body) = app.get("/blog/widgets/entries-for-month/2024/13").await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn related_entries_prefer_shared_tags() {
    let app = TestApp::new();
    let news = app.create_category("News").await;
    let base = app
        .create_entry(json!({
            "title": "Base",
            "content": "x",
            "tags": "rust, async, web",
            "category_ids": [news]
        }))
        .await;
    let close = app
        .create_entry(json!({ "title": "Close", "content": "x", "tags": "rust, async" }))
        .await;
    let loose = app
        .create_entry(json!({ "title": "Loose", "content": "x", "tags": "web" }))
        .await;
    let unrelated = app
        .create_entry(json!({ "title": "Other", "content": "x", "tags": "cooking" }))
        .await;
    let hidden = app
        .create_entry(json!({ "title": "Hidden", "content": "x", "tags": "rust, async, web" }))
        .await;
    for (id, day) in [(base, 1), (close, 2), (loose, 3), (unrelated, 4)] {
        app.publish_on(id, at(2024, 5, day)).await;
    }

    let (status, body) = app.get("/blog/widgets/related/base").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![close, loose]);
    assert!(!ids(&body).contains(&hidden));

    let (_, capped) = app.get("/blog/widgets/related/base?count=1").await;
    assert_eq!(ids(&capped), vec![close]);
}

#[tokio::test]
async fn related_entries_fall_back_to_categories() {
    let app = TestApp::with(BlogSettings::default(), false);
    let news = app.create_category("News").await;
    let a = app
        .create_entry(json!({ "title": "A", "content": "x", "category_ids": [news] }))
        .await;
    let b = app
        .create_entry(json!({ "title": "B", "content": "x", "category_ids": [news] }))
        .await;
    app.publish_on(a, at(2024, 5, 1)).await;
    app.publish_on(b, at(2024, 5, 2)).await;

    let (status, body) = app.get("/blog/widgets/related/a").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![b]);

    let (status, body) = app.get("/blog/widgets/related/missing").await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}
