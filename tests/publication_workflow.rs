use axum::http::{Method, StatusCode};
use mokkan_blog::application::commands::entries::TakeEntryActionCommand;
use mokkan_blog::domain::entry::{EntryId, EntrySlug, PublicationState};
use serde_json::json;

mod support;

use support::{TestApp, admin_user, assert_error, at, author_user, fixed_now};

async fn entry_state(app: &TestApp, id: i64) -> serde_json::Value {
    let (status, body) = app
        .admin(Method::GET, &format!("/admin/entries/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn draft_entries_stay_out_of_public_until_published() {
    let app = TestApp::new();
    let news = app.create_category("news").await;
    let general = app.create_category("general").await;
    let a = app
        .create_entry(json!({
            "title": "Entry A",
            "content": "body",
            "category_ids": [news, general]
        }))
        .await;

    let public = app.services.entry_manager.public().await.unwrap();
    assert!(public.is_empty());

    app.publish_on(a, at(2024, 6, 1)).await;

    let public = app.services.entry_manager.public().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, EntryId(a));
}

#[tokio::test]
async fn related_by_categories_only_considers_public_entries() {
    let app = TestApp::new();
    let news = app.create_category("news").await;
    let a = app
        .create_entry(json!({ "title": "A", "content": "a", "category_ids": [news] }))
        .await;
    let b = app
        .create_entry(json!({ "title": "B", "content": "b", "category_ids": [news] }))
        .await;
    app.publish_on(a, at(2024, 6, 1)).await;

    let manager = &app.services.entry_manager;
    let entry_a = app.entry(a).await;
    assert!(manager.related_by_categories(&entry_a, None).await.unwrap().is_empty());

    app.publish_on(b, at(2024, 6, 2)).await;

    let related = manager.related_by_categories(&entry_a, None).await.unwrap();
    let slugs: Vec<&EntrySlug> = related.iter().map(|e| &e.slug).collect();
    assert_eq!(slugs, vec![&EntrySlug::new("b").unwrap()]);
    assert!(related.iter().all(|e| e.id != entry_a.id));
}

#[tokio::test]
async fn entries_without_shared_categories_are_not_related() {
    let app = TestApp::new();
    let news = app.create_category("news").await;
    let misc = app.create_category("misc").await;
    let a = app
        .create_entry(json!({ "title": "A", "content": "a", "category_ids": [news] }))
        .await;
    let b = app
        .create_entry(json!({ "title": "B", "content": "b", "category_ids": [misc] }))
        .await;
    app.publish_on(a, at(2024, 6, 1)).await;
    app.publish_on(b, at(2024, 6, 2)).await;

    let entry_a = app.entry(a).await;
    let related = app
        .services
        .entry_manager
        .related_by_categories(&entry_a, None)
        .await
        .unwrap();
    assert!(related.is_empty());
}

#[tokio::test]
async fn future_dated_entries_are_not_public() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "Later", "content": "soon" }))
        .await;
    app.publish_on(id, fixed_now() + chrono::Duration::days(3)).await;

    assert!(app.services.entry_manager.public().await.unwrap().is_empty());
}

#[tokio::test]
async fn retracting_a_draft_is_an_invalid_action() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "Draft", "content": "body" }))
        .await;

    let err = app
        .services
        .entry_commands
        .take_action(
            &admin_user(),
            TakeEntryActionCommand {
                id,
                action: "retract".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_action());

    let (status, body) = app.act(id, "retract").await;
    assert_error(status, &body, StatusCode::CONFLICT);

    let entry = app.entry(id).await;
    assert_eq!(entry.state, PublicationState::Draft);
}

#[tokio::test]
async fn first_publish_timestamp_survives_republishing() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "Twice", "content": "body" }))
        .await;

    let first = app.publish_on(id, at(2024, 3, 10)).await;
    assert_eq!(first["publish_at"], json!(at(2024, 3, 10).to_rfc3339()));

    let (status, _) = app.act(id, "retract").await;
    assert_eq!(status, StatusCode::OK);
    let again = app.publish_on(id, at(2024, 5, 1)).await;

    assert_eq!(again["state"], "published");
    assert_eq!(again["publish_at"], first["publish_at"]);
}

#[tokio::test]
async fn archiving_turns_comments_off() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "Old", "content": "body", "allow_comments": true }))
        .await;
    app.publish_on(id, at(2024, 1, 5)).await;

    let (status, body) = app.act(id, "archive").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "archived");
    assert_eq!(body["allow_comments"], false);

    let (_, actions) = app
        .admin(Method::GET, &format!("/admin/entries/{id}/actions"), None)
        .await;
    assert_eq!(actions["available_actions"], json!([]));
}

#[tokio::test]
async fn review_cycle_follows_the_transition_table() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "Cycle", "content": "body" }))
        .await;

    let (_, actions) = app
        .admin(Method::GET, &format!("/admin/entries/{id}/actions"), None)
        .await;
    assert_eq!(actions["state"], "draft");
    assert_eq!(actions["available_actions"], json!(["submit", "publish"]));

    let (status, body) = app.act(id, "submit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "review");

    let (status, body) = app.act(id, "reject").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "draft");
    assert!(entry_state(&app, id).await["publish_at"].is_null());
}

#[tokio::test]
async fn authors_submit_but_cannot_publish() {
    let app = TestApp::new();
    let id = app
        .create_entry(json!({ "title": "By author", "content": "body" }))
        .await;

    let submitted = app
        .services
        .entry_commands
        .take_action(
            &author_user(),
            TakeEntryActionCommand {
                id,
                action: "submit".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(submitted.state, "review");

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/admin/entries/{id}/actions"),
            Some(support::AUTHOR_TOKEN),
            Some(json!({ "action": "publish" })),
        )
        .await;
    assert_error(status, &body, StatusCode::FORBIDDEN);
}
