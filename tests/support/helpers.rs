// tests/support/helpers.rs
use super::mocks::{ADMIN_TOKEN, StaticTokenManager, TestClock};
use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use mokkan_blog::application::{
    ports::{tags::TagProvider, util::SlugGenerator},
    services::{ApplicationServices, BlogSettings},
};
use mokkan_blog::domain::entry::{Entry, EntryId, EntryReadRepository};
use mokkan_blog::infrastructure::{
    repositories::InMemoryBlogStore,
    tags::{EntryTagProvider, NullTagProvider},
    util::DefaultSlugGenerator,
};
use mokkan_blog::presentation::http::{routes::build_router, state::HttpState};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt as _;

/// Router over a fresh in-memory store, with a hand-driven clock.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryBlogStore>,
    pub clock: Arc<TestClock>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(BlogSettings::default(), true)
    }

    pub fn with(settings: BlogSettings, tagging: bool) -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        let clock = Arc::new(TestClock::new());
        let tags: Arc<dyn TagProvider> = if tagging {
            Arc::new(EntryTagProvider::new(store.clone()))
        } else {
            Arc::new(NullTagProvider)
        };
        let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

        let services = Arc::new(ApplicationServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            tags,
            Arc::new(StaticTokenManager),
            clock.clone(),
            slugger,
            settings,
        ));
        let state = HttpState {
            services: Arc::clone(&services),
        };
        let router = build_router(state, &["http://localhost:3000".to_string()]);

        Self {
            router,
            services,
            store,
            clock,
        }
    }

    pub async fn entry(&self, id: i64) -> Entry {
        EntryReadRepository::find_by_id(self.store.as_ref(), EntryId(id))
            .await
            .expect("read entry")
            .expect("entry exists")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, Some(ADMIN_TOKEN), body).await
    }

    pub async fn create_category(&self, title: &str) -> i64 {
        let (status, body) = self
            .admin(Method::POST, "/admin/categories", Some(json!({ "title": title })))
            .await;
        assert_eq!(status, StatusCode::OK, "create category: {body}");
        body["id"].as_i64().expect("category id")
    }

    /// Creates a draft entry and returns its id.
    pub async fn create_entry(&self, payload: Value) -> i64 {
        let (status, body) = self
            .admin(Method::POST, "/admin/entries", Some(payload))
            .await;
        assert_eq!(status, StatusCode::OK, "create entry: {body}");
        body["id"].as_i64().expect("entry id")
    }

    pub async fn act(&self, id: i64, action: &str) -> (StatusCode, Value) {
        self.admin(
            Method::POST,
            &format!("/admin/entries/{id}/actions"),
            Some(json!({ "action": action })),
        )
        .await
    }

    /// Publishes with the clock moved to `when`, then puts the clock back.
    pub async fn publish_on(&self, id: i64, when: DateTime<Utc>) -> Value {
        self.clock.set(when);
        let (status, body) = self.act(id, "publish").await;
        self.clock.reset();
        assert_eq!(status, StatusCode::OK, "publish: {body}");
        body
    }
}

/// Assert that a response carries the `{error, message}` body.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    let error = body["error"].as_str().unwrap_or("");
    assert_eq!(error, expected.canonical_reason().unwrap_or(""));
    assert!(
        !body["message"].as_str().unwrap_or("").is_empty(),
        "expected a non-empty message"
    );
}

pub fn ids(page_items: &Value) -> Vec<i64> {
    page_items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect()
}
