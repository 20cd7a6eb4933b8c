// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{admin_categories, admin_entries, archive, blog, widgets},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(blog_routes())
        .merge(admin_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn blog_routes() -> Router {
    Router::new()
        .route("/blog", get(archive::archive_index))
        .route("/blog/", get(archive::archive_index))
        .route("/blog/categories/{slug}", get(blog::category_entries))
        .route("/blog/tag/{tag}", get(blog::tag_entries))
        .route("/blog/widgets/categories", get(widgets::category_list))
        .route("/blog/widgets/tags", get(widgets::tag_list))
        .route("/blog/widgets/date-hierarchy", get(widgets::date_hierarchy))
        .route("/blog/widgets/dates", get(widgets::date_list))
        .route("/blog/widgets/related/{slug}", get(widgets::related_entries))
        .route(
            "/blog/widgets/entries-for-month/{year}/{month}",
            get(widgets::entries_for_month),
        )
        .route("/blog/{year}", get(archive::archive_year))
        .route("/blog/{year}/{month}", get(archive::archive_month))
        .route("/blog/{year}/{month}/{day}", get(archive::archive_day))
        .route(
            "/blog/{year}/{month}/{day}/{slug}",
            get(archive::entry_detail),
        )
}

fn admin_routes() -> Router {
    Router::new()
        .route(
            "/admin/entries",
            get(admin_entries::list_entries).post(admin_entries::create_entry),
        )
        .route("/admin/entries/actions", post(admin_entries::bulk_action))
        .route(
            "/admin/entries/{id}",
            get(admin_entries::get_entry)
                .put(admin_entries::update_entry)
                .delete(admin_entries::delete_entry),
        )
        .route(
            "/admin/entries/{id}/actions",
            get(admin_entries::entry_actions).post(admin_entries::take_action),
        )
        .route(
            "/admin/categories",
            get(admin_categories::list_categories).post(admin_categories::create_category),
        )
        .route(
            "/admin/categories/{id}",
            get(admin_categories::get_category)
                .put(admin_categories::update_category)
                .delete(admin_categories::delete_category),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security([]),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
