// src/presentation/http/controllers/blog.rs
use super::PageParams;
use crate::application::{
    dto::{CategoryEntriesDto, TagEntriesDto},
    queries::entries::{CategoryEntriesQuery, TagEntriesQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::MaybeAuthenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[utoipa::path(
    get,
    path = "/blog/categories/{slug}",
    params(("slug" = String, Path, description = "Category slug"), PageParams),
    responses(
        (status = 200, description = "Category with its entries. Staff see every state.", body = CategoryEntriesDto),
        (status = 401, description = "Invalid bearer token.", body = ErrorResponse),
        (status = 404, description = "Unknown category.", body = ErrorResponse)
    ),
    security([], ("bearerAuth" = [])),
    tag = "Blog"
)]
pub async fn category_entries(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<CategoryEntriesDto>> {
    let query = CategoryEntriesQuery {
        slug,
        page: params.page(),
        per_page: params.per_page(),
    };

    state
        .services
        .entry_queries
        .category_entries(actor.0.as_ref(), query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/tag/{tag}",
    params(("tag" = String, Path, description = "Tag name"), PageParams),
    responses(
        (status = 200, description = "Public entries carrying the tag, with related tags.", body = TagEntriesDto),
        (status = 404, description = "Unknown tag or tagging disabled.", body = ErrorResponse)
    ),
    security([]),
    tag = "Blog"
)]
pub async fn tag_entries(
    Extension(state): Extension<HttpState>,
    Path(tag): Path<String>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<TagEntriesDto>> {
    let query = TagEntriesQuery {
        tag,
        page: params.page(),
        per_page: params.per_page(),
    };

    state
        .services
        .entry_queries
        .tag_entries(query)
        .await
        .into_http()
        .map(Json)
}
