// src/presentation/http/controllers/admin_entries.rs
use super::PageParams;
use crate::application::{
    commands::entries::{
        BulkActionCommand, CreateEntryCommand, DeleteEntryCommand, TakeEntryActionCommand,
        UpdateEntryCommand,
    },
    dto::{BulkActionResultDto, EntryActionsDto, EntryDto, EntryPageDto},
    queries::entries::ListAdminEntriesQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminEntryFilterParams {
    pub author_id: Option<i64>,
    /// One of `draft`, `review`, `published`, `archived`.
    pub state: Option<String>,
    pub allow_comments: Option<bool>,
    /// Case-insensitive match on title, slug, extract or content.
    pub q: Option<String>,
    /// Publish year.
    pub year: Option<i32>,
    /// Publish month, together with `year`.
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    pub title: String,
    /// Derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    pub content: String,
    /// Free text, e.g. `rust, web` or `rust "web dev"`.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub allow_comments: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    /// An empty string clears the extract.
    pub extract: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub category_ids: Option<Vec<i64>>,
    pub allow_comments: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EntryActionRequest {
    /// One of `submit`, `publish`, `reject`, `retract`, `archive`.
    pub action: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkActionRequest {
    /// One of `publish`, `retract`, `review`, `allow_comments`, `disallow_comments`.
    pub action: String,
    pub ids: Vec<i64>,
}

#[utoipa::path(
    get,
    path = "/admin/entries",
    params(PageParams, AdminEntryFilterParams),
    responses(
        (status = 200, description = "Entries in every state, newest first.", body = EntryPageDto),
        (status = 400, description = "Invalid filter.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_entries(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PageParams>,
    Query(filter): Query<AdminEntryFilterParams>,
) -> HttpResult<Json<EntryPageDto>> {
    let query = ListAdminEntriesQuery {
        page: params.page(),
        per_page: params.per_page(),
        author_id: filter.author_id,
        state: filter.state,
        allow_comments: filter.allow_comments,
        search: filter.q,
        year: filter.year,
        month: filter.month,
    };

    state
        .services
        .entry_queries
        .list_entries(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 200, description = "Created draft entry.", body = EntryDto),
        (status = 400, description = "Invalid input or unknown category.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 409, description = "Slug already in use.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_entry(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateEntryRequest>,
) -> HttpResult<Json<EntryDto>> {
    let command = CreateEntryCommand {
        title: payload.title,
        slug: payload.slug,
        extract: payload.extract,
        content: payload.content,
        tags: payload.tags,
        category_ids: payload.category_ids,
        allow_comments: payload.allow_comments,
    };

    state
        .services
        .entry_commands
        .create_entry(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/admin/entries/{id}",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry in any state.", body = EntryDto),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 404, description = "Entry not found.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn get_entry(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EntryDto>> {
    state
        .services
        .entry_queries
        .get_entry(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/admin/entries/{id}",
    params(("id" = i64, Path, description = "Entry identifier")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Updated entry.", body = EntryDto),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 404, description = "Entry not found.", body = ErrorResponse),
        (status = 409, description = "Slug already in use.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_entry(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEntryRequest>,
) -> HttpResult<Json<EntryDto>> {
    let command = UpdateEntryCommand {
        id,
        title: payload.title,
        slug: payload.slug,
        extract: payload.extract,
        content: payload.content,
        tags: payload.tags,
        category_ids: payload.category_ids,
        allow_comments: payload.allow_comments,
    };

    state
        .services
        .entry_commands
        .update_entry(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/admin/entries/{id}",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry deleted.", body = StatusResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 404, description = "Entry not found.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_entry(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .entry_commands
        .delete_entry(&user, DeleteEntryCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/admin/entries/{id}/actions",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Workflow actions legal in the entry's current state.", body = EntryActionsDto),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 404, description = "Entry not found.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn entry_actions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<EntryActionsDto>> {
    state
        .services
        .entry_queries
        .entry_actions(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/entries/{id}/actions",
    params(("id" = i64, Path, description = "Entry identifier")),
    request_body = EntryActionRequest,
    responses(
        (status = 200, description = "Entry after the transition.", body = EntryDto),
        (status = 400, description = "Unknown action.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse),
        (status = 404, description = "Entry not found.", body = ErrorResponse),
        (status = 409, description = "Action not allowed in the current state.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn take_action(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<EntryActionRequest>,
) -> HttpResult<Json<EntryDto>> {
    let command = TakeEntryActionCommand {
        id,
        action: payload.action,
    };

    state
        .services
        .entry_commands
        .take_action(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/entries/actions",
    request_body = BulkActionRequest,
    responses(
        (status = 200, description = "Per-entry outcome; failing entries are skipped.", body = BulkActionResultDto),
        (status = 400, description = "Unknown bulk action.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Forbidden.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn bulk_action(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<BulkActionRequest>,
) -> HttpResult<Json<BulkActionResultDto>> {
    let command = BulkActionCommand {
        action: payload.action,
        ids: payload.ids,
    };

    state
        .services
        .entry_commands
        .bulk_action(&user, command)
        .await
        .into_http()
        .map(Json)
}
