// src/presentation/http/controllers/widgets.rs
use super::segment;
use crate::application::dto::{
    CategoryDto, DateBucketDto, EntriesForMonthDto, EntryDto, TagUsageDto,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CountParams {
    /// Maximum number of items returned.
    #[serde(default)]
    pub count: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/blog/widgets/categories",
    params(CountParams),
    responses(
        (status = 200, description = "Categories with at least one public entry.", body = [CategoryDto])
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn category_list(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CountParams>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .widgets
        .category_list(params.count)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/widgets/tags",
    params(CountParams),
    responses(
        (status = 200, description = "Tag usage over public entries, most used first.", body = [TagUsageDto])
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn tag_list(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CountParams>,
) -> HttpResult<Json<Vec<TagUsageDto>>> {
    state
        .services
        .widgets
        .tag_list(params.count)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/widgets/date-hierarchy",
    responses(
        (status = 200, description = "Days with public entries, newest first.", body = [DateBucketDto])
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn date_hierarchy(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<DateBucketDto>>> {
    state
        .services
        .widgets
        .date_hierarchy()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/widgets/dates",
    params(CountParams),
    responses(
        (status = 200, description = "Months with public entries, newest first.", body = [DateBucketDto])
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn date_list(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CountParams>,
) -> HttpResult<Json<Vec<DateBucketDto>>> {
    state
        .services
        .widgets
        .date_list(params.count)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/widgets/related/{slug}",
    params(("slug" = String, Path, description = "Entry slug"), CountParams),
    responses(
        (status = 200, description = "Entries related by tags, or by categories as a fallback.", body = [EntryDto]),
        (status = 404, description = "Unknown or non-public entry.", body = ErrorResponse)
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn related_entries(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<CountParams>,
) -> HttpResult<Json<Vec<EntryDto>>> {
    state
        .services
        .widgets
        .related_entries(&slug, params.count)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/blog/widgets/entries-for-month/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Four digit year"),
        ("month" = u32, Path, description = "Month, 1-12")
    ),
    responses(
        (status = 200, description = "Number of public entries in the month.", body = EntriesForMonthDto),
        (status = 404, description = "Invalid month.", body = ErrorResponse)
    ),
    security([]),
    tag = "Widgets"
)]
pub async fn entries_for_month(
    Extension(state): Extension<HttpState>,
    Path((year, month)): Path<(String, String)>,
) -> HttpResult<Json<EntriesForMonthDto>> {
    state
        .services
        .widgets
        .entries_for_month(segment(&year)?, segment(&month)?)
        .await
        .into_http()
        .map(Json)
}
