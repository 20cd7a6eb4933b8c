// src/presentation/http/controllers/archive.rs
use super::{PageParams, segment};
use crate::application::{
    dto::{ArchiveDto, EntryDetailDto},
    queries::entries::{ArchiveQuery, EntryDetailQuery},
};
use crate::domain::entry::ArchivePeriod;
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ModifyParams {
    /// Modifier selection: `a,b` runs only those, `!a,b` runs all others.
    #[serde(default)]
    pub modify: Option<String>,
}

async fn archive_page(
    state: &HttpState,
    period: ArchivePeriod,
    params: PageParams,
) -> HttpResult<Json<ArchiveDto>> {
    state
        .services
        .entry_queries
        .archive(ArchiveQuery {
            period,
            page: params.page(),
            per_page: params.per_page(),
        })
        .await
        .into_http()
        .map(Json)
}

fn period<T>(result: crate::domain::errors::DomainResult<T>) -> HttpResult<T> {
    result.map_err(|err| HttpError::from_error(err.into()))
}

#[utoipa::path(
    get,
    path = "/blog/",
    params(PageParams),
    responses(
        (status = 200, description = "Newest public entries with the list of years.", body = ArchiveDto),
        (status = 404, description = "No entries and empty archives are disabled.", body = ErrorResponse)
    ),
    security([]),
    tag = "Archive"
)]
pub async fn archive_index(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArchiveDto>> {
    archive_page(&state, ArchivePeriod::All, params).await
}

#[utoipa::path(
    get,
    path = "/blog/{year}",
    params(("year" = i32, Path, description = "Four digit year"), PageParams),
    responses(
        (status = 200, description = "Public entries of the year with its months.", body = ArchiveDto),
        (status = 404, description = "Invalid or empty year.", body = ErrorResponse)
    ),
    security([]),
    tag = "Archive"
)]
pub async fn archive_year(
    Extension(state): Extension<HttpState>,
    Path(year): Path<String>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArchiveDto>> {
    let period = period(ArchivePeriod::year(segment(&year)?))?;
    archive_page(&state, period, params).await
}

#[utoipa::path(
    get,
    path = "/blog/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Four digit year"),
        ("month" = u32, Path, description = "Month, 1-12"),
        PageParams
    ),
    responses(
        (status = 200, description = "Public entries of the month with its days.", body = ArchiveDto),
        (status = 404, description = "Invalid or empty month.", body = ErrorResponse)
    ),
    security([]),
    tag = "Archive"
)]
pub async fn archive_month(
    Extension(state): Extension<HttpState>,
    Path((year, month)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArchiveDto>> {
    let period = period(ArchivePeriod::month(segment(&year)?, segment(&month)?))?;
    archive_page(&state, period, params).await
}

#[utoipa::path(
    get,
    path = "/blog/{year}/{month}/{day}",
    params(
        ("year" = i32, Path, description = "Four digit year"),
        ("month" = u32, Path, description = "Month, 1-12"),
        ("day" = u32, Path, description = "Day of month"),
        PageParams
    ),
    responses(
        (status = 200, description = "Public entries of the day.", body = ArchiveDto),
        (status = 404, description = "Invalid or empty day.", body = ErrorResponse)
    ),
    security([]),
    tag = "Archive"
)]
pub async fn archive_day(
    Extension(state): Extension<HttpState>,
    Path((year, month, day)): Path<(String, String, String)>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArchiveDto>> {
    let period = period(ArchivePeriod::day(
        segment(&year)?,
        segment(&month)?,
        segment(&day)?,
    ))?;
    archive_page(&state, period, params).await
}

#[utoipa::path(
    get,
    path = "/blog/{year}/{month}/{day}/{slug}",
    params(
        ("year" = i32, Path, description = "Four digit year"),
        ("month" = u32, Path, description = "Month, 1-12"),
        ("day" = u32, Path, description = "Day of month"),
        ("slug" = String, Path, description = "Entry slug"),
        ModifyParams
    ),
    responses(
        (status = 200, description = "Published entry with rendered content.", body = EntryDetailDto),
        (status = 404, description = "No public entry with that slug on that day.", body = ErrorResponse)
    ),
    security([]),
    tag = "Archive"
)]
pub async fn entry_detail(
    Extension(state): Extension<HttpState>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
    Query(params): Query<ModifyParams>,
) -> HttpResult<Json<EntryDetailDto>> {
    let query = EntryDetailQuery {
        year: segment(&year)?,
        month: segment(&month)?,
        day: segment(&day)?,
        slug,
        modify: params.modify,
    };

    state
        .services
        .entry_queries
        .entry_detail(query)
        .await
        .into_http()
        .map(Json)
}
