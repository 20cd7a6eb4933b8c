// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::archive::archive_index,
        crate::presentation::http::controllers::archive::archive_year,
        crate::presentation::http::controllers::archive::archive_month,
        crate::presentation::http::controllers::archive::archive_day,
        crate::presentation::http::controllers::archive::entry_detail,
        crate::presentation::http::controllers::blog::category_entries,
        crate::presentation::http::controllers::blog::tag_entries,
        crate::presentation::http::controllers::widgets::category_list,
        crate::presentation::http::controllers::widgets::tag_list,
        crate::presentation::http::controllers::widgets::date_hierarchy,
        crate::presentation::http::controllers::widgets::date_list,
        crate::presentation::http::controllers::widgets::related_entries,
        crate::presentation::http::controllers::widgets::entries_for_month,
        crate::presentation::http::controllers::admin_entries::list_entries,
        crate::presentation::http::controllers::admin_entries::create_entry,
        crate::presentation::http::controllers::admin_entries::get_entry,
        crate::presentation::http::controllers::admin_entries::update_entry,
        crate::presentation::http::controllers::admin_entries::delete_entry,
        crate::presentation::http::controllers::admin_entries::entry_actions,
        crate::presentation::http::controllers::admin_entries::take_action,
        crate::presentation::http::controllers::admin_entries::bulk_action,
        crate::presentation::http::controllers::admin_categories::list_categories,
        crate::presentation::http::controllers::admin_categories::get_category,
        crate::presentation::http::controllers::admin_categories::create_category,
        crate::presentation::http::controllers::admin_categories::update_category,
        crate::presentation::http::controllers::admin_categories::delete_category,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::admin_entries::CreateEntryRequest,
            crate::presentation::http::controllers::admin_entries::UpdateEntryRequest,
            crate::presentation::http::controllers::admin_entries::EntryActionRequest,
            crate::presentation::http::controllers::admin_entries::BulkActionRequest,
            crate::presentation::http::controllers::admin_categories::CreateCategoryRequest,
            crate::presentation::http::controllers::admin_categories::UpdateCategoryRequest,
            crate::application::dto::EntryDto,
            crate::application::dto::EntryPageDto,
            crate::application::dto::EntryDetailDto,
            crate::application::dto::EntryActionsDto,
            crate::application::dto::BulkActionResultDto,
            crate::application::dto::SkippedEntryDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::CategoryEntriesDto,
            crate::application::dto::ArchiveDto,
            crate::application::dto::DateBucketDto,
            crate::application::dto::TagEntriesDto,
            crate::application::dto::TagUsageDto,
            crate::application::dto::EntriesForMonthDto
        )
    ),
    tags(
        (name = "Archive", description = "Date based archive and entry permalinks"),
        (name = "Blog", description = "Category and tag listings"),
        (name = "Widgets", description = "Sidebar helpers: category and tag lists, date archives, related entries"),
        (name = "Admin", description = "Entry and category management"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Mokkan Blog API",
        description = "Blog entries, categories, tags and the editorial publication workflow",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs`; it also serves the document at `/openapi.json`.
pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` (default `spec/openapi.json`)
/// and returns the path written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}
