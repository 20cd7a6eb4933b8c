use crate::domain::entry::{Entry, EntryAction, EntrySlug};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CategoryDto, serde_time};

/// Permalink of a published entry: `/blog/{year}/{month}/{day}/{slug}`.
pub fn entry_url(slug: &EntrySlug, publish_at: Option<DateTime<Utc>>) -> Option<String> {
    publish_at.map(|at| {
        format!(
            "/blog/{:04}/{:02}/{:02}/{}",
            at.year(),
            at.month(),
            at.day(),
            slug.as_str()
        )
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub extract: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub category_ids: Vec<i64>,
    pub author_id: i64,
    pub state: String,
    pub allow_comments: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub modified_at: DateTime<Utc>,
    #[serde(default, with = "serde_time::option")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        let url = entry_url(&entry.slug, entry.publish_at);
        Self {
            id: entry.id.into(),
            title: entry.title.into_inner(),
            slug: entry.slug.into_inner(),
            extract: entry.extract.map(|e| e.into_inner()),
            content: entry.content.into_inner(),
            tags: entry.tags.to_strings(),
            category_ids: entry.categories.into_iter().map(i64::from).collect(),
            author_id: entry.author_id.into(),
            state: entry.state.to_string(),
            allow_comments: entry.allow_comments,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
            publish_at: entry.publish_at,
            url,
        }
    }
}

/// Single entry as shown on its permalink page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryDetailDto {
    pub entry: EntryDto,
    /// Content after the selected modifier chain ran.
    pub rendered_content: String,
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryActionsDto {
    pub id: i64,
    pub state: String,
    pub available_actions: Vec<String>,
}

impl From<&Entry> for EntryActionsDto {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.into(),
            state: entry.state.to_string(),
            available_actions: entry
                .available_actions()
                .iter()
                .map(EntryAction::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SkippedEntryDto {
    pub id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkActionResultDto {
    pub action: String,
    pub applied: Vec<i64>,
    pub skipped: Vec<SkippedEntryDto>,
}
