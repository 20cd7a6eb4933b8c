// src/application/ports/tags.rs
use crate::application::ApplicationResult;
use crate::domain::entry::{Entry, Tag};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub tag: Tag,
    pub count: u64,
}

impl TagUsage {
    /// Highest count first, ties broken by tag name.
    pub fn ranked(counts: BTreeMap<Tag, u64>) -> Vec<TagUsage> {
        let mut usage: Vec<TagUsage> = counts
            .into_iter()
            .map(|(tag, count)| TagUsage { tag, count })
            .collect();
        usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        usage
    }
}

/// Free-text tagging capability.
///
/// Deployments without tagging wire in a provider that reports nothing, so
/// tag clouds and tag-based relatedness degrade to empty results instead of
/// failing the request.
#[async_trait]
pub trait TagProvider: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Usage counts over entries visible at `now`, most used first.
    async fn usage_counts(&self, now: DateTime<Utc>) -> ApplicationResult<Vec<TagUsage>>;

    /// Whether any entry carries `tag`.
    async fn is_known(&self, tag: &Tag) -> ApplicationResult<bool>;

    /// Visible entries sharing tags with `entry`, most shared tags first.
    async fn related_entries(
        &self,
        entry: &Entry,
        now: DateTime<Utc>,
        limit: usize,
    ) -> ApplicationResult<Vec<Entry>>;
}
