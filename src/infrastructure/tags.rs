// src/infrastructure/tags.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::{
    ApplicationResult,
    ports::tags::{TagProvider, TagUsage},
};
use crate::domain::entry::{Entry, EntryFilter, EntryReadRepository, Tag, newest_first};

/// Tagging backed by the tags stored on each entry.
pub struct EntryTagProvider {
    read_repo: Arc<dyn EntryReadRepository>,
}

impl EntryTagProvider {
    pub fn new(read_repo: Arc<dyn EntryReadRepository>) -> Self {
        Self { read_repo }
    }
}

#[async_trait]
impl TagProvider for EntryTagProvider {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn usage_counts(&self, now: DateTime<Utc>) -> ApplicationResult<Vec<TagUsage>> {
        let entries = self.read_repo.list(&EntryFilter::public(now), None).await?;

        let mut counts: BTreeMap<Tag, u64> = BTreeMap::new();
        for tag in entries.iter().flat_map(|e| e.tags.iter()) {
            *counts.entry(tag.clone()).or_default() += 1;
        }
        Ok(TagUsage::ranked(counts))
    }

    async fn is_known(&self, tag: &Tag) -> ApplicationResult<bool> {
        let filter = EntryFilter::all().tagged(tag.clone());
        Ok(self.read_repo.count(&filter).await? > 0)
    }

    async fn related_entries(
        &self,
        entry: &Entry,
        now: DateTime<Utc>,
        limit: usize,
    ) -> ApplicationResult<Vec<Entry>> {
        if entry.tags.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let filter = EntryFilter::public(now).excluding(entry.slug.clone());
        let mut scored: Vec<(usize, Entry)> = self
            .read_repo
            .list(&filter, None)
            .await?
            .into_iter()
            .map(|candidate| (candidate.tags.overlap(&entry.tags), candidate))
            .filter(|(shared, _)| *shared > 0)
            .collect();

        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| newest_first(a, b)));
        Ok(scored.into_iter().take(limit).map(|(_, e)| e).collect())
    }
}

/// Stand-in used when tagging is switched off.
#[derive(Default, Clone)]
pub struct NullTagProvider;

#[async_trait]
impl TagProvider for NullTagProvider {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn usage_counts(&self, _now: DateTime<Utc>) -> ApplicationResult<Vec<TagUsage>> {
        Ok(Vec::new())
    }

    async fn is_known(&self, _tag: &Tag) -> ApplicationResult<bool> {
        Ok(false)
    }

    async fn related_entries(
        &self,
        _entry: &Entry,
        _now: DateTime<Utc>,
        _limit: usize,
    ) -> ApplicationResult<Vec<Entry>> {
        Ok(Vec::new())
    }
}
