// src/application/queries/entries/tag.rs
use std::collections::BTreeMap;

use super::EntryQueryService;
use crate::{
    application::{
        dto::{EntryPageDto, TagEntriesDto},
        error::{ApplicationError, ApplicationResult},
        ports::tags::TagUsage,
    },
    domain::entry::{PageRequest, Tag},
};

pub struct TagEntriesQuery {
    pub tag: String,
    pub page: u32,
    pub per_page: u32,
}

impl EntryQueryService {
    /// Public entries carrying a tag plus the other tags those entries use.
    pub async fn tag_entries(&self, query: TagEntriesQuery) -> ApplicationResult<TagEntriesDto> {
        let not_found = || ApplicationError::not_found(format!("tag {} not found", query.tag));
        if !self.tags.is_enabled() {
            return Err(not_found());
        }

        let tag = Tag::new(&query.tag).map_err(|_| not_found())?;
        if !self.tags.is_known(&tag).await? {
            return Err(not_found());
        }

        let filter = self.manager.public_filter().tagged(tag.clone());
        let request = PageRequest::new(query.page, query.per_page, self.settings.tag_page_size);
        let page = self.read_repo.list_page(&filter, request).await?;

        let mut counts: BTreeMap<Tag, u64> = BTreeMap::new();
        for entry in self.read_repo.list(&filter, None).await? {
            for other in entry.tags.iter().filter(|t| **t != tag) {
                *counts.entry(other.clone()).or_default() += 1;
            }
        }

        Ok(TagEntriesDto {
            tag: tag.as_str().to_string(),
            entries: EntryPageDto::new(page, request),
            related_tags: TagUsage::ranked(counts)
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}
