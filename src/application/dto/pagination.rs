use crate::domain::entry::{EntryPage, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntryDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryPageDto {
    pub items: Vec<EntryDto>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub has_more: bool,
}

impl EntryPageDto {
    pub fn new(page: EntryPage, request: PageRequest) -> Self {
        let shown = request
            .offset()
            .saturating_add(u64::try_from(page.entries.len()).unwrap_or(u64::MAX));
        Self {
            has_more: shown < page.total,
            items: page.entries.into_iter().map(Into::into).collect(),
            page: request.page,
            per_page: request.per_page,
            total: page.total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
