use crate::application::ports::tags::TagUsage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntryPageDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TagUsageDto {
    pub tag: String,
    pub count: u64,
}

impl From<TagUsage> for TagUsageDto {
    fn from(usage: TagUsage) -> Self {
        Self {
            tag: usage.tag.as_str().to_string(),
            count: usage.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagEntriesDto {
    pub tag: String,
    pub entries: EntryPageDto,
    /// Other tags carried by the listed entries.
    pub related_tags: Vec<TagUsageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct EntriesForMonthDto {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}
