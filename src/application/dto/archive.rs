use crate::domain::entry::{ArchivePeriod, DateBucket};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntryPageDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateBucketDto {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub count: u64,
    pub url: String,
}

impl From<DateBucket> for DateBucketDto {
    fn from(bucket: DateBucket) -> Self {
        let url = match (bucket.month, bucket.day) {
            (Some(month), Some(day)) => format!("/blog/{:04}/{month:02}/{day:02}", bucket.year),
            (Some(month), None) => format!("/blog/{:04}/{month:02}", bucket.year),
            _ => format!("/blog/{:04}", bucket.year),
        };
        Self {
            year: bucket.year,
            month: bucket.month,
            day: bucket.day,
            count: bucket.count,
            url,
        }
    }
}

/// One page of a date-based archive.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArchiveDto {
    /// `all`, `2024`, `2024-03` or `2024-03-01`.
    pub period: String,
    /// Next-finer buckets inside the period (years, months or days).
    pub date_list: Vec<DateBucketDto>,
    pub entries: EntryPageDto,
}

pub fn period_label(period: &ArchivePeriod) -> String {
    match period {
        ArchivePeriod::All => "all".into(),
        ArchivePeriod::Year(year) => format!("{year:04}"),
        ArchivePeriod::Month { year, month } => format!("{year:04}-{month:02}"),
        ArchivePeriod::Day { year, month, day } => format!("{year:04}-{month:02}-{day:02}"),
    }
}
