// src/domain/entry/archive.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// A date bucket addressed by the archive endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivePeriod {
    All,
    Year(i32),
    Month { year: i32, month: u32 },
    Day { year: i32, month: u32, day: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
    Day,
}

impl ArchivePeriod {
    pub fn year(year: i32) -> DomainResult<Self> {
        first_day(year, 1, 1)?;
        Ok(Self::Year(year))
    }

    pub fn month(year: i32, month: u32) -> DomainResult<Self> {
        first_day(year, month, 1)?;
        Ok(Self::Month { year, month })
    }

    pub fn day(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        first_day(year, month, day)?;
        Ok(Self::Day { year, month, day })
    }

    /// Half-open `[start, end)` window in UTC, or `None` for the whole archive.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = match *self {
            ArchivePeriod::All => return None,
            ArchivePeriod::Year(year) => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                (start, start.checked_add_months(Months::new(12))?)
            }
            ArchivePeriod::Month { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                (start, start.checked_add_months(Months::new(1))?)
            }
            ArchivePeriod::Day { year, month, day } => {
                let start = NaiveDate::from_ymd_opt(year, month, day)?;
                (start, start.checked_add_days(Days::new(1))?)
            }
        };
        Some((midnight(start), midnight(end)))
    }

    /// Granularity of the sub-buckets listed alongside this period.
    pub fn child_granularity(&self) -> Option<Granularity> {
        match self {
            ArchivePeriod::All => Some(Granularity::Year),
            ArchivePeriod::Year(_) => Some(Granularity::Month),
            ArchivePeriod::Month { .. } => Some(Granularity::Day),
            ArchivePeriod::Day { .. } => None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match self.bounds() {
            Some((start, end)) => at >= start && at < end,
            None => true,
        }
    }
}

fn first_day(year: i32, month: u32, day: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::NotFound(format!("no such date {year:04}-{month:02}-{day:02}")))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBucket {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub count: u64,
}

/// Groups publish dates into distinct buckets, newest first.
pub fn bucket_dates(dates: &[DateTime<Utc>], granularity: Granularity) -> Vec<DateBucket> {
    let mut counts: BTreeMap<(i32, Option<u32>, Option<u32>), u64> = BTreeMap::new();
    for date in dates {
        let key = match granularity {
            Granularity::Year => (date.year(), None, None),
            Granularity::Month => (date.year(), Some(date.month()), None),
            Granularity::Day => (date.year(), Some(date.month()), Some(date.day())),
        };
        *counts.entry(key).or_default() += 1;
    }

    counts
        .into_iter()
        .rev()
        .map(|((year, month, day), count)| DateBucket {
            year,
            month,
            day,
            count,
        })
        .collect()
}
