// src/application/queries/widgets/dates.rs
use super::WidgetQueryService;
use crate::{
    application::{
        dto::{DateBucketDto, EntriesForMonthDto},
        error::ApplicationResult,
    },
    domain::entry::{ArchivePeriod, Granularity, bucket_dates},
};

impl WidgetQueryService {
    /// Every day with public entries, newest first.
    pub async fn date_hierarchy(&self) -> ApplicationResult<Vec<DateBucketDto>> {
        self.buckets(Granularity::Day, None).await
    }

    /// Months with public entries, newest first, capped at `count`.
    pub async fn date_list(&self, count: Option<usize>) -> ApplicationResult<Vec<DateBucketDto>> {
        self.buckets(Granularity::Month, count).await
    }

    pub async fn entries_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> ApplicationResult<EntriesForMonthDto> {
        let period = ArchivePeriod::month(year, month)?;
        let mut filter = self.manager.public_filter();
        if let Some((from, until)) = period.bounds() {
            filter = filter.published_within(from, until);
        }
        let count = self.read_repo.count(&filter).await?;
        Ok(EntriesForMonthDto { year, month, count })
    }

    async fn buckets(
        &self,
        granularity: Granularity,
        count: Option<usize>,
    ) -> ApplicationResult<Vec<DateBucketDto>> {
        let dates = self
            .read_repo
            .publish_dates(&self.manager.public_filter())
            .await?;
        Ok(bucket_dates(&dates, granularity)
            .into_iter()
            .take(count.unwrap_or(usize::MAX))
            .map(Into::into)
            .collect())
    }
}
