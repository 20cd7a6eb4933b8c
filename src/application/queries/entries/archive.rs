// src/application/queries/entries/archive.rs
use super::EntryQueryService;
use crate::{
    application::{
        dto::{ArchiveDto, EntryPageDto, archive::period_label},
        error::{ApplicationError, ApplicationResult},
    },
    domain::entry::{ArchivePeriod, PageRequest, bucket_dates},
};

pub struct ArchiveQuery {
    pub period: ArchivePeriod,
    pub page: u32,
    pub per_page: u32,
}

impl EntryQueryService {
    /// Public entries published within the period, newest first, together
    /// with the next-finer date buckets.
    pub async fn archive(&self, query: ArchiveQuery) -> ApplicationResult<ArchiveDto> {
        let mut filter = self.manager.public_filter();
        if let Some((from, until)) = query.period.bounds() {
            filter = filter.published_within(from, until);
        }

        let request = PageRequest::new(query.page, query.per_page, self.settings.archive_page_size);
        let page = self.read_repo.list_page(&filter, request).await?;

        if page.total == 0 && !self.settings.archive_allow_empty {
            return Err(ApplicationError::not_found(format!(
                "no entries published in {}",
                period_label(&query.period)
            )));
        }

        let date_list = match query.period.child_granularity() {
            Some(granularity) => {
                let dates = self.read_repo.publish_dates(&filter).await?;
                bucket_dates(&dates, granularity)
                    .into_iter()
                    .map(Into::into)
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(ArchiveDto {
            period: period_label(&query.period),
            date_list,
            entries: EntryPageDto::new(page, request),
        })
    }
}
