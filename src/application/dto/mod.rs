pub mod archive;
pub mod auth;
pub mod categories;
pub mod entries;
pub mod pagination;
pub mod serde_time;
pub mod widgets;

pub use archive::{ArchiveDto, DateBucketDto};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use categories::{CategoryDto, CategoryEntriesDto};
pub use entries::{
    BulkActionResultDto, EntryActionsDto, EntryDetailDto, EntryDto, SkippedEntryDto,
};
pub use pagination::EntryPageDto;
pub use widgets::{EntriesForMonthDto, TagEntriesDto, TagUsageDto};
