pub mod archive;
pub mod entity;
pub mod filter;
pub mod repository;
pub mod state;
pub mod tags;
pub mod value_objects;

pub use archive::{ArchivePeriod, DateBucket, Granularity, bucket_dates};
pub use entity::{Entry, EntryUpdate, NewEntry};
pub use filter::{EntryFilter, EntryPage, PageRequest, Visibility, newest_first};
pub use repository::{EntryReadRepository, EntryWriteRepository};
pub use state::{EntryAction, PublicationState, Transition, TransitionEffect};
pub use tags::{Tag, TagList};
pub use value_objects::{EntryContent, EntryExtract, EntryId, EntrySlug, EntryTitle};
