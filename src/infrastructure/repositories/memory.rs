// src/infrastructure/repositories/memory.rs
use crate::domain::category::{
    Category, CategoryId, CategoryRepository, CategorySlug, CategoryUpdate, NewCategory,
};
use crate::domain::entry::{
    Entry, EntryFilter, EntryId, EntryPage, EntryReadRepository, EntrySlug, EntryUpdate,
    EntryWriteRepository, NewEntry, PageRequest, newest_first,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    entries: BTreeMap<EntryId, Entry>,
    categories: BTreeMap<CategoryId, Category>,
    last_entry_id: i64,
    last_category_id: i64,
}

impl Tables {
    fn ensure_entry_slug_free(&self, slug: &EntrySlug, owner: Option<EntryId>) -> DomainResult<()> {
        let taken = self
            .entries
            .values()
            .any(|e| &e.slug == slug && Some(e.id) != owner);
        if taken {
            return Err(DomainError::Conflict("entry slug already exists".into()));
        }
        Ok(())
    }

    fn ensure_category_slug_free(
        &self,
        slug: &CategorySlug,
        owner: Option<CategoryId>,
    ) -> DomainResult<()> {
        let taken = self
            .categories
            .values()
            .any(|c| &c.slug == slug && Some(c.id) != owner);
        if taken {
            return Err(DomainError::Conflict("category slug already exists".into()));
        }
        Ok(())
    }

    fn ensure_categories_exist(&self, ids: &BTreeSet<CategoryId>) -> DomainResult<()> {
        match ids.iter().find(|id| !self.categories.contains_key(id)) {
            Some(missing) => Err(DomainError::Validation(format!(
                "unknown category {}",
                missing.0
            ))),
            None => Ok(()),
        }
    }

    fn matching(&self, filter: &EntryFilter) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().filter(|e| filter.matches(e)).collect();
        entries.sort_by(|a, b| newest_first(a, b));
        entries
    }
}

fn row_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Process-local store backing every repository port.
///
/// Selected with `DATABASE_URL=memory://` and used by the integration tests.
/// It mirrors the Postgres schema's constraints: unique slugs, category
/// references, and cascading category removal.
#[derive(Default)]
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl EntryWriteRepository for InMemoryBlogStore {
    async fn insert(&self, entry: NewEntry) -> DomainResult<Entry> {
        let mut tables = self.write()?;
        tables.ensure_entry_slug_free(&entry.slug, None)?;
        tables.ensure_categories_exist(&entry.categories)?;

        tables.last_entry_id += 1;
        let id = EntryId::new(tables.last_entry_id)?;
        let state = entry.initial_state();
        let created = Entry {
            id,
            title: entry.title,
            slug: entry.slug,
            extract: entry.extract,
            content: entry.content,
            tags: entry.tags,
            categories: entry.categories,
            author_id: entry.author_id,
            created_at: entry.created_at,
            modified_at: entry.created_at,
            publish_at: None,
            state,
            allow_comments: entry.allow_comments,
        };
        tables.entries.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: EntryUpdate) -> DomainResult<Entry> {
        let mut tables = self.write()?;
        if !tables.entries.contains_key(&update.id) {
            return Err(DomainError::NotFound(format!("entry {} not found", update.id)));
        }
        if let Some(slug) = &update.slug {
            tables.ensure_entry_slug_free(slug, Some(update.id))?;
        }
        if let Some(categories) = &update.categories {
            tables.ensure_categories_exist(categories)?;
        }

        let id = update.id;
        let entry = tables
            .entries
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("entry {id} not found")))?;
        update.apply_to(entry);
        Ok(entry.clone())
    }

    async fn delete(&self, id: EntryId) -> DomainResult<()> {
        let mut tables = self.write()?;
        tables
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("entry {id} not found")))
    }
}

#[async_trait]
impl EntryReadRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: EntryId) -> DomainResult<Option<Entry>> {
        Ok(self.read()?.entries.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &EntrySlug) -> DomainResult<Option<Entry>> {
        Ok(self
            .read()?
            .entries
            .values()
            .find(|e| &e.slug == slug)
            .cloned())
    }

    async fn list(&self, filter: &EntryFilter, limit: Option<u32>) -> DomainResult<Vec<Entry>> {
        let tables = self.read()?;
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(tables
            .matching(filter)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_page(&self, filter: &EntryFilter, page: PageRequest) -> DomainResult<EntryPage> {
        let tables = self.read()?;
        let matching = tables.matching(filter);
        let total = row_count(matching.len());
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let entries = matching
            .into_iter()
            .skip(offset)
            .take(usize::try_from(page.per_page).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(EntryPage { entries, total })
    }

    async fn count(&self, filter: &EntryFilter) -> DomainResult<u64> {
        Ok(row_count(self.read()?.matching(filter).len()))
    }

    async fn publish_dates(&self, filter: &EntryFilter) -> DomainResult<Vec<DateTime<Utc>>> {
        Ok(self
            .read()?
            .matching(filter)
            .into_iter()
            .filter_map(|e| e.publish_at)
            .collect())
    }

    async fn used_categories(&self, filter: &EntryFilter) -> DomainResult<BTreeSet<CategoryId>> {
        Ok(self
            .read()?
            .matching(filter)
            .into_iter()
            .flat_map(|e| e.categories.iter().copied())
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlogStore {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut tables = self.write()?;
        tables.ensure_category_slug_free(&category.slug, None)?;

        tables.last_category_id += 1;
        let created = Category {
            id: CategoryId::new(tables.last_category_id)?,
            title: category.title,
            slug: category.slug,
            description: category.description,
        };
        tables.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut tables = self.write()?;
        if let Some(slug) = &update.slug {
            tables.ensure_category_slug_free(slug, Some(update.id))?;
        }

        let category = tables
            .categories
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        if let Some(title) = update.title {
            category.title = title;
        }
        if let Some(slug) = update.slug {
            category.slug = slug;
        }
        if let Some(description) = update.description {
            category.description = description;
        }
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut tables = self.write()?;
        if tables.categories.remove(&id).is_none() {
            return Err(DomainError::NotFound("category not found".into()));
        }
        for entry in tables.entries.values_mut() {
            entry.categories.remove(&id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .values()
            .find(|c| &c.slug == slug)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.read()?.categories.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.title
                .as_str()
                .cmp(b.title.as_str())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{CategoryDescription, CategoryTitle};
    use crate::domain::entry::{EntryContent, EntryTitle, TagList};
    use crate::domain::user::UserId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn new_entry(slug: &str, categories: &[CategoryId]) -> NewEntry {
        NewEntry {
            title: EntryTitle::new(slug).unwrap(),
            slug: EntrySlug::new(slug).unwrap(),
            extract: None,
            content: EntryContent::new("body").unwrap(),
            tags: TagList::empty(),
            categories: categories.iter().copied().collect(),
            author_id: UserId::new(1).unwrap(),
            allow_comments: true,
            created_at: now(),
        }
    }

    async fn category(store: &InMemoryBlogStore, slug: &str) -> Category {
        CategoryRepository::insert(
            store,
            NewCategory {
                title: CategoryTitle::new(slug).unwrap(),
                slug: CategorySlug::new(slug).unwrap(),
                description: CategoryDescription::default(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_entry_slug_conflicts() {
        let store = InMemoryBlogStore::new();
        EntryWriteRepository::insert(&store, new_entry("same", &[]))
            .await
            .unwrap();
        let err = EntryWriteRepository::insert(&store, new_entry("same", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let store = InMemoryBlogStore::new();
        let err = EntryWriteRepository::insert(&store, new_entry("a", &[CategoryId(42)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn deleting_category_keeps_entries() {
        let store = InMemoryBlogStore::new();
        let news = category(&store, "news").await;
        let entry = EntryWriteRepository::insert(&store, new_entry("a", &[news.id]))
            .await
            .unwrap();

        CategoryRepository::delete(&store, news.id).await.unwrap();

        let reloaded = EntryReadRepository::find_by_id(&store, entry.id)
            .await
            .unwrap()
            .expect("entry survives");
        assert!(reloaded.categories.is_empty());
    }

    #[tokio::test]
    async fn used_categories_follow_the_filter() {
        let store = InMemoryBlogStore::new();
        let news = category(&store, "news").await;
        let misc = category(&store, "misc").await;
        let mut live = EntryWriteRepository::insert(&store, new_entry("live", &[news.id]))
            .await
            .unwrap();
        EntryWriteRepository::insert(&store, new_entry("draft", &[misc.id]))
            .await
            .unwrap();
        live.take_action(crate::domain::entry::EntryAction::Publish, now())
            .unwrap();
        store.write().unwrap().entries.insert(live.id, live);

        let public = EntryReadRepository::used_categories(&store, &EntryFilter::public(now()))
            .await
            .unwrap();
        assert_eq!(public, BTreeSet::from([news.id]));

        let all = EntryReadRepository::used_categories(&store, &EntryFilter::all())
            .await
            .unwrap();
        assert_eq!(all, BTreeSet::from([news.id, misc.id]));
    }
}
