// src/infrastructure/repositories/postgres_entry.rs
use super::map_sqlx;
use crate::domain::category::CategoryId;
use crate::domain::entry::{
    Entry, EntryContent, EntryExtract, EntryFilter, EntryId, EntryPage, EntryReadRepository,
    EntrySlug, EntryTitle, EntryUpdate, EntryWriteRepository, NewEntry, PageRequest, Tag,
    TagList, Visibility,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::BTreeSet;

const ENTRY_COLUMNS: &str = "e.id, e.title, e.slug, e.extract, e.content, e.tags, e.author_id, \
     e.created_at, e.modified_at, e.publish_at, e.state, e.allow_comments, \
     ARRAY(SELECT ec.category_id FROM entry_categories ec \
           WHERE ec.entry_id = e.id ORDER BY ec.category_id) AS category_ids";

const NEWEST_FIRST: &str = " ORDER BY e.publish_at DESC NULLS LAST, e.created_at DESC, e.id DESC";

#[derive(Clone)]
pub struct PostgresEntryWriteRepository {
    pool: PgPool,
}

impl PostgresEntryWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresEntryReadRepository {
    pool: PgPool,
}

impl PostgresEntryReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EntryRow {
    id: i64,
    title: String,
    slug: String,
    extract: Option<String>,
    content: String,
    tags: Vec<String>,
    author_id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    publish_at: Option<DateTime<Utc>>,
    state: String,
    allow_comments: bool,
    category_ids: Vec<i64>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = DomainError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let tags = row
            .tags
            .iter()
            .map(Tag::new)
            .collect::<DomainResult<Vec<_>>>()?;
        let categories = row
            .category_ids
            .into_iter()
            .map(CategoryId::new)
            .collect::<DomainResult<BTreeSet<_>>>()?;

        Ok(Entry {
            id: EntryId::new(row.id)?,
            title: EntryTitle::new(row.title)?,
            slug: EntrySlug::new(row.slug)?,
            extract: EntryExtract::parse(row.extract),
            content: EntryContent::new(row.content)?,
            tags: TagList::from_tags(tags),
            categories,
            author_id: UserId::new(row.author_id)?,
            created_at: row.created_at,
            modified_at: row.modified_at,
            publish_at: row.publish_at,
            state: row.state.parse()?,
            allow_comments: row.allow_comments,
        })
    }
}

async fn fetch_entry(conn: &mut PgConnection, id: i64) -> DomainResult<Option<Entry>> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
    builder.push(ENTRY_COLUMNS);
    builder.push(" FROM entries e WHERE e.id = ");
    builder.push_bind(id);

    let row = builder
        .build_query_as::<EntryRow>()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    row.map(Entry::try_from).transpose()
}

async fn replace_categories(
    conn: &mut PgConnection,
    entry_id: i64,
    categories: &BTreeSet<CategoryId>,
) -> DomainResult<()> {
    sqlx::query("DELETE FROM entry_categories WHERE entry_id = $1")
        .bind(entry_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if categories.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO entry_categories (entry_id, category_id) ");
    builder.push_values(categories, |mut row, category| {
        row.push_bind(entry_id).push_bind(category.0);
    });
    builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

fn tags_column(tags: &TagList) -> Vec<String> {
    tags.to_strings()
}

#[async_trait]
impl EntryWriteRepository for PostgresEntryWriteRepository {
    async fn insert(&self, entry: NewEntry) -> DomainResult<Entry> {
        let state = entry.initial_state();
        let NewEntry {
            title,
            slug,
            extract,
            content,
            tags,
            categories,
            author_id,
            allow_comments,
            created_at,
        } = entry;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO entries (title, slug, extract, content, tags, author_id, created_at, modified_at, state, allow_comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8, $9)
             RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(extract.as_ref().map(EntryExtract::as_str))
        .bind(content.as_str())
        .bind(tags_column(&tags))
        .bind(i64::from(author_id))
        .bind(created_at)
        .bind(state.as_str())
        .bind(allow_comments)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_categories(&mut *tx, id, &categories).await?;
        let created = fetch_entry(&mut *tx, id)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted entry vanished".into()))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn update(&self, update: EntryUpdate) -> DomainResult<Entry> {
        let EntryUpdate {
            id,
            title,
            slug,
            extract,
            content,
            tags,
            categories,
            state,
            publish_at,
            allow_comments,
            modified_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE entries SET modified_at = ");
        builder.push_bind(modified_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(extract) = extract {
            builder.push(", extract = ");
            builder.push_bind(extract.map(EntryExtract::into_inner));
        }
        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content.into_inner());
        }
        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tags_column(&tags));
        }
        if let Some(state) = state {
            builder.push(", state = ");
            builder.push_bind(state.as_str());
        }
        if let Some(publish_at) = publish_at {
            builder.push(", publish_at = COALESCE(publish_at, ");
            builder.push_bind(publish_at);
            builder.push(")");
        }
        if let Some(allow) = allow_comments {
            builder.push(", allow_comments = ");
            builder.push_bind(allow);
        }

        let raw_id = i64::from(id);
        builder.push(" WHERE id = ");
        builder.push_bind(raw_id);
        builder.push(" RETURNING id");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let updated = builder
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if updated.is_none() {
            return Err(DomainError::NotFound(format!("entry {id} not found")));
        }

        if let Some(categories) = categories {
            replace_categories(&mut *tx, raw_id, &categories).await?;
        }

        let entry = fetch_entry(&mut *tx, raw_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("entry {id} not found")))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(entry)
    }

    async fn delete(&self, id: EntryId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("entry {id} not found")));
        }
        Ok(())
    }
}

impl PostgresEntryReadRepository {
    /// Appends the `WHERE` clause equivalent of [`EntryFilter::matches`].
    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &EntryFilter) {
        builder.push(" WHERE TRUE");

        if let Visibility::Public { now } = filter.visibility {
            builder.push(" AND e.state = 'published' AND e.publish_at <= ");
            builder.push_bind(now);
        }

        if let Some(categories) = &filter.categories {
            let ids: Vec<i64> = categories.iter().map(|c| c.0).collect();
            builder.push(
                " AND EXISTS (SELECT 1 FROM entry_categories ec WHERE ec.entry_id = e.id AND ec.category_id = ANY(",
            );
            builder.push_bind(ids);
            builder.push("))");
        }

        if let Some(tag) = &filter.tag {
            builder.push(" AND ");
            builder.push_bind(tag.as_str().to_string());
            builder.push(" = ANY(e.tags)");
        }

        if let Some(from) = filter.published_from {
            builder.push(" AND e.publish_at >= ");
            builder.push_bind(from);
        }

        if let Some(until) = filter.published_until {
            builder.push(" AND e.publish_at < ");
            builder.push_bind(until);
        }

        if let Some(slug) = &filter.exclude_slug {
            builder.push(" AND e.slug <> ");
            builder.push_bind(slug.as_str().to_string());
        }

        if let Some(author) = filter.author {
            builder.push(" AND e.author_id = ");
            builder.push_bind(author.0);
        }

        if let Some(state) = filter.state {
            builder.push(" AND e.state = ");
            builder.push_bind(state.as_str());
        }

        if let Some(allowed) = filter.allow_comments {
            builder.push(" AND e.allow_comments = ");
            builder.push_bind(allowed);
        }

        if let Some(term) = &filter.search {
            builder.push(" AND (");
            let mut columns = builder.separated(" OR ");
            for column in ["e.title", "e.slug", "COALESCE(e.extract, '')", "e.content"] {
                columns.push("STRPOS(LOWER(");
                columns.push_unseparated(column);
                columns.push_unseparated("), ");
                columns.push_bind_unseparated(term.clone());
                columns.push_unseparated(") > 0");
            }
            builder.push(")");
        }
    }

    async fn fetch(
        &self,
        filter: &EntryFilter,
        limit: Option<u32>,
        offset: u64,
    ) -> DomainResult<Vec<Entry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ENTRY_COLUMNS);
        builder.push(" FROM entries e");
        Self::push_filter(&mut builder, filter);
        builder.push(NEWEST_FIRST);

        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }
        if offset > 0 {
            builder.push(" OFFSET ");
            builder.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
        }

        let rows = builder
            .build_query_as::<EntryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Entry::try_from).collect()
    }
}

#[async_trait]
impl EntryReadRepository for PostgresEntryReadRepository {
    async fn find_by_id(&self, id: EntryId) -> DomainResult<Option<Entry>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        fetch_entry(&mut *conn, i64::from(id)).await
    }

    async fn find_by_slug(&self, slug: &EntrySlug) -> DomainResult<Option<Entry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ENTRY_COLUMNS);
        builder.push(" FROM entries e WHERE e.slug = ");
        builder.push_bind(slug.as_str().to_string());

        let row = builder
            .build_query_as::<EntryRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Entry::try_from).transpose()
    }

    async fn list(&self, filter: &EntryFilter, limit: Option<u32>) -> DomainResult<Vec<Entry>> {
        self.fetch(filter, limit, 0).await
    }

    async fn list_page(&self, filter: &EntryFilter, page: PageRequest) -> DomainResult<EntryPage> {
        let total = self.count(filter).await?;
        let entries = self
            .fetch(filter, Some(page.per_page), page.offset())
            .await?;
        Ok(EntryPage { entries, total })
    }

    async fn count(&self, filter: &EntryFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM entries e");
        Self::push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn publish_dates(&self, filter: &EntryFilter) -> DomainResult<Vec<DateTime<Utc>>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT e.publish_at FROM entries e");
        Self::push_filter(&mut builder, filter);
        builder.push(" AND e.publish_at IS NOT NULL ORDER BY e.publish_at DESC");

        builder
            .build_query_scalar::<DateTime<Utc>>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn used_categories(&self, filter: &EntryFilter) -> DomainResult<BTreeSet<CategoryId>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT DISTINCT ec.category_id FROM entries e \
             JOIN entry_categories ec ON ec.entry_id = e.id",
        );
        Self::push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(CategoryId::new)
            .collect()
    }
}
