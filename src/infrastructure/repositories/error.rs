// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_ENTRY_SLUG: &str = "entries_slug_key";
const CNT_ENTRY_PUBLISHED_CHECK: &str = "entries_published_requires_timestamp_chk";
const CNT_ENTRY_STATE_CHECK: &str = "entries_state_chk";
const CNT_ENTRY_CATEGORY: &str = "entry_categories_category_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ENTRY_SLUG => DomainError::Conflict("entry slug already exists".into()),
                    CNT_CATEGORY_SLUG => {
                        DomainError::Conflict("category slug already exists".into())
                    }
                    CNT_ENTRY_CATEGORY => DomainError::Validation("unknown category".into()),
                    CNT_ENTRY_PUBLISHED_CHECK => DomainError::Validation(
                        "published entries require a publish date".into(),
                    ),
                    CNT_ENTRY_STATE_CHECK => {
                        DomainError::Validation("unknown publication state".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    "22001" => {
                        return DomainError::Validation("value too long for column".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
