// src/domain/slugs.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};

/// Width of the `slug` columns.
pub const MAX_SLUG_LEN: usize = 255;

/// Generated stems stop short of the column width so a `-N` suffix still fits.
const MAX_STEM_LEN: usize = MAX_SLUG_LEN - 16;

/// Checks that `value` is a URL-safe token: lowercase ascii letters, digits
/// and single hyphens, not starting or ending with a hyphen.
pub fn validate_slug(value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation("slug cannot be empty".into()));
    }
    if value.len() > MAX_SLUG_LEN {
        return Err(DomainError::Validation(format!(
            "slug cannot exceed {MAX_SLUG_LEN} characters"
        )));
    }

    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || value.starts_with('-') || value.ends_with('-') || value.contains("--") {
        return Err(DomainError::Validation(format!(
            "slug '{value}' must contain only lowercase letters, digits and single hyphens"
        )));
    }

    Ok(())
}

/// Slugs already claimed by stored records.
#[async_trait]
pub trait SlugIndex: Send + Sync {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool>;
}

/// Derives slugs from titles, numbering them `stem-1`, `stem-2`, ... until
/// the index reports a free one.
pub struct SlugService {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    /// `fallback` stands in for titles that slugify to nothing.
    pub fn stem(&self, title: &str, fallback: &str) -> String {
        let generated = self.generator.slugify(title);
        let truncated: String = generated.chars().take(MAX_STEM_LEN).collect();
        match truncated.trim_end_matches('-') {
            "" => fallback.to_string(),
            stem => stem.to_string(),
        }
    }

    pub async fn unique<I>(&self, index: &I, title: &str, fallback: &str) -> DomainResult<String>
    where
        I: SlugIndex + ?Sized,
    {
        let stem = self.stem(title, fallback);
        if !index.is_taken(&stem).await? {
            return Ok(stem);
        }

        for n in 1u64.. {
            let candidate = format!("{stem}-{n}");
            if !index.is_taken(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(DomainError::Conflict(format!("no free slug left for '{stem}'")))
    }
}
