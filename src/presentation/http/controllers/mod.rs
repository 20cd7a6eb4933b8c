// src/presentation/http/controllers/mod.rs
pub mod admin_categories;
pub mod admin_entries;
pub mod archive;
pub mod blog;
pub mod widgets;

use crate::presentation::http::error::{HttpError, HttpResult};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Parses a numeric URL segment; anything that does not parse is an unknown
/// resource rather than a bad request.
pub(crate) fn segment<T: FromStr>(raw: &str) -> HttpResult<T> {
    raw.parse()
        .map_err(|_| HttpError::not_found(format!("no page at segment `{raw}`")))
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageParams {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Zero falls back to the view's configured page size.
    pub(crate) fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn non_numeric_segment_is_not_found() {
        let err = segment::<i32>("widgets").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(segment::<u32>("03").unwrap(), 3);
    }
}
