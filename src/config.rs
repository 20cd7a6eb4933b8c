// src/config.rs
use crate::application::services::BlogSettings;
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    tagging_enabled: bool,
    blog: BlogSettings,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got `{value}`"))),
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(format!(
            "{key} must be a boolean, got `{value}`"
        ))),
    }
}

impl AppConfig {
    /// Build configuration from environment variables, after loading `.env`
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| MEMORY_DATABASE_URL.into());
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let biscuit_private_key = lookup("BISCUIT_ROOT_PRIVATE_KEY")
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;

        if biscuit_private_key.len() != 64 {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = parse_number("TOKEN_TTL_SECONDS", lookup("TOKEN_TTL_SECONDS"), 3600u64)?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        let defaults = BlogSettings::default();
        let blog = BlogSettings {
            archive_allow_empty: parse_flag(
                "ARCHIVE_ALLOW_EMPTY",
                lookup("ARCHIVE_ALLOW_EMPTY"),
                defaults.archive_allow_empty,
            )?,
            archive_page_size: parse_number(
                "ARCHIVE_PAGE_SIZE",
                lookup("ARCHIVE_PAGE_SIZE"),
                defaults.archive_page_size,
            )?,
            tag_page_size: parse_number(
                "TAG_PAGE_SIZE",
                lookup("TAG_PAGE_SIZE"),
                defaults.tag_page_size,
            )?,
        };
        if blog.archive_page_size == 0 || blog.tag_page_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }

        Ok(Self {
            database_url,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            tagging_enabled: parse_flag("TAGGING_ENABLED", lookup("TAGGING_ENABLED"), true)?,
            blog,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// `memory://` selects the process-local store instead of Postgres.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.starts_with(MEMORY_DATABASE_URL)
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn tagging_enabled(&self) -> bool {
        self.tagging_enabled
    }

    pub fn blog_settings(&self) -> BlogSettings {
        self.blog
    }
}
