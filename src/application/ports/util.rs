// src/application/ports/util.rs

/// Turns a human title into a URL-safe token (lowercase, hyphen separated).
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
