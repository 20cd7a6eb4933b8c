// src/application/content/modifiers.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Author-inserted token marking the end of the teaser.
pub const MORE_MARKER: &str = "<!--more-->";

// Bare links only: a URL preceded by start of input, whitespace or a closing
// tag. Links inside attributes (`href="..."`) are left alone.
static YOUTUBE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)(^|[\s>])https?://(?:www\.)?(?:youtube\.com/watch\?(?:[^\s<"]*&)?v=|youtu\.be/)([A-Za-z0-9_-]{11})[^\s<"]*"#,
    )
    .expect("youtube link pattern is valid")
});

/// Replaces bare YouTube links with an embedded player.
pub fn embed_youtube(content: &str) -> String {
    YOUTUBE_LINK
        .replace_all(content, |caps: &regex::Captures<'_>| {
            format!(
                "{}<iframe width=\"560\" height=\"315\" src=\"https://www.youtube.com/embed/{}\" frameborder=\"0\" allowfullscreen></iframe>",
                &caps[1], &caps[2]
            )
        })
        .into_owned()
}

/// Cuts content at the first [`MORE_MARKER`]; content without one is
/// returned unchanged.
pub fn truncate_at_marker(content: &str) -> String {
    match content.find(MORE_MARKER) {
        Some(idx) => content[..idx].trim_end().to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_watch_and_short_links() {
        let out = embed_youtube("a https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10 b");
        assert_eq!(
            out,
            "a <iframe width=\"560\" height=\"315\" src=\"https://www.youtube.com/embed/dQw4w9WgXcQ\" frameborder=\"0\" allowfullscreen></iframe> b"
        );

        let out = embed_youtube("https://youtu.be/dQw4w9WgXcQ");
        assert!(out.starts_with("<iframe"));
    }

    #[test]
    fn leaves_attribute_links_alone() {
        let html = r#"<a href="https://youtu.be/dQw4w9WgXcQ">clip</a>"#;
        assert_eq!(embed_youtube(html), html);
    }

    #[test]
    fn truncates_at_marker() {
        assert_eq!(truncate_at_marker("teaser  \n<!--more-->\nrest"), "teaser");
        assert_eq!(truncate_at_marker("no marker"), "no marker");
    }
}
