// src/domain/entry/tags.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::collections::BTreeSet;
use std::fmt;

const MAX_TAG_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Normalises to trimmed lowercase.
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let value = value.as_ref().trim().to_lowercase();
        if value.is_empty() {
            return Err(DomainError::Validation("tag cannot be empty".into()));
        }
        if value.chars().count() > MAX_TAG_LEN {
            return Err(DomainError::Validation(format!(
                "tag must be at most {MAX_TAG_LEN} characters"
            )));
        }
        if value.contains('"') || value.contains(',') {
            return Err(DomainError::Validation(
                "tag cannot contain quotes or commas".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorted, de-duplicated set of tags attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagList(BTreeSet<Tag>);

impl TagList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses free-text tag input.
    ///
    /// Input containing a comma (outside double quotes) is split on commas;
    /// otherwise it is split on whitespace. Double quotes group several words
    /// into one tag: `"django tagging" rust` yields `django tagging` and
    /// `rust`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::empty());
        }

        let delimiter = if has_unquoted_comma(input) { ',' } else { ' ' };
        let mut words = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in input.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                c if !in_quotes && (c == delimiter || (delimiter == ' ' && c.is_whitespace())) => {
                    words.push(std::mem::take(&mut current));
                }
                c => current.push(c),
            }
        }
        words.push(current);

        words
            .into_iter()
            .filter(|w| !w.trim().is_empty())
            .map(Tag::new)
            .collect::<DomainResult<BTreeSet<_>>>()
            .map(Self)
    }

    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self(tags.into_iter().collect())
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags present in both lists.
    pub fn overlap(&self, other: &TagList) -> usize {
        self.0.intersection(&other.0).count()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for TagList {
    /// Renders back into input syntax; multi-word tags are quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|t| {
                if t.as_str().contains(char::is_whitespace) {
                    format!("\"{}\"", t.as_str())
                } else {
                    t.as_str().to_string()
                }
            })
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

fn has_unquoted_comma(input: &str) -> bool {
    let mut in_quotes = false;
    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &TagList) -> Vec<String> {
        list.to_strings()
    }

    #[test]
    fn splits_on_whitespace_without_commas() {
        let tags = TagList::parse("rust  Web\tasync").unwrap();
        assert_eq!(names(&tags), vec!["async", "rust", "web"]);
    }

    #[test]
    fn commas_take_precedence_over_spaces() {
        let tags = TagList::parse("open source, rust").unwrap();
        assert_eq!(names(&tags), vec!["open source", "rust"]);
    }

    #[test]
    fn quotes_group_words() {
        let tags = TagList::parse(r#""django tagging" rust rust"#).unwrap();
        assert_eq!(names(&tags), vec!["django tagging", "rust"]);
        assert_eq!(tags.to_string(), r#""django tagging" rust"#);
    }

    #[test]
    fn quoted_comma_does_not_switch_delimiter() {
        let tags = TagList::parse(r#""a,b" c"#);
        assert!(tags.is_err(), "commas are not allowed inside a tag");
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(TagList::parse("   ").unwrap().is_empty());
        assert!(TagList::parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn overlap_counts_shared_tags() {
        let a = TagList::parse("rust web async").unwrap();
        let b = TagList::parse("web async cooking").unwrap();
        assert_eq!(a.overlap(&b), 2);
    }
}
