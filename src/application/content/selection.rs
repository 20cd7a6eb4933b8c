// src/application/content/selection.rs
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

/// Which content modifiers to run.
///
/// Parsed from the filter argument syntax: an empty string selects every
/// modifier, `a,b` selects only `a` and `b`, and `!a,b` selects everything
/// except `a` and `b`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModifierSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
    Except(BTreeSet<String>),
}

impl ModifierSelection {
    pub fn includes(&self, name: &str) -> bool {
        match self {
            ModifierSelection::All => true,
            ModifierSelection::Only(names) => names.contains(name),
            ModifierSelection::Except(names) => !names.contains(name),
        }
    }

    /// Names mentioned explicitly by the selection.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names = match self {
            ModifierSelection::All => None,
            ModifierSelection::Only(names) | ModifierSelection::Except(names) => Some(names),
        };
        names.into_iter().flatten().map(String::as_str)
    }
}

impl FromStr for ModifierSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (exclude, list) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let names: BTreeSet<String> = list
            .split(',')
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        Ok(match (exclude, names.is_empty()) {
            (_, true) => ModifierSelection::All,
            (true, false) => ModifierSelection::Except(names),
            (false, false) => ModifierSelection::Only(names),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ModifierSelection {
        s.parse().unwrap()
    }

    #[test]
    fn empty_means_all() {
        assert_eq!(parse(""), ModifierSelection::All);
        assert_eq!(parse("  "), ModifierSelection::All);
        assert_eq!(parse("!"), ModifierSelection::All);
    }

    #[test]
    fn plain_list_is_inclusion() {
        let sel = parse("youtube, more");
        assert!(sel.includes("youtube"));
        assert!(sel.includes("more"));
        assert!(!sel.includes("other"));
    }

    #[test]
    fn bang_prefix_is_exclusion() {
        let sel = parse("!youtube");
        assert!(!sel.includes("youtube"));
        assert!(sel.includes("more"));
        assert_eq!(sel.names().collect::<Vec<_>>(), vec!["youtube"]);
    }
}
