// src/application/content/mod.rs
//! Post-processing of raw entry content before it is shown.
//!
//! Modifiers are plain `fn(&str) -> String` transforms registered by name in
//! a process-wide table built on first use. Callers pick which ones run with
//! a [`ModifierSelection`].
mod modifiers;
mod selection;

pub use modifiers::{MORE_MARKER, embed_youtube, truncate_at_marker};
pub use selection::ModifierSelection;

use once_cell::sync::Lazy;

pub type ModifierFn = fn(&str) -> String;

#[derive(Clone, Copy)]
pub struct ContentModifier {
    pub name: &'static str,
    pub apply: ModifierFn,
}

pub struct ModifierRegistry {
    modifiers: Vec<ContentModifier>,
}

static REGISTRY: Lazy<ModifierRegistry> = Lazy::new(|| {
    ModifierRegistry::new(vec![
        ContentModifier {
            name: "youtube",
            apply: embed_youtube,
        },
        ContentModifier {
            name: "more",
            apply: truncate_at_marker,
        },
    ])
});

impl ModifierRegistry {
    pub fn new(modifiers: Vec<ContentModifier>) -> Self {
        Self { modifiers }
    }

    /// The shared registry used by the HTTP layer.
    pub fn global() -> &'static ModifierRegistry {
        &REGISTRY
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m.name == name)
    }

    /// Runs the selected modifiers over `content` in registry order.
    pub fn apply(&self, content: &str, selection: &ModifierSelection) -> String {
        for name in selection.names() {
            if !self.contains(name) {
                tracing::debug!(modifier = %name, "ignoring unknown content modifier");
            }
        }

        self.modifiers
            .iter()
            .filter(|m| selection.includes(m.name))
            .fold(content.to_string(), |acc, m| (m.apply)(&acc))
    }
}
