// src/domain/entry/state.rs
//! Publication workflow of a blog entry.
//!
//! Every legal move is a row of [`TRANSITIONS`]; anything else is rejected
//! with [`DomainError::InvalidAction`]. Looking up transitions never touches
//! an entry, so callers can ask what is currently allowed without side
//! effects.
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationState {
    #[default]
    Draft,
    Review,
    Published,
    Archived,
}

impl PublicationState {
    pub const ALL: [PublicationState; 4] = [
        PublicationState::Draft,
        PublicationState::Review,
        PublicationState::Published,
        PublicationState::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationState::Draft => "draft",
            PublicationState::Review => "review",
            PublicationState::Published => "published",
            PublicationState::Archived => "archived",
        }
    }

    /// Actions that may be taken from this state, in table order.
    pub fn available_actions(&self) -> Vec<EntryAction> {
        TRANSITIONS
            .iter()
            .filter(|t| t.from == *self)
            .map(|t| t.action)
            .collect()
    }

    pub fn can(&self, action: EntryAction) -> bool {
        lookup(*self, action).is_some()
    }
}

impl fmt::Display for PublicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PublicationState::Draft),
            "review" => Ok(PublicationState::Review),
            "published" => Ok(PublicationState::Published),
            "archived" => Ok(PublicationState::Archived),
            other => Err(DomainError::Validation(format!(
                "unknown publication state '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAction {
    Submit,
    Publish,
    Reject,
    Retract,
    Archive,
}

impl EntryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryAction::Submit => "submit",
            EntryAction::Publish => "publish",
            EntryAction::Reject => "reject",
            EntryAction::Retract => "retract",
            EntryAction::Archive => "archive",
        }
    }
}

impl fmt::Display for EntryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submit" => Ok(EntryAction::Submit),
            "publish" => Ok(EntryAction::Publish),
            "reject" => Ok(EntryAction::Reject),
            "retract" => Ok(EntryAction::Retract),
            "archive" => Ok(EntryAction::Archive),
            other => Err(DomainError::Validation(format!("unknown action '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Set the publish timestamp unless one is already recorded.
    StampPublishDate,
    /// Force the comment-allowed flag off.
    DisableComments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PublicationState,
    pub action: EntryAction,
    pub to: PublicationState,
    pub effects: &'static [TransitionEffect],
}

pub const TRANSITIONS: &[Transition] = &[
    Transition {
        from: PublicationState::Draft,
        action: EntryAction::Submit,
        to: PublicationState::Review,
        effects: &[],
    },
    Transition {
        from: PublicationState::Draft,
        action: EntryAction::Publish,
        to: PublicationState::Published,
        effects: &[TransitionEffect::StampPublishDate],
    },
    Transition {
        from: PublicationState::Review,
        action: EntryAction::Publish,
        to: PublicationState::Published,
        effects: &[TransitionEffect::StampPublishDate],
    },
    Transition {
        from: PublicationState::Review,
        action: EntryAction::Reject,
        to: PublicationState::Draft,
        effects: &[],
    },
    Transition {
        from: PublicationState::Published,
        action: EntryAction::Retract,
        to: PublicationState::Draft,
        effects: &[],
    },
    Transition {
        from: PublicationState::Published,
        action: EntryAction::Archive,
        to: PublicationState::Archived,
        effects: &[TransitionEffect::DisableComments],
    },
];

fn lookup(state: PublicationState, action: EntryAction) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == state && t.action == action)
}

/// Resolves `(state, action)` against the transition table.
pub fn transition_for(
    state: PublicationState,
    action: EntryAction,
) -> DomainResult<&'static Transition> {
    lookup(state, action).ok_or_else(|| DomainError::InvalidAction {
        action: action.to_string(),
        state: state.to_string(),
    })
}
