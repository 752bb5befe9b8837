//! Module representing emoji reactions on a review post.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};
use thiserror::Error;

/// Represents one of the six fixed reaction kinds a post can receive.
///
/// The declaration order is the order used whenever reactions are listed, as
/// in [`ReactionState::breakdown`].
///
/// <div class="warning">
///
/// **A user has at most one reaction per post**
///
/// </div>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// 👍
    Like,
    /// ❤️
    Love,
    /// 😂
    Laugh,
    /// 😮
    Wow,
    /// 😢
    Sad,
    /// 😠
    Angry,
}

impl ReactionKind {
    /// Every reaction kind, in listing order.
    pub const ALL: [Self; 6] = [
        Self::Like,
        Self::Love,
        Self::Laugh,
        Self::Wow,
        Self::Sad,
        Self::Angry,
    ];

    /// Returns the value the site uses for this kind in `reaction_type` and
    /// `data-reaction`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Wow => "wow",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }

    /// Returns the emoji shown for this kind.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Laugh => "😂",
            Self::Wow => "😮",
            Self::Sad => "😢",
            Self::Angry => "😠",
        }
    }

    /// Returns the label shown next to the emoji.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Love => "Love",
            Self::Laugh => "Haha",
            Self::Wow => "Wow",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
        }
    }
}

impl Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a reaction kind the site does not know about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown reaction kind `{0}`")]
pub struct UnknownReaction(String);

impl FromStr for ReactionKind {
    type Err = UnknownReaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownReaction(s.to_owned()))
    }
}

/// Represents the reactions on a post, as seen by the current user.
///
/// The total is always derived from the per-kind counts, so the two can never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionState {
    user_reaction: Option<ReactionKind>,
    by_kind: BTreeMap<ReactionKind, u32>,
}

impl ReactionState {
    /// Creates a new `ReactionState`. Zero counts are dropped.
    ///
    /// Counts that would push the total past `u32::MAX` are clamped so the
    /// total stays representable.
    #[must_use]
    pub fn new(
        user_reaction: Option<ReactionKind>,
        counts: impl IntoIterator<Item = (ReactionKind, u32)>,
    ) -> Self {
        let mut state = Self {
            user_reaction,
            by_kind: BTreeMap::new(),
        };

        for (kind, count) in counts {
            let room = u32::MAX - state.total();
            if count > room {
                tracing::warn!(%kind, count, "reaction count overflows the total, clamping");
            }
            state.add(kind, count.min(room));
        }

        state
    }

    /// Like [`new`](Self::new), but returns `None` if the counts add up to
    /// more than `u32::MAX` instead of clamping.
    #[must_use]
    pub fn try_new(
        user_reaction: Option<ReactionKind>,
        counts: impl IntoIterator<Item = (ReactionKind, u32)>,
    ) -> Option<Self> {
        let mut state = Self {
            user_reaction,
            by_kind: BTreeMap::new(),
        };

        for (kind, count) in counts {
            state.total().checked_add(count)?;
            state.add(kind, count);
        }

        Some(state)
    }

    /// Callers keep the total within `u32::MAX`.
    fn add(&mut self, kind: ReactionKind, count: u32) {
        if count > 0 {
            let entry = self.by_kind.entry(kind).or_insert(0);
            *entry = entry.saturating_add(count);
        }
    }

    /// Returns the current user's reaction, if any.
    #[inline]
    #[must_use]
    pub fn user_reaction(&self) -> Option<ReactionKind> {
        self.user_reaction
    }

    /// Returns the total number of reactions on the post.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.by_kind
            .values()
            .fold(0, |total, count| total.saturating_add(*count))
    }

    /// Returns the count for one kind.
    #[must_use]
    pub fn count(&self, kind: ReactionKind) -> u32 {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Returns every kind with a non-zero count, in listing order.
    pub fn breakdown(&self) -> impl Iterator<Item = (ReactionKind, u32)> + '_ {
        self.by_kind.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Returns `true` if nobody reacted to the post yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// Returns the noun matching [`total`](Self::total): `reaction` or `reactions`.
    #[must_use]
    pub fn noun(&self) -> &'static str {
        if self.total() == 1 {
            "reaction"
        } else {
            "reactions"
        }
    }
}
