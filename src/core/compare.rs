//! Comparison policy for card identity and ordering.
//!
//! Every operation that needs equality, ordering, or matching takes an
//! explicit [`ComparePolicy`] rather than consulting shared state, so
//! two game contexts can hold different policies without interfering.
//!
//! ## Semantics
//!
//! - `compare`: rank first (by the active rank order), tie-break by
//!   suit priority. `RankOnly` / `SuitOnly` reduce to a single key.
//! - `equals`: `compare == Equal` — an AND over the enabled attributes.
//! - `matches`: an OR over the enabled attributes. Deliberately looser
//!   than `equals`: under `SuitAndRank`, a card matches a target that
//!   shares *either* rank or suit.
//! - `hash_card`: hashes only the enabled attributes, so two cards
//!   equal under a policy hash identically under that policy. Hashes
//!   are **not** stable across policies; callers that key containers
//!   by card hash must rebuild them when switching policies.
//!
//! With [`CompareOn::Disabled`] every operation fails with
//! [`GameError::IllegalComparison`]. This is a safety valve: callers
//! doing raw positional work can disable identity semantics and any
//! stray comparison surfaces loudly instead of silently succeeding.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::cards::CardFace;

/// Which card attributes participate in comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOn {
    SuitOnly,
    RankOnly,
    SuitAndRank,
    /// All comparison operations fail.
    Disabled,
}

/// An explicit comparison policy: attribute selection plus the active
/// rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparePolicy {
    compare_on: CompareOn,
    /// Use the alternate rank order (Ace high) for ordering.
    ace_high: bool,
}

impl Default for ComparePolicy {
    fn default() -> Self {
        Self::new(CompareOn::SuitAndRank)
    }
}

impl ComparePolicy {
    /// Create a policy with the primary (Ace-low) rank order.
    #[must_use]
    pub const fn new(compare_on: CompareOn) -> Self {
        Self {
            compare_on,
            ace_high: false,
        }
    }

    /// Switch to the alternate (Ace-high) rank order.
    #[must_use]
    pub const fn with_ace_high(mut self) -> Self {
        self.ace_high = true;
        self
    }

    /// The attribute selection in force.
    #[must_use]
    pub const fn compare_on(&self) -> CompareOn {
        self.compare_on
    }

    /// Check whether comparisons are permitted at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        !matches!(self.compare_on, CompareOn::Disabled)
    }

    const fn uses_rank(&self) -> bool {
        matches!(self.compare_on, CompareOn::RankOnly | CompareOn::SuitAndRank)
    }

    const fn uses_suit(&self) -> bool {
        matches!(self.compare_on, CompareOn::SuitOnly | CompareOn::SuitAndRank)
    }

    fn rank_key(&self, face: &CardFace) -> u8 {
        if self.ace_high {
            face.rank.alt_order()
        } else {
            face.rank.order()
        }
    }

    fn guard(&self) -> Result<(), GameError> {
        if self.enabled() {
            Ok(())
        } else {
            Err(GameError::IllegalComparison)
        }
    }

    /// Order two faces under this policy.
    pub fn compare(&self, a: &CardFace, b: &CardFace) -> Result<Ordering, GameError> {
        self.guard()?;

        let mut ordering = Ordering::Equal;

        if self.uses_rank() {
            ordering = self.rank_key(a).cmp(&self.rank_key(b));
        }

        if ordering == Ordering::Equal && self.uses_suit() {
            ordering = a.suit.priority().cmp(&b.suit.priority());
        }

        Ok(ordering)
    }

    /// Equality: every enabled attribute must agree.
    pub fn equals(&self, a: &CardFace, b: &CardFace) -> Result<bool, GameError> {
        Ok(self.compare(a, b)? == Ordering::Equal)
    }

    /// Match: true if *any* enabled attribute agrees. Looser than
    /// [`equals`](Self::equals) by design.
    pub fn matches(&self, a: &CardFace, b: &CardFace) -> Result<bool, GameError> {
        self.guard()?;

        Ok((self.uses_rank() && a.rank == b.rank) || (self.uses_suit() && a.suit == b.suit))
    }

    /// Hash a face consistently with [`equals`](Self::equals) under
    /// this policy.
    pub fn hash_card(&self, face: &CardFace) -> Result<u64, GameError> {
        self.guard()?;

        let mut hasher = DefaultHasher::new();
        if self.uses_rank() {
            self.rank_key(face).hash(&mut hasher);
        }
        if self.uses_suit() {
            face.suit.priority().hash(&mut hasher);
        }
        Ok(hasher.finish())
    }
}
