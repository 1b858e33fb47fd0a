//! Roster and result entities shared by every layer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, FactionId};
use crate::quotient::Quotient;
use crate::variables::Tag;

/// One roster faction as entered by the user. Read-only for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    pub seats: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tag: Option<Tag>,
}

impl Faction {
    pub fn new(id: FactionId, name: impl Into<String>, seats: u32) -> Self {
        Self { id, name: name.into(), seats, tag: None }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// A resolved competing unit: an untagged faction, or a merged tag group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub seats: u32,
    /// Constituent faction names, sorted; present only for merged groups.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub members: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tag: Option<Tag>,
}

/// One cell of the divisor table, placed in the global ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QuotientEntry {
    /// 1-based position in the global descending order.
    pub rank: u32,
    pub entity_name: String,
    pub divisor: u32,
    pub value: Quotient,
    /// Set when a neighbour in the ranking carries the same value.
    pub is_tie: bool,
}

impl QuotientEntry {
    /// Seat weight of the owning entity.
    #[inline]
    pub fn seats(&self) -> u32 { self.value.seats() }
}

/// One slot of the sequential deputy outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PositionAssignment {
    /// 1-based position; for a lottery block, the first position it settles.
    pub position: u32,
    /// Exactly one entry, unless `lottery` is set.
    pub candidates: Vec<QuotientEntry>,
    /// More tied candidates than open positions; all remaining positions
    /// are decided by drawing lots among `candidates`.
    pub lottery: bool,
}

impl PositionAssignment {
    pub fn candidate_names(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.entity_name.as_str())
    }
}
