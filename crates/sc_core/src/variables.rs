//! variables.rs: affiliation tags and calculation parameters with safe defaults.
//!
//! Defaults mirror the municipal practice the calculator was built for:
//! - committee chairs: factions need at least 2 seats (faction status),
//!   merged groups are labelled "Zählgemeinschaft <Colour>";
//! - deputy mayors: 2 positions, every faction with at least 1 seat competes,
//!   merged groups are labelled "Liste Farbe <Colour>".

use core::fmt;
use core::str::FromStr;
use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// ------------ Tags ------------

/// The closed set of tags the roster UI cycles through, with display labels.
pub const KNOWN_TAGS: [(&str, &str); 4] = [
    ("red", "Rot"),
    ("blue", "Blau"),
    ("green", "Grün"),
    ("yellow", "Gelb"),
];

/// Affiliation tag shared by factions that count together.
///
/// Any non-empty, whitespace-free string is accepted; only [`KNOWN_TAGS`]
/// have a dedicated label.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tag(String);

impl Tag {
    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_known(&self) -> bool {
        KNOWN_TAGS.iter().any(|(t, _)| *t == self.0)
    }

    /// Human-readable label: fixed table for known tags, otherwise the tag
    /// with its first character upper-cased.
    pub fn label(&self) -> Cow<'_, str> {
        if let Some((_, label)) = KNOWN_TAGS.iter().find(|(t, _)| *t == self.0) {
            return Cow::Borrowed(label);
        }
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => Cow::Owned(first.to_uppercase().chain(chars).collect()),
            None => Cow::Borrowed(""),
        }
    }

    /// Name of the merged entity for this tag, e.g. `"Liste Farbe Rot"`.
    pub fn group_name(&self, group_label: &str) -> String {
        format!("{group_label} {}", self.label())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for Tag {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::InvalidTag);
        }
        Ok(Tag(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as _, Unexpected};
        let s = String::deserialize(d)?;
        s.parse()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(&s), &"non-empty tag without whitespace"))
    }
}

/// ------------ Params ------------

pub const DEFAULT_COMMITTEE_MIN_SEATS: u32 = 2;
pub const DEFAULT_COMMITTEE_LABEL: &str = "Zählgemeinschaft";
pub const DEFAULT_DEPUTY_POSITIONS: u32 = 2;
pub const DEFAULT_DEPUTY_MIN_SEATS: u32 = 1;
pub const DEFAULT_DEPUTY_LABEL: &str = "Liste Farbe";

/// Inputs to the entity resolver for one calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolveParams {
    /// Factions with `seats >= min_seats` compete.
    pub min_seats: u32,
    /// Prefix for merged entity names (`"<group_label> <TagLabel>"`).
    pub group_label: String,
}

impl Default for ResolveParams {
    fn default() -> Self {
        Self { min_seats: 1, group_label: DEFAULT_COMMITTEE_LABEL.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CommitteeParams {
    pub min_seats: u32,
    pub group_label: String,
}

impl Default for CommitteeParams {
    fn default() -> Self {
        Self {
            min_seats: DEFAULT_COMMITTEE_MIN_SEATS,
            group_label: DEFAULT_COMMITTEE_LABEL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeputyParams {
    /// Number of deputy positions to fill.
    pub positions: u32,
    pub min_seats: u32,
    pub group_label: String,
}

impl Default for DeputyParams {
    fn default() -> Self {
        Self {
            positions: DEFAULT_DEPUTY_POSITIONS,
            min_seats: DEFAULT_DEPUTY_MIN_SEATS,
            group_label: DEFAULT_DEPUTY_LABEL.to_owned(),
        }
    }
}

/// Full parameter snapshot; every field falls back to its default when
/// missing from a params document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    pub committee: CommitteeParams,
    pub deputies: DeputyParams,
}

impl Params {
    pub fn committee_resolve(&self) -> ResolveParams {
        ResolveParams {
            min_seats: self.committee.min_seats,
            group_label: self.committee.group_label.clone(),
        }
    }

    pub fn deputies_resolve(&self) -> ResolveParams {
        ResolveParams {
            min_seats: self.deputies.min_seats,
            group_label: self.deputies.group_label.clone(),
        }
    }
}
