//! crates/sc_core/src/ids.rs
//! Identifier newtypes: faction tokens, resolved entity ids, input digests.
//! ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::variables::Tag;

/// Errors returned when validating or parsing IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    NonAscii,
    TooLong,
    BadShape,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::NonAscii => f.write_str("id must be ASCII"),
            IdError::TooLong => f.write_str("id too long"),
            IdError::BadShape => f.write_str("id has an invalid shape"),
        }
    }
}

impl std::error::Error for IdError {}

const HEX64_LEN: usize = 64;
const TOKEN_MAX_LEN: usize = 64;

/// Prefix of the entity id emitted for a merged tag group.
pub const MERGED_ID_PREFIX: &str = "zg-";

#[inline]
fn is_ascii_no_nul(s: &str) -> bool {
    !s.as_bytes().iter().any(|&b| b == 0 || b > 0x7F)
}

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == HEX64_LEN
        && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Token for FactionId: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let len = s.len();
    (1..=TOKEN_MAX_LEN).contains(&len)
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'))
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }
    }
}

simple_string_newtype!(
    /// Roster faction token: ^[A-Za-z0-9_.:-]{1,64}$
    FactionId
);

impl FromStr for FactionId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) { return Err(IdError::NonAscii); }
        if s.len() > TOKEN_MAX_LEN { return Err(IdError::TooLong); }
        if !is_valid_token(s) { return Err(IdError::BadShape); }
        Ok(FactionId(s.to_owned()))
    }
}

impl TryFrom<&str> for FactionId {
    type Error = IdError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
}

simple_string_newtype!(
    /// Id of a resolved entity. Never parsed from input; built by the resolver.
    EntityId
);

impl EntityId {
    /// An untagged faction competes under its own id.
    pub fn from_faction(id: &FactionId) -> Self {
        EntityId(id.as_str().to_owned())
    }

    /// A merged group is named after its tag: `zg-<tag>`.
    pub fn for_tag(tag: &Tag) -> Self {
        EntityId(format!("{MERGED_ID_PREFIX}{}", tag.as_str()))
    }
}

simple_string_newtype!(
    /// 64-hex lowercase SHA-256 digest.
    Sha256
);

impl FromStr for Sha256 {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) { return Err(IdError::NonAscii); }
        if !is_valid_sha256(s) { return Err(IdError::BadShape); }
        Ok(Sha256(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faction_tokens() {
        for ok in ["1", "cdu", "F-7", "1718012345678", "a.b:c_d"] {
            assert!(ok.parse::<FactionId>().is_ok(), "{ok}");
        }
        assert_eq!("".parse::<FactionId>(), Err(IdError::BadShape));
        assert_eq!("a b".parse::<FactionId>(), Err(IdError::BadShape));
        assert_eq!("ÖDP".parse::<FactionId>(), Err(IdError::NonAscii));
        assert_eq!("x".repeat(65).parse::<FactionId>(), Err(IdError::TooLong));
    }

    #[test]
    fn entity_ids() {
        let f: FactionId = "3".parse().unwrap();
        let plain = EntityId::from_faction(&f);
        assert_eq!(plain.as_str(), "3");

        let tag: Tag = "red".parse().unwrap();
        let merged = EntityId::for_tag(&tag);
        assert_eq!(merged.as_str(), "zg-red");
    }

    #[test]
    fn sha256_shape() {
        let hex = "0123456789abcdef".repeat(4);
        let hex = hex.as_str();
        assert_eq!(hex.parse::<Sha256>().unwrap().as_str(), hex);
        assert!(hex.to_uppercase().parse::<Sha256>().is_err());
        assert!("deadbeef".parse::<Sha256>().is_err());
    }
}
