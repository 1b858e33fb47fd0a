//! sc_core: Core types, parameters and ordering helpers for the seat calculator.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`sc_algo`, `sc_io`, `sc_pipeline`, `sc_report`, `sc_cli`).
//!
//! - Roster tokens: `FactionId`, `Tag`
//! - Resolved units and results: `Entity`, `QuotientEntry`, `PositionAssignment`
//! - Exact quotient arithmetic (`Quotient`)
//! - Calculation parameters (`Params`)
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidTag,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidTag => write!(f, "invalid tag"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod determinism;
pub mod entities;
pub mod ids;
pub mod quotient;
pub mod variables;

pub use entities::{Entity, Faction, PositionAssignment, QuotientEntry};
pub use ids::{EntityId, FactionId, Sha256};
pub use quotient::Quotient;
pub use variables::{Params, ResolveParams, Tag};
