// crates/sc_algo/src/lib.rs
//! Highest-averages (D'Hondt) engine in three pure stages:
//!
//! 1. [`resolve`]: raw factions → competing entities (tag merging, threshold);
//! 2. [`ranking`]: entities → one globally ranked quotient table;
//! 3. [`assign`]: ranked table → display slice, or the sequential position
//!    walk with lottery detection.
//!
//! No stage holds state or fails; empty inputs yield empty outputs.

#![forbid(unsafe_code)]

pub use sc_core::{Entity, Faction, PositionAssignment, QuotientEntry};

pub mod assign;
pub mod ranking;
pub mod resolve;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use assign::{assign_sequential, has_lottery, truncate_for_display};
pub use ranking::{display_limit, divisor_columns, rank_quotients, MIN_COLUMNS};
pub use resolve::resolve_entities;
