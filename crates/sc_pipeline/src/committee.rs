//! COMMITTEE run: chairs are read off the ranked table in order.
//!
//! resolve (committee threshold + group label) → rank → display slice.
//! No lottery semantics; ties are only flagged in the table.

use sc_algo::{display_limit, rank_quotients, resolve_entities, truncate_for_display};
use sc_core::{variables::CommitteeParams, Entity, Faction, QuotientEntry, ResolveParams};

#[derive(Debug, Clone)]
pub struct CommitteeOutcome {
    pub entities: Vec<Entity>,
    pub table: Vec<QuotientEntry>,
    pub display_limit: usize,
}

impl CommitteeOutcome {
    pub fn has_ties(&self) -> bool {
        self.table.iter().any(|e| e.is_tie)
    }
}

pub fn run_committee(factions: &[Faction], params: &CommitteeParams) -> CommitteeOutcome {
    let resolve = ResolveParams {
        min_seats: params.min_seats,
        group_label: params.group_label.clone(),
    };
    let entities = resolve_entities(factions, &resolve);
    let ranked = rank_quotients(&entities, factions.len());
    let table = truncate_for_display(&ranked, factions.len());
    CommitteeOutcome { entities, table, display_limit: display_limit(factions.len()) }
}
