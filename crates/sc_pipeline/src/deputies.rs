//! DEPUTIES run: sequential positions with lottery detection.
//!
//! resolve (deputy threshold + group label) → rank → display slice and the
//! sequential walk over the *full* ranking.

use sc_algo::{assign_sequential, display_limit, has_lottery, rank_quotients, resolve_entities, truncate_for_display};
use sc_core::{variables::DeputyParams, Entity, Faction, PositionAssignment, QuotientEntry, ResolveParams};

#[derive(Debug, Clone)]
pub struct DeputyOutcome {
    pub entities: Vec<Entity>,
    pub table: Vec<QuotientEntry>,
    pub display_limit: usize,
    pub assignments: Vec<PositionAssignment>,
}

impl DeputyOutcome {
    pub fn has_lottery(&self) -> bool {
        has_lottery(&self.assignments)
    }
}

pub fn run_deputies(factions: &[Faction], params: &DeputyParams) -> DeputyOutcome {
    let resolve = ResolveParams {
        min_seats: params.min_seats,
        group_label: params.group_label.clone(),
    };
    let entities = resolve_entities(factions, &resolve);
    if entities.is_empty() || params.positions == 0 {
        return DeputyOutcome {
            entities,
            table: Vec::new(),
            display_limit: display_limit(factions.len()),
            assignments: Vec::new(),
        };
    }

    let ranked = rank_quotients(&entities, factions.len());
    let assignments = assign_sequential(&ranked, params.positions);
    let table = truncate_for_display(&ranked, factions.len());
    DeputyOutcome { entities, table, display_limit: display_limit(factions.len()), assignments }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: &str, name: &str, seats: u32, tag: &str) -> Faction {
        Faction::new(id.parse().unwrap(), name, seats).with_tag(tag.parse().unwrap())
    }

    #[test]
    fn merged_lists_compete_as_one() {
        let fs = vec![
            tagged("1", "SPD", 5, "red"),
            tagged("2", "GRÜNE", 3, "red"),
            Faction::new("3".parse().unwrap(), "CDU", 14),
        ];
        let out = run_deputies(&fs, &DeputyParams::default());
        let names: Vec<&str> = out.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["CDU", "Liste Farbe Rot"]);
        // 14, 8, 7 → CDU, then the red list.
        let winners: Vec<&str> = out.assignments.iter().flat_map(|a| a.candidate_names()).collect();
        assert_eq!(winners, vec!["CDU", "Liste Farbe Rot"]);
        assert!(!out.has_lottery());
    }

    #[test]
    fn zero_positions_yields_nothing() {
        let fs = vec![Faction::new("1".parse().unwrap(), "CDU", 14)];
        let params = DeputyParams { positions: 0, ..DeputyParams::default() };
        let out = run_deputies(&fs, &params);
        assert!(out.assignments.is_empty());
        assert!(out.table.is_empty());
        assert_eq!(out.entities.len(), 1);
    }
}
