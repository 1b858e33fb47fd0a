//! Quotient generation and global ranking (D'Hondt divisor table).
//!
//! Contract:
//! - Every entity with weight > 0 yields divisors `1..=D`, where
//!   `D = max(weight, 2 * raw_faction_count, MIN_COLUMNS)`. The raw count is
//!   taken before merging, so the table never narrows when factions merge.
//! - Quotients stay exact (`seats / divisor`); no division in comparisons.
//! - Order: value desc, then entity weight desc, then entity name, then divisor.
//! - `is_tie` is set when the previous or next entry has the same value.

use core::num::NonZeroU32;

use sc_core::{determinism::sort_canonical, Entity, Quotient, QuotientEntry};
use tracing::debug;

/// The divisor table is never narrower than this.
pub const MIN_COLUMNS: u32 = 20;

/// Number of divisors generated for an entity of weight `seats`.
pub fn divisor_columns(seats: u32, raw_faction_count: usize) -> u32 {
    let twice = u32::try_from(raw_faction_count.saturating_mul(2)).unwrap_or(u32::MAX);
    seats.max(twice).max(MIN_COLUMNS)
}

/// Length of the display slice: `max(2 * raw_faction_count, MIN_COLUMNS)`.
pub fn display_limit(raw_faction_count: usize) -> usize {
    raw_faction_count.saturating_mul(2).max(MIN_COLUMNS as usize)
}

/// Expand all entities into their divisor series and rank them globally.
pub fn rank_quotients(entities: &[Entity], raw_faction_count: usize) -> Vec<QuotientEntry> {
    let mut entries: Vec<QuotientEntry> = entities
        .iter()
        .filter(|e| e.seats > 0)
        .flat_map(|e| {
            let columns = divisor_columns(e.seats, raw_faction_count);
            (1..=columns).filter_map(NonZeroU32::new).map(move |d| QuotientEntry {
                rank: 0,
                entity_name: e.name.clone(),
                divisor: d.get(),
                value: Quotient::new(e.seats, d),
                is_tie: false,
            })
        })
        .collect();

    sort_canonical(&mut entries);
    flag_ranks_and_ties(&mut entries);

    debug!(
        entities = entities.len(),
        entries = entries.len(),
        ties = entries.iter().filter(|e| e.is_tie).count(),
        "ranked quotients"
    );
    entries
}

/// Assign 1-based ranks and adjacency tie flags to an already sorted table.
fn flag_ranks_and_ties(entries: &mut [QuotientEntry]) {
    let n = entries.len();
    for i in 0..n {
        let value = entries[i].value;
        let tie_back = i > 0 && entries[i - 1].value == value;
        let tie_fwd = i + 1 < n && entries[i + 1].value == value;
        let e = &mut entries[i];
        e.rank = u32::try_from(i + 1).unwrap_or(u32::MAX);
        e.is_tie = tie_back || tie_fwd;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::EntityId;

    fn entity(name: &str, seats: u32) -> Entity {
        Entity {
            id: EntityId::from_faction(&name.to_ascii_lowercase().parse().unwrap()),
            name: name.into(),
            seats,
            members: None,
            tag: None,
        }
    }

    #[test]
    fn widths() {
        assert_eq!(divisor_columns(14, 7), 20);
        assert_eq!(divisor_columns(3, 12), 24);
        assert_eq!(divisor_columns(31, 7), 31);
        assert_eq!(display_limit(0), 20);
        assert_eq!(display_limit(7), 20);
        assert_eq!(display_limit(11), 22);
    }

    #[test]
    fn zero_weight_generates_nothing() {
        let ranked = rank_quotients(&[entity("Empty", 0)], 1);
        assert!(ranked.is_empty());
    }

    #[test]
    fn ranks_are_sequential_and_values_descend() {
        let ranked = rank_quotients(&[entity("A", 6), entity("B", 4)], 2);
        assert_eq!(ranked.len(), 40);
        for (i, e) in ranked.iter().enumerate() {
            assert_eq!(e.rank as usize, i + 1);
        }
        assert!(ranked.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!((ranked[0].entity_name.as_str(), ranked[0].divisor), ("A", 1));
        assert_eq!((ranked[1].entity_name.as_str(), ranked[1].divisor), ("B", 1));
        assert_eq!((ranked[2].entity_name.as_str(), ranked[2].divisor), ("A", 2));
    }

    #[test]
    fn exact_ties_are_flagged_and_larger_entity_first() {
        // 6/2 == 3/1 exactly.
        let ranked = rank_quotients(&[entity("Six", 6), entity("Three", 3)], 2);
        let first_three: Vec<(&str, u32, bool)> = ranked
            .iter()
            .take(3)
            .map(|e| (e.entity_name.as_str(), e.divisor, e.is_tie))
            .collect();
        assert_eq!(
            first_three,
            vec![("Six", 1, false), ("Six", 2, true), ("Three", 1, true)]
        );
    }

    #[test]
    fn thirds_tie_exactly() {
        // 7/21 vs 1/3: equal as rationals, unequal as naive float paths may suggest.
        let ranked = rank_quotients(&[entity("Seven", 7), entity("One", 1)], 11);
        let seven_21 = ranked.iter().find(|e| e.entity_name == "Seven" && e.divisor == 21).unwrap();
        let one_3 = ranked.iter().find(|e| e.entity_name == "One" && e.divisor == 3).unwrap();
        assert!(seven_21.is_tie && one_3.is_tie);
        assert_eq!(seven_21.rank + 1, one_3.rank);
    }

    #[test]
    fn independent_of_entity_order() {
        let a = rank_quotients(&[entity("X", 2), entity("Y", 2), entity("Z", 5)], 3);
        let b = rank_quotients(&[entity("Z", 5), entity("Y", 2), entity("X", 2)], 3);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input() {
        assert!(rank_quotients(&[], 0).is_empty());
    }
}
