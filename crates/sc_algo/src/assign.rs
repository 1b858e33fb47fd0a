//! Position assignment over a ranked quotient table.
//!
//! Two policies:
//! - [`truncate_for_display`]: the first `display_limit` entries, unchanged
//!   (committee chair table, divisor grid);
//! - [`assign_sequential`]: walk the ranking and fill positions `1..=N`; when a
//!   value-tie has more members than open positions, emit one lottery block
//!   holding the whole tie group and stop.

use sc_core::{PositionAssignment, QuotientEntry};
use tracing::debug;

use crate::ranking::display_limit;

/// First `max(2 * raw_faction_count, 20)` entries, ranks and tie flags kept.
pub fn truncate_for_display(ranked: &[QuotientEntry], raw_faction_count: usize) -> Vec<QuotientEntry> {
    ranked.iter().take(display_limit(raw_faction_count)).cloned().collect()
}

/// Fill `positions` slots from the ranking.
///
/// *Notes*:
/// - `positions == 0` or an empty ranking returns an empty list.
/// - Fewer than `positions` assignments come back when the ranking runs out
///   or a lottery block settles the remainder.
/// - Only the last assignment can be a lottery.
pub fn assign_sequential(ranked: &[QuotientEntry], positions: u32) -> Vec<PositionAssignment> {
    let mut out: Vec<PositionAssignment> = Vec::new();
    let mut cursor = 0usize;
    let mut position = 1u32;

    while position <= positions && cursor < ranked.len() {
        let (start, end) = tie_group_bounds(ranked, cursor);
        let group = &ranked[start..end];
        let spots_left = positions - position + 1;

        if group.len() > spots_left as usize {
            debug!(
                position,
                spots_left,
                candidates = group.len(),
                "tie exceeds open positions; lottery required"
            );
            out.push(PositionAssignment {
                position,
                candidates: group.to_vec(),
                lottery: true,
            });
            break;
        }

        for entry in group {
            out.push(PositionAssignment {
                position,
                candidates: vec![entry.clone()],
                lottery: false,
            });
            position += 1;
        }
        cursor = end;
    }

    out
}

/// True when any assignment must be settled by drawing lots.
pub fn has_lottery(assignments: &[PositionAssignment]) -> bool {
    assignments.iter().any(|a| a.lottery)
}

/// Bounds of all entries whose value equals the value at `cursor`.
///
/// The table is sorted by value descending, so equal values are contiguous
/// and both ends can be found by binary search over the whole table.
fn tie_group_bounds(ranked: &[QuotientEntry], cursor: usize) -> (usize, usize) {
    let value = ranked[cursor].value;
    let start = ranked.partition_point(|e| e.value > value);
    let end = ranked.partition_point(|e| e.value >= value);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank_quotients;
    use sc_core::{Entity, EntityId};

    fn entity(name: &str, seats: u32) -> Entity {
        Entity {
            id: EntityId::from_faction(&name.parse().unwrap()),
            name: name.into(),
            seats,
            members: None,
            tag: None,
        }
    }

    fn ranked(es: &[(&str, u32)]) -> Vec<QuotientEntry> {
        let entities: Vec<Entity> = es.iter().map(|(n, s)| entity(n, *s)).collect();
        rank_quotients(&entities, entities.len())
    }

    fn summary(a: &[PositionAssignment]) -> Vec<(u32, Vec<&str>, bool)> {
        a.iter()
            .map(|p| (p.position, p.candidate_names().collect(), p.lottery))
            .collect()
    }

    #[test]
    fn no_tie_at_boundary() {
        let r = ranked(&[("A", 14), ("B", 6), ("C", 5)]);
        let got = assign_sequential(&r, 2);
        assert_eq!(
            summary(&got),
            vec![(1, vec!["A"], false), (2, vec!["A"], false)]
        );
        assert!(!has_lottery(&got));
    }

    #[test]
    fn three_way_tie_for_two_positions_is_one_lottery() {
        let r = ranked(&[("A", 5), ("B", 5), ("C", 5)]);
        let got = assign_sequential(&r, 2);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].position, 1);
        assert!(got[0].lottery);
        assert_eq!(got[0].candidates.len(), 3);
        assert!(has_lottery(&got));
    }

    #[test]
    fn lottery_after_a_clear_winner() {
        // A/1 = 10, then A/2 = B/1 = C/1 = 5 for the single remaining slot.
        let r = ranked(&[("A", 10), ("B", 5), ("C", 5)]);
        let got = assign_sequential(&r, 2);
        assert_eq!(
            summary(&got),
            vec![(1, vec!["A"], false), (2, vec!["A", "B", "C"], true)]
        );
        assert_eq!(got[1].candidates[0].divisor, 2);
    }

    #[test]
    fn tie_that_fits_is_split_into_single_positions() {
        let r = ranked(&[("A", 6), ("B", 6), ("C", 4)]);
        let got = assign_sequential(&r, 3);
        assert_eq!(
            summary(&got),
            vec![(1, vec!["A"], false), (2, vec!["B"], false), (3, vec!["C"], false)]
        );
    }

    #[test]
    fn zero_positions_or_empty_ranking() {
        let r = ranked(&[("A", 5)]);
        assert!(assign_sequential(&r, 0).is_empty());
        assert!(assign_sequential(&[], 3).is_empty());
    }

    #[test]
    fn short_ranking_ends_early() {
        let r = ranked(&[("A", 1)]);
        let short = &r[..2];
        let got = assign_sequential(short, 5);
        assert_eq!(got.len(), 2);
        assert!(!has_lottery(&got));
    }

    #[test]
    fn display_slice_keeps_flags() {
        let r = ranked(&[("A", 6), ("B", 3)]);
        let cut = truncate_for_display(&r, 2);
        assert_eq!(cut.len(), 20);
        assert_eq!(cut[..], r[..20]);
        assert!(cut[1].is_tie && cut[2].is_tie);
    }
}
