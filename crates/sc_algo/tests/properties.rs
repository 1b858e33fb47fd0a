//! Property tests for the three stages.

use proptest::prelude::*;

use sc_algo::{assign_sequential, divisor_columns, rank_quotients, resolve_entities};
use sc_core::{Faction, ResolveParams};

const TAGS: [&str; 5] = ["red", "blue", "green", "yellow", "purple"];

fn roster() -> impl Strategy<Value = Vec<Faction>> {
    prop::collection::vec((0u32..30, prop::option::of(0usize..TAGS.len())), 0..10).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (seats, tag))| {
                let f = Faction::new(format!("f{i}").parse().unwrap(), format!("F{i}"), seats);
                match tag {
                    Some(t) => f.with_tag(TAGS[t].parse().unwrap()),
                    None => f,
                }
            })
            .collect()
    })
}

fn params(min_seats: u32) -> ResolveParams {
    ResolveParams { min_seats, group_label: "ZG".into() }
}

proptest! {
    #[test]
    fn seats_are_conserved(fs in roster(), min in 0u32..5) {
        let entities = resolve_entities(&fs, &params(min));
        let expected: u32 = fs.iter().filter(|f| f.seats >= min).map(|f| f.seats).sum();
        let got: u32 = entities.iter().map(|e| e.seats).sum();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn row_count_per_entity(fs in roster()) {
        let entities = resolve_entities(&fs, &params(0));
        let ranked = rank_quotients(&entities, fs.len());
        for e in &entities {
            let rows = ranked.iter().filter(|q| q.entity_name == e.name).count();
            let expected = if e.seats > 0 { divisor_columns(e.seats, fs.len()) as usize } else { 0 };
            prop_assert_eq!(rows, expected);
        }
    }

    #[test]
    fn ranking_descends_and_flags_adjacent_ties(fs in roster()) {
        let ranked = rank_quotients(&resolve_entities(&fs, &params(1)), fs.len());
        for w in ranked.windows(2) {
            prop_assert!(w[0].value >= w[1].value);
            prop_assert_eq!(w[0].rank + 1, w[1].rank);
            if w[0].value == w[1].value {
                prop_assert!(w[0].is_tie && w[1].is_tie);
            }
        }
    }

    #[test]
    fn ranking_is_idempotent(fs in roster()) {
        let entities = resolve_entities(&fs, &params(1));
        prop_assert_eq!(rank_quotients(&entities, fs.len()), rank_quotients(&entities, fs.len()));
    }

    #[test]
    fn assignment_respects_position_count(fs in roster(), n in 0u32..12) {
        let ranked = rank_quotients(&resolve_entities(&fs, &params(1)), fs.len());
        let got = assign_sequential(&ranked, n);
        prop_assert!(got.len() <= n as usize);

        for (i, a) in got.iter().enumerate() {
            prop_assert_eq!(a.position as usize, i + 1);
            prop_assert!(!a.candidates.is_empty());
            if a.lottery {
                prop_assert_eq!(i + 1, got.len());
                let spots_left = n - a.position + 1;
                prop_assert!(a.candidates.len() > spots_left as usize);
            } else {
                prop_assert_eq!(a.candidates.len(), 1);
            }
        }
    }
}
