//! Entity resolution: filter by minimum seats, merge factions sharing a tag.
//!
//! Contract:
//! - Keep factions with `seats >= min_seats` (inclusive).
//! - Untagged factions compete alone, unchanged.
//! - Each tag group becomes one entity `"<group_label> <TagLabel>"` whose
//!   weight is the group's seat sum and whose member list is sorted by name.
//! - Output is in canonical order (weight desc, then name).

use std::collections::BTreeMap;

use sc_core::{determinism::sort_canonical, Entity, EntityId, Faction, ResolveParams, Tag};
use tracing::debug;

/// Build the entities that compete for positions.
///
/// Returns an empty list when nothing survives the threshold; callers treat
/// that as "no calculation possible".
pub fn resolve_entities(factions: &[Faction], params: &ResolveParams) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();
    let mut groups: BTreeMap<&Tag, Vec<&Faction>> = BTreeMap::new();

    for f in factions.iter().filter(|f| f.seats >= params.min_seats) {
        match &f.tag {
            Some(tag) => groups.entry(tag).or_default().push(f),
            None => entities.push(Entity {
                id: EntityId::from_faction(&f.id),
                name: f.name.clone(),
                seats: f.seats,
                members: None,
                tag: None,
            }),
        }
    }

    for (tag, members) in groups {
        let seats = members.iter().fold(0u32, |acc, f| acc.saturating_add(f.seats));
        let mut names: Vec<String> = members.iter().map(|f| f.name.clone()).collect();
        names.sort();
        entities.push(Entity {
            id: EntityId::for_tag(tag),
            name: tag.group_name(&params.group_label),
            seats,
            members: Some(names),
            tag: Some(tag.clone()),
        });
    }

    sort_canonical(&mut entities);
    debug!(
        factions = factions.len(),
        entities = entities.len(),
        min_seats = params.min_seats,
        "resolved entities"
    );
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction(id: &str, name: &str, seats: u32, tag: Option<&str>) -> Faction {
        let f = Faction::new(id.parse().unwrap(), name, seats);
        match tag {
            Some(t) => f.with_tag(t.parse().unwrap()),
            None => f,
        }
    }

    fn params(min_seats: u32, label: &str) -> ResolveParams {
        ResolveParams { min_seats, group_label: label.into() }
    }

    #[test]
    fn untagged_pass_through() {
        let fs = vec![faction("1", "CDU", 14, None), faction("2", "SPD", 5, None)];
        let es = resolve_entities(&fs, &params(1, "Zählgemeinschaft"));
        assert_eq!(es.len(), 2);
        assert_eq!(es[0].id.as_str(), "1");
        assert_eq!(es[0].name, "CDU");
        assert_eq!(es[0].seats, 14);
        assert!(es[0].members.is_none());
        assert!(es[0].tag.is_none());
    }

    #[test]
    fn threshold_is_inclusive() {
        let fs = vec![
            faction("1", "A", 2, None),
            faction("2", "B", 1, None),
            faction("3", "C", 0, None),
        ];
        let es = resolve_entities(&fs, &params(2, "ZG"));
        let names: Vec<&str> = es.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn same_tag_merges_with_sorted_members() {
        let fs = vec![
            faction("1", "FactionB", 4, Some("red")),
            faction("2", "FactionA", 3, Some("red")),
        ];
        let es = resolve_entities(&fs, &params(1, "Liste Farbe"));
        assert_eq!(es.len(), 1);
        let e = &es[0];
        assert_eq!(e.id.as_str(), "zg-red");
        assert_eq!(e.name, "Liste Farbe Rot");
        assert_eq!(e.seats, 7);
        assert_eq!(e.members.as_deref(), Some(&["FactionA".to_string(), "FactionB".to_string()][..]));
        assert_eq!(e.tag.as_ref().map(|t| t.as_str()), Some("red"));
    }

    #[test]
    fn threshold_applies_before_merging() {
        let fs = vec![
            faction("1", "Big", 5, Some("blue")),
            faction("2", "Tiny", 1, Some("blue")),
        ];
        let es = resolve_entities(&fs, &params(2, "ZG"));
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].seats, 5);
        assert_eq!(es[0].members.as_deref(), Some(&["Big".to_string()][..]));
    }

    #[test]
    fn unknown_tag_uses_capitalised_fallback() {
        let fs = vec![faction("1", "X", 3, Some("purple"))];
        let es = resolve_entities(&fs, &params(1, "ZG"));
        assert_eq!(es[0].name, "ZG Purple");
    }

    #[test]
    fn distinct_tags_stay_apart() {
        let fs = vec![
            faction("1", "A", 3, Some("red")),
            faction("2", "B", 3, Some("green")),
            faction("3", "C", 6, None),
        ];
        let es = resolve_entities(&fs, &params(1, "ZG"));
        let names: Vec<&str> = es.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "ZG Grün", "ZG Rot"]);
    }

    #[test]
    fn empty_after_threshold() {
        let fs = vec![faction("1", "A", 1, None)];
        assert!(resolve_entities(&fs, &params(2, "ZG")).is_empty());
        assert!(resolve_entities(&[], &params(1, "ZG")).is_empty());
    }
}
