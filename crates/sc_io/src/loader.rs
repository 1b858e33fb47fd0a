//! Loader: read a local roster JSON (factions + optional params) and an
//! optional params JSON, validate them at the file boundary, and return typed
//! core values for the pipeline. No network I/O.
//!
//! Roster shapes accepted:
//! - `{ "factions": [ ... ], "params": { ... } }` (params optional)
//! - `[ ... ]` (bare faction array)
//!
//! Faction fields: `id` (optional, defaults to the 1-based position),
//! `name`, `seats` (non-negative integer), `tag` (optional).

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use sc_core::{Faction, FactionId, Params, Sha256, Tag};

use crate::{hasher, IoError, IoResult};

/// Inputs larger than this are rejected before parsing.
pub const MAX_INPUT_BYTES: u64 = 4 * 1024 * 1024;

/// Upper bound on factions per roster.
pub const MAX_FACTIONS: usize = 200;

/// Upper bound on the seat sum of a roster. The divisor table grows with
/// the largest entity weight, which can reach this sum after merging.
pub const MAX_TOTAL_SEATS: u64 = 5_000;

/// Validated roster with its embedded params (defaults when absent).
#[derive(Debug, Clone)]
pub struct LoadedRoster {
    pub factions: Vec<Faction>,
    pub params: Params,
    /// Digest of the canonical JSON of `factions`.
    pub roster_sha256: Sha256,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFaction {
    #[serde(default)]
    id: Option<String>,
    name: String,
    seats: u32,
    #[serde(default)]
    tag: Option<String>,
}

// ----------------------------- Public loaders -----------------------------

/// Load and validate a roster file.
pub fn load_roster(path: &Path) -> IoResult<LoadedRoster> {
    let v = read_json_value_with_limits(path)?;
    let roster = roster_from_value(v)?;
    debug!(
        path = %path.display(),
        factions = roster.factions.len(),
        "roster loaded"
    );
    Ok(roster)
}

/// Load a standalone params file. Missing fields take their defaults.
pub fn load_params(path: &Path) -> IoResult<Params> {
    let v = read_json_value_with_limits(path)?;
    serde_json::from_value(v).map_err(|e| IoError::Json { pointer: "/".into(), msg: e.to_string() })
}

/// Load a params file as an overlay: fields present in the file replace
/// those of `base`, everything else is kept.
pub fn load_params_over(path: &Path, base: &Params) -> IoResult<Params> {
    let overlay = read_json_value_with_limits(path)?;
    if !overlay.is_object() {
        return Err(json_err("/", "params must be an object"));
    }
    let mut merged = serde_json::to_value(base)?;
    merge_json(&mut merged, overlay);
    serde_json::from_value(merged).map_err(|e| IoError::Json { pointer: "/".into(), msg: e.to_string() })
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(b), Value::Object(o)) => {
            for (k, v) in o {
                merge_json(b.entry(k).or_insert(Value::Null), v);
            }
        }
        (slot, v) => *slot = v,
    }
}

/// Parse and validate an already-read roster document.
pub fn roster_from_value(v: Value) -> IoResult<LoadedRoster> {
    let (rows, base, params) = match v {
        Value::Array(rows) => (rows, "", Params::default()),
        Value::Object(mut map) => {
            let params = match map.remove("params") {
                Some(p) => serde_json::from_value(p)
                    .map_err(|e| IoError::Json { pointer: "/params".into(), msg: e.to_string() })?,
                None => Params::default(),
            };
            let rows = match map.remove("factions") {
                Some(Value::Array(rows)) => rows,
                Some(_) => return Err(json_err("/factions", "expected an array")),
                None => return Err(json_err("/factions", "missing")),
            };
            if let Some(extra) = map.keys().next() {
                return Err(json_err(&format!("/{extra}"), "unknown field"));
            }
            (rows, "/factions", params)
        }
        _ => return Err(json_err("/", "expected an object or an array of factions")),
    };

    if rows.len() > MAX_FACTIONS {
        return Err(IoError::Limit(format!("{} factions, at most {MAX_FACTIONS}", rows.len())));
    }

    let mut raw = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let r: RawFaction = serde_json::from_value(row)
            .map_err(|e| IoError::Json { pointer: format!("{base}/{i}"), msg: e.to_string() })?;
        raw.push(r);
    }

    let factions = validate_factions(raw, base)?;
    check_group_names(&factions, &params)?;
    let roster_sha256 = hasher::sha256_canonical(&factions)?;
    Ok(LoadedRoster { factions, params, roster_sha256 })
}

// ----------------------------- Validation -----------------------------

/// Roster rules enforced at the file boundary:
/// names are trimmed and non-empty, unique case-insensitively; ids are valid
/// tokens and unique; tags are non-empty tokens without whitespace.
fn validate_factions(raw: Vec<RawFaction>, base: &str) -> IoResult<Vec<Faction>> {
    let mut seen_names: BTreeSet<String> = BTreeSet::new();
    let mut seen_ids: BTreeSet<FactionId> = BTreeSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (i, r) in raw.into_iter().enumerate() {
        let at = |field: &str| format!("{base}/{i}/{field}");

        let id_text = r.id.unwrap_or_else(|| (i + 1).to_string());
        let id: FactionId = id_text
            .parse()
            .map_err(|e| invalid(at("id"), format!("{e}: {id_text:?}")))?;
        if !seen_ids.insert(id.clone()) {
            return Err(invalid(at("id"), format!("duplicate id {id}")));
        }

        let name = r.name.trim();
        if name.is_empty() {
            return Err(invalid(at("name"), "name must not be empty"));
        }
        if !seen_names.insert(name.to_lowercase()) {
            return Err(invalid(at("name"), format!("duplicate faction name {name:?}")));
        }

        let tag = match r.tag {
            Some(t) => Some(
                t.parse::<Tag>()
                    .map_err(|e| invalid(at("tag"), format!("{e}: {t:?}")))?,
            ),
            None => None,
        };

        out.push(Faction { id, name: name.to_owned(), seats: r.seats, tag });
    }

    let total: u64 = out.iter().map(|f| u64::from(f.seats)).sum();
    if total > MAX_TOTAL_SEATS {
        return Err(IoError::Limit(format!("{total} seats in total, at most {MAX_TOTAL_SEATS}")));
    }
    Ok(out)
}

/// A merged group must not share its name with a faction, otherwise the
/// table and any lottery block list two candidates under one name.
///
/// Checks both group labels against every tag present in the roster,
/// case-insensitively like the faction names themselves. Run again after
/// any change to the labels.
pub fn check_group_names(factions: &[Faction], params: &Params) -> IoResult<()> {
    let tags: BTreeSet<&Tag> = factions.iter().filter_map(|f| f.tag.as_ref()).collect();
    let labels = [
        ("committee", params.committee.group_label.as_str()),
        ("deputies", params.deputies.group_label.as_str()),
    ];
    for (section, label) in labels {
        for tag in &tags {
            let group = tag.group_name(label).to_lowercase();
            if let Some(f) = factions.iter().find(|f| f.name.to_lowercase() == group) {
                return Err(invalid(
                    format!("/params/{section}/group_label"),
                    format!("merged group for tag {tag} would be named like faction {:?}", f.name),
                ));
            }
        }
    }
    Ok(())
}

fn invalid(pointer: String, msg: impl Into<String>) -> IoError {
    IoError::Invalid { pointer, msg: msg.into() }
}

fn json_err(pointer: &str, msg: &str) -> IoError {
    IoError::Json { pointer: pointer.to_owned(), msg: msg.to_owned() }
}

// ----------------------------- File reading -----------------------------

fn read_json_value_with_limits(path: &Path) -> IoResult<Value> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let mut buf = Vec::new();
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} exceeds {MAX_INPUT_BYTES} bytes",
            path.display()
        )));
    }
    Ok(serde_json::from_slice(&buf)?)
}
