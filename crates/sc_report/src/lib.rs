//! sc_report: pure offline report model + renderers (JSON/plain text).
//!
//! Determinism rules:
//! - No I/O here. Callers pass the result document already in memory.
//! - Quotients are formatted with integer math only.
//! - Stable section order and field names.
//!
//! The input is the result document as a `serde_json::Value`, so a report can
//! be rebuilt from a `result.json` on disk without linking the pipeline.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[cfg(feature = "render_json")]
mod render_json;
#[cfg(feature = "render_text")]
mod render_text;

#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_text")]
pub use render_text::render_text;

/// Result document as produced by the pipeline (`result.json`).
pub type ResultArtifact = Value;

// ===== Errors =====
#[derive(Debug)]
pub enum ReportError {
    Template(&'static str),
    MissingField(String),
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(m) => write!(f, "template error: {m}"),
            ReportError::MissingField(p) => write!(f, "missing field {p}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent result: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====
#[derive(Clone, Debug, Serialize)]
pub struct ReportModel {
    pub cover: SectionCover,
    pub params: Vec<ParamLine>,
    pub entities: Vec<EntityLine>,
    pub grid: SectionGrid,
    /// Present for deputy runs only.
    pub deputies: Option<Vec<DeputyLine>>,
    pub footnotes: Vec<String>,
    pub integrity: SectionIntegrity,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionCover {
    pub title: String,
    pub kind: String,
    pub subtitle: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParamLine { pub key: String, pub value: String }

#[derive(Clone, Debug, Serialize)]
pub struct EntityLine {
    pub name: String,
    pub seats: u64,
    /// Member factions joined with ", " for merged groups.
    pub members: Option<String>,
}

/// Divisor grid: one row per entity, one column per divisor `1..=max`.
#[derive(Clone, Debug, Serialize)]
pub struct SectionGrid {
    pub divisors: Vec<u64>,
    pub rows: Vec<GridRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GridRow {
    pub name: String,
    pub seats: u64,
    pub cells: Vec<GridCell>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GridCell {
    pub divisor: u64,
    pub value: String,
    /// Set when this quotient is part of the displayed ranking.
    pub rank: Option<u64>,
    pub tie: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeputyLine {
    /// `"1"`, or `"2-3"` for a lottery block settling several positions.
    pub positions: String,
    pub candidates: String,
    pub rank: u64,
    pub value: String,
    pub lottery: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionIntegrity {
    pub engine_name: String,
    pub engine_version: String,
    pub input_sha256: String,
}

pub const TIE_FOOTNOTE: &str = "* Equal quotients: their relative order carries no precedence.";
pub const LOTTERY_FOOTNOTE: &str =
    "Positions marked as lottery are decided by drawing lots among the listed candidates.";
pub const EMPTY_FOOTNOTE: &str = "No faction reaches the minimum seat count; nothing to allocate.";

// ===== API =====

/// Build the report model from a result document (pure, offline).
pub fn build_model(result: &ResultArtifact) -> Result<ReportModel, ReportError> {
    let kind = json_get_str(result, "/kind")?;
    let title = match kind.as_str() {
        "committee" => "Committee chairs",
        "deputies" => "Deputy mayors",
        _ => return Err(ReportError::Inconsistent("kind")),
    };

    let raw = json_get_u64(result, "/raw_faction_count")?;
    let entities = map_entities(result)?;
    let cover = SectionCover {
        title: title.to_string(),
        kind: kind.clone(),
        subtitle: format!("{raw} factions, {} competing", entities.len()),
    };

    let params = map_params(result)?;
    let table = map_table(result)?;
    let grid = map_grid(&entities, &table);

    let deputies = match result.pointer("/assignments") {
        Some(a) => Some(map_deputies(a, json_get_u64(result, "/params/positions")?)?),
        None => None,
    };

    let mut footnotes = Vec::new();
    if json_get_bool(result, "/flags/empty").unwrap_or(false) {
        footnotes.push(EMPTY_FOOTNOTE.to_string());
    }
    if table.iter().any(|t| t.tie) {
        footnotes.push(TIE_FOOTNOTE.to_string());
    }
    if deputies.as_ref().is_some_and(|d| d.iter().any(|l| l.lottery)) {
        footnotes.push(LOTTERY_FOOTNOTE.to_string());
    }

    let integrity = SectionIntegrity {
        engine_name: json_get_str(result, "/engine/name").unwrap_or_else(|_| "seatcalc".into()),
        engine_version: json_get_str(result, "/engine/version").unwrap_or_else(|_| "0.0.0".into()),
        input_sha256: json_get_str(result, "/input_sha256")?,
    };

    Ok(ReportModel { cover, params, entities, grid, deputies, footnotes, integrity })
}

/// Display form of `seats / divisor`: whole numbers plain, otherwise rounded
/// half-up to two decimals with trailing zeros dropped.
pub fn format_number(seats: u64, divisor: u64) -> String {
    if divisor == 0 {
        return "0".into();
    }
    if seats % divisor == 0 {
        return (seats / divisor).to_string();
    }
    let n = u128::from(seats) * 200 + u128::from(divisor);
    let hundredths = n / (u128::from(divisor) * 2);
    let (whole, frac) = (hundredths / 100, hundredths % 100);
    match frac {
        0 => whole.to_string(),
        f if f % 10 == 0 => format!("{whole}.{}", f / 10),
        f => format!("{whole}.{f:02}"),
    }
}

// -------------------- Mapping helpers (pure) --------------------

struct TableCell {
    entity: String,
    divisor: u64,
    rank: u64,
    tie: bool,
}

fn map_params(result: &Value) -> Result<Vec<ParamLine>, ReportError> {
    let mut out = vec![
        ParamLine { key: "min_seats".into(), value: json_get_u64(result, "/params/min_seats")?.to_string() },
        ParamLine { key: "group_label".into(), value: json_get_str(result, "/params/group_label")? },
    ];
    if let Ok(p) = json_get_u64(result, "/params/positions") {
        out.push(ParamLine { key: "positions".into(), value: p.to_string() });
    }
    Ok(out)
}

fn map_entities(result: &Value) -> Result<Vec<EntityLine>, ReportError> {
    json_get_array(result, "/entities")?
        .iter()
        .map(|e| {
            let members = e.get("members").and_then(Value::as_array).map(|m| {
                m.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(", ")
            });
            Ok(EntityLine {
                name: json_get_str(e, "/name")?,
                seats: json_get_u64(e, "/seats")?,
                members,
            })
        })
        .collect()
}

fn map_table(result: &Value) -> Result<Vec<TableCell>, ReportError> {
    json_get_array(result, "/table")?
        .iter()
        .map(|t| {
            Ok(TableCell {
                entity: json_get_str(t, "/entity_name")?,
                divisor: json_get_u64(t, "/divisor")?,
                rank: json_get_u64(t, "/rank")?,
                tie: json_get_bool(t, "/is_tie")?,
            })
        })
        .collect()
}

fn map_grid(entities: &[EntityLine], table: &[TableCell]) -> SectionGrid {
    let max_divisor = table.iter().map(|t| t.divisor).max().unwrap_or(0);
    let ranked: BTreeMap<(&str, u64), &TableCell> =
        table.iter().map(|t| ((t.entity.as_str(), t.divisor), t)).collect();

    let rows = entities
        .iter()
        .map(|e| GridRow {
            name: e.name.clone(),
            seats: e.seats,
            cells: (1..=max_divisor)
                .map(|d| {
                    let hit = ranked.get(&(e.name.as_str(), d));
                    GridCell {
                        divisor: d,
                        value: format_number(e.seats, d),
                        rank: hit.map(|t| t.rank),
                        tie: hit.is_some_and(|t| t.tie),
                    }
                })
                .collect(),
        })
        .collect();

    SectionGrid { divisors: (1..=max_divisor).collect(), rows }
}

fn map_deputies(assignments: &Value, positions: u64) -> Result<Vec<DeputyLine>, ReportError> {
    let arr = assignments
        .as_array()
        .ok_or(ReportError::Inconsistent("assignments:not_array"))?;
    arr.iter()
        .map(|a| {
            let position = json_get_u64(a, "/position")?;
            let lottery = json_get_bool(a, "/lottery")?;
            let candidates = json_get_array(a, "/candidates")?;
            let first = candidates
                .first()
                .ok_or(ReportError::Inconsistent("assignment without candidates"))?;
            let names = candidates
                .iter()
                .map(|c| json_get_str(c, "/entity_name"))
                .collect::<Result<Vec<_>, _>>()?;
            let positions = if lottery && positions > position {
                format!("{position}-{positions}")
            } else {
                position.to_string()
            };
            Ok(DeputyLine {
                positions,
                candidates: names.join(" or "),
                rank: json_get_u64(first, "/rank")?,
                value: format_number(json_get_u64(first, "/value/seats")?, json_get_u64(first, "/divisor")?),
                lottery,
            })
        })
        .collect()
}

// ===== Helpers =====

fn json_get_str(root: &Value, ptr: &str) -> Result<String, ReportError> {
    root.pointer(ptr)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}
fn json_get_bool(root: &Value, ptr: &str) -> Result<bool, ReportError> {
    root.pointer(ptr)
        .and_then(Value::as_bool)
        .ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}
fn json_get_u64(root: &Value, ptr: &str) -> Result<u64, ReportError> {
    root.pointer(ptr)
        .and_then(Value::as_u64)
        .ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}
fn json_get_array<'a>(root: &'a Value, ptr: &str) -> Result<&'a Vec<Value>, ReportError> {
    root.pointer(ptr)
        .and_then(Value::as_array)
        .ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}
