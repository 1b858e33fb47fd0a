//! Assemble the serializable result document from a stage outcome.

use serde::Serialize;

use sc_core::{Entity, PositionAssignment, QuotientEntry, Sha256};

use crate::{CommitteeOutcome, DeputyOutcome, EngineMeta, PipelineCtx, RunKind};

/// Echo of the parameters that shaped this result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultParams {
    pub min_seats: u32,
    pub group_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultFlags {
    /// Nothing survived the threshold (or no positions were requested).
    pub empty: bool,
    pub has_ties: bool,
    pub has_lottery: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultDoc {
    pub kind: RunKind,
    pub engine: EngineMeta,
    pub input_sha256: Sha256,
    pub params: ResultParams,
    pub raw_faction_count: usize,
    pub display_limit: usize,
    pub entities: Vec<Entity>,
    pub table: Vec<QuotientEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<PositionAssignment>>,
    pub flags: ResultFlags,
}

pub fn from_committee(ctx: &PipelineCtx, out: CommitteeOutcome) -> ResultDoc {
    let flags = ResultFlags {
        empty: out.table.is_empty(),
        has_ties: out.has_ties(),
        has_lottery: false,
    };
    ResultDoc {
        kind: RunKind::Committee,
        engine: ctx.engine_meta.clone(),
        input_sha256: ctx.roster_sha256.clone(),
        params: ResultParams {
            min_seats: ctx.params.committee.min_seats,
            group_label: ctx.params.committee.group_label.clone(),
            positions: None,
        },
        raw_faction_count: ctx.factions.len(),
        display_limit: out.display_limit,
        entities: out.entities,
        table: out.table,
        assignments: None,
        flags,
    }
}

pub fn from_deputies(ctx: &PipelineCtx, out: DeputyOutcome) -> ResultDoc {
    let flags = ResultFlags {
        empty: out.assignments.is_empty(),
        has_ties: out.table.iter().any(|e| e.is_tie),
        has_lottery: out.has_lottery(),
    };
    ResultDoc {
        kind: RunKind::Deputies,
        engine: ctx.engine_meta.clone(),
        input_sha256: ctx.roster_sha256.clone(),
        params: ResultParams {
            min_seats: ctx.params.deputies.min_seats,
            group_label: ctx.params.deputies.group_label.clone(),
            positions: Some(ctx.params.deputies.positions),
        },
        raw_faction_count: ctx.factions.len(),
        display_limit: out.display_limit,
        entities: out.entities,
        table: out.table,
        assignments: Some(out.assignments),
        flags,
    }
}

/// Candidate names per position, in order. Handy for callers that only need names.
pub fn assignment_names(assignments: &[PositionAssignment]) -> Vec<(u32, Vec<String>, bool)> {
    assignments
        .iter()
        .map(|a| (a.position, a.candidate_names().map(str::to_owned).collect(), a.lottery))
        .collect()
}
