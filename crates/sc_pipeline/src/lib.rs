//! sc_pipeline: deterministic pipeline surface (load → resolve → rank → assign → build).
//!
//! This crate delegates file handling to `sc_io` and the arithmetic to
//! `sc_algo`; it only decides which stages run for which calculation and
//! packages the outcome as a serializable [`ResultDoc`].

#![forbid(unsafe_code)]

use std::fmt;
use std::path::Path;

use sc_core::{variables::Params, Faction, Sha256};
use sc_io::loader::{self, LoadedRoster};
use tracing::info;

pub mod build_result;
pub mod committee;
pub mod deputies;

pub use build_result::{ResultDoc, ResultFlags, ResultParams};
pub use committee::{run_committee, CommitteeOutcome};
pub use deputies::{run_deputies, DeputyOutcome};

/// Engine identifiers echoed into every result document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineMeta {
    pub name: String,
    pub version: String,
}

impl Default for EngineMeta {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Which calculation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    /// Committee chairs: ranked table, no lottery semantics.
    Committee,
    /// Deputy mayors: sequential positions with lottery detection.
    Deputies,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunKind::Committee => "committee",
            RunKind::Deputies => "deputies",
        })
    }
}

/// Pipeline context: roster already loaded and validated, params resolved.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub factions: Vec<Faction>,
    pub roster_sha256: Sha256,
    pub params: Params,
    pub engine_meta: EngineMeta,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    Io(String),
    Schema(String),
    Validate(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Schema(m) => write!(f, "schema: {m}"),
            PipelineError::Validate(m) => write!(f, "validate: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<sc_io::IoError> for PipelineError {
    fn from(e: sc_io::IoError) -> Self {
        use sc_io::IoError;
        match e {
            IoError::Json { pointer, msg } => PipelineError::Schema(format!("{pointer}: {msg}")),
            IoError::Invalid { pointer, msg } => PipelineError::Validate(format!("{pointer}: {msg}")),
            IoError::Path(m) => PipelineError::Io(format!("path: {m}")),
            IoError::Limit(m) => PipelineError::Io(format!("limit: {m}")),
            IoError::Hash(m) => PipelineError::Io(format!("hash: {m}")),
        }
    }
}

/// Load the roster and merge params.
///
/// Precedence, later wins: defaults → params embedded in the roster →
/// standalone params file (field by field).
pub fn load_context(roster: &Path, params: Option<&Path>) -> Result<PipelineCtx, PipelineError> {
    let LoadedRoster { factions, params: embedded, roster_sha256 } = loader::load_roster(roster)?;
    let params = match params {
        Some(p) => loader::load_params_over(p, &embedded)?,
        None => embedded,
    };
    let ctx = PipelineCtx { factions, roster_sha256, params, engine_meta: EngineMeta::default() };
    ctx.validate()?;
    Ok(ctx)
}

impl PipelineCtx {
    /// Re-check the roster against the current params; call after editing
    /// `params` in place.
    pub fn validate(&self) -> Result<(), PipelineError> {
        loader::check_group_names(&self.factions, &self.params)?;
        Ok(())
    }
}

/// Run one calculation over a loaded context.
pub fn run_with_ctx(ctx: &PipelineCtx, kind: RunKind) -> ResultDoc {
    let doc = match kind {
        RunKind::Committee => {
            let out = run_committee(&ctx.factions, &ctx.params.committee);
            build_result::from_committee(ctx, out)
        }
        RunKind::Deputies => {
            let out = run_deputies(&ctx.factions, &ctx.params.deputies);
            build_result::from_deputies(ctx, out)
        }
    };
    info!(
        kind = %kind,
        factions = ctx.factions.len(),
        entities = doc.entities.len(),
        table = doc.table.len(),
        lottery = doc.flags.has_lottery,
        "calculation finished"
    );
    doc
}
