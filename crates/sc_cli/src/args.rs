// crates/sc_cli/src/args.rs
//
// Offline CLI argument surface (types, validation, helpers).
//
// Rules:
// - Mode is positional: `committee` or `deputies`
// - Inputs are local files only (reject any scheme:// like http/https/file)
// - `--positions` only applies to `deputies`
// - Output: optional --out dir, --render [json|text]*

use clap::{Parser, ValueEnum};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use sc_pipeline::RunKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Committee chairs: ranked quotient table.
    Committee,
    /// Deputy mayors: sequential positions with lottery detection.
    Deputies,
}

impl From<Mode> for RunKind {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Committee => RunKind::Committee,
            Mode::Deputies => RunKind::Deputies,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Render {
    Json,
    Text,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "seatcalc",
    version,
    disable_help_subcommand = true,
    about = "Offline D'Hondt calculator for committee chairs and deputy mayors"
)]
pub struct Args {
    /// Calculation to run.
    #[arg(value_enum)]
    pub mode: Mode,

    /// Roster JSON (factions, optional embedded params).
    #[arg(long)]
    pub roster: PathBuf,
    /// Params JSON; fields present override the roster's embedded params.
    #[arg(long)]
    pub params: Option<PathBuf>,

    // --- Overrides (win over every file) ---
    /// Minimum seats a faction needs to compete.
    #[arg(long)]
    pub min_seats: Option<u32>,
    /// Number of deputy positions (deputies only).
    #[arg(long)]
    pub positions: Option<u32>,
    /// Prefix for merged group names.
    #[arg(long)]
    pub group_label: Option<String>,

    // --- Output & rendering ---
    /// Output directory for result.json and reports. Omit to print to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Renderer(s) to emit. Defaults to text when printing to stdout.
    #[arg(long, value_enum, num_args = 0..=2)]
    pub render: Vec<Render>,

    /// Suppress non-essential stderr output.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Log pipeline stages to stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    BadCombo(&'static str),
    NonLocalPath(String),
    NotFound(String),
    Empty(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            BadCombo(s) => write!(f, "invalid flag combination: {s}"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            Empty(s) => write!(f, "{s} must not be empty"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Checks clap cannot express, then path normalization.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if args.mode == Mode::Committee && args.positions.is_some() {
        return Err(CliError::BadCombo("--positions only applies to deputies"));
    }
    if args.group_label.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(CliError::Empty("--group-label"));
    }

    ensure_local_exists(&args.roster, "--roster")?;
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }

    args.render.dedup();
    args.roster = normalize_path(&args.roster);
    args.params = args.params.take().map(|p| normalize_path(&p));
    args.out = args.out.take().map(|p| normalize_path(&p));
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [Some(args.roster.as_path()), args.params.as_deref(), args.out.as_deref()]
        .into_iter()
        .flatten()
}

/// Ensure a path is local and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), join onto the CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}
