// crates/sc_cli/src/main.rs
//
// Exit codes, typed error mapping, tracing setup, and the run path
// (load → overrides → pipeline → artifacts → rendering).

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const RENDER: u8 = 5;
}

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args, Mode, Render};

use sc_io::prelude::*;
use sc_pipeline::{load_context, run_with_ctx, PipelineCtx, PipelineError, ResultDoc, RunKind};
use sc_report::{build_model, ReportError, ReportModel};
use tracing::{debug, info};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Malformed or invalid input (roster, params)
    Validation(String),
    /// Read/write/path/limit errors
    Io(String),
    /// Report build or rendering errors
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "invalid input: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("seatcalc: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    setup_tracing(args.verbose, args.quiet);

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("seatcalc: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc)
}

/// Stderr subscriber; `RUST_LOG` wins over the flags.
fn setup_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,sc_algo=debug,sc_pipeline=debug")
        } else if quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::new("warn")
        }
    });

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}

fn run_once(args: &Args) -> Result<(), MainError> {
    // 1) Load roster + params (schema + roster rules)
    let mut ctx = load_context(&args.roster, args.params.as_deref()).map_err(map_pipeline_err)?;

    // 2) Flag overrides win over every file; re-check group names after
    apply_overrides(&mut ctx, args);
    ctx.validate().map_err(map_pipeline_err)?;

    // 3) Run
    let doc = run_with_ctx(&ctx, RunKind::from(args.mode));

    // 4) Artifacts or stdout
    match &args.out {
        Some(out_dir) => {
            write_artifacts(out_dir, &doc)?;
            render_reports_to_dir(&args.render, &doc, out_dir)?;
            if !args.quiet {
                eprintln!("run: artifacts written to {}", out_dir.to_string_lossy());
            }
        }
        None => print_reports(&args.render, &doc)?,
    }
    Ok(())
}

fn apply_overrides(ctx: &mut PipelineCtx, args: &Args) {
    match args.mode {
        Mode::Committee => {
            let p = &mut ctx.params.committee;
            if let Some(m) = args.min_seats {
                p.min_seats = m;
            }
            if let Some(label) = &args.group_label {
                p.group_label = label.trim().to_string();
            }
        }
        Mode::Deputies => {
            let p = &mut ctx.params.deputies;
            if let Some(m) = args.min_seats {
                p.min_seats = m;
            }
            if let Some(n) = args.positions {
                p.positions = n;
            }
            if let Some(label) = &args.group_label {
                p.group_label = label.trim().to_string();
            }
        }
    }
    debug!(params = ?ctx.params, "effective params");
}

fn write_artifacts(out_dir: &Path, doc: &ResultDoc) -> Result<(), MainError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.to_string_lossy())))?;

    let res_path = out_dir.join("result.json");
    write_canonical_file(&res_path, doc).map_err(|e| MainError::Io(format!("write result.json: {e}")))?;

    let bytes = to_canonical_bytes(doc).map_err(|e| MainError::Io(format!("hash result.json: {e}")))?;
    info!(path = %res_path.display(), sha256 = %sha256_hex(&bytes), "result written");
    Ok(())
}

fn model_for(doc: &ResultDoc) -> Result<ReportModel, MainError> {
    let result_val =
        serde_json::to_value(doc).map_err(|e| MainError::Render(format!("result to JSON: {e}")))?;
    build_model(&result_val).map_err(map_report_err)
}

fn render_reports_to_dir(renders: &[Render], doc: &ResultDoc, out_dir: &Path) -> Result<(), MainError> {
    if renders.is_empty() {
        return Ok(());
    }
    let model = model_for(doc)?;
    for r in renders {
        let (name, body) = match r {
            Render::Json => ("report.json", render_json_report(&model)?),
            Render::Text => ("report.txt", render_text_report(&model)?),
        };
        write_text_file(&out_dir.join(name), &body)
            .map_err(|e| MainError::Io(format!("write {name}: {e}")))?;
    }
    Ok(())
}

fn print_reports(renders: &[Render], doc: &ResultDoc) -> Result<(), MainError> {
    let model = model_for(doc)?;
    let renders = if renders.is_empty() { &[Render::Text][..] } else { renders };

    let mut stdout = std::io::stdout().lock();
    for r in renders {
        let body = match r {
            Render::Json => render_json_report(&model)?,
            Render::Text => render_text_report(&model)?,
        };
        stdout
            .write_all(body.as_bytes())
            .and_then(|_| if body.ends_with('\n') { Ok(()) } else { stdout.write_all(b"\n") })
            .map_err(|e| MainError::Io(format!("stdout: {e}")))?;
    }
    Ok(())
}

// Always accept the concrete model type; gate body by feature.
fn render_json_report(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-json")]
    {
        sc_report::render_json(model).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = model;
        Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_text_report(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-text")]
    {
        sc_report::render_text(model).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-text"))]
    {
        let _ = model;
        Err(MainError::Render("text renderer not enabled (build with feature `report-text`)".into()))
    }
}

/// Map typed errors to the exit-code table.
fn map_error(e: &MainError) -> u8 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Schema(m) | PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Io(m) => MainError::Io(m),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}
