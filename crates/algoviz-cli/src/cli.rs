use std::io::Write;
use std::path::PathBuf;

use algoviz_core::{AlgorithmKind, Value, record};
use algoviz_runtime::{
    MAX_GENERATED_LEN, PlaybackSession, RunMode, RunSummary, SessionConfig, Speed,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use crate::error::{CliError, Result};
use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "algoviz",
    about = "Step through instrumented sorting algorithms in the terminal",
    version
)]
pub struct Cli {
    /// Enable verbose output (sets log level to debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Animate a sort step by step.
    Run(RunArgs),

    /// Print the full step log as JSON.
    Trace(TraceArgs),

    /// Print the available algorithms and their pseudocode.
    List(ListArgs),
}

/// Where the input array and settings come from.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Algorithm to run (bubble, selection, insertion, merge, quick, heap).
    #[arg(short, long)]
    pub algorithm: Option<AlgorithmKind>,

    /// Comma-separated input values; a random array is generated if omitted.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Vec<Value>,

    /// Length of a generated array.
    #[arg(short = 'n', long)]
    pub len: Option<usize>,

    /// Seed for the array generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Configuration file (TOML, or JSON for a `.json` extension).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Playback speed (slow, normal, fast, instant).
    #[arg(short, long)]
    pub speed: Option<Speed>,

    /// Print every step without sleeping between them.
    #[arg(long)]
    pub no_wait: bool,

    /// Record the whole run before playback starts.
    #[arg(long)]
    pub precomputed: bool,

    /// Print the final summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TraceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,

    /// Write to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Install the `fmt` subscriber on stderr.
///
/// Priority: `RUST_LOG` > `--verbose` > default (warn).
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Run(args) => run_animation(&args, &mut out).map(|_| ()),
        Commands::Trace(args) => run_trace(&args, &mut out),
        Commands::List(args) => run_list(&args, &mut out),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Play the run, printing each step shown, and return its summary.
pub fn run_animation(args: &RunArgs, out: &mut dyn Write) -> Result<RunSummary> {
    let mut config = load_config(&args.input)?;
    if let Some(speed) = args.speed {
        config.playback.speed = speed;
    }
    if args.precomputed {
        config.playback.mode = RunMode::Precomputed;
    }
    let mut session = build_session(config, &args.input)?;

    render::write_header(out, &session)?;
    render::write_current(out, &session)?;
    let mut shown = session.current_step();

    let mut report = session.play();
    let mut clock = Instant::now();
    while report.finished.is_none() && session.is_playing() {
        let interval = session.controller().interval();
        let dt = if args.no_wait {
            interval
        } else {
            std::thread::sleep(interval);
            let now = Instant::now();
            let dt = now.duration_since(clock);
            clock = now;
            dt
        };
        report = session.tick(dt);
        if session.current_step() != shown {
            render::write_current(out, &session)?;
            shown = session.current_step();
        }
    }
    if session.current_step() != shown {
        render::write_current(out, &session)?;
    }

    let summary = report.finished.ok_or(CliError::Incomplete {
        step: session.current_step(),
    })?;
    if args.json {
        serde_json::to_writer(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        render::write_summary(out, &summary)?;
    }
    Ok(summary)
}

/// Record the whole run and write it as JSON.
pub fn run_trace(args: &TraceArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(&args.input)?;
    let session = build_session(config, &args.input)?;
    let log = record(session.algorithm(), &session.values());
    tracing::debug!(algorithm = %session.algorithm(), steps = log.len(), "trace recorded");

    let json = if args.pretty {
        serde_json::to_string_pretty(&log)?
    } else {
        serde_json::to_string(&log)?
    };
    match &args.output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct AlgorithmListing {
    name: &'static str,
    label: &'static str,
    pseudocode: &'static [&'static str],
}

pub fn run_list(args: &ListArgs, out: &mut dyn Write) -> Result<()> {
    if args.json {
        let listing: Vec<AlgorithmListing> = AlgorithmKind::ALL
            .into_iter()
            .map(|kind| AlgorithmListing {
                name: kind.name(),
                label: kind.label(),
                pseudocode: kind.algorithm().pseudocode(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(());
    }
    for (i, kind) in AlgorithmKind::ALL.into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        render::write_algorithm(out, kind)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Config file (or defaults) with command-line overrides applied, validated.
pub fn load_config(input: &InputArgs) -> Result<SessionConfig> {
    let mut config = match &input.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(kind) = input.algorithm {
        config.playback.algorithm = kind;
    }
    if let Some(seed) = input.seed {
        config.generator.seed = Some(seed);
    }
    if input.values.len() > MAX_GENERATED_LEN {
        return Err(CliError::invalid(format!(
            "--values accepts at most {MAX_GENERATED_LEN} values, got {}",
            input.values.len()
        )));
    }
    if let Some(len) = input.len {
        if !input.values.is_empty() {
            return Err(CliError::invalid("--len and --values are mutually exclusive"));
        }
        config.generator.len = len;
    }
    Ok(config.validated()?)
}

fn build_session(config: SessionConfig, input: &InputArgs) -> Result<PlaybackSession> {
    let len = config.generator.len;
    let mut session = PlaybackSession::new(config)?;
    if input.values.is_empty() {
        session.randomize(len)?;
    } else {
        session.load(&input.values);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(values: &[Value]) -> InputArgs {
        InputArgs {
            values: values.to_vec(),
            ..InputArgs::default()
        }
    }

    #[test]
    fn list_command_dispatches_successfully() {
        let mut out = Vec::new();
        run_list(&ListArgs::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for kind in AlgorithmKind::ALL {
            assert!(text.contains(kind.label()));
        }
    }

    #[test]
    fn instant_run_prints_first_and_last_step() {
        let args = RunArgs {
            input: input(&[5, 3, 4, 1, 2]),
            speed: Some(Speed::Instant),
            ..RunArgs::default()
        };
        let mut out = Vec::new();
        let summary = run_animation(&args, &mut out).unwrap();
        assert_eq!(summary.stats.comparisons, 10);
        assert_eq!(summary.stats.swaps, 8);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4, "{text}");
        assert!(text.contains("1. 2. 3. 4. 5."));
    }

    #[test]
    fn no_wait_run_prints_every_step() {
        let args = RunArgs {
            input: input(&[3, 1, 2]),
            no_wait: true,
            ..RunArgs::default()
        };
        let mut out = Vec::new();
        let summary = run_animation(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // header + one line per step + summary
        assert_eq!(text.lines().count(), summary.steps + 2, "{text}");
    }

    #[test]
    fn len_and_values_conflict() {
        let mut args = input(&[1, 2]);
        args.len = Some(4);
        let err = load_config(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn oversized_len_fails_validation() {
        let args = InputArgs {
            len: Some(MAX_GENERATED_LEN + 1),
            ..InputArgs::default()
        };
        assert!(matches!(load_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn oversized_values_are_rejected() {
        let values: Vec<Value> = (0..=MAX_GENERATED_LEN as Value).collect();
        let err = load_config(&input(&values)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let at_limit = &values[..MAX_GENERATED_LEN];
        assert!(load_config(&input(at_limit)).is_ok());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let args = InputArgs {
            len: Some(8),
            seed: Some(11),
            ..InputArgs::default()
        };
        let a = build_session(load_config(&args).unwrap(), &args).unwrap();
        let b = build_session(load_config(&args).unwrap(), &args).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.values().len(), 8);
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "algoviz", "run", "--algorithm", "Quick", "--values", "3,-1,2", "--speed", "fast",
            "--no-wait",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.input.algorithm, Some(AlgorithmKind::Quick));
                assert_eq!(args.input.values, vec![3, -1, 2]);
                assert_eq!(args.speed, Some(Speed::Fast));
                assert!(args.no_wait);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["algoviz", "trace", "--algorithm", "bogo"]).is_err());
    }
}
