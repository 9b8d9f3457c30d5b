//! bcp - Buffered Copy
//!
//! Copy or compare a pair of files with a selectable buffering strategy,
//! powered by bufcopy.

use bufcopy::{
    CopyBuilder, CopyReport, DEFAULT_BLOCK_SIZE, DEFAULT_WRITE_BUFFER_SIZE, Error as BufcopyError,
    ErrorCode, LineEnding, Strategy, files_equal,
};
use clap::{Parser, ValueEnum};
use encoding_rs::Encoding;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// bcp - Copy or compare files with a selectable buffering strategy
///
/// Usage:
///   bcp [OPTIONS] SOURCE DEST
///   bcp --compare FILE1 FILE2
#[derive(Parser, Debug)]
#[command(name = "bcp", version, about, long_about = None)]
struct Args {
    /// Source file (first file with --compare)
    source: PathBuf,

    /// Destination file (second file with --compare)
    dest: PathBuf,

    /// Copy strategy
    #[arg(short = 's', long, value_enum, default_value = "whole")]
    strategy: StrategyArg,

    /// Block size in bytes for the block strategy
    #[arg(short = 'b', long, value_name = "BYTES", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Writer buffer size in bytes for the buffered strategy
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_WRITE_BUFFER_SIZE)]
    write_buffer: usize,

    /// Text encoding label for the lines and staged-text strategies
    #[arg(short = 'e', long, value_name = "LABEL", default_value = "utf-8")]
    encoding: String,

    /// Line terminator written by the lines strategy
    #[arg(long, value_enum, default_value = "native")]
    line_ending: LineEndingArg,

    /// Sync the destination to disk before exiting
    #[arg(long)]
    sync: bool,

    /// Compare source and destination after copying
    #[arg(long, conflicts_with = "compare")]
    verify: bool,

    /// Compare the two files instead of copying (exit 1 if they differ)
    #[arg(long)]
    compare: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Print nothing on success
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output and debug logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Whole file in one buffer (default)
    Whole,
    /// Buffered reader and writer
    Buffered,
    /// Staged through memory
    Staged,
    /// Staged through a text decode and re-encode
    StagedText,
    /// One byte at a time
    Byte,
    /// Staged through memory, written one byte at a time
    StagedByte,
    /// Fixed-size blocks
    Block,
    /// Line at a time (reports lines, not bytes)
    Lines,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Whole => Strategy::Whole,
            StrategyArg::Buffered => Strategy::Buffered,
            StrategyArg::Staged => Strategy::Staged,
            StrategyArg::StagedText => Strategy::StagedText,
            StrategyArg::Byte => Strategy::ByteByByte,
            StrategyArg::StagedByte => Strategy::StagedByteByByte,
            StrategyArg::Block => Strategy::Block,
            StrategyArg::Lines => Strategy::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineEndingArg {
    /// Host convention
    Native,
    /// "\n"
    Lf,
    /// "\r\n"
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(l: LineEndingArg) -> Self {
        match l {
            LineEndingArg::Native => LineEnding::Native,
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::CrLf,
        }
    }
}

impl LineEndingArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Lf => "lf",
            Self::Crlf => "crlf",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    #[error("Failed to copy {path}: {source}")]
    Copy { path: PathBuf, source: BufcopyError },

    #[error("Failed to compare files: {source}")]
    Compare { source: BufcopyError },

    #[error("Verification failed: {dst} differs from {src}")]
    VerifyFailed { src: PathBuf, dst: PathBuf },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownEncoding { .. } => ErrorCode::InvalidInput,
            Self::Copy { source, .. } | Self::Compare { source } => source.code(),
            Self::VerifyFailed { .. } => ErrorCode::Mismatch,
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    match run() {
        Ok(true) => {}
        // Files differ: not an error, but not a success either
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("error[{}]: {}", error.code(), error);
            std::process::exit(exit_code_for(error.code()));
        }
    }
}

/// Returns `Ok(false)` when `--compare` finds the files differ.
fn run() -> CliResult<bool> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if args.compare {
        return compare(&args);
    }

    let encoding = resolve_encoding(&args.encoding)?;
    let strategy: Strategy = args.strategy.into();

    let mut builder = CopyBuilder::new(&args.source, &args.dest)
        .strategy(strategy)
        .block_size(args.block_size)
        .write_buffer_size(args.write_buffer)
        .encoding(encoding)
        .line_ending(args.line_ending.into());
    if args.sync {
        builder = builder.fsync();
    }
    if args.verify {
        builder = builder.verify();
    }

    let report = match builder.run() {
        Ok(report) => report,
        Err(source) => {
            let error = CliError::Copy {
                path: args.source.clone(),
                source,
            };
            if args.output == OutputMode::Json {
                print_json_value(&failure_json(&args, &error))?;
            }
            return Err(error);
        }
    };

    match args.output {
        OutputMode::Human if !args.quiet => print_report(&args, encoding, &report),
        OutputMode::Human => {}
        OutputMode::Json => print_json_value(&report_json(&args, encoding, &report))?,
    }

    if report.verified == Some(false) {
        return Err(CliError::VerifyFailed {
            src: args.source.clone(),
            dst: args.dest.clone(),
        });
    }

    Ok(true)
}

fn compare(args: &Args) -> CliResult<bool> {
    let equal = match files_equal(&args.source, &args.dest) {
        Ok(equal) => equal,
        Err(source) => {
            let error = CliError::Compare { source };
            if args.output == OutputMode::Json {
                print_json_value(&compare_failure_json(args, &error))?;
            }
            return Err(error);
        }
    };

    match args.output {
        OutputMode::Human if !args.quiet => {
            let verdict = if equal { "identical" } else { "differ" };
            println!(
                "{} and {} {}",
                args.source.display(),
                args.dest.display(),
                verdict
            );
        }
        OutputMode::Human => {}
        OutputMode::Json => print_json_value(&json!({
            "schema_version": "1.0",
            "mode": "compare",
            "outcome": if equal { "identical" } else { "differ" },
            "first": display_path(&args.source),
            "second": display_path(&args.dest),
            "equal": equal,
        }))?,
    }

    Ok(equal)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_encoding(label: &str) -> CliResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| CliError::UnknownEncoding {
        label: label.to_owned(),
    })
}

fn effective_config_json(args: &Args, encoding: &'static Encoding) -> Value {
    json!({
        "block_size": args.block_size.max(1),
        "write_buffer": args.write_buffer.max(1),
        "encoding": encoding.name(),
        "line_ending": args.line_ending.as_str(),
        "sync": args.sync,
        "verify": args.verify,
    })
}

fn report_json(args: &Args, encoding: &'static Encoding, report: &CopyReport) -> Value {
    json!({
        "schema_version": "1.0",
        "mode": "copy",
        "outcome": "copied",
        "strategy": report.strategy.as_str(),
        "source": display_path(&args.source),
        "destination": display_path(&args.dest),
        "count": report.count,
        "unit": report.unit(),
        "duration_ms": report.duration.as_secs_f64() * 1000.0,
        "verified": report.verified,
        "effective_config": effective_config_json(args, encoding),
    })
}

fn failure_json(args: &Args, error: &CliError) -> Value {
    let message = match error {
        CliError::Copy { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    json!({
        "schema_version": "1.0",
        "mode": "copy",
        "outcome": "failed",
        "strategy": Strategy::from(args.strategy).as_str(),
        "source": display_path(&args.source),
        "destination": display_path(&args.dest),
        "error_code": error.code().as_str(),
        "error_message": message,
    })
}

fn compare_failure_json(args: &Args, error: &CliError) -> Value {
    let message = match error {
        CliError::Compare { source } => source.to_string(),
        other => other.to_string(),
    };
    json!({
        "schema_version": "1.0",
        "mode": "compare",
        "outcome": "failed",
        "first": display_path(&args.source),
        "second": display_path(&args.dest),
        "error_code": error.code().as_str(),
        "error_message": message,
    })
}

fn print_report(args: &Args, encoding: &'static Encoding, report: &CopyReport) {
    let amount = if report.strategy.counts_lines() {
        format!("{} lines", report.count)
    } else {
        format_bytes(report.count)
    };

    if args.verbose {
        println!("Copy completed in {:?}", report.duration);
        println!("  Source:       {}", args.source.display());
        println!("  Destination:  {}", args.dest.display());
        println!("  Strategy:     {}", report.strategy.as_str());
        println!("  Copied:       {} {}", report.count, report.unit());
        if report.strategy == Strategy::Block {
            println!("  Block size:   {}", args.block_size.max(1));
        }
        if !report.strategy.is_byte_exact() {
            println!("  Encoding:     {}", encoding.name());
        }
        match report.verified {
            Some(true) => println!("  Verified:     identical"),
            Some(false) => println!("  Verified:     DIFFERENT"),
            None => {}
        }
    } else {
        println!("Copied {} ({})", amount, report.strategy.as_str());
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
