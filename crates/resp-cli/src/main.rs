/// RESP command-line tool: decode, inspect, and validate captured RESP
/// byte streams.
///
/// # Command overview
///
/// ```text
/// resp <COMMAND> [OPTIONS] [FILE]
///
/// Commands:
///   decode     Print the flattened result of every top-level frame
///   inspect    Print the frame tree of every top-level frame
///   validate   Check that a capture decodes cleanly
///   help       Print help information
///
/// Global options:
///   -v, --verbose          Log decoder activity to stderr
///   --buffer-size <BYTES>  Read buffer capacity (default 32 KiB)
///   --max-depth <N>        Reject arrays nested deeper than N
///   --max-bulk-len <N>     Reject bulk strings longer than N bytes
///   --max-array-len <N>    Reject arrays with more than N elements
/// ```
///
/// FILE defaults to stdin; `-` also means stdin.
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, malformed input, etc.) |
///
/// Errors and logs go to stderr so stdout can be piped cleanly.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use resp_decoder::{DEFAULT_BUFFER_CAPACITY, DecoderConfig, DecoderLimits, RespDecoder};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode REdis Serialization Protocol captures.
#[derive(Parser)]
#[command(name = "resp", version, about = "RESP stream decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity (debug level) to stderr. `RUST_LOG` overrides.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    decoder: DecoderArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the flattened result of every top-level frame.
    Decode(DecodeArgs),
    /// Print the frame tree of every top-level frame.
    Inspect(InspectArgs),
    /// Check that a capture decodes cleanly.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Decoder tuning shared by every command.
#[derive(clap::Args)]
pub struct DecoderArgs {
    /// Read buffer capacity in bytes (at least 1).
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_BUFFER_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub buffer_size: usize,

    /// Maximum array nesting depth (unlimited when omitted).
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Maximum bulk string length in bytes (unlimited when omitted).
    #[arg(long, global = true)]
    pub max_bulk_len: Option<u64>,

    /// Maximum array element count (unlimited when omitted).
    #[arg(long, global = true)]
    pub max_array_len: Option<u64>,
}

impl DecoderArgs {
    fn config(&self) -> DecoderConfig {
        DecoderConfig {
            buffer_capacity: self.buffer_size,
            limits: DecoderLimits {
                max_bulk_len: self.max_bulk_len,
                max_array_len: self.max_array_len,
                max_depth: self.max_depth,
            },
        }
    }
}

/// Arguments for `resp decode`.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                            │
/// ├──────────────┼───────────────────────────────────────────────────┤
/// │ --format     │ text (default): one result per line, UTF-8 lossy  │
/// │              │ json: a JSON array of strings                     │
/// │ -o/--output  │ write to file instead of stdout                   │
/// └──────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Capture file to decode (stdin when omitted or `-`).
    pub file: Option<PathBuf>,

    /// Output format: `text` or `json`.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `resp inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Capture file to inspect (stdin when omitted or `-`).
    pub file: Option<PathBuf>,

    /// Inspect only the top-level frame at this zero-based index.
    #[arg(long)]
    pub frame: Option<usize>,
}

/// Arguments for `resp validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Capture file to validate (stdin when omitted or `-`).
    pub file: Option<PathBuf>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

pub type InputDecoder = RespDecoder<BufReader<Box<dyn Read>>>;

/// Open `file` (or stdin) behind a configured decoder.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_decoder(file: Option<&Path>, config: &DecoderConfig) -> Result<InputDecoder> {
    let reader: Box<dyn Read> = match file {
        Some(path) if path != Path::new("-") => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        _ => Box::new(io::stdin().lock()),
    };
    Ok(RespDecoder::with_config(reader, config))
}

/// Display name for error messages.
pub fn input_name(file: Option<&Path>) -> String {
    match file {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.decoder.config();
    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args, &config),
        Commands::Inspect(args) => cmd_inspect::run(&args, &config),
        Commands::Validate(args) => cmd_validate::run(&args, &config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
