//! Traceroute Linter CLI
//!
//! Auto-corrects and analyzes captured traceroute output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use traceroute_linter::commands::{
    execute_analyze, execute_correct, validate_args, AnalyzeArgs, CorrectArgs,
};
use traceroute_linter::geo::GeoMode;
use traceroute_linter::output::{render_summary, render_text_report};
use traceroute_linter::utils::config::{DEFAULT_GEO_ENDPOINT, SCHEMA_VERSION};

/// Traceroute Linter - repair and lint captured traceroute output
#[derive(Parser, Debug)]
#[command(name = "trace-lint")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Correct, parse and analyze a trace file
    Analyze {
        /// Trace text file
        file: PathBuf,

        /// Skip auto-correction
        #[arg(long)]
        no_correct: bool,

        /// Geography source
        #[arg(long, value_enum, default_value_t = GeoMode::Static)]
        geo: GeoMode,

        /// Endpoint for live geolocation
        #[arg(long, env = "TRACE_LINT_GEO_ENDPOINT", default_value = DEFAULT_GEO_ENDPOINT)]
        geo_endpoint: String,

        /// Live geolocation timeout in milliseconds
        #[arg(long, default_value = "2000")]
        geo_timeout_ms: u64,

        /// TOML file with threshold overrides
        #[arg(short, long)]
        thresholds: Option<PathBuf>,

        /// Output path for the JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only the summary block
        #[arg(long)]
        summary: bool,

        /// Fail when any line cannot be parsed
        #[arg(long)]
        strict: bool,
    },

    /// Auto-correct a trace file without analyzing it
    Correct {
        /// Trace text file
        file: PathBuf,

        /// Output path for the corrected text (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            file,
            no_correct,
            geo,
            geo_endpoint,
            geo_timeout_ms,
            thresholds,
            output,
            summary,
            strict,
        } => {
            let args = AnalyzeArgs {
                input: file,
                auto_correct: !no_correct,
                geo_mode: geo,
                geo_endpoint,
                geo_timeout: Duration::from_millis(geo_timeout_ms),
                thresholds,
                output_json: output,
                strict,
            };

            validate_args(&args)?;

            let report = execute_analyze(&args)?;
            if summary {
                print!("{}", render_summary(&report));
            } else {
                print!("{}", render_text_report(&report));
            }
        }

        Commands::Correct { file, output } => {
            let to_stdout = output.is_none();
            let result = execute_correct(&CorrectArgs {
                input: file,
                output,
            })?;

            if to_stdout {
                print!("{}", result.text);
            }
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Traceroute Linter v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Repairs, parses and lints captured traceroute output.");
}
