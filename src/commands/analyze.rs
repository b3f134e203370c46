//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the trace file
//! 2. Auto-corrects it (unless disabled)
//! 3. Parses and validates the route
//! 4. Runs the rule analyzer
//! 5. Assembles the report and optionally writes it as JSON

use crate::analyzer::{advisory_notes, load_thresholds, AnalyzerThresholds, RouteAnalyzer};
use crate::corrector::auto_correct;
use crate::geo::{build_geo_lookup, GeoMode};
use crate::output::{write_report, AnalysisReport};
use crate::parser::parse_trace;
use crate::utils::config::{DEFAULT_GEO_ENDPOINT, DEFAULT_GEO_TIMEOUT};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace text file
    pub input: PathBuf,

    /// Run the auto-corrector before parsing
    pub auto_correct: bool,

    pub geo_mode: GeoMode,

    /// Base URL for live geolocation
    pub geo_endpoint: String,

    /// Per-request budget for live geolocation
    pub geo_timeout: Duration,

    /// TOML threshold overrides
    pub thresholds: Option<PathBuf>,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Abort when any line fails to parse
    pub strict: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            auto_correct: true,
            geo_mode: GeoMode::Static,
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            geo_timeout: DEFAULT_GEO_TIMEOUT,
            thresholds: None,
            output_json: None,
            strict: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The assembled report; rendering is left to the caller
///
/// # Errors
/// * Unreadable input or threshold files
/// * Parse errors when `strict` is set
/// * File write errors
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Analyzing trace: {}", args.input.display());

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read trace file {}", args.input.display()))?;

    let (text, corrections) = if args.auto_correct {
        let corrected = auto_correct(&raw);
        info!("Auto-correction applied {} fix(es)", corrected.corrections.len());
        (corrected.text, corrected.corrections)
    } else {
        debug!("Auto-correction disabled");
        (raw, Vec::new())
    };

    let route = parse_trace(&text);
    info!(
        "Parsed {} hop(s), {} line(s) unreadable",
        route.hops.len(),
        route.errors.len()
    );

    if args.strict && !route.is_success() {
        anyhow::bail!(
            "{} line(s) could not be parsed (first: {})",
            route.errors.len(),
            route.errors[0]
        );
    }

    for warning in route.validate_structure() {
        warn!("{}", warning);
    }

    let thresholds = match &args.thresholds {
        Some(path) => load_thresholds(path)
            .with_context(|| format!("Failed to load thresholds from {}", path.display()))?,
        None => AnalyzerThresholds::default(),
    };

    let geo = build_geo_lookup(args.geo_mode, &args.geo_endpoint, args.geo_timeout)
        .context("Failed to set up geo lookup")?;
    let analyzer = RouteAnalyzer::new(geo).with_thresholds(thresholds);

    let findings = analyzer.analyze(&route);
    let notes = if findings.is_empty() {
        advisory_notes(&route.hops)
    } else {
        Vec::new()
    };

    let report = AnalysisReport::from_route(args.input.display().to_string(), &route, findings)
        .with_corrections(corrections)
        .with_notes(notes)
        .with_hop_countries(analyzer.hop_countries(&route.hops));

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input file cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.geo_mode == GeoMode::Live {
        if !args.geo_endpoint.starts_with("http://") && !args.geo_endpoint.starts_with("https://")
        {
            anyhow::bail!("Geo endpoint must start with http:// or https://");
        }

        if args.geo_timeout.is_zero() {
            anyhow::bail!("Geo timeout must be greater than 0");
        }
    }

    Ok(())
}
