//! Command-line interface components.

use crate::config::AnalysisConfig;
use crate::constants::{DEFAULT_MODIFIER, KNOWN_PLACES};
use crate::error::SqmError;
use crate::models::NightAnalysis;
use crate::processor::{BatchOutcome, NightProcessor};
use crate::source::{RoutingSourceLocator, SourceLocator};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "sqm-processor")]
#[command(about = "Find the clear-sky part of the night in Sky Quality Meter data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Data file path(s) or http(s) URL(s) to analyze, or `-` to read from standard input
    #[arg(
        short = 'p',
        long = "place",
        value_name = "LOCATOR",
        num_args = 1..,
        required_unless_present = "list_places"
    )]
    pub places: Vec<String>,

    /// List known SQM sites and exit
    #[arg(long)]
    pub list_places: bool,

    /// Divisor applied to the mean absolute deviation when deriving the threshold
    #[arg(short, long, default_value_t = DEFAULT_MODIFIER, allow_negative_numbers = true)]
    pub modifier: f64,

    /// Increase logging verbosity (-v: debug with intermediate values, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Dump intermediate state on failure (debug level and above)
    pub fn dumps_trace(&self) -> bool {
        !self.quiet && self.verbose >= 1
    }
}

/// Run the command; returns the number of series that failed
pub async fn run(args: Args) -> Result<usize> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    if args.list_places {
        print_known_places();
        return Ok(0);
    }

    let config = AnalysisConfig::default().with_modifier(args.modifier);
    let processor = NightProcessor::new(config).context("Invalid analysis configuration")?;

    let locator = RoutingSourceLocator::new().context("Failed to set up data sources")?;
    let mut sources = Vec::with_capacity(args.places.len());
    for place in &args.places {
        let content = locator
            .fetch(place)
            .await
            .with_context(|| format!("Failed to load data for '{}'", place))?;
        sources.push((place.clone(), content));
    }

    let outcomes = processor.analyze_batch(sources).await;
    let failures = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(
        "Analyzed {} series, {} failed",
        outcomes.len(),
        failures
    );

    match args.output_format {
        OutputFormat::Human => generate_human_report(&outcomes, args.dumps_trace()),
        OutputFormat::Json => generate_json_report(&outcomes)?,
    }

    Ok(failures)
}

fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqm_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn print_known_places() {
    println!("{}", "Known SQM sites:".bright_green().bold());
    for place in KNOWN_PLACES {
        println!("  • {}", place.bright_cyan());
    }
}

/// Print the error kind and message for a failed series
fn print_failure(source_name: &str, error: &SqmError) {
    eprintln!(
        "{} {} [{}]: {}",
        "✗".bright_red(),
        source_name,
        error.kind().red(),
        error
    );
}

fn generate_human_report(outcomes: &[BatchOutcome], dump_trace: bool) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(analysis) => print_analysis(&outcome.source_name, analysis),
            Err(error) => {
                print_failure(&outcome.source_name, error);
                if dump_trace {
                    eprintln!("Last known state:\n{}", outcome.trace);
                }
            }
        }
    }
}

fn print_analysis(source_name: &str, analysis: &NightAnalysis) {
    let site = analysis.site_name.as_deref().unwrap_or("unknown site");

    println!();
    println!("{} {}", site.bright_green().bold(), format!("({})", source_name).bright_black());
    println!("   • Records: {}", analysis.record_count);
    println!(
        "   • Night: {} to {} (indices {}..={})",
        analysis.night_start.format("%Y-%m-%d %H:%M"),
        analysis.night_end.format("%Y-%m-%d %H:%M"),
        analysis.window.start,
        analysis.window.end
    );
    println!(
        "   • Average MSAS: {:.3}, offset {:.3} (modifier {})",
        analysis.stats.average, analysis.stats.offset, analysis.stats.modifier
    );
    println!(
        "   • Threshold: {:.3}, upper band: {:.3}",
        analysis.threshold(),
        analysis.stats.upper_band()
    );
    println!(
        "   • Clear sky: {} to {} ({} min, indices {}..={})",
        analysis.clear_start.format("%H:%M").to_string().bright_cyan(),
        analysis.clear_end.format("%H:%M").to_string().bright_cyan(),
        analysis.clear_duration().num_minutes(),
        analysis.refined.inner_start,
        analysis.refined.inner_end
    );
    if let Some(peak) = analysis.peak {
        println!(
            "   • Darkest: {:.2} at {}",
            peak.brightness,
            peak.timestamp.format("%H:%M")
        );
    }
}

fn generate_json_report(outcomes: &[BatchOutcome]) -> Result<()> {
    let report: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(analysis) => serde_json::json!({
                "source": outcome.source_name,
                "status": "ok",
                "threshold": analysis.threshold(),
                "clear_duration_minutes": analysis.clear_duration().num_minutes(),
                "analysis": analysis,
            }),
            Err(error) => serde_json::json!({
                "source": outcome.source_name,
                "status": "error",
                "error_kind": error.kind(),
                "error": error.to_string(),
            }),
        })
        .collect();

    let rendered =
        serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    println!("{}", rendered);
    Ok(())
}
