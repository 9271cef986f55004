//! Night analysis engine with a staged pipeline.
//!
//! Chains the four stages of the analysis: record parsing, night window
//! location, brightness statistics and boundary refinement. Each stage is
//! a pure function over the immutable output of the previous one, so
//! independent series can be analyzed concurrently without coordination.

pub mod boundary;
pub mod field_parsers;
pub mod night_window;
pub mod record_parser;
pub mod statistics;

#[cfg(test)]
pub mod tests;

use self::boundary::refine_boundaries;
use self::night_window::locate_night_window;
use self::record_parser::RecordParser;
use self::statistics::estimate_brightness_stats;

use crate::config::AnalysisConfig;
use crate::error::{Result, SqmError};
use crate::models::{BrightnessStats, NightAnalysis, NightWindow, RecordSeries, RefinedWindow};

use futures::stream::{self, StreamExt};
use std::fmt;
use tokio::task;
use tracing::{debug, info};

/// Intermediate values recorded as the pipeline advances
///
/// Filled stage by stage so that, when a stage fails, the last known
/// state can be reported alongside the error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineTrace {
    pub records_parsed: Option<usize>,
    pub site_name: Option<String>,
    pub window: Option<NightWindow>,
    pub stats: Option<BrightnessStats>,
    pub refined: Option<RefinedWindow>,
}

impl fmt::Display for PipelineTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.records_parsed {
            Some(count) => writeln!(f, "records parsed: {}", count)?,
            None => return writeln!(f, "records parsed: none (parse did not complete)"),
        }
        writeln!(
            f,
            "site name: {}",
            self.site_name.as_deref().unwrap_or("unknown")
        )?;
        if let Some(window) = self.window {
            writeln!(f, "night window: {}..={}", window.start, window.end)?;
        }
        if let Some(stats) = self.stats {
            writeln!(f, "average: {:.4}", stats.average)?;
            writeln!(f, "offset: {:.4} (modifier {})", stats.offset, stats.modifier)?;
            writeln!(f, "threshold: {:.4}", stats.threshold())?;
            writeln!(f, "upper band: {:.4}", stats.upper_band())?;
        }
        if let Some(refined) = self.refined {
            writeln!(
                f,
                "refined window: {}..={}",
                refined.inner_start, refined.inner_end
            )?;
        }
        Ok(())
    }
}

/// Result of one series in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub source_name: String,
    pub result: Result<NightAnalysis>,
    pub trace: PipelineTrace,
}

/// Main processor for SQM night analysis
#[derive(Debug, Clone)]
pub struct NightProcessor {
    config: AnalysisConfig,
    parser: RecordParser,
}

impl NightProcessor {
    /// Create a processor after validating the configuration
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let parser = RecordParser::new(config.schema.clone())?;
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze the raw text of one data file
    pub fn analyze(&self, content: &str) -> Result<NightAnalysis> {
        let mut trace = PipelineTrace::default();
        self.analyze_traced(content, &mut trace)
    }

    /// Analyze raw text, recording intermediate values in `trace`
    pub fn analyze_traced(&self, content: &str, trace: &mut PipelineTrace) -> Result<NightAnalysis> {
        let series = self.parser.parse(content)?;
        trace.records_parsed = Some(series.len());
        trace.site_name = series.site_name().map(str::to_string);

        self.analyze_series_traced(&series, trace)
    }

    /// Analyze an already parsed series
    pub fn analyze_series(&self, series: &RecordSeries) -> Result<NightAnalysis> {
        let mut trace = PipelineTrace::default();
        self.analyze_series_traced(series, &mut trace)
    }

    fn analyze_series_traced(
        &self,
        series: &RecordSeries,
        trace: &mut PipelineTrace,
    ) -> Result<NightAnalysis> {
        let window = locate_night_window(series)?;
        trace.window = Some(window);

        let stats = estimate_brightness_stats(series, window, self.config.modifier)?;
        trace.stats = Some(stats);

        let refined = refine_boundaries(series, &stats, window)?;
        trace.refined = Some(refined);

        let peak = series.peak();
        if let Some(peak) = peak {
            debug!(
                "Peak brightness {:.2} at index {} ({})",
                peak.brightness, peak.index, peak.timestamp
            );
        }

        let analysis = NightAnalysis {
            site_name: series.site_name().map(str::to_string),
            record_count: series.len(),
            window,
            stats,
            refined,
            peak,
            night_start: series[window.start].timestamp,
            night_end: series[window.end].timestamp,
            clear_start: series[refined.inner_start].timestamp,
            clear_end: series[refined.inner_end].timestamp,
        };

        info!(
            "Clear sky {} to {} ({} min), threshold {:.2}",
            analysis.clear_start,
            analysis.clear_end,
            analysis.clear_duration().num_minutes(),
            analysis.threshold()
        );

        Ok(analysis)
    }

    /// Analyze independent series concurrently, preserving input order
    ///
    /// Each entry is `(source name, raw text)`. At most
    /// `max_concurrent_series` series run at once on blocking tasks.
    pub async fn analyze_batch(&self, sources: Vec<(String, String)>) -> Vec<BatchOutcome> {
        let limit = self.config.max_concurrent_series.max(1);
        info!(
            "Analyzing {} series with concurrency {}",
            sources.len(),
            limit
        );

        stream::iter(sources)
            .map(|(source_name, content)| {
                let processor = self.clone();
                async move {
                    let joined = task::spawn_blocking(move || {
                        let mut trace = PipelineTrace::default();
                        let result = processor.analyze_traced(&content, &mut trace);
                        (result, trace)
                    })
                    .await;

                    let (result, trace) = joined.unwrap_or_else(|e| {
                        (
                            Err(SqmError::TaskFailed {
                                source_name: source_name.clone(),
                                reason: e.to_string(),
                            }),
                            PipelineTrace::default(),
                        )
                    });

                    BatchOutcome {
                        source_name,
                        result,
                        trace,
                    }
                }
            })
            .buffered(limit)
            .collect()
            .await
    }
}
