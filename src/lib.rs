//! SQM Processor Library
//!
//! A Rust library for analyzing Sky Quality Meter (SQM) brightness time
//! series and finding the clear, dark part of an observing night.
//!
//! This library provides tools for:
//! - Loading SQM `.dat` files from disk, standard input or a URL
//! - Parsing semicolon-delimited SQM `.dat` files through a versioned record schema
//! - Locating the night window bounded by the first and last brightness readings
//! - Estimating the mean brightness and its scaled mean absolute deviation
//! - Refining the window to the samples brighter than the derived threshold
//! - Analyzing many independent nights concurrently
//!
//! ```rust
//! use sqm_processor::{AnalysisConfig, NightProcessor};
//!
//! # fn example(content: &str) -> sqm_processor::Result<()> {
//! let processor = NightProcessor::new(AnalysisConfig::default())?;
//! let analysis = processor.analyze(content)?;
//! println!(
//!     "clear sky from {} to {} (threshold {:.2})",
//!     analysis.clear_start,
//!     analysis.clear_end,
//!     analysis.threshold()
//! );
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;
pub mod schema;
pub mod source;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::{Result, SqmError};
pub use models::{
    BrightnessStats, NightAnalysis, NightWindow, PeakReading, RecordSeries, RefinedWindow,
    SensorRecord, SkyBrightness,
};
pub use processor::boundary::refine_boundaries;
pub use processor::night_window::locate_night_window;
pub use processor::record_parser::{RecordParser, parse_series};
pub use processor::statistics::estimate_brightness_stats;
pub use processor::{BatchOutcome, NightProcessor, PipelineTrace};
pub use schema::RecordSchema;
pub use source::{FileSourceLocator, HttpSourceLocator, RoutingSourceLocator, SourceLocator};
