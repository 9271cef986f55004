//! Configuration management and validation.
//!
//! Provides the analysis configuration: the threshold modifier, the record
//! schema used to read data lines, and the concurrency limit for batch
//! analysis of independent series.

use crate::constants::DEFAULT_MODIFIER;
use crate::error::{Result, SqmError};
use crate::processor::statistics::validate_modifier;
use crate::schema::RecordSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Global configuration for night analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Divisor applied to the mean absolute deviation (must be > 0)
    pub modifier: f64,

    /// Layout of the data lines
    pub schema: RecordSchema,

    /// Maximum number of series analyzed at the same time
    pub max_concurrent_series: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            modifier: DEFAULT_MODIFIER,
            schema: RecordSchema::sqm_v1(),
            max_concurrent_series: num_cpus::get(),
        }
    }
}

impl AnalysisConfig {
    /// Create configuration with a custom threshold modifier
    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = modifier;
        self
    }

    /// Create configuration with a custom record schema
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set maximum concurrent series
    pub fn with_max_concurrent_series(mut self, max_series: usize) -> Self {
        self.max_concurrent_series = max_series;
        self
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        validate_modifier(self.modifier)?;
        self.schema.validate()?;

        if self.max_concurrent_series == 0 {
            return Err(SqmError::configuration(
                "max_concurrent_series must be at least 1",
            ));
        }

        debug!(
            "Configuration valid: modifier={}, schema v{}, concurrency={}",
            self.modifier, self.schema.version, self.max_concurrent_series
        );
        Ok(())
    }
}
