//! Record parsing for SQM `.dat` files
//!
//! Turns raw line-oriented text into an ordered [`RecordSeries`]. Comment
//! and blank lines are skipped; any other line must match the record
//! schema or the whole parse fails, since a single corrupt record would
//! skew the night statistics.

use tracing::debug;

use super::field_parsers::{parse_required_datetime, parse_required_f64};
use crate::constants::fields;
use crate::error::{Result, SqmError};
use crate::header::SeriesHeader;
use crate::models::{RecordSeries, SensorRecord, SkyBrightness};
use crate::schema::{RecordSchema, ResolvedFields};

/// Parser bound to one validated record schema
#[derive(Debug, Clone)]
pub struct RecordParser {
    schema: RecordSchema,
    fields: ResolvedFields,
}

impl RecordParser {
    /// Validate the schema and resolve its field positions
    pub fn new(schema: RecordSchema) -> Result<Self> {
        let fields = schema.resolve()?;
        Ok(Self { schema, fields })
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Parse the raw text of a data file into a record series
    pub fn parse(&self, content: &str) -> Result<RecordSeries> {
        let header = SeriesHeader::parse(content, &self.schema);

        let mut records = Vec::new();
        for (line_index, line) in content.lines().enumerate() {
            if let Some(record) = self.parse_line(line, line_index + 1)? {
                records.push(record);
            }
        }

        debug!(
            "Parsed {} records ({} comment lines, schema v{})",
            records.len(),
            header.comment_lines,
            self.schema.version
        );

        Ok(RecordSeries::new(records, header.site_name))
    }

    /// Parse one line; `Ok(None)` for comment and blank lines
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<Option<SensorRecord>> {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.contains(self.schema.comment_marker) {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split(self.schema.delimiter).collect();
        if parts.len() < self.fields.field_count {
            return Err(SqmError::malformed_record(
                line_number,
                line,
                format!(
                    "expected at least {} fields, found {}",
                    self.fields.field_count,
                    parts.len()
                ),
            ));
        }

        let malformed = |reason: String| SqmError::malformed_record(line_number, line, reason);

        let timestamp = parse_required_datetime(
            &parts,
            self.fields.local_timestamp,
            fields::LOCAL_TIMESTAMP,
            &self.schema.timestamp_format,
        )
        .map_err(malformed)?;
        let temperature = parse_required_f64(&parts, self.fields.temperature, fields::TEMPERATURE)
            .map_err(malformed)?;
        let frequency = parse_required_f64(&parts, self.fields.frequency, fields::FREQUENCY)
            .map_err(malformed)?;
        let brightness = parse_required_f64(&parts, self.fields.brightness, fields::BRIGHTNESS)
            .map_err(malformed)?;

        Ok(Some(SensorRecord {
            timestamp,
            temperature,
            frequency,
            brightness: SkyBrightness::from_raw(brightness),
        }))
    }
}

/// Parse raw text with the built-in SQM schema
pub fn parse_series(content: &str) -> Result<RecordSeries> {
    RecordParser::new(RecordSchema::sqm_v1())?.parse(content)
}
