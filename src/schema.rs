//! Versioned record schema for SQM data lines.
//!
//! Maps field names to column positions so the parser extracts values by
//! name. The schema is validated once when a parser is built instead of
//! assuming fixed positions throughout the pipeline.

use crate::constants::{
    COMMENT_MARKER, FIELD_DELIMITER, SITE_HEADER_LINE, SQM_SCHEMA_VERSION, TIMESTAMP_FORMAT, fields,
};
use crate::error::{Result, SqmError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named column of a data line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub index: usize,
}

/// Layout of one family of SQM data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub version: u32,
    pub delimiter: char,
    pub comment_marker: char,
    pub timestamp_format: String,
    /// Zero-based line holding the site identifier
    pub site_header_line: usize,
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Schema of the SQM-LE/LU `.dat` files
    pub fn sqm_v1() -> Self {
        let fields = fields::SQM_V1_LAYOUT
            .iter()
            .enumerate()
            .map(|(index, name)| FieldSpec {
                name: (*name).to_string(),
                index,
            })
            .collect();

        Self {
            version: SQM_SCHEMA_VERSION,
            delimiter: FIELD_DELIMITER,
            comment_marker: COMMENT_MARKER,
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
            site_header_line: SITE_HEADER_LINE,
            fields,
        }
    }

    /// Column position of a named field
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.index)
    }

    /// Minimum number of fields a data line must carry
    pub fn required_field_count(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check that every required field is mapped exactly once
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SqmError::configuration(format!(
                    "Schema v{} maps field '{}' more than once",
                    self.version, field.name
                )));
            }
        }

        for required in fields::REQUIRED {
            if self.index_of(required).is_none() {
                return Err(SqmError::configuration(format!(
                    "Schema v{} is missing required field '{}'",
                    self.version, required
                )));
            }
        }

        if self.delimiter == self.comment_marker {
            return Err(SqmError::configuration(
                "Field delimiter and comment marker must differ",
            ));
        }

        Ok(())
    }

    /// Resolve the positions of the fields the parser extracts
    pub fn resolve(&self) -> Result<ResolvedFields> {
        self.validate()?;

        let lookup = |name: &str| {
            self.index_of(name).ok_or_else(|| {
                SqmError::configuration(format!("Schema is missing field '{}'", name))
            })
        };

        Ok(ResolvedFields {
            local_timestamp: lookup(fields::LOCAL_TIMESTAMP)?,
            temperature: lookup(fields::TEMPERATURE)?,
            frequency: lookup(fields::FREQUENCY)?,
            brightness: lookup(fields::BRIGHTNESS)?,
            field_count: self.required_field_count(),
        })
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::sqm_v1()
    }
}

/// Column positions resolved from a validated schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields {
    pub local_timestamp: usize,
    pub temperature: usize,
    pub frequency: usize,
    pub brightness: usize,
    pub field_count: usize,
}
