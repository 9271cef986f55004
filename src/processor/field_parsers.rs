//! Field parsing utilities for SQM data lines
//!
//! Helpers that pull a single named field out of a split line and convert
//! it, reporting failures with the field name and offending value.

use chrono::NaiveDateTime;

/// Get a required field value from a split data line
pub fn get_required_field<'a>(
    fields: &[&'a str],
    index: usize,
    field_name: &str,
) -> Result<&'a str, String> {
    let value = fields
        .get(index)
        .ok_or_else(|| format!("No value for required field '{}'", field_name))?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Empty value for required field '{}'", field_name));
    }

    Ok(trimmed)
}

/// Parse a required floating-point field
pub fn parse_required_f64(fields: &[&str], index: usize, field_name: &str) -> Result<f64, String> {
    let value_str = get_required_field(fields, index, field_name)?;

    value_str.parse::<f64>().map_err(|e| {
        format!(
            "Invalid number for {}: '{}' ({})",
            field_name, value_str, e
        )
    })
}

/// Parse a required local timestamp field
pub fn parse_required_datetime(
    fields: &[&str],
    index: usize,
    field_name: &str,
    format: &str,
) -> Result<NaiveDateTime, String> {
    let value_str = get_required_field(fields, index, field_name)?;

    NaiveDateTime::parse_from_str(value_str, format).map_err(|e| {
        format!(
            "Invalid timestamp for {}: '{}' (expected '{}': {})",
            field_name, value_str, format, e
        )
    })
}
