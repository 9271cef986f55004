//! Application constants for the SQM processor
//!
//! This module contains the record layout defaults, threshold defaults and
//! the list of known observing sites used throughout the application.

// =============================================================================
// Record Layout
// =============================================================================

/// Field delimiter in SQM `.dat` files
pub const FIELD_DELIMITER: char = ';';

/// Any line containing this character is treated as metadata and skipped
pub const COMMENT_MARKER: char = '#';

/// Local timestamp format with fractional seconds, e.g. `2024-09-30T21:15:03.000`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Zero-based line of the raw text whose last `_` token names the site
pub const SITE_HEADER_LINE: usize = 5;

/// Token separator within the site header line
pub const SITE_NAME_SEPARATOR: char = '_';

/// Current version of the built-in SQM record schema
pub const SQM_SCHEMA_VERSION: u32 = 1;

/// Named field positions of the SQM `.dat` data lines
pub mod fields {
    pub const UTC_TIMESTAMP: &str = "utc_timestamp";
    pub const LOCAL_TIMESTAMP: &str = "local_timestamp";
    pub const TEMPERATURE: &str = "temperature";
    pub const COUNTS: &str = "counts";
    pub const FREQUENCY: &str = "frequency";
    pub const BRIGHTNESS: &str = "brightness";

    /// Fields that must be present in every record schema
    pub const REQUIRED: &[&str] = &[LOCAL_TIMESTAMP, TEMPERATURE, FREQUENCY, BRIGHTNESS];

    /// Column order of the SQM-LE/LU data lines
    pub const SQM_V1_LAYOUT: &[&str] = &[
        UTC_TIMESTAMP,
        LOCAL_TIMESTAMP,
        TEMPERATURE,
        COUNTS,
        FREQUENCY,
        BRIGHTNESS,
    ];
}

// =============================================================================
// Threshold Defaults
// =============================================================================

/// Divisor applied to the mean absolute deviation of the night readings
pub const DEFAULT_MODIFIER: f64 = 1.25;

/// Raw brightness value reported when there is no valid night reading
pub const NO_READING_SENTINEL: f64 = 0.0;

// =============================================================================
// Sites
// =============================================================================

/// SQM stations publishing nightly `.dat` files
pub const KNOWN_PLACES: &[&str] = &[
    "Ameland",
    "Borger",
    "Dwingeloo",
    "Lauwersoog",
    "Noordpolderzijl",
    "Schiermonnikoog",
    "Terschelling",
    "Texel",
    "Vlieland",
];

/// Locator understood as "read the series from standard input"
pub const STDIN_LOCATOR: &str = "-";

// =============================================================================
// Remote Sources
// =============================================================================

/// URL schemes fetched over HTTP rather than read from disk
pub const REMOTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Request timeout for remote data files
pub const HTTP_TIMEOUT_SECS: u64 = 30;
