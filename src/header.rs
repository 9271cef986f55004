//! SQM file header inspection.
//!
//! Extracts informational metadata (the site name) from the comment block
//! at the top of a `.dat` file. Nothing here is required by the numeric
//! pipeline, so lookup failures are logged and reported as `None`.

use crate::constants::SITE_NAME_SEPARATOR;
use crate::schema::RecordSchema;
use tracing::{debug, warn};

/// Metadata read from the header block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesHeader {
    pub site_name: Option<String>,
    /// Number of comment lines in the file
    pub comment_lines: usize,
}

impl SeriesHeader {
    /// Inspect the raw text of a data file
    pub fn parse(content: &str, schema: &RecordSchema) -> Self {
        let comment_lines = content
            .lines()
            .filter(|line| line.contains(schema.comment_marker))
            .count();

        let site_name = content
            .lines()
            .nth(schema.site_header_line)
            .and_then(extract_site_name);

        match &site_name {
            Some(name) => debug!("Site name from header: {}", name),
            None => warn!(
                "No site name found on header line {}",
                schema.site_header_line + 1
            ),
        }

        Self {
            site_name,
            comment_lines,
        }
    }
}

/// Last `_`-separated token of a header line
fn extract_site_name(line: &str) -> Option<String> {
    let token = line
        .trim_end_matches('\r')
        .rsplit(SITE_NAME_SEPARATOR)
        .next()?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "# Light Pollution Monitoring Data Format 1.0\n\
# URL: http://www.darksky.org/measurements\n\
# Number of header lines: 35\n\
# This data is released under the following license: ODbL 1.0\n\
# Device type: SQM-LU\n\
# Instrument ID: SQM_Noordpolderzijl\n\
# Data supplier: Rijksuniversiteit Groningen\n";

    #[test]
    fn test_extract_site_name() {
        assert_eq!(
            extract_site_name("# Instrument ID: SQM_Noordpolderzijl"),
            Some("Noordpolderzijl".to_string())
        );
        assert_eq!(
            extract_site_name("# Location name: Texel\r"),
            Some("# Location name: Texel".to_string())
        );
        assert_eq!(extract_site_name("# Instrument ID: SQM_"), None);
    }

    #[test]
    fn test_header_parse() {
        let header = SeriesHeader::parse(HEADER, &RecordSchema::sqm_v1());
        assert_eq!(header.site_name, Some("Noordpolderzijl".to_string()));
        assert_eq!(header.comment_lines, 7);
    }

    #[test]
    fn test_short_header_has_no_site() {
        let header = SeriesHeader::parse("# one\n# two\n", &RecordSchema::sqm_v1());
        assert_eq!(header.site_name, None);
        assert_eq!(header.comment_lines, 2);
    }
}
