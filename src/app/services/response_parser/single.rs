//! Parsing of two-line (header + data) PUMAPI responses
//!
//! Used for per-entity queries like `getuser` and `getgroup` where the
//! server answers with exactly one header line and one data line.

use tracing::warn;

use super::value::{FieldValue, RawRecord};
use crate::{Error, Result};

/// Parse a response expected to carry one header line and one data line
///
/// Returns `Ok(None)` when the response body is empty or the data line is
/// blank: that is how the server reports "not found", and it must stay
/// distinguishable from a parse failure.
///
/// In graceful mode any structural inconsistency (wrong line count, header
/// and data field counts differing) is logged as a warning and parsing
/// continues with what is there; otherwise it fails with
/// [`Error::MalformedResponse`].
pub fn parse_single_response(text: &str, graceful: bool) -> Result<Option<RawRecord>> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != 2 {
        warn!(
            "Response expected to have exactly two lines, got {}: {:?}",
            lines.len(),
            text
        );
        if !graceful {
            return Err(Error::malformed_response(format!(
                "expected 2 lines, got {}",
                lines.len()
            )));
        }
        if lines.len() < 2 {
            return Ok(None);
        }
    }

    let data = lines[1];
    if data.trim().is_empty() {
        return Ok(None);
    }

    let header: Vec<String> = lines[0].split(',').map(str::to_string).collect();
    let values: Vec<FieldValue> = data.split(',').map(process_value).collect();

    if header.len() != values.len() {
        warn!(
            "Splitting CSV data failed, header has {} fields whereas the data has {} fields",
            header.len(),
            values.len()
        );
        if !graceful {
            return Err(Error::malformed_response(format!(
                "header has {} fields, data has {}",
                header.len(),
                values.len()
            )));
        }
        let minimum = header.len().min(values.len());
        if minimum < header.len() {
            warn!("Discarding header fields: {:?}", &header[minimum..]);
        } else {
            warn!("Discarding data fields: {:?}", &values[minimum..]);
        }
    }

    Ok(Some(RawRecord::from_pairs(header, values)))
}

/// Strip surrounding quotes and coerce boolean literals
///
/// Only the literal lowercase tokens `true` / `false` become booleans;
/// everything else (including bare numbers) stays text. This matches the
/// behavior the per-entity endpoints rely on.
fn process_value(raw: &str) -> FieldValue {
    let stripped = raw.trim_matches('"');
    match stripped {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        _ => FieldValue::Text(stripped.to_string()),
    }
}
