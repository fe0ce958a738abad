//! Parsing of multi-record (header + N data lines) PUMAPI responses
//!
//! Used for collection queries like `getsystems`, `getuserexp` and
//! `getrunningsheet`. Responses whose fields may contain embedded commas
//! (systems, running sheets) must go through quoting repair first; simple
//! comma-only responses (user experience) are split directly.

use tracing::{debug, warn};

use super::quoting::{repair_quoting, split_repaired_line};
use super::value::{FieldValue, RawRecord};
use crate::{Error, Result};

/// Parse a response carrying one header line and zero or more data lines
///
/// Records are returned in response order; a day with no bookings or a
/// filter matching nothing yields an empty vector, not an error.
///
/// `needs_quote_repair` selects the splitting strategy: repaired responses
/// are split on the `","` separator, plain responses on bare commas.
/// In graceful mode field-count mismatches are logged and each row is
/// zipped to the shorter of header and row; in strict mode they fail with
/// [`Error::MalformedResponse`].
pub fn parse_multi_response(
    text: &str,
    needs_quote_repair: bool,
    graceful: bool,
) -> Result<Vec<RawRecord>> {
    let body;
    let lines: Vec<&str> = if needs_quote_repair {
        body = repair_quoting(text);
        body.lines().collect()
    } else {
        text.lines().collect()
    };

    if lines.len() < 2 {
        warn!(
            "Response expected to have two or more lines, got {}: {:?}",
            lines.len(),
            text
        );
        if !graceful && !text.trim().is_empty() {
            return Err(Error::malformed_response(format!(
                "expected header and data lines, got {} line(s)",
                lines.len()
            )));
        }
        return Ok(Vec::new());
    }

    let header = split_fields(lines[0], needs_quote_repair);
    let mut records = Vec::new();
    let mut fields_min = header.len();
    let mut fields_max = header.len();

    for line in &lines[1..] {
        if line.trim().is_empty() {
            debug!("Skipping empty data line");
            continue;
        }

        let values: Vec<FieldValue> = split_fields(line, needs_quote_repair)
            .into_iter()
            .map(|field| coerce_value(&field))
            .collect();
        fields_min = fields_min.min(values.len());
        fields_max = fields_max.max(values.len());

        if header.len() != values.len() {
            warn!(
                "Splitting CSV data failed, header has {} fields whereas data has {} fields",
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

        records.push(RawRecord::from_pairs(header.clone(), values));
    }

    if fields_min != fields_max {
        warn!("Inconsistent data detected, not all records have the same number of fields");
    }

    Ok(records)
}

/// Split one line into raw field strings
///
/// Repaired lines are split on the `","` separator. Lines without any such
/// separator (the server leaves header names unquoted even when it quotes
/// the data below them) fall back to a plain comma split.
fn split_fields(line: &str, repaired: bool) -> Vec<String> {
    if repaired && line.contains("\",\"") {
        split_repaired_line(line)
    } else {
        line.split(',').map(str::to_string).collect()
    }
}

/// Coerce a raw field into a loosely typed value
///
/// Boolean literals (any case, covering both the server's `true` and the
/// repair step's `True`) become booleans, the `n/a` marker becomes missing,
/// numeric-looking tokens become floats, everything else stays text.
fn coerce_value(raw: &str) -> FieldValue {
    let stripped = raw.trim_matches('"');
    if stripped.eq_ignore_ascii_case("true") {
        return FieldValue::Bool(true);
    }
    if stripped.eq_ignore_ascii_case("false") {
        return FieldValue::Bool(false);
    }
    if stripped == "n/a" {
        return FieldValue::Missing;
    }
    if let Ok(number) = stripped.parse::<f64>() {
        return FieldValue::Number(number);
    }
    FieldValue::Text(stripped.to_string())
}
