//! Field quoting repair for PUMAPI response bodies
//!
//! The server quotes string fields but leaves booleans and bare integers
//! unquoted. Quoted fields may legitimately contain commas (system names,
//! room designations), so a response line can only be split safely once
//! every field is quote-delimited. The repair applies a fixed sequence of
//! substitutions to get there:
//!
//! 1. `,false` / `,true` (any case) become `,"False"` / `,"True"`
//! 2. a digit run between two commas is wrapped in quotes
//! 3. a digit run at line start (followed by a comma) is wrapped in quotes
//! 4. a digit run at line end (preceded by a comma) is wrapped in quotes
//!
//! After the repair every field is quote-delimited and lines split cleanly
//! on the three-character separator `","`. The repair is idempotent:
//! re-running it on repaired text changes nothing.

use regex::Regex;
use std::sync::LazyLock;

static BARE_BOOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),(false|true)").unwrap());

static MID_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\d+),").unwrap());

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\d+),").unwrap());

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m),(\d+)(\r?)$").unwrap());

/// Normalize a response body so every field is quote-delimited
pub fn repair_quoting(text: &str) -> String {
    let repaired = BARE_BOOL.replace_all(text, |caps: &regex::Captures| {
        if caps[1].eq_ignore_ascii_case("false") {
            ",\"False\"".to_string()
        } else {
            ",\"True\"".to_string()
        }
    });

    // Two adjacent bare numbers share their separating comma, so a single
    // pass over `,123,` patterns misses every other run. Repeat until
    // stable; the second pass already reaches a fixed point.
    let mut repaired = repaired.into_owned();
    loop {
        let next = MID_NUMBER.replace_all(&repaired, ",\"${1}\",").into_owned();
        if next == repaired {
            break;
        }
        repaired = next;
    }

    let repaired = LEADING_NUMBER.replace_all(&repaired, "\"${1}\",");
    TRAILING_NUMBER
        .replace_all(&repaired, ",\"${1}\"${2}")
        .into_owned()
}

/// Split a repaired line into its fields
///
/// Strips exactly one leading and one trailing quote character, then splits
/// on the `","` separator. Must only be used on lines that went through
/// [`repair_quoting`].
pub fn split_repaired_line(line: &str) -> Vec<String> {
    let line = line.strip_prefix('"').unwrap_or(line);
    let line = line.strip_suffix('"').unwrap_or(line);
    line.split("\",\"").map(str::to_string).collect()
}
