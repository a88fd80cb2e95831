// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload repair: best-effort syntactic normalization of near-valid JSON,
//! and the parse-or-fallback decision procedure composing extraction and
//! repair.
//!
//! Repair is all-or-nothing: a candidate that still fails to parse after
//! normalization is discarded and the caller falls back to the original raw
//! text. A half-fixed string is never surfaced.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extract::extract_payload;

/// Trailing separator immediately before a closing object marker.
static TRAILING_COMMA_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\}").unwrap());

/// Trailing separator immediately before a closing array marker.
static TRAILING_COMMA_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\]").unwrap());

/// Single-quoted object key.
static SINGLE_QUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)':").unwrap());

/// Single-quoted scalar value.
static SINGLE_QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*'([^']*)'").unwrap());

/// Single-line comment through to its newline.
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.*?\n").unwrap());

/// Block comment, possibly spanning lines.
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Apply the bounded sequence of syntactic normalizations to a candidate
/// that failed to parse.
///
/// All transformations run unconditionally; the caller re-validates by
/// parsing the result.
pub fn repair_payload(candidate: &str) -> String {
    let repaired = TRAILING_COMMA_OBJECT.replace_all(candidate, "}");
    let repaired = TRAILING_COMMA_ARRAY.replace_all(&repaired, "]");
    let repaired = SINGLE_QUOTED_KEY.replace_all(&repaired, "\"$1\":");
    let repaired = SINGLE_QUOTED_VALUE.replace_all(&repaired, ": \"$1\"");
    let repaired = LINE_COMMENT.replace_all(&repaired, "\n");
    let repaired = BLOCK_COMMENT.replace_all(&repaired, "");
    repaired.into_owned()
}

/// Outcome of the extraction/repair pipeline over one raw output.
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveredPayload {
    /// A valid structured payload was recovered.
    Parsed(serde_json::Value),
    /// Neither extraction nor repair produced parseable structured data;
    /// the raw output must be passed through untouched.
    Unparseable,
}

/// Run the full recovery procedure: extract, parse, repair, re-parse.
///
/// This replaces nested try/parse error handling with a single tagged
/// result. `Unparseable` means the caller returns the original raw text
/// verbatim -- never the cleaned or half-repaired candidate.
pub fn recover_payload(raw: &str) -> RecoveredPayload {
    let candidate = extract_payload(raw);

    if let Ok(value) = serde_json::from_str(&candidate) {
        return RecoveredPayload::Parsed(value);
    }

    let repaired = repair_payload(&candidate);
    match serde_json::from_str(&repaired) {
        Ok(value) => RecoveredPayload::Parsed(value),
        Err(e) => {
            debug!(error = %e, "payload unrecoverable, falling back to raw text");
            RecoveredPayload::Unparseable
        }
    }
}
