// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload extraction: isolating a structured-data candidate from free-form
//! assistant output.
//!
//! Assistant replies routinely arrive wrapped in markdown code fences, with
//! or without a language tag, and sometimes with the closing fence missing
//! entirely. Extraction never fails: when no fence pattern matches, the
//! trimmed original text is the candidate.

use std::sync::LazyLock;

use regex::Regex;

/// Full fenced block explicitly tagged as json, with matching close.
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```json\s*\n?(.*?)\n?```$").unwrap());

/// json-tagged fence whose closing fence is missing; everything after the
/// opening fence is the candidate.
static FENCED_JSON_UNCLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```json\s*\n?(.*)$").unwrap());

/// Generic fence with no tag and a matching close. The opening line must be
/// bare backticks, otherwise a language tag would leak into the capture.
static FENCED_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[ \t]*\n(.*?)\n?```$").unwrap());

/// Fence whose first line is some other language tag; the candidate starts
/// after that line.
static FENCED_TAGGED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```.*?\n(.*?)\n?```$").unwrap());

/// Residual backtick runs left over from mismatched fences.
static STRAY_BACKTICKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+").unwrap());

/// A bare language-tag line ("json" / "JSON") at the start of a line.
static BARE_JSON_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(json|JSON)\s*\n?").unwrap());

/// Extract the structured-data candidate from raw assistant output.
///
/// Attempts fence patterns in order of decreasing specificity: an exact
/// json-tagged block wins over a partial one, which wins over untagged
/// fences. When nothing matches, the trimmed original is returned unchanged,
/// so downstream parsing decides whether the text was structured at all.
pub fn extract_payload(raw: &str) -> String {
    let trimmed = raw.trim();

    let candidate = if let Some(caps) = FENCED_JSON.captures(trimmed) {
        caps[1].trim().to_string()
    } else {
        let mut candidate = trimmed.to_string();
        for pattern in [&*FENCED_JSON_UNCLOSED, &*FENCED_PLAIN, &*FENCED_TAGGED] {
            if let Some(caps) = pattern.captures(trimmed) {
                candidate = caps[1].trim().to_string();
                break;
            }
        }
        candidate
    };

    clean_candidate(&candidate)
}

/// Strip leftover fence markers and a leading bare language-tag line.
fn clean_candidate(candidate: &str) -> String {
    let no_ticks = STRAY_BACKTICKS.replace_all(candidate, "");
    let no_tag = BARE_JSON_TAG.replace_all(&no_ticks, "");
    no_tag.trim().to_string()
}
