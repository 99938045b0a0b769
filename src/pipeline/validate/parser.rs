//! Tolerant parser for the batch validation response.
//!
//! The expected grammar is one `[RESULT n] ... [/RESULT n]` block per row,
//! containing a `USEFUL:` line and a `TEXT:` line. Real model output drifts:
//! marker case varies, whitespace varies, whole blocks go missing. The
//! grammar outcome is explicit — `WellFormed`, `Partial`, `Unparseable` —
//! and the merge policy for missing rows lives in the batch validator, not
//! here.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Marker meaning "no correction, keep the original text".
pub const INVARIANT_MARKER: &str = "INVARIATO";

/// How much of a batch response the grammar recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every expected row index had a well-formed block.
    WellFormed,
    /// Some expected rows were missing or malformed.
    Partial,
    /// No block could be recovered at all.
    Unparseable,
}

/// One successfully parsed result block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub useful: bool,
    /// Corrected text; `None` means the invariant marker (or an absent
    /// TEXT line) — keep the original.
    pub text: Option<String>,
}

/// Parsed batch response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBatch {
    pub outcome: ParseOutcome,
    pub rows: HashMap<usize, ParsedRow>,
}

static RESULT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\[\s*result\s+(\d+)\s*\](.*?)\[\s*/\s*result\s+(\d+)\s*\]").unwrap()
});

static USEFUL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)useful\s*:\s*(yes|no)").unwrap());

static TEXT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)text\s*:\s*(.*)\z").unwrap());

/// Scan a response for result blocks belonging to `expected` row indices.
///
/// Blocks with mismatched open/close indices, an unparseable index, or no
/// `USEFUL:` line are skipped — the corresponding rows simply stay absent
/// from the map.
pub fn parse_batch_response(response: &str, expected: &[usize]) -> ParsedBatch {
    let mut rows = HashMap::new();

    for captures in RESULT_BLOCK.captures_iter(response) {
        let open = captures.get(1).map(|m| m.as_str());
        let close = captures.get(3).map(|m| m.as_str());
        if open != close {
            continue;
        }
        let Some(index) = open.and_then(|n| n.parse::<usize>().ok()) else {
            continue;
        };
        let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        let Some(useful_caps) = USEFUL_LINE.captures(body) else {
            continue;
        };
        let useful = useful_caps[1].eq_ignore_ascii_case("yes");

        let text = TEXT_LINE
            .captures(body)
            .map(|c| c[1].trim().to_string())
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(INVARIANT_MARKER));

        rows.insert(index, ParsedRow { useful, text });
    }

    let outcome = if rows.is_empty() && !expected.is_empty() {
        ParseOutcome::Unparseable
    } else if expected.iter().all(|i| rows.contains_key(i)) {
        ParseOutcome::WellFormed
    } else {
        ParseOutcome::Partial
    };

    ParsedBatch { outcome, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_multi_row_response() {
        let response = "\
[RESULT 3]\nUSEFUL: YES\nTEXT: INVARIATO\n[/RESULT 3]\n\n\
[RESULT 7]\nUSEFUL: NO\nTEXT: INVARIATO\n[/RESULT 7]";
        let parsed = parse_batch_response(response, &[3, 7]);

        assert_eq!(parsed.outcome, ParseOutcome::WellFormed);
        assert_eq!(parsed.rows[&3], ParsedRow { useful: true, text: None });
        assert_eq!(parsed.rows[&7], ParsedRow { useful: false, text: None });
    }

    #[test]
    fn corrected_text_is_captured() {
        let response =
            "[RESULT 2]\nUSEFUL: YES\nTEXT: chiamare [FAKE_PHONE] per assistenza\n[/RESULT 2]";
        let parsed = parse_batch_response(response, &[2]);

        assert_eq!(
            parsed.rows[&2].text.as_deref(),
            Some("chiamare [FAKE_PHONE] per assistenza")
        );
    }

    #[test]
    fn markers_match_case_insensitively_with_loose_whitespace() {
        let response = "[ result 5 ]  useful :  yes   Text:   invariato  [ / result 5 ]";
        let parsed = parse_batch_response(response, &[5]);

        assert_eq!(parsed.outcome, ParseOutcome::WellFormed);
        assert_eq!(parsed.rows[&5], ParsedRow { useful: true, text: None });
    }

    #[test]
    fn missing_rows_make_the_parse_partial() {
        let response = "[RESULT 7]\nUSEFUL: YES\nTEXT: INVARIATO\n[/RESULT 7]";
        let parsed = parse_batch_response(response, &[3, 7, 9]);

        assert_eq!(parsed.outcome, ParseOutcome::Partial);
        assert!(parsed.rows.contains_key(&7));
        assert!(!parsed.rows.contains_key(&3));
        assert!(!parsed.rows.contains_key(&9));
    }

    #[test]
    fn garbage_is_unparseable() {
        let parsed = parse_batch_response("Sorry, I cannot help with that.", &[0, 1]);
        assert_eq!(parsed.outcome, ParseOutcome::Unparseable);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn mismatched_block_indices_are_skipped() {
        let response = "[RESULT 1]\nUSEFUL: YES\nTEXT: INVARIATO\n[/RESULT 2]";
        let parsed = parse_batch_response(response, &[1]);

        assert_eq!(parsed.outcome, ParseOutcome::Unparseable);
    }

    #[test]
    fn block_without_useful_line_is_skipped() {
        let response = "[RESULT 1]\nTEXT: qualcosa\n[/RESULT 1]";
        let parsed = parse_batch_response(response, &[1]);

        assert!(!parsed.rows.contains_key(&1));
    }

    #[test]
    fn surrounding_chatter_is_ignored() {
        let response = "\
Ecco i risultati richiesti:\n\n\
[RESULT 0]\nUSEFUL: NO\nTEXT: INVARIATO\n[/RESULT 0]\n\n\
Fammi sapere se serve altro!";
        let parsed = parse_batch_response(response, &[0]);

        assert_eq!(parsed.outcome, ParseOutcome::WellFormed);
        assert!(!parsed.rows[&0].useful);
    }

    #[test]
    fn empty_expected_set_is_well_formed() {
        let parsed = parse_batch_response("", &[]);
        assert_eq!(parsed.outcome, ParseOutcome::WellFormed);
    }
}
