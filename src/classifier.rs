use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::answer::{Answer, ListItem};

/// Does the text contain a list marker (digits-dot, `-`, or `*` at a line
/// start, followed by whitespace and content) anywhere?
static LIST_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)(?:\d+\.|-|\*)\s+.+").unwrap());

/// A single list marker: optional captured number, then the marker
/// whitespace. Item bodies are sliced between consecutive marker matches.
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)(?:(\d+)\.|-|\*)(\s+)").unwrap());

/// `"<short label>: <rest>"` split inside an item body. The second capture
/// stops at a newline, so content after a newline following the colon line
/// is dropped from the item; that is deliberate.
static KEY_TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:]+):(.*)").unwrap());

/// First/second/third narrative without explicit markers. Each ordinal may
/// be followed by is/are/being/`:` or plain whitespace; each captured
/// segment is the run of non-period characters after it.
static ORDINAL_NARRATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:The\s+)?(?:first|1st)(?:\s+is|\s+are|\s+being|:|\s+)\s+([^.]+).*?(?:The\s+)?(?:second|2nd)(?:\s+is|\s+are|\s+being|:|\s+)\s+([^.]+).*?(?:The\s+)?(?:third|3rd)(?:\s+is|\s+are|\s+being|:|\s+)\s+([^.]+)",
    )
    .unwrap()
});

/// Cut point for the implicit-list summary: the first period introducing
/// the narrative.
static SUMMARY_CUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.\s+The\s+(?:first|second|third)").unwrap());

/// Classify a raw answer string into its display structure.
///
/// Recognizers run in a fixed priority order and the first match wins;
/// list-shaped text always beats the paragraph split even when both apply.
/// The plain-text fallback makes the function total over any input.
pub fn classify(answer: &str) -> Answer {
    if LIST_PROBE.is_match(answer) {
        let items = extract_list_items(answer);
        debug!("answer classified as list ({} items)", items.len());
        return Answer::List { items };
    }

    if let Some(caps) = ORDINAL_NARRATIVE.captures(answer) {
        debug!("answer classified as implicit first/second/third list");
        let items = (1..=3)
            .map(|i| ListItem {
                ordinal: Some(i.to_string()),
                key_term: None,
                content: caps[i].trim().to_string(),
            })
            .collect();
        return Answer::ImplicitList {
            items,
            summary: summarize(answer),
        };
    }

    let paragraphs = split_paragraphs(answer);
    if paragraphs.len() > 1 {
        debug!("answer classified as {} paragraphs", paragraphs.len());
        return Answer::Paragraphs { paragraphs };
    }

    Answer::PlainText {
        content: answer.to_string(),
    }
}

/// Extract all list items from text known to contain at least one marker.
///
/// Each body runs from the end of its marker to the start of the next
/// marker match (whose leading newline is excluded) or end of input, so
/// bodies may span embedded newlines without dropping items.
fn extract_list_items(text: &str) -> Vec<ListItem> {
    let marks: Vec<regex::Captures> = LIST_MARKER.captures_iter(text).collect();
    let mut items = Vec::new();

    for (i, caps) in marks.iter().enumerate() {
        let marker = caps.get(0).expect("match 0 always present");
        let body_start = marker.end();
        let body_end = match marks.get(i + 1) {
            Some(next) => next.get(0).expect("match 0 always present").start(),
            None => text.len(),
        };

        // A marker with nothing after it is not an item, unless its
        // whitespace run was long enough to donate a character to the body.
        if body_start == body_end && caps[2].len() < 2 {
            continue;
        }

        let ordinal = caps.get(1).map(|m| m.as_str().to_string());
        let body = text[body_start..body_end].trim();

        match KEY_TERM.captures(body) {
            Some(split) => items.push(ListItem {
                ordinal,
                key_term: Some(split[1].trim().to_string()),
                content: split[2].trim().to_string(),
            }),
            None => items.push(ListItem {
                ordinal,
                key_term: None,
                content: body.to_string(),
            }),
        }
    }

    items
}

/// Text before the first ". The first/second/third", trimmed, with a
/// trailing period restored.
fn summarize(answer: &str) -> String {
    let head = match SUMMARY_CUT.find(answer) {
        Some(m) => &answer[..m.start()],
        None => answer,
    };
    format!("{}.", head.trim())
}

/// Split on a period whose trailing whitespace reaches a newline, or on a
/// run of two or more newlines. The period and the newline run are
/// consumed; whitespace after a splitting period stays with the next
/// segment. Whitespace-only segments are dropped, the rest trimmed.
fn split_paragraphs(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'.' && whitespace_reaches_newline(&text[i + 1..]) {
            push_segment(&mut paragraphs, &text[start..i]);
            start = i + 1;
            i += 1;
        } else if bytes[i] == b'\n' && bytes.get(i + 1) == Some(&b'\n') {
            push_segment(&mut paragraphs, &text[start..i]);
            let mut j = i;
            while j < bytes.len() && bytes[j] == b'\n' {
                j += 1;
            }
            start = j;
            i = j;
        } else {
            i += 1;
        }
    }

    push_segment(&mut paragraphs, &text[start..]);
    paragraphs
}

/// True when the leading whitespace run of `rest` contains a newline
/// before any non-whitespace character.
fn whitespace_reaches_newline(rest: &str) -> bool {
    for ch in rest.chars() {
        if ch == '\n' {
            return true;
        }
        if !ch.is_whitespace() {
            return false;
        }
    }
    false
}

fn push_segment(paragraphs: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(ordinal: Option<&str>, key_term: Option<&str>, content: &str) -> ListItem {
        ListItem {
            ordinal: ordinal.map(str::to_string),
            key_term: key_term.map(str::to_string),
            content: content.to_string(),
        }
    }

    #[test]
    fn numbered_list_with_key_terms() {
        assert_eq!(
            classify("1. Speed: it is fast\n2. Cost: it is cheap"),
            Answer::List {
                items: vec![
                    item(Some("1"), Some("Speed"), "it is fast"),
                    item(Some("2"), Some("Cost"), "it is cheap"),
                ]
            }
        );
    }

    #[test]
    fn bulleted_list_has_no_ordinals() {
        assert_eq!(
            classify("- apples\n- oranges"),
            Answer::List {
                items: vec![item(None, None, "apples"), item(None, None, "oranges")]
            }
        );
    }

    #[test]
    fn list_beats_paragraph_split() {
        // Satisfies both the marker pattern and the paragraph split, so the
        // priority order must pick the list.
        let result = classify("1. First item\n\nSecond para.");
        assert!(matches!(result, Answer::List { .. }));
    }

    #[test]
    fn item_body_spans_embedded_newlines() {
        assert_eq!(
            classify("1. alpha\nstill alpha\n2. beta"),
            Answer::List {
                items: vec![
                    item(Some("1"), None, "alpha\nstill alpha"),
                    item(Some("2"), None, "beta"),
                ]
            }
        );
    }

    #[test]
    fn trailing_bare_marker_is_not_an_item() {
        assert_eq!(
            classify("1. alpha\n- "),
            Answer::List {
                items: vec![item(Some("1"), None, "alpha")]
            }
        );
    }

    #[test]
    fn key_term_content_stops_at_newline() {
        // The split regex's second capture ends at the first newline, so
        // the continuation line disappears from the item content.
        assert_eq!(
            classify("1. Speed: very fast\nnote continues"),
            Answer::List {
                items: vec![item(Some("1"), Some("Speed"), "very fast")]
            }
        );
    }

    #[test]
    fn decimal_at_line_start_is_a_false_positive_list() {
        // "<digits>. " at a line start matches the marker pattern even in
        // prose; preserved behavior.
        let result = classify("3. 14 are the first digits of pi");
        assert_eq!(
            result,
            Answer::List {
                items: vec![item(Some("3"), None, "14 are the first digits of pi")]
            }
        );
    }

    #[test]
    fn implicit_first_second_third() {
        assert_eq!(
            classify(
                "Three things matter. The first is speed. The second is cost. The third is quality."
            ),
            Answer::ImplicitList {
                items: vec![
                    item(Some("1"), None, "speed"),
                    item(Some("2"), None, "cost"),
                    item(Some("3"), None, "quality"),
                ],
                summary: "Three things matter.".to_string(),
            }
        );
    }

    #[test]
    fn implicit_list_needs_all_three_ordinals() {
        let result = classify("The first is speed and the second is cost");
        assert!(matches!(result, Answer::PlainText { .. }));
    }

    #[test]
    fn summary_without_cut_point_is_whole_text() {
        let result = classify("First: speed. Second: cost. Third: quality");
        match result {
            Answer::ImplicitList { summary, .. } => {
                assert_eq!(summary, "First: speed. Second: cost. Third: quality.");
            }
            other => panic!("expected implicit list, got {:?}", other),
        }
    }

    #[test]
    fn period_before_newline_splits_paragraphs() {
        assert_eq!(
            classify("It rained today.\nWe stayed inside"),
            Answer::Paragraphs {
                paragraphs: vec![
                    "It rained today".to_string(),
                    "We stayed inside".to_string(),
                ]
            }
        );
    }

    #[test]
    fn blank_line_splits_paragraphs() {
        assert_eq!(
            classify("One block\n\nAnother block"),
            Answer::Paragraphs {
                paragraphs: vec!["One block".to_string(), "Another block".to_string()]
            }
        );
    }

    #[test]
    fn single_segment_is_plain_text() {
        assert_eq!(
            classify("Just a simple sentence with no structure"),
            Answer::PlainText {
                content: "Just a simple sentence with no structure".to_string()
            }
        );
    }

    #[test]
    fn trailing_period_newline_does_not_split() {
        // The split leaves only one non-empty segment, so the original
        // untrimmed text falls through to plain text.
        assert_eq!(
            classify("All done.\n"),
            Answer::PlainText {
                content: "All done.\n".to_string()
            }
        );
    }

    #[test]
    fn empty_input_is_plain_text() {
        assert_eq!(
            classify(""),
            Answer::PlainText {
                content: String::new()
            }
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "1. Speed: it is fast\n2. Cost: it is cheap";
        assert_eq!(classify(text), classify(text));
    }
}
