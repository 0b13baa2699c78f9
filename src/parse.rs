//! Line-level parsing of generated concept text
//!
//! Generative output loosely follows a four-section convention: numbered
//! section headers, lettered belief statements, dash-prefixed hypotheses.
//! This module owns the shared tokenizer and extractor that the concept
//! and research-question parsers build on, plus the JSON cleanup helpers
//! for the structured response paths.

use regex::Regex;

/// Keyword prefixes that identify the four sections, in canvas order.
/// A header line must pair the right number with the right keyword
/// ("1. CUSTOMER", "2. Problem and Solution", ...), matched
/// case-insensitively.
const SECTION_KEYWORDS: [&str; 4] = ["customer", "problem", "competitive", "business"];

/// One classified line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// Section header, index 0..=3
    Section(usize),
    /// Lettered belief statement, label stripped
    Item(String),
    /// Dash-prefixed hypothesis, dash stripped
    Hypothesis(String),
    /// Anything else
    Text(String),
}

/// Split raw text into trimmed, non-empty, classified lines.
pub fn tokenize(text: &str) -> Vec<LineToken> {
    let header_re = Regex::new(r"^([1-4])\.\s*(.*)$").unwrap();
    let item_re = Regex::new(r"^[A-Z]\.\s").unwrap();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(caps) = header_re.captures(line) {
                let number: usize = caps[1].parse().unwrap_or(0);
                let rest = caps[2].to_lowercase();
                if number >= 1 && rest.starts_with(SECTION_KEYWORDS[number - 1]) {
                    return LineToken::Section(number - 1);
                }
            }
            if item_re.is_match(line) {
                let stripped = line[2..].trim_start().to_string();
                return LineToken::Item(stripped);
            }
            if let Some(rest) = line.strip_prefix('-') {
                return LineToken::Hypothesis(rest.trim_start().to_string());
            }
            LineToken::Text(line.to_string())
        })
        .collect()
}

/// One extracted belief statement, before callers shape it for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBelief {
    /// Item text with the `<belief>` span removed
    pub base_text: String,
    /// Inner text of the first `<belief>` span, empty when absent
    pub span: String,
    /// Dash-prefixed lines attached to this item, in order
    pub hypotheses: Vec<String>,
}

/// The four sections with their beliefs, plus a count of lettered items
/// that had to be dropped because no section was open yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSections {
    pub sections: [Vec<RawBelief>; 4],
    pub dropped_items: usize,
}

/// Walk the token stream and assemble beliefs under their sections.
///
/// An item is finalized when the next item or section header arrives, or
/// at end of stream. Items seen before any header cannot be placed and
/// are dropped; hypothesis lines with no open item are likewise dropped.
/// This mirrors what the generation format promises rather than
/// validating it: unplaceable lines are absorbed, never an error.
pub fn extract_sections(tokens: &[LineToken]) -> RawSections {
    let span_re = Regex::new(r"<belief>(.*?)</belief>").unwrap();

    let mut sections: [Vec<RawBelief>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    let mut dropped_items = 0usize;
    let mut current_section: Option<usize> = None;
    let mut current_item: Option<RawBelief> = None;

    fn finalize(
        section: Option<usize>,
        item: &mut Option<RawBelief>,
        sections: &mut [Vec<RawBelief>; 4],
    ) {
        if let Some(belief) = item.take() {
            if let Some(idx) = section {
                sections[idx].push(belief);
            }
        }
    }

    for token in tokens {
        match token {
            LineToken::Section(idx) => {
                finalize(current_section, &mut current_item, &mut sections);
                current_section = Some(*idx);
            }
            LineToken::Item(text) => {
                finalize(current_section, &mut current_item, &mut sections);
                if current_section.is_none() {
                    dropped_items += 1;
                    continue;
                }
                let span = span_re
                    .captures(text)
                    .map(|caps| caps[1].trim().to_string())
                    .unwrap_or_default();
                let base_text = span_re.replace_all(text, "").trim().to_string();
                current_item = Some(RawBelief {
                    base_text,
                    span,
                    hypotheses: Vec::new(),
                });
            }
            LineToken::Hypothesis(text) => {
                if let Some(item) = current_item.as_mut() {
                    item.hypotheses.push(text.clone());
                }
            }
            LineToken::Text(_) => {}
        }
    }
    finalize(current_section, &mut current_item, &mut sections);

    RawSections {
        sections,
        dropped_items,
    }
}

/// Find the first line containing `label` (case-insensitive) and return
/// the labeled value: the remainder of that line if non-empty, otherwise
/// the following line. Markdown emphasis is stripped either way.
pub fn extract_labeled_line(text: &str, label: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let label_re = Regex::new(&format!("(?i){}", regex::escape(label)))
        .unwrap_or_else(|_| Regex::new("$^").unwrap());

    for (i, line) in lines.iter().enumerate() {
        if let Some(found) = label_re.find(line) {
            let remainder = line[found.end()..].trim();
            if !remainder.is_empty() {
                return strip_emphasis(remainder);
            }
            if let Some(next) = lines.get(i + 1) {
                return strip_emphasis(next);
            }
            return String::new();
        }
    }
    String::new()
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Strip markdown code fences from a response
pub fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = if trimmed.starts_with("```json") {
        trimmed.strip_prefix("```json").unwrap_or(trimmed)
    } else if trimmed.starts_with("```") {
        trimmed.strip_prefix("```").unwrap_or(trimmed)
    } else {
        trimmed
    };
    let clean = if clean.ends_with("```") {
        clean.strip_suffix("```").unwrap_or(clean)
    } else {
        clean
    };
    clean.trim()
}

/// Extract a JSON fragment between matching delimiters
pub fn extract_json_fragment(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start <= end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Fix common JSON issues in generated responses: trailing commas, smart
/// quotes, stray control characters.
pub fn fix_json_issues(json: &str) -> String {
    let mut fixed = json.to_string();

    fixed = fixed.replace(",]", "]");
    fixed = fixed.replace(",}", "}");

    fixed = fixed.replace('\u{201C}', "\"");
    fixed = fixed.replace('\u{201D}', "\"");
    fixed = fixed.replace('\u{2018}', "'");
    fixed = fixed.replace('\u{2019}', "'");

    fixed
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Extract the outermost JSON object from a response, handling markdown
/// fences and surrounding prose.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let clean = strip_markdown_fences(response);
    extract_json_fragment(clean, '{', '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_classifies_in_priority_order() {
        let text = "1. CUSTOMER\nA. First belief\n- a hypothesis\nplain trailing text\n";
        let tokens = tokenize(text);
        assert_eq!(
            tokens,
            vec![
                LineToken::Section(0),
                LineToken::Item("First belief".to_string()),
                LineToken::Hypothesis("a hypothesis".to_string()),
                LineToken::Text("plain trailing text".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_requires_number_keyword_pair() {
        // "2. CUSTOMER" pairs the wrong number with the keyword
        let tokens = tokenize("2. CUSTOMER\n1. Customer\n");
        assert_eq!(
            tokens,
            vec![
                LineToken::Text("2. CUSTOMER".to_string()),
                LineToken::Section(0),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n   \n").is_empty());
    }

    #[test]
    fn test_extract_sections_finalize_on_next() {
        let text = "\
1. Customer
A. belief one
- hyp one
- hyp two
B. belief two
2. Problem and Solution
A. belief three
- hyp three
";
        let raw = extract_sections(&tokenize(text));
        assert_eq!(raw.sections[0].len(), 2);
        assert_eq!(raw.sections[0][0].hypotheses, vec!["hyp one", "hyp two"]);
        assert!(raw.sections[0][1].hypotheses.is_empty());
        assert_eq!(raw.sections[1][0].hypotheses, vec!["hyp three"]);
        assert_eq!(raw.dropped_items, 0);
    }

    #[test]
    fn test_extract_sections_drops_orphan_items() {
        let raw = extract_sections(&tokenize("A. no section yet\n1. CUSTOMER\nB. placed\n"));
        assert_eq!(raw.dropped_items, 1);
        assert_eq!(raw.sections[0].len(), 1);
        assert_eq!(raw.sections[0][0].base_text, "placed");
    }

    #[test]
    fn test_extract_sections_splits_belief_span() {
        let text = "1. CUSTOMER\nA. Our first customer will be <belief>busy parents</belief>\n";
        let raw = extract_sections(&tokenize(text));
        let belief = &raw.sections[0][0];
        assert_eq!(belief.base_text, "Our first customer will be");
        assert_eq!(belief.span, "busy parents");
    }

    #[test]
    fn test_extract_labeled_line_same_line() {
        let summary = extract_labeled_line(
            "Concept Summary: **A meal-kit service.**\n\n1. CUSTOMER\n",
            "concept summary:",
        );
        assert_eq!(summary, "A meal-kit service.");
    }

    #[test]
    fn test_extract_labeled_line_next_line() {
        let summary = extract_labeled_line("Concept Summary:\nOn the next line\n", "concept summary:");
        assert_eq!(summary, "On the next line");
    }

    #[test]
    fn test_extract_labeled_line_missing() {
        assert_eq!(extract_labeled_line("no label here", "concept summary:"), "");
    }

    #[test]
    fn test_fix_json_issues() {
        let fixed = fix_json_issues("{\u{201C}key\u{201D}: [1, 2,]}");
        assert_eq!(fixed, "{\"key\": [1, 2]}");
    }

    #[test]
    fn test_extract_json_object_with_fences() {
        let response = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(response), Some("{\"a\": 1}"));
    }
}
