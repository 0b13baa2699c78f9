//! Concept overview parsing
//!
//! A concept overview is the generated description of a product idea:
//! an optional "Concept Summary:" line followed by four fixed sections
//! (customer, problem/solution, competitive advantage, business model),
//! each holding lettered belief statements. Generation formatting is
//! unreliable, so parsing is best-effort: whatever matches the
//! convention is kept, everything else is absorbed, and the outcome is
//! tagged so callers can tell a clean parse from a degraded one.

use crate::parse;
use serde::{Deserialize, Serialize};

/// One atomic claim inside a concept section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeliefStatement {
    pub base_text: String,
    /// Inner text of the `<belief>` span, empty when the item carried none
    #[serde(default)]
    pub hypothesis: String,
}

/// The four concept sections, in canvas order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConceptSection {
    Customer,
    ProblemSolution,
    CompetitiveAdvantage,
    BusinessModel,
}

impl ConceptSection {
    pub const ALL: [ConceptSection; 4] = [
        ConceptSection::Customer,
        ConceptSection::ProblemSolution,
        ConceptSection::CompetitiveAdvantage,
        ConceptSection::BusinessModel,
    ];

    /// Display title used on the research canvas
    pub fn title(&self) -> &'static str {
        match self {
            ConceptSection::Customer => "Ideal Customer",
            ConceptSection::ProblemSolution => "Problem & Solution",
            ConceptSection::CompetitiveAdvantage => "Competitive Advantage",
            ConceptSection::BusinessModel => "Business Model",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ConceptSection::Customer => 0,
            ConceptSection::ProblemSolution => 1,
            ConceptSection::CompetitiveAdvantage => 2,
            ConceptSection::BusinessModel => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<ConceptSection> {
        Self::ALL.get(index).copied()
    }
}

/// A parsed concept overview. The four lists always exist; order within
/// each list follows the letter labels in the source text and is the
/// join key for hypothesis and research correlation downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConcept {
    pub concept_summary: String,
    pub customer: Vec<BeliefStatement>,
    pub problem_solution: Vec<BeliefStatement>,
    pub competitive_advantage: Vec<BeliefStatement>,
    pub business_model: Vec<BeliefStatement>,
}

impl ParsedConcept {
    pub fn section(&self, section: ConceptSection) -> &[BeliefStatement] {
        match section {
            ConceptSection::Customer => &self.customer,
            ConceptSection::ProblemSolution => &self.problem_solution,
            ConceptSection::CompetitiveAdvantage => &self.competitive_advantage,
            ConceptSection::BusinessModel => &self.business_model,
        }
    }

    fn section_mut(&mut self, index: usize) -> &mut Vec<BeliefStatement> {
        match index {
            0 => &mut self.customer,
            1 => &mut self.problem_solution,
            2 => &mut self.competitive_advantage,
            _ => &mut self.business_model,
        }
    }

    /// True when nothing at all was recovered from the input.
    pub fn is_empty(&self) -> bool {
        self.concept_summary.is_empty()
            && ConceptSection::ALL
                .iter()
                .all(|s| self.section(*s).is_empty())
    }

    pub fn belief_count(&self) -> usize {
        ConceptSection::ALL
            .iter()
            .map(|s| self.section(*s).len())
            .sum()
    }
}

/// How completely the input matched the expected format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFidelity {
    /// Everything recognizable was placed
    Complete,
    /// Some content had to be dropped, or non-empty input yielded nothing
    Partial,
}

/// Result of a concept parse. Never an error: malformed input degrades
/// to a partial or empty record, and callers must treat every field as
/// possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptOutcome {
    pub concept: ParsedConcept,
    pub fidelity: ParseFidelity,
}

impl ConceptOutcome {
    pub fn is_partial(&self) -> bool {
        self.fidelity == ParseFidelity::Partial
    }
}

/// Parse a generated concept overview into its summary and four belief
/// sections.
///
/// The summary scan runs over the full line list before section
/// processing and does not consume lines from it.
pub fn parse_concept_overview(text: &str) -> ConceptOutcome {
    let concept_summary = parse::extract_labeled_line(text, "concept summary:");

    let tokens = parse::tokenize(text);
    let raw = parse::extract_sections(&tokens);

    let mut concept = ParsedConcept {
        concept_summary,
        ..ParsedConcept::default()
    };
    for (index, beliefs) in raw.sections.iter().enumerate() {
        let target = concept.section_mut(index);
        for belief in beliefs {
            target.push(BeliefStatement {
                base_text: belief.base_text.clone(),
                hypothesis: belief.span.clone(),
            });
        }
    }

    let fidelity = if raw.dropped_items > 0 || (!tokens.is_empty() && concept.is_empty()) {
        ParseFidelity::Partial
    } else {
        ParseFidelity::Complete
    };

    ConceptOutcome { concept, fidelity }
}

/// Render a parsed concept back into the canonical overview text. Used
/// for display and to feed downstream prompts; re-parsing the output of
/// a well-formed parse yields an equal structure.
pub fn render_concept_overview(concept: &ParsedConcept) -> String {
    let headers = [
        "1. CUSTOMER",
        "2. PROBLEM AND SOLUTION",
        "3. COMPETITIVE ADVANTAGE",
        "4. BUSINESS MODEL",
    ];

    let mut out = String::new();
    if !concept.concept_summary.is_empty() {
        out.push_str(&format!("Concept Summary: {}\n\n", concept.concept_summary));
    }
    for (section, header) in ConceptSection::ALL.iter().zip(headers) {
        out.push_str(header);
        out.push('\n');
        for (i, belief) in concept.section(*section).iter().enumerate() {
            let label = (b'A' + (i % 26) as u8) as char;
            if belief.hypothesis.is_empty() {
                out.push_str(&format!("{}. {}\n", label, belief.base_text));
            } else {
                out.push_str(&format!(
                    "{}. {} <belief>{}</belief>\n",
                    label, belief.base_text, belief.hypothesis
                ));
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
