//! Research question parsing and key-risk bookkeeping
//!
//! Generated research questions follow the same four-section, lettered
//! convention as concept overviews, with dash-prefixed hypotheses under
//! each belief. The four sections always exist in the result, in fixed
//! order with fixed titles, so the UI can correlate them positionally
//! with the concept sections.

use crate::parse;
use serde::{Deserialize, Serialize};

/// Fixed research-category titles, in section order. These strings are
/// also the `category` values stamped onto flattened key risks, and the
/// exact-match keys used when grouping risks back into sections.
pub const RESEARCH_CATEGORIES: [&str; 4] = [
    "Customer Research",
    "Problem and Solution Research",
    "Competitive Advantage Research",
    "Business Model Research",
];

/// Confidence level attached to a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::Medium
    }
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }

    /// Lenient conversion from generated text; anything unrecognized
    /// falls back to Medium.
    pub fn from_str_lenient(value: &str) -> Confidence {
        match value.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "low" => Confidence::Low,
            _ => Confidence::Medium,
        }
    }
}

/// How parsed hypotheses get their initial confidence. The generation
/// step does not emit confidence levels, so the caller picks a policy:
/// a fixed default in production, or a deterministic cycle through the
/// three levels where the UI wants visual variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidencePolicy {
    Fixed(Confidence),
    Cycling,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy::Fixed(Confidence::Medium)
    }
}

impl ConfidencePolicy {
    fn assign(&self, ordinal: usize) -> Confidence {
        match self {
            ConfidencePolicy::Fixed(level) => *level,
            ConfidencePolicy::Cycling => {
                const LEVELS: [Confidence; 3] =
                    [Confidence::High, Confidence::Medium, Confidence::Low];
                LEVELS[ordinal % LEVELS.len()]
            }
        }
    }
}

/// One testable sub-claim under a belief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub statement: String,
    pub confidence: Confidence,
}

/// A belief with its hypotheses, as displayed in one research section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBelief {
    pub belief: String,
    pub hypotheses: Vec<Hypothesis>,
}

/// One of the four fixed research sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSection {
    pub title: String,
    pub beliefs: Vec<QuestionBelief>,
}

/// Parse generated research questions into the four fixed sections.
///
/// Always returns exactly four sections with the fixed titles; sections
/// the input never mentions stay empty. Belief order within a section
/// follows the source text.
pub fn parse_research_questions(text: &str, policy: ConfidencePolicy) -> Vec<ResearchSection> {
    let raw = parse::extract_sections(&parse::tokenize(text));
    let mut ordinal = 0usize;

    let mut sections = Vec::with_capacity(RESEARCH_CATEGORIES.len());
    for (title, raw_beliefs) in RESEARCH_CATEGORIES.iter().zip(raw.sections.iter()) {
        let mut beliefs = Vec::with_capacity(raw_beliefs.len());
        for raw_belief in raw_beliefs {
            let mut hypotheses = Vec::with_capacity(raw_belief.hypotheses.len());
            for statement in &raw_belief.hypotheses {
                hypotheses.push(Hypothesis {
                    statement: statement.clone(),
                    confidence: policy.assign(ordinal),
                });
                ordinal += 1;
            }
            beliefs.push(QuestionBelief {
                // Question items carry the belief verbatim, span text and
                // base text together.
                belief: raw_belief_text(raw_belief),
                hypotheses,
            });
        }
        sections.push(ResearchSection {
            title: title.to_string(),
            beliefs,
        });
    }
    sections
}

fn raw_belief_text(raw: &parse::RawBelief) -> String {
    if raw.span.is_empty() {
        raw.base_text.clone()
    } else {
        format!("{} {}", raw.base_text, raw.span).trim().to_string()
    }
}

/// Pull every hypothesis out of the question text as a flat list,
/// ignoring section and belief structure. This is what the secondary
/// research request is built from.
pub fn extract_hypotheses(text: &str, policy: ConfidencePolicy) -> Vec<Hypothesis> {
    parse::tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            parse::LineToken::Hypothesis(statement) => Some(statement),
            _ => None,
        })
        .enumerate()
        .map(|(i, statement)| Hypothesis {
            statement,
            confidence: policy.assign(i),
        })
        .collect()
}

/// Validation status of a key risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Unvalidated,
    Validated,
    Invalidated,
}

impl Default for RiskStatus {
    fn default() -> Self {
        RiskStatus::Unvalidated
    }
}

impl RiskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RiskStatus::Unvalidated => "Unvalidated",
            RiskStatus::Validated => "Validated",
            RiskStatus::Invalidated => "Invalidated",
        }
    }
}

/// One hypothesis flattened out of the sectioned structure for storage,
/// tagged with its research category. Document order is load-bearing:
/// evidence lookups correlate risks and research results by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRisk {
    pub statement: String,
    pub category: String,
    #[serde(default)]
    pub status: RiskStatus,
}

/// Read stored key risks back from a JSON blob. A structurally invalid
/// blob logs a warning and yields an empty list; views render that as
/// "no data yet" rather than an error.
pub fn parse_key_risks_json(json: &str) -> Vec<KeyRisk> {
    match serde_json::from_str(json) {
        Ok(risks) => risks,
        Err(err) => {
            eprintln!("  Warning: key risks could not be parsed ({})", err);
            Vec::new()
        }
    }
}

/// Flatten parsed sections into the stored key-risk list, preserving
/// document order. Every risk starts unvalidated.
pub fn flatten_key_risks(sections: &[ResearchSection]) -> Vec<KeyRisk> {
    sections
        .iter()
        .flat_map(|section| {
            section.beliefs.iter().flat_map(|belief| {
                belief.hypotheses.iter().map(|hypothesis| KeyRisk {
                    statement: hypothesis.statement.clone(),
                    category: section.title.clone(),
                    status: RiskStatus::Unvalidated,
                })
            })
        })
        .collect()
}

/// A belief with its risks, as grouped for the key-risk review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBelief {
    pub belief: String,
    pub risks: Vec<RiskEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub statement: String,
    pub status: RiskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSection {
    pub title: String,
    pub beliefs: Vec<RiskBelief>,
}

/// Group a flat key-risk list back into the four fixed sections by
/// exact category match. Risks with an unrecognized category are
/// silently dropped; beliefs are keyed by statement equality.
pub fn group_key_risks(risks: &[KeyRisk]) -> Vec<RiskSection> {
    let mut sections: Vec<RiskSection> = RESEARCH_CATEGORIES
        .iter()
        .map(|title| RiskSection {
            title: title.to_string(),
            beliefs: Vec::new(),
        })
        .collect();

    for risk in risks {
        let Some(index) = RESEARCH_CATEGORIES.iter().position(|c| *c == risk.category) else {
            continue;
        };
        let beliefs = &mut sections[index].beliefs;
        let belief = match beliefs.iter_mut().find(|b| b.belief == risk.statement) {
            Some(existing) => existing,
            None => {
                beliefs.push(RiskBelief {
                    belief: risk.statement.clone(),
                    risks: Vec::new(),
                });
                beliefs.last_mut().unwrap()
            }
        };
        belief.risks.push(RiskEntry {
            statement: risk.statement.clone(),
            status: risk.status,
        });
    }

    sections
}
