//! Evidence lookup for the research canvas
//!
//! Correlates a selected belief with its hypothesis and any research
//! result. Hypotheses live in a flat key-risk list tagged by category;
//! research results live in a separate list aligned with the unfiltered
//! risk order. The correlation is positional: filter risks by the
//! section's category, index by the belief's position in its section,
//! then index the result list at the risk's unfiltered position. A miss
//! at any step is "no match", never an error, and the UI renders it as
//! an explicit no-evidence state.

use crate::concept::ConceptSection;
use crate::questions::KeyRisk;
use crate::research::ResearchResult;

/// Research category for a canvas section.
pub fn section_category(section: ConceptSection) -> &'static str {
    match section {
        ConceptSection::Customer => "Customer Research",
        ConceptSection::ProblemSolution => "Problem and Solution Research",
        ConceptSection::CompetitiveAdvantage => "Competitive Advantage Research",
        ConceptSection::BusinessModel => "Business Model Research",
    }
}

/// What the evidence panel has to show for one selected belief.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence<'a> {
    /// The hypothesis backing the belief, if one was found
    pub hypothesis: Option<&'a KeyRisk>,
    /// The research result for that hypothesis, if research ran
    pub research: Option<&'a ResearchResult>,
}

impl Evidence<'_> {
    pub fn none() -> Self {
        Evidence {
            hypothesis: None,
            research: None,
        }
    }
}

/// Look up the evidence for the belief at `index` within `section`.
///
/// Risks whose category does not exactly equal the section's mapped
/// category name are invisible to the lookup; if risks for different
/// categories are interleaved rather than stored in blocks, the result
/// correlation can silently point at the wrong entry. That positional
/// contract is inherited from how risks and results are generated and
/// stored together, and callers rely on the silent no-match behavior.
pub fn find_evidence<'a>(
    section: ConceptSection,
    index: usize,
    risks: &'a [KeyRisk],
    results: &'a [ResearchResult],
) -> Evidence<'a> {
    let category = section_category(section);

    let matching: Vec<usize> = risks
        .iter()
        .enumerate()
        .filter(|(_, risk)| risk.category == category)
        .map(|(i, _)| i)
        .collect();

    let Some(&position) = matching.get(index) else {
        return Evidence::none();
    };

    Evidence {
        hypothesis: Some(&risks[position]),
        research: results.get(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{Confidence, RiskStatus};

    fn risk(statement: &str, category: &str) -> KeyRisk {
        KeyRisk {
            statement: statement.to_string(),
            category: category.to_string(),
            status: RiskStatus::Unvalidated,
        }
    }

    fn result(hypothesis: &str) -> ResearchResult {
        ResearchResult {
            hypothesis: hypothesis.to_string(),
            findings: String::new(),
            statistics: String::new(),
            trends: String::new(),
            sources: Vec::new(),
            supported: true,
            recommended_confidence: Confidence::Medium,
            explanation: String::new(),
        }
    }

    fn block_fixture() -> (Vec<KeyRisk>, Vec<ResearchResult>) {
        let risks = vec![
            risk("c0", "Customer Research"),
            risk("c1", "Customer Research"),
            risk("c2", "Customer Research"),
            risk("b0", "Business Model Research"),
            risk("b1", "Business Model Research"),
        ];
        let results = vec![
            result("c0"),
            result("c1"),
            result("c2"),
            result("b0"),
            result("b1"),
        ];
        (risks, results)
    }

    #[test]
    fn test_positional_lookup_in_blocked_list() {
        let (risks, results) = block_fixture();
        let evidence = find_evidence(ConceptSection::Customer, 1, &risks, &results);
        assert_eq!(evidence.hypothesis.unwrap().statement, "c1");
        assert_eq!(evidence.research.unwrap().hypothesis, "c1");

        let evidence = find_evidence(ConceptSection::BusinessModel, 0, &risks, &results);
        assert_eq!(evidence.hypothesis.unwrap().statement, "b0");
        assert_eq!(evidence.research.unwrap().hypothesis, "b0");
    }

    #[test]
    fn test_category_mismatch_is_silent_no_match() {
        let (mut risks, results) = block_fixture();
        for r in &mut risks {
            r.category = "customer research".to_string();
        }
        let evidence = find_evidence(ConceptSection::Customer, 0, &risks, &results);
        assert!(evidence.hypothesis.is_none());
        assert!(evidence.research.is_none());
    }

    #[test]
    fn test_index_out_of_range_is_no_match() {
        let (risks, results) = block_fixture();
        let evidence = find_evidence(ConceptSection::Customer, 3, &risks, &results);
        assert!(evidence.hypothesis.is_none());
    }

    #[test]
    fn test_hypothesis_without_research_result() {
        let (risks, _) = block_fixture();
        let evidence = find_evidence(ConceptSection::BusinessModel, 1, &risks, &[]);
        assert_eq!(evidence.hypothesis.unwrap().statement, "b1");
        assert!(evidence.research.is_none());
    }

    #[test]
    fn test_sections_without_risks_find_nothing() {
        let (risks, results) = block_fixture();
        let evidence = find_evidence(ConceptSection::CompetitiveAdvantage, 0, &risks, &results);
        assert!(evidence.hypothesis.is_none());
        assert!(evidence.research.is_none());
    }
}
