//! Project records
//!
//! A project is one product idea moving through the wizard, together
//! with everything research has accumulated for it. Persistence lives
//! elsewhere; this module only shapes the record and the transitions
//! the wizard steps perform on it.

use crate::brief::ProductBrief;
use crate::questions::{self, KeyRisk, ResearchSection};
use crate::research::ResearchReport;
use crate::revision::RevisedConcept;
use crate::wizard::Wizard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed validation run: which method produced the report, and
/// when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub method: String,
    pub report: ResearchReport,
    pub date: DateTime<Utc>,
}

/// Everything the research phase accumulates for a project. Raw
/// generated text is stored alongside the records parsed from it, so
/// views can re-parse with a different policy without a regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchData {
    #[serde(default)]
    pub concept_overview: String,
    #[serde(default)]
    pub research_questions: String,
    #[serde(default)]
    pub key_risks: Vec<KeyRisk>,
    #[serde(default)]
    pub validation: Option<Validation>,
    #[serde(default)]
    pub revised_concept: Option<RevisedConcept>,
    #[serde(default)]
    pub brief: Option<ProductBrief>,
    #[serde(default)]
    pub wizard: Wizard,
}

/// One product idea and its research state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub product_idea: String,
    #[serde(default)]
    pub research: ResearchData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, product_idea: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            product_idea: product_idea.into(),
            research: ResearchData::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Store the generated concept overview and advance past the
    /// concept step.
    pub fn record_concept(&mut self, overview: impl Into<String>) {
        self.research.concept_overview = overview.into();
        self.touch();
    }

    /// Approve the research questions: keep the raw text, flatten the
    /// parsed sections into stored key risks, and advance the wizard.
    pub fn approve_questions(&mut self, raw_text: impl Into<String>, sections: &[ResearchSection]) {
        self.research.research_questions = raw_text.into();
        self.research.key_risks = questions::flatten_key_risks(sections);
        self.research.wizard.advance();
        self.touch();
    }

    /// Record a validation run against the stored hypotheses.
    pub fn record_validation(&mut self, method: impl Into<String>, report: ResearchReport) {
        self.research.validation = Some(Validation {
            method: method.into(),
            report,
            date: Utc::now(),
        });
        self.touch();
    }

    pub fn record_revision(&mut self, revised: RevisedConcept) {
        self.research.revised_concept = Some(revised);
        self.touch();
    }

    pub fn record_brief(&mut self, brief: ProductBrief) {
        self.research.brief = Some(brief);
        self.touch();
    }

    /// Research results in stored order, empty when validation hasn't
    /// run. Evidence lookups index into this list positionally.
    pub fn research_results(&self) -> &[crate::research::ResearchResult] {
        self.research
            .validation
            .as_ref()
            .map(|v| v.report.research_results.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::ConfidencePolicy;

    const QUESTIONS: &str = "\
1. Customer
A. Our first customer will be night-shift workers
   - Demand exists overnight
";

    #[test]
    fn test_new_project_starts_empty() {
        let project = Project::new("Meal kits", "overnight meal kits");
        assert_eq!(project.name, "Meal kits");
        assert!(project.research.key_risks.is_empty());
        assert!(project.research_results().is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_approve_questions_flattens_risks_and_advances() {
        let mut project = Project::new("Meal kits", "overnight meal kits");
        let sections =
            questions::parse_research_questions(QUESTIONS, ConfidencePolicy::default());
        project.approve_questions(QUESTIONS, &sections);

        assert_eq!(project.research.key_risks.len(), 1);
        assert_eq!(project.research.key_risks[0].category, "Customer Research");
        assert_eq!(project.research.research_questions, QUESTIONS);
        assert_eq!(project.research.wizard.completed, vec![0]);
    }

    #[test]
    fn test_record_validation_exposes_results() {
        let mut project = Project::new("Meal kits", "overnight meal kits");
        let report = ResearchReport {
            research_results: vec![],
            summary: "summary".to_string(),
        };
        project.record_validation("Secondary Research", report);
        let validation = project.research.validation.as_ref().unwrap();
        assert_eq!(validation.method, "Secondary Research");
        assert!(project.research_results().is_empty());
    }
}
