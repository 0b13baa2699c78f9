//! Product brief extraction
//!
//! The build phase turns a validated concept into a structured brief.
//! The generation format uses bracketed section markers; extraction
//! slices out each marked block and never fails, leaving fields empty
//! when a marker is missing.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A structured product brief, one field per marked section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBrief {
    pub concept_summary: String,
    pub goals: String,
    pub target_audience: String,
    pub overall_features: String,
    pub mvp_goal: String,
    pub mvp_user_flow: String,
}

impl ProductBrief {
    pub fn is_empty(&self) -> bool {
        self.concept_summary.is_empty()
            && self.goals.is_empty()
            && self.target_audience.is_empty()
            && self.overall_features.is_empty()
            && self.mvp_goal.is_empty()
            && self.mvp_user_flow.is_empty()
    }
}

/// Parse a generated brief into its sections. Missing markers yield
/// empty fields rather than errors.
pub fn parse_brief(text: &str) -> ProductBrief {
    ProductBrief {
        concept_summary: extract_section(text, "CONCEPT_SUMMARY"),
        goals: extract_section(text, "GOALS"),
        target_audience: extract_section(text, "TARGET_AUDIENCE"),
        overall_features: extract_section(text, "OVERALL_FEATURES"),
        mvp_goal: extract_section(text, "MVP_GOAL"),
        mvp_user_flow: extract_section(text, "MVP_USER_FLOW"),
    }
}

/// Everything between `[section_name]` and the next bracketed marker
/// (or end of text), trimmed.
fn extract_section(text: &str, section_name: &str) -> String {
    let pattern = format!(r"\[{}\]\s*([^\[]*)", regex::escape(section_name));
    let re = Regex::new(&pattern).unwrap_or_else(|_| Regex::new("$^").unwrap());
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}
