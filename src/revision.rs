//! Revised concept ingestion
//!
//! After research, the generation step returns revised beliefs as a
//! JSON object with one array per section. Beliefs that survived
//! research come back as "No changes required - ..." statements and
//! pass through verbatim.

use crate::parse::{extract_json_object, fix_json_issues};
use serde::{Deserialize, Serialize};

/// Revised beliefs for each concept section. Missing sections in the
/// response become empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisedConcept {
    #[serde(default, rename = "Customer Beliefs")]
    pub customer: Vec<String>,
    #[serde(default, rename = "Problem and Solution Beliefs")]
    pub problem_solution: Vec<String>,
    #[serde(default, rename = "Competitive Beliefs")]
    pub competitive: Vec<String>,
    #[serde(default, rename = "Business Model Beliefs")]
    pub business_model: Vec<String>,
}

impl RevisedConcept {
    pub fn is_empty(&self) -> bool {
        self.customer.is_empty()
            && self.problem_solution.is_empty()
            && self.competitive.is_empty()
            && self.business_model.is_empty()
    }

    /// Section lists paired with their display titles, in canvas order.
    pub fn titled_sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Customer Beliefs", self.customer.as_slice()),
            ("Problem and Solution Beliefs", self.problem_solution.as_slice()),
            ("Competitive Beliefs", self.competitive.as_slice()),
            ("Business Model Beliefs", self.business_model.as_slice()),
        ]
    }
}

/// Parse a revised-concept response, tolerating fences and minor JSON
/// defects. Fails only when no object can be recovered at all.
pub fn parse_revised_concept(response: &str) -> anyhow::Result<RevisedConcept> {
    let json_str = extract_json_object(response)
        .ok_or_else(|| anyhow::anyhow!("No JSON object found in revised concept response"))?;

    match serde_json::from_str(json_str) {
        Ok(revised) => Ok(revised),
        Err(initial_error) => {
            let fixed = fix_json_issues(json_str);
            serde_json::from_str(&fixed).map_err(|_| {
                anyhow::anyhow!(
                    "Revised concept could not be parsed: {}",
                    initial_error
                )
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_revised_concept() {
        let response = r#"{
            "Customer Beliefs": ["No changes required - night-shift workers remain valid"],
            "Problem and Solution Beliefs": ["Expand beyond hospitals to warehouses"],
            "Competitive Beliefs": [],
            "Business Model Beliefs": ["Shift to weekly subscriptions"]
        }"#;
        let revised = parse_revised_concept(response).unwrap();
        assert_eq!(revised.customer.len(), 1);
        assert!(revised.customer[0].starts_with("No changes required"));
        assert!(revised.competitive.is_empty());
        assert_eq!(revised.business_model, vec!["Shift to weekly subscriptions"]);
    }

    #[test]
    fn test_missing_keys_become_empty_lists() {
        let revised = parse_revised_concept(r#"{"Customer Beliefs": ["a"]}"#).unwrap();
        assert_eq!(revised.customer, vec!["a"]);
        assert!(revised.problem_solution.is_empty());
        assert!(revised.business_model.is_empty());
    }

    #[test]
    fn test_prose_wrapped_object_is_recovered() {
        let response = "Here are your revisions:\n```json\n{\"Competitive Beliefs\": [\"b\"]}\n```";
        let revised = parse_revised_concept(response).unwrap();
        assert_eq!(revised.competitive, vec!["b"]);
    }

    #[test]
    fn test_no_object_is_an_error() {
        assert!(parse_revised_concept("nothing structured").is_err());
    }
}
