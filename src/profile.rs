//! Customer profile ingestion
//!
//! Profile generation asks for `{"profiles": [...]}` but sometimes gets
//! back a bare array or extra wrapper noise; parsing accepts both.

use crate::parse::{extract_json_fragment, fix_json_issues, strip_markdown_fences};
use serde::{Deserialize, Serialize};

/// One candidate customer profile for a product idea.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Deserialize)]
struct ProfilesJson {
    #[serde(default)]
    profiles: Vec<CustomerProfile>,
}

/// Parse generated customer profiles, accepting either the requested
/// `profiles` wrapper object or a bare array.
pub fn parse_profiles(response: &str) -> anyhow::Result<Vec<CustomerProfile>> {
    let clean = strip_markdown_fences(response);

    if let Some(obj_str) = extract_json_fragment(clean, '{', '}') {
        let fixed = fix_json_issues(obj_str);
        if let Ok(wrapper) = serde_json::from_str::<ProfilesJson>(&fixed) {
            if !wrapper.profiles.is_empty() {
                return Ok(wrapper.profiles);
            }
        }
    }

    if let Some(array_str) = extract_json_fragment(clean, '[', ']') {
        let fixed = fix_json_issues(array_str);
        if let Ok(profiles) = serde_json::from_str::<Vec<CustomerProfile>>(&fixed) {
            return Ok(profiles);
        }
    }

    Err(anyhow::anyhow!("No customer profiles found in response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapper_object() {
        let response = r#"{"profiles": [{"description": "Busy parents", "painPoints": ["no time"], "goals": ["quick dinners"]}]}"#;
        let profiles = parse_profiles(response).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].description, "Busy parents");
        assert_eq!(profiles[0].pain_points, vec!["no time"]);
    }

    #[test]
    fn test_parse_bare_array_fallback() {
        let response = r#"[{"description": "Students", "painPoints": [], "goals": ["save money"]}]"#;
        let profiles = parse_profiles(response).unwrap();
        assert_eq!(profiles[0].goals, vec!["save money"]);
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = "```json\n{\"profiles\": [{\"description\": \"Nurses\"}]}\n```";
        let profiles = parse_profiles(response).unwrap();
        assert_eq!(profiles[0].description, "Nurses");
        assert!(profiles[0].pain_points.is_empty());
    }

    #[test]
    fn test_unusable_response_is_an_error() {
        assert!(parse_profiles("sorry, I can't help with that").is_err());
    }
}
