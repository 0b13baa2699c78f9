//! Secondary research report ingestion
//!
//! The research service is asked for strict JSON but routinely wraps it
//! in markdown fences, prose, or slightly broken syntax. Ingestion
//! mirrors that reality: clean the response up, parse leniently with
//! string-typed wire structs, then convert to typed records with
//! fallbacks. A structurally unusable response is an error at this seam;
//! callers absorb it into an empty report rather than surfacing it.

use crate::parse::{extract_json_object, fix_json_issues};
use crate::questions::Confidence;
use serde::{Deserialize, Serialize};

/// A cited source backing one research result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub title: String,
    pub url: String,
    pub publisher: String,
    pub year: String,
    /// Source kind as reported ("industry_report", "news", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub key_insights: String,
}

/// The outcome of validating one hypothesis against external findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub hypothesis: String,
    pub findings: String,
    pub statistics: String,
    pub trends: String,
    pub sources: Vec<Source>,
    pub supported: bool,
    pub recommended_confidence: Confidence,
    pub explanation: String,
}

/// A full research report: one result per hypothesis, in request order,
/// plus an overall summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchReport {
    pub research_results: Vec<ResearchResult>,
    pub summary: String,
}

#[derive(Deserialize)]
struct ReportJson {
    #[serde(default, rename = "researchResults")]
    research_results: Vec<ResultJson>,
    #[serde(default)]
    summary: String,
}

#[derive(Deserialize)]
struct ResultJson {
    hypothesis: String,
    #[serde(default)]
    findings: String,
    #[serde(default)]
    statistics: String,
    #[serde(default)]
    trends: String,
    #[serde(default)]
    sources: Vec<SourceJson>,
    #[serde(default)]
    supported: bool,
    #[serde(default, rename = "recommendedConfidence")]
    recommended_confidence: String,
    #[serde(default)]
    explanation: String,
}

#[derive(Deserialize)]
struct SourceJson {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    year: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default, rename = "keyInsights")]
    key_insights: String,
}

/// Parse a generated research response into a report.
///
/// Handles markdown fences and surrounding noise, repairs common JSON
/// defects, and tolerates missing optional fields. Fails only when no
/// parseable object with a `researchResults` array can be recovered.
pub fn parse_research_report(response: &str) -> anyhow::Result<ResearchReport> {
    let json_str = extract_json_object(response)
        .ok_or_else(|| anyhow::anyhow!("No JSON object found in research response"))?;

    let parsed: ReportJson = match serde_json::from_str(json_str) {
        Ok(report) => report,
        Err(initial_error) => {
            let fixed = fix_json_issues(json_str);
            serde_json::from_str(&fixed).map_err(|_| {
                anyhow::anyhow!("Research response could not be parsed: {}", initial_error)
            })?
        }
    };

    Ok(ResearchReport {
        research_results: parsed
            .research_results
            .into_iter()
            .map(|result| ResearchResult {
                hypothesis: result.hypothesis,
                findings: result.findings,
                statistics: result.statistics,
                trends: result.trends,
                sources: result
                    .sources
                    .into_iter()
                    .map(|source| Source {
                        title: source.title,
                        url: source.url,
                        publisher: source.publisher,
                        year: source.year,
                        kind: source.kind,
                        key_insights: source.key_insights,
                    })
                    .collect(),
                supported: result.supported,
                recommended_confidence: Confidence::from_str_lenient(
                    &result.recommended_confidence,
                ),
                explanation: result.explanation,
            })
            .collect(),
        summary: parsed.summary,
    })
}

/// Parse a response, degrading to an empty report on failure. The
/// warning goes to stderr; the wizard keeps moving with empty sections.
pub fn parse_research_report_lenient(response: &str) -> ResearchReport {
    match parse_research_report(response) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("  Warning: research results could not be parsed ({})", err);
            ResearchReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"```json
{
  "researchResults": [
    {
      "hypothesis": "Night-shift workers order food during shifts",
      "findings": "Multiple surveys support this.",
      "statistics": "38% order at least weekly",
      "trends": "Overnight delivery demand grew 12% YoY",
      "sources": [
        {
          "title": "Shift Worker Meal Habits 2024",
          "url": "https://example.com/report",
          "publisher": "FoodData",
          "year": "2024",
          "type": "industry_report",
          "keyInsights": "Strong overnight demand"
        }
      ],
      "supported": true,
      "recommendedConfidence": "high",
      "explanation": "Converging evidence across sources."
    }
  ],
  "summary": "The core demand hypothesis holds."
}
```"#;

    #[test]
    fn test_parse_fenced_report() {
        let report = parse_research_report(REPORT).unwrap();
        assert_eq!(report.research_results.len(), 1);
        let result = &report.research_results[0];
        assert!(result.supported);
        assert_eq!(result.recommended_confidence, Confidence::High);
        assert_eq!(result.sources[0].kind, "industry_report");
        assert_eq!(report.summary, "The core demand hypothesis holds.");
    }

    #[test]
    fn test_parse_tolerates_trailing_commas_and_missing_fields() {
        let response = r#"{"researchResults": [{"hypothesis": "h", "supported": false,}], "summary": "s"}"#;
        let report = parse_research_report(response).unwrap();
        assert_eq!(report.research_results[0].hypothesis, "h");
        assert_eq!(report.research_results[0].findings, "");
        assert_eq!(
            report.research_results[0].recommended_confidence,
            Confidence::Medium
        );
    }

    #[test]
    fn test_unrecognized_confidence_falls_back_to_medium() {
        let response = r#"{"researchResults": [{"hypothesis": "h", "recommendedConfidence": "very sure"}], "summary": ""}"#;
        let report = parse_research_report(response).unwrap();
        assert_eq!(
            report.research_results[0].recommended_confidence,
            Confidence::Medium
        );
    }

    #[test]
    fn test_no_json_is_an_error() {
        assert!(parse_research_report("no json here").is_err());
    }

    #[test]
    fn test_lenient_parse_degrades_to_empty() {
        let report = parse_research_report_lenient("not json");
        assert!(report.research_results.is_empty());
        assert!(report.summary.is_empty());
    }
}
