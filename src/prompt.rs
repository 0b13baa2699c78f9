//! Prompt builders for the wizard's generative calls
//!
//! Every step that talks to a text-generation service builds its prompt
//! here. The formats requested below are load-bearing: the parsers in
//! this crate are written against exactly these section markers, letter
//! labels, belief tags, and JSON shapes. Change a format here and the
//! matching parser must follow.

use crate::profile::CustomerProfile;
use crate::questions::Hypothesis;
use crate::research::ResearchReport;
use crate::revision::RevisedConcept;

pub const CONCEPT_SYSTEM: &str = r#"You are a product expert that generates concept overviews for product ideas.
Always respond with a complete concept overview following the exact format provided, including all sections.
Make sure to wrap belief statements in <belief></belief> tags."#;

pub const RESEARCH_QUESTIONS_SYSTEM: &str = r#"You are a helpful AI assistant that generates research questions based on a concept overview. Your task is to identify 1-2 important research questions for each belief statement in the concept overview."#;

pub const SECONDARY_RESEARCH_SYSTEM: &str = r#"You are a market research expert. Your response must be valid JSON that can be parsed directly. Do not include any markdown formatting or additional text. Keep responses concise."#;

pub const REVISED_CONCEPT_SYSTEM: &str = r#"You are a product strategy expert who helps refine product concepts based on market research. You must return your response in valid JSON format."#;

pub const BRIEF_SYSTEM: &str = r#"You are a professional product manager who specializes in creating clear, structured product briefs. Always maintain the exact section markers in your response and ensure each section is clearly separated."#;

/// Prompt for the initial concept overview. Optionally folds in a
/// selected customer profile so the generated beliefs target it.
pub fn concept_prompt(product_idea: &str, profile: Option<&CustomerProfile>) -> String {
    let mut prompt = format!(
        "Generate a concept overview for this product idea: \"{}\"",
        product_idea
    );

    if let Some(profile) = profile {
        prompt.push_str(&format!(
            "\n\nTarget Customer Profile:\n- Description: {}\n- Pain Points: {}\n- Goals: {}",
            profile.description,
            profile.pain_points.join(", "),
            profile.goals.join(", ")
        ));
    }

    prompt.push_str(
        r#"

Provide a complete concept overview using this exact format:

Concept Summary: [Write a clear 1-2 line summary]

1. CUSTOMER
A. Our first customer for this idea or feature will be <belief>[customer description]</belief>

2. PROBLEM AND SOLUTION
A. Our customer has a need to <belief>[primary need]</belief>
B. This is hard today because there's <belief>[key challenge]</belief>
C. We solve this by providing <belief>[solution]</belief>

3. COMPETITIVE ADVANTAGE
A. Our primary competitors are <belief>[competitors]</belief>
B. We are better than competitors because <belief>[differentiator]</belief>

4. BUSINESS MODEL
A. We will acquire customers by <belief>[acquisition strategy]</belief>
B. We will make money by <belief>[monetization strategy]</belief>"#,
    );

    prompt
}

/// Prompt for research questions: 1-2 testable hypotheses per belief,
/// structured so `questions::parse_research_questions` can read them
/// back.
pub fn research_questions_prompt(concept_overview: &str) -> String {
    format!(
        r#"Based on the following concept overview, identify what are the 1-2 critical hypotheses that must be true for each belief statement to hold true. Keep the hypotheses short (no more than 1 line) and easily understandable by anyone. Make the hypotheses quantifiable so they can be tested through quantitative or qualitative research.

Concept Overview:
{concept_overview}

Please structure the response exactly as follows:

1. Customer
A. [Copy the exact belief statement from the concept]
   - [First hypothesis for this belief]
   - [Second hypothesis for this belief]

2. Problem and Solution
A. [Copy the exact belief statement from the concept]
   - [First hypothesis for this belief]
   - [Second hypothesis for this belief]

3. Competitive Advantage
A. [Copy the exact belief statement from the concept]
   - [First hypothesis for this belief]
   - [Second hypothesis for this belief]

4. Business Model
A. [Copy the exact belief statement from the concept]
   - [First hypothesis for this belief]
   - [Second hypothesis for this belief]"#
    )
}

/// Prompt for secondary research over the flattened hypothesis list.
/// The required JSON structure matches `research::parse_research_report`.
pub fn secondary_research_prompt(product_idea: &str, hypotheses: &[Hypothesis]) -> String {
    let hypothesis_lines: String = hypotheses
        .iter()
        .map(|h| {
            format!(
                "- {} (Current confidence: {})",
                h.statement,
                h.confidence.label().to_lowercase()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Research and analyze this product idea and hypotheses using current market data and trends. Return ONLY a JSON response.

Product Idea: {product_idea}

Hypotheses:
{hypothesis_lines}

Required JSON structure:
{{
  "researchResults": [
    {{
      "hypothesis": "string",
      "findings": "string",
      "statistics": "string",
      "trends": "string",
      "sources": [
        {{
          "title": "string",
          "url": "string",
          "publisher": "string",
          "year": "string",
          "type": "string",
          "keyInsights": "string"
        }}
      ],
      "supported": true,
      "recommendedConfidence": "string",
      "explanation": "string"
    }}
  ],
  "summary": "string"
}}"#
    )
}

/// Prompt for revised beliefs after research. The requested JSON keys
/// match `revision::parse_revised_concept`.
pub fn revised_concept_prompt(concept_overview: &str, report: &ResearchReport) -> String {
    let findings: String = report
        .research_results
        .iter()
        .map(|result| {
            format!(
                "\n- Hypothesis: {}\n- Findings: {}\n- Supported: {}\n- Confidence: {}\n",
                result.hypothesis,
                result.findings,
                result.supported,
                result.recommended_confidence.label().to_lowercase()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Based on the research results, generate revised beliefs for each section of our concept. If a belief doesn't need to change based on the research, explicitly state "No changes required - [original belief remains valid]". Return the response in this exact JSON format:
{{
  "Customer Beliefs": [
    "Revised belief 1 or 'No changes required' statement",
    "Revised belief 2 or 'No changes required' statement"
  ],
  "Problem and Solution Beliefs": [
    "Revised belief 1 or 'No changes required' statement",
    "Revised belief 2 or 'No changes required' statement"
  ],
  "Competitive Beliefs": [
    "Revised belief 1 or 'No changes required' statement",
    "Revised belief 2 or 'No changes required' statement"
  ],
  "Business Model Beliefs": [
    "Revised belief 1 or 'No changes required' statement",
    "Revised belief 2 or 'No changes required' statement"
  ]
}}

Original Concept:
{concept_overview}

Research Summary: {summary}

Key Findings:
{findings}

For each belief:
1. If the research validates the original belief, respond with "No changes required - [original belief]"
2. If the research suggests modifications, provide the revised belief
3. Ensure each revision or confirmation is based on specific research findings"#,
        summary = report.summary,
    )
}

/// Flatten the original and revised beliefs into the context block the
/// brief prompt builds on.
pub fn format_concept_for_brief(
    concept: &crate::concept::ParsedConcept,
    revised: &RevisedConcept,
) -> String {
    fn belief_lines(beliefs: &[crate::concept::BeliefStatement]) -> String {
        beliefs
            .iter()
            .map(|b| {
                format!("- {} {}", b.base_text, b.hypothesis)
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn revised_lines(beliefs: &[String]) -> String {
        if beliefs.is_empty() {
            "No revisions".to_string()
        } else {
            beliefs
                .iter()
                .map(|b| format!("- {}", b))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    format!(
        "\nProduct Concept Overview:\n{}\n\n\
         Original Customer Understanding:\n{}\n\n\
         Revised Customer Understanding:\n{}\n\n\
         Original Problem and Solution:\n{}\n\n\
         Revised Problem and Solution:\n{}\n\n\
         Original Competitive Advantage:\n{}\n\n\
         Revised Competitive Advantage:\n{}\n\n\
         Original Business Model:\n{}\n\n\
         Revised Business Model:\n{}\n",
        concept.concept_summary,
        belief_lines(&concept.customer),
        revised_lines(&revised.customer),
        belief_lines(&concept.problem_solution),
        revised_lines(&revised.problem_solution),
        belief_lines(&concept.competitive_advantage),
        revised_lines(&revised.competitive),
        belief_lines(&concept.business_model),
        revised_lines(&revised.business_model),
    )
}

/// Prompt for the structured product brief. The bracketed markers match
/// `brief::parse_brief`.
pub fn brief_prompt(formatted_concept: &str) -> String {
    format!(
        r#"Based on the following validated concept, create a structured product brief:

{formatted_concept}

Please format your response exactly as shown below, using the exact section markers:

[CONCEPT_SUMMARY]
Write a 2-3 line summary of the core product concept.

[GOALS]
- Goal 1
- Goal 2
- Goal 3

[TARGET_AUDIENCE]
- Primary audience description
- Secondary audience (if applicable)
- Key characteristics/demographics

[OVERALL_FEATURES]
- Feature 1
- Feature 2
- Feature 3
- Feature 4
- Feature 5 (max)

[MVP_GOAL]
One clear sentence describing the minimum viable product goal.

[MVP_USER_FLOW]
1. First step (usually landing page/signup)
2. Second step
3. Third step
4. Final step (completing core value action)

Ensure each section directly reflects the validated beliefs from the research. Keep the response concise and focused on validated insights only."#
    )
}

/// Prompt for candidate customer profiles.
pub fn profiles_prompt(product_idea: &str) -> String {
    format!(
        r#"Given the following product idea: "{product_idea}"

Generate 3 distinct customer profiles that would be most interested in this product. For each profile, include:
1. A brief description of the demographic
2. 2-3 key pain points they experience
3. 2-3 main goals they want to achieve

Format the response as a JSON object with a 'profiles' array containing objects with 'description', 'painPoints' (array), and 'goals' (array) properties."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{Confidence, ConfidencePolicy};

    #[test]
    fn test_concept_prompt_without_profile() {
        let prompt = concept_prompt("a meal-kit service", None);
        assert!(prompt.contains("\"a meal-kit service\""));
        assert!(!prompt.contains("Target Customer Profile"));
        assert!(prompt.contains("<belief>[customer description]</belief>"));
    }

    #[test]
    fn test_concept_prompt_with_profile() {
        let profile = CustomerProfile {
            description: "Night-shift nurses".to_string(),
            pain_points: vec!["no healthy options".to_string(), "short breaks".to_string()],
            goals: vec!["eat well".to_string()],
        };
        let prompt = concept_prompt("a meal-kit service", Some(&profile));
        assert!(prompt.contains("- Description: Night-shift nurses"));
        assert!(prompt.contains("no healthy options, short breaks"));
    }

    #[test]
    fn test_secondary_research_prompt_lists_hypotheses() {
        let hypotheses = vec![Hypothesis {
            statement: "Demand exists overnight".to_string(),
            confidence: Confidence::Medium,
        }];
        let prompt = secondary_research_prompt("meal kits", &hypotheses);
        assert!(prompt.contains("- Demand exists overnight (Current confidence: medium)"));
        assert!(prompt.contains("\"researchResults\""));
    }

    #[test]
    fn test_requested_question_format_round_trips_with_parser() {
        let prompt = research_questions_prompt("overview");
        assert!(prompt.contains("1. Customer"));
        let example = "\
1. Customer
A. Belief text
   - First hypothesis
";
        let sections =
            crate::questions::parse_research_questions(example, ConfidencePolicy::default());
        assert_eq!(sections[0].beliefs[0].hypotheses.len(), 1);
    }

    #[test]
    fn test_brief_context_marks_missing_revisions() {
        let concept = crate::concept::ParsedConcept::default();
        let revised = RevisedConcept::default();
        let block = format_concept_for_brief(&concept, &revised);
        assert!(block.contains("Revised Business Model:\nNo revisions"));
    }
}
