use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use ideaforge::concept::{self, ConceptSection};
use ideaforge::config::Config;
use ideaforge::evidence;
use ideaforge::questions;
use ideaforge::research;
use ideaforge::util::truncate;

#[derive(Parser, Debug)]
#[command(
    name = "ideaforge",
    about = "Inspect generated product concepts, research questions, and evidence",
    version
)]
struct Args {
    /// Path to the concept overview text file
    path: PathBuf,

    /// Research questions text file (enables key-risk output)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Research results JSON file (enables evidence output)
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// Section to inspect, 1-4 (with --belief)
    #[arg(short, long)]
    section: Option<usize>,

    /// Belief index within the section, 0-based (with --section)
    #[arg(short, long)]
    belief: Option<usize>,

    /// Emit JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(serde::Serialize)]
struct Output {
    concept: ideaforge::concept::ParsedConcept,
    partial: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    key_risks: Vec<questions::KeyRisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<research::ResearchReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();
    let policy = config.confidence_policy();

    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let outcome = concept::parse_concept_overview(&text);

    let key_risks = match &args.questions {
        Some(path) => {
            let questions_text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let sections = questions::parse_research_questions(&questions_text, policy);
            questions::flatten_key_risks(&sections)
        }
        None => Vec::new(),
    };

    let report = match &args.results {
        Some(path) => {
            let results_text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Some(research::parse_research_report_lenient(&results_text))
        }
        None => None,
    };

    if args.json {
        let partial = outcome.is_partial();
        let output = Output {
            concept: outcome.concept,
            partial,
            key_risks,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_canvas(&outcome, &config);

    if !key_risks.is_empty() {
        println!();
        println!("Key risks ({}):", key_risks.len());
        for risk in &key_risks {
            println!(
                "  [{}] {}",
                risk.category,
                truncate(&risk.statement, config.preview_chars)
            );
        }
    }

    if let (Some(section_number), Some(belief_index)) = (args.section, args.belief) {
        let section = section_number
            .checked_sub(1)
            .and_then(ConceptSection::from_index)
            .with_context(|| format!("Section must be 1-4, got {}", section_number))?;
        let results = report
            .as_ref()
            .map(|r| r.research_results.as_slice())
            .unwrap_or(&[]);

        println!();
        println!("Evidence for {} belief {}:", section.title(), belief_index);
        let found = evidence::find_evidence(section, belief_index, &key_risks, results);
        match found.hypothesis {
            Some(risk) => {
                println!("  Hypothesis: {}", risk.statement);
                match found.research {
                    Some(result) => {
                        let verdict = if result.supported { "Supported" } else { "Not supported" };
                        println!(
                            "  Research: {} ({} confidence)",
                            verdict,
                            result.recommended_confidence.label()
                        );
                        if !result.findings.is_empty() {
                            println!(
                                "  Findings: {}",
                                truncate(&result.findings, config.preview_chars)
                            );
                        }
                    }
                    None => println!("  No research evidence available for this hypothesis"),
                }
            }
            None => println!("  No hypothesis found for this belief"),
        }
    }

    Ok(())
}

fn print_canvas(outcome: &concept::ConceptOutcome, config: &Config) {
    let concept = &outcome.concept;

    if !concept.concept_summary.is_empty() {
        println!("Concept Summary: {}", concept.concept_summary);
        println!();
    }
    if outcome.is_partial() {
        eprintln!("  Warning: input did not fully match the expected format; output may be incomplete.");
    }

    for section in ConceptSection::ALL {
        let beliefs = concept.section(section);
        println!("{} ({} beliefs)", section.title(), beliefs.len());
        for (i, belief) in beliefs.iter().enumerate() {
            let label = (b'A' + (i % 26) as u8) as char;
            let mut line = belief.base_text.clone();
            if !belief.hypothesis.is_empty() {
                line.push(' ');
                line.push_str(&belief.hypothesis);
            }
            println!("  {}. {}", label, truncate(&line, config.preview_chars));
        }
    }
}
