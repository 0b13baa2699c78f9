//! Wizard state machine for the ideation flow
//!
//! Tracks progress through: idea -> profile -> concept -> questions ->
//! validation -> revision, and the dashboard phases that follow.

use serde::{Deserialize, Serialize};

/// The research wizard's steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStep {
    /// Capture the raw product idea
    #[default]
    Idea,
    /// Pick a target customer profile
    CustomerProfile,
    /// Review the generated concept overview
    Concept,
    /// Review research questions and key risks
    Questions,
    /// Choose a research method and review results
    Validation,
    /// Review the revised concept
    RevisedConcept,
    /// Research done, ready for the build phase
    Complete,
}

impl ResearchStep {
    pub const ALL: [ResearchStep; 7] = [
        ResearchStep::Idea,
        ResearchStep::CustomerProfile,
        ResearchStep::Concept,
        ResearchStep::Questions,
        ResearchStep::Validation,
        ResearchStep::RevisedConcept,
        ResearchStep::Complete,
    ];

    /// Human-readable status for display
    pub fn status_text(&self) -> &'static str {
        match self {
            ResearchStep::Idea => "Describe your idea",
            ResearchStep::CustomerProfile => "Profile your customer",
            ResearchStep::Concept => "Review concept",
            ResearchStep::Questions => "Review research questions",
            ResearchStep::Validation => "Validate hypotheses",
            ResearchStep::RevisedConcept => "Review revised concept",
            ResearchStep::Complete => "Research complete",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> ResearchStep {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn next(&self) -> ResearchStep {
        Self::from_index((self.index() + 1).min(Self::ALL.len() - 1))
    }

    pub fn previous(&self) -> ResearchStep {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ResearchStep::Complete)
    }
}

/// Dashboard phases. Research feeds Build; Market is a placeholder
/// until the marketing tooling ships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Research,
    Build,
    Market,
}

impl Phase {
    pub fn title(&self) -> &'static str {
        match self {
            Phase::Research => "Research",
            Phase::Build => "Build",
            Phase::Market => "Market",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Research => "Validate your idea with structured research",
            Phase::Build => "Turn the validated concept into a product brief",
            Phase::Market => "Coming soon",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Phase::Market)
    }
}

/// Wizard progress: the current step plus which steps have been
/// completed, kept as indices so partially skipped flows still render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    pub step: ResearchStep,
    pub completed: Vec<usize>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the current step completed and advance. Advancing from the
    /// final step stays there.
    pub fn advance(&mut self) {
        self.mark_completed(self.step.index());
        self.step = self.step.next();
    }

    /// Go back one step without touching completion state.
    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    pub fn mark_completed(&mut self, index: usize) {
        if !self.completed.contains(&index) {
            self.completed.push(index);
        }
    }

    pub fn is_completed(&self, step: ResearchStep) -> bool {
        self.completed.contains(&step.index())
    }

    /// Fraction of steps completed, for the progress bar.
    pub fn progress(&self) -> f32 {
        let total = ResearchStep::ALL.len() - 1;
        (self.completed.len().min(total)) as f32 / total as f32
    }
}
