//! Multi-question interview sessions
//!
//! A session records each answered question together with its analysis and
//! feedback so a whole interview can be summarised and reported.

pub mod plan;
pub mod question_bank;

pub use plan::{PlannedTurn, ResolvedTurn, SessionPlan};
pub use question_bank::InterviewType;

use crate::error::Result;
use crate::processing::analyzer::ResponseAnalyzer;
use crate::processing::feedback::generate_feedback;
use crate::processing::metrics::{AnalysisResult, AudioFeatureSummary, Grade, Metric};
use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub question: String,
    pub response: String,
    pub ideal_answer: String,
    pub analysis: AnalysisResult,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub interview_type: InterviewType,
    pub started_at: DateTime<Local>,
    pub turns: Vec<InterviewTurn>,
}

impl InterviewSession {
    pub fn new(interview_type: InterviewType) -> Self {
        Self {
            interview_type,
            started_at: Local::now(),
            turns: Vec::new(),
        }
    }

    /// Analyze `response` and append it as a new turn.
    /// A failing analysis leaves the session unchanged.
    pub fn record(
        &mut self,
        question: &str,
        response: &str,
        ideal_answer: &str,
        audio_features: Option<&AudioFeatureSummary>,
        analyzer: &ResponseAnalyzer,
    ) -> Result<&InterviewTurn> {
        let analysis = analyzer.analyze(response, ideal_answer, audio_features)?;
        let feedback = generate_feedback(&analysis);
        debug!(
            "Recorded turn {}: {}",
            self.turns.len() + 1,
            analysis.overall_score.details
        );

        let index = self.turns.len();
        self.turns.push(InterviewTurn {
            question: question.to_string(),
            response: response.to_string(),
            ideal_answer: ideal_answer.to_string(),
            analysis,
            feedback,
        });
        Ok(&self.turns[index])
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Mean overall score across turns, `None` for an empty session.
    pub fn average_score(&self) -> Option<f32> {
        if self.turns.is_empty() {
            return None;
        }
        let total: f32 = self.turns.iter().map(|t| t.analysis.overall_score.score).sum();
        Some(total / self.turns.len() as f32)
    }

    pub fn overall_grade(&self) -> Option<Grade> {
        self.average_score().map(Grade::from_score)
    }

    /// Mean score of every metric across turns, in `Metric::ALL` order.
    pub fn metric_averages(&self) -> Vec<(Metric, f32)> {
        if self.turns.is_empty() {
            return Vec::new();
        }

        Metric::ALL
            .iter()
            .map(|&metric| {
                let total: f32 = self
                    .turns
                    .iter()
                    .map(|t| t.analysis.metric(metric).score())
                    .sum();
                (metric, total / self.turns.len() as f32)
            })
            .collect()
    }
}
