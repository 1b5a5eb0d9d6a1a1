//! Report structures summarising an interview session

use crate::processing::metrics::{AnalysisResult, Grade, Metric};
use crate::session::{InterviewSession, InterviewType};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    pub metadata: ReportMetadata,
    pub summary: SessionSummary,
    /// One entry per answered question, in answer order.
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Local>,
    pub session_started_at: DateTime<Local>,
    pub analyzer_version: String,
    pub interview_type: InterviewType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub questions_answered: usize,
    /// Mean overall score in [0, 1]; 0 for an empty session.
    pub average_score: f32,
    pub average_percentage: f32,
    /// `None` for an empty session.
    pub grade: Option<Grade>,
    pub metric_averages: Vec<MetricAverage>,
    /// Highest and lowest averaged metrics among those that are weighted.
    pub strongest_metric: Option<MetricAverage>,
    pub weakest_metric: Option<MetricAverage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricAverage {
    pub metric: Metric,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// 1-based question number.
    pub number: usize,
    pub question: String,
    pub response: String,
    pub ideal_answer: String,
    pub analysis: AnalysisResult,
    pub feedback: String,
}

impl InterviewReport {
    pub fn from_session(session: &InterviewSession) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Local::now(),
                session_started_at: session.started_at,
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                interview_type: session.interview_type,
            },
            summary: Self::create_summary(session),
            entries: session
                .turns
                .iter()
                .enumerate()
                .map(|(i, turn)| ReportEntry {
                    number: i + 1,
                    question: turn.question.clone(),
                    response: turn.response.clone(),
                    ideal_answer: turn.ideal_answer.clone(),
                    analysis: turn.analysis.clone(),
                    feedback: turn.feedback.clone(),
                })
                .collect(),
        }
    }

    fn create_summary(session: &InterviewSession) -> SessionSummary {
        let average_score = session.average_score().unwrap_or(0.0);
        let metric_averages: Vec<MetricAverage> = session
            .metric_averages()
            .into_iter()
            .map(|(metric, score)| MetricAverage { metric, score })
            .collect();

        let weighted: Vec<MetricAverage> = metric_averages
            .iter()
            .copied()
            .filter(|m| Metric::WEIGHTED.contains(&m.metric))
            .collect();

        // Ties go to the metric listed first.
        let mut strongest: Option<MetricAverage> = None;
        let mut weakest: Option<MetricAverage> = None;
        for average in weighted {
            if strongest.map_or(true, |s| average.score > s.score) {
                strongest = Some(average);
            }
            if weakest.map_or(true, |w| average.score < w.score) {
                weakest = Some(average);
            }
        }

        SessionSummary {
            questions_answered: session.len(),
            average_score,
            average_percentage: average_score * 100.0,
            grade: session.overall_grade(),
            metric_averages,
            strongest_metric: strongest,
            weakest_metric: weakest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::ResponseAnalyzer;

    #[test]
    fn test_report_from_empty_session() {
        let session = InterviewSession::new(InterviewType::General);
        let report = InterviewReport::from_session(&session);

        assert!(report.is_empty());
        assert_eq!(report.summary.questions_answered, 0);
        assert_eq!(report.summary.average_score, 0.0);
        assert_eq!(report.summary.grade, None);
        assert!(report.summary.strongest_metric.is_none());
        assert_eq!(report.metadata.interview_type, InterviewType::General);
    }

    #[test]
    fn test_report_summary() {
        let analyzer = ResponseAnalyzer::new().unwrap();
        let mut session = InterviewSession::new(InterviewType::Technical);
        session
            .record(
                "How do you ensure code quality in your projects?",
                "I write unit tests, review every pull request, and run linters in continuous integration.",
                "unit tests code review continuous integration",
                None,
                &analyzer,
            )
            .unwrap();

        let report = InterviewReport::from_session(&session);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].number, 1);
        assert_eq!(report.summary.metric_averages.len(), Metric::ALL.len());

        let strongest = report.summary.strongest_metric.unwrap();
        let weakest = report.summary.weakest_metric.unwrap();
        assert!(strongest.score >= weakest.score);
        assert!(Metric::WEIGHTED.contains(&strongest.metric));
        assert_ne!(weakest.metric, Metric::SpeechQuality);
        assert_eq!(
            report.summary.grade,
            Some(report.entries[0].analysis.overall_score.grade)
        );
    }
}
