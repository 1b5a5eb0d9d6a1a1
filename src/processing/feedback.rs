//! Human-readable feedback derived from an analysis result

use crate::processing::metrics::{AnalysisResult, SentimentLabel};

const GENERIC_FEEDBACK: &str = "• Good overall performance";

/// Feedback lines in a fixed order: clarity, confidence, sentiment, keywords, fluency.
/// Each metric contributes at most one line.
pub fn feedback_lines(analysis: &AnalysisResult) -> Vec<&'static str> {
    let mut lines = Vec::new();

    if let Some(line) = threshold_line(
        analysis.clarity.score,
        0.6,
        0.8,
        "• Reduce filler words (um, uh, like) for better clarity",
        "• Excellent clarity and articulation",
    ) {
        lines.push(line);
    }

    if let Some(line) = threshold_line(
        analysis.confidence.score,
        0.6,
        0.8,
        "• Speak with more confidence and volume",
        "• Great confidence in delivery",
    ) {
        lines.push(line);
    }

    match analysis.sentiment.label {
        SentimentLabel::Negative => lines.push("• Maintain a more positive tone"),
        SentimentLabel::Positive => lines.push("• Good positive attitude"),
        SentimentLabel::Neutral => {}
    }

    if let Some(line) = threshold_line(
        analysis.keyword_match.score,
        0.5,
        0.7,
        "• Include more relevant keywords from the job description",
        "• Excellent use of relevant keywords",
    ) {
        lines.push(line);
    }

    if let Some(line) = threshold_line(
        analysis.fluency.score,
        0.6,
        0.8,
        "• Practice speaking more fluently and coherently",
        "• Very fluent and coherent delivery",
    ) {
        lines.push(line);
    }

    lines
}

/// Newline-joined feedback, or a single generic line when no metric stands out.
pub fn generate_feedback(analysis: &AnalysisResult) -> String {
    let lines = feedback_lines(analysis);

    if lines.is_empty() {
        GENERIC_FEEDBACK.to_string()
    } else {
        lines.join("\n")
    }
}

fn threshold_line(
    score: f32,
    low: f32,
    high: f32,
    below: &'static str,
    above: &'static str,
) -> Option<&'static str> {
    if score < low {
        Some(below)
    } else if score > high {
        Some(above)
    } else {
        None
    }
}
