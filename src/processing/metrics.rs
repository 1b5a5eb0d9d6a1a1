//! Typed analysis records produced by the response analyzer
//!
//! Every sub-metric carries a `score` in [0, 1] (1 = best) and a one-line
//! `details` string. Auxiliary fields are `None` when the metric fell back to
//! its empty-input or missing-data default; they feed feedback and reports but
//! never the weighted overall score.

use crate::processing::sentiment::SentimentBreakdown;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric digest of a speech recording, produced upstream of the analyzer.
/// Missing fields deserialize to 0, which is treated as "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatureSummary {
    /// Normalized average loudness, roughly [0, 0.2+].
    pub volume: f32,
    /// Number of detected silent gaps.
    pub pause_count: u32,
    /// Fraction of the recording classified as silence, [0, 1].
    pub silence_ratio: f32,
    pub pitch_variation: f32,
    /// Words per minute, 0 if unknown.
    pub speech_rate: f32,
    pub volume_std: f32,
}

/// Uniform view over every sub-metric result.
pub trait SubMetric {
    fn score(&self) -> f32;
    fn details(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Clarity,
    Sentiment,
    KeywordMatch,
    Fluency,
    Confidence,
    SpeechQuality,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Clarity,
        Metric::Sentiment,
        Metric::KeywordMatch,
        Metric::Fluency,
        Metric::Confidence,
        Metric::SpeechQuality,
    ];

    /// Metrics that contribute to the overall score, in report order.
    pub const WEIGHTED: [Metric; 5] = [
        Metric::Clarity,
        Metric::Confidence,
        Metric::Sentiment,
        Metric::KeywordMatch,
        Metric::Fluency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Clarity => "clarity",
            Metric::Sentiment => "sentiment",
            Metric::KeywordMatch => "keyword_match",
            Metric::Fluency => "fluency",
            Metric::Confidence => "confidence",
            Metric::SpeechQuality => "speech_quality",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Clarity => "Clarity",
            Metric::Sentiment => "Sentiment",
            Metric::KeywordMatch => "Keyword Match",
            Metric::Fluency => "Fluency",
            Metric::Confidence => "Confidence",
            Metric::SpeechQuality => "Speech Quality",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityAnalysis {
    pub score: f32,
    pub details: String,
    pub filler_count: Option<usize>,
    pub total_words: Option<usize>,
    pub filler_ratio: Option<f32>,
    pub avg_sentence_length: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Label a normalized [0, 1] sentiment score.
    pub fn from_score(score: f32) -> Self {
        if score > 0.6 {
            SentimentLabel::Positive
        } else if score < 0.4 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub score: f32,
    pub label: SentimentLabel,
    pub details: String,
    pub polarity: Option<f32>,
    pub breakdown: Option<SentimentBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatchAnalysis {
    pub score: f32,
    pub details: String,
    /// Sorted alphabetically.
    pub matched_keywords: Vec<String>,
    pub total_reference_keywords: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluencyAnalysis {
    pub score: f32,
    pub details: String,
    pub repetition_ratio: Option<f32>,
    pub completeness_ratio: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAnalysis {
    pub score: f32,
    pub details: String,
    pub volume_score: Option<f32>,
    pub pitch_score: Option<f32>,
    pub pause_penalty: Option<f32>,
    pub silence_penalty: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechQualityAnalysis {
    pub score: f32,
    pub details: String,
    pub rate_score: Option<f32>,
    pub silence_score: Option<f32>,
    pub consistency_score: Option<f32>,
}

macro_rules! impl_sub_metric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SubMetric for $ty {
                fn score(&self) -> f32 {
                    self.score
                }

                fn details(&self) -> &str {
                    &self.details
                }
            }
        )*
    };
}

impl_sub_metric!(
    ClarityAnalysis,
    SentimentAnalysis,
    KeywordMatchAnalysis,
    FluencyAnalysis,
    ConfidenceAnalysis,
    SpeechQualityAnalysis,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Inclusive lower bounds: 0.9 A, 0.8 B, 0.7 C, 0.6 D.
const GRADE_BOUNDS: [(f64, Grade); 4] = [(0.9, Grade::A), (0.8, Grade::B), (0.7, Grade::C), (0.6, Grade::D)];

impl Grade {
    pub fn from_score(score: f32) -> Self {
        GRADE_BOUNDS
            .iter()
            .find(|(bound, _)| score >= *bound as f32)
            .map_or(Grade::F, |(_, grade)| *grade)
    }

    /// Grades an unrounded weighted sum against the exact bounds.
    pub fn from_weighted_sum(sum: f64) -> Self {
        GRADE_BOUNDS
            .iter()
            .find(|(bound, _)| sum >= *bound)
            .map_or(Grade::F, |(_, grade)| *grade)
    }

    pub fn as_char(&self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: f32,
    pub grade: Grade,
    pub percentage: f32,
    pub details: String,
}

impl OverallScore {
    pub fn from_score(score: f32) -> Self {
        Self::graded(score, Grade::from_score(score))
    }

    pub fn graded(score: f32, grade: Grade) -> Self {
        Self {
            score,
            grade,
            percentage: score * 100.0,
            details: format!("Overall: {} ({:.1}%)", grade, score * 100.0),
        }
    }
}

/// Complete analysis of one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clarity: ClarityAnalysis,
    pub sentiment: SentimentAnalysis,
    pub keyword_match: KeywordMatchAnalysis,
    pub fluency: FluencyAnalysis,
    pub confidence: ConfidenceAnalysis,
    pub speech_quality: SpeechQualityAnalysis,
    pub overall_score: OverallScore,
}

impl AnalysisResult {
    pub fn metric(&self, metric: Metric) -> &dyn SubMetric {
        match metric {
            Metric::Clarity => &self.clarity,
            Metric::Sentiment => &self.sentiment,
            Metric::KeywordMatch => &self.keyword_match,
            Metric::Fluency => &self.fluency,
            Metric::Confidence => &self.confidence,
            Metric::SpeechQuality => &self.speech_quality,
        }
    }

    /// Look a metric up by its snake_case name, e.g. `"keyword_match"`.
    pub fn metric_by_name(&self, name: &str) -> Option<&dyn SubMetric> {
        Metric::ALL
            .iter()
            .find(|m| m.name() == name)
            .map(|m| self.metric(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_score(0.9), Grade::A);
        assert_eq!(Grade::from_score(0.89999), Grade::B);
        assert_eq!(Grade::from_score(0.8), Grade::B);
        assert_eq!(Grade::from_score(0.7), Grade::C);
        assert_eq!(Grade::from_score(0.6), Grade::D);
        assert_eq!(Grade::from_score(0.59999), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn test_weighted_sum_grade_boundaries_are_exact() {
        assert_eq!(Grade::from_weighted_sum(0.9), Grade::A);
        assert_eq!(Grade::from_weighted_sum(0.8999997), Grade::B);
        assert_eq!(Grade::from_weighted_sum(0.7999999999), Grade::C);
        assert_eq!(Grade::from_weighted_sum(0.6), Grade::D);
        assert_eq!(Grade::from_weighted_sum(-0.1), Grade::F);
    }

    #[test]
    fn test_overall_score_percentage() {
        let overall = OverallScore::from_score(0.75);
        assert_eq!(overall.grade, Grade::C);
        assert!((overall.percentage - 75.0).abs() < 1e-4);
        assert_eq!(overall.details, "Overall: C (75.0%)");
    }

    #[test]
    fn test_sentiment_label_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.61), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.6), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.4), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.39), SentimentLabel::Negative);
    }

    #[test]
    fn test_audio_features_missing_fields_default_to_zero() {
        let features: AudioFeatureSummary = serde_json::from_str(r#"{"volume": 0.08}"#).unwrap();
        assert_eq!(features.volume, 0.08);
        assert_eq!(features.pause_count, 0);
        assert_eq!(features.speech_rate, 0.0);
    }

    #[test]
    fn test_metric_names() {
        let names: Vec<&str> = Metric::ALL.iter().map(Metric::name).collect();
        assert_eq!(
            names,
            vec!["clarity", "sentiment", "keyword_match", "fluency", "confidence", "speech_quality"]
        );
        assert_eq!(Metric::KeywordMatch.to_string(), "keyword_match");
    }
}
