//! Multi-metric response analysis engine
//!
//! Scores a transcript (plus an optional reference answer and optional audio
//! feature summary) on clarity, sentiment, keyword overlap, fluency, confidence
//! and speech quality, then folds the weighted metrics into an overall score
//! and letter grade. Every sub-analysis is a pure function of its inputs and
//! the read-only resources injected at construction.

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::processing::fillers::{FillerMatcher, FillerMatching};
use crate::processing::metrics::*;
use crate::processing::sentiment::{IntensityScorer, LexiconSentiment, PolarityScorer};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::sync::Arc;

const NO_SPEECH: &str = "No speech detected";
const NO_AUDIO: &str = "No audio data available";
const NEUTRAL_SCORE: f32 = 0.5;

/// Words-per-minute considered ideal by the speech-quality metric.
const OPTIMAL_SPEECH_RATE: f32 = 150.0;
const SHORT_SENTENCE_WORDS: f32 = 5.0;
const COMPLETE_SENTENCE_MIN_WORDS: usize = 4;

pub struct ResponseAnalyzer {
    text_processor: Arc<TextProcessor>,
    fillers: FillerMatcher,
    polarity: Arc<dyn PolarityScorer>,
    intensity: Arc<dyn IntensityScorer>,
    weights: ScoringConfig,
    include_audio: bool,
}

impl ResponseAnalyzer {
    /// Analyzer over the shared stop-word set and sentiment lexicon, default weights.
    pub fn new() -> Result<Self> {
        let lexicon = LexiconSentiment::shared();

        Ok(Self {
            text_processor: TextProcessor::shared(),
            fillers: FillerMatcher::with_defaults(FillerMatching::default())?,
            polarity: lexicon.clone(),
            intensity: lexicon,
            weights: ScoringConfig::default(),
            include_audio: true,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.scoring.validate()?;

        let text_processor = if config.analysis.extra_stop_words.is_empty() {
            TextProcessor::shared()
        } else {
            Arc::new(TextProcessor::with_extra_stop_words(&config.analysis.extra_stop_words))
        };

        let analyzer = Self::new()?
            .with_text_processor(text_processor)
            .with_fillers(FillerMatcher::new(
                &config.analysis.filler_words,
                config.analysis.filler_matching,
            )?)
            .with_weights(config.scoring)
            .with_audio_analysis(config.analysis.include_audio_analysis);

        Ok(analyzer)
    }

    pub fn with_text_processor(mut self, text_processor: Arc<TextProcessor>) -> Self {
        self.text_processor = text_processor;
        self
    }

    pub fn with_fillers(mut self, fillers: FillerMatcher) -> Self {
        self.fillers = fillers;
        self
    }

    pub fn with_sentiment(
        mut self,
        polarity: Arc<dyn PolarityScorer>,
        intensity: Arc<dyn IntensityScorer>,
    ) -> Self {
        self.polarity = polarity;
        self.intensity = intensity;
        self
    }

    pub fn with_weights(mut self, weights: ScoringConfig) -> Self {
        self.weights = weights;
        self
    }

    /// When disabled, audio features are ignored and the audio metrics report neutral defaults.
    pub fn with_audio_analysis(mut self, enabled: bool) -> Self {
        self.include_audio = enabled;
        self
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    /// Analyze one response.
    ///
    /// Empty text and missing audio degrade to documented defaults; the only
    /// error is a failing sentiment capability.
    pub fn analyze(
        &self,
        transcript: &str,
        reference_text: &str,
        audio_features: Option<&AudioFeatureSummary>,
    ) -> Result<AnalysisResult> {
        let audio = audio_features.filter(|_| self.include_audio);

        let clarity = self.analyze_clarity(transcript);
        let sentiment = self.analyze_sentiment(transcript)?;
        let keyword_match = self.analyze_keyword_match(transcript, reference_text);
        let fluency = self.analyze_fluency(transcript);
        let confidence = self.analyze_confidence(audio);
        let speech_quality = self.analyze_speech_quality(audio);

        let overall_score =
            self.calculate_overall_score(&clarity, &confidence, &sentiment, &keyword_match, &fluency);

        let result = AnalysisResult {
            clarity,
            sentiment,
            keyword_match,
            fluency,
            confidence,
            speech_quality,
            overall_score,
        };

        for metric in Metric::ALL {
            let sub = result.metric(metric);
            debug!("{}: {:.3} ({})", metric, sub.score(), sub.details());
        }
        debug!("{}", result.overall_score.details);

        Ok(result)
    }

    pub fn analyze_clarity(&self, transcript: &str) -> ClarityAnalysis {
        if transcript.trim().is_empty() {
            return ClarityAnalysis {
                score: 0.0,
                details: NO_SPEECH.to_string(),
                filler_count: None,
                total_words: None,
                filler_ratio: None,
                avg_sentence_length: None,
            };
        }

        let words = self.text_processor.words(transcript);
        let total_words = words.len();
        let filler_count = self.fillers.count(&words);
        let filler_ratio = ratio(filler_count, total_words);

        let sentence_lengths: Vec<usize> = self
            .text_processor
            .split_sentences(transcript)
            .iter()
            .map(|s| s.split_whitespace().count())
            .collect();
        // No sentences means no mean, and so no short-sentence penalty.
        let avg_sentence_length = (!sentence_lengths.is_empty())
            .then(|| sentence_lengths.iter().sum::<usize>() as f32 / sentence_lengths.len() as f32);

        let short_sentence_penalty = match avg_sentence_length {
            Some(avg) if avg < SHORT_SENTENCE_WORDS => 0.1,
            _ => 0.0,
        };
        let score = clamp_unit(1.0 - filler_ratio * 2.0 - short_sentence_penalty);

        ClarityAnalysis {
            score,
            details: format!(
                "Filler words: {}/{} ({:.1}%)",
                filler_count,
                total_words,
                filler_ratio * 100.0
            ),
            filler_count: Some(filler_count),
            total_words: Some(total_words),
            filler_ratio: Some(filler_ratio),
            avg_sentence_length,
        }
    }

    pub fn analyze_sentiment(&self, transcript: &str) -> Result<SentimentAnalysis> {
        if transcript.trim().is_empty() {
            return Ok(SentimentAnalysis {
                score: 0.0,
                label: SentimentLabel::Neutral,
                details: NO_SPEECH.to_string(),
                polarity: None,
                breakdown: None,
            });
        }

        let polarity = self.polarity.polarity(transcript)?.clamp(-1.0, 1.0);
        let breakdown = self.intensity.polarity_scores(transcript)?;

        let score = clamp_unit((polarity + 1.0) / 2.0);
        let label = SentimentLabel::from_score(score);

        Ok(SentimentAnalysis {
            score,
            label,
            details: format!("Sentiment: {} (polarity: {:.2})", label, polarity),
            polarity: Some(polarity),
            breakdown: Some(breakdown),
        })
    }

    /// Fraction of the reference's keywords found in the transcript.
    /// A missing reference scores a neutral 0.5 rather than penalizing.
    pub fn analyze_keyword_match(&self, transcript: &str, reference_text: &str) -> KeywordMatchAnalysis {
        if reference_text.trim().is_empty() || transcript.trim().is_empty() {
            return KeywordMatchAnalysis {
                score: NEUTRAL_SCORE,
                details: "No ideal answer provided for comparison".to_string(),
                matched_keywords: Vec::new(),
                total_reference_keywords: None,
            };
        }

        let transcript_keywords = self.text_processor.keywords(transcript);
        let reference_keywords = self.text_processor.keywords(reference_text);

        if reference_keywords.is_empty() {
            return KeywordMatchAnalysis {
                score: NEUTRAL_SCORE,
                details: "No meaningful keywords in ideal answer".to_string(),
                matched_keywords: Vec::new(),
                total_reference_keywords: Some(0),
            };
        }

        let mut matched_keywords: Vec<String> = transcript_keywords
            .intersection(&reference_keywords)
            .cloned()
            .collect();
        matched_keywords.sort();

        let score = clamp_unit(ratio(matched_keywords.len(), reference_keywords.len()));

        KeywordMatchAnalysis {
            score,
            details: format!(
                "Matched {}/{} keywords",
                matched_keywords.len(),
                reference_keywords.len()
            ),
            matched_keywords,
            total_reference_keywords: Some(reference_keywords.len()),
        }
    }

    pub fn analyze_fluency(&self, transcript: &str) -> FluencyAnalysis {
        if transcript.trim().is_empty() {
            return FluencyAnalysis {
                score: 0.0,
                details: NO_SPEECH.to_string(),
                repetition_ratio: None,
                completeness_ratio: None,
            };
        }

        let words = self.text_processor.words(transcript);
        let unique_words = words.iter().collect::<std::collections::HashSet<_>>().len();
        let repetition_ratio = 1.0 - ratio(unique_words, words.len());

        // Empty fragments, such as the tail after a final terminator, count as sentences.
        let complete_sentences = self
            .text_processor
            .split_sentences(transcript)
            .iter()
            .filter(|s| s.split_whitespace().count() >= COMPLETE_SENTENCE_MIN_WORDS)
            .count();
        let completeness_ratio = ratio(
            complete_sentences,
            self.text_processor.sentence_fragment_count(transcript),
        );

        let score = clamp_unit((1.0 - repetition_ratio) * completeness_ratio);

        FluencyAnalysis {
            score,
            details: format!(
                "Fluency: {:.2} (repetition: {:.1}%)",
                score,
                repetition_ratio * 100.0
            ),
            repetition_ratio: Some(repetition_ratio),
            completeness_ratio: Some(completeness_ratio),
        }
    }

    pub fn analyze_confidence(&self, audio_features: Option<&AudioFeatureSummary>) -> ConfidenceAnalysis {
        let Some(features) = audio_features else {
            return ConfidenceAnalysis {
                score: NEUTRAL_SCORE,
                details: NO_AUDIO.to_string(),
                volume_score: None,
                pitch_score: None,
                pause_penalty: None,
                silence_penalty: None,
            };
        };

        let volume_score = (features.volume / 0.1).clamp(0.0, 1.0);
        let pause_penalty = (features.pause_count as f32 * 0.05).min(0.3);
        let silence_penalty = features.silence_ratio * 0.2;
        let pitch_score = clamp_unit(1.0 - (features.pitch_variation - 0.1).abs() * 5.0);

        let score = clamp_unit((volume_score + pitch_score) / 2.0 - pause_penalty - silence_penalty);

        ConfidenceAnalysis {
            score,
            details: format!("Confidence: {:.2} (volume: {:.2})", score, volume_score),
            volume_score: Some(volume_score),
            pitch_score: Some(pitch_score),
            pause_penalty: Some(pause_penalty),
            silence_penalty: Some(silence_penalty),
        }
    }

    pub fn analyze_speech_quality(&self, audio_features: Option<&AudioFeatureSummary>) -> SpeechQualityAnalysis {
        let Some(features) = audio_features else {
            return SpeechQualityAnalysis {
                score: NEUTRAL_SCORE,
                details: NO_AUDIO.to_string(),
                rate_score: None,
                silence_score: None,
                consistency_score: None,
            };
        };

        let rate_score = if features.speech_rate > 0.0 {
            1.0 - (features.speech_rate - OPTIMAL_SPEECH_RATE).abs() / OPTIMAL_SPEECH_RATE
        } else {
            NEUTRAL_SCORE
        };
        let silence_score = 1.0 - features.silence_ratio;
        let consistency_score = clamp_unit(1.0 - features.volume_std * 10.0);

        let score = clamp_unit((rate_score + silence_score + consistency_score) / 3.0);

        SpeechQualityAnalysis {
            score,
            details: format!(
                "Quality: {:.2} (rate: {:.1} WPM)",
                score, features.speech_rate
            ),
            rate_score: Some(rate_score),
            silence_score: Some(silence_score),
            consistency_score: Some(consistency_score),
        }
    }

    /// Weighted sum of the five weighted metrics. Speech quality is not weighted.
    pub fn calculate_overall_score(
        &self,
        clarity: &ClarityAnalysis,
        confidence: &ConfidenceAnalysis,
        sentiment: &SentimentAnalysis,
        keyword_match: &KeywordMatchAnalysis,
        fluency: &FluencyAnalysis,
    ) -> OverallScore {
        let weighted = [
            (clarity.score, self.weights.clarity_weight),
            (confidence.score, self.weights.confidence_weight),
            (sentiment.score, self.weights.sentiment_weight),
            (keyword_match.score, self.weights.keyword_weight),
            (fluency.score, self.weights.fluency_weight),
        ];

        let sum: f64 = weighted
            .iter()
            .map(|(score, weight)| *score as f64 * *weight as f64)
            .sum();
        let grade = Grade::from_weighted_sum(sum);

        OverallScore::graded(clamp_unit(sum as f32), grade)
    }
}

fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
