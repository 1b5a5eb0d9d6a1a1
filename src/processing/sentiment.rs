//! Sentiment capabilities consumed by the response analyzer
//!
//! Two independent capabilities are used: a polarity scorer producing a single
//! valence in [-1, 1], and an intensity scorer producing a compound/positive/
//! negative/neutral breakdown. Both are traits so hosted or model-backed scorers
//! can be injected; [`LexiconSentiment`] is the built-in rule-based implementation.

use crate::error::Result;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static SHARED: OnceLock<Arc<LexiconSentiment>> = OnceLock::new();

/// Produces a polarity in [-1, 1]; negative values mean negative sentiment.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f32>;
}

/// Produces a granular sentiment breakdown.
pub trait IntensityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> Result<SentimentBreakdown>;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    /// Normalized sum of valences in [-1, 1].
    pub compound: f32,
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
}

/// Lexicon-based sentiment with negation and intensifier handling.
pub struct LexiconSentiment {
    lexicon: HashMap<&'static str, f32>,
    intensifiers: HashMap<&'static str, f32>,
    text_processor: Arc<TextProcessor>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    const NEGATION_SCALAR: f32 = -0.5;
    const INTENSITY_NEGATION_SCALAR: f32 = -0.74;
    const INTENSITY_SCALE: f32 = 4.0;
    const EXCLAMATION_BOOST: f32 = 0.292;
    const MAX_EXCLAMATIONS: usize = 4;
    const COMPOUND_ALPHA: f32 = 15.0;
    const NEGATION_WINDOW: usize = 2;

    pub fn new() -> Self {
        Self {
            lexicon: VALENCE_LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            text_processor: TextProcessor::shared(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<LexiconSentiment> {
        SHARED.get_or_init(|| Arc::new(LexiconSentiment::new())).clone()
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    /// Valence of each sentiment-bearing token after intensifier and negation
    /// handling, on the lexicon's [-1, 1] scale.
    fn scored_valences(&self, tokens: &[String], negation_scalar: f32) -> Vec<Option<f32>> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let base = *self.lexicon.get(token.as_str())?;
                let mut valence = base;

                if i > 0 {
                    if let Some(multiplier) = self.intensifiers.get(tokens[i - 1].as_str()) {
                        valence *= multiplier;
                    }
                }

                let window_start = i.saturating_sub(Self::NEGATION_WINDOW);
                if tokens[window_start..i].iter().any(|t| is_negation(t)) {
                    valence *= negation_scalar;
                }

                Some(valence)
            })
            .collect()
    }
}

impl PolarityScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f32> {
        let tokens = self.text_processor.sentiment_tokens(text);
        let valences: Vec<f32> = self
            .scored_valences(&tokens, Self::NEGATION_SCALAR)
            .into_iter()
            .flatten()
            .collect();

        if valences.is_empty() {
            return Ok(0.0);
        }

        let mean = valences.iter().sum::<f32>() / valences.len() as f32;
        Ok(mean.clamp(-1.0, 1.0))
    }
}

impl IntensityScorer for LexiconSentiment {
    fn polarity_scores(&self, text: &str) -> Result<SentimentBreakdown> {
        let tokens = self.text_processor.sentiment_tokens(text);
        if tokens.is_empty() {
            return Ok(SentimentBreakdown::default());
        }

        let valences: Vec<Option<f32>> = self
            .scored_valences(&tokens, Self::INTENSITY_NEGATION_SCALAR)
            .into_iter()
            .map(|v| v.map(|v| v * Self::INTENSITY_SCALE))
            .collect();

        let mut sum: f32 = valences.iter().flatten().sum();

        let exclamations = text.matches('!').count().min(Self::MAX_EXCLAMATIONS);
        let emphasis = exclamations as f32 * Self::EXCLAMATION_BOOST;
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let compound = sum / (sum * sum + Self::COMPOUND_ALPHA).sqrt();

        let mut positive_sum = 0.0;
        let mut negative_sum = 0.0;
        let mut neutral_count = 0.0;
        for valence in &valences {
            match valence {
                Some(v) if *v > 0.0 => positive_sum += v + 1.0,
                Some(v) if *v < 0.0 => negative_sum += v - 1.0,
                _ => neutral_count += 1.0,
            }
        }

        let total = positive_sum + negative_sum.abs() + neutral_count;
        let (positive, negative, neutral) = if total > 0.0 {
            (
                positive_sum / total,
                negative_sum.abs() / total,
                neutral_count / total,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Ok(SentimentBreakdown {
            compound: round3(compound.clamp(-1.0, 1.0)),
            positive: round3(positive),
            negative: round3(negative),
            neutral: round3(neutral),
        })
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "none", "nobody", "nowhere",
    "cannot", "without", "hardly", "barely", "dont", "cant", "wont", "isnt", "wasnt",
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("truly", 1.2),
    ("quite", 1.1),
    ("so", 1.2),
    ("deeply", 1.3),
    ("absolutely", 1.4),
    ("particularly", 1.2),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.6),
];

/// Valences on a [-1, 1] scale, weighted toward vocabulary common in interview answers.
const VALENCE_LEXICON: &[(&str, f32)] = &[
    // Positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("outstanding", 0.9),
    ("amazing", 0.6),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("passionate", 0.5),
    ("eager", 0.3),
    ("motivated", 0.4),
    ("proud", 0.8),
    ("confident", 0.5),
    ("successful", 0.8),
    ("success", 0.6),
    ("successfully", 0.7),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("productive", 0.5),
    ("strong", 0.4),
    ("improve", 0.4),
    ("improved", 0.5),
    ("improvement", 0.4),
    ("achieve", 0.4),
    ("achieved", 0.5),
    ("accomplished", 0.6),
    ("helpful", 0.5),
    ("valuable", 0.5),
    ("rewarding", 0.6),
    ("interesting", 0.5),
    ("fun", 0.3),
    ("positive", 0.2),
    ("easy", 0.4),
    ("clear", 0.1),
    ("grateful", 0.6),
    ("thankful", 0.5),
    ("creative", 0.5),
    ("innovative", 0.5),
    ("reliable", 0.4),
    ("collaborative", 0.3),
    ("supportive", 0.4),
    ("perfect", 1.0),
    ("impressive", 0.7),
    ("smooth", 0.4),
    ("solved", 0.3),
    ("win", 0.8),
    ("won", 0.6),
    ("benefit", 0.3),
    ("opportunity", 0.2),
    ("growth", 0.2),
    ("learned", 0.2),
    ("curious", 0.2),
    ("skilled", 0.4),
    ("capable", 0.3),
    ("fortunate", 0.4),
    ("like", 0.1),
    ("well", 0.1),
    // Negative
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("poor", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("dislike", -0.4),
    ("difficult", -0.5),
    ("hard", -0.3),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.1),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("mistake", -0.4),
    ("mistakes", -0.4),
    ("wrong", -0.5),
    ("weak", -0.4),
    ("weakness", -0.3),
    ("stressful", -0.5),
    ("stressed", -0.5),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("angry", -0.5),
    ("upset", -0.5),
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("disappointed", -0.6),
    ("disappointing", -0.6),
    ("boring", -1.0),
    ("bored", -0.5),
    ("annoying", -0.8),
    ("annoyed", -0.6),
    ("confused", -0.4),
    ("confusing", -0.3),
    ("nervous", -0.3),
    ("worried", -0.4),
    ("afraid", -0.6),
    ("scared", -0.5),
    ("anxious", -0.3),
    ("unfortunately", -0.5),
    ("impossible", -0.7),
    ("useless", -0.5),
    ("lazy", -0.3),
    ("slow", -0.3),
    ("conflict", -0.3),
    ("struggle", -0.4),
    ("struggled", -0.4),
    ("negative", -0.3),
    ("messy", -0.3),
    ("broken", -0.4),
    ("blame", -0.4),
    ("quit", -0.2),
    ("toxic", -0.6),
    ("lost", -0.3),
    ("crash", -0.3),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_direction() {
        let sentiment = LexiconSentiment::new();

        let positive = sentiment.polarity("I really enjoyed the project and I am proud of the results").unwrap();
        let negative = sentiment.polarity("It was a terrible and frustrating experience").unwrap();
        let neutral = sentiment.polarity("The service runs on three machines").unwrap();

        assert!(positive > 0.0);
        assert!(negative < 0.0);
        assert_eq!(neutral, 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let sentiment = LexiconSentiment::new();
        let plain = sentiment.polarity("The result was good").unwrap();
        let negated = sentiment.polarity("The result was not good").unwrap();

        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_polarity_is_bounded() {
        let sentiment = LexiconSentiment::new();
        let polarity = sentiment.polarity("extremely excellent extremely perfect extremely wonderful").unwrap();
        assert!((-1.0..=1.0).contains(&polarity));
    }

    #[test]
    fn test_breakdown_proportions() {
        let sentiment = LexiconSentiment::new();
        let scores = sentiment.polarity_scores("I love this team, it is great!").unwrap();

        assert!(scores.compound > 0.0);
        assert!(scores.positive > scores.negative);
        let total = scores.positive + scores.negative + scores.neutral;
        assert!((total - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_breakdown_of_empty_text() {
        let sentiment = LexiconSentiment::new();
        assert_eq!(sentiment.polarity_scores("").unwrap(), SentimentBreakdown::default());
    }

    #[test]
    fn test_contraction_negation() {
        let sentiment = LexiconSentiment::new();
        let polarity = sentiment.polarity("I didn't enjoy it").unwrap();
        assert!(polarity < 0.0);
    }
}
