//! Configuration management for the interview analyzer

use crate::error::{AnalyzerError, Result};
use crate::processing::fillers::{FillerMatching, DEFAULT_FILLER_WORDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Weights of the overall score. `speech_quality` is reported but never weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub clarity_weight: f32,
    pub confidence_weight: f32,
    pub sentiment_weight: f32,
    pub keyword_weight: f32,
    pub fluency_weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub filler_matching: FillerMatching,
    pub filler_words: Vec<String>,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
    pub include_audio_analysis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Text,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clarity_weight: 0.25,
            confidence_weight: 0.25,
            sentiment_weight: 0.15,
            keyword_weight: 0.20,
            fluency_weight: 0.15,
        }
    }
}

impl ScoringConfig {
    const WEIGHT_TOLERANCE: f32 = 1e-3;

    pub fn total(&self) -> f32 {
        self.clarity_weight
            + self.confidence_weight
            + self.sentiment_weight
            + self.keyword_weight
            + self.fluency_weight
    }

    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("clarity_weight", self.clarity_weight),
            ("confidence_weight", self.confidence_weight),
            ("sentiment_weight", self.sentiment_weight),
            ("keyword_weight", self.keyword_weight),
            ("fluency_weight", self.fluency_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AnalyzerError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > Self::WEIGHT_TOLERANCE {
            return Err(AnalyzerError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                total
            )));
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filler_matching: FillerMatching::default(),
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|s| s.to_string()).collect(),
            extra_stop_words: Vec::new(),
            include_audio_analysis: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the per-user location when `None`.
    /// The per-user file is created with defaults on first use; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AnalyzerError::Configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.scoring.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("interview-analyzer")
            .join("config.toml")
    }

    /// Update a single dotted key, e.g. `scoring.clarity_weight`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "scoring.clarity_weight" => self.scoring.clarity_weight = parse_value(key, value)?,
            "scoring.confidence_weight" => self.scoring.confidence_weight = parse_value(key, value)?,
            "scoring.sentiment_weight" => self.scoring.sentiment_weight = parse_value(key, value)?,
            "scoring.keyword_weight" => self.scoring.keyword_weight = parse_value(key, value)?,
            "scoring.fluency_weight" => self.scoring.fluency_weight = parse_value(key, value)?,
            "analysis.filler_matching" => {
                self.analysis.filler_matching = value
                    .parse()
                    .map_err(AnalyzerError::Configuration)?;
            }
            "analysis.include_audio_analysis" => {
                self.analysis.include_audio_analysis = parse_value(key, value)?
            }
            "output.format" => {
                self.output.format = value.parse().map_err(AnalyzerError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(AnalyzerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        self.scoring.validate()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AnalyzerError::Configuration(format!("Invalid value for {}: {}", key, value)))
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, text, json, markdown, html",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.clarity_weight, 0.25);
        assert_eq!(scoring.confidence_weight, 0.25);
        assert_eq!(scoring.sentiment_weight, 0.15);
        assert_eq!(scoring.keyword_weight, 0.20);
        assert_eq!(scoring.fluency_weight, 0.15);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let scoring = ScoringConfig {
            clarity_weight: 0.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(scoring.validate(), Err(AnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let scoring = ScoringConfig {
            clarity_weight: -0.25,
            confidence_weight: 0.75,
            ..ScoringConfig::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.filler_matching = FillerMatching::Token;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(AnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("analysis.filler_matching", "token").unwrap();
        config.set_value("output.format", "json").unwrap();
        config.set_value("output.detailed", "true").unwrap();

        assert_eq!(config.analysis.filler_matching, FillerMatching::Token);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.detailed);

        // A lone weight change breaks the sum and is rejected.
        assert!(config.set_value("scoring.clarity_weight", "0.9").is_err());
        assert!(config.set_value("unknown.key", "1").is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
