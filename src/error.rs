//! Error handling for the interview analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// The sentiment capability could not score the transcript.
    /// Never defaulted: a made-up sentiment score would skew the overall grade.
    #[error("Sentiment scoring unavailable: {0}")]
    SentimentUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl From<toml::de::Error> for AnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        AnalyzerError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}

impl From<aho_corasick::BuildError> for AnalyzerError {
    fn from(err: aho_corasick::BuildError) -> Self {
        AnalyzerError::TextProcessing(format!("Failed to build filler matcher: {}", err))
    }
}
