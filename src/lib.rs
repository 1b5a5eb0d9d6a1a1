//! Interview response analyzer library
//!
//! Scores spoken or written interview answers on clarity, sentiment, keyword
//! coverage, fluency, vocal confidence and speech quality, grades them, and
//! produces feedback and reports.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use processing::analyzer::ResponseAnalyzer;
pub use processing::feedback::generate_feedback;
pub use processing::metrics::{AnalysisResult, AudioFeatureSummary, Grade};
