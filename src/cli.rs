//! CLI interface for the interview analyzer

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "interview-analyzer")]
#[command(about = "Score mock interview answers and generate feedback")]
#[command(long_about = "Analyze interview responses for clarity, sentiment, keyword coverage, fluency, vocal confidence and speech quality, then grade them and suggest improvements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single answer
    #[command(group(ArgGroup::new("response").required(true).args(["transcript", "text"])))]
    #[command(group(ArgGroup::new("reference").args(["ideal", "ideal_text"])))]
    Analyze {
        /// Path to the answer transcript (TXT, MD)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Answer text given inline
        #[arg(long)]
        text: Option<String>,

        /// Path to an ideal answer or job description (TXT, MD, PDF)
        #[arg(short, long)]
        ideal: Option<PathBuf>,

        /// Ideal answer given inline
        #[arg(long)]
        ideal_text: Option<String>,

        /// Path to a JSON audio feature summary
        #[arg(short, long)]
        audio: Option<PathBuf>,

        /// The question that was answered
        #[arg(short, long)]
        question: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Analyze every answer of a session plan (TOML or JSON)
    Session {
        /// Path to the session plan
        #[arg(short, long)]
        plan: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the stock interview questions
    Questions {
        /// Interview type: technical, behavioral, general
        #[arg(short = 't', long = "type")]
        interview_type: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, text, json, markdown, html (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Show auxiliary measurements for every metric
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.clarity_weight")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_exactly_one_response_source() {
        assert!(Cli::try_parse_from(["interview-analyzer", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "interview-analyzer", "analyze", "--text", "hi", "--transcript", "a.txt",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "interview-analyzer", "analyze", "--text", "I led the team.", "--ideal-text", "leadership",
            "-o", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { text, ideal_text, output, .. } => {
                assert_eq!(text.as_deref(), Some("I led the team."));
                assert_eq!(ideal_text.as_deref(), Some("leadership"));
                assert_eq!(output.output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["interview-analyzer", "questions", "--type", "general", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("a.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("a.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("a"), &["txt"]).is_err());
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Text);
    }
}
