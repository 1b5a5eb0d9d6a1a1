//! Interview analyzer: score mock interview answers and generate feedback

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interview_analyzer::cli::{self, Cli, Commands, ConfigAction, OutputArgs};
use interview_analyzer::config::{Config, OutputFormat};
use interview_analyzer::error::{AnalyzerError, Result};
use interview_analyzer::input::InputManager;
use interview_analyzer::output::{save_report_to_file, suggest_filename, InterviewReport, ReportGenerator};
use interview_analyzer::processing::analyzer::ResponseAnalyzer;
use interview_analyzer::session::{InterviewSession, InterviewType, SessionPlan};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_QUESTION: &str = "Interview response";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run_command(cli.command, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            transcript,
            text,
            ideal,
            ideal_text,
            audio,
            question,
            output,
        } => {
            let config = Config::load(config_path.as_deref())?;
            let mut input_manager = InputManager::new();
            let stem = transcript
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "interview".to_string());

            let response = match (text, transcript) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    cli::validate_file_extension(&path, &["txt", "md", "markdown"])
                        .map_err(|e| AnalyzerError::InvalidInput(format!("Transcript file: {}", e)))?;
                    input_manager.extract_text(&path).await?
                }
                (None, None) => {
                    return Err(AnalyzerError::InvalidInput(
                        "Provide --transcript or --text".to_string(),
                    ))
                }
            };

            let reference = match (ideal_text, ideal) {
                (Some(text), _) => text,
                (None, Some(path)) => input_manager.extract_text(&path).await?,
                (None, None) => String::new(),
            };

            let audio_features = match &audio {
                Some(path) => Some(input_manager.load_audio_features(path).await?),
                None => None,
            };

            info!("Analyzing response ({} characters)", response.len());
            let analyzer = ResponseAnalyzer::from_config(&config)?;
            let mut session = InterviewSession::new(InterviewType::Custom);
            session.record(
                question.as_deref().unwrap_or(DEFAULT_QUESTION),
                &response,
                &reference,
                audio_features.as_ref(),
                &analyzer,
            )?;

            let report = InterviewReport::from_session(&session);
            emit_report(&report, &output, &config, &stem)?;
        }

        Commands::Session { plan, output } => {
            let config = Config::load(config_path.as_deref())?;
            let session_plan = SessionPlan::load(&plan)?;
            let turns = session_plan.resolve(&mut InputManager::new()).await?;

            let analyzer = ResponseAnalyzer::from_config(&config)?;
            let mut session = InterviewSession::new(session_plan.interview_type);

            let progress = ProgressBar::new(turns.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );

            for turn in &turns {
                progress.set_message(truncate_text(&turn.question, 40));
                session.record(
                    &turn.question,
                    &turn.transcript,
                    &turn.ideal_answer,
                    turn.audio_features.as_ref(),
                    &analyzer,
                )?;
                progress.inc(1);
            }
            progress.finish_and_clear();
            info!("Analyzed {} answers from {}", session.len(), plan.display());

            let report = InterviewReport::from_session(&session);
            let stem = plan.to_string_lossy().to_string();
            emit_report(&report, &output, &config, &stem)?;
        }

        Commands::Questions { interview_type } => {
            let types = match interview_type {
                Some(name) => vec![name
                    .parse::<InterviewType>()
                    .map_err(AnalyzerError::InvalidInput)?],
                None => InterviewType::ALL.to_vec(),
            };

            for interview_type in types {
                let questions = interview_type.questions();
                if questions.is_empty() {
                    continue;
                }
                println!("{}", format!("{} questions", interview_type).bold());
                for (i, question) in questions.iter().enumerate() {
                    println!("  {}. {}", i + 1, question);
                }
                println!();
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let config = Config::load(Some(path.as_path())).or_else(|e| {
                        if path.exists() {
                            Err(e)
                        } else {
                            Ok(Config::default())
                        }
                    })?;
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Scoring Weights:");
                    println!("  Clarity: {:.1}%", config.scoring.clarity_weight * 100.0);
                    println!("  Confidence: {:.1}%", config.scoring.confidence_weight * 100.0);
                    println!("  Sentiment: {:.1}%", config.scoring.sentiment_weight * 100.0);
                    println!("  Keyword match: {:.1}%", config.scoring.keyword_weight * 100.0);
                    println!("  Fluency: {:.1}%", config.scoring.fluency_weight * 100.0);
                    println!("\nAnalysis:");
                    println!("  Filler matching: {:?}", config.analysis.filler_matching);
                    println!("  Filler words: {}", config.analysis.filler_words.join(", "));
                    println!("  Audio analysis: {}", config.analysis.include_audio_analysis);
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  Colors: {}", config.output.color_output);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Set { key, value }) => {
                    let mut config = if path.exists() {
                        Config::load_from(&path)?
                    } else {
                        Config::default()
                    };
                    config.set_value(&key, &value)?;
                    config.save_to(&path)?;
                    println!("✅ {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

fn emit_report(report: &InterviewReport, args: &OutputArgs, config: &Config, stem: &str) -> Result<()> {
    let format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(AnalyzerError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = args.detailed || config.output.detailed;
    let use_colors = config.output.color_output && args.save.is_none();

    let generator = ReportGenerator::with_options(use_colors, detailed, true, true, true);
    let content = generator.generate_report(report, &format)?;

    match &args.save {
        Some(path) => {
            let target = resolve_save_path(path, &format, stem);
            save_report_to_file(&content, &target)?;
            println!("📝 Report saved to {}", target.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

/// A directory target gets a generated file name.
fn resolve_save_path(path: &Path, format: &OutputFormat, stem: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, stem, true))
    } else {
        path.to_path_buf()
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_length).collect();
        let cut = truncated.rfind(' ').unwrap_or(truncated.len());
        format!("{}...", &truncated[..cut])
    }
}
