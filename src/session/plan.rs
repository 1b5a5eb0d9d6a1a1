//! Session plans: a TOML or JSON file listing the questions and answers of an interview
//!
//! ```toml
//! interview_type = "technical"
//!
//! [[turns]]
//! question = "How do you approach debugging complex issues?"
//! transcript_file = "answers/debugging.txt"
//! ideal_answer = "Reproduce, isolate, bisect, add logging, write a regression test."
//! audio_file = "audio/debugging.json"
//! ```
//!
//! Relative file paths resolve against the directory containing the plan.
//! A turn without a `question` takes the stock question at its position.

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::InputManager;
use crate::processing::metrics::AudioFeatureSummary;
use crate::session::InterviewType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default)]
    pub turns: Vec<PlannedTurn>,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannedTurn {
    pub question: Option<String>,
    pub transcript: Option<String>,
    pub transcript_file: Option<PathBuf>,
    pub ideal_answer: Option<String>,
    pub ideal_answer_file: Option<PathBuf>,
    pub audio_features: Option<AudioFeatureSummary>,
    pub audio_file: Option<PathBuf>,
}

/// A planned turn with every file loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTurn {
    pub question: String,
    pub transcript: String,
    pub ideal_answer: String,
    pub audio_features: Option<AudioFeatureSummary>,
}

impl SessionPlan {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "Session plan does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut plan: SessionPlan = match FileType::from_path(path) {
            Some(FileType::Json) => serde_json::from_str(&content)?,
            _ if path.extension().and_then(|e| e.to_str()) == Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "Session plans must be .toml or .json: {}",
                    path.display()
                )))
            }
        };

        plan.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(plan)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load every referenced file and fill in missing questions.
    pub async fn resolve(&self, input: &mut InputManager) -> Result<Vec<ResolvedTurn>> {
        if self.turns.is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "Session plan contains no turns".to_string(),
            ));
        }

        let mut resolved = Vec::with_capacity(self.turns.len());
        for (index, turn) in self.turns.iter().enumerate() {
            resolved.push(self.resolve_turn(index, turn, input).await?);
        }
        Ok(resolved)
    }

    async fn resolve_turn(
        &self,
        index: usize,
        turn: &PlannedTurn,
        input: &mut InputManager,
    ) -> Result<ResolvedTurn> {
        let position = index + 1;

        let question = match &turn.question {
            Some(question) => question.clone(),
            None => self
                .interview_type
                .question(index)
                .map(String::from)
                .ok_or_else(|| {
                    AnalyzerError::InvalidInput(format!(
                        "Turn {} needs a question for a custom interview",
                        position
                    ))
                })?,
        };

        let transcript = match (&turn.transcript, &turn.transcript_file) {
            (Some(text), None) => text.clone(),
            (None, Some(file)) => input.extract_text(&self.resolve_path(file)).await?,
            (Some(_), Some(_)) => return Err(both_given(position, "transcript", "transcript_file")),
            (None, None) => {
                return Err(AnalyzerError::InvalidInput(format!(
                    "Turn {} has neither transcript nor transcript_file",
                    position
                )))
            }
        };

        let ideal_answer = match (&turn.ideal_answer, &turn.ideal_answer_file) {
            (Some(text), None) => text.clone(),
            (None, Some(file)) => input.extract_text(&self.resolve_path(file)).await?,
            (None, None) => String::new(),
            (Some(_), Some(_)) => {
                return Err(both_given(position, "ideal_answer", "ideal_answer_file"))
            }
        };

        let audio_features = match (&turn.audio_features, &turn.audio_file) {
            (Some(features), None) => Some(*features),
            (None, Some(file)) => Some(input.load_audio_features(&self.resolve_path(file)).await?),
            (None, None) => None,
            (Some(_), Some(_)) => return Err(both_given(position, "audio_features", "audio_file")),
        };

        Ok(ResolvedTurn {
            question,
            transcript,
            ideal_answer,
            audio_features,
        })
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn both_given(position: usize, inline: &str, file: &str) -> AnalyzerError {
    AnalyzerError::InvalidInput(format!(
        "Turn {} sets both {} and {}; use one",
        position, inline, file
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_plan(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_toml_plan_resolves_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("answers")).unwrap();
        std::fs::write(dir.path().join("answers/one.txt"), "I bisected the regression.").unwrap();
        std::fs::write(dir.path().join("audio.json"), r#"{"volume": 0.05, "speech_rate": 120}"#).unwrap();

        let path = write_plan(
            dir.path(),
            "plan.toml",
            r#"
interview_type = "technical"

[[turns]]
transcript_file = "answers/one.txt"
ideal_answer = "bisect regression"
audio_file = "audio.json"

[[turns]]
question = "Why Rust?"
transcript = "Memory safety without a garbage collector."
"#,
        );

        let plan = SessionPlan::load(&path).unwrap();
        assert_eq!(plan.interview_type, InterviewType::Technical);
        assert_eq!(plan.base_dir(), dir.path());

        let turns = plan.resolve(&mut InputManager::new()).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].question, InterviewType::Technical.questions()[0]);
        assert_eq!(turns[0].transcript, "I bisected the regression.");
        assert_eq!(turns[0].audio_features.unwrap().speech_rate, 120.0);
        assert_eq!(turns[1].question, "Why Rust?");
        assert_eq!(turns[1].ideal_answer, "");
        assert!(turns[1].audio_features.is_none());
    }

    #[tokio::test]
    async fn test_json_plan_with_inline_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_plan(
            dir.path(),
            "plan.json",
            r#"{"interview_type": "custom", "turns": [
                {"question": "Q?", "transcript": "A.", "audio_features": {"volume": 0.1}}
            ]}"#,
        );

        let turns = SessionPlan::load(&path)
            .unwrap()
            .resolve(&mut InputManager::new())
            .await
            .unwrap();
        assert_eq!(turns[0].audio_features.unwrap().volume, 0.1);
    }

    #[tokio::test]
    async fn test_invalid_turns_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let custom_without_question = write_plan(
            dir.path(),
            "custom.toml",
            "interview_type = \"custom\"\n[[turns]]\ntranscript = \"A.\"\n",
        );
        let both_transcripts = write_plan(
            dir.path(),
            "both.toml",
            "[[turns]]\ntranscript = \"A.\"\ntranscript_file = \"a.txt\"\n",
        );
        let empty = write_plan(dir.path(), "empty.toml", "interview_type = \"general\"\n");

        for path in [custom_without_question, both_transcripts, empty] {
            let result = SessionPlan::load(&path)
                .unwrap()
                .resolve(&mut InputManager::new())
                .await;
            assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))), "{}", path.display());
        }
    }

    #[test]
    fn test_unsupported_plan_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_plan(dir.path(), "plan.yaml", "turns: []");
        assert!(matches!(
            SessionPlan::load(&path),
            Err(AnalyzerError::UnsupportedFormat(_))
        ));
    }
}
