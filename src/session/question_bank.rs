//! Stock interview questions by interview type

use serde::{Deserialize, Serialize};
use std::fmt;

const TECHNICAL_QUESTIONS: &[&str] = &[
    "Tell me about a challenging technical problem you solved.",
    "How do you approach debugging complex issues?",
    "Describe your experience with version control systems.",
    "What programming languages are you most comfortable with?",
    "How do you ensure code quality in your projects?",
];

const BEHAVIORAL_QUESTIONS: &[&str] = &[
    "Tell me about a time you had to work with a difficult team member.",
    "Describe a situation where you had to learn something new quickly.",
    "Give me an example of a time you failed and what you learned.",
    "Tell me about a time you had to meet a tight deadline.",
    "Describe a situation where you had to persuade someone to see your point of view.",
];

const GENERAL_QUESTIONS: &[&str] = &[
    "Tell me about yourself.",
    "Why are you interested in this position?",
    "What are your greatest strengths?",
    "What are your areas for improvement?",
    "Where do you see yourself in 5 years?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    #[default]
    Technical,
    Behavioral,
    General,
    /// Questions supplied by the caller; no stock questions.
    Custom,
}

impl InterviewType {
    pub const ALL: [InterviewType; 4] = [
        InterviewType::Technical,
        InterviewType::Behavioral,
        InterviewType::General,
        InterviewType::Custom,
    ];

    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            InterviewType::Technical => TECHNICAL_QUESTIONS,
            InterviewType::Behavioral => BEHAVIORAL_QUESTIONS,
            InterviewType::General => GENERAL_QUESTIONS,
            InterviewType::Custom => &[],
        }
    }

    /// Stock question `index`, wrapping around the bank. `None` for custom interviews.
    pub fn question(&self, index: usize) -> Option<&'static str> {
        let questions = self.questions();
        if questions.is_empty() {
            None
        } else {
            Some(questions[index % questions.len()])
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InterviewType::Technical => "Technical",
            InterviewType::Behavioral => "Behavioral",
            InterviewType::General => "General",
            InterviewType::Custom => "Custom",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(InterviewType::Technical),
            "behavioral" | "behavioural" => Ok(InterviewType::Behavioral),
            "general" => Ok(InterviewType::General),
            "custom" => Ok(InterviewType::Custom),
            _ => Err(format!(
                "Invalid interview type: {}. Supported: technical, behavioral, general, custom",
                s
            )),
        }
    }
}
