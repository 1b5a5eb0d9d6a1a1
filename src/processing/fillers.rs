//! Filler word detection for clarity scoring

use crate::error::Result;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

/// Fillers penalised by the clarity score.
pub const DEFAULT_FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "so", "well", "actually"];

/// How filler entries are matched against a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillerMatching {
    /// Compare each raw whitespace token (lower-cased, punctuation kept) to the filler list.
    /// Multi-word entries such as "you know" can never match in this mode.
    Token,
    /// Match fillers, including multi-word phrases, as whole words over the
    /// punctuation-stripped word stream.
    #[default]
    Phrase,
}

impl std::str::FromStr for FillerMatching {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token" => Ok(FillerMatching::Token),
            "phrase" => Ok(FillerMatching::Phrase),
            _ => Err(format!("Invalid filler matching mode: {}. Supported: token, phrase", s)),
        }
    }
}

pub struct FillerMatcher {
    fillers: Vec<String>,
    phrase_matcher: AhoCorasick,
    mode: FillerMatching,
}

impl FillerMatcher {
    pub fn new<S: AsRef<str>>(fillers: &[S], mode: FillerMatching) -> Result<Self> {
        let mut fillers: Vec<String> = fillers
            .iter()
            .map(|f| f.as_ref().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        fillers.sort();
        fillers.dedup();

        let phrase_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&fillers)?;

        Ok(Self {
            fillers,
            phrase_matcher,
            mode,
        })
    }

    pub fn with_defaults(mode: FillerMatching) -> Result<Self> {
        Self::new(DEFAULT_FILLER_WORDS, mode)
    }

    pub fn mode(&self) -> FillerMatching {
        self.mode
    }

    pub fn fillers(&self) -> &[String] {
        &self.fillers
    }

    /// Count filler occurrences in lower-cased whitespace tokens.
    /// A multi-word filler counts once per occurrence.
    pub fn count(&self, words: &[String]) -> usize {
        match self.mode {
            FillerMatching::Token => words
                .iter()
                .filter(|w| self.fillers.iter().any(|f| f == *w))
                .count(),
            FillerMatching::Phrase => self.count_phrases(words),
        }
    }

    fn count_phrases(&self, words: &[String]) -> usize {
        let stream = words
            .iter()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let bytes = stream.as_bytes();

        self.phrase_matcher
            .find_iter(&stream)
            .filter(|m| {
                let starts_word = m.start() == 0 || bytes[m.start() - 1] == b' ';
                let ends_word = m.end() == bytes.len() || bytes[m.end()] == b' ';
                starts_word && ends_word
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.to_lowercase().split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_phrase_mode_matches_multi_word_fillers() {
        let matcher = FillerMatcher::with_defaults(FillerMatching::Phrase).unwrap();
        let count = matcher.count(&words("Um, so I think, you know, it went well."));
        // um, so, you know, well
        assert_eq!(count, 4);
    }

    #[test]
    fn test_token_mode_keeps_literal_behavior() {
        let matcher = FillerMatcher::with_defaults(FillerMatching::Token).unwrap();
        let count = matcher.count(&words("Um, so I think, you know, it went well."));
        // Only the bare "so" token equals a filler entry.
        assert_eq!(count, 1);
    }

    #[test]
    fn test_phrase_mode_respects_word_boundaries() {
        let matcher = FillerMatcher::with_defaults(FillerMatching::Phrase).unwrap();
        assert_eq!(matcher.count(&words("I also likely welcomed the unwell")), 0);
        assert_eq!(matcher.count(&words("um um uh")), 3);
    }

    #[test]
    fn test_custom_fillers_are_normalized() {
        let matcher = FillerMatcher::new(&["  Kind   Of ", "basically"], FillerMatching::Phrase).unwrap();
        assert_eq!(matcher.fillers(), &["basically".to_string(), "kind of".to_string()]);
        assert_eq!(matcher.count(&words("It was kind of basically done")), 2);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("TOKEN".parse::<FillerMatching>().unwrap(), FillerMatching::Token);
        assert!("ngram".parse::<FillerMatching>().is_err());
    }
}
