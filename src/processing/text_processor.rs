//! Text tokenization, sentence splitting and stop-word filtering

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use unicode_segmentation::UnicodeSegmentation;

static SHARED: OnceLock<Arc<TextProcessor>> = OnceLock::new();

pub struct TextProcessor {
    stop_words: HashSet<String>,
    sentence_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let sentence_regex = Regex::new(r"[.!?]+").expect("Invalid sentence regex");

        Self {
            stop_words: Self::create_stop_words(),
            sentence_regex,
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> Arc<TextProcessor> {
        SHARED.get_or_init(|| Arc::new(TextProcessor::new())).clone()
    }

    /// Default stop words plus `extra` (lower-cased).
    pub fn with_extra_stop_words<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut processor = Self::new();
        processor
            .stop_words
            .extend(extra.iter().map(|w| w.as_ref().trim().to_lowercase()));
        processor
    }

    /// Lower-cased whitespace tokens, punctuation kept.
    pub fn words(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    /// Non-empty, trimmed fragments between runs of `.`, `!` and `?`.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_regex
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Number of fragments the sentence regex yields, empty ones included.
    /// `"Done."` is two fragments: `"Done"` and the empty tail.
    pub fn sentence_fragment_count(&self, text: &str) -> usize {
        self.sentence_regex.split(text).count()
    }

    /// Alphabetic, lower-cased, non-stop-word vocabulary of `text`.
    pub fn keywords(&self, text: &str) -> HashSet<String> {
        let normalized = self.normalize_unicode(text);

        normalized
            .unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().all(char::is_alphabetic))
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }

    /// Lower-cased Unicode words, apostrophes normalized. Used by the sentiment lexicon.
    pub fn sentiment_tokens(&self, text: &str) -> Vec<String> {
        self.normalize_unicode(text)
            .unicode_words()
            .map(|word| word.to_lowercase())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Normalize Unicode characters
    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'', // Smart quotes to regular quotes
                '\u{201C}' | '\u{201D}' => '"',  // Smart double quotes
                '\u{2013}' | '\u{2014}' => '-',  // En dash, em dash to hyphen
                '\u{2026}' => '.',               // Ellipsis to period
                _ => c,
            })
            .collect()
    }

    /// Standard English stop words
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
            "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
            "yourselves", "he", "him", "his", "himself", "she", "she's", "her",
            "hers", "herself", "it", "it's", "its", "itself", "they", "them",
            "their", "theirs", "themselves", "what", "which", "who", "whom",
            "this", "that", "that'll", "these", "those", "am", "is", "are",
            "was", "were", "be", "been", "being", "have", "has", "had", "having",
            "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
            "or", "because", "as", "until", "while", "of", "at", "by", "for",
            "with", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "below", "to", "from", "up", "down",
            "in", "out", "on", "off", "over", "under", "again", "further",
            "then", "once", "here", "there", "when", "where", "why", "how",
            "all", "any", "both", "each", "few", "more", "most", "other",
            "some", "such", "no", "nor", "not", "only", "own", "same", "so",
            "than", "too", "very", "s", "t", "can", "will", "just", "don",
            "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
            "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
            "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
            "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
            "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
            "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
            "won", "won't", "wouldn", "wouldn't",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_punctuation() {
        let processor = TextProcessor::new();
        let words = processor.words("Um, I  built\tAPIs.");
        assert_eq!(words, vec!["um,", "i", "built", "apis."]);
    }

    #[test]
    fn test_sentence_split_drops_empty_fragments() {
        let processor = TextProcessor::new();
        let sentences = processor.split_sentences("First one. Second one!! Third?  ");
        assert_eq!(sentences, vec!["First one", "Second one", "Third"]);
        assert!(processor.split_sentences("...").is_empty());
    }

    #[test]
    fn test_fragment_count_keeps_empty_fragments() {
        let processor = TextProcessor::new();
        assert_eq!(processor.sentence_fragment_count("I shipped it."), 2);
        assert_eq!(processor.sentence_fragment_count("I shipped it"), 1);
        assert_eq!(processor.sentence_fragment_count("First one. Second one!! Third?  "), 4);
        assert_eq!(processor.sentence_fragment_count("..."), 2);
    }

    #[test]
    fn test_keywords_filter_stop_words_and_non_alpha() {
        let processor = TextProcessor::new();
        let keywords = processor.keywords("I have 5 years of experience with Python, and Rust2021!");

        assert!(keywords.contains("years"));
        assert!(keywords.contains("experience"));
        assert!(keywords.contains("python"));
        assert!(!keywords.contains("i"));
        assert!(!keywords.contains("with"));
        assert!(!keywords.contains("5"));
        assert!(!keywords.contains("rust2021"));
    }

    #[test]
    fn test_extra_stop_words() {
        let processor = TextProcessor::with_extra_stop_words(&["Python"]);
        assert!(processor.is_stop_word("python"));
        assert!(!processor.keywords("Python programming").contains("python"));
        assert!(processor.stop_word_count() > TextProcessor::new().stop_word_count());
    }

    #[test]
    fn test_shared_instance_is_reused() {
        let a = TextProcessor::shared();
        let b = TextProcessor::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sentiment_tokens_normalize_apostrophes() {
        let processor = TextProcessor::new();
        let tokens = processor.sentiment_tokens("I don\u{2019}t like it");
        assert_eq!(tokens, vec!["i", "don't", "like", "it"]);
    }
}
