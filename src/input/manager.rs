//! Input manager for transcripts, reference answers and audio feature files

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::metrics::AudioFeatureSummary;
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a transcript or reference answer, routing on the file extension.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        ensure_exists(path)?;

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "Unsupported text file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Read an `AudioFeatureSummary` from a JSON file. Missing fields default to 0.
    pub async fn load_audio_features(&self, path: &Path) -> Result<AudioFeatureSummary> {
        ensure_exists(path)?;

        if self.detect_file_type(path)? != FileType::Json {
            return Err(AnalyzerError::UnsupportedFormat(format!(
                "Audio features must be a JSON file: {}",
                path.display()
            )));
        }

        info!("Loading audio features: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let features: AudioFeatureSummary = serde_json::from_str(&content)?;
        Ok(features)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            AnalyzerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AnalyzerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )))
    }
}
