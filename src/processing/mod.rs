//! Text processing and response analysis module

pub mod text_processor;
pub mod fillers;
pub mod sentiment;
pub mod metrics;
pub mod analyzer;
pub mod feedback;

