//! Language-model analysis of weekly reports
//!
//! Every failure on this boundary is turned into a fixed-shape fallback
//! result, so rendering and notification never see an error.

mod analyzer;
mod fallback;
pub mod prompts;

pub use analyzer::{AnalyzeError, Analyzer, OpenAiAnalyzer};
pub use fallback::fallback_result;
