//! Core library for seo-lint.
//!
//! Keyword placement, density, and readability checks for rich-text HTML,
//! with Persian/Arabic-aware text normalization and keyword suggestion
//! mining. Every analysis function is pure and synchronous; only
//! configuration loading touches the filesystem.
//!
//! # Modules
//!
//! - [`analyzer`] - Full analysis pass producing an [`AnalysisReport`]
//! - [`checks`] - Individual rule evaluators and the score aggregator
//! - [`keywords`] - Keyword candidate mining
//! - [`html`] - Text extraction from HTML fragments
//! - [`matcher`] - Whole-word keyword matching
//! - [`normalize`] - Script and whitespace normalization
//! - [`config`] - Configuration loading and thresholds
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use seo_lint_core::{Thresholds, analyze};
//!
//! let html = "<h1>Gardening tips</h1><p>This article is about gardening.</p>";
//! let report = analyze(html, "gardening", &[], &Thresholds::default());
//! assert!(report.checks.iter().any(|c| c.is_success()));
//! println!("score: {}", report.score);
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod checks;
pub mod config;
pub mod error;
pub mod html;
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod text;
pub mod word_lists;

pub use analyzer::{AnalysisReport, analyze, analyze_document};
pub use checks::{CheckKind, CheckResult, CheckStatus, DensityMeasurement, ScoreBand};
pub use config::{Config, ConfigLoader, DensityProfile, LogLevel, Thresholds};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use html::Document;
pub use keywords::{KeywordCandidate, suggest_keywords};
pub use matcher::KeywordMatcher;
pub use normalize::normalize;

/// Default input size ceiling: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject input larger than `limit` bytes. `None` disables the check.
pub const fn check_input_size(size: usize, limit: Option<usize>) -> AnalysisResult<()> {
    match limit {
        Some(limit) if size > limit => Err(AnalysisError::InputTooLarge { size, limit }),
        _ => Ok(()),
    }
}
