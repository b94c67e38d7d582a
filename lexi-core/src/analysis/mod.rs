//! Reading analysis engine.
//!
//! Turns reading-session telemetry into per-user history, practice
//! recommendations, progress reports and reading profiles.

/// `ReadingAnalyzer`, the engine owning every user's history.
pub mod analyzer;

/// Per-user history records and session input.
pub mod history;

/// First versus latest session comparison.
pub mod improvement;

/// Reading profiles and display settings by speed.
pub mod profile;

/// Difficult-word grouping into practice recommendations.
pub mod recommendation;
