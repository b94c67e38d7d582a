//! Reading-assistance core library.
//!
//! This crate provides the two engines behind the reading assistant:
//! - A word-level n-gram model for next-word prediction and prefix completion
//! - A reading-session analyzer deriving recommendations and progress metrics
//! - Practice-paragraph helpers (prompts, age filtering, template fallbacks)
//!
//! The engines are independent and own their state exclusively; callers
//! hold one instance of each and serialize access to them.

/// Language model engine.
pub mod model;

/// Reading analysis engine.
pub mod analysis;

/// Practice paragraph domain logic.
pub mod paragraph;

/// Error types for both engines.
pub mod error;

/// I/O utilities (line reading, atomic writes).
///
/// Not exposed
pub(crate) mod io;

pub use analysis::analyzer::ReadingAnalyzer;
pub use error::{AnalysisError, ModelError};
pub use model::predictor::WordPredictor;
