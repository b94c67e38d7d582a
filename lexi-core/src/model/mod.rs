//! Language model engine.
//!
//! This module provides a word-level n-gram predictor, including:
//! - A tokenizer and a bundled training corpus (`Corpus`)
//! - Fixed-order count tables (`NGramModel`)
//! - A multi-order model with context back-off (`MultiGramModel`)
//! - Versioned snapshots of a trained model
//! - A high-level engine handling training, prediction and persistence (`WordPredictor`)

/// High-level engine: on-demand training, prediction, completion, persistence.
pub mod predictor;

/// Multi-order n-gram model composed of one `NGramModel` per window size.
///
/// Supports parallel training, merging, next-word prediction with back-off
/// and prefix completion.
pub mod multigram_model;

/// Fixed-order n-gram table (`n >= 1`).
pub mod ngram_model;

/// Training corpora: bundled categories, text and file sources.
pub mod corpus;

/// Versioned postcard snapshots of a trained model.
pub mod snapshot;

/// Word tokenizer and sentence sentinels.
pub mod tokenizer;

/// Internal representation of a single context state.
///
/// Tracks outgoing transitions and their counts.
mod state;
