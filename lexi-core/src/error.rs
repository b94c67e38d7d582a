use thiserror::Error;

/// Errors raised by the language model engine.
///
/// Only training and explicit persistence calls surface these. Prediction
/// and completion misses are not errors, they return `None`.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The context window must hold at least one preceding token.
	#[error("model order must be >= 2, got {0}")]
	InvalidOrder(usize),

	/// Training was attempted on a corpus without a single token.
	#[error("training corpus contains no tokens")]
	EmptyCorpus,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// postcard encoding / decoding failure.
	#[error("snapshot encoding error: {0}")]
	Snapshot(#[from] postcard::Error),

	/// The snapshot was written by another format version.
	#[error("snapshot format {found} is not supported (expected {expected})")]
	IncompatibleSnapshot { found: u32, expected: u32 },

	/// The snapshot decoded but its content breaks a model invariant.
	#[error("corrupt snapshot: {0}")]
	CorruptSnapshot(String),

	/// Two partial tables disagree on their shape while merging.
	#[error("merge mismatch: {0}")]
	MergeMismatch(String),

	/// A training worker thread panicked.
	#[error("training worker failed")]
	Worker,
}

/// Errors raised by the reading analysis engine.
#[derive(Debug, Error)]
pub enum AnalysisError {
	/// A required session field is missing or not a finite number.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The history of this user holds a number JSON cannot represent.
	#[error("history of user '{0}' holds a non-finite number")]
	NonFinite(String),
}
