use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::multigram_model::MultiGramModel;
use super::ngram_model::NGramModel;
use crate::error::ModelError;
use crate::io::write_atomic;

/// Current snapshot layout. Bump when any persisted field changes.
pub const SNAPSHOT_FORMAT: u32 = 1;

/// Persisted form of a trained model.
///
/// `format` is encoded first so that it can be checked before the rest of
/// the payload is decoded.
#[derive(Serialize)]
struct SnapshotRef<'a> {
	format: u32,
	order: usize,
	sentence_count: usize,
	vocabulary: &'a BTreeSet<String>,
	tables: Vec<&'a NGramModel>,
}

#[derive(Deserialize)]
struct Snapshot {
	format: u32,
	order: usize,
	sentence_count: usize,
	vocabulary: BTreeSet<String>,
	tables: Vec<NGramModel>,
}

/// Serializes `model` with postcard and writes it atomically to `path`.
pub fn write_snapshot<P: AsRef<Path>>(model: &MultiGramModel, path: P) -> Result<(), ModelError> {
	let (order, sentence_count, vocabulary, tables) = model.to_parts();
	let snapshot = SnapshotRef { format: SNAPSHOT_FORMAT, order, sentence_count, vocabulary, tables };
	let bytes = postcard::to_stdvec(&snapshot)?;
	write_atomic(path, &bytes)?;
	Ok(())
}

/// Reads a snapshot written by `write_snapshot`.
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `IncompatibleSnapshot` if the format version differs
/// - `Snapshot` if the payload cannot be decoded
/// - `CorruptSnapshot` if the decoded model breaks an invariant
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<MultiGramModel, ModelError> {
	let bytes = std::fs::read(path)?;

	let (format, _) = postcard::take_from_bytes::<u32>(&bytes)?;
	if format != SNAPSHOT_FORMAT {
		return Err(ModelError::IncompatibleSnapshot { found: format, expected: SNAPSHOT_FORMAT });
	}

	let snapshot: Snapshot = postcard::from_bytes(&bytes)?;
	MultiGramModel::from_parts(snapshot.order, snapshot.sentence_count, snapshot.vocabulary, snapshot.tables)
}
