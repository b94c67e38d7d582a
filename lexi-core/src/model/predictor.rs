use std::path::Path;

use log::{info, warn};

use super::corpus::Corpus;
use super::multigram_model::MultiGramModel;
use super::snapshot::{read_snapshot, write_snapshot};
use super::tokenizer::tokenize;
use crate::error::ModelError;

/// Default context window size.
pub const DEFAULT_ORDER: usize = 3;

/// Default minimum number of characters before a prefix is completed.
pub const DEFAULT_MIN_PREFIX: usize = 2;

/// How `WordPredictor::load` obtained its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The snapshot was read and validated.
	Loaded,
	/// The snapshot was missing or unusable; the default corpus was used.
	Retrained,
}

/// Figures reported after a successful training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
	pub sentences: usize,
	pub vocabulary_size: usize,
}

/// High-level language model engine.
///
/// # Responsibilities
/// - Own the trained `MultiGramModel` (nothing else can mutate it)
/// - Train on demand: any query on an untrained engine trains it on the
///   bundled default corpus first
/// - Persist and restore the model, falling back to re-training
#[derive(Debug)]
pub struct WordPredictor {
	order: usize,
	model: Option<MultiGramModel>,
}

impl Default for WordPredictor {
	fn default() -> Self {
		Self { order: DEFAULT_ORDER, model: None }
	}
}

impl WordPredictor {
	/// Creates an untrained engine with context window `order`.
	///
	/// # Errors
	/// Returns an error if `order < 2`.
	pub fn new(order: usize) -> Result<Self, ModelError> {
		if order < 2 {
			return Err(ModelError::InvalidOrder(order));
		}
		Ok(Self { order, model: None })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn is_trained(&self) -> bool {
		self.model.is_some()
	}

	/// Read-only access to the trained model, if any.
	pub fn model(&self) -> Option<&MultiGramModel> {
		self.model.as_ref()
	}

	/// Trains the engine, replacing any previous model.
	///
	/// With `None`, the bundled corpus over the default categories is used.
	/// On error the previous model is kept untouched.
	pub fn train(&mut self, corpus: Option<&Corpus>) -> Result<TrainingSummary, ModelError> {
		let model = Self::fit(self.order, corpus)?;
		let summary = TrainingSummary {
			sentences: model.sentence_count(),
			vocabulary_size: model.vocabulary().len(),
		};
		self.model = Some(model);
		Ok(summary)
	}

	fn fit(order: usize, corpus: Option<&Corpus>) -> Result<MultiGramModel, ModelError> {
		let model = match corpus {
			Some(corpus) => MultiGramModel::train(order, corpus)?,
			None => {
				info!("Using bundled corpus for training");
				MultiGramModel::train(order, &Corpus::default_corpus())?
			}
		};
		info!(
			"Trained {}-gram model on {} sentences ({} words)",
			order,
			model.sentence_count(),
			model.vocabulary().len()
		);
		Ok(model)
	}

	/// Returns the trained model, training on the default corpus first if needed.
	fn ensure_trained(&mut self) -> Result<&MultiGramModel, ModelError> {
		match self.model {
			Some(ref model) => Ok(model),
			None => {
				info!("Model not trained. Training now...");
				let model = Self::fit(self.order, None)?;
				Ok(self.model.insert(model))
			}
		}
	}

	/// Predicts the word following free-text `context`.
	///
	/// Returns `Ok(None)` when no context of the input was ever observed.
	pub fn predict_next(&mut self, context: &str) -> Result<Option<String>, ModelError> {
		let tokens = tokenize(context);
		let model = self.ensure_trained()?;
		Ok(model.predict(&tokens).map(str::to_owned))
	}

	/// Completes `partial` with the most frequent longer vocabulary word.
	///
	/// Returns `Ok(None)` if `partial` is shorter than `min_length` or no
	/// vocabulary word extends it.
	pub fn complete_prefix(&mut self, partial: &str, min_length: usize) -> Result<Option<String>, ModelError> {
		let model = self.ensure_trained()?;
		Ok(model.complete(partial, min_length).map(str::to_owned))
	}

	/// `complete_prefix` with `DEFAULT_MIN_PREFIX`.
	pub fn complete(&mut self, partial: &str) -> Result<Option<String>, ModelError> {
		self.complete_prefix(partial, DEFAULT_MIN_PREFIX)
	}

	/// Writes the model snapshot to `path`, training first if needed.
	pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ModelError> {
		let model = self.ensure_trained()?;
		write_snapshot(model, &path)?;
		info!("Model saved to {}", path.as_ref().display());
		Ok(())
	}

	/// Replaces the model with the snapshot at `path`.
	///
	/// A missing, corrupt or incompatible snapshot (including one trained
	/// with another order) is reported with a warning and the engine is
	/// re-trained on the default corpus instead.
	///
	/// # Errors
	/// Only if that fallback training fails.
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadOutcome, ModelError> {
		let path = path.as_ref();
		let error = match read_snapshot(path) {
			Ok(model) if model.order() == self.order => {
				info!("Model loaded from {}", path.display());
				self.model = Some(model);
				return Ok(LoadOutcome::Loaded);
			}
			Ok(model) => ModelError::CorruptSnapshot(format!(
				"snapshot order {} does not match configured order {}",
				model.order(),
				self.order
			)),
			Err(e) => e,
		};

		warn!("Error loading model from {}: {error}", path.display());
		warn!("Training a new model instead...");
		self.train(None)?;
		Ok(LoadOutcome::Retrained)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_order_below_two() {
		assert!(matches!(WordPredictor::new(1), Err(ModelError::InvalidOrder(1))));
		assert_eq!(WordPredictor::default().order(), DEFAULT_ORDER);
	}

	#[test]
	fn queries_train_an_untrained_engine() {
		let mut predictor = WordPredictor::default();
		assert!(!predictor.is_trained());

		assert_eq!(predictor.predict_next("the quick brown").unwrap().as_deref(), Some("fox"));
		assert!(predictor.is_trained());
	}

	#[test]
	fn completes_from_default_corpus() {
		let mut predictor = WordPredictor::default();
		assert_eq!(predictor.complete("artif").unwrap().as_deref(), Some("artificial"));
		assert_eq!(predictor.complete("Intel").unwrap().as_deref(), Some("intelligence"));
		assert_eq!(predictor.complete("xyz123").unwrap(), None);
		assert_eq!(predictor.complete("a").unwrap(), None);
		assert!(predictor.complete_prefix("a", 1).unwrap().is_some());
	}

	#[test]
	fn failed_training_keeps_previous_model() {
		let mut predictor = WordPredictor::new(2).unwrap();
		predictor.train(Some(&Corpus::from_text("red apples grow"))).unwrap();

		assert!(matches!(predictor.train(Some(&Corpus::default())), Err(ModelError::EmptyCorpus)));
		assert_eq!(predictor.predict_next("red").unwrap().as_deref(), Some("apples"));
	}

	#[test]
	fn retraining_replaces_state() {
		let mut predictor = WordPredictor::new(2).unwrap();
		predictor.train(Some(&Corpus::from_text("red apples grow"))).unwrap();
		predictor.train(Some(&Corpus::from_text("blue skies shine"))).unwrap();

		assert_eq!(predictor.predict_next("red").unwrap(), None);
		assert_eq!(predictor.predict_next("blue").unwrap().as_deref(), Some("skies"));
	}

	#[test]
	fn load_missing_snapshot_retrains() {
		let dir = tempfile::tempdir().unwrap();
		let mut predictor = WordPredictor::default();

		let outcome = predictor.load(dir.path().join("absent.bin")).unwrap();
		assert_eq!(outcome, LoadOutcome::Retrained);
		assert!(predictor.is_trained());
	}

	#[test]
	fn load_snapshot_with_other_order_retrains() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.bin");
		WordPredictor::new(2).unwrap().save(&path).unwrap();

		let mut predictor = WordPredictor::new(3).unwrap();
		assert_eq!(predictor.load(&path).unwrap(), LoadOutcome::Retrained);
		assert_eq!(predictor.model().map(MultiGramModel::order), Some(3));
	}
}
