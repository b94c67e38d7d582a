use std::path::PathBuf;
use std::sync::Mutex;

use log::error;

use lexi_core::{ReadingAnalyzer, WordPredictor};

use crate::collaborators::{CollaboratorError, Lexicon, TextGenerator};
use crate::config::Config;

/// State shared by every worker.
///
/// Each engine has its own lock so predictions never wait on analysis.
pub struct AppState {
	pub predictor: Mutex<WordPredictor>,
	pub analyzer: Mutex<ReadingAnalyzer>,
	pub generator: TextGenerator,
	pub lexicon: Lexicon,
	pub model_path: PathBuf,
	pub history_path: PathBuf,
}

impl AppState {
	pub fn new(config: &Config, predictor: WordPredictor, analyzer: ReadingAnalyzer) -> Result<Self, CollaboratorError> {
		Ok(Self {
			predictor: Mutex::new(predictor),
			analyzer: Mutex::new(analyzer),
			generator: TextGenerator::new(&config.text_generation)?,
			lexicon: Lexicon::new(&config.lexicon)?,
			model_path: config.storage.model_path.clone(),
			history_path: config.storage.history_path.clone(),
		})
	}

	/// Persists the history; failures are logged, never returned.
	pub fn persist_history(&self, analyzer: &ReadingAnalyzer) {
		if let Err(e) = analyzer.save_history(&self.history_path) {
			error!("Failed to save reading history to {}: {e}", self.history_path.display());
		}
	}

	pub fn persist_model(&self, predictor: &mut WordPredictor) {
		if let Err(e) = predictor.save(&self.model_path) {
			error!("Failed to save model to {}: {e}", self.model_path.display());
		}
	}
}
