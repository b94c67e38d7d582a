use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tokenizer::tokenize;
use crate::error::ModelError;
use crate::io::read_file;

const NEWS_TEXT: &str = include_str!("../../corpus/news.txt");
const SCIENCE_FICTION_TEXT: &str = include_str!("../../corpus/science_fiction.txt");

/// Categories of the bundled training corpus.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CorpusCategory {
	News,
	ScienceFiction,
}

impl CorpusCategory {
	/// Categories used when no corpus is given to `train`.
	pub const DEFAULT: [CorpusCategory; 2] = [CorpusCategory::News, CorpusCategory::ScienceFiction];

	fn text(self) -> &'static str {
		match self {
			CorpusCategory::News => NEWS_TEXT,
			CorpusCategory::ScienceFiction => SCIENCE_FICTION_TEXT,
		}
	}
}

impl fmt::Display for CorpusCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CorpusCategory::News => f.write_str("news"),
			CorpusCategory::ScienceFiction => f.write_str("science_fiction"),
		}
	}
}

impl FromStr for CorpusCategory {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"news" => Ok(CorpusCategory::News),
			"science_fiction" | "science-fiction" => Ok(CorpusCategory::ScienceFiction),
			other => Err(format!("Unknown corpus category '{other}'")),
		}
	}
}

/// A tokenized training corpus: one token list per sentence.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
	sentences: Vec<Vec<String>>,
}

impl Corpus {
	/// Wraps already tokenized sentences. Tokens are lowercased.
	pub fn from_sentences(sentences: Vec<Vec<String>>) -> Self {
		let sentences = sentences
			.into_iter()
			.map(|sentence| sentence.into_iter().map(|t| t.to_lowercase()).collect::<Vec<_>>())
			.filter(|sentence| !sentence.is_empty())
			.collect();
		Self { sentences }
	}

	/// Tokenizes `text`, one sentence per non-blank line.
	pub fn from_text(text: &str) -> Self {
		let sentences = text
			.lines()
			.map(tokenize)
			.filter(|sentence| !sentence.is_empty())
			.collect();
		Self { sentences }
	}

	/// Reads and tokenizes a text file, one sentence per line.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		let lines = read_file(path)?;
		Ok(Self::from_text(&lines.join("\n")))
	}

	/// Builds the bundled corpus restricted to `categories`.
	pub fn bundled(categories: &[CorpusCategory]) -> Self {
		let mut sentences = Vec::new();
		for category in categories {
			sentences.extend(Self::from_text(category.text()).sentences);
		}
		Self { sentences }
	}

	/// The bundled corpus over `CorpusCategory::DEFAULT`.
	pub fn default_corpus() -> Self {
		Self::bundled(&CorpusCategory::DEFAULT)
	}

	pub fn sentences(&self) -> &[Vec<String>] {
		&self.sentences
	}

	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}
}
