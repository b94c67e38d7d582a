use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;
use std::thread;

use log::debug;

use super::corpus::Corpus;
use super::ngram_model::NGramModel;
use super::tokenizer::{END_TOKEN, START_TOKEN, is_sentinel};
use crate::error::ModelError;

/// Number of training chunks spawned per CPU core.
const CHUNK_FACTOR: usize = 8;

/// Word-level n-gram model holding one table per window size.
///
/// This struct manages:
/// - `ngrams`: a map from window size (1..=order) to its `NGramModel`.
/// - `vocabulary`: every lowercase token seen in training, sorted.
/// - `sentence_count`: number of training sentences, for reporting.
///
/// # Invariants
/// - `order >= 2` and `ngrams` holds exactly the sizes `1..=order`
/// - every continuation stored in any table is part of `vocabulary`
#[derive(Clone, Debug, PartialEq)]
pub struct MultiGramModel {
	order: usize,
	ngrams: HashMap<usize, NGramModel>,
	vocabulary: BTreeSet<String>,
	sentence_count: usize,
}

impl MultiGramModel {
	/// Returns an empty model with one table per window size.
	///
	/// # Errors
	/// Returns an error if `order < 2`.
	pub fn new(order: usize) -> Result<Self, ModelError> {
		if order < 2 {
			return Err(ModelError::InvalidOrder(order));
		}
		let mut ngrams = HashMap::new();
		for n in 1..=order {
			ngrams.insert(n, NGramModel::new(n)?);
		}
		Ok(Self { order, ngrams, vocabulary: BTreeSet::new(), sentence_count: 0 })
	}

	/// Rebuilds a model from its persisted parts, checking every invariant.
	///
	/// # Errors
	/// `CorruptSnapshot` if the tables do not cover `1..=order` or a stored
	/// continuation is missing from the vocabulary.
	pub fn from_parts(
		order: usize,
		sentence_count: usize,
		vocabulary: BTreeSet<String>,
		tables: Vec<NGramModel>,
	) -> Result<Self, ModelError> {
		if order < 2 {
			return Err(ModelError::CorruptSnapshot(format!("order {order} is below 2")));
		}

		let mut ngrams = HashMap::new();
		for table in tables {
			let n = table.n();
			if n > order || ngrams.insert(n, table).is_some() {
				return Err(ModelError::CorruptSnapshot(format!("unexpected table of size {n}")));
			}
		}
		if ngrams.len() != order {
			return Err(ModelError::CorruptSnapshot(format!(
				"expected {order} tables, found {}",
				ngrams.len()
			)));
		}

		let model = Self { order, ngrams, vocabulary, sentence_count };
		if let Some(token) = model.unknown_continuation() {
			return Err(ModelError::CorruptSnapshot(format!(
				"continuation '{token}' is not in the vocabulary"
			)));
		}
		Ok(model)
	}

	/// Splits the model into `(order, sentence_count, vocabulary, tables)`.
	///
	/// Tables are returned sorted by window size.
	pub fn to_parts(&self) -> (usize, usize, &BTreeSet<String>, Vec<&NGramModel>) {
		let mut tables: Vec<&NGramModel> = self.ngrams.values().collect();
		tables.sort_by_key(|t| t.n());
		(self.order, self.sentence_count, &self.vocabulary, tables)
	}

	/// Trains a model of `order` on `corpus`.
	///
	/// # Behavior
	/// - Splits the sentences into chunks (based on CPU cores * factor).
	/// - Spawns scoped threads to count each chunk into a partial model.
	/// - Merges all partial models sequentially.
	///
	/// # Errors
	/// - `InvalidOrder` if `order < 2`
	/// - `EmptyCorpus` if the corpus has no tokens
	/// - `Worker` if a counting thread panicked
	pub fn train(order: usize, corpus: &Corpus) -> Result<Self, ModelError> {
		let mut final_model = Self::new(order)?;
		let sentences = corpus.sentences();
		if sentences.iter().all(Vec::is_empty) {
			return Err(ModelError::EmptyCorpus);
		}

		let chunks = num_cpus::get().max(1) * CHUNK_FACTOR;
		let chunk_size = sentences.len().div_ceil(chunks).max(1);

		let partials: Vec<Result<Self, ModelError>> = thread::scope(|scope| {
			let handles: Vec<_> = sentences
				.chunks(chunk_size)
				.map(|chunk| {
					scope.spawn(move || -> Result<Self, ModelError> {
						let mut partial_model = Self::new(order)?;
						for sentence in chunk {
							partial_model.add_sentence(sentence);
						}
						Ok(partial_model)
					})
				})
				.collect();

			handles
				.into_iter()
				.map(|handle| handle.join().unwrap_or_else(|_| Err(ModelError::Worker)))
				.collect()
		});

		for partial_model in partials {
			final_model.merge(&partial_model?)?;
		}
		Ok(final_model)
	}

	/// Adds one tokenized sentence to every table.
	///
	/// # Behavior
	/// - Tokens are lowercased and added to the vocabulary.
	/// - The sentence is padded with `order-1` start and end sentinels.
	/// - Every window of size 1..=order is counted.
	pub fn add_sentence(&mut self, sentence: &[String]) {
		if sentence.is_empty() {
			return;
		}

		let mut padded: Vec<String> = Vec::with_capacity(sentence.len() + 2 * (self.order - 1));
		padded.extend(std::iter::repeat_n(START_TOKEN.to_owned(), self.order - 1));
		for token in sentence {
			let token = token.to_lowercase();
			if is_sentinel(&token) {
				continue;
			}
			self.vocabulary.insert(token.clone());
			padded.push(token);
		}
		padded.extend(std::iter::repeat_n(END_TOKEN.to_owned(), self.order - 1));

		for model in self.ngrams.values_mut() {
			model.add_sentence(&padded);
		}
		self.sentence_count += 1;
	}

	/// Predicts the token following `tokens`.
	///
	/// # Behavior
	/// - Keeps the last `order-1` tokens, left-padded with `<s>` when shorter.
	/// - Looks the context up; on a miss drops the oldest token and retries,
	///   down to a single-token context. The empty (unigram) context is never
	///   consulted, so an unknown word yields `None`.
	/// - Returns the most frequent continuation, ties to the smallest token.
	pub fn predict(&self, tokens: &[String]) -> Option<&str> {
		let window = self.order - 1;
		let mut context: Vec<String> = Vec::with_capacity(window);
		if tokens.len() < window {
			context.extend(std::iter::repeat_n(START_TOKEN.to_owned(), window - tokens.len()));
			context.extend_from_slice(tokens);
		} else {
			context.extend_from_slice(&tokens[tokens.len() - window..]);
		}

		for start in 0..context.len() {
			let key = &context[start..];
			if let Some(token) = self.ngrams.get(&(key.len() + 1)).and_then(|model| model.predict(key)) {
				return Some(token);
			}
			debug!("No continuation for context {key:?}, backing off");
		}
		None
	}

	/// Completes a partial word from the vocabulary.
	///
	/// # Behavior
	/// - `None` if `partial` has fewer than `min_length` characters.
	/// - Candidates are vocabulary tokens (sorted order) starting with the
	///   lowercased prefix and strictly longer than it.
	/// - Returns the candidate with the highest corpus frequency, ties to the
	///   first in sorted order, or the first candidate when no frequency is known.
	pub fn complete(&self, partial: &str, min_length: usize) -> Option<&str> {
		if partial.chars().count() < min_length {
			return None;
		}
		let prefix = partial.to_lowercase();
		let prefix_len = prefix.chars().count();

		let candidates: Vec<&str> = self
			.vocabulary
			.range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
			.take_while(|word| word.starts_with(prefix.as_str()))
			.filter(|word| word.chars().count() > prefix_len)
			.map(String::as_str)
			.collect();

		let mut best: Option<(&str, usize)> = None;
		for &candidate in &candidates {
			let frequency = self.frequency(candidate);
			if frequency == 0 {
				continue;
			}
			if best.is_none_or(|(_, best_frequency)| frequency > best_frequency) {
				best = Some((candidate, frequency));
			}
		}

		best.map(|(word, _)| word).or_else(|| candidates.first().copied())
	}

	/// Number of occurrences of `token` in the training corpus.
	pub fn frequency(&self, token: &str) -> usize {
		self.ngrams
			.get(&1)
			.and_then(|unigrams| unigrams.state(&[]))
			.map_or(0, |state| state.count(token))
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn vocabulary(&self) -> &BTreeSet<String> {
		&self.vocabulary
	}

	pub fn sentence_count(&self) -> usize {
		self.sentence_count
	}

	/// Returns a stored continuation missing from the vocabulary, if any.
	pub fn unknown_continuation(&self) -> Option<&str> {
		self.ngrams
			.values()
			.flat_map(|model| model.states())
			.flat_map(|state| state.transitions())
			.map(|(token, _)| token)
			.find(|token| !self.vocabulary.contains(*token))
	}

	/// Merges another model of the same order into this one.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		if self.order != other.order {
			return Err(ModelError::MergeMismatch(format!(
				"model order {} vs {}",
				self.order, other.order
			)));
		}

		for (k, t) in &other.ngrams {
			if let Some(existing) = self.ngrams.get_mut(k) {
				existing.merge(t)?;
			} else {
				self.ngrams.insert(*k, t.clone());
			}
		}

		self.vocabulary.extend(other.vocabulary.iter().cloned());
		self.sentence_count += other.sentence_count;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::tokenize;

	fn small_corpus() -> Corpus {
		Corpus::from_text(
			"the cat sat on the mat.\n\
			 the cat ran to the door.\n\
			 the cat sat by the fire.\n\
			 a dog sat on the step.",
		)
	}

	#[test]
	fn rejects_small_orders_and_empty_corpus() {
		assert!(matches!(MultiGramModel::new(1), Err(ModelError::InvalidOrder(1))));
		assert!(matches!(
			MultiGramModel::train(3, &Corpus::default()),
			Err(ModelError::EmptyCorpus)
		));
	}

	#[test]
	fn predicts_with_full_context() {
		let model = MultiGramModel::train(3, &small_corpus()).unwrap();
		assert_eq!(model.predict(&tokenize("the cat")), Some("sat"));
		assert_eq!(model.predict(&tokenize("sat on")), Some("the"));
	}

	#[test]
	fn backs_off_to_shorter_context() {
		let model = MultiGramModel::train(3, &small_corpus()).unwrap();
		// "purple cat" is unseen, "cat" alone is known
		assert_eq!(model.predict(&tokenize("purple cat")), Some("sat"));
		assert_eq!(model.predict(&tokenize("purple zebra")), None);
	}

	#[test]
	fn short_context_is_padded_with_start_token() {
		let model = MultiGramModel::train(3, &small_corpus()).unwrap();
		assert_eq!(model.predict(&[]), Some("the"));
		assert_eq!(model.predict(&tokenize("a")), Some("dog"));
	}

	#[test]
	fn continuations_stay_inside_vocabulary() {
		let model = MultiGramModel::train(4, &small_corpus()).unwrap();
		assert_eq!(model.unknown_continuation(), None);
		assert!(!model.vocabulary().contains(START_TOKEN));
		assert!(!model.vocabulary().contains(END_TOKEN));
	}

	#[test]
	fn completion_prefers_frequent_words() {
		let corpus = Corpus::from_text("cater cat category\ncategory category catalog");
		let model = MultiGramModel::train(2, &corpus).unwrap();
		assert_eq!(model.complete("cat", 2), Some("category"));
		assert_eq!(model.complete("CATA", 2), Some("catalog"));
		assert_eq!(model.complete("c", 2), None);
		assert_eq!(model.complete("xyz123", 2), None);
		// exact vocabulary words are not completions of themselves
		assert_eq!(model.complete("catalog", 2), None);
	}

	#[test]
	fn training_is_independent_of_chunking() {
		let corpus = small_corpus();
		let parallel = MultiGramModel::train(3, &corpus).unwrap();
		let mut sequential = MultiGramModel::new(3).unwrap();
		for sentence in corpus.sentences() {
			sequential.add_sentence(sentence);
		}
		assert_eq!(parallel, sequential);
		assert_eq!(parallel.sentence_count(), 4);
	}

	#[test]
	fn from_parts_rejects_unknown_continuations() {
		let model = MultiGramModel::train(2, &small_corpus()).unwrap();
		let (order, sentences, _, tables) = model.to_parts();
		let tables = tables.into_iter().cloned().collect();
		let result = MultiGramModel::from_parts(order, sentences, BTreeSet::new(), tables);
		assert!(matches!(result, Err(ModelError::CorruptSnapshot(_))));
	}
}
