use super::state::State;
use super::tokenizer::is_sentinel;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a fixed-order n-gram table over word tokens.
///
/// The `NGramModel` stores states for contexts of length `n-1`
/// and predicts the next token from the counts learned during training.
///
/// # Responsibilities
/// - Count every window of `n` tokens of a padded sentence
/// - Predict the most frequent continuation of a context
/// - Merge with another table of the same order `n`
///
/// # Invariants
/// - `n` is always >= 1 (`n == 1` is the unigram table, keyed by the empty context)
/// - Each state in `states` corresponds to a unique context of length `n-1`
/// - Sentinel tokens are never stored as continuations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NGramModel {
	/// The order of the table (number of tokens in the n-gram)
	n: usize,

	/// Mapping from a context (length n-1) to its corresponding state
	states: HashMap<Vec<String>, State>,
}

impl NGramModel {
	/// Creates a new n-gram table of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self, ModelError> {
		if n < 1 {
			return Err(ModelError::InvalidOrder(n));
		}
		Ok(Self { n, states: HashMap::new() })
	}

	pub fn n(&self) -> usize {
		self.n
	}

	/// Adds an already padded sentence to the table.
	///
	/// Every window of `n` tokens contributes one transition from its first
	/// `n-1` tokens to its last one. Windows ending on a sentinel are skipped.
	pub fn add_sentence(&mut self, padded: &[String]) {
		if padded.len() < self.n {
			// Sentence too short, no n-grams to compute
			return;
		}

		for window in padded.windows(self.n) {
			let (context, next) = window.split_at(self.n - 1);
			let next_token = &next[0];
			if is_sentinel(next_token) {
				continue;
			}
			match self.states.get_mut(context) {
				Some(state) => state.add_transition(next_token),
				None => {
					let mut state = State::new(context);
					state.add_transition(next_token);
					self.states.insert(context.to_vec(), state);
				}
			}
		}
	}

	/// Predicts the next token given a context of exactly `n-1` tokens.
	///
	/// Returns `None` if the context is unknown or has no transitions.
	pub fn predict(&self, context: &[String]) -> Option<&str> {
		if context.len() + 1 != self.n {
			return None;
		}
		self.states.get(context)?.predict()
	}

	/// Returns the state of a context, if it was observed.
	pub fn state(&self, context: &[String]) -> Option<&State> {
		self.states.get(context)
	}

	/// Iterates over every observed state.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.values()
	}

	/// Merges another table into this one.
	///
	/// # Notes
	/// - Both tables must have the same order `n`.
	/// - Occurrence counts for matching states and transitions are summed.
	///
	/// # Errors
	/// Returns an error if the table orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		if self.n != other.n {
			return Err(ModelError::MergeMismatch(format!("order {} vs {}", self.n, other.n)));
		}

		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state)?;
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		Ok(())
	}
}
