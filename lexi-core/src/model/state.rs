use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Represents a state in an n-gram model.
///
/// A `State` corresponds to a fixed context of preceding tokens (`key`) and
/// stores every observed continuation of that context.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct State {
	/// Identifier of the state (the context tokens, oldest first).
	key: Vec<String>,
	/// Outgoing transitions indexed by the next token, kept sorted so that
	/// iteration (and therefore tie-breaking) is deterministic.
	/// Example: { "fox" => 3, "dog" => 1 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &[String]) -> Self {
		Self {
			key: key.to_vec(),
			transitions: BTreeMap::new(),
		}
	}

	pub fn key(&self) -> &[String] {
		&self.key
	}

	/// Records one occurrence of `next_token` after this context.
	pub fn add_transition(&mut self, next_token: &str) {
		*self.transitions.entry(next_token.to_owned()).or_insert(0) += 1;
	}

	/// Occurrence count of `token` after this context (0 if never seen).
	pub fn count(&self, token: &str) -> usize {
		self.transitions.get(token).copied().unwrap_or(0)
	}

	/// Iterates over `(next_token, count)` pairs in lexicographic order.
	pub fn transitions(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(token, count)| (token.as_str(), *count))
	}

	/// Returns the most frequently observed continuation.
	///
	/// Ties go to the lexicographically smallest token. Returns `None` if the
	/// state has no transitions.
	pub fn predict(&self) -> Option<&str> {
		let mut best: Option<(&str, usize)> = None;
		for (token, count) in self.transitions() {
			match best {
				Some((_, best_count)) if count <= best_count => (),
				_ => best = Some((token, count)),
			}
		}
		best.map(|(token, _)| token)
	}

	/// Merges another state into this one.
	///
	/// Both states must represent the same context. Occurrence counts are
	/// summed; used to combine partial tables built by training workers.
	///
	/// # Errors
	/// Returns an error if the state keys do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		if self.key != other.key {
			return Err(ModelError::MergeMismatch(format!(
				"state key {:?} vs {:?}",
				self.key, other.key
			)));
		}

		for (token, occurrence) in &other.transitions {
			*self.transitions.entry(token.clone()).or_insert(0) += *occurrence;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn predicts_most_frequent_transition() {
		let mut state = State::new(&key(&["the"]));
		state.add_transition("dog");
		state.add_transition("fox");
		state.add_transition("fox");
		assert_eq!(state.predict(), Some("fox"));
		assert_eq!(state.count("fox"), 2);
		assert_eq!(state.count("cat"), 0);
	}

	#[test]
	fn ties_go_to_smallest_token() {
		let mut state = State::new(&key(&["a"]));
		state.add_transition("zebra");
		state.add_transition("apple");
		assert_eq!(state.predict(), Some("apple"));
	}

	#[test]
	fn empty_state_predicts_nothing() {
		assert_eq!(State::new(&key(&["x"])).predict(), None);
	}

	#[test]
	fn merge_sums_counts_and_checks_keys() {
		let mut left = State::new(&key(&["a"]));
		left.add_transition("b");
		let mut right = State::new(&key(&["a"]));
		right.add_transition("b");
		right.add_transition("c");

		left.merge(&right).unwrap();
		assert_eq!(left.count("b"), 2);
		assert_eq!(left.count("c"), 1);

		let other = State::new(&key(&["z"]));
		assert!(matches!(left.merge(&other), Err(ModelError::MergeMismatch(_))));
	}
}
