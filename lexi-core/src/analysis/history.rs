use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Number of generated paragraphs remembered per user.
pub const PARAGRAPH_HISTORY_LIMIT: usize = 10;

/// Raw metrics reported for one reading session.
///
/// `reading_time` and `wpm` are optional so that a missing field can be
/// told apart from a zero and rejected as invalid input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
	pub reading_time: Option<f64>,
	pub wpm: Option<f64>,
	pub difficult_words: Vec<String>,
	pub word_timings: BTreeMap<String, f64>,
}

impl SessionReport {
	/// Returns `(reading_time, wpm)` or an `InvalidInput` error.
	///
	/// Word timings must be finite as well.
	pub fn required_metrics(&self) -> Result<(f64, f64), AnalysisError> {
		let reading_time = require("readingTime", self.reading_time)?;
		let wpm = require("wpm", self.wpm)?;
		if let Some((word, _)) = self.word_timings.iter().find(|(_, t)| !t.is_finite()) {
			return Err(AnalysisError::InvalidInput(format!("timing for '{word}' must be a finite number")));
		}
		Ok((reading_time, wpm))
	}
}

fn require(field: &str, value: Option<f64>) -> Result<f64, AnalysisError> {
	match value {
		Some(v) if v.is_finite() => Ok(v),
		Some(_) => Err(AnalysisError::InvalidInput(format!("{field} must be a finite number"))),
		None => Err(AnalysisError::InvalidInput(format!("missing required field: {field}"))),
	}
}

/// One recorded reading session. Immutable once created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Session {
	/// Seconds since the Unix epoch at capture time.
	pub timestamp: f64,
	/// Seconds spent reading.
	pub reading_time: f64,
	pub wpm: f64,
	#[serde(default)]
	pub difficult_words: Vec<String>,
	/// Seconds spent on individual words.
	#[serde(default)]
	pub word_timings: BTreeMap<String, f64>,
}

/// A practice paragraph generated for a user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParagraphEntry {
	pub paragraph: String,
	pub words_used: Vec<String>,
	pub timestamp: f64,
}

/// Cumulative reading history of one user.
///
/// # Invariants
/// - `average_wpm` is the arithmetic mean of every session's `wpm` (0 without sessions)
/// - `difficult_words` holds no duplicates and keeps first-report order
/// - `paragraph_history` is newest first and holds at most `PARAGRAPH_HISTORY_LIMIT` entries
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserHistory {
	sessions: Vec<Session>,
	difficult_words: Vec<String>,
	average_wpm: f64,
	#[serde(default)]
	paragraph_history: VecDeque<ParagraphEntry>,
}

impl UserHistory {
	pub fn sessions(&self) -> &[Session] {
		&self.sessions
	}

	pub fn difficult_words(&self) -> &[String] {
		&self.difficult_words
	}

	pub fn average_wpm(&self) -> f64 {
		self.average_wpm
	}

	/// Generated paragraphs, newest first.
	pub fn paragraph_history(&self) -> impl Iterator<Item = &ParagraphEntry> {
		self.paragraph_history.iter()
	}

	/// Adds words not reported before, keeping the order they arrive in.
	pub(crate) fn add_difficult_words(&mut self, words: &[String]) {
		for word in words {
			if !self.difficult_words.contains(word) {
				self.difficult_words.push(word.clone());
			}
		}
	}

	pub(crate) fn push_session(&mut self, session: Session) {
		self.sessions.push(session);
		self.recompute_average();
	}

	pub(crate) fn push_paragraph(&mut self, entry: ParagraphEntry) {
		self.paragraph_history.push_front(entry);
		self.paragraph_history.truncate(PARAGRAPH_HISTORY_LIMIT);
	}

	/// True when every stored number survives a JSON round trip.
	pub(crate) fn is_finite(&self) -> bool {
		self.average_wpm.is_finite()
			&& self.sessions.iter().all(|s| {
				s.timestamp.is_finite()
					&& s.reading_time.is_finite()
					&& s.wpm.is_finite()
					&& s.word_timings.values().all(|t| t.is_finite())
			})
			&& self.paragraph_history.iter().all(|p| p.timestamp.is_finite())
	}

	/// Restores the invariants on data read from disk.
	pub(crate) fn normalize(&mut self) {
		let words = std::mem::take(&mut self.difficult_words);
		self.add_difficult_words(&words);
		self.paragraph_history.truncate(PARAGRAPH_HISTORY_LIMIT);
		self.recompute_average();
	}

	fn recompute_average(&mut self) {
		if self.sessions.is_empty() {
			self.average_wpm = 0.0;
			return;
		}
		let count = self.sessions.len() as f64;
		let total: f64 = self.sessions.iter().map(|s| s.wpm).sum();
		self.average_wpm = if total.is_finite() {
			total / count
		} else {
			// the plain sum overflowed: divide each term first
			self.sessions.iter().map(|s| s.wpm / count).sum()
		};
	}
}
