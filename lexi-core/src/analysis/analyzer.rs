use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use super::history::{ParagraphEntry, Session, SessionReport, UserHistory};
use super::improvement::{self, ImprovementReport, NO_HISTORY_MESSAGE};
use super::profile::ReadingProfile;
use super::recommendation::recommend;
use crate::error::AnalysisError;
use crate::io::write_atomic;

/// Default number of difficult words returned by `get_difficult_words`.
pub const DEFAULT_DIFFICULT_WORD_LIMIT: usize = 10;

/// How `ReadingAnalyzer::load_history` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLoad {
	/// The file was read; holds the number of users restored.
	Loaded(usize),
	/// The file was missing or unreadable; history is now empty.
	Reset,
}

/// Seconds since the Unix epoch.
pub(crate) fn now() -> f64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs_f64())
		.unwrap_or(0.0)
}

/// Reading analysis engine.
///
/// Exclusively owns every user's reading history. All queries on unknown
/// users return defaults rather than errors.
#[derive(Debug, Default)]
pub struct ReadingAnalyzer {
	histories: BTreeMap<String, UserHistory>,
}

impl ReadingAnalyzer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a session stamped with the current time and returns the
	/// user's updated recommendations.
	///
	/// # Errors
	/// `InvalidInput` if `reading_time` or `wpm` is missing, or if any
	/// metric or word timing is not finite.
	pub fn analyze_session(&mut self, user_id: &str, report: SessionReport) -> Result<Vec<String>, AnalysisError> {
		self.analyze_session_at(user_id, report, now())
	}

	/// Same as `analyze_session` with an explicit capture timestamp.
	pub fn analyze_session_at(
		&mut self,
		user_id: &str,
		report: SessionReport,
		timestamp: f64,
	) -> Result<Vec<String>, AnalysisError> {
		let (reading_time, wpm) = report.required_metrics()?;
		if !timestamp.is_finite() {
			return Err(AnalysisError::InvalidInput("timestamp must be a finite number".to_owned()));
		}

		let history = self.histories.entry(user_id.to_owned()).or_default();
		history.add_difficult_words(&report.difficult_words);
		history.push_session(Session {
			timestamp,
			reading_time,
			wpm,
			difficult_words: report.difficult_words,
			word_timings: report.word_timings,
		});
		info!(
			"Recorded session {} for user {user_id} ({wpm} wpm, average {:.1})",
			history.sessions().len(),
			history.average_wpm()
		);

		Ok(self.get_recommendations(user_id))
	}

	/// Practice recommendations built from the user's difficult words.
	pub fn get_recommendations(&self, user_id: &str) -> Vec<String> {
		let words = self.histories.get(user_id).map(UserHistory::difficult_words).unwrap_or_default();
		recommend(words)
	}

	/// Compares the user's first and latest sessions.
	pub fn analyze_improvement(&self, user_id: &str) -> ImprovementReport {
		match self.histories.get(user_id) {
			Some(history) => improvement::measure(history.sessions()),
			None => ImprovementReport::not_enough_data(NO_HISTORY_MESSAGE),
		}
	}

	/// Up to `limit` difficult words, in the order they were first reported.
	pub fn get_difficult_words(&self, user_id: &str, limit: usize) -> Vec<String> {
		self.histories
			.get(user_id)
			.map(|history| history.difficult_words().iter().take(limit).cloned().collect())
			.unwrap_or_default()
	}

	/// Reading profile for the user's average speed.
	///
	/// Unknown users get the intermediate profile.
	pub fn reading_profile(&self, user_id: &str) -> ReadingProfile {
		match self.histories.get(user_id) {
			Some(history) if !history.sessions().is_empty() => ReadingProfile::from_wpm(history.average_wpm()),
			_ => ReadingProfile::Intermediate,
		}
	}

	/// Remembers a generated paragraph; only the newest ten are kept.
	pub fn record_paragraph(&mut self, user_id: &str, paragraph: &str, words_used: &[String]) {
		let history = self.histories.entry(user_id.to_owned()).or_default();
		history.push_paragraph(ParagraphEntry {
			paragraph: paragraph.to_owned(),
			words_used: words_used.to_vec(),
			timestamp: now(),
		});
		debug!("Stored paragraph for user {user_id}");
	}

	/// Read-only view of one user's history.
	pub fn history(&self, user_id: &str) -> Option<&UserHistory> {
		self.histories.get(user_id)
	}

	pub fn user_count(&self) -> usize {
		self.histories.len()
	}

	/// Writes the whole history map as pretty JSON, atomically.
	///
	/// # Errors
	/// `NonFinite` if a stored number would be written as `null`; the
	/// file on disk is left untouched.
	pub fn save_history<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalysisError> {
		if let Some((user_id, _)) = self.histories.iter().find(|(_, h)| !h.is_finite()) {
			return Err(AnalysisError::NonFinite(user_id.clone()));
		}
		let json = serde_json::to_vec_pretty(&self.histories)?;
		write_atomic(&path, &json)?;
		debug!("Reading history saved to {}", path.as_ref().display());
		Ok(())
	}

	/// Replaces the history with the content of `path`.
	///
	/// A missing or unparsable file resets the history to empty.
	pub fn load_history<P: AsRef<Path>>(&mut self, path: P) -> HistoryLoad {
		let path = path.as_ref();
		let contents = match std::fs::read(path) {
			Ok(contents) => contents,
			Err(e) => {
				info!("No reading history at {} ({e}), starting empty", path.display());
				self.histories.clear();
				return HistoryLoad::Reset;
			}
		};

		match serde_json::from_slice::<BTreeMap<String, UserHistory>>(&contents) {
			Ok(mut histories) => {
				histories.values_mut().for_each(UserHistory::normalize);
				info!("Loaded reading history for {} users", histories.len());
				let users = histories.len();
				self.histories = histories;
				HistoryLoad::Loaded(users)
			}
			Err(e) => {
				warn!("Reading history at {} is unreadable: {e}", path.display());
				self.histories.clear();
				HistoryLoad::Reset
			}
		}
	}
}
