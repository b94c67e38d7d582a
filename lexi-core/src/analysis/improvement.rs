use serde::Serialize;

use super::history::Session;

pub const NO_HISTORY_MESSAGE: &str = "Not enough data to analyze improvement.";
pub const SINGLE_SESSION_MESSAGE: &str = "Need at least two reading sessions to measure improvement.";
pub const IMPROVED_MESSAGE: &str = "Good progress! Your reading is improving.";
pub const KEEP_PRACTICING_MESSAGE: &str = "Keep practicing to improve your reading.";

/// Progress between a user's first and latest session.
///
/// The numeric fields are absent when fewer than two sessions exist.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImprovementReport {
	pub improvement: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wpm_change: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub difficult_words_change_percent: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sessions_analyzed: Option<usize>,
	pub message: String,
}

impl ImprovementReport {
	pub(crate) fn not_enough_data(message: &str) -> Self {
		Self {
			improvement: false,
			wpm_change: None,
			difficult_words_change_percent: None,
			sessions_analyzed: None,
			message: message.to_owned(),
		}
	}
}

/// Compares the earliest and latest session by timestamp.
pub(crate) fn measure(sessions: &[Session]) -> ImprovementReport {
	if sessions.len() < 2 {
		return ImprovementReport::not_enough_data(SINGLE_SESSION_MESSAGE);
	}

	let mut ordered: Vec<&Session> = sessions.iter().collect();
	ordered.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
	let (first, last) = (ordered[0], ordered[ordered.len() - 1]);

	let wpm_change = last.wpm - first.wpm;

	let first_count = first.difficult_words.len();
	let last_count = last.difficult_words.len();
	let difficult_change = if first_count == 0 {
		0.0
	} else {
		(first_count as f64 - last_count as f64) / first_count as f64 * 100.0
	};

	let improvement = wpm_change > 0.0 || difficult_change > 0.0;
	ImprovementReport {
		improvement,
		wpm_change: Some(wpm_change),
		difficult_words_change_percent: Some(difficult_change),
		sessions_analyzed: Some(sessions.len()),
		message: if improvement { IMPROVED_MESSAGE } else { KEEP_PRACTICING_MESSAGE }.to_owned(),
	}
}
