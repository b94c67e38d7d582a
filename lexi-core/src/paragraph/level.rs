use std::fmt;

use serde::Serialize;

/// Age assumed when the caller does not give one.
pub const DEFAULT_AGE: u32 = 25;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
	Beginner,
	Elementary,
	Intermediate,
	HighSchool,
	Advanced,
}

impl DifficultyLevel {
	pub fn for_age(age: u32) -> Self {
		match age {
			0..=7 => DifficultyLevel::Beginner,
			8..=11 => DifficultyLevel::Elementary,
			12..=15 => DifficultyLevel::Intermediate,
			16..=19 => DifficultyLevel::HighSchool,
			_ => DifficultyLevel::Advanced,
		}
	}

	/// Writing guidance passed to the text generator.
	pub fn instruction(self) -> &'static str {
		match self {
			DifficultyLevel::Beginner => {
				"Use very simple words and short sentences (max 6 words per sentence). Explain any difficult concepts."
			}
			DifficultyLevel::Elementary => {
				"Use simple words and clear explanations. Keep sentences short (max 8 words per sentence). Focus on building vocabulary."
			}
			DifficultyLevel::Intermediate => {
				"Use moderate vocabulary with some challenging words. Keep sentences medium length (max 12 words per sentence). Include relevant examples."
			}
			DifficultyLevel::HighSchool => {
				"Use academic vocabulary and proper sentences (10-15 words per sentence). Include deeper concepts."
			}
			DifficultyLevel::Advanced => {
				"Use sophisticated vocabulary and complex sentence structures (15+ words per sentence). Assume college-level knowledge."
			}
		}
	}
}

impl fmt::Display for DifficultyLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			DifficultyLevel::Beginner => "beginner",
			DifficultyLevel::Elementary => "elementary",
			DifficultyLevel::Intermediate => "intermediate",
			DifficultyLevel::HighSchool => "high_school",
			DifficultyLevel::Advanced => "advanced",
		};
		f.write_str(name)
	}
}
