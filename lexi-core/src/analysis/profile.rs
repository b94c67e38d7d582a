use serde::Serialize;

/// Reading level derived from words per minute.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadingProfile {
	/// Below 150 wpm.
	Beginner,
	/// 150 to 250 wpm, also the fallback for out-of-range input.
	Intermediate,
	/// 250 wpm and above.
	Advanced,
}

/// Text display settings suggested for a profile.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
	pub font_size: u32,
	pub letter_spacing: f32,
	pub background_color: &'static str,
	pub reading_speed: f32,
}

/// Dyslexia-friendly adjustments applied on top of every profile.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DyslexiaAdjustments {
	pub font_family: &'static str,
	pub line_height: f32,
	pub paragraph_spacing: f32,
	pub preferred_colors: [&'static str; 4],
}

pub const DYSLEXIA_ADJUSTMENTS: DyslexiaAdjustments = DyslexiaAdjustments {
	font_family: "OpenDyslexic",
	line_height: 1.8,
	paragraph_spacing: 1.5,
	preferred_colors: ["#fffacd", "#e0f7fa", "#f9fbe7", "#f0f0f0"],
};

const LIGHT_YELLOW: &str = "#fffacd";

impl ReadingProfile {
	pub fn from_wpm(wpm: f64) -> Self {
		if wpm >= 250.0 {
			ReadingProfile::Advanced
		} else if wpm >= 150.0 {
			ReadingProfile::Intermediate
		} else if wpm >= 0.0 {
			ReadingProfile::Beginner
		} else {
			ReadingProfile::Intermediate
		}
	}

	pub fn settings(self) -> DisplaySettings {
		match self {
			ReadingProfile::Beginner => DisplaySettings {
				font_size: 22,
				letter_spacing: 3.0,
				background_color: LIGHT_YELLOW,
				reading_speed: 0.8,
			},
			ReadingProfile::Intermediate => DisplaySettings {
				font_size: 20,
				letter_spacing: 2.0,
				background_color: LIGHT_YELLOW,
				reading_speed: 0.9,
			},
			ReadingProfile::Advanced => DisplaySettings {
				font_size: 18,
				letter_spacing: 1.5,
				background_color: LIGHT_YELLOW,
				reading_speed: 1.0,
			},
		}
	}
}

/// A profile with its settings, ready to send to a client.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProfileRecommendation {
	pub profile: ReadingProfile,
	pub settings: DisplaySettings,
	pub adjustments: DyslexiaAdjustments,
}

impl From<ReadingProfile> for ProfileRecommendation {
	fn from(profile: ReadingProfile) -> Self {
		Self { profile, settings: profile.settings(), adjustments: DYSLEXIA_ADJUSTMENTS }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wpm_boundaries() {
		assert_eq!(ReadingProfile::from_wpm(0.0), ReadingProfile::Beginner);
		assert_eq!(ReadingProfile::from_wpm(149.9), ReadingProfile::Beginner);
		assert_eq!(ReadingProfile::from_wpm(150.0), ReadingProfile::Intermediate);
		assert_eq!(ReadingProfile::from_wpm(249.0), ReadingProfile::Intermediate);
		assert_eq!(ReadingProfile::from_wpm(250.0), ReadingProfile::Advanced);
		assert_eq!(ReadingProfile::from_wpm(-5.0), ReadingProfile::Intermediate);
		assert_eq!(ReadingProfile::from_wpm(f64::NAN), ReadingProfile::Intermediate);
	}

	#[test]
	fn slower_readers_get_larger_text() {
		let beginner = ReadingProfile::Beginner.settings();
		let advanced = ReadingProfile::Advanced.settings();
		assert!(beginner.font_size > advanced.font_size);
		assert!(beginner.reading_speed < advanced.reading_speed);
	}

	#[test]
	fn serializes_snake_case_profile() {
		let json = serde_json::to_value(ProfileRecommendation::from(ReadingProfile::Advanced)).unwrap();
		assert_eq!(json["profile"], "advanced");
		assert_eq!(json["adjustments"]["font_family"], "OpenDyslexic");
	}
}
