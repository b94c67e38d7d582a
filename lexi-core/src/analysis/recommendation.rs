use std::fmt;

/// Returned when a user has no difficult words yet.
pub const DEFAULT_RECOMMENDATIONS: [&str; 2] = ["general", "basic vocabulary"];

const MAX_GROUPS: usize = 3;
const SAMPLE_WORDS: usize = 3;

/// Word length bucket used as a proxy for reading complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCategory {
	/// Up to 4 characters.
	Short,
	/// 5 to 7 characters.
	Medium,
	/// 8 characters or more.
	Long,
}

impl LengthCategory {
	pub fn of(word: &str) -> Self {
		match word.chars().count() {
			0..=4 => LengthCategory::Short,
			5..=7 => LengthCategory::Medium,
			_ => LengthCategory::Long,
		}
	}
}

impl fmt::Display for LengthCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LengthCategory::Short => f.write_str("short"),
			LengthCategory::Medium => f.write_str("medium"),
			LengthCategory::Long => f.write_str("long"),
		}
	}
}

/// Builds practice recommendations from a user's difficult words.
///
/// Words are grouped by length category; groups are ranked by size
/// (ties keep discovery order) and each of the top three yields
/// `"<category> words (<up to three words>)"`.
pub fn recommend(difficult_words: &[String]) -> Vec<String> {
	if difficult_words.is_empty() {
		return DEFAULT_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
	}

	let mut groups: Vec<(LengthCategory, Vec<&str>)> = Vec::new();
	for word in difficult_words {
		let category = LengthCategory::of(word);
		match groups.iter_mut().find(|(c, _)| *c == category) {
			Some((_, words)) => words.push(word.as_str()),
			None => groups.push((category, vec![word.as_str()])),
		}
	}

	// stable sort: equal sizes stay in discovery order
	groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

	groups
		.into_iter()
		.take(MAX_GROUPS)
		.map(|(category, words)| {
			let samples = &words[..words.len().min(SAMPLE_WORDS)];
			format!("{category} words ({})", samples.join(", "))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(list: &[&str]) -> Vec<String> {
		list.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn empty_list_yields_defaults() {
		assert_eq!(recommend(&[]), vec!["general", "basic vocabulary"]);
	}

	#[test]
	fn categories_follow_length() {
		assert_eq!(LengthCategory::of("cat"), LengthCategory::Short);
		assert_eq!(LengthCategory::of("read"), LengthCategory::Short);
		assert_eq!(LengthCategory::of("words"), LengthCategory::Medium);
		assert_eq!(LengthCategory::of("reading"), LengthCategory::Medium);
		assert_eq!(LengthCategory::of("sentence"), LengthCategory::Long);
	}

	#[test]
	fn same_bucket_words_form_one_group() {
		assert_eq!(
			recommend(&words(&["artificial", "intelligence"])),
			vec!["long words (artificial, intelligence)"]
		);
	}

	#[test]
	fn groups_rank_by_size_then_discovery() {
		let list = words(&["cat", "climate", "dog", "weather", "sun", "atmosphere", "fog"]);
		assert_eq!(
			recommend(&list),
			vec![
				"short words (cat, dog, sun)",
				"medium words (climate, weather)",
				"long words (atmosphere)",
			]
		);

		let tie = words(&["reading", "book", "weather", "page"]);
		assert_eq!(recommend(&tie), vec!["medium words (reading, weather)", "short words (book, page)"]);
	}
}
