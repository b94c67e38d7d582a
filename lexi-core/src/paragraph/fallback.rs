use super::level::DifficultyLevel;
use super::{GeneratedParagraph, ParagraphSource};

/// Words appended when fewer than two target words are available.
pub const FILLER_WORDS: [&str; 4] = ["reading", "practice", "learning", "knowledge"];

/// Builds a template paragraph around `words` for the reader's age.
///
/// The first two words are woven into the text and the full list is
/// repeated at the end (except for the youngest readers).
pub fn fallback_paragraph(words: &[String], age: u32) -> GeneratedParagraph {
	let mut words = words.to_vec();
	if words.len() < 2 {
		words.extend(FILLER_WORDS.iter().map(|w| w.to_string()));
	}

	let (first, second) = (&words[0], &words[1]);
	let all = words.join(", ");

	let paragraph = match DifficultyLevel::for_age(age) {
		DifficultyLevel::Beginner => format!("Let's learn the word {first}. {first} is fun to say."),
		DifficultyLevel::Elementary => format!(
			"When we read, we learn words like {first} and {second}. These words help us understand more \
			 about the world. Try reading these words: {all}."
		),
		DifficultyLevel::Intermediate => format!(
			"Reading helps us discover new words like {first} and {second}. These words build our vocabulary \
			 and knowledge. The more we practice saying these words, the better we become at reading. \
			 Let's practice these words: {all}."
		),
		DifficultyLevel::HighSchool => format!(
			"Expanding your vocabulary with words like {first} and {second} improves your reading \
			 comprehension. The more varied words you recognize quickly, the better your reading will become. \
			 Regular practice with challenging words strengthens neural pathways in the brain. This process \
			 enhances both reading speed and understanding. Practice these words: {all}."
		),
		DifficultyLevel::Advanced => format!(
			"Fluent reading involves rapid word recognition for terms like {first} and {second}, which requires \
			 consistent practice and exposure. Developing automaticity with diverse vocabulary enhances \
			 comprehension and analytical thinking abilities. Research indicates that proficient readers process \
			 words as complete units rather than individual letters, a skill refined through repeated exposure \
			 to varied texts. Contextual understanding further facilitates word recognition, as semantic cues \
			 guide prediction and verification processes. This sophisticated cognitive interplay evolves through \
			 deliberate practice with challenging vocabulary. Consider these words for your practice: {all}."
		),
	};

	GeneratedParagraph { paragraph, words_used: words, source: ParagraphSource::Fallback }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(list: &[&str]) -> Vec<String> {
		list.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn youngest_readers_get_one_word() {
		let result = fallback_paragraph(&words(&["sun", "moon"]), 5);
		assert_eq!(result.paragraph, "Let's learn the word sun. sun is fun to say.");
		assert_eq!(result.words_used, vec!["sun", "moon"]);
		assert_eq!(result.source, ParagraphSource::Fallback);
	}

	#[test]
	fn elementary_template_lists_all_words() {
		let result = fallback_paragraph(&words(&["river", "bridge", "stone"]), 10);
		assert_eq!(
			result.paragraph,
			"When we read, we learn words like river and bridge. These words help us understand more about \
			 the world. Try reading these words: river, bridge, stone."
		);
	}

	#[test]
	fn short_lists_are_padded() {
		let result = fallback_paragraph(&words(&["galaxy"]), 30);
		assert_eq!(result.words_used, vec!["galaxy", "reading", "practice", "learning", "knowledge"]);
		assert!(result.paragraph.contains("terms like galaxy and reading"));
		assert!(result.paragraph.ends_with("galaxy, reading, practice, learning, knowledge."));

		let empty = fallback_paragraph(&[], 14);
		assert_eq!(empty.words_used.len(), FILLER_WORDS.len());
		assert!(empty.paragraph.starts_with("Reading helps us discover new words like reading and practice."));
	}
}
