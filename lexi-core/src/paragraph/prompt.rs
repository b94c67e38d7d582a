use super::level::DifficultyLevel;

/// Longest sentence, in words, kept intact for the youngest readers.
pub const MAX_YOUNG_SENTENCE_WORDS: usize = 12;

const YOUNG_READER_AGE: u32 = 8;

fn base_prompt(age: u32) -> &'static str {
	match DifficultyLevel::for_age(age) {
		DifficultyLevel::Beginner => {
			"Write a very simple, short paragraph (1-2 sentences only) for young children about"
		}
		DifficultyLevel::Elementary => {
			"Write a simple paragraph (2-3 sentences) for elementary school children about"
		}
		DifficultyLevel::Intermediate => {
			"Write a moderate-length paragraph (3-4 sentences) for middle school students about"
		}
		DifficultyLevel::HighSchool => "Write a standard paragraph (4-5 sentences) for high school students about",
		DifficultyLevel::Advanced => {
			"Write a detailed paragraph (5-6 sentences) with complex structure and college-level vocabulary about"
		}
	}
}

/// Builds the generation prompt for `words` at the reader's age.
pub fn build_prompt(words: &[String], age: u32) -> String {
	format!(
		"{} {}. {}",
		base_prompt(age),
		words.join(", "),
		DifficultyLevel::for_age(age).instruction()
	)
}

/// Removes the echoed prompt some generators prepend to their output.
pub fn strip_prompt<'a>(generated: &'a str, prompt: &str) -> &'a str {
	match generated.strip_prefix(prompt) {
		Some(rest) => rest.trim(),
		None => generated.trim(),
	}
}

/// Makes generated text easier for young readers.
///
/// Below age 8, every sentence longer than `MAX_YOUNG_SENTENCE_WORDS`
/// words is cut in two. Older readers get the text unchanged.
pub fn filter_for_age(text: &str, age: u32) -> String {
	if age >= YOUNG_READER_AGE {
		return text.to_owned();
	}

	let mut simplified = Vec::new();
	for sentence in text.split(". ") {
		let words: Vec<&str> = sentence.split_whitespace().collect();
		if words.is_empty() {
			continue;
		}
		if words.len() > MAX_YOUNG_SENTENCE_WORDS {
			let middle = words.len() / 2;
			simplified.push(terminate(&words[..middle].join(" ")));
			simplified.push(terminate(&words[middle..].join(" ")));
		} else {
			simplified.push(terminate(&words.join(" ")));
		}
	}
	simplified.join(" ")
}

fn terminate(sentence: &str) -> String {
	if sentence.ends_with(['.', '!', '?']) {
		sentence.to_owned()
	} else {
		format!("{sentence}.")
	}
}
