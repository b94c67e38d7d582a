/// Sentinel padding the start of every training sentence.
pub const START_TOKEN: &str = "<s>";

/// Sentinel padding the end of every training sentence.
pub const END_TOKEN: &str = "</s>";

/// Returns `true` for the reserved sentence-boundary tokens.
pub fn is_sentinel(token: &str) -> bool {
	token == START_TOKEN || token == END_TOKEN
}

/// Splits free text into lowercase word and punctuation tokens.
///
/// # Rules
/// - Runs of alphanumeric characters form a word.
/// - An apostrophe or hyphen between two alphanumeric characters stays
///   inside the word (`don't`, `well-known`).
/// - Any other non-whitespace character is a token of its own.
///
/// Sentinels can never be produced: `<s>` in the input becomes `<`, `s`, `>`.
pub fn tokenize(text: &str) -> Vec<String> {
	let chars: Vec<char> = text.chars().flat_map(|c| c.to_lowercase()).collect();
	let mut tokens = Vec::new();
	let mut word = String::new();

	for (i, &c) in chars.iter().enumerate() {
		if c.is_alphanumeric() {
			word.push(c);
			continue;
		}

		let joins = (c == '\'' || c == '-')
			&& !word.is_empty()
			&& chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());
		if joins {
			word.push(c);
			continue;
		}

		if !word.is_empty() {
			tokens.push(std::mem::take(&mut word));
		}
		if !c.is_whitespace() {
			tokens.push(c.to_string());
		}
	}

	if !word.is_empty() {
		tokens.push(word);
	}
	tokens
}
