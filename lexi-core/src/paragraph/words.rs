/// Educational words used when neither the request nor the history has any.
pub const DEFAULT_TARGET_WORDS: [&str; 4] = ["education", "reading", "knowledge", "literacy"];

/// Most target words a single paragraph is built around.
pub const MAX_TARGET_WORDS: usize = 5;

/// Related words fetched from a lexical service are capped to this many per kind.
pub const MAX_RELATED_PER_KIND: usize = 2;

/// A target word with the related words found for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedWords {
	pub word: String,
	pub rhymes: Vec<String>,
	pub synonyms: Vec<String>,
}

impl RelatedWords {
	/// A word without any related words.
	pub fn alone(word: impl Into<String>) -> Self {
		Self { word: word.into(), ..Default::default() }
	}
}

/// Picks the words a paragraph should practice.
///
/// Requested words win, then the user's difficult words, then
/// `DEFAULT_TARGET_WORDS`. At most `MAX_TARGET_WORDS` are kept.
pub fn select_target_words(requested: &[String], history: &[String]) -> Vec<String> {
	let source: Vec<String> = if !requested.is_empty() {
		requested.to_vec()
	} else if !history.is_empty() {
		history.to_vec()
	} else {
		DEFAULT_TARGET_WORDS.iter().map(|w| w.to_string()).collect()
	};
	source.into_iter().take(MAX_TARGET_WORDS).collect()
}

/// Flattens target words and their relatives into one list.
///
/// Only the first `MAX_TARGET_WORDS` entries are used. Each contributes
/// itself, then up to two rhymes, then up to two synonyms. Duplicates are
/// dropped, keeping the first occurrence.
pub fn expand_word_list(entries: &[RelatedWords]) -> Vec<String> {
	let mut expanded: Vec<String> = Vec::new();
	for entry in entries.iter().take(MAX_TARGET_WORDS) {
		let candidates = std::iter::once(&entry.word)
			.chain(entry.rhymes.iter().take(MAX_RELATED_PER_KIND))
			.chain(entry.synonyms.iter().take(MAX_RELATED_PER_KIND));
		for word in candidates {
			if !expanded.contains(word) {
				expanded.push(word.clone());
			}
		}
	}
	expanded
}
