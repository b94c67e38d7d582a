//! Practice paragraph domain.
//!
//! Everything needed to produce an age-appropriate practice paragraph
//! except the network calls: difficulty levels, generation prompts, the
//! age filter, template fallbacks, target-word selection and the bundled
//! practice texts.

/// Reading difficulty bands derived from the reader's age.
pub mod level;

/// Prompt construction and post-processing of generated text.
pub mod prompt;

/// Template paragraphs used when generation is unavailable.
pub mod fallback;

/// Target word selection and expansion with related words.
pub mod words;

/// Bundled practice paragraphs.
pub mod practice;

use serde::Serialize;

/// Where a paragraph came from.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphSource {
	/// Produced by the external text generator.
	Generated,
	/// Built locally from a template.
	Fallback,
}

/// A practice paragraph and the words it was built around.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneratedParagraph {
	pub paragraph: String,
	pub words_used: Vec<String>,
	pub source: ParagraphSource,
}
