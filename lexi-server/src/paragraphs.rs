use log::{debug, warn};

use lexi_core::paragraph::fallback::fallback_paragraph;
use lexi_core::paragraph::prompt::{build_prompt, filter_for_age, strip_prompt};
use lexi_core::paragraph::words::expand_word_list;
use lexi_core::paragraph::{GeneratedParagraph, ParagraphSource};

use crate::collaborators::{CollaboratorError, Lexicon, TextGenerator};

/// Produces a practice paragraph around `targets`.
///
/// The target words are expanded with rhymes and synonyms, a prompt is
/// sent to the text generator and its output filtered for the reader's
/// age. Any generation failure, or an empty result, yields the template
/// paragraph instead.
pub async fn compose_paragraph(
	generator: &TextGenerator,
	lexicon: &Lexicon,
	targets: Vec<String>,
	age: u32,
) -> GeneratedParagraph {
	let mut related = Vec::with_capacity(targets.len());
	for word in &targets {
		related.push(lexicon.related(word).await);
	}
	let prompt = build_prompt(&expand_word_list(&related), age);
	debug!("Generation prompt: {prompt}");

	match generator.generate(&prompt).await {
		Ok(text) => {
			let paragraph = filter_for_age(strip_prompt(&text, &prompt), age);
			if paragraph.trim().is_empty() {
				warn!("Text generation returned nothing usable, using template");
				return fallback_paragraph(&targets, age);
			}
			GeneratedParagraph { paragraph, words_used: targets, source: ParagraphSource::Generated }
		}
		Err(CollaboratorError::Disabled(_)) => fallback_paragraph(&targets, age),
		Err(e) => {
			warn!("Text generation failed, using template: {e}");
			fallback_paragraph(&targets, age)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{LexiconConfig, TextGenerationConfig};

	#[actix_web::test]
	async fn disabled_generator_falls_back_to_template() {
		let generator = TextGenerator::new(&TextGenerationConfig::default()).unwrap();
		let lexicon = Lexicon::new(&LexiconConfig { enabled: false, ..LexiconConfig::default() }).unwrap();

		let result = compose_paragraph(&generator, &lexicon, vec!["planet".into(), "orbit".into()], 10).await;
		assert_eq!(result.source, ParagraphSource::Fallback);
		assert_eq!(result.words_used, vec!["planet", "orbit"]);
		assert!(result.paragraph.starts_with("When we read, we learn words like planet and orbit."));
	}
}
