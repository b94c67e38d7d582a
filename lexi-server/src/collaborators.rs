//! Clients for the external services used to build practice paragraphs.
//!
//! Both are optional: every failure surfaces as a `CollaboratorError` and
//! callers fall back to local behaviour.

use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lexi_core::paragraph::words::{MAX_RELATED_PER_KIND, RelatedWords};

use crate::config::{LexiconConfig, TextGenerationConfig};

#[derive(Debug, Error)]
pub enum CollaboratorError {
	#[error("{0} is disabled")]
	Disabled(&'static str),

	/// Transport failure or timeout.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("unexpected status {0}")]
	Status(StatusCode),

	#[error("malformed response: {0}")]
	Malformed(String),
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
	inputs: &'a str,
	parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
	max_length: u32,
	temperature: f32,
	top_p: f32,
	do_sample: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
	generated_text: String,
}

/// Hosted text generation client.
pub struct TextGenerator {
	client: Client,
	endpoint: String,
	api_key: Option<String>,
	max_length: u32,
	temperature: f32,
	top_p: f32,
}

impl TextGenerator {
	pub fn new(config: &TextGenerationConfig) -> Result<Self, CollaboratorError> {
		let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
		Ok(Self {
			client,
			endpoint: config.endpoint.clone(),
			api_key: config.api_key.clone(),
			max_length: config.max_length,
			temperature: config.temperature,
			top_p: config.top_p,
		})
	}

	pub fn is_enabled(&self) -> bool {
		self.api_key.is_some()
	}

	/// Sends `prompt` and returns the first generated text.
	pub async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
		let api_key = self.api_key.as_deref().ok_or(CollaboratorError::Disabled("text generation"))?;

		let payload = GenerationRequest {
			inputs: prompt,
			parameters: GenerationParameters {
				max_length: self.max_length,
				temperature: self.temperature,
				top_p: self.top_p,
				do_sample: true,
			},
		};
		let response = self.client.post(&self.endpoint).bearer_auth(api_key).json(&payload).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(CollaboratorError::Status(status));
		}

		let generated: Vec<GeneratedText> =
			response.json().await.map_err(|e| CollaboratorError::Malformed(e.to_string()))?;
		generated
			.into_iter()
			.next()
			.map(|g| g.generated_text)
			.ok_or_else(|| CollaboratorError::Malformed("no generated text".to_owned()))
	}
}

#[derive(Deserialize)]
struct LexiconEntry {
	word: String,
}

/// Rhyme and synonym lookups.
pub struct Lexicon {
	client: Client,
	endpoint: String,
	enabled: bool,
}

impl Lexicon {
	pub fn new(config: &LexiconConfig) -> Result<Self, CollaboratorError> {
		let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
		Ok(Self { client, endpoint: config.endpoint.clone(), enabled: config.enabled })
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub async fn rhymes(&self, word: &str) -> Result<Vec<String>, CollaboratorError> {
		self.lookup("rel_rhy", word).await
	}

	pub async fn synonyms(&self, word: &str) -> Result<Vec<String>, CollaboratorError> {
		self.lookup("rel_syn", word).await
	}

	/// Rhymes and synonyms of `word`; lookup failures leave the lists empty.
	pub async fn related(&self, word: &str) -> RelatedWords {
		let mut related = RelatedWords::alone(word);
		if !self.enabled {
			return related;
		}
		match self.rhymes(word).await {
			Ok(rhymes) => related.rhymes = rhymes,
			Err(e) => debug!("No rhymes for {word}: {e}"),
		}
		match self.synonyms(word).await {
			Ok(synonyms) => related.synonyms = synonyms,
			Err(e) => debug!("No synonyms for {word}: {e}"),
		}
		related
	}

	async fn lookup(&self, relation: &str, word: &str) -> Result<Vec<String>, CollaboratorError> {
		if !self.enabled {
			return Err(CollaboratorError::Disabled("lexicon"));
		}

		let max = MAX_RELATED_PER_KIND.to_string();
		let response = self
			.client
			.get(&self.endpoint)
			.query(&[(relation, word), ("max", max.as_str())])
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(CollaboratorError::Status(status));
		}

		let entries: Vec<LexiconEntry> =
			response.json().await.map_err(|e| CollaboratorError::Malformed(e.to_string()))?;
		Ok(entries.into_iter().map(|e| e.word).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[actix_web::test]
	async fn generator_without_key_is_disabled() {
		let generator = TextGenerator::new(&TextGenerationConfig::default()).unwrap();
		assert!(!generator.is_enabled());
		assert!(matches!(generator.generate("hello").await, Err(CollaboratorError::Disabled(_))));
	}

	#[actix_web::test]
	async fn disabled_lexicon_returns_the_word_alone() {
		let config = LexiconConfig { enabled: false, ..LexiconConfig::default() };
		let lexicon = Lexicon::new(&config).unwrap();

		assert!(matches!(lexicon.rhymes("cat").await, Err(CollaboratorError::Disabled(_))));
		assert_eq!(lexicon.related("cat").await, RelatedWords::alone("cat"));
	}
}
