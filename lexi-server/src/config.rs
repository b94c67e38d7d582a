use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "LEXI_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "lexi.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("cannot read configuration: {0}")]
	Io(#[from] io::Error),

	#[error("invalid configuration: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Server configuration. Every field has a default, so an empty or absent
/// file is valid.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
	pub server: ServerConfig,
	pub storage: StorageConfig,
	pub model: ModelConfig,
	pub text_generation: TextGenerationConfig,
	pub lexicon: LexiconConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self { host: "127.0.0.1".to_owned(), port: 5000 }
	}
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageConfig {
	pub model_path: PathBuf,
	pub history_path: PathBuf,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			model_path: PathBuf::from("data/model.bin"),
			history_path: PathBuf::from("data/reading_history.json"),
		}
	}
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ModelConfig {
	pub order: usize,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { order: lexi_core::model::predictor::DEFAULT_ORDER }
	}
}

/// Hosted text generation (Hugging Face inference API).
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TextGenerationConfig {
	pub endpoint: String,
	/// Generation is disabled while no key is configured.
	pub api_key: Option<String>,
	pub timeout_secs: u64,
	pub max_length: u32,
	pub temperature: f32,
	pub top_p: f32,
}

impl Default for TextGenerationConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://api-inference.huggingface.co/models/gpt2-large".to_owned(),
			api_key: None,
			timeout_secs: 10,
			max_length: 250,
			temperature: 0.7,
			top_p: 0.9,
		}
	}
}

/// Rhyme and synonym lookups (Datamuse).
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LexiconConfig {
	pub endpoint: String,
	pub enabled: bool,
	pub timeout_secs: u64,
}

impl Default for LexiconConfig {
	fn default() -> Self {
		Self { endpoint: "https://api.datamuse.com/words".to_owned(), enabled: true, timeout_secs: 5 }
	}
}

impl Config {
	/// Loads the file named by `LEXI_CONFIG` (or `lexi.toml`) and applies
	/// environment overrides.
	pub fn load() -> Result<Self, ConfigError> {
		let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
		let mut config = Self::from_path(&path)?;
		config.apply_env(|key| std::env::var(key).ok());
		Ok(config)
	}

	/// Reads a TOML file. A missing file yields the defaults.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		match std::fs::read_to_string(path) {
			Ok(content) => {
				info!("Using configuration from {}", path.display());
				Self::from_toml(&content)
			}
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				info!("No configuration at {}, using defaults", path.display());
				Ok(Self::default())
			}
			Err(e) => Err(e.into()),
		}
	}

	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Applies `PORT` and `HUGGINGFACE_API_KEY` overrides.
	pub fn apply_env<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(port) = lookup("PORT") {
			match port.trim().parse() {
				Ok(port) => self.server.port = port,
				Err(_) => warn!("Ignoring invalid PORT value {port:?}"),
			}
		}
		if let Some(key) = lookup("HUGGINGFACE_API_KEY").filter(|k| !k.trim().is_empty()) {
			self.text_generation.api_key = Some(key);
		}
	}
}
