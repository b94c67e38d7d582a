mod collaborators;
mod config;
mod paragraphs;
mod routes;
mod state;

use std::io;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use env_logger::Env;
use log::{error, info, warn};

use lexi_core::model::predictor::LoadOutcome;
use lexi_core::{ReadingAnalyzer, WordPredictor};

use crate::config::Config;
use crate::state::AppState;

/// Main entry point for the server.
///
/// Loads the configuration, restores (or trains) the model and the reading
/// history, then serves the `/api` endpoints.
///
/// # Notes
/// - Only configuration and bind failures abort startup.
/// - Text generation stays disabled until `HUGGINGFACE_API_KEY` is set.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let config = Config::load().map_err(|e| {
		error!("{e}");
		io::Error::other(e)
	})?;

	let mut predictor = WordPredictor::new(config.model.order).map_err(io::Error::other)?;
	match predictor.load(&config.storage.model_path).map_err(io::Error::other)? {
		LoadOutcome::Loaded => {}
		LoadOutcome::Retrained => {
			if let Err(e) = predictor.save(&config.storage.model_path) {
				warn!("Could not save the freshly trained model: {e}");
			}
		}
	}

	let mut analyzer = ReadingAnalyzer::new();
	analyzer.load_history(&config.storage.history_path);

	let state = AppState::new(&config, predictor, analyzer).map_err(io::Error::other)?;
	if !state.generator.is_enabled() {
		info!("No text generation key configured, paragraphs will use templates");
	}
	if !state.lexicon.is_enabled() {
		info!("Lexical lookups disabled");
	}
	let shared_state = web::Data::new(state);

	info!("Listening on {}:{}", config.server.host, config.server.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.app_data(shared_state.clone())
			.configure(routes::configure)
	})
		.bind((config.server.host.clone(), config.server.port))?
		.run()
		.await
}
