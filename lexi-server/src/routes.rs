use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get, post, put, web};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use lexi_core::AnalysisError;
use lexi_core::analysis::analyzer::DEFAULT_DIFFICULT_WORD_LIMIT;
use lexi_core::analysis::history::SessionReport;
use lexi_core::analysis::profile::ProfileRecommendation;
use lexi_core::model::corpus::{Corpus, CorpusCategory};
use lexi_core::paragraph::level::DEFAULT_AGE;
use lexi_core::paragraph::practice::sample_practice_paragraphs;
use lexi_core::paragraph::words::select_target_words;

use crate::paragraphs::compose_paragraph;
use crate::state::AppState;

const ANONYMOUS_USER: &str = "anonymous";

fn error_body(message: impl Into<String>) -> serde_json::Value {
	json!({ "error": message.into() })
}

fn lock_failed() -> HttpResponse {
	HttpResponse::InternalServerError().json(error_body("Engine lock failed"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictRequest {
	partial_word: Option<String>,
}

#[derive(Deserialize)]
struct PredictNextRequest {
	context: Option<String>,
}

#[derive(Deserialize)]
struct TrainQuery {
	categories: Option<String>,
}

impl TrainQuery {
	/// Parses the comma separated category list.
	///
	/// An absent or blank list (including one made only of commas) means
	/// every bundled category.
	fn categories(&self) -> Result<Vec<CorpusCategory>, String> {
		let categories = self
			.categories
			.as_deref()
			.unwrap_or_default()
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(|s| s.parse::<CorpusCategory>())
			.collect::<Result<Vec<_>, _>>()?;
		if categories.is_empty() {
			Ok(CorpusCategory::DEFAULT.to_vec())
		} else {
			Ok(categories)
		}
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
	reading_time: Option<f64>,
	wpm: Option<f64>,
	#[serde(default)]
	difficult_words: Vec<String>,
	#[serde(default)]
	word_timings: BTreeMap<String, f64>,
	user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
	user_id: Option<String>,
}

#[derive(Deserialize)]
struct LimitQuery {
	limit: Option<usize>,
}

#[derive(Deserialize)]
struct CountQuery {
	count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParagraphRequest {
	user_id: Option<String>,
	#[serde(default)]
	difficult_words: Vec<String>,
	age: Option<u32>,
}

/// Completes a partially typed word. Inputs shorter than two characters
/// get an empty prediction.
#[post("/predict")]
async fn predict(data: web::Data<AppState>, body: web::Json<PredictRequest>) -> impl Responder {
	let partial = match &body.partial_word {
		Some(p) => p,
		None => return HttpResponse::BadRequest().json(error_body("Missing required parameter: partialWord")),
	};

	let mut predictor = match data.predictor.lock() {
		Ok(p) => p,
		Err(_) => return lock_failed(),
	};
	match predictor.complete(partial) {
		Ok(prediction) => HttpResponse::Ok().json(json!({ "prediction": prediction.unwrap_or_default() })),
		Err(e) => HttpResponse::InternalServerError().json(error_body(e.to_string())),
	}
}

#[post("/predict-next")]
async fn predict_next(data: web::Data<AppState>, body: web::Json<PredictNextRequest>) -> impl Responder {
	let context = match &body.context {
		Some(c) => c,
		None => return HttpResponse::BadRequest().json(error_body("Missing required parameter: context")),
	};

	let mut predictor = match data.predictor.lock() {
		Ok(p) => p,
		Err(_) => return lock_failed(),
	};
	match predictor.predict_next(context) {
		Ok(prediction) => HttpResponse::Ok().json(json!({ "prediction": prediction.unwrap_or_default() })),
		Err(e) => HttpResponse::InternalServerError().json(error_body(e.to_string())),
	}
}

/// Re-trains the model on the chosen bundled categories and saves it.
#[put("/train")]
async fn train(data: web::Data<AppState>, query: web::Query<TrainQuery>) -> impl Responder {
	let categories = match query.categories() {
		Ok(c) => c,
		Err(e) => return HttpResponse::BadRequest().json(error_body(e)),
	};

	let mut predictor = match data.predictor.lock() {
		Ok(p) => p,
		Err(_) => return lock_failed(),
	};
	match predictor.train(Some(&Corpus::bundled(&categories))) {
		Ok(summary) => {
			data.persist_model(&mut predictor);
			HttpResponse::Ok().json(json!({
				"vocabulary_size": summary.vocabulary_size,
				"sentences": summary.sentences,
			}))
		}
		Err(e) => HttpResponse::InternalServerError().json(error_body(format!("Training failed: {e}"))),
	}
}

#[post("/analyze")]
async fn analyze(data: web::Data<AppState>, body: web::Json<AnalyzeRequest>) -> impl Responder {
	let body = body.into_inner();
	let user_id = body.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_owned());
	let report = SessionReport {
		reading_time: body.reading_time,
		wpm: body.wpm,
		difficult_words: body.difficult_words,
		word_timings: body.word_timings,
	};

	let mut analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	match analyzer.analyze_session(&user_id, report) {
		Ok(recs) => {
			let profile = ProfileRecommendation::from(analyzer.reading_profile(&user_id));
			data.persist_history(&analyzer);
			HttpResponse::Ok().json(json!({ "recommendations": recs, "profile": profile }))
		}
		Err(AnalysisError::InvalidInput(message)) => HttpResponse::BadRequest().json(error_body(message)),
		Err(e) => HttpResponse::InternalServerError().json(error_body(e.to_string())),
	}
}

#[get("/recommendations/{user_id}")]
async fn recommendations(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
	let user_id = path.into_inner();
	let analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	HttpResponse::Ok().json(json!({
		"topics": analyzer.get_recommendations(&user_id),
		"message": format!("Recommended topics for user {user_id}"),
	}))
}

#[get("/improvement")]
async fn improvement(data: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
	let user_id = query.user_id.as_deref().unwrap_or(ANONYMOUS_USER);
	let analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	HttpResponse::Ok().json(analyzer.analyze_improvement(user_id))
}

#[get("/difficult-words/{user_id}")]
async fn difficult_words(
	data: web::Data<AppState>,
	path: web::Path<String>,
	query: web::Query<LimitQuery>,
) -> impl Responder {
	let limit = query.limit.unwrap_or(DEFAULT_DIFFICULT_WORD_LIMIT);
	let analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	HttpResponse::Ok().json(json!({ "words": analyzer.get_difficult_words(&path, limit) }))
}

/// Builds a practice paragraph for the user and stores it in their history.
#[post("/recommend-paragraph")]
async fn recommend_paragraph(data: web::Data<AppState>, body: web::Json<ParagraphRequest>) -> impl Responder {
	let body = body.into_inner();
	let user_id = body.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_owned());
	let age = body.age.unwrap_or(DEFAULT_AGE);

	// the guard must be released before awaiting the collaborators
	let targets = {
		let analyzer = match data.analyzer.lock() {
			Ok(a) => a,
			Err(_) => return lock_failed(),
		};
		select_target_words(&body.difficult_words, &analyzer.get_difficult_words(&user_id, usize::MAX))
	};

	let paragraph = compose_paragraph(&data.generator, &data.lexicon, targets, age).await;
	info!("Paragraph for {user_id} built from {} words ({:?})", paragraph.words_used.len(), paragraph.source);

	let mut analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	analyzer.record_paragraph(&user_id, &paragraph.paragraph, &paragraph.words_used);
	data.persist_history(&analyzer);

	HttpResponse::Ok().json(paragraph)
}

#[get("/paragraphs/{user_id}/history")]
async fn paragraph_history(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
	let analyzer = match data.analyzer.lock() {
		Ok(a) => a,
		Err(_) => return lock_failed(),
	};
	let history: Vec<_> = analyzer
		.history(&path)
		.map(|h| h.paragraph_history().collect())
		.unwrap_or_default();
	HttpResponse::Ok().json(json!({ "history": history }))
}

#[get("/paragraphs")]
async fn paragraphs(query: web::Query<CountQuery>) -> impl Responder {
	let count = query.count.unwrap_or(1);
	HttpResponse::Ok().json(json!({ "paragraphs": sample_practice_paragraphs(count) }))
}

#[get("/health")]
async fn health(data: web::Data<AppState>) -> impl Responder {
	match (data.predictor.lock(), data.analyzer.lock()) {
		(Ok(predictor), Ok(_)) => HttpResponse::Ok().json(json!({
			"status": "healthy",
			"message": "All models loaded successfully",
			"model_trained": predictor.is_trained(),
		})),
		_ => {
			error!("Health check found a poisoned engine lock");
			HttpResponse::InternalServerError().json(json!({
				"status": "unhealthy",
				"message": "Models not initialized",
				"model_trained": false,
			}))
		}
	}
}

/// Registers every endpoint under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api")
			.service(predict)
			.service(predict_next)
			.service(train)
			.service(analyze)
			.service(recommendations)
			.service(improvement)
			.service(difficult_words)
			.service(recommend_paragraph)
			.service(paragraph_history)
			.service(paragraphs)
			.service(health),
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{App, test};
	use serde_json::Value;

	use lexi_core::{ReadingAnalyzer, WordPredictor};

	use crate::config::Config;

	fn state(dir: &tempfile::TempDir) -> web::Data<AppState> {
		let mut config = Config::default();
		config.lexicon.enabled = false;
		config.storage.model_path = dir.path().join("model.bin");
		config.storage.history_path = dir.path().join("history.json");
		let state = AppState::new(&config, WordPredictor::default(), ReadingAnalyzer::new()).unwrap();
		web::Data::new(state)
	}

	macro_rules! service {
		($data:expr) => {
			test::init_service(App::new().app_data($data.clone()).configure(configure)).await
		};
	}

	#[actix_web::test]
	async fn health_reports_untrained_model() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::get().uri("/api/health").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["status"], "healthy");
		assert_eq!(body["model_trained"], false);
	}

	#[actix_web::test]
	async fn predict_completes_and_validates() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::post().uri("/api/predict").set_json(json!({ "partialWord": "artif" })).to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["prediction"], "artificial");

		let req = test::TestRequest::post().uri("/api/predict").set_json(json!({ "partialWord": "a" })).to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["prediction"], "");

		let req = test::TestRequest::post().uri("/api/predict").set_json(json!({})).to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), 400);
	}

	#[actix_web::test]
	async fn predict_next_uses_context() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::post()
			.uri("/api/predict-next")
			.set_json(json!({ "context": "the quick brown" }))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["prediction"], "fox");
	}

	#[actix_web::test]
	async fn train_rejects_unknown_category_and_saves_model() {
		let dir = tempfile::tempdir().unwrap();
		let data = state(&dir);
		let app = service!(data);

		let req = test::TestRequest::put().uri("/api/train?categories=poetry").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), 400);

		let req = test::TestRequest::put().uri("/api/train?categories=news").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert!(body["vocabulary_size"].as_u64().unwrap() > 0);
		assert!(dir.path().join("model.bin").exists());
	}

	#[::core::prelude::v1::test]
	fn blank_category_lists_mean_every_category() {
		for raw in [None, Some(""), Some(" "), Some(","), Some(" , ,")] {
			let query = TrainQuery { categories: raw.map(str::to_owned) };
			assert_eq!(query.categories().unwrap(), CorpusCategory::DEFAULT.to_vec());
		}

		let query = TrainQuery { categories: Some("news,".to_owned()) };
		assert_eq!(query.categories().unwrap(), vec![CorpusCategory::News]);
	}

	#[actix_web::test]
	async fn train_with_only_commas_uses_default_categories() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::put().uri("/api/train?categories=,").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), 200);
	}

	#[actix_web::test]
	async fn analyze_records_session_and_persists() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::post()
			.uri("/api/analyze")
			.set_json(json!({
				"readingTime": 120,
				"wpm": 140,
				"difficultWords": ["artificial", "intelligence"],
				"wordTimings": { "artificial": 2.1 },
				"userId": "u1",
			}))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["recommendations"], json!(["long words (artificial, intelligence)"]));
		assert_eq!(body["profile"]["profile"], "beginner");
		assert!(dir.path().join("history.json").exists());

		let req = test::TestRequest::get().uri("/api/difficult-words/u1?limit=1").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["words"], json!(["artificial"]));

		let req = test::TestRequest::get().uri("/api/recommendations/u1").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["message"], "Recommended topics for user u1");

		let req = test::TestRequest::get().uri("/api/improvement?userId=u1").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["improvement"], false);
		assert!(body.get("wpm_change").is_none());
	}

	#[actix_web::test]
	async fn analyze_without_wpm_is_bad_request() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::post().uri("/api/analyze").set_json(json!({ "readingTime": 30 })).to_request();
		assert_eq!(test::call_service(&app, req).await.status(), 400);
	}

	#[actix_web::test]
	async fn unknown_user_gets_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::get().uri("/api/recommendations/ghost").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["topics"], json!(["general", "basic vocabulary"]));

		let req = test::TestRequest::get().uri("/api/improvement").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["message"], "Not enough data to analyze improvement.");
	}

	#[actix_web::test]
	async fn paragraph_falls_back_and_is_remembered() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::post()
			.uri("/api/recommend-paragraph")
			.set_json(json!({ "userId": "kid", "difficultWords": ["rocket"], "age": 6 }))
			.to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["source"], "fallback");
		assert_eq!(body["paragraph"], "Let's learn the word rocket. rocket is fun to say.");
		assert_eq!(body["words_used"][0], "rocket");

		let req = test::TestRequest::get().uri("/api/paragraphs/kid/history").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["history"].as_array().map(Vec::len), Some(1));
	}

	#[actix_web::test]
	async fn practice_paragraphs_are_sampled() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(state(&dir));

		let req = test::TestRequest::get().uri("/api/paragraphs?count=2").to_request();
		let body: Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["paragraphs"].as_array().map(Vec::len), Some(2));
	}
}
