use std::collections::BTreeMap;

use lexi_core::analysis::analyzer::HistoryLoad;
use lexi_core::analysis::history::SessionReport;
use lexi_core::model::predictor::LoadOutcome;
use lexi_core::{ReadingAnalyzer, WordPredictor};

fn report(wpm: f64, words: &[&str]) -> SessionReport {
	SessionReport {
		reading_time: Some(120.0),
		wpm: Some(wpm),
		difficult_words: words.iter().map(|w| w.to_string()).collect(),
		word_timings: BTreeMap::new(),
	}
}

#[test]
fn model_snapshot_keeps_predictions() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.bin");

	let mut trained = WordPredictor::default();
	let expected = trained.predict_next("the quick brown").unwrap();
	assert_eq!(expected.as_deref(), Some("fox"));
	trained.save(&path).unwrap();

	let mut restored = WordPredictor::default();
	assert_eq!(restored.load(&path).unwrap(), LoadOutcome::Loaded);
	assert_eq!(restored.predict_next("the quick brown").unwrap(), expected);
	assert_eq!(restored.complete("artif").unwrap(), trained.complete("artif").unwrap());
	assert_eq!(restored.model(), trained.model());
}

#[test]
fn corrupt_snapshot_retrains() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.bin");
	std::fs::write(&path, b"definitely not a model").unwrap();

	let mut predictor = WordPredictor::default();
	assert_eq!(predictor.load(&path).unwrap(), LoadOutcome::Retrained);
	assert!(predictor.is_trained());
	assert_eq!(predictor.predict_next("the quick brown").unwrap().as_deref(), Some("fox"));
}

#[test]
fn history_round_trip_keeps_average() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("history.json");

	let mut analyzer = ReadingAnalyzer::new();
	for wpm in [100.0, 150.0, 200.0] {
		analyzer.analyze_session("reader", report(wpm, &["photosynthesis"])).unwrap();
	}
	analyzer.record_paragraph("reader", "Plants make food from light.", &["photosynthesis".to_owned()]);
	analyzer.save_history(&path).unwrap();

	let mut restored = ReadingAnalyzer::new();
	assert_eq!(restored.load_history(&path), HistoryLoad::Loaded(1));

	let history = restored.history("reader").unwrap();
	assert_eq!(history.sessions().len(), 3);
	assert_eq!(history.average_wpm(), 150.0);
	assert_eq!(history.difficult_words(), &["photosynthesis"]);
	assert_eq!(history.paragraph_history().count(), 1);
	assert_eq!(restored.get_recommendations("reader"), analyzer.get_recommendations("reader"));
}

#[test]
fn first_session_scenario() {
	let mut analyzer = ReadingAnalyzer::new();
	let recommendations = analyzer
		.analyze_session("u1", report(140.0, &["artificial", "intelligence"]))
		.unwrap();

	assert_eq!(recommendations, vec!["long words (artificial, intelligence)"]);
	let history = analyzer.history("u1").unwrap();
	assert_eq!(history.sessions().len(), 1);
	assert_eq!(history.average_wpm(), 140.0);

	let improvement = analyzer.analyze_improvement("u1");
	assert!(!improvement.improvement);
	assert!(improvement.wpm_change.is_none());
}

#[test]
fn history_written_by_hand_is_normalized() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("history.json");
	let json = r#"{
		"u1": {
			"sessions": [
				{ "timestamp": 1.0, "reading_time": 60.0, "wpm": 100.0 },
				{ "timestamp": 2.0, "reading_time": 60.0, "wpm": 200.0 }
			],
			"difficult_words": ["tree", "tree", "forest"],
			"average_wpm": 0.0
		}
	}"#;
	std::fs::write(&path, json).unwrap();

	let mut analyzer = ReadingAnalyzer::new();
	assert_eq!(analyzer.load_history(&path), HistoryLoad::Loaded(1));
	let history = analyzer.history("u1").unwrap();
	assert_eq!(history.average_wpm(), 150.0);
	assert_eq!(history.difficult_words(), &["tree", "forest"]);
	assert_eq!(analyzer.analyze_improvement("u1").wpm_change, Some(100.0));
}
