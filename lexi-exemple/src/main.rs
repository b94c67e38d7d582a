use std::collections::BTreeMap;

use lexi_core::analysis::history::SessionReport;
use lexi_core::model::corpus::Corpus;
use lexi_core::paragraph::fallback::fallback_paragraph;
use lexi_core::paragraph::practice::sample_practice_paragraphs;
use lexi_core::paragraph::words::select_target_words;
use lexi_core::{ReadingAnalyzer, WordPredictor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=info to see training and persistence messages
    env_logger::init();

    // A predictor with a context window of 3 words (the default)
    // It is trained on the bundled corpus the first time it is queried
    let mut predictor = WordPredictor::default();

    // Next word prediction: the last two words are used as context,
    // then only the last one if that pair was never seen
    for context in ["the quick brown", "artificial", "climate", "zzz qqq"] {
        match predictor.predict_next(context)? {
            Some(word) => println!("'{}' -> '{}'", context, word),
            None => println!("'{}' -> no prediction", context),
        }
    }

    // Prefix completion picks the most frequent longer word
    // Prefixes shorter than 2 characters are ignored
    for partial in ["artif", "Intel", "cli", "a", "xyz123"] {
        println!("'{}' completes to {:?}", partial, predictor.complete(partial)?);
    }

    // Training on a custom corpus replaces the model entirely
    let corpus = Corpus::from_text("the cat sat on the mat\nthe cat ate the fish\nthe dog sat on the cat");
    let summary = predictor.train(Some(&corpus))?;
    println!("Custom corpus: {} sentences, {} words", summary.sentences, summary.vocabulary_size);
    println!("'the' -> {:?}", predictor.predict_next("the")?);

    // Reading analysis keeps one history per user
    let mut analyzer = ReadingAnalyzer::new();
    let sessions = [(120.0, 140.0, vec!["artificial", "intelligence"]), (100.0, 175.0, vec!["climate"])];
    for (reading_time, wpm, words) in sessions {
        let report = SessionReport {
            reading_time: Some(reading_time),
            wpm: Some(wpm),
            difficult_words: words.iter().map(|w| w.to_string()).collect(),
            word_timings: BTreeMap::new(),
        };
        let recommendations = analyzer.analyze_session("demo", report)?;
        println!("Recommendations after {} wpm: {:?}", wpm, recommendations);
    }

    // Missing metrics are rejected
    if let Err(e) = analyzer.analyze_session("demo", SessionReport::default()) {
        println!("Rejected session: {}", e);
    }

    let improvement = analyzer.analyze_improvement("demo");
    println!("Improvement: {} ({:?} wpm)", improvement.message, improvement.wpm_change);
    println!("Profile: {:?}", analyzer.reading_profile("demo"));

    // Practice paragraphs: without a text generator the templates are used
    let targets = select_target_words(&[], &analyzer.get_difficult_words("demo", 10));
    let paragraph = fallback_paragraph(&targets, 10);
    println!("Practice paragraph: {}", paragraph.paragraph);

    for text in sample_practice_paragraphs(1) {
        println!("Bundled paragraph: {}", text);
    }

    Ok(())
}
