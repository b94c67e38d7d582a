use rand::seq::IndexedRandom;

/// Dyslexia-friendly practice texts shipped with the library.
pub const PRACTICE_PARAGRAPHS: [&str; 4] = [
	"The quick brown fox jumps over the lazy dog. This pangram contains all the letters of the English alphabet. \
	 It is widely used for touch-typing practice, testing typewriters and computer keyboards, displaying examples \
	 of fonts, and other applications involving text where the use of all letters in the alphabet is desired.",
	"Artificial intelligence is intelligence demonstrated by machines, as opposed to natural intelligence displayed \
	 by animals including humans. Leading AI textbooks define the field as the study of intelligent agents: any \
	 system that perceives its environment and takes actions that maximize its chance of achieving its goals.",
	"Climate change refers to significant changes in global temperature, precipitation, wind patterns, and other \
	 measures of climate that occur over several decades or longer. The scientific consensus is that climate \
	 change is occurring and that human activities, particularly the burning of fossil fuels, are the main driver.",
	"Neuroscience is the scientific study of the nervous system. It is a multidisciplinary science that combines \
	 physiology, anatomy, molecular biology, developmental biology, cytology, mathematical modeling, and \
	 psychology to understand the fundamental and emergent properties of neurons and neural circuits.",
];

/// Returns `count` distinct practice paragraphs in random order.
///
/// Asking for more than the catalogue holds returns all of them.
pub fn sample_practice_paragraphs(count: usize) -> Vec<&'static str> {
	PRACTICE_PARAGRAPHS.choose_multiple(&mut rand::rng(), count).copied().collect()
}
