//! Shot DNA: a deliberately naive emotion/action/pacing profile built from
//! fixed keyword lists and sentence lengths.

mod suggest;

pub use suggest::split_suggestions;

use crate::chunking::cues::sentence_spans;
use crate::types::{ContentCharacteristics, Level, Pacing};

const EMOTION_KEYWORDS: &[&str] = &[
    "excited", "scared", "happy", "sad", "amazed", "shocked", "surprised", "love", "hate", "angry",
];

const ACTION_KEYWORDS: &[&str] = &[
    "ran", "jumped", "fought", "grabbed", "threw", "burst", "crashed", "exploded", "rushed",
    "charged",
];

/// Sentences with fewer words than this count as short.
const SHORT_SENTENCE_WORDS: usize = 8;
const FAST_SHARE: f32 = 0.6;
const MEDIUM_SHARE: f32 = 0.3;

pub fn classify(text: &str) -> ContentCharacteristics {
    let words = normalized_words(text);
    ContentCharacteristics {
        emotion: level_for(keyword_hits(&words, EMOTION_KEYWORDS)),
        action: level_for(keyword_hits(&words, ACTION_KEYWORDS)),
        pacing: pacing_for(text),
    }
}

fn normalized_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Number of distinct keywords present as whole words.
fn keyword_hits(words: &[String], keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| words.iter().any(|word| word == *keyword))
        .count()
}

fn level_for(hits: usize) -> Level {
    match hits {
        0 => Level::Low,
        1 => Level::Medium,
        _ => Level::High,
    }
}

fn pacing_for(text: &str) -> Pacing {
    let lengths: Vec<usize> = sentence_spans(text)
        .into_iter()
        .map(|(start, end)| text[start..end].split_whitespace().count())
        .filter(|words| *words > 0)
        .collect();
    if lengths.is_empty() {
        return Pacing::Slow;
    }
    let short = lengths
        .iter()
        .filter(|words| **words < SHORT_SENTENCE_WORDS)
        .count();
    let share = short as f32 / lengths.len() as f32;
    if share > FAST_SHARE {
        Pacing::Fast
    } else if share > MEDIUM_SHARE {
        Pacing::Medium
    } else {
        Pacing::Slow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_action_keywords_is_high() {
        let dna = classify("He grabbed the rope and jumped across the gap without a sound at all.");
        assert_eq!(dna.action, Level::High);
        assert_eq!(dna.emotion, Level::Low);
    }

    #[test]
    fn single_match_is_medium_and_case_insensitive() {
        let dna = classify("She was SCARED of the dark.");
        assert_eq!(dna.emotion, Level::Medium);
        assert_eq!(dna.action, Level::Low);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let dna = classify("They ran, and ran, and ran.");
        assert_eq!(dna.action, Level::Medium);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let dna = classify("The grandson brandished a lovely sadhu's staff.");
        assert_eq!(dna.emotion, Level::Low);
        assert_eq!(dna.action, Level::Low);
    }

    #[test]
    fn pacing_follows_short_sentence_share() {
        assert_eq!(classify("Run. Hide. Now. Go.").pacing, Pacing::Fast);
        assert_eq!(
            classify("Stop. The long road wound slowly through the quiet hills toward home.")
                .pacing,
            Pacing::Medium
        );
        assert_eq!(
            classify("The long road wound slowly through the quiet hills toward the distant home.")
                .pacing,
            Pacing::Slow
        );
        assert_eq!(classify("").pacing, Pacing::Slow);
    }
}
