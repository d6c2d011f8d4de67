//! Character-level cues shared by the scanner and the split suggester.

use crate::config::ScoringWeights;
use crate::types::{BoundaryReason, MAX_SCORE};

const QUOTES: &[char] = &['"', '\u{201C}', '\u{201D}', '\u{201E}', '\u{00AB}', '\u{00BB}'];
const CLOSERS: &[char] = &[')', ']', '\'', '\u{2019}'];

const DISCOURSE_MARKERS: &[&str] = &[
    "suddenly",
    "then",
    "meanwhile",
    "later",
    "finally",
    "afterwards",
    "afterward",
    "however",
    "next",
    "soon",
    "eventually",
    "instantly",
    "immediately",
    "but",
    "now",
];

/// Lower-cased abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "vs", "etc", "mt", "no",
];

/// Fraction of the span within which the balance boost applies.
const BALANCE_WINDOW: f32 = 0.1;

pub(crate) fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\u{2026}')
}

pub(crate) fn is_clause_separator(c: char) -> bool {
    matches!(c, ',' | ';' | ':')
}

pub(crate) fn is_quote(c: char) -> bool {
    QUOTES.contains(&c)
}

fn is_closer(c: char) -> bool {
    is_quote(c) || CLOSERS.contains(&c)
}

/// A punctuation run that qualifies as a cut point, before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PunctuationCandidate {
    /// Byte offset just past the run and any closing quotes
    pub position: usize,
    pub reason: BoundaryReason,
    pub base: f32,
}

/// Find terminator and clause-separator runs that are followed by whitespace
/// and have content on both sides.
pub(crate) fn punctuation_candidates(text: &str) -> Vec<PunctuationCandidate> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let content_start = text.len() - text.trim_start().len();
    let content_end = text.trim_end().len();
    let mut candidates = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (run_idx, c) = chars[i];
        if !is_terminator(c) && !is_clause_separator(c) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() && (is_terminator(chars[j].1) || is_clause_separator(chars[j].1))
        {
            j += 1;
        }
        let run = &chars[i..j];
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }
        let position = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
        let followed_by_space = chars.get(j).is_some_and(|(_, next)| next.is_whitespace());

        if followed_by_space
            && run_idx > content_start
            && position < content_end
            && !is_abbreviation(text, run_idx, run)
        {
            let (reason, base) = classify_run(run);
            candidates.push(PunctuationCandidate {
                position,
                reason,
                base,
            });
        }
        i = j;
    }

    candidates
}

fn classify_run(run: &[(usize, char)]) -> (BoundaryReason, f32) {
    let terminators: Vec<char> = run
        .iter()
        .map(|(_, c)| *c)
        .filter(|c| is_terminator(*c))
        .collect();
    if terminators.is_empty() {
        let base = run
            .iter()
            .map(|(_, c)| match c {
                ';' => 4.0,
                ':' => 3.0,
                _ => 2.0,
            })
            .fold(0.0_f32, f32::max);
        return (BoundaryReason::ClauseBreak, base);
    }
    let base = match terminators.as_slice() {
        ['.'] => 5.0,
        ['!'] | ['?'] => 6.0,
        _ => 7.0,
    };
    (BoundaryReason::SentenceEnd, base)
}

fn is_abbreviation(text: &str, run_idx: usize, run: &[(usize, char)]) -> bool {
    if run.len() != 1 || run[0].1 != '.' {
        return false;
    }
    let word: String = text[..run_idx]
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let lowered = word.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
        // Single initials such as "J. R. R." are not sentence ends either.
        || (word.chars().count() == 1 && word.chars().all(char::is_uppercase))
}

/// Sentence spans `[start, end)` of `text`, split at sentence-ending candidates.
pub(crate) fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut spans = Vec::new();
    let mut start = 0;
    for candidate in punctuation_candidates(text) {
        if candidate.reason == BoundaryReason::SentenceEnd {
            spans.push((start, candidate.position));
            start = candidate.position;
        }
    }
    spans.push((start, text.len()));
    spans
}

/// Which boosts fired for a position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CueBoosts {
    pub dialogue: bool,
    pub marker: bool,
    /// Proximity to a balance point in [0, 1]
    pub balance: f32,
}

impl CueBoosts {
    pub(crate) fn detect(
        text: &str,
        position: usize,
        span: (usize, usize),
        divisions: &[usize],
    ) -> Self {
        Self {
            dialogue: quote_shift(text, position),
            marker: opens_with_marker(text, position),
            balance: balance_proximity(position, span, divisions),
        }
    }

    pub(crate) fn total(&self, weights: &ScoringWeights) -> f32 {
        let mut boost = self.balance * weights.balance_boost;
        if self.dialogue {
            boost += weights.dialogue_boost;
        }
        if self.marker {
            boost += weights.marker_boost;
        }
        boost
    }
}

/// A quote mark immediately before the position, or as the next visible character.
fn quote_shift(text: &str, position: usize) -> bool {
    let before = text[..position].chars().next_back().is_some_and(is_quote);
    let after = text[position..].trim_start().chars().next().is_some_and(is_quote);
    before || after
}

fn opens_with_marker(text: &str, position: usize) -> bool {
    next_word(text, position)
        .map(|word| DISCOURSE_MARKERS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn next_word(text: &str, position: usize) -> Option<&str> {
    let rest = text[position..]
        .trim_start()
        .trim_start_matches(|c: char| is_quote(c) || c == '(' || c == '[' || c == '\'');
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(rest.len(), |(idx, _)| idx);
    (end > 0).then(|| &rest[..end])
}

/// Closeness of `position` to the nearest even division point of `span`.
fn balance_proximity(position: usize, span: (usize, usize), divisions: &[usize]) -> f32 {
    let (start, end) = span;
    let len = end.saturating_sub(start) as f32;
    if len <= 0.0 {
        return 0.0;
    }
    let window = (len * BALANCE_WINDOW).max(1.0);
    let offset = position.saturating_sub(start) as f32;
    divisions
        .iter()
        .filter(|parts| **parts >= 2)
        .flat_map(|parts| (1..*parts).map(move |i| len * i as f32 / *parts as f32))
        .map(|point| (1.0 - (offset - point).abs() / window).max(0.0))
        .fold(0.0_f32, f32::max)
}

pub(crate) fn clamp_score(score: f32) -> f32 {
    score.clamp(0.0, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_terminators_and_clauses() {
        let text = "Wait, what? No; stop. Fine";
        let found = punctuation_candidates(text);
        let positions: Vec<usize> = found.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![5, 11, 15, 21]);
        assert_eq!(found[0].reason, BoundaryReason::ClauseBreak);
        assert_eq!(found[0].base, 2.0);
        assert_eq!(found[1].base, 6.0);
        assert_eq!(found[2].base, 4.0);
        assert_eq!(found[3].base, 5.0);
    }

    #[test]
    fn skips_numbers_and_trailing_punctuation() {
        let found = punctuation_candidates("It cost 3.50 at 10:30.");
        assert!(found.is_empty());
    }

    #[test]
    fn skips_abbreviations_and_initials() {
        let found = punctuation_candidates("Mr. Smith met J. Doe. They talked");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, "Mr. Smith met J. Doe.".len());
    }

    #[test]
    fn closing_quote_stays_with_sentence() {
        let text = "\"Run!\" she said.";
        let found = punctuation_candidates(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, 6);
        assert!(quote_shift(text, found[0].position));
    }

    #[test]
    fn repeated_terminators_score_higher() {
        let found = punctuation_candidates("What?! Really... yes");
        assert_eq!(found[0].base, 7.0);
        assert_eq!(found[1].base, 7.0);
    }

    #[test]
    fn detects_discourse_marker_after_quote() {
        assert!(opens_with_marker("It ended. \"Suddenly it was over", 9));
        assert!(!opens_with_marker("It ended. Nothing moved", 9));
    }

    #[test]
    fn balance_peaks_at_division_points() {
        assert_eq!(balance_proximity(50, (0, 100), &[2]), 1.0);
        assert!(balance_proximity(55, (0, 100), &[2]) < 1.0);
        assert_eq!(balance_proximity(10, (0, 100), &[2]), 0.0);
        assert_eq!(balance_proximity(25, (0, 100), &[2, 3, 4]), 1.0);
    }

    #[test]
    fn sentence_spans_cover_text() {
        let text = "One. Two words here! Three";
        let spans = sentence_spans(text);
        assert_eq!(spans, vec![(0, 4), (4, 20), (20, text.len())]);
        assert!(sentence_spans("   ").is_empty());
    }
}
