//! Boundary scanning over punctuation and line structure.

use tracing::debug;

use crate::config::ScoringWeights;
use crate::types::{BoundaryReason, ScanMode, TextBoundary};

use super::cues::{
    clamp_score, is_clause_separator, is_quote, is_terminator, punctuation_candidates, CueBoosts,
};
use super::BoundarySet;

/// Punctuation candidates this close to a line break fold into it.
pub const HYBRID_TOLERANCE: usize = 3;

/// Even partitions considered by the punctuation balance boost.
const BALANCE_DIVISIONS: &[usize] = &[2, 3, 4];

/// Scan with the default (story) weights.
pub fn scan(text: &str, mode: ScanMode) -> BoundarySet {
    scan_with(text, mode, &ScoringWeights::default())
}

/// Single pass over `text` producing ordered, unique candidate cut points.
pub fn scan_with(text: &str, mode: ScanMode, weights: &ScoringWeights) -> BoundarySet {
    let boundaries = match mode {
        ScanMode::Punctuation => scan_punctuation(text, weights),
        ScanMode::Lines => scan_lines(text, weights),
        ScanMode::Hybrid => {
            merge_hybrid(scan_punctuation(text, weights), scan_lines(text, weights))
        }
    };
    debug!(
        mode = %mode,
        text_len = text.len(),
        boundaries = boundaries.len(),
        "scanned text for shot boundaries"
    );
    BoundarySet::from_sorted(boundaries)
}

fn scan_punctuation(text: &str, weights: &ScoringWeights) -> Vec<TextBoundary> {
    let span = (0, text.len());
    punctuation_candidates(text)
        .into_iter()
        .map(|candidate| {
            let bias = match candidate.reason {
                BoundaryReason::SentenceEnd => weights.terminator_bias,
                _ => weights.clause_bias,
            };
            let boosts = CueBoosts::detect(text, candidate.position, span, BALANCE_DIVISIONS);
            TextBoundary {
                position: candidate.position,
                score: clamp_score(candidate.base + bias + boosts.total(weights)),
                reason: candidate.reason,
            }
        })
        .collect()
}

/// Whitespace runs containing newlines, positioned where the run starts.
fn scan_lines(text: &str, weights: &ScoringWeights) -> Vec<TextBoundary> {
    let mut boundaries = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut previous: Option<char> = None;

    while let Some((idx, c)) = chars.next() {
        if !c.is_whitespace() {
            previous = Some(c);
            continue;
        }
        let run_start = idx;
        let mut newlines = usize::from(c == '\n');
        let mut run_end = text.len();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !next.is_whitespace() {
                run_end = next_idx;
                break;
            }
            if next == '\n' {
                newlines += 1;
            }
            chars.next();
        }
        let Some(before) = previous else {
            continue;
        };
        if newlines == 0 || run_end == text.len() {
            continue;
        }
        boundaries.push(line_boundary(run_start, newlines, before, weights));
    }

    boundaries
}

fn line_boundary(
    position: usize,
    newlines: usize,
    before: char,
    weights: &ScoringWeights,
) -> TextBoundary {
    let ends_sentence = is_terminator(before) || is_quote(before);
    if newlines >= 2 {
        let mut base = 6.0;
        if ends_sentence {
            base += 1.0;
        }
        if newlines >= 3 {
            base += 1.0;
        }
        TextBoundary {
            position,
            score: clamp_score(base + weights.paragraph_bias),
            reason: BoundaryReason::ParagraphBreak,
        }
    } else {
        let base = if ends_sentence {
            5.0
        } else if is_clause_separator(before) {
            4.0
        } else {
            3.0
        };
        TextBoundary {
            position,
            score: clamp_score(base + weights.line_bias),
            reason: BoundaryReason::LineBreak,
        }
    }
}

/// Union of both candidate lists. A punctuation candidate within
/// [`HYBRID_TOLERANCE`] of a line break is absorbed by it; the line break keeps
/// its position and the higher score.
fn merge_hybrid(
    punctuation: Vec<TextBoundary>,
    mut lines: Vec<TextBoundary>,
) -> Vec<TextBoundary> {
    let mut merged = Vec::with_capacity(punctuation.len() + lines.len());
    let mut line_idx = 0;

    for candidate in punctuation {
        while line_idx < lines.len()
            && lines[line_idx].position + HYBRID_TOLERANCE < candidate.position
        {
            line_idx += 1;
        }
        match lines.get_mut(line_idx) {
            Some(line) if line.position.abs_diff(candidate.position) <= HYBRID_TOLERANCE => {
                line.score = line.score.max(candidate.score);
            }
            _ => merged.push(candidate),
        }
    }

    merged.append(&mut lines);
    merged.sort_by_key(|boundary| boundary.position);
    merged
}
