use crate::chunking::cues::{clamp_score, sentence_spans, CueBoosts};
use crate::config::ScoringWeights;
use crate::types::{ShotChunk, SplitSuggestion, SuggestionReason};

const BASE_CONFIDENCE: f32 = 3.0;
const MIDPOINT: &[usize] = &[2];

/// Internal sentence boundaries of `chunk`, strongest first.
///
/// Positions are offsets into `source`, the text the chunk was cut from, so
/// they can be handed straight to [`crate::editor::split_chunk`].
pub fn split_suggestions(
    source: &str,
    chunk: &ShotChunk,
    weights: &ScoringWeights,
) -> Vec<SplitSuggestion> {
    let Some(span_text) = source.get(chunk.start_pos..chunk.end_pos) else {
        return Vec::new();
    };
    let sentences = sentence_spans(span_text);
    if sentences.len() <= 1 {
        return Vec::new();
    }

    let span = (chunk.start_pos, chunk.end_pos);
    let mut suggestions: Vec<SplitSuggestion> = sentences[..sentences.len() - 1]
        .iter()
        .map(|(_, end)| {
            let position = chunk.start_pos + end;
            let boosts = CueBoosts::detect(source, position, span, MIDPOINT);
            SplitSuggestion {
                position,
                confidence: clamp_score(BASE_CONFIDENCE + boosts.total(weights)),
                reason: strongest_cue(&boosts, weights),
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.position.cmp(&b.position))
    });
    suggestions
}

fn strongest_cue(boosts: &CueBoosts, weights: &ScoringWeights) -> SuggestionReason {
    let cues = [
        (boosts.dialogue, weights.dialogue_boost, SuggestionReason::DialogueShift),
        (boosts.marker, weights.marker_boost, SuggestionReason::Transition),
        (
            boosts.balance > 0.0,
            boosts.balance * weights.balance_boost,
            SuggestionReason::Balanced,
        ),
    ];
    cues.into_iter()
        .filter(|(fired, weight, _)| *fired && *weight > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(SuggestionReason::SentenceBreak, |(_, _, reason)| reason)
}
