//! Natural shot-count recommendations from boundary score tiers.

use tracing::debug;

use crate::types::{ShotCountSuggestion, MAX_SCORE};

use super::BoundarySet;

/// Cumulative score thresholds: strong, moderate, weak, every boundary.
const TIERS: [f32; 4] = [8.0, 6.0, 4.0, 0.0];
const MAX_SUGGESTIONS: usize = 5;
const MIN_SUGGESTIONS: usize = 3;
const SINGLE_SHOT_CONFIDENCE: f32 = 0.05;
const HALF_DETAIL_DISCOUNT: f32 = 0.9;

/// Recommend natural shot counts, most confident first.
pub fn suggest(boundaries: &BoundarySet) -> Vec<ShotCountSuggestion> {
    let mut suggestions: Vec<ShotCountSuggestion> = Vec::with_capacity(MAX_SUGGESTIONS);

    for threshold in TIERS {
        let tier: Vec<f32> = boundaries
            .iter()
            .map(|boundary| boundary.score)
            .filter(|score| *score >= threshold)
            .collect();
        if let Some(confidence) = mean(&tier) {
            push_best(&mut suggestions, tier.len() + 1, confidence / MAX_SCORE);
        }
    }

    if suggestions.len() < MIN_SUGGESTIONS {
        let mut scores: Vec<f32> = boundaries.iter().map(|boundary| boundary.score).collect();
        scores.sort_by(|a, b| b.total_cmp(a));
        let half = scores.len() / 2;
        if let Some(confidence) = mean(&scores[..half]) {
            push_best(
                &mut suggestions,
                half + 1,
                confidence / MAX_SCORE * HALF_DETAIL_DISCOUNT,
            );
        }
    }
    if suggestions.len() < MIN_SUGGESTIONS {
        push_best(&mut suggestions, 1, SINGLE_SHOT_CONFIDENCE);
    }

    suggestions.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.count.cmp(&b.count))
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    debug!(suggestions = suggestions.len(), "derived shot count suggestions");
    suggestions
}

/// Insert, or raise the confidence of an existing entry with the same count.
fn push_best(suggestions: &mut Vec<ShotCountSuggestion>, count: usize, confidence: f32) {
    match suggestions.iter_mut().find(|existing| existing.count == count) {
        Some(existing) => existing.confidence = existing.confidence.max(confidence),
        None => suggestions.push(ShotCountSuggestion { count, confidence }),
    }
}

fn mean(scores: &[f32]) -> Option<f32> {
    (!scores.is_empty()).then(|| scores.iter().sum::<f32>() / scores.len() as f32)
}
