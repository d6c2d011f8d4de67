//! Turns a boundary set into a gapless partition of the requested size.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dna::classify;
use crate::error::{EngineError, Result};
use crate::types::{ChunkId, ShotChunk, TextBoundary, MAX_SCORE};

use super::BoundarySet;

/// Weight of a boundary's own score against its distance from the ideal cut.
const SCORE_WEIGHT: f32 = 0.35;

/// Ordered partition of a text plus the shot count actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assembly {
    pub requested: usize,
    pub applied: usize,
    pub chunks: Vec<ShotChunk>,
}

impl Assembly {
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }
}

/// Clamp a requested shot count to `[1, max_possible_shots]`.
pub fn clamp_shot_count(requested: usize, boundaries: &BoundarySet) -> usize {
    requested.clamp(1, boundaries.max_possible_shots())
}

/// Select `target - 1` boundaries and cut `text` into that many plus one chunks.
pub fn assemble(text: &str, boundaries: &BoundarySet, target: usize) -> Result<Assembly> {
    validate_positions(text, boundaries)?;
    let applied = clamp_shot_count(target, boundaries);
    if applied != target {
        info!(
            requested = target,
            applied,
            max_possible = boundaries.max_possible_shots(),
            "clamped requested shot count"
        );
    }

    let cuts = select_cuts(text, boundaries.as_slice(), applied - 1);
    let chunks = materialize(text, &cuts);
    debug!(chunks = chunks.len(), "assembled shot chunks");
    Ok(Assembly {
        requested: target,
        applied,
        chunks,
    })
}

fn validate_positions(text: &str, boundaries: &BoundarySet) -> Result<()> {
    for boundary in boundaries {
        let position = boundary.position;
        if position == 0 || position >= text.len() || !text.is_char_boundary(position) {
            return Err(EngineError::BoundaryOutOfRange {
                position,
                text_len: text.len(),
            });
        }
    }
    Ok(())
}

/// Pick one boundary per ideal even-partition point, in order, always leaving
/// enough candidates for the points still to come.
fn select_cuts(text: &str, boundaries: &[TextBoundary], splits: usize) -> Vec<TextBoundary> {
    if splits == 0 {
        return Vec::new();
    }
    let (measures, total) = cumulative_measures(text, boundaries);
    let ideal = (total as f32 / (splits + 1) as f32).max(f32::EPSILON);
    let mut selected = Vec::with_capacity(splits);
    let mut lower = 0;

    for step in 1..=splits {
        let target = ideal * step as f32;
        let upper = boundaries.len() - (splits - step);
        let cost = |idx: usize| {
            let distance = (measures[idx] as f32 - target).abs() / ideal;
            distance - SCORE_WEIGHT * boundaries[idx].score / MAX_SCORE
        };
        let best = (lower..upper)
            .min_by(|&a, &b| {
                cost(a)
                    .total_cmp(&cost(b))
                    .then_with(|| prefer(&boundaries[a], &boundaries[b]))
            })
            .unwrap_or(lower);
        selected.push(boundaries[best]);
        lower = best + 1;
    }

    selected
}

/// Tie-break: higher score, then line-sourced, then earlier.
fn prefer(a: &TextBoundary, b: &TextBoundary) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.reason.is_line_sourced().cmp(&a.reason.is_line_sourced()))
        .then_with(|| a.position.cmp(&b.position))
}

/// Word counts before each boundary and in total; byte offsets for wordless text.
fn cumulative_measures(text: &str, boundaries: &[TextBoundary]) -> (Vec<usize>, usize) {
    let mut measures = Vec::with_capacity(boundaries.len());
    let mut words = 0;
    let mut previous = 0;
    for boundary in boundaries {
        words += text[previous..boundary.position].split_whitespace().count();
        measures.push(words);
        previous = boundary.position;
    }
    let total = words + text[previous..].split_whitespace().count();
    if total == 0 {
        let positions = boundaries.iter().map(|boundary| boundary.position).collect();
        return (positions, text.len());
    }
    (measures, total)
}

fn materialize(text: &str, cuts: &[TextBoundary]) -> Vec<ShotChunk> {
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    let closers = cuts
        .iter()
        .map(|cut| (cut.position, cut.score))
        .chain(std::iter::once((text.len(), MAX_SCORE)));

    for (idx, (end, score)) in closers.enumerate() {
        let span = text[start..end].trim();
        chunks.push(ShotChunk {
            id: ChunkId(idx as u32 + 1),
            text: span.to_string(),
            start_pos: start,
            end_pos: end,
            boundary_score: score,
            characteristics: classify(span),
        });
        start = end;
    }

    chunks
}
