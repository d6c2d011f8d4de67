//! Split/merge edits over an assembled chunk list.
//!
//! Every edit is a pure rewrite: the input slice is never modified and a
//! fresh list is returned. New chunks take ids above the current maximum.

use tracing::{info, warn};

use crate::config::ScoringWeights;
use crate::dna::{classify, split_suggestions};
use crate::error::{EngineError, Result, SplitRejection};
use crate::types::{ChunkId, ShotChunk, TextBoundary};

/// Boundary score given to both halves of a split at an arbitrary position.
pub const MANUAL_SPLIT_SCORE: f32 = 5.0;

/// Split chunk `id` at byte offset `position` of `source`.
///
/// If `position` matches one of the chunk's split suggestions, both halves
/// carry that suggestion's confidence; otherwise [`MANUAL_SPLIT_SCORE`].
pub fn split_chunk(
    source: &str,
    chunks: &[ShotChunk],
    id: ChunkId,
    position: usize,
    weights: &ScoringWeights,
) -> std::result::Result<Vec<ShotChunk>, SplitRejection> {
    let Some(index) = chunks.iter().position(|chunk| chunk.id == id) else {
        return reject(SplitRejection::UnknownChunk(id));
    };
    let target = &chunks[index];
    let score = split_suggestions(source, target, weights)
        .into_iter()
        .find(|suggestion| suggestion.position == position)
        .map_or(MANUAL_SPLIT_SCORE, |suggestion| suggestion.confidence);
    split_at(source, chunks, index, position, score)
}

/// Promote a scanned ("ghost") boundary into an active cut, keeping its score.
pub fn promote_boundary(
    source: &str,
    chunks: &[ShotChunk],
    boundary: &TextBoundary,
) -> std::result::Result<Vec<ShotChunk>, SplitRejection> {
    let position = boundary.position;
    let Some(index) = chunks
        .iter()
        .position(|chunk| chunk.contains_inner(position))
    else {
        let end = chunks.last().map_or(0, |chunk| chunk.end_pos);
        return reject(SplitRejection::OutsideSpan {
            position,
            start: 0,
            end,
        });
    };
    split_at(source, chunks, index, position, boundary.score)
}

fn split_at(
    source: &str,
    chunks: &[ShotChunk],
    index: usize,
    position: usize,
    score: f32,
) -> std::result::Result<Vec<ShotChunk>, SplitRejection> {
    let target = &chunks[index];
    if !target.contains_inner(position) {
        return reject(SplitRejection::OutsideSpan {
            position,
            start: target.start_pos,
            end: target.end_pos,
        });
    }
    let (Some(left), Some(right)) = (
        source.get(target.start_pos..position),
        source.get(position..target.end_pos),
    ) else {
        return reject(SplitRejection::NotCharBoundary(position));
    };
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return reject(SplitRejection::EmptySide(position));
    }

    let first_id = next_id(chunks);
    let second_id = ChunkId(first_id.0 + 1);
    info!(
        chunk = %target.id,
        position,
        left = %first_id,
        right = %second_id,
        "split chunk"
    );

    let halves = [
        ShotChunk {
            id: first_id,
            text: left.to_string(),
            start_pos: target.start_pos,
            end_pos: position,
            boundary_score: score,
            characteristics: classify(left),
        },
        ShotChunk {
            id: second_id,
            text: right.to_string(),
            start_pos: position,
            end_pos: target.end_pos,
            boundary_score: score,
            characteristics: classify(right),
        },
    ];

    let mut rewritten = Vec::with_capacity(chunks.len() + 1);
    rewritten.extend_from_slice(&chunks[..index]);
    rewritten.extend(halves);
    rewritten.extend_from_slice(&chunks[index + 1..]);
    Ok(rewritten)
}

/// Merge two adjacent chunks, given in either order.
///
/// Asking for unknown or non-adjacent chunks is a caller bug and returns an
/// [`EngineError`].
pub fn merge_chunks(chunks: &[ShotChunk], a: ChunkId, b: ChunkId) -> Result<Vec<ShotChunk>> {
    let index_of = |id: ChunkId| {
        chunks
            .iter()
            .position(|chunk| chunk.id == id)
            .ok_or(EngineError::UnknownChunk(id))
    };
    let (ia, ib) = (index_of(a)?, index_of(b)?);
    let (first, second) = (ia.min(ib), ia.max(ib));
    if second != first + 1 {
        return Err(EngineError::NotAdjacent(a, b));
    }

    let (left, right) = (&chunks[first], &chunks[second]);
    let text = [left.text.trim(), right.text.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let merged = ShotChunk {
        id: next_id(chunks),
        start_pos: left.start_pos.min(right.start_pos),
        end_pos: left.end_pos.max(right.end_pos),
        boundary_score: left.boundary_score.max(right.boundary_score),
        characteristics: classify(&text),
        text,
    };
    info!(left = %left.id, right = %right.id, merged = %merged.id, "merged chunks");

    let mut rewritten = Vec::with_capacity(chunks.len() - 1);
    rewritten.extend_from_slice(&chunks[..first]);
    rewritten.push(merged);
    rewritten.extend_from_slice(&chunks[second + 1..]);
    Ok(rewritten)
}

fn next_id(chunks: &[ShotChunk]) -> ChunkId {
    ChunkId(chunks.iter().map(|chunk| chunk.id.0).max().unwrap_or(0) + 1)
}

fn reject<T>(rejection: SplitRejection) -> std::result::Result<T, SplitRejection> {
    warn!(%rejection, "split rejected");
    Err(rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::{assemble, scan};
    use crate::types::{BoundaryReason, Level, ScanMode};

    const SOURCE: &str =
        "The storm hit the coast. Waves crashed over the wall. Then everyone ran inland.";

    fn single_chunk() -> Vec<ShotChunk> {
        assemble(SOURCE, &scan(SOURCE, ScanMode::Punctuation), 1)
            .unwrap()
            .chunks
    }

    #[test]
    fn split_replaces_chunk_with_two_halves() {
        let chunks = single_chunk();
        let position = SOURCE.find(" Waves").unwrap();
        let split =
            split_chunk(SOURCE, &chunks, ChunkId(1), position, &ScoringWeights::default())
                .unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].id, ChunkId(2));
        assert_eq!(split[1].id, ChunkId(3));
        assert_eq!(split[0].text, "The storm hit the coast.");
        assert_eq!(split[0].end_pos, split[1].start_pos);
        assert_eq!(split[1].end_pos, SOURCE.len());
        assert_eq!(split[1].characteristics.action, Level::High);
    }

    #[test]
    fn suggested_position_carries_its_confidence() {
        let chunks = single_chunk();
        let weights = ScoringWeights::default();
        let best = split_suggestions(SOURCE, &chunks[0], &weights)[0];
        let split = split_chunk(SOURCE, &chunks, ChunkId(1), best.position, &weights).unwrap();
        assert_eq!(split[0].boundary_score, best.confidence);
        assert_eq!(split[1].boundary_score, best.confidence);
    }

    #[test]
    fn arbitrary_position_uses_manual_score() {
        let chunks = single_chunk();
        let position = SOURCE.find(" hit").unwrap();
        let split =
            split_chunk(SOURCE, &chunks, ChunkId(1), position, &ScoringWeights::default())
                .unwrap();
        assert_eq!(split[0].text, "The storm");
        assert_eq!(split[0].boundary_score, MANUAL_SPLIT_SCORE);
    }

    #[test]
    fn rejects_invalid_positions() {
        let chunks = single_chunk();
        let weights = ScoringWeights::default();
        assert_eq!(
            split_chunk(SOURCE, &chunks, ChunkId(1), 0, &weights),
            Err(SplitRejection::OutsideSpan {
                position: 0,
                start: 0,
                end: SOURCE.len()
            })
        );
        assert_eq!(
            split_chunk(SOURCE, &chunks, ChunkId(9), 5, &weights),
            Err(SplitRejection::UnknownChunk(ChunkId(9)))
        );
    }

    #[test]
    fn rejects_whitespace_only_side() {
        let source = "Alone.   ";
        let chunks = assemble(source, &scan(source, ScanMode::Hybrid), 1)
            .unwrap()
            .chunks;
        assert_eq!(
            split_chunk(source, &chunks, ChunkId(1), 7, &ScoringWeights::default()),
            Err(SplitRejection::EmptySide(7))
        );
    }

    #[test]
    fn merge_joins_adjacent_chunks() {
        let chunks = assemble(SOURCE, &scan(SOURCE, ScanMode::Punctuation), 3)
            .unwrap()
            .chunks;
        let merged = merge_chunks(&chunks, ChunkId(3), ChunkId(2)).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].id, ChunkId(4));
        assert_eq!(
            merged[1].text,
            "Waves crashed over the wall. Then everyone ran inland."
        );
        assert_eq!(merged[1].start_pos, chunks[1].start_pos);
        assert_eq!(merged[1].end_pos, SOURCE.len());
        assert_eq!(
            merged[1].boundary_score,
            chunks[1].boundary_score.max(chunks[2].boundary_score)
        );
        assert_eq!(merged[1].characteristics.action, Level::High);
    }

    #[test]
    fn merge_of_distant_chunks_is_an_error() {
        let chunks = assemble(SOURCE, &scan(SOURCE, ScanMode::Punctuation), 3)
            .unwrap()
            .chunks;
        assert_eq!(
            merge_chunks(&chunks, ChunkId(1), ChunkId(3)),
            Err(EngineError::NotAdjacent(ChunkId(1), ChunkId(3)))
        );
        assert_eq!(
            merge_chunks(&chunks, ChunkId(1), ChunkId(7)),
            Err(EngineError::UnknownChunk(ChunkId(7)))
        );
    }

    #[test]
    fn promote_keeps_boundary_score() {
        let chunks = single_chunk();
        let ghost = TextBoundary {
            position: SOURCE.find(" Then").unwrap(),
            score: 8.5,
            reason: BoundaryReason::SentenceEnd,
        };
        let promoted = promote_boundary(SOURCE, &chunks, &ghost).unwrap();
        assert_eq!(promoted.len(), 2);
        assert_eq!(promoted[1].text, "Then everyone ran inland.");
        assert_eq!(promoted[0].boundary_score, 8.5);
    }

    #[test]
    fn split_of_chunk_with_mid_char_edge_is_rejected() {
        let source = "caf\u{e9} noir. Then more text here.";
        let edge = 4;
        assert!(!source.is_char_boundary(edge));
        let chunks = vec![
            ShotChunk {
                id: ChunkId(1),
                text: "caf".to_string(),
                start_pos: 0,
                end_pos: edge,
                boundary_score: 5.0,
                characteristics: classify("caf"),
            },
            ShotChunk {
                id: ChunkId(2),
                text: "noir. Then more text here.".to_string(),
                start_pos: edge,
                end_pos: source.len(),
                boundary_score: 10.0,
                characteristics: classify("noir. Then more text here."),
            },
        ];
        let position = source.find(" Then").unwrap();
        let result = split_chunk(
            source,
            &chunks,
            ChunkId(2),
            position,
            &ScoringWeights::default(),
        );
        assert_eq!(result, Err(SplitRejection::NotCharBoundary(position)));
    }
}
