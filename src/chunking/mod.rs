//! Boundary scanning, shot-count advice and chunk assembly.
//!
//! The pipeline is a chain of pure values: [`scan`] yields a [`BoundarySet`]
//! once per `(text, mode)`, and [`assemble`] turns it into an ordered, gapless
//! partition for any requested shot count.

pub mod advisor;
pub mod assembler;
pub mod cache;
pub(crate) mod cues;
pub mod scanner;


use serde::Serialize;

use crate::config::ScoringProfile;
use crate::error::{EngineError, Result};
use crate::types::{ChunkingOptions, ScanMode, TextBoundary, MAX_SCORE};

pub use advisor::suggest;
pub use assembler::{assemble, Assembly};
pub use cache::ScanCache;
pub use scanner::{scan, scan_with};

/// Candidate boundaries, strictly ascending by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundarySet(Vec<TextBoundary>);

impl BoundarySet {
    /// Validate ordering and scores of externally supplied boundaries.
    pub fn new(boundaries: Vec<TextBoundary>) -> Result<Self> {
        if let Some((index, boundary)) = boundaries
            .iter()
            .enumerate()
            .find(|(_, boundary)| !(0.0..=MAX_SCORE).contains(&boundary.score))
        {
            return Err(EngineError::ScoreOutOfRange {
                index,
                score: boundary.score,
            });
        }
        for (index, pair) in boundaries.windows(2).enumerate() {
            if pair[1].position <= pair[0].position {
                return Err(EngineError::UnorderedBoundaries {
                    index: index + 1,
                    previous: pair[0].position,
                    position: pair[1].position,
                });
            }
        }
        Ok(Self(boundaries))
    }

    pub(crate) fn from_sorted(boundaries: Vec<TextBoundary>) -> Self {
        debug_assert!(boundaries
            .windows(2)
            .all(|pair| pair[0].position < pair[1].position));
        Self(boundaries)
    }

    pub fn as_slice(&self) -> &[TextBoundary] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextBoundary> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hard ceiling on the number of shots these boundaries can produce.
    pub fn max_possible_shots(&self) -> usize {
        self.0.len() + 1
    }

    pub fn into_vec(self) -> Vec<TextBoundary> {
        self.0
    }
}

impl<'a> IntoIterator for &'a BoundarySet {
    type Item = &'a TextBoundary;
    type IntoIter = std::slice::Iter<'a, TextBoundary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scan and assemble in one call using the content type's weights.
pub fn segment(
    text: &str,
    mode: ScanMode,
    options: &ChunkingOptions,
    profile: &ScoringProfile,
) -> Result<Assembly> {
    let boundaries = scan_with(text, mode, profile.weights(options.content_type));
    assemble(text, &boundaries, options.target_shot_count)
}
