//! Core types for the shotsplit segmentation pipeline

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Highest score a boundary (or split suggestion) can carry.
pub const MAX_SCORE: f32 = 10.0;

/// Which cues the scanner treats as candidate cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Sentence terminators and clause separators
    Punctuation,
    /// Line and paragraph breaks
    Lines,
    /// Union of both, line breaks win on collision
    #[default]
    Hybrid,
}

impl ScanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Punctuation => "punctuation",
            ScanMode::Lines => "lines",
            ScanMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "punctuation" | "punct" => Ok(ScanMode::Punctuation),
            "lines" | "line" => Ok(ScanMode::Lines),
            "hybrid" => Ok(ScanMode::Hybrid),
            _ => Err(EngineError::UnknownOption {
                kind: "scan mode",
                value: raw.to_string(),
            }),
        }
    }
}

/// Genre tag biasing the scanner towards genre-appropriate cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Story,
    Lyrics,
    ChildrenBook,
    Commercial,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Story,
        ContentType::Lyrics,
        ContentType::ChildrenBook,
        ContentType::Commercial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Story => "story",
            ContentType::Lyrics => "lyrics",
            ContentType::ChildrenBook => "children_book",
            ContentType::Commercial => "commercial",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "story" => Ok(ContentType::Story),
            "lyrics" => Ok(ContentType::Lyrics),
            "children_book" | "childrens_book" => Ok(ContentType::ChildrenBook),
            "commercial" => Ok(ContentType::Commercial),
            _ => Err(EngineError::UnknownOption {
                kind: "content type",
                value: raw.to_string(),
            }),
        }
    }
}

/// Classification label attached to a candidate cut point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryReason {
    SentenceEnd,
    ClauseBreak,
    LineBreak,
    ParagraphBreak,
}

impl BoundaryReason {
    pub fn label(self) -> &'static str {
        match self {
            BoundaryReason::SentenceEnd => "sentence_end",
            BoundaryReason::ClauseBreak => "clause_break",
            BoundaryReason::LineBreak => "line_break",
            BoundaryReason::ParagraphBreak => "paragraph_break",
        }
    }

    /// True for boundaries produced by the line scanner.
    pub fn is_line_sourced(self) -> bool {
        matches!(
            self,
            BoundaryReason::LineBreak | BoundaryReason::ParagraphBreak
        )
    }
}

impl fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate cut point between two shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBoundary {
    /// Byte offset into the source text
    pub position: usize,
    /// Confidence in [0, 10]
    pub score: f32,
    pub reason: BoundaryReason,
}

/// Stable identifier of a chunk within one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u32);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-step intensity used by the emotion and action dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    #[default]
    Slow,
    Medium,
    Fast,
}

/// Shot DNA: heuristic profile derived from a chunk's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentCharacteristics {
    pub emotion: Level,
    pub action: Level,
    pub pacing: Pacing,
}

/// A materialized shot: the half-open span `[start_pos, end_pos)` of the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotChunk {
    pub id: ChunkId,
    /// Span text with surrounding whitespace trimmed
    pub text: String,
    pub start_pos: usize,
    pub end_pos: usize,
    /// Score of the cut closing this chunk
    pub boundary_score: f32,
    #[serde(default)]
    pub characteristics: ContentCharacteristics,
}

impl ShotChunk {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether `position` lies strictly inside the span.
    pub fn contains_inner(&self, position: usize) -> bool {
        position > self.start_pos && position < self.end_pos
    }
}

/// Caller-facing knobs for one segmentation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingOptions {
    pub target_shot_count: usize,
    #[serde(default)]
    pub content_type: ContentType,
}

impl ChunkingOptions {
    pub fn new(target_shot_count: usize) -> Self {
        Self {
            target_shot_count,
            content_type: ContentType::default(),
        }
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Quick-pick shot count with a confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotCountSuggestion {
    pub count: usize,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    DialogueShift,
    Transition,
    Balanced,
    SentenceBreak,
}

/// Candidate internal split point of a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitSuggestion {
    /// Byte offset into the source text
    pub position: usize,
    /// Score in [0, 10], used as the halves' boundary score when applied
    pub confidence: f32,
    pub reason: SuggestionReason,
}
