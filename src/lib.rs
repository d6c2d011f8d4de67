//! shotsplit - text-to-shot segmentation
//!
//! Finds candidate cut points in narrative or lyric text, recommends natural
//! shot counts, assembles the text into an ordered, gapless list of shots,
//! and profiles each shot's emotion, action and pacing.
//!
//! ```
//! use shotsplit::chunking::{assemble, scan};
//! use shotsplit::types::ScanMode;
//!
//! let text = "A cat sat. It purred! Then it slept.";
//! let boundaries = scan(text, ScanMode::Punctuation);
//! let assembly = assemble(text, &boundaries, 3).unwrap();
//! let shots: Vec<&str> = assembly.chunks.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(shots, ["A cat sat.", "It purred!", "Then it slept."]);
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod dna;
pub mod editor;
pub mod error;
pub mod types;

pub use chunking::{assemble, scan, scan_with, segment, suggest, Assembly, BoundarySet, ScanCache};
pub use config::{ScoringProfile, ScoringWeights};
pub use dna::{classify, split_suggestions};
pub use editor::{merge_chunks, promote_boundary, split_chunk};
pub use error::{EngineError, SplitRejection};
