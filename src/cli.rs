use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::chunking::Assembly;
use crate::config::{load_profile, ScoringProfile};
use crate::types::{ChunkId, ContentType, ScanMode};

#[derive(Parser, Debug)]
#[command(
    name = "shotsplit",
    version,
    about = "Split narrative or lyric text into storyboard shots"
)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List candidate shot boundaries with scores.
    Scan(SourceArgs),
    /// Recommend natural shot counts.
    Suggest(SourceArgs),
    /// Cut the text into the requested number of shots.
    Chunk(ChunkArgs),
    /// Show internal split suggestions for one chunk of a plan.
    Hints(HintsArgs),
    /// Split one chunk of a plan at a byte offset.
    Split(SplitArgs),
    /// Merge two adjacent chunks of a plan.
    Merge(MergeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Text file to segment, or '-' to read stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Boundary cues to scan for: punctuation, lines or hybrid.
    #[arg(long, default_value_t = ScanMode::Hybrid)]
    pub mode: ScanMode,
    /// Genre biasing the scoring: story, lyrics, children_book or commercial.
    #[arg(long = "content-type", default_value_t = ContentType::Story)]
    pub content_type: ContentType,
    /// Inline JSON overriding scoring weights.
    #[arg(long, value_name = "JSON", conflicts_with = "weights_file")]
    pub weights_json: Option<String>,
    /// Path to a JSON file overriding scoring weights.
    #[arg(long, value_name = "PATH", conflicts_with = "weights_json")]
    pub weights_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn read_text(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            return Ok(text);
        }
        fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input text {:?}", self.input))
    }

    pub fn profile(&self) -> Result<ScoringProfile> {
        load_profile(self.weights_file.as_deref(), self.weights_json.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Number of shots to produce; clamped to what the text supports.
    #[arg(short = 'n', long, default_value_t = 4)]
    pub shots: usize,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Plan JSON previously written by `chunk`, `split` or `merge`.
    #[arg(long, value_name = "PATH")]
    pub plan: PathBuf,
}

impl PlanArgs {
    /// Read the source text and a plan that partitions it.
    pub fn load(&self) -> Result<(String, Assembly)> {
        let text = self.source.read_text()?;
        let plan = load_plan(&self.plan)?;
        validate_plan(&plan, &text)?;
        Ok((text, plan))
    }
}

#[derive(Args, Debug, Clone)]
pub struct HintsArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Id of the chunk to inspect.
    #[arg(long)]
    pub chunk: u32,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Id of the chunk to split.
    #[arg(long)]
    pub chunk: u32,
    /// Byte offset into the source text where the split goes.
    #[arg(long)]
    pub at: usize,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Two adjacent chunk ids, comma separated (e.g. 2,3).
    #[arg(long, value_delimiter = ',', required = true)]
    pub chunks: Vec<u32>,
}

impl MergeArgs {
    pub fn pair(&self) -> Result<(ChunkId, ChunkId)> {
        ensure!(
            self.chunks.len() == 2,
            "--chunks takes exactly two ids, got {}",
            self.chunks.len()
        );
        Ok((ChunkId(self.chunks[0]), ChunkId(self.chunks[1])))
    }
}

pub fn load_plan(path: &Path) -> Result<Assembly> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read plan file {:?}", path))?;
    let plan: Assembly = serde_json::from_str(&data).context("Failed to parse plan JSON")?;
    Ok(plan)
}

/// A plan must exactly partition the text it is applied to.
pub fn validate_plan(plan: &Assembly, text: &str) -> Result<()> {
    ensure!(!plan.chunks.is_empty(), "Plan contains no chunks");
    let mut expected_start = 0;
    for chunk in &plan.chunks {
        ensure!(
            chunk.start_pos == expected_start && chunk.end_pos >= chunk.start_pos,
            "Plan chunk {} spans {}..{} but should start at {}",
            chunk.id,
            chunk.start_pos,
            chunk.end_pos,
            expected_start
        );
        ensure!(
            chunk.end_pos <= text.len(),
            "Plan chunk {} ends at {} but the text has {} bytes; was it made from a different input?",
            chunk.id,
            chunk.end_pos,
            text.len()
        );
        ensure!(
            text.is_char_boundary(chunk.start_pos) && text.is_char_boundary(chunk.end_pos),
            "Plan chunk {} spans {}..{}, which does not fall on character boundaries",
            chunk.id,
            chunk.start_pos,
            chunk.end_pos
        );
        expected_start = chunk.end_pos;
    }
    ensure!(
        expected_start == text.len(),
        "Plan covers {} bytes but the text has {}; was it made from a different input?",
        expected_start,
        text.len()
    );
    Ok(())
}
