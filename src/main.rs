use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use shotsplit::chunking::{assemble, scan_with, suggest, Assembly};
use shotsplit::cli::{ChunkArgs, Cli, Command, HintsArgs, MergeArgs, SourceArgs, SplitArgs};
use shotsplit::dna::split_suggestions;
use shotsplit::editor::{merge_chunks, split_chunk};
use shotsplit::types::{
    ChunkId, ContentType, ScanMode, ShotChunk, ShotCountSuggestion, SplitSuggestion, TextBoundary,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport<'a> {
    mode: ScanMode,
    content_type: ContentType,
    max_possible_shots: usize,
    boundaries: &'a [TextBoundary],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestReport {
    max_possible_shots: usize,
    suggestions: Vec<ShotCountSuggestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HintsReport {
    chunk: ChunkId,
    suggestions: Vec<SplitSuggestion>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan(args) => handle_scan(&args),
        Command::Suggest(args) => handle_suggest(&args),
        Command::Chunk(args) => handle_chunk(&args),
        Command::Hints(args) => handle_hints(&args),
        Command::Split(args) => handle_split(&args),
        Command::Merge(args) => handle_merge(&args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "shotsplit=debug"
    } else {
        "shotsplit=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_scan(args: &SourceArgs) -> Result<()> {
    let text = args.read_text()?;
    let profile = args.profile()?;
    let boundaries = scan_with(&text, args.mode, profile.weights(args.content_type));
    emit(&ScanReport {
        mode: args.mode,
        content_type: args.content_type,
        max_possible_shots: boundaries.max_possible_shots(),
        boundaries: boundaries.as_slice(),
    })
}

fn handle_suggest(args: &SourceArgs) -> Result<()> {
    let text = args.read_text()?;
    let profile = args.profile()?;
    let boundaries = scan_with(&text, args.mode, profile.weights(args.content_type));
    emit(&SuggestReport {
        max_possible_shots: boundaries.max_possible_shots(),
        suggestions: suggest(&boundaries),
    })
}

fn handle_chunk(args: &ChunkArgs) -> Result<()> {
    let source = &args.source;
    let text = source.read_text()?;
    let profile = source.profile()?;
    let boundaries = scan_with(&text, source.mode, profile.weights(source.content_type));
    let assembly = assemble(&text, &boundaries, args.shots).context("Failed to assemble shots")?;
    if assembly.was_clamped() {
        eprintln!(
            "Requested {} shots; the text supports at most {}, using {}",
            assembly.requested,
            boundaries.max_possible_shots(),
            assembly.applied
        );
    }
    emit(&assembly)
}

fn handle_hints(args: &HintsArgs) -> Result<()> {
    let (text, plan) = args.plan.load()?;
    let profile = args.plan.source.profile()?;
    let id = ChunkId(args.chunk);
    let chunk = find_chunk(&plan.chunks, id)?;
    emit(&HintsReport {
        chunk: id,
        suggestions: split_suggestions(
            &text,
            chunk,
            profile.weights(args.plan.source.content_type),
        ),
    })
}

fn handle_split(args: &SplitArgs) -> Result<()> {
    let (text, plan) = args.plan.load()?;
    let profile = args.plan.source.profile()?;
    let chunks = split_chunk(
        &text,
        &plan.chunks,
        ChunkId(args.chunk),
        args.at,
        profile.weights(args.plan.source.content_type),
    )
    .context("Split rejected")?;
    emit(&edited(chunks))
}

fn handle_merge(args: &MergeArgs) -> Result<()> {
    let (a, b) = args.pair()?;
    let (_, plan) = args.plan.load()?;
    let chunks = merge_chunks(&plan.chunks, a, b).context("Merge failed")?;
    emit(&edited(chunks))
}

fn find_chunk(chunks: &[ShotChunk], id: ChunkId) -> Result<&ShotChunk> {
    chunks
        .iter()
        .find(|chunk| chunk.id == id)
        .with_context(|| format!("Plan has no chunk {}", id))
}

fn edited(chunks: Vec<ShotChunk>) -> Assembly {
    Assembly {
        requested: chunks.len(),
        applied: chunks.len(),
        chunks,
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
