//! notegraph: lays out the note-link graph of a notebook
//!
//! Reads notes from the notebook REST API or a JSON export and prints the
//! positioned nodes and deduplicated edges for a graph-drawing surface.
//!
//! # Subcommands
//! - `layout [--input <file>] [--seed <n>] [--pretty]`: layout as JSON on stdout
//! - `stats [--input <file>]`: human-readable graph summary

use clap::{Args, Parser, Subcommand};
use notegraph_core::stats::dangling_link_ids;
use notegraph_core::{
    compute_layout_with, GraphStats, HttpNotesSource, JsonFileSource, NoteFilter,
    NoteGraphConfig, NoteRecord, NotesSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONFIG: &str = "notegraph.toml";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "notegraph",
    version,
    about = "Lay out the note-link graph of a notebook as renderable JSON"
)]
struct Cli {
    /// Config file (TOML); missing file means built-in defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: String,

    /// Notes API base URL (overrides source.base_url)
    #[arg(long, env = "NOTEGRAPH_API_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Read notes from a JSON export instead of the API
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Include archived notes
    #[arg(long)]
    archived: bool,

    /// Leave out daily journal notes
    #[arg(long)]
    no_daily: bool,

    /// Only pinned notes
    #[arg(long)]
    pinned_only: bool,

    /// Only notes carrying this tag
    #[arg(long)]
    tag: Option<String>,
}

impl InputArgs {
    fn filter(&self) -> NoteFilter {
        NoteFilter {
            include_archived: self.archived,
            include_daily: !self.no_daily,
            pinned_only: self.pinned_only,
            tag: self.tag.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the graph layout and print it as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,

        /// Seed for the jitter of unlinked notes (reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print node, edge and link counts for the graph
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

// ============================================================================
// Commands
// ============================================================================

async fn load_notes(
    config: &NoteGraphConfig,
    input: &InputArgs,
) -> anyhow::Result<Vec<NoteRecord>> {
    let source: Box<dyn NotesSource> = match &input.input {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(HttpNotesSource::new(config.source.clone())?),
    };
    tracing::debug!(source = source.name(), "Loading notes");
    Ok(source.fetch_notes(&input.filter()).await?)
}

fn report_links(notes: &[NoteRecord], stats: &GraphStats) {
    if stats.dangling_links > 0 {
        let sample: Vec<&str> = dangling_link_ids(notes).into_iter().take(5).collect();
        tracing::warn!(
            dangling = stats.dangling_links,
            sample = ?sample,
            "Links to notes outside the collection were skipped"
        );
    }
    tracing::info!(
        nodes = stats.nodes,
        edges = stats.edges,
        isolated = stats.isolated,
        "Computed note graph"
    );
}

async fn do_layout(
    config: &NoteGraphConfig,
    input: &InputArgs,
    seed: Option<u64>,
    pretty: bool,
) -> anyhow::Result<()> {
    let notes = load_notes(config, input).await?;

    let layout = match seed {
        Some(seed) => compute_layout_with(&notes, &config.layout, &mut StdRng::seed_from_u64(seed)),
        None => compute_layout_with(&notes, &config.layout, &mut rand::thread_rng()),
    };
    report_links(&notes, &GraphStats::collect(&notes, &layout));

    let view = layout.to_view();
    let json = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{}", json);
    Ok(())
}

async fn do_stats(config: &NoteGraphConfig, input: &InputArgs) -> anyhow::Result<()> {
    let notes = load_notes(config, input).await?;
    let layout = compute_layout_with(&notes, &config.layout, &mut rand::thread_rng());
    let stats = GraphStats::collect(&notes, &layout);

    println!("Notes:           {}", stats.nodes);
    println!("Edges:           {}", stats.edges);
    println!("Unlinked notes:  {}", stats.isolated);
    println!("Pinned notes:    {}", stats.pinned);
    println!("Max connections: {}", stats.max_connections);
    println!("Dangling links:  {}", stats.dangling_links);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match NoteGraphConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("notegraph: failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };
    if let Some(server) = &cli.server {
        config.source.base_url = server.trim_end_matches('/').to_string();
    }

    // Logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = config.validate() {
        eprintln!("notegraph: {}", e);
        std::process::exit(1);
    }

    let result = match &cli.command {
        Commands::Layout {
            input,
            seed,
            pretty,
        } => do_layout(&config, input, *seed, *pretty).await,
        Commands::Stats { input } => do_stats(&config, input).await,
    };

    if let Err(e) = result {
        eprintln!("notegraph: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
