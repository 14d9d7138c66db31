//! Demand Pager - Main Entry Point
//!
//! Replays an access trace through the paging engine and writes the value of
//! every read to an output file.
//!
//! Trace format: one access per line, `r <addr>` or `w <addr> <value>`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use demand_pager::constants::{NUM_FRAMES, PAGE_COUNT, PAGE_SIZE};
use demand_pager::engine::replay;
use demand_pager::io::{
    load_backing_image, read_trace, write_backing_image, write_results, SeedSequence,
};
use demand_pager::memory::BackingStore;
use demand_pager::{PagerConfig, PagingEngine};

#[derive(Parser, Debug)]
#[command(name = "demand-pager")]
#[command(about = "Replay byte accesses through an LRU demand-paging simulator")]
struct Args {
    /// Access trace (`r <addr>` / `w <addr> <value>` per line)
    trace: PathBuf,

    /// Output file for the values returned by reads
    output: PathBuf,

    /// Raw backing store image (must cover the whole address space)
    #[arg(long, conflicts_with = "seed")]
    image: Option<PathBuf>,

    /// Fill the backing store from a deterministic generator instead of zeros
    #[arg(long)]
    seed: Option<u64>,

    /// Write the flushed backing store here when the trace finishes
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Bytes per page (power of two)
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Frames of fast memory
    #[arg(long, default_value_t = NUM_FRAMES)]
    frames: usize,

    /// Pages in the virtual address space
    #[arg(long, default_value_t = PAGE_COUNT)]
    pages: usize,

    /// Log every page fault, eviction and write-back
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = PagerConfig::new(args.page_size, args.frames, args.pages)?;

    let store = match (&args.image, args.seed) {
        (Some(image), _) => load_backing_image(image, &config)
            .with_context(|| format!("Failed to load backing image {}", image.display()))?,
        (None, seed) => {
            let mut store = BackingStore::new(config.page_size(), config.page_count());
            if let Some(seed) = seed {
                log::info!("Seeding backing store with seed {}", seed);
                SeedSequence::new(seed).fill(store.as_bytes_mut());
            }
            store
        }
    };

    let trace = read_trace(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;
    log::info!("Accesses to replay: {}", trace.len());

    let mut engine = PagingEngine::with_backing_store(config, store)?;
    let reads = replay(&mut engine, &trace)?;

    write_results(&args.output, &reads)
        .with_context(|| format!("Failed to write results {}", args.output.display()))?;

    let stats = engine.stats();
    log::info!("=== Summary ===");
    log::info!("Accesses:    {}", stats.accesses);
    log::info!("Page faults: {}", stats.page_faults);
    log::info!("Evictions:   {}", stats.evictions);
    log::info!("Write-backs: {}", stats.write_backs);
    log::info!("Results written to: {}", args.output.display());

    if let Some(dump) = &args.dump {
        let store = engine.into_backing_store();
        write_backing_image(dump, &store)
            .with_context(|| format!("Failed to write dump {}", dump.display()))?;
        log::info!("Backing store written to: {}", dump.display());
    }

    Ok(())
}
