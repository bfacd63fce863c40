// Search Bench - Free and Open Source Software Statement
//
// File: src/main.rs
// Version: 1.0.0
//
// Benchmark entry point: CPU candidates always, OpenCL with --features gpu --gpu

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use search_bench::{
    benchmark::{BenchmarkRunner, CleanupOutcome, TraceFileProfiler, WorkloadGenerator},
    core::types::Args,
    search::{default_multi_result_group, default_single_result_group},
    utils::{format::FormatUtils, logging},
};
use std::path::Path;

const LOG_TARGET: &str = "search_bench::main";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    logging::initialize_logging(
        args.log_config.as_deref(),
        Path::new(logging::DEFAULT_LOG_FILE),
    )?;

    if let Some(size_mb) = args.generate_only {
        return handle_generate_only(&args, size_mb);
    }

    handle_benchmark(&args)
}

fn handle_generate_only(args: &Args, size_mb: u64) -> anyhow::Result<()> {
    let generator = WorkloadGenerator::new(&args.fixture);
    let report = generator
        .generate(size_mb, args.marker.as_bytes(), args.occurrences)
        .with_context(|| format!("Could not generate {}MB fixture", size_mb))?;

    info!(target: LOG_TARGET,
        "📝 Fixture ready: {:?}, {} with {} marker occurrence(s)",
        report.path,
        FormatUtils::format_bytes(report.byte_size as u64),
        report.realized_occurrences
    );
    Ok(())
}

fn handle_benchmark(args: &Args) -> anyhow::Result<()> {
    let single_result = default_single_result_group();
    #[allow(unused_mut)]
    let mut multi_result = default_multi_result_group();

    #[cfg(feature = "gpu")]
    if args.gpu {
        search_bench::search::register_opencl(&mut multi_result)
            .context("Could not set up the OpenCL candidate")?;
    }

    info!(target: LOG_TARGET, "🧪 Single-result candidates: {}", single_result.names().join(", "));
    info!(target: LOG_TARGET, "🧪 Multi-result candidates: {}", multi_result.names().join(", "));

    let mut runner = BenchmarkRunner::new(
        args.benchmark_config(),
        single_result,
        multi_result,
        TraceFileProfiler::new(),
    );

    let result = runner.run(&args.output_prefix, &args.fixture);

    if args.keep_fixture {
        info!(target: LOG_TARGET, "Keeping fixture {:?}", args.fixture);
    } else {
        match runner.close() {
            CleanupOutcome::Removed(path) => info!(target: LOG_TARGET, "🧹 Removed fixture {:?}", path),
            CleanupOutcome::NotPresent(path) => info!(target: LOG_TARGET, "Fixture {:?} was already gone", path),
            CleanupOutcome::NothingToClean => {}
            CleanupOutcome::Failed { path, reason } => {
                warn!(target: LOG_TARGET, "Could not remove fixture {:?}: {}", path, reason)
            }
        }
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            error!(target: LOG_TARGET, "❌ Benchmark aborted: {}", e);
            return Err(e.into());
        }
    };

    info!(target: LOG_TARGET, "📊 Benchmark Complete!");
    for size in &summary.sizes {
        info!(target: LOG_TARGET,
            "  {}MB: {} candidate timing(s), {} marker occurrence(s) -> {:?}",
            size.size_mb,
            size.timings.len(),
            size.realized_occurrences,
            size.output
        );
    }

    Ok(())
}

// Changelog:
// - v1.0.0 (2026-10-19): Single entry point for the search benchmark.
//   - Replaced the per-feature mining entry points with one synchronous main.
//   - The OpenCL candidate is registered only when built with the "gpu"
//     feature and requested with --gpu.
//   - The fixture is cleaned up after the run whether it succeeded or not,
//     unless --keep-fixture is given.
