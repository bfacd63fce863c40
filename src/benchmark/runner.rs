// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/runner.rs
// Version: 1.0.0
//
// This file implements the benchmark execution engine for substring search
// implementations. For every configured fixture size it generates and loads
// a fixture, opens a profiling session, cross-validates both candidate groups
// and closes the session before moving on.

use crate::benchmark::candidates::{MultiResultGroup, SingleResultGroup};
use crate::benchmark::checker::verify;
use crate::benchmark::profiler::{CandidateTiming, ProfilingSink, SessionGuard};
use crate::benchmark::workload::{WorkloadGenerator, load_fixture};
use crate::core::error::BenchError;
use crate::core::types::BenchmarkConfig;
use crate::utils::format::FormatUtils;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "search_bench::runner";

/// Name given to every profiling session
pub const SESSION_NAME: &str = "BenchMarker";

/// Results of one completed fixture size
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub size_mb: u64,
    pub output: PathBuf,
    pub fixture_bytes: usize,
    pub requested_occurrences: usize,
    pub realized_occurrences: usize,
    pub timings: Vec<CandidateTiming>,
}

/// Results of a full multi-size run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchmarkSummary {
    pub sizes: Vec<SizeReport>,
}

/// Outcome of the best-effort fixture cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed(PathBuf),
    NotPresent(PathBuf),
    /// `run` was never called, so no fixture path is known
    NothingToClean,
    Failed { path: PathBuf, reason: String },
}

/// Output artifact path for one fixture size
pub fn output_path_for(prefix: &str, size_mb: u64) -> PathBuf {
    PathBuf::from(format!("{}_{}MB.json", prefix, size_mb))
}

/// Main benchmark runner
pub struct BenchmarkRunner<P: ProfilingSink> {
    config: BenchmarkConfig,
    single_result: SingleResultGroup,
    multi_result: MultiResultGroup,
    profiler: P,
    fixture_path: Option<PathBuf>,
}

impl<P: ProfilingSink> BenchmarkRunner<P> {
    pub fn new(
        config: BenchmarkConfig,
        single_result: SingleResultGroup,
        multi_result: MultiResultGroup,
        profiler: P,
    ) -> Self {
        Self {
            config,
            single_result,
            multi_result,
            profiler,
            fixture_path: None,
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn profiler(&self) -> &P {
        &self.profiler
    }

    /// Benchmark every configured size in order.
    ///
    /// The first failure aborts the run; trace files of sizes completed before
    /// it stay on disk. An empty size list is an empty, successful run.
    pub fn run(
        &mut self,
        output_prefix: &str,
        fixture_path: impl AsRef<Path>,
    ) -> Result<BenchmarkSummary, BenchError> {
        let fixture_path = fixture_path.as_ref().to_path_buf();
        self.fixture_path = Some(fixture_path.clone());
        let generator = WorkloadGenerator::new(fixture_path);

        info!(target: LOG_TARGET,
            "🧪 Starting benchmark: {} size(s), {} single-result and {} multi-result candidate(s)",
            self.config.sizes_mb.len(),
            self.single_result.len(),
            self.multi_result.len()
        );

        let mut summary = BenchmarkSummary::default();
        for &size_mb in &self.config.sizes_mb {
            let report = self.run_size(&generator, size_mb, output_prefix)?;
            summary.sizes.push(report);
        }

        info!(target: LOG_TARGET, "📊 Benchmark complete: {} size(s) processed", summary.sizes.len());
        Ok(summary)
    }

    fn run_size(
        &self,
        generator: &WorkloadGenerator,
        size_mb: u64,
        output_prefix: &str,
    ) -> Result<SizeReport, BenchError> {
        info!(target: LOG_TARGET, "Running test with file size: {}MB", size_mb);
        let marker = self.config.marker.as_bytes();

        let workload = generator.generate(size_mb, marker, self.config.occurrences)?;
        let text = load_fixture(generator.fixture_path(), self.config.load_policy)?;
        if text.len() != workload.byte_size {
            warn!(target: LOG_TARGET,
                "Loaded {} bytes but generated {} bytes for {}MB",
                text.len(), workload.byte_size, size_mb
            );
        }

        let output = output_path_for(output_prefix, size_mb);

        // The guard ends the session as aborted if either check fails
        let mut session = SessionGuard::begin(&self.profiler, SESSION_NAME, &output)?;
        verify(&self.single_result, &text, marker, &mut session)?;
        verify(&self.multi_result, &text, marker, &mut session)?;
        let timings = session.finish()?;

        for timing in &timings {
            info!(target: LOG_TARGET,
                "  ├─ [{}] {}: {} ({})",
                timing.category,
                timing.name,
                FormatUtils::format_elapsed(timing.elapsed),
                FormatUtils::format_throughput(text.len() as u64, timing.elapsed)
            );
        }
        info!(target: LOG_TARGET, "✅ Finished test with file size: {}MB", size_mb);
        info!(target: LOG_TARGET, "Results from test written to {:?}", output);

        Ok(SizeReport {
            size_mb,
            output,
            fixture_bytes: text.len(),
            requested_occurrences: workload.requested_occurrences,
            realized_occurrences: workload.realized_occurrences,
            timings,
        })
    }

    /// Delete the fixture. Failures are reported in the outcome and logged,
    /// never returned as errors.
    pub fn close(self) -> CleanupOutcome {
        let Some(path) = self.fixture_path else {
            debug!(target: LOG_TARGET, "No fixture to clean up");
            return CleanupOutcome::NothingToClean;
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(target: LOG_TARGET, "Removed fixture {:?}", path);
                CleanupOutcome::Removed(path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: LOG_TARGET, "Fixture {:?} already gone", path);
                CleanupOutcome::NotPresent(path)
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Failed to remove fixture {:?}: {}", path, e);
                CleanupOutcome::Failed {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }
}
