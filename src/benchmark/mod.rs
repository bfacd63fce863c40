// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/mod.rs
// Version: 1.0.0
//
// This file declares the benchmark module: fixture generation, candidate
// groups, result cross-validation, profiling sessions and the runner that
// ties them together for every fixture size.
//
// Tree Location:
// - src/benchmark/mod.rs (benchmark module entry point)
// - Submodules: candidates, checker, profiler, runner, workload

pub mod candidates;
pub mod checker;
pub mod profiler;
pub mod runner;
pub mod workload;

// Re-export key benchmark types and functions
pub use candidates::{Candidate, CandidateGroup, GroupKind, MultiResultGroup, SingleResultGroup};
pub use checker::verify;
pub use profiler::{
    CandidateTiming, ProfilingSession, ProfilingSink, SessionGuard, SessionStatus, Span,
    SpanRecorder, TraceFile, TraceFileProfiler,
};
pub use runner::{BenchmarkRunner, BenchmarkSummary, CleanupOutcome, SizeReport, output_path_for};
pub use workload::{WorkloadGenerator, WorkloadReport, load_fixture};

// Changelog:
// - v1.0.0 (2026-10-19): Benchmark module for substring search.
//   - Purpose: Drives named search candidates over generated fixtures and
//     refuses to keep timings from candidates that disagree.
//   - Features: Declares workload, candidates, checker, profiler and runner
//     submodules with re-exports for main.rs and the integration tests.
