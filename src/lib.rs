// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 1.0.0
//
// This file serves as the main library entry point for the search benchmark,
// located at the root of the source tree. It exports all public modules
// and types that the binary and the integration tests use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: benchmark, core, search, utils

pub mod benchmark;
pub mod core;
pub mod search;
pub mod utils;

// Re-export commonly used types at the crate root for convenience
pub use crate::benchmark::{
    BenchmarkRunner, BenchmarkSummary, CleanupOutcome, MultiResultGroup, SingleResultGroup,
    TraceFileProfiler, WorkloadGenerator,
};
pub use crate::core::{Args, BenchError, BenchmarkConfig, FixtureLoadPolicy, ProfilerError};
pub use crate::search::{default_multi_result_group, default_single_result_group};

pub type Result<T> = std::result::Result<T, BenchError>;

// Changelog:
// - v1.0.0 (2026-10-19): Library root for the substring search benchmark.
//   - Purpose: Organizes the project into benchmark (workload, candidates,
//     checker, profiler, runner), core (errors, configuration), search
//     (CPU and optional OpenCL candidates) and utils modules.
//   - Features: Re-exports the runner, default candidate groups and error
//     types, and defines a crate-wide Result alias over BenchError.
