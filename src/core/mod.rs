// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 1.0.0
//
// This file is the module declaration for the core components of the search
// benchmark: error types and command-line configuration types.
//
// Tree Location:
// - src/core/mod.rs (core module entry point)
// - Submodules: error, types

pub mod error;
pub mod types;

pub use error::{BenchError, ProfilerError};
pub use types::{Args, BenchmarkConfig, FixtureLoadPolicy};
