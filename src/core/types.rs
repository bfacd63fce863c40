// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 1.0.0
//
// This file defines the configuration types for the search benchmark, located
// in the core subdirectory. It includes the command-line arguments, their
// validation, and the validated library-side benchmark configuration.
//
// Tree Location:
// - src/core/types.rs (configuration types)
// - Depends on: clap, serde

use crate::search::MAX_GPU_MATCHES;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Marker embedded into every generated fixture
pub const DEFAULT_MARKER: &str = "akdl;jfksjft";

/// Number of marker copies inserted per fixture
pub const DEFAULT_OCCURRENCES: usize = 10;

/// Fixture sizes (MiB) benchmarked when none are given
pub const DEFAULT_SIZES_MB: [u64; 8] = [10, 50, 100, 500, 800, 1000, 1200, 1500];

/// Upper bound for a single fixture, keeps a typo from allocating the machine away
pub const MAX_SIZE_MB: u64 = 16 * 1024;

/// What loading does when the fixture file is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FixtureLoadPolicy {
    /// Missing fixture loads as an empty buffer (logged at warn)
    #[default]
    Lenient,
    /// Missing fixture is a `BenchError::FixtureMissing`
    Strict,
}

/// Command-line arguments for the search benchmark
#[derive(Parser, Debug)]
#[command(
    name = "search-bench",
    version,
    about = "Cross-validated substring search benchmark (CPU, SIMD and OpenCL)",
    long_about = "search-bench generates random printable fixtures of increasing size, embeds a marker\n\
                  string at random positions and runs every registered search implementation against\n\
                  them. All implementations of a result shape must agree before their timings are kept.\n\
                  One Chrome trace file (<prefix>_<size>MB.json) is written per fixture size.\n\n\
                  Examples:\n\
                    Full run: search-bench\n\
                    Small run: search-bench --sizes 1,2,4 --output-prefix results/quick\n\
                    With GPU: cargo run --release --features gpu -- --gpu --sizes 100\n\
                    Fixture only: search-bench --generate-only 50 --fixture big.txt"
)]
pub struct Args {
    /// Fixture sizes in MiB, processed in the given order
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES_MB,
        value_name = "MB[,MB...]",
        help = "Comma separated fixture sizes in MiB"
    )]
    pub sizes: Vec<u64>,

    /// Prefix for per-size trace files; the directory part is created if needed
    #[arg(
        long,
        default_value = "results/testOutput",
        value_name = "PREFIX",
        help = "Output prefix, files are named <PREFIX>_<size>MB.json"
    )]
    pub output_prefix: String,

    /// Reused fixture file path
    #[arg(
        long,
        default_value = "testData.txt",
        value_name = "PATH",
        help = "Fixture file regenerated for every size"
    )]
    pub fixture: PathBuf,

    /// Marker string embedded into the fixture and searched for
    #[arg(long, default_value = DEFAULT_MARKER, value_name = "TEXT")]
    pub marker: String,

    /// Number of marker insertions per fixture
    #[arg(long, default_value_t = DEFAULT_OCCURRENCES, value_name = "COUNT")]
    pub occurrences: usize,

    /// Treat a missing fixture as an error instead of an empty buffer
    #[arg(long, default_value = "false")]
    pub strict_fixture: bool,

    /// Leave the fixture on disk after the run
    #[arg(long, default_value = "false")]
    pub keep_fixture: bool,

    /// Only write a fixture of the given size and exit
    #[arg(long, value_name = "MB")]
    pub generate_only: Option<u64>,

    /// log4rs YAML configuration; console and file logging are used when absent
    #[arg(long, value_name = "PATH")]
    pub log_config: Option<PathBuf>,

    /// Register the OpenCL candidate (requires the 'gpu' feature)
    #[arg(long, default_value = "false")]
    pub gpu: bool,
}

/// Validated benchmark configuration handed to the runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub sizes_mb: Vec<u64>,
    pub marker: String,
    pub occurrences: usize,
    pub load_policy: FixtureLoadPolicy,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes_mb: DEFAULT_SIZES_MB.to_vec(),
            marker: DEFAULT_MARKER.to_string(),
            occurrences: DEFAULT_OCCURRENCES,
            load_policy: FixtureLoadPolicy::Lenient,
        }
    }
}

impl BenchmarkConfig {
    /// Config with the default marker and occurrence count for the given sizes
    pub fn with_sizes(sizes_mb: Vec<u64>) -> Self {
        Self {
            sizes_mb,
            ..Self::default()
        }
    }
}

impl Args {
    /// Validate arguments and return helpful errors
    pub fn validate(&self) -> Result<(), String> {
        if self.marker.is_empty() {
            return Err("Marker cannot be empty. Use --marker TEXT".to_string());
        }

        if self.occurrences == 0 {
            return Err("Occurrences must be greater than 0".to_string());
        }

        if let Some(size) = self.generate_only {
            return Self::validate_size(size);
        }

        if self.sizes.is_empty() {
            return Err("At least one fixture size is required. Use --sizes 10,50,100".to_string());
        }
        for &size in &self.sizes {
            Self::validate_size(size)?;
        }

        if self.output_prefix.is_empty() {
            return Err("Output prefix cannot be empty".to_string());
        }

        // The OpenCL candidate keeps only the first MAX_GPU_MATCHES hits
        if self.gpu && self.occurrences > MAX_GPU_MATCHES {
            return Err(format!(
                "--gpu reports at most {} matches; use --occurrences {} or fewer",
                MAX_GPU_MATCHES, MAX_GPU_MATCHES
            ));
        }

        if self.gpu && !cfg!(feature = "gpu") {
            return Err("--gpu requires a build with --features gpu".to_string());
        }

        Ok(())
    }

    fn validate_size(size: u64) -> Result<(), String> {
        if size == 0 {
            return Err("Fixture sizes must be greater than 0 MiB".to_string());
        }
        if size > MAX_SIZE_MB {
            return Err(format!(
                "Fixture size {}MB exceeds the {}MB limit",
                size, MAX_SIZE_MB
            ));
        }
        Ok(())
    }

    /// Library-side configuration for these arguments
    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            sizes_mb: self.sizes.clone(),
            marker: self.marker.clone(),
            occurrences: self.occurrences,
            load_policy: if self.strict_fixture {
                FixtureLoadPolicy::Strict
            } else {
                FixtureLoadPolicy::Lenient
            },
        }
    }
}
