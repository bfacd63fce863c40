// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/error.rs
// Version: 1.0.0
//
// This file defines the error taxonomy of the benchmark harness: workload
// validation, fixture I/O, result divergence between candidates and
// profiling sink failures.
//
// Tree Location:
// - src/core/error.rs (error types)
// - Depends on: thiserror, serde_json

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a profiling sink or one of its sessions
#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("A profiling session is already open; end it before beginning '{requested}'")]
    SessionAlreadyOpen { requested: String },

    #[error("Failed to serialize trace for session '{session}'")]
    SerializationError {
        session: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO operation failed on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the workload generator, the consistency checker and the runner
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid workload: {reason}")]
    InvalidWorkload { reason: String },

    #[error("IO operation failed on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture file {path:?} does not exist")]
    FixtureMissing { path: PathBuf },

    #[error(
        "Inconsistent {group} result from candidate #{position} '{candidate}': \
         expected {expected} (from reference '{reference}'), got {actual}"
    )]
    Inconsistent {
        group: &'static str,
        position: usize,
        candidate: String,
        reference: String,
        expected: String,
        actual: String,
    },

    #[error("Profiling failed")]
    Profiler {
        #[from]
        source: ProfilerError,
    },
}

impl BenchError {
    pub(crate) fn invalid_workload(reason: impl Into<String>) -> Self {
        BenchError::InvalidWorkload {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::IoError {
            path: path.into(),
            source,
        }
    }
}
