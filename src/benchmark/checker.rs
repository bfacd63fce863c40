// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/checker.rs
// Version: 1.0.0
//
// This file implements the result-consistency check. Every candidate of a
// group runs against the same text and marker, is timed, and must return the
// same value as the first (reference) candidate.
//
// Tree Location:
// - src/benchmark/checker.rs (cross-validation of candidates)
// - Depends on: benchmark/candidates, benchmark/profiler, log

use crate::benchmark::candidates::{Candidate, CandidateGroup, GroupKind};
use crate::benchmark::profiler::{Span, SpanRecorder};
use crate::core::error::BenchError;
use log::debug;
use std::fmt::Debug;
use std::time::Instant;

const LOG_TARGET: &str = "search_bench::checker";

/// Longest value preview carried in a consistency error
const PREVIEW_CHARS: usize = 120;

/// Run every candidate of `group` and check it agrees with the reference.
///
/// An empty group is trivially consistent. The first divergence stops the
/// check: later candidates are not invoked and the error names the diverging
/// candidate by its 1-based position in the group.
pub fn verify<T, R>(
    group: &CandidateGroup<T>,
    text: &[u8],
    marker: &[u8],
    recorder: &mut R,
) -> Result<(), BenchError>
where
    T: PartialEq + Debug,
    R: SpanRecorder + ?Sized,
{
    let kind = group.kind();
    let mut candidates = group.iter();
    let Some(reference) = candidates.next() else {
        debug!(target: LOG_TARGET, "No {} candidates registered, nothing to check", kind);
        return Ok(());
    };

    let expected = run_timed(reference, kind, text, marker, recorder);

    for (offset, candidate) in candidates.enumerate() {
        let position = offset + 2;
        let actual = run_timed(candidate, kind, text, marker, recorder);
        if actual != expected {
            return Err(BenchError::Inconsistent {
                group: kind.as_str(),
                position,
                candidate: candidate.name().to_string(),
                reference: reference.name().to_string(),
                expected: preview(&expected),
                actual: preview(&actual),
            });
        }
    }

    debug!(target: LOG_TARGET,
        "{} {} candidate(s) agree: {}",
        group.len(),
        kind,
        preview(&expected)
    );
    Ok(())
}

fn run_timed<T, R>(
    candidate: &Candidate<T>,
    kind: GroupKind,
    text: &[u8],
    marker: &[u8],
    recorder: &mut R,
) -> T
where
    R: SpanRecorder + ?Sized,
{
    let started = Instant::now();
    let result = candidate.invoke(text, marker);
    let elapsed = started.elapsed();
    recorder.record(Span {
        name: candidate.name().to_string(),
        category: kind.as_str(),
        started,
        elapsed,
    });
    result
}

fn preview<T: Debug>(value: &T) -> String {
    let rendered = format!("{:?}", value);
    if rendered.chars().count() <= PREVIEW_CHARS {
        rendered
    } else {
        let mut short: String = rendered.chars().take(PREVIEW_CHARS).collect();
        short.push_str("...");
        short
    }
}
