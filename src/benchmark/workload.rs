// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/workload.rs
// Version: 1.0.0
//
// This file provides the workload generator for the search benchmark. It
// fills a fixture of the requested size with random printable ASCII, embeds
// a marker string at random positions and writes the result to the shared
// fixture path. It also loads fixtures back for the candidates.
//
// Tree Location:
// - src/benchmark/workload.rs (fixture generation and loading)
// - Depends on: rand, memchr, log

use crate::core::error::BenchError;
use crate::core::types::FixtureLoadPolicy;
use log::{debug, info, warn};
use memchr::memmem;
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "search_bench::workload";

/// Bytes per size unit
pub const MIB: u64 = 1024 * 1024;

/// Lowest byte value used for fixture filler (space)
pub const PRINTABLE_MIN: u8 = 32;

/// Highest byte value used for fixture filler (tilde)
pub const PRINTABLE_MAX: u8 = 126;

/// Outcome of one fixture generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadReport {
    pub path: PathBuf,
    pub size_mb: u64,
    pub byte_size: usize,
    pub requested_occurrences: usize,
    /// Insertion positions in the order they were applied
    pub positions: Vec<usize>,
    /// Marker matches present in the final buffer; overlapping insertions can
    /// push this below `requested_occurrences`
    pub realized_occurrences: usize,
}

/// Writes random fixtures to a single reused path
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    fixture_path: PathBuf,
}

impl WorkloadGenerator {
    pub fn new(fixture_path: impl Into<PathBuf>) -> Self {
        Self {
            fixture_path: fixture_path.into(),
        }
    }

    pub fn fixture_path(&self) -> &Path {
        &self.fixture_path
    }

    /// Generate a fixture using a non-deterministically seeded generator
    pub fn generate(
        &self,
        size_mb: u64,
        marker: &[u8],
        occurrences: usize,
    ) -> Result<WorkloadReport, BenchError> {
        self.generate_with_rng(size_mb, marker, occurrences, &mut rand::thread_rng())
    }

    /// Generate a fixture drawing filler and positions from `rng`
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        size_mb: u64,
        marker: &[u8],
        occurrences: usize,
        rng: &mut R,
    ) -> Result<WorkloadReport, BenchError> {
        // Nothing touches the file system until the request is known to be valid
        let byte_size = fixture_byte_size(size_mb, marker.len(), occurrences)?;

        debug!(target: LOG_TARGET,
            "Generating {}MB fixture ({} bytes) with {} marker insertion(s)",
            size_mb, byte_size, occurrences
        );

        let (buffer, positions) = build_workload(byte_size, marker, occurrences, rng);
        let realized_occurrences = count_occurrences(&buffer, marker);

        fs::write(&self.fixture_path, &buffer)
            .map_err(|e| BenchError::io(&self.fixture_path, e))?;

        if realized_occurrences < occurrences {
            warn!(target: LOG_TARGET,
                "Overlapping insertions: {} of {} marker copies survived in {:?}",
                realized_occurrences, occurrences, self.fixture_path
            );
        }
        info!(target: LOG_TARGET,
            "📝 Wrote {}MB fixture to {:?} ({} marker occurrence(s))",
            size_mb, self.fixture_path, realized_occurrences
        );

        Ok(WorkloadReport {
            path: self.fixture_path.clone(),
            size_mb,
            byte_size,
            requested_occurrences: occurrences,
            positions,
            realized_occurrences,
        })
    }
}

/// Validate a generation request and return the fixture size in bytes
pub fn fixture_byte_size(
    size_mb: u64,
    marker_len: usize,
    occurrences: usize,
) -> Result<usize, BenchError> {
    if marker_len == 0 {
        return Err(BenchError::invalid_workload("Marker cannot be empty"));
    }
    if size_mb == 0 {
        return Err(BenchError::invalid_workload(
            "Fixture size must be greater than 0 MB",
        ));
    }
    if occurrences == 0 {
        return Err(BenchError::invalid_workload(
            "Occurrence count must be greater than 0",
        ));
    }

    let byte_size = size_mb
        .checked_mul(MIB)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or_else(|| {
            BenchError::invalid_workload(format!(
                "Fixture size {}MB does not fit in memory on this platform",
                size_mb
            ))
        })?;

    let required = marker_len.checked_mul(occurrences).unwrap_or(usize::MAX);
    if byte_size < required {
        return Err(BenchError::invalid_workload(format!(
            "Fixture size is too small to accommodate all occurrences of the marker \
             ({} bytes available, {} required)",
            byte_size, required
        )));
    }

    Ok(byte_size)
}

/// Fill `byte_size` random printable bytes and embed `marker` `occurrences` times.
///
/// Positions are drawn independently from `[0, byte_size - marker.len()]`, so
/// later insertions may overwrite earlier ones. Callers validate the request
/// with [`fixture_byte_size`] first.
pub fn build_workload<R: Rng + ?Sized>(
    byte_size: usize,
    marker: &[u8],
    occurrences: usize,
    rng: &mut R,
) -> (Vec<u8>, Vec<usize>) {
    let filler = Uniform::new_inclusive(PRINTABLE_MIN, PRINTABLE_MAX);
    let mut buffer = Vec::with_capacity(byte_size);
    buffer.resize_with(byte_size, || filler.sample(rng));

    if marker.is_empty() || marker.len() > byte_size {
        return (buffer, Vec::new());
    }

    let position_dist = Uniform::new_inclusive(0usize, byte_size - marker.len());
    let positions: Vec<usize> = (0..occurrences).map(|_| position_dist.sample(rng)).collect();
    for &pos in &positions {
        buffer[pos..pos + marker.len()].copy_from_slice(marker);
    }

    (buffer, positions)
}

/// Overwrite `buffer` with `marker` at each of `positions`, in order
pub fn embed_marker(buffer: &mut [u8], marker: &[u8], positions: &[usize]) -> Result<(), BenchError> {
    for &pos in positions {
        let end = pos.checked_add(marker.len()).unwrap_or(usize::MAX);
        if end > buffer.len() {
            return Err(BenchError::invalid_workload(format!(
                "Marker at position {} overruns the {} byte buffer",
                pos,
                buffer.len()
            )));
        }
        buffer[pos..end].copy_from_slice(marker);
    }
    Ok(())
}

/// Count marker matches in `haystack`, overlapping matches included
pub fn count_occurrences(haystack: &[u8], marker: &[u8]) -> usize {
    if marker.is_empty() {
        return 0;
    }
    let finder = memmem::Finder::new(marker);
    let mut count = 0;
    let mut start = 0;
    while let Some(offset) = finder.find(&haystack[start..]) {
        count += 1;
        start += offset + 1;
    }
    count
}

/// Read the whole fixture into memory.
///
/// A missing file yields an empty buffer under [`FixtureLoadPolicy::Lenient`]
/// and [`BenchError::FixtureMissing`] under [`FixtureLoadPolicy::Strict`].
pub fn load_fixture(path: &Path, policy: FixtureLoadPolicy) -> Result<Vec<u8>, BenchError> {
    match fs::read(path) {
        Ok(text) => {
            debug!(target: LOG_TARGET, "Loaded {} bytes from {:?}", text.len(), path);
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => match policy {
            FixtureLoadPolicy::Lenient => {
                warn!(target: LOG_TARGET,
                    "Fixture {:?} not found, continuing with an empty buffer", path
                );
                Ok(Vec::new())
            }
            FixtureLoadPolicy::Strict => Err(BenchError::FixtureMissing {
                path: path.to_path_buf(),
            }),
        },
        Err(e) => Err(BenchError::io(path, e)),
    }
}
