// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.0.0
//
// This file provides utility functions for formatting benchmark figures,
// located in the utils subdirectory. It formats elapsed times, byte counts
// and scan throughput for consistent output in logs.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

use std::time::Duration;

/// Utility functions for formatting benchmark figures
pub struct FormatUtils;

impl FormatUtils {
    /// Format an elapsed time in appropriate units (µs, ms, s)
    pub fn format_elapsed(duration: Duration) -> String {
        let secs = duration.as_secs_f64();
        if secs >= 1.0 {
            format!("{:.3} s", secs)
        } else if secs >= 0.001 {
            format!("{:.3} ms", secs * 1_000.0)
        } else {
            format!("{:.1} µs", secs * 1_000_000.0)
        }
    }

    /// Format a byte count with binary suffixes (KiB, MiB, GiB)
    pub fn format_bytes(bytes: u64) -> String {
        const KIB: f64 = 1024.0;
        let value = bytes as f64;
        if value >= KIB * KIB * KIB {
            format!("{:.2} GiB", value / (KIB * KIB * KIB))
        } else if value >= KIB * KIB {
            format!("{:.2} MiB", value / (KIB * KIB))
        } else if value >= KIB {
            format!("{:.2} KiB", value / KIB)
        } else {
            format!("{} B", bytes)
        }
    }

    /// Format scan throughput for `bytes` processed in `duration`
    pub fn format_throughput(bytes: u64, duration: Duration) -> String {
        let secs = duration.as_secs_f64();
        if secs <= 0.0 {
            return "n/a".to_string();
        }
        format!("{}/s", Self::format_bytes((bytes as f64 / secs) as u64))
    }
}

// Changelog:
// - v1.0.0 (2026-10-19): Formatting helpers for benchmark output.
//   - Replaced hashrate/share formatting with elapsed time, byte count and
//     throughput formatting used by the runner's per-candidate log lines.
