// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/search/mod.rs
// Version: 1.0.0
//
// This file is the module entry point for the search candidates benchmarked
// by the runner. It assembles the default single-result and multi-result
// groups; the reference candidate of each group is registered first.
//
// Features:
// - Naive, standard library and memchr candidates on every build
// - OpenCL multi-result candidate when the "gpu" feature is enabled

pub mod cpu;

#[cfg(feature = "gpu")]
pub mod opencl;

use crate::benchmark::candidates::{MultiResultGroup, SingleResultGroup};

/// Most match positions one OpenCL kernel launch reports
pub const MAX_GPU_MATCHES: usize = 100;

/// First-index candidates, naive scan as reference
pub fn default_single_result_group() -> SingleResultGroup {
    SingleResultGroup::single_result()
        .with("naive_scan", cpu::naive_find)
        .with("std_find", cpu::std_find)
        .with("memchr_find", cpu::memchr_find)
}

/// All-positions candidates, naive scan as reference
pub fn default_multi_result_group() -> MultiResultGroup {
    MultiResultGroup::multi_result()
        .with("naive_find_all", cpu::naive_find_all)
        .with("std_find_all", cpu::std_find_all)
        .with("memchr_find_all", cpu::memchr_find_all)
}

/// Append the OpenCL candidate on the first available GPU.
///
/// Kernel failures during a run are logged and yield an empty result, which
/// the consistency check then reports as a divergence.
#[cfg(feature = "gpu")]
pub fn register_opencl(group: &mut MultiResultGroup) -> anyhow::Result<()> {
    let searcher = opencl::OpenClSearcher::first_available()?;
    group.register("opencl_find_all", move |text, marker| {
        match searcher.find_all(text, marker) {
            Ok(matches) => matches,
            Err(e) => {
                log::error!(target: "search_bench::opencl", "OpenCL search failed: {}", e);
                Vec::new()
            }
        }
    });
    Ok(())
}
