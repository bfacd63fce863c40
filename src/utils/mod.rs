// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
// Version: 1.0.0
//
// This file is the module declaration for utility functions in the search
// benchmark, located in the utils subdirectory. It declares submodules for
// shared utility logic used across the project.
//
// Tree Location:
// - src/utils/mod.rs (utils module entry point)
// - Submodules: format, logging, user_agent

pub mod format;
pub mod logging;
pub mod user_agent;
