// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/logging.rs
// Version: 1.0.0
//
// This file sets up log4rs for the search-bench binary. A YAML configuration
// (see log4rs_sample.yml) is used when given; otherwise logs go to the
// console and to a log file.
//
// Tree Location:
// - src/utils/logging.rs (logging initialization)
// - Depends on: log, log4rs, anyhow

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

/// Log file used when no YAML configuration is given
pub const DEFAULT_LOG_FILE: &str = "logs/search-bench.log";

const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l}):5} {m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:5} [{t}] {m}{n}";

/// Programmatic configuration: console plus `log_file`, both at `level`
pub fn default_config(log_file: &Path, level: LevelFilter) -> Result<Config> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(log_file)
        .with_context(|| format!("Could not open log file {:?}", log_file))?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(level),
        )?;
    Ok(config)
}

/// Install the global logger
pub fn initialize_logging(config_file: Option<&Path>, log_file: &Path) -> Result<()> {
    match config_file {
        Some(path) => log4rs::init_file(path, Default::default())
            .with_context(|| format!("Could not load log4rs configuration {:?}", path)),
        None => {
            log4rs::init_config(default_config(log_file, LevelFilter::Info)?)?;
            Ok(())
        }
    }
}
