// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/profiler.rs
// Version: 1.0.0
//
// This file provides the profiling sink used by the benchmark runner. A sink
// opens one named session at a time; the session collects timed spans and is
// ended exactly once. The bundled sink writes Chrome trace-event JSON that can
// be opened in chrome://tracing or Perfetto.
//
// Tree Location:
// - src/benchmark/profiler.rs (profiling sessions and trace output)
// - Depends on: serde, serde_json, num_cpus, log

use crate::core::error::ProfilerError;
use crate::utils::user_agent::user_agent;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "search_bench::profiler";

/// One timed candidate invocation
#[derive(Debug, Clone)]
pub struct Span {
    pub name: String,
    pub category: &'static str,
    pub started: Instant,
    pub elapsed: Duration,
}

/// Receiver of timed spans
pub trait SpanRecorder {
    fn record(&mut self, span: Span);
}

impl SpanRecorder for Vec<Span> {
    fn record(&mut self, span: Span) {
        self.push(span);
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Every candidate ran and agreed
    Completed,
    /// The iteration failed while the session was open
    Aborted,
}

/// An open profiling session
pub trait ProfilingSession {
    fn record(&mut self, span: &Span);

    /// Close the session. Called exactly once per session.
    fn end(self: Box<Self>, status: SessionStatus) -> Result<(), ProfilerError>;
}

/// Source of profiling sessions. At most one session is open at a time.
pub trait ProfilingSink {
    fn begin(&self, name: &str, output: &Path) -> Result<Box<dyn ProfilingSession>, ProfilerError>;
}

/// Timing of one candidate, kept for the run summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTiming {
    pub name: String,
    pub category: &'static str,
    pub elapsed: Duration,
}

/// Scope guard over an open session.
///
/// [`finish`](Self::finish) ends the session as completed. Dropping the guard
/// without finishing ends it as aborted, so error paths never leak a session.
pub struct SessionGuard {
    session: Option<Box<dyn ProfilingSession>>,
    name: String,
    output: PathBuf,
    timings: Vec<CandidateTiming>,
}

impl SessionGuard {
    pub fn begin<S: ProfilingSink + ?Sized>(
        sink: &S,
        name: &str,
        output: &Path,
    ) -> Result<Self, ProfilerError> {
        let session = sink.begin(name, output)?;
        debug!(target: LOG_TARGET, "Profiling session '{}' opened for {:?}", name, output);
        Ok(Self {
            session: Some(session),
            name: name.to_string(),
            output: output.to_path_buf(),
            timings: Vec::new(),
        })
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// End the session as completed and return the collected timings
    pub fn finish(mut self) -> Result<Vec<CandidateTiming>, ProfilerError> {
        let timings = std::mem::take(&mut self.timings);
        if let Some(session) = self.session.take() {
            session.end(SessionStatus::Completed)?;
            debug!(target: LOG_TARGET, "Profiling session '{}' completed", self.name);
        }
        Ok(timings)
    }
}

impl SpanRecorder for SessionGuard {
    fn record(&mut self, span: Span) {
        if let Some(session) = self.session.as_mut() {
            session.record(&span);
        }
        self.timings.push(CandidateTiming {
            name: span.name,
            category: span.category,
            elapsed: span.elapsed,
        });
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            warn!(target: LOG_TARGET,
                "Profiling session '{}' aborted, discarding {:?}", self.name, self.output
            );
            if let Err(e) = session.end(SessionStatus::Aborted) {
                warn!(target: LOG_TARGET, "Failed to end aborted session '{}': {}", self.name, e);
            }
        }
    }
}

/// One complete ("X" phase) Chrome trace event, times in microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub cat: String,
    pub dur: f64,
    pub name: String,
    pub ph: String,
    pub pid: u32,
    pub tid: u32,
    pub ts: f64,
}

/// Session metadata written alongside the events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMetadata {
    pub session: String,
    pub tool: String,
    pub os: String,
    pub arch: String,
    pub logical_cpus: usize,
}

/// Chrome trace file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    #[serde(rename = "otherData")]
    pub other_data: TraceMetadata,
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

impl TraceFile {
    /// Read a trace written by [`TraceFileProfiler`]
    pub fn load(path: &Path) -> Result<Self, ProfilerError> {
        let contents = fs::read(path).map_err(|e| ProfilerError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_slice(&contents).map_err(|e| ProfilerError::SerializationError {
            session: path.display().to_string(),
            source: e,
        })
    }
}

/// Sink writing one Chrome trace JSON file per session
#[derive(Debug, Clone, Default)]
pub struct TraceFileProfiler {
    active: Arc<AtomicBool>,
}

impl TraceFileProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a session from this sink is open
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn ensure_parent_exists(output: &Path) -> Result<(), ProfilerError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ProfilerError::IoError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
                debug!(target: LOG_TARGET, "Created output directory {:?}", parent);
            }
        }
        Ok(())
    }
}

impl ProfilingSink for TraceFileProfiler {
    fn begin(&self, name: &str, output: &Path) -> Result<Box<dyn ProfilingSession>, ProfilerError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ProfilerError::SessionAlreadyOpen {
                requested: name.to_string(),
            });
        }

        if let Err(e) = Self::ensure_parent_exists(output) {
            self.active.store(false, Ordering::SeqCst);
            return Err(e);
        }

        Ok(Box::new(TraceFileSession {
            metadata: TraceMetadata {
                session: name.to_string(),
                tool: user_agent(),
                os: std::env::consts::OS.to_string(),
                arch: std::env::consts::ARCH.to_string(),
                logical_cpus: num_cpus::get(),
            },
            output: output.to_path_buf(),
            started: Instant::now(),
            events: Vec::new(),
            active: Arc::clone(&self.active),
        }))
    }
}

struct TraceFileSession {
    metadata: TraceMetadata,
    output: PathBuf,
    started: Instant,
    events: Vec<TraceEvent>,
    active: Arc<AtomicBool>,
}

impl TraceFileSession {
    fn write(&mut self) -> Result<(), ProfilerError> {
        let trace = TraceFile {
            other_data: self.metadata.clone(),
            trace_events: std::mem::take(&mut self.events),
        };
        let contents =
            serde_json::to_vec_pretty(&trace).map_err(|e| ProfilerError::SerializationError {
                session: self.metadata.session.clone(),
                source: e,
            })?;
        fs::write(&self.output, contents).map_err(|e| ProfilerError::IoError {
            path: self.output.clone(),
            source: e,
        })?;
        info!(target: LOG_TARGET,
            "Trace with {} event(s) written to {:?}",
            trace.trace_events.len(),
            self.output
        );
        Ok(())
    }
}

impl ProfilingSession for TraceFileSession {
    fn record(&mut self, span: &Span) {
        let ts = span.started.saturating_duration_since(self.started);
        self.events.push(TraceEvent {
            cat: span.category.to_string(),
            dur: span.elapsed.as_secs_f64() * 1_000_000.0,
            name: span.name.clone(),
            ph: "X".to_string(),
            pid: 0,
            tid: 0,
            ts: ts.as_secs_f64() * 1_000_000.0,
        });
    }

    fn end(mut self: Box<Self>, status: SessionStatus) -> Result<(), ProfilerError> {
        match status {
            SessionStatus::Completed => self.write(),
            SessionStatus::Aborted => {
                debug!(target: LOG_TARGET,
                    "Dropping {} buffered event(s) of aborted session '{}'",
                    self.events.len(),
                    self.metadata.session
                );
                Ok(())
            }
        }
    }
}

impl Drop for TraceFileSession {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
