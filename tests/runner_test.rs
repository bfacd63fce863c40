// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/runner_test.rs
// Version: 1.0.0
//
// This file contains end-to-end tests for the benchmark runner. Tests cover
// per-size trace artifacts, the begin/end pairing of profiling sessions,
// aborting on divergence, invalid workloads and fixture cleanup.

#[cfg(test)]
mod tests {
    use search_bench::benchmark::profiler::{
        ProfilingSession, ProfilingSink, SessionStatus, Span, TraceFile, TraceFileProfiler,
    };
    use search_bench::benchmark::runner::{BenchmarkRunner, CleanupOutcome, output_path_for};
    use search_bench::benchmark::workload::{MIB, WorkloadGenerator, load_fixture};
    use search_bench::core::types::{BenchmarkConfig, DEFAULT_MARKER, FixtureLoadPolicy};
    use search_bench::search::cpu;
    use search_bench::search::{default_multi_result_group, default_single_result_group};
    use search_bench::{BenchError, MultiResultGroup, ProfilerError, SingleResultGroup};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::{TempDir, tempdir};

    #[derive(Debug, Clone, PartialEq)]
    enum SinkEvent {
        Begin { name: String, output: PathBuf },
        Record(String),
        End(SessionStatus),
    }

    // Sink that records every call so session pairing can be checked
    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<SinkEvent>>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<SinkEvent> {
            self.events.lock().expect("Sink mutex poisoned").clone()
        }

        fn count(&self, predicate: impl Fn(&SinkEvent) -> bool) -> usize {
            self.events().iter().filter(|e| predicate(e)).count()
        }
    }

    struct RecordingSession {
        events: Arc<Mutex<Vec<SinkEvent>>>,
    }

    impl ProfilingSink for RecordingSink {
        fn begin(
            &self,
            name: &str,
            output: &Path,
        ) -> Result<Box<dyn ProfilingSession>, ProfilerError> {
            self.events
                .lock()
                .expect("Sink mutex poisoned")
                .push(SinkEvent::Begin {
                    name: name.to_string(),
                    output: output.to_path_buf(),
                });
            Ok(Box::new(RecordingSession {
                events: Arc::clone(&self.events),
            }))
        }
    }

    impl ProfilingSession for RecordingSession {
        fn record(&mut self, span: &Span) {
            self.events
                .lock()
                .expect("Sink mutex poisoned")
                .push(SinkEvent::Record(span.name.clone()));
        }

        fn end(self: Box<Self>, status: SessionStatus) -> Result<(), ProfilerError> {
            self.events
                .lock()
                .expect("Sink mutex poisoned")
                .push(SinkEvent::End(status));
            Ok(())
        }
    }

    // Helper function to create a temporary directory for testing
    fn create_temp_dir() -> TempDir {
        tempdir().expect("Failed to create temporary directory")
    }

    fn prefix_in(dir: &TempDir) -> String {
        dir.path().join("results").join("testOutput").display().to_string()
    }

    // Naive reference plus a candidate that is wrong once the text exceeds `limit` bytes
    fn single_group_failing_above(limit: usize) -> SingleResultGroup {
        SingleResultGroup::single_result()
            .with("naive_scan", cpu::naive_find)
            .with("flaky", move |text: &[u8], marker: &[u8]| {
                if text.len() > limit {
                    -1
                } else {
                    cpu::memchr_find(text, marker)
                }
            })
    }

    #[test]
    fn test_output_path_naming() {
        assert_eq!(
            output_path_for("../results/testOutput", 10),
            PathBuf::from("../results/testOutput_10MB.json")
        );
        assert_eq!(output_path_for("run", 1500), PathBuf::from("run_1500MB.json"));
    }

    #[test]
    fn test_run_writes_trace_per_size() {
        let dir = create_temp_dir();
        let prefix = prefix_in(&dir);
        let fixture = dir.path().join("testData.txt");
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1, 2]),
            default_single_result_group(),
            default_multi_result_group(),
            TraceFileProfiler::new(),
        );

        let summary = runner.run(&prefix, &fixture).expect("Benchmark run failed");

        assert_eq!(summary.sizes.len(), 2);
        for (report, size_mb) in summary.sizes.iter().zip([1u64, 2]) {
            assert_eq!(report.size_mb, size_mb);
            assert_eq!(report.fixture_bytes, (size_mb * MIB) as usize);
            assert_eq!(report.output, output_path_for(&prefix, size_mb));
            assert_eq!(report.timings.len(), 6);

            let trace = TraceFile::load(&report.output).expect("Failed to load trace");
            assert_eq!(trace.other_data.session, "BenchMarker");
            let names: Vec<&str> = trace.trace_events.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    "naive_scan",
                    "std_find",
                    "memchr_find",
                    "naive_find_all",
                    "std_find_all",
                    "memchr_find_all"
                ]
            );
        }

        // The fixture left behind is the last (2 MiB) one
        assert_eq!(fs::metadata(&fixture).expect("Fixture missing").len(), 2 * MIB);
        assert!(!runner.profiler().is_active());
    }

    #[test]
    fn test_candidates_agree_on_generated_fixture() {
        let dir = create_temp_dir();
        let generator = WorkloadGenerator::new(dir.path().join("testData.txt"));
        let marker = DEFAULT_MARKER.as_bytes();

        let report = generator.generate(1, marker, 10).expect("Failed to generate fixture");
        let text = load_fixture(generator.fixture_path(), FixtureLoadPolicy::Strict)
            .expect("Failed to load fixture");

        let first = cpu::naive_find(&text, marker);
        assert!(first >= 0);
        assert_eq!(cpu::std_find(&text, marker), first);
        assert_eq!(cpu::memchr_find(&text, marker), first);

        let all = cpu::naive_find_all(&text, marker);
        assert_eq!(all.len(), report.realized_occurrences);
        assert_eq!(all.first().copied(), Some(first));
        assert_eq!(cpu::std_find_all(&text, marker), all);
        assert_eq!(cpu::memchr_find_all(&text, marker), all);
    }

    #[test]
    fn test_sessions_begin_and_end_once_per_size() {
        let dir = create_temp_dir();
        let prefix = prefix_in(&dir);
        let sink = RecordingSink::default();
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1, 2]),
            default_single_result_group(),
            default_multi_result_group(),
            sink.clone(),
        );

        runner
            .run(&prefix, dir.path().join("testData.txt"))
            .expect("Benchmark run failed");

        let events = sink.events();
        assert_eq!(
            events.first(),
            Some(&SinkEvent::Begin {
                name: "BenchMarker".to_string(),
                output: output_path_for(&prefix, 1),
            })
        );
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::Begin { .. })), 2);
        assert_eq!(sink.count(|e| *e == SinkEvent::End(SessionStatus::Completed)), 2);
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::Record(_))), 12);
        assert_eq!(events.last(), Some(&SinkEvent::End(SessionStatus::Completed)));
    }

    #[test]
    fn test_divergence_aborts_session_once() {
        let dir = create_temp_dir();
        let sink = RecordingSink::default();
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1]),
            single_group_failing_above(0),
            default_multi_result_group(),
            sink.clone(),
        );

        let result = runner.run(&prefix_in(&dir), dir.path().join("testData.txt"));

        assert!(matches!(
            result,
            Err(BenchError::Inconsistent { position: 2, .. })
        ));
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::Begin { .. })), 1);
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::End(_))), 1);
        assert_eq!(sink.events().last(), Some(&SinkEvent::End(SessionStatus::Aborted)));
        // The multi-result group never ran
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::Record(_))), 2);
    }

    #[test]
    fn test_divergence_keeps_earlier_artifacts() {
        let dir = create_temp_dir();
        let prefix = prefix_in(&dir);
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1, 2]),
            single_group_failing_above(MIB as usize),
            default_multi_result_group(),
            TraceFileProfiler::new(),
        );

        let result = runner.run(&prefix, dir.path().join("testData.txt"));

        assert!(matches!(result, Err(BenchError::Inconsistent { .. })));
        assert!(output_path_for(&prefix, 1).exists());
        assert!(!output_path_for(&prefix, 2).exists());
        assert!(!runner.profiler().is_active());
    }

    #[test]
    fn test_invalid_workload_opens_no_session() {
        let dir = create_temp_dir();
        let sink = RecordingSink::default();
        let config = BenchmarkConfig {
            occurrences: 1_000_000,
            ..BenchmarkConfig::with_sizes(vec![1])
        };
        let fixture = dir.path().join("testData.txt");
        let mut runner = BenchmarkRunner::new(
            config,
            default_single_result_group(),
            default_multi_result_group(),
            sink.clone(),
        );

        let result = runner.run(&prefix_in(&dir), &fixture);

        assert!(matches!(result, Err(BenchError::InvalidWorkload { .. })));
        assert!(sink.events().is_empty());
        assert!(!fixture.exists());
    }

    #[test]
    fn test_empty_size_list_succeeds() {
        let dir = create_temp_dir();
        let sink = RecordingSink::default();
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(Vec::new()),
            default_single_result_group(),
            default_multi_result_group(),
            sink.clone(),
        );

        let result = runner.run(&prefix_in(&dir), dir.path().join("testData.txt"));

        let summary = result.expect("An empty size list should succeed");
        assert!(summary.sizes.is_empty());
        assert!(sink.events().is_empty());
        assert!(!dir.path().join("testData.txt").exists());
    }

    #[test]
    fn test_empty_groups_still_produce_artifacts() {
        let dir = create_temp_dir();
        let prefix = prefix_in(&dir);
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1]),
            SingleResultGroup::single_result(),
            MultiResultGroup::multi_result(),
            TraceFileProfiler::new(),
        );

        let summary = runner.run(&prefix, dir.path().join("testData.txt")).expect("Run failed");

        assert!(summary.sizes[0].timings.is_empty());
        let trace = TraceFile::load(&output_path_for(&prefix, 1)).expect("Failed to load trace");
        assert!(trace.trace_events.is_empty());
    }

    #[test]
    fn test_close_removes_fixture() {
        let dir = create_temp_dir();
        let fixture = dir.path().join("testData.txt");
        let mut runner = BenchmarkRunner::new(
            BenchmarkConfig::with_sizes(vec![1]),
            default_single_result_group(),
            default_multi_result_group(),
            TraceFileProfiler::new(),
        );
        runner.run(&prefix_in(&dir), &fixture).expect("Benchmark run failed");
        assert!(fixture.exists());

        assert_eq!(runner.close(), CleanupOutcome::Removed(fixture.clone()));
        assert!(!fixture.exists());
    }

    #[test]
    fn test_close_reports_missing_fixture() {
        let dir = create_temp_dir();
        let fixture = dir.path().join("testData.txt");
        let runners: Vec<_> = (0..2)
            .map(|_| {
                let mut runner = BenchmarkRunner::new(
                    BenchmarkConfig::with_sizes(vec![1]),
                    default_single_result_group(),
                    default_multi_result_group(),
                    TraceFileProfiler::new(),
                );
                runner.run(&prefix_in(&dir), &fixture).expect("Benchmark run failed");
                runner
            })
            .collect();

        let outcomes: Vec<CleanupOutcome> = runners.into_iter().map(|r| r.close()).collect();
        assert_eq!(
            outcomes,
            vec![
                CleanupOutcome::Removed(fixture.clone()),
                CleanupOutcome::NotPresent(fixture.clone())
            ]
        );
    }

    #[test]
    fn test_close_without_run() {
        let runner = BenchmarkRunner::new(
            BenchmarkConfig::default(),
            default_single_result_group(),
            default_multi_result_group(),
            TraceFileProfiler::new(),
        );
        assert_eq!(runner.close(), CleanupOutcome::NothingToClean);
    }
}
