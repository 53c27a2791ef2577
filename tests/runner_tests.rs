#![cfg(unix)]

use curl_trace_plot::runner::{RunIdentity, TraceCollector};
use curl_trace_plot::utils::RunnerError;
use std::path::{Path, PathBuf};

/// Collector stand-in: writes a tiny trace to `$2` and records each call
const FAKE_TRACE_SH: &str = r#"
if [ "$#" -ne 2 ]; then exit 64; fi
echo "$1 $2" >> "$(dirname "$0")/calls.txt"
printf '10:00:00.000000 == Info: Connected\n10:00:00.500000 <= Recv data, 1024 bytes\n' > "$2"
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.txt"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_run_writes_log_at_derived_path() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "trace.sh", FAKE_TRACE_SH);
    let collector = TraceCollector::new(script).with_trace_dir(dir.path().join("traces"));

    let log = collector.run(&RunIdentity::new("1M.bin", 7)).unwrap();

    assert_eq!(log, dir.path().join("traces").join("1M.bin_7.log"));
    assert!(log.is_file());
}

#[test]
fn test_collect_runs_sequentially_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "trace.sh", FAKE_TRACE_SH);
    let trace_dir = dir.path().join("traces");
    let collector = TraceCollector::new(script).with_trace_dir(&trace_dir);

    let logs = collector.collect("1K.bin", 3).unwrap();

    let names: Vec<_> = logs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["1K.bin_1.log", "1K.bin_2.log", "1K.bin_3.log"]);

    let recorded = calls(dir.path());
    assert_eq!(recorded.len(), 3);
    for (i, call) in recorded.iter().enumerate() {
        let expected = trace_dir.join(format!("1K.bin_{}.log", i + 1));
        assert_eq!(call, &format!("1K.bin {}", expected.display()));
    }
}

#[test]
fn test_failure_aborts_remaining_runs() {
    let dir = tempfile::tempdir().unwrap();
    // Succeeds once, then fails on the second call
    let body = format!(
        "{}\nif [ \"$(wc -l < \"$(dirname \"$0\")/calls.txt\")\" -ge 2 ]; then exit 3; fi\n",
        FAKE_TRACE_SH
    );
    let script = write_script(dir.path(), "trace.sh", &body);
    let trace_dir = dir.path().join("traces");
    let collector = TraceCollector::new(script).with_trace_dir(&trace_dir);

    let err = collector.collect("1G.bin", 5).unwrap_err();

    match err {
        RunnerError::CollectorFailed { run, status } => {
            assert_eq!(run, 2);
            assert_eq!(status.code(), Some(3));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls(dir.path()).len(), 2);
    // The successful first log stays in place
    assert!(trace_dir.join("1G.bin_1.log").is_file());
    assert!(!trace_dir.join("1G.bin_3.log").exists());
}

#[test]
fn test_disallowed_file_never_invokes_collector() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "trace.sh", FAKE_TRACE_SH);
    let collector = TraceCollector::new(script).with_trace_dir(dir.path().join("traces"));

    let err = collector.collect("evil.bin", 2).unwrap_err();

    assert!(matches!(err, RunnerError::DisallowedFile { .. }));
    assert!(calls(dir.path()).is_empty());
    assert!(!dir.path().join("traces").exists());
}

#[test]
fn test_missing_shell_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "trace.sh", FAKE_TRACE_SH);
    let collector = TraceCollector::new(script)
        .with_trace_dir(dir.path().join("traces"))
        .with_shell("no-such-shell-for-tests");

    let err = collector.run(&RunIdentity::new("1K.bin", 1)).unwrap_err();
    assert!(matches!(err, RunnerError::Spawn(_)));
}
