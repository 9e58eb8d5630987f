//! Executor tests against a real shell.

use std::sync::Arc;

use kt_runner::{CommandExecutor, LogLine, LogStream, RunConfig, RunnerError};
use parking_lot::Mutex;
use tempfile::tempdir;

fn shell() -> CommandExecutor {
    CommandExecutor::terraform("sh")
}

#[tokio::test]
async fn test_returns_stdout() {
    let dir = tempdir().unwrap();
    let output = shell()
        .execute("-c \"echo hello\"", &RunConfig::new(dir.path()))
        .await
        .unwrap();

    assert_eq!(output, "hello\n");
}

#[tokio::test]
async fn test_runs_in_working_directory() {
    let dir = tempdir().unwrap();
    let output = shell()
        .execute("-c pwd", &RunConfig::new(dir.path()))
        .await
        .unwrap();

    assert_eq!(
        output.trim(),
        dir.path().canonicalize().unwrap().to_string_lossy()
    );
}

#[tokio::test]
async fn test_automation_environment() {
    let dir = tempdir().unwrap();
    let config = RunConfig::new(dir.path()).env("KT_EXTRA", "merged");

    let output = shell()
        .execute(
            "-c 'echo $TF_IN_AUTOMATION ${LC_ALL:-unset} $KT_EXTRA'",
            &config,
        )
        .await
        .unwrap();

    assert_eq!(output, "true unset merged\n");
}

#[tokio::test]
async fn test_nonzero_exit_carries_command_and_output() {
    let dir = tempdir().unwrap();
    let error = shell()
        .execute("-c 'echo boom >&2; exit 3'", &RunConfig::new(dir.path()))
        .await
        .unwrap_err();

    match &error {
        RunnerError::NonZeroExit {
            command,
            code,
            output,
        } => {
            assert_eq!(command, "sh -c 'echo boom >&2; exit 3'");
            assert_eq!(*code, 3);
            assert!(output.contains("boom"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_kills_the_process() {
    let dir = tempdir().unwrap();
    let config = RunConfig::new(dir.path()).timeout(1);

    let error = shell().execute("-c 'sleep 10'", &config).await.unwrap_err();

    assert!(matches!(error, RunnerError::Timeout { seconds: 1, .. }));
}

#[tokio::test]
async fn test_missing_executable() {
    let dir = tempdir().unwrap();
    let executor = CommandExecutor::terraform("kt-missing-terraform-client");

    let error = executor
        .execute("version", &RunConfig::new(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(error, RunnerError::Spawn { .. }));
    assert_eq!(error.command(), "kt-missing-terraform-client version");
}

#[tokio::test]
async fn test_unbalanced_quotes_are_rejected() {
    let dir = tempdir().unwrap();
    let error = shell()
        .execute("-c \"echo", &RunConfig::new(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(error, RunnerError::InvalidCommand { .. }));
}

#[tokio::test]
async fn test_invalid_utf8_output_is_read_to_the_end() {
    let dir = tempdir().unwrap();
    let config = RunConfig::new(dir.path()).timeout(20).stream_logs(false);

    let output = shell()
        .execute(
            r#"-c 'printf "caf\351\n"; i=0; while [ $i -lt 20000 ]; do echo "line $i"; i=$((i+1)); done; echo done'"#,
            &config,
        )
        .await
        .unwrap();

    assert!(output.starts_with("caf\u{FFFD}\n"));
    assert!(output.contains("line 19999\n"));
    assert!(output.ends_with("done\n"));
    assert_eq!(output.lines().count(), 20002);
}

#[tokio::test]
async fn test_log_handler_receives_both_streams() {
    let dir = tempdir().unwrap();
    let lines: Arc<Mutex<Vec<LogLine>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let executor = shell().with_log_handler(Arc::new(move |line| sink.lock().push(line)));

    let output = executor
        .execute("-c 'echo out; echo err >&2'", &RunConfig::new(dir.path()))
        .await
        .unwrap();

    assert_eq!(output, "out\n");
    let lines = lines.lock();
    assert!(lines
        .iter()
        .any(|l| l.stream == LogStream::Stdout && l.message == "out"));
    assert!(lines
        .iter()
        .any(|l| l.stream == LogStream::Stderr && l.message == "err"));
}

#[tokio::test]
async fn test_streaming_can_be_disabled() {
    let dir = tempdir().unwrap();
    let lines: Arc<Mutex<Vec<LogLine>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let executor = shell().with_log_handler(Arc::new(move |line| sink.lock().push(line)));

    executor
        .execute(
            "-c 'echo quiet'",
            &RunConfig::new(dir.path()).stream_logs(false),
        )
        .await
        .unwrap();

    assert!(lines.lock().is_empty());
}
