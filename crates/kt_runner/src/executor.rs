//! Client process executor.
//!
//! Spawns a command line client with an explicit working directory and
//! environment, streams its stdout and stderr line by line while it runs,
//! and enforces the configured timeout.

use std::collections::BTreeMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::error::{RunnerError, RunnerResult};

/// Output line from a running command.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: chrono::DateTime<Utc>,
    pub stream: LogStream,
    pub message: String,
}

/// Log stream type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    Stdout,
    Stderr,
}

impl std::fmt::Display for LogStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

/// Log handler callback type.
pub type LogHandler = Arc<dyn Fn(LogLine) + Send + Sync>;

/// Executes command text against one client program.
#[derive(Clone)]
pub struct CommandExecutor {
    program: String,
    env: BTreeMap<String, String>,
    removed_env: Vec<String>,
    log_handler: Option<LogHandler>,
}

impl CommandExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            env: BTreeMap::new(),
            removed_env: Vec::new(),
            log_handler: None,
        }
    }

    /// Executor for the Terraform client: non-interactive, locale independent.
    pub fn terraform(client: impl Into<String>) -> Self {
        Self::new(client)
            .with_env("TF_IN_AUTOMATION", "true")
            .without_env("LC_ALL")
    }

    /// Set an environment variable for every execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Remove an inherited environment variable for every execution.
    pub fn without_env(mut self, key: impl Into<String>) -> Self {
        self.removed_env.push(key.into());
        self
    }

    /// Set a log handler for streaming output.
    pub fn with_log_handler(mut self, handler: LogHandler) -> Self {
        self.log_handler = Some(handler);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Format the full command line for logging and errors.
    pub fn format_command(&self, command_text: &str) -> String {
        if command_text.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, command_text)
        }
    }

    /// Run `command_text` to completion and return its stdout.
    pub async fn execute(&self, command_text: &str, config: &RunConfig) -> RunnerResult<String> {
        let full_command = self.format_command(command_text);
        let args = shell_words::split(command_text).map_err(|e| RunnerError::InvalidCommand {
            command: full_command.clone(),
            message: e.to_string(),
        })?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .current_dir(&config.directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for key in &self.removed_env {
            cmd.env_remove(key);
        }
        cmd.envs(&self.env).envs(&config.env);

        debug!("Executing: {} in {:?}", full_command, config.directory);

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            command: full_command.clone(),
            source,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| RunnerError::Io {
            command: full_command.clone(),
            source: std::io::Error::other("stdout was not captured"),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| RunnerError::Io {
            command: full_command.clone(),
            source: std::io::Error::other("stderr was not captured"),
        })?;

        let stdout_task = tokio::spawn(collect_lines(
            stdout,
            LogStream::Stdout,
            config.stream_logs,
            self.log_handler.clone(),
        ));
        let stderr_task = tokio::spawn(collect_lines(
            stderr,
            LogStream::Stderr,
            config.stream_logs,
            self.log_handler.clone(),
        ));

        // Wait for completion with timeout
        let status = if config.timeout_seconds > 0 {
            let timeout = Duration::from_secs(config.timeout_seconds);
            let waited = tokio::time::timeout(timeout, child.wait()).await;
            match waited {
                Ok(result) => result.map_err(|source| RunnerError::Io {
                    command: full_command.clone(),
                    source,
                })?,
                Err(_) => {
                    let _ = child.kill().await;
                    stdout_task.abort();
                    stderr_task.abort();
                    error!(
                        "{} timed out after {} seconds",
                        full_command, config.timeout_seconds
                    );
                    return Err(RunnerError::Timeout {
                        command: full_command,
                        seconds: config.timeout_seconds,
                    });
                }
            }
        } else {
            child.wait().await.map_err(|source| RunnerError::Io {
                command: full_command.clone(),
                source,
            })?
        };

        let stdout_output = stdout_task.await.unwrap_or_default();
        let stderr_output = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            error!("{} failed with exit code {}", full_command, code);
            return Err(RunnerError::NonZeroExit {
                command: full_command,
                code,
                output: combined_output(&stdout_output, &stderr_output),
            });
        }

        Ok(stdout_output)
    }
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("program", &self.program)
            .field("env", &self.env)
            .field("removed_env", &self.removed_env)
            .field("log_handler", &self.log_handler.is_some())
            .finish()
    }
}

async fn collect_lines<R>(
    reader: R,
    stream: LogStream,
    stream_logs: bool,
    log_handler: Option<LogHandler>,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut output = String::new();

    // Lines are decoded lossily so the pipe is always drained to EOF.
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Stopped reading {}: {}", stream, e);
                break;
            }
        }
        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        if stream_logs {
            info!(target: "kt_runner::output", %stream, "{}", line);
            if let Some(handler) = &log_handler {
                handler(LogLine {
                    timestamp: Utc::now(),
                    stream,
                    message: line.clone(),
                });
            }
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

fn combined_output(stdout: &str, stderr: &str) -> String {
    if stdout.is_empty() {
        stderr.to_string()
    } else if stderr.is_empty() {
        stdout.to_string()
    } else {
        format!("{}\n{}", stdout, stderr)
    }
}
