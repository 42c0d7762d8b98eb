use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use fingerprint_core::ProbeSettings;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("{program} not found — install bundler with: gem install bundler")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("command output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("command timed out after {}s: {args:?}", timeout.as_secs())]
    TimedOut { args: Vec<String>, timeout: Duration },
}

impl RunnerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

/// Abstraction over bundler execution for testability.
///
/// Production code uses [`RealRunner`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandRunner: Send + Sync {
    /// Run a command in `dir` and capture stdout.
    async fn exec(&self, dir: &Path, args: &[String]) -> Result<String, RunnerError>;

    /// Run a command in `dir`, discarding output; succeeds on a zero exit status.
    async fn exec_check(&self, dir: &Path, args: &[String]) -> Result<(), RunnerError>;
}

/// Runs the configured bundler executable, bounded by a timeout.
pub struct RealRunner {
    program: String,
    timeout: Duration,
}

impl RealRunner {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &ProbeSettings) -> Self {
        Self::new(
            settings.bundler.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    async fn output(&self, dir: &Path, args: &[String]) -> Result<std::process::Output, RunnerError> {
        tracing::debug!(program = %self.program, ?args, dir = %dir.display(), "running");

        let child = tokio::process::Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Ok(result) => result.map_err(|e| RunnerError::NotFound {
                program: self.program.clone(),
                source: e,
            }),
            Err(_elapsed) => Err(RunnerError::TimedOut {
                args: args.to_vec(),
                timeout: self.timeout,
            }),
        }
    }
}

impl CommandRunner for RealRunner {
    async fn exec(&self, dir: &Path, args: &[String]) -> Result<String, RunnerError> {
        let output = self.output(dir, args).await?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| RunnerError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(RunnerError::CommandFailed {
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_check(&self, dir: &Path, args: &[String]) -> Result<(), RunnerError> {
        let output = self.output(dir, args).await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(RunnerError::CommandFailed {
                args: args.to_vec(),
                stderr: format!("exit code: {}", output.status),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| (*s).to_owned()).collect()
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let runner = RealRunner::new("sleep", Duration::from_millis(100));
        let started = std::time::Instant::now();

        let err = runner
            .exec(&std::env::temp_dir(), &args(&["5"]))
            .await
            .unwrap_err();

        assert!(err.is_timeout(), "unexpected error: {err}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let runner = RealRunner::new("definitely-not-bundler-xyz", Duration::from_secs(5));

        let err = runner
            .exec_check(&std::env::temp_dir(), &args(&["version"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::NotFound { ref program, .. } if program == "definitely-not-bundler-xyz"));
    }

    #[tokio::test]
    async fn non_zero_exit_is_command_failed() {
        let runner = RealRunner::new("false", Duration::from_secs(5));

        let err = runner
            .exec(&std::env::temp_dir(), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn stdout_is_captured() {
        let runner = RealRunner::new("echo", Duration::from_secs(5));

        let output = runner
            .exec(&std::env::temp_dir(), &args(&["ruby 2.3.0p0"]))
            .await
            .unwrap();

        assert_eq!(output, "ruby 2.3.0p0\n");
    }
}
