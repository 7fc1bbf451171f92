//! Reachability checks through the system `ping` utility.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use crate::utils::logging::log_timeout;

/// Echo requests sent per check.
pub const PING_COUNT: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingOutcome {
    /// Ping exited successfully; holds the round-trip summary line.
    Reachable(String),
    /// Ping ran but reported failure (unknown host, no replies).
    Unreachable,
    /// Ping could not be run or did not finish in time.
    Failed(String),
}

impl PingOutcome {
    pub fn to_message(&self, address: &str) -> String {
        match self {
            PingOutcome::Reachable(summary) => format!("Resultado do ping: {summary}"),
            PingOutcome::Unreachable => format!("Não foi possível fazer ping para {address}"),
            PingOutcome::Failed(detail) => format!("Erro ao verificar ping: {detail}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PingChecker {
    program: String,
    timeout: Duration,
}

impl PingChecker {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("ping", timeout)
    }

    /// Uses `program` in place of the system `ping`, keeping the same arguments.
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `<program> -c 4 <address>`. The address is passed as a single
    /// argument, never through a shell; the child is killed if the timeout
    /// elapses first.
    pub async fn check(&self, address: &str) -> PingOutcome {
        let child = Command::new(&self.program)
            .arg("-c")
            .arg(PING_COUNT.to_string())
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::error!("Failed to start {}: {}", self.program, e);
                return PingOutcome::Failed(e.to_string());
            }
        };

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::error!("Failed to read {} output: {}", self.program, e);
                return PingOutcome::Failed(e.to_string());
            }
            Err(_) => {
                log_timeout("ping", self.timeout.as_secs(), Some(address));
                return PingOutcome::Failed(format!(
                    "tempo limite de {}s excedido",
                    self.timeout.as_secs()
                ));
            }
        };

        if !output.status.success() {
            tracing::debug!("{} {} exited with {}", self.program, address, output.status);
            return PingOutcome::Unreachable;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let summary = last_non_empty_line(&stdout).unwrap_or_default().to_string();
        PingOutcome::Reachable(summary)
    }
}

/// The last line with visible content; for ping this is the rtt summary.
pub fn last_non_empty_line(output: &str) -> Option<&str> {
    output
        .lines()
        .rev()
        .map(str::trim_end)
        .find(|line| !line.trim().is_empty())
}
