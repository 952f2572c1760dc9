// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns a provider's CLI as a child process, pumps its stdout through the
//! provider's parser onto bounded channels, and exposes cancellation and
//! lifecycle status.

use crate::error::SupervisorError;
use crate::provider::{ParsedEvent, Provider};
use crate::spawn_config::SpawnConfig;
use crate::status::{StatusCell, SupervisorStatus};
use foreman_core::OutputEvent;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const EVENTS_CAPACITY: usize = 100;
const ERRORS_CAPACITY: usize = 10;

/// One running (or finished) provider subprocess. `Events()`/`Errors()` are
/// exposed as receivers rather than a single combined stream, matching the
/// dual-channel contract: a full events channel drops the event and posts
/// an error, never blocks the pump.
pub struct Supervisor {
    status: Arc<StatusCell>,
    session_ref: Arc<Mutex<Option<String>>>,
    events: mpsc::Receiver<OutputEvent>,
    errors: mpsc::Receiver<SupervisorError>,
    pid: Option<i32>,
    grace_period: Duration,
    cancel_token: CancellationToken,
    run: JoinHandle<()>,
}

impl Supervisor {
    /// Resolve the provider's executable, merge its MCP config if present,
    /// spawn the child, and start pumping its stdout.
    pub async fn spawn(provider: Arc<dyn Provider>, cfg: SpawnConfig) -> Result<Self, SupervisorError> {
        let executable = crate::executable::discover(provider.name(), provider.name(), provider.known_paths())?;

        if let (Some(subdir), Some(mcp_config)) = (provider.mcp_config_subdir(), cfg.mcp_config.as_ref()) {
            crate::mcp_config::merge(&cfg.work_dir, subdir, mcp_config)
                .map_err(|e| SupervisorError::SpawnFailed(e.to_string()))?;
        }

        let argv = provider.build_argv(&cfg);
        let mut command = Command::new(executable);
        command
            .args(&argv)
            .current_dir(&cfg.work_dir)
            .envs(&cfg.extra_env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| SupervisorError::SpawnFailed(e.to_string()))?;
        let pid = child.id().map(|id| id as i32);
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SupervisorError::SpawnFailed("stdout not piped".to_string()))?;

        let status = Arc::new(StatusCell::default());
        status.set(SupervisorStatus::Running);
        let session_ref: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let cancel_token = CancellationToken::new();
        let grace_period = provider.kill_grace_period();

        let (events_tx, events_rx) = mpsc::channel(EVENTS_CAPACITY);
        let (errors_tx, errors_rx) = mpsc::channel(ERRORS_CAPACITY);

        if let Some(timeout) = cfg.timeout {
            let timeout_status = status.clone();
            let timeout_cancel_token = cancel_token.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => {
                        do_cancel(&timeout_status, pid, grace_period, &timeout_cancel_token);
                    }
                    _ = timeout_cancel_token.cancelled() => {}
                }
            });
        }

        let run_status = status.clone();
        let run_session_ref = session_ref.clone();
        let run_cancel_token = cancel_token.clone();
        let run = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        handle_line(&provider, line.into_bytes(), &run_session_ref, &events_tx, &errors_tx);
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = errors_tx.try_send(SupervisorError::Transport(e.to_string()));
                        break;
                    }
                }
            }
            drop(events_tx);

            let exit = child.wait().await;
            let cancelled = run_cancel_token.is_cancelled();
            match exit {
                Ok(code) if cancelled => {
                    tracing::debug!(?code, "supervised process exited after cancellation");
                }
                Ok(code) if code.success() => {
                    run_status.set(SupervisorStatus::Completed);
                }
                Ok(code) => {
                    run_status.set(SupervisorStatus::Failed);
                    let _ = errors_tx.try_send(SupervisorError::SubprocessFatal(format!("exit status {code}")));
                }
                Err(e) => {
                    run_status.set(SupervisorStatus::Failed);
                    let _ = errors_tx.try_send(SupervisorError::SubprocessFatal(e.to_string()));
                }
            }
            drop(errors_tx);
        });

        Ok(Self {
            status,
            session_ref,
            events: events_rx,
            errors: errors_rx,
            pid,
            grace_period,
            cancel_token,
            run,
        })
    }

    pub fn status(&self) -> SupervisorStatus {
        self.status.get()
    }

    pub fn session_ref(&self) -> Option<String> {
        self.session_ref.lock().clone()
    }

    /// The receive half of the `OutputEvent` channel (buffer 100).
    pub fn events(&mut self) -> &mut mpsc::Receiver<OutputEvent> {
        &mut self.events
    }

    /// The receive half of the error channel (buffer 10).
    pub fn errors(&mut self) -> &mut mpsc::Receiver<SupervisorError> {
        &mut self.errors
    }

    /// Idempotent: sets status to `cancelled` unless already terminal, then
    /// sends SIGTERM immediately and SIGKILL after the provider's grace
    /// period. Signal delivery is best-effort.
    pub fn cancel(&self) {
        do_cancel(&self.status, self.pid, self.grace_period, &self.cancel_token);
    }

    /// Blocks until the pump and child process have both terminated.
    pub async fn wait(&mut self) -> Result<(), tokio::task::JoinError> {
        (&mut self.run).await
    }
}

fn handle_line(
    provider: &Arc<dyn Provider>,
    raw: Vec<u8>,
    session_ref: &Mutex<Option<String>>,
    events_tx: &mpsc::Sender<OutputEvent>,
    errors_tx: &mpsc::Sender<SupervisorError>,
) {
    let parser = provider.parser();
    match parser.parse(&raw) {
        Ok(ParsedEvent::Event(event)) => {
            if event.event_type == "system" && event.subtype.as_deref() == Some("init") {
                if let Some(session_id) = parser.extract_session_ref(&event, &raw) {
                    *session_ref.lock() = Some(session_id);
                }
            }
            if events_tx.try_send(event).is_err() {
                let _ = errors_tx.try_send(SupervisorError::Transport("events channel full, event dropped".to_string()));
            }
        }
        Ok(ParsedEvent::Skip) => {}
        Err(parse_error) => {
            let _ = errors_tx.try_send(SupervisorError::Transport(parse_error.0));
        }
    }
}

fn do_cancel(status: &StatusCell, pid: Option<i32>, grace_period: Duration, cancel_token: &CancellationToken) {
    if !status.set(SupervisorStatus::Cancelled) {
        return;
    }
    cancel_token.cancel();
    let Some(pid) = pid else { return };
    send_signal(pid, Signal::SIGTERM);
    tokio::spawn(async move {
        tokio::time::sleep(grace_period).await;
        send_signal(pid, Signal::SIGKILL);
    });
}

fn send_signal(pid: i32, sig: Signal) {
    let _ = signal::kill(Pid::from_raw(pid), sig);
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
