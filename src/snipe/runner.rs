//! Batch runner - drive the generator through a probe with fixed pacing

use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use super::generator::UsernameGenerator;
use crate::error::{Result, UsernameForgeError};
use crate::fragment::UsernameProbe;
use crate::types::{CheckResult, RunConfig, RunSummary};

/// Pause hook between checks
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Pacer backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[derive(Debug, Default)]
struct StopInner {
    flag: AtomicBool,
    notify: Notify,
}

/// Cooperative interruption flag shared with whoever wants to stop the run
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<StopInner>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.flag.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.0.flag.load(Ordering::SeqCst)
    }

    /// Resolves once `trigger` has been called, including before this was awaited
    pub async fn triggered(&self) {
        let notified = self.0.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent trigger is not lost
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

/// Raise `stop` on the first interrupt; returns `true` once a second one arrives.
///
/// `next_interrupt` resolves to `false` when no further interrupts can be received.
pub async fn watch_interrupts<F, Fut>(stop: StopSignal, mut next_interrupt: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    if !next_interrupt().await {
        return false;
    }
    tracing::info!("Received interrupt, stopping after the current check");
    stop.trigger();

    next_interrupt().await
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    LimitReached,
    Exhausted,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Stopped(StopReason),
}

/// Sequential batch runner: one username in flight at a time
pub struct BatchRunner<P, S> {
    generator: UsernameGenerator,
    probe: P,
    pacer: S,
    config: RunConfig,
    stop: StopSignal,
    state: RunnerState,
}

impl<P, S> BatchRunner<P, S>
where
    P: UsernameProbe,
    S: Pacer,
{
    pub fn new(generator: UsernameGenerator, probe: P, pacer: S, config: RunConfig) -> Self {
        Self {
            generator,
            probe,
            pacer,
            config,
            stop: StopSignal::new(),
            state: RunnerState::Idle,
        }
    }

    /// Handle that interrupts the run; an in-flight check completes, a pause is cut short
    pub fn stop_handle(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Run one batch, writing the per-username log and summary to `out`
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        if self.state != RunnerState::Idle {
            return Err(UsernameForgeError::runner(format!(
                "batch runner cannot start from state {:?}",
                self.state
            )));
        }
        self.state = RunnerState::Running;

        writeln!(out, "Starting username availability check...")?;
        writeln!(
            out,
            "Note: This may take a very long time as there are {}^{} = {} possible {}-character usernames",
            self.generator.charset().chars().len(),
            self.generator.length(),
            format_thousands(self.generator.total()),
            self.generator.length()
        )?;
        writeln!(out, "Press Ctrl+C to stop at any time\n")?;

        tracing::info!(
            max_usernames = self.config.max_usernames,
            delay_ms = self.config.delay.as_millis() as u64,
            "Batch started"
        );

        let mut summary = RunSummary::new();
        let reason = loop {
            if self.stop.is_triggered() {
                break StopReason::Interrupted;
            }
            if summary.checked >= self.config.max_usernames {
                break StopReason::LimitReached;
            }
            let Some(username) = self.generator.next() else {
                break StopReason::Exhausted;
            };

            let result = self.probe.check(&username).await;
            log_line(out, &username, &result)?;
            summary.record(&result);

            if let CheckResult::Unknown(message) = &result {
                tracing::debug!(username = %username, error = %message, "Check inconclusive");
            }

            // An interrupt raised while the request was in flight takes effect now
            if self.stop.is_triggered() {
                break StopReason::Interrupted;
            }

            tokio::select! {
                _ = self.pacer.pause(self.config.delay) => {}
                _ = self.stop.triggered() => {}
            }
        };

        self.state = RunnerState::Stopped(reason);
        summary.interrupted = reason == StopReason::Interrupted;
        summary.finished_at = Some(Utc::now());

        if summary.interrupted {
            writeln!(out, "\n\nProcess interrupted by user.")?;
        }
        write_summary(out, &summary)?;

        tracing::info!(
            reason = ?reason,
            checked = summary.checked,
            available = summary.available,
            taken = summary.taken,
            unknown = summary.unknown,
            elapsed_ms = summary.elapsed().num_milliseconds(),
            "Batch stopped"
        );

        Ok(summary)
    }
}

fn log_line<W: Write>(out: &mut W, username: &str, result: &CheckResult) -> Result<()> {
    writeln!(out, "[{}] @{} - {}", result.tag(), username, result.message())?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
    writeln!(out, "\nSummary:")?;
    writeln!(out, "Total checked: {}", summary.checked)?;
    writeln!(out, "Available: {}", summary.available)?;
    writeln!(out, "Taken: {}", summary.taken)?;
    out.flush()?;
    Ok(())
}

fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
