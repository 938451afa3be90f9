use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use log::info;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    config::SessionConfig,
    models::session::{SessionState, SessionStatus, StretchSession},
    source::PoseSource,
    timer::CountdownTimer,
};

use super::{loop_worker::session_loop, status::StatusFrame};

/// Owns one session at a time: spawns the poll loop, hands out status
/// subscriptions, and turns the final loop state into a session summary.
pub struct SessionController {
    handle: Option<JoinHandle<SessionState>>,
    cancel_token: Option<CancellationToken>,
    record: Option<StretchSession>,
    timer: CountdownTimer,
    status_tx: watch::Sender<StatusFrame>,
    status_rx: watch::Receiver<StatusFrame>,
}

impl SessionController {
    pub fn new() -> Self {
        let (status_tx, status_rx) = watch::channel(StatusFrame::idle());
        Self {
            handle: None,
            cancel_token: None,
            record: None,
            timer: CountdownTimer::new(),
            status_tx,
            status_rx,
        }
    }

    pub fn start<S: PoseSource>(&mut self, source: S, config: SessionConfig) -> Result<()> {
        if self.handle.is_some() {
            bail!("session already active");
        }

        let record = StretchSession::begin();
        info!("starting stretch session {}", record.id);

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(session_loop(
            source,
            config,
            self.timer.clone(),
            self.status_tx.clone(),
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.record = Some(record);
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusFrame> {
        self.status_rx.clone()
    }

    pub fn timer(&self) -> CountdownTimer {
        self.timer.clone()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancels the loop if it is still polling, joins it, and returns the
    /// session summary. A session that reached its completion target reports
    /// Completed; anything cut short reports Cancelled.
    pub async fn stop(&mut self) -> Result<Option<StretchSession>> {
        let Some(handle) = self.handle.take() else {
            return Ok(None);
        };
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        let final_state = handle.await.context("session loop task failed to join")?;
        self.timer.stop().await;

        let mut record = self
            .record
            .take()
            .ok_or_else(|| anyhow!("missing session record"))?;
        record.completed_at = Some(Utc::now());
        record.stretches_completed = final_state.completed_count;
        record.status = if final_state.done {
            SessionStatus::Completed
        } else {
            SessionStatus::Cancelled
        };

        info!(
            "session {} finished: {} ({} stretches)",
            record.id,
            record.status.as_str(),
            record.stretches_completed
        );

        Ok(Some(record))
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
