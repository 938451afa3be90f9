use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use log::info;
use serde::Serialize;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use super::state::{CountdownState, CountdownStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownSnapshot {
    pub status: CountdownStatus,
    pub seconds_remaining: u32,
}

impl From<CountdownState> for CountdownSnapshot {
    fn from(state: CountdownState) -> Self {
        Self {
            status: state.status,
            seconds_remaining: state.seconds_remaining,
        }
    }
}

/// Async countdown driver: owns the shared state machine and the one-second
/// ticker task, and publishes a snapshot on every transition.
///
/// At most one ticker runs per instance: `start`, `reset`, and `resume` all
/// abort any previously scheduled ticker before spawning a new one, so two
/// concurrent countdowns cannot burn down the same state.
#[derive(Clone)]
pub struct CountdownTimer {
    state: Arc<Mutex<CountdownState>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
    events: watch::Sender<CountdownSnapshot>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        let state = CountdownState::new();
        let (events, _) = watch::channel(CountdownSnapshot::from(state));
        Self {
            state: Arc::new(Mutex::new(state)),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
            events,
        }
    }

    pub async fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot::from(*self.state.lock().await)
    }

    /// Every transition (including each tick) lands on this channel; the
    /// Expired snapshot appears exactly once per countdown.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.events.subscribe()
    }

    pub async fn start(&self, duration: u32) -> Result<()> {
        {
            let mut guard = self.state.lock().await;
            if !guard.start(duration) {
                bail!("countdown already active");
            }
        }
        self.spawn_ticker().await;
        self.publish().await;
        Ok(())
    }

    pub async fn reset(&self, duration: u32) {
        self.state.lock().await.reset(duration);
        self.spawn_ticker().await;
        self.publish().await;
    }

    pub async fn pause(&self) {
        // The ticker notices the state change on its next tick and exits.
        let paused = self.state.lock().await.pause();
        if paused {
            self.publish().await;
        }
    }

    pub async fn resume(&self) {
        let resumed = self.state.lock().await.resume();
        if resumed {
            self.spawn_ticker().await;
            self.publish().await;
        }
    }

    /// Cancels the ticker and returns the state machine to Idle. Used when a
    /// session goes terminal and the countdown stops for good.
    pub async fn stop(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
        self.state.lock().await.clear();
        self.publish().await;
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let events = self.events.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            // First tick one full interval out; `interval` would fire
            // immediately and eat a second at spawn time.
            let mut interval =
                time::interval_at(time::Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;

                let (snapshot, expired) = {
                    let mut guard = state.lock().await;
                    if guard.status != CountdownStatus::Running {
                        break;
                    }
                    let expired = guard.tick();
                    (CountdownSnapshot::from(*guard), expired)
                };

                let _ = events.send(snapshot);

                if expired {
                    info!("countdown expired");
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn publish(&self) {
        let snapshot = CountdownSnapshot::from(*self.state.lock().await);
        let _ = self.events.send(snapshot);
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
