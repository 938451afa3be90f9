use log::{info, warn};
use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    config::SessionConfig,
    models::session::SessionState,
    source::PoseSource,
    stretch::{classify, StretchSequencer},
    timer::{CountdownStatus, CountdownTimer},
};

use super::status::StatusFrame;

/// Drives one session: polls the pose source on a fixed cadence, gates the
/// countdown on classification, and advances the rotation on expiry.
///
/// Polling never overlaps: each estimation call is awaited (with a budget)
/// before the next tick, and `MissedTickBehavior::Delay` drops ticks missed
/// under slow inference instead of queueing a backlog.
pub async fn session_loop<S: PoseSource>(
    mut source: S,
    config: SessionConfig,
    timer: CountdownTimer,
    status_tx: watch::Sender<StatusFrame>,
    cancel_token: CancellationToken,
) -> SessionState {
    let mut sequencer = StretchSequencer::new(config.start);
    let mut state = SessionState::new(sequencer.current_index(), config.countdown_secs);

    // The countdown stays Idle until the stretch is first seen held; a
    // session with no usable pose cannot progress past "no stretch
    // detected".
    let mut ticker = time::interval(Duration::from_millis(config.poll_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let budget = Duration::from_millis(config.poll_budget_ms);
                let usable_pose = match time::timeout(budget, source.estimate()).await {
                    Ok(Ok(pose)) if pose.is_usable(config.min_pose_confidence) => Some(pose),
                    // Low confidence: no classification this poll, timer and
                    // sequencer stay untouched.
                    Ok(Ok(_)) => None,
                    Ok(Err(err)) => {
                        warn!("pose estimation failed: {err:?}");
                        None
                    }
                    Err(_) => {
                        warn!(
                            "pose estimation exceeded {}ms budget, dropping frame",
                            config.poll_budget_ms
                        );
                        None
                    }
                };

                if let Some(pose) = &usable_pose {
                    if classify(sequencer.current_kind(), pose, &config.thresholds) {
                        // Stretch held: open the countdown, or let a paused
                        // one proceed.
                        match timer.snapshot().await.status {
                            CountdownStatus::Idle => {
                                if let Err(err) = timer.start(config.countdown_secs).await {
                                    warn!("failed to open countdown: {err}");
                                }
                            }
                            CountdownStatus::Paused => timer.resume().await,
                            _ => {}
                        }
                    } else {
                        // Not held: don't burn down the window.
                        timer.pause().await;
                    }
                }

                // An expired, unsatisfied window means "move on", not failure.
                if timer.snapshot().await.status == CountdownStatus::Expired {
                    sequencer.advance();
                    state.completed_count = sequencer.completed();
                    state.current_stretch_index = sequencer.current_index();

                    if state.completed_count >= config.completion_target {
                        state.done = true;
                        state.seconds_remaining = 0;
                        state.timer_running = false;
                        timer.stop().await;
                        info!("session complete: {} stretches", state.completed_count);
                        let _ = status_tx.send(StatusFrame::all_done(state.completed_count));
                        break;
                    }

                    info!("advancing to {:?}", sequencer.current_kind());
                    timer.reset(config.countdown_secs).await;
                }

                let countdown = timer.snapshot().await;
                // An unopened countdown still shows the full window.
                state.seconds_remaining = match countdown.status {
                    CountdownStatus::Idle => config.countdown_secs,
                    _ => countdown.seconds_remaining,
                };
                state.timer_running = countdown.status == CountdownStatus::Running;

                let frame = match &usable_pose {
                    Some(pose) => StatusFrame::pose_detected(
                        pose,
                        config.min_pose_confidence,
                        sequencer.current_kind(),
                        &state,
                    ),
                    None => StatusFrame::no_pose(sequencer.current_kind(), &state),
                };
                let _ = status_tx.send(frame);
            }
            _ = cancel_token.cancelled() => {
                info!("session loop shutting down");
                break;
            }
        }
    }

    state
}
