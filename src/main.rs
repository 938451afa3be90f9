use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use stretchbreak::{PoseSnapshot, ReplaySource, SessionConfig, SessionController};

/// Replay driver: runs a stretch session against a recorded sequence of
/// pose snapshots (a JSON array of frames) instead of a live camera, and
/// logs every status frame. Usage: `stretchbreak <recording.json> [config.json]`
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(recording_path) = args.next().map(PathBuf::from) else {
        bail!("usage: stretchbreak <recording.json> [config.json]");
    };
    let config = match args.next().map(PathBuf::from) {
        Some(path) => SessionConfig::load(&path)?,
        None => SessionConfig::default(),
    };

    let contents = fs::read_to_string(&recording_path)
        .with_context(|| format!("Failed to read recording {}", recording_path.display()))?;
    let frames: Vec<PoseSnapshot> = serde_json::from_str(&contents)
        .with_context(|| format!("Malformed recording {}", recording_path.display()))?;
    info!("replaying {} frames from {}", frames.len(), recording_path.display());

    let mut controller = SessionController::new();
    let mut status = controller.subscribe();
    controller.start(ReplaySource::new(frames), config)?;

    while status.changed().await.is_ok() {
        let frame = status.borrow_and_update().clone();
        info!(
            "[{:>2}s] {} (completed {})",
            frame.seconds_remaining, frame.status_text, frame.completed_count
        );
        if frame.done {
            break;
        }
    }

    if let Some(summary) = controller.stop().await? {
        info!(
            "session {}: {} with {} stretches completed",
            summary.id,
            summary.status.as_str(),
            summary.stretches_completed
        );
    }

    Ok(())
}
