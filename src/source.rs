use std::future::Future;

use anyhow::{bail, Result};

use crate::models::pose::PoseSnapshot;

/// The one external capability the core calls into: estimate a single
/// frame's pose. Implementations may be slow (model inference) or fail
/// outright (camera permission denied); the session loop degrades either
/// case to a "no pose detected" poll and simply tries again next tick.
pub trait PoseSource: Send + 'static {
    fn estimate(&mut self) -> impl Future<Output = Result<PoseSnapshot>> + Send;
}

/// Scripted pose source: serves a recorded sequence of snapshots, one per
/// poll, cycling back to the start when it runs out. Backs the replay
/// binary and the integration tests.
pub struct ReplaySource {
    frames: Vec<PoseSnapshot>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(frames: Vec<PoseSnapshot>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl PoseSource for ReplaySource {
    fn estimate(&mut self) -> impl Future<Output = Result<PoseSnapshot>> + Send {
        let result = if self.frames.is_empty() {
            None
        } else {
            let frame = self.frames[self.cursor % self.frames.len()].clone();
            self.cursor += 1;
            Some(frame)
        };
        async move {
            match result {
                Some(frame) => Ok(frame),
                None => bail!("replay recording is empty"),
            }
        }
    }
}
