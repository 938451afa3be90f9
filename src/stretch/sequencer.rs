use rand::Rng;
use serde::{Deserialize, Serialize};

use super::classifier::StretchKind;

/// The fixed rotation the session walks through, in order.
pub const ROTATION: [StretchKind; 4] = [
    StretchKind::ArmRaise,
    StretchKind::NeckTilt,
    StretchKind::SideBend,
    StretchKind::ForwardBend,
];

/// Where a new session's rotation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartPolicy {
    Fixed(usize),
    Random,
}

impl Default for StartPolicy {
    fn default() -> Self {
        StartPolicy::Random
    }
}

/// Holds the current position in the rotation and the number of stretches
/// completed so far. Advancing wraps modulo the rotation length; there is
/// no rollback.
#[derive(Debug, Clone)]
pub struct StretchSequencer {
    index: usize,
    completed: u32,
}

impl StretchSequencer {
    pub fn new(policy: StartPolicy) -> Self {
        let index = match policy {
            StartPolicy::Fixed(index) => index % ROTATION.len(),
            StartPolicy::Random => rand::thread_rng().gen_range(0..ROTATION.len()),
        };
        Self {
            index,
            completed: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_kind(&self) -> StretchKind {
        ROTATION[self.index]
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % ROTATION.len();
        self.completed += 1;
    }
}
