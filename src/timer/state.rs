use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CountdownStatus {
    Idle,
    Running,
    Paused,
    Expired,
}

impl Default for CountdownStatus {
    fn default() -> Self {
        CountdownStatus::Idle
    }
}

/// Pure countdown state machine. The single source of truth for the
/// countdown: every transition is validated here, so racing callers
/// (the ticker task and the poll loop) cannot produce an invalid state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    pub status: CountdownStatus,
    pub seconds_remaining: u32,
}

impl Default for CountdownState {
    fn default() -> Self {
        Self {
            status: CountdownStatus::Idle,
            seconds_remaining: 0,
        }
    }
}

impl CountdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle/Expired -> Running with a fresh duration. Refused while a
    /// countdown is already underway; `reset` is the restart operation.
    pub fn start(&mut self, duration: u32) -> bool {
        match self.status {
            CountdownStatus::Idle | CountdownStatus::Expired => {
                self.status = CountdownStatus::Running;
                self.seconds_remaining = duration;
                true
            }
            CountdownStatus::Running | CountdownStatus::Paused => false,
        }
    }

    /// One elapsed second while Running. Returns true only on the call that
    /// performs the Running -> Expired transition, so expiry is observed
    /// exactly once.
    pub fn tick(&mut self) -> bool {
        if self.status != CountdownStatus::Running {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.status = CountdownStatus::Expired;
            return true;
        }
        false
    }

    /// Any state -> Running with a fresh duration.
    pub fn reset(&mut self, duration: u32) {
        self.status = CountdownStatus::Running;
        self.seconds_remaining = duration;
    }

    /// Running -> Paused. No effect in any other state; pausing never
    /// fires expiry.
    pub fn pause(&mut self) -> bool {
        if self.status == CountdownStatus::Running {
            self.status = CountdownStatus::Paused;
            true
        } else {
            false
        }
    }

    /// Paused -> Running, only while time remains; a resume at zero does
    /// nothing.
    pub fn resume(&mut self) -> bool {
        if self.status == CountdownStatus::Paused && self.seconds_remaining > 0 {
            self.status = CountdownStatus::Running;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
