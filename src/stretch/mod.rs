pub mod classifier;
pub mod sequencer;

pub use classifier::{classify, StretchKind, StretchThresholds};
pub use sequencer::{StartPolicy, StretchSequencer, ROTATION};
