pub mod config;
pub mod models;
pub mod session;
pub mod source;
pub mod stretch;
pub mod timer;

pub use config::SessionConfig;
pub use models::pose::{BodyPart, Keypoint, Point, PoseSnapshot, SKELETON_EDGES};
pub use models::session::{SessionState, SessionStatus, StretchSession};
pub use session::{OverlayColor, SessionController, StatusFrame};
pub use source::{PoseSource, ReplaySource};
pub use stretch::{classify, StartPolicy, StretchKind, StretchSequencer, StretchThresholds, ROTATION};
pub use timer::{CountdownSnapshot, CountdownState, CountdownStatus, CountdownTimer};
