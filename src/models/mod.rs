pub mod pose;
pub mod session;

pub use pose::{BodyPart, Keypoint, Point, PoseSnapshot, SKELETON_EDGES};
pub use session::{SessionState, SessionStatus, StretchSession};
