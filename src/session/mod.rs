pub mod controller;
pub mod loop_worker;
pub mod status;

pub use controller::SessionController;
pub use loop_worker::session_loop;
pub use status::{OverlayColor, StatusFrame, ALL_DONE_TEXT, NO_POSE_TEXT};
