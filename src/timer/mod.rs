pub mod controller;
pub mod state;

pub use controller::{CountdownSnapshot, CountdownTimer};
pub use state::{CountdownState, CountdownStatus};
