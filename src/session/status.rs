use serde::Serialize;

use crate::models::pose::{Keypoint, PoseSnapshot};
use crate::models::session::SessionState;
use crate::stretch::StretchKind;

pub const NO_POSE_TEXT: &str = "No stretch detected";
pub const ALL_DONE_TEXT: &str = "You have completed all the stretches for today!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayColor {
    Green,
    Red,
}

/// One poll's outbound record for a rendering layer. The core only writes
/// these; it never reads anything back from the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFrame {
    /// Keypoints confident enough to draw, empty when no pose was usable.
    pub overlay_keypoints: Vec<Keypoint>,
    pub overlay_color: OverlayColor,
    pub status_text: String,
    pub seconds_remaining: u32,
    pub stretch_name: String,
    pub completed_count: u32,
    pub done: bool,
}

impl StatusFrame {
    /// Placeholder before the first poll lands.
    pub fn idle() -> Self {
        Self {
            overlay_keypoints: Vec::new(),
            overlay_color: OverlayColor::Red,
            status_text: String::new(),
            seconds_remaining: 0,
            stretch_name: String::new(),
            completed_count: 0,
            done: false,
        }
    }

    pub fn pose_detected(
        pose: &PoseSnapshot,
        min_keypoint_score: f32,
        kind: StretchKind,
        state: &SessionState,
    ) -> Self {
        let overlay_keypoints = pose
            .keypoints
            .iter()
            .copied()
            .filter(|k| k.score >= min_keypoint_score)
            .collect();
        Self {
            overlay_keypoints,
            overlay_color: OverlayColor::Green,
            status_text: kind.label().to_string(),
            seconds_remaining: state.seconds_remaining,
            stretch_name: kind.label().to_string(),
            completed_count: state.completed_count,
            done: false,
        }
    }

    pub fn no_pose(kind: StretchKind, state: &SessionState) -> Self {
        Self {
            overlay_keypoints: Vec::new(),
            overlay_color: OverlayColor::Red,
            status_text: NO_POSE_TEXT.to_string(),
            seconds_remaining: state.seconds_remaining,
            stretch_name: kind.label().to_string(),
            completed_count: state.completed_count,
            done: false,
        }
    }

    pub fn all_done(completed_count: u32) -> Self {
        Self {
            overlay_keypoints: Vec::new(),
            overlay_color: OverlayColor::Green,
            status_text: ALL_DONE_TEXT.to_string(),
            seconds_remaining: 0,
            stretch_name: String::new(),
            completed_count,
            done: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::BodyPart;

    #[test]
    fn detected_frame_filters_low_score_keypoints() {
        let pose = PoseSnapshot::new(
            vec![
                Keypoint::new(BodyPart::Nose, 320.0, 120.0, 0.9),
                Keypoint::new(BodyPart::LeftEar, 300.0, 130.0, 0.3),
            ],
            0.8,
        );
        let state = SessionState::new(0, 15);
        let frame = StatusFrame::pose_detected(&pose, 0.5, StretchKind::ArmRaise, &state);

        assert_eq!(frame.overlay_keypoints.len(), 1);
        assert_eq!(frame.overlay_color, OverlayColor::Green);
        assert_eq!(frame.status_text, "Arm stretching");
        assert_eq!(frame.seconds_remaining, 15);
    }

    #[test]
    fn no_pose_frame_keeps_the_target_stretch_name() {
        let state = SessionState::new(1, 15);
        let frame = StatusFrame::no_pose(StretchKind::NeckTilt, &state);

        assert!(frame.overlay_keypoints.is_empty());
        assert_eq!(frame.overlay_color, OverlayColor::Red);
        assert_eq!(frame.status_text, NO_POSE_TEXT);
        assert_eq!(frame.stretch_name, "Neck stretching");
    }

    #[test]
    fn frames_serialize_camel_case() {
        let frame = StatusFrame::all_done(3);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"overlayKeypoints\""));
        assert!(json.contains("\"secondsRemaining\""));
        assert!(json.contains("\"completedCount\":3"));
        assert!(frame.done);
    }
}
