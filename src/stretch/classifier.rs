use serde::{Deserialize, Serialize};

use crate::models::pose::{BodyPart, PoseSnapshot};

/// The fixed set of target poses a session guides the user through.
/// Declaration order is the rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StretchKind {
    ArmRaise,
    NeckTilt,
    SideBend,
    ForwardBend,
}

impl StretchKind {
    pub fn label(&self) -> &'static str {
        match self {
            StretchKind::ArmRaise => "Arm stretching",
            StretchKind::NeckTilt => "Neck stretching",
            StretchKind::SideBend => "Side stretching",
            StretchKind::ForwardBend => "Forward bend",
        }
    }
}

/// Tunable thresholds for the per-kind rules, in frame pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StretchThresholds {
    /// NeckTilt: a shoulder-to-ear vertical gap at or below this counts as
    /// the head tilted toward that shoulder.
    pub neck_tilt_max_ear_gap: f32,

    /// SideBend: a hip-to-shoulder vertical gap beyond this counts as the
    /// torso stretched out to one side.
    pub side_bend_min_torso_gap: f32,
}

impl Default for StretchThresholds {
    fn default() -> Self {
        Self {
            neck_tilt_max_ear_gap: 90.0,
            side_bend_min_torso_gap: 150.0,
        }
    }
}

/// Decides whether the snapshot shows the user holding `kind`.
///
/// Pure and deterministic. Fails closed: any landmark the rule needs that is
/// absent from the snapshot yields `false`, never an error. Overall frame
/// confidence is the caller's concern; this only looks at geometry.
pub fn classify(kind: StretchKind, pose: &PoseSnapshot, thresholds: &StretchThresholds) -> bool {
    match kind {
        StretchKind::ArmRaise => is_arm_raise(pose),
        StretchKind::NeckTilt => is_neck_tilt(pose, thresholds),
        StretchKind::SideBend => is_side_bend(pose, thresholds),
        StretchKind::ForwardBend => is_forward_bend(pose),
    }
    .unwrap_or(false)
}

/// Both wrists strictly above their same-side shoulders (smaller y), at once.
fn is_arm_raise(pose: &PoseSnapshot) -> Option<bool> {
    let left_wrist = pose.keypoint(BodyPart::LeftWrist)?;
    let right_wrist = pose.keypoint(BodyPart::RightWrist)?;
    let left_shoulder = pose.keypoint(BodyPart::LeftShoulder)?;
    let right_shoulder = pose.keypoint(BodyPart::RightShoulder)?;

    let left_raised = left_wrist.position.y < left_shoulder.position.y;
    let right_raised = right_wrist.position.y < right_shoulder.position.y;

    Some(left_raised && right_raised)
}

/// Either ear pulled down toward its shoulder: the shoulder-to-ear vertical
/// gap shrinks to at most the configured bound.
fn is_neck_tilt(pose: &PoseSnapshot, thresholds: &StretchThresholds) -> Option<bool> {
    let left_ear = pose.keypoint(BodyPart::LeftEar)?;
    let right_ear = pose.keypoint(BodyPart::RightEar)?;
    let left_shoulder = pose.keypoint(BodyPart::LeftShoulder)?;
    let right_shoulder = pose.keypoint(BodyPart::RightShoulder)?;

    let left_tilt =
        (left_shoulder.position.y - left_ear.position.y) <= thresholds.neck_tilt_max_ear_gap;
    let right_tilt =
        (right_shoulder.position.y - right_ear.position.y) <= thresholds.neck_tilt_max_ear_gap;

    Some(left_tilt || right_tilt)
}

/// Either side of the torso elongated: the hip-to-shoulder vertical gap
/// exceeds the configured bound.
fn is_side_bend(pose: &PoseSnapshot, thresholds: &StretchThresholds) -> Option<bool> {
    let left_shoulder = pose.keypoint(BodyPart::LeftShoulder)?;
    let right_shoulder = pose.keypoint(BodyPart::RightShoulder)?;
    let left_hip = pose.keypoint(BodyPart::LeftHip)?;
    let right_hip = pose.keypoint(BodyPart::RightHip)?;

    let left_stretch =
        (left_hip.position.y - left_shoulder.position.y) > thresholds.side_bend_min_torso_gap;
    let right_stretch =
        (right_hip.position.y - right_shoulder.position.y) > thresholds.side_bend_min_torso_gap;

    Some(left_stretch || right_stretch)
}

/// Head dipped below the hip line: nose y strictly greater than the mean of
/// the two hip y positions.
fn is_forward_bend(pose: &PoseSnapshot) -> Option<bool> {
    let nose = pose.keypoint(BodyPart::Nose)?;
    let left_hip = pose.keypoint(BodyPart::LeftHip)?;
    let right_hip = pose.keypoint(BodyPart::RightHip)?;

    let hip_line = (left_hip.position.y + right_hip.position.y) / 2.0;

    Some(nose.position.y > hip_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::Keypoint;

    fn kp(part: BodyPart, x: f32, y: f32) -> Keypoint {
        Keypoint::new(part, x, y, 0.9)
    }

    fn pose(keypoints: Vec<Keypoint>) -> PoseSnapshot {
        PoseSnapshot::new(keypoints, 0.9)
    }

    #[test]
    fn arm_raise_requires_both_wrists_above_shoulders() {
        let thresholds = StretchThresholds::default();
        let held = pose(vec![
            kp(BodyPart::LeftWrist, 200.0, 100.0),
            kp(BodyPart::RightWrist, 440.0, 110.0),
            kp(BodyPart::LeftShoulder, 250.0, 300.0),
            kp(BodyPart::RightShoulder, 390.0, 300.0),
        ]);
        assert!(classify(StretchKind::ArmRaise, &held, &thresholds));

        // One wrist level with its shoulder fails (strict inequality).
        let one_down = pose(vec![
            kp(BodyPart::LeftWrist, 200.0, 100.0),
            kp(BodyPart::RightWrist, 440.0, 300.0),
            kp(BodyPart::LeftShoulder, 250.0, 300.0),
            kp(BodyPart::RightShoulder, 390.0, 300.0),
        ]);
        assert!(!classify(StretchKind::ArmRaise, &one_down, &thresholds));
    }

    #[test]
    fn neck_tilt_triggers_on_either_side() {
        let thresholds = StretchThresholds::default();
        let tilted_left = pose(vec![
            kp(BodyPart::LeftEar, 300.0, 260.0),
            kp(BodyPart::RightEar, 340.0, 150.0),
            kp(BodyPart::LeftShoulder, 250.0, 310.0),
            kp(BodyPart::RightShoulder, 390.0, 310.0),
        ]);
        // Left gap 50 <= 90, right gap 160 > 90.
        assert!(classify(StretchKind::NeckTilt, &tilted_left, &thresholds));

        let upright = pose(vec![
            kp(BodyPart::LeftEar, 300.0, 160.0),
            kp(BodyPart::RightEar, 340.0, 160.0),
            kp(BodyPart::LeftShoulder, 250.0, 310.0),
            kp(BodyPart::RightShoulder, 390.0, 310.0),
        ]);
        assert!(!classify(StretchKind::NeckTilt, &upright, &thresholds));
    }

    #[test]
    fn neck_tilt_bound_is_inclusive() {
        let thresholds = StretchThresholds::default();
        let at_bound = pose(vec![
            kp(BodyPart::LeftEar, 300.0, 220.0),
            kp(BodyPart::RightEar, 340.0, 150.0),
            kp(BodyPart::LeftShoulder, 250.0, 310.0),
            kp(BodyPart::RightShoulder, 390.0, 350.0),
        ]);
        // Left gap exactly 90 counts; right gap 200 does not.
        assert!(classify(StretchKind::NeckTilt, &at_bound, &thresholds));
    }

    #[test]
    fn side_bend_requires_torso_gap_beyond_bound() {
        let thresholds = StretchThresholds::default();
        let stretched = pose(vec![
            kp(BodyPart::LeftShoulder, 250.0, 300.0),
            kp(BodyPart::RightShoulder, 390.0, 420.0),
            kp(BodyPart::LeftHip, 270.0, 460.0),
            kp(BodyPart::RightHip, 370.0, 470.0),
        ]);
        // Left gap 160 > 150; right gap 50.
        assert!(classify(StretchKind::SideBend, &stretched, &thresholds));

        let neutral = pose(vec![
            kp(BodyPart::LeftShoulder, 250.0, 320.0),
            kp(BodyPart::RightShoulder, 390.0, 320.0),
            kp(BodyPart::LeftHip, 270.0, 460.0),
            kp(BodyPart::RightHip, 370.0, 460.0),
        ]);
        // Both gaps 140, at most the bound.
        assert!(!classify(StretchKind::SideBend, &neutral, &thresholds));
    }

    #[test]
    fn forward_bend_compares_nose_to_hip_midline() {
        let thresholds = StretchThresholds::default();
        let bent = pose(vec![
            kp(BodyPart::Nose, 320.0, 500.0),
            kp(BodyPart::LeftHip, 270.0, 440.0),
            kp(BodyPart::RightHip, 370.0, 460.0),
        ]);
        assert!(classify(StretchKind::ForwardBend, &bent, &thresholds));

        // Nose exactly on the midline is not a bend.
        let on_line = pose(vec![
            kp(BodyPart::Nose, 320.0, 450.0),
            kp(BodyPart::LeftHip, 270.0, 440.0),
            kp(BodyPart::RightHip, 370.0, 460.0),
        ]);
        assert!(!classify(StretchKind::ForwardBend, &on_line, &thresholds));

        let upright = pose(vec![
            kp(BodyPart::Nose, 320.0, 120.0),
            kp(BodyPart::LeftHip, 270.0, 440.0),
            kp(BodyPart::RightHip, 370.0, 460.0),
        ]);
        assert!(!classify(StretchKind::ForwardBend, &upright, &thresholds));
    }

    #[test]
    fn missing_landmarks_fail_closed_for_every_kind() {
        let thresholds = StretchThresholds::default();
        let empty = pose(vec![]);
        let partial = pose(vec![
            kp(BodyPart::LeftWrist, 200.0, 100.0),
            kp(BodyPart::LeftShoulder, 250.0, 300.0),
            kp(BodyPart::Nose, 320.0, 500.0),
        ]);

        for kind in [
            StretchKind::ArmRaise,
            StretchKind::NeckTilt,
            StretchKind::SideBend,
            StretchKind::ForwardBend,
        ] {
            assert!(!classify(kind, &empty, &thresholds));
            assert!(!classify(kind, &partial, &thresholds));
        }
    }
}
