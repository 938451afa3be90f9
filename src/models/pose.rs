use serde::{Deserialize, Serialize};

/// Body landmarks reported by the pose estimator (17 keypoints).
/// Serialized names match the wire format the estimator emits
/// (`"leftShoulder"`, `"rightWrist"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// Frame pixel coordinates, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A single scored landmark position. Produced fresh each frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keypoint {
    pub part: BodyPart,
    pub position: Point,
    pub score: f32,
}

impl Keypoint {
    pub fn new(part: BodyPart, x: f32, y: f32, score: f32) -> Self {
        Self {
            part,
            position: Point { x, y },
            score,
        }
    }
}

/// One frame's estimated keypoints plus the estimator's overall confidence.
/// Ephemeral: consumed by a single classification pass and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseSnapshot {
    pub keypoints: Vec<Keypoint>,
    pub score: f32,
}

impl PoseSnapshot {
    pub fn new(keypoints: Vec<Keypoint>, score: f32) -> Self {
        Self { keypoints, score }
    }

    pub fn keypoint(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.part == part)
    }

    /// Whether the frame is confident enough to classify against.
    pub fn is_usable(&self, min_confidence: f32) -> bool {
        self.score > min_confidence
    }

    /// Pairs of adjacent keypoints for skeleton overlay rendering.
    /// An edge is included only when both endpoints meet `min_score`.
    pub fn adjacent_keypoints(&self, min_score: f32) -> Vec<(Keypoint, Keypoint)> {
        SKELETON_EDGES
            .iter()
            .filter_map(|&(a, b)| {
                let ka = self.keypoint(a)?;
                let kb = self.keypoint(b)?;
                if ka.score >= min_score && kb.score >= min_score {
                    Some((*ka, *kb))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Skeleton connectivity for overlay rendering.
pub const SKELETON_EDGES: [(BodyPart, BodyPart); 16] = [
    (BodyPart::LeftEar, BodyPart::LeftEye),
    (BodyPart::LeftEye, BodyPart::Nose),
    (BodyPart::Nose, BodyPart::RightEye),
    (BodyPart::RightEye, BodyPart::RightEar),
    (BodyPart::LeftShoulder, BodyPart::RightShoulder),
    (BodyPart::LeftShoulder, BodyPart::LeftElbow),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::RightShoulder, BodyPart::RightElbow),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::LeftShoulder, BodyPart::LeftHip),
    (BodyPart::RightShoulder, BodyPart::RightHip),
    (BodyPart::LeftHip, BodyPart::RightHip),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PoseSnapshot {
        PoseSnapshot::new(
            vec![
                Keypoint::new(BodyPart::Nose, 320.0, 120.0, 0.9),
                Keypoint::new(BodyPart::LeftEye, 310.0, 110.0, 0.8),
                Keypoint::new(BodyPart::RightEye, 330.0, 110.0, 0.2),
            ],
            0.7,
        )
    }

    #[test]
    fn keypoint_lookup_by_part() {
        let pose = snapshot();
        assert!(pose.keypoint(BodyPart::Nose).is_some());
        assert!(pose.keypoint(BodyPart::LeftWrist).is_none());
    }

    #[test]
    fn usability_threshold_is_strict() {
        let pose = snapshot();
        assert!(pose.is_usable(0.5));
        assert!(!pose.is_usable(0.7));
    }

    #[test]
    fn adjacent_keypoints_filter_low_scores() {
        let pose = snapshot();
        // LeftEye-Nose passes; Nose-RightEye fails on the 0.2 eye score.
        let edges = pose.adjacent_keypoints(0.5);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].0.part, BodyPart::LeftEye);
        assert_eq!(edges[0].1.part, BodyPart::Nose);
    }

    #[test]
    fn body_part_wire_names_are_camel_case() {
        let json = serde_json::to_string(&BodyPart::LeftShoulder).unwrap();
        assert_eq!(json, "\"leftShoulder\"");
    }
}
