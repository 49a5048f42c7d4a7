//! # pose_frame
//!
//! Per-frame body-joint landmark data for pose classification.
//!
//! A pose-estimation pipeline (MediaPipe Pose, typically) delivers
//! one set of normalized 3D landmarks per camera frame.  This crate holds the
//! small slice of that output the dab classifier needs: the six arm joints,
//! addressed by [`Joint`], stored in a [`LandmarkFrame`].
//!
//! Coordinates are normalized image space: `x`, `y` in `[0, 1]` with `y`
//! increasing **downward**, `z` in comparable normalized depth units.
//! `visibility` is the model's 0–1 confidence that the joint is visible.
//!
//! A frame is only classifiable when all six joints are present
//! ([`LandmarkFrame::is_complete`]).  Incomplete frames are routine — the
//! performer walks out of shot, an arm leaves the crop — and are the caller's
//! business to handle, not an error.

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One tracked joint position in normalized image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Normalized depth; the classifier ignores it (angles are measured in
    /// the image plane) but it is carried through untouched.
    pub z: f64,
    /// Model confidence 0–1 that the joint is visible in the frame.
    pub visibility: f64,
}

impl Landmark {
    /// Landmark at an image-plane position, fully visible, zero depth.
    /// Handy for synthetic frames and tests.
    pub fn at(x: f64, y: f64) -> Self {
        Landmark { x, y, z: 0.0, visibility: 1.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Joint — the closed set of joints the classifier reads
// ════════════════════════════════════════════════════════════════════════════

/// The six arm joints required for dab classification.
///
/// Discriminants are the MediaPipe Pose landmark indices (of 33 total), so a
/// `Joint` doubles as the lookup key into the model's flat output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Joint {
    LeftShoulder  = 11,
    RightShoulder = 12,
    LeftElbow     = 13,
    RightElbow    = 14,
    LeftWrist     = 15,
    RightWrist    = 16,
}

/// All required joints; a frame missing any of these is incomplete.
pub const REQUIRED_JOINTS: [Joint; 6] = [
    Joint::LeftShoulder,
    Joint::RightShoulder,
    Joint::LeftElbow,
    Joint::RightElbow,
    Joint::LeftWrist,
    Joint::RightWrist,
];

/// Number of landmarks in a full MediaPipe Pose frame.
pub const MEDIAPIPE_LANDMARKS: usize = 33;

/// Values per landmark in the flat array: x, y, z, visibility.
pub const FLAT_STRIDE: usize = 4;

/// Minimum visibility for a joint to count as present when ingesting a
/// flat model frame; below this the model is guessing, not tracking.
pub const MIN_VISIBILITY: f64 = 0.5;

impl Joint {
    /// MediaPipe Pose landmark index (0–32).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot in a [`LandmarkFrame`]'s internal storage (0–5).
    fn slot(self) -> usize {
        self.index() - Joint::LeftShoulder.index()
    }

    /// Human-readable joint name.
    pub fn name(self) -> &'static str {
        match self {
            Joint::LeftShoulder  => "left shoulder",
            Joint::RightShoulder => "right shoulder",
            Joint::LeftElbow     => "left elbow",
            Joint::RightElbow    => "right elbow",
            Joint::LeftWrist     => "left wrist",
            Joint::RightWrist    => "right wrist",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

/// One frame's worth of arm-joint landmarks.
///
/// Fixed-size map from [`Joint`] to [`Landmark`]; joints the model did not
/// deliver (or delivered below [`MIN_VISIBILITY`]) are simply absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    slots: [Option<Landmark>; 6],
}

impl LandmarkFrame {
    /// Empty (fully incomplete) frame.
    pub fn new() -> Self {
        LandmarkFrame::default()
    }

    /// Store a landmark for `joint`, replacing any previous value.
    pub fn set(&mut self, joint: Joint, landmark: Landmark) {
        self.slots[joint.slot()] = Some(landmark);
    }

    /// Builder-style [`set`](LandmarkFrame::set).
    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.set(joint, landmark);
        self
    }

    /// Landmark for `joint`, if present.
    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.slots[joint.slot()].as_ref()
    }

    /// True when every required joint is present.  Only complete frames may
    /// be classified.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Ingest one flat model frame: `MEDIAPIPE_LANDMARKS × FLAT_STRIDE`
    /// values laid out `x, y, z, visibility` per landmark, as delivered by
    /// the pose pipeline's per-frame callback.
    ///
    /// Joints below [`MIN_VISIBILITY`] are left unset, so a partially
    /// occluded pose yields an incomplete frame rather than garbage
    /// geometry.  A wrong-length slice is a caller bug and is reported as
    /// an error.
    pub fn from_flat(values: &[f64]) -> Result<LandmarkFrame, String> {
        let expected = MEDIAPIPE_LANDMARKS * FLAT_STRIDE;
        if values.len() != expected {
            return Err(format!(
                "flat landmark frame must hold {} values, got {}",
                expected,
                values.len()
            ));
        }

        let mut frame = LandmarkFrame::new();
        for joint in REQUIRED_JOINTS {
            let base = joint.index() * FLAT_STRIDE;
            let visibility = values[base + 3];
            if visibility < MIN_VISIBILITY {
                continue;
            }
            frame.set(joint, Landmark {
                x: values[base],
                y: values[base + 1],
                z: values[base + 2],
                visibility,
            });
        }
        Ok(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame() -> LandmarkFrame {
        let mut frame = LandmarkFrame::new();
        for (i, joint) in REQUIRED_JOINTS.iter().enumerate() {
            frame.set(*joint, Landmark::at(0.1 * i as f64, 0.5));
        }
        frame
    }

    #[test]
    fn empty_frame_is_incomplete() {
        assert!(!LandmarkFrame::new().is_complete());
    }

    #[test]
    fn all_joints_present_is_complete() {
        assert!(full_frame().is_complete());
    }

    #[test]
    fn one_missing_joint_is_incomplete() {
        let mut frame = LandmarkFrame::new();
        for joint in [
            Joint::LeftShoulder,
            Joint::RightShoulder,
            Joint::LeftElbow,
            Joint::RightElbow,
            Joint::LeftWrist,
            // RightWrist deliberately absent
        ] {
            frame.set(joint, Landmark::at(0.5, 0.5));
        }
        assert!(!frame.is_complete());
    }

    #[test]
    fn set_then_get_round_trips() {
        let lm = Landmark { x: 0.25, y: 0.75, z: -0.1, visibility: 0.9 };
        let frame = LandmarkFrame::new().with(Joint::RightElbow, lm);
        assert_eq!(frame.get(Joint::RightElbow), Some(&lm));
        assert_eq!(frame.get(Joint::LeftElbow), None);
    }

    #[test]
    fn joint_indices_match_mediapipe() {
        assert_eq!(Joint::LeftShoulder.index(), 11);
        assert_eq!(Joint::RightWrist.index(), 16);
    }

    #[test]
    fn from_flat_rejects_wrong_length() {
        assert!(LandmarkFrame::from_flat(&[0.0; 10]).is_err());
    }

    #[test]
    fn from_flat_extracts_required_joints() {
        let mut values = vec![0.0; MEDIAPIPE_LANDMARKS * FLAT_STRIDE];
        for joint in REQUIRED_JOINTS {
            let base = joint.index() * FLAT_STRIDE;
            values[base]     = 0.4;
            values[base + 1] = 0.6;
            values[base + 2] = -0.05;
            values[base + 3] = 0.99;
        }
        let frame = LandmarkFrame::from_flat(&values).unwrap();
        assert!(frame.is_complete());
        let wrist = frame.get(Joint::LeftWrist).unwrap();
        assert_eq!(wrist.x, 0.4);
        assert_eq!(wrist.visibility, 0.99);
    }

    #[test]
    fn from_flat_drops_low_visibility_joints() {
        let mut values = vec![0.0; MEDIAPIPE_LANDMARKS * FLAT_STRIDE];
        for joint in REQUIRED_JOINTS {
            let base = joint.index() * FLAT_STRIDE;
            values[base + 3] = 0.99;
        }
        // Right wrist dips below the confidence floor.
        values[Joint::RightWrist.index() * FLAT_STRIDE + 3] = 0.2;
        let frame = LandmarkFrame::from_flat(&values).unwrap();
        assert!(frame.get(Joint::RightWrist).is_none());
        assert!(!frame.is_complete());
    }
}
