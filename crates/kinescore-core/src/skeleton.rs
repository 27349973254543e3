//! Skeleton model: joint taxonomy and per-frame landmark storage.
//!
//! Joint ids follow the 33-point BlazePose index space so skeletons can be
//! filled directly from a pose-estimation result without remapping. Only
//! the joints the engine consumes are enumerated; the remaining indices of
//! the underlying model are simply never addressed.

use crate::error::{PoseError, PoseResult};
use crate::geometry::{midpoint, Point3};

/// Length of the underlying pose model's landmark list.
pub const LANDMARK_COUNT: usize = 33;

/// A single 3D body-joint position estimate from a pose-estimation model.
///
/// Coordinates are normalized to the camera frame (typically `0..1` on
/// `x`/`y`, `y` growing downward); `z` is a relative depth estimate. The
/// engine treats landmarks as immutable input and never stores them beyond
/// the call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landmark {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (larger is lower on screen).
    pub y: f32,
    /// Relative depth.
    pub z: f32,
    /// Estimator-reported visibility, if provided.
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Creates a landmark without visibility information.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Creates a landmark with a visibility estimate.
    #[must_use]
    pub const fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// The landmark position as a geometry-kernel point.
    #[must_use]
    pub const fn point(&self) -> Point3 {
        Point3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// Body joints consumed by the engine, on BlazePose indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum JointId {
    /// Nose
    Nose = 0,
    /// Left shoulder
    LeftShoulder = 11,
    /// Right shoulder
    RightShoulder = 12,
    /// Left elbow
    LeftElbow = 13,
    /// Right elbow
    RightElbow = 14,
    /// Left wrist
    LeftWrist = 15,
    /// Right wrist
    RightWrist = 16,
    /// Left hip
    LeftHip = 23,
    /// Right hip
    RightHip = 24,
    /// Left knee
    LeftKnee = 25,
    /// Right knee
    RightKnee = 26,
    /// Left ankle
    LeftAnkle = 27,
    /// Right ankle
    RightAnkle = 28,
    /// Left heel
    LeftHeel = 29,
    /// Right heel
    RightHeel = 30,
    /// Left foot index (toe)
    LeftFootIndex = 31,
    /// Right foot index (toe)
    RightFootIndex = 32,
}

impl JointId {
    /// Returns every enumerated joint, in index order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Nose,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }

    /// Returns the joint name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// The body side this joint belongs to, if it is bilateral.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Nose => None,
            Self::LeftShoulder
            | Self::LeftElbow
            | Self::LeftWrist
            | Self::LeftHip
            | Self::LeftKnee
            | Self::LeftAnkle
            | Self::LeftHeel
            | Self::LeftFootIndex => Some(Side::Left),
            Self::RightShoulder
            | Self::RightElbow
            | Self::RightWrist
            | Self::RightHip
            | Self::RightKnee
            | Self::RightAnkle
            | Self::RightHeel
            | Self::RightFootIndex => Some(Side::Right),
        }
    }
}

impl TryFrom<u8> for JointId {
    type Error = PoseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Nose),
            11 => Ok(Self::LeftShoulder),
            12 => Ok(Self::RightShoulder),
            13 => Ok(Self::LeftElbow),
            14 => Ok(Self::RightElbow),
            15 => Ok(Self::LeftWrist),
            16 => Ok(Self::RightWrist),
            23 => Ok(Self::LeftHip),
            24 => Ok(Self::RightHip),
            25 => Ok(Self::LeftKnee),
            26 => Ok(Self::RightKnee),
            27 => Ok(Self::LeftAnkle),
            28 => Ok(Self::RightAnkle),
            29 => Ok(Self::LeftHeel),
            30 => Ok(Self::RightHeel),
            31 => Ok(Self::LeftFootIndex),
            32 => Ok(Self::RightFootIndex),
            _ => Err(PoseError::InvalidJointIndex { index: value }),
        }
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A body side, used by side-dependent screens.
///
/// Computed once per evaluation and threaded through the rest of the
/// scorer so one call never mixes sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left side of the body.
    Left,
    /// Right side of the body.
    Right,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Shoulder joint of this side.
    #[must_use]
    pub const fn shoulder(self) -> JointId {
        match self {
            Self::Left => JointId::LeftShoulder,
            Self::Right => JointId::RightShoulder,
        }
    }

    /// Elbow joint of this side.
    #[must_use]
    pub const fn elbow(self) -> JointId {
        match self {
            Self::Left => JointId::LeftElbow,
            Self::Right => JointId::RightElbow,
        }
    }

    /// Wrist joint of this side.
    #[must_use]
    pub const fn wrist(self) -> JointId {
        match self {
            Self::Left => JointId::LeftWrist,
            Self::Right => JointId::RightWrist,
        }
    }

    /// Hip joint of this side.
    #[must_use]
    pub const fn hip(self) -> JointId {
        match self {
            Self::Left => JointId::LeftHip,
            Self::Right => JointId::RightHip,
        }
    }

    /// Knee joint of this side.
    #[must_use]
    pub const fn knee(self) -> JointId {
        match self {
            Self::Left => JointId::LeftKnee,
            Self::Right => JointId::RightKnee,
        }
    }

    /// Ankle joint of this side.
    #[must_use]
    pub const fn ankle(self) -> JointId {
        match self {
            Self::Left => JointId::LeftAnkle,
            Self::Right => JointId::RightAnkle,
        }
    }

    /// Heel joint of this side.
    #[must_use]
    pub const fn heel(self) -> JointId {
        match self {
            Self::Left => JointId::LeftHeel,
            Self::Right => JointId::RightHeel,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// The full set of landmarks for one video frame.
///
/// A fixed-length collection indexed by [`JointId`]. Analyzers declare the
/// joints they require and validate them up front; a skeleton missing a
/// required joint is invalid input, never a default-zero landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    landmarks: [Option<Landmark>; LANDMARK_COUNT],
}

impl Skeleton {
    /// Creates an empty skeleton.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            landmarks: [None; LANDMARK_COUNT],
        }
    }

    /// Creates a skeleton from `(joint, landmark)` pairs.
    #[must_use]
    pub fn from_landmarks<I>(landmarks: I) -> Self
    where
        I: IntoIterator<Item = (JointId, Landmark)>,
    {
        let mut skeleton = Self::new();
        for (joint, landmark) in landmarks {
            skeleton.set(joint, landmark);
        }
        skeleton
    }

    /// Sets the landmark for a joint, replacing any previous value.
    pub fn set(&mut self, joint: JointId, landmark: Landmark) {
        self.landmarks[joint as usize] = Some(landmark);
    }

    /// Returns the landmark for a joint, if present.
    #[must_use]
    pub fn get(&self, joint: JointId) -> Option<&Landmark> {
        self.landmarks[joint as usize].as_ref()
    }

    /// Returns the landmark for a joint.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if the joint is absent.
    pub fn joint(&self, joint: JointId) -> PoseResult<&Landmark> {
        self.get(joint)
            .ok_or_else(|| PoseError::missing(vec![joint]))
    }

    /// Returns the position of a joint as a kernel point.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if the joint is absent.
    pub fn point(&self, joint: JointId) -> PoseResult<Point3> {
        Ok(self.joint(joint)?.point())
    }

    /// Validates that every listed joint is present.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] listing every absent joint, in
    /// the order they were declared.
    pub fn require(&self, joints: &[JointId]) -> PoseResult<()> {
        let missing: Vec<JointId> = joints
            .iter()
            .copied()
            .filter(|&j| self.get(j).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PoseError::missing(missing))
        }
    }

    /// Number of joints present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.iter().filter(|l| l.is_some()).count()
    }

    /// Returns `true` if no joints are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.iter().all(Option::is_none)
    }

    /// Midpoint of the two joints of a bilateral pair.
    fn bilateral_midpoint(&self, left: JointId, right: JointId) -> PoseResult<Point3> {
        self.require(&[left, right])?;
        Ok(midpoint(
            &self.point(left)?,
            &self.point(right)?,
        ))
    }

    /// Synthesized mid-shoulder reference point.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if either shoulder is absent.
    pub fn mid_shoulder(&self) -> PoseResult<Point3> {
        self.bilateral_midpoint(JointId::LeftShoulder, JointId::RightShoulder)
    }

    /// Synthesized mid-hip reference point.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if either hip is absent.
    pub fn mid_hip(&self) -> PoseResult<Point3> {
        self.bilateral_midpoint(JointId::LeftHip, JointId::RightHip)
    }

    /// Synthesized mid-knee reference point.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if either knee is absent.
    pub fn mid_knee(&self) -> PoseResult<Point3> {
        self.bilateral_midpoint(JointId::LeftKnee, JointId::RightKnee)
    }

    /// Synthesized mid-ankle reference point.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::MissingJoints`] if either ankle is absent.
    pub fn mid_ankle(&self) -> PoseResult<Point3> {
        self.bilateral_midpoint(JointId::LeftAnkle, JointId::RightAnkle)
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn set_and_get_roundtrip() {
        let mut skeleton = Skeleton::new();
        assert!(skeleton.is_empty());

        skeleton.set(JointId::LeftKnee, Landmark::new(0.4, 0.6, 0.0));
        assert_eq!(skeleton.len(), 1);
        assert!(skeleton.get(JointId::LeftKnee).is_some());
        assert!(skeleton.get(JointId::RightKnee).is_none());
    }

    #[test]
    fn require_reports_every_missing_joint() {
        let mut skeleton = Skeleton::new();
        skeleton.set(JointId::LeftHip, Landmark::new(0.5, 0.5, 0.0));

        let err = skeleton
            .require(&[JointId::LeftHip, JointId::LeftKnee, JointId::LeftAnkle])
            .unwrap_err();

        assert_eq!(
            err,
            PoseError::missing(vec![JointId::LeftKnee, JointId::LeftAnkle])
        );
    }

    #[test]
    fn missing_joint_is_an_error_not_a_default() {
        let skeleton = Skeleton::new();
        assert!(skeleton.point(JointId::Nose).is_err());
    }

    #[test]
    fn bilateral_midpoints() {
        let skeleton = Skeleton::from_landmarks([
            (JointId::LeftShoulder, Landmark::new(0.4, 0.3, 0.0)),
            (JointId::RightShoulder, Landmark::new(0.6, 0.3, 0.0)),
        ]);

        let mid = skeleton.mid_shoulder().unwrap();
        assert_relative_eq!(mid.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(mid.y, 0.3, epsilon = 1e-6);

        assert!(skeleton.mid_hip().is_err());
    }

    #[test]
    fn joint_id_u8_roundtrip() {
        for &joint in JointId::all() {
            let raw = joint as u8;
            assert_eq!(JointId::try_from(raw).unwrap(), joint);
        }
        assert!(JointId::try_from(5).is_err());
    }

    #[test]
    fn side_accessors_agree_with_joint_sides() {
        assert_eq!(Side::Left.knee(), JointId::LeftKnee);
        assert_eq!(Side::Right.heel(), JointId::RightHeel);
        assert_eq!(JointId::RightWrist.side(), Some(Side::Right));
        assert_eq!(JointId::Nose.side(), None);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
