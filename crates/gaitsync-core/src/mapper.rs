//! Angle set to target-rig rotation mapping.
//!
//! The target skeleton expresses each bone's rotation relative to its parent,
//! so the knee subtracts the thigh angle the hip already applied. The foot's
//! drive axis is set to the foot angle directly, without parent compensation.

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

use crate::angle::{AngleSet, LegAngles};
use crate::chain::Side;

// =============================================================================
// Rotations
// =============================================================================

/// Axis of a local Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriveAxis {
    /// X axis (pitch).
    #[default]
    X,
    /// Y axis (yaw).
    Y,
    /// Z axis (roll).
    Z,
}

impl DriveAxis {
    /// Returns the axis name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveAxis::X => "X",
            DriveAxis::Y => "Y",
            DriveAxis::Z => "Z",
        }
    }
}

/// Local Euler angles in degrees.
///
/// Applied Z first, then X, then Y, the order the target engine uses for a
/// bone's local Euler angles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EulerRotation {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl EulerRotation {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the angle about one axis.
    pub fn get(&self, axis: DriveAxis) -> f32 {
        match axis {
            DriveAxis::X => self.x,
            DriveAxis::Y => self.y,
            DriveAxis::Z => self.z,
        }
    }

    /// Returns a copy with one axis set to `degrees`.
    pub fn with(mut self, axis: DriveAxis, degrees: f32) -> Self {
        match axis {
            DriveAxis::X => self.x = degrees,
            DriveAxis::Y => self.y = degrees,
            DriveAxis::Z => self.z = degrees,
        }
        self
    }

    /// Returns a copy with `degrees` added to one axis.
    pub fn offset(self, axis: DriveAxis, degrees: f32) -> Self {
        self.with(axis, self.get(axis) + degrees)
    }

    /// Returns the rotation as an array [x, y, z] in degrees.
    pub fn as_degrees(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// True when all three angles are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to a quaternion (Z, then X, then Y).
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.y.to_radians(),
            self.x.to_radians(),
            self.z.to_radians(),
        )
    }
}

// =============================================================================
// Bind Pose
// =============================================================================

/// Local rotations of the driven joints at zero drive angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindPose {
    /// Axis the sagittal angles drive on every joint of this rig.
    #[serde(default)]
    pub drive_axis: DriveAxis,
    pub hip: EulerRotation,
    pub knee: EulerRotation,
    pub foot: EulerRotation,
}

impl BindPose {
    /// Records a bind pose.
    pub fn capture(
        drive_axis: DriveAxis,
        hip: EulerRotation,
        knee: EulerRotation,
        foot: EulerRotation,
    ) -> Self {
        Self {
            drive_axis,
            hip,
            knee,
            foot,
        }
    }

    /// Mixamo-style target leg, driven about X.
    pub fn mixamo(side: Side) -> Self {
        let foot_pitch = match side {
            Side::Left => 54.742,
            Side::Right => 54.741,
        };
        Self::capture(
            DriveAxis::X,
            EulerRotation::new(-85.0, 0.0, -180.0),
            EulerRotation::IDENTITY,
            EulerRotation::new(foot_pitch, 0.0, 0.0),
        )
    }

    /// Name of the first joint holding a non-finite angle, if any.
    pub fn non_finite_joint(&self) -> Option<&'static str> {
        [("hip", self.hip), ("knee", self.knee), ("foot", self.foot)]
            .into_iter()
            .find(|(_, rotation)| !rotation.is_finite())
            .map(|(name, _)| name)
    }
}

/// Target-rig local rotations for one leg.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegRotations {
    pub hip: EulerRotation,
    pub knee: EulerRotation,
    pub foot: EulerRotation,
}

/// Maps one leg's angles onto the target rig.
///
/// Total over finite input; NaN angles propagate into the result.
pub fn map_rotations(angles: &AngleSet, bind: &BindPose) -> LegRotations {
    let axis = bind.drive_axis;
    LegRotations {
        hip: bind.hip.offset(axis, -angles.thigh),
        knee: bind.knee.offset(axis, -angles.thigh + angles.calf),
        foot: bind.foot.with(axis, angles.foot),
    }
}

// =============================================================================
// Retargeter
// =============================================================================

/// Target-rig rotations for both legs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RetargetPose {
    pub left: LegRotations,
    pub right: LegRotations,
}

impl RetargetPose {
    /// Returns the rotations of one side.
    pub fn side(&self, side: Side) -> &LegRotations {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Bind poses of one target skeleton; read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Retargeter {
    left: BindPose,
    right: BindPose,
}

impl Retargeter {
    pub fn new(left: BindPose, right: BindPose) -> Self {
        Self { left, right }
    }

    /// Returns the bind pose of one side.
    pub fn bind_pose(&self, side: Side) -> &BindPose {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Maps both legs.
    pub fn retarget(&self, angles: &LegAngles) -> RetargetPose {
        RetargetPose {
            left: map_rotations(&angles.left, &self.left),
            right: map_rotations(&angles.right, &self.right),
        }
    }
}

impl Default for Retargeter {
    fn default() -> Self {
        Self::new(BindPose::mixamo(Side::Left), BindPose::mixamo(Side::Right))
    }
}
