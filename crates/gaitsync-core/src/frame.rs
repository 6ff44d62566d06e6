//! Local to common frame conversion.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// The object defining the local → world mapping, typically the hips bone.
///
/// Points are transformed with scale, rotation and translation applied in
/// that order, matching a scene-graph transform's point conversion.
/// Deserialized rotations are normalized; non-finite parts, a zero-length
/// rotation or a zero scale component are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameParts", into = "FrameParts")]
pub struct ReferenceFrame {
    transform: Affine3A,
}

impl ReferenceFrame {
    /// The identity frame (local == world).
    pub fn identity() -> Self {
        Self {
            transform: Affine3A::IDENTITY,
        }
    }

    /// Creates a frame from translation, rotation and scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            transform: Affine3A::from_scale_rotation_translation(scale, rotation, translation),
        }
    }

    /// Creates a pure translation frame.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_trs(translation, Quat::IDENTITY, Vec3::ONE)
    }

    /// Maps a local point to the world frame.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.transform.transform_point3(local)
    }

    /// Maps a world point back to the local frame.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.transform.inverse().transform_point3(world)
    }

    /// Decomposes the frame into (scale, rotation, translation).
    pub fn to_scale_rotation_translation(&self) -> (Vec3, Quat, Vec3) {
        self.transform.to_scale_rotation_translation()
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Serialized form of a [`ReferenceFrame`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameParts {
    #[serde(default)]
    translation: Vec3,
    #[serde(default)]
    rotation: Quat,
    #[serde(default = "unit_scale")]
    scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl TryFrom<FrameParts> for ReferenceFrame {
    type Error = FrameError;

    fn try_from(parts: FrameParts) -> Result<Self, Self::Error> {
        if !parts.translation.is_finite() {
            return Err(FrameError::InvalidTransform { part: "translation" });
        }
        if !parts.scale.is_finite() || parts.scale.cmpeq(Vec3::ZERO).any() {
            return Err(FrameError::InvalidTransform { part: "scale" });
        }
        if !parts.rotation.is_finite() || parts.rotation.length() <= 1e-6 {
            return Err(FrameError::InvalidTransform { part: "rotation" });
        }
        Ok(Self::from_trs(
            parts.translation,
            parts.rotation.normalize(),
            parts.scale,
        ))
    }
}

impl From<ReferenceFrame> for FrameParts {
    fn from(frame: ReferenceFrame) -> Self {
        let (scale, rotation, translation) = frame.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

/// Converts a local point to the common frame.
///
/// Fails with [`FrameError::MissingReferenceFrame`] when `frame` is `None`;
/// callers keep their previous values for the tick in that case.
pub fn to_common_frame(local: Vec3, frame: Option<&ReferenceFrame>) -> Result<Vec3, FrameError> {
    let frame = frame.ok_or(FrameError::MissingReferenceFrame)?;
    Ok(frame.transform_point(local))
}
