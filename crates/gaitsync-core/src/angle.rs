//! Sagittal-plane segment angles.
//!
//! Segment directions are projected onto the plane spanned by the reference
//! (forward) axis and the vertical, i.e. the lateral component is removed,
//! and measured against the reference axis.
//!
//! # Sign convention
//!
//! In [`AngleMode::Signed`] the angle is measured about the lateral axis:
//! a segment rotated from the reference axis toward *up* yields a negative
//! angle, toward *down* a positive one. A segment pointing exactly opposite
//! the reference axis yields `+180°`. With the default axes (reference `+Z`,
//! lateral `+X`) "down" is `-Y`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::chain::{LegChain, Segment, Side};
use crate::error::AxesError;

/// Projected lengths at or below this are treated as directionless, as are
/// non-finite projections.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Angle returned for a segment with no sagittal direction.
pub const FALLBACK_ANGLE: f32 = 0.0;

/// Unsigned [0°, 180°] or signed (-180°, 180°] angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// Magnitude only, in [0°, 180°].
    Unsigned,
    /// Signed about the lateral axis, in (-180°, 180°].
    #[default]
    Signed,
}

impl AngleMode {
    /// Returns the mode from the "signed" switch.
    pub fn from_signed(signed: bool) -> Self {
        if signed {
            AngleMode::Signed
        } else {
            AngleMode::Unsigned
        }
    }

    /// Returns the display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            AngleMode::Unsigned => "Unsigned (0~180)",
            AngleMode::Signed => "Signed (±)",
        }
    }
}

/// Reference (forward) and lateral (right) axes defining the sagittal plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAxes")]
pub struct SagittalAxes {
    reference: Vec3,
    lateral: Vec3,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAxes {
    reference: Vec3,
    lateral: Vec3,
}

impl TryFrom<RawAxes> for SagittalAxes {
    type Error = AxesError;

    fn try_from(raw: RawAxes) -> Result<Self, Self::Error> {
        SagittalAxes::new(raw.reference, raw.lateral)
    }
}

impl SagittalAxes {
    /// Validates and normalizes a pair of axes.
    pub fn new(reference: Vec3, lateral: Vec3) -> Result<Self, AxesError> {
        let reference = reference
            .try_normalize()
            .ok_or(AxesError::ZeroAxis { axis: "reference" })?;
        let lateral = lateral
            .try_normalize()
            .ok_or(AxesError::ZeroAxis { axis: "lateral" })?;
        let dot = reference.dot(lateral);
        if dot.abs() > 1e-4 {
            return Err(AxesError::NotOrthogonal { dot });
        }
        Ok(Self { reference, lateral })
    }

    /// Forward `+Z` reference, right `+X` lateral.
    pub fn forward_right() -> Self {
        Self {
            reference: Vec3::Z,
            lateral: Vec3::X,
        }
    }

    pub fn reference(&self) -> Vec3 {
        self.reference
    }

    pub fn lateral(&self) -> Vec3 {
        self.lateral
    }

    /// In-plane axis orthogonal to both; positive signed angles point along it.
    pub fn down(&self) -> Vec3 {
        self.lateral.cross(self.reference)
    }

    /// Removes the lateral component of `direction`.
    pub fn project(&self, direction: Vec3) -> Vec3 {
        direction - direction.dot(self.lateral) * self.lateral
    }
}

impl Default for SagittalAxes {
    fn default() -> Self {
        Self::forward_right()
    }
}

/// Angle of the `start → end` segment in degrees.
///
/// Returns [`FALLBACK_ANGLE`] when the projected direction is degenerate
/// (zero length, parallel to the lateral axis, or non-finite).
pub fn segment_angle(start: Vec3, end: Vec3, axes: &SagittalAxes, mode: AngleMode) -> f32 {
    match projected_direction(start, end, axes) {
        Some(projected) => direction_angle(projected, axes, mode),
        None => FALLBACK_ANGLE,
    }
}

/// The sagittal projection of `end - start`, or `None` when it has no direction.
fn projected_direction(start: Vec3, end: Vec3, axes: &SagittalAxes) -> Option<Vec3> {
    let projected = axes.project(end - start);
    if !projected.is_finite() || projected.length() <= DEGENERATE_EPSILON {
        None
    } else {
        Some(projected)
    }
}

fn direction_angle(projected: Vec3, axes: &SagittalAxes, mode: AngleMode) -> f32 {
    match mode {
        AngleMode::Unsigned => {
            let cos = projected.normalize().dot(axes.reference).clamp(-1.0, 1.0);
            cos.acos().to_degrees()
        }
        AngleMode::Signed => {
            let degrees = projected
                .dot(axes.down())
                .atan2(projected.dot(axes.reference))
                .to_degrees();
            // atan2(-0, -x) lands on the excluded end of the range
            if degrees <= -180.0 {
                degrees + 360.0
            } else {
                degrees
            }
        }
    }
}

/// Thigh, calf and foot angles of one leg, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AngleSet {
    pub thigh: f32,
    pub calf: f32,
    pub foot: f32,
}

impl AngleSet {
    pub fn new(thigh: f32, calf: f32, foot: f32) -> Self {
        Self { thigh, calf, foot }
    }

    /// Returns the angle of one segment.
    pub fn get(&self, segment: Segment) -> f32 {
        match segment {
            Segment::Thigh => self.thigh,
            Segment::Calf => self.calf,
            Segment::Foot => self.foot,
        }
    }

    /// True when every angle is a finite number.
    pub fn is_finite(&self) -> bool {
        self.thigh.is_finite() && self.calf.is_finite() && self.foot.is_finite()
    }
}

/// Angle sets for both legs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegAngles {
    pub left: AngleSet,
    pub right: AngleSet,
}

impl LegAngles {
    pub fn new(left: AngleSet, right: AngleSet) -> Self {
        Self { left, right }
    }

    /// Returns the angle set of one side.
    pub fn side(&self, side: Side) -> &AngleSet {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Extracts thigh, calf and foot angles from a common-frame chain.
pub fn extract_angles(chain: &LegChain, axes: &SagittalAxes, mode: AngleMode) -> AngleSet {
    let angle = |segment: Segment| {
        let (start, end) = chain.segment(segment);
        segment_angle(start, end, axes, mode)
    };
    AngleSet {
        thigh: angle(Segment::Thigh),
        calf: angle(Segment::Calf),
        foot: angle(Segment::Foot),
    }
}

/// Extracts angles for both legs.
pub fn extract_leg_angles(
    left: &LegChain,
    right: &LegChain,
    axes: &SagittalAxes,
    mode: AngleMode,
) -> LegAngles {
    LegAngles {
        left: extract_angles(left, axes, mode),
        right: extract_angles(right, axes, mode),
    }
}

/// Segments of `chain` whose direction is undefined in the sagittal plane.
pub fn degenerate_segments(chain: &LegChain, axes: &SagittalAxes) -> Vec<Segment> {
    Segment::ALL
        .into_iter()
        .filter(|&segment| {
            let (start, end) = chain.segment(segment);
            projected_direction(start, end, axes).is_none()
        })
        .collect()
}
