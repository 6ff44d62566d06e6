//! Leg chain data model.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::frame::{to_common_frame, ReferenceFrame};

// =============================================================================
// Frames and Sides
// =============================================================================

/// Coordinate frame a joint position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Space {
    /// Relative to the skeleton's reference frame (e.g., the hips bone).
    #[default]
    Local,
    /// The common world frame.
    World,
}

/// Which leg a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Returns the lowercase side name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three segments of a leg chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Hip to knee.
    Thigh,
    /// Knee to ankle.
    Calf,
    /// Ankle to toe.
    Foot,
}

impl Segment {
    /// Segments in chain order.
    pub const ALL: [Segment; 3] = [Segment::Thigh, Segment::Calf, Segment::Foot];

    /// Returns the lowercase segment name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Thigh => "thigh",
            Segment::Calf => "calf",
            Segment::Foot => "foot",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Joints and Chains
// =============================================================================

/// A single joint position tagged with its frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    pub position: Vec3,
    pub space: Space,
}

impl JointSample {
    /// Creates a sample in the local frame.
    pub fn local(position: Vec3) -> Self {
        Self {
            position,
            space: Space::Local,
        }
    }

    /// Creates a sample in the world frame.
    pub fn world(position: Vec3) -> Self {
        Self {
            position,
            space: Space::World,
        }
    }
}

/// A hip → knee → ankle → toe chain.
///
/// The field order is the chain order; segments are always taken between
/// consecutive joints.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegChain {
    pub hip: Vec3,
    pub knee: Vec3,
    pub ankle: Vec3,
    pub toe: Vec3,
}

impl LegChain {
    /// Creates a chain from its four joints.
    pub fn new(hip: Vec3, knee: Vec3, ankle: Vec3, toe: Vec3) -> Self {
        Self {
            hip,
            knee,
            ankle,
            toe,
        }
    }

    /// Returns the (start, end) joints of a segment.
    pub fn segment(&self, segment: Segment) -> (Vec3, Vec3) {
        match segment {
            Segment::Thigh => (self.hip, self.knee),
            Segment::Calf => (self.knee, self.ankle),
            Segment::Foot => (self.ankle, self.toe),
        }
    }

    /// Returns the joints in chain order, for line rendering.
    pub fn polyline(&self) -> [Vec3; 4] {
        [self.hip, self.knee, self.ankle, self.toe]
    }

    /// Converts every joint from `frame`-local space to the common frame.
    pub fn to_common_frame(&self, frame: Option<&ReferenceFrame>) -> Result<Self, FrameError> {
        Ok(Self {
            hip: to_common_frame(self.hip, frame)?,
            knee: to_common_frame(self.knee, frame)?,
            ankle: to_common_frame(self.ankle, frame)?,
            toe: to_common_frame(self.toe, frame)?,
        })
    }
}

/// Per-tick snapshot of both legs from an external pose source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseSnapshot {
    /// Frame all eight joints are expressed in.
    #[serde(default)]
    pub space: Space,
    pub left: LegChain,
    pub right: LegChain,
}

impl PoseSnapshot {
    /// Creates a snapshot of local-space chains.
    pub fn local(left: LegChain, right: LegChain) -> Self {
        Self {
            space: Space::Local,
            left,
            right,
        }
    }

    /// Creates a snapshot of world-space chains.
    pub fn world(left: LegChain, right: LegChain) -> Self {
        Self {
            space: Space::World,
            left,
            right,
        }
    }

    /// Returns the chain for one side.
    pub fn leg(&self, side: Side) -> &LegChain {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns the joint samples of one side in chain order.
    pub fn samples(&self, side: Side) -> [JointSample; 4] {
        self.leg(side).polyline().map(|position| JointSample {
            position,
            space: self.space,
        })
    }

    /// Expresses the snapshot in the common frame.
    ///
    /// World-space snapshots are returned unchanged. Local-space snapshots
    /// need a reference frame; either both legs convert or neither does.
    pub fn to_common_frame(&self, frame: Option<&ReferenceFrame>) -> Result<Self, FrameError> {
        match self.space {
            Space::World => Ok(*self),
            Space::Local => Ok(Self::world(
                self.left.to_common_frame(frame)?,
                self.right.to_common_frame(frame)?,
            )),
        }
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chain() -> LegChain {
        LegChain::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 0.3),
            Vec3::new(0.0, 0.0, 0.58),
            Vec3::new(0.0, 0.1, 0.65),
        )
    }

    #[test]
    fn test_segments_follow_chain_order() {
        let leg = chain();
        assert_eq!(leg.segment(Segment::Thigh), (leg.hip, leg.knee));
        assert_eq!(leg.segment(Segment::Calf), (leg.knee, leg.ankle));
        assert_eq!(leg.segment(Segment::Foot), (leg.ankle, leg.toe));
    }

    #[test]
    fn test_polyline() {
        let leg = chain();
        assert_eq!(leg.polyline(), [leg.hip, leg.knee, leg.ankle, leg.toe]);
    }

    #[test]
    fn test_world_snapshot_passes_through_without_frame() {
        let snapshot = PoseSnapshot::world(chain(), chain());
        assert_eq!(snapshot.to_common_frame(None), Ok(snapshot));
    }

    #[test]
    fn test_local_snapshot_requires_frame() {
        let snapshot = PoseSnapshot::local(chain(), chain());
        assert_eq!(
            snapshot.to_common_frame(None),
            Err(FrameError::MissingReferenceFrame)
        );
    }

    #[test]
    fn test_local_snapshot_is_translated() {
        let snapshot = PoseSnapshot::local(chain(), chain());
        let frame = ReferenceFrame::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let world = snapshot.to_common_frame(Some(&frame)).unwrap();

        assert_eq!(world.space, Space::World);
        assert_eq!(world.left.hip, Vec3::new(0.0, 1.0, 0.0));
        assert!(world.right.toe.abs_diff_eq(Vec3::new(0.0, 1.1, 0.65), 1e-6));
    }

    #[test]
    fn test_samples_carry_space() {
        let snapshot = PoseSnapshot::local(chain(), chain());
        let samples = snapshot.samples(Side::Left);
        assert!(samples.iter().all(|s| s.space == Space::Local));
        assert_eq!(samples[1], JointSample::local(Vec3::new(0.0, 0.0, 0.3)));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "space": "world",
            "left": {
                "hip": [0.0, 0.0, 0.0],
                "knee": [0.0, 0.0, 0.3],
                "ankle": [0.0, 0.0, 0.58],
                "toe": [0.0, 0.1, 0.65]
            },
            "right": {
                "hip": [0.1, 0.0, 0.0],
                "knee": [0.1, -0.4, 0.0],
                "ankle": [0.1, -0.8, 0.0],
                "toe": [0.1, -0.8, 0.1]
            }
        }"#;

        let snapshot = PoseSnapshot::from_json(json).expect("should parse");
        assert_eq!(snapshot.space, Space::World);
        assert_eq!(snapshot.left, chain());
        assert_eq!(snapshot.right.knee, Vec3::new(0.1, -0.4, 0.0));
    }

    #[test]
    fn test_snapshot_space_defaults_to_local() {
        let json = r#"{
            "left": {"hip": [0,0,0], "knee": [0,0,1], "ankle": [0,0,2], "toe": [0,0,3]},
            "right": {"hip": [0,0,0], "knee": [0,0,1], "ankle": [0,0,2], "toe": [0,0,3]}
        }"#;
        let snapshot = PoseSnapshot::from_json(json).expect("should parse");
        assert_eq!(snapshot.space, Space::Local);
    }
}
