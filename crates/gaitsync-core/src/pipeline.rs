//! Per-tick conversion → extraction → mapping for both legs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::angle::{degenerate_segments, extract_leg_angles, LegAngles};
use crate::chain::{PoseSnapshot, Side};
use crate::config::PipelineConfig;
use crate::error::{ConfigError, FrameError, PipelineWarning, WarningCode};
use crate::frame::ReferenceFrame;
use crate::mapper::{RetargetPose, Retargeter};

/// Input of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickInput {
    pub snapshot: PoseSnapshot,
    /// Required when the snapshot is in local space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<ReferenceFrame>,
}

impl TickInput {
    pub fn new(snapshot: PoseSnapshot, reference_frame: Option<ReferenceFrame>) -> Self {
        Self {
            snapshot,
            reference_frame,
        }
    }
}

/// Whether a tick's values were computed from its own input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStatus {
    /// Computed from this tick's snapshot.
    Fresh,
    /// Carried over from the previous tick (or the zero pose).
    Stale,
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub angles: LegAngles,
    pub pose: RetargetPose,
    pub status: TickStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PipelineWarning>,
}

impl TickOutput {
    pub fn is_fresh(&self) -> bool {
        self.status == TickStatus::Fresh
    }
}

/// The full leg pipeline for one target rig.
///
/// Immutable once built, so one instance can serve any number of callers.
/// The only state carried between ticks is the previous [`TickOutput`], which
/// the caller owns and passes back in.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    config: PipelineConfig,
    retargeter: Retargeter,
}

impl Pipeline {
    /// Validates `config` and captures its bind poses.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            retargeter: config.retargeter(),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn retargeter(&self) -> &Retargeter {
        &self.retargeter
    }

    /// Extracts angles from a snapshot already expressed in the common frame.
    pub fn extract(&self, snapshot: &PoseSnapshot) -> LegAngles {
        extract_leg_angles(
            &snapshot.left,
            &snapshot.right,
            &self.config.axes,
            self.config.angle_mode,
        )
    }

    /// Maps angles onto the target rig.
    pub fn map(&self, angles: &LegAngles) -> RetargetPose {
        self.retargeter.retarget(angles)
    }

    /// Runs one tick.
    ///
    /// When the snapshot cannot be brought into the common frame the tick is
    /// a no-op: `previous` is returned marked [`TickStatus::Stale`] (or the
    /// zero-angle pose if there is none) with a `W001` warning.
    pub fn tick(&self, input: &TickInput, previous: Option<&TickOutput>) -> TickOutput {
        match input
            .snapshot
            .to_common_frame(input.reference_frame.as_ref())
        {
            Ok(world) => self.fresh(&world),
            Err(err) => self.stale(err, previous),
        }
    }

    fn fresh(&self, world: &PoseSnapshot) -> TickOutput {
        let angles = self.extract(world);
        let mut warnings = Vec::new();
        for side in Side::ALL {
            for segment in degenerate_segments(world.leg(side), &self.config.axes) {
                debug!(%side, %segment, "segment has no sagittal direction, using fallback angle");
                warnings.push(PipelineWarning::with_path(
                    WarningCode::DegenerateSegment,
                    "segment has no direction in the sagittal plane; angle set to 0",
                    format!("{}.{}", side, segment),
                ));
            }
        }
        TickOutput {
            pose: self.map(&angles),
            angles,
            status: TickStatus::Fresh,
            warnings,
        }
    }

    fn stale(&self, err: FrameError, previous: Option<&TickOutput>) -> TickOutput {
        warn!(error = %err, has_previous = previous.is_some(), "keeping previous leg angles");
        let (angles, pose) = match previous {
            Some(prev) => (prev.angles, prev.pose),
            None => {
                let angles = LegAngles::default();
                (angles, self.map(&angles))
            }
        };
        TickOutput {
            angles,
            pose,
            status: TickStatus::Stale,
            warnings: vec![PipelineWarning::new(
                WarningCode::MissingReferenceFrame,
                err.to_string(),
            )],
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        let config = PipelineConfig::default();
        Self {
            retargeter: config.retargeter(),
            config,
        }
    }
}
