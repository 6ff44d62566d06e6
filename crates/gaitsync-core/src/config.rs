//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::angle::{AngleMode, SagittalAxes};
use crate::chain::Side;
use crate::error::ConfigError;
use crate::mapper::{BindPose, Retargeter};

/// Per-instance pipeline settings, fixed once a pipeline is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Signed or unsigned angle output.
    #[serde(default)]
    pub angle_mode: AngleMode,
    /// Axes defining the sagittal plane.
    #[serde(default)]
    pub axes: SagittalAxes,
    /// Bind pose of the target rig's left leg.
    #[serde(default = "default_left_bind")]
    pub left_bind: BindPose,
    /// Bind pose of the target rig's right leg.
    #[serde(default = "default_right_bind")]
    pub right_bind: BindPose,
}

fn default_left_bind() -> BindPose {
    BindPose::mixamo(Side::Left)
}

fn default_right_bind() -> BindPose {
    BindPose::mixamo(Side::Right)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            axes: SagittalAxes::default(),
            left_bind: default_left_bind(),
            right_bind: default_right_bind(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with the given angle mode.
    pub fn with_mode(angle_mode: AngleMode) -> Self {
        Self {
            angle_mode,
            ..Self::default()
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Checks the bind poses; axes are validated when constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for side in Side::ALL {
            if let Some(joint) = self.bind_pose(side).non_finite_joint() {
                return Err(ConfigError::InvalidBindPose {
                    side,
                    message: format!("{} rotation is not finite", joint),
                });
            }
        }
        Ok(())
    }

    /// Returns the bind pose of one side.
    pub fn bind_pose(&self, side: Side) -> &BindPose {
        match side {
            Side::Left => &self.left_bind,
            Side::Right => &self.right_bind,
        }
    }

    /// Builds the retargeter for the configured rig.
    pub fn retargeter(&self) -> Retargeter {
        Retargeter::new(self.left_bind, self.right_bind)
    }
}
