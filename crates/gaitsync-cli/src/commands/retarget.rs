//! Retarget command implementation
//!
//! Maps leg angles (from a pose file or given directly) onto the target
//! rig's bind pose and prints the resulting local Euler rotations.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use gaitsync_core::{AngleSet, LegAngles, Pipeline, RetargetPose, TickStatus};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::{load_config, load_tick_input};

/// Where the angles to retarget come from.
#[derive(Debug, Clone, Copy)]
pub enum AngleSource<'a> {
    /// Extract from a pose file.
    Pose(&'a str),
    /// Use the given angles as-is.
    Direct { left: AngleSet, right: AngleSet },
}

impl<'a> AngleSource<'a> {
    /// Resolves the source from `--input` or the `--left`/`--right` pair.
    pub fn from_args(
        input: Option<&'a str>,
        left: Option<AngleSet>,
        right: Option<AngleSet>,
    ) -> Result<Self> {
        match (input, left, right) {
            (Some(path), None, None) => Ok(AngleSource::Pose(path)),
            (None, Some(left), Some(right)) => Ok(AngleSource::Direct { left, right }),
            (Some(_), _, _) => bail!("--input cannot be combined with --left/--right"),
            (None, _, _) => bail!("Either --input or both --left and --right are required"),
        }
    }
}

/// Machine-readable output of the retarget command.
#[derive(Debug, Serialize)]
pub struct RetargetOutput {
    pub status: TickStatus,
    pub angles: LegAngles,
    pub pose: RetargetPose,
    /// Quaternions `[x, y, z, w]` per joint, for engines that want them.
    pub quaternions: QuaternionPose,
}

#[derive(Debug, Serialize)]
pub struct QuaternionPose {
    pub left: [[f32; 4]; 3],
    pub right: [[f32; 4]; 3],
}

impl QuaternionPose {
    fn from_pose(pose: &RetargetPose) -> Self {
        let quats = |leg: &gaitsync_core::LegRotations| {
            [leg.hip, leg.knee, leg.foot].map(|r| r.to_quat().to_array())
        };
        Self {
            left: quats(&pose.left),
            right: quats(&pose.right),
        }
    }
}

/// Run the retarget command
///
/// # Arguments
/// * `source` - Pose file or direct angles
/// * `config_path` - Optional pipeline configuration file (bind poses)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(source: AngleSource<'_>, config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let config = load_config(config_path, false)?;
    let pipeline = Pipeline::new(config).context("Invalid pipeline configuration")?;

    let (status, angles, warnings) = match source {
        AngleSource::Pose(path) => {
            let input = load_tick_input(Path::new(path))?;
            let output = pipeline.tick(&input, None);
            (output.status, output.angles, output.warnings)
        }
        AngleSource::Direct { left, right } => {
            if !(left.is_finite() && right.is_finite()) {
                bail!("Leg angles must be finite numbers");
            }
            (TickStatus::Fresh, LegAngles::new(left, right), Vec::new())
        }
    };
    let pose = pipeline.map(&angles);

    if json_output {
        let out = RetargetOutput {
            status,
            angles,
            quaternions: QuaternionPose::from_pose(&pose),
            pose,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    match source {
        AngleSource::Pose(path) => println!("{} {}", "Retargeting:".cyan().bold(), path),
        AngleSource::Direct { .. } => println!("{}", "Retargeting given angles".cyan().bold()),
    }
    if status == TickStatus::Stale {
        println!("{}", "Status: stale (no reference frame)".yellow());
    }
    reporting::print_warnings(&warnings);
    println!();
    for line in reporting::angle_panel(config.angle_mode, &angles) {
        println!("  {}", line);
    }
    println!();
    for line in reporting::pose_lines(&pose) {
        println!("  {}", line);
    }

    Ok(ExitCode::SUCCESS)
}
