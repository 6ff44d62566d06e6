//! Angles command implementation
//!
//! Extracts the sagittal thigh, calf and foot angles of both legs from a
//! pose file.

use anyhow::{Context, Result};
use colored::Colorize;
use gaitsync_core::{
    AngleMode, JointSample, LegAngles, Pipeline, PipelineWarning, Side, TickInput, TickOutput,
    TickStatus,
};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::{load_config, load_tick_input};

/// Machine-readable output of the angles command.
#[derive(Debug, Serialize)]
pub struct AnglesOutput {
    pub angle_mode: AngleMode,
    pub status: TickStatus,
    pub angles: LegAngles,
    pub warnings: Vec<PipelineWarning>,
    /// Input joints per leg in chain order, for drawing the leg polylines.
    pub joints: JointPolylines,
}

#[derive(Debug, Serialize)]
pub struct JointPolylines {
    pub left: [JointSample; 4],
    pub right: [JointSample; 4],
}

impl AnglesOutput {
    /// Assembles the report for one tick of `input`.
    pub fn new(angle_mode: AngleMode, input: &TickInput, output: TickOutput) -> Self {
        Self {
            angle_mode,
            status: output.status,
            angles: output.angles,
            warnings: output.warnings,
            joints: JointPolylines {
                left: input.snapshot.samples(Side::Left),
                right: input.snapshot.samples(Side::Right),
            },
        }
    }
}

/// Run the angles command
///
/// # Arguments
/// * `input_path` - Path to the pose file (tick input or bare snapshot)
/// * `config_path` - Optional pipeline configuration file
/// * `unsigned` - Force unsigned angles
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    input_path: &str,
    config_path: Option<&str>,
    unsigned: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let config = load_config(config_path, unsigned)?;
    let pipeline = Pipeline::new(config).context("Invalid pipeline configuration")?;
    let input = load_tick_input(Path::new(input_path))?;

    let output = pipeline.tick(&input, None);

    if json_output {
        let out = AnglesOutput::new(config.angle_mode, &input, output);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Pose:".cyan().bold(), input_path);
    reporting::print_status(&output);
    reporting::print_warnings(&output.warnings);
    println!();
    for line in reporting::angle_panel(config.angle_mode, &output.angles) {
        println!("  {}", line);
    }

    Ok(ExitCode::SUCCESS)
}
