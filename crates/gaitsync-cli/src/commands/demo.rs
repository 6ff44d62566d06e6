//! Demo command implementation
//!
//! Drives the pipeline with the procedural leg-lift animation and prints the
//! angles of every frame.

use anyhow::{bail, Result};
use colored::Colorize;
use gaitsync_core::procedural::leg_lift_frames;
use gaitsync_core::{Pipeline, PipelineConfig, ReferenceFrame, TickInput, TickOutput};
use serde::Serialize;
use std::process::ExitCode;

use super::reporting;
use crate::input::load_config;

/// One frame of demo output.
#[derive(Debug, Serialize)]
pub struct DemoFrame {
    pub time: f32,
    #[serde(flatten)]
    pub output: TickOutput,
}

/// Lazily ticks `frames` frames spaced `dt` apart, carrying only the
/// previous output from one tick to the next.
pub fn simulate(
    config: PipelineConfig,
    frames: usize,
    dt: f32,
) -> Result<impl Iterator<Item = DemoFrame>> {
    let pipeline = Pipeline::new(config)?;
    let hips = ReferenceFrame::identity();

    Ok(leg_lift_frames(frames, dt).scan(
        None::<TickOutput>,
        move |previous, (time, snapshot)| {
            let output = pipeline.tick(&TickInput::new(snapshot, Some(hips)), previous.as_ref());
            *previous = Some(output.clone());
            Some(DemoFrame { time, output })
        },
    ))
}

/// Run the demo command
///
/// # Arguments
/// * `frames` - Number of frames to simulate
/// * `dt` - Seconds between frames
/// * `unsigned` - Force unsigned angles
/// * `json_output` - Whether to output one JSON object per frame
pub fn run(frames: usize, dt: f32, unsigned: bool, json_output: bool) -> Result<ExitCode> {
    if !(dt.is_finite() && dt > 0.0) {
        bail!("--dt must be a positive number of seconds (got {})", dt);
    }
    let config = load_config(None, unsigned)?;
    let result = simulate(config, frames, dt)?;

    if json_output {
        for frame in result {
            println!("{}", serde_json::to_string(&frame)?);
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} frames, dt = {}s, {}",
        "Leg lift demo:".cyan().bold(),
        frames,
        dt,
        config.angle_mode.label()
    );
    println!(
        "{}",
        format!(
            "{:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "t", "L.thigh", "L.calf", "L.foot", "R.thigh", "R.calf", "R.foot"
        )
        .dimmed()
    );
    let mut last = None;
    for frame in result {
        let (l, r) = (frame.output.angles.left, frame.output.angles.right);
        println!(
            "{:>8.3} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            frame.time, l.thigh, l.calf, l.foot, r.thigh, r.calf, r.foot
        );
        last = Some(frame.output.angles);
    }

    if let Some(angles) = last {
        println!();
        for line in reporting::angle_panel(config.angle_mode, &angles) {
            println!("  {}", line);
        }
    }

    Ok(ExitCode::SUCCESS)
}
