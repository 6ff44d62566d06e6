//! Shared text formatting for command output.

use colored::Colorize;
use gaitsync_core::{
    AngleMode, LegAngles, LegRotations, PipelineWarning, RetargetPose, Segment, Side, TickOutput,
    TickStatus,
};

fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Angle panel lines: the mode, then one line per leg segment.
pub(crate) fn angle_panel(mode: AngleMode, angles: &LegAngles) -> Vec<String> {
    let mut lines = vec![format!("Angle Mode: {}", mode.label())];
    for side in Side::ALL {
        let set = angles.side(side);
        for segment in Segment::ALL {
            let label = format!("{} {} Angle:", title(side.as_str()), title(segment.as_str()));
            lines.push(format!("{:<18} {:.1}°", label, set.get(segment)));
        }
    }
    lines
}

fn rotation_lines(side: Side, rotations: &LegRotations) -> Vec<String> {
    [
        ("Hip", rotations.hip),
        ("Knee", rotations.knee),
        ("Foot", rotations.foot),
    ]
    .into_iter()
    .map(|(joint, r)| {
        format!(
            "{:<11} ({:.3}, {:.3}, {:.3})",
            format!("{} {}:", title(side.as_str()), joint),
            r.x,
            r.y,
            r.z
        )
    })
    .collect()
}

/// Local Euler rotation lines for both legs.
pub(crate) fn pose_lines(pose: &RetargetPose) -> Vec<String> {
    Side::ALL
        .into_iter()
        .flat_map(|side| rotation_lines(side, pose.side(side)))
        .collect()
}

pub(crate) fn print_warnings(warnings: &[PipelineWarning]) {
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}

pub(crate) fn print_status(output: &TickOutput) {
    match output.status {
        TickStatus::Fresh => println!("{} {}", "Status:".dimmed(), "fresh".green()),
        TickStatus::Stale => println!(
            "{} {}",
            "Status:".dimmed(),
            "stale (previous values kept)".yellow()
        ),
    }
}
