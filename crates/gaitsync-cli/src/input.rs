//! Loading of pose snapshots and pipeline configuration from disk.
//!
//! A pose file is either a full tick input (`{"snapshot": ..., "reference_frame": ...}`)
//! or a bare snapshot (`{"space": ..., "left": ..., "right": ...}`); a bare
//! snapshot carries no reference frame.

use anyhow::{Context, Result};
use gaitsync_core::{AngleMode, AngleSet, PipelineConfig, PoseSnapshot, TickInput};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads a tick input from a JSON pose file.
pub fn load_tick_input(path: &Path) -> Result<TickInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pose file: {}", path.display()))?;
    parse_tick_input(&content)
        .with_context(|| format!("Failed to parse pose file: {}", path.display()))
}

/// Parses a tick input or a bare snapshot.
pub fn parse_tick_input(json: &str) -> Result<TickInput> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("snapshot").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        let snapshot: PoseSnapshot = serde_json::from_value(value)?;
        Ok(TickInput::new(snapshot, None))
    }
}

/// Resolves the pipeline configuration from an optional file and the
/// `--unsigned` switch. The switch wins over the file.
pub fn load_config(path: Option<&str>, unsigned: bool) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => PipelineConfig::default(),
    };
    if unsigned {
        config.angle_mode = AngleMode::Unsigned;
    }
    debug!(config_path = ?path, angle_mode = ?config.angle_mode, "resolved pipeline config");
    Ok(config)
}

/// Parses a `thigh,calf,foot` triplet of degrees.
pub fn parse_angle_set(s: &str) -> Result<AngleSet, String> {
    let values = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<f32>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(_) => Err(format!("invalid angle '{}': must be a finite number", part)),
                Err(e) => Err(format!("invalid angle '{}': {}", part, e)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [thigh, calf, foot] => Ok(AngleSet::new(*thigh, *calf, *foot)),
        _ => Err(format!(
            "expected 3 comma-separated angles (thigh,calf,foot), got {}",
            values.len()
        )),
    }
}
