//! Error and warning types for the leg pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::Side;

/// Failure to express a joint position in the common frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// No reference frame was supplied for a local-space conversion.
    #[error("reference frame is not set; local joint positions cannot be converted")]
    MissingReferenceFrame,

    /// A reference frame component is non-finite or degenerate.
    #[error("invalid reference frame {part}")]
    InvalidTransform { part: &'static str },
}

/// Invalid sagittal axis configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxesError {
    /// One of the axes has (near) zero length.
    #[error("{axis} axis has zero length")]
    ZeroAxis { axis: &'static str },

    /// Reference and lateral axes are not perpendicular.
    #[error("reference and lateral axes must be orthogonal (dot = {dot})")]
    NotOrthogonal { dot: f32 },
}

/// Errors raised while loading or validating a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A bind pose contains non-finite rotation values.
    #[error("invalid {side} bind pose: {message}")]
    InvalidBindPose { side: Side, message: String },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Warning codes reported by a pipeline tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningCode {
    /// W001: Local-space input arrived without a reference frame
    #[serde(rename = "W001")]
    MissingReferenceFrame,
    /// W002: A segment has no direction in the sagittal plane
    #[serde(rename = "W002")]
    DegenerateSegment,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingReferenceFrame => "W001",
            WarningCode::DegenerateSegment => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-fatal condition observed while processing a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the offending data (e.g., "left.calf").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PipelineWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new warning with a data path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}
