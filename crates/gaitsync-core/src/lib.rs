//! gaitsync core library
//!
//! Extracts sagittal-plane leg angles from raw joint positions and rebuilds
//! equivalent local joint rotations on a differently rigged target skeleton.
//!
//! # Overview
//!
//! Each tick runs three pure stages:
//!
//! - **Frame conversion**: local joint positions are mapped into the common
//!   frame through a [`ReferenceFrame`] (e.g., the hips bone)
//! - **Angle extraction**: thigh, calf and foot segments are projected onto
//!   the sagittal plane and measured against the forward axis
//! - **Mapping**: the angles are applied to the target rig's [`BindPose`]
//!
//! # Example
//!
//! ```
//! use gaitsync_core::{LegChain, Pipeline, PoseSnapshot, ReferenceFrame, TickInput};
//! use glam::Vec3;
//!
//! let leg = LegChain::new(
//!     Vec3::ZERO,
//!     Vec3::new(0.0, -0.4, 0.1),
//!     Vec3::new(0.0, -0.8, 0.0),
//!     Vec3::new(0.0, -0.8, 0.15),
//! );
//! let input = TickInput::new(
//!     PoseSnapshot::local(leg, leg),
//!     Some(ReferenceFrame::from_translation(Vec3::new(0.0, 1.0, 0.0))),
//! );
//!
//! let pipeline = Pipeline::default();
//! let out = pipeline.tick(&input, None);
//! assert!(out.is_fresh());
//! // Thigh hangs down and slightly forward: positive signed angle
//! assert!(out.angles.left.thigh > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`frame`]: Local → common frame conversion
//! - [`chain`]: Joint, chain and snapshot types
//! - [`angle`]: Sagittal angle extraction
//! - [`mapper`]: Angle → rotation mapping and bind poses
//! - [`pipeline`]: Per-tick orchestration with staleness handling
//! - [`config`]: Pipeline configuration
//! - [`procedural`]: Procedural leg-lift pose source
//! - [`error`]: Error and warning types

pub mod angle;
pub mod chain;
pub mod config;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod pipeline;
pub mod procedural;

// Re-export commonly used types at the crate root
pub use angle::{
    extract_angles, extract_leg_angles, segment_angle, AngleMode, AngleSet, LegAngles,
    SagittalAxes, DEGENERATE_EPSILON, FALLBACK_ANGLE,
};
pub use chain::{JointSample, LegChain, PoseSnapshot, Segment, Side, Space};
pub use config::PipelineConfig;
pub use error::{AxesError, ConfigError, FrameError, PipelineWarning, WarningCode};
pub use frame::{to_common_frame, ReferenceFrame};
pub use mapper::{
    map_rotations, BindPose, DriveAxis, EulerRotation, LegRotations, RetargetPose, Retargeter,
};
pub use pipeline::{Pipeline, TickInput, TickOutput, TickStatus};
