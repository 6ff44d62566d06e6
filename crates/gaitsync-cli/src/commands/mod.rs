//! CLI command implementations

pub mod angles;
pub mod demo;
pub mod retarget;

mod reporting;
