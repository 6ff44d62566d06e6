//! gaitsync CLI library.
//!
//! Input loading and command implementations for the `gaitsync` binary.

pub mod commands;
pub mod input;
