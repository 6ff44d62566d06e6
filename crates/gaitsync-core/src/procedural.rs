//! Procedural leg-lift pose source.
//!
//! Both legs start stretched forward along `+Z` in the hips frame and are
//! lifted and pulled back on a sine (left) or cosine (right) cycle. Used to
//! exercise the pipeline without an external pose source.

use glam::Vec3;

use crate::chain::{LegChain, PoseSnapshot, Side};

/// Lateral distance of each hip joint from the hips origin.
pub const HIP_HALF_WIDTH: f32 = 0.08207788;

const KNEE_FORWARD: f32 = 0.3;
const ANKLE_FORWARD: f32 = 0.58;
const TOE_FORWARD: f32 = 0.65;
const TOE_RAISE: f32 = 0.1;

const LIFT_AMPLITUDE: f32 = 0.1;
const PULL_AMPLITUDE: f32 = 0.05;
const FOOT_PHASE: f32 = 0.2;

/// Local-space chain of one leg at `time` seconds.
pub fn leg_lift_chain(side: Side, time: f32) -> LegChain {
    let (x, wave): (f32, fn(f32) -> f32) = match side {
        Side::Left => (-HIP_HALF_WIDTH, f32::sin),
        Side::Right => (HIP_HALF_WIDTH, f32::cos),
    };
    let lift = (wave(time) + 1.0) * LIFT_AMPLITUDE;
    let foot_lift = (wave(time + FOOT_PHASE) + 1.0) * LIFT_AMPLITUDE;
    let pull = (wave(time) + 1.0) * PULL_AMPLITUDE;

    LegChain::new(
        Vec3::new(x, 0.0, 0.0),
        Vec3::new(x, lift, KNEE_FORWARD - pull),
        Vec3::new(x, foot_lift, ANKLE_FORWARD - pull),
        Vec3::new(x, TOE_RAISE + lift, TOE_FORWARD - pull),
    )
}

/// Local-space snapshot of both legs at `time` seconds.
pub fn leg_lift_snapshot(time: f32) -> PoseSnapshot {
    PoseSnapshot::local(
        leg_lift_chain(Side::Left, time),
        leg_lift_chain(Side::Right, time),
    )
}

/// Iterator over `frames` snapshots spaced `dt` seconds apart, starting at `dt`.
pub fn leg_lift_frames(frames: usize, dt: f32) -> impl Iterator<Item = (f32, PoseSnapshot)> {
    (1..=frames).map(move |i| {
        let time = i as f32 * dt;
        (time, leg_lift_snapshot(time))
    })
}
