//! Property-based tests for angle extraction and mapping using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gaitsync-core --test proptest_angles
//! ```

use proptest::prelude::*;

use gaitsync_core::{
    extract_angles, map_rotations, segment_angle, AngleMode, BindPose, LegChain, SagittalAxes,
    Side,
};
use glam::Vec3;

fn coord() -> impl Strategy<Value = f32> {
    -2.0f32..2.0f32
}

fn point() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn chain() -> impl Strategy<Value = LegChain> {
    (point(), point(), point(), point())
        .prop_map(|(hip, knee, ankle, toe)| LegChain::new(hip, knee, ankle, toe))
}

proptest! {
    /// Unsigned angles stay in [0, 180] and are never NaN.
    #[test]
    fn unsigned_in_range(start in point(), end in point()) {
        let a = segment_angle(start, end, &SagittalAxes::default(), AngleMode::Unsigned);
        prop_assert!(!a.is_nan());
        prop_assert!((0.0..=180.0).contains(&a), "out of range: {}", a);
    }

    /// Signed angles stay in (-180, 180] and are never NaN.
    #[test]
    fn signed_in_range(start in point(), end in point()) {
        let a = segment_angle(start, end, &SagittalAxes::default(), AngleMode::Signed);
        prop_assert!(!a.is_nan());
        prop_assert!(a > -180.0 && a <= 180.0, "out of range: {}", a);
    }

    /// Sliding a segment along the lateral axis never changes its angle.
    #[test]
    fn lateral_offset_is_ignored(start in point(), end in point(), offset in coord()) {
        let axes = SagittalAxes::default();
        let shifted = end + Vec3::new(offset, 0.0, 0.0);
        let a = segment_angle(start, end, &axes, AngleMode::Signed);
        let b = segment_angle(start, shifted, &axes, AngleMode::Signed);
        prop_assert!((a - b).abs() < 1e-3 || (a.abs() > 179.9 && b.abs() > 179.9));
    }

    /// Segments parallel to the lateral axis fall back to zero.
    #[test]
    fn lateral_segments_fall_back(start in point(), length in -3.0f32..3.0f32) {
        let end = start + Vec3::new(length, 0.0, 0.0);
        for mode in [AngleMode::Unsigned, AngleMode::Signed] {
            prop_assert_eq!(segment_angle(start, end, &SagittalAxes::default(), mode), 0.0);
        }
    }

    /// Mapping never alters the non-drive axes and applies the fixed deltas.
    #[test]
    fn mapping_deltas(leg in chain()) {
        let angles = extract_angles(&leg, &SagittalAxes::default(), AngleMode::Signed);
        let bind = BindPose::mixamo(Side::Left);
        let rotations = map_rotations(&angles, &bind);

        prop_assert!((rotations.hip.x - bind.hip.x + angles.thigh).abs() < 1e-3);
        prop_assert!((rotations.knee.x - bind.knee.x + angles.thigh - angles.calf).abs() < 1e-3);
        prop_assert_eq!(rotations.foot.x, angles.foot);
        prop_assert_eq!(rotations.hip.y, bind.hip.y);
        prop_assert_eq!(rotations.hip.z, bind.hip.z);
        prop_assert_eq!(rotations.foot.z, bind.foot.z);
    }
}
