//! Spin planning and outcome
//!
//! Angle convention: screen angles grow clockwise (canvas y points down).
//! At rotation 0 segment 0 starts at the top (`SEGMENT_ORIGIN`) and segments
//! follow clockwise. The indicator sits at the top (`INDICATOR_ANGLE`).
//! Rotation is added to every segment angle when drawing.
//!
//! `winning_segment` and `target_offset` are inverses of each other; changing
//! either constant changes both.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FULL_ROTATIONS, MIN_FULL_ROTATIONS, SPIN_DURATION_MS};
use crate::normalize_angle;

/// Screen angle where segment 0 begins at rotation 0
pub const SEGMENT_ORIGIN: f64 = -FRAC_PI_2;
/// Screen angle of the fixed indicator
pub const INDICATOR_ANGLE: f64 = -FRAC_PI_2;
/// Offset added to the rotation before indexing
const INDICATOR_OFFSET: f64 = SEGMENT_ORIGIN - INDICATOR_ANGLE;

/// Animation timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    pub duration_ms: f64,
    pub min_full_rotations: u32,
    pub max_full_rotations: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            min_full_rotations: MIN_FULL_ROTATIONS,
            max_full_rotations: MAX_FULL_ROTATIONS,
        }
    }
}

/// Cubic ease-out: fast start, settles at 1
#[inline]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Angular width of one segment
#[inline]
pub fn segment_angle(segment_count: usize) -> f64 {
    TAU / segment_count.max(1) as f64
}

/// Index of the segment under the indicator for a rotation
pub fn winning_segment(rotation: f64, segment_count: usize) -> usize {
    if segment_count == 0 {
        return 0;
    }
    let width = segment_angle(segment_count);
    let aligned = normalize_angle(normalize_angle(rotation) + INDICATOR_OFFSET);
    let raw = ((aligned / width).floor() as usize).min(segment_count - 1);
    // Rotation turns clockwise, indices are read counter-clockwise from the indicator
    (segment_count - raw - 1) % segment_count
}

/// Extra rotation (in [0, 2π)) that brings `target`'s center under the
/// indicator starting from `current`
pub fn target_offset(current: f64, target: usize, segment_count: usize) -> f64 {
    let width = segment_angle(segment_count);
    let resting = INDICATOR_ANGLE - SEGMENT_ORIGIN - (target as f64 + 0.5) * width;
    normalize_angle(resting - current)
}

/// One spin animation, from request to resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub target: usize,
    pub full_rotations: u32,
    pub start_rotation: f64,
    pub total_rotation: f64,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl SpinPlan {
    pub fn new(
        current: f64,
        target: usize,
        segment_count: usize,
        full_rotations: u32,
        started_at: f64,
        duration_ms: f64,
    ) -> Self {
        let total_rotation =
            full_rotations as f64 * TAU + target_offset(current, target, segment_count);
        Self {
            target,
            full_rotations,
            start_rotation: current,
            total_rotation,
            started_at,
            duration_ms,
        }
    }

    pub fn end_rotation(&self) -> f64 {
        self.start_rotation + self.total_rotation
    }

    /// Linear time progress in [0, 1]
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Eased rotation at `now`; exactly the end rotation once complete
    pub fn rotation_at(&self, now: f64) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            self.end_rotation()
        } else {
            self.start_rotation + self.total_rotation * ease_out_cubic(progress)
        }
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
    }

    #[test]
    fn test_rest_position() {
        // Just past zero the top shows the last segment; just before, the first
        assert_eq!(winning_segment(0.01, 8), 7);
        assert_eq!(winning_segment(-0.01, 8), 0);
        assert_eq!(winning_segment(TAU - 0.01, 8), 0);
    }

    #[test]
    fn test_ten_segments_target_three() {
        let plan = SpinPlan::new(0.0, 3, 10, 4, 0.0, 4000.0);
        assert_eq!(winning_segment(plan.end_rotation(), 10), 3);
        assert!(plan.total_rotation >= 4.0 * TAU);
        assert!(plan.total_rotation < 5.0 * TAU);
    }

    #[test]
    fn test_plan_from_nonzero_rotation() {
        let first = SpinPlan::new(0.0, 5, 8, 3, 0.0, 4000.0);
        let second = SpinPlan::new(first.end_rotation(), 2, 8, 6, 4000.0, 4000.0);
        assert_eq!(winning_segment(second.end_rotation(), 8), 2);
        assert!(second.end_rotation() > first.end_rotation());
    }

    #[test]
    fn test_rotation_timeline() {
        let plan = SpinPlan::new(1.0, 0, 4, 3, 1000.0, 4000.0);
        assert_eq!(plan.rotation_at(500.0), 1.0);
        assert_eq!(plan.rotation_at(1000.0), 1.0);
        let mid = plan.rotation_at(3000.0);
        assert!((mid - (1.0 + plan.total_rotation * 0.875)).abs() < 1e-9);
        assert_eq!(plan.rotation_at(5000.0), plan.end_rotation());
        assert!(plan.is_complete(5000.0));
        assert!(!plan.is_complete(4999.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let plan = SpinPlan::new(0.0, 1, 3, 3, 0.0, 0.0);
        assert!(plan.is_complete(0.0));
        assert_eq!(plan.rotation_at(0.0), plan.end_rotation());
    }

    proptest! {
        #[test]
        fn prop_winning_segment_in_range(rotation in -1.0e6f64..1.0e6, count in 1usize..64) {
            prop_assert!(winning_segment(rotation, count) < count);
        }

        #[test]
        fn prop_spin_round_trip(
            count in 1usize..64,
            target_seed in 0usize..1000,
            current in 0.0f64..500.0,
            full in 3u32..=6,
        ) {
            let target = target_seed % count;
            let plan = SpinPlan::new(current, target, count, full, 0.0, 4000.0);
            prop_assert_eq!(winning_segment(plan.end_rotation(), count), target);
            prop_assert!(plan.total_rotation >= full as f64 * TAU);
        }

        #[test]
        fn prop_rotation_monotonic(t1 in 0.0f64..4000.0, dt in 0.0f64..4000.0) {
            let plan = SpinPlan::new(0.0, 2, 8, 5, 0.0, 4000.0);
            prop_assert!(plan.rotation_at(t1 + dt) >= plan.rotation_at(t1));
        }
    }
}
