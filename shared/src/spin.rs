//! Wheel geometry and the spin trajectory.
//!
//! Angles are radians in wheel-local space, slice 0 starting at angle 0 and
//! increasing clockwise on screen. The pointer is fixed at `-π/2` (12 o'clock).
//! Rotation accumulates across spins and is never wrapped.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

pub fn slice_angle(slice_count: usize) -> f64 {
    TAU / slice_count.max(1) as f64
}

pub fn slice_center(index: usize, slice_count: usize) -> f64 {
    let slice = slice_angle(slice_count);
    index as f64 * slice + slice / 2.0
}

/// `1 - (1 - t)^3`: decelerates to zero velocity at `t = 1`, never overshoots.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Maps any angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Rotation that puts the center of `winner` under the pointer.
pub fn landing_rotation(winner: usize, slice_count: usize) -> f64 {
    POINTER_ANGLE - slice_center(winner, slice_count)
}

/// Shortest correction from `current` to `desired`, plus whole turns.
pub fn spin_delta(desired: f64, current: f64, extra_turns: u32) -> f64 {
    normalize_angle(desired - current) + extra_turns as f64 * TAU
}

/// Index of the slice edge most recently passed, used to detect crossings.
pub fn boundary_index(rotation: f64, slice: f64) -> i64 {
    (rotation.rem_euclid(TAU) / slice).floor() as i64
}

/// Which slice sits under the pointer for a given wheel rotation.
pub fn slice_under_pointer(rotation: f64, slice_count: usize) -> usize {
    let local = (POINTER_ANGLE - rotation).rem_euclid(TAU);
    let index = (local / slice_angle(slice_count)).floor() as usize;
    index.min(slice_count.saturating_sub(1))
}

/// One fully determined spin: where it starts, how far it goes, how long it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winner: usize,
    pub start_rotation: f64,
    pub delta: f64,
    pub extra_turns: u32,
    pub duration_ms: f64,
    pub started_at: f64,
}

impl SpinPlan {
    pub fn new(
        winner: usize,
        slice_count: usize,
        start_rotation: f64,
        extra_turns: u32,
        duration_ms: f64,
        started_at: f64,
    ) -> Self {
        let delta = spin_delta(landing_rotation(winner, slice_count), start_rotation, extra_turns);
        Self {
            winner,
            start_rotation,
            delta,
            extra_turns,
            duration_ms,
            started_at,
        }
    }

    pub fn final_rotation(&self) -> f64 {
        self.start_rotation + self.delta
    }

    pub fn direction(&self) -> f64 {
        if self.delta >= 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Rotation at `now` and whether the spin has reached its end.
    pub fn sample(&self, now_ms: f64) -> (f64, bool) {
        let elapsed = now_ms - self.started_at;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return (self.final_rotation(), true);
        }
        let progress = elapsed / self.duration_ms;
        (self.start_rotation + self.delta * ease_out_cubic(progress), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn easing_endpoints_and_monotonic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);

        let mut prev = 0.0;
        let mut prev_step = f64::MAX;
        for i in 1..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            let step = v - prev;
            assert!(step >= 0.0);
            assert!(step <= prev_step + EPS, "velocity must not increase");
            prev = v;
            prev_step = step;
        }
    }

    #[test]
    fn normalize_collapses_whole_turns() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < EPS);
        assert!((normalize_angle(-PI) - PI).abs() < EPS);
        assert!((normalize_angle(5.0 * TAU + 0.25) - 0.25).abs() < 1e-6);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < EPS);

        for i in -40..=40 {
            let a = normalize_angle(i as f64 * 0.37);
            assert!(a > -PI && a <= PI, "{a}");
        }
    }

    #[test]
    fn delta_without_extra_turns_is_normalized() {
        let delta = spin_delta(3.0 * PI, 0.0, 0);
        assert!(delta > -PI && delta <= PI);
        assert!((spin_delta(3.0 * PI, 0.0, 2) - (delta + 2.0 * TAU)).abs() < EPS);
    }

    #[test]
    fn delta_with_turns_is_positive() {
        for i in 0..50 {
            let current = i as f64 * 1.3 - 20.0;
            for winner in 0..12 {
                let delta = spin_delta(landing_rotation(winner, 12), current, 1);
                assert!(delta > 0.0);
            }
        }
    }

    #[test]
    fn plan_lands_winner_under_pointer() {
        let slices = 12;
        for (winner, start) in [(0, 0.0), (5, 17.3), (9, -4.2), (11, 123.456)] {
            let plan = SpinPlan::new(winner, slices, start, 6, 6000.0, 0.0);
            let local = (POINTER_ANGLE - plan.final_rotation()).rem_euclid(TAU);
            assert!(
                (local - slice_center(winner, slices)).abs() < 1e-6,
                "winner {winner} local {local}"
            );
            assert_eq!(slice_under_pointer(plan.final_rotation(), slices), winner);
        }
    }

    #[test]
    fn sample_follows_easing_and_snaps_at_end() {
        let plan = SpinPlan::new(3, 12, 1.0, 5, 1000.0, 500.0);
        let (r0, done0) = plan.sample(500.0);
        assert!(!done0);
        assert!((r0 - 1.0).abs() < EPS);

        let (mid, done_mid) = plan.sample(1000.0);
        assert!(!done_mid);
        assert!((mid - (1.0 + plan.delta * ease_out_cubic(0.5))).abs() < EPS);

        let (end, done) = plan.sample(1600.0);
        assert!(done);
        assert_eq!(end, plan.final_rotation());
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let plan = SpinPlan::new(0, 4, 0.0, 0, 0.0, 10.0);
        assert_eq!(plan.sample(10.0), (plan.final_rotation(), true));
    }

    #[test]
    fn boundary_index_wraps_negative_rotation() {
        let slice = slice_angle(12);
        assert_eq!(boundary_index(0.0, slice), 0);
        assert_eq!(boundary_index(slice * 1.5, slice), 1);
        assert_eq!(boundary_index(-slice * 0.5, slice), 11);
        assert_eq!(boundary_index(TAU * 3.0 + slice * 2.5, slice), 2);
    }
}
