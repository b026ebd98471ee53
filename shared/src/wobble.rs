use crate::config::WobbleConfig;
use crate::spin::boundary_index;

/// Longest step the integrator takes; a backgrounded tab can deliver huge gaps.
const MAX_STEP_SECS: f64 = 1.0 / 30.0;
const REST_EPSILON: f64 = 1e-3;

/// Pointer flap that ticks whenever a slice edge passes under it. Purely
/// cosmetic; the spin result never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerWobble {
    /// Deflection shown on screen, degrees.
    pub angle_deg: f64,
    /// Angular velocity, radians per second.
    pub velocity: f64,
    last_boundary: i64,
}

impl PointerWobble {
    /// Remembers which edge is under the pointer at the start of a spin.
    pub fn arm(&mut self, rotation: f64, slice: f64) {
        self.last_boundary = boundary_index(rotation, slice);
    }

    /// Advances one frame. `previous` and `current` are the wheel rotation at
    /// the previous and this frame; `direction` is the sign of the spin.
    pub fn step(
        &mut self,
        config: &WobbleConfig,
        previous: f64,
        current: f64,
        slice: f64,
        dt: f64,
        direction: f64,
    ) {
        let boundary = boundary_index(current, slice);
        if boundary != self.last_boundary {
            let speed = ((current - previous) / dt.max(config.min_dt_secs)).abs();
            let scale = (speed * config.velocity_gain).clamp(config.min_scale, config.max_scale);
            self.velocity += direction * config.impulse * scale;
            self.last_boundary = boundary;
        }

        let dt = dt.clamp(0.0, MAX_STEP_SECS);
        let accel =
            -config.stiffness * self.angle_deg.to_radians() - config.damping * self.velocity;
        self.velocity += accel * dt;
        self.angle_deg += (self.velocity * dt).to_degrees();
        self.angle_deg = self
            .angle_deg
            .clamp(-config.max_deflection_deg, config.max_deflection_deg);
    }

    pub fn is_at_rest(&self) -> bool {
        self.angle_deg.abs() < REST_EPSILON && self.velocity.abs() < REST_EPSILON
    }

    pub fn clear(&mut self) {
        self.angle_deg = 0.0;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::slice_angle;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn no_crossing_no_kick() {
        let config = WobbleConfig::default();
        let slice = slice_angle(12);
        let mut wobble = PointerWobble::default();
        wobble.arm(0.1, slice);
        wobble.step(&config, 0.1, 0.2, slice, FRAME, 1.0);
        assert!(wobble.is_at_rest());
    }

    #[test]
    fn crossing_kicks_in_spin_direction() {
        let config = WobbleConfig::default();
        let slice = slice_angle(12);
        let mut wobble = PointerWobble::default();
        wobble.arm(slice - 0.01, slice);
        wobble.step(&config, slice - 0.01, slice + 0.01, slice, FRAME, 1.0);
        assert!(wobble.velocity > 0.0);
        assert!(wobble.angle_deg > 0.0);

        let mut backwards = PointerWobble::default();
        backwards.arm(slice + 0.01, slice);
        backwards.step(&config, slice + 0.01, slice - 0.01, slice, FRAME, -1.0);
        assert!(backwards.angle_deg < 0.0);
    }

    #[test]
    fn faster_crossings_kick_harder_within_clamp() {
        let config = WobbleConfig::default();
        let slice = slice_angle(12);

        let kick = |travel: f64| {
            let mut w = PointerWobble::default();
            w.arm(slice - travel / 2.0, slice);
            w.step(&config, slice - travel / 2.0, slice + travel / 2.0, slice, FRAME, 1.0);
            w.velocity
        };

        let slow = kick(0.001);
        let fast = kick(0.02);
        let very_fast = kick(0.4);
        assert!(fast > slow);
        // both sit at max_scale
        assert!((very_fast - kick(0.3)).abs() < 1e-9);
    }

    #[test]
    fn deflection_is_clamped_and_settles() {
        let config = WobbleConfig::default();
        let slice = slice_angle(12);
        let mut wobble = PointerWobble::default();
        wobble.velocity = 500.0;
        wobble.step(&config, 0.0, 0.0, slice, FRAME, 1.0);
        assert!(wobble.angle_deg <= config.max_deflection_deg);

        for _ in 0..600 {
            wobble.step(&config, 0.0, 0.0, slice, FRAME, 1.0);
        }
        assert!(wobble.is_at_rest(), "{wobble:?}");
    }

    #[test]
    fn long_frame_gap_stays_stable() {
        let config = WobbleConfig::default();
        let slice = slice_angle(12);
        let mut wobble = PointerWobble::default();
        wobble.velocity = 3.0;
        wobble.step(&config, 0.0, 0.0, slice, 5.0, 1.0);
        assert!(wobble.angle_deg.is_finite());
        assert!(wobble.velocity.abs() < 3.0);
    }
}
