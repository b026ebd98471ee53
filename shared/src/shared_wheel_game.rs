use log::{debug, info, warn};

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::fair_rng::FairRng;
use crate::outcome::OutcomeRegistry;
use crate::snapshot::{persist, rehydrate, SnapshotStore};
use crate::spin::{slice_angle, SpinPlan};
use crate::wobble::PointerWobble;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// The reset button.
    Manual,
    /// Every slice had been chosen and the completion notice was dismissed
    /// or timed out.
    Exhaustion,
}

/// The winning slice as the result modal presents it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub id: String,
    pub label: String,
    pub icons: Vec<String>,
    pub colors: Vec<String>,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    SpinStarted { duration_ms: f64 },
    OutcomeSelected(Selection),
    Exhausted,
    Reset(ResetCause),
}

/// What one animation frame should draw, and anything that happened on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rotation: f64,
    pub pointer_deg: f64,
    pub spinning: bool,
    pub events: Vec<WheelEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Spinning(SpinPlan),
}

/// Owned state of one wheel widget: the slices, the rotation, the in-flight
/// spin and the store that remembers what has been picked.
///
/// Time is always passed in (milliseconds on a monotonic clock), so the whole
/// machine can be driven by synthetic timestamps.
pub struct WheelGame<S: SnapshotStore> {
    registry: OutcomeRegistry,
    config: WheelConfig,
    rng: FairRng,
    store: S,
    rotation: f64,
    phase: Phase,
    pointer: PointerWobble,
    last_frame_at: Option<f64>,
    reset_deadline: Option<f64>,
}

impl<S: SnapshotStore> WheelGame<S> {
    /// Builds the registry from `config.outcomes` and rehydrates it once from
    /// `store`.
    pub fn new(config: WheelConfig, rng: FairRng, store: S) -> Result<Self, WheelError> {
        let mut registry = OutcomeRegistry::from_specs(config.outcomes.clone())?;
        if rehydrate(&mut registry, &store) {
            debug!(
                "restored wheel state, {} of {} remaining",
                registry.remaining(),
                registry.len()
            );
        }

        Ok(Self {
            registry,
            config,
            rng,
            store,
            rotation: 0.0,
            phase: Phase::Idle,
            pointer: PointerWobble::default(),
            last_frame_at: None,
            reset_deadline: None,
        })
    }

    pub fn registry(&self) -> &OutcomeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn pointer_deg(&self) -> f64 {
        self.pointer.angle_deg
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning(_))
    }

    pub fn active_spin(&self) -> Option<&SpinPlan> {
        match &self.phase {
            Phase::Spinning(plan) => Some(plan),
            Phase::Idle => None,
        }
    }

    /// True while frames still change what is on screen.
    pub fn is_animating(&self) -> bool {
        self.is_spinning() || !self.pointer.is_at_rest()
    }

    /// Deadline of the automatic reset armed when the last slice was picked.
    pub fn pending_reset_at(&self) -> Option<f64> {
        self.reset_deadline
    }

    fn slice(&self) -> f64 {
        slice_angle(self.registry.len())
    }

    /// Picks the winner and plans the spin. The result is decided here; the
    /// animation only reveals it.
    pub fn start_spin(&mut self, now_ms: f64) -> Result<WheelEvent, WheelError> {
        if self.is_spinning() {
            return Err(WheelError::Busy);
        }

        let eligible = self.registry.eligible_indices();
        if eligible.is_empty() {
            debug!("spin requested with nothing left to pick");
            return Err(WheelError::Exhausted);
        }

        let winner = eligible[self.rng.uniform_int(eligible.len())];
        let spin = &self.config.spin;
        let (extra_turns, duration_ms) = if spin.reduced_motion {
            (0, spin.reduced_duration_ms)
        } else {
            (
                self.rng.offset_int(spin.min_turns, spin.turn_span),
                self.rng.offset_int(spin.base_duration_ms, spin.duration_jitter_ms),
            )
        };

        let plan = SpinPlan::new(
            winner,
            self.registry.len(),
            self.rotation,
            extra_turns,
            duration_ms as f64,
            now_ms,
        );
        debug!(
            "spin planned: {} candidates, {} extra turns over {} ms",
            eligible.len(),
            extra_turns,
            duration_ms
        );

        let slice = self.slice();
        self.pointer.arm(self.rotation, slice);
        self.last_frame_at = Some(now_ms);
        self.phase = Phase::Spinning(plan);
        Ok(WheelEvent::SpinStarted { duration_ms: plan.duration_ms })
    }

    /// Advances the animation to `now_ms`. Settles the spin on the frame that
    /// reaches its duration, and fires a due automatic reset.
    pub fn advance(&mut self, now_ms: f64) -> Frame {
        let dt = self
            .last_frame_at
            .map(|t| ((now_ms - t) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_at = Some(now_ms);

        let slice = self.slice();
        let mut events = Vec::new();

        match self.phase {
            Phase::Spinning(plan) => {
                let previous = self.rotation;
                let (rotation, done) = plan.sample(now_ms);
                if self.config.wobble.enabled {
                    self.pointer
                        .step(&self.config.wobble, previous, rotation, slice, dt, plan.direction());
                }
                self.rotation = rotation;

                if done {
                    self.rotation = plan.final_rotation();
                    self.phase = Phase::Idle;
                    self.settle(plan.winner, now_ms, &mut events);
                }
            }
            Phase::Idle => {
                if self.config.wobble.enabled && !self.pointer.is_at_rest() {
                    let rotation = self.rotation;
                    self.pointer
                        .step(&self.config.wobble, rotation, rotation, slice, dt, 1.0);
                }
                if self.reset_deadline.is_some_and(|deadline| now_ms >= deadline) {
                    events.push(self.reset_all(ResetCause::Exhaustion));
                }
            }
        }

        Frame {
            rotation: self.rotation,
            pointer_deg: self.pointer.angle_deg,
            spinning: self.is_spinning(),
            events,
        }
    }

    fn settle(&mut self, winner: usize, now_ms: f64, events: &mut Vec<WheelEvent>) {
        let outcome = match self.registry.commit(winner) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("could not commit spin result: {e}");
                return;
            }
        };
        let (id, label, icons, colors) = (
            outcome.id.clone(),
            outcome.label.clone(),
            outcome.icons(),
            outcome.colors(),
        );

        persist(&self.registry, &self.store);
        let remaining = self.registry.remaining();
        debug!("spin settled on {label} ({remaining} remaining)");

        events.push(WheelEvent::OutcomeSelected(Selection {
            index: winner,
            id,
            label,
            icons,
            colors,
            remaining,
        }));

        if remaining == 0 {
            self.reset_deadline = Some(now_ms + self.config.auto_reset_ms);
            events.push(WheelEvent::Exhausted);
        }
    }

    /// The user dismissed the result. Completes a pending automatic reset
    /// early, if one is armed.
    pub fn acknowledge(&mut self) -> Option<WheelEvent> {
        if self.reset_deadline.is_some() && !self.is_spinning() {
            Some(self.reset_all(ResetCause::Exhaustion))
        } else {
            None
        }
    }

    /// Clears every chosen flag and returns the wheel to its home position.
    /// A spin in flight is never interrupted.
    pub fn reset(&mut self) -> Result<WheelEvent, WheelError> {
        if self.is_spinning() {
            return Err(WheelError::Busy);
        }
        Ok(self.reset_all(ResetCause::Manual))
    }

    fn reset_all(&mut self, cause: ResetCause) -> WheelEvent {
        self.registry.reset();
        self.rotation = 0.0;
        self.pointer.clear();
        self.reset_deadline = None;
        self.store.clear();
        info!("wheel reset ({cause:?})");
        WheelEvent::Reset(cause)
    }
}
