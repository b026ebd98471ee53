use serde::{Deserialize, Serialize};

use crate::outcome::{default_fruit_specs, OutcomeSpec};
use crate::snapshot::DEFAULT_STORAGE_KEY;

/// Timing of a single spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Extra full turns are drawn from `min_turns..min_turns + turn_span`.
    pub min_turns: u32,
    pub turn_span: u32,
    /// Duration is drawn from `base_duration_ms..base_duration_ms + duration_jitter_ms`.
    pub base_duration_ms: u32,
    pub duration_jitter_ms: u32,
    /// No extra turns and a short duration.
    pub reduced_motion: bool,
    pub reduced_duration_ms: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_turns: 5,
            turn_span: 4,
            base_duration_ms: 5600,
            duration_jitter_ms: 1200,
            reduced_motion: false,
            reduced_duration_ms: 900,
        }
    }
}

/// Spring-damper constants for the pointer tick. Tuned by feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WobbleConfig {
    pub enabled: bool,
    pub stiffness: f64,
    pub damping: f64,
    pub impulse: f64,
    /// Multiplies angular speed (rad/s) into the impulse scale.
    pub velocity_gain: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub max_deflection_deg: f64,
    /// Shortest frame interval used when estimating angular speed.
    pub min_dt_secs: f64,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stiffness: 160.0,
            damping: 18.0,
            impulse: 2.6,
            velocity_gain: 1.2,
            min_scale: 0.6,
            max_scale: 2.2,
            max_deflection_deg: 18.0,
            min_dt_secs: 1.0 / 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub spin: SpinConfig,
    pub wobble: WobbleConfig,
    pub storage_key: String,
    /// How long the completion notice waits before the wheel resets itself.
    pub auto_reset_ms: f64,
    pub outcomes: Vec<OutcomeSpec>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin: SpinConfig::default(),
            wobble: WobbleConfig::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            auto_reset_ms: 3500.0,
            outcomes: default_fruit_specs(),
        }
    }
}

impl WheelConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
