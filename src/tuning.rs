//! Data-driven game balance
//!
//! Every gameplay constant lives here so the difficulty curve can be
//! adjusted without touching the simulation. Persisted separately from
//! progression, falling back to defaults on any problem.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout (fractions of the viewport) ===
    /// Player top edge as a fraction of viewport height
    pub player_y_ratio: f32,
    /// Player width as a fraction of viewport width
    pub player_width_ratio: f32,
    /// Falling item size as a fraction of viewport width
    pub item_size_ratio: f32,

    // === Movement ===
    /// Fraction of the remaining distance to the pointer covered per tick
    pub follow_factor: f32,
    /// Base fall speed (units per nominal frame, before the x10 scale)
    pub base_gravity: f32,
    /// Fall speed increase per level (multiplicative, 0.05 = +5%)
    pub speed_per_level: f32,
    /// Random fall speed jitter range [min, max)
    pub speed_jitter: (f32, f32),
    /// Spin range, radians per tick (uniform in [-spin, spin))
    pub max_spin: f32,
    /// Nominal frame length the speeds are expressed in (ms)
    pub nominal_frame_ms: f32,

    // === Spawning ===
    /// Expected ticks between spawns at level 0
    pub base_spawn_interval: f32,
    /// Lower bound on the spawn interval
    pub min_spawn_interval: f32,
    /// Interval reduction per level
    pub spawn_interval_step: f32,
    /// Eaten-count at which the level-1 tutorial poison appears
    pub tutorial_poison_index: u32,
    /// Poison chance at level 0 (level >= 2 only)
    pub poison_base_chance: f64,
    /// Poison chance added per level (never capped)
    pub poison_chance_per_level: f64,

    // === Scoring ===
    /// Points per food, multiplied by the current level
    pub points_per_food: u64,
    /// Foods eaten per difficulty level
    pub level_step: u32,

    // === Timers (ms) ===
    /// How long the eating face is shown
    pub eat_animation_ms: f32,
    /// Delay between the final frame and the result reveal
    pub reveal_delay_ms: f32,

    // === Rewards ===
    /// Coins granted per point of score
    pub coin_multiplier: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_y_ratio: 0.85,
            player_width_ratio: 0.25,
            item_size_ratio: 0.12,

            follow_factor: 0.2,
            base_gravity: 0.15,
            speed_per_level: 0.05,
            speed_jitter: (0.8, 1.3),
            max_spin: 0.05,
            nominal_frame_ms: crate::consts::NOMINAL_FRAME_MS,

            base_spawn_interval: 120.0,
            min_spawn_interval: 30.0,
            spawn_interval_step: 5.0,
            tutorial_poison_index: 2,
            poison_base_chance: 0.1,
            poison_chance_per_level: 0.02,

            points_per_food: 10,
            level_step: 5,

            eat_animation_ms: 500.0,
            reveal_delay_ms: 1000.0,

            coin_multiplier: 0.1,
        }
    }
}

impl Tuning {
    /// Storage key for persisted tuning overrides
    pub const STORAGE_KEY: &'static str = "munch_drop_tuning";

    /// Expected ticks between spawns at the given level
    pub fn spawn_interval(&self, level: u32) -> f32 {
        (self.base_spawn_interval - level as f32 * self.spawn_interval_step)
            .max(self.min_spawn_interval)
    }

    /// Poison probability at the given level (level >= 2 policy).
    ///
    /// Exceeds 1.0 at very high levels; callers compare a [0, 1) sample
    /// against it, so every item is poison from that point on.
    pub fn poison_chance(&self, level: u32) -> f64 {
        self.poison_base_chance + level as f64 * self.poison_chance_per_level
    }

    /// Fall speed multiplier from level alone (jitter applied by the spawner)
    pub fn level_speed_factor(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.speed_per_level
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load overrides from a store, falling back to defaults
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::error!("Ignoring malformed tuning overrides: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Tuning store unavailable, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
