//! Munch Drop - catch the falling food, dodge the poison
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, falling items, catches, difficulty)
//! - `progression`: Lifetime XP, derived level, coins and rank
//! - `persistence`: Key-value storage backends for the progression blob
//! - `game`: Frame driver tying a session to a progression store
//! - `platform`: Browser bindings
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod sim;
pub mod tuning;

pub use assets::{AssetCatalog, AssetKey};
pub use game::{Frame, Game, LoopToken};
pub use progression::{ProgressionStore, ProgressionSummary};
pub use sim::{GameSession, Viewport};
pub use tuning::Tuning;

/// Host-facing constants
pub mod consts {
    /// Frame length the fall speeds are expressed in (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;
    /// Display refresh interval the headless driver simulates (60 Hz)
    pub const DISPLAY_FRAME_MS: f64 = 1000.0 / 60.0;
}
