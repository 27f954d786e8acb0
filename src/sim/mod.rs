//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in through `TickInput`, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (items in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{catch_radius, is_caught};
pub use snapshot::{ItemSprite, PlayerSprite, RenderSnapshot};
pub use spawn::{choose_kind, should_spawn, spawn_item};
pub use state::{
    FallingItem, GameEvent, GamePhase, GameSession, ItemKind, Mood, Player, ResultTier, Viewport,
};
pub use tick::{TickInput, game_over, on_item_hit, tick};
