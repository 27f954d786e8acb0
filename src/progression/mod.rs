//! Persistent player progression
//!
//! Experience accumulates across sessions and is converted to a level by a
//! closed-form inverse of a quadratic curve. Coins are banked alongside.

pub mod level;
pub mod record;
pub mod store;

pub use level::{Rank, level_from_xp, level_progress_percent, required_xp_for_level};
pub use record::ProgressionRecord;
pub use store::{
    DEFAULT_COIN_MULTIPLIER, ProgressionEvent, ProgressionStore, ProgressionSummary,
    SessionReward,
};
