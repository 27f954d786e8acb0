//! Level curve and rank table
//!
//! Reaching level `n` takes `500 * n * (n - 1)` cumulative XP:
//! Lv.1 = 0, Lv.2 = 1000, Lv.3 = 3000, Lv.4 = 6000, Lv.10 = 45000,
//! Lv.50 = 1,225,000. Levels are always derived from XP, never stored as
//! ground truth, so changing the curve re-ranks every player on next load.

use serde::{Deserialize, Serialize};

/// XP scale of the quadratic curve
pub const XP_CURVE_SCALE: u64 = 500;

/// Cumulative XP required to reach `level` (levels start at 1)
pub fn required_xp_for_level(level: u32) -> u64 {
    checked_required_xp(level).unwrap_or(u64::MAX)
}

fn checked_required_xp(level: u32) -> Option<u64> {
    let n = level.max(1) as u64;
    XP_CURVE_SCALE.checked_mul(n)?.checked_mul(n - 1)
}

/// Level reached with `xp` cumulative experience.
///
/// Positive root of `500n² - 500n - xp = 0`, floored. The float estimate is
/// nudged against the integer thresholds so rounding can never misplace a
/// player sitting exactly on a boundary.
pub fn level_from_xp(xp: u64) -> u32 {
    let root = (1.0 + (1.0 + 4.0 * (xp as f64 / XP_CURVE_SCALE as f64)).sqrt()) / 2.0;
    let mut level = (root.floor() as u32).max(1);
    while level > 1 && required_xp_for_level(level) > xp {
        level -= 1;
    }
    while let Some(next) = checked_required_xp(level + 1) {
        if next > xp {
            break;
        }
        level += 1;
    }
    level
}

/// Progress through the current level, percent in [0, 100]
pub fn level_progress_percent(xp: u64, level: u32) -> f64 {
    let floor = required_xp_for_level(level);
    let ceil = required_xp_for_level(level.saturating_add(1));
    if ceil <= floor {
        return 100.0;
    }
    let pct = (xp as f64 - floor as f64) / (ceil - floor) as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Cosmetic tier shown next to the level badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Tourist,
    Regular,
    Fan,
    Enthusiast,
    BestFriend,
    Master,
}

impl Rank {
    /// All ranks, lowest first
    pub const ALL: [Rank; 6] = [
        Rank::Tourist,
        Rank::Regular,
        Rank::Fan,
        Rank::Enthusiast,
        Rank::BestFriend,
        Rank::Master,
    ];

    /// Minimum level for this rank
    pub fn min_level(self) -> u32 {
        match self {
            Rank::Tourist => 1,
            Rank::Regular => 5,
            Rank::Fan => 10,
            Rank::Enthusiast => 20,
            Rank::BestFriend => 30,
            Rank::Master => 50,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Tourist => "Tourist",
            Rank::Regular => "Regular",
            Rank::Fan => "Fan",
            Rank::Enthusiast => "Enthusiast",
            Rank::BestFriend => "Best Friend",
            Rank::Master => "Master",
        }
    }

    /// Highest rank whose threshold is at or below `level`
    pub fn for_level(level: u32) -> Rank {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|r| level >= r.min_level())
            .unwrap_or(Rank::Tourist)
    }

    /// The next rank above `level`, or `None` once the top rank is reached
    pub fn next_after(level: u32) -> Option<Rank> {
        Self::ALL.iter().copied().find(|r| r.min_level() > level)
    }
}
