//! Opaque asset handles
//!
//! The simulation never looks at file paths. The presentation layer builds
//! an `AssetCatalog` once its images are loaded and resolves each
//! `AssetKey` back to a drawable when rendering.

use serde::{Deserialize, Serialize};

use crate::sim::Mood;

/// Handle to a drawable image owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(pub u16);

/// Player portraits, one per mood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAssets {
    pub idle: AssetKey,
    pub eating: AssetKey,
    pub happy: AssetKey,
    pub damaged: AssetKey,
    /// Shown when food is missed; no gameplay rule selects it yet
    pub tired: AssetKey,
}

impl PlayerAssets {
    pub fn for_mood(&self, mood: Mood) -> AssetKey {
        match mood {
            Mood::Idle => self.idle,
            Mood::Eating => self.eating,
            Mood::Happy => self.happy,
            Mood::Damaged => self.damaged,
        }
    }
}

/// Every image key the simulation may hand out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub player: PlayerAssets,
    /// Food variants, picked uniformly at spawn. Must not be empty.
    pub foods: Vec<AssetKey>,
    pub poison: AssetKey,
}

impl AssetCatalog {
    /// Sequential keys: five player portraits, then `food_count` foods,
    /// then the poison.
    pub fn sequential(food_count: u16) -> Self {
        let food_count = food_count.max(1);
        Self {
            player: PlayerAssets {
                idle: AssetKey(0),
                eating: AssetKey(1),
                happy: AssetKey(2),
                damaged: AssetKey(3),
                tired: AssetKey(4),
            },
            foods: (0..food_count).map(|i| AssetKey(5 + i)).collect(),
            poison: AssetKey(5 + food_count),
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::sequential(5)
    }
}
