//! Catch detection
//!
//! Hits are tested circle-to-circle between the player's center and the
//! item's center. The radius is deliberately generous: a quarter of the
//! combined widths, so grazing catches still count.

use glam::Vec2;

use super::state::{FallingItem, Player};

/// Hit distance between a player of `player_width` and an item of `item_size`
#[inline]
pub fn catch_radius(player_width: f32, item_size: f32) -> f32 {
    (player_width + item_size) / 4.0
}

/// Strict circle test: touching exactly at `radius` is a miss
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Whether the player catches `item` this tick
pub fn is_caught(player: &Player, item: &FallingItem) -> bool {
    within_radius(
        player.center(),
        item.center(),
        catch_radius(player.width, item.size),
    )
}
