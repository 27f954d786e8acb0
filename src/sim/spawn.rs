//! Spawn gate and spawn policy
//!
//! Level 1 is a tutorial: one item at a time, and the third item is always
//! poison. From level 2 on, spawns are a memoryless per-tick roll whose odds
//! rise with level, and poison odds rise with it (uncapped).

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{FallingItem, GameSession, ItemKind};

/// Roll whether an item spawns this tick
pub fn should_spawn(state: &mut GameSession) -> bool {
    if state.level == 1 && !state.items.is_empty() {
        return false;
    }
    let interval = state.tuning.spawn_interval(state.level);
    state.rng.random::<f32>() * interval < 1.0
}

/// Decide whether the next item is food or poison
pub fn choose_kind(state: &mut GameSession) -> ItemKind {
    if state.level == 1 {
        if state.eaten_count == state.tuning.tutorial_poison_index {
            ItemKind::Poison
        } else {
            ItemKind::Food
        }
    } else {
        let chance = state.tuning.poison_chance(state.level);
        if state.rng.random::<f64>() < chance {
            ItemKind::Poison
        } else {
            ItemKind::Food
        }
    }
}

/// Spawn one item just above the top edge. Returns its ID, or `None` if
/// the catalog has no food image to draw it with.
pub fn spawn_item(state: &mut GameSession) -> Option<u32> {
    let kind = choose_kind(state);
    let asset = match kind {
        ItemKind::Poison => state.assets.poison,
        ItemKind::Food => match state.assets.foods.choose(&mut state.rng) {
            Some(&key) => key,
            None => {
                log::warn!("No food assets registered, skipping spawn");
                return None;
            }
        },
    };

    let tuning = &state.tuning;
    let size = state.viewport.width * tuning.item_size_ratio;
    let x = state.rng.random::<f32>() * (state.viewport.width - size).max(0.0);

    let (jitter_lo, jitter_hi) = tuning.speed_jitter;
    let jitter = jitter_lo + state.rng.random::<f32>() * (jitter_hi - jitter_lo);
    let fall_speed = tuning.base_gravity * tuning.level_speed_factor(state.level) * jitter * 10.0;
    let spin = (state.rng.random::<f32>() - 0.5) * 2.0 * tuning.max_spin;

    let id = state.next_item_id();
    state.items.push(FallingItem {
        id,
        kind,
        pos: Vec2::new(x, -size),
        size,
        fall_speed,
        rotation: 0.0,
        spin,
        asset,
    });
    log::debug!(
        "Spawned {:?} #{} at level {} (speed {:.2})",
        kind,
        id,
        state.level,
        fall_speed
    );
    Some(id)
}
