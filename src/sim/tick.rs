//! Per-frame simulation step
//!
//! Advances one session by one display frame. Frames may have any length;
//! fall speeds are scaled to a nominal 16 ms frame and timers count down
//! by the elapsed time passed in, never by wall clock.

use super::collision::is_caught;
use super::snapshot::RenderSnapshot;
use super::spawn::{should_spawn, spawn_item};
use super::state::{FallingItem, GameEvent, GamePhase, GameSession, ItemKind, ResultTier};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Time since the previous frame (ms)
    pub elapsed_ms: f32,
    /// Desired player left edge, already clamped to the viewport
    pub pointer_target_x: f32,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameSession, input: &TickInput) {
    let dt = if input.elapsed_ms.is_finite() {
        input.elapsed_ms.max(0.0)
    } else {
        0.0
    };

    match state.phase {
        GamePhase::Ready => return,
        GamePhase::GameOver => {
            advance_reveal(state, dt);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player eases toward the pointer
    let follow = state.tuning.follow_factor;
    state.player.follow(input.pointer_target_x, follow);
    state.player.tick_mood(dt);

    if should_spawn(state) {
        spawn_item(state);
    }

    // Move items, resolve catches, drop anything below the screen
    let nominal = state.tuning.nominal_frame_ms;
    let mut i = 0;
    while i < state.items.len() {
        state.items[i].fall(dt, nominal);

        if is_caught(&state.player, &state.items[i]) {
            let item = state.items.remove(i);
            // Score is frozen once poison has been caught earlier in the pass
            if state.is_playing() {
                on_item_hit(state, &item);
            }
            continue;
        }

        if state.items[i].pos.y > state.viewport.height {
            state.items.remove(i);
            continue;
        }

        i += 1;
    }
}

/// Apply the effect of catching `item`
pub fn on_item_hit(state: &mut GameSession, item: &FallingItem) {
    match item.kind {
        ItemKind::Poison => game_over(state),
        ItemKind::Food => {
            let points = state.tuning.points_per_food * state.level as u64;
            state.score += points;
            state.eaten_count += 1;
            state.emit(GameEvent::ItemEaten {
                id: item.id,
                points,
            });

            let step = state.tuning.level_step.max(1);
            if state.eaten_count % step == 0 {
                state.level += 1;
                log::info!("Difficulty up: level {}", state.level);
                state.emit(GameEvent::LevelChanged { level: state.level });
            }

            let eat_ms = state.tuning.eat_animation_ms;
            state.player.start_eating(eat_ms);
            state.emit(GameEvent::ScoreChanged { score: state.score });
        }
    }
}

/// End the session: freeze state and schedule the result reveal
pub fn game_over(state: &mut GameSession) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.player.take_damage();
    state.reveal_remaining_ms = Some(state.tuning.reveal_delay_ms);
    log::info!(
        "Game over: score {} at level {} ({} eaten)",
        state.score,
        state.level,
        state.eaten_count
    );
    state.emit(GameEvent::GameOver {
        final_score: state.score,
    });
}

/// Count down the post-game-over delay; fires `ResultRevealed` once
fn advance_reveal(state: &mut GameSession, dt: f32) {
    let Some(remaining) = state.reveal_remaining_ms else {
        return;
    };
    let remaining = remaining - dt;
    if remaining > 0.0 {
        state.reveal_remaining_ms = Some(remaining);
        return;
    }
    state.reveal_remaining_ms = None;
    state.emit(GameEvent::ResultRevealed {
        final_score: state.score,
        tier: ResultTier::from_score(state.score),
    });
}

impl GameSession {
    /// Advance one frame and return what to draw
    pub fn update(&mut self, elapsed_ms: f32, pointer_target_x: f32) -> RenderSnapshot {
        tick(
            self,
            &TickInput {
                elapsed_ms,
                pointer_target_x,
            },
        );
        self.snapshot()
    }
}
