//! Browser bindings
//!
//! The JS host owns the canvas, images and DOM. It calls `frame` from its
//! `requestAnimationFrame` callback and draws the returned JSON snapshot,
//! resolving each image key against the images it loaded.

use wasm_bindgen::prelude::*;

use crate::assets::AssetCatalog;
use crate::game::{Game, LoopToken};
use crate::persistence::LocalStore;
use crate::progression::ProgressionStore;
use crate::sim::{GameSession, Viewport};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Munch Drop starting");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize for host: {}", e);
        "null".to_string()
    })
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a canvas of the given size with `food_count` food
    /// images registered after the player portraits
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, food_count: u16) -> WebGame {
        let store = LocalStore::new();
        let session = GameSession::new(
            Viewport::new(width, height),
            Tuning::load(&store),
            AssetCatalog::sequential(food_count),
            crate::platform::entropy_seed(),
        );
        WebGame {
            game: Game::new(session, ProgressionStore::open(store)),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.session_mut().resize(Viewport::new(width, height));
    }

    /// Called once the idle portrait has loaded
    pub fn set_player_aspect(&mut self, aspect: f32) {
        self.game.session_mut().set_player_aspect(aspect);
    }

    /// Start (or restart) a session; returns the loop token to pass to `frame`
    pub fn start_game(&mut self) -> f64 {
        self.game.start_game().0 as f64
    }

    /// Map a pointer x on the canvas to a player target
    pub fn pointer_target(&self, pointer_x: f32) -> f32 {
        self.game.session().pointer_target(pointer_x)
    }

    /// Advance one frame; returns the frame as JSON, or `null` if the token
    /// is stale
    pub fn frame(&mut self, token: f64, timestamp_ms: f64, pointer_target_x: f32) -> String {
        match self
            .game
            .frame(LoopToken(token as u64), timestamp_ms, pointer_target_x)
        {
            Some(frame) => to_json(&frame),
            None => "null".to_string(),
        }
    }

    /// Progression summary as JSON for the status bar
    pub fn summary(&self) -> String {
        to_json(&self.game.progression().summary())
    }

    /// Current render state as JSON, without advancing
    pub fn snapshot(&self) -> String {
        to_json(&self.game.session().snapshot())
    }
}
