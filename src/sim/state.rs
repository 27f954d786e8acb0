//! Session state and entity types
//!
//! Everything one play-through owns lives in `GameSession`. Starting a new
//! session resets all of it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetCatalog, AssetKey};
use crate::tuning::Tuning;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Player animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Idle,
    /// Chewing; reverts to `Idle` when the timer runs out
    Eating,
    /// Celebration face. Nothing triggers it yet.
    Happy,
    /// Ate poison. Terminal until the next session.
    Damaged,
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Where the pointer wants the player's left edge to be
    pub target_x: f32,
    pub width: f32,
    pub height: f32,
    pub mood: Mood,
    /// Remaining time (ms) before the current mood reverts to `Idle`
    pub mood_timer_ms: f32,
}

impl Player {
    fn new(viewport: Viewport, tuning: &Tuning, aspect: f32) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            target_x: 0.0,
            width: 0.0,
            height: 0.0,
            mood: Mood::Idle,
            mood_timer_ms: 0.0,
        };
        player.fit(viewport, tuning, aspect);
        player
    }

    /// Size and place the player for a viewport
    pub fn fit(&mut self, viewport: Viewport, tuning: &Tuning, aspect: f32) {
        self.width = viewport.width * tuning.player_width_ratio;
        self.height = self.width * aspect;
        self.pos.y = viewport.height * tuning.player_y_ratio;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Ease toward `target_x` by `factor` of the remaining distance.
    ///
    /// For `factor` in (0, 1] this never overshoots.
    pub fn follow(&mut self, target_x: f32, factor: f32) {
        self.target_x = target_x;
        self.pos.x += (target_x - self.pos.x) * factor;
    }

    /// Count down the mood timer, reverting to `Idle` when it expires
    pub fn tick_mood(&mut self, dt_ms: f32) {
        if self.mood_timer_ms > 0.0 {
            self.mood_timer_ms -= dt_ms;
            if self.mood_timer_ms <= 0.0 {
                self.mood_timer_ms = 0.0;
                self.mood = Mood::Idle;
            }
        }
    }

    pub fn start_eating(&mut self, duration_ms: f32) {
        if self.mood == Mood::Damaged {
            return;
        }
        self.mood = Mood::Eating;
        self.mood_timer_ms = duration_ms;
    }

    pub fn take_damage(&mut self) {
        self.mood = Mood::Damaged;
        self.mood_timer_ms = 0.0;
    }
}

/// What a falling item does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Food,
    Poison,
}

/// A falling food or poison item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (items are square)
    pub size: f32,
    /// Units per nominal frame
    pub fall_speed: f32,
    /// Radians
    pub rotation: f32,
    /// Radians per tick
    pub spin: f32,
    pub asset: AssetKey,
}

impl FallingItem {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Advance one tick, scaling fall speed by how long the frame really was
    pub fn fall(&mut self, dt_ms: f32, nominal_frame_ms: f32) {
        self.pos.y += self.fall_speed * (dt_ms / nominal_frame_ms);
        self.rotation += self.spin;
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started
    Ready,
    /// Active gameplay
    Playing,
    /// Poison eaten; state is frozen
    GameOver,
}

/// How the final score is celebrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultTier {
    /// Score above 1000
    Legendary,
    /// Score above 500
    Great,
    Consolation,
}

impl ResultTier {
    pub fn from_score(score: u64) -> Self {
        if score > 1000 {
            ResultTier::Legendary
        } else if score > 500 {
            ResultTier::Great
        } else {
            ResultTier::Consolation
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::Legendary => "A legendary feast!!",
            ResultTier::Great => "Amazing! So full!",
            ResultTier::Consolation => "Nice try!",
        }
    }
}

/// Notifications emitted by the simulation, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Food was caught
    ItemEaten { id: u32, points: u64 },
    ScoreChanged { score: u64 },
    /// Difficulty level went up
    LevelChanged { level: u32 },
    /// Poison was caught; the session is over
    GameOver { final_score: u64 },
    /// The reveal delay elapsed; show the result screen
    ResultRevealed { final_score: u64, tier: ResultTier },
}

/// One play-through: player, items, score and difficulty
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub assets: AssetCatalog,
    pub viewport: Viewport,
    pub player: Player,
    /// Active items, oldest first
    pub items: Vec<FallingItem>,
    pub score: u64,
    /// Difficulty level, starts at 1 and only goes up
    pub level: u32,
    /// Food caught this session
    pub eaten_count: u32,
    pub phase: GamePhase,
    /// Countdown to the result reveal, set at game over
    pub reveal_remaining_ms: Option<f32>,
    /// Simulation ticks since start
    pub time_ticks: u64,
    /// Player height / width, from the idle portrait
    pub player_aspect: f32,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    pub fn new(viewport: Viewport, tuning: Tuning, assets: AssetCatalog, seed: u64) -> Self {
        let player_aspect = 1.0;
        Self {
            player: Player::new(viewport, &tuning, player_aspect),
            tuning,
            assets,
            viewport,
            items: Vec::new(),
            score: 0,
            level: 1,
            eaten_count: 0,
            phase: GamePhase::Ready,
            reveal_remaining_ms: None,
            time_ticks: 0,
            player_aspect,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Session with default tuning and assets
    pub fn with_viewport(viewport: Viewport, seed: u64) -> Self {
        Self::new(viewport, Tuning::default(), AssetCatalog::default(), seed)
    }

    /// Reset everything and begin playing. Safe to call at any time.
    pub fn start(&mut self) {
        self.items.clear();
        self.events.clear();
        self.score = 0;
        self.level = 1;
        self.eaten_count = 0;
        self.time_ticks = 0;
        self.reveal_remaining_ms = None;
        self.next_id = 1;

        self.player.fit(self.viewport, &self.tuning, self.player_aspect);
        self.player.pos.x = (self.viewport.width - self.player.width) / 2.0;
        self.player.target_x = self.player.pos.x;
        self.player.mood = Mood::Idle;
        self.player.mood_timer_ms = 0.0;

        self.phase = GamePhase::Playing;
        log::info!(
            "Session started ({}x{})",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Replace the RNG stream (for reproducible runs)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Adopt a new viewport size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.fit(viewport, &self.tuning, self.player_aspect);
    }

    /// Match the player's height to its portrait (height / width)
    pub fn set_player_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.player_aspect = aspect;
            self.player.fit(self.viewport, &self.tuning, aspect);
        }
    }

    /// Map a pointer x on the canvas to a player target: the player is
    /// centered under the pointer and kept fully on screen.
    pub fn pointer_target(&self, pointer_x: f32) -> f32 {
        let max_x = (self.viewport.width - self.player.width).max(0.0);
        (pointer_x - self.player.width / 2.0).clamp(0.0, max_x)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new item ID
    pub fn next_item_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::with_viewport(Viewport::new(400.0, 800.0), 7)
    }

    #[test]
    fn test_layout_from_viewport() {
        let s = session();
        assert_eq!(s.player.width, 100.0);
        assert_eq!(s.player.height, 100.0);
        assert_eq!(s.player.pos.y, 680.0);
        assert_eq!(s.phase, GamePhase::Ready);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut s = session();
        s.start();
        s.score = 500;
        s.level = 4;
        s.eaten_count = 17;
        s.player.take_damage();
        s.phase = GamePhase::GameOver;
        s.reveal_remaining_ms = Some(300.0);
        s.emit(GameEvent::ScoreChanged { score: 500 });
        let id = s.next_item_id();
        s.items.push(FallingItem {
            id,
            kind: ItemKind::Food,
            pos: Vec2::ZERO,
            size: 48.0,
            fall_speed: 1.0,
            rotation: 0.0,
            spin: 0.0,
            asset: AssetKey(5),
        });

        s.start();
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
        assert_eq!(s.eaten_count, 0);
        assert!(s.items.is_empty());
        assert!(s.drain_events().is_empty());
        assert_eq!(s.player.mood, Mood::Idle);
        assert_eq!(s.player.pos.x, 150.0);
        assert_eq!(s.player.target_x, 150.0);
        assert_eq!(s.reveal_remaining_ms, None);
        assert!(s.is_playing());
    }

    #[test]
    fn test_pointer_target_centers_and_clamps() {
        let s = session();
        assert_eq!(s.pointer_target(200.0), 150.0);
        assert_eq!(s.pointer_target(10.0), 0.0);
        assert_eq!(s.pointer_target(399.0), 300.0);
    }

    #[test]
    fn test_player_aspect() {
        let mut s = session();
        s.set_player_aspect(1.5);
        assert_eq!(s.player.height, 150.0);
        s.set_player_aspect(f32::NAN);
        assert_eq!(s.player.height, 150.0);
        s.resize(Viewport::new(200.0, 400.0));
        assert_eq!(s.player.width, 50.0);
        assert_eq!(s.player.height, 75.0);
        assert_eq!(s.player.pos.y, 340.0);
    }

    #[test]
    fn test_mood_timer() {
        let mut p = session().player;
        p.start_eating(500.0);
        p.tick_mood(300.0);
        assert_eq!(p.mood, Mood::Eating);
        p.tick_mood(200.0);
        assert_eq!(p.mood, Mood::Idle);
        assert_eq!(p.mood_timer_ms, 0.0);
    }

    #[test]
    fn test_damage_is_terminal() {
        let mut p = session().player;
        p.start_eating(500.0);
        p.take_damage();
        p.tick_mood(1000.0);
        assert_eq!(p.mood, Mood::Damaged);
        p.start_eating(500.0);
        assert_eq!(p.mood, Mood::Damaged);
    }

    #[test]
    fn test_result_tiers_check_highest_first() {
        assert_eq!(ResultTier::from_score(0), ResultTier::Consolation);
        assert_eq!(ResultTier::from_score(500), ResultTier::Consolation);
        assert_eq!(ResultTier::from_score(501), ResultTier::Great);
        assert_eq!(ResultTier::from_score(1000), ResultTier::Great);
        assert_eq!(ResultTier::from_score(1001), ResultTier::Legendary);
    }
}
