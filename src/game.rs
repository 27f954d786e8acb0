//! Frame driver
//!
//! Owns one `GameSession` and one `ProgressionStore` and is called once per
//! display frame by the host. Each `start_game` issues a fresh `LoopToken`;
//! frames carrying an older token are ignored, so a restart can never leave
//! two loops advancing the same session.

use serde::Serialize;

use crate::persistence::KeyValueStore;
use crate::progression::{ProgressionEvent, ProgressionStore, SessionReward};
use crate::sim::{GameEvent, GameSession, RenderSnapshot};

/// Identifies one frame loop registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LoopToken(pub u64);

/// Everything the presentation layer needs after a frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub snapshot: RenderSnapshot,
    pub events: Vec<GameEvent>,
    pub progression_events: Vec<ProgressionEvent>,
    /// Set on the frame the final score was banked
    pub reward: Option<SessionReward>,
    /// False once the result has been revealed; the host should stop
    /// requesting frames for this token
    pub running: bool,
}

pub struct Game<S: KeyValueStore> {
    session: GameSession,
    progression: ProgressionStore<S>,
    generation: u64,
    running: bool,
    last_timestamp_ms: Option<f64>,
    result_banked: bool,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(session: GameSession, progression: ProgressionStore<S>) -> Self {
        Self {
            session,
            progression,
            generation: 0,
            running: false,
            last_timestamp_ms: None,
            result_banked: false,
        }
    }

    /// Reset the session and register a new frame loop, cancelling any
    /// previous one
    pub fn start_game(&mut self) -> LoopToken {
        self.generation += 1;
        self.running = true;
        self.last_timestamp_ms = None;
        self.result_banked = false;
        self.session.start();
        LoopToken(self.generation)
    }

    /// Stop the current loop without touching session state
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether `token` belongs to the live loop
    pub fn is_current(&self, token: LoopToken) -> bool {
        self.running && token.0 == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one frame.
    ///
    /// `timestamp_ms` is the host's monotonic frame time; the first frame of
    /// a loop has zero elapsed time. Returns `None` for stale tokens or a
    /// stopped loop.
    pub fn frame(
        &mut self,
        token: LoopToken,
        timestamp_ms: f64,
        pointer_target_x: f32,
    ) -> Option<Frame> {
        if !self.is_current(token) {
            return None;
        }

        let elapsed_ms = match self.last_timestamp_ms {
            Some(prev) => (timestamp_ms - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);

        let snapshot = self.session.update(elapsed_ms, pointer_target_x);
        let events = self.session.drain_events();

        let mut reward = None;
        for event in &events {
            match *event {
                GameEvent::GameOver { final_score } if !self.result_banked => {
                    self.result_banked = true;
                    let multiplier = self.session.tuning.coin_multiplier;
                    reward = self
                        .progression
                        .record_session_result(final_score, multiplier);
                }
                GameEvent::ResultRevealed { final_score, tier } => {
                    log::info!("Result: {} ({})", final_score, tier.message());
                    self.running = false;
                }
                _ => {}
            }
        }

        Some(Frame {
            snapshot,
            events,
            progression_events: self.progression.drain_events(),
            reward,
            running: self.running,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn progression(&self) -> &ProgressionStore<S> {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut ProgressionStore<S> {
        &mut self.progression
    }
}
