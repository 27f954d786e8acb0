//! Render-ready view of a session
//!
//! Plain data for the presentation layer: positions, rotations and asset
//! keys. Nothing here feeds back into the simulation.

use serde::Serialize;

use crate::assets::AssetKey;

use super::state::{GamePhase, GameSession, Mood};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSprite {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mood: Mood,
    pub image: AssetKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
    pub image: AssetKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub player: PlayerSprite,
    /// Same order as the session's active items
    pub items: Vec<ItemSprite>,
    pub score: u64,
    pub level: u32,
    pub phase: GamePhase,
}

impl GameSession {
    pub fn snapshot(&self) -> RenderSnapshot {
        let player = &self.player;
        RenderSnapshot {
            player: PlayerSprite {
                x: player.pos.x,
                y: player.pos.y,
                width: player.width,
                height: player.height,
                mood: player.mood,
                image: self.assets.player.for_mood(player.mood),
            },
            items: self
                .items
                .iter()
                .map(|item| ItemSprite {
                    x: item.pos.x,
                    y: item.pos.y,
                    size: item.size,
                    rotation: item.rotation,
                    image: item.asset,
                })
                .collect(),
            score: self.score,
            level: self.level,
            phase: self.phase,
        }
    }
}
