//! Progression store: the single owner of a player's persisted record

use serde::Serialize;

use super::level::{Rank, level_progress_percent};
use super::record::ProgressionRecord;
use crate::persistence::{KeyValueStore, StorageError};

/// Default coins granted per point of score
pub const DEFAULT_COIN_MULTIPLIER: f64 = 0.1;

/// Notifications for the status bar / toast collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProgressionEvent {
    /// A session result was banked
    Rewarded { xp: u64, coins: u64 },
    /// The derived level went up
    LevelUp { level: u32 },
    /// Something observable changed; refresh any progression display
    Changed,
}

/// What a banked session result granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReward {
    pub xp: u64,
    pub coins: u64,
    /// New level, if the reward crossed a threshold
    pub level_up: Option<u32>,
}

/// Read-only view for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSummary {
    pub level: u32,
    pub experience: u64,
    pub coins: u64,
    pub rank: Rank,
    pub rank_name: &'static str,
    /// Percent of the way to the next level, in [0, 100]
    pub next_level_progress: f64,
    /// Next rank and how many levels remain, `None` at the top rank
    pub next_rank: Option<(Rank, u32)>,
}

/// Owns a `ProgressionRecord` and keeps it in sync with a backing store.
///
/// Every mutating call saves the full record. Storage failures never poison
/// the in-memory record; they are logged and the next save retries.
pub struct ProgressionStore<S: KeyValueStore> {
    storage: S,
    record: ProgressionRecord,
    events: Vec<ProgressionEvent>,
}

impl<S: KeyValueStore> ProgressionStore<S> {
    /// Storage key for the progression blob
    pub const STORAGE_KEY: &'static str = "munch_drop_progression_v1";

    /// Open the store, merging any persisted record over defaults
    pub fn open(storage: S) -> Self {
        let record = Self::load_record(&storage);
        Self {
            storage,
            record,
            events: Vec::new(),
        }
    }

    fn load_record(storage: &S) -> ProgressionRecord {
        let json = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No progression found, starting fresh");
                return ProgressionRecord::default();
            }
            Err(e) => {
                log::error!("Failed to read progression: {}", e);
                return ProgressionRecord::default();
            }
        };

        match ProgressionRecord::from_json(&json) {
            Ok(record) => {
                log::info!(
                    "Loaded progression: Lv.{} ({} XP, {} coins)",
                    record.level,
                    record.experience,
                    record.coins
                );
                record
            }
            Err(e) => {
                log::error!("Failed to parse progression, using defaults: {}", e);
                ProgressionRecord::default()
            }
        }
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Bank a finished session.
    ///
    /// Zero scores are ignored entirely: nothing is saved and no event fires.
    pub fn record_session_result(
        &mut self,
        score: u64,
        coin_multiplier: f64,
    ) -> Option<SessionReward> {
        if score == 0 {
            return None;
        }

        let xp = score;
        self.record.experience = self.record.experience.saturating_add(xp);

        let coins = (score as f64 * coin_multiplier).floor();
        let coins = if coins > 0.0 { coins as u64 } else { 0 };
        if coins > 0 {
            self.record.coins = self.record.coins.saturating_add(coins);
        }
        self.events.push(ProgressionEvent::Rewarded { xp, coins });

        let level_up = self.update_level();
        self.persist();
        self.events.push(ProgressionEvent::Changed);

        Some(SessionReward {
            xp,
            coins,
            level_up,
        })
    }

    /// Grant raw XP outside of a session (debug tooling)
    pub fn debug_add_xp(&mut self, amount: u64) -> Option<u32> {
        self.record.experience = self.record.experience.saturating_add(amount);
        let level_up = self.update_level();
        self.persist();
        self.events.push(ProgressionEvent::Changed);
        level_up
    }

    pub fn summary(&self) -> ProgressionSummary {
        let level = self.record.level;
        let rank = Rank::for_level(level);
        ProgressionSummary {
            level,
            experience: self.record.experience,
            coins: self.record.coins,
            rank,
            rank_name: rank.name(),
            next_level_progress: level_progress_percent(self.record.experience, level),
            next_rank: Rank::next_after(level).map(|r| (r, r.min_level() - level)),
        }
    }

    /// Overwrite the stored blob with the current record
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.record.last_played_timestamp = Some(
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        );
        let json = self.record.to_json()?;
        self.storage.set(Self::STORAGE_KEY, &json)
    }

    /// Take queued notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<ProgressionEvent> {
        std::mem::take(&mut self.events)
    }

    fn update_level(&mut self) -> Option<u32> {
        let previous = self.record.level;
        let level = self.record.sync_level();
        if level > previous {
            log::info!("LEVEL UP! Lv.{} -> Lv.{}", previous, level);
            self.events.push(ProgressionEvent::LevelUp { level });
            Some(level)
        } else {
            None
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Failed to save progression: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    type Store = ProgressionStore<MemoryStore>;

    fn seeded(json: &str) -> Store {
        ProgressionStore::open(MemoryStore::with_entry(Store::STORAGE_KEY, json))
    }

    #[test]
    fn test_fresh_store_defaults() {
        let store = ProgressionStore::open(MemoryStore::new());
        assert_eq!(store.record(), &ProgressionRecord::default());
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn test_zero_score_is_noop() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        assert_eq!(store.record_session_result(0, DEFAULT_COIN_MULTIPLIER), None);
        assert_eq!(store.record(), &ProgressionRecord::default());
        assert_eq!(store.storage().write_count(), 0);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_reward_adds_xp_and_coins() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        let reward = store
            .record_session_result(100, DEFAULT_COIN_MULTIPLIER)
            .unwrap();
        assert_eq!(
            reward,
            SessionReward {
                xp: 100,
                coins: 10,
                level_up: None
            }
        );
        assert_eq!(store.record().experience, 100);
        assert_eq!(store.record().coins, 10);
        assert_eq!(store.record().level, 1);
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn test_small_score_saves_without_coins() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        let reward = store.record_session_result(9, DEFAULT_COIN_MULTIPLIER).unwrap();
        assert_eq!(reward.coins, 0);
        assert_eq!(store.record().coins, 0);
        assert_eq!(store.record().experience, 9);
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn test_level_up_fires_once() {
        let mut store = seeded(r#"{"experience": 950}"#);
        store.drain_events();

        let reward = store
            .record_session_result(100, DEFAULT_COIN_MULTIPLIER)
            .unwrap();
        assert_eq!(reward.level_up, Some(2));
        assert_eq!(store.record().level, 2);

        let events = store.drain_events();
        let level_ups: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ProgressionEvent::LevelUp { .. }))
            .collect();
        assert_eq!(level_ups, vec![&ProgressionEvent::LevelUp { level: 2 }]);
        assert_eq!(events.last(), Some(&ProgressionEvent::Changed));

        // Staying inside level 2 does not fire again
        store.record_session_result(100, DEFAULT_COIN_MULTIPLIER);
        assert!(
            !store
                .drain_events()
                .iter()
                .any(|e| matches!(e, ProgressionEvent::LevelUp { .. }))
        );
    }

    #[test]
    fn test_multi_level_jump_reports_final_level() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        let reward = store
            .record_session_result(6000, DEFAULT_COIN_MULTIPLIER)
            .unwrap();
        assert_eq!(reward.level_up, Some(4));
        assert_eq!(store.record().coins, 600);
    }

    #[test]
    fn test_load_heals_level() {
        let store = seeded(r#"{"experience": 45000, "level": 2, "coins": 3}"#);
        assert_eq!(store.record().level, 10);
        assert_eq!(store.record().coins, 3);
    }

    #[test]
    fn test_load_survives_garbage_level() {
        let mut store = seeded(r#"{"experience": 45000, "level": "10", "coins": 3}"#);
        assert_eq!(store.record().experience, 45000);
        assert_eq!(store.record().level, 10);
        store.debug_add_xp(0);
        let reopened = ProgressionStore::open(store.into_storage());
        assert_eq!(reopened.record().experience, 45000);
        assert_eq!(reopened.record().coins, 3);
    }

    #[test]
    fn test_corrupt_blob_keeps_defaults() {
        let store = seeded(r#"{"experience": 45000, "coins": "#);
        assert_eq!(store.record(), &ProgressionRecord::default());
    }

    #[test]
    fn test_save_reload_roundtrip() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        store.record_session_result(3200, 0.5);
        let saved = store.record().clone();
        assert!(saved.last_played_timestamp.is_some());

        let reopened = ProgressionStore::open(store.into_storage());
        assert_eq!(reopened.record(), &saved);
        assert_eq!(reopened.record().level, 3);
        assert_eq!(reopened.record().coins, 1600);
    }

    #[test]
    fn test_summary() {
        let store = seeded(r#"{"experience": 2000, "coins": 12}"#);
        let summary = store.summary();
        assert_eq!(summary.level, 2);
        assert_eq!(summary.experience, 2000);
        assert_eq!(summary.coins, 12);
        assert_eq!(summary.rank, Rank::Tourist);
        assert_eq!(summary.rank_name, "Tourist");
        assert_eq!(summary.next_level_progress, 50.0);
        assert_eq!(summary.next_rank, Some((Rank::Regular, 3)));

        let master = seeded(r#"{"experience": 1225000}"#).summary();
        assert_eq!(master.rank, Rank::Master);
        assert_eq!(master.next_rank, None);
    }

    #[test]
    fn test_debug_add_xp() {
        let mut store = ProgressionStore::open(MemoryStore::new());
        assert_eq!(store.debug_add_xp(3000), Some(3));
        assert_eq!(store.debug_add_xp(1), None);
        assert_eq!(store.storage().write_count(), 2);
    }
}
