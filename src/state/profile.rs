//! Durable player profile.
//!
//! Each field lives under its own key and is read and written on its own, so a
//! crash between writes leaves a mix of old and new fields. Loading tolerates
//! that: any missing or unreadable field falls back to its default.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::model::{Achievements, Difficulty, EquipmentDatabase, Map};
use crate::state::store::KeyValueStore;

pub const KEY_EQUIPMENT: &str = "equipmentDatabase";
pub const KEY_ACHIEVEMENTS: &str = "achievements";
pub const KEY_DIFFICULTY: &str = "selectedDifficulty";
pub const KEY_HARD_MAP: &str = "hardModeMap";
pub const KEY_EXPERT_MAP: &str = "expertModeMap";
pub const KEY_HEALTH: &str = "playerHealth";
pub const KEY_GAME_OVER: &str = "gameOverState";

/// One independently persisted field group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Equipment,
    Achievements,
    Difficulty,
    HardMap,
    ExpertMap,
    Health,
    GameOverPending,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Equipment,
        ProfileField::Achievements,
        ProfileField::Difficulty,
        ProfileField::HardMap,
        ProfileField::ExpertMap,
        ProfileField::Health,
        ProfileField::GameOverPending,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Equipment => KEY_EQUIPMENT,
            ProfileField::Achievements => KEY_ACHIEVEMENTS,
            ProfileField::Difficulty => KEY_DIFFICULTY,
            ProfileField::HardMap => KEY_HARD_MAP,
            ProfileField::ExpertMap => KEY_EXPERT_MAP,
            ProfileField::Health => KEY_HEALTH,
            ProfileField::GameOverPending => KEY_GAME_OVER,
        }
    }

    pub fn fixed_map(difficulty: Difficulty) -> Option<ProfileField> {
        match difficulty {
            Difficulty::Hard => Some(ProfileField::HardMap),
            Difficulty::Expert => Some(ProfileField::ExpertMap),
            Difficulty::Easy | Difficulty::Normal => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersistentProfile {
    pub equipment: EquipmentDatabase,
    pub achievements: Achievements,
    pub hard_map: Option<Map>,
    pub expert_map: Option<Map>,
    pub health: u32,
    pub difficulty: Difficulty,
    pub game_over_pending: bool,
}

impl PersistentProfile {
    pub fn new(max_health: u32) -> Self {
        Self {
            equipment: EquipmentDatabase::default(),
            achievements: Achievements::default(),
            hard_map: None,
            expert_map: None,
            health: max_health,
            difficulty: Difficulty::Easy,
            game_over_pending: false,
        }
    }

    /// Reads every field, substituting defaults for anything absent or corrupt.
    pub fn load<S: KeyValueStore>(store: &S, max_health: u32) -> Self {
        let mut profile = Self::new(max_health);
        if let Some(db) = read_json::<_, EquipmentDatabase>(store, KEY_EQUIPMENT) {
            if db.is_consistent() {
                profile.equipment = db;
            } else {
                warn!(key = KEY_EQUIPMENT, "stored equipment is inconsistent, using factory set");
            }
        }
        if let Some(achievements) = read_json(store, KEY_ACHIEVEMENTS) {
            profile.achievements = achievements;
        }
        if let Some(difficulty) = read_json(store, KEY_DIFFICULTY) {
            profile.difficulty = difficulty;
        }
        profile.hard_map = read_map(store, KEY_HARD_MAP);
        profile.expert_map = read_map(store, KEY_EXPERT_MAP);
        if let Some(raw) = read_raw(store, KEY_HEALTH) {
            match raw.trim().parse::<i64>() {
                Ok(h) => profile.health = h.clamp(0, i64::from(max_health)) as u32,
                Err(e) => warn!(key = KEY_HEALTH, error = %e, "unreadable health, using default"),
            }
        }
        profile.game_over_pending = read_raw(store, KEY_GAME_OVER).is_some_and(|v| v.trim() == "true");
        debug!(
            health = profile.health,
            difficulty = ?profile.difficulty,
            game_over_pending = profile.game_over_pending,
            "profile loaded"
        );
        profile
    }

    pub fn fixed_map(&self, difficulty: Difficulty) -> Option<&Map> {
        match difficulty {
            Difficulty::Hard => self.hard_map.as_ref(),
            Difficulty::Expert => self.expert_map.as_ref(),
            Difficulty::Easy | Difficulty::Normal => None,
        }
    }

    /// Stores `map` as the fixed map of `difficulty`; no-op for Easy/Normal.
    pub fn set_fixed_map(&mut self, difficulty: Difficulty, map: Option<Map>) -> Option<ProfileField> {
        match difficulty {
            Difficulty::Hard => self.hard_map = map,
            Difficulty::Expert => self.expert_map = map,
            Difficulty::Easy | Difficulty::Normal => return None,
        }
        ProfileField::fixed_map(difficulty)
    }

    /// Unresolved game-over: flagged explicitly or health already exhausted.
    pub fn needs_game_over(&self) -> bool {
        self.game_over_pending || self.health == 0
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S, field: ProfileField) -> Result<(), StoreError> {
        let key = field.key();
        match field {
            ProfileField::Equipment => store.set(key, &serde_json::to_string(&self.equipment)?),
            ProfileField::Achievements => store.set(key, &serde_json::to_string(&self.achievements)?),
            ProfileField::Difficulty => store.set(key, &serde_json::to_string(&self.difficulty)?),
            ProfileField::HardMap => write_optional(store, key, self.hard_map.as_ref()),
            ProfileField::ExpertMap => write_optional(store, key, self.expert_map.as_ref()),
            ProfileField::Health => store.set(key, &self.health.to_string()),
            ProfileField::GameOverPending => {
                if self.game_over_pending {
                    store.set(key, "true")
                } else {
                    store.remove(key)
                }
            }
        }
    }

    /// Writes every field, stopping at the first failure.
    pub fn save_all<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        for field in ProfileField::ALL {
            self.save(store, field)?;
        }
        Ok(())
    }
}

fn write_optional<S: KeyValueStore, T: Serialize>(
    store: &mut S,
    key: &str,
    value: Option<&T>,
) -> Result<(), StoreError> {
    match value {
        Some(v) => store.set(key, &serde_json::to_string(v)?),
        None => store.remove(key),
    }
}

fn read_raw<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "storage read failed, using default");
            None
        }
    }
}

fn read_json<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = read_raw(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, error = %e, "corrupt stored value, using default");
            None
        }
    }
}

fn read_map<S: KeyValueStore>(store: &S, key: &str) -> Option<Map> {
    let map: Map = read_json(store, key)?;
    if map.is_consistent() {
        Some(map)
    } else {
        warn!(key, "stored map is inconsistent, discarding");
        None
    }
}
