//! Game engine: the command surface the view drives.
//!
//! Every command runs to completion before the next one is accepted. Commands
//! that make no sense in the current state are ignored, never rejected with an
//! error. Each profile mutation is written to the store right away, one field
//! at a time.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info, warn};
use yew::Reducible;

use crate::config::GameConfig;
use crate::model::{
    Achievements, Difficulty, Direction, EquipmentDatabase, Map, SelectedEquipment, Slot,
};
use crate::state::damage::Severity;
use crate::state::mapgen::MapGenerator;
use crate::state::profile::{PersistentProfile, ProfileField};
use crate::state::progression::reward_equipped;
use crate::state::resistance::Resistances;
use crate::state::session::{MoveResult, Outcome, SessionState};
use crate::state::store::KeyValueStore;

/// Fire-and-forget events for the view.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Terrain { message: String, severity: Severity },
    Victory { difficulty: Difficulty, health: u32 },
    GameOver,
}

impl Notification {
    pub fn message(&self) -> String {
        match self {
            Notification::Terrain { message, .. } => message.clone(),
            Notification::Victory { difficulty, health } => {
                format!("Victory on {difficulty}! Health restored to {health}.")
            }
            Notification::GameOver => "Your health is exhausted. All progress will be reset.".to_string(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notification::Terrain { severity, .. } => *severity,
            Notification::Victory { .. } => Severity::Success,
            Notification::GameOver => Severity::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineAction {
    SelectEquipment { slot: Slot, id: String },
    SetDifficulty(Difficulty),
    StartRun,
    Move(Direction),
    RefreshMap,
    AbandonRun,
    AcknowledgeVictory,
    /// Fired by the view once `game_over_delay_ms` has passed after a lethal move.
    GameOverDelayElapsed,
    AcknowledgeGameOver,
    ResetAllData,
}

pub struct GameEngine<S, R> {
    config: GameConfig,
    store: S,
    generator: MapGenerator<R>,
    profile: PersistentProfile,
    map: Map,
    selection: SelectedEquipment,
    session: Option<SessionState>,
    /// Lethal damage landed; the deferred game-over has not fired yet.
    game_over_scheduled: bool,
    /// Game-over waiting for acknowledgment.
    game_over_prompt: bool,
    notifications: Vec<Notification>,
}

impl<S, R> GameEngine<S, R> {
    /// Hands over every notification raised since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl<S: KeyValueStore, R: Rng> GameEngine<S, R> {
    /// Restores the profile from `store` and resolves the map for the saved
    /// difficulty. An unresolved game-over from a previous session raises the
    /// prompt straight away and clears the stored flag.
    pub fn load(store: S, rng: R, config: GameConfig) -> Self {
        let profile = PersistentProfile::load(&store, config.max_health);
        let difficulty = profile.difficulty;
        let mut generator = MapGenerator::new(rng);
        let stored = profile.fixed_map(difficulty).cloned();
        let map = match stored.clone() {
            Some(map) => map,
            None => generator.generate(config.settings(difficulty)),
        };
        let mut engine = Self {
            config,
            store,
            generator,
            profile,
            map,
            selection: SelectedEquipment::default(),
            session: None,
            game_over_scheduled: false,
            game_over_prompt: false,
            notifications: Vec::new(),
        };
        if stored.is_none() {
            let map = engine.map.clone();
            if let Some(field) = engine.profile.set_fixed_map(difficulty, Some(map)) {
                engine.commit(field);
            }
        }
        if engine.profile.needs_game_over() {
            info!(health = engine.profile.health, "recovering unresolved game over");
            engine.game_over_prompt = true;
            engine.profile.game_over_pending = false;
            engine.commit(ProfileField::GameOverPending);
        }
        engine
    }

    pub fn dispatch(&mut self, action: EngineAction) {
        debug!(?action, "dispatch");
        match action {
            EngineAction::SelectEquipment { slot, id } => self.select_equipment(slot, &id),
            EngineAction::SetDifficulty(d) => self.set_difficulty(d),
            EngineAction::StartRun => {
                self.start_run();
            }
            EngineAction::Move(dir) => self.move_player(dir),
            EngineAction::RefreshMap => self.refresh_map(),
            EngineAction::AbandonRun => self.abandon_run(),
            EngineAction::AcknowledgeVictory => self.acknowledge_victory(),
            EngineAction::GameOverDelayElapsed => self.game_over_delay_elapsed(),
            EngineAction::AcknowledgeGameOver => self.acknowledge_game_over(),
            EngineAction::ResetAllData => self.reset_all_data(),
        }
    }

    // ---------------- Read-only view inputs -----------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn selection(&self) -> &SelectedEquipment {
        &self.selection
    }

    pub fn equipment(&self) -> &EquipmentDatabase {
        &self.profile.equipment
    }

    pub fn achievements(&self) -> &Achievements {
        &self.profile.achievements
    }

    pub fn difficulty(&self) -> Difficulty {
        self.profile.difficulty
    }

    /// Profile health; follows the run's health after every damaging move.
    pub fn health(&self) -> u32 {
        self.profile.health
    }

    pub fn resistances(&self) -> Resistances {
        Resistances::from_selection(&self.selection, &self.profile.equipment)
    }

    pub fn game_over_scheduled(&self) -> bool {
        self.game_over_scheduled
    }

    pub fn game_over_prompt(&self) -> bool {
        self.game_over_prompt
    }

    pub fn can_start(&self) -> bool {
        self.session.is_none()
            && !self.game_over_prompt
            && !self.game_over_scheduled
            && self.profile.health > 0
            && self.selection.is_complete(&self.profile.equipment)
    }

    pub fn can_refresh_map(&self) -> bool {
        self.session.is_none() && !self.profile.difficulty.has_fixed_map()
    }

    // ---------------- Commands -----------------

    /// Unknown ids and selections made mid-run are ignored.
    pub fn select_equipment(&mut self, slot: Slot, id: &str) {
        if self.session.is_some() {
            return;
        }
        if self.profile.equipment.find(slot, id).is_none() {
            debug!(?slot, id, "unknown equipment id, ignoring");
            return;
        }
        self.selection.set(slot, Some(id.to_string()));
    }

    /// Easy and Normal get a fresh map on every selection; Hard and Expert
    /// reuse their stored map, generating it only when none exists.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.session.is_some() {
            return;
        }
        self.profile.difficulty = difficulty;
        self.commit(ProfileField::Difficulty);
        self.map = self.resolve_map(difficulty);
        info!(?difficulty, "difficulty selected");
    }

    pub fn refresh_map(&mut self) {
        if !self.can_refresh_map() {
            debug!(difficulty = ?self.profile.difficulty, "map refresh not allowed");
            return;
        }
        self.map = self.generator.generate(self.config.settings(self.profile.difficulty));
    }

    /// Returns whether a run was started.
    pub fn start_run(&mut self) -> bool {
        if !self.can_start() {
            debug!("start refused");
            return false;
        }
        let resistances = self.resistances();
        self.session = Some(SessionState::new(self.map.clone(), resistances, self.profile.health));
        info!(
            difficulty = ?self.profile.difficulty,
            health = self.profile.health,
            fire = resistances.fire,
            storm = resistances.storm,
            ice = resistances.ice,
            "run started"
        );
        true
    }

    pub fn move_player(&mut self, dir: Direction) {
        let Some(session) = self.session.as_mut() else { return };
        match session.step(dir) {
            MoveResult::Ignored => {}
            MoveResult::Moved { to, hit } => {
                debug!(row = to.row, col = to.col, damage = hit.damage, health = session.health, "moved");
                let health = session.health;
                self.push_terrain_notice(hit.notice());
                if hit.damage > 0 {
                    self.profile.health = health;
                    self.commit(ProfileField::Health);
                }
            }
            MoveResult::ReachedEnd { .. } => {
                info!(health = session.health, "reached the end");
            }
            MoveResult::Died { to, hit } => {
                info!(row = to.row, col = to.col, damage = hit.damage, "health exhausted");
                self.push_terrain_notice(hit.notice());
                self.profile.health = 0;
                self.commit(ProfileField::Health);
                self.profile.game_over_pending = true;
                self.commit(ProfileField::GameOverPending);
                self.game_over_scheduled = true;
            }
        }
    }

    /// Leaves an active run; damage taken so far stays taken.
    pub fn abandon_run(&mut self) {
        if self.session.as_ref().is_some_and(SessionState::is_active) {
            self.session = None;
            info!(health = self.profile.health, "run abandoned");
        }
    }

    /// Applies victory rewards and returns to selection. Progression and the
    /// selection that points at it are updated in the same step.
    pub fn acknowledge_victory(&mut self) {
        let won = self.session.as_ref().is_some_and(|s| s.outcome == Outcome::Won);
        if !won {
            return;
        }
        let Some(session) = self.session.take() else { return };
        let difficulty = self.profile.difficulty;
        let reward = self.config.settings(difficulty).exp_reward;

        self.profile.health = session
            .health
            .saturating_add(self.config.victory_heal)
            .min(self.config.max_health);
        self.commit(ProfileField::Health);

        self.profile.achievements.record_win(difficulty);
        self.commit(ProfileField::Achievements);

        reward_equipped(&mut self.profile.equipment, &self.selection, reward);
        self.commit(ProfileField::Equipment);

        let map = self.generator.generate(self.config.settings(difficulty));
        if let Some(field) = self.profile.set_fixed_map(difficulty, Some(map.clone())) {
            self.commit(field);
        }
        self.map = map;

        info!(?difficulty, health = self.profile.health, reward, "victory");
        self.notifications.push(Notification::Victory { difficulty, health: self.profile.health });
    }

    /// The deferred half of a defeat. Fires even if the profile was reset in
    /// the meantime.
    pub fn game_over_delay_elapsed(&mut self) {
        if !self.game_over_scheduled {
            return;
        }
        self.game_over_scheduled = false;
        self.session = None;
        self.game_over_prompt = true;
        info!("game over");
        self.notifications.push(Notification::GameOver);
    }

    pub fn acknowledge_game_over(&mut self) {
        if !self.game_over_prompt {
            return;
        }
        self.game_over_prompt = false;
        self.reset_all_data();
    }

    /// Factory equipment, zeroed achievements, no fixed maps, full health,
    /// no pending game-over, empty selection and a fresh map for the active
    /// difficulty. The difficulty itself is kept. The fresh map is never stored
    /// as a fixed map; the next Hard/Expert selection generates its own.
    pub fn reset_all_data(&mut self) {
        let difficulty = self.profile.difficulty;
        self.profile = PersistentProfile {
            difficulty,
            ..PersistentProfile::new(self.config.max_health)
        };
        self.selection = SelectedEquipment::default();
        self.session = None;
        if let Err(e) = self.profile.save_all(&mut self.store) {
            warn!(error = %e, "failed to persist reset profile");
        }
        self.map = self.generator.generate(self.config.settings(difficulty));
        info!(?difficulty, "all data reset");
    }

    // ---------------- Internals -----------------

    fn resolve_map(&mut self, difficulty: Difficulty) -> Map {
        if let Some(fixed) = self.profile.fixed_map(difficulty) {
            return fixed.clone();
        }
        let map = self.generator.generate(self.config.settings(difficulty));
        if let Some(field) = self.profile.set_fixed_map(difficulty, Some(map.clone())) {
            debug!(?difficulty, "fixed map generated");
            self.commit(field);
        }
        map
    }

    fn push_terrain_notice(&mut self, notice: Option<(String, Severity)>) {
        if let Some((message, severity)) = notice {
            self.notifications.push(Notification::Terrain { message, severity });
        }
    }

    /// Storage failures never abort a command; memory stays authoritative.
    fn commit(&mut self, field: ProfileField) {
        if let Err(e) = self.profile.save(&mut self.store, field) {
            warn!(key = field.key(), error = %e, "failed to persist profile field");
        }
    }
}

/// Shared engine for the view's reducer. Each dispatch bumps `version` so
/// components re-render.
pub struct EngineHandle<S, R> {
    engine: Rc<RefCell<GameEngine<S, R>>>,
    pub version: u64,
}

impl<S, R> EngineHandle<S, R> {
    pub fn new(engine: GameEngine<S, R>) -> Self {
        Self { engine: Rc::new(RefCell::new(engine)), version: 0 }
    }

    pub fn engine(&self) -> Ref<'_, GameEngine<S, R>> {
        self.engine.borrow()
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.engine.borrow_mut().drain_notifications()
    }
}

impl<S, R> PartialEq for EngineHandle<S, R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.engine, &other.engine) && self.version == other.version
    }
}

impl<S: KeyValueStore + 'static, R: Rng + 'static> Reducible for EngineHandle<S, R> {
    type Action = EngineAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        self.engine.borrow_mut().dispatch(action);
        Rc::new(Self {
            engine: Rc::clone(&self.engine),
            version: self.version.wrapping_add(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, END_POS, MAP_COLS, MAP_ROWS, Position, START_POS, TerrainCell};
    use crate::state::profile::{KEY_GAME_OVER, KEY_HARD_MAP, KEY_HEALTH};
    use crate::state::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type TestEngine = GameEngine<MemoryStore, ChaCha8Rng>;

    fn engine_with(store: MemoryStore) -> TestEngine {
        GameEngine::load(store, ChaCha8Rng::seed_from_u64(99), GameConfig::default())
    }

    fn fresh() -> TestEngine {
        engine_with(MemoryStore::new())
    }

    fn equip(engine: &mut TestEngine, ids: [&str; 3]) {
        for (slot, id) in Slot::ALL.into_iter().zip(ids) {
            engine.select_equipment(slot, id);
        }
    }

    fn uniform_map(element: Element, level: u8) -> Map {
        let mut cells = [[TerrainCell::Normal { element, level }; MAP_COLS]; MAP_ROWS];
        cells[START_POS.row][START_POS.col] = TerrainCell::Start;
        cells[END_POS.row][END_POS.col] = TerrainCell::End;
        Map { cells }
    }

    /// Starts a run on a known map with the fire set equipped.
    fn running_on(map: Map) -> TestEngine {
        let mut e = fresh();
        e.map = map;
        equip(&mut e, ["head1", "body1", "feet1"]);
        assert!(e.start_run());
        e
    }

    fn walk_to_win(e: &mut TestEngine) {
        e.session.as_mut().unwrap().position = Position { row: 0, col: 4 };
        e.move_player(Direction::Right);
    }

    #[test]
    fn fresh_profile_loads_defaults() {
        let e = fresh();
        assert_eq!(e.health(), 1000);
        assert_eq!(e.difficulty(), Difficulty::Easy);
        assert!(!e.game_over_prompt());
        assert!(e.map().is_consistent());
        assert!(e.session().is_none());
    }

    #[test]
    fn start_requires_full_selection() {
        let mut e = fresh();
        e.select_equipment(Slot::Head, "head1");
        e.select_equipment(Slot::Body, "body2");
        assert!(!e.start_run());
        e.select_equipment(Slot::Feet, "feet3");
        assert!(e.start_run());
        assert!(!e.start_run());
    }

    #[test]
    fn unknown_equipment_is_ignored() {
        let mut e = fresh();
        e.select_equipment(Slot::Head, "head1");
        e.select_equipment(Slot::Head, "feet1");
        e.select_equipment(Slot::Body, "missing");
        assert_eq!(e.selection().head.as_deref(), Some("head1"));
        assert_eq!(e.selection().body, None);
    }

    #[test]
    fn damaging_move_persists_health_and_notifies() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.move_player(Direction::Up);
        assert_eq!(e.health(), 964);
        assert_eq!(e.store.get(KEY_HEALTH).unwrap().as_deref(), Some("964"));
        let notes = e.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity(), Severity::Warning);
        assert!(e.drain_notifications().is_empty());
    }

    #[test]
    fn absorbed_move_emits_success() {
        // Fire set gives 6 fire resistance.
        let mut e = running_on(uniform_map(Element::Fire, 3));
        e.move_player(Direction::Up);
        assert_eq!(e.health(), 1000);
        let notes = e.drain_notifications();
        assert_eq!(notes[0].severity(), Severity::Success);
    }

    #[test]
    fn lethal_move_clamps_and_schedules_game_over() {
        let mut e = running_on(uniform_map(Element::Storm, 1));
        e.session.as_mut().unwrap().health = 30;
        e.move_player(Direction::Up);
        let s = e.session().unwrap();
        assert_eq!(s.health, 0);
        assert_eq!(s.outcome, Outcome::Lost);
        assert!(s.controls_locked);
        assert_eq!(e.health(), 0);
        assert!(e.game_over_scheduled());
        assert_eq!(e.store.get(KEY_GAME_OVER).unwrap().as_deref(), Some("true"));

        e.move_player(Direction::Right);
        assert_eq!(e.session().unwrap().position, Position { row: 3, col: 0 });

        e.game_over_delay_elapsed();
        assert!(e.session().is_none());
        assert!(e.game_over_prompt());
        assert!(e.drain_notifications().contains(&Notification::GameOver));

        e.acknowledge_game_over();
        assert!(!e.game_over_prompt());
        assert_eq!(e.health(), 1000);
        assert_eq!(e.store.get(KEY_GAME_OVER).unwrap(), None);
    }

    #[test]
    fn deferred_game_over_fires_after_reset() {
        let mut e = running_on(uniform_map(Element::Storm, 3));
        e.move_player(Direction::Up);
        assert!(e.game_over_scheduled());
        e.reset_all_data();
        assert_eq!(e.health(), 1000);
        e.game_over_delay_elapsed();
        assert!(e.game_over_prompt());
    }

    #[test]
    fn reaching_end_wins_without_damage() {
        let mut e = running_on(uniform_map(Element::Storm, 3));
        walk_to_win(&mut e);
        let s = e.session().unwrap();
        assert_eq!(s.position, END_POS);
        assert_eq!(s.outcome, Outcome::Won);
        assert_eq!(e.health(), 1000);
        e.move_player(Direction::Left);
        assert_eq!(e.session().unwrap().position, END_POS);
    }

    #[test]
    fn victory_rewards_and_reresolves_selection() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.move_player(Direction::Up);
        walk_to_win(&mut e);
        e.acknowledge_victory();

        assert!(e.session().is_none());
        assert_eq!(e.health(), 1000);
        assert_eq!(e.achievements().wins(Difficulty::Easy), 1);
        let helm = e.selection().resolve(e.equipment(), Slot::Head).unwrap();
        assert_eq!(helm.exp, 30);
        assert!(matches!(
            e.drain_notifications().last(),
            Some(Notification::Victory { difficulty: Difficulty::Easy, health: 1000 })
        ));
        let reloaded = PersistentProfile::load(&e.store, 1000);
        assert_eq!(reloaded.achievements.wins(Difficulty::Easy), 1);
        assert_eq!(reloaded.equipment, *e.equipment());
    }

    #[test]
    fn victory_heal_is_capped() {
        let mut e = running_on(uniform_map(Element::Ice, 2));
        e.move_player(Direction::Up);
        assert_eq!(e.health(), 712);
        walk_to_win(&mut e);
        e.acknowledge_victory();
        assert_eq!(e.health(), 1000);

        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.session.as_mut().unwrap().health = 400;
        walk_to_win(&mut e);
        e.acknowledge_victory();
        assert_eq!(e.health(), 700);
    }

    #[test]
    fn victory_without_win_is_ignored() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.acknowledge_victory();
        assert!(e.session().is_some());
        assert_eq!(e.achievements().wins(Difficulty::Easy), 0);
    }

    #[test]
    fn hard_map_is_reused_until_won() {
        let mut e = fresh();
        e.set_difficulty(Difficulty::Hard);
        let first = e.map().clone();
        let generated = e.generator.generated();
        e.set_difficulty(Difficulty::Hard);
        assert_eq!(e.generator.generated(), generated);
        assert_eq!(*e.map(), first);

        e.set_difficulty(Difficulty::Easy);
        e.set_difficulty(Difficulty::Hard);
        assert_eq!(*e.map(), first);

        equip(&mut e, ["head1", "body2", "feet3"]);
        assert!(e.start_run());
        walk_to_win(&mut e);
        let before_win = e.generator.generated();
        e.acknowledge_victory();
        assert_eq!(e.generator.generated(), before_win + 1);
        assert_eq!(e.profile.hard_map.as_ref(), Some(e.map()));
        assert_ne!(*e.map(), first);
    }

    #[test]
    fn easy_regenerates_each_selection() {
        let mut e = fresh();
        let before = e.generator.generated();
        e.set_difficulty(Difficulty::Easy);
        e.set_difficulty(Difficulty::Normal);
        assert_eq!(e.generator.generated(), before + 2);
        assert!(e.profile.hard_map.is_none());
    }

    #[test]
    fn refresh_only_for_easy_and_normal() {
        let mut e = fresh();
        let before = e.generator.generated();
        e.refresh_map();
        assert_eq!(e.generator.generated(), before + 1);
        e.set_difficulty(Difficulty::Expert);
        let expert = e.map().clone();
        let after_expert = e.generator.generated();
        e.refresh_map();
        assert_eq!(e.generator.generated(), after_expert);
        assert_eq!(*e.map(), expert);
    }

    #[test]
    fn fixed_map_survives_reload() {
        let mut e = fresh();
        e.set_difficulty(Difficulty::Hard);
        let map = e.map().clone();
        let store = e.store.clone();
        assert!(store.get(KEY_HARD_MAP).unwrap().is_some());
        let reloaded = engine_with(store);
        assert_eq!(reloaded.difficulty(), Difficulty::Hard);
        assert_eq!(*reloaded.map(), map);
    }

    #[test]
    fn startup_recovers_pending_game_over() {
        let mut store = MemoryStore::new();
        store.set(KEY_GAME_OVER, "true").unwrap();
        store.set(KEY_HEALTH, "640").unwrap();
        let mut e = engine_with(store);
        assert!(e.game_over_prompt());
        assert_eq!(e.store.get(KEY_GAME_OVER).unwrap(), None);
        equip(&mut e, ["head1", "body1", "feet1"]);
        assert!(!e.start_run());
        e.acknowledge_game_over();
        assert_eq!(e.health(), 1000);
        assert_eq!(*e.selection(), SelectedEquipment::default());
        equip(&mut e, ["head1", "body1", "feet1"]);
        assert!(e.start_run());
    }

    #[test]
    fn startup_recovers_zero_health() {
        let mut store = MemoryStore::new();
        store.set(KEY_HEALTH, "0").unwrap();
        assert!(engine_with(store).game_over_prompt());
    }

    #[test]
    fn reset_restores_factory_state() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.move_player(Direction::Up);
        walk_to_win(&mut e);
        e.acknowledge_victory();
        e.set_difficulty(Difficulty::Expert);
        e.set_difficulty(Difficulty::Hard);

        e.reset_all_data();
        assert_eq!(*e.equipment(), EquipmentDatabase::default());
        assert_eq!(*e.achievements(), Achievements::default());
        assert!(e.profile.expert_map.is_none());
        assert!(e.profile.hard_map.is_none());
        assert!(e.store.get(KEY_HARD_MAP).unwrap().is_none());
        assert!(e.map().is_consistent());
        assert_eq!(e.health(), 1000);
        assert_eq!(*e.selection(), SelectedEquipment::default());
        assert_eq!(e.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn hard_selection_after_reset_generates_new_fixed_map() {
        let mut e = fresh();
        e.set_difficulty(Difficulty::Hard);
        e.reset_all_data();
        assert!(e.profile.hard_map.is_none());
        let reset_map = e.map().clone();

        let before = e.generator.generated();
        e.set_difficulty(Difficulty::Hard);
        assert_eq!(e.generator.generated(), before + 1);
        assert_eq!(e.profile.hard_map.as_ref(), Some(e.map()));
        assert_ne!(*e.map(), reset_map);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.move_player(Direction::Up);
        e.abandon_run();
        e.set_difficulty(Difficulty::Expert);
        e.set_difficulty(Difficulty::Hard);
        e.reset_all_data();
        let once = e.profile.clone();
        let once_store = e.store.clone();
        e.reset_all_data();
        assert_eq!(e.profile, once);
        assert_eq!(e.store, once_store);
        assert!(e.profile.hard_map.is_none());
        assert!(e.profile.expert_map.is_none());
    }

    #[test]
    fn abandon_keeps_damage() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.move_player(Direction::Up);
        e.abandon_run();
        assert!(e.session().is_none());
        assert_eq!(e.health(), 964);
    }

    #[test]
    fn commands_ignored_mid_run() {
        let mut e = running_on(uniform_map(Element::Ice, 1));
        e.set_difficulty(Difficulty::Expert);
        e.select_equipment(Slot::Head, "head3");
        e.refresh_map();
        assert_eq!(e.difficulty(), Difficulty::Easy);
        assert_eq!(e.selection().head.as_deref(), Some("head1"));
    }

    #[test]
    fn handle_drain_empties_engine_queue() {
        let handle = EngineHandle::new(running_on(uniform_map(Element::Ice, 1)));
        let next = Rc::new(handle).reduce(EngineAction::Move(Direction::Up));
        let notes = next.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity(), Severity::Warning);
        assert!(next.drain_notifications().is_empty());
        assert!(next.engine.borrow_mut().drain_notifications().is_empty());
    }

    #[test]
    fn reducer_bumps_version() {
        let handle = Rc::new(EngineHandle::new(fresh()));
        let next = Rc::clone(&handle).reduce(EngineAction::SelectEquipment {
            slot: Slot::Feet,
            id: "feet2".into(),
        });
        assert_eq!(next.version, 1);
        assert!(*handle != *next);
        assert_eq!(next.engine().selection().feet.as_deref(), Some("feet2"));
    }
}
