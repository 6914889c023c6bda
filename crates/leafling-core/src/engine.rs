//! Plant engine - main entry point for hosting a companion
//!
//! The engine owns the canonical state and is the only writer. Every
//! mutation takes the caller's current timestamp, applies one transition
//! from the logic crate, and autosaves through the configured store.

use leafling_logic::care::{self, CareAction, CareOutcome, RejectReason};
use leafling_logic::condition::Condition;
use leafling_logic::cooldown::{CooldownLedger, TimestampMs};
use leafling_logic::plant::{self, NameError, PlantState, ReviveOutcome};
use leafling_logic::rules;

use crate::persistence::{self, SaveData, SnapshotError, SnapshotStore};
use crate::ticker::TickTimer;
use crate::view::{ActionAvailability, PlantView};

/// Main plant engine
pub struct PlantEngine {
    /// The plant's canonical state
    plant: PlantState,
    /// Per-action ready-again deadlines
    cooldowns: CooldownLedger,
    /// Cooldowns run doubled while set; cleared on reset
    revived: bool,
    /// Decay schedule; disarmed while uninitialized or dead
    ticker: TickTimer,
    /// Autosave target, if any
    store: Option<Box<dyn SnapshotStore>>,
}

impl PlantEngine {
    /// Create an engine with no plant adopted and no store attached.
    pub fn new() -> Self {
        Self {
            plant: PlantState::uninitialized(),
            cooldowns: CooldownLedger::new(),
            revived: false,
            ticker: TickTimer::new(),
            store: None,
        }
    }

    /// Attach a snapshot store for autosave and restore.
    pub fn with_store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Override the decay interval. Tests use short intervals.
    pub fn with_tick_interval(mut self, interval_ms: u64) -> Self {
        self.ticker = TickTimer::with_interval(interval_ms);
        self
    }

    /// Load the stored snapshot, if one exists. Returns whether a snapshot
    /// was applied. An unreadable snapshot is logged and discarded so the
    /// host starts at onboarding rather than crashing.
    pub fn restore(&mut self, now: TimestampMs) -> bool {
        let loaded = match self.store.as_mut() {
            Some(store) => store.load(),
            None => return false,
        };
        match loaded {
            Ok(Some(data)) => {
                log::info!(
                    "restored snapshot: '{}' at {:.1} health",
                    data.plant.name,
                    data.plant.health
                );
                self.apply_snapshot(data, now);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("snapshot unreadable, starting fresh: {}", e);
                self.clear_in_memory();
                false
            }
        }
    }

    /// Adopt a plant with the given name, replacing whatever came before.
    /// The name is trimmed and length-checked; a bad name changes nothing.
    pub fn initialize(&mut self, name: &str, now: TimestampMs) -> Result<(), NameError> {
        let name = plant::validate_name(name)?;
        log::info!("planted '{}'", name);
        self.plant = PlantState::planted(name);
        self.cooldowns = CooldownLedger::new();
        self.revived = false;
        self.ticker.arm(now);
        self.autosave();
        Ok(())
    }

    /// Forget the plant and return to onboarding. The cleared state is
    /// saved too, so the wipe survives a restart.
    pub fn reset(&mut self) {
        log::info!("plant reset to onboarding");
        self.clear_in_memory();
        self.autosave();
    }

    /// Apply exactly one decay step. Does nothing before onboarding or
    /// after death; hitting zero health cancels the decay schedule until
    /// a revival.
    pub fn tick(&mut self, now: TimestampMs) {
        if !self.plant.is_initialized() || self.plant.is_dead() {
            return;
        }
        self.plant = plant::decay_tick(&self.plant);
        if self.plant.is_dead() {
            log::info!("'{}' has withered", self.plant.name);
            self.ticker.cancel();
        } else {
            // Keep the schedule aligned for hosts that drive decay directly.
            self.ticker.reschedule(now);
        }
        self.autosave();
    }

    /// Run the decay schedule: tick once if the deadline has passed.
    /// Long gaps cost a single step; the schedule restarts from `now`.
    pub fn poll_tick(&mut self, now: TimestampMs) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.tick(now);
        true
    }

    /// Perform a care action. Rejections (no plant, dead, on cooldown)
    /// come back as values for the host to show; only a successful
    /// application mutates and autosaves.
    pub fn perform_action(&mut self, action: CareAction, now: TimestampMs) -> CareOutcome {
        if !self.plant.is_initialized() {
            return CareOutcome::Rejected(RejectReason::Uninitialized);
        }
        let outcome = care::apply_care(&self.plant, &self.cooldowns, action, now, self.revived);
        if let CareOutcome::Applied(applied) = &outcome {
            if let Some(stage) = applied.grew_to {
                log::info!(
                    "'{}' grew into its {} stage",
                    applied.state.name,
                    stage.label()
                );
            }
            self.plant = applied.state.clone();
            self.cooldowns = applied.cooldowns;
            self.autosave();
        }
        outcome
    }

    /// Revive a dead plant at penalized health. Clears all cooldowns,
    /// restarts decay, and doubles every cooldown from here on.
    pub fn revive(&mut self, now: TimestampMs) -> ReviveOutcome {
        let outcome = plant::revive(&self.plant);
        if let ReviveOutcome::Revived(state) = &outcome {
            log::info!("'{}' revived at {:.0} health", state.name, state.health);
            self.plant = state.clone();
            self.cooldowns = CooldownLedger::new();
            self.revived = true;
            self.ticker.arm(now);
            self.autosave();
        }
        outcome
    }

    /// Current plant state.
    pub fn state(&self) -> &PlantState {
        &self.plant
    }

    /// Current cooldown ledger.
    pub fn cooldowns(&self) -> &CooldownLedger {
        &self.cooldowns
    }

    /// Whether a plant has been adopted.
    pub fn is_initialized(&self) -> bool {
        self.plant.is_initialized()
    }

    pub fn is_dead(&self) -> bool {
        self.plant.is_dead()
    }

    /// Whether cooldowns currently run doubled.
    pub fn is_revived(&self) -> bool {
        self.revived
    }

    /// Whether the decay schedule is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Milliseconds until the action is available again; zero when ready.
    pub fn cooldown_remaining(&self, action: CareAction, now: TimestampMs) -> u64 {
        self.cooldowns.remaining(action, now)
    }

    /// Condition band for display.
    pub fn condition(&self) -> Condition {
        Condition::from_health(self.plant.health, self.plant.is_dead())
    }

    /// Build a render-ready projection resolved against `now`.
    pub fn view(&self, now: TimestampMs) -> PlantView {
        let dead = self.plant.is_dead();
        let usable = self.plant.is_initialized() && !dead;
        PlantView {
            name: self.plant.name.clone(),
            initialized: self.plant.is_initialized(),
            health: self.plant.health,
            max_health: rules::MAX_HEALTH,
            care_points: self.plant.care_points,
            stage: self.plant.stage,
            condition: Condition::from_health(self.plant.health, dead),
            dead,
            revived: self.revived,
            actions: CareAction::ALL
                .iter()
                .map(|&action| {
                    let remaining_ms = self.cooldowns.remaining(action, now);
                    ActionAvailability {
                        action,
                        ready: usable && remaining_ms == 0,
                        remaining_ms,
                    }
                })
                .collect(),
        }
    }

    /// Save engine state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SnapshotError> {
        persistence::write_snapshot(writer, &self.snapshot())
    }

    /// Load engine state from a reader
    pub fn load<R: std::io::Read>(
        &mut self,
        reader: R,
        now: TimestampMs,
    ) -> Result<(), SnapshotError> {
        let data = persistence::read_snapshot(reader)?;
        self.apply_snapshot(data, now);
        Ok(())
    }

    fn snapshot(&self) -> SaveData {
        SaveData::new(self.plant.clone(), self.cooldowns, self.revived)
    }

    fn apply_snapshot(&mut self, data: SaveData, now: TimestampMs) {
        self.plant = data.plant;
        self.cooldowns = data.cooldowns;
        self.revived = data.revived;
        if self.plant.is_initialized() && !self.plant.is_dead() {
            self.ticker.arm(now);
        } else {
            self.ticker.cancel();
        }
    }

    fn clear_in_memory(&mut self) {
        self.plant = PlantState::uninitialized();
        self.cooldowns = CooldownLedger::new();
        self.revived = false;
        self.ticker.cancel();
    }

    fn autosave(&mut self) {
        if let Some(store) = self.store.as_mut() {
            let data = SaveData::new(self.plant.clone(), self.cooldowns, self.revived);
            if let Err(e) = store.save(&data) {
                log::warn!("autosave failed: {}", e);
            }
        }
    }
}

impl Default for PlantEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use leafling_logic::growth::GrowthStage;

    fn adopted(now: TimestampMs) -> PlantEngine {
        let mut engine = PlantEngine::new();
        engine.initialize("Fern", now).unwrap();
        engine
    }

    fn kill(engine: &mut PlantEngine, now: TimestampMs) {
        for _ in 0..200 {
            engine.tick(now);
        }
        assert!(engine.is_dead());
    }

    #[test]
    fn test_engine_starts_uninitialized() {
        let engine = PlantEngine::new();
        assert!(!engine.is_initialized());
        assert!(!engine.is_dead());
        assert!(!engine.is_ticking());
        assert_eq!(engine.state().health, rules::INITIAL_HEALTH);
    }

    #[test]
    fn test_initialize_validates_and_arms() {
        let mut engine = PlantEngine::new();
        assert!(engine.initialize("   ", 0).is_err());
        assert!(!engine.is_initialized());

        engine.initialize("  Fern  ", 0).unwrap();
        assert!(engine.is_initialized());
        assert_eq!(engine.state().name, "Fern");
        assert!(engine.is_ticking());
    }

    #[test]
    fn test_tick_before_initialize_is_noop() {
        let mut engine = PlantEngine::new();
        engine.tick(0);
        assert_eq!(engine.state().health, rules::INITIAL_HEALTH);
    }

    #[test]
    fn test_tick_decays_and_death_cancels_schedule() {
        let mut engine = adopted(0);
        engine.tick(0);
        assert_eq!(
            engine.state().health,
            rules::INITIAL_HEALTH - rules::DECAY_PER_TICK
        );

        kill(&mut engine, 0);
        assert_eq!(engine.state().health, 0.0);
        assert!(!engine.is_ticking());
        assert_eq!(engine.condition(), Condition::Dead);

        // Dead plants do not decay further.
        engine.tick(0);
        assert_eq!(engine.state().health, 0.0);
    }

    #[test]
    fn test_action_rejected_before_initialize() {
        let mut engine = PlantEngine::new();
        let outcome = engine.perform_action(CareAction::Water, 0);
        assert_eq!(outcome.rejection(), Some(RejectReason::Uninitialized));
    }

    #[test]
    fn test_action_updates_state_and_ledger() {
        let mut engine = adopted(0);
        engine.tick(0);

        let outcome = engine.perform_action(CareAction::Water, 1_000);
        assert!(outcome.applied());
        assert_eq!(engine.state().health, rules::INITIAL_HEALTH - 0.5 + 15.0);
        assert_eq!(engine.state().care_points, 5.0);
        assert_eq!(
            engine.cooldown_remaining(CareAction::Water, 1_000),
            CareAction::Water.base_cooldown_ms()
        );

        let retry = engine.perform_action(CareAction::Water, 1_001);
        assert_eq!(
            retry.rejection(),
            Some(RejectReason::OnCooldown {
                remaining_ms: CareAction::Water.base_cooldown_ms() - 1
            })
        );
    }

    #[test]
    fn test_dead_plant_rejects_actions() {
        let mut engine = adopted(0);
        kill(&mut engine, 0);
        let outcome = engine.perform_action(CareAction::Feed, 0);
        assert_eq!(outcome.rejection(), Some(RejectReason::Dead));
    }

    #[test]
    fn test_revive_flow() {
        let mut engine = adopted(0);
        engine.perform_action(CareAction::Prune, 0);
        kill(&mut engine, 0);

        let outcome = engine.revive(10_000);
        assert!(outcome.applied());
        assert_eq!(engine.state().health, rules::revival_health());
        assert_eq!(engine.state().care_points, 15.0);
        assert!(engine.is_revived());
        assert!(engine.is_ticking());
        assert_eq!(engine.cooldown_remaining(CareAction::Prune, 10_000), 0);

        // Cooldowns run doubled from here on.
        let feed = engine.perform_action(CareAction::Feed, 10_000);
        assert!(feed.applied());
        assert_eq!(
            engine.cooldown_remaining(CareAction::Feed, 10_000),
            CareAction::Feed.base_cooldown_ms() * 2
        );
    }

    #[test]
    fn test_revive_rejected_while_alive() {
        let mut engine = adopted(0);
        assert_eq!(engine.revive(0), ReviveOutcome::RejectedAlive);
        assert!(!engine.is_revived());
    }

    #[test]
    fn test_reset_returns_to_sentinel() {
        let store = MemoryStore::new();
        let mut engine = PlantEngine::new().with_store(store.clone());
        engine.initialize("Fern", 0).unwrap();
        engine.perform_action(CareAction::Water, 0);

        engine.reset();
        assert!(!engine.is_initialized());
        assert!(!engine.is_ticking());
        assert_eq!(engine.state().health, rules::INITIAL_HEALTH);

        // The wipe is persisted: a fresh engine restores to onboarding.
        let mut fresh = PlantEngine::new().with_store(store);
        assert!(fresh.restore(0));
        assert!(!fresh.is_initialized());
    }

    #[test]
    fn test_autosave_lands_in_store() {
        let store = MemoryStore::new();
        let mut engine = PlantEngine::new().with_store(store.clone());
        assert!(store.is_empty());

        engine.initialize("Fern", 0).unwrap();
        assert!(!store.is_empty());

        let before = store.raw();
        engine.perform_action(CareAction::Water, 0);
        assert_ne!(store.raw(), before);
    }

    #[test]
    fn test_restore_roundtrip_between_engines() {
        let store = MemoryStore::new();
        let mut first = PlantEngine::new().with_store(store.clone());
        first.initialize("Fern", 0).unwrap();
        first.perform_action(CareAction::Feed, 500);

        let mut second = PlantEngine::new().with_store(store);
        assert!(second.restore(1_000));
        assert_eq!(second.state(), first.state());
        assert_eq!(second.cooldowns(), first.cooldowns());
        assert!(second.is_ticking());
    }

    #[test]
    fn test_restore_corrupt_snapshot_starts_fresh() {
        let store = MemoryStore::new();
        store.set_raw(vec![0xAB; 32]);

        let mut engine = PlantEngine::new().with_store(store);
        assert!(!engine.restore(0));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_restore_without_store_or_snapshot() {
        let mut bare = PlantEngine::new();
        assert!(!bare.restore(0));

        let mut empty = PlantEngine::new().with_store(MemoryStore::new());
        assert!(!empty.restore(0));
    }

    #[test]
    fn test_poll_tick_fires_once_per_deadline() {
        let mut engine = PlantEngine::new().with_tick_interval(100);
        engine.initialize("Fern", 0).unwrap();

        assert!(!engine.poll_tick(99));
        assert!(engine.poll_tick(100));
        assert_eq!(
            engine.state().health,
            rules::INITIAL_HEALTH - rules::DECAY_PER_TICK
        );

        // A long gap costs one step, then the schedule restarts from now.
        assert!(engine.poll_tick(1_000_000));
        assert!(!engine.poll_tick(1_000_050));
        assert!(engine.poll_tick(1_000_100));
        assert_eq!(
            engine.state().health,
            rules::INITIAL_HEALTH - 3.0 * rules::DECAY_PER_TICK
        );
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = adopted(0);
        engine.perform_action(CareAction::Sunlight, 2_000);

        let mut buf = Vec::new();
        engine.save(&mut buf).unwrap();

        let mut loaded = PlantEngine::new();
        loaded.load(buf.as_slice(), 5_000).unwrap();
        assert_eq!(loaded.state(), engine.state());
        assert_eq!(loaded.cooldowns(), engine.cooldowns());
        assert!(loaded.is_ticking());
    }

    #[test]
    fn test_view_reflects_engine() {
        let mut engine = adopted(0);
        engine.perform_action(CareAction::Water, 0);

        let view = engine.view(30_000);
        assert!(view.initialized);
        assert!(!view.dead);
        assert_eq!(view.stage, GrowthStage::Seed);
        assert_eq!(view.actions.len(), CareAction::ALL.len());

        let water = view
            .actions
            .iter()
            .find(|a| a.action == CareAction::Water)
            .unwrap();
        assert!(!water.ready);
        assert_eq!(water.remaining_ms, 30_000);

        let feed = view
            .actions
            .iter()
            .find(|a| a.action == CareAction::Feed)
            .unwrap();
        assert!(feed.ready);
    }

    #[test]
    fn test_view_disables_actions_while_dead() {
        let mut engine = adopted(0);
        kill(&mut engine, 0);
        let view = engine.view(0);
        assert!(view.dead);
        assert!(view.actions.iter().all(|a| !a.ready));
    }
}
