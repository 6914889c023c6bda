//! Leafling Headless Validation Harness
//!
//! Exercises the full rule set and engine lifecycle without a renderer.
//! Runs entirely in-process — no disk state, no clock, no UI.
//!
//! Usage:
//!   cargo run -p leafling-simtest
//!   cargo run -p leafling-simtest -- --verbose
//!   cargo run -p leafling-simtest -- --report results.json

use leafling_core::clock::{Clock, ManualClock};
use leafling_core::engine::PlantEngine;
use leafling_core::messages::{message_pool, status_message};
use leafling_core::persistence::{
    read_snapshot, write_snapshot, MemoryStore, SaveData, SnapshotError, SnapshotStore,
};
use leafling_logic::care::{apply_care, CareAction, CareOutcome, RejectReason};
use leafling_logic::condition::Condition;
use leafling_logic::cooldown::CooldownLedger;
use leafling_logic::growth::{stage_for_points, GrowthStage};
use leafling_logic::plant::{decay_tick, revive, PlantState, ReviveOutcome};
use leafling_logic::rules;
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let report_path = args
        .iter()
        .position(|a| a == "--report")
        .and_then(|i| args.get(i + 1))
        .cloned();

    println!("=== Leafling Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Rule constants
    results.extend(validate_rules(verbose));

    // 2. Growth stage derivation
    results.extend(validate_growth(verbose));

    // 3. Decay & death
    results.extend(validate_decay(verbose));

    // 4. Care actions
    results.extend(validate_care(verbose));

    // 5. Revival
    results.extend(validate_revival(verbose));

    // 6. Condition bands & messages
    results.extend(validate_condition(verbose));

    // 7. Snapshot persistence
    results.extend(validate_snapshots(verbose));

    // 8. Engine lifecycle
    results.extend(validate_engine_lifecycle(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if let Some(path) = report_path {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("report written to {}", path),
                Err(e) => eprintln!("failed to write report to {}: {}", path, e),
            },
            Err(e) => eprintln!("failed to encode report: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Rule Constants ───────────────────────────────────────────────────

fn validate_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Rule Constants ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "rules_health_bounds".into(),
        passed: rules::INITIAL_HEALTH > 0.0 && rules::INITIAL_HEALTH <= rules::MAX_HEALTH,
        detail: format!(
            "plants start at {:.0} of {:.0} max",
            rules::INITIAL_HEALTH,
            rules::MAX_HEALTH
        ),
    });

    results.push(TestResult {
        name: "rules_decay_positive".into(),
        passed: rules::DECAY_PER_TICK > 0.0 && rules::DECAY_PER_TICK < rules::MAX_HEALTH,
        detail: format!(
            "{} health lost every {}ms",
            rules::DECAY_PER_TICK,
            rules::TICK_INTERVAL_MS
        ),
    });

    results.push(TestResult {
        name: "rules_revival_health".into(),
        passed: rules::revival_health()
            == rules::INITIAL_HEALTH - rules::REVIVAL_HEALTH_PENALTY
            && rules::revival_health() >= 1.0,
        detail: format!("revival returns plants at {:.0} health", rules::revival_health()),
    });

    let mut cooldowns: Vec<u64> = CareAction::ALL.iter().map(|a| a.base_cooldown_ms()).collect();
    cooldowns.sort_unstable();
    cooldowns.dedup();
    results.push(TestResult {
        name: "rules_cooldowns_distinct".into(),
        passed: cooldowns.len() == CareAction::ALL.len() && cooldowns[0] > 0,
        detail: format!("{} distinct positive cooldowns", cooldowns.len()),
    });

    let effects_positive = CareAction::ALL.iter().all(|a| {
        let e = a.effect();
        e.health > 0.0 && e.points > 0.0
    });
    results.push(TestResult {
        name: "rules_effects_positive".into(),
        passed: effects_positive,
        detail: "every action restores health and earns points".into(),
    });

    results
}

// ── 2. Growth Stages ────────────────────────────────────────────────────

fn validate_growth(verbose: bool) -> Vec<TestResult> {
    println!("--- Growth Stages ---");
    let mut results = Vec::new();

    // Boundary table: one point below each threshold stays put, the
    // threshold itself promotes.
    let boundaries = [
        (0.0, GrowthStage::Seed),
        (49.0, GrowthStage::Seed),
        (50.0, GrowthStage::Sprout),
        (249.0, GrowthStage::Sprout),
        (250.0, GrowthStage::Young),
        (799.0, GrowthStage::Young),
        (800.0, GrowthStage::Mature),
        (1999.0, GrowthStage::Mature),
        (2000.0, GrowthStage::Bloom),
        (999_999.0, GrowthStage::Bloom),
    ];
    let mut edges_ok = true;
    for &(points, expected) in &boundaries {
        if stage_for_points(points) != expected {
            edges_ok = false;
        }
    }
    results.push(TestResult {
        name: "growth_threshold_edges".into(),
        passed: edges_ok,
        detail: format!("{} boundary cases classified", boundaries.len()),
    });

    // Thresholds strictly increase from zero.
    let mut prev = -1.0f32;
    let mut ordered = true;
    for stage in GrowthStage::ALL {
        let t = stage.threshold();
        if t <= prev {
            ordered = false;
        }
        prev = t;
    }
    results.push(TestResult {
        name: "growth_thresholds_ordered".into(),
        passed: ordered && GrowthStage::Seed.threshold() == 0.0,
        detail: "thresholds strictly increase from zero".into(),
    });

    // Derivation never moves backwards as points climb.
    let mut monotonic = true;
    let mut last = GrowthStage::Seed;
    let mut points = 0.0f32;
    while points <= 2_200.0 {
        let stage = stage_for_points(points);
        if stage < last {
            monotonic = false;
        }
        last = stage;
        points += 10.0;
    }
    results.push(TestResult {
        name: "growth_monotonic_sweep".into(),
        passed: monotonic && last == GrowthStage::Bloom,
        detail: "220-step sweep ends at Bloom without regression".into(),
    });

    if verbose {
        println!("  Stage thresholds:");
        for stage in GrowthStage::ALL {
            println!("    {:6} at {:.0} points", stage.label(), stage.threshold());
        }
    }

    results
}

// ── 3. Decay & Death ────────────────────────────────────────────────────

fn validate_decay(_verbose: bool) -> Vec<TestResult> {
    println!("--- Decay & Death ---");
    let mut results = Vec::new();

    let start = PlantState::planted("Sprig");
    let stepped = decay_tick(&start);
    results.push(TestResult {
        name: "decay_single_step".into(),
        passed: stepped.health == rules::INITIAL_HEALTH - rules::DECAY_PER_TICK
            && stepped.care_points == start.care_points
            && stepped.stage == start.stage,
        detail: format!("{:.1} → {:.1}, progress untouched", start.health, stepped.health),
    });

    let mut low = start.clone();
    low.health = 0.3;
    let floored = decay_tick(&low);
    results.push(TestResult {
        name: "decay_floors_at_zero".into(),
        passed: floored.health == 0.0 && floored.is_dead(),
        detail: "0.3 health decays to exactly zero, not negative".into(),
    });

    // Count steps to death, then confirm death is terminal.
    let mut plant = start.clone();
    let mut steps = 0u32;
    for i in 1..=400 {
        plant = decay_tick(&plant);
        if plant.is_dead() {
            steps = i;
            break;
        }
    }
    let beyond = decay_tick(&plant);
    results.push(TestResult {
        name: "decay_death_terminal".into(),
        passed: steps == 160 && beyond.health == 0.0 && beyond == plant,
        detail: format!("died after {} steps, further decay is a no-op", steps),
    });

    results
}

// ── 4. Care Actions ─────────────────────────────────────────────────────

fn validate_care(_verbose: bool) -> Vec<TestResult> {
    println!("--- Care Actions ---");
    let mut results = Vec::new();

    let plant = PlantState::planted("Sprig");
    let ledger = CooldownLedger::new();

    // Effect table spot check.
    let expected: [(CareAction, f32, f32, u64); 4] = [
        (CareAction::Water, 15.0, 5.0, 60_000),
        (CareAction::Feed, 10.0, 10.0, 180_000),
        (CareAction::Sunlight, 12.0, 7.0, 120_000),
        (CareAction::Prune, 5.0, 15.0, 300_000),
    ];
    let mut table_ok = true;
    for &(action, health, points, cooldown) in &expected {
        let e = action.effect();
        if e.health != health || e.points != points || action.base_cooldown_ms() != cooldown {
            table_ok = false;
        }
    }
    results.push(TestResult {
        name: "care_effect_table".into(),
        passed: table_ok,
        detail: "all four actions match their published numbers".into(),
    });

    // Health clamps at the cap.
    let mut nearly_full = plant.clone();
    nearly_full.health = 99.0;
    let clamped = match apply_care(&nearly_full, &ledger, CareAction::Water, 0, false) {
        CareOutcome::Applied(a) => a.state.health == rules::MAX_HEALTH,
        CareOutcome::Rejected(_) => false,
    };
    results.push(TestResult {
        name: "care_health_clamped".into(),
        passed: clamped,
        detail: format!("99 + water caps at {:.0}", rules::MAX_HEALTH),
    });

    // Cooldown gates until the exact expiry instant.
    let mut gate_ok = false;
    if let CareOutcome::Applied(a) = apply_care(&plant, &ledger, CareAction::Water, 1_000, false) {
        let blocked = apply_care(&a.state, &a.cooldowns, CareAction::Water, 1_001, false)
            .rejection()
            == Some(RejectReason::OnCooldown {
                remaining_ms: CareAction::Water.base_cooldown_ms() - 1,
            });
        let released = apply_care(
            &a.state,
            &a.cooldowns,
            CareAction::Water,
            1_000 + CareAction::Water.base_cooldown_ms(),
            false,
        )
        .applied();
        let independent =
            apply_care(&a.state, &a.cooldowns, CareAction::Sunlight, 1_001, false).applied();
        gate_ok = blocked && released && independent;
    }
    results.push(TestResult {
        name: "care_cooldown_gate".into(),
        passed: gate_ok,
        detail: "blocked 1ms in, released at expiry, other actions free".into(),
    });

    // Revival flag doubles freshly stamped cooldowns.
    let doubled = match apply_care(&plant, &ledger, CareAction::Feed, 0, true) {
        CareOutcome::Applied(a) => {
            a.ready_again_at == CareAction::Feed.base_cooldown_ms() * rules::REVIVAL_COOLDOWN_MULTIPLIER
        }
        CareOutcome::Rejected(_) => false,
    };
    results.push(TestResult {
        name: "care_revived_doubling".into(),
        passed: doubled,
        detail: format!(
            "feed locks for {}ms after a revival",
            CareAction::Feed.base_cooldown_ms() * rules::REVIVAL_COOLDOWN_MULTIPLIER
        ),
    });

    // Dead plants reject everything.
    let mut dead = plant.clone();
    dead.health = 0.0;
    let dead_gated = CareAction::ALL
        .iter()
        .all(|&a| apply_care(&dead, &ledger, a, 0, false).rejection() == Some(RejectReason::Dead));
    results.push(TestResult {
        name: "care_dead_rejected".into(),
        passed: dead_gated,
        detail: "all four actions refused while dead".into(),
    });

    // Crossing a threshold reports the new stage.
    let mut near_sprout = plant.clone();
    near_sprout.care_points = 45.0;
    let grew = match apply_care(&near_sprout, &ledger, CareAction::Feed, 0, false) {
        CareOutcome::Applied(a) => a.grew_to == Some(GrowthStage::Sprout),
        CareOutcome::Rejected(_) => false,
    };
    results.push(TestResult {
        name: "care_growth_reported".into(),
        passed: grew,
        detail: "45 + 10 points crosses into Sprout and says so".into(),
    });

    results
}

// ── 5. Revival ──────────────────────────────────────────────────────────

fn validate_revival(_verbose: bool) -> Vec<TestResult> {
    println!("--- Revival ---");
    let mut results = Vec::new();

    let alive = PlantState::planted("Sprig");
    results.push(TestResult {
        name: "revival_rejected_alive".into(),
        passed: revive(&alive) == ReviveOutcome::RejectedAlive,
        detail: "living plants cannot be revived".into(),
    });

    let mut dead = PlantState::planted("Sprig");
    dead.health = 0.0;
    dead.care_points = 900.0;
    dead.stage = stage_for_points(dead.care_points);
    let kept_progress = match revive(&dead) {
        ReviveOutcome::Revived(back) => {
            back.health == rules::revival_health()
                && back.care_points == 900.0
                && back.stage == GrowthStage::Mature
                && !back.is_dead()
        }
        ReviveOutcome::RejectedAlive => false,
    };
    results.push(TestResult {
        name: "revival_keeps_progress".into(),
        passed: kept_progress,
        detail: format!(
            "back at {:.0} health with points and stage intact",
            rules::revival_health()
        ),
    });

    results
}

// ── 6. Condition Bands & Messages ───────────────────────────────────────

fn validate_condition(_verbose: bool) -> Vec<TestResult> {
    println!("--- Condition & Messages ---");
    let mut results = Vec::new();

    let bands = [
        (100.0, false, Condition::Healthy),
        (70.1, false, Condition::Healthy),
        (70.0, false, Condition::Thirsty),
        (40.1, false, Condition::Thirsty),
        (40.0, false, Condition::Weak),
        (10.1, false, Condition::Weak),
        (10.0, false, Condition::Dying),
        (0.5, false, Condition::Dying),
        (50.0, true, Condition::Dead),
    ];
    let mut edges_ok = true;
    for &(health, dead, expected) in &bands {
        if Condition::from_health(health, dead) != expected {
            edges_ok = false;
        }
    }
    results.push(TestResult {
        name: "condition_band_edges".into(),
        passed: edges_ok,
        detail: format!("{} edge cases classified, dead flag wins", bands.len()),
    });

    let pools_ok = Condition::ALL.iter().all(|&c| !message_pool(c).is_empty());
    results.push(TestResult {
        name: "condition_message_pools".into(),
        passed: pools_ok,
        detail: "every condition has at least one message".into(),
    });

    let mut rng = rand::thread_rng();
    let mut sampled_ok = true;
    for &condition in &Condition::ALL {
        for _ in 0..10 {
            if !message_pool(condition).contains(&status_message(condition, &mut rng)) {
                sampled_ok = false;
            }
        }
    }
    results.push(TestResult {
        name: "condition_messages_from_pool".into(),
        passed: sampled_ok,
        detail: "sampled messages always come from their pool".into(),
    });

    results
}

// ── 7. Snapshot Persistence ─────────────────────────────────────────────

fn validate_snapshots(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshot Persistence ---");
    let mut results = Vec::new();

    let mut plant = PlantState::planted("Sprig");
    plant.health = 47.5;
    plant.care_points = 260.0;
    plant.stage = stage_for_points(plant.care_points);
    let cooldowns = CooldownLedger::new().with_entry(CareAction::Prune, 500_000);
    let data = SaveData::new(plant, cooldowns, true);

    let mut buf = Vec::new();
    let wrote = write_snapshot(&mut buf, &data).is_ok();
    let reread = read_snapshot(buf.as_slice());
    results.push(TestResult {
        name: "snapshot_roundtrip".into(),
        passed: wrote && reread.as_ref().ok() == Some(&data),
        detail: format!("{} bytes, exact roundtrip", buf.len()),
    });

    let future = SaveData {
        version: data.version + 1,
        ..data.clone()
    };
    let mut future_buf = Vec::new();
    write_snapshot(&mut future_buf, &future).unwrap();
    let mismatch = matches!(
        read_snapshot(future_buf.as_slice()),
        Err(SnapshotError::VersionMismatch { .. })
    );
    results.push(TestResult {
        name: "snapshot_version_guard".into(),
        passed: mismatch,
        detail: format!("version {} refused by a version-{} reader", future.version, data.version),
    });

    let mut store = MemoryStore::new();
    let empty_ok = matches!(store.load(), Ok(None));
    store.save(&data).unwrap();
    let loaded_ok = matches!(store.load(), Ok(Some(d)) if d == data);
    results.push(TestResult {
        name: "snapshot_memory_store".into(),
        passed: empty_ok && loaded_ok,
        detail: "empty loads None, saved data loads back equal".into(),
    });

    store.set_raw(vec![0xFF; 10]);
    results.push(TestResult {
        name: "snapshot_corruption_detected".into(),
        passed: store.load().is_err(),
        detail: "garbage bytes surface as an error, not a panic".into(),
    });

    results
}

// ── 8. Engine Lifecycle ─────────────────────────────────────────────────

fn validate_engine_lifecycle(verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Lifecycle ---");
    let mut results = Vec::new();

    const TICK_MS: u64 = 100;
    let store = MemoryStore::new();
    let mut clock = ManualClock::new(1_000);
    let mut engine = PlantEngine::new()
        .with_store(store.clone())
        .with_tick_interval(TICK_MS);

    let restored = engine.restore(clock.now_ms());
    results.push(TestResult {
        name: "engine_fresh_start".into(),
        passed: !restored && !engine.is_initialized(),
        detail: "empty store starts at onboarding".into(),
    });

    let blank = engine.initialize("   ", clock.now_ms());
    results.push(TestResult {
        name: "engine_rejects_blank_name".into(),
        passed: blank.is_err() && !engine.is_initialized(),
        detail: "whitespace-only name refused".into(),
    });

    engine.initialize("Sprig", clock.now_ms()).unwrap();
    results.push(TestResult {
        name: "engine_adoption".into(),
        passed: engine.is_initialized() && engine.is_ticking() && !store.is_empty(),
        detail: format!(
            "'{}' adopted, schedule armed, snapshot saved",
            engine.state().name
        ),
    });

    clock.advance(TICK_MS - 1);
    let early = engine.poll_tick(clock.now_ms());
    clock.advance(1);
    let on_time = engine.poll_tick(clock.now_ms());
    results.push(TestResult {
        name: "engine_tick_schedule".into(),
        passed: !early
            && on_time
            && engine.state().health == rules::INITIAL_HEALTH - rules::DECAY_PER_TICK,
        detail: format!("one decay step at the deadline, health {:.1}", engine.state().health),
    });

    clock.advance(3_600_000);
    let after_gap = engine.poll_tick(clock.now_ms());
    let immediately_again = engine.poll_tick(clock.now_ms());
    results.push(TestResult {
        name: "engine_no_catchup".into(),
        passed: after_gap
            && !immediately_again
            && engine.state().health == rules::INITIAL_HEALTH - 2.0 * rules::DECAY_PER_TICK,
        detail: format!("hour-long gap cost one step, health {:.1}", engine.state().health),
    });

    let before = store.raw();
    let watered = engine.perform_action(CareAction::Water, clock.now_ms());
    results.push(TestResult {
        name: "engine_care_autosaves".into(),
        passed: watered.applied() && store.raw() != before,
        detail: "water applied and the snapshot rewritten".into(),
    });

    let mut died = false;
    for _ in 0..250 {
        clock.advance(TICK_MS);
        engine.poll_tick(clock.now_ms());
        if engine.is_dead() {
            died = true;
            break;
        }
    }
    let refused = engine.perform_action(CareAction::Feed, clock.now_ms());
    results.push(TestResult {
        name: "engine_death_stops_everything".into(),
        passed: died
            && !engine.is_ticking()
            && refused.rejection() == Some(RejectReason::Dead)
            && engine.condition() == Condition::Dead,
        detail: "withered plant stops decaying and rejects care".into(),
    });

    let brought_back = engine.revive(clock.now_ms());
    let fed = engine.perform_action(CareAction::Feed, clock.now_ms());
    let feed_remaining = engine.cooldown_remaining(CareAction::Feed, clock.now_ms());
    results.push(TestResult {
        name: "engine_revival".into(),
        passed: brought_back.applied()
            && engine.is_revived()
            && engine.is_ticking()
            && fed.applied()
            && feed_remaining
                == CareAction::Feed.base_cooldown_ms() * rules::REVIVAL_COOLDOWN_MULTIPLIER,
        detail: format!("revived and feeding again, cooldown {}ms", feed_remaining),
    });

    let mut resumed_engine = PlantEngine::new()
        .with_store(store.clone())
        .with_tick_interval(TICK_MS);
    let resumed = resumed_engine.restore(clock.now_ms());
    results.push(TestResult {
        name: "engine_snapshot_restart".into(),
        passed: resumed
            && resumed_engine.state() == engine.state()
            && resumed_engine.cooldowns() == engine.cooldowns()
            && resumed_engine.is_revived(),
        detail: "a second engine resumed bit-for-bit from autosave".into(),
    });

    engine.reset();
    let mut after_reset = PlantEngine::new().with_store(store.clone());
    let wiped = after_reset.restore(clock.now_ms());
    results.push(TestResult {
        name: "engine_reset_persists".into(),
        passed: wiped && !after_reset.is_initialized() && !engine.is_initialized(),
        detail: "reset wiped the plant and the stored snapshot".into(),
    });

    store.set_raw(vec![0x42; 24]);
    let mut recovering = PlantEngine::new().with_store(store.clone());
    let recovered = recovering.restore(clock.now_ms());
    results.push(TestResult {
        name: "engine_corrupt_snapshot_fallback".into(),
        passed: !recovered && !recovering.is_initialized(),
        detail: "unreadable snapshot discarded, back to onboarding".into(),
    });

    if verbose {
        let mut demo = PlantEngine::new();
        demo.initialize("Sprig", clock.now_ms()).unwrap();
        demo.perform_action(CareAction::Water, clock.now_ms());
        match serde_json::to_string_pretty(&demo.view(clock.now_ms())) {
            Ok(json) => println!("  Sample view:\n{}", json),
            Err(e) => println!("  view encode failed: {}", e),
        }
    }

    results
}
