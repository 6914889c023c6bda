//! Pure plant-care rules for Leafling.
//!
//! This crate contains every rule of the simulation that is independent of
//! clocks, storage, and rendering: how health decays, what each care action
//! does, when cooldowns gate, how growth stages derive from care points, and
//! what death and revival mean. Functions take plain data and return new
//! values, making them unit-testable and portable across hosts.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`care`] | Care actions, effect tables, and action application |
//! | [`condition`] | Health bands behind the status line |
//! | [`cooldown`] | Per-action "available again at" ledger |
//! | [`growth`] | Growth stages and care-point thresholds |
//! | [`plant`] | Plant state, onboarding validation, decay, revival |
//! | [`rules`] | Tuning constants shared by everything above |

pub mod care;
pub mod condition;
pub mod cooldown;
pub mod growth;
pub mod plant;
pub mod rules;
