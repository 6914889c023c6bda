//! Leafling Core - Plant Companion Engine
//!
//! A single virtual plant that decays while you are away, grows through
//! care, dies when neglected, and survives restarts via binary snapshots.
//!
//! # Architecture
//!
//! Pure state transitions live in `leafling-logic`; this crate wraps them
//! in an engine that owns the state and adds what hosting needs:
//! - **Engine**: the only writer; every mutation takes the caller's clock
//! - **Ticker**: decay scheduling with no catch-up after long gaps
//! - **Persistence**: versioned bincode snapshots, best-effort autosave
//! - **View**: a render-ready projection for frontends
//!
//! # Example
//!
//! ```rust,no_run
//! use leafling_core::prelude::*;
//!
//! let clock = SystemClock;
//! let mut engine = PlantEngine::new().with_store(FileStore::new("plant.save"));
//!
//! // Pick up where the last session left off, or start at onboarding.
//! if !engine.restore(clock.now_ms()) {
//!     engine.initialize("Fern", clock.now_ms()).unwrap();
//! }
//!
//! // Host loop
//! loop {
//!     let now = clock.now_ms();
//!     engine.poll_tick(now);
//!     let view = engine.view(now);
//!     // render `view`, feed button presses to engine.perform_action(...)
//! }
//! ```

pub mod clock;
pub mod engine;
pub mod messages;
pub mod persistence;
pub mod ticker;
pub mod view;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::engine::PlantEngine;
    pub use crate::persistence::{FileStore, MemoryStore, SnapshotStore};
    pub use crate::view::PlantView;
    pub use leafling_logic::care::{CareAction, CareOutcome, RejectReason};
    pub use leafling_logic::condition::Condition;
    pub use leafling_logic::growth::GrowthStage;
    pub use leafling_logic::plant::{NameError, PlantState, ReviveOutcome};
}
