//! Save/Load functionality for persisting plant state
//!
//! Uses bincode for compact binary snapshots. A snapshot captures the full
//! companion: plant state, cooldown ledger, and the revival flag. Saving is
//! best-effort from the engine's point of view; a failed write must never
//! block a care action.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use leafling_logic::cooldown::CooldownLedger;
use leafling_logic::plant::PlantState;

/// Version number for snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the whole companion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Snapshot format version
    pub version: u32,
    /// The plant itself (sentinel included; reset is persisted too)
    pub plant: PlantState,
    /// Absolute ready-again deadlines per action
    pub cooldowns: CooldownLedger,
    /// Whether cooldowns run doubled since the last revival
    pub revived: bool,
}

impl SaveData {
    /// Stamp a snapshot with the current format version.
    pub fn new(plant: PlantState, cooldowns: CooldownLedger, revived: bool) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            plant,
            cooldowns,
            revived,
        }
    }
}

/// Write a snapshot to a writer
pub fn write_snapshot<W: Write>(writer: W, data: &SaveData) -> Result<(), SnapshotError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

/// Read a snapshot from a reader, rejecting unknown format versions
pub fn read_snapshot<R: Read>(reader: R) -> Result<SaveData, SnapshotError> {
    let data: SaveData = bincode::deserialize_from(reader)?;

    if data.version != SAVE_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }

    Ok(data)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Codec(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Codec(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Codec(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Where snapshots live. The engine autosaves through this after every
/// successful transition and loads through it once at startup.
pub trait SnapshotStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SnapshotError>;
    /// `Ok(None)` means no snapshot exists yet; that is not an error.
    fn load(&mut self) -> Result<Option<SaveData>, SnapshotError>;
}

/// Snapshot storage in a single file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SnapshotError> {
        let file = File::create(&self.path)?;
        write_snapshot(BufWriter::new(file), data)
    }

    fn load(&mut self) -> Result<Option<SaveData>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        read_snapshot(BufReader::new(file)).map(Some)
    }
}

/// In-memory snapshot storage. Cloning shares the slot, so tests can hold
/// one handle while the engine owns another and watch autosaves land.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }

    /// Raw snapshot bytes, if any.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot.borrow().clone()
    }

    /// Replace the stored bytes wholesale. Tests use this to inject
    /// corrupt snapshots.
    pub fn set_raw(&self, bytes: Vec<u8>) {
        *self.slot.borrow_mut() = Some(bytes);
    }

    pub fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SnapshotError> {
        let mut buf = Vec::new();
        write_snapshot(&mut buf, data)?;
        *self.slot.borrow_mut() = Some(buf);
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SaveData>, SnapshotError> {
        match self.slot.borrow().as_ref() {
            Some(bytes) => read_snapshot(bytes.as_slice()).map(Some),
            None => Ok(None),
        }
    }
}
