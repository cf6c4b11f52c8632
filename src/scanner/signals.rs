//! Shared signal store populated during a repository scan.
//!
//! The store is a monitor object: every map sits behind its own
//! `RwLock`, all mutation goes through the accessors below, and bulk
//! readers receive copies so no lock is held while a caller iterates.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Signal key holding the number of distinct cloud regions seen so far.
pub const REGION_COUNT_SIGNAL: &str = "region_count";

/// Typed signals aggregated while scanning a repository.
///
/// `files` tracks every path visited, including ignored ones; `content`
/// only holds files that survived the ignore/binary/size filters, so
/// `files` is always a superset of `content`'s key set.
#[derive(Debug, Default)]
pub struct SignalStore {
    files: RwLock<HashSet<String>>,
    content: RwLock<HashMap<String, String>>,
    bools: RwLock<HashMap<String, bool>>,
    strings: RwLock<HashMap<String, String>>,
    ints: RwLock<HashMap<String, i64>>,
    regions: RwLock<HashSet<String>>,
}

// A poisoned lock only means another worker panicked mid-call; the maps
// themselves are still coherent, so recover the guard instead of
// propagating the panic to every other thread.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl SignalStore {
    /// Create an empty store. All maps start initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a file exists at the given relative path.
    pub fn record_file(&self, path: &str) {
        write(&self.files).insert(path.to_string());
    }

    /// Whether the given relative path was seen during the scan.
    pub fn has_file(&self, path: &str) -> bool {
        read(&self.files).contains(path)
    }

    /// Copy of the set of visited paths.
    pub fn files(&self) -> HashSet<String> {
        read(&self.files).clone()
    }

    /// Number of paths visited.
    pub fn file_count(&self) -> usize {
        read(&self.files).len()
    }

    /// Store the text content captured for a file.
    pub fn set_content(&self, path: &str, content: String) {
        write(&self.content).insert(path.to_string(), content);
    }

    /// Content captured for a single file, if any.
    pub fn content(&self, path: &str) -> Option<String> {
        read(&self.content).get(path).cloned()
    }

    /// Copy of the full path-to-content map.
    pub fn content_map(&self) -> HashMap<String, String> {
        read(&self.content).clone()
    }

    /// Number of files whose content was captured.
    pub fn content_count(&self) -> usize {
        read(&self.content).len()
    }

    /// Set a boolean signal. A signal that is already `true` stays
    /// `true`: detectors may run in any order across files and must
    /// never downgrade evidence another file already produced.
    pub fn set_bool(&self, key: &str, value: bool) {
        let mut bools = write(&self.bools);
        if let Some(true) = bools.get(key) {
            return;
        }
        bools.insert(key.to_string(), value);
    }

    /// Boolean signal value, if the key was ever set.
    pub fn bool_signal(&self, key: &str) -> Option<bool> {
        read(&self.bools).get(key).copied()
    }

    /// Boolean signal value, treating an unset key as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.bool_signal(key).unwrap_or(false)
    }

    /// Copy of all boolean signals.
    pub fn bool_signals(&self) -> HashMap<String, bool> {
        read(&self.bools).clone()
    }

    /// Set a string signal.
    pub fn set_string(&self, key: &str, value: &str) {
        write(&self.strings).insert(key.to_string(), value.to_string());
    }

    /// String signal value, if the key was ever set.
    pub fn string_signal(&self, key: &str) -> Option<String> {
        read(&self.strings).get(key).cloned()
    }

    /// String signal value, treating an unset key as empty.
    pub fn get_string(&self, key: &str) -> String {
        self.string_signal(key).unwrap_or_default()
    }

    /// Copy of all string signals.
    pub fn string_signals(&self) -> HashMap<String, String> {
        read(&self.strings).clone()
    }

    /// Set an integer signal.
    pub fn set_int(&self, key: &str, value: i64) {
        write(&self.ints).insert(key.to_string(), value);
    }

    /// Integer signal value, if the key was ever set.
    pub fn int_signal(&self, key: &str) -> Option<i64> {
        read(&self.ints).get(key).copied()
    }

    /// Integer signal value, treating an unset key as zero.
    pub fn get_int(&self, key: &str) -> i64 {
        self.int_signal(key).unwrap_or(0)
    }

    /// Copy of all integer signals.
    pub fn int_signals(&self) -> HashMap<String, i64> {
        read(&self.ints).clone()
    }

    /// Record a cloud region observed in some file and refresh the
    /// `region_count` signal. The region set is a running union across
    /// the whole tree: re-recording a known region changes nothing, and
    /// the count only ever grows.
    ///
    /// Lock order: `regions` before `ints`, held together so the count
    /// written always matches the set cardinality that produced it. No
    /// other accessor takes both locks.
    pub fn record_region(&self, region: &str) {
        let mut regions = write(&self.regions);
        regions.insert(region.to_string());
        let count = regions.len() as i64;
        write(&self.ints).insert(REGION_COUNT_SIGNAL.to_string(), count);
    }

    /// Number of distinct regions recorded so far.
    pub fn region_count(&self) -> usize {
        read(&self.regions).len()
    }

    /// Copy of the recorded region names.
    pub fn regions(&self) -> HashSet<String> {
        read(&self.regions).clone()
    }
}
