//! Shared memory and private per-core caches.
//!
//! Shared memory is not a byte store: each address holds an access
//! counter. An access reads the counter, compares it with the accessing
//! core's cached copy (hit if equal, otherwise miss and refresh), then
//! increments the counter for the next accessor. Because every access
//! bumps the counter, a core re-reading an address always sees a value
//! newer than the one it cached.

use indexmap::IndexMap;

use crate::id::Address;

/// Result of one shared-memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The core's cached value matched shared memory.
    Hit,
    /// The cached value was absent or stale and has been refreshed.
    Miss,
}

/// A core's private cache: address to last observed counter value.
///
/// Iteration order is first-touch order, which keeps projections of the
/// cache deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreCache {
    lines: IndexMap<Address, u64>,
}

impl CoreCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `addr`, if any.
    pub fn get(&self, addr: Address) -> Option<u64> {
        self.lines.get(&addr).copied()
    }

    /// Number of cached addresses.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate `(address, value)` pairs in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = (Address, u64)> + '_ {
        self.lines.iter().map(|(&a, &v)| (a, v))
    }

    fn store(&mut self, addr: Address, value: u64) {
        self.lines.insert(addr, value);
    }
}

/// Global address-to-counter map shared by every core.
///
/// Unset addresses read as zero. Created empty at reset and persists
/// across ticks until the next reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedMemory {
    cells: IndexMap<Address, u64>,
}

impl SharedMemory {
    /// Empty shared memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter at `addr` (zero if never accessed).
    pub fn read(&self, addr: Address) -> u64 {
        self.cells.get(&addr).copied().unwrap_or(0)
    }

    /// Number of addresses ever accessed.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no address has been accessed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate `(address, counter)` pairs in first-access order.
    pub fn iter(&self) -> impl Iterator<Item = (Address, u64)> + '_ {
        self.cells.iter().map(|(&a, &v)| (a, v))
    }

    /// Perform one access from a core owning `cache`.
    ///
    /// Compares the shared counter with the cached copy, refreshes the
    /// cache on a miss, and increments the shared counter.
    pub fn access(&mut self, cache: &mut CoreCache, addr: Address) -> AccessOutcome {
        let value = self.read(addr);
        let outcome = if cache.get(addr) == Some(value) {
            AccessOutcome::Hit
        } else {
            cache.store(addr, value);
            AccessOutcome::Miss
        };
        self.cells.insert(addr, value + 1);
        outcome
    }
}
