//! Strongly-typed identifiers and the [`MemoryPattern`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a task within a simulation.
///
/// Tasks are numbered sequentially at initialization: `TaskId(n)` is the
/// n-th entry of the workload. IDs are never reused within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaskId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a processing core.
///
/// Cores are numbered `0..num_cores` and walked in ascending order by
/// both the executor and the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoreId(pub u32);

impl fmt::Display for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CoreId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// `TickId(0)` is the state produced by initialization; the first call
/// to `step()` executes tick 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A location in shared memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub u32);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u32> for Address {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// The ordered addresses a task touches on every tick it executes.
///
/// Uses `SmallVec<[Address; 4]>` to keep the common short patterns
/// inline; longer patterns spill to the heap transparently.
pub type MemoryPattern = SmallVec<[Address; 4]>;
