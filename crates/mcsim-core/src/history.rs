//! Append-only record of which task each core held on each tick.
//!
//! The engine never consults the history; it exists so that callers can
//! rebuild a timeline (for example a Gantt chart) after the fact.

use smallvec::SmallVec;

use crate::id::{CoreId, TaskId, TickId};
use crate::processor::Core;

/// The task a single core held at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreAssignment {
    /// The core.
    pub core: CoreId,
    /// Its task, or `None` if idle.
    pub task: Option<TaskId>,
}

/// Assignments of every core at the end of one tick, in core-id order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The tick this entry records.
    pub tick: TickId,
    /// One assignment per core.
    pub assignments: SmallVec<[CoreAssignment; 8]>,
}

impl HistoryEntry {
    /// Capture the current assignment of every core.
    pub fn capture(tick: TickId, cores: &[Core]) -> Self {
        Self {
            tick,
            assignments: cores
                .iter()
                .map(|c| CoreAssignment {
                    core: c.id,
                    task: c.current_task,
                })
                .collect(),
        }
    }

    /// Task held by `core` in this entry.
    pub fn task_on(&self, core: CoreId) -> Option<TaskId> {
        self.assignments
            .iter()
            .find(|a| a.core == core)
            .and_then(|a| a.task)
    }
}

/// A maximal run of consecutive ticks during which one core held one task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GanttSegment {
    /// The task held.
    pub task: TaskId,
    /// First tick of the run.
    pub start: TickId,
    /// Last tick of the run (inclusive).
    pub end: TickId,
}

impl GanttSegment {
    /// Number of ticks covered.
    pub fn len(&self) -> u64 {
        self.end.0 - self.start.0 + 1
    }

    /// Always false; a segment covers at least one tick.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Ordered sequence of [`HistoryEntry`], one per executed tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the entry for the tick just executed.
    ///
    /// # Panics
    ///
    /// Panics if `entry.tick` does not follow the last recorded tick.
    pub fn record(&mut self, entry: HistoryEntry) {
        if let Some(last) = self.entries.last() {
            assert!(
                entry.tick > last.tick,
                "history entry for tick {} appended after tick {}",
                entry.tick,
                last.tick
            );
        }
        self.entries.push(entry);
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entry recorded for `tick`, if any.
    pub fn at(&self, tick: TickId) -> Option<&HistoryEntry> {
        self.entries
            .binary_search_by_key(&tick, |e| e.tick)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// The task `core` held on every recorded tick, oldest first.
    pub fn lane(&self, core: CoreId) -> Vec<Option<TaskId>> {
        self.entries.iter().map(|e| e.task_on(core)).collect()
    }

    /// Run-length encode the lane of `core` into Gantt segments.
    ///
    /// Idle ticks produce no segment. A task preempted and immediately
    /// reassigned to the same core forms one continuous segment.
    pub fn segments(&self, core: CoreId) -> Vec<GanttSegment> {
        let mut out: Vec<GanttSegment> = Vec::new();
        for entry in &self.entries {
            let Some(task) = entry.task_on(core) else {
                continue;
            };
            match out.last_mut() {
                Some(seg) if seg.task == task && seg.end.next() == entry.tick => {
                    seg.end = entry.tick;
                }
                _ => out.push(GanttSegment {
                    task,
                    start: entry.tick,
                    end: entry.tick,
                }),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tick: u64, tasks: &[Option<u32>]) -> HistoryEntry {
        HistoryEntry {
            tick: TickId(tick),
            assignments: tasks
                .iter()
                .enumerate()
                .map(|(i, t)| CoreAssignment {
                    core: CoreId(i as u32),
                    task: t.map(TaskId),
                })
                .collect(),
        }
    }

    #[test]
    fn capture_reads_every_core() {
        let mut cores = vec![Core::new(CoreId(0)), Core::new(CoreId(1))];
        cores[1].assign(TaskId(5));
        let e = HistoryEntry::capture(TickId(3), &cores);
        assert_eq!(e.tick, TickId(3));
        assert_eq!(e.task_on(CoreId(0)), None);
        assert_eq!(e.task_on(CoreId(1)), Some(TaskId(5)));
    }

    #[test]
    fn lane_and_lookup() {
        let mut h = History::new();
        h.record(entry(1, &[Some(0), None]));
        h.record(entry(2, &[Some(0), Some(1)]));
        h.record(entry(3, &[None, Some(1)]));
        assert_eq!(h.len(), 3);
        assert_eq!(h.lane(CoreId(0)), vec![Some(TaskId(0)), Some(TaskId(0)), None]);
        assert_eq!(h.at(TickId(2)).map(|e| e.task_on(CoreId(1))), Some(Some(TaskId(1))));
        assert!(h.at(TickId(9)).is_none());
    }

    #[test]
    fn segments_merge_consecutive_ticks() {
        let mut h = History::new();
        h.record(entry(1, &[Some(0)]));
        h.record(entry(2, &[Some(0)]));
        h.record(entry(3, &[Some(1)]));
        h.record(entry(4, &[None]));
        h.record(entry(5, &[Some(1)]));
        let segs = h.segments(CoreId(0));
        assert_eq!(
            segs,
            vec![
                GanttSegment { task: TaskId(0), start: TickId(1), end: TickId(2) },
                GanttSegment { task: TaskId(1), start: TickId(3), end: TickId(3) },
                GanttSegment { task: TaskId(1), start: TickId(5), end: TickId(5) },
            ]
        );
        assert_eq!(segs[0].len(), 2);
    }

    #[test]
    #[should_panic(expected = "appended after")]
    fn out_of_order_record_panics() {
        let mut h = History::new();
        h.record(entry(2, &[None]));
        h.record(entry(2, &[None]));
    }
}
