//! The whole-simulation state record.
//!
//! A [`SimState`] is passed into a tick by value and a new one comes
//! out; nothing else holds references into it between ticks.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::InvariantViolation;
use crate::history::History;
use crate::id::{CoreId, TaskId, TickId};
use crate::memory::SharedMemory;
use crate::processor::{Core, CoreStatus};
use crate::task::{Task, TaskSpec, TaskState};

/// Every entity of one simulation at the end of a tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimState {
    /// Last executed tick (`TickId(0)` before the first step).
    pub tick: TickId,
    /// Cores in ascending id order; `cores[i].id == CoreId(i)`.
    pub cores: Vec<Core>,
    /// Tasks keyed by id, in creation order.
    pub tasks: IndexMap<TaskId, Task>,
    /// Shared access-counter memory.
    pub memory: SharedMemory,
    /// Per-tick core assignments.
    pub history: History,
    /// Round-robin fairness pointer into the current tick's waiting list.
    pub rr_pointer: usize,
}

impl SimState {
    /// Fresh state at tick 0: idle cores, waiting tasks, empty memory.
    ///
    /// Does not validate the workload; see `mcsim_engine::initialize`.
    pub fn new(num_cores: u32, specs: &[TaskSpec]) -> Self {
        let cores = (0..num_cores).map(|i| Core::new(CoreId(i))).collect();
        let tasks = specs
            .iter()
            .zip(0u32..)
            .map(|(spec, i)| (TaskId(i), Task::from_spec(TaskId(i), spec)))
            .collect();
        Self {
            tick: TickId(0),
            cores,
            tasks,
            memory: SharedMemory::new(),
            history: History::new(),
            rr_pointer: 0,
        }
    }

    /// Look up a task.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Look up a core.
    pub fn core(&self, id: CoreId) -> Option<&Core> {
        self.cores.get(id.0 as usize)
    }

    /// Whether every task has finished (vacuously true with no tasks).
    pub fn all_finished(&self) -> bool {
        self.tasks.values().all(Task::is_finished)
    }

    /// Number of finished tasks.
    pub fn finished_count(&self) -> usize {
        self.tasks.values().filter(|t| t.is_finished()).count()
    }

    /// Ids of tasks currently in the `Waiting` state, in creation order.
    pub fn waiting_task_ids(&self) -> Vec<TaskId> {
        self.tasks
            .values()
            .filter(|t| t.state == TaskState::Waiting)
            .map(|t| t.id)
            .collect()
    }

    /// Verify the structural invariants the engine maintains.
    ///
    /// - `cores[i]` has id `CoreId(i)`;
    /// - every held task exists, is `Running`, and is held by one core;
    /// - a core is `Running` exactly when it holds a task;
    /// - every `Running` task is held by some core;
    /// - every task conserves `progress + duration_remaining`;
    /// - every unfinished task has work left;
    /// - the history ends at or before the current tick.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(last) = self.history.last().map(|e| e.tick) {
            if last > self.tick {
                return Err(InvariantViolation::HistoryAhead {
                    tick: self.tick,
                    last,
                });
            }
        }
        let mut holders: IndexMap<TaskId, CoreId> = IndexMap::with_capacity(self.cores.len());
        for (index, core) in self.cores.iter().enumerate() {
            if core.id.0 as usize != index {
                return Err(InvariantViolation::CoreOutOfOrder {
                    index,
                    core: core.id,
                });
            }
            match (core.current_task, core.status) {
                (Some(id), CoreStatus::Running) => {
                    let task = self.tasks.get(&id).ok_or(InvariantViolation::UnknownTask {
                        core: core.id,
                        task: id,
                    })?;
                    match task.state {
                        TaskState::Running => {}
                        TaskState::Finished => {
                            return Err(InvariantViolation::FinishedTaskOnCore {
                                core: core.id,
                                task: id,
                            })
                        }
                        TaskState::Waiting | TaskState::Blocked => {
                            return Err(InvariantViolation::OrphanedTask { task: id })
                        }
                    }
                    match holders.entry(id) {
                        Entry::Occupied(e) => {
                            return Err(InvariantViolation::TaskAssignedTwice {
                                task: id,
                                first: *e.get(),
                                second: core.id,
                            })
                        }
                        Entry::Vacant(e) => {
                            e.insert(core.id);
                        }
                    }
                }
                (None, CoreStatus::Idle) => {}
                _ => return Err(InvariantViolation::StatusMismatch { core: core.id }),
            }
        }
        for task in self.tasks.values() {
            if !task.is_conserved() {
                return Err(InvariantViolation::ConservationBroken { task: task.id });
            }
            if !task.is_finished() && task.duration_remaining == 0 {
                return Err(InvariantViolation::NoWorkRemaining { task: task.id });
            }
            if task.state == TaskState::Running && !holders.contains_key(&task.id) {
                return Err(InvariantViolation::OrphanedTask { task: task.id });
            }
        }
        Ok(())
    }
}
