//! Policy dispatch: matching waiting tasks to idle cores.
//!
//! [`schedule`] builds this tick's waiting list, orders it by policy,
//! then walks cores in id order giving each idle core at most one task.
//!
//! The round-robin pointer indexes into the waiting list *as built this
//! tick*. Membership changes between ticks (tasks finish, get preempted,
//! get assigned), so the same pointer value can name a different task
//! from one tick to the next.

use std::cmp::Reverse;
use std::collections::HashSet;

use log::debug;
use mcsim_core::{CoreId, SimState, TaskId, TaskState};

use crate::config::Policy;

/// Assignments made during one scheduler pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// `(core, task)` pairs in core-id order.
    pub assignments: Vec<(CoreId, TaskId)>,
}

/// Build the waiting list for this tick, ordered for `policy`.
///
/// FCFS sorts by ascending id, priority by descending priority with a
/// stable sort (ties keep creation order), round-robin keeps creation
/// order.
pub fn waiting_order(state: &SimState, policy: Policy) -> Vec<TaskId> {
    let mut waiting: Vec<(TaskId, i32)> = state
        .tasks
        .values()
        .filter(|t| t.state == TaskState::Waiting)
        .map(|t| (t.id, t.priority))
        .collect();
    match policy {
        Policy::Fcfs => waiting.sort_by_key(|&(id, _)| id),
        Policy::Priority => waiting.sort_by_key(|&(_, priority)| Reverse(priority)),
        Policy::RoundRobin => {}
    }
    waiting.into_iter().map(|(id, _)| id).collect()
}

/// Scan forward from `pointer`, wrapping, for the first candidate not yet
/// assigned this tick. On success the pointer moves just past it.
fn next_round_robin(
    waiting: &[TaskId],
    assigned: &HashSet<TaskId>,
    pointer: &mut usize,
) -> Option<TaskId> {
    let len = waiting.len();
    let idx = (0..len)
        .map(|tries| (*pointer + tries) % len)
        .find(|&idx| !assigned.contains(&waiting[idx]))?;
    *pointer = (idx + 1) % len;
    Some(waiting[idx])
}

/// Assign waiting tasks to idle cores.
///
/// Cores already running keep their task, and that task is marked as
/// taken before the walk. Cores that are not idle, or for which no
/// candidate remains, are left unchanged. The fairness pointer is only
/// read and advanced under round-robin.
pub fn schedule(mut state: SimState, policy: Policy) -> (SimState, ScheduleReport) {
    let waiting = waiting_order(&state, policy);
    let mut report = ScheduleReport::default();

    let mut assigned: HashSet<TaskId> = state.cores.iter().filter_map(|c| c.current_task).collect();
    let mut pointer = state.rr_pointer;

    for core in state.cores.iter_mut() {
        if !core.is_idle() || waiting.is_empty() {
            continue;
        }
        let chosen = match policy {
            Policy::RoundRobin => next_round_robin(&waiting, &assigned, &mut pointer),
            Policy::Fcfs | Policy::Priority => {
                waiting.iter().copied().find(|id| !assigned.contains(id))
            }
        };
        let Some(task_id) = chosen else {
            continue;
        };
        assigned.insert(task_id);
        core.assign(task_id);
        state
            .tasks
            .get_mut(&task_id)
            .expect("waiting list built from state")
            .state = TaskState::Running;
        report.assignments.push((core.id, task_id));
        debug!("core {} assigned task {task_id} ({policy})", core.id);
    }

    if policy == Policy::RoundRobin {
        state.rr_pointer = pointer;
    }
    (state, report)
}
