/*! Jobs and the EDF-VD priority order

A [Job] is one concrete execution of a [Task][crate::task::Task]. While
the system runs in LO mode, jobs of HI tasks are scheduled by a tightened
*virtual* deadline; the unscaled deadline is kept alongside so it can be
restored when the system switches to HI mode.
*/

use std::cmp::Ordering;

use derive_more::Display;

use crate::criticality::Criticality;
use crate::task::TaskId;
use crate::time::{Duration, Instant, Service};

/// Identifies the `index`-th job (counting from 1) of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "[Task{} Job{}]", task, index)]
pub struct JobId {
    pub task: TaskId,
    pub index: u64,
}

/// A released job.
///
/// Jobs are ordered by *priority*: if `a > b`, then `a` is dispatched
/// before `b`. This matches the max-heap semantics of
/// [BinaryHeap][std::collections::BinaryHeap], so the ready queue
/// surfaces the highest-priority job first.
#[derive(Debug, Clone)]
pub struct Job {
    id: JobId,
    criticality: Criticality,
    release: Instant,
    scheduling_deadline: Instant,
    original_deadline: Instant,
    executed: Service,
    execution_time: f64,
    wcet_lo: Service,
    virtual_deadline: bool,
}

impl Job {
    /// Create a job released at `release`.
    ///
    /// If `virtual_deadline` is given, it is the job's tightened
    /// *relative* deadline and becomes the scheduling deadline;
    /// otherwise the job is scheduled by its real deadline. The
    /// `execution_time` is the amount of service after which the job
    /// completes, and `wcet_lo` is the LO-mode budget of its task.
    ///
    /// Absolute deadlines that do not fit into [Instant] saturate at
    /// `Instant::MAX`.
    pub fn new(
        id: JobId,
        criticality: Criticality,
        release: Instant,
        deadline: Duration,
        virtual_deadline: Option<Duration>,
        execution_time: f64,
        wcet_lo: Service,
    ) -> Job {
        let original_deadline = release.saturating_add(deadline);
        let scheduling_deadline = match virtual_deadline {
            Some(vd) => {
                debug_assert!(vd <= deadline, "virtual deadline exceeds the real one");
                release.saturating_add(vd)
            }
            None => original_deadline,
        };
        Job {
            id,
            criticality,
            release,
            scheduling_deadline,
            original_deadline,
            executed: 0,
            execution_time,
            wcet_lo,
            virtual_deadline: virtual_deadline.is_some(),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn task(&self) -> TaskId {
        self.id.task
    }

    pub fn criticality(&self) -> Criticality {
        self.criticality
    }

    pub fn release_time(&self) -> Instant {
        self.release
    }

    /// The absolute deadline by which the scheduler orders this job.
    pub fn scheduling_deadline(&self) -> Instant {
        self.scheduling_deadline
    }

    /// The absolute, unscaled deadline.
    pub fn original_deadline(&self) -> Instant {
        self.original_deadline
    }

    pub fn uses_virtual_deadline(&self) -> bool {
        self.virtual_deadline
    }

    /// Service received so far.
    pub fn executed(&self) -> Service {
        self.executed
    }

    /// Service required to complete.
    pub fn execution_time(&self) -> f64 {
        self.execution_time
    }

    /// The LO-mode WCET of the job's task.
    pub fn wcet_lo(&self) -> Service {
        self.wcet_lo
    }

    pub fn is_complete(&self) -> bool {
        self.executed as f64 >= self.execution_time
    }

    /// Has the job consumed at least its task's LO-mode budget?
    pub fn exceeds_lo_budget(&self) -> bool {
        self.executed >= self.wcet_lo
    }

    /// A waiting job has missed its deadline once the clock has moved
    /// past its scheduling deadline.
    pub fn has_missed_deadline(&self, now: Instant) -> bool {
        self.scheduling_deadline < now
    }

    pub(crate) fn execute_for_one_tick(&mut self) {
        self.executed += 1;
    }

    /// Drop the virtual deadline and go back to the real one.
    pub(crate) fn restore_deadline(&mut self) {
        self.scheduling_deadline = self.original_deadline;
        self.virtual_deadline = false;
    }
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        // earlier deadline first
        other
            .scheduling_deadline
            .cmp(&self.scheduling_deadline)
            // on a tie, prefer jobs scheduled by a virtual deadline
            .then(self.virtual_deadline.cmp(&other.virtual_deadline))
            .then(self.criticality.cmp(&other.criticality))
            .then(other.original_deadline.cmp(&self.original_deadline))
            .then(other.release.cmp(&self.release))
            .then(other.id.task.cmp(&self.id.task))
            .then(other.id.index.cmp(&self.id.index))
    }
}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Job {}

#[cfg(test)]
mod tests;
