/*! Mixed-criticality task model

A [Task] is the template from which the scheduler derives jobs. Each
task carries one WCET estimate per criticality level up to its own
level: a LO task needs at least the LO estimate, a HI task needs both
the LO and the HI estimate. Per-level utilizations are derived once at
construction and never change afterwards.
*/

use std::fmt;

use derive_more::Display;
use itertools::Itertools;

use crate::criticality::Criticality;
use crate::error::ConfigurationError;
use crate::time::{Duration, Instant, Service};

/// Identifier of a task, unique within a task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct TaskId(pub u32);

/// A periodic or one-shot (sporadic) real-time task.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    criticality: Criticality,
    periodic: bool,
    release: Instant,
    period: Duration,
    deadline: Duration,
    wcet: Vec<Service>,
    utilization: Vec<f64>,
    // owned by the system and the scheduler
    jobs_released: u64,
    virtual_deadline: Option<f64>,
}

impl Task {
    /// Construct a new task and derive its per-level utilizations.
    ///
    /// A periodic task releases a job at `release` and then every
    /// `period` time units; a non-periodic task releases exactly one
    /// job, at `release`, and its `period` is ignored.
    ///
    /// Fails if the deadline is zero, if a periodic task has a zero
    /// period, or if `wcet` holds fewer estimates than the task's
    /// criticality level requires.
    pub fn new(
        id: u32,
        criticality: Criticality,
        periodic: bool,
        release: Instant,
        period: Duration,
        deadline: Duration,
        wcet: Vec<Service>,
    ) -> Result<Task, ConfigurationError> {
        let id = TaskId(id);
        if deadline == 0 {
            return Err(ConfigurationError::NonPositiveDeadline { task: id });
        }
        if periodic && period == 0 {
            return Err(ConfigurationError::ZeroPeriod { task: id });
        }
        if wcet.len() <= criticality.index() {
            return Err(ConfigurationError::MissingWcet {
                task: id,
                level: criticality,
                provided: wcet.len(),
            });
        }
        let utilization = wcet.iter().map(|c| *c as f64 / deadline as f64).collect();
        Ok(Task {
            id,
            criticality,
            periodic,
            release,
            period,
            deadline,
            wcet,
            utilization,
            jobs_released: 0,
            virtual_deadline: None,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn criticality(&self) -> Criticality {
        self.criticality
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// The time of the first (or only) job release.
    pub fn release_time(&self) -> Instant {
        self.release
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The relative deadline.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// The WCET estimate at the given level.
    ///
    /// # Panics
    ///
    /// If the task carries no estimate for `level`; construction
    /// guarantees estimates for every level up to the task's own.
    pub fn wcet(&self, level: Criticality) -> Service {
        self.wcet[level.index()]
    }

    pub fn wcets(&self) -> &[Service] {
        &self.wcet
    }

    /// The utilization `wcet / deadline` at the given level.
    pub fn utilization(&self, level: Criticality) -> f64 {
        self.utilization[level.index()]
    }

    pub fn utilizations(&self) -> &[f64] {
        &self.utilization
    }

    /// Number of jobs generated from this task so far.
    pub fn jobs_released(&self) -> u64 {
        self.jobs_released
    }

    /// The scaled relative deadline used while the system runs in LO
    /// mode. Only HI tasks of a [System][crate::system::System] have one.
    pub fn virtual_deadline(&self) -> Option<f64> {
        self.virtual_deadline
    }

    /// Does this task release a job at time `now`?
    pub fn releases_at(&self, now: Instant) -> bool {
        if self.periodic {
            now >= self.release && (now - self.release) % self.period == 0
        } else {
            now == self.release
        }
    }

    pub(crate) fn set_virtual_deadline(&mut self, vd: f64) {
        self.virtual_deadline = Some(vd);
    }

    /// Count one more job and return its sequential index (starting at 1).
    pub(crate) fn next_job_index(&mut self) -> u64 {
        self.jobs_released += 1;
        self.jobs_released
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task {} (Criticality Level: {})", self.id, self.criticality)?;
        writeln!(f, "  Period: {}, Deadline: {}", self.period, self.deadline)?;
        writeln!(f, "  WCET: {}", self.wcet.iter().join(" "))?;
        write!(
            f,
            "  Utilization: {}",
            self.utilization.iter().map(|u| format!("{:.4}", u)).join(" ")
        )
    }
}
