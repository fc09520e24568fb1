use thiserror::Error;

use crate::criticality::Criticality;
use crate::task::TaskId;

/// Error type returned when a task or task set is malformed.
///
/// These are the only fatal conditions in the crate: they are raised at
/// construction time and never in the middle of a simulation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The numeric criticality level is neither 1 (LO) nor 2 (HI).
    #[error("invalid criticality level {0} (expected 1 or 2)")]
    InvalidCriticality(u8),
    /// Utilization and deadlines are undefined for a zero deadline.
    #[error("task {task} has a non-positive deadline")]
    NonPositiveDeadline { task: TaskId },
    /// A periodic task would release a job on every tick of a zero period.
    #[error("periodic task {task} has a zero period")]
    ZeroPeriod { task: TaskId },
    /// A task must carry one WCET estimate per level up to its own.
    #[error("task {task} is {level} but provides only {provided} WCET value(s)")]
    MissingWcet {
        task: TaskId,
        level: Criticality,
        provided: usize,
    },
}
