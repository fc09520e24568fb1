//! Demonstration task sets.
//!
//! Each set mixes LO tasks with HI tasks whose HI-mode WCET exceeds
//! their LO-mode WCET, so that random execution times occasionally
//! overrun the LO budget and trigger a mode switch.

use crate::criticality::Criticality::{Hi, Lo};
use crate::error::ConfigurationError;
use crate::task::Task;

/// Two LO tasks and one HI task released at `t = 3`.
pub fn task_set_a() -> Result<Vec<Task>, ConfigurationError> {
    Ok(vec![
        Task::new(1, Lo, true, 0, 10, 10, vec![3, 0])?,
        Task::new(2, Lo, true, 0, 9, 9, vec![4, 0])?,
        Task::new(3, Hi, true, 3, 20, 20, vec![3, 4])?,
    ])
}

/// Two LO and two HI tasks; the second HI task more than triples its
/// budget in HI mode.
pub fn task_set_b() -> Result<Vec<Task>, ConfigurationError> {
    Ok(vec![
        Task::new(1, Lo, true, 0, 10, 10, vec![3, 0])?,
        Task::new(2, Lo, true, 1, 12, 12, vec![2, 0])?,
        Task::new(3, Hi, true, 0, 15, 15, vec![3, 6])?,
        Task::new(4, Hi, true, 0, 20, 20, vec![3, 10])?,
    ])
}

/// One LO task and two HI tasks.
pub fn task_set_c() -> Result<Vec<Task>, ConfigurationError> {
    Ok(vec![
        Task::new(1, Lo, true, 0, 9, 9, vec![3, 0])?,
        Task::new(2, Hi, true, 1, 12, 12, vec![4, 6])?,
        Task::new(3, Hi, true, 0, 10, 10, vec![3, 5])?,
    ])
}
