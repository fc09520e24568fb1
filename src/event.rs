/*! Structured narration of a simulation run

The scheduler never prints. Every noteworthy step of a run is reported
as an [Event], stamped with the tick at which it happened, to an
[Observer] supplied by the caller. Two observers ship with the crate:
[EventLog] records the stream for later inspection, and [LogObserver]
narrates it through the `log` facade.
*/

use std::fmt;

use auto_impl::auto_impl;
use log::{debug, error, info, warn};

use crate::criticality::Criticality;
use crate::job::JobId;
use crate::system::SchedulabilityWarning;
use crate::time::{Instant, Service};

/// Something that happened during a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An advisory finding of the schedulability computation, reported
    /// once at the start of a run.
    Schedulability(SchedulabilityWarning),
    /// A job was released into the ready queue.
    JobReleased {
        job: JobId,
        deadline: Instant,
        virtual_deadline: bool,
    },
    /// A job was dispatched onto the processor.
    JobStarted {
        job: JobId,
        deadline: Instant,
        virtual_deadline: bool,
    },
    /// The running job was put back into the ready queue in favor of `by`.
    JobPreempted {
        job: JobId,
        executed: Service,
        by: JobId,
    },
    JobCompleted { job: JobId, execution_time: f64 },
    /// The system switched to HI mode because `trigger` exhausted its
    /// LO budget. The waiting LO jobs in `discarded` were dropped.
    ModeSwitch {
        trigger: JobId,
        discarded: Vec<JobId>,
    },
    /// A waiting job's scheduling deadline has passed.
    DeadlineMissed {
        job: JobId,
        deadline: Instant,
        criticality: Criticality,
    },
    /// Escalation of [Event::DeadlineMissed] for HI jobs.
    CriticalDeadlineMissed { job: JobId, deadline: Instant },
}

fn deadline_kind(virtual_deadline: bool) -> &'static str {
    if virtual_deadline {
        "Virtual Deadline"
    } else {
        "Deadline"
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Schedulability(w) => write!(f, "Warning: {}", w),
            Event::JobReleased {
                job,
                deadline,
                virtual_deadline,
            } => write!(
                f,
                "New Job {} released ({} @ {})",
                job,
                deadline_kind(*virtual_deadline),
                deadline
            ),
            Event::JobStarted {
                job,
                deadline,
                virtual_deadline,
            } => write!(
                f,
                "Start executing {} ({} @ {})",
                job,
                deadline_kind(*virtual_deadline),
                deadline
            ),
            Event::JobPreempted { job, executed, by } => write!(
                f,
                "{} is suspended by {}, executed time is {}",
                job, by, executed
            ),
            Event::JobCompleted {
                job,
                execution_time,
            } => write!(
                f,
                "{} completed, executionTime is {:.3}",
                job, execution_time
            ),
            Event::ModeSwitch { trigger, discarded } => {
                write!(f, "=== Switching to HI-Criticality Mode ({} overran its LO budget", trigger)?;
                if discarded.is_empty() {
                    write!(f, ") ===")
                } else {
                    write!(f, ", discarded {} LO job(s)) ===", discarded.len())
                }
            }
            Event::DeadlineMissed { job, deadline, .. } => {
                write!(f, "WARNING: {} missed deadline at {}", job, deadline)
            }
            Event::CriticalDeadlineMissed { job, .. } => {
                write!(f, "ERROR: HI level job {} missed deadline", job)
            }
        }
    }
}

/// Receiver of the event stream of a simulation run.
#[auto_impl(&mut, Box)]
pub trait Observer {
    /// Called once per event, in the order in which events occur.
    fn notify(&mut self, now: Instant, event: &Event);
}

/// An observer that simply records every event it is shown.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<(Instant, Event)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events with their time stamps, in order.
    pub fn records(&self) -> &[(Instant, Event)] {
        &self.records
    }

    /// The recorded events that happened at time `now`.
    pub fn at(&self, now: Instant) -> impl Iterator<Item = &Event> + '_ {
        self.records
            .iter()
            .filter(move |(t, _)| *t == now)
            .map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Observer for EventLog {
    fn notify(&mut self, now: Instant, event: &Event) {
        self.records.push((now, event.clone()));
    }
}

/// An observer that narrates events through the `log` facade.
///
/// Routine progress is logged at `info` (preemptions at `debug`),
/// deadline misses and mode switches at `warn`, and missed HI deadlines
/// at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&mut self, now: Instant, event: &Event) {
        match event {
            Event::JobPreempted { .. } => debug!("Time {}: {}", now, event),
            Event::Schedulability(_) | Event::ModeSwitch { .. } | Event::DeadlineMissed { .. } => {
                warn!("Time {}: {}", now, event)
            }
            Event::CriticalDeadlineMissed { .. } => error!("Time {}: {}", now, event),
            _ => info!("Time {}: {}", now, event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    fn id(task: u32, index: u64) -> JobId {
        JobId {
            task: TaskId(task),
            index,
        }
    }

    #[test]
    fn narration() {
        let released = Event::JobReleased {
            job: id(3, 1),
            deadline: 15,
            virtual_deadline: true,
        };
        assert_eq!(
            released.to_string(),
            "New Job [Task3 Job1] released (Virtual Deadline @ 15)"
        );
        let started = Event::JobStarted {
            job: id(2, 1),
            deadline: 9,
            virtual_deadline: false,
        };
        assert_eq!(started.to_string(), "Start executing [Task2 Job1] (Deadline @ 9)");
        let missed = Event::DeadlineMissed {
            job: id(1, 2),
            deadline: 20,
            criticality: Criticality::Lo,
        };
        assert_eq!(missed.to_string(), "WARNING: [Task1 Job2] missed deadline at 20");
    }

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        let e1 = Event::JobCompleted {
            job: id(1, 1),
            execution_time: 2.5,
        };
        let e2 = Event::ModeSwitch {
            trigger: id(3, 1),
            discarded: vec![id(1, 2)],
        };
        fn feed<O: Observer>(mut observer: O, now: Instant, event: &Event) {
            observer.notify(now, event);
        }
        // observers are usable through `&mut` and `Box`
        feed(&mut log, 4, &e1);
        feed(Box::new(LogObserver) as Box<dyn Observer>, 4, &e1);
        log.notify(7, &e2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0], (4, e1));
        assert_eq!(log.at(7).collect::<Vec<_>>(), vec![&e2]);
        assert_eq!(log.at(5).count(), 0);
    }
}
