/*! Tick-by-tick EDF-VD simulation

The [Scheduler] owns a [System], a ready queue ordered by job priority,
and a dispatch slot that holds at most one running job. Each call to
[Scheduler::step] simulates one tick:

1. release the jobs of all tasks that arrive at this tick;
2. charge one unit of service to the running job, then, in this order of
   precedence, complete it, switch the system to HI mode (a HI job
   exhausted its LO budget in LO mode), or let it be preempted by a
   waiting job with a strictly earlier scheduling deadline;
3. if the processor is idle, dispatch the highest-priority waiting job;
4. report every waiting job whose scheduling deadline has passed.

The switch to HI mode is one way: the system never returns to LO mode.
*/

use std::collections::BinaryHeap;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::criticality::Criticality;
use crate::event::{Event, Observer};
use crate::job::{Job, JobId};
use crate::system::System;
use crate::time::Instant;

mod release;

pub use release::create_job;

/// Discrete-time EDF-VD scheduler for a single processor.
///
/// Execution times are sampled from the injected random source `R`, so
/// two schedulers built from the same task set and the same seed
/// produce identical event streams.
#[derive(Debug)]
pub struct Scheduler<R: Rng = StdRng> {
    system: System,
    ready: BinaryHeap<Job>,
    running: Option<Job>,
    now: Instant,
    rng: R,
}

impl Scheduler<StdRng> {
    /// Create a scheduler whose execution-time samples are drawn from a
    /// generator seeded with `seed`.
    pub fn new(system: System, seed: u64) -> Self {
        Self::with_rng(system, StdRng::seed_from_u64(seed))
    }

    /// Create a scheduler seeded from operating-system entropy. Runs
    /// are not reproducible.
    pub fn from_entropy(system: System) -> Self {
        Self::with_rng(system, StdRng::from_entropy())
    }
}

impl<R: Rng> Scheduler<R> {
    pub fn with_rng(system: System, rng: R) -> Self {
        Scheduler {
            system,
            ready: BinaryHeap::new(),
            running: None,
            now: 0,
            rng,
        }
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn into_system(self) -> System {
        self.system
    }

    /// The next tick to be simulated.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// The job occupying the processor, if any.
    pub fn running(&self) -> Option<&Job> {
        self.running.as_ref()
    }

    /// The waiting jobs, highest priority first.
    pub fn ready_jobs(&self) -> Vec<&Job> {
        self.ready.iter().sorted().rev().collect()
    }

    /// Simulate all ticks up to and including `horizon`. Jobs that are
    /// still running or waiting afterwards are left as they are.
    pub fn run<O: Observer>(&mut self, horizon: Instant, mut observer: O) {
        while self.now <= horizon {
            self.step(&mut observer);
        }
    }

    /// Simulate a single tick.
    pub fn step<O: Observer>(&mut self, mut observer: O) {
        if self.now == 0 {
            for w in self.system.warnings() {
                observer.notify(0, &Event::Schedulability(*w));
            }
        }

        self.release_jobs(&mut observer);

        if let Some(mut job) = self.running.take() {
            job.execute_for_one_tick();
            if job.is_complete() {
                observer.notify(
                    self.now,
                    &Event::JobCompleted {
                        job: job.id(),
                        execution_time: job.execution_time(),
                    },
                );
            } else if job.criticality() == Criticality::Hi
                && self.system.mode() == Criticality::Lo
                && job.exceeds_lo_budget()
            {
                self.switch_to_hi_mode(job.id(), &mut observer);
                self.running = Some(job);
            } else {
                self.running = Some(self.preempt(job, &mut observer));
            }
        }

        if self.running.is_none() {
            if let Some(job) = self.ready.pop() {
                observer.notify(self.now, &started(&job));
                self.running = Some(job);
            }
        }

        self.report_missed_deadlines(&mut observer);

        self.now += 1;
    }

    /// Swap `running` with the head of the ready queue if the latter
    /// has a strictly earlier scheduling deadline, and return whichever
    /// job ends up on the processor.
    fn preempt<O: Observer>(&mut self, running: Job, observer: &mut O) -> Job {
        match self.ready.peek_mut() {
            Some(mut head) if head.scheduling_deadline() < running.scheduling_deadline() => {
                let suspended = (running.id(), running.executed());
                // the heap reorders itself once `head` is dropped
                let next = std::mem::replace(&mut *head, running);
                observer.notify(
                    self.now,
                    &Event::JobPreempted {
                        job: suspended.0,
                        executed: suspended.1,
                        by: next.id(),
                    },
                );
                observer.notify(self.now, &started(&next));
                next
            }
            _ => running,
        }
    }

    /// Enter HI mode: waiting HI jobs fall back to their real deadlines
    /// and waiting LO jobs are dropped. The running job is not touched.
    fn switch_to_hi_mode<O: Observer>(&mut self, trigger: JobId, observer: &mut O) {
        self.system.switch_to_hi_mode();

        let mut discarded = Vec::new();
        let waiting = std::mem::take(&mut self.ready).into_vec();
        self.ready = waiting
            .into_iter()
            .filter_map(|mut job| match job.criticality() {
                Criticality::Hi => {
                    job.restore_deadline();
                    Some(job)
                }
                Criticality::Lo => {
                    discarded.push(job.id());
                    None
                }
            })
            .collect();
        discarded.sort();

        observer.notify(self.now, &Event::ModeSwitch { trigger, discarded });
    }

    fn report_missed_deadlines<O: Observer>(&self, observer: &mut O) {
        for job in self
            .ready
            .iter()
            .filter(|j| j.has_missed_deadline(self.now))
            .sorted()
            .rev()
        {
            observer.notify(
                self.now,
                &Event::DeadlineMissed {
                    job: job.id(),
                    deadline: job.scheduling_deadline(),
                    criticality: job.criticality(),
                },
            );
            if job.criticality() == Criticality::Hi {
                observer.notify(
                    self.now,
                    &Event::CriticalDeadlineMissed {
                        job: job.id(),
                        deadline: job.scheduling_deadline(),
                    },
                );
            }
        }
    }
}

fn started(job: &Job) -> Event {
    Event::JobStarted {
        job: job.id(),
        deadline: job.scheduling_deadline(),
        virtual_deadline: job.uses_virtual_deadline(),
    }
}
