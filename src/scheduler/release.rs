use rand::Rng;

use super::Scheduler;
use crate::criticality::Criticality;
use crate::event::{Event, Observer};
use crate::job::{Job, JobId};
use crate::task::Task;
use crate::time::{Duration, Instant};

/// Derive the next job of `task`, released at `release` while the
/// system operates in `mode`.
///
/// A HI job released in LO mode is scheduled by its task's virtual
/// deadline, rounded up, and draws its execution time from
/// `[min(0.7 * C_LO, 0.5 * C_HI), C_HI]`, so it may overrun its LO
/// budget. Every other job is scheduled by its real deadline and draws
/// from `[0.5 * C, C]`, with `C` the WCET at the job's own level.
pub fn create_job<R: Rng>(task: &mut Task, mode: Criticality, release: Instant, rng: &mut R) -> Job {
    let id = JobId {
        task: task.id(),
        index: task.next_job_index(),
    };
    let wcet_lo = task.wcet(Criticality::Lo);

    match (task.criticality(), mode, task.virtual_deadline()) {
        (Criticality::Hi, Criticality::Lo, Some(vd)) => {
            let wcet_hi = task.wcet(Criticality::Hi) as f64;
            let lower = (0.7 * wcet_lo as f64).min(0.5 * wcet_hi);
            let execution_time = rng.gen_range(lower..=wcet_hi);
            // f64 rounding may push huge deadlines past the real one
            let vd = (vd.ceil() as Duration).min(task.deadline());
            Job::new(
                id,
                Criticality::Hi,
                release,
                task.deadline(),
                Some(vd),
                execution_time,
                wcet_lo,
            )
        }
        _ => {
            let wcet = task.wcet(task.criticality()) as f64;
            let execution_time = rng.gen_range(0.5 * wcet..=wcet);
            Job::new(
                id,
                task.criticality(),
                release,
                task.deadline(),
                None,
                execution_time,
                wcet_lo,
            )
        }
    }
}

impl<R: Rng> Scheduler<R> {
    /// Release one job for every task that has an arrival at the
    /// current tick.
    pub(super) fn release_jobs<O: Observer>(&mut self, observer: &mut O) {
        let now = self.now;
        let mode = self.system.mode();
        for task in self
            .system
            .tasks_mut()
            .iter_mut()
            .filter(|t| t.releases_at(now))
        {
            let job = create_job(task, mode, now, &mut self.rng);
            observer.notify(
                now,
                &Event::JobReleased {
                    job: job.id(),
                    deadline: job.scheduling_deadline(),
                    virtual_deadline: job.uses_virtual_deadline(),
                },
            );
            self.ready.push(job);
        }
    }
}
