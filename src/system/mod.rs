/*! The task set as a whole: utilization figures and virtual deadlines

Under EDF-VD, the relative deadlines of HI tasks are shrunk by a common
*scale factor* while the system operates in LO mode, so that HI jobs
finish early enough to absorb an overrun once the system switches to HI
mode. The factor is derived from three aggregate utilizations:

- `u_lo_lo`: LO-level utilization of all LO tasks,
- `u_hi_lo`: LO-level utilization of all HI tasks,
- `u_hi_hi`: HI-level utilization of all HI tasks,

as `u_hi_lo / (1 - u_lo_lo)`, capped at 1.

## Citation

S. Baruah, V. Bonifaci, G. D'Angelo, H. Li, A. Marchetti-Spaccamela,
S. van der Ster, and L. Stougie, "The Preemptive Uniprocessor
Scheduling of Mixed-Criticality Implicit-Deadline Sporadic Task
Systems", *Proceedings of the 24th Euromicro Conference on Real-Time
Systems (ECRTS 2012)*, pp. 145--154, July 2012.
*/

use std::fmt;

use log::{info, warn};

use crate::criticality::Criticality;
use crate::task::Task;

/// Advisory findings of the schedulability computation. None of them
/// stops a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulabilityWarning {
    /// The raw scale factor exceeded 1 (or was undefined because the
    /// LO tasks alone saturate the processor) and was capped at 1.
    ScaleFactorClamped { raw: f64 },
    /// `u_lo_lo + u_hi_lo` exceeds 1.
    MayNotBeSchedulable { necessary: f64 },
}

impl fmt::Display for SchedulabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulabilityWarning::ScaleFactorClamped { raw } => {
                write!(f, "scale factor {:.4} > 1, set to 1", raw)
            }
            SchedulabilityWarning::MayNotBeSchedulable { necessary } => write!(
                f,
                "necessary schedulability factor {:.4} > 1, task set may not be schedulable",
                necessary
            ),
        }
    }
}

/// A dual-criticality system: the task set plus the current operating mode.
#[derive(Debug, Clone)]
pub struct System {
    mode: Criticality,
    tasks: Vec<Task>,
    u_lo_lo: f64,
    u_hi_lo: f64,
    u_hi_hi: f64,
    scale_factor: f64,
    warnings: Vec<SchedulabilityWarning>,
}

impl System {
    /// Take ownership of a task set, compute its utilization figures
    /// and scale factor, and assign virtual deadlines to all HI tasks.
    /// The system starts in LO mode.
    pub fn new(mut tasks: Vec<Task>) -> System {
        let u_lo_lo: f64 = tasks
            .iter()
            .filter(|t| t.criticality() == Criticality::Lo)
            .map(|t| t.utilization(Criticality::Lo))
            .sum();
        let (u_hi_lo, u_hi_hi) = tasks
            .iter()
            .filter(|t| t.criticality() == Criticality::Hi)
            .fold((0.0, 0.0), |(lo, hi), t| {
                (
                    lo + t.utilization(Criticality::Lo),
                    hi + t.utilization(Criticality::Hi),
                )
            });
        info!(
            "u_lo_lo = {:.4}, u_hi_lo = {:.4}, u_hi_hi = {:.4}",
            u_lo_lo, u_hi_lo, u_hi_hi
        );

        let mut warnings = Vec::new();

        let slack = 1.0 - u_lo_lo;
        let raw = if slack > 0.0 {
            u_hi_lo / slack
        } else {
            f64::INFINITY
        };
        let scale_factor = if raw > 1.0 {
            warnings.push(SchedulabilityWarning::ScaleFactorClamped { raw });
            1.0
        } else {
            raw
        };
        info!("scale factor = {:.4}", scale_factor);

        let necessary = u_lo_lo + u_hi_lo;
        info!("necessary schedulability factor = {:.4}", necessary);
        if necessary > 1.0 {
            warnings.push(SchedulabilityWarning::MayNotBeSchedulable { necessary });
        }

        for w in &warnings {
            warn!("{}", w);
        }

        for t in tasks
            .iter_mut()
            .filter(|t| t.criticality() == Criticality::Hi)
        {
            let vd = scale_factor * t.deadline() as f64;
            t.set_virtual_deadline(vd);
        }

        System {
            mode: Criticality::Lo,
            tasks,
            u_lo_lo,
            u_hi_lo,
            u_hi_hi,
            scale_factor,
            warnings,
        }
    }

    /// The current operating mode.
    pub fn mode(&self) -> Criticality {
        self.mode
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn u_lo_lo(&self) -> f64 {
        self.u_lo_lo
    }

    pub fn u_hi_lo(&self) -> f64 {
        self.u_hi_lo
    }

    pub fn u_hi_hi(&self) -> f64 {
        self.u_hi_hi
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// `u_lo_lo + u_hi_lo`, a necessary (not sufficient) condition for
    /// schedulability in LO mode if at most 1.
    pub fn necessary_schedulability(&self) -> f64 {
        self.u_lo_lo + self.u_hi_lo
    }

    pub fn warnings(&self) -> &[SchedulabilityWarning] {
        &self.warnings
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// One-way transition to HI mode.
    pub(crate) fn switch_to_hi_mode(&mut self) {
        self.mode = Criticality::Hi;
    }
}
