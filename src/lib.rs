/*! Simulation of EDF-VD mixed-criticality scheduling

This crate simulates *earliest-deadline first with virtual deadlines*
(**EDF-VD**) on a single processor in discrete time. A dual-criticality
[task set][system::System] is analyzed once to obtain a deadline scale
factor; the [scheduler][scheduler::Scheduler] then releases jobs,
dispatches and preempts them by (virtual) deadline, switches the system
to HI mode when a HI job overruns its LO budget, and reports missed
deadlines.

Nothing is printed: a run emits a stream of [events][event::Event] to a
caller-supplied [observer][event::Observer].

```
use edf_vd_sim::event::EventLog;
use edf_vd_sim::scenarios;
use edf_vd_sim::scheduler::Scheduler;
use edf_vd_sim::system::System;

let system = System::new(scenarios::task_set_a().unwrap());
let mut scheduler = Scheduler::new(system, 42);
let mut log = EventLog::new();
scheduler.run(60, &mut log);
assert!(!log.is_empty());
```
*/

pub mod criticality;
pub mod error;
pub mod event;
pub mod job;
pub mod scenarios;
pub mod scheduler;
pub mod system;
pub mod task;
pub mod time;
