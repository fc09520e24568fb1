/// The simulator advances in discrete, unit-sized ticks.
pub type Time = u64;

/// Syntactic sugar to give a hint that a time value indicates an
/// absolute point on the simulation clock.
pub type Instant = Time;

/// Syntactic sugar to give a hint that a time value denotes a
/// relative interval length (periods, relative deadlines).
pub type Duration = Time;

/// Syntactic sugar to give a hint that a time value represents some
/// amount of processor service (WCETs, executed time).
pub type Service = Time;
