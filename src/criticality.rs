use std::fmt;

use crate::error::ConfigurationError;

/// The two assurance levels of a dual-criticality system.
///
/// `Hi` compares greater than `Lo`. The same type describes both the
/// criticality of a task (or job) and the operating mode of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criticality {
    Lo = 1,
    Hi = 2,
}

impl Criticality {
    /// The numeric level (1 for LO, 2 for HI).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Position of this level's estimate in a per-level WCET vector.
    pub fn index(self) -> usize {
        self.level() as usize - 1
    }
}

impl TryFrom<u8> for Criticality {
    type Error = ConfigurationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Criticality::Lo),
            2 => Ok(Criticality::Hi),
            _ => Err(ConfigurationError::InvalidCriticality(level)),
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criticality::Lo => write!(f, "LO"),
            Criticality::Hi => write!(f, "HI"),
        }
    }
}
