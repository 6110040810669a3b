//! Unit system constants
//!
//! The legacy format carries no unit metadata at all, so the unit system is
//! part of the converter configuration and the resulting CGS constants are
//! attached to every output dataset.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Velocity unit in cm/s (1 km/s)
pub const UNIT_VELOCITY_CM_PER_S: f64 = 1e5;

/// Mass unit in grams (1e10 Msun/h)
pub const UNIT_MASS_G: f64 = 1.989e43;

/// Length unit for Mpc/h boxes, in cm
pub const UNIT_LENGTH_MPC_CM: f64 = 3.085678e24;

/// Length unit for Kpc/h boxes, in cm
pub const UNIT_LENGTH_KPC_CM: f64 = 3.085678e21;

/// Supported length unit systems
///
/// Exactly two choices; anything else is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    /// Box coordinates in Mpc/h
    Mpc,
    /// Box coordinates in Kpc/h (the common Gadget convention)
    Kpc,
}

impl UnitSystem {
    /// Length unit in cm for this system
    pub fn length_unit_cm(self) -> f64 {
        match self {
            UnitSystem::Mpc => UNIT_LENGTH_MPC_CM,
            UnitSystem::Kpc => UNIT_LENGTH_KPC_CM,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mpc" => Ok(UnitSystem::Mpc),
            "Kpc" => Ok(UnitSystem::Kpc),
            other => Err(Error::UnsupportedUnitSystem(other.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Mpc => write!(f, "Mpc"),
            UnitSystem::Kpc => write!(f, "Kpc"),
        }
    }
}
