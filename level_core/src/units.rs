//! # Unit Types
//!
//! Type-safe wrappers for survey units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Field leveling uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Metric Units (Only)
//!
//! Level books are kept in metric units throughout:
//! - Staff readings, elevations, distances: metres (m)
//! - Misclosure and the adjustment constant k: millimetres (mm)
//! - Traverse length in the allowable-error formula: kilometres (km)
//!
//! ## Example
//!
//! ```rust
//! use level_core::units::{Metres, Millimetres};
//!
//! let error = Metres(0.012);
//! let error_mm: Millimetres = error.into();
//! assert_eq!(error_mm.0, 12.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

/// Length in kilometres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometres(pub f64);

impl From<Metres> for Millimetres {
    fn from(m: Metres) -> Self {
        Millimetres(m.0 * 1000.0)
    }
}

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

impl From<Metres> for Kilometres {
    fn from(m: Metres) -> Self {
        Kilometres(m.0 / 1000.0)
    }
}

impl From<Kilometres> for Metres {
    fn from(km: Kilometres) -> Self {
        Metres(km.0 * 1000.0)
    }
}

impl From<Millimetres> for Kilometres {
    fn from(mm: Millimetres) -> Self {
        Kilometres(mm.0 / 1_000_000.0)
    }
}

impl From<Kilometres> for Millimetres {
    fn from(km: Kilometres) -> Self {
        Millimetres(km.0 * 1_000_000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Metres);
impl_arithmetic!(Millimetres);
impl_arithmetic!(Kilometres);
