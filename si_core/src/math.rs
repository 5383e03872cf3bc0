//! # Math Functions
//!
//! Dimension-aware versions of common numeric functions, available both as
//! methods and as free functions.
//!
//! `sqrt` halves every exponent and only exists when all of them are even:
//!
//! ```rust
//! use si_core::math::sqrt;
//! use si_core::units::{Meter, METER};
//!
//! let side: Meter = sqrt(METER * METER * 16.0);
//! assert_eq!(side.value(), 4.0);
//! ```
//!
//! ```compile_fail
//! use si_core::math::sqrt;
//! use si_core::units::METER;
//!
//! let _ = sqrt(METER);
//! ```
//!
//! `atan2` requires both arguments to have the same dimension:
//!
//! ```compile_fail
//! use si_core::math::atan2;
//! use si_core::units::{METER, SECOND};
//!
//! let _ = atan2(METER, SECOND);
//! ```

use num_traits::{Float, Signed};

use crate::dimension::{DimSqrt, Dimension, Root};
use crate::numeric::Numeric;
use crate::quantity::Quantity;

impl<D: Dimension, T: Numeric + Float> Quantity<D, T> {
    /// Square root; the dimension's exponents are halved
    pub fn sqrt(self) -> Quantity<Root<D>, T>
    where
        D: DimSqrt,
    {
        Quantity::new(self.value().sqrt())
    }

    /// Round the value to the nearest integer, half away from zero
    pub fn round(self) -> Self {
        Self::new(self.value().round())
    }

    pub fn is_nan(self) -> bool {
        self.value().is_nan()
    }

    /// Angle of the point `(x, self)` in radians, as a bare number
    pub fn atan2(self, x: Self) -> T {
        self.value().atan2(x.value())
    }
}

impl<D: Dimension, T: Numeric + Signed> Quantity<D, T> {
    pub fn abs(self) -> Self {
        Self::new(self.value().abs())
    }
}

pub fn sqrt<D, T>(q: Quantity<D, T>) -> Quantity<Root<D>, T>
where
    D: DimSqrt,
    T: Numeric + Float,
{
    q.sqrt()
}

pub fn abs<D: Dimension, T: Numeric + Signed>(q: Quantity<D, T>) -> Quantity<D, T> {
    q.abs()
}

pub fn round<D: Dimension, T: Numeric + Float>(q: Quantity<D, T>) -> Quantity<D, T> {
    q.round()
}

pub fn is_nan<D: Dimension, T: Numeric + Float>(q: Quantity<D, T>) -> bool {
    q.is_nan()
}

pub fn atan2<D: Dimension, T: Numeric + Float>(y: Quantity<D, T>, x: Quantity<D, T>) -> T {
    y.atan2(x)
}
