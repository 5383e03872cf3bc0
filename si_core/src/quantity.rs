//! # Quantity
//!
//! [`Quantity<D, T>`] is a number of type `T` tagged with the type-level
//! dimension `D`. The dimension exists only in the type: a quantity has the
//! size and layout of its number.
//!
//! ## Rules
//!
//! - `+`, `-` and comparisons require both sides to have the same dimension.
//!   Anything else does not compile:
//!
//! ```compile_fail
//! use si_core::units::{KILOGRAM, METER};
//!
//! let _ = METER + KILOGRAM;
//! ```
//!
//! ```compile_fail
//! use si_core::units::{METER, SECOND};
//!
//! let _ = METER < SECOND;
//! ```
//!
//! - `*` and `/` combine any two dimensions.
//! - A dimensionless quantity converts to and from its number with `From`.
//!   A dimensioned quantity needs the explicit [`Quantity::new`] and
//!   [`Quantity::value`]:
//!
//! ```compile_fail
//! use si_core::units::Ampere;
//!
//! let current: Ampere = 2.0.into();
//! ```
//!
//! ```compile_fail
//! use si_core::units::AMPERE;
//! use si_core::DefaultFloat;
//!
//! let raw: DefaultFloat = AMPERE.into();
//! ```
//!
//! ## Example
//!
//! ```rust
//! use si_core::units::{Meter, Second, Speed};
//! use si_core::DefaultFloat;
//!
//! let distance: Meter = Meter::new(100.0);
//! let time: Second = Second::new(9.58);
//! let speed: Speed = distance / time;
//! assert!(speed.value() > 10.0);
//!
//! let half: Meter = Meter::new(50.0);
//! let ratio: DefaultFloat = (distance / half).into();
//! assert_eq!(ratio, 2.0);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::dimension::{dims::Dimensionless, DimDiv, DimInv, DimMul, Dimension, DimensionVector, Inv, Prod, Quot};
use crate::numeric::{DefaultFloat, Numeric};
use crate::printer::DEFAULT_PRINTER;

/// A number of type `T` with dimension `D`.
#[repr(transparent)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity<D: Dimension, T: Numeric = DefaultFloat> {
    value: T,
    #[serde(skip)]
    dimension: PhantomData<D>,
}

impl<D: Dimension, T: Numeric> Quantity<D, T> {
    /// Wrap a bare number. This is the explicit entry point for every
    /// dimension.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dimension: PhantomData,
        }
    }

    /// The bare number, in SI base units
    pub fn value(self) -> T {
        self.value
    }

    /// The dimension as a runtime value
    pub const fn dimension(&self) -> DimensionVector {
        D::VECTOR
    }

    /// Explicit numeric conversion of the value (an `as` cast)
    pub fn value_as<U>(self) -> U
    where
        T: AsPrimitive<U>,
        U: Copy + 'static,
    {
        self.value.as_()
    }

    /// Same dimension, different number type (an `as` cast)
    ///
    /// ```rust
    /// use si_core::units::Meter;
    ///
    /// let precise = Meter::new(2.75_f64);
    /// let coarse: Meter<i32> = precise.cast();
    /// assert_eq!(coarse.value(), 2);
    /// ```
    pub fn cast<U>(self) -> Quantity<D, U>
    where
        T: AsPrimitive<U>,
        U: Numeric,
    {
        Quantity::new(self.value.as_())
    }

    /// Apply a function to the value, keeping the dimension
    pub fn map_value(self, f: impl FnOnce(T) -> T) -> Self {
        Self::new(f(self.value))
    }

    /// The larger of two quantities (`self` on ties or NaN)
    pub fn max(self, other: Self) -> Self {
        if other.value > self.value {
            other
        } else {
            self
        }
    }

    /// The smaller of two quantities (`self` on ties or NaN)
    pub fn min(self, other: Self) -> Self {
        if other.value < self.value {
            other
        } else {
            self
        }
    }
}

// ============================================================================
// Standard traits
// ============================================================================

impl<D: Dimension, T: Numeric> Clone for Quantity<D, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Dimension, T: Numeric> Copy for Quantity<D, T> {}

impl<D: Dimension, T: Numeric> Default for Quantity<D, T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<D: Dimension, T: Numeric + fmt::Debug> fmt::Debug for Quantity<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value)
            .field("dimension", &D::VECTOR)
            .finish()
    }
}

impl<D: Dimension, T: Numeric + fmt::Display> fmt::Display for Quantity<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        DEFAULT_PRINTER.write_unit(f, D::VECTOR)
    }
}

impl<D: Dimension, T: Numeric> PartialEq for Quantity<D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<D: Dimension, T: Numeric + Eq> Eq for Quantity<D, T> {}

impl<D: Dimension, T: Numeric> PartialOrd for Quantity<D, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<D: Dimension, T: Numeric + Ord> Ord for Quantity<D, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<D: Dimension, T: Numeric + Hash> Hash for Quantity<D, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

// ============================================================================
// Same-dimension arithmetic
// ============================================================================

impl<D: Dimension, T: Numeric> Add for Quantity<D, T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value)
    }
}

impl<D: Dimension, T: Numeric> AddAssign for Quantity<D, T> {
    fn add_assign(&mut self, rhs: Self) {
        self.value = self.value + rhs.value;
    }
}

impl<D: Dimension, T: Numeric> Sub for Quantity<D, T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<D: Dimension, T: Numeric> SubAssign for Quantity<D, T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value = self.value - rhs.value;
    }
}

impl<D: Dimension, T: Numeric + Neg<Output = T>> Neg for Quantity<D, T> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.value)
    }
}

impl<D: Dimension, T: Numeric> Sum for Quantity<D, T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, q| acc + q)
    }
}

impl<'a, D: Dimension, T: Numeric> Sum<&'a Quantity<D, T>> for Quantity<D, T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// ============================================================================
// Scaling by a bare number
// ============================================================================

impl<D: Dimension, T: Numeric> Mul<T> for Quantity<D, T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self::Output {
        Self::new(self.value * rhs)
    }
}

impl<D: Dimension, T: Numeric> MulAssign<T> for Quantity<D, T> {
    fn mul_assign(&mut self, rhs: T) {
        self.value = self.value * rhs;
    }
}

impl<D: Dimension, T: Numeric> Div<T> for Quantity<D, T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self::Output {
        Self::new(self.value / rhs)
    }
}

impl<D: Dimension, T: Numeric> DivAssign<T> for Quantity<D, T> {
    fn div_assign(&mut self, rhs: T) {
        self.value = self.value / rhs;
    }
}

// ============================================================================
// Dimension-combining arithmetic
// ============================================================================

impl<D1, D2, T> Mul<Quantity<D2, T>> for Quantity<D1, T>
where
    D1: DimMul<D2>,
    D2: Dimension,
    T: Numeric,
{
    type Output = Quantity<Prod<D1, D2>, T>;
    fn mul(self, rhs: Quantity<D2, T>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<D1, D2, T> Div<Quantity<D2, T>> for Quantity<D1, T>
where
    D1: DimDiv<D2>,
    D2: Dimension,
    T: Numeric,
{
    type Output = Quantity<Quot<D1, D2>, T>;
    fn div(self, rhs: Quantity<D2, T>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

// ============================================================================
// Dimensionless conversions
// ============================================================================

impl<T: Numeric> From<T> for Quantity<Dimensionless, T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// Bare number on the left-hand side and the scalar-to-number conversion need
// one impl per concrete type (orphan rules).
macro_rules! impl_bare_lhs {
    ($($t:ty),* $(,)?) => {
        $(
            impl<D: Dimension> Mul<Quantity<D, $t>> for $t {
                type Output = Quantity<D, $t>;
                fn mul(self, rhs: Quantity<D, $t>) -> Self::Output {
                    Quantity::new(self * rhs.value)
                }
            }

            impl<D: DimInv> Div<Quantity<D, $t>> for $t {
                type Output = Quantity<Inv<D>, $t>;
                fn div(self, rhs: Quantity<D, $t>) -> Self::Output {
                    Quantity::new(self / rhs.value)
                }
            }

            impl From<Quantity<Dimensionless, $t>> for $t {
                fn from(q: Quantity<Dimensionless, $t>) -> Self {
                    q.value
                }
            }
        )*
    };
}

impl_bare_lhs!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
