//! # Dimensions
//!
//! A physical dimension is the seven-exponent signature over the SI base
//! dimensions (length, mass, time, current, temperature, amount, luminous
//! intensity). It exists in two forms:
//!
//! - [`DimensionVector`] - a plain runtime value, used for printing, lookup
//!   tables and [`DynQuantity`](crate::DynQuantity).
//! - [`Dim`] - a zero-sized type whose parameters are `typenum` integers. This
//!   is the form carried by [`Quantity`](crate::Quantity), so dimension errors
//!   become type errors.
//!
//! The traits [`DimMul`], [`DimDiv`], [`DimInv`] and [`DimSqrt`] compute the
//! result dimension of an operation at compile time. `DimSqrt` only exists
//! when every exponent is even.
//!
//! ## Example
//!
//! ```rust
//! use si_core::dimension::{dims, Dimension, DimensionVector, Quot};
//!
//! type Speed = Quot<dims::Length, dims::Time>;
//! assert_eq!(Speed::VECTOR, DimensionVector::new(1, 0, -1, 0, 0, 0, 0));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use typenum::{Diff, Integer, Negate, PartialDiv, PartialQuot, Sum, P2};

use crate::errors::{UnitError, UnitResult};

/// Number of SI base dimensions
pub const BASE_COUNT: usize = 7;

/// Printer symbols of the base dimensions, in canonical order
pub const BASE_SYMBOLS: [&str; BASE_COUNT] = ["m", "kg", "s", "A", "K", "Mol", "Cd"];

// ============================================================================
// Runtime dimension vector
// ============================================================================

fn is_zero(exp: &i8) -> bool {
    *exp == 0
}

/// Exponents of the seven SI base dimensions.
///
/// Serialized as an object keyed by base symbol; zero exponents are omitted.
///
/// ```rust
/// use si_core::DimensionVector;
///
/// let speed = DimensionVector::new(1, 0, -1, 0, 0, 0, 0);
/// assert_eq!(serde_json::to_string(&speed).unwrap(), r#"{"m":1,"s":-1}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionVector {
    #[serde(rename = "m", default, skip_serializing_if = "is_zero")]
    pub length: i8,
    #[serde(rename = "kg", default, skip_serializing_if = "is_zero")]
    pub mass: i8,
    #[serde(rename = "s", default, skip_serializing_if = "is_zero")]
    pub time: i8,
    #[serde(rename = "A", default, skip_serializing_if = "is_zero")]
    pub current: i8,
    #[serde(rename = "K", default, skip_serializing_if = "is_zero")]
    pub temperature: i8,
    #[serde(rename = "mol", default, skip_serializing_if = "is_zero")]
    pub amount: i8,
    #[serde(rename = "cd", default, skip_serializing_if = "is_zero")]
    pub luminous_intensity: i8,
}

impl DimensionVector {
    /// The dimensionless vector
    pub const SCALAR: DimensionVector = DimensionVector::new(0, 0, 0, 0, 0, 0, 0);

    /// Create a vector from exponents in the order m, kg, s, A, K, mol, cd
    pub const fn new(m: i8, kg: i8, s: i8, a: i8, k: i8, mol: i8, cd: i8) -> Self {
        Self {
            length: m,
            mass: kg,
            time: s,
            current: a,
            temperature: k,
            amount: mol,
            luminous_intensity: cd,
        }
    }

    pub const fn from_components(c: [i8; BASE_COUNT]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5], c[6])
    }

    /// Exponents in canonical base order
    pub const fn components(self) -> [i8; BASE_COUNT] {
        [
            self.length,
            self.mass,
            self.time,
            self.current,
            self.temperature,
            self.amount,
            self.luminous_intensity,
        ]
    }

    /// True for the dimensionless vector
    pub const fn is_scalar(self) -> bool {
        let c = self.components();
        let mut i = 0;
        while i < BASE_COUNT {
            if c[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Dimension of a product: componentwise sum.
    ///
    /// Panics when an exponent leaves the `i8` range, in every build
    /// profile; use [`checked_mul`](Self::checked_mul) for untrusted input.
    pub const fn combine_mul(self, rhs: Self) -> Self {
        let (a, b) = (self.components(), rhs.components());
        let mut out = [0i8; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            out[i] = match a[i].checked_add(b[i]) {
                Some(exp) => exp,
                None => panic!("dimension exponent overflow in combine_mul"),
            };
            i += 1;
        }
        Self::from_components(out)
    }

    /// Dimension of a quotient: componentwise difference.
    ///
    /// Panics on `i8` overflow like [`combine_mul`](Self::combine_mul).
    pub const fn combine_div(self, rhs: Self) -> Self {
        let (a, b) = (self.components(), rhs.components());
        let mut out = [0i8; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            out[i] = match a[i].checked_sub(b[i]) {
                Some(exp) => exp,
                None => panic!("dimension exponent overflow in combine_div"),
            };
            i += 1;
        }
        Self::from_components(out)
    }

    /// Dimension of a reciprocal: componentwise negation. Panics on `-128`.
    pub const fn negate(self) -> Self {
        Self::SCALAR.combine_div(self)
    }

    /// Dimension of a square root. Fails unless every exponent is even.
    ///
    /// ```rust
    /// use si_core::DimensionVector;
    ///
    /// let area = DimensionVector::new(2, 0, 0, 0, 0, 0, 0);
    /// assert_eq!(area.half().unwrap(), DimensionVector::new(1, 0, 0, 0, 0, 0, 0));
    /// assert!(DimensionVector::new(1, 0, 0, 0, 0, 0, 0).half().is_err());
    /// ```
    pub fn half(self) -> UnitResult<Self> {
        let c = self.components();
        if c.iter().any(|exp| exp % 2 != 0) {
            return Err(UnitError::invalid_root(self));
        }
        Ok(Self::from_components(c.map(|exp| exp / 2)))
    }

    /// Overflow-aware [`combine_mul`](Self::combine_mul)
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.zip_checked(rhs, i8::checked_add)
    }

    /// Overflow-aware [`combine_div`](Self::combine_div)
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.zip_checked(rhs, i8::checked_sub)
    }

    /// Overflow-aware [`negate`](Self::negate); only `-128` overflows
    pub fn checked_negate(self) -> Option<Self> {
        Self::SCALAR.checked_div(self)
    }

    fn zip_checked(self, rhs: Self, op: fn(i8, i8) -> Option<i8>) -> Option<Self> {
        let (a, b) = (self.components(), rhs.components());
        let mut out = [0i8; BASE_COUNT];
        for i in 0..BASE_COUNT {
            out[i] = op(a[i], b[i])?;
        }
        Some(Self::from_components(out))
    }

    /// Pairs of (base symbol, exponent) for the non-zero exponents
    pub fn nonzero(self) -> impl Iterator<Item = (&'static str, i8)> {
        BASE_SYMBOLS
            .into_iter()
            .zip(self.components())
            .filter(|(_, exp)| *exp != 0)
    }
}

impl Mul for DimensionVector {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.combine_mul(rhs)
    }
}

impl Div for DimensionVector {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        self.combine_div(rhs)
    }
}

impl Neg for DimensionVector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            return f.write_str("(scalar)");
        }
        f.write_str("(")?;
        for (i, (symbol, exp)) in self.nonzero().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", symbol, exp)?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// Type-level dimensions
// ============================================================================

/// Type-level dimension. Parameters are `typenum` signed integers in the order
/// length, mass, time, current, temperature, amount, luminous intensity.
///
/// Never instantiated; only used as the `D` parameter of
/// [`Quantity`](crate::Quantity).
pub struct Dim<L, M, T, I, Th, N, J> {
    _marker: PhantomData<(L, M, T, I, Th, N, J)>,
}

/// A type-level dimension and its runtime counterpart.
pub trait Dimension: 'static {
    type Length: Integer;
    type Mass: Integer;
    type Time: Integer;
    type Current: Integer;
    type Temperature: Integer;
    type Amount: Integer;
    type LuminousIntensity: Integer;

    /// The same dimension as a runtime value
    const VECTOR: DimensionVector;
}

impl<L, M, T, I, Th, N, J> Dimension for Dim<L, M, T, I, Th, N, J>
where
    L: Integer + 'static,
    M: Integer + 'static,
    T: Integer + 'static,
    I: Integer + 'static,
    Th: Integer + 'static,
    N: Integer + 'static,
    J: Integer + 'static,
{
    type Length = L;
    type Mass = M;
    type Time = T;
    type Current = I;
    type Temperature = Th;
    type Amount = N;
    type LuminousIntensity = J;

    const VECTOR: DimensionVector = DimensionVector::new(L::I8, M::I8, T::I8, I::I8, Th::I8, N::I8, J::I8);
}

/// Dimension of `Self * Rhs`
pub trait DimMul<Rhs: Dimension>: Dimension {
    type Output: Dimension;
}

/// Dimension of `Self / Rhs`
pub trait DimDiv<Rhs: Dimension>: Dimension {
    type Output: Dimension;
}

/// Dimension of `1 / Self`
pub trait DimInv: Dimension {
    type Output: Dimension;
}

/// Dimension of `sqrt(Self)`. Only implemented when every exponent is even.
pub trait DimSqrt: Dimension {
    type Output: Dimension;
}

pub type Prod<A, B> = <A as DimMul<B>>::Output;
pub type Quot<A, B> = <A as DimDiv<B>>::Output;
pub type Inv<A> = <A as DimInv>::Output;
pub type Root<A> = <A as DimSqrt>::Output;

impl<A, B> DimMul<B> for A
where
    A: Dimension,
    B: Dimension,
    A::Length: Add<B::Length>,
    A::Mass: Add<B::Mass>,
    A::Time: Add<B::Time>,
    A::Current: Add<B::Current>,
    A::Temperature: Add<B::Temperature>,
    A::Amount: Add<B::Amount>,
    A::LuminousIntensity: Add<B::LuminousIntensity>,
    Sum<A::Length, B::Length>: Integer + 'static,
    Sum<A::Mass, B::Mass>: Integer + 'static,
    Sum<A::Time, B::Time>: Integer + 'static,
    Sum<A::Current, B::Current>: Integer + 'static,
    Sum<A::Temperature, B::Temperature>: Integer + 'static,
    Sum<A::Amount, B::Amount>: Integer + 'static,
    Sum<A::LuminousIntensity, B::LuminousIntensity>: Integer + 'static,
{
    type Output = Dim<
        Sum<A::Length, B::Length>,
        Sum<A::Mass, B::Mass>,
        Sum<A::Time, B::Time>,
        Sum<A::Current, B::Current>,
        Sum<A::Temperature, B::Temperature>,
        Sum<A::Amount, B::Amount>,
        Sum<A::LuminousIntensity, B::LuminousIntensity>,
    >;
}

impl<A, B> DimDiv<B> for A
where
    A: Dimension,
    B: Dimension,
    A::Length: Sub<B::Length>,
    A::Mass: Sub<B::Mass>,
    A::Time: Sub<B::Time>,
    A::Current: Sub<B::Current>,
    A::Temperature: Sub<B::Temperature>,
    A::Amount: Sub<B::Amount>,
    A::LuminousIntensity: Sub<B::LuminousIntensity>,
    Diff<A::Length, B::Length>: Integer + 'static,
    Diff<A::Mass, B::Mass>: Integer + 'static,
    Diff<A::Time, B::Time>: Integer + 'static,
    Diff<A::Current, B::Current>: Integer + 'static,
    Diff<A::Temperature, B::Temperature>: Integer + 'static,
    Diff<A::Amount, B::Amount>: Integer + 'static,
    Diff<A::LuminousIntensity, B::LuminousIntensity>: Integer + 'static,
{
    type Output = Dim<
        Diff<A::Length, B::Length>,
        Diff<A::Mass, B::Mass>,
        Diff<A::Time, B::Time>,
        Diff<A::Current, B::Current>,
        Diff<A::Temperature, B::Temperature>,
        Diff<A::Amount, B::Amount>,
        Diff<A::LuminousIntensity, B::LuminousIntensity>,
    >;
}

impl<A> DimInv for A
where
    A: Dimension,
    A::Length: Neg,
    A::Mass: Neg,
    A::Time: Neg,
    A::Current: Neg,
    A::Temperature: Neg,
    A::Amount: Neg,
    A::LuminousIntensity: Neg,
    Negate<A::Length>: Integer + 'static,
    Negate<A::Mass>: Integer + 'static,
    Negate<A::Time>: Integer + 'static,
    Negate<A::Current>: Integer + 'static,
    Negate<A::Temperature>: Integer + 'static,
    Negate<A::Amount>: Integer + 'static,
    Negate<A::LuminousIntensity>: Integer + 'static,
{
    type Output = Dim<
        Negate<A::Length>,
        Negate<A::Mass>,
        Negate<A::Time>,
        Negate<A::Current>,
        Negate<A::Temperature>,
        Negate<A::Amount>,
        Negate<A::LuminousIntensity>,
    >;
}

// `PartialDiv` is only implemented by typenum when the division is exact.
impl<A> DimSqrt for A
where
    A: Dimension,
    A::Length: PartialDiv<P2>,
    A::Mass: PartialDiv<P2>,
    A::Time: PartialDiv<P2>,
    A::Current: PartialDiv<P2>,
    A::Temperature: PartialDiv<P2>,
    A::Amount: PartialDiv<P2>,
    A::LuminousIntensity: PartialDiv<P2>,
    PartialQuot<A::Length, P2>: Integer + 'static,
    PartialQuot<A::Mass, P2>: Integer + 'static,
    PartialQuot<A::Time, P2>: Integer + 'static,
    PartialQuot<A::Current, P2>: Integer + 'static,
    PartialQuot<A::Temperature, P2>: Integer + 'static,
    PartialQuot<A::Amount, P2>: Integer + 'static,
    PartialQuot<A::LuminousIntensity, P2>: Integer + 'static,
{
    type Output = Dim<
        PartialQuot<A::Length, P2>,
        PartialQuot<A::Mass, P2>,
        PartialQuot<A::Time, P2>,
        PartialQuot<A::Current, P2>,
        PartialQuot<A::Temperature, P2>,
        PartialQuot<A::Amount, P2>,
        PartialQuot<A::LuminousIntensity, P2>,
    >;
}

/// Named dimensions used by the unit catalog.
pub mod dims {
    use typenum::{N1, N2, N3, P1, P2, Z0};

    use super::Dim;

    pub type Dimensionless = Dim<Z0, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Length = Dim<P1, Z0, Z0, Z0, Z0, Z0, Z0>;
    pub type Mass = Dim<Z0, P1, Z0, Z0, Z0, Z0, Z0>;
    pub type Time = Dim<Z0, Z0, P1, Z0, Z0, Z0, Z0>;
    pub type Current = Dim<Z0, Z0, Z0, P1, Z0, Z0, Z0>;
    pub type Temperature = Dim<Z0, Z0, Z0, Z0, P1, Z0, Z0>;
    pub type Amount = Dim<Z0, Z0, Z0, Z0, Z0, P1, Z0>;
    pub type LuminousIntensity = Dim<Z0, Z0, Z0, Z0, Z0, Z0, P1>;

    pub type Velocity = Dim<P1, Z0, N1, Z0, Z0, Z0, Z0>;
    pub type Acceleration = Dim<P1, Z0, N2, Z0, Z0, Z0, Z0>;
    pub type Frequency = Dim<Z0, Z0, N1, Z0, Z0, Z0, Z0>;
    pub type Force = Dim<P1, P1, N2, Z0, Z0, Z0, Z0>;
    pub type Energy = Dim<P2, P1, N2, Z0, Z0, Z0, Z0>;
    pub type Power = Dim<P2, P1, N3, Z0, Z0, Z0, Z0>;
    pub type Pressure = Dim<N1, P1, N2, Z0, Z0, Z0, Z0>;
    pub type Charge = Dim<Z0, Z0, P1, P1, Z0, Z0, Z0>;
    pub type Voltage = Dim<P2, P1, N3, N1, Z0, Z0, Z0>;
    pub type Resistance = Dim<P2, P1, N3, N2, Z0, Z0, Z0>;
}

/// proptest strategies shared by the test modules
#[cfg(test)]
pub(crate) mod strategies {
    use super::{DimensionVector, BASE_COUNT};
    use proptest::prelude::*;

    /// Exponent bound keeping sums, differences and doublings inside `i8`
    pub const EXP_BOUND: i8 = 31;

    pub fn arb_dimension() -> impl Strategy<Value = DimensionVector> {
        prop::array::uniform7(-EXP_BOUND..=EXP_BOUND)
            .prop_map(|c: [i8; BASE_COUNT]| DimensionVector::from_components(c))
    }
}

#[cfg(test)]
mod tests {
    use super::dims::*;
    use super::strategies::arb_dimension;
    use super::*;
    use proptest::prelude::*;

    const SPEED: DimensionVector = DimensionVector::new(1, 0, -1, 0, 0, 0, 0);
    const VOLT: DimensionVector = DimensionVector::new(2, 1, -3, -1, 0, 0, 0);

    proptest! {
        #[test]
        fn prop_combine_mul_commutes(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!(a.combine_mul(b), b.combine_mul(a));
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn prop_combine_div_undoes_mul(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!(a.combine_mul(b).combine_div(b), a);
            prop_assert_eq!(a.combine_div(b).combine_mul(b), a);
        }

        #[test]
        fn prop_half_of_square(a in arb_dimension()) {
            prop_assert_eq!(a.combine_mul(a).half().unwrap(), a);
        }

        #[test]
        fn prop_checked_agrees_with_combine(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!(a.checked_mul(b), Some(a.combine_mul(b)));
            prop_assert_eq!(a.checked_div(b), Some(a.combine_div(b)));
            prop_assert_eq!(a.checked_negate(), Some(-a));
        }

        #[test]
        fn prop_serde_keeps_dimension(a in arb_dimension()) {
            let json = serde_json::to_string(&a).unwrap();
            prop_assert_eq!(serde_json::from_str::<DimensionVector>(&json).unwrap(), a);
        }
    }

    #[test]
    fn test_combine_commutes() {
        assert_eq!(SPEED.combine_mul(VOLT), VOLT.combine_mul(SPEED));
    }

    #[test]
    fn test_combine_div_roundtrip() {
        assert_eq!(SPEED.combine_mul(VOLT).combine_div(VOLT), SPEED);
        assert_eq!((SPEED * VOLT) / SPEED, VOLT);
    }

    #[test]
    fn test_negate() {
        assert_eq!(-SPEED, DimensionVector::new(-1, 0, 1, 0, 0, 0, 0));
        assert_eq!(SPEED.negate().negate(), SPEED);
        assert_eq!(SPEED.combine_mul(SPEED.negate()), DimensionVector::SCALAR);
    }

    #[test]
    fn test_half() {
        let squared = VOLT.combine_mul(VOLT);
        assert_eq!(squared.half().unwrap(), VOLT);
        assert_eq!(DimensionVector::SCALAR.half().unwrap(), DimensionVector::SCALAR);

        let err = VOLT.half().unwrap_err();
        assert_eq!(err, UnitError::invalid_root(VOLT));
    }

    #[test]
    fn test_checked_overflow() {
        let big = DimensionVector::new(100, 0, 0, 0, 0, 0, 0);
        assert!(big.checked_mul(big).is_none());
        assert_eq!(big.checked_div(big), Some(DimensionVector::SCALAR));
        assert!(DimensionVector::new(i8::MIN, 0, 0, 0, 0, 0, 0).checked_negate().is_none());
    }

    #[test]
    #[should_panic(expected = "dimension exponent overflow")]
    fn test_mul_overflow_panics() {
        let big = DimensionVector::new(100, 0, 0, 0, 0, 0, 0);
        let _ = big * big;
    }

    #[test]
    #[should_panic(expected = "dimension exponent overflow")]
    fn test_div_overflow_panics() {
        let low = DimensionVector::new(0, 0, -100, 0, 0, 0, 0);
        let high = DimensionVector::new(0, 0, 100, 0, 0, 0, 0);
        let _ = low / high;
    }

    #[test]
    #[should_panic(expected = "dimension exponent overflow")]
    fn test_negate_min_panics() {
        let _ = -DimensionVector::new(i8::MIN, 0, 0, 0, 0, 0, 0);
    }

    #[test]
    fn test_is_scalar() {
        assert!(DimensionVector::SCALAR.is_scalar());
        assert!(!SPEED.is_scalar());
    }

    #[test]
    fn test_display() {
        assert_eq!(SPEED.to_string(), "(m: 1, s: -1)");
        assert_eq!(DimensionVector::SCALAR.to_string(), "(scalar)");
    }

    #[test]
    fn test_serialization_skips_zero() {
        let json = serde_json::to_string(&VOLT).unwrap();
        assert_eq!(json, r#"{"m":2,"kg":1,"s":-3,"A":-1}"#);

        let roundtrip: DimensionVector = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, VOLT);

        let scalar: DimensionVector = serde_json::from_str("{}").unwrap();
        assert!(scalar.is_scalar());
    }

    #[test]
    fn test_type_level_vectors() {
        assert_eq!(Velocity::VECTOR, SPEED);
        assert_eq!(Voltage::VECTOR, VOLT);
        assert_eq!(Dimensionless::VECTOR, DimensionVector::SCALAR);
    }

    #[test]
    fn test_type_level_algebra_matches_runtime() {
        assert_eq!(<Quot<Length, Time>>::VECTOR, SPEED);
        assert_eq!(<Prod<Length, Mass>>::VECTOR, DimensionVector::new(1, 1, 0, 0, 0, 0, 0));
        assert_eq!(<Inv<Time>>::VECTOR, Frequency::VECTOR);
        assert_eq!(<Root<Prod<Voltage, Voltage>>>::VECTOR, VOLT);
        assert_eq!(<Quot<Energy, Charge>>::VECTOR, VOLT);
    }
}
