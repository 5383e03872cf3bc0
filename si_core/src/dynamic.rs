//! # Run-time Quantities
//!
//! [`DynQuantity`] carries its dimension as a [`DimensionVector`] value
//! instead of a type. It backs parsed expressions, JSON input and anything
//! else whose dimension is only known at run time. Every rule that
//! [`Quantity`] enforces at compile time is checked here and reported as a
//! [`UnitError`].
//!
//! ```rust
//! use si_core::DynQuantity;
//!
//! let d = DynQuantity::from_literal(1.5, "k_meter").unwrap();
//! let t = DynQuantity::from_literal(60.0, "second").unwrap();
//! let v = d.try_div(t).unwrap();
//! assert_eq!(v.to_string(), "25 m / s");
//!
//! assert!(d.try_add(t).is_err());
//! ```
//!
//! `DynQuantity` has no `==` or `<`. Compare with [`DynQuantity::try_eq`] and
//! [`DynQuantity::try_partial_cmp`], which reject mismatched dimensions.
//!
//! ```compile_fail
//! use si_core::DynQuantity;
//!
//! let m = DynQuantity::from_literal(1.0, "meter").unwrap();
//! let s = DynQuantity::from_literal(1.0, "second").unwrap();
//! let _ = m == s;
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use num_traits::{Float, Signed};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, DimensionVector};
use crate::errors::{UnitError, UnitResult};
use crate::numeric::{DefaultFloat, Numeric};
use crate::printer::DEFAULT_PRINTER;
use crate::quantity::Quantity;
use crate::units::parse_literal;

/// A number with a dimension known only at run time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DynQuantity<T: Numeric = DefaultFloat> {
    value: T,
    dimension: DimensionVector,
}

impl<T: Numeric> DynQuantity<T> {
    pub fn new(value: T, dimension: DimensionVector) -> Self {
        Self { value, dimension }
    }

    /// Dimensionless quantity
    pub fn scalar(value: T) -> Self {
        Self::new(value, DimensionVector::SCALAR)
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn dimension(&self) -> DimensionVector {
        self.dimension
    }

    pub fn is_scalar(&self) -> bool {
        self.dimension.is_scalar()
    }

    fn require_same(&self, operation: &str, rhs: &Self) -> UnitResult<()> {
        if self.dimension == rhs.dimension {
            return Ok(());
        }
        tracing::debug!(operation, lhs = %self.dimension, rhs = %rhs.dimension, "dimension mismatch");
        Err(UnitError::dimension_mismatch(operation, self.dimension, rhs.dimension))
    }

    pub fn try_add(self, rhs: Self) -> UnitResult<Self> {
        self.require_same("add", &rhs)?;
        Ok(Self::new(self.value + rhs.value, self.dimension))
    }

    pub fn try_sub(self, rhs: Self) -> UnitResult<Self> {
        self.require_same("sub", &rhs)?;
        Ok(Self::new(self.value - rhs.value, self.dimension))
    }

    /// Equality; comparing different dimensions is an error, not `false`
    pub fn try_eq(&self, rhs: &Self) -> UnitResult<bool> {
        self.require_same("eq", rhs)?;
        Ok(self.value == rhs.value)
    }

    pub fn try_partial_cmp(&self, rhs: &Self) -> UnitResult<Option<Ordering>> {
        self.require_same("cmp", rhs)?;
        Ok(self.value.partial_cmp(&rhs.value))
    }

    pub fn try_mul(self, rhs: Self) -> UnitResult<Self> {
        let dimension = self
            .dimension
            .checked_mul(rhs.dimension)
            .ok_or_else(|| UnitError::exponent_overflow("mul", self.dimension, rhs.dimension))?;
        Ok(Self::new(self.value * rhs.value, dimension))
    }

    pub fn try_div(self, rhs: Self) -> UnitResult<Self> {
        let dimension = self
            .dimension
            .checked_div(rhs.dimension)
            .ok_or_else(|| UnitError::exponent_overflow("div", self.dimension, rhs.dimension))?;
        Ok(Self::new(self.value / rhs.value, dimension))
    }

    /// `1 / self`
    pub fn try_recip(self) -> UnitResult<Self> {
        Self::scalar(T::one()).try_div(self)
    }

    /// Multiply the value by a bare number
    pub fn scale(self, factor: T) -> Self {
        Self::new(self.value * factor, self.dimension)
    }

    /// Divide the value by a bare number
    pub fn div_scalar(self, divisor: T) -> Self {
        Self::new(self.value / divisor, self.dimension)
    }

    /// The bare number of a dimensionless quantity
    pub fn to_number(self) -> UnitResult<T> {
        if self.is_scalar() {
            return Ok(self.value);
        }
        Err(UnitError::NonScalarConversion {
            dimension: self.dimension,
        })
    }

    /// Check the run-time dimension against `D` and convert
    ///
    /// ```rust
    /// use si_core::units::Speed;
    /// use si_core::{DimensionVector, DynQuantity};
    ///
    /// let dynamic = DynQuantity::new(3.0, DimensionVector::new(1, 0, -1, 0, 0, 0, 0));
    /// let speed: Speed = dynamic.into_static().unwrap();
    /// assert_eq!(speed.value(), 3.0);
    /// ```
    pub fn into_static<D: Dimension>(self) -> UnitResult<Quantity<D, T>> {
        if self.dimension == D::VECTOR {
            return Ok(Quantity::new(self.value));
        }
        Err(UnitError::dimension_mismatch("into_static", self.dimension, D::VECTOR))
    }
}

impl<T: Numeric + Float> DynQuantity<T> {
    /// Square root; fails on odd exponents
    pub fn sqrt(self) -> UnitResult<Self> {
        let dimension = self.dimension.half().map_err(|err| {
            tracing::debug!(dimension = %self.dimension, "square root of odd dimension");
            err
        })?;
        Ok(Self::new(self.value.sqrt(), dimension))
    }

    pub fn round(self) -> Self {
        Self::new(self.value.round(), self.dimension)
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    pub fn atan2(self, x: Self) -> UnitResult<T> {
        self.require_same("atan2", &x)?;
        Ok(self.value.atan2(x.value))
    }
}

impl<T: Numeric + Signed> DynQuantity<T> {
    pub fn abs(self) -> Self {
        Self::new(self.value.abs(), self.dimension)
    }
}

impl DynQuantity<DefaultFloat> {
    /// Build from a textual literal such as `k_meter` or `second`
    pub fn from_literal(value: DefaultFloat, literal: &str) -> UnitResult<Self> {
        let (prefix, unit) = parse_literal(literal)?;
        Ok(Self::new(prefix.apply(value), unit.dimension))
    }
}

impl<T: Numeric + Serialize> DynQuantity<T> {
    pub fn to_json(&self) -> UnitResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: Numeric + DeserializeOwned> DynQuantity<T> {
    /// Parse `{"value": ..., "dimension": {...}}`.
    ///
    /// A `value` that is itself an object is rejected as nesting.
    pub fn from_json(json: &str) -> UnitResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        if raw.get("value").is_some_and(|value| value.is_object()) {
            tracing::debug!(json, "rejected nested quantity");
            return Err(UnitError::illegal_nesting("quantity value must be a number"));
        }
        Ok(serde_json::from_value(raw)?)
    }
}

impl<D: Dimension, T: Numeric> From<Quantity<D, T>> for DynQuantity<T> {
    fn from(quantity: Quantity<D, T>) -> Self {
        Self::new(quantity.value(), D::VECTOR)
    }
}

impl<T: Numeric + Neg<Output = T>> Neg for DynQuantity<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.value, self.dimension)
    }
}

impl<T: Numeric + fmt::Display> fmt::Display for DynQuantity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        DEFAULT_PRINTER.write_unit(f, self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::dims::{Length, Velocity};
    use crate::dimension::strategies::arb_dimension;
    use crate::units::{Ampere, Meter, Second, Speed, Volt, METER, SECOND};
    use proptest::prelude::*;

    fn length(value: DefaultFloat) -> DynQuantity {
        DynQuantity::new(value, METER.dimension())
    }

    fn time(value: DefaultFloat) -> DynQuantity {
        DynQuantity::new(value, SECOND.dimension())
    }

    fn assert_same(actual: DynQuantity, expected: DynQuantity) {
        assert_eq!(actual.value(), expected.value());
        assert_eq!(actual.dimension(), expected.dimension());
    }

    fn arb_value() -> impl Strategy<Value = DefaultFloat> {
        (-1.0e6 as DefaultFloat)..(1.0e6 as DefaultFloat)
    }

    fn arb_divisor() -> impl Strategy<Value = DefaultFloat> {
        (1.0e-3 as DefaultFloat)..(1.0e6 as DefaultFloat)
    }

    fn assert_agrees(static_result: DynQuantity, dynamic_result: UnitResult<DynQuantity>) -> Result<(), TestCaseError> {
        let dynamic_result = dynamic_result.map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(static_result.value(), dynamic_result.value());
        prop_assert_eq!(static_result.dimension(), dynamic_result.dimension());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_static_and_dynamic_products_agree(a in arb_value(), b in arb_divisor()) {
            let (m, s) = (Meter::new(a), Second::new(b));
            assert_agrees(DynQuantity::from(m * s), DynQuantity::from(m).try_mul(DynQuantity::from(s)))?;
            assert_agrees(DynQuantity::from(m / s), DynQuantity::from(m).try_div(DynQuantity::from(s)))?;

            let (v, i) = (Volt::new(a), Ampere::new(b));
            assert_agrees(DynQuantity::from(v * i), DynQuantity::from(v).try_mul(DynQuantity::from(i)))?;
            assert_agrees(DynQuantity::from(v / i), DynQuantity::from(v).try_div(DynQuantity::from(i)))?;
        }

        #[test]
        fn prop_dynamic_dimensions_follow_vector_algebra(
            a in arb_dimension(),
            b in arb_dimension(),
            x in arb_value(),
            y in arb_value()
        ) {
            let (p, q) = (DynQuantity::new(x, a), DynQuantity::new(y, b));
            prop_assert_eq!(p.try_mul(q).unwrap().dimension(), a.combine_mul(b));
            prop_assert_eq!(p.try_div(q).unwrap().dimension(), a.combine_div(b));
            prop_assert_eq!(p.try_add(q).is_ok(), a == b);
            prop_assert_eq!(p.try_eq(&q).is_ok(), a == b);
        }
    }

    #[test]
    fn test_add_same_dimension() {
        let sum = length(2.0).try_add(length(3.0)).unwrap();
        assert_same(sum, length(5.0));
        assert_same(length(2.0).try_sub(length(3.0)).unwrap(), length(-1.0));
    }

    #[test]
    fn test_add_mismatch() {
        let err = length(1.0).try_add(time(1.0)).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
        match err {
            UnitError::DimensionMismatch { operation, lhs, rhs } => {
                assert_eq!(operation, "add");
                assert_eq!(lhs, METER.dimension());
                assert_eq!(rhs, SECOND.dimension());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_compare() {
        assert!(length(1.0).try_eq(&length(1.0)).unwrap());
        assert!(!length(1.0).try_eq(&length(2.0)).unwrap());
        assert_eq!(length(1.0).try_partial_cmp(&length(2.0)).unwrap(), Some(Ordering::Less));
        assert!(length(1.0).try_eq(&time(1.0)).is_err());
        assert!(length(1.0).try_partial_cmp(&time(1.0)).is_err());
    }

    #[test]
    fn test_cross_dimension_comparison_is_error() {
        let (m, s) = (length(1.0), time(1.0));
        for err in [m.try_eq(&s).unwrap_err(), m.try_partial_cmp(&s).unwrap_err()] {
            assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
        }
    }

    #[test]
    fn test_mul_div_combine_dimensions() {
        let v = length(10.0).try_div(time(2.0)).unwrap();
        assert_eq!(v.value(), 5.0);
        assert_eq!(v.dimension(), DimensionVector::new(1, 0, -1, 0, 0, 0, 0));

        let area = length(2.0).try_mul(length(3.0)).unwrap();
        assert_eq!(area.dimension(), DimensionVector::new(2, 0, 0, 0, 0, 0, 0));

        let freq = time(4.0).try_recip().unwrap();
        assert_eq!(freq.value(), 0.25);
        assert_eq!(freq.dimension(), DimensionVector::new(0, 0, -1, 0, 0, 0, 0));
    }

    #[test]
    fn test_exponent_overflow() {
        let big = DynQuantity::new(1.0, DimensionVector::new(127, 0, 0, 0, 0, 0, 0));
        let err = big.try_mul(length(1.0)).unwrap_err();
        assert_eq!(err.error_code(), "EXPONENT_OVERFLOW");

        let low = DynQuantity::new(1.0, DimensionVector::new(-128, 0, 0, 0, 0, 0, 0));
        assert!(low.try_recip().is_err());
    }

    #[test]
    fn test_scale_and_neg() {
        assert_same(length(2.0).scale(3.0), length(6.0));
        assert_same(length(6.0).div_scalar(3.0), length(2.0));
        assert_same(-length(2.0), length(-2.0));
        assert_same(length(-2.0).abs(), length(2.0));
        assert_same(length(2.4).round(), length(2.0));
    }

    #[test]
    fn test_sqrt() {
        let area = length(9.0).try_mul(length(1.0)).unwrap();
        assert_same(area.sqrt().unwrap(), length(3.0));

        let err = length(4.0).sqrt().unwrap_err();
        assert_eq!(
            err,
            UnitError::InvalidRootDimension {
                dimension: METER.dimension()
            }
        );
    }

    #[test]
    fn test_atan2_and_nan() {
        assert_eq!(length(0.0).atan2(length(1.0)).unwrap(), 0.0);
        assert!(length(0.0).atan2(time(1.0)).is_err());
        assert!(length(0.0).div_scalar(0.0).is_nan());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(DynQuantity::scalar(2.5).to_number().unwrap(), 2.5);
        let err = length(2.5).to_number().unwrap_err();
        assert_eq!(err.error_code(), "NON_SCALAR_CONVERSION");
    }

    #[test]
    fn test_static_conversion() {
        let speed: Speed = Speed::new(3.0);
        let dynamic = DynQuantity::from(speed);
        assert_eq!(dynamic.dimension(), DimensionVector::new(1, 0, -1, 0, 0, 0, 0));

        let back: Quantity<Velocity> = dynamic.into_static().unwrap();
        assert_eq!(back, speed);
        assert!(dynamic.into_static::<Length>().is_err());
    }

    #[test]
    fn test_from_literal() {
        let km = DynQuantity::from_literal(1.0, "k_meter").unwrap();
        assert_eq!(km.value(), 1000.0);
        assert_eq!(km.dimension(), METER.dimension());

        let plain = DynQuantity::from_literal(2.0, "second").unwrap();
        assert_same(plain, time(2.0));

        assert_eq!(
            DynQuantity::from_literal(1.0, "q_meter").unwrap_err().error_code(),
            "UNKNOWN_PREFIX"
        );
        assert_eq!(
            DynQuantity::from_literal(1.0, "furlong").unwrap_err().error_code(),
            "UNKNOWN_UNIT"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(length(5.0).try_div(time(1.0)).unwrap().to_string(), "5 m / s");
        assert_eq!(DynQuantity::scalar(2.0).to_string(), "2");
    }

    #[test]
    fn test_json() {
        let json = length(1.5).to_json().unwrap();
        assert_eq!(json, r#"{"value":1.5,"dimension":{"m":1}}"#);

        let parsed: DynQuantity = DynQuantity::from_json(r#"{"value": 2.0, "dimension": {"m": 1, "s": -1}}"#).unwrap();
        assert_eq!(parsed.dimension(), DimensionVector::new(1, 0, -1, 0, 0, 0, 0));
    }

    #[test]
    fn test_json_nesting_rejected() {
        let nested = r#"{"value": {"value": 1.0, "dimension": {"m": 1}}, "dimension": {"s": 1}}"#;
        let err = DynQuantity::<DefaultFloat>::from_json(nested).unwrap_err();
        assert_eq!(err.error_code(), "ILLEGAL_NESTING");

        let err = DynQuantity::<DefaultFloat>::from_json("not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_meter_conversion_matches_static() {
        let m: Meter = Meter::new(4.0);
        assert_same(DynQuantity::from(m), length(4.0));
    }
}
