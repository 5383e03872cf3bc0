//! # Numeric Backend
//!
//! The magnitude of a quantity is stored in a plain number type. Any type
//! implementing [`Numeric`] can back a [`Quantity`](crate::Quantity); the
//! primitive integer and float types are provided.
//!
//! `Numeric` is never implemented for `Quantity` or
//! [`DynQuantity`](crate::DynQuantity), so a quantity of quantities cannot be
//! named:
//!
//! ```compile_fail
//! use si_core::{dims, Quantity};
//! use si_core::units::Meter;
//!
//! let nested: Quantity<dims::Length, Meter> = todo!();
//! ```
//!
//! ## Default type
//!
//! Literals, catalog constants and default type parameters use
//! [`DefaultFloat`]: `f64`, or `f32` when the `f32` cargo feature is enabled.

use num_traits::Num;

/// Numbers that can back a quantity.
pub trait Numeric: Num + Copy + PartialOrd + 'static {}

macro_rules! impl_numeric {
    ($($t:ty),* $(,)?) => {
        $(impl Numeric for $t {})*
    };
}

impl_numeric!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Default numeric type for literals and catalog constants
#[cfg(not(feature = "f32"))]
pub type DefaultFloat = f64;

/// Default numeric type for literals and catalog constants
#[cfg(feature = "f32")]
pub type DefaultFloat = f32;
