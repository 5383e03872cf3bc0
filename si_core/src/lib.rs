//! # si_core - Dimension-Checked SI Quantities
//!
//! `si_core` tags numbers with the exponents of the seven SI base dimensions
//! (length, mass, time, electric current, temperature, amount of substance,
//! luminous intensity). The dimension lives in the type, so adding a length to
//! a mass or taking the square root of a length is rejected by the compiler,
//! and a quantity costs nothing more than its number at run time.
//!
//! ## Design Philosophy
//!
//! - **Zero-cost**: `Quantity<D, T>` has the layout of `T`
//! - **Compile-time checks**: dimension errors are type errors
//! - **Run-time fallback**: [`DynQuantity`] performs the same checks on values
//!   whose dimension comes from input, and reports structured errors
//! - **JSON-First**: quantities, dimensions and errors are serializable
//!
//! ## Quick Start
//!
//! ```rust
//! use si_core::units::{literals, Meter, Second, Speed, Volt, AMPERE, OHM};
//!
//! let distance: Meter = literals::k::meter(1.5);
//! let time: Second = literals::second(60.0);
//! let speed: Speed = distance / time;
//! assert_eq!(speed.to_string(), "25 m / s");
//!
//! let voltage: Volt = AMPERE * 2.0 * OHM;
//! assert_eq!(voltage.to_string(), "2 V");
//! ```
//!
//! ## Modules
//!
//! - [`dimension`] - Run-time dimension vectors and type-level dimensions
//! - [`quantity`] - The statically checked quantity type
//! - [`units`] - Unit catalog, constants, prefixes and literals
//! - [`math`] - `sqrt`, `abs`, `round`, `is_nan`, `atan2`
//! - [`printer`] - Unit rendering with override symbols
//! - [`dynamic`] - Run-time checked quantities
//! - [`numeric`] - Number types that can back a quantity
//! - [`errors`] - Structured error types

pub mod dimension;
pub mod dynamic;
pub mod errors;
pub mod math;
pub mod numeric;
pub mod printer;
pub mod quantity;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use dimension::{dims, Dim, Dimension, DimensionVector};
pub use dynamic::DynQuantity;
pub use errors::{UnitError, UnitResult};
pub use numeric::{DefaultFloat, Numeric};
pub use printer::{Printer, DEFAULT_PRINTER};
pub use quantity::Quantity;
pub use units::Prefix;
