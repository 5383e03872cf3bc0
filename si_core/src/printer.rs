//! # Printer
//!
//! Renders a quantity as its value followed by its unit:
//!
//! - one token per base dimension with a non-zero exponent, in the order
//!   m, kg, s, A, K, Mol, Cd;
//! - exponent 1 prints ` m`, exponent -1 prints ` / m`, anything else ` m^e`;
//! - if the dimension has an override symbol (volt has `V`), the override
//!   replaces all of the tokens.
//!
//! [`DEFAULT_PRINTER`] carries the overrides declared in the unit catalog and
//! is what `Display` uses. Build a [`Printer`] to use a different table.
//!
//! ## Example
//!
//! ```rust
//! use si_core::units::{Speed, Volt};
//!
//! assert_eq!(Speed::new(5.0).to_string(), "5 m / s");
//! assert_eq!(Volt::new(2.0).to_string(), "2 V");
//! assert_eq!(format!("{:.2}", Speed::new(1.0 / 3.0)), "0.33 m / s");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::dimension::{Dimension, DimensionVector};
use crate::dynamic::DynQuantity;
use crate::numeric::Numeric;
use crate::quantity::Quantity;
use crate::units::CATALOG;

/// Printer built from the catalog's override symbols
pub static DEFAULT_PRINTER: Lazy<Printer> = Lazy::new(|| {
    let printer = Printer::catalog();
    tracing::trace!(overrides = printer.overrides.len(), "default printer initialized");
    printer
});

/// One element of a rendered unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitToken<'a> {
    /// Exponent 1: `m`
    Symbol(&'static str),
    /// Exponent -1: `/ m`
    Reciprocal(&'static str),
    /// Any other exponent: `m^2`
    Power(&'static str, i8),
    /// Replacement symbol for the whole unit: `V`
    Override(&'a str),
}

impl fmt::Display for UnitToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitToken::Symbol(symbol) => f.write_str(symbol),
            UnitToken::Reciprocal(symbol) => write!(f, "/ {}", symbol),
            UnitToken::Power(symbol, exp) => write!(f, "{}^{}", symbol, exp),
            UnitToken::Override(symbol) => f.write_str(symbol),
        }
    }
}

/// Unit renderer with an override table keyed by dimension
#[derive(Debug, Clone, Default)]
pub struct Printer {
    overrides: HashMap<DimensionVector, Cow<'static, str>>,
}

impl Printer {
    /// Printer without overrides: every unit is decomposed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Printer with the override symbols declared in the unit catalog
    pub fn catalog() -> Self {
        CATALOG
            .iter()
            .filter_map(|unit| unit.symbol.map(|symbol| (unit.dimension, symbol)))
            .fold(Self::empty(), |printer, (dimension, symbol)| {
                printer.with_override(dimension, symbol)
            })
    }

    /// Register a symbol replacing the decomposed form of `dimension`
    ///
    /// ```rust
    /// use si_core::printer::Printer;
    /// use si_core::units::{Hertz, HERTZ};
    ///
    /// let printer = Printer::catalog().with_override(HERTZ.dimension(), "Hz");
    /// assert_eq!(printer.format(&Hertz::new(50.0)), "50 Hz");
    /// ```
    pub fn with_override(mut self, dimension: DimensionVector, symbol: impl Into<Cow<'static, str>>) -> Self {
        self.overrides.insert(dimension, symbol.into());
        self
    }

    /// The override registered for `dimension`, if any
    pub fn override_for(&self, dimension: DimensionVector) -> Option<&str> {
        self.overrides.get(&dimension).map(|symbol| symbol.as_ref())
    }

    /// The unit of `dimension` as a token sequence
    pub fn tokens(&self, dimension: DimensionVector) -> Vec<UnitToken<'_>> {
        if let Some(symbol) = self.override_for(dimension) {
            return vec![UnitToken::Override(symbol)];
        }
        dimension
            .nonzero()
            .map(|(symbol, exp)| match exp {
                1 => UnitToken::Symbol(symbol),
                -1 => UnitToken::Reciprocal(symbol),
                _ => UnitToken::Power(symbol, exp),
            })
            .collect()
    }

    /// Write the unit part (each token preceded by a space)
    pub fn write_unit<W: fmt::Write>(&self, out: &mut W, dimension: DimensionVector) -> fmt::Result {
        for token in self.tokens(dimension) {
            write!(out, " {}", token)?;
        }
        Ok(())
    }

    /// The unit part alone, e.g. `" m / s"`; empty for a scalar
    pub fn unit_string(&self, dimension: DimensionVector) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_unit(&mut out, dimension);
        out
    }

    /// Render a quantity
    pub fn format<D, T>(&self, quantity: &Quantity<D, T>) -> String
    where
        D: Dimension,
        T: Numeric + fmt::Display,
    {
        format!("{}{}", quantity.value(), self.unit_string(D::VECTOR))
    }

    /// Render a run-time quantity
    pub fn format_dynamic<T: Numeric + fmt::Display>(&self, quantity: &DynQuantity<T>) -> String {
        format!("{}{}", quantity.value(), self.unit_string(quantity.dimension()))
    }
}
