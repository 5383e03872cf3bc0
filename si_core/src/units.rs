//! # Unit Catalog
//!
//! Named SI units and prefixed literal constructors. Every unit is declared by
//! one line of the `si_units!` table, which expands to:
//!
//! - a type alias binding the dimension (`Meter<T = DefaultFloat>`),
//! - a constant equal to one of that unit (`METER`),
//! - a literal constructor per prefix (`literals::meter`, `literals::k::meter`,
//!   `literals::mu::meter`, ...),
//! - an entry in [`CATALOG`] for run-time lookup.
//!
//! New units only need a new table line; the algebra is untouched.
//!
//! ## Literal grammar
//!
//! A literal is written `<prefix>_<unit>` (`k_meter`, `mu_second`) or just
//! `<unit>`. In Rust code the prefix becomes a module of [`literals`]; in text
//! it is parsed by [`parse_literal`].
//!
//! ## Example
//!
//! ```rust
//! use si_core::units::{literals, Meter, METER};
//!
//! let run: Meter = literals::k::meter(1.0);
//! assert_eq!(run, METER * 1000.0);
//!
//! let hair = literals::mu::meter(70.0);
//! assert!(hair < literals::m::meter(1.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::dimension::{dims, Dimension, DimensionVector};
use crate::errors::{UnitError, UnitResult};
use crate::numeric::DefaultFloat;
use crate::quantity::Quantity;

// ============================================================================
// Prefixes
// ============================================================================

/// SI decimal prefixes, from 1e24 down to 1e-24
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deca,
    /// No prefix (factor 1)
    Unscaled,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

impl Prefix {
    /// All prefixes, largest first
    pub const ALL: [Prefix; 21] = [
        Prefix::Yotta,
        Prefix::Zetta,
        Prefix::Exa,
        Prefix::Peta,
        Prefix::Tera,
        Prefix::Giga,
        Prefix::Mega,
        Prefix::Kilo,
        Prefix::Hecto,
        Prefix::Deca,
        Prefix::Unscaled,
        Prefix::Deci,
        Prefix::Centi,
        Prefix::Milli,
        Prefix::Micro,
        Prefix::Nano,
        Prefix::Pico,
        Prefix::Femto,
        Prefix::Atto,
        Prefix::Zepto,
        Prefix::Yocto,
    ];

    /// Symbol used in literals (`k`, `mu`, `da`, ...); empty when unscaled
    pub fn symbol(&self) -> &'static str {
        match self {
            Prefix::Yotta => "Y",
            Prefix::Zetta => "Z",
            Prefix::Exa => "E",
            Prefix::Peta => "P",
            Prefix::Tera => "T",
            Prefix::Giga => "G",
            Prefix::Mega => "M",
            Prefix::Kilo => "k",
            Prefix::Hecto => "h",
            Prefix::Deca => "da",
            Prefix::Unscaled => "",
            Prefix::Deci => "d",
            Prefix::Centi => "c",
            Prefix::Milli => "m",
            Prefix::Micro => "mu",
            Prefix::Nano => "n",
            Prefix::Pico => "p",
            Prefix::Femto => "f",
            Prefix::Atto => "a",
            Prefix::Zepto => "z",
            Prefix::Yocto => "y",
        }
    }

    /// Power of ten
    pub fn exponent(&self) -> i32 {
        match self {
            Prefix::Yotta => 24,
            Prefix::Zetta => 21,
            Prefix::Exa => 18,
            Prefix::Peta => 15,
            Prefix::Tera => 12,
            Prefix::Giga => 9,
            Prefix::Mega => 6,
            Prefix::Kilo => 3,
            Prefix::Hecto => 2,
            Prefix::Deca => 1,
            Prefix::Unscaled => 0,
            Prefix::Deci => -1,
            Prefix::Centi => -2,
            Prefix::Milli => -3,
            Prefix::Micro => -6,
            Prefix::Nano => -9,
            Prefix::Pico => -12,
            Prefix::Femto => -15,
            Prefix::Atto => -18,
            Prefix::Zepto => -21,
            Prefix::Yocto => -24,
        }
    }

    /// Scale factor. Written out as literals so every factor is the closest
    /// `f64` to the exact power of ten.
    pub fn multiplier(&self) -> f64 {
        match self {
            Prefix::Yotta => 1e24,
            Prefix::Zetta => 1e21,
            Prefix::Exa => 1e18,
            Prefix::Peta => 1e15,
            Prefix::Tera => 1e12,
            Prefix::Giga => 1e9,
            Prefix::Mega => 1e6,
            Prefix::Kilo => 1e3,
            Prefix::Hecto => 1e2,
            Prefix::Deca => 1e1,
            Prefix::Unscaled => 1.0,
            Prefix::Deci => 1e-1,
            Prefix::Centi => 1e-2,
            Prefix::Milli => 1e-3,
            Prefix::Micro => 1e-6,
            Prefix::Nano => 1e-9,
            Prefix::Pico => 1e-12,
            Prefix::Femto => 1e-15,
            Prefix::Atto => 1e-18,
            Prefix::Zepto => 1e-21,
            Prefix::Yocto => 1e-24,
        }
    }

    /// Look up a prefix by its literal symbol
    ///
    /// ```rust
    /// use si_core::units::Prefix;
    ///
    /// assert_eq!(Prefix::from_symbol("mu"), Some(Prefix::Micro));
    /// assert_eq!(Prefix::from_symbol("q"), None);
    /// ```
    pub fn from_symbol(symbol: &str) -> Option<Prefix> {
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }

    /// Scale a bare number. The product is formed in `f64` and then narrowed
    /// to the default numeric type.
    pub fn apply(self, value: DefaultFloat) -> DefaultFloat {
        (f64::from(value) * self.multiplier()) as DefaultFloat
    }

    /// Scale a bare number and wrap it in dimension `D`
    pub fn literal<D: Dimension>(self, value: DefaultFloat) -> Quantity<D> {
        Quantity::new(self.apply(value))
    }
}

// ============================================================================
// Catalog entries
// ============================================================================

/// Run-time description of a catalog unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitEntry {
    /// Literal name (`meter`)
    pub name: &'static str,
    /// Type alias name (`Meter`)
    pub type_name: &'static str,
    pub dimension: DimensionVector,
    /// Printer override symbol, if the unit has one
    pub symbol: Option<&'static str>,
}

/// Look up a catalog unit by literal name
pub fn lookup_unit(name: &str) -> Option<&'static UnitEntry> {
    CATALOG.iter().find(|unit| unit.name == name)
}

/// Split a literal such as `k_meter` into its prefix and unit.
///
/// A bare unit name has no prefix.
///
/// ```rust
/// use si_core::units::{parse_literal, Prefix};
///
/// let (prefix, unit) = parse_literal("k_meter").unwrap();
/// assert_eq!(prefix, Prefix::Kilo);
/// assert_eq!(unit.type_name, "Meter");
///
/// assert!(parse_literal("k_furlong").is_err());
/// ```
pub fn parse_literal(literal: &str) -> UnitResult<(Prefix, &'static UnitEntry)> {
    if let Some(unit) = lookup_unit(literal) {
        return Ok((Prefix::Unscaled, unit));
    }
    let Some((symbol, name)) = literal.split_once('_') else {
        tracing::debug!(literal, "literal names no catalog unit");
        return Err(UnitError::unknown_unit(literal));
    };
    let unit = lookup_unit(name).ok_or_else(|| UnitError::unknown_unit(name))?;
    let prefix = Prefix::from_symbol(symbol).ok_or_else(|| UnitError::unknown_prefix(symbol))?;
    Ok((prefix, unit))
}

// ============================================================================
// Unit declarations (macro to reduce boilerplate)
// ============================================================================

macro_rules! prefix_literals {
    (@unit $variant:ident { $($Name:ident $name:ident)* }) => {
        $(
            pub fn $name(value: $crate::numeric::DefaultFloat) -> $crate::units::$Name {
                $crate::units::Prefix::$variant.literal(value)
            }
        )*
    };
    ($units:tt $($module:ident => $variant:ident),* $(,)?) => {
        $(
            #[allow(non_snake_case)]
            pub mod $module {
                prefix_literals!(@unit $variant $units);
            }
        )*
    };
}

macro_rules! si_units {
    ($($(#[$meta:meta])* $Name:ident, $name:ident, $CONST:ident => $dim:ty, $symbol:expr;)*) => {
        $(
            $(#[$meta])*
            pub type $Name<T = DefaultFloat> = Quantity<$dim, T>;
        )*

        $(
            #[doc = concat!("One ", stringify!($name), ".")]
            pub const $CONST: $Name = Quantity::new(1.0);
        )*

        /// Every catalog unit, in declaration order
        pub static CATALOG: &[UnitEntry] = &[
            $(
                UnitEntry {
                    name: stringify!($name),
                    type_name: stringify!($Name),
                    dimension: <$dim as Dimension>::VECTOR,
                    symbol: $symbol,
                },
            )*
        ];

        /// Literal constructors. `literals::meter(v)` is `v` meters,
        /// `literals::k::meter(v)` is `v` kilometers, and so on for every
        /// prefix module.
        pub mod literals {
            use crate::numeric::DefaultFloat;

            $(
                pub fn $name(value: DefaultFloat) -> super::$Name {
                    super::Prefix::Unscaled.literal(value)
                }
            )*

            prefix_literals! {
                { $($Name $name)* }
                Y => Yotta,
                Z => Zetta,
                E => Exa,
                P => Peta,
                T => Tera,
                G => Giga,
                M => Mega,
                k => Kilo,
                h => Hecto,
                da => Deca,
                d => Deci,
                c => Centi,
                m => Milli,
                mu => Micro,
                n => Nano,
                p => Pico,
                f => Femto,
                a => Atto,
                z => Zepto,
                y => Yocto,
            }
        }
    };
}

si_units! {
    // Base units
    /// Dimensionless number
    Scalar, scalar, SCALAR => dims::Dimensionless, None;
    /// Length in meters
    Meter, meter, METER => dims::Length, None;
    /// Mass in kilograms
    Kilogram, kilogram, KILOGRAM => dims::Mass, None;
    /// Time in seconds
    Second, second, SECOND => dims::Time, None;
    /// Electric current in amperes
    Ampere, ampere, AMPERE => dims::Current, None;
    /// Thermodynamic temperature in kelvin
    Kelvin, kelvin, KELVIN => dims::Temperature, None;
    /// Amount of substance in moles
    Mole, mole, MOLE => dims::Amount, None;
    /// Luminous intensity in candela
    Candela, candela, CANDELA => dims::LuminousIntensity, None;

    // Derived units
    /// Speed in meters per second
    Speed, speed, SPEED => dims::Velocity, None;
    /// Acceleration in meters per second squared
    Acceleration, acceleration, ACCELERATION => dims::Acceleration, None;
    /// Electric potential in volts
    Volt, volt, VOLT => dims::Voltage, Some("V");
    /// Frequency in hertz
    Hertz, hertz, HERTZ => dims::Frequency, None;
    /// Force in newtons
    Newton, newton, NEWTON => dims::Force, Some("N");
    /// Energy in joules
    Joule, joule, JOULE => dims::Energy, Some("J");
    /// Power in watts
    Watt, watt, WATT => dims::Power, Some("W");
    /// Pressure in pascals
    Pascal, pascal, PASCAL => dims::Pressure, Some("Pa");
    /// Electric charge in coulombs
    Coulomb, coulomb, COULOMB => dims::Charge, Some("C");
    /// Electric resistance in ohms
    Ohm, ohm, OHM => dims::Resistance, Some("Ω");
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefix_scaling() {
        assert_eq!(literals::k::meter(1.0), METER * 1000.0);
        assert_relative_eq!(literals::m::meter(1.0).value(), (METER * 0.001).value());
        assert_relative_eq!(literals::mu::second(3.0).value(), 3e-6);
        assert_relative_eq!(literals::da::meter(2.0).value(), 20.0);
        assert_eq!(literals::meter(4.5).value(), 4.5);
    }

    #[test]
    fn test_prefixed_literals_keep_dimension() {
        let voltage: Volt = literals::M::volt(2.0);
        assert_eq!(voltage.dimension(), DimensionVector::new(2, 1, -3, -1, 0, 0, 0));
        let ratio: Scalar = literals::k::scalar(1.0);
        assert_eq!(ratio.value(), 1000.0);
    }

    #[test]
    fn test_prefix_table() {
        assert_eq!(Prefix::ALL.len(), 21);
        for prefix in Prefix::ALL {
            assert_relative_eq!(prefix.multiplier(), 10f64.powi(prefix.exponent()), max_relative = 1e-12);
            assert_eq!(Prefix::from_symbol(prefix.symbol()), Some(prefix));
        }
        assert!(Prefix::ALL.windows(2).all(|w| w[0].exponent() > w[1].exponent()));
    }

    #[test]
    fn test_constants_are_one() {
        for value in [
            SCALAR.value(),
            METER.value(),
            KILOGRAM.value(),
            SECOND.value(),
            AMPERE.value(),
            KELVIN.value(),
            MOLE.value(),
            CANDELA.value(),
            VOLT.value(),
        ] {
            assert_eq!(value, 1.0);
        }
    }

    #[test]
    fn test_derived_units_match_algebra() {
        let speed: Speed = METER / SECOND;
        let acceleration: Acceleration = speed / SECOND;
        let force: Newton = KILOGRAM * acceleration;
        let energy: Joule = force * METER;
        let power: Watt = energy / SECOND;
        let voltage: Volt = power / AMPERE;
        let resistance: Ohm = voltage / AMPERE;
        let pressure: Pascal = force / (METER * METER);
        let charge: Coulomb = AMPERE * SECOND;
        let frequency: Hertz = SCALAR / SECOND;

        assert_eq!(resistance.value(), 1.0);
        assert_eq!(pressure.value(), 1.0);
        assert_eq!(charge.value(), 1.0);
        assert_eq!(frequency.value(), 1.0);
    }

    #[test]
    fn test_catalog() {
        assert_eq!(CATALOG.len(), 18);
        let volt = lookup_unit("volt").unwrap();
        assert_eq!(volt.type_name, "Volt");
        assert_eq!(volt.symbol, Some("V"));
        assert_eq!(volt.dimension, VOLT.dimension());
        assert!(lookup_unit("furlong").is_none());
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, unit) in CATALOG.iter().enumerate() {
            assert!(CATALOG[i + 1..].iter().all(|other| other.name != unit.name));
        }
    }

    #[test]
    fn test_parse_literal() {
        let (prefix, unit) = parse_literal("mu_second").unwrap();
        assert_eq!(prefix, Prefix::Micro);
        assert_eq!(unit.name, "second");

        let (prefix, unit) = parse_literal("meter").unwrap();
        assert_eq!(prefix, Prefix::Unscaled);
        assert_eq!(unit.name, "meter");

        let (prefix, _) = parse_literal("da_meter").unwrap();
        assert_eq!(prefix, Prefix::Deca);
    }

    #[test]
    fn test_parse_literal_errors() {
        assert_eq!(parse_literal("q_meter").unwrap_err(), UnitError::unknown_prefix("q"));
        assert_eq!(parse_literal("k_furlong").unwrap_err(), UnitError::unknown_unit("furlong"));
        assert_eq!(parse_literal("furlong").unwrap_err(), UnitError::unknown_unit("furlong"));
    }

    #[test]
    fn test_prefix_serialization() {
        let json = serde_json::to_string(&Prefix::Kilo).unwrap();
        assert_eq!(json, "\"Kilo\"");
        let roundtrip: Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Prefix::Kilo);
    }
}
