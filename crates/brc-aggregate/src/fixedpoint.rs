//! Fixed-point money type.
//!
//! # Motivation
//!
//! Prices and collection values are carried at 1e-6 (micros) fixed-point
//! scale in an `i64`. Summing hundreds of `10.0`/`15.0` prices as `f64` is
//! exact today but drifts as soon as a table carries values like `0.1`;
//! integer sums are exact and order-independent, so global totals are the
//! same whichever way owners are iterated.
//!
//! `Micros` wraps the raw `i64` so a price can't be mixed up with a
//! generation rate or an entity count.
//!
//! # Scale
//!
//! 1 currency unit = 1_000_000 Micros. Config and display use `f64` units;
//! conversion happens only at those edges ([`Micros::from_units`],
//! [`Micros::as_units`]).
//!
//! # Arithmetic
//!
//! `Add`, `AddAssign` and `Sum` all saturate at [`Micros::MAX`]; a total
//! never wraps and never panics on overflow.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Price/value scale: micros (1e-6).
pub const MICROS_SCALE: i64 = 1_000_000;

// ---------------------------------------------------------------------------
// Micros newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale.
///
/// There is intentionally no `From<i64>`/`From<f64>`; use [`Micros::new`] for
/// raw micros and [`Micros::from_units`] for config-style decimal prices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    pub const ZERO: Micros = Micros(0);

    pub const MAX: Micros = Micros(i64::MAX);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    /// Whole currency units, e.g. `Micros::units(15)` for a price of 15.0.
    #[inline]
    pub const fn units(whole: i64) -> Self {
        Micros(whole * MICROS_SCALE)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount, rounding to the nearest micro.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the `i64`
    /// micros range.
    pub fn from_units(amount: f64) -> Option<Micros> {
        if !amount.is_finite() {
            return None;
        }
        let scaled = (amount * MICROS_SCALE as f64).round();
        if scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
            return None;
        }
        Some(Micros(scaled as i64))
    }

    /// Lossy conversion back to decimal units, for display and JSON output.
    #[inline]
    pub fn as_units(self) -> f64 {
        self.0 as f64 / MICROS_SCALE as f64
    }

    /// Saturating addition. Clamps at [`Micros::MAX`] on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Micros) -> Micros {
        Micros(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl Add for Micros {
    type Output = Micros;
    #[inline]
    fn add(self, rhs: Micros) -> Micros {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Micros {
    #[inline]
    fn add_assign(&mut self, rhs: Micros) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Micros {
    fn sum<I: Iterator<Item = Micros>>(iter: I) -> Micros {
        iter.fold(Micros::ZERO, Micros::saturating_add)
    }
}

impl<'a> Sum<&'a Micros> for Micros {
    fn sum<I: Iterator<Item = &'a Micros>>(iter: I) -> Micros {
        iter.copied().sum()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Micros {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / MICROS_SCALE;
        let frac = (self.0 % MICROS_SCALE).abs();
        if self.0 < 0 && whole == 0 {
            write!(f, "-{whole}.{frac:06}")
        } else {
            write!(f, "{whole}.{frac:06}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_and_from_units_agree() {
        assert_eq!(Micros::from_units(15.0), Some(Micros::units(15)));
        assert_eq!(Micros::from_units(10.5), Some(Micros::new(10_500_000)));
    }

    #[test]
    fn from_units_rounds_to_nearest_micro() {
        assert_eq!(Micros::from_units(0.1), Some(Micros::new(100_000)));
        assert_eq!(Micros::from_units(0.000_000_6), Some(Micros::new(1)));
    }

    #[test]
    fn from_units_rejects_non_finite_and_huge() {
        assert_eq!(Micros::from_units(f64::NAN), None);
        assert_eq!(Micros::from_units(f64::INFINITY), None);
        assert_eq!(Micros::from_units(1e300), None);
    }

    #[test]
    fn tenths_sum_exactly() {
        let tenth = Micros::from_units(0.1).unwrap();
        let total: Micros = std::iter::repeat(tenth).take(10).sum();
        assert_eq!(total, Micros::units(1));
    }

    #[test]
    fn sum_saturates_instead_of_wrapping() {
        let total: Micros = [Micros::MAX, Micros::units(1)].iter().sum();
        assert_eq!(total, Micros::MAX);
    }

    #[test]
    fn operators_saturate_instead_of_overflowing() {
        assert_eq!(Micros::MAX + Micros::units(1), Micros::MAX);
        assert_eq!(Micros::units(2) + Micros::units(3), Micros::units(5));

        let mut acc = Micros::units(1);
        acc += Micros::MAX;
        assert_eq!(acc, Micros::MAX);
    }

    #[test]
    fn empty_sum_is_zero() {
        let total: Micros = Vec::<Micros>::new().into_iter().sum();
        assert_eq!(total, Micros::ZERO);
    }

    #[test]
    fn display_formats_with_six_decimal_places() {
        assert_eq!(Micros::new(25_000_000).to_string(), "25.000000");
        assert_eq!(Micros::new(1_500_000).to_string(), "1.500000");
    }

    #[test]
    fn as_units_round_trips_simple_prices() {
        assert_eq!(Micros::units(25).as_units(), 25.0);
    }
}
