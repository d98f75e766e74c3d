//! Price lookup.
//!
//! Exact-name table with a single fallback. [`price_of`] is the only place a
//! price is read, so the fallback can't be applied in one view and forgotten
//! in another.

use std::collections::BTreeMap;

use crate::Micros;

/// Price applied to any entity name missing from the table.
pub const DEFAULT_FALLBACK_PRICE: Micros = Micros::units(10);

/// Price table build failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceTableError {
    /// A table entry is zero, negative, or not representable as micros.
    InvalidPrice { name: String, price: f64 },
    /// The fallback price is zero, negative, or not representable.
    InvalidFallback { price: f64 },
}

impl std::fmt::Display for PriceTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrice { name, price } => {
                write!(f, "price for '{name}' must be a positive amount, got {price}")
            }
            Self::InvalidFallback { price } => {
                write!(f, "fallback price must be a positive amount, got {price}")
            }
        }
    }
}

impl std::error::Error for PriceTableError {}

/// Entity name -> unit price, plus the fallback for unknown names.
///
/// Names match exactly: no trimming, no case folding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTable {
    prices: BTreeMap<String, Micros>,
    fallback: Micros,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_PRICE)
    }
}

impl PriceTable {
    /// Empty table with the given fallback.
    pub fn new(fallback: Micros) -> Self {
        Self {
            prices: BTreeMap::new(),
            fallback,
        }
    }

    /// Builder-style insert.
    pub fn with_price(mut self, name: impl Into<String>, price: Micros) -> Self {
        self.prices.insert(name.into(), price);
        self
    }

    /// Build from decimal prices as they appear in config.
    ///
    /// # Errors
    /// Every price, including the fallback, must be finite and > 0.
    pub fn from_units<I, S>(entries: I, fallback: f64) -> Result<Self, PriceTableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let fallback_micros = Micros::from_units(fallback)
            .filter(|m| m.is_positive())
            .ok_or(PriceTableError::InvalidFallback { price: fallback })?;

        let mut table = Self::new(fallback_micros);
        for (name, price) in entries {
            let name = name.into();
            match Micros::from_units(price).filter(|m| m.is_positive()) {
                Some(m) => {
                    table.prices.insert(name, m);
                }
                None => return Err(PriceTableError::InvalidPrice { name, price }),
            }
        }
        Ok(table)
    }

    pub fn fallback(&self) -> Micros {
        self.fallback
    }

    /// Exact lookup without the fallback.
    pub fn get(&self, name: &str) -> Option<Micros> {
        self.prices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Table price for `name`, or the table's fallback when the name is unknown.
pub fn price_of(name: &str, table: &PriceTable) -> Micros {
    table.get(name).unwrap_or(table.fallback)
}
