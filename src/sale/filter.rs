//! Brand filters for the list of sales.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Error;

use super::core::Sale;

/// The label of the chip that shows every sale.
pub const ALL_FILTER_LABEL: &str = "Todas";

/// Which sales to show in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FilterKey {
    /// Show every sale.
    #[default]
    All,
    /// Show only the sales of one brand.
    Brand(String),
}

impl FilterKey {
    /// The text shown on the chip for this key.
    pub fn label(&self) -> &str {
        match self {
            FilterKey::All => ALL_FILTER_LABEL,
            FilterKey::Brand(brand) => brand,
        }
    }
}

/// The distinct brands of `sales`, sorted ascending.
///
/// Sales without a brand are listed under [NO_BRAND_LABEL](super::NO_BRAND_LABEL).
/// The "all" entry is not included, callers add it in front when showing chips.
pub fn derive_brands(sales: &[Sale]) -> Vec<String> {
    sales
        .iter()
        .map(Sale::brand_label)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// The sales that match `key`, in their original order.
///
/// Brands are compared exactly, including case.
pub fn apply_filter<'a>(sales: &'a [Sale], key: &FilterKey) -> Vec<&'a Sale> {
    match key {
        FilterKey::All => sales.iter().collect(),
        FilterKey::Brand(brand) => sales
            .iter()
            .filter(|sale| sale.brand_label() == brand)
            .collect(),
    }
}

/// The brand filter chosen by the user for one list of sales.
///
/// Starts with every sale selected. The selected key is always either
/// [FilterKey::All] or one of the brands of the sales it was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    brands: Vec<String>,
    key: FilterKey,
}

impl FilterSelection {
    /// Create a selection for `sales` with every sale selected.
    pub fn new(sales: &[Sale]) -> Self {
        Self {
            brands: derive_brands(sales),
            key: FilterKey::All,
        }
    }

    /// The brands that can be selected, sorted ascending.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// The selected key.
    pub fn key(&self) -> &FilterKey {
        &self.key
    }

    /// Select every sale.
    pub fn select_all(&mut self) {
        self.key = FilterKey::All;
    }

    /// Select the sales of `brand`.
    ///
    /// # Errors
    /// Returns [Error::UnknownBrand] if `brand` is not one of [FilterSelection::brands].
    /// The selection is left unchanged.
    pub fn select_brand(&mut self, brand: &str) -> Result<(), Error> {
        if self
            .brands
            .binary_search_by(|candidate| candidate.as_str().cmp(brand))
            .is_err()
        {
            return Err(Error::UnknownBrand(brand.to_owned()));
        }

        self.key = FilterKey::Brand(brand.to_owned());
        Ok(())
    }
}
