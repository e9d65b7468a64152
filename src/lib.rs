//! Venmol is the business core of a small store-management app: sales,
//! inventory, clients and suppliers.
//!
//! This library turns documents fetched from the remote store into typed
//! records, aggregates sales into statistics and brand filters, and builds
//! the view models that the display layer renders.

#![warn(missing_docs)]

mod client;
mod config;
mod contact;
mod currency;
mod product;
mod record;
mod sale;
mod supplier;
mod timezone;

pub use client::Client;
pub use config::{DEFAULT_LOW_STOCK_THRESHOLD, SalesConfig};
pub use contact::{ContactDraft, NewContact};
pub use currency::format_currency;
pub use product::{
    BrandGroup, InventoryStatistics, NewProduct, Product, ProductDraft, group_by_brand,
};
pub use record::{Document, parse_collection};
pub use sale::{
    ALL_FILTER_LABEL, FilterChip, FilterKey, FilterSelection, LoadState, LoadTicket,
    NO_BRAND_LABEL, NewSale, ProductLabel, Sale, SaleBuilder, SaleDetail, SaleDraft, SaleRow,
    SaleStatistics, SaleStatus, SalesDashboard, SalesSession, Snapshot, StatusBadge,
    TopProductCard, apply_filter, compute_statistics, derive_brands,
};
pub use supplier::Supplier;
pub use timezone::get_local_offset;

/// The errors that may occur in the application.
///
/// The aggregation functions never fail; these errors come from the
/// operations around them (selection, loading, drafts and configuration).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A brand filter was selected that is not in the current brand set.
    #[error("the brand \"{0}\" is not in the current list of sales")]
    UnknownBrand(String),

    /// A load finished after a newer load had already been started.
    ///
    /// The result of the stale load must be discarded by the caller.
    #[error("load {ticket} is stale, the latest load is {latest}")]
    StaleLoad {
        /// The generation of the load that finished.
        ticket: u64,
        /// The generation of the most recently started load.
        latest: u64,
    },

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A new sale was submitted without choosing a client.
    #[error("a client must be selected")]
    MissingClient,

    /// A new sale was submitted without choosing a product.
    #[error("a product must be selected")]
    MissingProduct,

    /// A new sale was submitted with a quantity of zero.
    #[error("the quantity must be greater than zero")]
    InvalidQuantity,

    /// The computed total of a new sale was not positive.
    ///
    /// This happens when the chosen product has no price.
    #[error("the total {0} must be greater than zero")]
    InvalidTotal(f64),

    /// A new client, supplier or product was submitted without a name.
    #[error("the name is required")]
    MissingName,

    /// A new client or supplier was submitted without a phone number.
    #[error("the phone number is required")]
    MissingPhone,

    /// A new product was submitted without a price.
    #[error("the price is required")]
    MissingPrice,

    /// A new product was submitted without a quantity.
    #[error("the quantity is required")]
    MissingQuantity,

    /// The price or quantity of a new product could not be parsed.
    #[error("\"{0}\" is not a valid number")]
    InvalidNumber(String),

    /// The price of a new product was not greater than zero.
    #[error("the price {0} must be greater than zero")]
    InvalidPrice(f64),

    /// The quantity of a new product was below zero.
    #[error("the quantity {0} cannot be negative")]
    NegativeQuantity(i64),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An exported collection file could not be read or parsed.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not read records: {0}")]
    InvalidRecordFile(String),
}
