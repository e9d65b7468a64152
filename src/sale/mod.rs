//! Sales: loading, statistics, brand filters and the views of the sales screen.

mod core;
mod draft;
mod filter;
mod session;
mod statistics;
mod view;

pub use self::core::{NO_BRAND_LABEL, ProductLabel, Sale, SaleBuilder, SaleStatus};
pub use draft::{NewSale, SaleDraft};
pub use filter::{ALL_FILTER_LABEL, FilterKey, FilterSelection, apply_filter, derive_brands};
pub use session::{LoadState, LoadTicket, SalesSession, Snapshot};
pub use statistics::{SaleStatistics, compute_statistics};
pub use view::{FilterChip, SaleDetail, SaleRow, SalesDashboard, StatusBadge, TopProductCard};
