//! View models for the sales screen.
//!
//! Everything here is already formatted for display, so the display layer
//! only has to place the strings.

use serde::Serialize;
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::currency::format_currency;

use super::{
    core::{Sale, SaleStatus},
    filter::FilterKey,
    session::{LoadState, SalesSession},
};

const SECTION_TITLE: &str = "Historial de Ventas";

const ROW_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day] [month repr:short]");
const DETAIL_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day] [month repr:short] [year]");

/// A filter chip above the list of sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChip {
    /// The text on the chip.
    pub label: String,
    /// The filter to select when the chip is tapped.
    pub key: FilterKey,
    /// Whether this chip's filter is the selected one.
    pub checked: bool,
}

/// The card that highlights the best-selling product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProductCard {
    /// The product name.
    pub name: String,
    /// How many units were sold, e.g. "4 unidades vendidas".
    pub units_sold: String,
}

/// The badge that shows the state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBadge {
    /// The sale is completed.
    Completed,
    /// The sale is pending.
    Pending,
    /// The sale was cancelled or has an unknown status.
    Cancelled,
}

impl StatusBadge {
    /// The badge for `status`.
    pub fn for_status(status: &SaleStatus) -> Self {
        match status {
            SaleStatus::Completed => StatusBadge::Completed,
            SaleStatus::Pending => StatusBadge::Pending,
            SaleStatus::Cancelled | SaleStatus::Other(_) => StatusBadge::Cancelled,
        }
    }

    /// The symbol shown on the badge.
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusBadge::Completed => "✓",
            StatusBadge::Pending => "⏳",
            StatusBadge::Cancelled => "✗",
        }
    }
}

/// One sale in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRow {
    /// The store ID, for opening the detail view.
    pub id: String,
    /// The first letter of the client's name in upper case, "?" if there is no name.
    pub avatar: String,
    /// The client's name.
    pub client: String,
    /// Day and month of the sale, e.g. "05 Mar".
    pub date: String,
    /// The state of the sale.
    pub badge: StatusBadge,
    /// The product name without the brand.
    pub product: String,
    /// The brand, or the fallback when the product has none.
    pub brand: String,
    /// e.g. "Cantidad: 3".
    pub quantity: String,
    /// The total in dollars.
    pub total: String,
}

impl SaleRow {
    /// Create the row for `sale`, showing dates at `local_offset`.
    pub fn new(sale: &Sale, local_offset: UtcOffset) -> Self {
        Self {
            id: sale.id().to_owned(),
            avatar: avatar(sale.client()),
            client: sale.client().to_owned(),
            date: format_date(sale.timestamp(), local_offset, ROW_DATE_FORMAT),
            badge: StatusBadge::for_status(sale.status()),
            product: sale.product().name().to_owned(),
            brand: sale.brand_label().to_owned(),
            quantity: format!("Cantidad: {}", sale.quantity()),
            total: format_currency(sale.total()),
        }
    }
}

/// The full view of a single sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleDetail {
    /// The first letter of the client's name in upper case, "?" if there is no name.
    pub avatar: String,
    /// The client's name.
    pub client: String,
    /// The product name without the brand.
    pub product: String,
    /// The brand, or the fallback when the product has none.
    pub brand: String,
    /// The number of units sold.
    pub quantity: String,
    /// The total divided by the quantity, in dollars.
    pub unit_price: String,
    /// The total in dollars.
    pub total: String,
    /// e.g. "05 Mar 2024".
    pub date: String,
}

impl SaleDetail {
    /// Create the detail view for `sale`, showing the date at `local_offset`.
    pub fn new(sale: &Sale, local_offset: UtcOffset) -> Self {
        Self {
            avatar: avatar(sale.client()),
            client: sale.client().to_owned(),
            product: sale.product().name().to_owned(),
            brand: sale.brand_label().to_owned(),
            quantity: sale.quantity().to_string(),
            unit_price: format_currency(sale.unit_price()),
            total: format_currency(sale.total()),
            date: format_date(sale.timestamp(), local_offset, DETAIL_DATE_FORMAT),
        }
    }
}

/// Everything shown on the sales screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesDashboard {
    /// Whether to show the empty state instead of the statistics and list.
    pub empty_state: bool,
    /// The message of the failed load, if the latest load failed.
    pub error_message: Option<String>,
    /// e.g. "3 transacciones".
    pub subtitle: String,
    /// The total of all sales in dollars.
    pub total_amount: String,
    /// The total of today's sales in dollars.
    pub today_amount: String,
    /// The number of units sold.
    pub total_quantity: String,
    /// The best-selling product, hidden when there is none.
    pub top_product: Option<TopProductCard>,
    /// The "all" chip followed by one chip per brand.
    pub chips: Vec<FilterChip>,
    /// The heading above the list, naming the selected brand if there is one.
    pub section_title: String,
    /// The sales that match the selected filter.
    pub rows: Vec<SaleRow>,
}

impl SalesDashboard {
    /// Build the screen for the current state of `session`.
    ///
    /// `today` and `local_offset` decide which sales count as today's and
    /// how dates are shown.
    pub fn new(session: &SalesSession, today: Date, local_offset: UtcOffset) -> Self {
        let sales = session.sales();
        let error_message = match session.state() {
            LoadState::Failed(message) => Some(message.clone()),
            _ => None,
        };

        if sales.is_empty() {
            return Self {
                empty_state: true,
                error_message,
                subtitle: subtitle(0),
                total_amount: format_currency(0.0),
                today_amount: format_currency(0.0),
                total_quantity: "0".to_owned(),
                top_product: None,
                chips: Vec::new(),
                section_title: SECTION_TITLE.to_owned(),
                rows: Vec::new(),
            };
        }

        let statistics = session.statistics(today, local_offset);
        let top_product = (!statistics.top_product.is_empty()).then(|| TopProductCard {
            name: statistics.top_product.clone(),
            units_sold: format!("{} unidades vendidas", statistics.top_product_quantity),
        });

        let selected = session.filter_key();
        let chips = std::iter::once(FilterKey::All)
            .chain(
                session
                    .brands()
                    .iter()
                    .map(|brand| FilterKey::Brand(brand.clone())),
            )
            .map(|key| FilterChip {
                label: key.label().to_owned(),
                checked: &key == selected,
                key,
            })
            .collect();

        let section_title = match selected {
            FilterKey::All => SECTION_TITLE.to_owned(),
            FilterKey::Brand(brand) => format!("{SECTION_TITLE} - {brand}"),
        };

        let rows = session
            .filtered()
            .into_iter()
            .map(|sale| SaleRow::new(sale, local_offset))
            .collect();

        Self {
            empty_state: false,
            error_message,
            subtitle: subtitle(sales.len()),
            total_amount: format_currency(statistics.total_amount),
            today_amount: format_currency(statistics.today_amount),
            total_quantity: statistics.total_quantity.to_string(),
            top_product,
            chips,
            section_title,
            rows,
        }
    }
}

fn subtitle(count: usize) -> String {
    format!("{count} transacciones")
}

fn avatar(client: &str) -> String {
    client
        .graphemes(true)
        .next()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "?".to_owned())
}

fn format_date(
    timestamp: OffsetDateTime,
    local_offset: UtcOffset,
    format: &[BorrowedFormatItem<'_>],
) -> String {
    timestamp
        .to_offset(local_offset)
        .format(format)
        .unwrap_or_else(|error| {
            tracing::error!("could not format the date {timestamp}: {error}");
            String::new()
        })
}
