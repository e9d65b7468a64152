//! Core sale domain types and conversion from store documents.

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::record::{Document, get_f64, get_string, get_timestamp, get_u32};

/// The brand shown for products whose label has no brand.
pub const NO_BRAND_LABEL: &str = "Sin marca";

/// Separates the product name from the brand in stored product labels.
const LABEL_SEPARATOR: &str = " - ";

/// The product of a sale, with the name and brand kept apart.
///
/// The store saves the product as a single display string of the form
/// `"<name> - <brand>"`. It is split once at the first separator when the
/// sale is loaded and only joined again for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductLabel {
    name: String,
    brand: Option<String>,
}

impl ProductLabel {
    /// Create a label from a separate name and brand.
    pub fn new(name: &str, brand: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            brand: brand.map(str::to_owned),
        }
    }

    /// Split a stored label at the first `" - "`.
    ///
    /// The text before the separator is the name and the text after it is
    /// the brand. A label without the separator is all name and has no brand.
    pub fn parse(label: &str) -> Self {
        match label.split_once(LABEL_SEPARATOR) {
            Some((name, brand)) => Self::new(name, Some(brand)),
            None => Self::new(label, None),
        }
    }

    /// The product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The brand, if the label has one.
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// The brand used for grouping and filtering, [NO_BRAND_LABEL] when the label has no brand.
    pub fn brand_label(&self) -> &str {
        self.brand().unwrap_or(NO_BRAND_LABEL)
    }
}

impl Display for ProductLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.brand {
            Some(brand) => write!(f, "{}{LABEL_SEPARATOR}{brand}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The state of a sale.
///
/// The store keeps the status as free text, so any value other than the
/// three known ones is kept as [SaleStatus::Other].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SaleStatus {
    /// The sale has been paid and delivered.
    #[default]
    Completed,
    /// The sale is waiting on payment or delivery.
    Pending,
    /// The sale was called off.
    Cancelled,
    /// Any other status text found in the store.
    Other(String),
}

impl SaleStatus {
    /// Map stored status text to a status.
    pub fn parse(text: &str) -> Self {
        match text {
            "completada" => SaleStatus::Completed,
            "pendiente" => SaleStatus::Pending,
            "cancelada" => SaleStatus::Cancelled,
            other => SaleStatus::Other(other.to_owned()),
        }
    }

    /// The status text as it is kept in the store.
    pub fn as_str(&self) -> &str {
        match self {
            SaleStatus::Completed => "completada",
            SaleStatus::Pending => "pendiente",
            SaleStatus::Cancelled => "cancelada",
            SaleStatus::Other(text) => text,
        }
    }
}

/// A single sale of some quantity of one product to a client.
///
/// Sales are immutable once loaded. New instances should be created through
/// [Sale::build] or [Sale::from_record].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    id: String,
    product: ProductLabel,
    client: String,
    quantity: u32,
    total: f64,
    timestamp: OffsetDateTime,
    status: SaleStatus,
}

impl Sale {
    /// Create a builder for a sale of `product` made at `timestamp`.
    ///
    /// `product` is a stored label of the form `"<name> - <brand>"`.
    pub fn build(product: &str, timestamp: OffsetDateTime) -> SaleBuilder {
        SaleBuilder {
            id: String::new(),
            product: ProductLabel::parse(product),
            client: String::new(),
            quantity: 0,
            total: 0.0,
            timestamp,
            status: SaleStatus::Completed,
        }
    }

    /// Convert a `ventas` document into a sale.
    ///
    /// Never fails: missing or wrong-typed text fields become empty strings,
    /// numbers become zero, the timestamp becomes `now` and the status
    /// becomes [SaleStatus::Completed].
    pub fn from_record(id: &str, document: &Document, now: OffsetDateTime) -> Self {
        Self {
            id: id.to_owned(),
            product: ProductLabel::parse(&get_string(document, "producto").unwrap_or_default()),
            client: get_string(document, "cliente").unwrap_or_default(),
            quantity: get_u32(document, "cantidad").unwrap_or(0),
            total: get_f64(document, "total").unwrap_or(0.0),
            timestamp: get_timestamp(document, "fecha").unwrap_or(now),
            status: get_string(document, "estado")
                .map(|status| SaleStatus::parse(&status))
                .unwrap_or_default(),
        }
    }

    /// The document fields for this sale, without the ID.
    ///
    /// The timestamp is written in the store's `{"seconds", "nanoseconds"}` shape.
    pub fn to_record(&self) -> Document {
        let mut document = Document::new();
        document.insert("producto".to_owned(), Value::from(self.product.to_string()));
        document.insert("cliente".to_owned(), Value::from(self.client.clone()));
        document.insert("cantidad".to_owned(), Value::from(self.quantity));
        document.insert("total".to_owned(), Value::from(self.total));
        document.insert(
            "fecha".to_owned(),
            json!({
                "seconds": self.timestamp.unix_timestamp(),
                "nanoseconds": self.timestamp.nanosecond(),
            }),
        );
        document.insert("estado".to_owned(), Value::from(self.status.as_str()));
        document
    }

    /// The store's ID for the sale.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The product that was sold.
    pub fn product(&self) -> &ProductLabel {
        &self.product
    }

    /// The brand used for grouping and filtering.
    pub fn brand_label(&self) -> &str {
        self.product.brand_label()
    }

    /// The name of the client.
    pub fn client(&self) -> &str {
        &self.client
    }

    /// How many units were sold.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The amount charged for the sale.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The price of a single unit, zero if no units were sold.
    pub fn unit_price(&self) -> f64 {
        if self.quantity > 0 {
            self.total / f64::from(self.quantity)
        } else {
            0.0
        }
    }

    /// When the sale was made.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// The state of the sale.
    pub fn status(&self) -> &SaleStatus {
        &self.status
    }
}

/// A builder for creating [Sale] instances.
///
/// Fields that are not set default to empty text, zero and [SaleStatus::Completed].
#[derive(Debug, Clone)]
pub struct SaleBuilder {
    id: String,
    product: ProductLabel,
    client: String,
    quantity: u32,
    total: f64,
    timestamp: OffsetDateTime,
    status: SaleStatus,
}

impl SaleBuilder {
    /// Set the store ID.
    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_owned();
        self
    }

    /// Set the client name.
    pub fn client(mut self, client: &str) -> Self {
        self.client = client.to_owned();
        self
    }

    /// Set the number of units sold.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the amount charged.
    pub fn total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }

    /// Set the status.
    pub fn status(mut self, status: SaleStatus) -> Self {
        self.status = status;
        self
    }

    /// Create the [Sale].
    pub fn finalise(self) -> Sale {
        Sale {
            id: self.id,
            product: self.product,
            client: self.client,
            quantity: self.quantity,
            total: self.total,
            timestamp: self.timestamp,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::record::Document;

    use super::{NO_BRAND_LABEL, ProductLabel, Sale, SaleStatus};

    fn document(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(document) => document,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn label_splits_at_first_separator() {
        let label = ProductLabel::parse("Milk - Dairy");

        assert_eq!(label.name(), "Milk");
        assert_eq!(label.brand(), Some("Dairy"));
        assert_eq!(label.to_string(), "Milk - Dairy");
    }

    #[test]
    fn label_keeps_later_separators_in_brand() {
        let label = ProductLabel::parse("Queso - Lácteos - Premium");

        assert_eq!(label.name(), "Queso");
        assert_eq!(label.brand_label(), "Lácteos - Premium");
    }

    #[test]
    fn label_without_separator_has_fallback_brand() {
        let label = ProductLabel::parse("NoSeparatorName");

        assert_eq!(label.name(), "NoSeparatorName");
        assert_eq!(label.brand(), None);
        assert_eq!(label.brand_label(), NO_BRAND_LABEL);
        assert_eq!(label.to_string(), "NoSeparatorName");
    }

    #[test]
    fn label_with_trailing_separator_has_empty_brand() {
        let label = ProductLabel::parse("Milk - ");

        assert_eq!(label.name(), "Milk");
        assert_eq!(label.brand(), Some(""));
        assert_eq!(label.brand_label(), "");
    }

    #[test]
    fn status_round_trips_known_and_unknown_text() {
        assert_eq!(SaleStatus::parse("pendiente"), SaleStatus::Pending);
        assert_eq!(SaleStatus::parse("cancelada").as_str(), "cancelada");
        assert_eq!(
            SaleStatus::parse("reembolsada"),
            SaleStatus::Other("reembolsada".to_owned())
        );
    }

    #[test]
    fn from_record_reads_all_fields() {
        let doc = document(json!({
            "producto": "Leche - Dos Pinos",
            "cliente": "Ana",
            "cantidad": 3,
            "total": 4.5,
            "fecha": { "seconds": 1_709_649_000, "nanoseconds": 0 },
            "estado": "pendiente",
        }));

        let sale = Sale::from_record("v1", &doc, datetime!(2030-01-01 0:00 UTC));

        assert_eq!(sale.id(), "v1");
        assert_eq!(sale.product().name(), "Leche");
        assert_eq!(sale.brand_label(), "Dos Pinos");
        assert_eq!(sale.client(), "Ana");
        assert_eq!(sale.quantity(), 3);
        assert_eq!(sale.total(), 4.5);
        assert_eq!(sale.timestamp(), datetime!(2024-03-05 14:30 UTC));
        assert_eq!(sale.status(), &SaleStatus::Pending);
    }

    #[test]
    fn from_record_defaults_missing_and_wrong_typed_fields() {
        let now = datetime!(2024-03-05 9:00 UTC);
        let doc = document(json!({ "cliente": 7, "cantidad": "dos", "total": null }));

        let sale = Sale::from_record("v2", &doc, now);

        assert_eq!(sale.product().name(), "");
        assert_eq!(sale.brand_label(), NO_BRAND_LABEL);
        assert_eq!(sale.client(), "");
        assert_eq!(sale.quantity(), 0);
        assert_eq!(sale.total(), 0.0);
        assert_eq!(sale.timestamp(), now);
        assert_eq!(sale.status(), &SaleStatus::Completed);
    }

    #[test]
    fn to_record_is_read_back_by_from_record() {
        let sale = Sale::build("Pan - Bimbo", datetime!(2024-03-05 14:30:15.5 UTC))
            .id("v3")
            .client("Luis")
            .quantity(2)
            .total(3.0)
            .status(SaleStatus::Cancelled)
            .finalise();

        let read_back = Sale::from_record("v3", &sale.to_record(), datetime!(2030-01-01 0:00 UTC));

        assert_eq!(read_back, sale);
    }

    #[test]
    fn unit_price_is_zero_without_units() {
        let sale = Sale::build("Pan", datetime!(2024-03-05 9:00 UTC))
            .total(5.0)
            .finalise();

        assert_eq!(sale.unit_price(), 0.0);
    }

    #[test]
    fn unit_price_divides_total_by_quantity() {
        let sale = Sale::build("Pan", datetime!(2024-03-05 9:00 UTC))
            .quantity(4)
            .total(10.0)
            .finalise();

        assert_eq!(sale.unit_price(), 2.5);
    }
}
