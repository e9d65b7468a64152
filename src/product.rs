//! Inventory products and the statistics of the inventory screen.

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::{
    Error,
    record::{Document, get_f64, get_string, get_u32},
    sale::{NO_BRAND_LABEL, ProductLabel},
};

/// An item the business keeps in stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    /// The store's ID for the product.
    pub id: String,
    /// The product name.
    pub name: String,
    /// The brand, [NO_BRAND_LABEL] if the product was saved without one.
    pub brand: String,
    /// A free-text description.
    pub description: String,
    /// The price of one unit.
    pub price: f64,
    /// The number of units in stock.
    pub quantity: u32,
    /// A URL of an image of the product.
    pub image: String,
}

impl Product {
    /// Convert a `productos` document into a product.
    ///
    /// Missing text becomes empty, a missing or blank brand becomes
    /// [NO_BRAND_LABEL] and missing numbers become zero.
    pub fn from_record(id: &str, document: &Document) -> Self {
        Self {
            id: id.to_owned(),
            name: get_string(document, "nombre").unwrap_or_default(),
            brand: brand_or_fallback(get_string(document, "marca")),
            description: get_string(document, "descripcion").unwrap_or_default(),
            price: get_f64(document, "precio").unwrap_or(0.0),
            quantity: get_u32(document, "cantidad").unwrap_or(0),
            image: get_string(document, "imagen").unwrap_or_default(),
        }
    }

    /// The label used for this product in sales, `"<name> - <brand>"`.
    pub fn label(&self) -> ProductLabel {
        ProductLabel::new(&self.name, Some(&self.brand))
    }

    /// The value of the units in stock.
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

fn brand_or_fallback(brand: Option<String>) -> String {
    brand
        .filter(|brand| !brand.trim().is_empty())
        .unwrap_or_else(|| NO_BRAND_LABEL.to_owned())
}

/// The text typed in for a new product.
///
/// The name, price and quantity are required. The price and quantity are
/// parsed from text as they are entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductDraft<'a> {
    name: &'a str,
    brand: &'a str,
    description: &'a str,
    price: &'a str,
    quantity: &'a str,
    image: &'a str,
}

impl<'a> ProductDraft<'a> {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Set the brand, may be left blank.
    pub fn brand(mut self, brand: &'a str) -> Self {
        self.brand = brand;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    /// Set the price text.
    pub fn price(mut self, price: &'a str) -> Self {
        self.price = price;
        self
    }

    /// Set the quantity text.
    pub fn quantity(mut self, quantity: &'a str) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image URL.
    pub fn image(mut self, image: &'a str) -> Self {
        self.image = image;
        self
    }

    /// Check the draft and parse its numbers.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingName], [Error::MissingPrice] or [Error::MissingQuantity]
    ///   if a required field is blank,
    /// - [Error::InvalidNumber] if the price is not a finite number or the
    ///   quantity is not a whole number,
    /// - [Error::InvalidPrice] if the price is not greater than zero,
    /// - or [Error::NegativeQuantity] if the quantity is below zero.
    pub fn validate(&self) -> Result<NewProduct, Error> {
        let name = self.name.trim();
        let price = self.price.trim();
        let quantity = self.quantity.trim();

        if name.is_empty() {
            return Err(Error::MissingName);
        }
        if price.is_empty() {
            return Err(Error::MissingPrice);
        }
        if quantity.is_empty() {
            return Err(Error::MissingQuantity);
        }

        let price = price
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| Error::InvalidNumber(price.to_owned()))?;
        let quantity = quantity
            .parse::<i64>()
            .map_err(|_| Error::InvalidNumber(quantity.to_owned()))?;

        if price <= 0.0 {
            return Err(Error::InvalidPrice(price));
        }
        if quantity < 0 {
            return Err(Error::NegativeQuantity(quantity));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| Error::InvalidNumber(quantity.to_string()))?;

        Ok(NewProduct {
            name: name.to_owned(),
            brand: self.brand.trim().to_owned(),
            description: self.description.trim().to_owned(),
            price,
            quantity,
            image: self.image.trim().to_owned(),
        })
    }
}

/// A checked product that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    brand: String,
    description: String,
    price: f64,
    quantity: u32,
    image: String,
}

impl NewProduct {
    /// The document fields to add to the `productos` collection at `now`.
    ///
    /// The brand is saved as typed, blank included.
    pub fn to_record(&self, now: OffsetDateTime) -> Document {
        let mut document = Document::new();
        document.insert("nombre".to_owned(), Value::from(self.name.clone()));
        document.insert("marca".to_owned(), Value::from(self.brand.clone()));
        document.insert("descripcion".to_owned(), Value::from(self.description.clone()));
        document.insert("precio".to_owned(), Value::from(self.price));
        document.insert("cantidad".to_owned(), Value::from(self.quantity));
        document.insert("imagen".to_owned(), Value::from(self.image.clone()));
        document.insert(
            "fechaCreacion".to_owned(),
            json!({
                "seconds": now.unix_timestamp(),
                "nanoseconds": now.nanosecond(),
            }),
        );
        document
    }

    /// The product as it will be loaded under `id`.
    pub fn into_product(self, id: &str) -> Product {
        Product {
            id: id.to_owned(),
            name: self.name,
            brand: brand_or_fallback(Some(self.brand)),
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
        }
    }
}

/// The products of one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandGroup<'a> {
    /// The brand shared by the products.
    pub brand: &'a str,
    /// The products in their original order.
    pub products: Vec<&'a Product>,
}

/// Group `products` by brand, with brands in the order they first appear.
pub fn group_by_brand(products: &[Product]) -> Vec<BrandGroup<'_>> {
    let mut groups: Vec<BrandGroup<'_>> = Vec::new();

    for product in products {
        match groups.iter_mut().find(|group| group.brand == product.brand) {
            Some(group) => group.products.push(product),
            None => groups.push(BrandGroup {
                brand: &product.brand,
                products: vec![product],
            }),
        }
    }

    groups
}

/// Totals shown at the top of the inventory screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryStatistics {
    /// The number of units in stock across all products.
    pub total_quantity: u64,
    /// The value of all units in stock.
    pub total_value: f64,
    /// The number of products with fewer units than the threshold.
    pub low_stock_count: usize,
    /// The threshold used for [InventoryStatistics::low_stock_count].
    pub low_stock_threshold: u32,
}

impl InventoryStatistics {
    /// Compute the statistics for `products`.
    ///
    /// A product is low on stock when it has fewer than `low_stock_threshold` units.
    pub fn compute(products: &[Product], low_stock_threshold: u32) -> Self {
        products.iter().fold(
            Self {
                low_stock_threshold,
                ..Default::default()
            },
            |mut statistics, product| {
                statistics.total_quantity += u64::from(product.quantity);
                statistics.total_value += product.stock_value();
                if product.quantity < low_stock_threshold {
                    statistics.low_stock_count += 1;
                }
                statistics
            },
        )
    }

    /// The warning shown when some products are low on stock, `None` otherwise.
    pub fn low_stock_alert(&self) -> Option<String> {
        (self.low_stock_count > 0).then(|| {
            format!(
                "{} producto(s) tienen menos de {} unidades",
                self.low_stock_count, self.low_stock_threshold
            )
        })
    }
}
