//! Composing and checking a new sale before it is saved.

use time::OffsetDateTime;

use crate::{Client, Error, Product, record::Document};

use super::core::{ProductLabel, Sale, SaleStatus};

/// A sale being filled in by the user.
///
/// The client and product are picked from the loaded lists. The total is
/// always the product's price times the quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaleDraft<'a> {
    client: Option<&'a Client>,
    product: Option<&'a Product>,
    quantity: u32,
}

impl<'a> SaleDraft<'a> {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client.
    pub fn client(mut self, client: &'a Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the product.
    pub fn product(mut self, product: &'a Product) -> Self {
        self.product = Some(product);
        self
    }

    /// Set the number of units.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// The price of the product times the quantity, zero without a product.
    pub fn total(&self) -> f64 {
        self.product
            .map(|product| product.price * f64::from(self.quantity))
            .unwrap_or(0.0)
    }

    /// Check the draft and turn it into a sale ready to be saved.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingClient] if no client was chosen,
    /// - [Error::MissingProduct] if no product was chosen,
    /// - [Error::InvalidQuantity] if the quantity is zero,
    /// - or [Error::InvalidTotal] if the total is not greater than zero.
    pub fn validate(&self) -> Result<NewSale, Error> {
        let client = self.client.ok_or(Error::MissingClient)?;
        let product = self.product.ok_or(Error::MissingProduct)?;

        if self.quantity == 0 {
            return Err(Error::InvalidQuantity);
        }

        let total = self.total();
        if total <= 0.0 || total.is_nan() {
            return Err(Error::InvalidTotal(total));
        }

        Ok(NewSale {
            client: client.name.clone(),
            product: product.label(),
            quantity: self.quantity,
            total,
        })
    }
}

/// A checked sale that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    client: String,
    product: ProductLabel,
    quantity: u32,
    total: f64,
}

impl NewSale {
    /// The sale as it will be saved at `now`, marked as completed.
    pub fn into_sale(self, id: &str, now: OffsetDateTime) -> Sale {
        Sale::build(&self.product.to_string(), now)
            .id(id)
            .client(&self.client)
            .quantity(self.quantity)
            .total(self.total)
            .status(SaleStatus::Completed)
            .finalise()
    }

    /// The document fields to add to the `ventas` collection at `now`.
    pub fn to_record(&self, now: OffsetDateTime) -> Document {
        self.clone().into_sale("", now).to_record()
    }

    /// The amount that will be charged.
    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{Client, Error, Product};

    use super::SaleDraft;

    fn client() -> Client {
        Client {
            id: "c1".to_owned(),
            name: "Ana".to_owned(),
            ..Default::default()
        }
    }

    fn product(price: f64) -> Product {
        Product {
            id: "p1".to_owned(),
            name: "Leche".to_owned(),
            brand: "Dos Pinos".to_owned(),
            price,
            quantity: 50,
            ..Default::default()
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        let product = product(1.5);

        let draft = SaleDraft::new().product(&product).quantity(4);

        assert_eq!(draft.total(), 6.0);
    }

    #[test]
    fn validate_requires_every_field() {
        let client = client();
        let product = product(1.5);

        assert_eq!(
            SaleDraft::new().product(&product).quantity(1).validate(),
            Err(Error::MissingClient)
        );
        assert_eq!(
            SaleDraft::new().client(&client).quantity(1).validate(),
            Err(Error::MissingProduct)
        );
        assert_eq!(
            SaleDraft::new().client(&client).product(&product).validate(),
            Err(Error::InvalidQuantity)
        );
    }

    #[test]
    fn validate_rejects_free_products() {
        let client = client();
        let product = product(0.0);

        let got = SaleDraft::new()
            .client(&client)
            .product(&product)
            .quantity(3)
            .validate();

        assert_eq!(got, Err(Error::InvalidTotal(0.0)));
    }

    #[test]
    fn valid_draft_becomes_completed_sale_record() {
        let client = client();
        let product = product(1.5);
        let now = datetime!(2024-03-05 14:30 UTC);

        let new_sale = SaleDraft::new()
            .client(&client)
            .product(&product)
            .quantity(2)
            .validate()
            .unwrap();
        let record = new_sale.to_record(now);

        assert_eq!(new_sale.total(), 3.0);
        assert_eq!(record["producto"], json!("Leche - Dos Pinos"));
        assert_eq!(record["cliente"], json!("Ana"));
        assert_eq!(record["cantidad"], json!(2));
        assert_eq!(record["total"], json!(3.0));
        assert_eq!(record["estado"], json!("completada"));
        assert_eq!(
            record["fecha"]["seconds"],
            Value::from(now.unix_timestamp())
        );
    }
}
