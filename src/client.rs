use serde::Serialize;

use crate::record::{Document, get_string};

/// A customer of the business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Client {
    /// The store's ID for the client.
    pub id: String,
    /// The client's name, used as the client of new sales.
    pub name: String,
    /// The client's phone number.
    pub phone: String,
    /// The client's email address.
    pub email: String,
    /// The client's postal address.
    pub address: String,
}

impl Client {
    /// Convert a `clientes` document into a client, using empty text for
    /// missing fields.
    pub fn from_record(id: &str, document: &Document) -> Self {
        Self {
            id: id.to_owned(),
            name: get_string(document, "nombre").unwrap_or_default(),
            phone: get_string(document, "telefono").unwrap_or_default(),
            email: get_string(document, "email").unwrap_or_default(),
            address: get_string(document, "direccion").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Client;

    #[test]
    fn from_record_defaults_missing_fields() {
        let document = match json!({ "nombre": "Ana", "telefono": 5551234 }) {
            serde_json::Value::Object(document) => document,
            _ => unreachable!(),
        };

        let client = Client::from_record("c1", &document);

        assert_eq!(
            client,
            Client {
                id: "c1".to_owned(),
                name: "Ana".to_owned(),
                ..Default::default()
            }
        );
    }
}
