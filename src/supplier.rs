use serde::Serialize;

use crate::record::{Document, get_string};

/// A business the store buys its stock from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Supplier {
    /// The store's ID for the supplier.
    pub id: String,
    /// The supplier's name.
    pub name: String,
    /// The supplier's phone number.
    pub phone: String,
    /// The supplier's email address.
    pub email: String,
    /// The supplier's postal address.
    pub address: String,
}

impl Supplier {
    /// Convert a `proveedores` document into a supplier, using empty text
    /// for missing fields.
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

    use super::Supplier;

    #[test]
    fn from_record_reads_every_field() {
        let document = match json!({
            "nombre": "Distribuidora Sol",
            "telefono": "2222-3333",
            "email": "ventas@sol.sv",
            "direccion": "San Salvador",
        }) {
            serde_json::Value::Object(document) => document,
            _ => unreachable!(),
        };

        let supplier = Supplier::from_record("s1", &document);

        assert_eq!(
            supplier,
            Supplier {
                id: "s1".to_owned(),
                name: "Distribuidora Sol".to_owned(),
                phone: "2222-3333".to_owned(),
                email: "ventas@sol.sv".to_owned(),
                address: "San Salvador".to_owned(),
            }
        );
    }

    #[test]
    fn from_record_defaults_missing_and_wrong_typed_fields() {
        let document = match json!({ "nombre": "Sol", "direccion": 7 }) {
            serde_json::Value::Object(document) => document,
            _ => unreachable!(),
        };

        let supplier = Supplier::from_record("s2", &document);

        assert_eq!(supplier.name, "Sol");
        assert_eq!(supplier.phone, "");
        assert_eq!(supplier.address, "");
    }
}
