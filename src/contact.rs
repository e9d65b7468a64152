//! New clients and suppliers, checked before they are saved.

use serde_json::Value;

use crate::{Client, Error, Supplier, record::Document};

/// The text typed in for a new client or supplier.
///
/// Surrounding whitespace is ignored. The name and phone are required.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactDraft<'a> {
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    address: &'a str,
}

impl<'a> ContactDraft<'a> {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Set the phone number.
    pub fn phone(mut self, phone: &'a str) -> Self {
        self.phone = phone;
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: &'a str) -> Self {
        self.email = email;
        self
    }

    /// Set the postal address.
    pub fn address(mut self, address: &'a str) -> Self {
        self.address = address;
        self
    }

    /// Check the draft and trim its fields.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingName] if the name is blank,
    /// - or [Error::MissingPhone] if the phone number is blank.
    pub fn validate(&self) -> Result<NewContact, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::MissingName);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(Error::MissingPhone);
        }

        Ok(NewContact {
            name: name.to_owned(),
            phone: phone.to_owned(),
            email: self.email.trim().to_owned(),
            address: self.address.trim().to_owned(),
        })
    }
}

/// A checked client or supplier that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    phone: String,
    email: String,
    address: String,
}

impl NewContact {
    /// The document fields to add to the `clientes` or `proveedores` collection.
    pub fn to_record(&self) -> Document {
        let mut document = Document::new();
        document.insert("nombre".to_owned(), Value::from(self.name.clone()));
        document.insert("telefono".to_owned(), Value::from(self.phone.clone()));
        document.insert("email".to_owned(), Value::from(self.email.clone()));
        document.insert("direccion".to_owned(), Value::from(self.address.clone()));
        document
    }

    /// The client as it will be saved under `id`.
    pub fn into_client(self, id: &str) -> Client {
        Client {
            id: id.to_owned(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }

    /// The supplier as it will be saved under `id`.
    pub fn into_supplier(self, id: &str) -> Supplier {
        Supplier {
            id: id.to_owned(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Client, Error, Supplier};

    use super::ContactDraft;

    #[test]
    fn validate_requires_name() {
        let got = ContactDraft::new().name("   ").phone("7777-0000").validate();

        assert_eq!(got, Err(Error::MissingName));
    }

    #[test]
    fn validate_requires_phone() {
        let got = ContactDraft::new().name("Ana").phone("").validate();

        assert_eq!(got, Err(Error::MissingPhone));
    }

    #[test]
    fn name_is_checked_before_phone() {
        assert_eq!(ContactDraft::new().validate(), Err(Error::MissingName));
    }

    #[test]
    fn email_and_address_are_optional() {
        let client = ContactDraft::new()
            .name("Ana")
            .phone("7777-0000")
            .validate()
            .unwrap()
            .into_client("c1");

        assert_eq!(
            client,
            Client {
                id: "c1".to_owned(),
                name: "Ana".to_owned(),
                phone: "7777-0000".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn valid_draft_is_trimmed_into_supplier_record() {
        let new_contact = ContactDraft::new()
            .name("  Distribuidora Sol ")
            .phone(" 2222-3333")
            .email("ventas@sol.sv ")
            .address(" San Salvador ")
            .validate()
            .unwrap();

        let record = new_contact.to_record();
        assert_eq!(record["nombre"], json!("Distribuidora Sol"));
        assert_eq!(record["telefono"], json!("2222-3333"));
        assert_eq!(record["email"], json!("ventas@sol.sv"));
        assert_eq!(record["direccion"], json!("San Salvador"));

        assert_eq!(
            Supplier::from_record("s1", &record),
            new_contact.into_supplier("s1")
        );
    }
}
