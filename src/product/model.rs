//! In-memory representation of a stored product.
//!
//! Every product shares the base group (`name`, `price`, `quantity`); the
//! variant-specific attributes live in [`ProductKind`]. The mapping produced
//! by [`Product::to_mapping`] always starts with the base keys and appends the
//! variant keys, so a listing reads the same way the file does.

use serde_json::{Map, Value};

/// JSON key for the product name.
pub const KEY_NAME: &str = "nombre";
/// JSON key for the unit price.
pub const KEY_PRICE: &str = "precio";
/// JSON key for the quantity in stock.
pub const KEY_QUANTITY: &str = "cantidad";
/// JSON key for an electronic product's brand.
pub const KEY_BRAND: &str = "marca";
/// JSON key for an electronic product's voltage. Its presence marks the record
/// as electronic.
pub const KEY_VOLTAGE: &str = "voltaje";
/// JSON key for a perishable product's issue date.
pub const KEY_ISSUE_DATE: &str = "fecha_expedicion";
/// JSON key for a perishable product's expiry date. Its presence (without
/// `voltaje`) marks the record as perishable.
pub const KEY_EXPIRY_DATE: &str = "fecha_caducidad";

#[derive(Clone, Debug, PartialEq)]
/// One inventory record.
///
/// `price` and `quantity` are expected to be non-negative but nothing enforces
/// it; the shell only coerces input text into the right numeric type.
pub struct Product {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub kind: ProductKind,
}

#[derive(Clone, Debug, PartialEq)]
/// Variant-specific attributes. Variants are mutually exclusive.
pub enum ProductKind {
    /// Base fields only. Only produced by loading a file.
    Plain,
    /// `voltage` is free-form text (e.g. `"220V"`), never parsed.
    Electronic { brand: String, voltage: String },
    /// Dates follow the `YYYY-MM-DD` convention but are not validated.
    Perishable {
        issue_date: String,
        expiry_date: String,
    },
}

impl Product {
    pub fn plain(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Plain,
        }
    }

    pub fn electronic(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        brand: impl Into<String>,
        voltage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Electronic {
                brand: brand.into(),
                voltage: voltage.into(),
            },
        }
    }

    pub fn perishable(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        issue_date: impl Into<String>,
        expiry_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Perishable {
                issue_date: issue_date.into(),
                expiry_date: expiry_date.into(),
            },
        }
    }

    /// Flat key-value view of the record: base keys first, then the variant's
    /// own keys. Pure; the record is not touched.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(KEY_NAME.to_string(), Value::String(self.name.clone()));
        map.insert(KEY_PRICE.to_string(), Value::from(self.price));
        map.insert(KEY_QUANTITY.to_string(), Value::from(self.quantity));
        self.kind.extend_mapping(&mut map);
        map
    }
}

impl ProductKind {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Plain => "plain",
            ProductKind::Electronic { .. } => "electronic",
            ProductKind::Perishable { .. } => "perishable",
        }
    }

    fn extend_mapping(&self, map: &mut Map<String, Value>) {
        match self {
            ProductKind::Plain => {}
            ProductKind::Electronic { brand, voltage } => {
                map.insert(KEY_BRAND.to_string(), Value::String(brand.clone()));
                map.insert(KEY_VOLTAGE.to_string(), Value::String(voltage.clone()));
            }
            ProductKind::Perishable {
                issue_date,
                expiry_date,
            } => {
                map.insert(KEY_ISSUE_DATE.to_string(), Value::String(issue_date.clone()));
                map.insert(
                    KEY_EXPIRY_DATE.to_string(),
                    Value::String(expiry_date.clone()),
                );
            }
        }
    }
}
