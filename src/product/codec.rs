//! Conversion between [`Product`] and the stored JSON object.
//!
//! `productos.json` has no discriminant field. The variant is inferred from
//! key presence, checked in a fixed order: `voltaje` first (electronic), then
//! `fecha_caducidad` (perishable), otherwise plain. An object carrying both
//! marker keys therefore always decodes as electronic.

use crate::product::model::{
    KEY_BRAND, KEY_EXPIRY_DATE, KEY_ISSUE_DATE, KEY_NAME, KEY_PRICE, KEY_QUANTITY, KEY_VOLTAGE,
    Product, ProductKind,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Why a stored object could not be turned into a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    NotAnObject,
    MissingField {
        field: &'static str,
    },
    WrongShape {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAnObject => write!(f, "product entry must be a JSON object"),
            DecodeError::MissingField { field } => write!(f, "missing field '{field}'"),
            DecodeError::WrongShape { field, expected } => {
                write!(f, "field '{field}' must be {expected}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// All fields of `product` as a string-keyed JSON object.
pub fn encode(product: &Product) -> Map<String, Value> {
    product.to_mapping()
}

/// Rebuild a product from one element of the stored array.
pub fn decode(value: &Value) -> Result<Product, DecodeError> {
    match value {
        Value::Object(map) => decode_map(map),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Rebuild a product from a JSON object, inferring its variant.
///
/// Keys other than the ones the inferred variant declares are ignored.
pub fn decode_map(map: &Map<String, Value>) -> Result<Product, DecodeError> {
    let name = required_str(map, KEY_NAME)?;
    let price = required_price(map)?;
    let quantity = required_quantity(map)?;

    let kind = if map.contains_key(KEY_VOLTAGE) {
        ProductKind::Electronic {
            brand: required_str(map, KEY_BRAND)?,
            voltage: required_str(map, KEY_VOLTAGE)?,
        }
    } else if map.contains_key(KEY_EXPIRY_DATE) {
        ProductKind::Perishable {
            issue_date: required_str(map, KEY_ISSUE_DATE)?,
            expiry_date: required_str(map, KEY_EXPIRY_DATE)?,
        }
    } else {
        ProductKind::Plain
    };

    Ok(Product {
        name,
        price,
        quantity,
        kind,
    })
}

fn required<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DecodeError> {
    map.get(field).ok_or(DecodeError::MissingField { field })
}

fn required_str(map: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    required(map, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::WrongShape {
            field,
            expected: "a string",
        })
}

fn required_price(map: &Map<String, Value>) -> Result<f64, DecodeError> {
    // Integral numbers are accepted too (`"precio": 10`).
    required(map, KEY_PRICE)?
        .as_f64()
        .ok_or(DecodeError::WrongShape {
            field: KEY_PRICE,
            expected: "a number",
        })
}

fn required_quantity(map: &Map<String, Value>) -> Result<i64, DecodeError> {
    required(map, KEY_QUANTITY)?
        .as_i64()
        .ok_or(DecodeError::WrongShape {
            field: KEY_QUANTITY,
            expected: "an integer",
        })
}

impl Serialize for Product {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_inverts_encode_for_each_variant() {
        let products = [
            Product::plain("Tornillo", 0.25, 1000),
            Product::electronic("Radio", 35.5, 4, "Sony", "110-220V"),
            Product::perishable("Leche", 1.2, 30, "2024-01-01", "2024-01-15"),
        ];
        for product in products {
            let encoded = Value::Object(encode(&product));
            assert_eq!(decode(&encoded).expect("decodes"), product);
        }
    }

    #[test]
    fn voltage_wins_over_expiry_date() {
        let value = json!({
            "nombre": "Nevera",
            "precio": 500.0,
            "cantidad": 2,
            "marca": "LG",
            "voltaje": "220V",
            "fecha_expedicion": "2024-01-01",
            "fecha_caducidad": "2030-01-01"
        });
        let product = decode(&value).expect("decodes");
        assert_eq!(
            product.kind,
            ProductKind::Electronic {
                brand: "LG".into(),
                voltage: "220V".into()
            }
        );
    }

    #[test]
    fn expiry_date_without_voltage_is_perishable() {
        let value = json!({
            "nombre": "Yogur",
            "precio": 0.9,
            "cantidad": 12,
            "fecha_expedicion": "2024-02-01",
            "fecha_caducidad": "2024-02-20"
        });
        let product = decode(&value).expect("decodes");
        assert_eq!(product.kind.label(), "perishable");
    }

    #[test]
    fn missing_markers_decode_as_plain() {
        let value = json!({"nombre": "Caja", "precio": 3, "cantidad": 7});
        let product = decode(&value).expect("decodes");
        assert_eq!(product, Product::plain("Caja", 3.0, 7));
    }

    #[test]
    fn missing_base_field_is_reported() {
        let value = json!({"nombre": "Caja", "precio": 3.0});
        assert_eq!(
            decode(&value),
            Err(DecodeError::MissingField { field: "cantidad" })
        );
    }

    #[test]
    fn fractional_quantity_is_wrong_shape() {
        let value = json!({"nombre": "Caja", "precio": 3.0, "cantidad": 1.5});
        assert_eq!(
            decode(&value),
            Err(DecodeError::WrongShape {
                field: "cantidad",
                expected: "an integer"
            })
        );
    }

    #[test]
    fn string_price_is_wrong_shape() {
        let value = json!({"nombre": "Caja", "precio": "3", "cantidad": 1});
        let err = decode(&value).expect_err("price must be numeric");
        assert_eq!(err.to_string(), "field 'precio' must be a number");
    }

    #[test]
    fn electronic_without_brand_is_missing_field() {
        let value = json!({"nombre": "Radio", "precio": 3.0, "cantidad": 1, "voltaje": "5V"});
        assert_eq!(
            decode(&value),
            Err(DecodeError::MissingField { field: "marca" })
        );
    }

    #[test]
    fn non_object_entry_is_rejected() {
        assert_eq!(decode(&json!(["nombre"])), Err(DecodeError::NotAnObject));
    }

    #[test]
    fn serde_impls_use_the_flat_mapping() {
        let product = Product::electronic("Radio", 35.5, 4, "Sony", "220V");
        let text = serde_json::to_string(&product).expect("serializes");
        assert_eq!(
            text,
            r#"{"nombre":"Radio","precio":35.5,"cantidad":4,"marca":"Sony","voltaje":"220V"}"#
        );
        let back: Product = serde_json::from_str(&text).expect("deserializes");
        assert_eq!(back, product);
    }
}
