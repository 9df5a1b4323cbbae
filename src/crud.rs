//! Create/list/update/delete against the session collection.
//!
//! Each operation drives its own prompts through a [`Console`] and mutates
//! the caller-owned `Vec<Product>` in place. Recoverable failures come back as
//! [`OperationError`] and are printed by [`report`]; only I/O failures on the
//! console escape to the caller.

use crate::console::Console;
use crate::product::{Product, ProductKind, encode};
use serde_json::Value;
use std::fmt;
use std::io::{self, BufRead, Write};

pub const MSG_CREATED: &str = "Producto creado exitosamente.";
pub const MSG_UPDATED: &str = "Producto actualizado exitosamente.";
pub const MSG_DELETED: &str = "Producto eliminado exitosamente.";
pub const MSG_UNRECOGNIZED_TYPE: &str = "Tipo de producto no reconocido.";
pub const MSG_INVALID_INDEX: &str = "Índice inválido.";
pub const MSG_INPUT_ERROR: &str = "Error en los datos ingresados";

/// Why a single operation stopped early.
#[derive(Debug)]
pub enum OperationError {
    /// Text where a number was expected.
    InputFormat {
        field: &'static str,
        input: String,
        reason: String,
    },
    /// A 1-based selection outside the collection.
    InvalidIndex { input: String },
    /// Product type selector that names no known variant.
    UnrecognizedType { selector: String },
    Io(io::Error),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::InputFormat {
                field,
                input,
                reason,
            } => write!(f, "{MSG_INPUT_ERROR}: {field} '{input}' ({reason})"),
            OperationError::InvalidIndex { .. } => f.write_str(MSG_INVALID_INDEX),
            OperationError::UnrecognizedType { .. } => f.write_str(MSG_UNRECOGNIZED_TYPE),
            OperationError::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OperationError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for OperationError {
    fn from(err: io::Error) -> Self {
        OperationError::Io(err)
    }
}

/// Product types the create prompt accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductSelector {
    Electronic,
    Perishable,
}

impl ProductSelector {
    /// Match a trimmed selector, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "electrónico" | "electronico" => Some(ProductSelector::Electronic),
            "alimenticio" => Some(ProductSelector::Perishable),
            _ => None,
        }
    }
}

/// Print a recoverable error for the user and swallow it; pass I/O errors on.
pub fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: Result<(), OperationError>,
) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(OperationError::Io(err)) => Err(err),
        Err(err) => {
            tracing::debug!(error = ?err, "operation aborted");
            console.say(&err)
        }
    }
}

/// Prompt for a new product and append it.
///
/// The base fields are read before the selector is judged, so a malformed
/// price aborts ahead of an unknown type. Nothing is appended on any error.
pub fn create_product<R: BufRead, W: Write>(
    products: &mut Vec<Product>,
    console: &mut Console<R, W>,
) -> Result<(), OperationError> {
    let selector = console.prompt("Tipo de producto (electrónico/alimenticio): ")?;
    let name = console.prompt("Nombre: ")?;
    let price = parse_price(&console.prompt("Precio: ")?)?;
    let quantity = parse_quantity(&console.prompt("Cantidad en stock: ")?)?;

    let kind = match ProductSelector::parse(&selector) {
        Some(ProductSelector::Electronic) => ProductKind::Electronic {
            brand: console.prompt("Marca: ")?,
            voltage: console.prompt("Voltaje: ")?,
        },
        Some(ProductSelector::Perishable) => ProductKind::Perishable {
            issue_date: console.prompt("Fecha de expedición (YYYY-MM-DD): ")?,
            expiry_date: console.prompt("Fecha de caducidad (YYYY-MM-DD): ")?,
        },
        None => return Err(OperationError::UnrecognizedType { selector }),
    };

    tracing::debug!(kind = kind.label(), name = %name, "created product");
    products.push(Product {
        name,
        price,
        quantity,
        kind,
    });
    console.say(MSG_CREATED)?;
    Ok(())
}

/// Lazy 1-based listing lines, one per product, in collection order.
pub fn listing(products: &[Product]) -> impl Iterator<Item = String> + '_ {
    products
        .iter()
        .enumerate()
        .map(|(idx, product)| format!("{}. {}", idx + 1, Value::Object(encode(product))))
}

pub fn list_products<R: BufRead, W: Write>(
    products: &[Product],
    console: &mut Console<R, W>,
) -> io::Result<()> {
    for line in listing(products) {
        console.say(line)?;
    }
    Ok(())
}

/// List, pick a product, then replace any field given a non-empty answer.
///
/// Fields are committed one at a time in prompt order. A parse failure on a
/// later field leaves the earlier replacements in place.
pub fn update_product<R: BufRead, W: Write>(
    products: &mut [Product],
    console: &mut Console<R, W>,
) -> Result<(), OperationError> {
    list_products(products, console)?;
    let idx = select_index(
        &console.prompt("Número del producto a actualizar: ")?,
        products.len(),
    )?;

    let product = &mut products[idx];
    console.say(format!("Actualizando {}", product.name))?;

    if let Some(name) = answer(console.prompt(&format!("Nuevo nombre ({}): ", product.name))?) {
        product.name = name;
    }
    let label = format!("Nuevo precio ({}): ", Value::from(product.price));
    if let Some(raw) = answer(console.prompt(&label)?) {
        product.price = parse_price(&raw)?;
    }
    let label = format!("Nueva cantidad ({}): ", product.quantity);
    if let Some(raw) = answer(console.prompt(&label)?) {
        product.quantity = parse_quantity(&raw)?;
    }

    match &mut product.kind {
        ProductKind::Plain => {}
        ProductKind::Electronic { brand, voltage } => {
            if let Some(value) = answer(console.prompt(&format!("Nueva marca ({brand}): "))?) {
                *brand = value;
            }
            if let Some(value) = answer(console.prompt(&format!("Nuevo voltaje ({voltage}): "))?)
            {
                *voltage = value;
            }
        }
        ProductKind::Perishable {
            issue_date,
            expiry_date,
        } => {
            let label = format!("Nueva fecha de expedición ({issue_date}): ");
            if let Some(value) = answer(console.prompt(&label)?) {
                *issue_date = value;
            }
            let label = format!("Nueva fecha de caducidad ({expiry_date}): ");
            if let Some(value) = answer(console.prompt(&label)?) {
                *expiry_date = value;
            }
        }
    }

    tracing::debug!(index = idx + 1, "updated product");
    console.say(MSG_UPDATED)?;
    Ok(())
}

/// List, pick a product, and remove it; later products shift down by one.
pub fn delete_product<R: BufRead, W: Write>(
    products: &mut Vec<Product>,
    console: &mut Console<R, W>,
) -> Result<(), OperationError> {
    list_products(products, console)?;
    let idx = select_index(
        &console.prompt("Número del producto a eliminar: ")?,
        products.len(),
    )?;

    let removed = products.remove(idx);
    tracing::debug!(index = idx + 1, name = %removed.name, "deleted product");
    console.say(MSG_DELETED)?;
    Ok(())
}

/// Turn a 1-based selection into a vector index.
pub fn select_index(raw: &str, len: usize) -> Result<usize, OperationError> {
    let position: i64 = raw.parse().map_err(|err: std::num::ParseIntError| {
        OperationError::InputFormat {
            field: "índice",
            input: raw.to_string(),
            reason: err.to_string(),
        }
    })?;
    match usize::try_from(position) {
        Ok(position) if (1..=len).contains(&position) => Ok(position - 1),
        _ => Err(OperationError::InvalidIndex {
            input: raw.to_string(),
        }),
    }
}

/// Parse a price. Non-finite values are refused since JSON cannot store them.
pub fn parse_price(raw: &str) -> Result<f64, OperationError> {
    let invalid = |reason: String| OperationError::InputFormat {
        field: "precio",
        input: raw.to_string(),
        reason,
    };
    let price: f64 = raw
        .parse()
        .map_err(|err: std::num::ParseFloatError| invalid(err.to_string()))?;
    if !price.is_finite() {
        return Err(invalid("not a finite number".to_string()));
    }
    Ok(price)
}

pub fn parse_quantity(raw: &str) -> Result<i64, OperationError> {
    raw.parse()
        .map_err(|err: std::num::ParseIntError| OperationError::InputFormat {
            field: "cantidad",
            input: raw.to_string(),
            reason: err.to_string(),
        })
}

fn answer(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}
