//! Interactive inventory for electronic and perishable products.
//!
//! The crate is layered leaf-first: `product` holds the record model and its
//! JSON codec, `repository` reads and writes the whole data file, `crud`
//! implements the menu operations against a caller-owned collection, and
//! `shell` runs the menu loop that owns that collection for one session. The
//! `productos` binary wires the shell to stdin/stdout.

pub mod config;
pub mod console;
pub mod crud;
pub mod product;
pub mod repository;
pub mod shell;

pub use config::{Config, Invocation};
pub use console::Console;
pub use crud::{
    OperationError, ProductSelector, create_product, delete_product, list_products, listing,
    update_product,
};
pub use product::{DecodeError, Product, ProductKind, decode, encode};
pub use repository::{DEFAULT_DATA_FILE, PersistenceError, load, save};
pub use shell::{MenuChoice, Shell, ShellError};
