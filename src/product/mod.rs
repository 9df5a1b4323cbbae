//! Product records and their JSON mapping.
//!
//! `model` holds the closed set of product shapes; `codec` converts them to
//! and from the flat JSON objects stored in `productos.json`. The stored
//! format carries no type tag, so `codec::decode` infers the variant from
//! which optional keys are present.

pub mod codec;
pub mod model;

pub use codec::{DecodeError, decode, encode};
pub use model::{Product, ProductKind};
