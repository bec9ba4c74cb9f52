//! Catalog module.
//!
//! Contains the product option shape, the entry-type to endpoint mapping,
//! and the response decoders.

mod decode;
mod option;
mod source;

pub use decode::{
    decode_record, normalize_catalog, normalize_record, CapitalizedRecord, RecordFields,
    SnakeCaseRecord,
};
pub use option::ProductOption;
pub use source::{CatalogSource, ProductCategory};
