//! Common types and traits for all document records

pub mod doc_meta;
pub mod doctype;
pub mod item_blob;
pub mod lenient;

// Re-exports
pub use doc_meta::DocMeta;
pub use doctype::DocType;
pub use item_blob::{decode_items, decode_items_lenient, encode_items, LIST_KEY};
