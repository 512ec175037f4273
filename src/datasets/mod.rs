//! Datasets for the oracle
//!
//! JSON loading plus a demo table embedded in the binary.

mod embedded;
pub mod loader;

pub use embedded::{DEMO_ITEMS_COUNT, DEMO_ITEMS_JSON};
pub use loader::{DatasetError, demo_items, items_from_json, load_items_from_file};
