//! Embedded demo dataset
//!
//! A small item table compiled into the binary so every command works
//! without a dataset path.

/// 24 household objects over five attributes; `0011` and `0023` share every value
pub const DEMO_ITEMS_JSON: &str = include_str!("../../data/demo_items.json");

/// Number of objects in `DEMO_ITEMS_JSON`
pub const DEMO_ITEMS_COUNT: usize = 24;
