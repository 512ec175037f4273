//! K-ary Question Oracle
//!
//! Exact dynamic-programming oracle for identifying a hidden object by asking
//! multi-way attribute questions, minimizing the expected number of questions
//! under a uniform prior.
//!
//! # Quick Start
//!
//! ```rust
//! use kary_oracle::core::ItemTable;
//! use kary_oracle::oracle::ExactQueryOracle;
//!
//! let items = ItemTable::from_records([
//!     ("mug", vec![("color", "red"), ("material", "glass")]),
//!     ("cup", vec![("color", "red"), ("material", "metal")]),
//!     ("pan", vec![("color", "black"), ("material", "metal")]),
//! ])
//! .unwrap();
//!
//! let mut oracle = ExactQueryOracle::new(items).unwrap();
//! println!("Expected questions: {:.3}", oracle.optimal_root_cost());
//!
//! let (entropies, asked) = oracle.simulate_target("mug").unwrap().into_parts();
//! assert_eq!(entropies.len(), asked.len() + 1);
//! ```

// Core domain types
pub mod core;

// Exact solver, trajectories and diagnostics
pub mod oracle;

// Item tables
pub mod datasets;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
