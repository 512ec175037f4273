//! Small item tables shared by the oracle and command tests

use crate::core::ItemTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `a: red/S`, `b: red/L`, `c: blue/S`
pub fn three_objects() -> ItemTable {
    ItemTable::from_records([
        ("a", vec![("color", "red"), ("size", "S")]),
        ("b", vec![("color", "red"), ("size", "L")]),
        ("c", vec![("color", "blue"), ("size", "S")]),
    ])
    .unwrap()
}

/// `x` and `y` agree on every attribute; `z` differs in color
pub fn twins() -> ItemTable {
    ItemTable::from_records([
        ("x", vec![("color", "red"), ("size", "S")]),
        ("y", vec![("color", "red"), ("size", "S")]),
        ("z", vec![("color", "blue"), ("size", "S")]),
    ])
    .unwrap()
}

pub fn single() -> ItemTable {
    ItemTable::from_records([("only", vec![("color", "red"), ("size", "S")])]).unwrap()
}

/// Full factorial table: every combination of `values` values over
/// `attributes` attributes, so exactly `attributes` questions are needed
pub fn grid(attributes: usize, values: usize) -> ItemTable {
    let count = values.pow(attributes as u32);
    let records = (0..count).map(|n| {
        let record: Vec<(String, String)> = (0..attributes)
            .map(|a| {
                let digit = n / values.pow(a as u32) % values;
                (format!("attr{a}"), format!("v{digit}"))
            })
            .collect();
        (format!("{n:04}"), record)
    });
    ItemTable::from_records(records).unwrap()
}

/// Random table with possible duplicate attribute vectors
pub fn random_table(seed: u64, items: usize, attributes: usize, max_values: u32) -> ItemTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let records: Vec<(String, Vec<(String, String)>)> = (0..items)
        .map(|n| {
            let record = (0..attributes)
                .map(|a| {
                    let value = rng.random_range(0..max_values);
                    (format!("attr{a}"), format!("v{value}"))
                })
                .collect();
            (format!("{n:04}"), record)
        })
        .collect();
    ItemTable::from_records(records).unwrap()
}
