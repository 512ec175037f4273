//! Object/attribute table
//!
//! Holds every candidate object together with its categorical attributes.
//! Object IDs and attribute names are kept in sorted order, and each
//! attribute's values are interned as small codes assigned in sorted value
//! order. Grouping by code is therefore the same as grouping by value, and
//! ordering by code is ordering by the value string.

use super::{CandidateSet, ItemIndex, OracleError};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Index of an attribute inside the table's sorted schema
pub type AttributeIndex = usize;

/// Interned attribute value (position in the attribute's sorted value list)
pub type ValueCode = u32;

/// Validated, immutable table of objects and their attribute values
#[derive(Debug, Clone)]
pub struct ItemTable {
    ids: Vec<String>,
    index_by_id: FxHashMap<String, ItemIndex>,
    attributes: Vec<String>,
    /// Distinct values per attribute, sorted
    values: Vec<Vec<String>>,
    /// Row-major `ids.len() x attributes.len()` value codes
    codes: Vec<ValueCode>,
}

impl ItemTable {
    /// Build a table from `(id, record)` pairs
    ///
    /// The attribute schema is taken from the record with the smallest ID and
    /// sorted. Every other record must carry exactly the same attribute names.
    ///
    /// # Errors
    ///
    /// - `OracleError::EmptyTable` if `records` is empty
    /// - `OracleError::DuplicateItem` if an ID occurs twice
    /// - `OracleError::SchemaMismatch` if a record's attribute names differ
    ///
    /// # Examples
    /// ```
    /// use kary_oracle::core::ItemTable;
    ///
    /// let table = ItemTable::from_records([
    ///     ("a", vec![("color", "red"), ("size", "S")]),
    ///     ("b", vec![("color", "blue"), ("size", "S")]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.attributes(), &["color", "size"]);
    /// ```
    pub fn from_records<I, K, R, A, V>(records: I) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: IntoIterator<Item = (A, V)>,
        A: Into<String>,
        V: Into<String>,
    {
        let mut rows: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (id, record) in records {
            let id = id.into();
            let record: BTreeMap<String, String> = record
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect();
            if rows.contains_key(&id) {
                return Err(OracleError::DuplicateItem(id));
            }
            rows.insert(id, record);
        }

        let (_, reference) = rows.iter().next().ok_or(OracleError::EmptyTable)?;
        let attributes: Vec<String> = reference.keys().cloned().collect();

        for (id, record) in &rows {
            if !record.keys().eq(attributes.iter()) {
                return Err(OracleError::SchemaMismatch {
                    id: id.clone(),
                    expected: attributes.clone(),
                    found: record.keys().cloned().collect(),
                });
            }
        }

        let values: Vec<Vec<String>> = attributes
            .iter()
            .map(|name| {
                rows.values()
                    .map(|record| record[name].as_str())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        let lookups: Vec<FxHashMap<&str, ValueCode>> = values
            .iter()
            .map(|distinct| {
                distinct
                    .iter()
                    .enumerate()
                    .map(|(code, value)| (value.as_str(), code as ValueCode))
                    .collect()
            })
            .collect();

        let mut codes = Vec::with_capacity(rows.len() * attributes.len());
        for record in rows.values() {
            // Record values iterate in the same sorted key order as `attributes`
            for (attribute, value) in record.values().enumerate() {
                codes.push(lookups[attribute][value.as_str()]);
            }
        }

        let ids: Vec<String> = rows.into_keys().collect();
        let index_by_id = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect();

        Ok(Self {
            ids,
            index_by_id,
            attributes,
            values,
            codes,
        })
    }

    /// Number of objects
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false for a constructed table, kept for API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Object IDs in sorted order (position = `ItemIndex`)
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    #[must_use]
    pub fn id(&self, index: ItemIndex) -> &str {
        &self.ids[index]
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<ItemIndex> {
        self.index_by_id.get(id).copied()
    }

    /// Attribute names in sorted schema order
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[inline]
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    #[must_use]
    pub fn attribute_name(&self, attribute: AttributeIndex) -> &str {
        &self.attributes[attribute]
    }

    /// Look up an attribute by name
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownAttribute` if the name is not in the schema.
    pub fn attribute_index(&self, name: &str) -> Result<AttributeIndex, OracleError> {
        self.attributes
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .map_err(|_| OracleError::UnknownAttribute(name.to_string()))
    }

    /// Distinct values of an attribute, sorted
    #[must_use]
    pub fn values_of(&self, attribute: AttributeIndex) -> &[String] {
        &self.values[attribute]
    }

    #[must_use]
    pub fn value_code_of(&self, attribute: AttributeIndex, value: &str) -> Option<ValueCode> {
        self.values[attribute]
            .binary_search_by(|candidate| candidate.as_str().cmp(value))
            .ok()
            .map(|code| code as ValueCode)
    }

    #[must_use]
    pub fn value_name(&self, attribute: AttributeIndex, code: ValueCode) -> &str {
        &self.values[attribute][code as usize]
    }

    /// Interned value of `attribute` for the object at `index`
    #[inline]
    #[must_use]
    pub fn value_code(&self, index: ItemIndex, attribute: AttributeIndex) -> ValueCode {
        self.codes[index * self.attributes.len() + attribute]
    }

    #[must_use]
    pub fn value(&self, index: ItemIndex, attribute: AttributeIndex) -> &str {
        self.value_name(attribute, self.value_code(index, attribute))
    }

    /// `(attribute, value)` pairs of one object in schema order
    pub fn record(&self, index: ItemIndex) -> impl Iterator<Item = (&str, &str)> + '_ {
        (0..self.num_attributes())
            .map(move |attribute| (self.attribute_name(attribute), self.value(index, attribute)))
    }

    /// The candidate set containing every object
    #[must_use]
    pub fn all_candidates(&self) -> CandidateSet {
        CandidateSet::full(self.len())
    }

    /// Canonicalize a collection of object IDs into a candidate set
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownItem` for the first ID not in the table.
    pub fn candidate_set<I, S>(&self, ids: I) -> Result<CandidateSet, OracleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| {
                let id = id.as_ref();
                self.index_of(id)
                    .ok_or_else(|| OracleError::UnknownItem(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(CandidateSet::from_indices)
    }
}
