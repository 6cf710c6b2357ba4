// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat records and immutable record sets.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashSet;

/// A single field value in a [`Record`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// An explicit null (or a value the loader could not represent).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
}

impl Value {
    /// Returns the value as a finite number.
    ///
    /// Text, booleans, null and non-finite numbers all yield `None`, so a missing or
    /// malformed field can never poison a scale domain.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a category key.
    ///
    /// Strings are used verbatim, numbers and booleans are formatted. `Null` has no
    /// category.
    pub fn category(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(v) => Some(v.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A flat record: an ordered mapping from field name to [`Value`].
///
/// Records are small (a handful of fields), so lookup is a linear scan that preserves
/// the authored field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this record with `field` set to `value` (replacing any previous value).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets `field` to `value`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Returns the raw value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Returns `field` as a finite number, if present and numeric.
    pub fn f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Returns `field` as a category key, if present and non-null.
    pub fn category(&self, field: &str) -> Option<String> {
        self.get(field).and_then(Value::category)
    }

    /// Iterates `(field, value)` pairs in authored order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// An immutable, versioned set of records.
///
/// Cloning is cheap (the rows are shared). A record set is never edited in place:
/// reloading data produces a new set via [`RecordSet::replaced`].
#[derive(Clone, Debug)]
pub struct RecordSet {
    version: u64,
    rows: Arc<[Record]>,
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl RecordSet {
    /// Creates a record set at version 1.
    pub fn new(rows: Vec<Record>) -> Self {
        Self {
            version: 1,
            rows: Arc::from(rows),
        }
    }

    /// Creates an empty record set.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns a new record set holding `rows`, with a bumped version.
    pub fn replaced(&self, rows: Vec<Record>) -> Self {
        Self {
            version: self.version.wrapping_add(1),
            rows: Arc::from(rows),
        }
    }

    /// Returns the version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the record at `row`.
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    /// Returns all records as a slice.
    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    /// Iterates the records in load order.
    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.rows.iter()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row/field access used by scale inference, marks and legends.
pub trait TableData {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the raw value at `(row, field)`.
    fn value(&self, row: usize, field: &str) -> Option<&Value>;

    /// Returns a finite number at `(row, field)`.
    fn f64(&self, row: usize, field: &str) -> Option<f64> {
        self.value(row, field).and_then(Value::as_f64)
    }

    /// Returns a category key at `(row, field)`.
    fn category(&self, row: usize, field: &str) -> Option<String> {
        self.value(row, field).and_then(Value::category)
    }
}

impl TableData for [Record] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn value(&self, row: usize, field: &str) -> Option<&Value> {
        self.get(row)?.get(field)
    }
}

impl TableData for RecordSet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize, field: &str) -> Option<&Value> {
        self.rows.get(row)?.get(field)
    }
}

/// Returns the distinct category keys of `field`, in first-seen order.
///
/// Rows where the field is missing or null are skipped.
pub fn distinct_categories(data: &dyn TableData, field: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for row in 0..data.row_count() {
        let Some(key) = data.category(row, field) else {
            continue;
        };
        if seen.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn iris_row(species: &str, sepal: f64) -> Record {
        Record::new()
            .with("species", species)
            .with("sepalLength", sepal)
    }

    #[test]
    fn numeric_access_filters_missing_and_non_numeric_fields() {
        let r = Record::new()
            .with("a", 1.5)
            .with("b", "text")
            .with("c", Value::Null)
            .with("d", f64::NAN);
        assert_eq!(r.f64("a"), Some(1.5));
        assert_eq!(r.f64("b"), None);
        assert_eq!(r.f64("c"), None);
        assert_eq!(r.f64("d"), None);
        assert_eq!(r.f64("missing"), None);
    }

    #[test]
    fn insert_replaces_existing_field_in_place() {
        let r = Record::new().with("a", 1.0).with("b", 2.0).with("a", 3.0);
        assert_eq!(r.len(), 2);
        let names: Vec<&str> = r.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(r.f64("a"), Some(3.0));
    }

    #[test]
    fn numeric_categories_format_without_trailing_zero() {
        let r = Record::new().with("month", 1).with("flag", true);
        assert_eq!(r.category("month").as_deref(), Some("1"));
        assert_eq!(r.category("flag").as_deref(), Some("true"));
    }

    #[test]
    fn distinct_categories_keep_first_seen_order() {
        let data = RecordSet::new(vec![
            iris_row("setosa", 5.1),
            iris_row("versicolor", 7.0),
            iris_row("setosa", 4.9),
            Record::new().with("sepalLength", 6.3),
            iris_row("virginica", 6.3),
        ]);
        assert_eq!(
            distinct_categories(&data, "species"),
            vec!["setosa", "versicolor", "virginica"]
        );
    }

    #[test]
    fn replaced_bumps_version_and_leaves_original_untouched() {
        let a = RecordSet::new(vec![iris_row("setosa", 5.1)]);
        let b = a.replaced(vec![]);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert_eq!(b.version(), a.version() + 1);
    }
}
