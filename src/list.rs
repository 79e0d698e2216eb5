//! Homogeneous ordered lists.
//!
//! [`List`] backs every list-shaped field: dataset series, `borderDash`,
//! `labels` and the dataset collection itself. Building one from a [`Value`]
//! validates every element and stops at the first failure, reporting its
//! index; no partially built list is ever returned.
//!
//! ```rust
//! use chartjs_schema::{value, Error, List};
//! use chartjs_schema::model::FromValue;
//!
//! let dash: List<i64> = List::from_value(&value!([5, 10])).unwrap();
//! assert_eq!(dash.as_slice(), &[5, 10]);
//!
//! let err = List::<i64>::from_value(&value!([5, "ten"])).unwrap_err();
//! assert!(matches!(err, Error::ElementValidation { .. }));
//! ```

use crate::model::{FromValue, ToValue};
use crate::value::describe;
use crate::{Error, Result, SerializeOptions, Value};
use std::ops::Index;

/// An ordered list whose elements all share type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct List<T>(Vec<T>);

impl<T> List<T> {
    #[must_use]
    pub fn new() -> Self {
        List(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        List(Vec::with_capacity(capacity))
    }

    /// Appends an element, keeping insertion order.
    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: FromValue> List<T> {
    /// Validates a slice of values element by element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementValidation`] naming the first bad index.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| T::from_value(value).map_err(|e| Error::element_at(index, e)))
            .collect::<Result<Vec<_>>>()
            .map(List)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        List(items)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T: ToValue> ToValue for List<T> {
    fn to_value(&self, options: &SerializeOptions) -> Result<Value> {
        self.0
            .iter()
            .map(|item| item.to_value(options))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: FromValue> FromValue for List<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => List::from_values(items),
            other => Err(Error::schema("array", &describe(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_fast_reports_first_index() {
        let values = vec![Value::from("a"), Value::from(1), Value::from(2)];
        let err = List::<String>::from_values(&values).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid element at index 1: Invalid value: expected string, found number 1"
        );
    }

    #[test]
    fn test_empty_and_append() {
        let mut labels: List<String> = List::new();
        assert!(labels.is_empty());
        labels.push("0".to_string());
        labels.extend(["1".to_string(), "2".to_string()]);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[2], "2");
        let collected: Vec<_> = labels.iter().map(String::as_str).collect();
        assert_eq!(collected, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_non_array_input() {
        let err = List::<i64>::from_value(&Value::from(3)).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[test]
    fn test_to_value_keeps_order() {
        let list: List<i64> = vec![3, 1, 2].into();
        let value = list.to_value(&SerializeOptions::new()).unwrap();
        assert_eq!(value.to_string(), "[3,1,2]");
    }
}
