// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-key stable sorting.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::Seq;

/// Sorting order for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

type Comparator<'a, T> = dyn Fn(&T, &T) -> Ordering + 'a;

/// A sequence with a chain of sort keys, built by [`Seq::order_by`] and [`Ordered::then_by`].
///
/// Keys are compared in the order they were added; later keys only break ties of earlier ones.
/// Elements equal on every key keep their input order.
pub struct Ordered<'a, T> {
    source: Seq<'a, T>,
    keys: Vec<Rc<Comparator<'a, T>>>,
}

impl<T> Clone for Ordered<'_, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<T> fmt::Debug for Ordered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ordered")
            .field("keys", &self.keys.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Seq<'a, T> {
    /// Sorts by a primary key.
    ///
    /// Keys only need [`PartialOrd`]. A key that does not compare equal to itself (such as
    /// `NaN`) sorts after every comparable key in ascending order, and such keys are equal to each
    /// other, so the comparator stays a total order. `None` sorts before `Some` in ascending order.
    pub fn order_by<K, F>(self, key: F, order: SortOrder) -> Ordered<'a, T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + 'a,
    {
        Ordered {
            source: self,
            keys: Vec::new(),
        }
        .then_by(key, order)
    }
}

impl<'a, T: 'a> Ordered<'a, T> {
    /// Adds a tie-breaking key.
    #[must_use]
    pub fn then_by<K, F>(mut self, key: F, order: SortOrder) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + 'a,
    {
        self.keys.push(Rc::new(move |a: &T, b: &T| {
            order.apply(compare_keys(&key(a), &key(b)))
        }));
        self
    }

    /// Returns the sorted sequence.
    ///
    /// Sorting needs the whole input, so each enumeration collects its source once and then
    /// yields in key order.
    pub fn into_seq(self) -> Seq<'a, T> {
        let Self { source, keys } = self;
        let keys: Rc<[Rc<Comparator<'a, T>>]> = keys.into();
        Seq::new(move || {
            let mut items: Vec<T> = source.iter().collect();
            items.sort_by(|a, b| compare_chain(&keys, a, b));
            items
        })
    }

    /// Starts a fresh sorted enumeration.
    pub fn iter(&self) -> Box<dyn Iterator<Item = T> + 'a> {
        self.clone().into_seq().iter()
    }
}

impl<'a, T: 'a> From<Ordered<'a, T>> for Seq<'a, T> {
    fn from(ordered: Ordered<'a, T>) -> Self {
        ordered.into_seq()
    }
}

fn compare_keys<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    let comparable = |k: &K| k.partial_cmp(k).is_some();
    match (comparable(a), comparable(b)) {
        (true, true) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

fn compare_chain<T>(keys: &[Rc<Comparator<'_, T>>], a: &T, b: &T) -> Ordering {
    for key in keys {
        match key(a, b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Row {
        first: Option<u32>,
        turnover: f64,
        name: &'static str,
    }

    fn row(first: Option<u32>, turnover: f64, name: &'static str) -> Row {
        Row {
            first,
            turnover,
            name,
        }
    }

    #[test]
    fn tie_breaks_follow_key_order() {
        let rows = [
            row(Some(1), 300.0, "Zed"),
            row(Some(1), 100.0, "Ann"),
            row(Some(1), 300.0, "Bob"),
        ];
        let sorted = Seq::from_slice(&rows)
            .map(|r| *r)
            .order_by(|r| r.first, SortOrder::Asc)
            .then_by(|r| r.turnover, SortOrder::Desc)
            .then_by(|r| r.name, SortOrder::Asc)
            .into_seq();
        let names: Vec<_> = sorted.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Bob", "Zed", "Ann"]);
    }

    #[test]
    fn missing_keys_sort_first_ascending() {
        let rows = [
            row(Some(2), 0.0, "b"),
            row(None, 0.0, "none"),
            row(Some(1), 0.0, "a"),
        ];
        let names: Vec<_> = Seq::from_slice(&rows)
            .order_by(|r| r.first, SortOrder::Asc)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["none", "a", "b"]);
    }

    #[test]
    fn nan_keys_sort_last_and_keep_input_order() {
        let rows = [
            row(None, f64::NAN, "n1"),
            row(None, 2.0, "two"),
            row(Some(1), f64::NAN, "n2"),
            row(None, 1.0, "one"),
        ];
        let asc: Vec<_> = Seq::from_slice(&rows)
            .order_by(|r| r.turnover, SortOrder::Asc)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(asc, vec!["one", "two", "n1", "n2"]);

        let desc: Vec<_> = Seq::from_slice(&rows)
            .order_by(|r| r.turnover, SortOrder::Desc)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(desc, vec!["n1", "n2", "two", "one"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let rows = [
            row(None, 1.0, "x"),
            row(None, 2.0, "y"),
            row(None, 1.0, "z"),
        ];
        let names: Vec<_> = Seq::from_slice(&rows)
            .order_by(|r| r.turnover, SortOrder::Desc)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["y", "x", "z"]);
    }
}
