// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping and group-join operators.
//!
//! Both operators need a lookup table before they can emit anything, so the table is built on
//! the first pull of each enumeration (never at composition time) and dropped with the iterator.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use sift_core::QueryError;
use smallvec::SmallVec;

use crate::Seq;

/// One group produced by [`Seq::group`]: a key and its members.
#[derive(Debug, Clone)]
pub struct Grouping<'a, K, T> {
    /// The group key.
    pub key: K,
    /// Members in input order.
    pub members: Seq<'a, T>,
}

impl<'a, T: Clone + 'a> Seq<'a, T> {
    /// Partitions elements by key and maps each group through `result`.
    ///
    /// Keys are compared by value. Groups are emitted in the order their key first occurs, and
    /// members keep their input order.
    pub fn group_by<K, R, KF, RF>(self, key: KF, result: RF) -> Seq<'a, R>
    where
        K: Eq + Hash + Clone + 'a,
        R: 'a,
        KF: Fn(&T) -> K + 'a,
        RF: Fn(K, Self) -> R + 'a,
    {
        let result = Rc::new(result);
        Seq::new(move || {
            let groups = partition(self.iter(), &key);
            tracing::trace!(groups = groups.len(), "partitioned input");
            let result = Rc::clone(&result);
            groups
                .into_iter()
                .map(move |(k, members)| result(k, Seq::shared(members.into())))
        })
    }

    /// Partitions elements by key, yielding each key with its members.
    pub fn group<K, KF>(self, key: KF) -> Seq<'a, Grouping<'a, K, T>>
    where
        K: Eq + Hash + Clone + 'a,
        KF: Fn(&T) -> K + 'a,
    {
        self.group_by(key, |key, members| Grouping { key, members })
    }
}

impl<'a, T: 'a> Seq<'a, T> {
    /// Left group-join: pairs every outer element with the inner elements sharing its key.
    ///
    /// Every outer element is yielded exactly once, in outer order; one without matches is paired
    /// with an empty sequence. Inner elements that match no outer element are dropped.
    pub fn group_join<U, K, R, OK, IK, RF>(
        self,
        inner: Seq<'a, U>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Seq<'a, R>
    where
        U: Clone + 'a,
        K: Eq + Hash + 'a,
        R: 'a,
        OK: Fn(&T) -> K + 'a,
        IK: Fn(&U) -> K + 'a,
        RF: Fn(T, Seq<'a, U>) -> R + 'a,
    {
        let outer_key = Rc::new(outer_key);
        let result = Rc::new(result);
        Seq::new(move || {
            let lookup = Lookup::build(inner.iter().map(|item| (inner_key(&item), item)));
            let outer_key = Rc::clone(&outer_key);
            let result = Rc::clone(&result);
            self.iter().map(move |item| {
                let matches = lookup.get(&outer_key(&item));
                result(item, matches)
            })
        })
    }

    /// Left group-join over dynamically shaped [`CompositeKey`]s.
    ///
    /// Behaves like [`Seq::group_join`], but first checks that every inner and outer key of the
    /// enumeration has the same field names. Both sides are keyed on the first pull, before any
    /// row is produced, so a key of a different shape makes [`QueryError::KeyMismatch`] the only
    /// item of that enumeration.
    pub fn try_group_join<U, R, OK, IK, RF>(
        self,
        inner: Seq<'a, U>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Seq<'a, Result<R, QueryError>>
    where
        U: Clone + 'a,
        R: 'a,
        OK: Fn(&T) -> CompositeKey + 'a,
        IK: Fn(&U) -> CompositeKey + 'a,
        RF: Fn(T, Seq<'a, U>) -> R + 'a,
    {
        let result = Rc::new(result);
        Seq::new(move || {
            let mut shape = None;
            let mut pairs = Vec::new();
            for item in inner.iter() {
                let key = inner_key(&item);
                if let Err(err) = check_shape(&mut shape, &key) {
                    tracing::debug!(%err, "inner join key rejected");
                    return ShapeChecked::Failed(Some(err));
                }
                pairs.push((key, item));
            }
            let mut keyed = Vec::new();
            for item in self.iter() {
                let key = outer_key(&item);
                if let Err(err) = check_shape(&mut shape, &key) {
                    tracing::debug!(%err, "outer join key rejected");
                    return ShapeChecked::Failed(Some(err));
                }
                keyed.push((key, item));
            }
            let lookup = Lookup::build(pairs);
            let result = Rc::clone(&result);
            ShapeChecked::Running(
                keyed
                    .into_iter()
                    .map(move |(key, item)| Ok::<R, QueryError>(result(item, lookup.get(&key)))),
            )
        })
    }
}

fn partition<T, K>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        match index.entry(key(&item)) {
            Entry::Occupied(e) => groups[*e.get()].1.push(item),
            Entry::Vacant(e) => {
                groups.push((e.key().clone(), vec![item]));
                e.insert(groups.len() - 1);
            }
        }
    }
    groups
}

/// Inner side of a group-join, keyed for lookup.
struct Lookup<K, U> {
    matches: HashMap<K, Rc<[U]>>,
}

impl<K: Eq + Hash, U: Clone> Lookup<K, U> {
    fn build(pairs: impl IntoIterator<Item = (K, U)>) -> Self {
        let mut grouped: HashMap<K, Vec<U>> = HashMap::new();
        for (key, item) in pairs {
            grouped.entry(key).or_default().push(item);
        }
        Self {
            matches: grouped.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    fn get<'a>(&self, key: &K) -> Seq<'a, U>
    where
        U: 'a,
    {
        match self.matches.get(key) {
            Some(items) => Seq::shared(Rc::clone(items)),
            None => Seq::empty(),
        }
    }
}

enum ShapeChecked<I> {
    Failed(Option<QueryError>),
    Running(I),
}

impl<R, I: Iterator<Item = Result<R, QueryError>>> Iterator for ShapeChecked<I> {
    type Item = Result<R, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Failed(err) => err.take().map(Err),
            Self::Running(outer) => outer.next(),
        }
    }
}

/// A scalar part of a [`CompositeKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// String part.
    Str(String),
    /// Integer part.
    Int(i64),
    /// Boolean part.
    Bool(bool),
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for KeyPart {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A key built from named parts at run time.
///
/// Two keys are equal when they have the same field names, in the same order, with equal
/// parts. Typed key structs (such as [`sift_core::Location`]) are preferable when the shape is
/// known up front; this type exists for keys assembled from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    parts: SmallVec<[(&'static str, KeyPart); 4]>,
}

impl CompositeKey {
    /// Creates a key with no parts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named part.
    #[must_use]
    pub fn with(mut self, name: &'static str, part: impl Into<KeyPart>) -> Self {
        self.parts.push((name, part.into()));
        self
    }

    /// Field names, in order.
    pub fn shape(&self) -> Vec<&'static str> {
        self.parts.iter().map(|(name, _)| *name).collect()
    }

    /// Returns `true` when both keys have the same field names in the same order.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.parts.len() == other.parts.len()
            && self
                .parts
                .iter()
                .zip(&other.parts)
                .all(|((a, _), (b, _))| a == b)
    }
}

fn check_shape(expected: &mut Option<CompositeKey>, key: &CompositeKey) -> Result<(), QueryError> {
    match expected {
        None => {
            *expected = Some(key.clone());
            Ok(())
        }
        Some(first) if first.same_shape(key) => Ok(()),
        Some(first) => Err(QueryError::KeyMismatch {
            expected: first.shape(),
            found: key.shape(),
        }),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Site {
        name: &'static str,
        country: &'static str,
        city: &'static str,
    }

    fn site(name: &'static str, country: &'static str, city: &'static str) -> Site {
        Site {
            name,
            country,
            city,
        }
    }

    #[test]
    fn group_by_uses_first_occurrence_order() {
        let words = ["apple", "bob", "avocado", "cat", "banana"];
        let groups: Vec<(char, Vec<&str>)> = Seq::from_slice(&words)
            .map(|w| *w)
            .group_by(
                |w| w.chars().next().unwrap_or(' '),
                |k, members| (k, members.to_vec()),
            )
            .to_vec();
        assert_eq!(
            groups,
            vec![
                ('a', vec!["apple", "avocado"]),
                ('b', vec!["bob", "banana"]),
                ('c', vec!["cat"]),
            ]
        );
    }

    #[test]
    fn group_members_restart() {
        let values = [1, 2, 3, 4];
        let groups = Seq::from_slice(&values).map(|v| *v).group(|v| v % 2 == 0).to_vec();
        assert_eq!(groups.len(), 2);
        let odd = &groups[0];
        assert!(!odd.key);
        assert_eq!(odd.members.to_vec(), vec![1, 3]);
        assert_eq!(odd.members.count(), 2);
    }

    #[test]
    fn group_join_keeps_unmatched_outer_elements() {
        let customers = [
            site("Alfreds", "Germany", "Berlin"),
            site("Around the Horn", "UK", "London"),
            site("Bottom-Dollar", "Canada", "Tsawassen"),
        ];
        let suppliers = [
            site("Exotic Liquids", "UK", "London"),
            site("Heli", "Germany", "Berlin"),
            site("Specialty Biscuits", "UK", "London"),
            site("Tokyo Traders", "Japan", "Tokyo"),
        ];
        let joined: Vec<(&str, Vec<&str>)> = Seq::from_slice(&customers)
            .group_join(
                Seq::from_slice(&suppliers),
                |c| (c.country, c.city),
                |s| (s.country, s.city),
                |c, matched| (c.name, matched.map(|s| s.name).to_vec()),
            )
            .to_vec();
        assert_eq!(
            joined,
            vec![
                ("Alfreds", vec!["Heli"]),
                ("Around the Horn", vec!["Exotic Liquids", "Specialty Biscuits"]),
                ("Bottom-Dollar", vec![]),
            ]
        );
    }

    #[test]
    fn try_group_join_matches_on_all_key_fields() {
        let customers = [site("A", "UK", "London"), site("B", "UK", "Cowes")];
        let suppliers = [site("S", "UK", "London"), site("T", "USA", "London")];
        let key = |s: &&Site| {
            CompositeKey::new()
                .with("country", s.country)
                .with("city", s.city)
        };
        let joined: Vec<_> = Seq::from_slice(&customers)
            .try_group_join(Seq::from_slice(&suppliers), key, key, |c, m| {
                (c.name, m.count())
            })
            .to_vec();
        assert_eq!(joined, vec![Ok(("A", 1)), Ok(("B", 0))]);
    }

    #[test]
    fn try_group_join_fails_fast_on_shape_mismatch() {
        let customers = [site("A", "UK", "London"), site("B", "UK", "Cowes")];
        let suppliers = [site("S", "UK", "London")];
        let joined: Vec<_> = Seq::from_slice(&customers)
            .try_group_join(
                Seq::from_slice(&suppliers),
                |c| {
                    let key = CompositeKey::new().with("country", c.country);
                    if c.name == "A" {
                        key.with("city", c.city)
                    } else {
                        key.with("town", c.city)
                    }
                },
                |s| {
                    CompositeKey::new()
                        .with("country", s.country)
                        .with("city", s.city)
                },
                |c, m| (c.name.to_string(), m.count()),
            )
            .to_vec();
        assert_eq!(
            joined,
            vec![Err(QueryError::KeyMismatch {
                expected: vec!["country", "city"],
                found: vec!["country", "town"],
            })]
        );
    }

    #[test]
    fn try_group_join_checks_inner_keys_too() {
        let customers = [site("A", "UK", "London")];
        let suppliers = [site("S", "UK", "London"), site("T", "UK", "London")];
        let joined: Vec<Result<usize, QueryError>> = Seq::from_slice(&customers)
            .try_group_join(
                Seq::from_slice(&suppliers),
                |c| CompositeKey::new().with("city", c.city),
                |s| {
                    if s.name == "S" {
                        CompositeKey::new().with("city", s.city)
                    } else {
                        CompositeKey::new().with("city", s.city).with("rank", 1_i64)
                    }
                },
                |_, m| m.count(),
            )
            .to_vec();
        assert_eq!(joined.len(), 1);
        assert!(matches!(joined[0], Err(QueryError::KeyMismatch { .. })));
    }
}
