// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restartable lazy sequences.
//!
//! A [`Seq`] is a shared factory of iterators. Composing operators only wraps the factory; no
//! element is produced until [`Seq::iter`] is called, and every call re-runs the whole chain from
//! its source. Nothing is cached between enumerations, so a predicate that reads a
//! [`sift_core::Param`] sees the value current at the time of each enumeration.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

type Factory<'a, T> = dyn Fn() -> Box<dyn Iterator<Item = T> + 'a> + 'a;

/// A finite, restartable, lazily evaluated sequence.
pub struct Seq<'a, T> {
    factory: Rc<Factory<'a, T>>,
}

impl<T> Clone for Seq<'_, T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Seq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq").finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Seq<'a, T> {
    /// Creates a sequence from a factory that is invoked once per enumeration.
    pub fn new<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        let factory: Rc<Factory<'a, T>> =
            Rc::new(move || -> Box<dyn Iterator<Item = T> + 'a> { Box::new(factory().into_iter()) });
        Self { factory }
    }

    /// A sequence with no elements.
    pub fn empty() -> Self {
        Self::new(core::iter::empty::<T>)
    }

    /// A sequence over shared, already-materialized elements, yielding clones.
    pub fn shared(items: Rc<[T]>) -> Self
    where
        T: Clone,
    {
        Self::new(move || {
            let items = Rc::clone(&items);
            (0..items.len()).map(move |i| items[i].clone())
        })
    }

    /// Starts a fresh enumeration from the source.
    pub fn iter(&self) -> Box<dyn Iterator<Item = T> + 'a> {
        (self.factory)()
    }

    /// Keeps elements for which `predicate` holds, in input order.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        let predicate = Rc::new(predicate);
        Self::new(move || {
            let predicate = Rc::clone(&predicate);
            self.iter().filter(move |item| predicate(item))
        })
    }

    /// Projects each element, one output per input, in input order.
    pub fn map<U, F>(self, selector: F) -> Seq<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        let selector = Rc::new(selector);
        Seq::new(move || {
            let selector = Rc::clone(&selector);
            self.iter().map(move |item| selector(item))
        })
    }

    /// Replaces each element by the elements of its sub-sequence, in input then sub-order.
    pub fn flat_map<U, I, F>(self, selector: F) -> Seq<'a, U>
    where
        U: 'a,
        I: IntoIterator<Item = U> + 'a,
        I::IntoIter: 'a,
        F: Fn(T) -> I + 'a,
    {
        let selector = Rc::new(selector);
        Seq::new(move || {
            let selector = Rc::clone(&selector);
            self.iter().flat_map(move |item| selector(item))
        })
    }

    /// Returns `true` on the first element matching `predicate`.
    ///
    /// Stops pulling as soon as a match is found.
    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.iter().any(|item| predicate(&item))
    }

    /// Materializes one enumeration.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<'a, T: 'a> Seq<'a, &'a T> {
    /// A sequence borrowing the elements of a slice.
    pub fn from_slice(items: &'a [T]) -> Self {
        Self::new(move || items.iter())
    }
}

impl<'a, T: 'a> IntoIterator for &Seq<'a, T> {
    type Item = T;
    type IntoIter = Box<dyn Iterator<Item = T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
