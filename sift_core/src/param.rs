// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared parameter cells.
//!
//! A pipeline that depends on an external value (a threshold, a price tier boundary) holds a
//! clone of a [`Param`] rather than the value itself. Every clone points at the same cell, so a
//! caller that sets a new value between two enumerations is observed by the second one.

extern crate alloc;

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

/// A shared, mutable cell read by pipelines at evaluation time.
///
/// Cloning a `Param` shares the cell; it does not copy the value.
pub struct Param<T: Copy> {
    cell: Rc<Cell<T>>,
}

impl<T: Copy> Param<T> {
    /// Creates a new cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Sets a new value, visible to every clone.
    pub fn set(&self, value: T) {
        self.cell.set(value);
    }

    /// Sets a new value and returns the previous one.
    pub fn replace(&self, value: T) -> T {
        self.cell.replace(value)
    }

    /// Returns `true` when both handles share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Copy> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Copy + Default> Default for Param<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn clones_share_the_cell() {
        let threshold = Param::new(100_000.0_f64);
        let captured = threshold.clone();
        assert!(threshold.ptr_eq(&captured));

        threshold.set(90.0);
        assert_eq!(captured.get(), 90.0);

        let previous = captured.replace(10.0);
        assert_eq!(previous, 90.0);
        assert_eq!(threshold.get(), 10.0);
    }
}
