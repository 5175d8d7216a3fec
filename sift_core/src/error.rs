// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while evaluating a pipeline.
//!
//! Empty filter results and empty groups are not errors. Everything reported here is a
//! programming or configuration mistake that the engine refuses to paper over with a default.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Aggregation operation over a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Count elements (0 on empty input).
    Count,
    /// Sum values (0 on empty input).
    Sum,
    /// Minimum value (undefined on empty input).
    Min,
    /// Maximum value (undefined on empty input).
    Max,
    /// Mean value (undefined on empty input).
    Mean,
}

impl AggregateOp {
    /// Returns `true` for operations that have no value over zero elements.
    pub fn requires_input(self) -> bool {
        matches!(self, Self::Min | Self::Max | Self::Mean)
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "average",
        };
        f.write_str(name)
    }
}

/// Errors returned while evaluating or driving a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `Min`, `Max`, or `Mean` was requested over zero elements.
    EmptyAggregate {
        /// The operation that had no input.
        op: AggregateOp,
    },
    /// Composite join keys produced inconsistent field sets within one evaluation.
    KeyMismatch {
        /// Field names of the first key seen.
        expected: Vec<&'static str>,
        /// Field names of the offending key.
        found: Vec<&'static str>,
    },
    /// The driver was asked for a pipeline name that is not registered.
    UnknownQuery(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAggregate { op } => {
                write!(f, "{op} is undefined over an empty sequence")
            }
            Self::KeyMismatch { expected, found } => write!(
                f,
                "composite key shape mismatch: expected fields {expected:?}, found {found:?}"
            ),
            Self::UnknownQuery(name) => write!(f, "no pipeline named `{name}`"),
        }
    }
}

impl core::error::Error for QueryError {}
