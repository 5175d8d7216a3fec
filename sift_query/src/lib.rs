// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy, composable query pipelines over in-memory records.
//!
//! This crate provides:
//! - [`Seq`], a restartable lazy sequence with filter/project/flatten, grouping, left
//!   group-join, stable multi-key sorting, and numeric aggregates,
//! - [`Pipeline`] and [`Program`], which name deferred queries and drive them into a
//!   [`sift_core::Recorder`] one record at a time, and
//! - [`queries`], the sample pipelines over a customer/order/product/supplier dataset.
//!
//! Evaluation is single-threaded and pull-based:
//! - composing a pipeline runs nothing, and
//! - every enumeration re-runs the chain from its source, observing the current value of any
//!   captured [`sift_core::Param`].

#![no_std]

extern crate alloc;

mod aggregate;
mod group;
mod pipeline;
pub mod queries;
mod seq;
mod sort;
mod tier;

pub use group::{CompositeKey, Grouping, KeyPart};
pub use pipeline::{Pipeline, Program};
pub use seq::Seq;
pub use sort::{Ordered, SortOrder};
pub use tier::{PriceThresholds, PriceTier};
