// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record model and evaluation plumbing for the `sift` query engine.
//!
//! This crate holds the pieces every pipeline stage agrees on:
//! - the read-only entity shapes handed over by a data provider ([`Dataset`]),
//! - shared parameter cells that pipelines read at evaluation time ([`Param`]),
//! - named-field result records and the [`Recorder`] seam that consumes them, and
//! - the error taxonomy ([`QueryError`]).
//!
//! Sequence operators and the pipeline driver live in `sift_query`.

#![no_std]

extern crate alloc;

mod dataset;
mod entity;
mod error;
mod param;
mod recorder;
mod value;

pub use dataset::{Dataset, DatasetBuilder};
pub use entity::{Customer, Location, Order, Product, Supplier};
pub use error::{AggregateOp, QueryError};
pub use param::Param;
pub use recorder::{CollectingRecorder, Recorder, TextRecorder};
pub use value::{Record, ToRecord, Value};

/// Calendar date type used by order records.
pub use chrono::NaiveDate;
