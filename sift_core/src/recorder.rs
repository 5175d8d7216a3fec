// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recorder seam: consumers of produced records.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::value::{Record, Value};

/// Consumes the records produced by a pipeline.
///
/// A recorder never feeds data back into the engine. `begin`/`end` bracket each pipeline run so
/// a recorder can print headers or separators; both default to doing nothing.
pub trait Recorder {
    /// Called before the first record of a run.
    fn begin(&mut self, query: &str, description: &str) {
        let _ = (query, description);
    }

    /// Called once per produced record, in enumeration order.
    fn record(&mut self, query: &str, record: &Record);

    /// Called after the last record of a run, including runs that stopped on an error.
    fn end(&mut self, query: &str) {
        let _ = query;
    }
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn begin(&mut self, query: &str, description: &str) {
        (**self).begin(query, description);
    }

    fn record(&mut self, query: &str, record: &Record) {
        (**self).record(query, record);
    }

    fn end(&mut self, query: &str) {
        (**self).end(query);
    }
}

/// Renders records as `name=value` lines into a [`fmt::Write`] sink.
///
/// Scalar fields share one line. Nested [`Value::Records`] fields follow on their own lines,
/// indented one tab per nesting level.
#[derive(Debug)]
pub struct TextRecorder<W: Write> {
    out: W,
    error: Option<fmt::Error>,
}

impl<W: Write> TextRecorder<W> {
    /// Wraps a sink.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Returns the sink, or the first write error seen.
    pub fn finish(self) -> Result<W, fmt::Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn write_record(&mut self, record: &Record, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.out.write_char('\t')?;
        }
        let mut first = true;
        for (name, value) in record.fields() {
            if matches!(value, Value::Records(_)) {
                continue;
            }
            if !first {
                self.out.write_char(' ')?;
            }
            first = false;
            write!(self.out, "{name}={value}")?;
        }
        self.out.write_char('\n')?;

        for (name, value) in record.fields() {
            let Value::Records(nested) = value else {
                continue;
            };
            for _ in 0..=depth {
                self.out.write_char('\t')?;
            }
            writeln!(self.out, "{name}:")?;
            for child in nested {
                self.write_record(child, depth + 2)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Recorder for TextRecorder<W> {
    fn begin(&mut self, query: &str, description: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "== {query}: {description}") {
            self.error = Some(err);
        }
    }

    fn record(&mut self, _query: &str, record: &Record) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_record(record, 0) {
            self.error = Some(err);
        }
    }
}

/// Keeps every record it is handed, tagged with the pipeline name.
#[derive(Debug, Clone, Default)]
pub struct CollectingRecorder {
    /// Collected `(query, record)` pairs, in the order they were recorded.
    pub records: Vec<(String, Record)>,
}

impl CollectingRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records produced by the named pipeline.
    pub fn for_query<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |(q, _)| q == query)
            .map(|(_, r)| r)
    }
}

impl Recorder for CollectingRecorder {
    fn record(&mut self, query: &str, record: &Record) {
        self.records.push((query.into(), record.clone()));
    }
}
