// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named pipelines and the pull-based driver.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use sift_core::{QueryError, Record, Recorder, ToRecord};

use crate::Seq;

/// A named, deferred query whose output is lowered to [`Record`]s.
///
/// Building a pipeline runs nothing. Each call to [`Pipeline::drive`] or [`Pipeline::records`]
/// enumerates the underlying sequence from scratch.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    name: String,
    description: String,
    seq: Seq<'a, Result<Record, QueryError>>,
}

impl<'a> Pipeline<'a> {
    /// Wraps an infallible sequence.
    pub fn new<R: ToRecord + 'a>(
        name: impl Into<String>,
        description: impl Into<String>,
        seq: Seq<'a, R>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            seq: seq.map(|r| Ok(r.to_record())),
        }
    }

    /// Wraps a sequence whose items may fail, such as one that aggregates per group.
    pub fn fallible<R: ToRecord + 'a>(
        name: impl Into<String>,
        description: impl Into<String>,
        seq: Seq<'a, Result<R, QueryError>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            seq: seq.map(|r| r.map(|r| r.to_record())),
        }
    }

    /// Pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Starts a fresh enumeration.
    pub fn records(&self) -> Box<dyn Iterator<Item = Result<Record, QueryError>> + 'a> {
        self.seq.iter()
    }

    /// Enumerates into a vector, stopping at the first error.
    pub fn collect(&self) -> Result<Vec<Record>, QueryError> {
        self.records().collect()
    }

    /// Pulls records one at a time and hands each to `recorder`.
    ///
    /// Returns the number of records produced. The first error ends the run and is returned;
    /// records already handed to the recorder stay recorded.
    pub fn drive(&self, recorder: &mut impl Recorder) -> Result<usize, QueryError> {
        tracing::debug!(query = %self.name, "enumerating pipeline");
        recorder.begin(&self.name, &self.description);
        let mut produced = 0;
        for item in self.records() {
            match item {
                Ok(record) => {
                    tracing::trace!(query = %self.name, index = produced, "record");
                    recorder.record(&self.name, &record);
                    produced += 1;
                }
                Err(err) => {
                    tracing::debug!(query = %self.name, produced, %err, "pipeline failed");
                    recorder.end(&self.name);
                    return Err(err);
                }
            }
        }
        recorder.end(&self.name);
        tracing::debug!(query = %self.name, produced, "pipeline finished");
        Ok(produced)
    }
}

/// An ordered collection of named pipelines.
#[derive(Debug, Clone, Default)]
pub struct Program<'a> {
    pipelines: Vec<Pipeline<'a>>,
}

impl<'a> Program<'a> {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pipeline.
    pub fn push(&mut self, pipeline: Pipeline<'a>) {
        self.pipelines.push(pipeline);
    }

    /// Access the pipelines in registration order.
    pub fn pipelines(&self) -> &[Pipeline<'a>] {
        &self.pipelines
    }

    /// Pipeline names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.pipelines.iter().map(Pipeline::name)
    }

    /// Looks up a pipeline by name.
    pub fn get(&self, name: &str) -> Option<&Pipeline<'a>> {
        self.pipelines.iter().find(|p| p.name == name)
    }

    /// Drives one pipeline by name.
    pub fn run(&self, name: &str, recorder: &mut impl Recorder) -> Result<usize, QueryError> {
        let Some(pipeline) = self.get(name) else {
            return Err(QueryError::UnknownQuery(name.into()));
        };
        pipeline.drive(recorder)
    }

    /// Drives every pipeline in registration order, stopping at the first error.
    pub fn run_all(&self, recorder: &mut impl Recorder) -> Result<usize, QueryError> {
        let mut total = 0;
        for pipeline in &self.pipelines {
            total += pipeline.drive(recorder)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use sift_core::{AggregateOp, CollectingRecorder, Param, Value};

    use super::*;

    fn numbers(limit: Param<i32>) -> Pipeline<'static> {
        static NUMBERS: [i32; 6] = [5, 4, 1, 3, 9, 0];
        let seq = Seq::from_slice(&NUMBERS)
            .filter(move |n| **n < limit.get())
            .map(|n| Record::new().with("value", *n));
        Pipeline::new("numbers", "numbers below a limit", seq)
    }

    #[test]
    fn driver_pulls_in_order_and_counts() {
        let mut program = Program::new();
        program.push(numbers(Param::new(5)));

        let mut rec = CollectingRecorder::new();
        assert_eq!(program.run("numbers", &mut rec), Ok(4));
        let values: Vec<_> = rec
            .for_query("numbers")
            .map(|r| r.field("value").cloned())
            .collect();
        assert_eq!(
            values,
            vec![
                Some(Value::Int(4)),
                Some(Value::Int(1)),
                Some(Value::Int(3)),
                Some(Value::Int(0)),
            ]
        );
    }

    #[test]
    fn reruns_observe_param_changes() {
        let limit = Param::new(5);
        let pipeline = numbers(limit.clone());
        assert_eq!(pipeline.collect().map(|r| r.len()), Ok(4));
        limit.set(1);
        assert_eq!(pipeline.collect().map(|r| r.len()), Ok(1));
    }

    #[test]
    fn errors_propagate_after_partial_output() {
        let items = [1.0, 2.0];
        let seq = Seq::from_slice(&items).map(|v| {
            if *v > 1.5 {
                Err(QueryError::EmptyAggregate {
                    op: AggregateOp::Mean,
                })
            } else {
                Ok(Record::new().with("v", *v))
            }
        });
        let pipeline = Pipeline::fallible("partial", "fails on the second item", seq);

        let mut rec = CollectingRecorder::new();
        let err = pipeline.drive(&mut rec).unwrap_err();
        assert_eq!(
            err,
            QueryError::EmptyAggregate {
                op: AggregateOp::Mean
            }
        );
        assert_eq!(rec.records.len(), 1);
    }

    #[test]
    fn unknown_pipeline_is_reported() {
        let program = Program::new();
        let mut rec = CollectingRecorder::new();
        assert_eq!(
            program.run("missing", &mut rec),
            Err(QueryError::UnknownQuery("missing".into()))
        );
    }
}
