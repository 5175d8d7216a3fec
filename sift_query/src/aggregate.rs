// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terminal aggregates over a [`Seq`].
//!
//! `count` and `sum` are total: they return `0` on an empty sequence. `min`, `max`, and
//! `average` have no value over zero elements and report [`QueryError::EmptyAggregate`]
//! instead of inventing one. Callers that want "no value" as data use `.ok()`.

use sift_core::{AggregateOp, QueryError};

use crate::Seq;

impl<'a, T: 'a> Seq<'a, T> {
    /// Counts the elements of one enumeration.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Sums `selector` over one enumeration; `0.0` when empty.
    pub fn sum(&self, selector: impl Fn(&T) -> f64) -> f64 {
        self.iter().map(|item| selector(&item)).sum()
    }

    /// Arithmetic mean of `selector`.
    pub fn average(&self, selector: impl Fn(&T) -> f64) -> Result<f64, QueryError> {
        let (sum, n) = self
            .iter()
            .fold((0.0, 0_usize), |(sum, n), item| (sum + selector(&item), n + 1));
        if n == 0 {
            return Err(QueryError::EmptyAggregate {
                op: AggregateOp::Mean,
            });
        }
        Ok(sum / n as f64)
    }

    /// Smallest key produced by `selector`; the first one wins among equals.
    pub fn min<K: PartialOrd>(&self, selector: impl Fn(&T) -> K) -> Result<K, QueryError> {
        extremum(self.iter().map(|item| selector(&item)), AggregateOp::Min)
    }

    /// Largest key produced by `selector`; the first one wins among equals.
    pub fn max<K: PartialOrd>(&self, selector: impl Fn(&T) -> K) -> Result<K, QueryError> {
        extremum(self.iter().map(|item| selector(&item)), AggregateOp::Max)
    }

    /// Applies a numeric [`AggregateOp`] to `selector`.
    pub fn aggregate(
        &self,
        op: AggregateOp,
        selector: impl Fn(&T) -> f64,
    ) -> Result<f64, QueryError> {
        match op {
            AggregateOp::Count => Ok(self.count() as f64),
            AggregateOp::Sum => Ok(self.sum(selector)),
            AggregateOp::Min => self.min(selector),
            AggregateOp::Max => self.max(selector),
            AggregateOp::Mean => self.average(selector),
        }
    }
}

fn extremum<K: PartialOrd>(
    mut values: impl Iterator<Item = K>,
    op: AggregateOp,
) -> Result<K, QueryError> {
    let Some(mut best) = values.next() else {
        return Err(QueryError::EmptyAggregate { op });
    };
    for v in values {
        let better = match op {
            AggregateOp::Max => v > best,
            _ => v < best,
        };
        if better {
            best = v;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sum_and_count_are_zero_on_empty_input() {
        let empty = Seq::<f64>::empty();
        assert_eq!(empty.sum(|v| *v), 0.0);
        assert_eq!(empty.count(), 0);
        assert_eq!(empty.aggregate(AggregateOp::Sum, |v| *v), Ok(0.0));
    }

    #[test]
    fn average_min_max_fail_on_empty_input() {
        let empty = Seq::<f64>::empty();
        assert_eq!(
            empty.average(|v| *v),
            Err(QueryError::EmptyAggregate {
                op: AggregateOp::Mean
            })
        );
        assert_eq!(
            empty.min(|v| *v),
            Err(QueryError::EmptyAggregate {
                op: AggregateOp::Min
            })
        );
        assert_eq!(
            empty.max(|v| *v),
            Err(QueryError::EmptyAggregate {
                op: AggregateOp::Max
            })
        );
    }

    #[test]
    fn aggregates_over_values() {
        let totals = [50.0, 60.0, 200.0];
        let seq = Seq::from_slice(&totals);
        assert_eq!(seq.sum(|v| **v), 310.0);
        assert_eq!(seq.count(), 3);
        assert_eq!(seq.min(|v| **v), Ok(50.0));
        assert_eq!(seq.max(|v| **v), Ok(200.0));
        let avg = seq.average(|v| **v).unwrap();
        assert!((avg - 310.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn min_over_dates_distinguishes_no_value_from_epoch() {
        let dates = [date(1997, 8, 25), date(1996, 7, 4), date(1998, 1, 2)];
        assert_eq!(Seq::from_slice(&dates).min(|d| **d).ok(), Some(date(1996, 7, 4)));

        let none: [NaiveDate; 0] = [];
        assert_eq!(Seq::from_slice(&none).min(|d| **d).ok(), None);
    }
}
