// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines output.

use std::io::{self, Write};

use serde_json::{Map, Number, json};
use sift_core::{Record, Recorder, Value};

/// Writes one JSON object per record: `{"query": ..., "record": {...}}`.
///
/// The first write error is kept and reported by [`JsonRecorder::finish`]; later records are
/// dropped.
#[derive(Debug)]
pub(crate) struct JsonRecorder<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonRecorder<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes the sink, returning the first error seen.
    pub(crate) fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Recorder for JsonRecorder<W> {
    fn record(&mut self, query: &str, record: &Record) {
        if self.error.is_some() {
            return;
        }
        let line = json!({ "query": query, "record": record_to_json(record) });
        let written = serde_json::to_writer(&mut self.out, &line)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = written {
            self.error = Some(err);
        }
    }
}

fn record_to_json(record: &Record) -> serde_json::Value {
    let fields: Map<String, serde_json::Value> = record
        .fields()
        .map(|(name, value)| (name.to_owned(), value_to_json(value)))
        .collect();
    serde_json::Value::Object(fields)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        // Non-finite floats have no JSON form.
        Value::Float(f) => Number::from_f64(*f).map_or(serde_json::Value::Null, Into::into),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Date(d) => serde_json::Value::String(d.to_string()),
        Value::List(items) => items.iter().map(value_to_json).collect(),
        Value::Records(records) => records.iter().map(record_to_json).collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn writes_one_line_per_record() {
        let date = NaiveDate::from_ymd_opt(1997, 8, 25).unwrap();
        let record = Record::new()
            .with("company_name", "Alfreds Futterkiste")
            .with("first_order_date", date)
            .with("region", Option::<&str>::None)
            .with("orders", vec![Record::new().with("total", 814.5)]);

        let mut rec = JsonRecorder::new(Vec::new());
        rec.record("first-order-date", &record);
        rec.record("first-order-date", &Record::new().with("turnover", f64::NAN));
        let out = String::from_utf8(rec.finish().unwrap()).unwrap();

        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({
                    "query": "first-order-date",
                    "record": {
                        "company_name": "Alfreds Futterkiste",
                        "first_order_date": "1997-08-25",
                        "region": null,
                        "orders": [{ "total": 814.5 }],
                    },
                }),
                json!({ "query": "first-order-date", "record": { "turnover": null } }),
            ]
        );
    }
}
