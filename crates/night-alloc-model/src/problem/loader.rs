// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::problem::builder::{ProblemBuilder, RequesterRow};
use crate::problem::err::{LoaderError, MissingColumnError};
use crate::problem::night::NightRange;
use crate::problem::prob::Problem;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const COLUMN_ID: &str = "requester_id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_DESIRED: &str = "desired_nights";
pub const COLUMN_DATES: &str = "requested_dates";
pub const COLUMN_PRIORITY: &str = "priority";

/// CSV adapter in front of [`ProblemBuilder`].
///
/// A missing required column is fatal. Individual malformed rows (short
/// records, unparseable desired counts) are dropped with a warning so one
/// bad row never poisons the rest of the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemLoader {
    slots_per_night: Option<u32>,
    range: Option<NightRange>,
}

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_slots_per_night(mut self, slots: u32) -> Self {
        self.slots_per_night = Some(slots);
        self
    }

    #[inline]
    pub fn with_night_range(mut self, range: NightRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem, LoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Problem, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let find = |column: &'static str| -> Result<usize, MissingColumnError> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(MissingColumnError::new(column))
        };

        let idx_id = find(COLUMN_ID)?;
        let idx_name = find(COLUMN_NAME)?;
        let idx_desired = find(COLUMN_DESIRED)?;
        let idx_dates = find(COLUMN_DATES)?;
        let idx_priority = headers.iter().position(|h| h == COLUMN_PRIORITY);

        let mut builder = ProblemBuilder::new();
        if let Some(slots) = self.slots_per_night {
            builder = builder.with_slots_per_night(slots);
        }
        if let Some(range) = self.range {
            builder = builder.with_night_range(range);
        }

        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let id = field(idx_id);
            let name = field(idx_name);
            let desired_raw = field(idx_desired);
            let desired = if desired_raw.is_empty() {
                0
            } else {
                match desired_raw.parse::<i64>() {
                    Ok(v) => v,
                    Err(_) => {
                        tracing::warn!(
                            line = line + 1,
                            value = desired_raw,
                            "dropping row with unparseable desired night count"
                        );
                        continue;
                    }
                }
            };

            let dates: Vec<String> = field(idx_dates)
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            let priority = idx_priority
                .map(|idx| field(idx))
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse::<i64>().ok());

            let mut row = RequesterRow::new(id, name, desired).with_requested_dates(dates);
            row.priority = priority;
            builder.add_row(row);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Priority;
    use crate::problem::err::ValidationError;
    use crate::problem::night::NightDate;
    use crate::problem::req::RequesterIdentifier;
    use chrono::NaiveDate;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn load(csv: &str) -> Result<Problem, LoaderError> {
        ProblemLoader::new().from_reader(csv.as_bytes())
    }

    #[test]
    fn test_load_well_formed_csv() {
        let csv = "\
requester_id,name,desired_nights,requested_dates,priority
f1,Alice,2,\"2025-03-01,2025-03-02\",1
f2,Bob,1,2025-03-02,
";
        let p = load(csv).unwrap();
        assert_eq!(p.requesters().len(), 2);
        let alice = p.requester(&rid("f1")).unwrap();
        assert_eq!(alice.priority(), Priority::High);
        assert_eq!(alice.request_count(), 2);
        let bob = p.requester(&rid("f2")).unwrap();
        assert_eq!(bob.priority(), Priority::Medium);
        assert_eq!(p.requesters_for_night(nd(2025, 3, 2)).len(), 2);
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let csv = "requester_id,name,requested_dates\nf1,Alice,2025-03-01\n";
        let err = load(csv).unwrap_err();
        match err {
            LoaderError::MissingColumn(e) => assert_eq!(e.column(), COLUMN_DESIRED),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_priority_column_is_optional() {
        let csv = "requester_id,name,desired_nights,requested_dates\nf1,Alice,1,2025-03-01\n";
        let p = load(csv).unwrap();
        assert_eq!(p.requester(&rid("f1")).unwrap().priority(), Priority::Medium);
    }

    #[test]
    fn test_malformed_desired_count_drops_only_that_row() {
        let csv = "\
requester_id,name,desired_nights,requested_dates
bad,Broken,two,2025-03-01
ok,Fine,1,2025-03-01
";
        let p = load(csv).unwrap();
        assert_eq!(p.requesters().len(), 1);
        assert!(p.requester(&rid("ok")).is_some());
    }

    #[test]
    fn test_short_records_are_tolerated() {
        let csv = "\
requester_id,name,desired_nights,requested_dates
solo,Short,1
full,Complete,1,2025-03-01
";
        let p = load(csv).unwrap();
        assert_eq!(p.requesters().len(), 2);
        assert_eq!(p.requester(&rid("solo")).unwrap().request_count(), 0);
    }

    #[test]
    fn test_empty_desired_defaults_to_zero() {
        let csv = "requester_id,name,desired_nights,requested_dates\nf1,Alice,,2025-03-01\n";
        let p = load(csv).unwrap();
        assert_eq!(p.requester(&rid("f1")).unwrap().desired(), 0);
    }

    #[test]
    fn test_validation_failures_propagate() {
        let csv = "\
requester_id,name,desired_nights,requested_dates
f1,Alice,-1,2025-03-01
";
        let err = load(csv).unwrap_err();
        match err {
            LoaderError::Validation(ValidationError::NegativeDesiredCount(e)) => {
                assert_eq!(e.id(), &rid("f1"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_loader_applies_slots_and_range() {
        let range = NightRange::new(nd(2025, 3, 1), nd(2025, 3, 5)).unwrap();
        let csv = "requester_id,name,desired_nights,requested_dates\nf1,Alice,1,2025-03-02\n";
        let p = ProblemLoader::new()
            .with_slots_per_night(2)
            .with_night_range(range)
            .from_reader(csv.as_bytes())
            .unwrap();
        assert_eq!(p.slots_per_night(), 2);
        assert!(p.is_dense());
        assert_eq!(p.night_count(), 5);
    }
}
