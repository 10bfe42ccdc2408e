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

use crate::problem::err::{DateParseError, EmptyNightRangeError};
use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";
const US_FORMAT: &str = "%m/%d/%Y";

/// Canonical calendar-date key of a schedulable night.
///
/// Displays and serializes as ISO `YYYY-MM-DD` regardless of the input
/// format the date was parsed from.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NightDate(NaiveDate);

impl NightDate {
    #[inline]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a date token, accepting ISO `YYYY-MM-DD` first and US
    /// `MM/DD/YYYY` as a fallback.
    pub fn parse(token: &str) -> Result<Self, DateParseError> {
        let trimmed = token.trim();
        NaiveDate::parse_from_str(trimmed, ISO_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(trimmed, US_FORMAT))
            .map(Self)
            .map_err(|_| DateParseError::new(token.to_string()))
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    #[inline]
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for NightDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for NightDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl serde::Serialize for NightDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive `[start, end]` range of nights for dense-universe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NightRange {
    start: NightDate,
    end: NightDate,
}

impl NightRange {
    #[inline]
    pub fn new(start: NightDate, end: NightDate) -> Result<Self, EmptyNightRangeError> {
        if start > end {
            return Err(EmptyNightRangeError::new(start, end));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> NightDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NightDate {
        self.end
    }

    #[inline]
    pub fn contains(&self, night: NightDate) -> bool {
        self.start <= night && night <= self.end
    }

    /// All nights of the range in calendar order, both endpoints included.
    pub fn iter(&self) -> impl Iterator<Item = NightDate> + '_ {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            d.succ().filter(|next| *next <= end)
        })
    }
}

impl std::fmt::Display for NightRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_parse_iso_format() {
        assert_eq!(NightDate::parse("2025-03-14").unwrap(), nd(2025, 3, 14));
    }

    #[test]
    fn test_parse_us_format() {
        assert_eq!(NightDate::parse("03/14/2025").unwrap(), nd(2025, 3, 14));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(NightDate::parse("  2025-01-02 ").unwrap(), nd(2025, 1, 2));
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        for bad in ["2025/03/14", "14-03-2025", "March 14", "", "garbage"] {
            let err = NightDate::parse(bad).expect_err("must reject");
            assert_eq!(err.token(), bad);
        }
    }

    #[test]
    fn test_display_is_canonical_iso() {
        let us = NightDate::parse("03/14/2025").unwrap();
        assert_eq!(format!("{}", us), "2025-03-14");
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(nd(2025, 1, 31) < nd(2025, 2, 1));
    }

    #[test]
    fn test_range_rejects_start_after_end() {
        let err = NightRange::new(nd(2025, 2, 2), nd(2025, 2, 1)).unwrap_err();
        assert_eq!(err.start(), nd(2025, 2, 2));
        assert_eq!(err.end(), nd(2025, 2, 1));
    }

    #[test]
    fn test_range_iter_is_inclusive() {
        let r = NightRange::new(nd(2025, 1, 30), nd(2025, 2, 2)).unwrap();
        let nights: Vec<_> = r.iter().collect();
        assert_eq!(
            nights,
            vec![nd(2025, 1, 30), nd(2025, 1, 31), nd(2025, 2, 1), nd(2025, 2, 2)]
        );
    }

    #[test]
    fn test_single_day_range() {
        let r = NightRange::new(nd(2025, 6, 1), nd(2025, 6, 1)).unwrap();
        assert_eq!(r.iter().count(), 1);
        assert!(r.contains(nd(2025, 6, 1)));
        assert!(!r.contains(nd(2025, 6, 2)));
    }
}
