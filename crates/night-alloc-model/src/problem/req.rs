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

use crate::common::{Identifier, IdentifierMarkerName, Priority};
use crate::problem::night::NightDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterIdentifierMarker;

impl IdentifierMarkerName for RequesterIdentifierMarker {
    const NAME: &'static str = "RequesterId";
}

pub type RequesterIdentifier = Identifier<String, RequesterIdentifierMarker>;

/// One person competing for nights: identity, display name, the quota of
/// nights they want, their priority tier, and the deduplicated set of
/// nights they asked for.
///
/// Immutable after construction; the live assigned-night state during a
/// run is owned by the solver, not by this type.
#[derive(Debug, Clone)]
pub struct Requester {
    id: RequesterIdentifier,
    name: String,
    desired: u32,
    priority: Priority,
    requests: BTreeSet<NightDate>,
}

impl Requester {
    #[inline]
    pub fn new<I>(
        id: RequesterIdentifier,
        name: String,
        desired: u32,
        priority: Priority,
        requests: I,
    ) -> Self
    where
        I: IntoIterator<Item = NightDate>,
    {
        Self {
            id,
            name,
            desired,
            priority,
            requests: requests.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn desired(&self) -> u32 {
        self.desired
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn requests(&self) -> &BTreeSet<NightDate> {
        &self.requests
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn has_requested(&self, night: NightDate) -> bool {
        self.requests.contains(&night)
    }
}

impl PartialEq for Requester {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Requester {}

impl std::hash::Hash for Requester {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requester: Id: {}, Name: {}, Desired: {}, Priority: {}, Requests: {}",
            self.id,
            self.name,
            self.desired,
            self.priority,
            self.requests.len()
        )
    }
}

/// Requesters keyed by id, preserving input order for deterministic
/// iteration and reporting.
#[derive(Debug, Clone, Default)]
pub struct RequesterContainer {
    order: Vec<RequesterIdentifier>,
    map: HashMap<RequesterIdentifier, Requester>,
}

impl RequesterContainer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            order: Vec::with_capacity(cap),
            map: HashMap::with_capacity(cap),
        }
    }

    /// Inserts a requester, returning the previous entry with the same id
    /// if one existed. A replacement keeps the original position.
    pub fn insert(&mut self, requester: Requester) -> Option<Requester> {
        let id = requester.id().clone();
        let previous = self.map.insert(id.clone(), requester);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    #[inline]
    pub fn contains_id(&self, id: &RequesterIdentifier) -> bool {
        self.map.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: &RequesterIdentifier) -> Option<&Requester> {
        self.map.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Requester> {
        self.order.iter().filter_map(|id| self.map.get(id))
    }
}

impl FromIterator<Requester> for RequesterContainer {
    fn from_iter<I: IntoIterator<Item = Requester>>(iter: I) -> Self {
        let mut c = Self::new();
        for r in iter {
            c.insert(r);
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn requester(id: &str, desired: u32, nights: &[NightDate]) -> Requester {
        Requester::new(
            rid(id),
            format!("Name {id}"),
            desired,
            Priority::Medium,
            nights.iter().copied(),
        )
    }

    #[test]
    fn test_duplicate_requested_nights_collapse() {
        let n = nd(2025, 5, 1);
        let r = requester("a", 2, &[n, n, nd(2025, 5, 2)]);
        assert_eq!(r.request_count(), 2);
        assert!(r.has_requested(n));
        assert!(!r.has_requested(nd(2025, 5, 3)));
    }

    #[test]
    fn test_accessors() {
        let r = Requester::new(
            rid("x"),
            "Dr. X".to_string(),
            3,
            Priority::High,
            [nd(2025, 1, 1)],
        );
        assert_eq!(r.id(), &rid("x"));
        assert_eq!(r.name(), "Dr. X");
        assert_eq!(r.desired(), 3);
        assert_eq!(r.priority(), Priority::High);
        assert_eq!(r.requests().len(), 1);
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = requester("same", 1, &[nd(2025, 1, 1)]);
        let b = requester("same", 9, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_container_preserves_insertion_order() {
        let mut c = RequesterContainer::new();
        for id in ["zeta", "alpha", "mid"] {
            c.insert(requester(id, 1, &[]));
        }
        let ids: Vec<_> = c.iter().map(|r| r.id().as_str().to_string()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_container_replace_keeps_position() {
        let mut c = RequesterContainer::new();
        c.insert(requester("a", 1, &[]));
        c.insert(requester("b", 1, &[]));
        let prev = c.insert(requester("a", 5, &[]));
        assert!(prev.is_some());
        assert_eq!(c.len(), 2);
        let first = c.iter().next().unwrap();
        assert_eq!(first.id(), &rid("a"));
        assert_eq!(first.desired(), 5);
    }

    #[test]
    fn test_container_lookup() {
        let mut c = RequesterContainer::new();
        c.insert(requester("a", 1, &[]));
        assert!(c.contains_id(&rid("a")));
        assert!(!c.contains_id(&rid("b")));
        assert_eq!(c.get(&rid("a")).unwrap().desired(), 1);
        assert!(c.get(&rid("b")).is_none());
    }

    #[test]
    fn test_from_iterator() {
        let c: RequesterContainer = ["a", "b"]
            .into_iter()
            .map(|id| requester(id, 1, &[]))
            .collect();
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
    }
}
