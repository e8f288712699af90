//! Integer domains as sorted interval lists.

use std::fmt;

use smallvec::SmallVec;

/// Inclusive integer range `lo..=hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub lo: i64,
    pub hi: i64,
}

impl Interval {
    fn size(&self) -> u64 {
        (self.hi - self.lo) as u64 + 1
    }
}

/// A finite set of integers.
///
/// Stored as sorted, disjoint, non-adjacent intervals. Most domains in a
/// dispatch model are a single range or a range plus one outlier, so two
/// intervals live inline.
///
/// # Examples
///
/// ```
/// use mixdispatch_solver::fd::Domain;
///
/// let mut d = Domain::range(0, 9);
/// d.remove_range(3, 5);
/// assert_eq!(d.size(), 7);
/// assert_eq!(d.next_after(2), Some(6));
/// assert!(!d.contains(4));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Domain {
    intervals: SmallVec<[Interval; 2]>,
}

impl Domain {
    /// Creates `lo..=hi`, empty when `lo > hi`.
    pub fn range(lo: i64, hi: i64) -> Self {
        let mut intervals = SmallVec::new();
        if lo <= hi {
            intervals.push(Interval { lo, hi });
        }
        Self { intervals }
    }

    pub fn singleton(value: i64) -> Self {
        Self::range(value, value)
    }

    pub fn boolean() -> Self {
        Self::range(0, 1)
    }

    pub fn empty() -> Self {
        Self {
            intervals: SmallVec::new(),
        }
    }

    /// Builds a domain from arbitrary values, merging runs.
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut sorted: Vec<i64> = values.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut intervals: SmallVec<[Interval; 2]> = SmallVec::new();
        for v in sorted {
            match intervals.last_mut() {
                Some(last) if last.hi + 1 == v => last.hi = v,
                _ => intervals.push(Interval { lo: v, hi: v }),
            }
        }
        Self { intervals }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Smallest value, or `i64::MAX` when empty.
    pub fn min(&self) -> i64 {
        self.intervals.first().map_or(i64::MAX, |i| i.lo)
    }

    /// Largest value, or `i64::MIN` when empty.
    pub fn max(&self) -> i64 {
        self.intervals.last().map_or(i64::MIN, |i| i.hi)
    }

    pub fn size(&self) -> u64 {
        self.intervals.iter().map(Interval::size).sum()
    }

    pub fn is_fixed(&self) -> bool {
        self.intervals.len() == 1 && self.intervals[0].lo == self.intervals[0].hi
    }

    /// The single value of a fixed domain.
    pub fn value(&self) -> Option<i64> {
        if self.is_fixed() {
            Some(self.intervals[0].lo)
        } else {
            None
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.intervals
            .binary_search_by(|i| {
                if i.hi < value {
                    std::cmp::Ordering::Less
                } else if i.lo > value {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Smallest member strictly greater than `value`.
    pub fn next_after(&self, value: i64) -> Option<i64> {
        self.intervals.iter().find_map(|i| {
            if i.hi <= value {
                None
            } else {
                Some(i.lo.max(value + 1))
            }
        })
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterates over every member in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.intervals.iter().flat_map(|i| i.lo..=i.hi)
    }

    /// Keeps only values in `lo..=hi`. Returns true if anything was removed.
    pub fn intersect_range(&mut self, lo: i64, hi: i64) -> bool {
        if lo <= self.min() && hi >= self.max() {
            return false;
        }
        let before = self.intervals.len();
        let mut kept: SmallVec<[Interval; 2]> = SmallVec::new();
        for i in &self.intervals {
            let l = i.lo.max(lo);
            let h = i.hi.min(hi);
            if l <= h {
                kept.push(Interval { lo: l, hi: h });
            }
        }
        let changed = kept.len() != before || kept.as_slice() != self.intervals.as_slice();
        self.intervals = kept;
        changed
    }

    /// Drops every value below `min`.
    pub fn restrict_min(&mut self, min: i64) -> bool {
        self.intersect_range(min, i64::MAX)
    }

    /// Drops every value above `max`.
    pub fn restrict_max(&mut self, max: i64) -> bool {
        self.intersect_range(i64::MIN, max)
    }

    /// Keeps the values satisfying `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(i64) -> bool) -> bool {
        let before = self.size();
        let kept: Vec<i64> = self.values().filter(|&v| keep(v)).collect();
        if kept.len() as u64 == before {
            return false;
        }
        *self = Domain::from_values(kept);
        true
    }

    /// Removes `lo..=hi`. Returns true if anything was removed.
    pub fn remove_range(&mut self, lo: i64, hi: i64) -> bool {
        if lo > hi || hi < self.min() || lo > self.max() {
            return false;
        }
        let mut changed = false;
        let mut kept: SmallVec<[Interval; 2]> = SmallVec::new();
        for i in &self.intervals {
            if i.hi < lo || i.lo > hi {
                kept.push(*i);
                continue;
            }
            changed = true;
            if i.lo < lo {
                kept.push(Interval { lo: i.lo, hi: lo - 1 });
            }
            if i.hi > hi {
                kept.push(Interval { lo: hi + 1, hi: i.hi });
            }
        }
        self.intervals = kept;
        changed
    }

    pub fn remove(&mut self, value: i64) -> bool {
        self.remove_range(value, value)
    }

    /// Keeps only the members also in `other`.
    pub fn intersect(&mut self, other: &Domain) -> bool {
        let mut kept: SmallVec<[Interval; 2]> = SmallVec::new();
        let (mut a, mut b) = (0, 0);
        while a < self.intervals.len() && b < other.intervals.len() {
            let x = self.intervals[a];
            let y = other.intervals[b];
            let lo = x.lo.max(y.lo);
            let hi = x.hi.min(y.hi);
            if lo <= hi {
                kept.push(Interval { lo, hi });
            }
            if x.hi < y.hi {
                a += 1;
            } else {
                b += 1;
            }
        }
        let changed = kept.as_slice() != self.intervals.as_slice();
        self.intervals = kept;
        changed
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (n, i) in self.intervals.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            if i.lo == i.hi {
                write!(f, "{}", i.lo)?;
            } else {
                write!(f, "{}..{}", i.lo, i.hi)?;
            }
        }
        write!(f, "}}")
    }
}
