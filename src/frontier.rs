//! Search frontier: points and cells ordered by distance to the query, closest first.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::distance::{Point3, cube_lower_bound, point_distance};
use crate::octree::Octree;

/// A frontier entry refers to either a point or an octree cell.
///
/// The derived order puts points before cells and lower indices first, which is the
/// tie-break when two entries sit at exactly the same distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Candidate {
    Point(usize),
    Cell(usize),
}

/// Distance used to order `candidate`: exact for a point, a lower bound for a cell.
#[inline]
pub(crate) fn candidate_distance(
    query: Point3,
    points: &[Point3],
    octree: &Octree<'_>,
    candidate: Candidate,
) -> f64 {
    match candidate {
        Candidate::Point(point) => point_distance(query, points[point]),
        Candidate::Cell(cell) => cube_lower_bound(query, octree.center(cell), octree.width(cell)),
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    distance: f64,
    candidate: Candidate,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.candidate.cmp(&other.candidate))
    }
}

/// Min-first priority queue of candidates for one query.
///
/// Distances are computed once on push; the query point and octree must stay fixed
/// until the frontier is cleared.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drops all entries, keeping the allocation for the next query
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, candidate: Candidate, distance: f64) {
        self.heap.push(Reverse(Entry { distance, candidate }));
    }

    /// Removes the closest candidate
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Reverse(entry)| entry.candidate)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
