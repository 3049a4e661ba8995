//! Best-first branch-and-bound traversal for a single query point.

use log::trace;

use crate::distance::Point3;
use crate::frontier::{Candidate, Frontier, candidate_distance};
use crate::octree::Octree;

/// Fills `row` with the nearest points to `query`, closest first.
///
/// The number of neighbors searched for is `row.len()`, which must not exceed the
/// number of points. Returns how many were found; this is less than `row.len()` only
/// when the frontier runs dry, meaning the octree does not reach every point.
///
/// Cells are ordered by a lower bound on the distance to anything they contain, so a
/// point is popped only once no unexpanded cell can hold a closer one.
pub(crate) fn collect_nearest(
    query: Point3,
    points: &[Point3],
    octree: &Octree<'_>,
    frontier: &mut Frontier,
    row: &mut [usize],
) -> usize {
    let k = row.len();
    if k == 0 {
        return 0;
    }

    let push = |frontier: &mut Frontier, candidate: Candidate| {
        frontier.push(candidate, candidate_distance(query, points, octree, candidate));
    };

    frontier.clear();
    push(frontier, Candidate::Cell(0));

    let mut found = 0;
    let mut expanded = 0usize;
    let mut peak = 1usize;
    while found < k {
        let Some(candidate) = frontier.pop() else {
            break;
        };
        match candidate {
            Candidate::Point(point) => {
                row[found] = point;
                found += 1;
            }
            Candidate::Cell(cell) => {
                expanded += 1;
                if octree.is_leaf(cell) {
                    // Empty leaves push nothing
                    if let Some(point) = octree.leaf_point(cell) {
                        push(frontier, Candidate::Point(point));
                    }
                } else {
                    for child in octree.children(cell) {
                        push(frontier, Candidate::Cell(child));
                    }
                }
                peak = peak.max(frontier.len());
            }
        }
    }

    trace!(
        "query {:?}: found {}/{} neighbors, expanded {} cells, peak frontier {}",
        query, found, k, expanded, peak
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octree::LEAF_SENTINEL;

    const LEAF: [i32; 8] = [LEAF_SENTINEL; 8];

    /// Root with two occupied leaves, one empty leaf and five more empty leaves.
    /// Root cube spans [0, 4]^3, children are the eight [0, 2]/[2, 4] octants.
    fn two_point_octree() -> (Vec<Point3>, Vec<Vec<usize>>, Vec<[i32; 8]>, Vec<Point3>, Vec<f64>) {
        let points = vec![[0.5, 0.5, 0.5], [3.5, 3.5, 3.5]];
        let mut point_indices = vec![Vec::new(); 9];
        point_indices[1] = vec![0];
        point_indices[8] = vec![1];
        let mut children = vec![LEAF; 9];
        children[0] = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut centers = vec![[2.0, 2.0, 2.0]];
        for octant in 0..8 {
            let offset = |bit: usize| if octant & bit != 0 { 3.0 } else { 1.0 };
            centers.push([offset(1), offset(2), offset(4)]);
        }
        let mut widths = vec![4.0];
        widths.extend([2.0; 8]);
        (points, point_indices, children, centers, widths)
    }

    #[test]
    fn test_collect_nearest_orders_by_distance() {
        let (points, point_indices, children, centers, widths) = two_point_octree();
        let octree = Octree::new(&point_indices, &children, &centers, &widths);
        let mut frontier = Frontier::new();

        let mut row = [usize::MAX; 2];
        let found = collect_nearest([3.0, 3.0, 3.0], &points, &octree, &mut frontier, &mut row);
        assert_eq!(found, 2, "both points should be found");
        assert_eq!(row, [1, 0], "upper point is closer to the upper corner");

        let found = collect_nearest([0.0, 0.0, 0.0], &points, &octree, &mut frontier, &mut row);
        assert_eq!(found, 2, "both points should be found");
        assert_eq!(row, [0, 1], "lower point is closer to the origin");
    }

    #[test]
    fn test_collect_nearest_zero_k_leaves_row_untouched() {
        let (points, point_indices, children, centers, widths) = two_point_octree();
        let octree = Octree::new(&point_indices, &children, &centers, &widths);
        let mut frontier = Frontier::new();

        let found = collect_nearest([0.0; 3], &points, &octree, &mut frontier, &mut []);
        assert_eq!(found, 0, "an empty row asks for nothing");
    }

    #[test]
    fn test_collect_nearest_reports_unreachable_points() {
        let (points, mut point_indices, children, centers, widths) = two_point_octree();
        // Point 1 no longer stored in any leaf
        point_indices[8].clear();
        let octree = Octree::new(&point_indices, &children, &centers, &widths);
        let mut frontier = Frontier::new();

        let mut row = [usize::MAX; 2];
        let found = collect_nearest([4.0, 4.0, 4.0], &points, &octree, &mut frontier, &mut row);
        assert_eq!(found, 1, "only the stored point is reachable");
        assert_eq!(row[0], 0, "the stored point should be found");
    }

    #[test]
    fn test_collect_nearest_single_leaf_root() {
        let points = vec![[7.0, -1.0, 2.0]];
        let point_indices = vec![vec![0]];
        let children = vec![LEAF];
        let centers = vec![[7.0, -1.0, 2.0]];
        let widths = vec![0.0];
        let octree = Octree::new(&point_indices, &children, &centers, &widths);
        let mut frontier = Frontier::new();

        let mut row = [usize::MAX; 1];
        let found = collect_nearest([100.0, 0.0, 0.0], &points, &octree, &mut frontier, &mut row);
        assert_eq!(found, 1, "the root leaf holds the only point");
        assert_eq!(row, [0], "the only point should be found");
    }
}
