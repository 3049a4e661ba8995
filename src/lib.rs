//! # octree-knn - Exact k-Nearest Neighbors over an Octree
//!
//! A Rust library answering exact k-nearest-neighbor queries for 3D point sets, pruned
//! by a prebuilt octree.
//!
//! ## Features
//!
//! - **Exact Results**: Best-first branch-and-bound search, never approximate
//! - **Bring Your Own Octree**: Works on plain index-aligned cell arrays
//! - **Parallel Batches**: One independent traversal per query, spread over rayon
//! - **Fail Fast**: Octree arrays are validated before any query runs
//!
//! ## Quick Start
//!
//! ```rust
//! use octree_knn::{knn_search, Octree, LEAF_SENTINEL};
//!
//! // Two points, one in the lower octant and one in the upper octant of a [0, 2] cube
//! let points = [[0.5, 0.5, 0.5], [1.5, 1.5, 1.5]];
//!
//! // Cell 0 is the root, cells 1..=8 its octants (x is bit 0, y bit 1, z bit 2)
//! let mut point_indices = vec![Vec::new(); 9];
//! point_indices[1] = vec![0];
//! point_indices[8] = vec![1];
//! let mut children = vec![[LEAF_SENTINEL; 8]; 9];
//! children[0] = [1, 2, 3, 4, 5, 6, 7, 8];
//! let mut centers = vec![[1.0, 1.0, 1.0]];
//! for octant in 0..8 {
//!     let c = |bit: usize| if octant & bit != 0 { 1.5 } else { 0.5 };
//!     centers.push([c(1), c(2), c(4)]);
//! }
//! let mut widths = vec![2.0];
//! widths.extend([1.0; 8]);
//!
//! let octree = Octree::new(&point_indices, &children, &centers, &widths);
//! let table = knn_search(&points, 2, octree).unwrap();
//!
//! assert_eq!(table.row(0), &[0, 1]);
//! assert_eq!(table.row(1), &[1, 0]);
//! ```
//!
//! ## How It Works
//!
//! Each query keeps a frontier of points and cells ordered by distance: exact distance
//! for a point, and for a cell the distance to the nearest face of its cube (zero when
//! the query is inside). The closest entry is popped repeatedly. A point is accepted as
//! the next neighbor; a cell is replaced by its children, or by its point if it is a
//! leaf. Since a cell's distance never exceeds the distance to anything inside it,
//! points come out in true nearest-to-farthest order and the search stops after `k`.
//!
//! Cell widths are full side lengths: a cell spans `center ± width / 2`.
//!
//! Batches are split into chunks of at least [`KnnConfig::min_chunk_len`] queries.
//! Every query writes only its own row, so no locking is involved.

mod batch;
mod distance;
mod error;
mod frontier;
mod index;
mod octree;
pub mod prelude;
mod traversal;

#[cfg(test)]
mod test_octree;

pub use batch::{DEFAULT_MIN_CHUNK_LEN, KnnConfig, KnnTable};
pub use distance::{Point3, cube_lower_bound, point_distance};
pub use error::{KnnError, OctreeDefect};
pub use index::KnnIndex;
pub use octree::{LEAF_SENTINEL, Octree};

/// k nearest neighbors of every point in `points`, pruned by `octree`.
///
/// `k` is clamped to `points.len()`. The table has `points.len()` rows; row `i` lists
/// the neighbors of point `i`, closest first. An empty point set gives an empty table
/// whatever the octree holds.
///
/// # Errors
/// Returns [`KnnError::InvalidOctree`] if the octree arrays are malformed, and
/// [`KnnError::FrontierExhausted`] if the octree does not reach enough points.
pub fn knn_search(points: &[Point3], k: usize, octree: Octree<'_>) -> Result<KnnTable, KnnError> {
    knn_search_with(points, k, octree, &KnnConfig::default())
}

/// Same as [`knn_search`] with explicit configuration.
///
/// # Errors
/// See [`knn_search`].
pub fn knn_search_with(
    points: &[Point3],
    k: usize,
    octree: Octree<'_>,
    config: &KnnConfig,
) -> Result<KnnTable, KnnError> {
    KnnIndex::new(points, octree)?.search_with(k, config)
}

/// k nearest points of `points` for each of `queries`.
///
/// # Errors
/// See [`knn_search`].
pub fn knn_search_queries(
    queries: &[Point3],
    points: &[Point3],
    k: usize,
    octree: Octree<'_>,
) -> Result<KnnTable, KnnError> {
    KnnIndex::new(points, octree)?.search_queries(queries, k)
}
