//! Error types for octree k-NN search.

use thiserror::Error;

/// Errors returned by the k-NN entry points.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KnnError {
    /// The octree arrays do not describe a usable octree for the given point set.
    #[error("invalid octree: {0}")]
    InvalidOctree(#[from] OctreeDefect),

    /// The frontier ran dry before `wanted` points were found.
    ///
    /// Happens when the octree holds fewer points than the point set it was passed with,
    /// i.e. some points are not reachable from the root.
    #[error("frontier exhausted for query {query}: found {found} of {wanted} neighbors")]
    FrontierExhausted {
        /// Row of the query that failed
        query: usize,
        /// Neighbors accepted before the frontier emptied
        found: usize,
        /// Effective k
        wanted: usize,
    },
}

/// A structural problem found by [`Octree::validate`](crate::Octree::validate).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OctreeDefect {
    /// The four per-cell arrays have different lengths.
    #[error(
        "cell arrays are not index-aligned (point_indices: {point_indices}, children: {children}, centers: {centers}, widths: {widths})"
    )]
    MisalignedArrays {
        /// Length of the leaf point list array
        point_indices: usize,
        /// Length of the children array
        children: usize,
        /// Length of the centers array
        centers: usize,
        /// Length of the widths array
        widths: usize,
    },

    /// The point set is non-empty but the octree has no root cell.
    #[error("octree has no cells but the point set holds {points} points")]
    MissingRoot {
        /// Number of points in the point set
        points: usize,
    },

    /// A non-leaf cell links to a child outside `0..num_cells`.
    #[error("cell {cell} has child {child} outside 0..{num_cells}")]
    ChildOutOfRange {
        /// Offending cell
        cell: usize,
        /// Child value as stored
        child: i32,
        /// Number of cells in the octree
        num_cells: usize,
    },

    /// A leaf lists a point outside `0..num_points`.
    #[error("cell {cell} lists point {point} outside 0..{num_points}")]
    PointOutOfRange {
        /// Offending cell
        cell: usize,
        /// Point index as stored
        point: usize,
        /// Number of points in the point set
        num_points: usize,
    },

    /// A leaf holds more than one point.
    #[error("leaf cell {cell} holds {count} points, at most one is allowed")]
    OverfullLeaf {
        /// Offending cell
        cell: usize,
        /// Number of points listed
        count: usize,
    },

    /// An inner cell lists the root as one of its children.
    #[error("cell {cell} lists the root as a child")]
    RootReferenced {
        /// Offending cell
        cell: usize,
    },

    /// A cell is the child of more than one parent slot.
    #[error("cell {cell} has more than one parent (referenced again by cell {parent})")]
    SharedCell {
        /// Cell referenced twice
        cell: usize,
        /// Cell holding the second reference
        parent: usize,
    },

    /// A point is held by more than one leaf.
    #[error("point {point} is held by more than one leaf (again by cell {cell})")]
    DuplicatePoint {
        /// Point listed twice
        point: usize,
        /// Leaf holding the second listing
        cell: usize,
    },

    /// A cell width is negative, infinite or NaN.
    #[error("cell {cell} has invalid width {width}")]
    InvalidWidth {
        /// Offending cell
        cell: usize,
        /// Width as stored
        width: f64,
    },
}
