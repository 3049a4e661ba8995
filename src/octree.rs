//! Read-only view over a prebuilt octree.
//!
//! The octree is described by four index-aligned arrays, one entry per cell, with the
//! root at index 0. Construction happens elsewhere; this module only borrows the arrays,
//! answers structural questions, and validates them before a search.

use crate::distance::Point3;
use crate::error::OctreeDefect;

/// Child slot value marking a leaf. Only the first slot of a cell is inspected.
pub const LEAF_SENTINEL: i32 = -1;

/// Borrowed octree arrays
///
/// | array           | entry for cell `c`                                        |
/// |-----------------|-----------------------------------------------------------|
/// | `point_indices` | points held by `c`; read for leaves only, at most one     |
/// | `children`      | 8 child cell indices, `LEAF_SENTINEL` first for a leaf    |
/// | `centers`       | center of the cell's cube                                 |
/// | `widths`        | full side length of the cell's cube                       |
#[derive(Clone, Copy, Debug)]
pub struct Octree<'a> {
    point_indices: &'a [Vec<usize>],
    children: &'a [[i32; 8]],
    centers: &'a [Point3],
    widths: &'a [f64],
}

impl<'a> Octree<'a> {
    /// Bundles the cell arrays. No checks are made here; see [`Octree::validate`].
    pub fn new(
        point_indices: &'a [Vec<usize>],
        children: &'a [[i32; 8]],
        centers: &'a [Point3],
        widths: &'a [f64],
    ) -> Self {
        Self {
            point_indices,
            children,
            centers,
            widths,
        }
    }

    /// Returns the number of cells
    pub fn num_cells(&self) -> usize {
        self.children.len()
    }

    /// Returns whether the octree has no cells
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether `cell` is a leaf
    #[inline]
    pub fn is_leaf(&self, cell: usize) -> bool {
        self.children[cell][0] == LEAF_SENTINEL
    }

    /// Child cells of an inner cell. Yields nothing for a leaf.
    #[inline]
    pub fn children(&self, cell: usize) -> impl Iterator<Item = usize> + 'a {
        let cells: &'a [[i32; 8]] = self.children;
        let slots = &cells[cell];
        let count = if slots[0] == LEAF_SENTINEL { 0 } else { 8 };
        slots[..count].iter().map(|&child| {
            debug_assert!(child >= 0, "negative child in inner cell");
            child as usize
        })
    }

    /// The point a leaf holds, if any
    #[inline]
    pub fn leaf_point(&self, cell: usize) -> Option<usize> {
        self.point_indices[cell].first().copied()
    }

    /// Center of the cell's cube
    #[inline]
    pub fn center(&self, cell: usize) -> Point3 {
        self.centers[cell]
    }

    /// Full side length of the cell's cube
    #[inline]
    pub fn width(&self, cell: usize) -> f64 {
        self.widths[cell]
    }

    /// Checks that the arrays form an octree the search can walk over `num_points` points.
    ///
    /// Catches misaligned arrays, out-of-range child and point indices, leaves with more
    /// than one point, and bad widths. Every cell may be referenced by at most one parent
    /// slot and the root by none, so the cells reachable from the root form a tree and a
    /// search can neither loop nor visit a cell twice. A point may sit in at most one leaf.
    /// Point lists of inner cells are never read, so builders that keep subtree point lists
    /// on every cell are accepted. Points unreachable from the root are not detected here;
    /// they surface as [`KnnError::FrontierExhausted`](crate::KnnError::FrontierExhausted)
    /// during search.
    ///
    /// An empty point set accepts any octree, even misaligned arrays, since no search
    /// will touch it.
    ///
    /// # Errors
    /// Returns the first [`OctreeDefect`] found, scanning cells in index order.
    pub fn validate(&self, num_points: usize) -> Result<(), OctreeDefect> {
        if num_points == 0 {
            return Ok(());
        }
        let num_cells = self.children.len();
        if self.point_indices.len() != num_cells
            || self.centers.len() != num_cells
            || self.widths.len() != num_cells
        {
            return Err(OctreeDefect::MisalignedArrays {
                point_indices: self.point_indices.len(),
                children: num_cells,
                centers: self.centers.len(),
                widths: self.widths.len(),
            });
        }
        if num_cells == 0 {
            return Err(OctreeDefect::MissingRoot { points: num_points });
        }

        let mut has_parent = vec![false; num_cells];
        let mut in_leaf = vec![false; num_points];

        for cell in 0..num_cells {
            let width = self.widths[cell];
            if !width.is_finite() || width < 0.0 {
                return Err(OctreeDefect::InvalidWidth { cell, width });
            }

            let points = &self.point_indices[cell];
            if self.is_leaf(cell) {
                if points.len() > 1 {
                    return Err(OctreeDefect::OverfullLeaf {
                        cell,
                        count: points.len(),
                    });
                }
                if let Some(&point) = points.first() {
                    if point >= num_points {
                        return Err(OctreeDefect::PointOutOfRange {
                            cell,
                            point,
                            num_points,
                        });
                    }
                    if std::mem::replace(&mut in_leaf[point], true) {
                        return Err(OctreeDefect::DuplicatePoint { point, cell });
                    }
                }
            } else {
                for &child in &self.children[cell] {
                    if child < 0 || child as usize >= num_cells {
                        return Err(OctreeDefect::ChildOutOfRange {
                            cell,
                            child,
                            num_cells,
                        });
                    }
                    let child = child as usize;
                    if child == 0 {
                        return Err(OctreeDefect::RootReferenced { cell });
                    }
                    if std::mem::replace(&mut has_parent[child], true) {
                        return Err(OctreeDefect::SharedCell { cell: child, parent: cell });
                    }
                }
            }
        }
        Ok(())
    }
}
