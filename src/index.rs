//! Validated pairing of a point set with its octree, and the query methods over it.

use crate::batch::{KnnConfig, KnnTable, search_batch};
use crate::distance::Point3;
use crate::error::KnnError;
use crate::frontier::Frontier;
use crate::octree::Octree;
use crate::traversal::collect_nearest;

/// A point set together with an octree that partitions it.
///
/// The octree is validated once in [`KnnIndex::new`]; queries afterwards are read-only
/// and the index can be shared freely across threads.
#[derive(Clone, Copy, Debug)]
pub struct KnnIndex<'a> {
    points: &'a [Point3],
    octree: Octree<'a>,
}

impl<'a> KnnIndex<'a> {
    /// Pairs `points` with `octree` after validating the octree against the point count.
    ///
    /// # Errors
    /// Returns [`KnnError::InvalidOctree`] if [`Octree::validate`] rejects the arrays.
    ///
    /// # Examples
    /// ```
    /// use octree_knn::{KnnIndex, Octree, LEAF_SENTINEL};
    ///
    /// let points = [[0.0, 0.0, 0.0]];
    /// let point_indices = vec![vec![0]];
    /// let children = [[LEAF_SENTINEL; 8]];
    /// let centers = [[0.0, 0.0, 0.0]];
    /// let widths = [1.0];
    /// let octree = Octree::new(&point_indices, &children, &centers, &widths);
    ///
    /// let index = KnnIndex::new(&points, octree).unwrap();
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn new(points: &'a [Point3], octree: Octree<'a>) -> Result<Self, KnnError> {
        octree.validate(points.len())?;
        Ok(Self { points, octree })
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the point set is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The indexed points
    pub fn points(&self) -> &'a [Point3] {
        self.points
    }

    /// The octree over the points
    pub fn octree(&self) -> Octree<'a> {
        self.octree
    }

    /// Queries for the `k` points nearest to `query`
    ///
    /// `k` is clamped to the number of points. `results` is cleared first, then filled
    /// with point indices, closest first.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] (with `query` 0) if the octree does not
    /// reach enough points. `results` then holds the neighbors that were found.
    ///
    /// # Examples
    /// ```
    /// use octree_knn::{KnnIndex, Octree, LEAF_SENTINEL};
    ///
    /// // Two points in the lower and upper halves of a [0, 2] cube
    /// let points = [[0.5, 0.5, 0.5], [1.5, 1.5, 1.5]];
    /// let mut point_indices = vec![Vec::new(); 9];
    /// point_indices[1] = vec![0];
    /// point_indices[8] = vec![1];
    /// let mut children = vec![[LEAF_SENTINEL; 8]; 9];
    /// children[0] = [1, 2, 3, 4, 5, 6, 7, 8];
    /// let mut centers = vec![[1.0, 1.0, 1.0]];
    /// for octant in 0..8 {
    ///     let c = |bit: usize| if octant & bit != 0 { 1.5 } else { 0.5 };
    ///     centers.push([c(1), c(2), c(4)]);
    /// }
    /// let mut widths = vec![2.0];
    /// widths.extend([1.0; 8]);
    /// let octree = Octree::new(&point_indices, &children, &centers, &widths);
    /// let index = KnnIndex::new(&points, octree).unwrap();
    ///
    /// let mut results = vec![7];
    /// index.nearest_k([2.0, 2.0, 2.0], 5, &mut results).unwrap();
    /// assert_eq!(results, vec![1, 0]);
    /// ```
    pub fn nearest_k(&self, query: Point3, k: usize, results: &mut Vec<usize>) -> Result<(), KnnError> {
        results.clear();
        let k = k.min(self.points.len());
        if k == 0 {
            return Ok(());
        }

        results.resize(k, 0);
        let mut frontier = Frontier::new();
        let found = collect_nearest(query, self.points, &self.octree, &mut frontier, results);
        if found < k {
            results.truncate(found);
            return Err(KnnError::FrontierExhausted {
                query: 0,
                found,
                wanted: k,
            });
        }
        Ok(())
    }

    /// Queries for the point nearest to `query`
    ///
    /// Returns `None` if the point set is empty.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] if the octree reaches no point.
    pub fn nearest(&self, query: Point3) -> Result<Option<usize>, KnnError> {
        let mut results = Vec::with_capacity(1);
        self.nearest_k(query, 1, &mut results)?;
        Ok(results.first().copied())
    }

    /// k nearest neighbors of every indexed point, using [`KnnConfig::default`].
    ///
    /// Row `i` of the table belongs to point `i`, which is its own first neighbor unless
    /// another point coincides with it.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] if some query cannot find `k` points.
    pub fn search(&self, k: usize) -> Result<KnnTable, KnnError> {
        self.search_with(k, &KnnConfig::default())
    }

    /// Same as [`KnnIndex::search`] with explicit configuration.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] if some query cannot find `k` points.
    pub fn search_with(&self, k: usize, config: &KnnConfig) -> Result<KnnTable, KnnError> {
        self.search_queries_with(self.points, k, config)
    }

    /// k nearest indexed points for each of `queries`, using [`KnnConfig::default`].
    ///
    /// The queries need not belong to the point set. The table has one row per query.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] if some query cannot find `k` points.
    pub fn search_queries(&self, queries: &[Point3], k: usize) -> Result<KnnTable, KnnError> {
        self.search_queries_with(queries, k, &KnnConfig::default())
    }

    /// Same as [`KnnIndex::search_queries`] with explicit configuration.
    ///
    /// # Errors
    /// Returns [`KnnError::FrontierExhausted`] if some query cannot find `k` points.
    pub fn search_queries_with(
        &self,
        queries: &[Point3],
        k: usize,
        config: &KnnConfig,
    ) -> Result<KnnTable, KnnError> {
        let k = k.min(self.points.len());
        search_batch(queries, self.points, &self.octree, k, config)
    }
}
