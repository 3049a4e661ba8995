//! Batch dispatch: one traversal per query row, written into a shared result table.

use log::debug;

use crate::distance::Point3;
use crate::error::KnnError;
use crate::frontier::Frontier;
use crate::octree::Octree;
use crate::traversal::collect_nearest;

/// Default minimum number of queries handed to a worker at once
pub const DEFAULT_MIN_CHUNK_LEN: usize = 1000;

/// Configuration for batch k-NN search.
#[derive(Debug, Clone)]
pub struct KnnConfig {
    /// Minimum number of queries per scheduled unit of work.
    ///
    /// Batches with at most this many queries run on the calling thread.
    pub min_chunk_len: usize,
    /// If false, all queries run on the calling thread.
    ///
    /// Has no effect when the crate is built without the `parallel` feature.
    pub parallel: bool,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            parallel: true,
        }
    }
}

/// Row-major table of neighbor indices, one row per query.
///
/// Row `i` holds the `k` nearest point indices for query `i`, closest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnnTable {
    rows: usize,
    k: usize,
    indices: Vec<usize>,
}

impl KnnTable {
    /// Number of rows (queries)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of neighbors per row
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns whether the table holds no indices
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Neighbors of query `row`, closest first
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[usize] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        &self.indices[row * self.k..(row + 1) * self.k]
    }

    /// Iterates over all rows in query order
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        (0..self.rows).map(move |row| &self.indices[row * self.k..(row + 1) * self.k])
    }

    /// All indices, row-major
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Consumes the table, returning the row-major indices
    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Runs one traversal per query and collects the results.
///
/// `k` must already be clamped to the number of points, and the octree validated.
pub(crate) fn search_batch(
    queries: &[Point3],
    points: &[Point3],
    octree: &Octree<'_>,
    k: usize,
    config: &KnnConfig,
) -> Result<KnnTable, KnnError> {
    debug_assert!(k <= points.len(), "k must be clamped to the point count");

    let rows = queries.len();
    let mut indices = vec![0usize; rows * k];
    if !indices.is_empty() {
        let min_chunk_len = config.min_chunk_len.max(1);
        let parallel = cfg!(feature = "parallel") && config.parallel && rows > min_chunk_len;
        debug!(
            "knn batch: {} queries, {} points, {} cells, k = {}, chunk >= {}, parallel = {}",
            rows,
            points.len(),
            octree.num_cells(),
            k,
            min_chunk_len,
            parallel
        );

        #[cfg(feature = "parallel")]
        {
            if parallel {
                search_parallel(queries, points, octree, min_chunk_len, &mut indices, k)?;
                return Ok(KnnTable { rows, k, indices });
            }
        }
        search_sequential(queries, points, octree, &mut indices, k)?;
    }
    Ok(KnnTable { rows, k, indices })
}

fn search_sequential(
    queries: &[Point3],
    points: &[Point3],
    octree: &Octree<'_>,
    indices: &mut [usize],
    k: usize,
) -> Result<(), KnnError> {
    let mut frontier = Frontier::new();
    for (query_idx, (query, row)) in queries.iter().zip(indices.chunks_mut(k)).enumerate() {
        fill_row(query_idx, *query, points, octree, &mut frontier, row)?;
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn search_parallel(
    queries: &[Point3],
    points: &[Point3],
    octree: &Octree<'_>,
    min_chunk_len: usize,
    indices: &mut [usize],
    k: usize,
) -> Result<(), KnnError> {
    use rayon::prelude::*;

    // Each worker reuses one frontier across the rows it is handed
    indices
        .par_chunks_mut(k)
        .zip(queries.par_iter())
        .enumerate()
        .with_min_len(min_chunk_len)
        .try_for_each_init(Frontier::new, |frontier, (query_idx, (row, query))| {
            fill_row(query_idx, *query, points, octree, frontier, row)
        })
}

#[inline]
fn fill_row(
    query_idx: usize,
    query: Point3,
    points: &[Point3],
    octree: &Octree<'_>,
    frontier: &mut Frontier,
    row: &mut [usize],
) -> Result<(), KnnError> {
    let found = collect_nearest(query, points, octree, frontier, row);
    if found < row.len() {
        return Err(KnnError::FrontierExhausted {
            query: query_idx,
            found,
            wanted: row.len(),
        });
    }
    Ok(())
}
