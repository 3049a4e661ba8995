//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use octree_knn::prelude::*;
//! ```

pub use crate::{KnnConfig, KnnError, KnnIndex, KnnTable, LEAF_SENTINEL, Octree, Point3, knn_search};
