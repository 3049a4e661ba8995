//! Find the 3 nearest neighbors of every point in a small cloud.
//!
//! The octree here is built by the same helper the crate's tests use; in practice it
//! comes from whatever octree builder produced the cell arrays.

#[path = "../src/test_octree.rs"]
mod test_octree;

use octree_knn::point_distance;
use octree_knn::prelude::*;
use test_octree::OwnedOctree;

fn main() {
    env_logger::init();

    let points = [
        [0.0, 0.0, 0.0], // Point 0
        [1.0, 0.0, 0.0], // Point 1: distance 1 from point 0
        [0.0, 1.0, 0.0], // Point 2: distance 1 from point 0
        [0.0, 0.0, 1.0], // Point 3: distance 1 from point 0
        [5.0, 5.0, 5.0], // Point 4: far from everything
    ];

    let owned = OwnedOctree::build(&points);
    let octree = Octree::new(&owned.point_indices, &owned.children, &owned.centers, &owned.widths);
    println!("Octree has {} cells for {} points\n", owned.num_cells(), points.len());

    let table = match knn_search(&points, 3, octree) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("search failed: {}", err);
            return;
        }
    };

    for (i, row) in table.iter_rows().enumerate() {
        let distances: Vec<String> = row
            .iter()
            .map(|&j| format!("{:.3}", point_distance(points[i], points[j])))
            .collect();
        println!("  point {} -> {:?} at distances [{}]", i, row, distances.join(", "));
    }

    assert_eq!(table.row(0)[0], 0, "Point 0 should be its own nearest neighbor");
    assert!(!table.row(0).contains(&4), "Point 4 is never among point 0's neighbors");
    println!("\n✓ Correct!");
}
