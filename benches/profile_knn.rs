//! Profiling benchmark for batch k-NN over a random point cloud
//!
//! Runs the same batch sequentially and through the parallel dispatcher so the two
//! timings are directly comparable. Set `RUST_LOG=debug` to see dispatch decisions.

#[path = "../src/test_octree.rs"]
mod test_octree;

use octree_knn::{KnnConfig, KnnIndex, Octree};
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;
use test_octree::OwnedOctree;

fn main() {
    env_logger::init();

    println!("Octree k-NN Profiling Benchmark");
    println!("===============================\n");

    let num_points = 200_000;

    // Fixed seed for reproducibility
    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    // Coordinate space: 100x100x100
    println!("Generating {} random points...", num_points);
    let points: Vec<[f64; 3]> = (0..num_points)
        .map(|_| {
            [
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
            ]
        })
        .collect();

    let build_start = Instant::now();
    let owned = OwnedOctree::build(&points);
    let build_time = build_start.elapsed();
    println!(
        "  Octree built in {:.2}ms ({} cells)\n",
        build_time.as_secs_f64() * 1000.0,
        owned.num_cells()
    );

    let octree = Octree::new(&owned.point_indices, &owned.children, &owned.centers, &owned.widths);
    let index = match KnnIndex::new(&points, octree) {
        Ok(index) => index,
        Err(err) => {
            eprintln!("octree rejected: {}", err);
            return;
        }
    };

    let sequential = KnnConfig {
        parallel: false,
        ..KnnConfig::default()
    };
    let parallel = KnnConfig::default();

    println!("Profiling search (all points as queries):");
    println!("{}", "-".repeat(40));

    for k in [1, 10, 50] {
        for (label, config) in [("sequential", &sequential), ("parallel", &parallel)] {
            let start = Instant::now();
            let table = match index.search_with(k, config) {
                Ok(table) => table,
                Err(err) => {
                    eprintln!("search failed: {}", err);
                    return;
                }
            };
            let elapsed = start.elapsed();
            println!(
                "  k={:<3} {:<10} {} rows: {:.2}ms ({:.3}µs/query)",
                k,
                label,
                table.rows(),
                elapsed.as_secs_f64() * 1000.0,
                elapsed.as_secs_f64() * 1_000_000.0 / table.rows() as f64
            );
        }
    }
}
