//! Minimal octree builder for tests and benchmarks.
//!
//! Splits cubes into octants until every cell holds at most one point. Points must be
//! distinct; coincident points would never separate and are stopped by `MAX_DEPTH`.

#![allow(dead_code, reason = "shared with the bench and demo, which use a subset")]

const MAX_DEPTH: usize = 48;

/// Owned octree arrays in the layout the search expects
#[derive(Debug, Default)]
pub(crate) struct OwnedOctree {
    pub(crate) point_indices: Vec<Vec<usize>>,
    pub(crate) children: Vec<[i32; 8]>,
    pub(crate) centers: Vec<[f64; 3]>,
    pub(crate) widths: Vec<f64>,
}

impl OwnedOctree {
    /// Builds an octree whose root cube is the bounding cube of `points`
    pub(crate) fn build(points: &[[f64; 3]]) -> Self {
        let mut octree = OwnedOctree::default();
        if points.is_empty() {
            return octree;
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in points {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        let center = [
            (min[0] + max[0]) / 2.0,
            (min[1] + max[1]) / 2.0,
            (min[2] + max[2]) / 2.0,
        ];
        let width = (0..3).map(|axis| max[axis] - min[axis]).fold(0.0, f64::max);

        let all: Vec<usize> = (0..points.len()).collect();
        let _ = octree.build_cell(points, center, width, all, 0);
        octree
    }

    pub(crate) fn num_cells(&self) -> usize {
        self.children.len()
    }

    fn build_cell(
        &mut self,
        points: &[[f64; 3]],
        center: [f64; 3],
        width: f64,
        indices: Vec<usize>,
        depth: usize,
    ) -> i32 {
        let cell = self.children.len();
        self.children.push([-1; 8]);
        self.centers.push(center);
        self.widths.push(width);

        if indices.len() <= 1 || depth >= MAX_DEPTH {
            self.point_indices.push(indices);
            return cell as i32;
        }
        self.point_indices.push(Vec::new());

        let mut octants: [Vec<usize>; 8] = Default::default();
        for index in indices {
            let p = points[index];
            let octant = usize::from(p[0] >= center[0])
                | usize::from(p[1] >= center[1]) << 1
                | usize::from(p[2] >= center[2]) << 2;
            octants[octant].push(index);
        }

        let quarter = width / 4.0;
        let mut children = [0i32; 8];
        for (octant, members) in octants.into_iter().enumerate() {
            let offset = |bit: usize| if octant & bit != 0 { quarter } else { -quarter };
            let child_center = [center[0] + offset(1), center[1] + offset(2), center[2] + offset(4)];
            children[octant] = self.build_cell(points, child_center, width / 2.0, members, depth + 1);
        }
        self.children[cell] = children;
        cell as i32
    }
}

/// Indices of the `k` nearest points to `query` by exhaustive scan, with distances
pub(crate) fn brute_force_knn(points: &[[f64; 3]], query: [f64; 3], k: usize) -> Vec<(f64, usize)> {
    let mut all: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dx = p[0] - query[0];
            let dy = p[1] - query[1];
            let dz = p[2] - query[2];
            ((dx * dx + dy * dy + dz * dz).sqrt(), i)
        })
        .collect();
    all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    all.truncate(k);
    all
}
