//! Distance primitives for the octree search.
//!
//! Cell widths are full side lengths: a cell spans `center ± width / 2` on every axis.

/// A point in 3D space.
pub type Point3 = [f64; 3];

/// Euclidean distance between two points
#[inline]
pub fn point_distance(a: Point3, b: Point3) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Lower bound on the distance from `point` to anything inside an axis-aligned cube.
///
/// Returns 0 when the point lies inside the cube or on its boundary. The value never
/// exceeds the true distance to any location inside the cube, which is what lets the
/// search expand cells lazily and still return exact neighbors.
///
/// # Examples
/// ```
/// use octree_knn::cube_lower_bound;
///
/// // Unit cube centered at the origin
/// assert_eq!(cube_lower_bound([0.25, 0.0, 0.0], [0.0; 3], 1.0), 0.0);
/// assert!((cube_lower_bound([1.5, 0.0, 0.0], [0.0; 3], 1.0) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn cube_lower_bound(point: Point3, center: Point3, width: f64) -> f64 {
    if width > 0.0 {
        // Normalize into the unit-width cube, measure there, scale back
        let ex = axis_excess((point[0] - center[0]) / width, 0.5);
        let ey = axis_excess((point[1] - center[1]) / width, 0.5);
        let ez = axis_excess((point[2] - center[2]) / width, 0.5);
        width * (ex * ex + ey * ey + ez * ez).sqrt()
    } else {
        // Degenerate cube collapses to its center
        point_distance(point, center)
    }
}

/// Get distance past a centered half extent along one axis
#[inline]
fn axis_excess(coordinate: f64, half_extent: f64) -> f64 {
    (coordinate.abs() - half_extent).max(0.0)
}
