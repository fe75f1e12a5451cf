use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of a line `origin + t * dir` with a plane.
///
/// When `dir` is unit-length, `t` is the distance from `origin` to the
/// crossing point, which is what ray casting reports as proximity.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        let point = origin + dir * t;
        LinePlaneRelation::Point { point, t }
    }
}

/// Projects `point` onto the plane's `(u, v)` parameter axes.
#[must_use]
pub fn plane_coordinates(point: &Point3, plane: &Plane) -> (f64, f64) {
    let diff = point - plane.origin();
    (diff.dot(plane.u_dir()), diff.dot(plane.v_dir()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn line_hits_wall_face() {
        let face = Plane::new(p(4.0, 0.0, 0.0), v(0.0, 0.0, 1.0), v(0.0, 1.0, 0.0)).unwrap();
        match line_plane_intersect(&p(0.0, 0.0, 1.0), &v(1.0, 0.0, 0.0), &face) {
            LinePlaneRelation::Point { point, t } => {
                assert!((t - 4.0).abs() < TOLERANCE);
                assert!((point.x - 4.0).abs() < TOLERANCE);
                assert!((point.z - 1.0).abs() < TOLERANCE);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn face_behind_origin_has_negative_parameter() {
        let face = Plane::new(p(-2.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0)).unwrap();
        match line_plane_intersect(&p(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &face) {
            LinePlaneRelation::Point { t, .. } => assert!((t + 2.0).abs() < TOLERANCE),
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn line_parallel_to_plane() {
        let plane = Plane::new(p(0.0, 0.0, 5.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        let result = line_plane_intersect(&p(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &plane);
        assert!(matches!(result, LinePlaneRelation::Parallel));
    }

    #[test]
    fn line_on_plane() {
        let plane = Plane::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        let result = line_plane_intersect(&p(1.0, 2.0, 0.0), &v(1.0, 0.0, 0.0), &plane);
        assert!(matches!(result, LinePlaneRelation::OnPlane));
    }

    #[test]
    fn coordinates_use_plane_axes() {
        let plane = Plane::new(p(1.0, 1.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)).unwrap();
        let (u, w) = plane_coordinates(&p(3.0, 1.0, 4.0), &plane);
        assert!((u - 2.0).abs() < TOLERANCE);
        assert!((w - 4.0).abs() < TOLERANCE);
    }
}
