use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::intersect_3d::{line_plane_intersect, plane_coordinates, LinePlaneRelation};
use crate::math::{Point3, Vector3, FACE_TOLERANCE, TOLERANCE};

use super::element::WallData;

/// A planar face bounded by `[0, u_max] × [0, v_max]` in its own axes.
#[derive(Debug, Clone)]
struct BoundedFace {
    plane: Plane,
    u_max: f64,
    v_max: f64,
}

impl BoundedFace {
    fn new(origin: Point3, u_dir: Vector3, u_max: f64, v_dir: Vector3, v_max: f64) -> Result<Self> {
        Ok(Self {
            plane: Plane::new(origin, u_dir, v_dir)?,
            u_max,
            v_max,
        })
    }

    fn contains(&self, point: &Point3) -> bool {
        let (u, v) = plane_coordinates(point, &self.plane);
        (-FACE_TOLERANCE..=self.u_max + FACE_TOLERANCE).contains(&u)
            && (-FACE_TOLERANCE..=self.v_max + FACE_TOLERANCE).contains(&v)
    }
}

/// The box a straight wall occupies, as six bounded faces.
///
/// Casting a ray against it reports one parameter per face crossed, so a
/// ray passing straight through yields two hits (entry and exit side) for
/// the same wall.
#[derive(Debug, Clone)]
pub struct WallSolid {
    faces: [BoundedFace; 6],
}

impl WallSolid {
    /// Builds the solid of `wall` standing on a level at `level_elevation`,
    /// translated by `offset`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the wall has no horizontal
    /// extent, thickness or height.
    pub fn new(wall: &WallData, level_elevation: f64, offset: &Vector3) -> Result<Self> {
        let start = wall.location.start();
        let end = wall.location.end();
        let along = Vector3::new(end.x - start.x, end.y - start.y, 0.0);
        let length = along.norm();
        if length < TOLERANCE {
            return Err(GeometryError::Degenerate("wall centerline is vertical or empty".into()).into());
        }
        if wall.thickness < TOLERANCE || wall.height < TOLERANCE {
            return Err(GeometryError::Degenerate("wall has no thickness or height".into()).into());
        }

        let along = along / length;
        let across = Vector3::new(-along.y, along.x, 0.0);
        let up = Vector3::z();
        let (t, h) = (wall.thickness, wall.height);

        // Bottom corner on the `-across` side of the wall start.
        let corner = Point3::new(start.x, start.y, level_elevation + wall.base_offset) + *offset
            - across * (t / 2.0);

        let faces = [
            BoundedFace::new(corner, along, length, up, h)?,
            BoundedFace::new(corner + across * t, along, length, up, h)?,
            BoundedFace::new(corner, across, t, up, h)?,
            BoundedFace::new(corner + along * length, across, t, up, h)?,
            BoundedFace::new(corner, along, length, across, t)?,
            BoundedFace::new(corner + up * h, along, length, across, t)?,
        ];
        Ok(Self { faces })
    }

    /// Distances along `direction` (unit-length) from `origin` to every face
    /// of the solid the forward ray crosses, in face order.
    #[must_use]
    pub fn ray_hits(&self, origin: &Point3, direction: &Vector3) -> Vec<f64> {
        self.faces
            .iter()
            .filter_map(|face| match line_plane_intersect(origin, direction, &face.plane) {
                LinePlaneRelation::Point { point, t } if t >= 0.0 && face.contains(&point) => {
                    Some(t)
                }
                _ => None,
            })
            .collect()
    }
}
