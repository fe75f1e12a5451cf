use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the point at signed distance `t` from the origin.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// A bounded straight segment between two end points.
///
/// The location of a straight duct or pipe run.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Point3,
    end: Point3,
}

impl LineSegment {
    /// Creates a segment from its end points.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the first end point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the second end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the distance between the end points.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn direction(&self) -> Result<Vector3> {
        let delta = self.end - self.start;
        let len = delta.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(delta / len)
    }

    /// Returns the infinite line carrying this segment, anchored at `start`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero-length segment.
    pub fn to_line(&self) -> Result<Line> {
        Line::new(self.start, self.end - self.start)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn line_normalizes_direction() {
        let line = Line::new(Point3::origin(), Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(line.direction().norm(), 1.0);
        assert_relative_eq!(line.point_at(5.0), Point3::new(0.0, 3.0, 4.0));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Line::new(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn segment_line_starts_at_start_point() {
        let seg = LineSegment::new(Point3::new(1.0, 0.0, 2.0), Point3::new(1.0, 6.0, 2.0));
        assert_relative_eq!(seg.length(), 6.0);
        assert_relative_eq!(seg.direction().unwrap(), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(seg.to_line().unwrap().point_at(2.5), Point3::new(1.0, 2.5, 2.0));
    }

    #[test]
    fn collapsed_segment_has_no_direction() {
        let p = Point3::new(2.0, 2.0, 2.0);
        let seg = LineSegment::new(p, p);
        assert!(seg.direction().is_err());
        assert!(seg.to_line().is_err());
    }
}
