mod arc;
mod line;

pub use arc::Arc;
pub use line::{Line, LineSegment};

/// The driving curve of a line-based element such as a duct or pipe.
#[derive(Debug, Clone)]
pub enum LocationCurve {
    /// A straight run between two points.
    Line(LineSegment),
    /// A bent run (flexible duct, curved pipe).
    Arc(Arc),
}

impl LocationCurve {
    /// Short name of the curve kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Arc(_) => "arc",
        }
    }

    /// Returns the length of the run along its curve.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(segment) => segment.length(),
            Self::Arc(arc) => arc.length(),
        }
    }

    /// Returns the straight segment, or `None` for curved locations.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Self::Line(segment) => Some(segment),
            Self::Arc(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;

    #[test]
    fn length_follows_the_curve() {
        let straight = LocationCurve::Line(LineSegment::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0)));
        let bent = LocationCurve::Arc(Arc::new(1.5, PI).unwrap());
        assert_relative_eq!(straight.length(), 5.0);
        assert_relative_eq!(bent.length(), 1.5 * PI);
        assert!(bent.as_line().is_none());
    }
}
