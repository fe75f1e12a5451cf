use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;

/// A circular bend of a duct or pipe run.
///
/// Bent runs never receive openings; only the extent of the bend is kept
/// so a skipped element can be described.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    radius: f64,
    sweep: f64,
}

impl Arc {
    /// Creates a bend of `radius` sweeping `sweep` radians (either sense).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is non-positive or
    /// the sweep is zero.
    pub fn new(radius: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        Ok(Self { radius, sweep })
    }

    /// Returns the length of the swept arc.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn length_ignores_sweep_sense() {
        assert_relative_eq!(Arc::new(2.0, FRAC_PI_2).unwrap().length(), PI);
        assert_relative_eq!(Arc::new(2.0, -FRAC_PI_2).unwrap().length(), PI);
    }

    #[test]
    fn rejects_flat_bends() {
        assert!(Arc::new(0.0, 1.0).is_err());
        assert!(Arc::new(1.0, 0.0).is_err());
    }
}
