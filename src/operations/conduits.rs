use crate::config::NonLinearPolicy;
use crate::error::{GeometryError, HoleError, Result};
use crate::geometry::{Line, LocationCurve};
use crate::host::ElementCatalog;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::model::{DocumentId, DuctData, DuctProfile, ElementId, PipeData};

/// Whether a conduit is a duct or a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConduitKind {
    Duct,
    Pipe,
}

/// Cross-section of a conduit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConduitProfile {
    Round { diameter: f64 },
    Rectangular { width: f64, height: f64 },
    Oval { width: f64, height: f64 },
}

impl ConduitProfile {
    /// Nominal diameter: the diameter of a round section, otherwise the
    /// larger side.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        match *self {
            Self::Round { diameter } => diameter,
            Self::Rectangular { width, height } | Self::Oval { width, height } => width.max(height),
        }
    }

    /// `(width, height)` of an opening that lets the section through.
    #[must_use]
    pub fn opening_size(&self) -> (f64, f64) {
        match *self {
            Self::Round { diameter } => (diameter, diameter),
            Self::Rectangular { width, height } | Self::Oval { width, height } => (width, height),
        }
    }

    fn is_positive(&self) -> bool {
        let (w, h) = self.opening_size();
        w > 0.0 && h > 0.0
    }
}

impl From<DuctProfile> for ConduitProfile {
    fn from(profile: DuctProfile) -> Self {
        match profile {
            DuctProfile::Round { diameter } => Self::Round { diameter },
            DuctProfile::Rectangular { width, height } => Self::Rectangular { width, height },
            DuctProfile::Oval { width, height } => Self::Oval { width, height },
        }
    }
}

/// A straight duct or pipe run, read once from the source model.
#[derive(Debug, Clone)]
pub struct LinearConduit {
    id: ElementId,
    kind: ConduitKind,
    axis: Line,
    length: f64,
    profile: ConduitProfile,
}

impl LinearConduit {
    /// Builds a conduit from an element's location curve.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonLinearPath` if the location is not a
    /// straight segment, or `GeometryError::Degenerate` if the segment has
    /// no length or the profile has a non-positive dimension.
    pub fn from_location(
        id: ElementId,
        kind: ConduitKind,
        location: &LocationCurve,
        profile: ConduitProfile,
    ) -> Result<Self> {
        let segment = location.as_line().ok_or(GeometryError::NonLinearPath {
            element: id,
            found: location.kind_name(),
            length: location.length(),
        })?;

        let length = segment.length();
        if length < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("{kind:?} {id:?} has zero length")).into());
        }
        if !profile.is_positive() {
            return Err(GeometryError::Degenerate(format!("{kind:?} {id:?} has no cross-section")).into());
        }

        Ok(Self {
            id,
            kind,
            axis: segment.to_line()?,
            length,
            profile,
        })
    }

    /// Returns the source element's ID.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns whether the run is a duct or a pipe.
    #[must_use]
    pub fn kind(&self) -> ConduitKind {
        self.kind
    }

    /// Returns the start point, where the ray is cast from.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        self.axis.origin()
    }

    /// Unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        self.axis.direction()
    }

    /// Returns the run length; hits beyond it are not crossings.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the cross-section.
    #[must_use]
    pub fn profile(&self) -> ConduitProfile {
        self.profile
    }

    /// Returns the profile's diameter (the larger side if not round).
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.profile.diameter()
    }

    /// Point on the axis at distance `proximity` from the start.
    #[must_use]
    pub fn point_at(&self, proximity: f64) -> Point3 {
        self.axis.point_at(proximity)
    }
}

/// A source element that was left out, and why.
#[derive(Debug)]
pub struct SkippedConduit {
    pub id: ElementId,
    pub kind: ConduitKind,
    pub reason: GeometryError,
}

/// Output of [`CollectConduits`].
#[derive(Debug, Default)]
pub struct ConduitSet {
    pub conduits: Vec<LinearConduit>,
    pub skipped: Vec<SkippedConduit>,
}

/// Reads every duct and pipe of the linked source document.
///
/// Ducts come first, then pipes, each in catalog order.
pub struct CollectConduits {
    policy: NonLinearPolicy,
}

impl CollectConduits {
    #[must_use]
    pub fn new(policy: NonLinearPolicy) -> Self {
        Self { policy }
    }

    /// Executes the collection against `doc`.
    ///
    /// # Errors
    ///
    /// Returns a geometry error for the first unusable element when the
    /// policy is [`NonLinearPolicy::Fail`], or a model error if the document
    /// cannot be read.
    pub fn execute<C: ElementCatalog + ?Sized>(&self, catalog: &C, doc: DocumentId) -> Result<ConduitSet> {
        let mut set = ConduitSet::default();

        for (id, duct) in catalog.collect::<DuctData>(doc, |_| true)? {
            let conduit = LinearConduit::from_location(id, ConduitKind::Duct, &duct.location, duct.profile.into());
            self.accept(&mut set, id, ConduitKind::Duct, conduit)?;
        }
        for (id, pipe) in catalog.collect::<PipeData>(doc, |_| true)? {
            let profile = ConduitProfile::Round {
                diameter: pipe.diameter,
            };
            let conduit = LinearConduit::from_location(id, ConduitKind::Pipe, &pipe.location, profile);
            self.accept(&mut set, id, ConduitKind::Pipe, conduit)?;
        }

        tracing::info!(
            conduits = set.conduits.len(),
            skipped = set.skipped.len(),
            "collected source conduits"
        );
        Ok(set)
    }

    fn accept(
        &self,
        set: &mut ConduitSet,
        id: ElementId,
        kind: ConduitKind,
        conduit: Result<LinearConduit>,
    ) -> Result<()> {
        match conduit {
            Ok(conduit) => set.conduits.push(conduit),
            Err(HoleError::Geometry(reason)) if self.policy == NonLinearPolicy::Skip => {
                tracing::warn!(?id, ?kind, %reason, "skipping conduit");
                set.skipped.push(SkippedConduit { id, kind, reason });
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{Arc, LineSegment};
    use crate::model::Workspace;

    fn straight(x0: f64, x1: f64) -> LocationCurve {
        LocationCurve::Line(LineSegment::new(Point3::new(x0, 0.0, 1.0), Point3::new(x1, 0.0, 1.0)))
    }

    fn bend() -> LocationCurve {
        LocationCurve::Arc(
            Arc::new(1.0, FRAC_PI_2).unwrap(),
        )
    }

    fn source() -> (Workspace, DocumentId) {
        let mut ws = Workspace::new("AR");
        let mep = ws.add_document("OV");
        let doc = ws.document_mut(mep).unwrap();
        doc.add(PipeData {
            location: straight(0.0, 4.0),
            diameter: 0.1,
        });
        doc.add(DuctData {
            location: straight(0.0, 10.0),
            profile: DuctProfile::Round { diameter: 0.3 },
        });
        doc.add(DuctData {
            location: bend(),
            profile: DuctProfile::Round { diameter: 0.3 },
        });
        (ws, mep)
    }

    #[test]
    fn conduit_exposes_axis() {
        let conduit = LinearConduit::from_location(
            ElementId::default(),
            ConduitKind::Duct,
            &straight(2.0, 12.0),
            ConduitProfile::Round { diameter: 0.25 },
        )
        .unwrap();
        assert_relative_eq!(conduit.length(), 10.0);
        assert_relative_eq!(*conduit.direction(), Vector3::x());
        assert_relative_eq!(conduit.point_at(4.0), Point3::new(6.0, 0.0, 1.0));
        assert_relative_eq!(conduit.diameter(), 0.25);
    }

    #[test]
    fn rectangular_profile_keeps_both_sides() {
        let profile = ConduitProfile::from(DuctProfile::Rectangular {
            width: 0.6,
            height: 0.4,
        });
        assert_eq!(profile.opening_size(), (0.6, 0.4));
        assert_relative_eq!(profile.diameter(), 0.6);
    }

    #[test]
    fn arc_is_a_non_linear_path() {
        let err = LinearConduit::from_location(
            ElementId::default(),
            ConduitKind::Duct,
            &bend(),
            ConduitProfile::Round { diameter: 0.25 },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HoleError::Geometry(GeometryError::NonLinearPath { found: "arc", .. })
        ));
        assert!(err.to_string().contains("1.571 long"));
    }

    #[test]
    fn zero_length_and_zero_diameter_are_degenerate() {
        let id = ElementId::default();
        let round = ConduitProfile::Round { diameter: 0.2 };
        assert!(LinearConduit::from_location(id, ConduitKind::Pipe, &straight(1.0, 1.0), round).is_err());
        let flat = ConduitProfile::Round { diameter: 0.0 };
        assert!(LinearConduit::from_location(id, ConduitKind::Pipe, &straight(0.0, 1.0), flat).is_err());
    }

    #[test]
    fn ducts_come_before_pipes_and_bends_are_skipped() {
        let (ws, mep) = source();
        let set = CollectConduits::new(NonLinearPolicy::Skip).execute(&ws, mep).unwrap();

        let kinds: Vec<_> = set.conduits.iter().map(LinearConduit::kind).collect();
        assert_eq!(kinds, vec![ConduitKind::Duct, ConduitKind::Pipe]);
        assert_eq!(set.skipped.len(), 1);
        assert_eq!(set.skipped[0].kind, ConduitKind::Duct);
    }

    #[test]
    fn fail_policy_aborts_on_bend() {
        let (ws, mep) = source();
        let result = CollectConduits::new(NonLinearPolicy::Fail).execute(&ws, mep);
        assert!(matches!(
            result,
            Err(HoleError::Geometry(GeometryError::NonLinearPath { .. }))
        ));
    }
}
