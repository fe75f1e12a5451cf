use crate::config::HoleConfig;
use crate::error::{PreconditionError, PreconditionFailures, Result};
use crate::host::{ElementCatalog, ModelEditor, OpeningRequest, RayHit};
use crate::math::Point3;
use crate::model::{DocumentId, ElementId, LevelData, LevelRef, LinkInstance, ObstructionKey, ParameterId, WallData};

use super::conduits::LinearConduit;

/// The opening family symbol and its sizing parameters, resolved once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningTemplate {
    pub symbol: ElementId,
    pub width: ParameterId,
    pub height: ParameterId,
}

impl OpeningTemplate {
    /// Looks up the configured family and both size parameters in `doc`.
    ///
    /// Returns `Ok(None)` after recording every missing piece in
    /// `failures`: the family itself, or each parameter it lacks.
    ///
    /// # Errors
    ///
    /// Returns an error only if the document cannot be read.
    pub fn locate<C: ElementCatalog + ?Sized>(
        catalog: &C,
        doc: DocumentId,
        config: &HoleConfig,
        failures: &mut PreconditionFailures,
    ) -> Result<Option<Self>> {
        let Some(symbol) =
            catalog.find_family_template(doc, config.template_category, &config.family_name)?
        else {
            failures.0.push(PreconditionError::MissingTemplate {
                family: config.family_name.clone(),
            });
            return Ok(None);
        };

        let mut parameter = |name: &str| -> Result<Option<ParameterId>> {
            let found = catalog.lookup_parameter(doc, symbol, name)?;
            if found.is_none() {
                failures.0.push(PreconditionError::MissingParameter {
                    family: config.family_name.clone(),
                    parameter: name.to_owned(),
                });
            }
            Ok(found)
        };
        let width = parameter(config.width_parameter.as_str())?;
        let height = parameter(config.height_parameter.as_str())?;

        Ok(width
            .zip(height)
            .map(|(width, height)| Self {
                symbol,
                width,
                height,
            }))
    }
}

/// An opening created by the placement engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: ElementId,
    pub conduit: ElementId,
    pub point: Point3,
    pub proximity: f64,
    pub host: ObstructionKey,
    pub level: LevelRef,
    pub width: f64,
    pub height: f64,
}

/// Creates openings for resolved hits in the active document.
///
/// Must run inside an open transaction; the engine itself never commits.
pub struct PlacementEngine {
    doc: DocumentId,
    template: OpeningTemplate,
}

impl PlacementEngine {
    /// Creates an engine placing `template` into `doc`.
    #[must_use]
    pub fn new(doc: DocumentId, template: OpeningTemplate) -> Self {
        Self { doc, template }
    }

    /// Places one opening per hit, in hit order.
    ///
    /// # Errors
    ///
    /// Returns an error if a hit does not resolve to a wall with a level, or
    /// the host rejects a creation or parameter assignment. Openings created
    /// before the failure are left to the enclosing transaction to undo.
    pub fn place<H: ElementCatalog + ModelEditor + ?Sized>(
        &self,
        host: &mut H,
        conduit: &LinearConduit,
        hits: &[RayHit],
    ) -> Result<Vec<Opening>> {
        let (width, height) = conduit.profile().opening_size();
        let mut openings = Vec::with_capacity(hits.len());

        for hit in hits {
            let point = conduit.point_at(hit.proximity);
            let level = self.host_level(&*host, hit.key)?;

            let request = OpeningRequest {
                symbol: self.template.symbol,
                point,
                host: hit.key,
                level,
            };
            let id = host.create_opening(self.doc, &request)?;
            host.set_parameter(self.doc, id, self.template.width, width)?;
            host.set_parameter(self.doc, id, self.template.height, height)?;

            tracing::debug!(
                ?id,
                conduit = ?conduit.id(),
                wall = ?hit.key.element,
                linked = hit.key.is_linked(),
                "placed opening"
            );
            openings.push(Opening {
                id,
                conduit: conduit.id(),
                point,
                proximity: hit.proximity,
                host: hit.key,
                level,
                width,
                height,
            });
        }
        Ok(openings)
    }

    /// Level of the wall `key` names, in the document owning the wall.
    fn host_level<C: ElementCatalog + ?Sized>(&self, catalog: &C, key: ObstructionKey) -> Result<LevelRef> {
        let owner = match key.link {
            None => self.doc,
            Some(link) => catalog.get::<LinkInstance>(self.doc, link)?.document,
        };
        let wall = catalog.get::<WallData>(owner, key.element)?;
        catalog.get::<LevelData>(owner, wall.level)?;
        Ok(LevelRef {
            document: owner,
            element: wall.level,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{LineSegment, LocationCurve};
    use crate::host::{DocumentRegistry, TransactionScope};
    use crate::error::ModelError;
    use crate::model::{Category, FamilySymbol, OpeningData, Workspace};
    use crate::operations::{ConduitKind, ConduitProfile};
    use crate::HoleError;

    struct Fixture {
        ws: Workspace,
        level: ElementId,
        wall: ElementId,
        symbol: ElementId,
    }

    fn fixture(parameters: &[&str]) -> Fixture {
        let mut ws = Workspace::new("AR");
        let doc = ws.active_mut();
        let level = doc.add(LevelData {
            name: "L1".into(),
            elevation: 0.0,
        });
        let wall = doc.add(WallData {
            location: LineSegment::new(Point3::new(4.0, -5.0, 0.0), Point3::new(4.0, 5.0, 0.0)),
            thickness: 0.2,
            height: 3.0,
            base_offset: 0.0,
            level,
        });
        let symbol = doc.add(FamilySymbol {
            family_name: "Opening".into(),
            type_name: "Rect".into(),
            category: Category::GenericModel,
            parameters: parameters.iter().map(|p| (*p).to_owned()).collect(),
        });
        Fixture {
            ws,
            level,
            wall,
            symbol,
        }
    }

    fn duct(profile: ConduitProfile) -> LinearConduit {
        LinearConduit::from_location(
            ElementId::default(),
            ConduitKind::Duct,
            &LocationCurve::Line(LineSegment::new(Point3::new(0.0, 0.0, 1.0), Point3::new(10.0, 0.0, 1.0))),
            profile,
        )
        .unwrap()
    }

    #[test]
    fn locate_resolves_parameters_once() {
        let f = fixture(&["Depth", "Width", "Height"]);
        let mut failures = PreconditionFailures::default();
        let template = OpeningTemplate::locate(
            &f.ws,
            f.ws.active_document(),
            &HoleConfig::english(),
            &mut failures,
        )
        .unwrap()
        .unwrap();
        assert!(failures.is_empty());
        assert_eq!(template.symbol, f.symbol);
        assert_eq!(template.width, ParameterId::new(1));
        assert_eq!(template.height, ParameterId::new(2));
    }

    #[test]
    fn locate_reports_every_missing_parameter() {
        let f = fixture(&["Depth"]);
        let mut failures = PreconditionFailures::default();
        let template = OpeningTemplate::locate(
            &f.ws,
            f.ws.active_document(),
            &HoleConfig::english(),
            &mut failures,
        )
        .unwrap();
        assert!(template.is_none());
        assert_eq!(failures.0.len(), 2);
        assert!(failures.contains(&PreconditionError::MissingParameter {
            family: "Opening".into(),
            parameter: "Height".into(),
        }));
    }

    #[test]
    fn locate_reports_missing_family() {
        let f = fixture(&["Width", "Height"]);
        let mut failures = PreconditionFailures::default();
        let config = HoleConfig::english().with_family(Category::GenericModel, "Sleeve");
        let template =
            OpeningTemplate::locate(&f.ws, f.ws.active_document(), &config, &mut failures).unwrap();
        assert!(template.is_none());
        assert_eq!(
            failures.0,
            vec![PreconditionError::MissingTemplate {
                family: "Sleeve".into()
            }]
        );
    }

    #[test]
    fn locate_matches_family_category() {
        let mut f = fixture(&["Width", "Height"]);
        let doc = f.ws.active_document();
        let window = f.ws.active_mut().add(FamilySymbol {
            family_name: "Sleeve".into(),
            type_name: "Round".into(),
            category: Category::Windows,
            parameters: vec!["Width".into(), "Height".into()],
        });

        let mut failures = PreconditionFailures::default();
        let generic = HoleConfig::english().with_family(Category::GenericModel, "Sleeve");
        assert!(OpeningTemplate::locate(&f.ws, doc, &generic, &mut failures)
            .unwrap()
            .is_none());

        let mut failures = PreconditionFailures::default();
        let windows = HoleConfig::english().with_family(Category::Windows, "Sleeve");
        let template = OpeningTemplate::locate(&f.ws, doc, &windows, &mut failures)
            .unwrap()
            .unwrap();
        assert_eq!(template.symbol, window);
        assert!(failures.is_empty());
    }

    #[test]
    fn places_sized_opening_on_the_axis() {
        let mut f = fixture(&["Width", "Height"]);
        let doc = f.ws.active_document();
        let template = OpeningTemplate {
            symbol: f.symbol,
            width: ParameterId::new(0),
            height: ParameterId::new(1),
        };
        let conduit = duct(ConduitProfile::Rectangular {
            width: 0.5,
            height: 0.3,
        });
        let hits = [RayHit::new(3.9, ObstructionKey::local(f.wall))];

        f.ws.begin(doc, "place").unwrap();
        let openings = PlacementEngine::new(doc, template)
            .place(&mut f.ws, &conduit, &hits)
            .unwrap();
        f.ws.commit(doc).unwrap();

        assert_eq!(openings.len(), 1);
        let opening = &openings[0];
        assert_relative_eq!(opening.point, Point3::new(3.9, 0.0, 1.0));
        assert_eq!(opening.level.element, f.level);
        assert_eq!((opening.width, opening.height), (0.5, 0.3));

        let stored = f.ws.get::<OpeningData>(doc, opening.id).unwrap();
        assert_eq!(stored.values, vec![Some(0.5), Some(0.3)]);
        assert_eq!(stored.host, ObstructionKey::local(f.wall));
    }

    #[test]
    fn hit_on_non_wall_fails() {
        let mut f = fixture(&["Width", "Height"]);
        let doc = f.ws.active_document();
        let template = OpeningTemplate {
            symbol: f.symbol,
            width: ParameterId::new(0),
            height: ParameterId::new(1),
        };
        let hits = [RayHit::new(3.9, ObstructionKey::local(f.level))];

        f.ws.begin(doc, "place").unwrap();
        let result = PlacementEngine::new(doc, template).place(
            &mut f.ws,
            &duct(ConduitProfile::Round { diameter: 0.2 }),
            &hits,
        );
        assert!(matches!(
            result,
            Err(HoleError::Model(ModelError::WrongKind { .. }))
        ));
    }
}
