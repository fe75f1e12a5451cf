use crate::error::{PreconditionError, Result};
use crate::host::{ElementCatalog, ObstructionFilter, RayCastService, RayHit};
use crate::math::{Point3, Vector3};
use crate::model::{DocumentId, ElementId, View3dData};

use super::conduits::LinearConduit;

/// Ray-cast query against the walls of the active document, bound to the
/// 3D view that gives the host its spatial context.
pub struct ObstructionCollector<'h, H: ?Sized> {
    host: &'h H,
    doc: DocumentId,
    view: ElementId,
    filter: ObstructionFilter,
}

impl<'h, H: ElementCatalog + RayCastService + ?Sized> ObstructionCollector<'h, H> {
    /// First 3D view of `doc` that is not a view template.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub fn find_view(host: &H, doc: DocumentId) -> Result<Option<ElementId>> {
        Ok(host
            .collect::<View3dData>(doc, |view| !view.is_template)?
            .first()
            .map(|(id, _)| *id))
    }

    /// Binds a collector to an already located view.
    #[must_use]
    pub fn new(host: &'h H, doc: DocumentId, view: ElementId, filter: ObstructionFilter) -> Self {
        Self {
            host,
            doc,
            view,
            filter,
        }
    }

    /// Locates the view and binds a collector to it.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::MissingViewContext` if the document has no
    /// non-template 3D view.
    pub fn locate(host: &'h H, doc: DocumentId, filter: ObstructionFilter) -> Result<Self> {
        let view = Self::find_view(host, doc)?.ok_or(PreconditionError::MissingViewContext)?;
        Ok(Self::new(host, doc, view, filter))
    }

    #[must_use]
    pub fn view(&self) -> ElementId {
        self.view
    }

    /// Every wall crossing along the forward ray.
    ///
    /// # Errors
    ///
    /// Propagates ray-cast failures from the host.
    pub fn cast_ray(&self, origin: &Point3, direction: &Vector3) -> Result<Vec<RayHit>> {
        self.host
            .cast_ray(self.doc, self.view, self.filter, origin, direction)
    }

    /// Wall crossings along the conduit's axis, from its start outwards.
    /// Hits beyond the far end are included; the resolver drops them.
    ///
    /// # Errors
    ///
    /// Propagates ray-cast failures from the host.
    pub fn hits_along(&self, conduit: &LinearConduit) -> Result<Vec<RayHit>> {
        let hits = self.cast_ray(conduit.start(), conduit.direction())?;
        tracing::debug!(conduit = ?conduit.id(), hits = hits.len(), "ray cast");
        Ok(hits)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::DocumentRegistry;
    use crate::model::Workspace;
    use crate::HoleError;

    const FILTER: ObstructionFilter = ObstructionFilter {
        include_links: false,
    };

    #[test]
    fn skips_view_templates() {
        let mut ws = Workspace::new("AR");
        let doc = ws.active_document();
        ws.active_mut().add(View3dData {
            name: "Template".into(),
            is_template: true,
            section_box: None,
        });
        let real = ws.active_mut().add(View3dData {
            name: "{3D}".into(),
            is_template: false,
            section_box: None,
        });

        let collector = ObstructionCollector::locate(&ws, doc, FILTER).unwrap();
        assert_eq!(collector.view(), real);
    }

    #[test]
    fn missing_view_is_a_precondition_failure() {
        let mut ws = Workspace::new("AR");
        let doc = ws.active_document();
        ws.active_mut().add(View3dData {
            name: "Template".into(),
            is_template: true,
            section_box: None,
        });

        assert_eq!(ObstructionCollector::find_view(&ws, doc).unwrap(), None);
        assert!(matches!(
            ObstructionCollector::locate(&ws, doc, FILTER),
            Err(HoleError::Precondition(PreconditionError::MissingViewContext))
        ));
    }

    #[test]
    fn empty_model_yields_no_hits() {
        let mut ws = Workspace::new("AR");
        let doc = ws.active_document();
        ws.active_mut().add(View3dData {
            name: "{3D}".into(),
            is_template: false,
            section_box: None,
        });
        let collector = ObstructionCollector::locate(&ws, doc, FILTER).unwrap();
        assert!(collector
            .cast_ray(&Point3::origin(), &Vector3::x())
            .unwrap()
            .is_empty());
    }
}
