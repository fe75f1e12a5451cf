use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{
    GeometryError, HoleError, ModelError, PreconditionError, Result, TransactionError,
};
use crate::host::{
    DocumentRegistry, ElementCatalog, ModelEditor, ObstructionFilter, OpeningRequest, RayCastService,
    RayHit, TransactionScope,
};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::document::Document;
use super::element::{
    Element, FamilySymbol, LevelData, LinkInstance, OpeningData, View3dData, WallData,
};
use super::ids::{DocumentId, ElementId, ObstructionKey, ParameterId};
use super::wall_solid::WallSolid;

/// A change recorded inside an open transaction, replayed backwards on
/// rollback.
#[derive(Debug)]
enum Undo {
    Created(ElementId),
    ParameterSet {
        element: ElementId,
        slot: usize,
        previous: Option<f64>,
    },
}

#[derive(Debug)]
struct OpenTransaction {
    name: String,
    undo: Vec<Undo>,
}

/// An in-memory host session: the active document plus every document
/// loaded alongside it (linked models).
#[derive(Debug)]
pub struct Workspace {
    documents: SlotMap<DocumentId, Document>,
    active: DocumentId,
    transactions: FxHashMap<DocumentId, OpenTransaction>,
}

impl Workspace {
    /// Creates a session whose active document is called `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let mut documents = SlotMap::with_key();
        let active = documents.insert(Document::new(title));
        Self {
            documents,
            active,
            transactions: FxHashMap::default(),
        }
    }

    /// Loads another document into the session and returns its ID.
    pub fn add_document(&mut self, title: impl Into<String>) -> DocumentId {
        self.documents.insert(Document::new(title))
    }

    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    pub fn document(&self, doc: DocumentId) -> std::result::Result<&Document, ModelError> {
        self.documents.get(doc).ok_or(ModelError::DocumentNotFound)
    }

    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    pub fn document_mut(&mut self, doc: DocumentId) -> std::result::Result<&mut Document, ModelError> {
        self.documents.get_mut(doc).ok_or(ModelError::DocumentNotFound)
    }

    /// Convenience accessor for the active document.
    pub fn active_mut(&mut self) -> &mut Document {
        // The active document is created with the workspace and never removed.
        &mut self.documents[self.active]
    }

    /// Returns `true` while a transaction is open on `doc`.
    #[must_use]
    pub fn in_transaction(&self, doc: DocumentId) -> bool {
        self.transactions.contains_key(&doc)
    }

    /// Resolves a wall key to the document that owns the wall and the wall
    /// itself, following the link instance when the key is qualified.
    ///
    /// # Errors
    ///
    /// Returns an error if the link instance or wall does not resolve.
    pub fn resolve_wall(
        &self,
        doc: DocumentId,
        key: ObstructionKey,
    ) -> Result<(DocumentId, &WallData)> {
        let owner = match key.link {
            None => doc,
            Some(link) => self.document(doc)?.get::<LinkInstance>(link)?.document,
        };
        Ok((owner, self.document(owner)?.get::<WallData>(key.element)?))
    }

    fn transaction_mut(&mut self, doc: DocumentId) -> std::result::Result<&mut OpenTransaction, TransactionError> {
        self.transactions
            .get_mut(&doc)
            .ok_or(TransactionError::NotActive)
    }

    /// Hits of every wall in `document`, seen through `link` (if any) which
    /// places the document at `offset`. Walls without usable geometry are
    /// logged and report no crossing.
    fn wall_hits(
        document: &Document,
        link: Option<ElementId>,
        offset: &Vector3,
        origin: &Point3,
        direction: &Vector3,
        view: &View3dData,
        hits: &mut Vec<RayHit>,
    ) {
        for (id, wall) in document.of_kind::<WallData>() {
            let solid = document
                .get::<LevelData>(wall.level)
                .map_err(HoleError::from)
                .and_then(|level| WallSolid::new(wall, level.elevation, offset));
            let solid = match solid {
                Ok(solid) => solid,
                Err(err) => {
                    tracing::warn!(wall = ?id, ?link, %err, "wall has no usable geometry");
                    continue;
                }
            };
            for t in solid.ray_hits(origin, direction) {
                let point = origin + direction * t;
                if view.section_box.is_some_and(|bx| !bx.contains(&point)) {
                    continue;
                }
                hits.push(RayHit::new(t, ObstructionKey { link, element: id }));
            }
        }
    }
}

impl DocumentRegistry for Workspace {
    fn active_document(&self) -> DocumentId {
        self.active
    }

    fn document_title(&self, doc: DocumentId) -> Result<&str> {
        Ok(self.document(doc)?.title())
    }

    fn find_linked_document_by_title(&self, needle: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(id, doc)| *id != self.active && doc.title().contains(needle))
            .map(|(id, _)| id)
    }
}

impl ElementCatalog for Workspace {
    fn elements(&self, doc: DocumentId) -> Result<Box<dyn Iterator<Item = (ElementId, &Element)> + '_>> {
        Ok(Box::new(self.document(doc)?.iter()))
    }

    fn element(&self, doc: DocumentId, id: ElementId) -> Result<&Element> {
        Ok(self.document(doc)?.element(id)?)
    }
}

impl RayCastService for Workspace {
    fn cast_ray(
        &self,
        doc: DocumentId,
        view: ElementId,
        filter: ObstructionFilter,
        origin: &Point3,
        direction: &Vector3,
    ) -> Result<Vec<RayHit>> {
        let document = self.document(doc)?;
        let view = document.get::<View3dData>(view)?;
        if view.is_template {
            return Err(PreconditionError::MissingViewContext.into());
        }

        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let direction = direction / len;

        let mut hits = Vec::new();
        Self::wall_hits(document, None, &Vector3::zeros(), origin, &direction, view, &mut hits);

        if filter.include_links {
            for (link_id, link) in document.of_kind::<LinkInstance>() {
                let linked = self.document(link.document)?;
                Self::wall_hits(linked, Some(link_id), &link.offset, origin, &direction, view, &mut hits);
            }
        }

        hits.sort_by(|a, b| a.proximity.total_cmp(&b.proximity));
        Ok(hits)
    }
}

impl TransactionScope for Workspace {
    fn begin(&mut self, doc: DocumentId, name: &str) -> Result<()> {
        self.document(doc)?;
        if self.transactions.contains_key(&doc) {
            return Err(TransactionError::AlreadyActive.into());
        }
        self.transactions.insert(
            doc,
            OpenTransaction {
                name: name.to_owned(),
                undo: Vec::new(),
            },
        );
        Ok(())
    }

    fn commit(&mut self, doc: DocumentId) -> Result<()> {
        let tx = self
            .transactions
            .remove(&doc)
            .ok_or(TransactionError::NotActive)?;
        tracing::debug!(name = %tx.name, changes = tx.undo.len(), "committed");
        Ok(())
    }

    fn rollback(&mut self, doc: DocumentId) -> Result<()> {
        let tx = self
            .transactions
            .remove(&doc)
            .ok_or(TransactionError::NotActive)?;
        let document = self.document_mut(doc)?;
        for undo in tx.undo.into_iter().rev() {
            match undo {
                Undo::Created(id) => {
                    document.remove(id);
                }
                Undo::ParameterSet {
                    element,
                    slot,
                    previous,
                } => {
                    if let Some(cell) = document
                        .get_mut::<OpeningData>(element)
                        .ok()
                        .and_then(|opening| opening.values.get_mut(slot))
                    {
                        *cell = previous;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ModelEditor for Workspace {
    fn create_opening(&mut self, doc: DocumentId, request: &OpeningRequest) -> Result<ElementId> {
        if !self.in_transaction(doc) {
            return Err(TransactionError::NotActive.into());
        }

        let slots = self.get::<FamilySymbol>(doc, request.symbol)?.parameters.len();
        self.resolve_wall(doc, request.host)?;
        self.document(request.level.document)?
            .get::<LevelData>(request.level.element)?;

        let id = self.document_mut(doc)?.add(OpeningData {
            symbol: request.symbol,
            point: request.point,
            host: request.host,
            level: request.level,
            values: vec![None; slots],
        });
        self.transaction_mut(doc)?.undo.push(Undo::Created(id));
        Ok(id)
    }

    fn set_parameter(
        &mut self,
        doc: DocumentId,
        element: ElementId,
        parameter: ParameterId,
        value: f64,
    ) -> Result<()> {
        if !self.in_transaction(doc) {
            return Err(TransactionError::NotActive.into());
        }

        let slot = parameter.index();
        let opening = self.document_mut(doc)?.get_mut::<OpeningData>(element)?;
        let cell = opening
            .values
            .get_mut(slot)
            .ok_or(ModelError::ParameterNotFound(slot))?;
        let previous = cell.replace(value);
        self.transaction_mut(doc)?.undo.push(Undo::ParameterSet {
            element,
            slot,
            previous,
        });
        Ok(())
    }
}
