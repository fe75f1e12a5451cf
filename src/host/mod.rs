//! Service contracts the placement core consumes.
//!
//! A BIM host (or the in-memory [`Workspace`](crate::model::Workspace))
//! implements these traits; the operations never reach into ambient
//! session state and receive every document they touch as a [`DocumentId`].

mod notifier;
mod transaction;

pub use notifier::{TracingNotifier, UserNotifier};
pub use transaction::TransactionGuard;

use crate::error::{ModelError, Result};
use crate::math::{Point3, Vector3};
use crate::model::{
    Category, DocumentId, Element, ElementId, ElementKind, FamilySymbol, LevelRef,
    ObstructionKey, ParameterId,
};

/// A single obstruction crossing reported by a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin along the (unit) ray direction.
    pub proximity: f64,
    pub key: ObstructionKey,
}

impl RayHit {
    #[must_use]
    pub fn new(proximity: f64, key: ObstructionKey) -> Self {
        Self { proximity, key }
    }
}

/// Which walls a ray cast considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstructionFilter {
    /// Also report walls of documents placed through link instances.
    pub include_links: bool,
}

/// Everything needed to create one opening instance.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningRequest {
    pub symbol: ElementId,
    pub point: Point3,
    pub host: ObstructionKey,
    pub level: LevelRef,
}

/// Open documents of the session.
pub trait DocumentRegistry {
    /// The document the command edits.
    fn active_document(&self) -> DocumentId;

    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    fn document_title(&self, doc: DocumentId) -> Result<&str>;

    /// First document other than the active one whose title contains
    /// `needle`.
    fn find_linked_document_by_title(&self, needle: &str) -> Option<DocumentId>;
}

/// Typed enumeration and lookup of elements.
pub trait ElementCatalog {
    /// Every element of `doc` in storage order.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    fn elements(&self, doc: DocumentId) -> Result<Box<dyn Iterator<Item = (ElementId, &Element)> + '_>>;

    /// # Errors
    ///
    /// Returns an error if the document or element does not exist.
    fn element(&self, doc: DocumentId, id: ElementId) -> Result<&Element>;

    /// The element's payload as `T`, with an explicit kind check.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::WrongKind` if the element is not a `T`.
    fn get<T: ElementKind>(&self, doc: DocumentId, id: ElementId) -> Result<&T> {
        let element = self.element(doc, id)?;
        T::from_element(element).ok_or_else(|| {
            ModelError::WrongKind {
                element: id,
                expected: T::CLASS,
                found: element.class(),
            }
            .into()
        })
    }

    /// All elements of kind `T` accepted by `predicate`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    fn collect<T: ElementKind>(
        &self,
        doc: DocumentId,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Vec<(ElementId, &T)>> {
        Ok(self
            .elements(doc)?
            .filter_map(|(id, element)| T::from_element(element).map(|data| (id, data)))
            .filter(|&(_, data)| predicate(data))
            .collect())
    }

    /// First family symbol of `category` belonging to `family_name`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DocumentNotFound` for an unknown id.
    fn find_family_template(
        &self,
        doc: DocumentId,
        category: Category,
        family_name: &str,
    ) -> Result<Option<ElementId>> {
        Ok(self
            .collect::<FamilySymbol>(doc, |s| s.category == category && s.family_name == family_name)?
            .first()
            .map(|(id, _)| *id))
    }

    /// Resolves a parameter of `symbol` by name into a typed handle.
    ///
    /// # Errors
    ///
    /// Returns an error if `symbol` is not a family symbol.
    fn lookup_parameter(
        &self,
        doc: DocumentId,
        symbol: ElementId,
        name: &str,
    ) -> Result<Option<ParameterId>> {
        Ok(self
            .get::<FamilySymbol>(doc, symbol)?
            .parameter_index(name)
            .map(ParameterId::new))
    }
}

/// Casts rays against the walls of a document, in the context of a view.
pub trait RayCastService {
    /// Every wall face crossing along the forward ray, ordered by increasing
    /// proximity. One wall may appear several times.
    ///
    /// # Errors
    ///
    /// Returns an error if `view` is not a usable 3D view of `doc`, the
    /// direction is zero, or a wall's geometry cannot be resolved.
    fn cast_ray(
        &self,
        doc: DocumentId,
        view: ElementId,
        filter: ObstructionFilter,
        origin: &Point3,
        direction: &Vector3,
    ) -> Result<Vec<RayHit>>;
}

/// Atomic unit-of-work boundary on a document.
pub trait TransactionScope {
    /// # Errors
    ///
    /// Returns `TransactionError::AlreadyActive` if one is already open.
    fn begin(&mut self, doc: DocumentId, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns `TransactionError::NotActive` if none is open.
    fn commit(&mut self, doc: DocumentId) -> Result<()>;

    /// Undoes every change made since `begin`.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotActive` if none is open.
    fn rollback(&mut self, doc: DocumentId) -> Result<()>;
}

/// Mutations the placement engine performs.
pub trait ModelEditor {
    /// # Errors
    ///
    /// Returns an error if no transaction is open, or the request's symbol,
    /// host wall or level does not resolve.
    fn create_opening(&mut self, doc: DocumentId, request: &OpeningRequest) -> Result<ElementId>;

    /// # Errors
    ///
    /// Returns an error if no transaction is open, the element is not an
    /// opening, or the parameter slot does not exist.
    fn set_parameter(
        &mut self,
        doc: DocumentId,
        element: ElementId,
        parameter: ParameterId,
        value: f64,
    ) -> Result<()>;
}

/// Everything the hole placement command needs from its host.
pub trait Host: DocumentRegistry + ElementCatalog + RayCastService + TransactionScope + ModelEditor {}

impl<T> Host for T where T: DocumentRegistry + ElementCatalog + RayCastService + TransactionScope + ModelEditor {}
