use slotmap::SlotMap;

use crate::error::ModelError;

use super::element::{Element, ElementKind};
use super::ids::ElementId;

/// Arena that owns every element of one model file.
///
/// Elements reference each other via [`ElementId`] (generational indices),
/// so a wall names its level by id rather than by pointer.
#[derive(Debug, Default)]
pub struct Document {
    title: String,
    elements: SlotMap<ElementId, Element>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: SlotMap::with_key(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inserts an element and returns its ID.
    pub fn add(&mut self, element: impl Into<Element>) -> ElementId {
        self.elements.insert(element.into())
    }

    /// Removes an element, returning it if it existed.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(id)
    }

    /// Returns the element, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EntityNotFound` if `id` is not in the document.
    pub fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.elements
            .get(id)
            .ok_or_else(|| ModelError::EntityNotFound(format!("element {id:?} in \"{}\"", self.title)))
    }

    /// Returns the element's payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EntityNotFound` if the element does not exist, or
    /// `ModelError::WrongKind` if it is not a `T`.
    pub fn get<T: ElementKind>(&self, id: ElementId) -> Result<&T, ModelError> {
        let element = self.element(id)?;
        T::from_element(element).ok_or(ModelError::WrongKind {
            element: id,
            expected: T::CLASS,
            found: element.class(),
        })
    }

    /// Mutable counterpart of [`Document::get`].
    ///
    /// # Errors
    ///
    /// Same as [`Document::get`].
    pub fn get_mut<T: ElementKind>(&mut self, id: ElementId) -> Result<&mut T, ModelError> {
        let title = &self.title;
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| ModelError::EntityNotFound(format!("element {id:?} in \"{title}\"")))?;
        let found = element.class();
        T::from_element_mut(element).ok_or(ModelError::WrongKind {
            element: id,
            expected: T::CLASS,
            found,
        })
    }

    /// Iterates over all elements in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter()
    }

    /// Iterates over the elements of kind `T`.
    pub fn of_kind<'a, T: ElementKind + 'a>(&'a self) -> impl Iterator<Item = (ElementId, &'a T)> {
        self.elements
            .iter()
            .filter_map(|(id, element)| T::from_element(element).map(|data| (id, data)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ElementClass, LevelData, OpeningData, WallData};

    #[test]
    fn typed_access_reports_wrong_kind() {
        let mut doc = Document::new("AR");
        let level = doc.add(LevelData {
            name: "L1".into(),
            elevation: 0.0,
        });

        assert_eq!(doc.get::<LevelData>(level).unwrap().name, "L1");
        match doc.get::<WallData>(level) {
            Err(ModelError::WrongKind {
                expected, found, ..
            }) => {
                assert_eq!(expected, ElementClass::Wall);
                assert_eq!(found, ElementClass::Level);
            }
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn removed_element_is_not_found() {
        let mut doc = Document::new("AR");
        let level = doc.add(LevelData {
            name: "L1".into(),
            elevation: 3.0,
        });
        assert!(doc.remove(level).is_some());
        assert!(matches!(
            doc.element(level),
            Err(ModelError::EntityNotFound(_))
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn of_kind_filters_by_class() {
        let mut doc = Document::new("AR");
        doc.add(LevelData {
            name: "L1".into(),
            elevation: 0.0,
        });
        doc.add(LevelData {
            name: "L2".into(),
            elevation: 3.0,
        });
        assert_eq!(doc.of_kind::<LevelData>().count(), 2);
        assert_eq!(doc.of_kind::<OpeningData>().count(), 0);
        assert_eq!(doc.len(), 2);
    }
}
