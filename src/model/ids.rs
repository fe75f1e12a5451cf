slotmap::new_key_type! {
    /// Identifies a document open in the host session.
    pub struct DocumentId;

    /// Identifies an element inside one document.
    pub struct ElementId;
}

/// Identity of a wall as reported by a ray hit.
///
/// `link` is the link instance the wall was reached through, or `None` for
/// a wall of the active document. Two hits name the same wall only if both
/// parts match: the same element id seen through two different link
/// instances is two different walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstructionKey {
    pub link: Option<ElementId>,
    pub element: ElementId,
}

impl ObstructionKey {
    /// A wall of the active document.
    #[must_use]
    pub fn local(element: ElementId) -> Self {
        Self {
            link: None,
            element,
        }
    }

    /// A wall of a linked document, seen through link instance `link`.
    #[must_use]
    pub fn linked(link: ElementId, element: ElementId) -> Self {
        Self {
            link: Some(link),
            element,
        }
    }

    /// Returns `true` if the wall is seen through a link instance.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }
}

/// A level in the document that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelRef {
    pub document: DocumentId,
    pub element: ElementId,
}

/// Typed handle to a parameter slot of a family symbol and its instances.
///
/// Obtained once through a by-name lookup; afterwards values are assigned
/// through the handle without touching parameter names again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterId(usize);

impl ParameterId {
    /// Creates a handle to parameter slot `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the parameter slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}
