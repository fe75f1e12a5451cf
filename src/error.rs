use std::fmt;

use thiserror::Error;

use crate::model::{ElementClass, ElementId};

/// Top-level error type for opening placement.
#[derive(Debug, Error)]
pub enum HoleError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    /// A conduit location is not a straight line segment.
    #[error("element {element:?} has a non-linear path ({found}, {length:.3} long)")]
    NonLinearPath {
        element: ElementId,
        found: &'static str,
        length: f64,
    },
}

/// Errors raised while reading or writing the host model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("document not found")]
    DocumentNotFound,

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("element {element:?} is a {found}, expected a {expected}")]
    WrongKind {
        element: ElementId,
        expected: ElementClass,
        found: ElementClass,
    },

    #[error("parameter slot {0} does not exist on the element")]
    ParameterNotFound(usize),
}

/// A condition that must hold before any geometry is read or any
/// transaction is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("no linked document with a title containing \"{marker}\"")]
    MissingLinkedDocument { marker: String },

    #[error("opening family \"{family}\" not found")]
    MissingTemplate { family: String },

    #[error("no non-template 3D view in the active document")]
    MissingViewContext,

    #[error("opening family \"{family}\" has no \"{parameter}\" parameter")]
    MissingParameter { family: String, parameter: String },
}

/// Errors raised by the unit-of-work boundary.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("a transaction is already open on this document")]
    AlreadyActive,

    #[error("no transaction is open on this document")]
    NotActive,

    #[error("transaction aborted: {0}")]
    Aborted(String),
}

/// Every precondition that failed during a single command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreconditionFailures(pub Vec<PreconditionError>);

impl PreconditionFailures {
    /// Returns `true` if no precondition failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `error` is among the failures.
    #[must_use]
    pub fn contains(&self, error: &PreconditionError) -> bool {
        self.0.contains(error)
    }

    /// Iterates over the failed preconditions in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &PreconditionError> {
        self.0.iter()
    }
}

impl fmt::Display for PreconditionFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Convenience type alias for results using [`HoleError`].
pub type Result<T> = std::result::Result<T, HoleError>;
