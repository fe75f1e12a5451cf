//! In-memory building model: documents, elements and a reference host.

mod document;
mod element;
mod ids;
mod wall_solid;
mod workspace;

pub use document::Document;
pub use element::{
    Category, DuctData, DuctProfile, Element, ElementClass, ElementKind, FamilySymbol,
    LevelData, LinkInstance, OpeningData, PipeData, SectionBox, View3dData, WallData,
};
pub use ids::{DocumentId, ElementId, LevelRef, ObstructionKey, ParameterId};
pub use wall_solid::WallSolid;
pub use workspace::Workspace;
