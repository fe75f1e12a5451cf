use std::fmt;

use crate::geometry::{LineSegment, LocationCurve};
use crate::math::{Point3, Vector3};

use super::ids::{DocumentId, ElementId, LevelRef, ObstructionKey};

/// Runtime class of an element, used for typed enumeration and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Level,
    Wall,
    Duct,
    Pipe,
    View3d,
    FamilySymbol,
    Opening,
    LinkInstance,
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Level => "level",
            Self::Wall => "wall",
            Self::Duct => "duct",
            Self::Pipe => "pipe",
            Self::View3d => "3D view",
            Self::FamilySymbol => "family symbol",
            Self::Opening => "opening",
            Self::LinkInstance => "link instance",
        };
        f.write_str(name)
    }
}

/// Category a family symbol is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    GenericModel,
    Windows,
}

/// Horizontal datum. Walls sit on a level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub elevation: f64,
}

/// A straight wall: a box swept along its centerline.
///
/// Only the XY projection of `location` is used; the vertical extent is
/// `[level elevation + base_offset, … + height]`.
#[derive(Debug, Clone)]
pub struct WallData {
    pub location: LineSegment,
    pub thickness: f64,
    pub height: f64,
    pub base_offset: f64,
    pub level: ElementId,
}

/// Cross-section of a duct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuctProfile {
    Round { diameter: f64 },
    Rectangular { width: f64, height: f64 },
    Oval { width: f64, height: f64 },
}

#[derive(Debug, Clone)]
pub struct DuctData {
    pub location: LocationCurve,
    pub profile: DuctProfile,
}

#[derive(Debug, Clone)]
pub struct PipeData {
    pub location: LocationCurve,
    pub diameter: f64,
}

/// Axis-aligned crop box of a 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBox {
    pub min: Point3,
    pub max: Point3,
}

impl SectionBox {
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

#[derive(Debug, Clone)]
pub struct View3dData {
    pub name: String,
    pub is_template: bool,
    pub section_box: Option<SectionBox>,
}

/// A placeable family type with its named instance parameters.
#[derive(Debug, Clone)]
pub struct FamilySymbol {
    pub family_name: String,
    pub type_name: String,
    pub category: Category,
    pub parameters: Vec<String>,
}

impl FamilySymbol {
    /// Position of the parameter called `name`, if the family defines it.
    #[must_use]
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == name)
    }
}

/// A placed opening instance hosted by a wall.
#[derive(Debug, Clone)]
pub struct OpeningData {
    pub symbol: ElementId,
    pub point: Point3,
    pub host: ObstructionKey,
    pub level: LevelRef,
    /// One slot per symbol parameter; `None` until assigned.
    pub values: Vec<Option<f64>>,
}

/// Places another document into this one, translated by `offset`.
#[derive(Debug, Clone)]
pub struct LinkInstance {
    pub document: DocumentId,
    pub offset: Vector3,
}

/// Any element a document can hold.
#[derive(Debug, Clone)]
pub enum Element {
    Level(LevelData),
    Wall(WallData),
    Duct(DuctData),
    Pipe(PipeData),
    View3d(View3dData),
    FamilySymbol(FamilySymbol),
    Opening(OpeningData),
    LinkInstance(LinkInstance),
}

impl Element {
    #[must_use]
    pub fn class(&self) -> ElementClass {
        match self {
            Self::Level(_) => ElementClass::Level,
            Self::Wall(_) => ElementClass::Wall,
            Self::Duct(_) => ElementClass::Duct,
            Self::Pipe(_) => ElementClass::Pipe,
            Self::View3d(_) => ElementClass::View3d,
            Self::FamilySymbol(_) => ElementClass::FamilySymbol,
            Self::Opening(_) => ElementClass::Opening,
            Self::LinkInstance(_) => ElementClass::LinkInstance,
        }
    }
}

/// A concrete element payload that can be pulled out of an [`Element`].
///
/// This is the checked replacement for downcasting a host object: asking
/// for the wrong kind yields `None`, never a fault.
pub trait ElementKind: Sized {
    const CLASS: ElementClass;

    fn from_element(element: &Element) -> Option<&Self>;

    fn from_element_mut(element: &mut Element) -> Option<&mut Self>;
}

macro_rules! element_kind {
    ($data:ty, $variant:ident) => {
        impl ElementKind for $data {
            const CLASS: ElementClass = ElementClass::$variant;

            fn from_element(element: &Element) -> Option<&Self> {
                match element {
                    Element::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn from_element_mut(element: &mut Element) -> Option<&mut Self> {
                match element {
                    Element::$variant(data) => Some(data),
                    _ => None,
                }
            }
        }

        impl From<$data> for Element {
            fn from(data: $data) -> Self {
                Element::$variant(data)
            }
        }
    };
}

element_kind!(LevelData, Level);
element_kind!(WallData, Wall);
element_kind!(DuctData, Duct);
element_kind!(PipeData, Pipe);
element_kind!(View3dData, View3d);
element_kind!(FamilySymbol, FamilySymbol);
element_kind!(OpeningData, Opening);
element_kind!(LinkInstance, LinkInstance);
