pub mod curve;
pub mod surface;

pub use curve::{Arc, Line, LineSegment, LocationCurve};
pub use surface::Plane;
