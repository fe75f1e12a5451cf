//! Automatic wall-penetration openings for linked ducts and pipes.
//!
//! [`AddHoles`] casts a ray along every straight duct and pipe of a linked
//! MEP document, keeps one crossing per wall within the conduit length, and
//! places a sized opening family at each crossing inside one transaction.
//! The host model is reached only through the traits in [`host`];
//! [`Workspace`] is an in-memory implementation of all of them.

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod model;
pub mod operations;

pub use config::{HoleConfig, NonLinearPolicy};
pub use error::{HoleError, Result};
pub use model::Workspace;
pub use operations::{AddHoles, CommandResult, PlacementReport};
