//! Floor-plan diagrams from structured room analyses.
//!
//! A [`plan::RoomAnalysis`] describes a rectangular room and the doors,
//! windows and closets on each wall. [`plan::generate_diagram`] turns it into
//! a scaled SVG document whose groups and `data-*` attributes can be read
//! back with [`plan::inspect_diagram`].

pub mod error;
pub mod log;
pub mod plan;
pub mod room;
pub mod style;
pub mod xml;

pub use error::PlanError;
pub use plan::{RoomAnalysis, generate_diagram, generate_diagram_with};
pub use style::PlanStyle;
