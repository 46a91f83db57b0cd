//! Intersection and construction engine for cadastral drafting aids.
//!
//! Geodetic objects carry exact decimal coordinates; floating point appears
//! only when results are handed to the host through [`sink`].

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod sink;

pub use error::{KimuError, Result};
