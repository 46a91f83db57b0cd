//! Rectangular mapping: building corners placed from measurements taken
//! off a property boundary.

mod boundary;
mod machine;
mod params;

pub use boundary::Boundary;
pub use machine::{
    corner_label, emit_corners, AbortReason, ChoiceRequest, MappingOutcome, RectangularMapping,
    Stage, Step,
};
pub use params::{MappingParams, MappingPolicy, RootPolicy};
