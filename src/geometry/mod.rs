pub mod curve;
pub mod point;

pub use curve::{Arc, ArcTreatment, Circle, GeodeticObject, Line};
pub use point::Point;
