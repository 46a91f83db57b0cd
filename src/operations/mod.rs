pub mod bounds;
pub mod construct;
pub mod disambiguate;
pub mod intersect_tool;
pub mod pairing;
pub mod rectangular;
pub mod selection;

pub use bounds::{BoundsOracle, Extent};
pub use construct::{DisplaceLine, SplitLine};
pub use disambiguate::{
    disambiguate, select_and_prune, Choice, Chooser, Pruner, Resolution, Verdict,
};
pub use intersect_tool::{IntersectionTool, ToolOutcome, INTERSECTION_LABEL};
pub use pairing::{CandidatePairs, ConstructPairs, ObjectPair, ParallelPair};
pub use selection::{Feature, FeatureGeometry, FrameId, Selection};
