#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from geomprops for tests
pub use geomprops::{
    AdaptiveMethod, Analysis, Binarization, Centroid, Contour, ContourAnalyzer, DetectedObject,
    Figure, PipelineConfig,
};
