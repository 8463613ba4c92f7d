pub mod config;
pub mod detection;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod report;

pub use config::{AdaptiveMethod, Binarization, PipelineConfig};
pub use detection::{Analysis, ContourAnalyzer};
pub use models::{BoundingBox, Centroid, Contour, DetectedObject, Moments};
pub use pipeline::{
    DebugConfig, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep,
};
pub use render::Figure;
pub use report::AnalysisReport;

#[cfg(feature = "gui")]
pub mod gui;
