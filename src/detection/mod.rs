pub mod contours;
pub mod loader;
pub mod preprocessing;
pub mod ranking;
pub mod steps;

use crate::config::{Binarization, PipelineConfig};
use crate::models::{Centroid, DetectedObject};
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Everything one run produces, kept for presentation
#[derive(Debug, Clone)]
pub struct Analysis {
    pub original: RgbImage,
    pub grayscale: GrayImage,
    /// Inverted binary image the contours were traced on
    pub binary: GrayImage,
    pub binarization: Binarization,
    /// Outer contours found before filtering
    pub raw_contour_count: usize,
    /// Ranked objects, largest first
    pub objects: Vec<DetectedObject>,
}

impl Analysis {
    pub fn width(&self) -> u32 {
        self.original.width()
    }

    pub fn height(&self) -> u32 {
        self.original.height()
    }

    pub fn centroids(&self) -> impl Iterator<Item = Centroid> + '_ {
        self.objects.iter().filter_map(|o| o.centroid)
    }
}

/// Runs grayscale → binarize → invert → contours → ranking → centroids,
/// keeping the intermediate images
pub struct ContourAnalyzer {
    pub config: PipelineConfig,
}

impl ContourAnalyzer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Load an image file and analyze it
    pub fn analyze_path(&self, path: &Path) -> anyhow::Result<Analysis> {
        let img = loader::load_image(path)?;
        self.analyze(&img)
    }

    /// Run the full analysis on a decoded image
    pub fn analyze(&self, img: &DynamicImage) -> anyhow::Result<Analysis> {
        self.config.validate()?;
        if img.width() == 0 || img.height() == 0 {
            anyhow::bail!("Cannot analyze an empty image");
        }

        let grayscale = preprocessing::to_grayscale(img);
        let binary = preprocessing::binarize_inverted(&grayscale, &self.config.binarization);
        log::debug!(
            "Binarized {}x{} image ({})",
            binary.width(),
            binary.height(),
            self.config.binarization.name()
        );

        let raw = contours::find_outer_contours(&binary);
        let raw_contour_count = raw.len();

        let objects = ranking::rank_objects(
            raw,
            self.config.min_contour_area,
            self.config.max_displayed,
        );

        let degenerate = objects.iter().filter(|o| o.centroid.is_none()).count();
        log::debug!(
            "Kept {} of {} contours ({} without centroid)",
            objects.len(),
            raw_contour_count,
            degenerate
        );

        Ok(Analysis {
            original: img.to_rgb8(),
            grayscale,
            binary,
            binarization: self.config.binarization,
            raw_contour_count,
            objects,
        })
    }
}

impl Default for ContourAnalyzer {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Build the standard step pipeline for a configuration
pub fn build_standard_pipeline(
    config: &PipelineConfig,
    verbose: bool,
) -> crate::pipeline::Pipeline {
    use crate::detection::steps::*;
    use crate::pipeline::Pipeline;
    use std::sync::Arc;

    Pipeline::new()
        .with_verbose(verbose)
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(BinarizeStep {
            binarization: config.binarization,
        }))
        .add_step(Arc::new(InvertStep))
        .add_step(Arc::new(ContourDetectionStep { padding: 10 }))
        .add_step(Arc::new(ContourFilterStep {
            min_area: config.min_contour_area,
            max_count: config.max_displayed,
        }))
        .add_step(Arc::new(CentroidStep))
}
