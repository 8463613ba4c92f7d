use crate::models::{BoundingBox, Contour};
use anyhow::Result;
use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Data that flows through the pipeline
/// Before contour detection there is one item for the whole frame,
/// afterwards one item per contour
#[derive(Clone)]
pub struct PipelineData {
    /// The working image of this item (color, grayscale or binary)
    pub image: DynamicImage,

    /// Reference to the original image (shared efficiently via Arc)
    pub original: Arc<DynamicImage>,

    /// Region of the original this item covers (None means full image)
    pub bbox: Option<BoundingBox>,

    /// The contour this item stands for, once contours have been split out
    pub contour: Option<Contour>,

    /// Measurements attached by steps (e.g. "area", "centroid_x")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Float(f64),
    Int(i32),
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: DynamicImage) -> Self {
        let original = Arc::new(image.clone());
        Self {
            image,
            original,
            bbox: None,
            contour: None,
            metadata: HashMap::new(),
        }
    }

    /// Create PipelineData for one contour cropped out of an image
    pub fn from_contour(
        image: DynamicImage,
        original: Arc<DynamicImage>,
        bbox: BoundingBox,
        contour: Contour,
    ) -> Self {
        Self {
            image,
            original,
            bbox: Some(bbox),
            contour: Some(contour),
            metadata: HashMap::new(),
        }
    }

    /// Replace the working image, keeping everything else
    pub fn with_image(mut self, image: DynamicImage) -> Self {
        self.image = image;
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get metadata as bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.metadata.get(key) {
            Some(MetadataValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as float
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as int
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

impl DebugConfig {
    /// Directory name for a step, e.g. "03_invert"
    pub fn step_dir_name(step_index: usize, step_name: &str) -> String {
        format!("{:02}_{}", step_index, step_name.to_lowercase().replace(' ', "_"))
    }

    /// Save one image per item into `<output_dir>/<step_dir_name>/NN.png`
    pub fn save_items(&self, step_dir_name: &str, data: &[PipelineData]) -> Result<()> {
        let step_dir = self.output_dir.join(step_dir_name);
        std::fs::create_dir_all(&step_dir)?;

        for (idx, item) in data.iter().enumerate() {
            let output_path = step_dir.join(format!("{:02}.png", idx + 1));
            save_png(&item.image, &output_path)?;
        }

        log::debug!("Debug: saved {} images to {}/", data.len(), step_dir_name);
        Ok(())
    }
}

fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", path.display(), e))
}

/// Context available to all pipeline steps
#[derive(Clone)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Process data and return transformed data
    /// Steps can split data (1 → many), filter (many → fewer), or transform (many → many)
    fn process(
        &self,
        data: Vec<PipelineData>,
        context: &PipelineContext,
    ) -> Result<Vec<PipelineData>>;

    /// Human-readable name for this step (used in logs and debug directories)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext {
                verbose: false,
                debug: None,
            },
        }
    }

    /// Log step progress at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig {
            output_dir,
            enabled: true,
        });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    /// Names of the configured steps, in order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn debug_config(&self) -> Option<&DebugConfig> {
        self.context.debug.as_ref().filter(|d| d.enabled)
    }

    fn log_progress(&self, message: std::fmt::Arguments<'_>) {
        if self.context.verbose {
            log::info!("{}", message);
        } else {
            log::debug!("{}", message);
        }
    }

    /// Run every step sequentially on an input image
    pub fn run(&self, input: DynamicImage) -> Result<Vec<PipelineData>> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> Result<Vec<PipelineData>> {
        // Start with a single PipelineData containing the full image
        let mut data = vec![PipelineData::from_image(input)];

        if let Some(debug_config) = self.debug_config() {
            debug_config.save_items("00_input", &data)?;
        }

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            self.log_progress(format_args!(
                "Running step {}: {} (processing {} items)",
                step_idx + 1,
                step.name(),
                data.len()
            ));

            data = step.process(data, &self.context)?;

            if let Some(debug_config) = self.debug_config() {
                let step_dir_name = DebugConfig::step_dir_name(step_idx + 1, step.name());
                debug_config.save_items(&step_dir_name, &data)?;
            }

            self.log_progress(format_args!("  → {} items", data.len()));
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
