use serde::Serialize;

/// Local statistic used by adaptive thresholding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveMethod {
    Mean,
    Gaussian,
}

/// How the grayscale image is split into two levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Binarization {
    /// `255` where intensity is above a fixed cutoff
    Global { threshold: u8 },
    /// `255` where intensity is above the local statistic minus `subtract_constant`
    Adaptive {
        method: AdaptiveMethod,
        block_size: u32,
        subtract_constant: f64,
    },
}

impl Binarization {
    pub fn name(&self) -> &'static str {
        match self {
            Binarization::Global { .. } => "global",
            Binarization::Adaptive { method: AdaptiveMethod::Mean, .. } => "adaptive-mean",
            Binarization::Adaptive { method: AdaptiveMethod::Gaussian, .. } => "adaptive-gaussian",
        }
    }
}

/// Parameters of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub binarization: Binarization,
    /// Contours at or below this enclosed area are dropped
    pub min_contour_area: f64,
    /// Keep only the largest N contours when set
    pub max_displayed: Option<usize>,
}

impl PipelineConfig {
    pub const DEFAULT_THRESHOLD: u8 = 128;
    pub const DEFAULT_BLOCK_SIZE: u32 = 11;
    pub const DEFAULT_SUBTRACT_CONSTANT: f64 = 2.0;
    pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 150.0;

    /// Gaussian adaptive thresholding
    pub fn adaptive() -> Self {
        Self {
            binarization: Binarization::Adaptive {
                method: AdaptiveMethod::Gaussian,
                block_size: Self::DEFAULT_BLOCK_SIZE,
                subtract_constant: Self::DEFAULT_SUBTRACT_CONSTANT,
            },
            min_contour_area: Self::DEFAULT_MIN_CONTOUR_AREA,
            max_displayed: None,
        }
    }

    /// Fixed global cutoff at 128
    pub fn fixed_threshold() -> Self {
        Self {
            binarization: Binarization::Global {
                threshold: Self::DEFAULT_THRESHOLD,
            },
            ..Self::adaptive()
        }
    }

    /// Fixed global cutoff, showing only the five largest objects
    pub fn top_five() -> Self {
        Self {
            max_displayed: Some(5),
            ..Self::fixed_threshold()
        }
    }

    pub fn with_min_contour_area(mut self, min_area: f64) -> Self {
        self.min_contour_area = min_area;
        self
    }

    pub fn with_max_displayed(mut self, max: Option<usize>) -> Self {
        self.max_displayed = max;
        self
    }

    /// Reject parameter combinations the thresholding stage cannot honor
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Binarization::Adaptive { block_size, .. } = self.binarization {
            if block_size < 3 || block_size % 2 == 0 {
                anyhow::bail!("block size must be an odd number >= 3, got {}", block_size);
            }
        }

        if self.min_contour_area.is_nan() || self.min_contour_area < 0.0 {
            anyhow::bail!(
                "minimum contour area must be non-negative, got {}",
                self.min_contour_area
            );
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::adaptive()
    }
}
