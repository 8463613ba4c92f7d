use crate::config::Binarization;
use crate::detection::{contours, preprocessing, ranking};
use crate::models::BoundingBox;
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use anyhow::Result;
use image::{DynamicImage, GenericImageView};

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        Ok(data
            .into_iter()
            .map(|item| {
                let gray = preprocessing::to_grayscale(&item.image);
                item.with_image(DynamicImage::ImageLuma8(gray))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Split grayscale into 0/255 with a global or adaptive cutoff
pub struct BinarizeStep {
    pub binarization: Binarization,
}

impl PipelineStep for BinarizeStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        Ok(data
            .into_iter()
            .map(|item| {
                let gray = item.image.to_luma8();
                let binary = preprocessing::binarize(&gray, &self.binarization);
                item.with_image(DynamicImage::ImageLuma8(binary))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Binarization"
    }
}

/// Swap foreground and background levels
pub struct InvertStep;

impl PipelineStep for InvertStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        Ok(data
            .into_iter()
            .map(|item| {
                let mut binary = item.image.to_luma8();
                preprocessing::invert(&mut binary);
                item.with_image(DynamicImage::ImageLuma8(binary))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Invert"
    }
}

/// Find outer contours - splits one image into one item per contour
pub struct ContourDetectionStep {
    /// Margin kept around each contour when cropping its region
    pub padding: u32,
}

impl PipelineStep for ContourDetectionStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();

        for item in data {
            let binary = item.image.to_luma8();
            let detected = contours::find_outer_contours(&binary);
            let (img_width, img_height) = item.original.as_ref().dimensions();
            log::debug!("Found {} outer contours", detected.len());

            for contour in detected {
                let Some(tight) = contour.bounding_box() else {
                    continue;
                };

                // Padded bounding box, clamped to image boundaries
                let x = tight.x.saturating_sub(self.padding);
                let y = tight.y.saturating_sub(self.padding);
                let max_x = (tight.x + tight.width - 1 + self.padding).min(img_width - 1);
                let max_y = (tight.y + tight.height - 1 + self.padding).min(img_height - 1);
                let bbox = BoundingBox {
                    x,
                    y,
                    width: max_x - x + 1,
                    height: max_y - y + 1,
                };

                let cropped = item.original.crop_imm(bbox.x, bbox.y, bbox.width, bbox.height);
                let area = contour.area();
                let point_count = contour.len() as i32;

                result.push(
                    PipelineData::from_contour(cropped, item.original.clone(), bbox, contour)
                        .with_metadata("area", MetadataValue::Float(area))
                        .with_metadata("point_count", MetadataValue::Int(point_count)),
                );
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Drop small contours, order the rest by area and optionally cap them
pub struct ContourFilterStep {
    pub min_area: f64,
    pub max_count: Option<usize>,
}

impl PipelineStep for ContourFilterStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        _context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let total = data.len();
        let area_of = |item: &PipelineData| {
            item.get_float("area")
                .or_else(|| item.contour.as_ref().map(|c| c.area()))
                .unwrap_or(0.0)
        };

        let ranked = ranking::filter_and_rank_by(data, area_of, self.min_area, self.max_count);
        log::debug!("Kept {} of {} contours (min area {})", ranked.len(), total, self.min_area);

        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.with_metadata("rank", MetadataValue::Int(i as i32 + 1)))
            .collect())
    }

    fn name(&self) -> &str {
        "Contour Filtering"
    }
}

/// Attach the moment centroid of each contour.
/// Degenerate contours pass through with `has_centroid = false`.
pub struct CentroidStep;

impl PipelineStep for CentroidStep {
    fn process(
        &self,
        data: Vec<PipelineData>,
        context: &PipelineContext,
    ) -> Result<Vec<PipelineData>> {
        let mut result = Vec::with_capacity(data.len());

        for item in data {
            let Some(contour) = item.contour.as_ref() else {
                return Err(anyhow::anyhow!(
                    "Centroid step needs contour items; run contour detection first"
                ));
            };

            let moments = contour.moments();
            let item = item.with_metadata("m00", MetadataValue::Float(moments.m00));

            let item = match moments.centroid() {
                Some(centroid) => {
                    if context.verbose {
                        log::info!("  Centroid at ({}, {})", centroid.x, centroid.y);
                    }
                    item.with_metadata("has_centroid", MetadataValue::Bool(true))
                        .with_metadata("centroid_x", MetadataValue::Int(centroid.x))
                        .with_metadata("centroid_y", MetadataValue::Int(centroid.y))
                }
                None => item.with_metadata("has_centroid", MetadataValue::Bool(false)),
            };

            result.push(item);
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Centroid"
    }
}
