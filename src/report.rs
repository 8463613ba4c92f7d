use crate::config::Binarization;
use crate::detection::Analysis;
use crate::models::{BoundingBox, Centroid};
use serde::Serialize;
use std::fmt;

/// Printable summary of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub width: u32,
    pub height: u32,
    pub binarization: Binarization,
    pub raw_contour_count: usize,
    pub objects: Vec<ObjectReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    /// 1-based, largest area first
    pub rank: usize,
    pub area: f64,
    pub point_count: usize,
    pub bbox: Option<BoundingBox>,
    pub centroid: Option<Centroid>,
}

impl AnalysisReport {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let objects = analysis
            .objects
            .iter()
            .enumerate()
            .map(|(i, object)| ObjectReport {
                rank: i + 1,
                area: object.area,
                point_count: object.contour.len(),
                bbox: object.contour.bounding_box(),
                centroid: object.centroid,
            })
            .collect();

        Self {
            width: analysis.width(),
            height: analysis.height(),
            binarization: analysis.binarization,
            raw_contour_count: analysis.raw_contour_count,
            objects,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report: {}", e))
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Contour Analysis ===")?;
        writeln!(f, "Image: {}x{}", self.width, self.height)?;
        writeln!(f, "Binarization: {}", self.binarization.name())?;
        writeln!(
            f,
            "Objects: {} (from {} contours)",
            self.objects.len(),
            self.raw_contour_count
        )?;

        for object in &self.objects {
            write!(f, "  #{} area={:.1} points={}", object.rank, object.area, object.point_count)?;
            match object.centroid {
                Some(c) => writeln!(f, " centroid=({}, {})", c.x, c.y)?,
                None => writeln!(f, " centroid=none")?,
            }
        }

        Ok(())
    }
}
