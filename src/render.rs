use crate::detection::Analysis;
use crate::models::{Centroid, Contour};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::path::Path;

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// One titled view of the analysis
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: &'static str,
    pub image: RgbImage,
}

/// The four views, in 2x2 reading order:
/// original, binary with contours, grayscale, contours with centroids
#[derive(Debug, Clone)]
pub struct Figure {
    pub panels: [Panel; 4],
}

impl Figure {
    pub const TITLES: [&'static str; 4] = [
        "Original Image",
        "Binary with Contours",
        "Grayscale",
        "Contours and Centroids",
    ];

    pub fn render(analysis: &Analysis) -> Self {
        let marker_size = marker_size(analysis.width(), analysis.height());

        let mut binary = gray_to_rgb(&analysis.binary);
        for object in &analysis.objects {
            draw_contour(&mut binary, &object.contour, CONTOUR_COLOR);
        }

        let mut annotated = analysis.original.clone();
        for object in &analysis.objects {
            draw_contour(&mut annotated, &object.contour, CONTOUR_COLOR);
            if let Some(centroid) = object.centroid {
                draw_star(&mut annotated, centroid, marker_size, CONTOUR_COLOR);
            }
        }

        let [original_title, binary_title, gray_title, annotated_title] = Self::TITLES;
        Self {
            panels: [
                Panel {
                    title: original_title,
                    image: analysis.original.clone(),
                },
                Panel {
                    title: binary_title,
                    image: binary,
                },
                Panel {
                    title: gray_title,
                    image: gray_to_rgb(&analysis.grayscale),
                },
                Panel {
                    title: annotated_title,
                    image: annotated,
                },
            ],
        }
    }

    /// Rows of the 2x2 grid
    pub fn rows(&self) -> [&[Panel]; 2] {
        let (top, bottom) = self.panels.split_at(2);
        [top, bottom]
    }

    /// Write each panel as `NN_title.png` into `dir`
    pub fn save_panels(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        for (idx, panel) in self.panels.iter().enumerate() {
            let filename = format!(
                "{:02}_{}.png",
                idx + 1,
                panel.title.to_lowercase().replace(' ', "_")
            );
            let path = dir.join(filename);
            panel
                .image
                .save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save panel {}: {}", path.display(), e))?;
        }
        Ok(())
    }
}

fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(gray.clone()).to_rgb8()
}

/// Star arm length, scaled with the image
fn marker_size(width: u32, height: u32) -> f32 {
    (width.max(height) as f32 / 60.0).max(4.0)
}

/// Draw a contour as a closed polyline
pub fn draw_contour(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points = &contour.points;
    match points.len() {
        0 => {}
        1 => {
            let p = points[0];
            if p.x >= 0
                && p.y >= 0
                && (p.x as u32) < canvas.width()
                && (p.y as u32) < canvas.height()
            {
                canvas.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        n => {
            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];
                draw_line_segment_mut(
                    canvas,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    color,
                );
            }
        }
    }
}

/// Draw an eight-armed star centred on a centroid
pub fn draw_star(canvas: &mut RgbImage, centroid: Centroid, size: f32, color: Rgb<u8>) {
    let (cx, cy) = (centroid.x as f32, centroid.y as f32);
    let diagonal = size * std::f32::consts::FRAC_1_SQRT_2;
    let arms = [
        (size, 0.0),
        (0.0, size),
        (diagonal, diagonal),
        (diagonal, -diagonal),
    ];
    for (dx, dy) in arms {
        draw_line_segment_mut(canvas, (cx - dx, cy - dy), (cx + dx, cy + dy), color);
    }
}
