use geomprops::Contour;
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use tempfile::NamedTempFile;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Dark rectangles `(x, y, width, height)` on a white background
pub fn dark_rects_image(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
        if inside { BLACK } else { WHITE }
    })
}

/// Three large blobs and one tiny one.
/// Traced areas: 2301, 841, 3871 and 16.
pub fn blobs_image() -> RgbImage {
    dark_rects_image(
        200,
        150,
        &[
            (10, 10, 60, 40),
            (100, 20, 30, 30),
            (20, 80, 80, 50),
            (150, 100, 5, 5),
        ],
    )
}

/// Left half black, right half white
pub fn step_edge_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        if x < width / 2 { Luma([0]) } else { Luma([255]) }
    })
}

/// Axis-aligned rectangle contour with corners at `(x, y)` and `(x + w, y + h)`
pub fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
    Contour::from_coords(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
}

/// One rectangle contour per area, each `area` wide and one pixel tall,
/// stacked so they can be told apart by their y coordinate
pub fn contours_with_areas(areas: &[i32]) -> Vec<Contour> {
    areas
        .iter()
        .enumerate()
        .map(|(row, &area)| rect_contour(0, row as i32 * 10, area, 1))
        .collect()
}

pub fn areas_of(contours: &[Contour]) -> Vec<f64> {
    contours.iter().map(Contour::area).collect()
}

/// Save an image into a temporary PNG file, removed when dropped
pub fn save_temp_png(img: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
