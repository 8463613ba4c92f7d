use crate::models::Contour;
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

/// Find the outer boundaries of 8-connected 255 regions.
/// Regions nested inside holes of other regions are skipped, and straight
/// runs of the boundary chain are reduced to their end points.
pub fn find_outer_contours(binary: &GrayImage) -> Vec<Contour> {
    let (width, height) = binary.dimensions();

    // Surround the image with background so border regions close properly
    let mut padded = GrayImage::new(width + 2, height + 2);
    image::imageops::replace(&mut padded, binary, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Contour::new(compress_chain(points))
        })
        .collect()
}

/// Drop every point that continues the previous step in the same direction
fn compress_chain(points: Vec<Point<i32>>) -> Vec<Point<i32>> {
    let n = points.len();
    if n <= 2 {
        return points;
    }

    let step = |from: Point<i32>, to: Point<i32>| (to.x - from.x, to.y - from.y);

    let compressed: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if compressed.is_empty() {
        points
    } else {
        compressed
    }
}
