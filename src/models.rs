use imageproc::point::Point;
use serde::Serialize;

/// Axis-aligned bounding box in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Closed polyline around one foreground region.
/// The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs
    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed polygon area (shoelace formula), never negative
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut twice_area = 0.0f64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        }

        (twice_area * 0.5).abs()
    }

    /// Raw geometric moments of the polygon
    pub fn moments(&self) -> Moments {
        Moments::from_polygon(&self.points)
    }

    /// Area-weighted centroid, `None` for degenerate contours
    pub fn centroid(&self) -> Option<Centroid> {
        self.moments().centroid()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        // Contours come from image coordinates, so they are never negative
        let min_x = min_x.max(0) as u32;
        let min_y = min_y.max(0) as u32;
        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: (max_x.max(0) as u32) - min_x + 1,
            height: (max_y.max(0) as u32) - min_y + 1,
        })
    }
}

/// Raw moments up to first order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Polygon moments via Green's theorem over the closed point sequence.
    /// Normalized so that `m00` is non-negative whatever the winding order.
    pub fn from_polygon(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n == 0 {
            return Self::default();
        }

        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let mut prev = points[n - 1];
        for &cur in points {
            let (x0, y0) = (prev.x as f64, prev.y as f64);
            let (x1, y1) = (cur.x as f64, cur.y as f64);
            let cross = x0 * y1 - x1 * y0;
            a00 += cross;
            a10 += cross * (x0 + x1);
            a01 += cross * (y0 + y1);
            prev = cur;
        }

        let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    pub fn centroid(&self) -> Option<Centroid> {
        if self.m00 == 0.0 {
            return None;
        }
        Some(Centroid {
            x: (self.m10 / self.m00) as i32,
            y: (self.m01 / self.m00) as i32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

/// A contour that survived ranking, with its derived measurements
#[derive(Debug, Clone)]
pub struct DetectedObject {
    pub contour: Contour,
    pub area: f64,
    pub centroid: Option<Centroid>,
}

impl DetectedObject {
    pub fn from_contour(contour: Contour) -> Self {
        let area = contour.area();
        let centroid = contour.centroid();
        Self {
            contour,
            area,
            centroid,
        }
    }
}
