use crate::models::{Contour, DetectedObject};

/// Keep contours with area strictly above `min_area`, largest first.
/// Equal areas keep their input order. `max_count` caps the result.
pub fn filter_and_rank(
    contours: Vec<Contour>,
    min_area: f64,
    max_count: Option<usize>,
) -> Vec<Contour> {
    filter_and_rank_by(contours, Contour::area, min_area, max_count)
}

/// Same as [`filter_and_rank`] for any item with an area
pub fn filter_and_rank_by<T, F>(
    items: Vec<T>,
    area: F,
    min_area: f64,
    max_count: Option<usize>,
) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut kept: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (area(&item), item))
        .filter(|(a, _)| *a > min_area)
        .collect();

    // Vec::sort_by is stable
    kept.sort_by(|a, b| b.0.total_cmp(&a.0));

    if let Some(max) = max_count {
        kept.truncate(max);
    }

    kept.into_iter().map(|(_, item)| item).collect()
}

/// Rank contours and attach area and centroid to each survivor
pub fn rank_objects(
    contours: Vec<Contour>,
    min_area: f64,
    max_count: Option<usize>,
) -> Vec<DetectedObject> {
    filter_and_rank(contours, min_area, max_count)
        .into_iter()
        .map(DetectedObject::from_contour)
        .collect()
}
