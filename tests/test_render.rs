mod common;

use common::*;
use geomprops::render::{CONTOUR_COLOR, draw_contour};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// 50x50 white frame with one square and one degenerate line
fn hand_made_analysis() -> Analysis {
    let objects = vec![
        DetectedObject::from_contour(rect_contour(10, 10, 20, 20)),
        DetectedObject::from_contour(Contour::from_coords(&[(5, 40), (45, 40)])),
    ];

    Analysis {
        original: RgbImage::from_pixel(50, 50, WHITE),
        grayscale: GrayImage::from_pixel(50, 50, Luma([255])),
        binary: GrayImage::new(50, 50),
        binarization: Binarization::Global { threshold: 128 },
        raw_contour_count: 2,
        objects,
    }
}

#[test]
fn figure_has_four_titled_panels() {
    let figure = Figure::render(&hand_made_analysis());
    let titles: Vec<&str> = figure.panels.iter().map(|p| p.title).collect();
    assert_eq!(titles, Figure::TITLES.to_vec());
    assert!(figure.panels.iter().all(|p| p.image.dimensions() == (50, 50)));

    let [top, bottom] = figure.rows();
    assert_eq!(top.len(), 2);
    assert_eq!(bottom[0].title, "Grayscale");
}

#[test]
fn annotated_panel_marks_centroids_and_contours() {
    let analysis = hand_made_analysis();
    assert_eq!(analysis.objects[0].centroid, Some(Centroid { x: 20, y: 20 }));
    assert_eq!(analysis.objects[1].centroid, None);

    let figure = Figure::render(&analysis);
    let annotated = &figure.panels[3].image;

    assert_eq!(*annotated.get_pixel(20, 10), CONTOUR_COLOR);
    assert_eq!(*annotated.get_pixel(20, 20), CONTOUR_COLOR);
    // The degenerate line is still drawn, without a marker
    assert_eq!(*annotated.get_pixel(25, 40), CONTOUR_COLOR);
    assert_eq!(*annotated.get_pixel(25, 36), WHITE);
    assert_eq!(*annotated.get_pixel(25, 44), WHITE);
}

#[test]
fn binary_panel_has_contours_but_no_markers() {
    let figure = Figure::render(&hand_made_analysis());
    let binary = &figure.panels[1].image;

    assert_eq!(*binary.get_pixel(10, 20), CONTOUR_COLOR);
    assert_eq!(*binary.get_pixel(25, 40), CONTOUR_COLOR);
    assert_eq!(*binary.get_pixel(20, 20), BLACK);
}

#[test]
fn plain_panels_are_untouched() {
    let figure = Figure::render(&hand_made_analysis());
    assert!(figure.panels[0].image.pixels().all(|p| *p == WHITE));
    assert!(figure.panels[2].image.pixels().all(|p| *p == WHITE));
}

#[test]
fn single_point_contour_is_drawn_as_a_pixel() {
    let mut canvas = RgbImage::new(10, 10);
    let green = Rgb([0, 255, 0]);
    draw_contour(&mut canvas, &Contour::from_coords(&[(3, 4)]), green);
    draw_contour(&mut canvas, &Contour::from_coords(&[(30, 40)]), green);
    draw_contour(&mut canvas, &Contour::new(Vec::new()), green);

    assert_eq!(*canvas.get_pixel(3, 4), green);
    assert_eq!(canvas.pixels().filter(|p| **p == green).count(), 1);
}

#[test]
fn panels_can_be_saved() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let figure = Figure::render(&hand_made_analysis());
    figure.save_panels(dir.path())?;

    for name in [
        "01_original_image.png",
        "02_binary_with_contours.png",
        "03_grayscale.png",
        "04_contours_and_centroids.png",
    ] {
        assert!(dir.path().join(name).is_file(), "missing {}", name);
    }
    Ok(())
}
