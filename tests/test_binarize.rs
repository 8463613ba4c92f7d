mod common;

use approx::assert_relative_eq;
use common::*;
use geomprops::detection::contours::find_outer_contours;
use geomprops::detection::preprocessing::{
    adaptive_threshold, binarize_inverted, gaussian_kernel, gaussian_sigma, global_threshold,
    mean_kernel, to_grayscale,
};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

#[test]
fn grayscale_uses_rec601_weights() {
    let img = RgbImage::from_fn(4, 1, |x, _| match x {
        0 => Rgb([255, 0, 0]),
        1 => Rgb([0, 255, 0]),
        2 => Rgb([0, 0, 255]),
        _ => Rgb([255, 255, 255]),
    });
    let gray = to_grayscale(&DynamicImage::ImageRgb8(img));
    let values: Vec<u8> = gray.pixels().map(|p| p[0]).collect();
    assert_eq!(values, vec![76, 150, 29, 255]);
}

#[test]
fn grayscale_input_is_unchanged() {
    let gray = GrayImage::from_fn(16, 1, |x, _| Luma([(x * 16) as u8]));
    let converted = to_grayscale(&DynamicImage::ImageLuma8(gray.clone()));
    assert_eq!(converted, gray);
}

#[test]
fn global_threshold_is_strict() {
    let gray = GrayImage::from_fn(3, 1, |x, _| Luma([127 + x as u8]));
    let binary = global_threshold(&gray, 128);
    let values: Vec<u8> = binary.pixels().map(|p| p[0]).collect();
    assert_eq!(values, vec![0, 0, 255]);
}

#[test]
fn inverted_output_marks_dark_pixels_as_foreground() {
    let gray = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 10 } else { 200 }]));
    let binary = binarize_inverted(&gray, &Binarization::Global { threshold: 128 });
    assert_eq!(binary.get_pixel(0, 0)[0], 255);
    assert_eq!(binary.get_pixel(1, 0)[0], 0);
}

#[test]
fn adaptive_threshold_keeps_flat_regions_as_background() {
    let flat = GrayImage::from_pixel(30, 30, Luma([90]));
    for method in [AdaptiveMethod::Mean, AdaptiveMethod::Gaussian] {
        let binary = adaptive_threshold(&flat, method, 11, 2.0);
        assert!(binary.pixels().all(|p| p[0] == 255));
    }
}

#[test]
fn adaptive_mean_step_edge_marks_a_band_on_the_dark_side() {
    let edge = step_edge_image(40, 40);
    let mode = Binarization::Adaptive {
        method: AdaptiveMethod::Mean,
        block_size: 11,
        subtract_constant: 2.0,
    };
    let binary = binarize_inverted(&edge, &mode);

    // Only the five dark columns that see the white half inside their window
    for (x, _, p) in binary.enumerate_pixels() {
        let expected = if (15..20).contains(&x) { 255 } else { 0 };
        assert_eq!(p[0], expected, "column {}", x);
    }

    let contours = find_outer_contours(&binary);
    assert_eq!(contours.len(), 1);
    let bbox = contours[0].bounding_box().expect("band has points");
    assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (15, 0, 5, 40));
    assert_eq!(contours[0].area(), 4.0 * 39.0);
}

#[test]
fn adaptive_gaussian_step_edge_marks_a_band_on_the_dark_side() {
    let edge = step_edge_image(40, 40);
    let mode = Binarization::Adaptive {
        method: AdaptiveMethod::Gaussian,
        block_size: 11,
        subtract_constant: 2.0,
    };
    let binary = binarize_inverted(&edge, &mode);

    // Column 15 sees the white half only at the window's outermost tap
    for (x, _, p) in binary.enumerate_pixels() {
        let expected = if (15..20).contains(&x) { 255 } else { 0 };
        assert_eq!(p[0], expected, "column {}", x);
    }
    assert_eq!(find_outer_contours(&binary).len(), 1);
}

#[test]
fn adaptive_statistic_is_rounded_before_comparison() {
    // Column 2 sees 9, 10, 10: the mean 9.67 rounds to 10, so 10 is not above it
    let gray = GrayImage::from_fn(5, 3, |x, _| Luma([if x < 2 { 9 } else { 10 }]));
    let binary = adaptive_threshold(&gray, AdaptiveMethod::Mean, 3, 0.0);
    assert_eq!(binary.get_pixel(2, 1)[0], 0);
}

#[test]
fn adaptive_kernels_span_the_whole_block() {
    for block_size in [3, 11, 25] {
        let kernel = gaussian_kernel(block_size);
        assert_eq!(kernel.len(), block_size as usize);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-5);

        let centre = kernel.len() / 2;
        assert!(kernel.iter().all(|w| *w > 0.0 && *w <= kernel[centre]));
        for i in 0..centre {
            assert_relative_eq!(kernel[i], kernel[kernel.len() - 1 - i], epsilon = 1e-7);
        }

        let uniform = mean_kernel(block_size);
        assert_eq!(uniform.len(), block_size as usize);
        assert_relative_eq!(uniform.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn global_step_edge_traces_half_the_image() {
    let edge = step_edge_image(400, 400);
    let binary = binarize_inverted(&edge, &Binarization::Global { threshold: 128 });

    let contours = find_outer_contours(&binary);
    assert_eq!(contours.len(), 1);

    // Boundary runs through pixel centres, so it misses half a pixel on each side
    let area = contours[0].area();
    assert_eq!(area, 199.0 * 399.0);
    assert_relative_eq!(area, 200.0 * 400.0, max_relative = 0.01);
}

#[test]
fn gaussian_sigma_follows_kernel_size() {
    assert_relative_eq!(gaussian_sigma(3), 0.8, epsilon = 1e-6);
    assert_relative_eq!(gaussian_sigma(11), 2.0, epsilon = 1e-6);
}

#[test]
fn outer_contours_skip_nested_regions() {
    // Ring with a dot inside its hole: only the ring's outer border is outer-most
    let mut img = GrayImage::new(30, 30);
    for y in 5..25 {
        for x in 5..25 {
            let on_ring = x < 8 || x >= 22 || y < 8 || y >= 22;
            let on_dot = (13..17).contains(&x) && (13..17).contains(&y);
            if on_ring || on_dot {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }

    let contours = find_outer_contours(&img);
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].area(), 19.0 * 19.0);
}

#[test]
fn regions_touching_the_border_are_closed() {
    let img = GrayImage::from_fn(10, 10, |x, y| Luma([if x < 4 && y < 3 { 255 } else { 0 }]));
    let contours = find_outer_contours(&img);
    assert_eq!(contours.len(), 1);
    let bbox = contours[0].bounding_box().expect("region has points");
    assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (0, 0, 4, 3));
    assert_eq!(contours[0].area(), 3.0 * 2.0);
}
