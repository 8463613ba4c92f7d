use crate::config::{AdaptiveMethod, Binarization};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use imageproc::filter::separable_filter_equal;
use imageproc::map::map_colors;

// Rec.601 luma weights in 14-bit fixed point (0.299, 0.587, 0.114)
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const WEIGHT_SHIFT: u32 = 14;

/// Convert image to grayscale with fixed Rec.601 weights
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    map_colors(&rgb, |Rgb([r, g, b])| {
        let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
        let rounded = (weighted + (1 << (WEIGHT_SHIFT - 1))) >> WEIGHT_SHIFT;
        Luma([rounded.min(255) as u8])
    })
}

/// Split a grayscale image into 0/255 levels
pub fn binarize(gray: &GrayImage, mode: &Binarization) -> GrayImage {
    match *mode {
        Binarization::Global { threshold } => global_threshold(gray, threshold),
        Binarization::Adaptive {
            method,
            block_size,
            subtract_constant,
        } => adaptive_threshold(gray, method, block_size, subtract_constant),
    }
}

/// Binarize and swap the two levels, so dark objects become the 255 class
pub fn binarize_inverted(gray: &GrayImage, mode: &Binarization) -> GrayImage {
    let mut binary = binarize(gray, mode);
    invert(&mut binary);
    binary
}

pub fn invert(binary: &mut GrayImage) {
    image::imageops::invert(binary);
}

/// `255` where `v > threshold`
pub fn global_threshold(gray: &GrayImage, threshold: u8) -> GrayImage {
    map_colors(gray, |Luma([v])| Luma([if v > threshold { 255 } else { 0 }]))
}

/// `255` where `v > local_stat - subtract_constant`, window of `block_size` pixels
/// centred on each pixel with replicated borders
pub fn adaptive_threshold(
    gray: &GrayImage,
    method: AdaptiveMethod,
    block_size: u32,
    subtract_constant: f64,
) -> GrayImage {
    let local = local_statistic(gray, method, block_size);

    let offset = subtract_constant.ceil() as i32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0] as i32;
        let stat = local.get_pixel(x, y)[0].round() as i32;
        Luma([if v > stat - offset { 255 } else { 0 }])
    })
}

/// Weighted mean over a `block_size` square window, kept in floating point
fn local_statistic(
    gray: &GrayImage,
    method: AdaptiveMethod,
    block_size: u32,
) -> ImageBuffer<Luma<f32>, Vec<f32>> {
    let levels: ImageBuffer<Luma<f32>, Vec<f32>> = map_colors(gray, |Luma([v])| Luma([v as f32]));
    let kernel = match method {
        AdaptiveMethod::Mean => mean_kernel(block_size),
        AdaptiveMethod::Gaussian => gaussian_kernel(block_size),
    };
    separable_filter_equal(&levels, &kernel)
}

/// Uniform 1-D kernel of `block_size` taps
pub fn mean_kernel(block_size: u32) -> Vec<f32> {
    vec![1.0 / block_size as f32; block_size as usize]
}

/// Normalized 1-D Gaussian kernel of exactly `block_size` taps
pub fn gaussian_kernel(block_size: u32) -> Vec<f32> {
    let sigma = gaussian_sigma(block_size);
    let centre = (block_size / 2) as f32;
    let weights: Vec<f32> = (0..block_size)
        .map(|i| {
            let d = i as f32 - centre;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Sigma of the Gaussian window for a given kernel size
pub fn gaussian_sigma(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
