use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Extensions offered by the file dialog
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Read and decode an image file
pub fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?
        .with_guessed_format()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", path.display(), e))?;

    if img.width() == 0 || img.height() == 0 {
        anyhow::bail!("Image has no pixels: {}", path.display());
    }

    log::debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Whether the path carries one of [`SUPPORTED_EXTENSIONS`]
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
