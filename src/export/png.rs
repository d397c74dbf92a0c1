//! PNG file I/O.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbImage};
use log::{debug, info};
use thiserror::Error;

use crate::error::UnwrapError;
use crate::layout::{FaceImage, UnwrappedImage};
use crate::sampling::SourceImage;

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Unwrap(#[from] UnwrapError),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Faster, larger files; handy for previews.
    pub fn fast() -> Self {
        Self {
            compression: CompressionType::Fast,
            ..Default::default()
        }
    }
}

/// Loads an equirectangular panorama, converting any supported format to RGB8.
pub fn load_source(path: &Path) -> Result<SourceImage, ImageIoError> {
    let image = image::open(path)?.to_rgb8();
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(SourceImage::try_from(image)?)
}

/// Writes an RGB image as an 8-bit PNG, creating parent directories.
pub fn write_png(
    image: &RgbImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Writes an unwrapped net to `path`.
pub fn export_net_png(
    net: &UnwrappedImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ImageIoError> {
    write_png(net.image(), path, options)?;
    info!(
        "wrote {}x{} net to {}",
        net.width(),
        net.height(),
        path.display()
    );
    Ok(())
}

/// File name of one face: `{base_name}_{NN}.png`.
pub fn face_file_name(base_name: &str, face_index: usize) -> String {
    format!("{}_{:02}.png", base_name, face_index)
}

/// Exports face images as individual PNG files.
///
/// Files are named `{base_name}_{NN}.png` with a two-digit face index, for
/// example `face_00.png` to `face_19.png`. Returns the written paths in the
/// order of `faces`.
pub fn export_face_pngs(
    faces: &[FaceImage],
    output_dir: &Path,
    base_name: &str,
    options: &PngExportOptions,
) -> Result<Vec<PathBuf>, ImageIoError> {
    std::fs::create_dir_all(output_dir)?;

    let mut paths = Vec::with_capacity(faces.len());
    for face in faces {
        let path = output_dir.join(face_file_name(base_name, face.face_index()));
        write_png(face.image(), &path, options)?;
        paths.push(path);
    }
    info!("wrote {} face images to {}", paths.len(), output_dir.display());
    Ok(paths)
}
