//! Recompresión de una imagen individual

use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage, Rgba};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Lado máximo en píxeles
    pub max_dimension: u32,
    /// Calidad JPEG (1-100)
    pub quality: u8,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            quality: 85,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedImage {
    pub original_kb: f64,
    pub new_kb: f64,
    pub resized: bool,
    pub width: u32,
    pub height: u32,
}

impl OptimizedImage {
    /// Porcentaje de reducción; negativo si el archivo creció
    pub fn reduction_percent(&self) -> f64 {
        if self.original_kb <= 0.0 {
            return 0.0;
        }
        (self.original_kb - self.new_kb) / self.original_kb * 100.0
    }
}

/// Redimensiona y guarda como JPEG sobre la misma ruta
///
/// El nombre del archivo no cambia aunque la extensión sea `.png`. Si la
/// decodificación o la codificación fallan, el archivo original queda intacto.
pub fn optimize_image(path: &Path, options: &OptimizeOptions) -> Result<OptimizedImage> {
    let original_bytes = std::fs::metadata(path)?.len();

    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let (width, height) = img.dimensions();

    let resized = width > options.max_dimension || height > options.max_dimension;
    let img = if resized {
        img.resize(options.max_dimension, options.max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    let rgb = flatten_to_rgb(img);

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality);
    rgb.write_with_encoder(encoder)?;
    std::fs::write(path, &buffer)?;

    Ok(OptimizedImage {
        original_kb: original_bytes as f64 / 1024.0,
        new_kb: buffer.len() as f64 / 1024.0,
        resized,
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Convierte a RGB; la transparencia se compone sobre fondo blanco
fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_flatten_transparent_is_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        let rgb = flatten_to_rgb(img);
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([10, 200, 30, 255])));
        let rgb = flatten_to_rgb(img);
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([10, 200, 30]));
    }

    #[test]
    fn test_grayscale_becomes_rgb() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([90])));
        let rgb = flatten_to_rgb(img);
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([90, 90, 90]));
    }

    #[test]
    fn test_reduction_percent() {
        let result = OptimizedImage {
            original_kb: 200.0,
            new_kb: 50.0,
            resized: false,
            width: 1,
            height: 1,
        };
        assert!((result.reduction_percent() - 75.0).abs() < 1e-9);

        let empty = OptimizedImage { original_kb: 0.0, ..result };
        assert_eq!(empty.reduction_percent(), 0.0);
    }

    #[test]
    fn test_small_image_not_resized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pequena.png");
        RgbImage::from_pixel(40, 30, Rgb([0, 120, 0])).save(&path).unwrap();

        let result = optimize_image(&path, &OptimizeOptions::default()).unwrap();
        assert!(!result.resized);
        assert_eq!((result.width, result.height), (40, 30));
    }

    #[test]
    fn test_invalid_file_is_error_and_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roto.jpg");
        std::fs::write(&path, b"no es una imagen").unwrap();

        assert!(optimize_image(&path, &OptimizeOptions::default()).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"no es una imagen");
    }
}
