//! Prepares images for placement on a page: flattens transparency onto white,
//! trims black borders, and re-encodes as JPEG.

use std::path::{Path, PathBuf};

use fs_err as fs;
use image::{codecs::jpeg::JpegEncoder, imageops, DynamicImage, Rgb, RgbImage};
use thiserror::Error;

/// An image that's ready to be packed and drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    /// Where the image was read from.
    pub source: PathBuf,

    /// The processed image, encoded as a baseline JPEG.
    pub jpeg: Vec<u8>,

    /// Size of the processed image in pixels.
    pub pixel_size: (u32, u32),

    /// Size the image should be drawn at, in points.
    pub size: (f64, f64),
}

pub fn prepare_image(path: &Path, quality: u8, dpi: f64) -> Result<PreparedImage, PrepareError> {
    let contents = fs::read(path)?;

    let decoded = image::load_from_memory(&contents).map_err(|source| PrepareError::Decode {
        path: path.to_owned(),
        source,
    })?;

    let flattened = flatten_onto_white(&decoded);
    let cropped = crop_to_content(flattened);
    let pixel_size = cropped.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode_image(&cropped)
        .map_err(|source| PrepareError::Encode {
            path: path.to_owned(),
            source,
        })?;

    log::debug!(
        "Prepared {} ({}x{} px, {} bytes)",
        path.display(),
        pixel_size.0,
        pixel_size.1,
        jpeg.len()
    );

    Ok(PreparedImage {
        source: path.to_owned(),
        jpeg,
        pixel_size,
        size: pixels_to_points(pixel_size, dpi),
    })
}

pub fn pixels_to_points(pixel_size: (u32, u32), dpi: f64) -> (f64, f64) {
    (
        pixel_size.0 as f64 * 72.0 / dpi,
        pixel_size.1 as f64 * 72.0 / dpi,
    )
}

/// Drops the alpha channel, compositing any transparent pixels over a white
/// background.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;

        let blend = |channel: u8| {
            let mixed = channel as u16 * alpha + 255 * (255 - alpha);
            ((mixed + 127) / 255) as u8
        };

        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Trims the image to the smallest rectangle containing every pixel that isn't
/// pure black. Images that are entirely black are left alone.
fn crop_to_content(img: RgbImage) -> RgbImage {
    match content_bounds(&img) {
        Some((x, y, width, height)) if (width, height) != img.dimensions() => {
            imageops::crop_imm(&img, x, y, width, height).to_image()
        }
        _ => img,
    }
}

fn content_bounds(img: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0 == [0, 0, 0] {
            continue;
        }

        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("couldn't decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("couldn't encode {} as JPEG: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn opaque_images_are_unchanged() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([10, 20, 30])));
        let flattened = flatten_onto_white(&img);

        assert_eq!(flattened.get_pixel(1, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn transparency_becomes_white() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([200, 100, 0, 255]));

        let flattened = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(flattened.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(flattened.get_pixel(1, 0), &Rgb([200, 100, 0]));
    }

    #[test]
    fn half_transparent_pixels_blend() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flattened = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(flattened.get_pixel(0, 0), &Rgb([127, 127, 127]));
    }

    #[test]
    fn black_border_is_cropped() {
        let mut img = RgbImage::new(6, 5);
        img.put_pixel(2, 1, Rgb([255, 0, 0]));
        img.put_pixel(3, 3, Rgb([0, 0, 9]));

        assert_eq!(content_bounds(&img), Some((2, 1, 2, 3)));
        assert_eq!(crop_to_content(img).dimensions(), (2, 3));
    }

    #[test]
    fn all_black_image_is_kept() {
        let img = RgbImage::new(4, 4);

        assert_eq!(content_bounds(&img), None);
        assert_eq!(crop_to_content(img).dimensions(), (4, 4));
    }

    #[test]
    fn points_use_dpi() {
        assert_eq!(pixels_to_points((200, 400), 200.0), (72.0, 144.0));
        assert_eq!(pixels_to_points((300, 150), 300.0), (72.0, 36.0));
    }

    #[test]
    fn prepare_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");

        let mut rgba = RgbaImage::from_pixel(10, 8, Rgba([0, 0, 0, 255]));
        for x in 2..6 {
            for y in 1..5 {
                rgba.put_pixel(x, y, Rgba([240, 240, 240, 255]));
            }
        }
        rgba.save_with_format(&path, ImageFormat::Png).unwrap();

        let prepared = prepare_image(&path, 85, 200.0).unwrap();

        assert_eq!(prepared.source, path);
        assert_eq!(prepared.pixel_size, (4, 4));
        assert_eq!(prepared.size, pixels_to_points((4, 4), 200.0));
        assert_eq!(image::guess_format(&prepared.jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let err = prepare_image(&path, 85, 200.0).unwrap_err();
        assert!(matches!(err, PrepareError::Decode { .. }));
    }
}
