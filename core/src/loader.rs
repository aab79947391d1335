//! Image loading with a baked-in hue offset.
//!
//! Sprites are often reused in several colour variants. A virtual path of
//! the form `<image>/<degrees>.hue_offset` (for example
//! `sprites/tank.png/120.hue_offset`) names the image `sprites/tank.png`
//! recoloured by 120 degrees at load time, so no shader is needed at draw time.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::color::{rotate_hue, texel_from_rgba8};

/// File extension that marks a hue-offset virtual path.
pub const HUE_OFFSET_EXTENSION: &str = "hue_offset";

/// Errors that can occur while loading a recoloured image.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Hue offset path has no parent image: {0}")]
    MissingParent(PathBuf),

    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),
}

/// Split a hue-offset path into the image path and the offset in degrees.
///
/// A file stem that is not a valid `u16` yields an offset of 0.
pub fn parse_hue_offset_path(path: &Path) -> Result<(PathBuf, u16), LoaderError> {
    let degrees = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| {
            name.strip_suffix(".hue_offset")
                .and_then(|stem| stem.parse::<u16>().ok())
        })
        .unwrap_or_default();

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok((parent.to_path_buf(), degrees)),
        _ => Err(LoaderError::MissingParent(path.to_path_buf())),
    }
}

/// Rotate the hue of every pixel in place by `degrees`.
///
/// Alpha is left untouched; colour channels are re-quantised to 8 bits.
pub fn apply_hue_offset(image: &mut RgbaImage, degrees: u16) {
    if degrees % 360 == 0 {
        return;
    }
    let offset = degrees as f32 / 360.0;

    for pixel in image.pixels_mut() {
        let a = pixel.0[3];
        let rotated = rotate_hue(texel_from_rgba8(pixel.0), offset);
        pixel.0 = [
            (rotated[0] * 255.0).min(255.0).round() as u8,
            (rotated[1] * 255.0).min(255.0).round() as u8,
            (rotated[2] * 255.0).min(255.0).round() as u8,
            a,
        ];
    }
}

/// Load the image named by a hue-offset path and recolour it.
///
/// Paths without the `.hue_offset` extension are loaded as-is.
pub fn load_image_with_hue<P: AsRef<Path>>(path: P) -> Result<RgbaImage, LoaderError> {
    let path = path.as_ref();
    let is_virtual = path
        .extension()
        .is_some_and(|ext| ext == HUE_OFFSET_EXTENSION);
    if !is_virtual {
        return Ok(image::open(path)?.to_rgba8());
    }

    let (image_path, degrees) = parse_hue_offset_path(path)?;
    log::debug!(
        "Loading {} with hue offset {} degrees",
        image_path.display(),
        degrees
    );

    let mut image = image::open(&image_path)?.to_rgba8();
    apply_hue_offset(&mut image, degrees);
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_parse_hue_offset_path() {
        let (image, degrees) =
            parse_hue_offset_path(Path::new("sprites/tank.png/120.hue_offset")).unwrap();
        assert_eq!(image, PathBuf::from("sprites/tank.png"));
        assert_eq!(degrees, 120);
    }

    #[test]
    fn test_parse_non_numeric_offset_is_zero() {
        let (_, degrees) = parse_hue_offset_path(Path::new("tank.png/red.hue_offset")).unwrap();
        assert_eq!(degrees, 0);

        let (_, degrees) = parse_hue_offset_path(Path::new("tank.png/99999.hue_offset")).unwrap();
        assert_eq!(degrees, 0);
    }

    #[test]
    fn test_parse_missing_parent() {
        let result = parse_hue_offset_path(Path::new("120.hue_offset"));
        assert!(matches!(result, Err(LoaderError::MissingParent(_))));
    }

    #[test]
    fn test_apply_hue_offset_red_to_green() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 77]));
        apply_hue_offset(&mut image, 120);
        assert!(image.pixels().all(|p| p.0 == [0, 255, 0, 77]));
    }

    #[test]
    fn test_apply_hue_offset_keeps_gray_and_alpha() {
        let mut image = RgbaImage::from_pixel(3, 1, Rgba([128, 128, 128, 128]));
        image.put_pixel(2, 0, Rgba([0, 0, 255, 0]));
        apply_hue_offset(&mut image, 200);
        assert_eq!(image.get_pixel(0, 0).0, [128, 128, 128, 128]);
        assert_eq!(image.get_pixel(2, 0).0[3], 0);
    }

    #[test]
    fn test_apply_full_turn_is_noop() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([12, 34, 56, 255]));
        apply_hue_offset(&mut image, 360);
        assert_eq!(image.get_pixel(0, 0).0, [12, 34, 56, 255]);
    }
}
