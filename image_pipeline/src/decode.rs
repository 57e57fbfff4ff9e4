use image::{ImageBuffer, Pixel, Rgb};
use moxcms::{ColorProfile, Layout, TransformOptions};

use crate::exif::{extract_exif, extract_icc_profile, parse_orientation};
use crate::PipelineError;

pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;

#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// sRGB pixels with the EXIF orientation already baked in.
    pub pixels: Rgb16Image,
    pub orientation: Option<u16>,
    pub color_managed: bool,
}

pub fn decode_oriented(bytes: &[u8]) -> Result<DecodedImage, PipelineError> {
    let orientation = extract_exif(bytes).and_then(|exif| parse_orientation(&exif));
    let icc = extract_icc_profile(bytes);

    let image = image::load_from_memory(bytes).map_err(|err| PipelineError::Decode(err.to_string()))?;
    let rgb = image.to_rgb16();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PipelineError::Dimensions);
    }

    let (rgb, color_managed) = match icc {
        Some(icc) => match to_srgb(&rgb, &icc) {
            Ok(converted) => (converted, true),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring embedded color profile");
                (rgb, false)
            }
        },
        None => (rgb, false),
    };

    Ok(DecodedImage {
        pixels: apply_orientation(rgb, orientation),
        orientation,
        color_managed,
    })
}

fn to_srgb(rgb: &Rgb16Image, icc: &[u8]) -> Result<Rgb16Image, PipelineError> {
    let src_profile =
        ColorProfile::new_from_slice(icc).map_err(|err| PipelineError::Profile(err.to_string()))?;
    let dst_profile = ColorProfile::new_srgb();
    let options = TransformOptions {
        allow_use_cicp_transfer: true,
        ..Default::default()
    };
    let transform = src_profile
        .create_transform_16bit(Layout::Rgb, &dst_profile, Layout::Rgb, options)
        .map_err(|err| PipelineError::Transform(err.to_string()))?;

    let mut out = vec![0u16; rgb.as_raw().len()];
    transform
        .transform(rgb.as_raw(), &mut out)
        .map_err(|err| PipelineError::Transform(err.to_string()))?;
    ImageBuffer::from_raw(rgb.width(), rgb.height(), out).ok_or(PipelineError::Dimensions)
}

/// Rotates/flips pixels so the image displays upright without EXIF.
pub fn apply_orientation<P>(
    image: ImageBuffer<P, Vec<P::Subpixel>>,
    orientation: Option<u16>,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    use image::imageops::{flip_horizontal, flip_vertical, rotate180, rotate270, rotate90};

    match orientation {
        Some(2) => flip_horizontal(&image),
        Some(3) => rotate180(&image),
        Some(4) => flip_vertical(&image),
        Some(5) => rotate270(&flip_horizontal(&image)),
        Some(6) => rotate90(&image),
        Some(7) => rotate90(&flip_horizontal(&image)),
        Some(8) => rotate270(&image),
        _ => image,
    }
}

pub fn rgb16_to_rgb8(image: &Rgb16Image) -> image::RgbImage {
    let raw = image
        .as_raw()
        .iter()
        .map(|value| ((u32::from(*value) + 128) / 257) as u8)
        .collect();
    // Same dimensions and channel count, so the buffer length always matches.
    image::RgbImage::from_raw(image.width(), image.height(), raw)
        .unwrap_or_else(|| image::RgbImage::new(image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn two_by_one() -> image::RgbImage {
        let mut image = image::RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 0, 255]));
        image
    }

    #[test]
    fn orientation_six_turns_landscape_into_portrait() {
        let rotated = apply_orientation(two_by_one(), Some(6));
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(rotated.get_pixel(0, 1), &Rgb([0, 0, 255]));
    }

    #[test]
    fn orientation_two_mirrors() {
        let flipped = apply_orientation(two_by_one(), Some(2));
        assert_eq!(flipped.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(apply_orientation(two_by_one(), None), two_by_one());
    }

    #[test]
    fn decodes_plain_png_without_profile() {
        let mut bytes = Vec::new();
        two_by_one()
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        let decoded = decode_oriented(&bytes).expect("decode");
        assert_eq!(decoded.pixels.dimensions(), (2, 1));
        assert_eq!(decoded.orientation, None);
        assert!(!decoded.color_managed);
        let rgb8 = rgb16_to_rgb8(&decoded.pixels);
        assert_eq!(rgb8.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_oriented(b"definitely not an image").expect_err("error");
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
