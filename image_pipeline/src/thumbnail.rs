use image::codecs::avif::AvifEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageBuffer, ImageEncoder, Pixel};

use crate::decode::{decode_oriented, rgb16_to_rgb8};
use crate::settings::ThumbSpec;
use crate::PipelineError;

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
}

/// Scale so the short side matches `size`, then centre-crop to a square.
pub fn cover_square<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    size: u32,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, PipelineError>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let (width, height) = image.dimensions();
    if size == 0 || width == 0 || height == 0 {
        return Err(PipelineError::Dimensions);
    }
    let scale = size as f64 / width.min(height) as f64;
    let scaled_w = ((width as f64 * scale).round() as u32).max(size);
    let scaled_h = ((height as f64 * scale).round() as u32).max(size);
    let resized = imageops::resize(image, scaled_w, scaled_h, FilterType::Lanczos3);
    let x = (scaled_w - size) / 2;
    let y = (scaled_h - size) / 2;
    Ok(imageops::crop_imm(&resized, x, y, size, size).to_image())
}

pub fn encode_avif(image: &image::RgbImage, quality: u8, speed: u8) -> Result<Vec<u8>, PipelineError> {
    let mut out = Vec::new();
    let encoder = AvifEncoder::new_with_speed_quality(&mut out, speed.clamp(1, 10), quality.min(100))
        .with_num_threads(Some(1));
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|err| PipelineError::Encode(err.to_string()))?;
    Ok(out)
}

pub fn render_thumbnail(bytes: &[u8], spec: ThumbSpec, speed: u8) -> Result<Thumbnail, PipelineError> {
    let decoded = decode_oriented(bytes)?;
    let (source_width, source_height) = decoded.pixels.dimensions();
    let square = cover_square(&decoded.pixels, spec.size)?;
    let rgb = rgb16_to_rgb8(&square);
    let bytes = encode_avif(&rgb, spec.quality, speed)?;
    Ok(Thumbnail {
        bytes,
        width: rgb.width(),
        height: rgb.height(),
        source_width,
        source_height,
    })
}

pub fn is_avif(bytes: &[u8]) -> bool {
    bytes.get(4..8) == Some(b"ftyp".as_slice())
        && matches!(bytes.get(8..12), Some(brand) if brand == b"avif" || brand == b"avis")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn cover_crops_landscape_to_square() {
        let image = RgbImage::from_fn(300, 200, |x, _| {
            if x < 150 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 255, 0])
            }
        });
        let square = cover_square(&image, 120).expect("cover");
        assert_eq!(square.dimensions(), (120, 120));
        // Centre crop keeps both halves.
        assert!(square.get_pixel(5, 60)[0] > 200);
        assert!(square.get_pixel(114, 60)[1] > 200);
    }

    #[test]
    fn cover_upscales_small_sources() {
        let image = RgbImage::new(10, 40);
        let square = cover_square(&image, 24).expect("cover");
        assert_eq!(square.dimensions(), (24, 24));
    }

    #[test]
    fn cover_rejects_zero_size() {
        let image = RgbImage::new(10, 10);
        assert!(matches!(cover_square(&image, 0), Err(PipelineError::Dimensions)));
    }

    #[test]
    fn encodes_avif_container() {
        let image = RgbImage::from_pixel(16, 16, Rgb([200, 40, 90]));
        let bytes = encode_avif(&image, 80, 10).expect("encode");
        assert!(is_avif(&bytes));
    }
}
