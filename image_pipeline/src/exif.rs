use img_parts::{Bytes, ImageEXIF, ImageICC};

const ORIENTATION_TAG: u16 = 0x0112;
const TYPE_SHORT: u16 = 3;

pub fn extract_exif(bytes: &[u8]) -> Option<Vec<u8>> {
    let data = Bytes::copy_from_slice(bytes);
    if let Ok(jpeg) = img_parts::jpeg::Jpeg::from_bytes(data.clone()) {
        return jpeg.exif().map(|exif| exif.as_ref().to_vec());
    }
    if let Ok(png) = img_parts::png::Png::from_bytes(data.clone()) {
        return png.exif().map(|exif| exif.as_ref().to_vec());
    }
    if let Ok(webp) = img_parts::webp::WebP::from_bytes(data) {
        return webp.exif().map(|exif| exif.as_ref().to_vec());
    }
    None
}

pub fn extract_icc_profile(bytes: &[u8]) -> Option<Vec<u8>> {
    let data = Bytes::copy_from_slice(bytes);
    if let Ok(jpeg) = img_parts::jpeg::Jpeg::from_bytes(data.clone()) {
        return jpeg.icc_profile().map(|icc| icc.as_ref().to_vec());
    }
    if let Ok(png) = img_parts::png::Png::from_bytes(data.clone()) {
        return png.icc_profile().map(|icc| icc.as_ref().to_vec());
    }
    if let Ok(webp) = img_parts::webp::WebP::from_bytes(data) {
        return webp.icc_profile().map(|icc| icc.as_ref().to_vec());
    }
    None
}

/// Orientation (1..=8) from the first IFD of a TIFF/EXIF blob.
pub fn parse_orientation(exif: &[u8]) -> Option<u16> {
    let tiff = exif.strip_prefix(b"Exif\0\0").unwrap_or(exif);
    let reader = TiffReader::new(tiff)?;
    let ifd = reader.u32_at(4)? as usize;
    let count = reader.u16_at(ifd)? as usize;

    (0..count)
        .map(|index| ifd + 2 + index * 12)
        .take_while(|entry| entry + 12 <= tiff.len())
        .find(|entry| reader.u16_at(*entry) == Some(ORIENTATION_TAG))
        .and_then(|entry| {
            if reader.u16_at(entry + 2)? != TYPE_SHORT || reader.u32_at(entry + 4)? < 1 {
                return None;
            }
            // A single SHORT is stored inline in the value field.
            let value = reader.u16_at(entry + 8)?;
            (1..=8).contains(&value).then_some(value)
        })
}

struct TiffReader<'a> {
    data: &'a [u8],
    little_endian: bool,
}

impl<'a> TiffReader<'a> {
    fn new(data: &'a [u8]) -> Option<Self> {
        let little_endian = match data.get(..2)? {
            b"II" => true,
            b"MM" => false,
            _ => return None,
        };
        let reader = Self {
            data,
            little_endian,
        };
        (reader.u16_at(2)? == 42).then_some(reader)
    }

    fn u16_at(&self, offset: usize) -> Option<u16> {
        let raw: [u8; 2] = self.data.get(offset..offset + 2)?.try_into().ok()?;
        Some(if self.little_endian {
            u16::from_le_bytes(raw)
        } else {
            u16::from_be_bytes(raw)
        })
    }

    fn u32_at(&self, offset: usize) -> Option<u32> {
        let raw: [u8; 4] = self.data.get(offset..offset + 4)?.try_into().ok()?;
        Some(if self.little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }
}

#[cfg(test)]
pub(crate) fn orientation_blob(value: u16, little_endian: bool) -> Vec<u8> {
    let u16_bytes = |v: u16| {
        if little_endian {
            v.to_le_bytes()
        } else {
            v.to_be_bytes()
        }
    };
    let u32_bytes = |v: u32| {
        if little_endian {
            v.to_le_bytes()
        } else {
            v.to_be_bytes()
        }
    };
    let mut blob = b"Exif\0\0".to_vec();
    blob.extend_from_slice(if little_endian { b"II" } else { b"MM" });
    blob.extend_from_slice(&u16_bytes(42));
    blob.extend_from_slice(&u32_bytes(8));
    blob.extend_from_slice(&u16_bytes(1));
    blob.extend_from_slice(&u16_bytes(ORIENTATION_TAG));
    blob.extend_from_slice(&u16_bytes(TYPE_SHORT));
    blob.extend_from_slice(&u32_bytes(1));
    blob.extend_from_slice(&u16_bytes(value));
    blob.extend_from_slice(&[0, 0]);
    blob.extend_from_slice(&u32_bytes(0));
    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_orientation_in_both_byte_orders() {
        assert_eq!(parse_orientation(&orientation_blob(6, true)), Some(6));
        assert_eq!(parse_orientation(&orientation_blob(8, false)), Some(8));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert_eq!(parse_orientation(&orientation_blob(0, true)), None);
        assert_eq!(parse_orientation(&orientation_blob(9, true)), None);
        assert_eq!(parse_orientation(b"Exif\0\0XX"), None);
        assert_eq!(parse_orientation(&[]), None);
    }

    #[test]
    fn truncated_ifd_is_tolerated() {
        let blob = orientation_blob(3, true);
        assert_eq!(parse_orientation(&blob[..blob.len() - 8]), None);
    }
}
