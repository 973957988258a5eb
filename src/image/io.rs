//! Codec helpers bridging the `image` crate to engine buffers.
//!
//! Available when the `image-io` feature is enabled. Color input is reduced
//! to a single intensity channel by integer averaging of R, G and B; an
//! alpha channel, when present, becomes a `[0, 1]` weight mask.

use crate::image::{DecodedImage, MaskBuffer, PixelBuffer};
use crate::util::{NccMatchError, NccMatchResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::DynamicImage;
use std::path::Path;

/// Converts a decoded dynamic image into engine buffers.
pub fn decoded_from_dynamic(img: &DynamicImage) -> NccMatchResult<DecodedImage> {
    let has_alpha = img.color().has_alpha();
    let rgba = img.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;

    let mut gray = Vec::with_capacity(width * height);
    let mut alpha = if has_alpha {
        Vec::with_capacity(width * height)
    } else {
        Vec::new()
    };
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        gray.push(((r as u16 + g as u16 + b as u16) / 3) as u8);
        if has_alpha {
            alpha.push(a as f32 / 255.0);
        }
    }

    let gray = PixelBuffer::new(gray, width, height)?;
    let alpha = if has_alpha {
        Some(MaskBuffer::new(alpha, width, height)?)
    } else {
        None
    };
    DecodedImage::new(gray, alpha)
}

/// Decodes a base64 payload, with or without a `data:image/...;base64,` prefix.
pub fn decode_base64_image(data: &str) -> NccMatchResult<DecodedImage> {
    let payload = if data.starts_with("data:image/") {
        data.split_once(',')
            .map(|(_, rest)| rest)
            .ok_or_else(|| NccMatchError::ImageIo {
                reason: "data url without a comma separator".to_string(),
            })?
    } else {
        data
    };
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|err| NccMatchError::ImageIo {
            reason: err.to_string(),
        })?;
    let img = image::load_from_memory(&bytes).map_err(|err| NccMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    decoded_from_dynamic(&img)
}

/// Loads an image from disk and converts it to engine buffers.
pub fn load_decoded<P: AsRef<Path>>(path: P) -> NccMatchResult<DecodedImage> {
    let img = image::open(path).map_err(|err| NccMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    decoded_from_dynamic(&img)
}
