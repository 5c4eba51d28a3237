use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder};
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::ImageIoError;

pub fn load_image(path: &Path) -> Result<DynamicImage, ImageIoError> {
    Ok(image::open(path)?)
}

/// Decode an image from an in-memory file (e.g. a dropped file's bytes).
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageIoError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Dimensions an `iw` x `ih` image takes when fitted into a `fw` x `fh` frame.
///
/// Uniform scale `min(fw/iw, fh/ih) * margin`; fractional sizes truncate,
/// never below one pixel.
pub fn fit_dimensions(iw: u32, ih: u32, fw: u32, fh: u32, margin: f64) -> (u32, u32) {
    let scale = f64::min(fw as f64 / iw as f64, fh as f64 / ih as f64) * margin;
    let new_w = ((iw as f64 * scale).floor() as u32).max(1);
    let new_h = ((ih as f64 * scale).floor() as u32).max(1);
    (new_w, new_h)
}

/// Scale `img` into the display frame and capture its pixels as RGBA.
pub fn fit_to_frame(
    img: &DynamicImage,
    frame_w: u32,
    frame_h: u32,
    margin: f64,
) -> Result<PixelBuffer, ImageIoError> {
    if frame_w == 0 || frame_h == 0 {
        return Err(ImageIoError::EmptyFrame {
            width: frame_w,
            height: frame_h,
        });
    }
    let (iw, ih) = img.dimensions();
    let (new_w, new_h) = fit_dimensions(iw, ih, frame_w, frame_h, margin);
    log::debug!("fitting {iw}x{ih} into {frame_w}x{frame_h} -> {new_w}x{new_h}");

    let resized = img.resize_exact(new_w, new_h, image::imageops::FilterType::Triangle);
    to_pixel_buffer(&resized)
}

/// Capture an image's pixels as RGBA without scaling.
pub fn to_pixel_buffer(img: &DynamicImage) -> Result<PixelBuffer, ImageIoError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(PixelBuffer::new(w, h, rgba.into_raw())?)
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ImageIoError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        buffer.samples(),
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), ImageIoError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path, bytes)?;
    log::info!("wrote {}x{} PNG to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn fit_uses_smaller_ratio_and_margin() {
        // width-bound: 900/1800 = 0.5 * 0.95
        assert_eq!(fit_dimensions(1800, 600, 900, 600, 0.95), (855, 285));
        // height-bound: 600/300 = 2.0 * 0.95
        assert_eq!(fit_dimensions(200, 300, 900, 600, 0.95), (380, 570));
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        assert_eq!(fit_dimensions(10_000, 1, 100, 100, 0.95), (95, 1));
    }

    #[test]
    fn fit_to_frame_produces_scaled_buffer() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            20,
            image::Rgba([10, 20, 30, 255]),
        ));
        let buf = fit_to_frame(&img, 100, 100, 0.95).unwrap();
        assert_eq!((buf.width(), buf.height()), (95, 47));
        assert_eq!(buf.pixel(0).unwrap(), [10, 20, 30, 255]);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(matches!(
            fit_to_frame(&img, 0, 10, 0.95),
            Err(ImageIoError::EmptyFrame { .. })
        ));
    }

    #[test]
    fn png_encoding_preserves_pixels() {
        let mut buf = PixelBuffer::filled(3, 2, [1, 2, 3, 128]).unwrap();
        buf.put(2, 1, [250, 0, 7, 9]).unwrap();
        let bytes = encode_png(&buf).unwrap();
        let decoded = to_pixel_buffer(&decode_image(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(ImageIoError::Image(_))
        ));
    }
}
