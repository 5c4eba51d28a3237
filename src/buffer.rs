//! RGBA pixel storage the filter engine reads and mutates.

use crate::error::BufferError;

/// Number of samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Offset of the alpha sample within a pixel.
pub const ALPHA: usize = 3;

/// A `width` x `height` grid of 8-bit RGBA samples stored row-major.
///
/// The sample vector always holds exactly `width * height * 4` values.
/// `Clone` is a deep copy: the clone owns its own sample storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples, checking the length against the dimensions.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, BufferError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS));
        match expected {
            Some(n) if n > 0 && n == samples.len() => Ok(Self {
                width,
                height,
                samples,
            }),
            _ => Err(BufferError::InvalidDimensions {
                width,
                height,
                len: samples.len(),
            }),
        }
    }

    /// Buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BufferError> {
        let count = width as usize * height as usize;
        let samples = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, samples)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    /// Raw samples in R,G,B,A order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable view of each pixel as a 4-sample slice, in raster order.
    pub(crate) fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.samples.chunks_exact_mut(CHANNELS)
    }

    /// Flat pixel index for (x, y).
    fn flat_index(&self, x: u32, y: u32) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::IndexOutOfBounds {
                index: (y as usize)
                    .saturating_mul(self.width as usize)
                    .saturating_add(x as usize),
                len: self.pixel_count(),
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    fn check_index(&self, index: usize) -> Result<usize, BufferError> {
        if index >= self.pixel_count() {
            return Err(BufferError::IndexOutOfBounds {
                index,
                len: self.pixel_count(),
            });
        }
        Ok(index * CHANNELS)
    }

    /// Read the pixel at flat index `index`.
    pub fn pixel(&self, index: usize) -> Result<[u8; 4], BufferError> {
        let start = self.check_index(index)?;
        let s = &self.samples[start..start + CHANNELS];
        Ok([s[0], s[1], s[2], s[3]])
    }

    /// Overwrite the pixel at flat index `index`.
    pub fn set_pixel(&mut self, index: usize, rgba: [u8; 4]) -> Result<(), BufferError> {
        let start = self.check_index(index)?;
        self.samples[start..start + CHANNELS].copy_from_slice(&rgba);
        Ok(())
    }

    /// Read the pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Result<[u8; 4], BufferError> {
        self.pixel(self.flat_index(x, y)?)
    }

    /// Overwrite the pixel at column `x`, row `y`.
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<(), BufferError> {
        let index = self.flat_index(x, y)?;
        self.set_pixel(index, rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidDimensions {
                width: 2,
                height: 2,
                len: 15
            }
        );
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 3, Vec::new()).is_err());
        assert!(PixelBuffer::new(3, 0, Vec::new()).is_err());
    }

    #[test]
    fn xy_and_flat_index_agree() {
        let mut buf = PixelBuffer::filled(3, 2, [0, 0, 0, 255]).unwrap();
        buf.put(1, 1, [10, 20, 30, 40]).unwrap();
        assert_eq!(buf.pixel(4).unwrap(), [10, 20, 30, 40]);
        assert_eq!(&buf.samples()[16..20], &[10, 20, 30, 40]);

        buf.set_pixel(2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buf.get(2, 0).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut buf = PixelBuffer::filled(3, 2, [0; 4]).unwrap();
        assert!(matches!(
            buf.get(3, 0),
            Err(BufferError::IndexOutOfBounds { len: 6, .. })
        ));
        assert!(buf.get(0, 2).is_err());
        assert!(buf.pixel(6).is_err());
        assert!(buf.set_pixel(100, [0; 4]).is_err());
        assert!(buf.put(5, 5, [0; 4]).is_err());
    }

    #[test]
    fn clone_does_not_share_storage() {
        let original = PixelBuffer::filled(2, 2, [9, 9, 9, 9]).unwrap();
        let mut copy = original.clone();
        copy.set_pixel(0, [0, 0, 0, 0]).unwrap();
        assert_eq!(original.pixel(0).unwrap(), [9, 9, 9, 9]);
        assert_ne!(original.samples().as_ptr(), copy.samples().as_ptr());
    }
}
