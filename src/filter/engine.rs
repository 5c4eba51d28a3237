use std::fmt;
use std::str::FromStr;

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filter::channel::{self, ChannelSwap, SwapPreset};
use crate::filter::transform::{Filter, Transform, to_channel};

/// Run `transform` over every pixel of `buffer` in raster order, writing the
/// clamped result back into R, G and B. Alpha is never written.
pub fn apply_transform<T: Transform + ?Sized>(buffer: &mut PixelBuffer, transform: &T) {
    for pixel in buffer.pixels_mut() {
        let [r, g, b] = transform.map(pixel[0] as f64, pixel[1] as f64, pixel[2] as f64);
        pixel[0] = to_channel(r);
        pixel[1] = to_channel(g);
        pixel[2] = to_channel(b);
    }
}

/// One user-facing edit: a catalog filter or a channel swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Filter(Filter),
    Swap(ChannelSwap),
}

impl Operation {
    pub fn apply_to(self, buffer: &mut PixelBuffer) {
        match self {
            Operation::Filter(filter) => apply_transform(buffer, &filter),
            Operation::Swap(swap) => channel::apply_channel_swap(buffer, swap),
        }
    }
}

impl From<Filter> for Operation {
    fn from(filter: Filter) -> Self {
        Operation::Filter(filter)
    }
}

impl From<ChannelSwap> for Operation {
    fn from(swap: ChannelSwap) -> Self {
        Operation::Swap(swap)
    }
}

impl From<SwapPreset> for Operation {
    fn from(preset: SwapPreset) -> Self {
        Operation::Swap(preset.swap())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Filter(filter) => f.write_str(filter.name()),
            Operation::Swap(swap) => write!(f, "swap {:?} <-> {:?}", swap.a, swap.b),
        }
    }
}

impl FromStr for Operation {
    type Err = FilterError;

    /// A filter key (`sepia`, `smartInvert`, ...) or a swap preset name (`rbg`, `grb`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = SwapPreset::from_name(s) {
            return Ok(preset.into());
        }
        s.parse::<Filter>().map(Operation::Filter)
    }
}

/// Applies operations to whatever buffer is currently loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterEngine;

impl FilterEngine {
    /// Apply `op` in place. Returns `false` without doing anything when no
    /// buffer is loaded.
    pub fn apply(&self, buffer: Option<&mut PixelBuffer>, op: Operation) -> bool {
        let Some(buffer) = buffer else {
            return false;
        };
        log::debug!("applying {op} to {} pixels", buffer.pixel_count());
        op.apply_to(buffer);
        true
    }

    /// Apply an arbitrary point-wise transform in place, with the same
    /// no-buffer behavior as [`FilterEngine::apply`].
    pub fn apply_transform<T: Transform + ?Sized>(
        &self,
        buffer: Option<&mut PixelBuffer>,
        transform: &T,
    ) -> bool {
        let Some(buffer) = buffer else {
            return false;
        };
        apply_transform(buffer, transform);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ALPHA;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_buffer(rng: &mut StdRng) -> PixelBuffer {
        let w = rng.random_range(1..16u32);
        let h = rng.random_range(1..16u32);
        let samples = (0..w * h * 4).map(|_| rng.random::<u8>()).collect();
        PixelBuffer::new(w, h, samples).unwrap()
    }

    fn alphas(buf: &PixelBuffer) -> Vec<u8> {
        buf.samples().chunks_exact(4).map(|p| p[ALPHA]).collect()
    }

    fn all_operations() -> Vec<Operation> {
        let mut ops: Vec<Operation> = Filter::ALL.iter().map(|&f| f.into()).collect();
        ops.extend(SwapPreset::ALL.iter().map(|&p| Operation::from(p)));
        ops
    }

    #[test]
    fn alpha_is_never_touched() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let buf = random_buffer(&mut rng);
            for op in all_operations() {
                let mut out = buf.clone();
                op.apply_to(&mut out);
                assert_eq!(alphas(&out), alphas(&buf), "{op}");
            }
        }
    }

    #[test]
    fn extreme_inputs_keep_alpha() {
        // every combination of extremes and midpoints
        let levels = [0u8, 1, 127, 128, 254, 255];
        let mut samples = Vec::new();
        for &r in &levels {
            for &g in &levels {
                for &b in &levels {
                    samples.extend_from_slice(&[r, g, b, 200]);
                }
            }
        }
        let n = (samples.len() / 4) as u32;
        let buf = PixelBuffer::new(n, 1, samples).unwrap();
        for &filter in Filter::ALL {
            let mut out = buf.clone();
            apply_transform(&mut out, &filter);
            for p in out.samples().chunks_exact(4) {
                assert_eq!(p[3], 200);
            }
        }
    }

    #[test]
    fn out_of_range_transform_output_is_clamped() {
        let mut buf = PixelBuffer::filled(2, 2, [10, 10, 10, 255]).unwrap();
        apply_transform(&mut buf, &|_r: f64, _g: f64, _b: f64| [-1000.0, 1e9, f64::NAN]);
        assert_eq!(buf.pixel(3).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn invert_twice_round_trips() {
        let mut rng = StdRng::seed_from_u64(42);
        let buf = random_buffer(&mut rng);
        let mut out = buf.clone();
        Operation::from(Filter::Invert).apply_to(&mut out);
        Operation::from(Filter::Invert).apply_to(&mut out);
        assert_eq!(out, buf);
    }

    #[test]
    fn grayscale_fixes_dark_greys_and_converges() {
        let samples: Vec<u8> = (0..50u8).flat_map(|v| [v, v, v, 255]).collect();
        let grey = PixelBuffer::new(50, 1, samples).unwrap();
        let mut out = grey.clone();
        apply_transform(&mut out, &Filter::Grayscale);
        assert_eq!(out, grey);

        // repeated passes never brighten and settle on a fixed point
        let mut rng = StdRng::seed_from_u64(3);
        let mut buf = random_buffer(&mut rng);
        apply_transform(&mut buf, &Filter::Grayscale);
        for _ in 0..400 {
            let before = buf.clone();
            apply_transform(&mut buf, &Filter::Grayscale);
            for (a, b) in before.samples().iter().zip(buf.samples()) {
                assert!(b <= a);
            }
        }
        let settled = buf.clone();
        apply_transform(&mut buf, &Filter::Grayscale);
        assert_eq!(buf, settled);
    }

    #[test]
    fn engine_without_buffer_is_noop() {
        let engine = FilterEngine;
        assert!(!engine.apply(None, Filter::Sepia.into()));
        assert!(!engine.apply_transform(None, &Filter::Invert));

        let mut buf = PixelBuffer::filled(1, 1, [1, 2, 3, 4]).unwrap();
        assert!(engine.apply(Some(&mut buf), SwapPreset::Grb.into()));
        assert_eq!(buf.pixel(0).unwrap(), [2, 1, 3, 4]);
    }

    #[test]
    fn parses_filters_and_swaps() {
        assert_eq!(
            "sepia".parse::<Operation>().unwrap(),
            Operation::Filter(Filter::Sepia)
        );
        assert_eq!(
            "BGR".parse::<Operation>().unwrap(),
            Operation::from(SwapPreset::Bgr)
        );
        assert!("nope".parse::<Operation>().is_err());
    }
}
