use crate::buffer::PixelBuffer;
use crate::error::FilterError;

/// A color channel position within an RGBA pixel. Alpha is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Sample offset within a pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, FilterError> {
        match index {
            0 => Ok(Channel::Red),
            1 => Ok(Channel::Green),
            2 => Ok(Channel::Blue),
            other => Err(FilterError::InvalidChannel(other)),
        }
    }
}

/// Exchange of two channel positions across every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSwap {
    pub a: Channel,
    pub b: Channel,
}

impl ChannelSwap {
    pub fn new(a: Channel, b: Channel) -> Self {
        Self { a, b }
    }

    pub fn from_indices(a: usize, b: usize) -> Result<Self, FilterError> {
        Ok(Self::new(Channel::from_index(a)?, Channel::from_index(b)?))
    }

    /// True when both sides name the same channel.
    pub fn is_identity(self) -> bool {
        self.a == self.b
    }
}

/// The channel swap buttons offered by the UI.
///
/// `Rbg` and `Gbr` both swap green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapPreset {
    Rbg,
    Bgr,
    Gbr,
    Grb,
}

impl SwapPreset {
    pub const ALL: &[SwapPreset] = &[
        SwapPreset::Rbg,
        SwapPreset::Bgr,
        SwapPreset::Gbr,
        SwapPreset::Grb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SwapPreset::Rbg => "RBG",
            SwapPreset::Bgr => "BGR",
            SwapPreset::Gbr => "GBR",
            SwapPreset::Grb => "GRB",
        }
    }

    pub fn swap(self) -> ChannelSwap {
        match self {
            SwapPreset::Rbg => ChannelSwap::new(Channel::Green, Channel::Blue),
            SwapPreset::Bgr => ChannelSwap::new(Channel::Blue, Channel::Red),
            SwapPreset::Gbr => ChannelSwap::new(Channel::Green, Channel::Blue),
            SwapPreset::Grb => ChannelSwap::new(Channel::Green, Channel::Red),
        }
    }

    /// Case-insensitive lookup by preset name.
    pub fn from_name(name: &str) -> Option<Self> {
        SwapPreset::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Apply a channel swap to every pixel of `buffer`. Alpha is untouched.
pub fn apply_channel_swap(buffer: &mut PixelBuffer, swap: ChannelSwap) {
    if swap.is_identity() {
        return;
    }
    let (a, b) = (swap.a.index(), swap.b.index());
    for pixel in buffer.pixels_mut() {
        pixel.swap(a, b);
    }
}
