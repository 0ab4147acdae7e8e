
use std::{num::NonZeroUsize, slice::ChunksExactMut};

use anyhow::{Result, bail};

use crate::{
    error::{BlendError, Dimensions},
    util::planar_len,
};

/// The channel planes an image carries, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Gray = 1,
    GrayAlpha = 2,
    Rgb = 3,
    Rgba = 4,
}

impl TryFrom<usize> for ChannelLayout {
    type Error = anyhow::Error;

    fn try_from(val: usize) -> Result<Self> {
        Ok(match val {
            1 => Self::Gray,
            2 => Self::GrayAlpha,
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ => bail!("Invalid channel count, must be 1-4, got {val}."),
        })
    }
}

impl ChannelLayout {
    /// Total number of planes.
    #[must_use]
    pub const fn count(self) -> usize {
        self as usize
    }

    /// Number of planes the blend touches: luma, or red, green and blue.
    #[must_use]
    pub const fn color_channels(self) -> usize {
        match self {
            Self::Gray | Self::GrayAlpha => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }

    /// Index of the alpha plane, which is always stored last.
    #[must_use]
    pub const fn alpha_channel(self) -> Option<usize> {
        match self {
            Self::Gray | Self::Rgb => None,
            Self::GrayAlpha => Some(1),
            Self::Rgba => Some(3),
        }
    }
}

/// An image stored as consecutive channel planes of `width * height`
/// samples each, rather than interleaved per pixel.
///
/// Samples are `f32` in the 8-bit range `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarImage {
    width: NonZeroUsize,
    height: NonZeroUsize,
    layout: ChannelLayout,
    data: Vec<f32>,
}

impl PlanarImage {
    /// Wraps an existing planar buffer. The buffer must hold exactly
    /// `width * height * layout.count()` samples.
    pub fn from_planar(
        width: NonZeroUsize,
        height: NonZeroUsize,
        layout: ChannelLayout,
        data: Vec<f32>,
    ) -> Result<Self, BlendError> {
        let expected = Self::checked_len(width, height, layout)?;
        if data.len() != expected {
            return Err(BlendError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Allocates a zero-filled image, reporting allocation failure as an
    /// error instead of aborting the process.
    pub fn try_zeroed(
        width: NonZeroUsize,
        height: NonZeroUsize,
        layout: ChannelLayout,
    ) -> Result<Self, BlendError> {
        let samples = Self::checked_len(width, height, layout)?;
        let mut data = Vec::new();
        data.try_reserve_exact(samples)
            .map_err(|_| BlendError::Allocation { samples })?;
        data.resize(samples, 0.0);

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Builds an image by evaluating `f(channel, x, y)` for every sample.
    pub fn from_fn<F>(
        width: NonZeroUsize,
        height: NonZeroUsize,
        layout: ChannelLayout,
        mut f: F,
    ) -> Result<Self, BlendError>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let mut image = Self::try_zeroed(width, height, layout)?;
        let w = width.get();
        for (channel, plane) in image.planes_mut().enumerate() {
            for (offset, sample) in plane.iter_mut().enumerate() {
                *sample = f(channel, offset % w, offset / w);
            }
        }
        Ok(image)
    }

    fn checked_len(
        width: NonZeroUsize,
        height: NonZeroUsize,
        layout: ChannelLayout,
    ) -> Result<usize, BlendError> {
        planar_len(width, height, layout.count()).ok_or(BlendError::Allocation {
            samples: usize::MAX,
        })
    }

    #[must_use]
    pub const fn width(&self) -> NonZeroUsize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> NonZeroUsize {
        self.height
    }

    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width.get(),
            height: self.height.get(),
        }
    }

    #[must_use]
    pub const fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Number of samples in a single channel plane.
    #[must_use]
    pub const fn plane_len(&self) -> usize {
        self.width.get() * self.height.get()
    }

    /// The samples of one channel plane, in row-major order.
    ///
    /// # Panics
    /// Panics if `index` is not below the layout's channel count.
    #[must_use]
    pub fn channel(&self, index: usize) -> &[f32] {
        assert!(index < self.layout.count(), "channel {index} out of range");
        let len = self.plane_len();
        &self.data[index * len..(index + 1) * len]
    }

    /// Mutable access to one channel plane.
    ///
    /// # Panics
    /// Panics if `index` is not below the layout's channel count.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        assert!(index < self.layout.count(), "channel {index} out of range");
        let len = self.plane_len();
        &mut self.data[index * len..(index + 1) * len]
    }

    /// One row of one channel plane.
    #[must_use]
    pub fn row(&self, channel: usize, y: usize) -> &[f32] {
        let width = self.width.get();
        &self.channel(channel)[y * width..(y + 1) * width]
    }

    #[must_use]
    pub fn sample(&self, channel: usize, x: usize, y: usize) -> f32 {
        self.row(channel, y)[x]
    }

    /// Iterates over the channel planes as disjoint mutable slices.
    pub fn planes_mut(&mut self) -> ChunksExactMut<'_, f32> {
        let len = self.plane_len();
        self.data.chunks_exact_mut(len)
    }

    /// The whole planar buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[must_use]
    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }
}
