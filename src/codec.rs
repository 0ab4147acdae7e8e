
use std::{num::NonZeroUsize, path::Path};

use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, Pixel, RgbImage, RgbaImage};
use log::debug;

use crate::{
    error::{BlendError, Dimensions},
    planar::{ChannelLayout, PlanarImage},
    util::sample_to_u8,
};

/// Fails with [`BlendError::MissingInput`] naming every path that isn't an
/// existing file.
pub fn ensure_inputs_exist(paths: &[&Path]) -> Result<(), BlendError> {
    let missing: Vec<_> = paths
        .iter()
        .filter(|path| !path.is_file())
        .map(|path| path.to_path_buf())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BlendError::MissingInput { paths: missing })
    }
}

/// Picks the planar layout matching a decoded image's channels.
#[must_use]
pub fn layout_of(image: &DynamicImage) -> ChannelLayout {
    let color = image.color();
    match (color.has_color(), color.has_alpha()) {
        (false, false) => ChannelLayout::Gray,
        (false, true) => ChannelLayout::GrayAlpha,
        (true, false) => ChannelLayout::Rgb,
        (true, true) => ChannelLayout::Rgba,
    }
}

fn decode(path: &Path) -> Result<DynamicImage, BlendError> {
    image::open(path).map_err(|source| BlendError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes an image file into planar samples, keeping its own layout.
pub fn load(path: &Path) -> Result<PlanarImage, BlendError> {
    let image = decode(path)?;
    let layout = layout_of(&image);
    from_dynamic(&image, layout)
}

/// Decodes an image file and converts it to `layout`.
pub fn load_as(path: &Path, layout: ChannelLayout) -> Result<PlanarImage, BlendError> {
    let image = decode(path)?;
    from_dynamic(&image, layout)
}

/// Loads the source image and the help image in the source's layout.
///
/// Both files are checked for existence before either is decoded.
pub fn load_pair(
    source_path: &Path,
    help_path: &Path,
) -> Result<(PlanarImage, PlanarImage), BlendError> {
    ensure_inputs_exist(&[source_path, help_path])?;

    let source = load(source_path)?;
    let help = load_as(help_path, source.layout())?;
    debug!(
        "loaded source '{}' ({} {:?}) and help '{}' ({})",
        source_path.display(),
        source.dimensions(),
        source.layout(),
        help_path.display(),
        help.dimensions()
    );

    Ok((source, help))
}

/// Converts a decoded image to 8-bit `layout` and splits it into planes.
pub fn from_dynamic(image: &DynamicImage, layout: ChannelLayout) -> Result<PlanarImage, BlendError> {
    match layout {
        ChannelLayout::Gray => deinterleave(&image.to_luma8(), layout),
        ChannelLayout::GrayAlpha => deinterleave(&image.to_luma_alpha8(), layout),
        ChannelLayout::Rgb => deinterleave(&image.to_rgb8(), layout),
        ChannelLayout::Rgba => deinterleave(&image.to_rgba8(), layout),
    }
}

fn deinterleave<P>(buffer: &ImageBuffer<P, Vec<u8>>, layout: ChannelLayout) -> Result<PlanarImage, BlendError>
where
    P: Pixel<Subpixel = u8>,
{
    let dimensions = Dimensions {
        width: buffer.width() as usize,
        height: buffer.height() as usize,
    };
    let (Some(width), Some(height)) = (
        NonZeroUsize::new(dimensions.width),
        NonZeroUsize::new(dimensions.height),
    ) else {
        return Err(BlendError::Empty { dimensions });
    };

    let channels = layout.count();
    let mut planar = PlanarImage::try_zeroed(width, height, layout)?;
    let raw = buffer.as_raw();
    for (channel, plane) in planar.planes_mut().enumerate() {
        for (sample, pixel) in plane.iter_mut().zip(raw.chunks_exact(channels)) {
            *sample = f32::from(pixel[channel]);
        }
    }

    Ok(planar)
}

/// Interleaves the planes back into an 8-bit image of the same layout.
pub fn to_dynamic(image: &PlanarImage) -> Result<DynamicImage, BlendError> {
    let dimensions = image.dimensions();
    let too_large = || BlendError::TooLarge { dimensions };
    let width = u32::try_from(dimensions.width).map_err(|_| too_large())?;
    let height = u32::try_from(dimensions.height).map_err(|_| too_large())?;

    let channels = image.layout().count();
    let mut raw = vec![0u8; image.plane_len() * channels];
    for channel in 0..channels {
        for (pixel, &sample) in raw.chunks_exact_mut(channels).zip(image.channel(channel)) {
            pixel[channel] = sample_to_u8(sample);
        }
    }

    let expected = raw.len();
    let size_error = || BlendError::BufferSize {
        expected,
        actual: image.as_slice().len(),
    };
    Ok(match image.layout() {
        ChannelLayout::Gray => {
            DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, raw).ok_or_else(size_error)?)
        }
        ChannelLayout::GrayAlpha => DynamicImage::ImageLumaA8(
            GrayAlphaImage::from_raw(width, height, raw).ok_or_else(size_error)?,
        ),
        ChannelLayout::Rgb => {
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, raw).ok_or_else(size_error)?)
        }
        ChannelLayout::Rgba => {
            DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, raw).ok_or_else(size_error)?)
        }
    })
}

/// Encodes `image` to `path`, choosing the format from the file extension.
pub fn save(image: &PlanarImage, path: &Path) -> Result<(), BlendError> {
    to_dynamic(image)?
        .save(path)
        .map_err(|source| BlendError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("saved {} to '{}'", image.dimensions(), path.display());
    Ok(())
}
