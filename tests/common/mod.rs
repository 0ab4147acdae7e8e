#![allow(dead_code)]

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use anyhow::Result;
use blacken::{ChannelLayout, PlanarImage, codec};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

/// A scratch directory under the system temp dir, removed on drop.
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub fn new(name: &str) -> Result<Self> {
        let dir = std::env::temp_dir().join(format!("blacken_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Random 8-bit samples in every plane, reproducible from `seed`.
pub fn noise(width: usize, height: usize, layout: ChannelLayout, seed: u8) -> PlanarImage {
    let mut rng = Xoshiro128StarStar::from_seed([seed; 16]);
    PlanarImage::from_fn(
        NonZeroUsize::new(width).expect("non-zero width"),
        NonZeroUsize::new(height).expect("non-zero height"),
        layout,
        |_, _, _| f32::from(rng.random::<u8>()),
    )
    .expect("allocates")
}

/// A horizontal gradient in every color plane, offset per channel.
pub fn gradient(width: usize, height: usize, layout: ChannelLayout) -> PlanarImage {
    PlanarImage::from_fn(
        NonZeroUsize::new(width).expect("non-zero width"),
        NonZeroUsize::new(height).expect("non-zero height"),
        layout,
        |c, x, _| ((x * 255 / width.max(2).saturating_sub(1) + c * 50) % 256) as f32,
    )
    .expect("allocates")
}

pub fn write(image: &PlanarImage, path: &Path) -> Result<()> {
    codec::save(image, path)?;
    Ok(())
}
