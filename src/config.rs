
use std::{num::NonZeroUsize, path::PathBuf};

use crate::band::RemainderPolicy;

pub const DEFAULT_SOURCE: &str = "bailarina.bmp";
pub const DEFAULT_HELP: &str = "background_V.bmp";
pub const DEFAULT_DEST: &str = "result.bmp";

// SAFETY: the int value of these constants can never be zero
pub const DEFAULT_WORKERS: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(8) };
// SAFETY: the int value of these constants can never be zero
pub const DEFAULT_REPETITIONS: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(17) };

/// Everything a blend run needs: where the images live, how many workers
/// share the rows, and how many times the pass is repeated for timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendConfig {
    pub source_path: PathBuf,
    pub help_path: PathBuf,
    pub dest_path: PathBuf,
    pub workers: NonZeroUsize,
    pub repetitions: NonZeroUsize,
    pub remainder: RemainderPolicy,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
            help_path: PathBuf::from(DEFAULT_HELP),
            dest_path: PathBuf::from(DEFAULT_DEST),
            workers: DEFAULT_WORKERS,
            repetitions: DEFAULT_REPETITIONS,
            remainder: RemainderPolicy::default(),
        }
    }
}
