
use std::{
    mem,
    num::NonZeroUsize,
    thread,
    time::{Duration, Instant},
};

use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    band::{RemainderPolicy, RowBand, partition_rows},
    blend::blacken_row,
    config::BlendConfig,
    error::BlendError,
    planar::PlanarImage,
};

/// Lifecycle of a [`RowBandExecutor`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Idle,
    Validating,
    Failed,
    Running { repetition: usize },
    Done,
}

/// Timings and layout of a finished run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Occupied bands in row order.
    pub bands: SmallVec<[RowBand; 8]>,
    /// Wall-clock time of each repetition, fan-out to join.
    pub repetitions: Vec<Duration>,
    /// Wall-clock time of the whole repetition loop.
    pub elapsed: Duration,
}

impl RunStats {
    #[must_use]
    pub fn mean_repetition(&self) -> Duration {
        match u32::try_from(self.repetitions.len()) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(count) => self.elapsed / count,
        }
    }
}

/// The blended destination image, handed over after the final join.
#[derive(Debug, Clone)]
pub struct Blended {
    pub image: PlanarImage,
    pub stats: RunStats,
}

/// Runs the blend over a fixed pool of workers, one contiguous row band
/// each, and repeats the whole pass a fixed number of times.
///
/// Workers are spawned fresh for every repetition and joined before the
/// next one starts. Every repetition overwrites the destination with the
/// same values, so the output doesn't depend on the repetition count.
#[derive(Debug, Clone)]
pub struct RowBandExecutor {
    workers: NonZeroUsize,
    repetitions: NonZeroUsize,
    remainder: RemainderPolicy,
    state: ExecutorState,
}

impl RowBandExecutor {
    #[must_use]
    pub const fn new(
        workers: NonZeroUsize,
        repetitions: NonZeroUsize,
        remainder: RemainderPolicy,
    ) -> Self {
        Self {
            workers,
            repetitions,
            remainder,
            state: ExecutorState::Idle,
        }
    }

    #[must_use]
    pub const fn from_config(config: &BlendConfig) -> Self {
        Self::new(config.workers, config.repetitions, config.remainder)
    }

    #[must_use]
    pub const fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    #[must_use]
    pub const fn repetitions(&self) -> NonZeroUsize {
        self.repetitions
    }

    /// The state the last run ended in, or [`ExecutorState::Idle`] before
    /// the first run.
    #[must_use]
    pub const fn state(&self) -> ExecutorState {
        self.state
    }

    fn transition(&mut self, next: ExecutorState) {
        trace!("executor {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Blends `help` under `source` into a freshly allocated destination.
    ///
    /// Size checks happen before the destination is allocated and before any
    /// worker is spawned, so a mismatch leaves nothing behind.
    pub fn run(&mut self, source: &PlanarImage, help: &PlanarImage) -> Result<Blended, BlendError> {
        self.transition(ExecutorState::Validating);
        let result = self.run_validated(source, help);
        if result.is_err() {
            self.transition(ExecutorState::Failed);
        }
        result
    }

    fn run_validated(
        &mut self,
        source: &PlanarImage,
        help: &PlanarImage,
    ) -> Result<Blended, BlendError> {
        validate(source, help)?;

        let mut dest = PlanarImage::try_zeroed(source.width(), source.height(), source.layout())?;
        let bands = partition_rows(source.height(), self.workers, self.remainder);
        debug!(
            "blending {} {:?} with {} workers, {} repetitions, remainder {}",
            source.dimensions(),
            source.layout(),
            self.workers,
            self.repetitions,
            self.remainder
        );
        for band in &bands {
            trace!("{}", band);
        }

        let mut repetitions = Vec::new();
        let start = Instant::now();
        for repetition in 0..self.repetitions.get() {
            self.transition(ExecutorState::Running { repetition });
            let pass = Instant::now();
            run_repetition(&bands, source, help, &mut dest)?;
            let pass = pass.elapsed();
            trace!("repetition {} took {:?}", repetition, pass);
            repetitions.push(pass);
        }
        let elapsed = start.elapsed();

        self.transition(ExecutorState::Done);
        let stats = RunStats {
            bands,
            repetitions,
            elapsed,
        };
        debug!(
            "blend finished in {:?} ({:?} per repetition)",
            stats.elapsed,
            stats.mean_repetition()
        );

        Ok(Blended { image: dest, stats })
    }
}

/// Checks that `help` can be blended under `source`.
pub fn validate(source: &PlanarImage, help: &PlanarImage) -> Result<(), BlendError> {
    if source.width() != help.width() || source.height() != help.height() {
        return Err(BlendError::DimensionMismatch {
            source_size: source.dimensions(),
            help_size: help.dimensions(),
        });
    }

    let expected = source.layout().color_channels();
    let found = help.layout().color_channels();
    if found < expected {
        return Err(BlendError::ChannelMismatch { expected, found });
    }

    Ok(())
}

/// Everything one worker needs for one repetition: its band, read-only views
/// of the source and help planes over that band, and exclusive views of the
/// destination planes over the same rows.
struct BandTask<'a> {
    band: RowBand,
    source: SmallVec<[&'a [f32]; 3]>,
    help: SmallVec<[&'a [f32]; 3]>,
    dest: SmallVec<[&'a mut [f32]; 3]>,
    alpha: Option<(&'a [f32], &'a mut [f32])>,
}

impl BandTask<'_> {
    fn run(self) {
        for ((dest, source), help) in self.dest.into_iter().zip(self.source).zip(self.help) {
            blacken_row(dest, source, help);
        }
        if let Some((source, dest)) = self.alpha {
            dest.copy_from_slice(source);
        }
    }
}

/// Hands out the destination planes as disjoint per-band slices.
fn split_tasks<'a>(
    bands: &[RowBand],
    source: &'a PlanarImage,
    help: &'a PlanarImage,
    dest: &'a mut PlanarImage,
) -> SmallVec<[BandTask<'a>; 8]> {
    let width = source.width();
    let layout = source.layout();
    let colors = layout.color_channels();

    let mut tasks: SmallVec<[BandTask<'a>; 8]> = bands
        .iter()
        .filter(|band| !band.is_empty())
        .map(|&band| {
            let samples = band.samples(width);
            BandTask {
                band,
                source: (0..colors)
                    .map(|c| &source.channel(c)[samples.clone()])
                    .collect(),
                help: (0..colors).map(|c| &help.channel(c)[samples.clone()]).collect(),
                dest: SmallVec::new(),
                alpha: None,
            }
        })
        .collect();

    for (channel, plane) in dest.planes_mut().enumerate() {
        // Bands are sorted and disjoint, so each one is carved off the front
        // of what's left of the plane.
        let mut rest = plane;
        let mut consumed = 0;
        for task in &mut tasks {
            let samples = task.band.samples(width);
            let (_, tail) = mem::take(&mut rest).split_at_mut(samples.start - consumed);
            let (band_slice, tail) = tail.split_at_mut(samples.len());
            rest = tail;
            consumed = samples.end;

            if channel < colors {
                task.dest.push(band_slice);
            } else if layout.alpha_channel() == Some(channel) {
                task.alpha = Some((&source.channel(channel)[samples], band_slice));
            }
        }
    }

    tasks
}

/// One full pass: fan out a worker per non-empty band, then join them all.
fn run_repetition(
    bands: &[RowBand],
    source: &PlanarImage,
    help: &PlanarImage,
    dest: &mut PlanarImage,
) -> Result<(), BlendError> {
    let tasks = split_tasks(bands, source, help, dest);

    thread::scope(|scope| {
        let mut handles = SmallVec::<[_; 8]>::new();
        let mut spawn_error = None;
        for task in tasks {
            let band = task.band;
            let spawned = thread::Builder::new()
                .name(format!("blacken-{}", band.worker))
                .spawn_scoped(scope, move || task.run());
            match spawned {
                Ok(handle) => handles.push((band, handle)),
                Err(source) => {
                    spawn_error = Some(BlendError::Spawn { band, source });
                    break;
                }
            }
        }

        // Join every spawned worker before reporting anything.
        let mut result = spawn_error.map_or(Ok(()), Err);
        for (band, handle) in handles {
            if handle.join().is_err() && result.is_ok() {
                result = Err(BlendError::WorkerPanicked { band });
            }
        }
        result
    })
}
