#[cfg(test)]
mod tests;

use std::{fmt, num::NonZeroUsize, ops::Range, str::FromStr};

use anyhow::{Result, bail};
use smallvec::SmallVec;

/// What happens to the trailing `height % workers` rows when the image
/// height isn't a multiple of the worker count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Leftover rows are never processed and stay zero in the destination.
    /// Produces the same output as the classic fixed-band layout.
    Truncate,
    /// The last band absorbs the leftover rows, so every row is blended.
    #[default]
    ExtendLast,
}

impl FromStr for RemainderPolicy {
    type Err = anyhow::Error;

    fn from_str(val: &str) -> Result<Self> {
        Ok(match val {
            "truncate" => Self::Truncate,
            "extend-last" => Self::ExtendLast,
            _ => bail!("Invalid value for 'remainder', must be truncate or extend-last, got {val}."),
        })
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Truncate => "truncate",
            Self::ExtendLast => "extend-last",
        })
    }
}

/// A contiguous half-open range of rows `[start, start + count)` owned by
/// exactly one worker for the duration of a repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowBand {
    pub worker: usize,
    pub start: usize,
    pub count: usize,
}

impl RowBand {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub const fn rows(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The range of flattened sample offsets this band covers inside one
    /// channel plane of the given row width.
    #[must_use]
    pub const fn samples(&self, width: NonZeroUsize) -> Range<usize> {
        self.start * width.get()..self.end() * width.get()
    }
}

impl fmt::Display for RowBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker {} rows [{}, {})", self.worker, self.start, self.end())
    }
}

/// Splits `height` rows into one band per worker.
///
/// Worker `k` is assigned `[k * rows_per_worker, (k + 1) * rows_per_worker)`
/// with `rows_per_worker = height / workers`. Only non-empty bands are
/// returned, in ascending row order, so the result never holds more than
/// `min(workers, height)` bands. When there are more workers than rows every
/// regular band is empty and only the last worker can own rows.
///
/// With [`RemainderPolicy::ExtendLast`] the bands cover `[0, height)` exactly.
/// With [`RemainderPolicy::Truncate`] they cover `[0, workers * rows_per_worker)`
/// and the remaining rows belong to no band.
#[must_use]
pub fn partition_rows(
    height: NonZeroUsize,
    workers: NonZeroUsize,
    policy: RemainderPolicy,
) -> SmallVec<[RowBand; 8]> {
    let height = height.get();
    let workers = workers.get();
    let rows_per_worker = height / workers;
    let last_worker = workers - 1;

    // A non-zero band size implies workers <= height
    let regular = if rows_per_worker == 0 { 0 } else { workers };
    let mut bands: SmallVec<[RowBand; 8]> = (0..regular)
        .map(|worker| RowBand {
            worker,
            start: worker * rows_per_worker,
            count: rows_per_worker,
        })
        .collect();

    if policy == RemainderPolicy::ExtendLast {
        match bands.last_mut() {
            Some(last) => last.count = height - last.start,
            None => bands.push(RowBand {
                worker: last_worker,
                start: 0,
                count: height,
            }),
        }
    }

    bands
}
