#![allow(clippy::unwrap_used, reason = "allow in test files")]

use std::num::NonZeroUsize;

use parameterized::parameterized;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;

fn bands(height: usize, workers: usize, policy: RemainderPolicy) -> SmallVec<[RowBand; 8]> {
    partition_rows(
        NonZeroUsize::new(height).unwrap(),
        NonZeroUsize::new(workers).unwrap(),
        policy,
    )
}

/// Checks the bands are non-empty, ordered, contiguous from row 0, and
/// disjoint, and returns the number of rows they cover.
fn covered_rows(bands: &[RowBand]) -> usize {
    let mut next = 0;
    for pair in bands.windows(2) {
        assert!(pair[0].worker < pair[1].worker);
    }
    for band in bands {
        assert!(!band.is_empty(), "empty {}", band);
        assert_eq!(band.start, next, "gap or overlap before {}", band);
        next = band.end();
    }
    next
}

#[test]
fn even_split_assigns_equal_bands() {
    let bands = bands(16, 8, RemainderPolicy::Truncate);

    assert_eq!(bands.len(), 8);
    for (k, band) in bands.iter().enumerate() {
        assert_eq!(band.rows(), 2 * k..2 * k + 2);
    }
}

#[test]
fn truncate_drops_remainder_rows() {
    // 17 rows over 8 workers: 2 rows each, row 16 belongs to nobody
    let bands = bands(17, 8, RemainderPolicy::Truncate);

    assert_eq!(covered_rows(&bands), 16);
    assert!(bands.iter().all(|band| band.count == 2));
    assert!(bands.iter().all(|band| !band.rows().contains(&16)));
}

#[test]
fn extend_last_absorbs_remainder_rows() {
    let bands = bands(17, 8, RemainderPolicy::ExtendLast);

    assert_eq!(covered_rows(&bands), 17);
    assert_eq!(bands[6].rows(), 12..14);
    assert_eq!(bands[7].rows(), 14..17);
}

#[test]
fn more_workers_than_rows() {
    let truncated = bands(3, 8, RemainderPolicy::Truncate);
    assert!(truncated.is_empty());

    let extended = bands(3, 8, RemainderPolicy::ExtendLast);
    assert_eq!(covered_rows(&extended), 3);
    assert_eq!(extended.len(), 1);
    assert_eq!(extended[0].worker, 7);
    assert_eq!(extended[0].rows(), 0..3);
}

#[test]
fn huge_worker_count_only_builds_occupied_bands() {
    let workers = NonZeroUsize::MAX;
    let height = NonZeroUsize::new(4).unwrap();

    let truncated = partition_rows(height, workers, RemainderPolicy::Truncate);
    assert!(truncated.is_empty());

    let extended = partition_rows(height, workers, RemainderPolicy::ExtendLast);
    assert_eq!(extended.len(), 1);
    assert_eq!(extended[0].worker, usize::MAX - 1);
    assert_eq!(extended[0].rows(), 0..4);
}

#[test]
fn single_worker_owns_everything() {
    for policy in [RemainderPolicy::Truncate, RemainderPolicy::ExtendLast] {
        let bands = bands(480, 1, policy);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].rows(), 0..480);
    }
}

#[parameterized(
    height  = { 1, 7, 8, 17, 100, 480, 1080, 1081 },
    workers = { 1, 7, 3,  8,   8,  16,    8,    8 },
)]
fn extend_last_covers_every_row(height: usize, workers: usize) {
    let bands = bands(height, workers, RemainderPolicy::ExtendLast);
    assert_eq!(bands.len(), workers);
    assert_eq!(covered_rows(&bands), height);
}

#[test]
fn band_samples_scale_by_width() {
    let band = RowBand {
        worker: 3,
        start: 6,
        count: 2,
    };
    let width = NonZeroUsize::new(10).unwrap();

    assert_eq!(band.samples(width), 60..80);
    assert_eq!(band.to_string(), "worker 3 rows [6, 8)");
}

#[test]
fn remainder_policy_parses() {
    assert_eq!(
        "truncate".parse::<RemainderPolicy>().unwrap(),
        RemainderPolicy::Truncate
    );
    assert_eq!(
        "extend-last".parse::<RemainderPolicy>().unwrap(),
        RemainderPolicy::ExtendLast
    );
    assert!("last".parse::<RemainderPolicy>().is_err());
    assert_eq!(RemainderPolicy::default().to_string(), "extend-last");
}

#[quickcheck]
fn divisible_heights_partition_exactly(rows_per_worker: u8, workers: u8) -> TestResult {
    if rows_per_worker == 0 || workers == 0 {
        return TestResult::discard();
    }

    let workers = workers as usize;
    let height = rows_per_worker as usize * workers;

    let truncated = bands(height, workers, RemainderPolicy::Truncate);
    let extended = bands(height, workers, RemainderPolicy::ExtendLast);

    TestResult::from_bool(
        covered_rows(&truncated) == height && truncated == extended,
    )
}

#[quickcheck]
fn any_height_partitions_without_overlap(height: u16, workers: u8) -> TestResult {
    if height == 0 || workers == 0 {
        return TestResult::discard();
    }

    let height = height as usize;
    let workers = workers as usize;
    let truncated = bands(height, workers, RemainderPolicy::Truncate);
    let extended = bands(height, workers, RemainderPolicy::ExtendLast);

    TestResult::from_bool(
        covered_rows(&truncated) == workers * (height / workers)
            && covered_rows(&extended) == height,
    )
}
