use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Result;
use blacken::{BlendConfig, RemainderPolicy, app};
use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(
    name = "blacken",
    version,
    about = "Blacken-mode blend of two images, split into row bands across worker threads"
)]
struct Cli {
    /// Source image path
    #[arg(long = "source", value_hint = ValueHint::FilePath)]
    source: Option<PathBuf>,
    /// Help (background) image path
    #[arg(long = "help-image", value_hint = ValueHint::FilePath)]
    help_image: Option<PathBuf>,
    /// Destination image path
    #[arg(long = "dest", value_hint = ValueHint::FilePath)]
    dest: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 'j', long = "workers")]
    workers: Option<NonZeroUsize>,
    /// Number of times the whole blend is repeated
    #[arg(short = 'r', long = "repetitions")]
    repetitions: Option<NonZeroUsize>,
    /// Rows left over when the height isn't a multiple of the worker count:
    /// truncate or extend-last
    #[arg(long = "remainder")]
    remainder: Option<RemainderPolicy>,
}

fn build_config(cli: Cli) -> BlendConfig {
    let defaults = BlendConfig::default();
    BlendConfig {
        source_path: cli.source.unwrap_or(defaults.source_path),
        help_path: cli.help_image.unwrap_or(defaults.help_path),
        dest_path: cli.dest.unwrap_or(defaults.dest_path),
        workers: cli.workers.unwrap_or(defaults.workers),
        repetitions: cli.repetitions.unwrap_or(defaults.repetitions),
        remainder: cli.remainder.unwrap_or(defaults.remainder),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cfg = build_config(Cli::parse());

    let stats = app::run(&cfg)?;
    println!("Final execution time = {:.6}", stats.elapsed.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "allow in test files")]

    use super::*;

    #[test]
    fn no_flags_keeps_defaults() {
        let cfg = build_config(Cli::parse_from(["blacken"]));

        assert_eq!(cfg, BlendConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = build_config(Cli::parse_from([
            "blacken",
            "--source",
            "a.png",
            "--help-image",
            "b.png",
            "--dest",
            "c.png",
            "-j",
            "3",
            "-r",
            "2",
            "--remainder",
            "truncate",
        ]));

        assert_eq!(cfg.source_path, PathBuf::from("a.png"));
        assert_eq!(cfg.help_path, PathBuf::from("b.png"));
        assert_eq!(cfg.dest_path, PathBuf::from("c.png"));
        assert_eq!(cfg.workers.get(), 3);
        assert_eq!(cfg.repetitions.get(), 2);
        assert_eq!(cfg.remainder, RemainderPolicy::Truncate);
    }

    #[test]
    fn zero_workers_are_rejected() {
        assert!(Cli::try_parse_from(["blacken", "--workers", "0"]).is_err());
    }
}
