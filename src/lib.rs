// Performance
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::inline_always)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::needless_collect)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_join)]
// Readability/Code Intention
#![warn(clippy::checked_conversions)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::mod_module_files)]
#![warn(clippy::needless_continue)]
#![warn(clippy::range_minus_one)]
#![warn(clippy::range_plus_one)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::tests_outside_test_module)]
// Correctness/Safety
#![deny(clippy::cfg_not_test)]
#![warn(clippy::dbg_macro)]
#![deny(clippy::debug_assert_with_mut_call)]
#![warn(clippy::large_stack_arrays)]
#![warn(clippy::mem_forget)]
#![warn(clippy::mut_mut)]
#![deny(clippy::non_send_fields_in_send_ty)]
#![deny(clippy::significant_drop_in_scrutinee)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unwrap_used)]
// Annoyances
#![allow(clippy::needless_range_loop)]
#![allow(clippy::uninlined_format_args)]
#![allow(unsafe_op_in_unsafe_fn)]

//! Planar "blacken" blend of a source image over a help image.
//!
//! The blend runs on a [`RowBandExecutor`](executor::RowBandExecutor), which
//! splits the image rows into one contiguous band per worker thread and
//! repeats the whole pass a fixed number of times so the run is long enough
//! to time.

pub mod app;
pub mod band;
pub mod blend;
pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod planar;
pub mod util;

pub use band::{RemainderPolicy, RowBand, partition_rows};
pub use config::BlendConfig;
pub use error::{BlendError, Dimensions};
pub use executor::{Blended, ExecutorState, RowBandExecutor, RunStats};
pub use planar::{ChannelLayout, PlanarImage};
