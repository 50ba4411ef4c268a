//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (fixed-step accumulator shared by every host)
//! - Frame statistics
//! - The browser bridge (wasm32 only)

pub mod stats;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use stats::{EntityCounts, FrameStats};
pub use time::FixedStep;
