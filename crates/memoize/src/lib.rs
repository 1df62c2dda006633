//! Bounded FIFO memoization for arbitrary functions.
//!
//! [`memoize`] wraps a function so that repeated calls with an equivalent
//! argument list reuse the earlier result. The cache holds a fixed number of
//! argument lists and drops the oldest-inserted one when full.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `config` (default): load [`MemoizeConfig`] from TOML
//! - `test-utils`: the [`testing`] module with a call-recording spy

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
pub mod memo;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use error::{MemoizeError, MemoizeResult};
pub use memo::utils::{MemoHealth, MemoHealthReport};
pub use memo::{
    identity, memoize, memoize_with_reconciler, FallibleMemoized, MaxSize, MemoStats,
    MemoizeConfig, MemoizeConfigBuilder, Memoized, MemoizedBuilder, PositionalEq, Reconciler,
    Strategy,
};
