//! Testing utilities and helpers
//!
//! - **[`spy`]**: records every call made to a wrapped function
//!
//! ## Usage
//!
//! ```rust
//! use tiny_memoize::memoize;
//! use tiny_memoize::testing::CallSpy;
//!
//! let spy = CallSpy::new();
//! let memo = memoize(spy.wrap(|args: &[&str]| args[0].len()), 1);
//!
//! memo.call(&["a"]);
//! memo.call(&["a"]);
//! assert_eq!(spy.call_count(), 1);
//! ```

pub mod spy;

pub use spy::CallSpy;
