//! Bounded FIFO memoization of arbitrary functions
//!
//! Wrap a function and repeated calls with an equivalent argument list are
//! answered from a cache instead of running the function again.
//!
//! # Features
//!
//! - **Bounded**: at most `max_memoizations` distinct argument lists are kept
//! - **FIFO eviction**: the oldest-inserted entry goes first; hits never
//!   reorder
//! - **Pluggable comparison**: positional equality by default, any
//!   `(supplied, stored) -> bool` closure otherwise
//! - **Permissive construction**: size hints are normalised, never rejected
//! - **Thread-safe**: one lock per wrapper, re-entrant for recursive functions
//! - **Metrics tracking**: optional hit/miss/eviction statistics
//!
//! # Examples
//!
//! ## Simple memoization
//! ```
//! use tiny_memoize::memoize;
//!
//! let shout = memoize(|args: &[&str]| args.join(" ").to_uppercase(), 3);
//! assert_eq!(shout.call(&["hello", "world"]), "HELLO WORLD");
//! ```
//!
//! ## Custom reconciler
//! ```
//! use tiny_memoize::memoize_with_reconciler;
//!
//! #[derive(Clone, PartialEq)]
//! struct Person {
//!     id: u32,
//!     given_name: String,
//! }
//!
//! let same_person = |supplied: &[Person], stored: &[Person]| supplied[0].id == stored[0].id;
//! let greet = memoize_with_reconciler(
//!     |args: &[Person]| format!("Hi, {}!", args[0].given_name),
//!     1,
//!     Some(same_person),
//! );
//!
//! let janine = Person { id: 845739, given_name: "Janine".to_string() };
//! assert_eq!(greet.call(&[janine]), "Hi, Janine!");
//! ```
//!
//! ## Calling context
//! ```
//! use tiny_memoize::MemoizedBuilder;
//!
//! struct Counter {
//!     step: u32,
//! }
//!
//! let advance = MemoizedBuilder::with_context(|counter: &Counter, args: &[u32]| {
//!     args[0] + counter.step
//! })
//! .max_memoizations(8)
//! .build();
//!
//! assert_eq!(advance.call_with(&Counter { step: 5 }, &[1]), 6);
//! ```
//!
//! # Comparison semantics
//!
//! The default [`PositionalEq`] walks the *stored* snapshot and requires
//! every position to equal the supplied argument at the same index. Extra
//! supplied arguments are ignored, so an entry stored for an empty argument
//! list answers every later call.
//!
//! Lookups scan entries in insertion order. Reconcilers are arbitrary
//! predicates and cannot be hash-indexed, so the scan is linear; keep
//! `max_memoizations` small.

mod config;
mod core;
mod entries;
mod reconcile;
mod stats;
pub mod utils;

// Re-export public API
pub use self::core::{FallibleMemoized, Memoized, MemoizedBuilder};

pub use config::{MaxSize, MemoizeConfig, MemoizeConfigBuilder};
pub use reconcile::{identity, PositionalEq, Reconciler, Strategy};
pub use stats::MemoStats;

/// Memoize `func`, keeping up to `max_memoizations` distinct argument lists
///
/// Any size hint is accepted; see [`MaxSize`] for how it is normalised.
/// Argument lists are compared with [`PositionalEq`].
pub fn memoize<A, R, F>(func: F, max_memoizations: impl Into<MaxSize>) -> Memoized<A, R>
where
    A: PartialEq,
    F: Fn(&[A]) -> R + Send + Sync + 'static,
{
    Memoized::builder(func).max_memoizations(max_memoizations).build()
}

/// Memoize `func` with an optional reconciler
///
/// `None` falls back to [`PositionalEq`]. A reconciler receives the supplied
/// argument list first and the stored snapshot second.
pub fn memoize_with_reconciler<A, R, F, Q>(
    func: F,
    max_memoizations: impl Into<MaxSize>,
    reconciler: Option<Q>,
) -> Memoized<A, R>
where
    A: PartialEq,
    F: Fn(&[A]) -> R + Send + Sync + 'static,
    Q: Fn(&[A], &[A]) -> bool + Send + Sync + 'static,
{
    Memoized::builder(func)
        .max_memoizations(max_memoizations)
        .strategy(Strategy::from(reconciler))
        .build()
}
