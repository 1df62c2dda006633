//! Argument-list comparison strategies
//!
//! A [`Reconciler`] decides whether a freshly supplied argument list should
//! reuse the result stored for an earlier one. Any
//! `Fn(&[A], &[A]) -> bool` closure is a reconciler; [`PositionalEq`] is the
//! default.

use std::sync::Arc;

/// Predicate deciding whether two argument lists share a cache entry
///
/// `supplied` is the argument list of the current call, `stored` the
/// snapshot kept in the cache.
///
/// The cache is borrowed while a reconciler runs. A reconciler may read the
/// wrapper it belongs to (`len`, `stats`, `cached_arguments`) but must not
/// call it or `clear` it: that panics with a `BorrowMutError`.
pub trait Reconciler<A>: Send + Sync {
    /// Returns true when `supplied` should be answered from `stored`
    fn reconcile(&self, supplied: &[A], stored: &[A]) -> bool;
}

impl<A, F> Reconciler<A> for F
where
    F: Fn(&[A], &[A]) -> bool + Send + Sync,
{
    fn reconcile(&self, supplied: &[A], stored: &[A]) -> bool {
        self(supplied, stored)
    }
}

/// Default strategy: position-wise equality over the stored snapshot.
///
/// Every position of `stored` must equal the same position of `supplied`.
/// Positions only present in `supplied` are not inspected, so an empty
/// stored snapshot matches any call.
///
/// # Example
/// ```
/// use tiny_memoize::{PositionalEq, Reconciler};
///
/// assert!(PositionalEq.reconcile(&[1, 2], &[1, 2]));
/// assert!(PositionalEq.reconcile(&[1, 2, 3], &[1, 2]));
/// assert!(!PositionalEq.reconcile(&[1], &[1, 2]));
/// assert!(PositionalEq.reconcile(&[7, 8, 9], &[]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalEq;

impl<A> Reconciler<A> for PositionalEq
where
    A: PartialEq,
{
    fn reconcile(&self, supplied: &[A], stored: &[A]) -> bool {
        stored.iter().enumerate().all(|(i, arg)| supplied.get(i) == Some(arg))
    }
}

/// Positional comparison by pointer identity instead of value equality.
///
/// Same prefix semantics as [`PositionalEq`], but two `Arc`s only match when
/// they point at the same allocation.
pub fn identity<T: ?Sized>(supplied: &[Arc<T>], stored: &[Arc<T>]) -> bool {
    stored
        .iter()
        .enumerate()
        .all(|(i, arg)| supplied.get(i).is_some_and(|candidate| Arc::ptr_eq(candidate, arg)))
}

/// Either the default strategy or a caller-supplied one.
///
/// Built from an `Option` so a missing reconciler falls back to
/// [`PositionalEq`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<Q> {
    /// [`PositionalEq`]
    Positional,
    /// Caller-supplied reconciler
    Custom(Q),
}

impl<Q> Default for Strategy<Q> {
    fn default() -> Self {
        Self::Positional
    }
}

impl<Q> From<Option<Q>> for Strategy<Q> {
    fn from(reconciler: Option<Q>) -> Self {
        reconciler.map_or(Self::Positional, Self::Custom)
    }
}

impl<A, Q> Reconciler<A> for Strategy<Q>
where
    A: PartialEq,
    Q: Reconciler<A>,
{
    fn reconcile(&self, supplied: &[A], stored: &[A]) -> bool {
        match self {
            Self::Positional => PositionalEq.reconcile(supplied, stored),
            Self::Custom(reconciler) => reconciler.reconcile(supplied, stored),
        }
    }
}
