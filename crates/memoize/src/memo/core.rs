//! Memoized function wrappers
//!
//! [`Memoized`] wraps an infallible function and caches every result.
//! [`FallibleMemoized`] wraps a function returning `Result` and caches only
//! the `Ok` values. Both share one engine: a bounded FIFO [`EntryList`]
//! behind a re-entrant lock.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, trace};

use super::config::{MaxSize, MemoizeConfig};
use super::entries::EntryList;
use super::reconcile::{PositionalEq, Reconciler};
use super::stats::{MemoStats, MetricsCollector};
use super::utils::MemoHealthReport;

type SharedFn<A, R, C> = Arc<dyn Fn(&C, &[A]) -> R + Send + Sync>;
type SharedReconciler<A> = Arc<dyn Reconciler<A>>;
type SharedEntries<A, V> = Arc<ReentrantMutex<RefCell<EntryList<A, V>>>>;

/// Cache engine shared by both wrapper flavours
struct MemoCore<A, V> {
    entries: SharedEntries<A, V>,
    reconciler: SharedReconciler<A>,
    config: MemoizeConfig,
    metrics: MetricsCollector,
}

impl<A, V> Clone for MemoCore<A, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            reconciler: Arc::clone(&self.reconciler),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<A, V> MemoCore<A, V> {
    fn new(config: MemoizeConfig, reconciler: SharedReconciler<A>) -> Self {
        Self {
            entries: Arc::new(ReentrantMutex::new(RefCell::new(EntryList::new(config.max_size)))),
            reconciler,
            config,
            metrics: MetricsCollector::new(),
        }
    }

    fn label(&self) -> &str {
        self.config.name.as_deref().unwrap_or("anonymous")
    }

    fn len(&self) -> usize {
        self.entries.lock().borrow().len()
    }

    fn clear(&self) {
        self.entries.lock().borrow_mut().clear();
        if self.config.track_metrics {
            self.metrics.reset();
        }
    }

    fn stats(&self) -> MemoStats {
        self.metrics.snapshot(self.len(), self.config.max_size.get())
    }

    fn record_evictions(&self, evicted: usize) {
        if evicted == 0 {
            return;
        }
        debug!(memo = self.label(), evicted, "Evicted oldest memoized entries");
        if self.config.track_metrics {
            self.metrics.record_evictions(evicted);
        }
    }
}

impl<A, V> MemoCore<A, V>
where
    A: Clone,
    V: Clone,
{
    /// Answer `supplied` from the cache or run `compute` and store its `Ok`
    /// value.
    ///
    /// The lock is held for the whole call, so calls from other threads wait
    /// while `compute` runs. The same thread may re-enter (recursive
    /// memoization): no `RefCell` borrow is held across `compute`.
    fn get_or_try_insert_with<E, F>(&self, supplied: &[A], compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let guard = self.entries.lock();

        let generation = {
            let entries = guard.borrow();
            if let Some(result) = entries.find(supplied, self.reconciler.as_ref()) {
                trace!(memo = self.label(), "Memoized call hit");
                if self.config.track_metrics {
                    self.metrics.record_hit();
                }
                return Ok(result.clone());
            }
            entries.generation()
        };

        trace!(memo = self.label(), arity = supplied.len(), "Memoized call miss");
        if self.config.track_metrics {
            self.metrics.record_miss();
        }

        let evicted = guard.borrow_mut().make_room();
        self.record_evictions(evicted);

        let result = compute()?;

        let mut entries = guard.borrow_mut();
        // Nested calls made by `compute` may have stored an equivalent entry
        // or filled the list in the meantime.
        if entries.generation() != generation
            && entries.find(supplied, self.reconciler.as_ref()).is_some()
        {
            return Ok(result);
        }
        let evicted = entries.make_room();
        entries.push(supplied.to_vec(), result.clone());
        drop(entries);

        self.record_evictions(evicted);
        if self.config.track_metrics {
            self.metrics.record_insert();
        }
        Ok(result)
    }

    fn cached_arguments(&self) -> Vec<Vec<A>> {
        self.entries.lock().borrow().arguments().map(<[A]>::to_vec).collect()
    }
}

/// A function wrapped with a bounded FIFO result cache
///
/// Results are keyed by argument list. When the cache already holds
/// `max_size` entries, a miss evicts the oldest-inserted entry before the
/// wrapped function runs. Hits never reorder entries.
///
/// `C` is the calling context handed to the wrapped function by
/// [`call_with`](Self::call_with). It is forwarded as-is and is not part of
/// the cache key.
///
/// Cloning shares the cache: both handles are the same memoized function.
///
/// # Example
/// ```
/// use tiny_memoize::memoize;
///
/// let square = memoize(|args: &[u64]| args[0] * args[0], 2);
/// assert_eq!(square.call(&[3]), 9);
/// assert_eq!(square.call(&[3]), 9); // answered from the cache
/// assert_eq!(square.len(), 1);
/// ```
pub struct Memoized<A, R, C = ()> {
    func: SharedFn<A, R, C>,
    core: MemoCore<A, R>,
}

impl<A, R, C> Memoized<A, R, C> {
    /// Number of cached argument lists
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Check if nothing is cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved maximum number of cached argument lists
    pub fn capacity(&self) -> usize {
        self.core.config.max_size.get()
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.core.clear();
    }

    /// Get call statistics
    pub fn stats(&self) -> MemoStats {
        self.core.stats()
    }

    /// Configuration this wrapper was built with
    pub fn config(&self) -> &MemoizeConfig {
        &self.core.config
    }

    /// Classify the current statistics
    pub fn health_report(&self) -> MemoHealthReport {
        MemoHealthReport::new(self.stats())
    }
}

impl<A, R, C> Memoized<A, R, C>
where
    A: Clone,
    R: Clone,
{
    /// Call with an explicit context
    ///
    /// On a miss the wrapped function receives `ctx` and `args` exactly as
    /// given. Panics in the wrapped function propagate and leave no entry.
    pub fn call_with(&self, ctx: &C, args: &[A]) -> R {
        let outcome = self
            .core
            .get_or_try_insert_with(args, || Ok::<R, Infallible>((self.func)(ctx, args)));
        match outcome {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Cached argument lists, oldest first
    pub fn cached_arguments(&self) -> Vec<Vec<A>> {
        self.core.cached_arguments()
    }
}

impl<A, R> Memoized<A, R, ()>
where
    A: Clone,
    R: Clone,
{
    /// Call a context-free memoized function
    pub fn call(&self, args: &[A]) -> R {
        self.call_with(&(), args)
    }
}

impl<A, R> Memoized<A, R, ()> {
    /// Start building a context-free memoized function
    pub fn builder<F>(func: F) -> MemoizedBuilder<A, R, ()>
    where
        F: Fn(&[A]) -> R + Send + Sync + 'static,
    {
        MemoizedBuilder::new(func)
    }
}

impl<A, R, C> Clone for Memoized<A, R, C> {
    fn clone(&self) -> Self {
        Self { func: Arc::clone(&self.func), core: self.core.clone() }
    }
}

impl<A, R, C> fmt::Debug for Memoized<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("config", &self.core.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A fallible function wrapped with a bounded FIFO cache of its successes
///
/// `Ok` values are cached like [`Memoized`] results. An `Err` is returned
/// unchanged and nothing is stored, so the next call with the same arguments
/// runs the function again.
///
/// # Example
/// ```
/// use tiny_memoize::Memoized;
///
/// let parse = Memoized::builder(|args: &[&str]| args[0].parse::<u32>())
///     .max_memoizations(4)
///     .build_fallible();
///
/// assert_eq!(parse.try_call(&["42"]), Ok(42));
/// assert!(parse.try_call(&["forty-two"]).is_err());
/// assert_eq!(parse.len(), 1);
/// ```
pub struct FallibleMemoized<A, T, E, C = ()> {
    func: SharedFn<A, Result<T, E>, C>,
    core: MemoCore<A, T>,
}

impl<A, T, E, C> FallibleMemoized<A, T, E, C> {
    /// Number of cached argument lists
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Check if nothing is cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved maximum number of cached argument lists
    pub fn capacity(&self) -> usize {
        self.core.config.max_size.get()
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.core.clear();
    }

    /// Get call statistics
    pub fn stats(&self) -> MemoStats {
        self.core.stats()
    }

    /// Configuration this wrapper was built with
    pub fn config(&self) -> &MemoizeConfig {
        &self.core.config
    }

    /// Classify the current statistics
    pub fn health_report(&self) -> MemoHealthReport {
        MemoHealthReport::new(self.stats())
    }
}

impl<A, T, E, C> FallibleMemoized<A, T, E, C>
where
    A: Clone,
    T: Clone,
{
    /// Call with an explicit context
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error unchanged.
    pub fn try_call_with(&self, ctx: &C, args: &[A]) -> Result<T, E> {
        self.core.get_or_try_insert_with(args, || (self.func)(ctx, args))
    }

    /// Cached argument lists, oldest first
    pub fn cached_arguments(&self) -> Vec<Vec<A>> {
        self.core.cached_arguments()
    }
}

impl<A, T, E> FallibleMemoized<A, T, E, ()>
where
    A: Clone,
    T: Clone,
{
    /// Call a context-free fallible memoized function
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error unchanged.
    pub fn try_call(&self, args: &[A]) -> Result<T, E> {
        self.try_call_with(&(), args)
    }
}

impl<A, T, E, C> Clone for FallibleMemoized<A, T, E, C> {
    fn clone(&self) -> Self {
        Self { func: Arc::clone(&self.func), core: self.core.clone() }
    }
}

impl<A, T, E, C> fmt::Debug for FallibleMemoized<A, T, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallibleMemoized")
            .field("config", &self.core.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Memoized`] and [`FallibleMemoized`]
///
/// `S` is the comparison strategy; it stays [`PositionalEq`] unless
/// [`reconciler`](Self::reconciler) or [`strategy`](Self::strategy) replaces
/// it.
///
/// # Example
/// ```
/// use tiny_memoize::MemoizedBuilder;
///
/// struct Person {
///     name: String,
/// }
///
/// let say = MemoizedBuilder::with_context(|person: &Person, args: &[&str]| {
///     format!("{} says, \"{}\"", person.name, args[0])
/// })
/// .max_memoizations(1)
/// .build();
///
/// let bob = Person { name: "Bob".to_string() };
/// assert_eq!(say.call_with(&bob, &["boo!"]), "Bob says, \"boo!\"");
/// ```
pub struct MemoizedBuilder<A, R, C, S = PositionalEq> {
    func: SharedFn<A, R, C>,
    config: MemoizeConfig,
    strategy: S,
}

impl<A, R> MemoizedBuilder<A, R, ()> {
    /// Wrap a context-free function
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[A]) -> R + Send + Sync + 'static,
    {
        Self::with_context(move |_: &(), args: &[A]| func(args))
    }
}

impl<A, R, C> MemoizedBuilder<A, R, C> {
    /// Wrap a function that receives the caller's context
    pub fn with_context<F>(func: F) -> Self
    where
        F: Fn(&C, &[A]) -> R + Send + Sync + 'static,
    {
        Self { func: Arc::new(func), config: MemoizeConfig::default(), strategy: PositionalEq }
    }
}

impl<A, R, C, S> MemoizedBuilder<A, R, C, S> {
    /// Set the maximum number of cached argument lists
    pub fn max_memoizations(mut self, hint: impl Into<MaxSize>) -> Self {
        self.config.max_size = hint.into();
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Label log events emitted by the wrapper
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: MemoizeConfig) -> Self {
        self.config = config;
        self
    }

    /// Compare argument lists with a closure `(supplied, stored) -> bool`
    pub fn reconciler<Q>(self, reconciler: Q) -> MemoizedBuilder<A, R, C, Q>
    where
        Q: Fn(&[A], &[A]) -> bool + Send + Sync + 'static,
    {
        self.strategy(reconciler)
    }

    /// Compare argument lists with any [`Reconciler`]
    pub fn strategy<Q>(self, strategy: Q) -> MemoizedBuilder<A, R, C, Q>
    where
        Q: Reconciler<A> + 'static,
    {
        MemoizedBuilder { func: self.func, config: self.config, strategy }
    }
}

impl<A, R, C, S> MemoizedBuilder<A, R, C, S>
where
    S: Reconciler<A> + 'static,
{
    /// Build the memoized function
    pub fn build(self) -> Memoized<A, R, C> {
        Memoized { func: self.func, core: MemoCore::new(self.config, Arc::new(self.strategy)) }
    }
}

impl<A, T, E, C, S> MemoizedBuilder<A, Result<T, E>, C, S>
where
    S: Reconciler<A> + 'static,
{
    /// Build a memoized function that only caches `Ok` results
    pub fn build_fallible(self) -> FallibleMemoized<A, T, E, C> {
        FallibleMemoized {
            func: self.func,
            core: MemoCore::new(self.config, Arc::new(self.strategy)),
        }
    }
}

impl<A, R, C, S> fmt::Debug for MemoizedBuilder<A, R, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedBuilder").field("config", &self.config).finish_non_exhaustive()
    }
}
