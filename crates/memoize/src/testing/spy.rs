//! Call-recording spy
//!
//! Wraps a function and records the argument list of every invocation, so
//! tests can assert how often (and with what) a memoized function really ran.

use std::sync::Arc;

use parking_lot::Mutex;

type CallLog<A> = Arc<Mutex<Vec<Vec<A>>>>;

/// Records invocations of the functions it wraps
///
/// Clones share one log.
///
/// # Examples
///
/// ```
/// use tiny_memoize::testing::CallSpy;
///
/// let spy = CallSpy::new();
/// let add = spy.wrap(|args: &[i32]| args.iter().sum::<i32>());
///
/// assert_eq!(add(&[1, 2, 3]), 6);
/// assert!(spy.called_with_exactly(&[1, 2, 3]));
/// assert_eq!(spy.call_count(), 1);
/// ```
#[derive(Debug)]
pub struct CallSpy<A> {
    calls: CallLog<A>,
}

impl<A> Clone for CallSpy<A> {
    fn clone(&self) -> Self {
        Self { calls: Arc::clone(&self.calls) }
    }
}

impl<A> Default for CallSpy<A> {
    fn default() -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl<A> CallSpy<A>
where
    A: Clone + Send + 'static,
{
    /// Create a spy with an empty call log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call
    pub fn record(&self, args: &[A]) {
        self.calls.lock().push(args.to_vec());
    }

    /// Wrap a context-free function
    pub fn wrap<R, F>(&self, func: F) -> impl Fn(&[A]) -> R + Send + Sync + 'static
    where
        F: Fn(&[A]) -> R + Send + Sync + 'static,
    {
        let spy = self.clone();
        move |args: &[A]| {
            spy.record(args);
            func(args)
        }
    }

    /// Wrap a function that receives a calling context
    pub fn wrap_with_context<C, R, F>(
        &self,
        func: F,
    ) -> impl Fn(&C, &[A]) -> R + Send + Sync + 'static
    where
        C: 'static,
        F: Fn(&C, &[A]) -> R + Send + Sync + 'static,
    {
        let spy = self.clone();
        move |ctx: &C, args: &[A]| {
            spy.record(args);
            func(ctx, args)
        }
    }

    /// Number of recorded calls
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Check if the spy was never called
    pub fn not_called(&self) -> bool {
        self.call_count() == 0
    }

    /// All recorded argument lists, oldest first
    pub fn calls(&self) -> Vec<Vec<A>> {
        self.calls.lock().clone()
    }

    /// Argument list of the most recent call
    pub fn last_call(&self) -> Option<Vec<A>> {
        self.calls.lock().last().cloned()
    }

    /// Check if any call received exactly `args`, same length and order
    pub fn called_with_exactly(&self, args: &[A]) -> bool
    where
        A: PartialEq,
    {
        self.calls.lock().iter().any(|call| call.as_slice() == args)
    }

    /// Forget all recorded calls
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::spy.
    use super::*;

    #[test]
    fn test_spy_records_calls() {
        let spy = CallSpy::new();
        let echo = spy.wrap(|args: &[&str]| args.len());

        assert!(spy.not_called());
        echo(&["a", "b", "c"]);
        echo(&[]);

        assert_eq!(spy.call_count(), 2);
        assert_eq!(spy.calls(), vec![vec!["a", "b", "c"], vec![]]);
        assert_eq!(spy.last_call(), Some(vec![]));
    }

    /// Validates exact matching.
    ///
    /// Assertions:
    /// - Ensures a prefix or reordering does not count as an exact match.
    #[test]
    fn test_called_with_exactly() {
        let spy = CallSpy::new();
        let echo = spy.wrap(|args: &[&str]| args.len());
        echo(&["a", "b", "c"]);

        assert!(spy.called_with_exactly(&["a", "b", "c"]));
        assert!(!spy.called_with_exactly(&["a", "b"]));
        assert!(!spy.called_with_exactly(&["c", "b", "a"]));
    }

    #[test]
    fn test_spy_with_context() {
        let spy = CallSpy::new();
        let scaled = spy.wrap_with_context(|factor: &i32, args: &[i32]| args[0] * factor);

        assert_eq!(scaled(&3, &[5]), 15);
        assert!(spy.called_with_exactly(&[5]));
    }

    #[test]
    fn test_spy_clones_share_log_and_reset() {
        let spy = CallSpy::new();
        let other = spy.clone();
        other.record(&[1_u8]);

        assert_eq!(spy.call_count(), 1);
        spy.reset();
        assert!(other.not_called());
    }
}
