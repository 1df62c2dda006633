//! Integration tests for concurrent use of memoized functions
//!
//! A wrapper serialises its calls, so concurrent identical calls run the
//! wrapped function once and the bound holds under contention.

#![cfg(feature = "test-utils")]

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tiny_memoize::testing::CallSpy;
use tiny_memoize::{memoize, Memoized};

/// Verifies that threads racing on one argument list invoke the function once.
///
/// # Test Steps
/// 1. Wrap a slow function with a spy
/// 2. Release 8 threads at once, all calling with the same argument
/// 3. Verify every thread got the same result and the spy saw one call
#[test]
fn test_concurrent_identical_calls_invoke_once() {
    let spy = CallSpy::new();
    let slow_square = memoize(
        spy.wrap(|args: &[u64]| {
            thread::sleep(Duration::from_millis(20));
            args[0] * args[0]
        }),
        4,
    );
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let memo = slow_square.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                memo.call(&[12])
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 144);
    }
    assert_eq!(spy.call_count(), 1);
}

/// Validates that the bound holds when many threads insert distinct keys.
///
/// Assertions:
/// - Size never exceeds the bound once all threads finish.
/// - Every call either hit or invoked the function.
#[test]
fn test_bound_holds_under_contention() {
    let spy = CallSpy::new();
    let memo: Memoized<u32, u32> = Memoized::builder(spy.wrap(|args: &[u32]| args[0] + 1))
        .max_memoizations(5)
        .track_metrics(true)
        .build();

    let handles: Vec<_> = (0..4_u32)
        .map(|t| {
            let memo = memo.clone();
            thread::spawn(move || {
                for i in 0..50_u32 {
                    assert_eq!(memo.call(&[(i + t) % 12]), (i + t) % 12 + 1);
                    assert!(memo.len() <= 5);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = memo.stats();
    assert!(stats.size <= 5);
    assert_eq!(stats.total_calls(), 200);
    assert_eq!(stats.misses, spy.call_count() as u64);
}

/// Verifies that separately created wrappers never share entries.
#[test]
fn test_independent_wrappers_do_not_share() {
    let spy = CallSpy::new();
    let first = memoize(spy.wrap(|args: &[u8]| args[0]), 2);
    let second = memoize(spy.wrap(|args: &[u8]| args[0]), 2);

    let a = thread::spawn(move || first.call(&[1]));
    let b = thread::spawn(move || second.call(&[1]));

    assert_eq!(a.join().unwrap(), 1);
    assert_eq!(b.join().unwrap(), 1);
    assert_eq!(spy.call_count(), 2);
}
