//! Blocking sync-async bridge.
//!
//! Provides [`block_on`] for driving the async reader from synchronous code
//! that has no executor at hand.

use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, Waker};

/// Poll a future to completion, blocking the current thread.
///
/// Spins between polls. Synchronous sources never return `Pending`, so for
/// [`SliceSource`](crate::SliceSource), [`IoSource`](crate::IoSource) and
/// `FileSource` this completes on the first poll.
pub fn block_on<T>(future: impl Future<Output = T>) -> T {
    let mut cx = Context::from_waker(Waker::noop());
    let mut future = pin!(future);
    loop {
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(val) => return val,
            Poll::Pending => core::hint::spin_loop(),
        }
    }
}
