use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use crate::clock::Clock;

/// A future that completes once a duration has elapsed on the owning clock.
///
/// Created by [`Clock::sleep`]. Real and ticking clocks wait on the runtime
/// timer; a frozen [`MockClock`](crate::MockClock) advances its own state by
/// the full duration and resolves immediately.
#[pin_project]
pub struct ClockSleep {
    #[pin]
    inner: ClockSleepInner,
}

#[pin_project(project = ClockSleepInnerProj)]
enum ClockSleepInner {
    Timer {
        #[pin]
        sleep: tokio::time::Sleep,
    },
    Immediate,
}

impl ClockSleep {
    pub(crate) fn timer(duration: Duration) -> Self {
        Self {
            inner: ClockSleepInner::Timer {
                sleep: tokio::time::sleep(duration),
            },
        }
    }

    pub(crate) fn immediate() -> Self {
        Self {
            inner: ClockSleepInner::Immediate,
        }
    }
}

impl Future for ClockSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.project().inner.project() {
            ClockSleepInnerProj::Timer { sleep } => sleep.poll(cx),
            ClockSleepInnerProj::Immediate => Poll::Ready(()),
        }
    }
}

/// Saturating conversion from a `Duration` to i64 nanoseconds.
pub(crate) fn duration_ns(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

/// Sleep for `duration` as measured by `clock`, re-arming the wait until the
/// deadline on the clock's tick source has actually been reached.
///
/// The deadline is fixed up front from `tick_ns()`. After every wakeup the
/// remaining time is recomputed with wrap-safe subtraction, because a
/// concurrent mutation may have moved the tick source arbitrarily (including
/// across the i64 boundary) while the sleep was in flight. A shift backwards
/// extends the wait; a shift past the deadline ends it on the next wakeup.
///
/// Dropping the returned future cancels the wait. That is the async analog of
/// interrupting a sleeping thread: cancellation propagates to the caller's
/// context instead of being swallowed.
pub async fn sleep_uninterruptible<C: Clock>(clock: &C, duration: Duration) {
    let deadline_ns = clock.tick_ns().wrapping_add(duration_ns(duration));

    loop {
        let remaining_ns = deadline_ns.wrapping_sub(clock.tick_ns());
        if remaining_ns <= 0 {
            return;
        }
        clock.sleep(Duration::from_nanos(remaining_ns as u64)).await;
    }
}
