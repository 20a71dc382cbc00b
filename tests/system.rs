use chrono::{Datelike, Utc};
use chronometer::{Clock, ClockError, MockClock, Mode, SystemClock, TimeUnit};
use std::time::Duration;

#[tokio::test]
async fn reads_advance_with_real_time() {
    let clock = MockClock::system();

    let time1 = clock.epoch_ms();
    let tick1 = clock.tick_ns();
    let instant1 = clock.instant();

    tokio::time::sleep(Duration::from_millis(10)).await;

    let time2 = clock.epoch_ms();
    let tick2 = clock.tick_ns();
    let instant2 = clock.instant();

    assert!(time2 - time1 >= 10);
    assert!(tick2 - tick1 >= 10_000_000);
    assert!((instant2 - instant1).num_nanoseconds().unwrap() >= 10_000_000);
}

#[test]
fn reads_agree_with_the_system_clock() {
    let clock = MockClock::system();
    let drift_ms = (clock.epoch_ms() - SystemClock.epoch_ms()).abs();
    assert!(drift_ms < 100, "system-mode clock drifts by {drift_ms}ms");
}

#[test]
fn every_mutation_is_rejected() {
    let clock = MockClock::system();
    let now_ms = Utc::now().timestamp_millis();

    assert!(matches!(
        clock.shift_to(now_ms, 0),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
    assert!(matches!(
        clock.shift_by(10, 0),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
    assert!(matches!(
        clock.shift_by_in(10, TimeUnit::Seconds),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
    assert!(matches!(
        clock.correct_time_to(now_ms, 0),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
    assert!(matches!(
        clock.correct_time_by(10, 0),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
    assert!(matches!(
        clock.reset_to(now_ms, 0, 0),
        Err(ClockError::ModeUnsupported(Mode::System))
    ));
}

#[test]
fn system_factory() {
    let clock = MockClock::system();
    assert_eq!(clock.mode(), Mode::System);
}

#[tokio::test]
async fn system_clock_measures_real_sleeps() {
    let marker_ns = SystemClock.tick_ns();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(SystemClock.elapsed_ns(marker_ns) > 5_000_000);
    assert!(SystemClock.elapsed(marker_ns, TimeUnit::Nanoseconds) > 5_000_000);
}

#[test]
fn system_clock_converts_to_zoned_datetimes() {
    let v = SystemClock.datetime_in(chrono_tz::America::New_York);
    assert!(v.year() >= 2024);
}

#[tokio::test]
async fn system_clock_sleep_takes_real_time() {
    let marker_ns = SystemClock.tick_ns();
    SystemClock.sleep(Duration::from_millis(100)).await;

    let elapsed_ms = SystemClock.elapsed(marker_ns, TimeUnit::Milliseconds);
    assert!(elapsed_ms >= 90, "slept only {elapsed_ms}ms");
    assert!(elapsed_ms < 2_000, "slept {elapsed_ms}ms");
}

#[test]
fn measure_times_a_closure() {
    let elapsed_ms = SystemClock.measure(TimeUnit::Milliseconds, || {
        std::thread::sleep(Duration::from_millis(5));
    });
    assert!(elapsed_ms >= 5);

    let elapsed_ns = SystemClock.measure_ns(|| {});
    assert!(elapsed_ns >= 0);
}
