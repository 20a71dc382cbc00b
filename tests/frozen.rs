use chrono::{Datelike, Timelike, Utc};
use chronometer::{Clock, ClockError, MockClock, Mode, SystemClock, TimeUnit};

#[test]
fn rejects_moment_without_timezone() {
    let clock = MockClock::frozen();
    assert!(matches!(
        clock.shift_to_moment("2017-03-13 02:12:30.763"),
        Err(ClockError::Timestamp { .. })
    ));
}

#[test]
fn rejects_moment_without_millis() {
    let clock = MockClock::frozen();
    assert!(matches!(
        clock.shift_to_moment("2017-03-13 02:12:30 UTC"),
        Err(ClockError::Timestamp { .. })
    ));
}

#[test]
fn wall_clock_reports_the_shifted_moment() {
    let clock = MockClock::frozen();
    clock.shift_to_moment("2017-03-13 02:12:30.763 UTC").unwrap();

    let v = clock.datetime_in(chrono_tz::Tz::UTC);

    assert_eq!(v.year(), 2017);
    assert_eq!(v.month(), 3);
    assert_eq!(v.day(), 13);
    assert_eq!(v.hour(), 2);
    assert_eq!(v.minute(), 12);
    assert_eq!(v.second(), 30);
    assert_eq!(v.timestamp_subsec_millis(), 763);
}

#[test]
fn elapsed_tracks_shifts_exactly() {
    let clock = MockClock::frozen();
    clock.shift_to_moment("2017-03-13 02:12:30.763 UTC").unwrap();
    clock.shift_by(0, 100).unwrap();

    let marker_ns = clock.tick_ns();

    clock.shift_to_moment("2017-03-13 02:12:32.363 UTC").unwrap();
    clock.shift_by(0, 400).unwrap();

    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Nanoseconds), 1_600_000_300);
    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Milliseconds), 1_600);
}

#[test]
fn instant_carries_the_nanosecond_remainder() {
    let clock = MockClock::frozen();
    clock.shift_to_moment("2017-03-13 02:12:30.763 UTC").unwrap();
    clock.shift_by_in(123_345, TimeUnit::Nanoseconds).unwrap();

    let v = clock.datetime_in(chrono_tz::Tz::UTC);

    assert_eq!(v.year(), 2017);
    assert_eq!(v.month(), 3);
    assert_eq!(v.day(), 13);
    assert_eq!(v.hour(), 2);
    assert_eq!(v.minute(), 12);
    assert_eq!(v.second(), 30);
    assert_eq!(v.nanosecond(), 763_123_345);
}

#[test]
fn correct_by_moves_wall_time_only() {
    let clock = MockClock::frozen();
    clock.shift_to_moment("2017-03-13 02:12:30.763 UTC").unwrap();
    let time1 = clock.epoch_ms();
    let tick1 = clock.tick_ns();

    clock.correct_time_by(100, 400).unwrap();

    assert_eq!(clock.epoch_ms(), time1 + 100);
    assert_eq!(clock.tick_ns(), tick1);
}

#[test]
fn correct_to_moves_wall_time_only() {
    let clock = MockClock::frozen();
    clock.shift_to_moment("2017-03-13 02:12:30.763 UTC").unwrap();
    let time1 = clock.epoch_ms();
    let tick1 = clock.tick_ns();

    clock.correct_time_to(time1 + 100, 400).unwrap();

    assert_eq!(clock.epoch_ms(), time1 + 100);
    assert_eq!(clock.tick_ns(), tick1);
}

#[test]
fn small_elapsed_is_recovered_across_the_i64_boundary() {
    // Tick runs through i64::MAX and wraps into the negative range.
    let clock = MockClock::frozen_at(Utc::now().timestamp_millis(), i64::MAX - 1_000_000);

    let marker_ns = clock.tick_ns();

    clock.shift_by_in(2_000_000, TimeUnit::Nanoseconds).unwrap();

    assert_eq!(clock.elapsed_ns(marker_ns), 2_000_000);
    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Nanoseconds), 2_000_000);
    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Microseconds), 2_000);
    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Milliseconds), 2);
}

#[test]
fn span_wider_than_i64_nanos_saturates_in_nanos() {
    const NS_PER_MS: i64 = 1_000_000;

    let neg_ns = i64::MIN + 1_000_000;
    let pos_ns = neg_ns.wrapping_add(i64::MAX).wrapping_add(5_000_000);

    // True difference exceeds i64::MAX nanoseconds.
    let clock = MockClock::frozen_at(Utc::now().timestamp_millis(), neg_ns);

    let marker_ns = clock.tick_ns();

    clock.shift_by_in(-neg_ns, TimeUnit::Nanoseconds).unwrap();
    clock.shift_by_in(pos_ns, TimeUnit::Nanoseconds).unwrap();

    assert_eq!(clock.elapsed_ns(marker_ns), i64::MAX);
    assert_eq!(clock.elapsed(marker_ns, TimeUnit::Nanoseconds), i64::MAX);

    // Milliseconds still have room for the true value.
    let neg_ms = neg_ns / NS_PER_MS;
    let pos_ms = pos_ns / NS_PER_MS;
    let rst_ms = ((pos_ns - pos_ms * NS_PER_MS) - (neg_ns - neg_ms * NS_PER_MS)) / NS_PER_MS;
    assert_eq!(
        clock.elapsed(marker_ns, TimeUnit::Milliseconds),
        (pos_ms - neg_ms) + rst_ms
    );
}

#[test]
fn factories_produce_frozen_clocks() {
    assert_eq!(MockClock::frozen().mode(), Mode::Frozen);

    let seeded = MockClock::frozen_at(Utc::now().timestamp_millis(), SystemClock.tick_ns());
    assert_eq!(seeded.mode(), Mode::Frozen);

    let parsed =
        MockClock::frozen_at_moment("2017-04-21 14:22:12.000 Europe/Moscow", SystemClock.tick_ns())
            .unwrap();
    assert_eq!(parsed.mode(), Mode::Frozen);
}

#[test]
fn mutations_chain() {
    let clock = MockClock::frozen_at_moment("2010-04-30 10:00:00.000 UTC", 0).unwrap();
    clock
        .shift_to_moment("2010-03-01 10:00:00.000 UTC")
        .unwrap()
        .reset_to_moment("2010-01-20 10:00:00.000 UTC", 0)
        .unwrap()
        .shift_by_in(1, TimeUnit::Hours)
        .unwrap();

    let expected = MockClock::frozen_at_moment("2010-01-20 11:00:00.000 UTC", 0).unwrap();
    assert_eq!(clock.instant(), expected.instant());
}

#[test]
fn mode_can_be_switched_freely() {
    let clock = MockClock::system();

    for mode in [
        Mode::Ticking,
        Mode::Frozen,
        Mode::System,
        Mode::Frozen,
        Mode::Ticking,
    ] {
        clock.set_mode(mode);
        assert_eq!(clock.mode(), mode);
    }
}

#[test]
fn set_mode_reseeds_from_the_system_clock() {
    let clock = MockClock::frozen_at_moment("2010-04-30 10:00:00.000 UTC", 0).unwrap();
    clock.set_mode(Mode::Frozen);

    let drift_ms = (clock.epoch_ms() - Utc::now().timestamp_millis()).abs();
    assert!(drift_ms < 1_000, "reseeded clock drifts by {drift_ms}ms");
}

#[test]
fn moment_string_round_trips_calendar_fields() {
    let clock = MockClock::frozen_at_moment("2017-03-13 02:12:30.763 UTC", 0).unwrap();
    let v = clock.datetime_in(chrono_tz::Tz::UTC);

    assert_eq!(
        (v.year(), v.month(), v.day()),
        (2017, 3, 13)
    );
    assert_eq!(
        (v.hour(), v.minute(), v.second(), v.timestamp_subsec_millis()),
        (2, 12, 30, 763)
    );
}
