use chrono::{Datelike, Timelike};
use civitime::{
    Calendar, DateTime, DateTimeInterval, DecimalTicks, GregorianUtc, LeapSecondRecord,
    LeapSecondTable, Month, TimeInterval, TimeStamp, TICKS_PER_SECOND,
};

fn recent_leaps() -> LeapSecondTable {
    LeapSecondTable::new(vec![
        LeapSecondRecord::inserted(2015, Month::June, 30, 23, 59),
        LeapSecondRecord::inserted(2016, Month::December, 31, 23, 59),
    ])
    .unwrap()
}

#[test]
fn bijection_holds_across_boundaries() {
    let calendar = GregorianUtc::<i64>::utc(recent_leaps());
    let seams = [
        DateTime::new(1, Month::January, 1, 0, 0, 0, 0i64),
        DateTime::new(-1, Month::December, 31, 23, 59, 59, 9_999_999),
        DateTime::new(2024, Month::February, 29, 0, 0, 0, 0),
        DateTime::new(2016, Month::December, 31, 23, 59, 60, 0),
        DateTime::new(2017, Month::January, 1, 0, 0, 0, 0),
    ];
    for seam in seams {
        let stamp = calendar.from_datetime(seam).expect("seam is valid");
        // Sweep a few ticks around each seam in both directions.
        for delta in -3i64..=3 {
            let probe = TimeStamp::from_ticks(stamp.ticks() + delta);
            let reading = calendar.to_datetime(probe);
            assert!(calendar.valid(reading), "image must be valid: {reading}");
            assert_eq!(
                calendar.from_datetime(reading),
                Some(probe),
                "round-trip failed near {seam} at delta {delta}"
            );
        }
    }
}

#[test]
fn civil_reading_matches_chrono_on_the_uniform_axis() {
    // With no leap seconds the engine must agree with chrono's proleptic
    // Gregorian reading of the same instant.
    let calendar = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
    let unix_seconds = [
        0i64,
        946_728_000,    // 2000-01-01T12:00:00
        951_782_399,    // 2000-02-29T23:59:59
        1_700_000_000,  // 2023-11-14
        -2_208_988_800, // 1900-01-01
    ];
    for secs in unix_seconds {
        let utc = chrono::DateTime::from_timestamp(secs, 0).unwrap();
        let stamp = TimeStamp::<i64>::from_utc(utc).unwrap();
        let reading = calendar.to_datetime(stamp);
        assert_eq!(reading.year, i128::from(utc.year()));
        assert_eq!(reading.month.number(), i64::from(utc.month()));
        assert_eq!(reading.day, i64::from(utc.day()));
        assert_eq!(reading.hour, i64::from(utc.hour()));
        assert_eq!(reading.minute, i64::from(utc.minute()));
        assert_eq!(reading.second, i64::from(utc.second()));
        assert_eq!(stamp.to_utc(), Some(utc));
    }
}

#[test]
fn group_action_and_calendar_arithmetic_compose() {
    let calendar = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
    let start = calendar
        .from_datetime(DateTime::new(2023, Month::May, 31, 12, 0, 0, 0))
        .unwrap();

    // Flat interval arithmetic on stamps.
    let one_day = TimeInterval::from_days(1).unwrap();
    let moved = start.checked_add(one_day).unwrap();
    assert_eq!(moved.since(start), Some(one_day));
    assert_eq!(
        calendar.to_datetime(moved),
        DateTime::new(2023, Month::June, 1, 12, 0, 0, 0)
    );

    // Calendar interval arithmetic on fields: one month truncates.
    let one_month = DateTimeInterval::new(0, 1, 0, 0, 0, 0, 0);
    let landed = calendar.normalize(calendar.plus(one_month, calendar.to_datetime(start)));
    assert_eq!(landed, DateTime::new(2023, Month::June, 30, 12, 0, 0, 0));
}

#[test]
fn an_inserted_second_lengthens_the_day_end_to_end() {
    let calendar = GregorianUtc::<i64>::utc(recent_leaps());
    let leap = calendar
        .from_text(&DecimalTicks, "2016-12-31T23:59:60.0000000Z")
        .unwrap();
    let leap_stamp = calendar.from_datetime(leap).unwrap();
    let midnight = calendar
        .from_datetime(DateTime::new(2017, Month::January, 1, 0, 0, 0, 0))
        .unwrap();
    assert_eq!(
        midnight.since(leap_stamp).unwrap().ticks(),
        TICKS_PER_SECOND
    );

    // The same text is a parse failure for a calendar that never heard of
    // the 2016 leap second.
    let unaware = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
    assert!(unaware
        .from_text(&DecimalTicks, "2016-12-31T23:59:60.0000000Z")
        .is_err());
}

#[test]
fn codec_round_trips_and_reports_errors() {
    let calendar = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
    let samples = [
        DateTime::new(2023, Month::January, 2, 3, 4, 5, 6_789_012i64),
        DateTime::new(-753, Month::April, 21, 6, 0, 0, 0),
        DateTime::new(29_227, Month::December, 31, 0, 0, 0, 0),
    ];
    for sample in samples {
        let text = calendar.to_text(&DecimalTicks, sample);
        assert_eq!(calendar.from_text(&DecimalTicks, &text), Ok(sample));
    }

    match calendar.from_text(&DecimalTicks, "2023-13-01T00:00:00.0Z") {
        Err(civitime::Error::InvalidDateTime { input }) => {
            assert_eq!(input, "2023-13-01T00:00:00.0Z");
        }
        other => panic!("expected InvalidDateTime, got {other:?}"),
    }
    match calendar.from_text(&DecimalTicks, "not a datetime") {
        Err(civitime::Error::Syntax { input, .. }) => assert_eq!(input, "not a datetime"),
        other => panic!("expected Syntax error, got {other:?}"),
    }
}

#[test]
fn wider_scalars_extend_the_representable_span() {
    let narrow = GregorianUtc::<i64>::utc(LeapSecondTable::empty());
    let wide = GregorianUtc::<i128>::utc(LeapSecondTable::empty());
    let far = DateTime::new(100_000, Month::June, 1, 0, 0, 0, 0i64);
    assert_eq!(narrow.from_datetime(far), None);

    let far_wide = DateTime::new(100_000, Month::June, 1, 0, 0, 0, 0i128);
    let stamp = wide.from_datetime(far_wide).expect("fits i128");
    assert_eq!(wide.to_datetime(stamp), far_wide);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_value_types() {
    let datetime = DateTime::new(2024, Month::February, 29, 12, 30, 15, 42i64);
    let json = serde_json::to_string(&datetime).unwrap();
    let back: DateTime<i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, datetime);

    let record = LeapSecondRecord::inserted(2016, Month::December, 31, 23, 59);
    let json = serde_json::to_string(&record).unwrap();
    let back: LeapSecondRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);

    let stamp = TimeStamp::from_ticks(636_188_256_000_000_000i64);
    assert_eq!(serde_json::to_string(&stamp).unwrap(), "636188256000000000");
}
