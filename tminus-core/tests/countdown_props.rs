//! Property tests for the countdown engine

use proptest::prelude::*;

use tminus_core::countdown::{compute_frame, DisplayFrame, EventTarget, OVERFLOW_SECONDS};
use tminus_core::time::Instant;

fn instant() -> impl Strategy<Value = Instant> {
    (1970u16..=2100, 1u8..=12, 1u8..=31, 0u8..24, 0u8..60, 0u8..60).prop_filter_map(
        "date must exist",
        |(year, month, day, hour, minute, second)| {
            Instant::new(year, month, day, hour, minute, second).ok()
        },
    )
}

fn target(at: Instant) -> EventTarget<'static> {
    EventTarget::new(at, "EVENT NAME", "HAPPY EVENT NAME * ").unwrap()
}

proptest! {
    #[test]
    fn future_frames_decompose_the_duration(duration in 0i64..OVERFLOW_SECONDS) {
        match DisplayFrame::from_duration(duration, "m") {
            DisplayFrame::Future { days, hours, minutes, seconds } => {
                prop_assert!(days <= 999);
                prop_assert!(hours < 24 && minutes < 60 && seconds < 60);
                let total = days as i64 * 86_400
                    + hours as i64 * 3_600
                    + minutes as i64 * 60
                    + seconds as i64;
                prop_assert_eq!(total, duration);
            }
            other => prop_assert!(false, "unexpected frame {:?}", other),
        }
    }

    #[test]
    fn far_durations_overflow(duration in OVERFLOW_SECONDS..i64::MAX / 2) {
        prop_assert_eq!(DisplayFrame::from_duration(duration, "m"), DisplayFrame::Overflow);
    }

    #[test]
    fn past_targets_carry_the_message(at in instant(), now in instant()) {
        let target = target(at);
        let frame = compute_frame(&target, &now);
        if now > at {
            prop_assert_eq!(frame, DisplayFrame::EventDay("HAPPY EVENT NAME * ".into()));
        } else {
            prop_assert!(!frame.is_event_day());
        }
    }

    #[test]
    fn compute_frame_is_deterministic(at in instant(), now in instant()) {
        let target = target(at);
        prop_assert_eq!(compute_frame(&target, &now), compute_frame(&target, &now));
    }

    #[test]
    fn names_keep_at_most_four_characters(name in "\\PC{0,12}") {
        let at = Instant::at_minute(2026, 5, 26, 8, 0).unwrap();
        let target = EventTarget::new(at, name.as_str(), "msg").unwrap();
        let expected: std::string::String = name.chars().take(4).collect();
        prop_assert_eq!(target.name(), expected.as_str());
    }

    #[test]
    fn messages_of_any_length_are_kept(message in "\\PC{1,2000}") {
        let at = Instant::at_minute(2026, 5, 26, 8, 0).unwrap();
        let now = Instant::at_minute(2026, 5, 27, 8, 0).unwrap();
        let target = EventTarget::new(at, "EVNT", message.as_str()).unwrap();
        match compute_frame(&target, &now) {
            DisplayFrame::EventDay(shown) => prop_assert_eq!(shown, message.as_str()),
            other => prop_assert!(false, "unexpected frame {:?}", other),
        }
    }
}
