//! Property-based tests for slot generation, expansion, and range idempotency.

use availability_engine::model::SLOT_MINUTES;
use availability_engine::store::MemoryStore;
use availability_engine::{
    AvailabilityEngine, CustomHours, EngineConfig, GeneratedDay, GenerationSummary, SlotGenerator,
    SlotTime, SpecialScheduleBuilder,
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Any date in 2020-2030.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..4018).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_time() -> impl Strategy<Value = SlotTime> {
    (0u16..24, 0u16..60).prop_map(|(h, m)| SlotTime::new(h, m).unwrap())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sundays_are_always_closed(date in arb_date()) {
        let generator = SlotGenerator::new(EngineConfig::default());
        let generated = generator.generate_default_slots(date);
        if date.weekday() == Weekday::Sun {
            prop_assert_eq!(generated, GeneratedDay::Closed);
        } else {
            prop_assert!(matches!(generated, GeneratedDay::Open(_)));
        }
    }

    #[test]
    fn open_days_have_fixed_length_increasing_slots(date in arb_date()) {
        let generator = SlotGenerator::new(EngineConfig::default());
        if let GeneratedDay::Open(slots) = generator.generate_default_slots(date) {
            for slot in &slots {
                prop_assert_eq!(slot.start_time.checked_add_minutes(SLOT_MINUTES), Some(slot.end_time));
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0].start_time < pair[1].start_time);
            }
        }
    }

    #[test]
    fn custom_hours_expand_to_whole_slots_inside_the_range(start in arb_time(), end in arb_time()) {
        let store = MemoryStore::new();
        let config = EngineConfig::default();
        let slots = SpecialScheduleBuilder::new(&store, &config)
            .expand_custom_hours(&[CustomHours::available(start, end)]);

        let span = i32::from(end.minutes_since_midnight()) - i32::from(start.minutes_since_midnight());
        let expected = if span > 0 { span as usize / usize::from(SLOT_MINUTES) } else { 0 };
        prop_assert_eq!(slots.len(), expected);

        for slot in &slots {
            prop_assert!(slot.start_time >= start);
            prop_assert!(slot.end_time <= end);
        }
        if let Some(first) = slots.first() {
            prop_assert_eq!(first.start_time, start);
        }
    }

    #[test]
    fn range_generation_is_idempotent(start in arb_date(), len in 0i64..60) {
        let store = MemoryStore::new();
        let generator = SlotGenerator::new(EngineConfig::default());
        let engine = AvailabilityEngine::new(&store, &generator);
        let end = start + Duration::days(len);

        let first = engine.generate_range(start, end).unwrap();
        let second = engine.generate_range(start, end).unwrap();

        let days = (len + 1) as usize;
        prop_assert_eq!(first.generated + first.skipped, days);
        prop_assert_eq!(first.skipped, start.iter_days().take(days).filter(|d| d.weekday() == Weekday::Sun).count());
        prop_assert_eq!(second, GenerationSummary { generated: 0, skipped: days });
    }
}
