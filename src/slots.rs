use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};

pub const SLOTS_PER_DAY: usize = 32;
pub const SLOT_MINUTES: i64 = 45;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Week<Tz: TimeZone> {
    pub days: Vec<NaiveDate>,
    pub slots: Vec<DateTime<Tz>>,
}

impl<Tz: TimeZone> Week<Tz> {
    pub fn slots_for_day(&self, index: usize) -> &[DateTime<Tz>] {
        self.slots
            .chunks(SLOTS_PER_DAY)
            .nth(index)
            .unwrap_or_default()
    }
}

pub fn slot_length() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// First instant of `day` in `tz`. When local midnight is skipped by a DST
/// jump, the first existing full hour of the day is used.
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    (0..24)
        .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&day.and_time(NaiveTime::MIN)))
}

pub fn start_of_week(today: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let first = week_start.weekday();
    let offset = (7 + today.weekday().num_days_from_monday() - first.num_days_from_monday()) % 7;
    today - Duration::days(i64::from(offset))
}

/// Slots advance by absolute duration, so a day always has 32 slots even
/// when it is 23 or 25 hours long.
pub fn get_slots<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Vec<DateTime<Tz>> {
    let first = start_of_day(day, tz);
    (0..SLOTS_PER_DAY as i32)
        .map(|i| first.clone() + slot_length() * i)
        .collect()
}

pub fn generate_slots_for_week<Tz: TimeZone>(now: &DateTime<Tz>, week_start: WeekStart) -> Week<Tz> {
    let tz = now.timezone();
    let first_day = start_of_week(now.date_naive(), week_start);

    let days: Vec<NaiveDate> = (0..DAYS_PER_WEEK as i64)
        .map(|i| first_day + Duration::days(i))
        .collect();
    let slots = days.iter().flat_map(|day| get_slots(*day, &tz)).collect();

    Week { days, slots }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Timelike, Utc};
    use chrono_tz::{America::New_York, America::Sao_Paulo, Europe::Berlin};
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_slot_grid<Tz: TimeZone>(slots: &[DateTime<Tz>]) {
        assert_eq!(slots.len(), SLOTS_PER_DAY);
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[1].clone() - pair[0].clone(), Duration::minutes(45));
        }
    }

    #[test]
    fn test_get_slots_covers_day_from_midnight() {
        let slots = get_slots(date(2024, 1, 1), &Utc);
        assert_slot_grid(&slots);
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(slots[31], Utc.with_ymd_and_hms(2024, 1, 1, 23, 15, 0).unwrap());
    }

    #[test]
    fn test_get_slots_is_deterministic() {
        assert_eq!(
            get_slots(date(2024, 6, 12), &Berlin),
            get_slots(date(2024, 6, 12), &Berlin)
        );
    }

    #[test]
    fn test_get_slots_starts_at_local_midnight() {
        let slots = get_slots(date(2024, 6, 12), &Berlin);
        assert_slot_grid(&slots);
        assert_eq!(slots[0].hour(), 0);
        assert_eq!(slots[0].minute(), 0);
        assert_eq!(slots[0].date_naive(), date(2024, 6, 12));
    }

    #[test_case(date(2024, 3, 10) ; "spring forward")]
    #[test_case(date(2024, 11, 3) ; "fall back")]
    fn test_dst_day_keeps_slot_count(day: NaiveDate) {
        let slots = get_slots(day, &New_York);
        assert_slot_grid(&slots);
        assert_eq!(slots[0].date_naive(), day);
        assert_eq!(slots[0].hour(), 0);
    }

    #[test]
    fn test_spring_forward_last_slot_spills_into_next_day() {
        let slots = get_slots(date(2024, 3, 10), &New_York);
        assert_eq!(slots[31].date_naive(), date(2024, 3, 11));
        assert_eq!((slots[31].hour(), slots[31].minute()), (0, 15));
    }

    #[test]
    fn test_skipped_midnight_starts_at_first_existing_hour() {
        let slots = get_slots(date(2018, 11, 4), &Sao_Paulo);
        assert_slot_grid(&slots);
        assert_eq!(slots[0].date_naive(), date(2018, 11, 4));
        assert_eq!(slots[0].hour(), 1);
    }

    #[test_case(date(2024, 1, 3), WeekStart::Sunday, date(2023, 12, 31) ; "wednesday from sunday")]
    #[test_case(date(2024, 1, 3), WeekStart::Monday, date(2024, 1, 1) ; "wednesday from monday")]
    #[test_case(date(2023, 12, 31), WeekStart::Sunday, date(2023, 12, 31) ; "sunday from sunday")]
    #[test_case(date(2023, 12, 31), WeekStart::Monday, date(2023, 12, 25) ; "sunday from monday")]
    fn test_start_of_week(today: NaiveDate, week_start: WeekStart, expected: NaiveDate) {
        assert_eq!(start_of_week(today, week_start), expected);
    }

    #[test]
    fn test_generate_slots_for_week() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 14, 30, 0).unwrap();
        let week = generate_slots_for_week(&now, WeekStart::Sunday);

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.slots.len(), 224);
        assert_eq!(week.days[0], date(2023, 12, 31));
        assert_eq!(week.days[6], date(2024, 1, 6));

        for (index, day) in week.days.iter().enumerate() {
            let slots = week.slots_for_day(index);
            assert_eq!(slots, get_slots(*day, &Utc).as_slice());
            assert!(slots.iter().all(|slot| slot.date_naive() == *day));
        }
        for pair in week.slots.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_week_changes_with_now() {
        let this_week = generate_slots_for_week(
            &Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
            WeekStart::Monday,
        );
        let next_week = generate_slots_for_week(
            &Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            WeekStart::Monday,
        );
        assert_eq!(next_week.days[0] - this_week.days[0], Duration::days(7));
        assert!(this_week.slots_for_day(7).is_empty());
    }
}
