use crate::types::{Appointment, AppointmentStatus};
use chrono::{DateTime, TimeZone, Timelike, Utc};
use std::ops::Range;

const PROVIDERS: [&str; 4] = [
    "Dr. Amelia Hart",
    "Dr. Jonas Weber",
    "Dr. Priya Nair",
    "Dr. Lucas Moreau",
];

const SERVICES: [&str; 5] = [
    "General consultation",
    "Follow-up visit",
    "Vaccination",
    "Annual health check-up",
    "Blood test",
];

const OFFICE_HOURS: Range<u32> = 8..18;

/// Seed collection: one appointment per slot. Slots inside office hours are
/// bookable (every third one already booked), the others carry no status.
pub fn default_appointments<Tz: TimeZone>(slots: &[DateTime<Tz>]) -> Vec<Appointment> {
    slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let status = if OFFICE_HOURS.contains(&slot.hour()) {
                Some(if index % 3 == 0 {
                    AppointmentStatus::Booked
                } else {
                    AppointmentStatus::Available
                })
            } else {
                None
            };

            Appointment {
                slot: slot.with_timezone(&Utc),
                provider: PROVIDERS[index % PROVIDERS.len()].into(),
                service: SERVICES[index % SERVICES.len()].into(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        appointment_store::has_unique_slots,
        slots::{generate_slots_for_week, WeekStart},
    };

    #[test]
    fn test_one_appointment_per_slot() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        let week = generate_slots_for_week(&now, WeekStart::Sunday);
        let appointments = default_appointments(&week.slots);

        assert_eq!(appointments.len(), week.slots.len());
        assert!(has_unique_slots(&appointments));
        for (appointment, slot) in appointments.iter().zip(&week.slots) {
            assert!(appointment.starts_at(*slot));
        }
    }

    #[test]
    fn test_status_follows_office_hours() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        let week = generate_slots_for_week(&now, WeekStart::Sunday);
        let appointments = default_appointments(&week.slots);

        for appointment in &appointments {
            let in_office_hours = (8..18).contains(&appointment.slot.hour());
            assert_eq!(appointment.status.is_some(), in_office_hours);
        }
        assert!(appointments
            .iter()
            .any(|a| a.status == Some(AppointmentStatus::Booked)));
        assert!(appointments
            .iter()
            .any(|a| a.status == Some(AppointmentStatus::Available)));
    }

    #[test]
    fn test_fixture_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        let week = generate_slots_for_week(&now, WeekStart::Monday);
        assert_eq!(
            default_appointments(&week.slots),
            default_appointments(&week.slots)
        );
    }
}
