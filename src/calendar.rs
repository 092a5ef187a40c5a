use crate::{
    appointment_store::find_appointment,
    error::BookingError,
    slots::{get_slots, slot_length, Week},
    types::{iso_millis, Appointment, AppointmentStatus},
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCell {
    #[serde(with = "iso_millis")]
    pub slot: DateTime<Utc>,
    pub appointment: Option<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub cells: Vec<SlotCell>,
}

/// The week grid joined with the appointment collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub title: String,
    /// Start times of today's slots, labelling the rows of the grid.
    pub hours: Vec<NaiveTime>,
    pub days: Vec<DayColumn>,
}

impl WeekView {
    /// Cells are grouped by the day that generated them, so a slot pushed past
    /// midnight by a DST change stays in its own day's column.
    pub fn build<Tz: TimeZone>(
        title: String,
        week: &Week<Tz>,
        appointments: &[Appointment],
        now: &DateTime<Tz>,
    ) -> Self {
        let hours = get_slots(now.date_naive(), &now.timezone())
            .iter()
            .map(|slot| slot.time())
            .collect();

        let days = week
            .days
            .iter()
            .enumerate()
            .map(|(index, date)| DayColumn {
                date: *date,
                cells: week
                    .slots_for_day(index)
                    .iter()
                    .map(|slot| {
                        let slot = slot.with_timezone(&Utc);
                        SlotCell {
                            slot,
                            appointment: find_appointment(appointments, slot).cloned(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { title, hours, days }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogAction {
    Book,
    Cancel,
}

/// Details shown when an appointment is selected, and what the user may do
/// with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDialog {
    pub provider: String,
    pub service: String,
    pub status: Option<AppointmentStatus>,
    #[serde(with = "iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub action: Option<DialogAction>,
}

impl BookingDialog {
    pub fn open(appointment: &Appointment) -> Self {
        let start = appointment.slot;
        let end = start + slot_length();
        let action = match appointment.status {
            Some(AppointmentStatus::Available) => Some(DialogAction::Book),
            Some(AppointmentStatus::Booked) => Some(DialogAction::Cancel),
            None => None,
        };

        Self {
            provider: appointment.provider.clone(),
            service: appointment.service.clone(),
            status: appointment.status,
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Success,
    Warning,
    Error,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn booked(persisted: bool) -> Self {
        Self::saved("Great news! Your appointment has been scheduled", persisted)
    }

    pub fn canceled(persisted: bool) -> Self {
        Self::saved("Your appointment has been canceled.", persisted)
    }

    /// The appointment already had the requested status.
    pub fn unchanged(appointment: &Appointment) -> Self {
        let message = match appointment.status {
            Some(AppointmentStatus::Booked) => "This appointment is already booked.",
            _ => "This appointment is already available.",
        };
        Self {
            message: message.into(),
            variant: NoticeVariant::Notice,
        }
    }

    pub fn failed(err: &BookingError) -> Self {
        Self {
            message: err.to_string(),
            variant: NoticeVariant::Error,
        }
    }

    fn saved(message: &str, persisted: bool) -> Self {
        if persisted {
            Self {
                message: message.into(),
                variant: NoticeVariant::Success,
            }
        } else {
            Self {
                message: format!("{message} It could not be saved and will be lost on restart."),
                variant: NoticeVariant::Warning,
            }
        }
    }
}
