use crate::{
    backend::StorageBackend,
    error::{BookingError, StorageError},
    types::{Appointment, AppointmentStatus},
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{error, info, warn};

pub const STORAGE_KEY: &str = "appointments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    /// False when the appointment already had the requested status.
    pub changed: bool,
    /// False when the durable write failed and only memory was updated.
    pub persisted: bool,
}

/// Returns the first appointment starting at `slot`.
pub fn find_appointment(appointments: &[Appointment], slot: DateTime<Utc>) -> Option<&Appointment> {
    appointments
        .iter()
        .find(|appointment| appointment.starts_at(slot))
}

pub fn has_unique_slots(appointments: &[Appointment]) -> bool {
    let mut seen = HashSet::with_capacity(appointments.len());
    appointments
        .iter()
        .all(|appointment| seen.insert(appointment.slot.timestamp_millis()))
}

#[derive(Debug)]
pub struct AppointmentStore<B: StorageBackend> {
    appointments: Vec<Appointment>,
    backend: B,
}

impl<B: StorageBackend> AppointmentStore<B> {
    /// Loads the persisted collection, or seeds it with `fixture` when nothing
    /// usable is stored. The fixture is not written until the first mutation.
    pub fn load(backend: B, fixture: impl FnOnce() -> Vec<Appointment>) -> Self {
        let appointments = match Self::read_persisted(&backend) {
            Ok(Some(appointments)) => {
                info!(count = appointments.len(), "Loaded persisted appointments");
                appointments
            }
            Ok(None) => {
                info!("No persisted appointments, using default appointments");
                fixture()
            }
            Err(err) => {
                error!(?err, "Failed to read persisted appointments, using default appointments");
                fixture()
            }
        };

        if !has_unique_slots(&appointments) {
            warn!("Appointment collection contains duplicate slots, lookups return the first match");
        }

        Self {
            appointments,
            backend,
        }
    }

    fn read_persisted(backend: &B) -> Result<Option<Vec<Appointment>>, StorageError> {
        let Some(raw) = backend.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let appointments: Vec<Appointment> = serde_json::from_str(&raw)?;
        Ok((!appointments.is_empty()).then_some(appointments))
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn find(&self, slot: DateTime<Utc>) -> Option<&Appointment> {
        find_appointment(&self.appointments, slot)
    }

    pub fn confirm_booking(&mut self, slot: DateTime<Utc>) -> Result<BookingOutcome, BookingError> {
        self.update_status(slot, AppointmentStatus::Booked)
    }

    pub fn cancel_booking(&mut self, slot: DateTime<Utc>) -> Result<BookingOutcome, BookingError> {
        self.update_status(slot, AppointmentStatus::Available)
    }

    fn update_status(
        &mut self,
        slot: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Result<BookingOutcome, BookingError> {
        let Some(appointment) = self
            .appointments
            .iter_mut()
            .find(|appointment| appointment.starts_at(slot))
        else {
            let err = BookingError::NotFound(slot);
            warn!(%err, "Status update skipped");
            return Err(err);
        };
        if appointment.status.is_none() {
            let err = BookingError::NotBookable(slot);
            warn!(%err, "Status update skipped");
            return Err(err);
        }
        let changed = appointment.status != Some(status);
        appointment.status = Some(status);
        let appointment = appointment.clone();

        let persisted = match self.persist() {
            Ok(()) => true,
            Err(err) => {
                warn!(?err, "Failed to persist appointments, keeping them in memory only");
                false
            }
        };
        info!(slot = %appointment.slot, ?status, changed, persisted, "Updated appointment");

        Ok(BookingOutcome {
            appointment,
            changed,
            persisted,
        })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let value = serde_json::to_string(&self.appointments)?;
        self.backend.set_item(STORAGE_KEY, &value)
    }
}
