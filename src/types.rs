use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(with = "iso_millis")]
    pub slot: DateTime<Utc>,
    pub provider: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl Appointment {
    /// Slots are compared as instants at millisecond precision.
    pub fn starts_at(&self, slot: DateTime<Utc>) -> bool {
        self.slot.timestamp_millis() == slot.timestamp_millis()
    }
}

/// Serializes instants as `2024-01-01T09:00:00.000Z` and accepts any RFC 3339 offset.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(slot: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&slot.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|slot| slot.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
