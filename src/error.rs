use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("No appointment exists for slot {}", .0.to_rfc3339_opts(SecondsFormat::Millis, true))]
    NotFound(DateTime<Utc>),

    #[error("The slot {} has no bookable appointment", .0.to_rfc3339_opts(SecondsFormat::Millis, true))]
    NotBookable(DateTime<Utc>),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Durable storage is not available")]
    Unavailable,

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persisted data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
