use crate::appointment_store::{AppointmentStore, BookingOutcome};
use crate::backend::StorageBackend;
use crate::calendar::{BookingDialog, Notice, NoticeVariant, WeekView};
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::fixture::default_appointments;
use crate::slots::generate_slots_for_week;
use crate::types::{iso_millis, Appointment};
use axum::extract::Query;
use axum::{extract::State, http::StatusCode, Json};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

#[derive(Clone)]
pub struct AppState<B: StorageBackend, C: Configuration> {
    store: Arc<Mutex<AppointmentStore<B>>>,
    configuration: C,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRequest {
    #[serde(with = "iso_millis")]
    slot: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub notice: Notice,
    pub appointment: Appointment,
    pub persisted: bool,
}

type ErrorResponse = (StatusCode, Json<Notice>);

fn rejected(err: BookingError) -> ErrorResponse {
    let status = match err {
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::NotBookable(_) => StatusCode::CONFLICT,
    };
    (status, Json(Notice::failed(&err)))
}

type StatusUpdate<B> =
    fn(&mut AppointmentStore<B>, DateTime<Utc>) -> Result<BookingOutcome, BookingError>;

/// Storage writes are blocking, so the update runs on the blocking pool.
async fn update_store<B: StorageBackend, C: Configuration>(
    state: &AppState<B, C>,
    update: StatusUpdate<B>,
    slot: DateTime<Utc>,
) -> Result<BookingOutcome, ErrorResponse> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || update(&mut store.blocking_lock(), slot))
        .await
        .map_err(|err| {
            error!(?err, "Status update task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Notice {
                    message: "The appointment could not be updated.".into(),
                    variant: NoticeVariant::Error,
                }),
            )
        })?
        .map_err(rejected)
}

pub fn create_app<B: StorageBackend, C: Configuration>(backend: B, configuration: C) -> Router {
    let week = generate_slots_for_week(&Local::now(), configuration.week_start());
    let store = AppointmentStore::load(backend, || default_appointments(&week.slots));

    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/week", get(get_week::<B, C>))
        .route("/appointment", get(get_appointment::<B, C>))
        .route("/book", post(confirm_booking::<B, C>))
        .route("/cancel", post(cancel_booking::<B, C>))
        .with_state(state)
        .layer(cors)
}

async fn get_week<B: StorageBackend, C: Configuration>(
    State(state): State<AppState<B, C>>,
) -> Json<WeekView> {
    let now = Local::now();
    let week = generate_slots_for_week(&now, state.configuration.week_start());
    let store = state.store.lock().await;

    Json(WeekView::build(
        state.configuration.website_title(),
        &week,
        store.appointments(),
        &now,
    ))
}

async fn get_appointment<B: StorageBackend, C: Configuration>(
    State(state): State<AppState<B, C>>,
    Query(request): Query<SlotRequest>,
) -> Result<Json<BookingDialog>, ErrorResponse> {
    let store = state.store.lock().await;
    let dialog = store
        .find(request.slot)
        .map(BookingDialog::open)
        .ok_or_else(|| rejected(BookingError::NotFound(request.slot)))?;
    Ok(Json(dialog))
}

async fn confirm_booking<B: StorageBackend, C: Configuration>(
    State(state): State<AppState<B, C>>,
    Json(request): Json<SlotRequest>,
) -> Result<Json<BookingResponse>, ErrorResponse> {
    debug!(slot = %request.slot, "Booking requested");
    let outcome = update_store(&state, AppointmentStore::confirm_booking, request.slot).await?;

    Ok(Json(respond(outcome, Notice::booked)))
}

async fn cancel_booking<B: StorageBackend, C: Configuration>(
    State(state): State<AppState<B, C>>,
    Json(request): Json<SlotRequest>,
) -> Result<Json<BookingResponse>, ErrorResponse> {
    debug!(slot = %request.slot, "Cancellation requested");
    let outcome = update_store(&state, AppointmentStore::cancel_booking, request.slot).await?;

    Ok(Json(respond(outcome, Notice::canceled)))
}

fn respond(outcome: BookingOutcome, notice: fn(bool) -> Notice) -> BookingResponse {
    let notice = if outcome.changed {
        notice(outcome.persisted)
    } else {
        Notice::unchanged(&outcome.appointment)
    };
    BookingResponse {
        notice,
        appointment: outcome.appointment,
        persisted: outcome.persisted,
    }
}
