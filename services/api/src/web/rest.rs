//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the attendance endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    AttendanceRecordBody, AttendanceStatusBody, CreateAttendanceRequest,
    CreateAttendanceResponse, ErrorResponse, SAVED_MESSAGE,
};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_attendance_handler,
        list_attendance_handler,
    ),
    components(
        schemas(
            CreateAttendanceRequest,
            CreateAttendanceResponse,
            AttendanceRecordBody,
            AttendanceStatusBody,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Attendance API", description = "Record and list attendance entries.")
    )
)]
pub struct ApiDoc;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal_error() -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Record one person's attendance.
///
/// The body is validated before anything is stored: all three identity fields
/// must be non-blank and the status must be `Present` or `Absent`.
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = CreateAttendanceRequest,
    responses(
        (status = 200, description = "Attendance saved", body = CreateAttendanceResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_attendance_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CreateAttendanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected unreadable attendance body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;

    let entry = request.into_domain().map_err(|e| {
        warn!(field = %e.field(), "Rejected invalid attendance body: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e)))
    })?;

    let record = app_state.store.create_record(entry).await.map_err(|e| {
        error!("Failed to store attendance record: {:?}", e);
        internal_error()
    })?;

    info!(
        last_name = %record.last_name,
        status = %record.status,
        "Attendance saved"
    );
    Ok(Json(CreateAttendanceResponse {
        message: SAVED_MESSAGE.to_string(),
        record: record.into(),
    }))
}

/// List every stored record in creation order.
#[utoipa::path(
    get,
    path = "/attendance",
    responses(
        (status = 200, description = "All records, oldest first", body = [AttendanceRecordBody]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_attendance_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<AttendanceRecordBody>>, HandlerError> {
    let records = app_state.store.list_records().await.map_err(|e| {
        error!("Failed to list attendance records: {:?}", e);
        internal_error()
    })?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
