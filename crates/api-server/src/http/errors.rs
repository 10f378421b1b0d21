use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::calculators::CalculatorError;
use shared::models::{ErrorBody, ErrorResponse};
use shared::pages::SessionError;
use tracing::warn;

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }),
    )
        .into_response()
}

pub(super) fn bad_request_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, code, message)
}

pub(super) fn not_found_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, code, message)
}

pub(super) fn unknown_session_response() -> Response {
    session_error_response(SessionError::UnknownSession)
}

pub(super) fn session_error_response(err: SessionError) -> Response {
    let status = match err {
        SessionError::UnknownSession => StatusCode::NOT_FOUND,
        SessionError::PageNotActive(_) | SessionError::RequestInFlight => StatusCode::CONFLICT,
    };
    error_response(status, err.code(), &err.to_string())
}

pub(super) fn calculator_error_response(err: CalculatorError) -> Response {
    warn!("calculator rejected input: {err}");
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "invalid_calculator_input",
        &err.to_string(),
    )
}
