use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::calculators::{BmiForm, CalorieForm, HeartRateForm, HydrationForm};

use super::errors::calculator_error_response;

pub(super) async fn bmi(Json(form): Json<BmiForm>) -> Response {
    match form.evaluate() {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => calculator_error_response(err),
    }
}

pub(super) async fn heart_rate(Json(form): Json<HeartRateForm>) -> Response {
    (StatusCode::OK, Json(form.evaluate())).into_response()
}

pub(super) async fn hydration(Json(form): Json<HydrationForm>) -> Response {
    match form.evaluate() {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => calculator_error_response(err),
    }
}

pub(super) async fn calories(Json(form): Json<CalorieForm>) -> Response {
    match form.evaluate() {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => calculator_error_response(err),
    }
}
