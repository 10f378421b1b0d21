use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::pages::resources_view;

pub(super) async fn get_resources() -> impl IntoResponse {
    (StatusCode::OK, Json(resources_view()))
}
