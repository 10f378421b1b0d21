use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::llm::ApiClient;
use shared::pages::Presentation;

mod calculators;
mod errors;
mod health;
mod observability;
mod pages;
mod resources;
mod sessions;

pub use sessions::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub client: ApiClient,
    pub presentation: Presentation,
}

pub fn build_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/v1/sessions", post(sessions::create_session))
        .route("/v1/resources", get(resources::get_resources))
        .route("/v1/calculators/bmi", post(calculators::bmi))
        .route("/v1/calculators/heart-rate", post(calculators::heart_rate))
        .route("/v1/calculators/hydration", post(calculators::hydration))
        .route("/v1/calculators/calories", post(calculators::calories))
        .with_state(app_state.clone());

    let session_layer_state = app_state.clone();

    let session_routes = Router::new()
        .route(
            "/v1/session",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/v1/session/reset", post(sessions::reset_session))
        .route(
            "/v1/session/credential",
            put(sessions::set_credential).delete(sessions::clear_credential),
        )
        .route("/v1/session/navigation", put(pages::navigate))
        .route("/v1/session/pages/{page}/submit", post(pages::submit))
        .route("/v1/session/pages/{page}/edit", post(pages::edit))
        .layer(middleware::from_fn_with_state(
            session_layer_state,
            sessions::session_middleware,
        ))
        .with_state(app_state);

    public_routes
        .merge(session_routes)
        .layer(middleware::from_fn(
            observability::request_observability_middleware,
        ))
}
