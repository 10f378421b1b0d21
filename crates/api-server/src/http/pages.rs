use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::llm::{InteractionForm, QueryFields, SymptomForm, TranslatorForm, ValidationError};
use shared::models::{NavigateRequest, SubmitResponse};
use shared::pages::{SessionError, render_shell, submit_query};
use shared::session::Page;
use tracing::debug;

use super::AppState;
use super::errors::{bad_request_response, not_found_response, session_error_response};
use super::sessions::SessionHandle;

pub(super) async fn navigate(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<NavigateRequest>,
) -> Response {
    let mut guard = session.state.lock().await;
    let changed = guard.navigate(req.page);
    debug!(
        session_id = %session.id,
        page = req.page.slug(),
        changed,
        "page selected"
    );

    (StatusCode::OK, Json(render_shell(&guard, state.presentation))).into_response()
}

pub(super) async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(page): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let page = match resolve_page(&page) {
        Ok(page) => page,
        Err(response) => return response,
    };

    let fields = match page {
        Page::SymptomExplorer => parse_form::<SymptomForm>(body).map(|form| form.validate()),
        Page::DrugInteractions => {
            parse_form::<InteractionForm>(body).map(|form| form.validate())
        }
        Page::MedicalTranslator => parse_form::<TranslatorForm>(body).map(|form| form.validate()),
        Page::HealthResources => {
            return bad_request_response(
                "page_has_no_queries",
                "Health Resources does not submit queries",
            );
        }
    };
    let fields: Result<QueryFields, ValidationError> = match fields {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    let outcome = match submit_query(
        &session.state,
        &state.client,
        page,
        fields,
        state.presentation,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => return session_error_response(err),
    };

    let shell = render_shell(&*session.state.lock().await, state.presentation);
    (StatusCode::OK, Json(SubmitResponse { outcome, shell })).into_response()
}

pub(super) async fn edit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(page): Path<String>,
) -> Response {
    let page = match resolve_page(&page) {
        Ok(page) => page,
        Err(response) => return response,
    };

    let mut guard = session.state.lock().await;
    if guard.active_page() != page {
        return session_error_response(SessionError::PageNotActive(page));
    }
    guard.controller_mut().edit();

    (StatusCode::OK, Json(render_shell(&guard, state.presentation))).into_response()
}

fn resolve_page(raw: &str) -> Result<Page, Response> {
    raw.parse::<Page>()
        .map_err(|message| not_found_response("unknown_page", &message))
}

fn parse_form<T: DeserializeOwned>(body: Value) -> Result<T, Response> {
    serde_json::from_value(body)
        .map_err(|err| bad_request_response("invalid_request", &format!("invalid form body: {err}")))
}
