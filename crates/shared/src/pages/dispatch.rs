use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::Presentation;
use super::controller::SubmitError;
use crate::llm::{ApiClient, ApiError, ApiResponse, QueryFields, QueryRequest, ValidationError};
use crate::session::{DispatchTicket, Page, QueryCounter, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown session")]
    UnknownSession,
    #[error("page '{}' is not the active page", .0.slug())]
    PageNotActive(Page),
    #[error("a request is already in flight for this page")]
    RequestInFlight,
}

impl SessionError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownSession => "unknown_session",
            Self::PageNotActive(_) => "page_not_active",
            Self::RequestInFlight => "request_in_flight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The response (or its failure) was applied to the page controller.
    Completed,
    /// Rejected before dispatch; the controller shows the error.
    Rejected,
    /// The session navigated or reset while the request was pending.
    Superseded,
}

/// Runs one submission for `page` against `session`.
///
/// The session lock is held only to validate and to apply the result, never
/// across the network call. The call and the apply step run on their own task,
/// so a caller that stops polling still leaves the page with a result or an
/// error. A result whose dispatch ticket no longer matches the session is
/// dropped.
pub async fn submit_query(
    session: &Arc<Mutex<SessionState>>,
    client: &ApiClient,
    page: Page,
    fields: Result<QueryFields, ValidationError>,
    presentation: Presentation,
) -> Result<DispatchOutcome, SessionError> {
    let (request, credential, queries, ticket) = {
        let mut state = session.lock().await;
        if state.active_page() != page {
            return Err(SessionError::PageNotActive(page));
        }

        let credential = state.credential().cloned();
        match state
            .controller_mut()
            .begin_submit(credential.as_ref(), fields)
        {
            Ok(request) => (request, credential, state.queries().clone(), state.ticket()),
            Err(SubmitError::InFlight) => return Err(SessionError::RequestInFlight),
            Err(SubmitError::Invalid(reason)) => {
                debug!(page = page.slug(), reason = %reason, "submission rejected");
                return Ok(DispatchOutcome::Rejected);
            }
        }
    };

    let task = {
        let session = Arc::clone(session);
        let client = client.clone();
        tokio::spawn(async move {
            let outcome = client
                .dispatch(credential.as_ref(), request.prompt(), &queries)
                .await;
            apply_outcome(&session, ticket, &request, outcome, &queries, presentation).await
        })
    };

    match task.await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            error!(page = page.slug(), error = %err, "dispatch task failed");
            let mut state = session.lock().await;
            if !state.is_current(ticket) {
                return Ok(DispatchOutcome::Superseded);
            }
            state
                .controller_mut()
                .abandon("the request was interrupted before a response arrived");
            Ok(DispatchOutcome::Completed)
        }
    }
}

async fn apply_outcome(
    session: &Mutex<SessionState>,
    ticket: DispatchTicket,
    request: &QueryRequest,
    outcome: Result<ApiResponse, ApiError>,
    queries: &QueryCounter,
    presentation: Presentation,
) -> DispatchOutcome {
    let feature = request.feature();
    let mut state = session.lock().await;
    if !state.is_current(ticket) {
        debug!(
            page = ticket.page.slug(),
            feature = feature.as_str(),
            "dropping result for superseded dispatch"
        );
        return DispatchOutcome::Superseded;
    }

    info!(
        session_id = %state.id(),
        page = ticket.page.slug(),
        feature = feature.as_str(),
        succeeded = outcome.is_ok(),
        queries_made = queries.get(),
        "query completed"
    );
    state
        .controller_mut()
        .complete(request, outcome, presentation);

    DispatchOutcome::Completed
}
