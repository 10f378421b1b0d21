use serde::Serialize;
use thiserror::Error;

use super::Presentation;
use super::render::{ErrorView, ResultView, render_result};
use crate::llm::{ApiError, ApiResponse, Feature, QueryFields, QueryRequest, ValidationError};
use crate::session::Credential;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ControllerPhase {
    #[default]
    Idle,
    /// Transient: only observable inside [`PageController::begin_submit`].
    Validating,
    AwaitingResponse {
        feature: Feature,
    },
    RenderingResult {
        result: ResultView,
    },
    RenderingError {
        error: ErrorView,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a request is already in flight for this page")]
    InFlight,
    #[error("submission rejected: {0}")]
    Invalid(String),
}

/// Per-page form state machine:
/// idle -> validating -> awaiting-response -> rendering-result | rendering-error,
/// with validation failures going straight to rendering-error and the next
/// field edit returning a rendered page to idle.
#[derive(Debug, Clone, Default)]
pub struct PageController {
    phase: ControllerPhase,
}

impl PageController {
    pub fn phase(&self) -> &ControllerPhase {
        &self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.phase, ControllerPhase::AwaitingResponse { .. })
    }

    /// On success the controller is awaiting a response and the caller owns
    /// the frozen request. A submit while awaiting leaves the state untouched.
    pub fn begin_submit(
        &mut self,
        credential: Option<&Credential>,
        fields: Result<QueryFields, ValidationError>,
    ) -> Result<QueryRequest, SubmitError> {
        if self.is_awaiting() {
            return Err(SubmitError::InFlight);
        }

        self.phase = ControllerPhase::Validating;

        if !credential.is_some_and(Credential::is_present) {
            let error = ErrorView::missing_credential();
            let message = error.message.clone();
            self.phase = ControllerPhase::RenderingError { error };
            return Err(SubmitError::Invalid(message));
        }

        match fields {
            Ok(fields) => {
                let request = QueryRequest::new(fields);
                self.phase = ControllerPhase::AwaitingResponse {
                    feature: request.feature(),
                };
                Ok(request)
            }
            Err(err) => {
                let message = err.to_string();
                self.phase = ControllerPhase::RenderingError {
                    error: ErrorView::missing_field(err.code(), field_message(&err)),
                };
                Err(SubmitError::Invalid(message))
            }
        }
    }

    /// Applies a dispatch outcome. Ignored unless a response is awaited.
    pub fn complete(
        &mut self,
        request: &QueryRequest,
        outcome: Result<ApiResponse, ApiError>,
        presentation: Presentation,
    ) {
        if !self.is_awaiting() {
            return;
        }

        self.phase = match outcome {
            Ok(response) if response.has_content() => ControllerPhase::RenderingResult {
                result: render_result(request, &response, presentation),
            },
            Ok(_) => ControllerPhase::RenderingError {
                error: ErrorView::empty_response(),
            },
            Err(ApiError::MissingCredential) => ControllerPhase::RenderingError {
                error: ErrorView::missing_credential(),
            },
            Err(ApiError::Gateway(err)) => ControllerPhase::RenderingError {
                error: ErrorView::transport(err.to_string()),
            },
        };
    }

    /// Ends an awaited request that will never produce an outcome.
    pub fn abandon(&mut self, diagnostic: &str) {
        if self.is_awaiting() {
            self.phase = ControllerPhase::RenderingError {
                error: ErrorView::transport(diagnostic.to_string()),
            };
        }
    }

    /// A field edit clears a rendered result or error.
    pub fn edit(&mut self) {
        if matches!(
            self.phase,
            ControllerPhase::RenderingResult { .. } | ControllerPhase::RenderingError { .. }
        ) {
            self.phase = ControllerPhase::Idle;
        }
    }
}

fn field_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField("symptom") => "Please enter a symptom to explore.".to_string(),
        ValidationError::MissingField("term") => {
            "Please enter a medical term to translate.".to_string()
        }
        ValidationError::MissingField("text") => {
            "Please enter some medical text to translate.".to_string()
        }
        ValidationError::TooFewMedications { .. } => {
            "Please enter at least two medications to check for interactions.".to_string()
        }
        other => {
            let mut message = other.to_string();
            if let Some(first) = message.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GatewayError;
    use crate::pages::render::ErrorKind;

    fn term_fields() -> Result<QueryFields, ValidationError> {
        Ok(QueryFields::TermTranslation {
            term: "pneumonia".to_string(),
        })
    }

    fn content_response(content: Option<&str>) -> ApiResponse {
        ApiResponse {
            status: 200,
            model: None,
            provider_request_id: None,
            content: content.map(ToString::to_string),
            citations: Vec::new(),
        }
    }

    fn error_kind(controller: &PageController) -> Option<ErrorKind> {
        match controller.phase() {
            ControllerPhase::RenderingError { error } => Some(error.kind),
            _ => None,
        }
    }

    #[test]
    fn abandon_turns_a_pending_request_into_an_error() {
        let credential = Credential::new("pplx-secret");
        let mut controller = PageController::default();

        controller.abandon("interrupted");
        assert_eq!(controller.phase(), &ControllerPhase::Idle);

        controller
            .begin_submit(Some(&credential), term_fields())
            .expect("submit should start");
        controller.abandon("interrupted");
        assert_eq!(error_kind(&controller), Some(ErrorKind::Transport));

        controller.edit();
        assert_eq!(controller.phase(), &ControllerPhase::Idle);
    }

    #[test]
    fn distinguishes_missing_credential_from_missing_field() {
        let credential = Credential::new("pplx-secret");

        let mut no_credential = PageController::default();
        assert!(no_credential.begin_submit(None, term_fields()).is_err());
        assert_eq!(error_kind(&no_credential), Some(ErrorKind::MissingCredential));

        let mut no_field = PageController::default();
        assert!(
            no_field
                .begin_submit(
                    Some(&credential),
                    Err(ValidationError::MissingField("term"))
                )
                .is_err()
        );
        assert_eq!(error_kind(&no_field), Some(ErrorKind::MissingRequiredField));
        match no_field.phase() {
            ControllerPhase::RenderingError { error } => {
                assert_eq!(error.message, "Please enter a medical term to translate.");
                assert_eq!(error.code, "missing_required_field");
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn successful_round_trip_renders_result_then_edit_returns_to_idle() {
        let credential = Credential::new("pplx-secret");
        let mut controller = PageController::default();

        let request = controller
            .begin_submit(Some(&credential), term_fields())
            .expect("submit should start");
        assert_eq!(
            controller.phase(),
            &ControllerPhase::AwaitingResponse {
                feature: Feature::TermTranslation
            }
        );

        controller.complete(
            &request,
            Ok(content_response(Some("An infection of the lungs."))),
            Presentation::Enhanced,
        );
        assert!(matches!(
            controller.phase(),
            ControllerPhase::RenderingResult { result } if result.content == "An infection of the lungs."
        ));

        controller.edit();
        assert_eq!(controller.phase(), &ControllerPhase::Idle);
    }

    #[test]
    fn rejects_a_second_submit_while_awaiting() {
        let credential = Credential::new("pplx-secret");
        let mut controller = PageController::default();
        controller
            .begin_submit(Some(&credential), term_fields())
            .expect("submit should start");

        assert_eq!(
            controller.begin_submit(Some(&credential), term_fields()),
            Err(SubmitError::InFlight)
        );
        assert!(controller.is_awaiting());

        controller.edit();
        assert!(controller.is_awaiting(), "edits do not cancel a pending request");
    }

    #[test]
    fn empty_and_failed_responses_render_errors() {
        let credential = Credential::new("pplx-secret");

        let mut empty = PageController::default();
        let request = empty
            .begin_submit(Some(&credential), term_fields())
            .expect("submit should start");
        empty.complete(&request, Ok(content_response(None)), Presentation::Basic);
        assert_eq!(error_kind(&empty), Some(ErrorKind::EmptyResponse));

        let mut failed = PageController::default();
        let request = failed
            .begin_submit(Some(&credential), term_fields())
            .expect("submit should start");
        failed.complete(
            &request,
            Err(ApiError::Gateway(GatewayError::HttpStatus {
                status: 401,
                message: "Invalid API key".to_string(),
            })),
            Presentation::Basic,
        );
        match failed.phase() {
            ControllerPhase::RenderingError { error } => {
                assert_eq!(error.kind, ErrorKind::Transport);
                assert!(error.message.contains("status 401"));
                assert!(error.message.contains("Invalid API key"));
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn completion_without_pending_request_is_ignored() {
        let mut controller = PageController::default();
        let request = QueryRequest::new(term_fields().expect("fields"));
        controller.complete(
            &request,
            Ok(content_response(Some("late"))),
            Presentation::Basic,
        );
        assert_eq!(controller.phase(), &ControllerPhase::Idle);
    }
}
