use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Presentation;
use super::layout::{PageView, page_view};
use crate::catalog::{
    APP_POWERED_BY, APP_TAGLINE, APP_TITLE, CREDENTIAL_HELP_URL, CREDENTIAL_PLACEHOLDER,
    DISCLAIMER_POINTS, DISCLAIMER_SUMMARY, DISCLAIMER_TITLE,
};
use crate::session::{Page, SessionState};

#[derive(Debug, Clone, Serialize)]
pub struct DisclaimerView {
    pub title: &'static str,
    pub summary: &'static str,
    pub points: &'static [&'static str],
}

/// Credential-entry affordance. Never carries the credential itself.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialPrompt {
    pub configured: bool,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub help_url: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationItem {
    pub page: Page,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub queries_made: u64,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub session_id: Uuid,
    pub title: &'static str,
    pub tagline: &'static str,
    pub powered_by: &'static str,
    pub presentation: Presentation,
    pub disclaimer: DisclaimerView,
    pub credential: CredentialPrompt,
    pub navigation: Vec<NavigationItem>,
    pub stats: SessionStats,
    pub page: PageView,
}

pub fn render_shell(session: &SessionState, presentation: Presentation) -> ShellView {
    let configured = session.has_credential();
    let active = session.active_page();

    ShellView {
        session_id: session.id(),
        title: APP_TITLE,
        tagline: APP_TAGLINE,
        powered_by: APP_POWERED_BY,
        presentation,
        disclaimer: DisclaimerView {
            title: DISCLAIMER_TITLE,
            summary: DISCLAIMER_SUMMARY,
            points: DISCLAIMER_POINTS,
        },
        credential: CredentialPrompt {
            configured,
            label: "Perplexity API Key",
            placeholder: CREDENTIAL_PLACEHOLDER,
            help_url: CREDENTIAL_HELP_URL,
            status: if configured {
                "API Key configured"
            } else {
                "Please enter your Perplexity API key to use the app"
            },
        },
        navigation: Page::ALL
            .into_iter()
            .map(|page| NavigationItem {
                page,
                label: page.label(),
                active: page == active,
            })
            .collect(),
        stats: SessionStats {
            queries_made: session.queries_made(),
            started_at: session.started_at(),
        },
        page: page_view(session, presentation),
    }
}
