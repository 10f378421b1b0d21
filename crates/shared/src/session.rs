use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pages::PageController;

/// Bearer secret for the completions API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn is_present(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Shared "queries made" counter. Cloning shares the underlying count.
#[derive(Debug, Clone, Default)]
pub struct QueryCounter(Arc<AtomicU64>);

impl QueryCounter {
    /// Returns the count including this attempt.
    pub fn record_attempt(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    SymptomExplorer,
    DrugInteractions,
    MedicalTranslator,
    HealthResources,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Self::SymptomExplorer,
        Self::DrugInteractions,
        Self::MedicalTranslator,
        Self::HealthResources,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::SymptomExplorer => "symptom-explorer",
            Self::DrugInteractions => "drug-interactions",
            Self::MedicalTranslator => "medical-translator",
            Self::HealthResources => "health-resources",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SymptomExplorer => "Symptom Explorer",
            Self::DrugInteractions => "Drug Interaction Checker",
            Self::MedicalTranslator => "Medical Translator",
            Self::HealthResources => "Health Resources",
        }
    }

    pub const fn dispatches_queries(self) -> bool {
        !matches!(self, Self::HealthResources)
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.slug() == value)
            .ok_or_else(|| format!("unknown page '{value}'"))
    }
}

/// Identifies the navigation state a dispatch started under. A result is only
/// applied while the session is still on the same page and epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTicket {
    pub page: Page,
    pub epoch: u64,
}

#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Utc>,
    credential: Option<Credential>,
    queries: QueryCounter,
    active_page: Page,
    epoch: u64,
    controller: PageController,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            credential: None,
            queries: QueryCounter::default(),
            active_page: Page::default(),
            epoch: 0,
            controller: PageController::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Overwrites the stored credential. Blank input clears it.
    pub fn set_credential(&mut self, raw: &str) {
        let credential = Credential::new(raw);
        self.credential = credential.is_present().then_some(credential);
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn queries(&self) -> &QueryCounter {
        &self.queries
    }

    pub fn queries_made(&self) -> u64 {
        self.queries.get()
    }

    pub fn active_page(&self) -> Page {
        self.active_page
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PageController {
        &mut self.controller
    }

    pub fn ticket(&self) -> DispatchTicket {
        DispatchTicket {
            page: self.active_page,
            epoch: self.epoch,
        }
    }

    pub fn is_current(&self, ticket: DispatchTicket) -> bool {
        self.active_page == ticket.page && self.epoch == ticket.epoch
    }

    /// Selects a page. Switching discards the previous page's controller state
    /// and invalidates any in-flight dispatch. Returns whether the page changed.
    pub fn navigate(&mut self, page: Page) -> bool {
        if page == self.active_page {
            return false;
        }

        self.active_page = page;
        self.epoch += 1;
        self.controller = PageController::default();
        true
    }

    /// Returns the session to its freshly-loaded state, keeping only its id.
    /// In-flight dispatches keep counting against the old counter.
    pub fn reset(&mut self) {
        self.credential = None;
        self.queries = QueryCounter::default();
        self.active_page = Page::default();
        self.epoch += 1;
        self.controller = PageController::default();
        self.started_at = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
