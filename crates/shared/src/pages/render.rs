use serde::Serialize;

use super::Presentation;
use crate::catalog::emergency_number;
use crate::llm::{ApiResponse, Feature, QueryFields, QueryRequest};

const DEFAULT_CITATION_TITLE: &str = "Medical Source";
const EMPTY_RESPONSE_NOTICE: &str = "No content was returned for this query.";
const INTERACTION_WARNING: &str = "Important: This information is for educational purposes only. Always consult your pharmacist or doctor before making any changes to your medications.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub heading: String,
    pub items: Vec<String>,
}

impl Panel {
    pub(super) fn new(heading: &str, items: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            items: items.iter().map(|item| (*item).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationView {
    pub index: usize,
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub feature: Feature,
    pub title: String,
    pub subtitle: Option<String>,
    pub badges: Vec<String>,
    /// Model answer, markdown.
    pub content: String,
    pub original_text: Option<String>,
    pub citations: Vec<CitationView>,
    pub notices: Vec<Notice>,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    MissingRequiredField,
    Transport,
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub level: NoticeLevel,
    pub code: String,
    pub message: String,
}

impl ErrorView {
    pub fn missing_credential() -> Self {
        Self {
            kind: ErrorKind::MissingCredential,
            level: NoticeLevel::Error,
            code: "missing_credential".to_string(),
            message: "Please enter your Perplexity API key first.".to_string(),
        }
    }

    pub fn missing_field(code: &str, message: String) -> Self {
        Self {
            kind: ErrorKind::MissingRequiredField,
            level: NoticeLevel::Warning,
            code: code.to_string(),
            message,
        }
    }

    pub fn transport(diagnostic: String) -> Self {
        Self {
            kind: ErrorKind::Transport,
            level: NoticeLevel::Error,
            code: "api_request_failed".to_string(),
            message: format!("API request failed: {diagnostic}"),
        }
    }

    pub fn empty_response() -> Self {
        Self {
            kind: ErrorKind::EmptyResponse,
            level: NoticeLevel::Info,
            code: "empty_response".to_string(),
            message: EMPTY_RESPONSE_NOTICE.to_string(),
        }
    }
}

/// Builds the result view for a response that carries content.
pub fn render_result(
    request: &QueryRequest,
    response: &ApiResponse,
    presentation: Presentation,
) -> ResultView {
    let enhanced = presentation == Presentation::Enhanced;
    let mut view = ResultView {
        feature: request.feature(),
        title: String::new(),
        subtitle: None,
        badges: Vec::new(),
        content: response.content.clone().unwrap_or_default(),
        original_text: None,
        citations: citation_views(response),
        notices: Vec::new(),
        panels: Vec::new(),
    };

    match request.fields() {
        QueryFields::Symptom {
            symptom,
            age_group,
            severity,
            duration,
        } => {
            if enhanced {
                view.title = format!("Medical Information: {}", title_case(symptom));
                view.badges = vec![
                    age_group.label().to_string(),
                    severity.label().to_string(),
                    duration.label().to_string(),
                ];
                view.panels = symptom_panels();
            } else {
                view.title = format!("Information about: {}", title_case(symptom));
            }
        }
        QueryFields::Interaction { medications } => {
            view.title = "Drug Interaction Analysis".to_string();
            view.subtitle = Some(format!("Medications checked: {}", medications.join(", ")));
            view.notices.push(Notice {
                level: NoticeLevel::Warning,
                text: INTERACTION_WARNING.to_string(),
            });
        }
        QueryFields::TermTranslation { term } => {
            view.title = format!("Translation for: {}", title_case(term));
            if enhanced {
                view.subtitle = Some(
                    "Patient-friendly explanation from trusted medical sources".to_string(),
                );
                view.panels = vec![
                    Panel::new(
                        "Learn More",
                        &[
                            "Ask your healthcare provider",
                            "Request printed materials",
                            "Join patient education classes",
                        ],
                    ),
                    Panel::new(
                        "Questions to Ask",
                        &[
                            "What does this mean for me?",
                            "What are my treatment options?",
                            "What should I expect?",
                        ],
                    ),
                ];
            }
        }
        QueryFields::DocumentTranslation { text } => {
            view.title = "Patient-Friendly Translation".to_string();
            if enhanced {
                view.original_text = Some(text.clone());
                view.panels = vec![
                    Panel::new(
                        "Discuss with Your Doctor",
                        &[
                            "Ask about anything unclear",
                            "Request additional explanations",
                            "Discuss treatment options",
                        ],
                    ),
                    Panel::new(
                        "Keep Records",
                        &[
                            "Save both versions",
                            "Share with family if needed",
                            "Bring to appointments",
                        ],
                    ),
                    Panel::new(
                        "Research Further",
                        &[
                            "Use trusted medical websites",
                            "Join patient support groups",
                            "Seek second opinions if needed",
                        ],
                    ),
                ];
            }
        }
    }

    view
}

fn citation_views(response: &ApiResponse) -> Vec<CitationView> {
    response
        .citations
        .iter()
        .enumerate()
        .map(|(index, citation)| CitationView {
            index: index + 1,
            title: citation
                .title
                .clone()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CITATION_TITLE.to_string()),
            url: citation.url.clone(),
        })
        .collect()
}

fn symptom_panels() -> Vec<Panel> {
    let us_emergency = emergency_number("US", "emergency").unwrap_or("911");
    let eu_emergency = emergency_number("EU", "emergency").unwrap_or("112");
    let poison_control = emergency_number("US", "poison_control").unwrap_or("1-800-222-1222");
    let crisis_line = emergency_number("US", "mental_health").unwrap_or("988");

    vec![
        Panel::new(
            "When to Seek Emergency Care",
            &[
                "Severe chest pain or difficulty breathing",
                "Sudden severe headache or confusion",
                "Signs of severe bleeding or trauma",
                "High fever with severe symptoms",
                "Loss of consciousness or severe weakness",
            ],
        ),
        Panel {
            heading: "Need immediate help?".to_string(),
            items: vec![
                format!("Emergency: {us_emergency} (US) / {eu_emergency} (EU)"),
                format!("Poison Control: {poison_control}"),
                format!("Crisis Line: {crisis_line}"),
            ],
        },
        Panel::new(
            "Next Steps",
            &[
                "Consult your healthcare provider",
                "Keep a symptom diary",
                "Note any triggers or patterns",
            ],
        ),
    ]
}

/// Capitalizes the first letter of every word and lowercases the rest.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }
    output
}
