use serde::Serialize;

use super::Presentation;
use super::controller::ControllerPhase;
use super::render::Panel;
use crate::catalog::{
    COMMON_MEDICAL_TERMS, EMERGENCY_CONTACTS, EMERGENCY_SITUATIONS, EmergencyContact,
    EmergencySituation, HEALTH_RESOURCES, RESEARCH_DATABASES, ResourceOrganization,
};
use crate::llm::validation::{MAX_DOCUMENT_CHARS, MAX_MEDICATIONS, MAX_SHORT_FIELD_CHARS};
use crate::llm::{AgeGroup, Severity, SymptomDuration};
use crate::session::{Page, SessionState};

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text { max_chars: usize },
    Multiline { max_chars: usize, max_lines: Option<usize> },
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub help: Option<&'static str>,
}

/// A form the client posts to `submit_path`. `mode`, when set, must be sent
/// back verbatim as the `mode` member of the body.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub id: &'static str,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub submit_path: String,
    pub mode: Option<&'static str>,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const CALCULATORS: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "bmi",
        label: "BMI Calculator",
        path: "/v1/calculators/bmi",
        description: "Calculate your BMI to understand your weight status relative to your height.",
    },
    CalculatorEntry {
        id: "heart-rate",
        label: "Heart Rate Zones",
        path: "/v1/calculators/heart-rate",
        description: "Training zones derived from an age-estimated maximum heart rate.",
    },
    CalculatorEntry {
        id: "hydration",
        label: "Hydration Calculator",
        path: "/v1/calculators/hydration",
        description: "Daily water intake estimate from body weight and activity level.",
    },
    CalculatorEntry {
        id: "calories",
        label: "Calorie Needs",
        path: "/v1/calculators/calories",
        description: "Basal and total daily energy expenditure (Mifflin-St Jeor).",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ResourcesView {
    pub organizations: &'static [ResourceOrganization],
    pub research_databases: &'static [&'static str],
    pub emergency_contacts: &'static [EmergencyContact],
    pub emergency_situations: &'static [EmergencySituation],
    pub calculators: &'static [CalculatorEntry],
}

pub fn resources_view() -> ResourcesView {
    ResourcesView {
        organizations: HEALTH_RESOURCES,
        research_databases: RESEARCH_DATABASES,
        emergency_contacts: EMERGENCY_CONTACTS,
        emergency_situations: EMERGENCY_SITUATIONS,
        calculators: CALCULATORS,
    }
}

/// Everything a client needs to draw the active page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    pub description: &'static str,
    pub controller: Option<ControllerPhase>,
    pub forms: Vec<FormView>,
    pub tips: Vec<Panel>,
    pub quick_examples: &'static [&'static str],
    pub resources: Option<ResourcesView>,
}

pub fn page_view(session: &SessionState, presentation: Presentation) -> PageView {
    let page = session.active_page();
    let phase = session.controller().phase();
    let show_tips = presentation == Presentation::Enhanced && *phase == ControllerPhase::Idle;

    let mut view = PageView {
        page,
        title: page.label(),
        description: page_description(page),
        controller: page.dispatches_queries().then(|| phase.clone()),
        forms: Vec::new(),
        tips: Vec::new(),
        quick_examples: &[],
        resources: None,
    };

    match page {
        Page::SymptomExplorer => {
            view.forms = vec![symptom_form(page)];
            if show_tips {
                view.tips = vec![
                    Panel::new(
                        "Be Specific",
                        &["Describe your symptom clearly. Instead of \"pain,\" try \"sharp chest pain\" or \"throbbing headache.\""],
                    ),
                    Panel::new(
                        "Use Filters",
                        &["Advanced options help provide more targeted information based on age, severity, and duration."],
                    ),
                    Panel::new(
                        "Multiple Sources",
                        &["Information comes from trusted medical sources like NIH, WHO, CDC, and Mayo Clinic."],
                    ),
                    Panel::new(
                        "Professional Care",
                        &["This tool provides educational information only. Always consult healthcare professionals."],
                    ),
                ];
            }
        }
        Page::DrugInteractions => {
            view.forms = vec![interaction_form(page)];
        }
        Page::MedicalTranslator => {
            view.forms = vec![term_form(page), document_form(page)];
            view.quick_examples = COMMON_MEDICAL_TERMS;
            if show_tips {
                view.tips = vec![
                    Panel::new(
                        "What Can Be Translated",
                        &[
                            "Medical reports and summaries",
                            "Lab results and test findings",
                            "Discharge instructions",
                            "Prescription information",
                            "Diagnostic explanations",
                        ],
                    ),
                    Panel::new(
                        "What You'll Get",
                        &[
                            "Plain English explanations",
                            "Context for medical findings",
                            "Simplified terminology",
                            "Highlighted important information",
                            "Maintained medical accuracy",
                        ],
                    ),
                ];
            }
        }
        Page::HealthResources => {
            view.resources = Some(resources_view());
        }
    }

    view
}

const fn page_description(page: Page) -> &'static str {
    match page {
        Page::SymptomExplorer => {
            "Get comprehensive, evidence-based information about symptoms from trusted medical sources."
        }
        Page::DrugInteractions => {
            "Check potential interactions between medications using current medical research."
        }
        Page::MedicalTranslator => {
            "Transform complex medical terminology into clear, understandable language for patients and families."
        }
        Page::HealthResources => {
            "Access trusted health information, emergency contacts, and interactive health tools."
        }
    }
}

fn submit_path(page: Page) -> String {
    format!("/v1/session/pages/{}/submit", page.slug())
}

fn text_field(
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    help: Option<&'static str>,
) -> FieldView {
    FieldView {
        name,
        label,
        kind: FieldKind::Text {
            max_chars: MAX_SHORT_FIELD_CHARS,
        },
        placeholder: Some(placeholder),
        help,
    }
}

fn select_field(
    name: &'static str,
    label: &'static str,
    help: &'static str,
    options: Vec<SelectOption>,
) -> FieldView {
    FieldView {
        name,
        label,
        kind: FieldKind::Select { options },
        placeholder: None,
        help: Some(help),
    }
}

fn symptom_form(page: Page) -> FormView {
    FormView {
        id: "symptom",
        heading: "Enter Your Symptom",
        submit_label: "Explore",
        submit_path: submit_path(page),
        mode: None,
        fields: vec![
            text_field(
                "symptom",
                "Symptom",
                "e.g., headache, chest pain, fatigue, dizziness...",
                Some("Describe your symptom in simple terms"),
            ),
            select_field(
                "age_group",
                "Age Group",
                "Filter information by age group",
                AgeGroup::ALL
                    .into_iter()
                    .map(|value| SelectOption {
                        value: value.as_str(),
                        label: value.label(),
                    })
                    .collect(),
            ),
            select_field(
                "severity",
                "Severity Level",
                "Specify the intensity of the symptom",
                Severity::ALL
                    .into_iter()
                    .map(|value| SelectOption {
                        value: value.as_str(),
                        label: value.label(),
                    })
                    .collect(),
            ),
            select_field(
                "duration",
                "Duration",
                "How long have you experienced this symptom?",
                SymptomDuration::ALL
                    .into_iter()
                    .map(|value| SelectOption {
                        value: value.as_str(),
                        label: value.label(),
                    })
                    .collect(),
            ),
        ],
    }
}

fn interaction_form(page: Page) -> FormView {
    FormView {
        id: "interaction",
        heading: "Check Interactions",
        submit_label: "Check Interactions",
        submit_path: submit_path(page),
        mode: None,
        fields: vec![
            text_field(
                "first_medication",
                "First medication",
                "e.g., warfarin, aspirin",
                None,
            ),
            text_field(
                "second_medication",
                "Second medication",
                "e.g., ibuprofen, metformin",
                None,
            ),
            FieldView {
                name: "medication_list",
                label: "Enter medications (one per line)",
                kind: FieldKind::Multiline {
                    max_chars: MAX_SHORT_FIELD_CHARS * MAX_MEDICATIONS,
                    max_lines: Some(MAX_MEDICATIONS),
                },
                placeholder: Some("warfarin\nibuprofen\nmetformin\naspirin"),
                help: Some("Used when the two single fields are not both filled"),
            },
        ],
    }
}

fn term_form(page: Page) -> FormView {
    FormView {
        id: "term",
        heading: "Medical Term Lookup",
        submit_label: "Translate",
        submit_path: submit_path(page),
        mode: Some("term"),
        fields: vec![text_field(
            "term",
            "Medical term",
            "e.g., myocardial infarction, pneumonia, hypertension...",
            Some("Enter the medical term you'd like to understand"),
        )],
    }
}

fn document_form(page: Page) -> FormView {
    FormView {
        id: "document",
        heading: "Medical Document Translation",
        submit_label: "Translate to Plain English",
        submit_path: submit_path(page),
        mode: Some("document"),
        fields: vec![FieldView {
            name: "text",
            label: "Paste your medical text here",
            kind: FieldKind::Multiline {
                max_chars: MAX_DOCUMENT_CHARS,
                max_lines: None,
            },
            placeholder: Some(
                "Enter your medical report, diagnosis, lab results, or any complex medical text...",
            ),
            help: Some(
                "Copy and paste text from medical reports, discharge summaries, lab results, etc.",
            ),
        }],
    }
}
