use serde::{Deserialize, Serialize};

use crate::catalog::TRUSTED_MEDICAL_SOURCES;

pub const SYSTEM_PROMPT: &str = "You are a medical information assistant that provides accurate, evidence-based health information from trusted sources. Always include disclaimers about consulting healthcare professionals and cite your sources.";

pub const TRUSTED_SOURCES_PREAMBLE: &str =
    "Please provide information from trusted medical sources only, including:";

pub const CITATION_DISCLAIMER: &str =
    "Always include source citations and emphasize that this is for educational purposes only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Symptom,
    Interaction,
    TermTranslation,
    DocumentTranslation,
}

impl Feature {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Interaction => "interaction",
            Self::TermTranslation => "term_translation",
            Self::DocumentTranslation => "document_translation",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    #[default]
    AllAges,
    Children,
    Teenagers,
    Adults,
    Elderly,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        Self::AllAges,
        Self::Children,
        Self::Teenagers,
        Self::Adults,
        Self::Elderly,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllAges => "all_ages",
            Self::Children => "children",
            Self::Teenagers => "teenagers",
            Self::Adults => "adults",
            Self::Elderly => "elderly",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AllAges => "All ages",
            Self::Children => "Children (0-12)",
            Self::Teenagers => "Teenagers (13-17)",
            Self::Adults => "Adults (18-64)",
            Self::Elderly => "Elderly (65+)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    AllLevels,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::AllLevels, Self::Mild, Self::Moderate, Self::Severe];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllLevels => "all_levels",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AllLevels => "All levels",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    #[default]
    AnyDuration,
    Acute,
    Subacute,
    Chronic,
}

impl SymptomDuration {
    pub const ALL: [SymptomDuration; 4] = [
        Self::AnyDuration,
        Self::Acute,
        Self::Subacute,
        Self::Chronic,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnyDuration => "any_duration",
            Self::Acute => "acute",
            Self::Subacute => "subacute",
            Self::Chronic => "chronic",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AnyDuration => "Any duration",
            Self::Acute => "Acute (< 1 week)",
            Self::Subacute => "Subacute (1-4 weeks)",
            Self::Chronic => "Chronic (> 4 weeks)",
        }
    }
}

/// Validated, feature-specific user input. Construct through
/// [`crate::llm::validation`] so required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFields {
    Symptom {
        symptom: String,
        age_group: AgeGroup,
        severity: Severity,
        duration: SymptomDuration,
    },
    Interaction {
        medications: Vec<String>,
    },
    TermTranslation {
        term: String,
    },
    DocumentTranslation {
        text: String,
    },
}

impl QueryFields {
    pub fn feature(&self) -> Feature {
        match self {
            Self::Symptom { .. } => Feature::Symptom,
            Self::Interaction { .. } => Feature::Interaction,
            Self::TermTranslation { .. } => Feature::TermTranslation,
            Self::DocumentTranslation { .. } => Feature::DocumentTranslation,
        }
    }
}

/// One submission, frozen at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    feature: Feature,
    fields: QueryFields,
    prompt: String,
}

impl QueryRequest {
    pub fn new(fields: QueryFields) -> Self {
        Self {
            feature: fields.feature(),
            prompt: build_prompt(&fields),
            fields,
        }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn fields(&self) -> &QueryFields {
        &self.fields
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

pub fn build_prompt(fields: &QueryFields) -> String {
    let body = match fields {
        QueryFields::Symptom {
            symptom,
            age_group,
            severity,
            duration,
        } => symptom_prompt(symptom, *age_group, *severity, *duration),
        QueryFields::Interaction { medications } => interaction_prompt(medications),
        QueryFields::TermTranslation { term } => term_prompt(term),
        QueryFields::DocumentTranslation { text } => document_prompt(text),
    };

    with_trusted_sources(&body)
}

fn with_trusted_sources(body: &str) -> String {
    let sources = TRUSTED_MEDICAL_SOURCES.join("\n- ");
    format!("{body}\n\n{TRUSTED_SOURCES_PREAMBLE}\n- {sources}\n\n{CITATION_DISCLAIMER}")
}

fn symptom_prompt(
    symptom: &str,
    age_group: AgeGroup,
    severity: Severity,
    duration: SymptomDuration,
) -> String {
    format!(
        "Provide comprehensive information about the symptom: {symptom}\n\
         \n\
         Please include:\n\
         1. Medical definition and description\n\
         2. Common causes (most frequent reasons)\n\
         3. Serious causes that require immediate medical attention\n\
         4. When to seek emergency care\n\
         5. Typical diagnostic approaches\n\
         6. General management principles\n\
         7. Red flags and warning signs\n\
         \n\
         Consider: Age group: {}, Severity: {}, Duration: {}\n\
         \n\
         Format the response clearly with headers and bullet points.",
        age_group.label(),
        severity.label(),
        duration.label(),
    )
}

fn interaction_prompt(medications: &[String]) -> String {
    format!(
        "Check for drug interactions between these medications: {}\n\
         \n\
         Please provide:\n\
         1. Major interactions (clinically significant)\n\
         2. Moderate interactions (monitor closely)\n\
         3. Minor interactions (minimal clinical significance)\n\
         4. Mechanism of interaction\n\
         5. Clinical management recommendations\n\
         6. Monitoring parameters\n\
         7. Alternative medications if interactions are severe\n\
         \n\
         Include severity ratings and clinical significance.",
        medications.join(", "),
    )
}

fn term_prompt(term: &str) -> String {
    format!(
        "Explain the medical term: {term}\n\
         \n\
         Please provide:\n\
         1. Simple, easy-to-understand definition\n\
         2. Common name or lay term\n\
         3. Pronunciation guide\n\
         4. What causes this condition\n\
         5. Common symptoms\n\
         6. How it's diagnosed\n\
         7. Treatment options\n\
         8. Prognosis and outlook\n\
         9. Related terms\n\
         \n\
         Use simple language that a patient would understand."
    )
}

fn document_prompt(text: &str) -> String {
    format!(
        "Translate this medical text into simple, patient-friendly language:\n\
         \n\
         {text}\n\
         \n\
         Please:\n\
         1. Replace medical jargon with simple terms\n\
         2. Explain what each finding means\n\
         3. Highlight important information\n\
         4. Maintain accuracy while improving readability\n\
         5. Add context where helpful\n\
         \n\
         Keep the same structure but make it understandable for patients."
    )
}
