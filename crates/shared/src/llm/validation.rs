use serde::Deserialize;
use thiserror::Error;

use super::prompts::{AgeGroup, QueryFields, Severity, SymptomDuration};

pub const MAX_SHORT_FIELD_CHARS: usize = 200;
pub const MAX_DOCUMENT_CHARS: usize = 10_000;
pub const MAX_MEDICATIONS: usize = 20;
pub const MIN_MEDICATIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("at least {MIN_MEDICATIONS} medications are required, got {found}")]
    TooFewMedications { found: usize },
    #[error("at most {MAX_MEDICATIONS} medications can be checked at once, got {found}")]
    TooManyMedications { found: usize },
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} contains unsupported control characters")]
    ControlCharacters { field: &'static str },
}

impl ValidationError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_required_field",
            Self::TooFewMedications { .. } => "too_few_medications",
            Self::TooManyMedications { .. } => "too_many_medications",
            Self::TooLong { .. } => "field_too_long",
            Self::ControlCharacters { .. } => "invalid_characters",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymptomForm {
    #[serde(default)]
    pub symptom: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub duration: SymptomDuration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionForm {
    #[serde(default)]
    pub first_medication: String,
    #[serde(default)]
    pub second_medication: String,
    /// One medication per line.
    #[serde(default)]
    pub medication_list: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TranslatorForm {
    Term {
        #[serde(default)]
        term: String,
    },
    Document {
        #[serde(default)]
        text: String,
    },
}

impl SymptomForm {
    pub fn validate(&self) -> Result<QueryFields, ValidationError> {
        Ok(QueryFields::Symptom {
            symptom: single_line_field("symptom", &self.symptom)?,
            age_group: self.age_group,
            severity: self.severity,
            duration: self.duration,
        })
    }
}

impl InteractionForm {
    /// Both single fields filled wins; otherwise the list is used.
    pub fn validate(&self) -> Result<QueryFields, ValidationError> {
        let first = self.first_medication.trim();
        let second = self.second_medication.trim();

        let medications = if !first.is_empty() && !second.is_empty() {
            vec![
                single_line_field("first_medication", first)?,
                single_line_field("second_medication", second)?,
            ]
        } else {
            parse_medication_list(&self.medication_list)?
        };

        if medications.len() < MIN_MEDICATIONS {
            return Err(ValidationError::TooFewMedications {
                found: medications.len(),
            });
        }

        Ok(QueryFields::Interaction { medications })
    }
}

impl TranslatorForm {
    pub fn validate(&self) -> Result<QueryFields, ValidationError> {
        match self {
            Self::Term { term } => Ok(QueryFields::TermTranslation {
                term: single_line_field("term", term)?,
            }),
            Self::Document { text } => Ok(QueryFields::DocumentTranslation {
                text: document_field("text", text)?,
            }),
        }
    }
}

pub fn parse_medication_list(raw: &str) -> Result<Vec<String>, ValidationError> {
    let medications = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| single_line_field("medication_list", line))
        .collect::<Result<Vec<_>, _>>()?;

    if medications.len() > MAX_MEDICATIONS {
        return Err(ValidationError::TooManyMedications {
            found: medications.len(),
        });
    }

    Ok(medications)
}

fn single_line_field(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if trimmed.chars().count() > MAX_SHORT_FIELD_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_SHORT_FIELD_CHARS,
        });
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacters { field });
    }

    Ok(trimmed.to_string())
}

fn document_field(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if raw.chars().count() > MAX_DOCUMENT_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_DOCUMENT_CHARS,
        });
    }
    if raw
        .chars()
        .any(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
    {
        return Err(ValidationError::ControlCharacters { field });
    }

    Ok(raw.to_string())
}
