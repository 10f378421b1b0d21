//! Static, process-wide reference data: the completions endpoint, the model,
//! the trusted-source list and the resource browser content.

use serde::Serialize;

pub const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";

pub const APP_TITLE: &str = "Dr. Home";
pub const APP_TAGLINE: &str = "Your AI-Powered Health Information Platform";
pub const APP_POWERED_BY: &str = "Powered by Perplexity AI • Evidence-based • Trusted Sources";

pub const TRUSTED_MEDICAL_SOURCES: &[&str] = &[
    "PubMed/MEDLINE articles",
    "NIH (National Institutes of Health)",
    "WHO (World Health Organization)",
    "CDC (Centers for Disease Control)",
    "Mayo Clinic",
    "WebMD",
    "Medical journals and peer-reviewed research",
];

pub const DISCLAIMER_TITLE: &str = "IMPORTANT MEDICAL DISCLAIMER";
pub const DISCLAIMER_SUMMARY: &str =
    "This platform is for educational purposes only and does not replace professional medical advice.";
pub const DISCLAIMER_POINTS: &[&str] = &[
    "Always consult healthcare professionals for medical concerns",
    "In emergencies, call your local emergency number immediately",
    "This information should not be used for self-diagnosis or treatment",
    "Drug interactions shown are for reference only - consult your pharmacist or doctor",
];

pub const CREDENTIAL_HELP_URL: &str = "https://perplexity.ai";
pub const CREDENTIAL_PLACEHOLDER: &str = "pplx-...";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmergencyContact {
    pub region: &'static str,
    pub service: &'static str,
    pub number: &'static str,
}

pub const EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        region: "US",
        service: "emergency",
        number: "911",
    },
    EmergencyContact {
        region: "US",
        service: "poison_control",
        number: "1-800-222-1222",
    },
    EmergencyContact {
        region: "US",
        service: "mental_health",
        number: "988",
    },
    EmergencyContact {
        region: "EU",
        service: "emergency",
        number: "112",
    },
];

pub fn emergency_number(region: &str, service: &str) -> Option<&'static str> {
    EMERGENCY_CONTACTS
        .iter()
        .find(|contact| contact.region == region && contact.service == service)
        .map(|contact| contact.number)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceLink {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceOrganization {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub links: &'static [ResourceLink],
}

pub const HEALTH_RESOURCES: &[ResourceOrganization] = &[
    ResourceOrganization {
        key: "NIH",
        title: "NIH (National Institutes of Health)",
        description: "The nation's medical research agency, providing comprehensive health information.",
        links: &[
            ResourceLink {
                name: "MedlinePlus",
                url: "https://medlineplus.gov",
            },
            ResourceLink {
                name: "PubMed",
                url: "https://pubmed.ncbi.nlm.nih.gov",
            },
        ],
    },
    ResourceOrganization {
        key: "WHO",
        title: "WHO (World Health Organization)",
        description: "Global health authority providing international health guidance and information.",
        links: &[ResourceLink {
            name: "Health Topics",
            url: "https://www.who.int/health-topics",
        }],
    },
    ResourceOrganization {
        key: "CDC",
        title: "CDC (Centers for Disease Control)",
        description: "Leading national public health institute providing disease prevention information.",
        links: &[ResourceLink {
            name: "Health Information",
            url: "https://www.cdc.gov",
        }],
    },
    ResourceOrganization {
        key: "Mayo Clinic",
        title: "Mayo Clinic",
        description: "Renowned medical institution offering patient care information and health resources.",
        links: &[ResourceLink {
            name: "Diseases & Conditions",
            url: "https://www.mayoclinic.org",
        }],
    },
];

pub const RESEARCH_DATABASES: &[&str] = &[
    "PubMed - Medical literature database",
    "Cochrane Library - Systematic reviews",
    "ClinicalTrials.gov - Clinical trial information",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmergencySituation {
    pub situation: &'static str,
    pub description: &'static str,
}

pub const EMERGENCY_SITUATIONS: &[EmergencySituation] = &[
    EmergencySituation {
        situation: "Chest Pain",
        description: "Severe chest pain, pressure, or discomfort",
    },
    EmergencySituation {
        situation: "Stroke Signs",
        description: "Sudden weakness, confusion, or speech problems",
    },
    EmergencySituation {
        situation: "Breathing Issues",
        description: "Severe difficulty breathing or shortness of breath",
    },
    EmergencySituation {
        situation: "Severe Bleeding",
        description: "Uncontrolled bleeding or major trauma",
    },
    EmergencySituation {
        situation: "High Fever",
        description: "Very high fever with severe symptoms",
    },
    EmergencySituation {
        situation: "Loss of Consciousness",
        description: "Fainting, seizures, or unresponsiveness",
    },
];

pub const COMMON_MEDICAL_TERMS: &[&str] = &[
    "Myocardial Infarction",
    "Pneumonia",
    "Hypertension",
    "Diabetes Mellitus",
    "Osteoarthritis",
];
