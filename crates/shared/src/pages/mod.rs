pub mod controller;
pub mod dispatch;
pub mod layout;
pub mod render;
pub mod shell;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use controller::{ControllerPhase, PageController, SubmitError};
pub use dispatch::{DispatchOutcome, SessionError, submit_query};
pub use layout::{PageView, ResourcesView, page_view, resources_view};
pub use render::{CitationView, ErrorKind, ErrorView, Notice, NoticeLevel, Panel, ResultView};
pub use shell::{ShellView, render_shell};

/// Rendering detail of page views. `Basic` keeps results plain; `Enhanced`
/// adds badges, guidance panels and tips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    Basic,
    #[default]
    Enhanced,
}

impl Presentation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enhanced => "enhanced",
        }
    }
}

impl FromStr for Presentation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(format!("unknown presentation '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Presentation;

    #[test]
    fn parses_presentation_case_insensitively() {
        assert_eq!("Basic".parse::<Presentation>(), Ok(Presentation::Basic));
        assert_eq!(" enhanced ".parse::<Presentation>(), Ok(Presentation::Enhanced));
        assert!("fancy".parse::<Presentation>().is_err());
    }
}
