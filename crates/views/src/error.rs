use crate::request::{Analysis, Page};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Unknown page '{0}'")]
    UnknownPage(String),

    #[error("Unknown analysis '{0}'")]
    UnknownAnalysis(String),

    #[error("Analysis '{analysis}' is not available on page '{page}'")]
    AnalysisNotOnPage { page: Page, analysis: Analysis },
}
