use thiserror::Error;

use crate::diagnosis::DiagnosisError;
use crate::report::ReportError;
use crate::submission::SubmissionError;

#[derive(Debug, Error)]
pub enum LeafDxError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<LeafDxError> for String {
    fn from(err: LeafDxError) -> Self {
        err.to_string()
    }
}
