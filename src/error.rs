use thiserror::Error;

use crate::layout::Layout;

/// Failure raised by a [`crate::snapshot::PageSnapshot`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid element selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("snapshot unavailable: {0}")]
    Unavailable(String),
}

/// The single terminal error of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("{message}")]
    UnsupportedPage { message: &'static str },

    #[error(
        "Required elements not found ({missing}). Please ensure you're on a valid Agoda hotel or checkout page."
    )]
    PageMismatch { missing: &'static str },

    #[error("Invalid data format found on the {layout} page ({field}).")]
    MalformedField {
        layout: Layout,
        field: &'static str,
    },

    #[error("{0}")]
    UnexpectedFailure(String),
}

impl ExtractionError {
    /// Heading the host shows above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnsupportedPage { .. } => "Invalid Page",
            Self::PageMismatch { .. } | Self::MalformedField { .. } => "Data Error",
            Self::UnexpectedFailure(_) => "Error",
        }
    }
}

impl From<SnapshotError> for ExtractionError {
    fn from(err: SnapshotError) -> Self {
        Self::UnexpectedFailure(err.to_string())
    }
}
