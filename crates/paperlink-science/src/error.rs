use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScienceError {
    #[error("candidate must carry exactly one {scheme} id, found {found}")]
    ContractViolation { scheme: String, found: usize },

    #[error("candidate source failed: {0}")]
    Upstream(String),

    #[error("unknown link label: {0}")]
    UnknownLinkLabel(String),

    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error(transparent)]
    Core(#[from] paperlink_core::CoreError),
}

pub type Result<T> = std::result::Result<T, ScienceError>;
