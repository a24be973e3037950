use thiserror::Error;

use hr_core::CoreError;
use hr_graph::GraphError;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("invalid snap settings: {0}")]
    InvalidSettings(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EditResult<T> = Result<T, EditError>;
