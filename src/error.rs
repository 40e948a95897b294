use thiserror::Error;

use crate::model::ViewId;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("no delegate registered under `{0}`")]
    UnresolvedDelegate(String),
    #[error("invalid gesture config: {0}")]
    InvalidConfig(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} is not attached")]
    UnknownView(ViewId),
    #[error("gesture manager is already dispatching")]
    Reentrant,
}

pub type Result<T> = std::result::Result<T, GestureError>;
