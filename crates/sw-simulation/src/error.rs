use sw_core::CoreError;

use crate::ship::ShipId;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while setting up or driving a match.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No ship with this id is in the match.
    #[error("ship not found in match: {0}")]
    ShipNotFound(ShipId),

    /// The match config cannot produce a playable world.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),

    /// Bad bounds or tuning values.
    #[error(transparent)]
    Core(#[from] CoreError),
}
