use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the map")]
    OutOfBounds,
    #[error("Cell or box cannot make that transition")]
    InvalidTransition,
    #[error("Cell already holds a box")]
    Occupied,
    #[error("Cell is not free to walk into")]
    Blocked,
    #[error("Player is defeated and can no longer act")]
    Defeated,
}

pub type Result<T> = core::result::Result<T, GameError>;
