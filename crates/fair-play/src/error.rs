use thiserror::Error;

/// Errors raised while interpreting an untyped bet request.
///
/// Only the game name can be wrong: any bet on a known game resolves, and
/// one the table does not offer simply loses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown game: {0}")]
    UnknownGame(String),
}
