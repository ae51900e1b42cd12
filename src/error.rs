//! Error types for the rules engine and the game built on top of it.
//!
//! Every rejected move is reported through one of these enums instead of a
//! panic. A `PlacementError` guarantees the board was left untouched.

use thiserror::Error;

/// Why the board refused a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The opening move was used twice, or a regular move before the opening.
    #[error("{0}")]
    WrongPhase(&'static str),

    #[error("The chosen cell is located outside the grid.")]
    OutOfBounds,

    #[error("The chosen cell is already occupied by a tile.")]
    CellOccupied,

    /// The move does not touch the tiles already on the board (or the
    /// previously placed tile of the same move).
    #[error("Prohibited action: {0}")]
    NotConnected(&'static str),

    #[error("Maximum of six tiles allowed on a line.")]
    TooLong,

    #[error("At least one tile required on a line.")]
    TooShort,

    /// Two tiles of one line share both their color and their shape.
    #[error("Duplicate tiles found on a single line.")]
    DuplicateTile,

    /// Two tiles of one line share neither color nor shape, or break the
    /// line's matching mode.
    #[error("Tiles have no shared attributes.")]
    AttributeMismatch,

    #[error("Prohibited: Tiles sharing the same cell.")]
    SameCell,

    #[error("Prohibited: Tiles are not aligned.")]
    Misaligned,

    #[error("You have to keep the same direction.")]
    InconsistentDirection,
}

/// Failures of the tile supply.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagError {
    #[error("The number of tiles must be strictly positive.")]
    InvalidCount,

    #[error("There are no more tiles in the bag.")]
    Exhausted,
}

/// Errors surfaced by the turn orchestration layer.
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Bag(#[from] BagError),

    #[error("A game needs at least two players, got {0}.")]
    NotEnoughPlayers(usize),

    #[error("The selected tiles do not exist.")]
    UnknownTile,

    #[error("You cannot select many times the same tile.")]
    RepeatedTile,

    #[error("Insufficient tiles for the action.")]
    InsufficientTiles,

    #[error("The game is already over.")]
    GameOver,

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Corrupted snapshot: {0}")]
    CorruptedSnapshot(String),
}

/// Errors raised while reading a console command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("This command does not exist, please try again.")]
    Unknown,

    #[error("Command '{command}' is malformed: {reason}")]
    Malformed { command: char, reason: String },

    #[error("Unrecognized tile notation '{0}'")]
    BadTile(String),
}

/// Result type alias for board moves.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Result type alias for game operations.
pub type GameResult<T> = Result<T, GameError>;
