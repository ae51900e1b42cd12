//! JSON save files.
//!
//! A snapshot stores the board as a list of occupied cells, the players with
//! their hands and scores, the turn counters and the tiles left in the bag.
//! The bag's random state is not stored; a restored game gets a fresh seed.
use crate::engine::{Board, Tile, BOARD_SIZE};
use crate::error::{GameError, GameResult};
use crate::game::Player;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub is_empty: bool,
    pub cells: Vec<CellRecord>,
}

/// Everything needed to resume a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub players: Vec<Player>,
    pub current: usize,
    pub pass_count: usize,
    pub finished: bool,
    pub bag: Vec<Tile>,
}

impl GameSnapshot {
    /// Every physical tile may appear at most once across board, hands and bag.
    pub fn check_tiles(&self) -> GameResult<()> {
        let mut seen = HashSet::new();
        let board = self.board.cells.iter().map(|cell| cell.tile);
        let hands = self.players.iter().flat_map(|p| p.hand().iter().copied());
        for tile in board.chain(hands).chain(self.bag.iter().copied()) {
            if !seen.insert(tile) {
                return Err(GameError::CorruptedSnapshot(format!(
                    "tile {:?} appears more than once",
                    tile
                )));
            }
        }
        Ok(())
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: BOARD_SIZE,
            is_empty: self.is_empty(),
            cells: self
                .occupied()
                .map(|(row, col, tile)| CellRecord { row, col, tile })
                .collect(),
        }
    }

    /// Rebuilds a board from `snapshot`. The cells are not re-checked against
    /// the placement rules, only for being on the board and not overlapping.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> GameResult<Board> {
        if snapshot.size != BOARD_SIZE {
            return Err(GameError::CorruptedSnapshot(format!(
                "board size {} instead of {}",
                snapshot.size, BOARD_SIZE
            )));
        }
        if snapshot.is_empty != snapshot.cells.is_empty() {
            return Err(GameError::CorruptedSnapshot(
                "empty flag does not match the stored cells".to_string(),
            ));
        }
        let mut board = Board::new();
        for cell in &snapshot.cells {
            if cell.row >= BOARD_SIZE || cell.col >= BOARD_SIZE {
                return Err(GameError::CorruptedSnapshot(format!(
                    "cell ({}, {}) is off the board",
                    cell.row, cell.col
                )));
            }
            if board.get(cell.row as i32, cell.col as i32).is_some() {
                return Err(GameError::CorruptedSnapshot(format!(
                    "cell ({}, {}) is stored twice",
                    cell.row, cell.col
                )));
            }
            board.restore_cell(cell.row, cell.col, cell.tile);
        }
        Ok(board)
    }
}

/// Writes `snapshot` to `path` as pretty-printed JSON.
pub fn save(snapshot: &GameSnapshot, path: impl AsRef<Path>) -> GameResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    info!("game saved to {}", path.display());
    Ok(())
}

/// Reads a snapshot written by [`save`].
pub fn load(path: impl AsRef<Path>) -> GameResult<GameSnapshot> {
    let path = path.as_ref();
    let snapshot: GameSnapshot = serde_json::from_str(&fs::read_to_string(path)?)?;
    info!("game restored from {}", path.display());
    Ok(snapshot)
}
