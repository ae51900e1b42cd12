//! Core rules engine for the tile-placement game.
//!
//! This module defines the game's fundamental components:
//! - `Color`, `Shape` and `Tile`: the 108 physical tiles of the game.
//! - `Direction` and `PlacedTile`: how a move describes where tiles go.
//! - `Board`: the shared 91x91 surface, with move validation, scoring and commit.
//! - `BoardView`: the read-only capability handed to renderers.
//!
//! Every move is validated into a `MovePlan` first and only then written to the
//! grid, so a rejected move never leaves a partial write behind.
use crate::error::{PlacementError, PlacementResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Width and height of the board. The board is always square.
pub const BOARD_SIZE: usize = 91;

/// Row and column of the cell that receives the first tile of the game.
pub const CENTER: usize = 45;

/// Maximum number of tiles in one line.
pub const MAX_LINE_LEN: usize = 6;

/// Number of physical copies of every color/shape combination.
pub const COPIES: u8 = 3;

/// Size of the complete tile set.
pub const TILE_COUNT: usize = 108;

const ATTRIBUTE_COUNT: u8 = 6;

/// Color attribute of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// All colors, in index order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Single-character notation used by the console and by tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::engine::Color;
    /// assert_eq!(Color::Purple.to_char(), 'P');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
        }
    }

    /// Inverse of [`Color::to_char`], case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|color| color.to_char() == c.to_ascii_uppercase())
    }
}

/// Shape attribute of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Round,
    Square,
    Diamond,
    Cross,
    Star,
    Plus,
}

impl Shape {
    /// All shapes, in index order.
    pub const ALL: [Shape; 6] = [
        Shape::Round,
        Shape::Square,
        Shape::Diamond,
        Shape::Cross,
        Shape::Star,
        Shape::Plus,
    ];

    pub fn to_char(self) -> char {
        match self {
            Shape::Round => 'O',
            Shape::Square => 'S',
            Shape::Diamond => 'D',
            Shape::Cross => 'X',
            Shape::Star => '*',
            Shape::Plus => '+',
        }
    }

    /// Inverse of [`Shape::to_char`], case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.to_char() == c.to_ascii_uppercase())
    }
}

/// Raised when a tile index does not name one of the 108 physical tiles.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tile index {0} is outside the 108-tile set")]
pub struct InvalidTileId(pub u8);

/// Handle to one physical tile.
///
/// Two tiles with the same color and shape are still different tiles: the set
/// holds three copies of every combination, and the handle tells them apart.
/// Equality and hashing compare handles, never attributes alone.
///
/// # Examples
///
/// ```
/// use qwirkle::engine::{Color, Shape, Tile};
/// let a = Tile::new(Color::Red, Shape::Star);
/// let b = Tile::with_copy(Color::Red, Shape::Star, 1).unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.color(), b.color());
/// assert_eq!(a.shape(), b.shape());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tile(u8);

impl Tile {
    /// First copy of the given color/shape combination.
    pub fn new(color: Color, shape: Shape) -> Self {
        Tile(shape as u8 * ATTRIBUTE_COUNT + color as u8)
    }

    /// A specific copy (`0..COPIES`) of the given combination.
    pub fn with_copy(color: Color, shape: Shape, copy: u8) -> Option<Self> {
        if copy >= COPIES {
            return None;
        }
        Some(Tile(
            copy * ATTRIBUTE_COUNT * ATTRIBUTE_COUNT + Tile::new(color, shape).0,
        ))
    }

    /// Every physical tile of the game, in handle order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TILE_COUNT as u8).map(Tile)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn copy(self) -> u8 {
        self.0 / (ATTRIBUTE_COUNT * ATTRIBUTE_COUNT)
    }

    pub fn color(self) -> Color {
        Color::ALL[(self.0 % ATTRIBUTE_COUNT) as usize]
    }

    pub fn shape(self) -> Shape {
        Shape::ALL[((self.0 / ATTRIBUTE_COUNT) % ATTRIBUTE_COUNT) as usize]
    }

    /// Two-character notation, color then shape (e.g. `"RO"` for a red round).
    pub fn to_notation(self) -> String {
        format!("{}{}", self.color().to_char(), self.shape().to_char())
    }
}

impl TryFrom<u8> for Tile {
    type Error = InvalidTileId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (id as usize) < TILE_COUNT {
            Ok(Tile(id))
        } else {
            Err(InvalidTileId(id))
        }
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.0
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}#{})", self.to_notation(), self.copy())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

/// One of the four compass directions a line can run in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta_row(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }

    pub fn delta_col(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// # Examples
    ///
    /// ```
    /// use qwirkle::engine::Direction;
    /// for d in Direction::ALL {
    ///     assert_eq!(d.opposite().opposite(), d);
    /// }
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|d| d.to_char() == c.to_ascii_lowercase())
    }
}

/// A tile together with the cell it should land on, for free placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    pub row: i32,
    pub col: i32,
    pub tile: Tile,
}

impl PlacedTile {
    pub fn new(row: i32, col: i32, tile: Tile) -> Self {
        PlacedTile { row, col, tile }
    }

    fn same_cell(&self, other: &PlacedTile) -> bool {
        self.row == other.row && self.col == other.col
    }
}

/// Read-only access to board contents.
///
/// Renderers and game-over checks only ever get this view; it has no way to
/// write a cell.
pub trait BoardView {
    /// Tile at `(row, col)`, or `None` if the cell is empty or off the board.
    fn get(&self, row: i32, col: i32) -> Option<Tile>;

    /// `true` until the opening move has been played.
    fn is_empty(&self) -> bool;
}

type Cell = (usize, usize);

const WRONG_PHASE_FIRST: &str =
    "Utilize this method strictly during the very first turn of the game!";
const WRONG_PHASE_LATER: &str = "Method not to be used during the initial turn of the game!";
const DETACHED_TILE: &str = "Tile must connect to existing line.";
const DETACHED_FIRST_TILE: &str = "First tile must connect to existing line.";
const DETACHED_FROM_MOVE: &str = "Tiles must connect to existing line or tile of your hand.";

/// Cell writes and score of a fully validated move.
struct MovePlan {
    writes: Vec<(Cell, Tile)>,
    score: u32,
}

/// Tiles collected along the axis of a multi-tile move: the placed tiles plus
/// the board tiles they extend. Cells are recorded so that a run of existing
/// tiles reached from both ends is only counted once.
#[derive(Default)]
struct MainLine {
    cells: Vec<(Cell, Tile)>,
}

impl MainLine {
    fn push(&mut self, cell: Cell, tile: Tile) {
        self.cells.push((cell, tile));
    }

    fn absorb(&mut self, run: Vec<(Cell, Tile)>) {
        for (cell, tile) in run {
            if !self.cells.iter().any(|&(seen, _)| seen == cell) {
                self.cells.push((cell, tile));
            }
        }
    }

    fn score(&self) -> PlacementResult<u32> {
        let tiles: Vec<Tile> = self.cells.iter().map(|&(_, tile)| tile).collect();
        line_score(&tiles)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchMode {
    Color,
    Shape,
}

impl MatchMode {
    /// Which attribute `a` and `b` have in common. Exactly one must match.
    fn between(a: Tile, b: Tile) -> PlacementResult<MatchMode> {
        match (a.color() == b.color(), a.shape() == b.shape()) {
            (true, true) => Err(PlacementError::DuplicateTile),
            (false, false) => Err(PlacementError::AttributeMismatch),
            (true, false) => Ok(MatchMode::Color),
            (false, true) => Ok(MatchMode::Shape),
        }
    }
}

/// Checks that `line` can stand on the board as one line: 1 to 6 tiles, all
/// sharing the same attribute, with no attribute duplicates.
pub fn check_line(line: &[Tile]) -> PlacementResult<()> {
    if line.is_empty() {
        return Err(PlacementError::TooShort);
    }
    if line.len() > MAX_LINE_LEN {
        return Err(PlacementError::TooLong);
    }
    if line.len() > 1 {
        let mode = MatchMode::between(line[0], line[1])?;
        for i in 2..line.len() {
            for j in 0..i {
                if MatchMode::between(line[i], line[j])? != mode {
                    return Err(PlacementError::AttributeMismatch);
                }
            }
        }
    }
    Ok(())
}

/// Validates `line` and returns its score: one point per tile, doubled for a
/// complete line of six.
///
/// # Examples
///
/// ```
/// use qwirkle::engine::{line_score, Color, Shape, Tile};
/// let reds: Vec<Tile> = Shape::ALL.iter().map(|&s| Tile::new(Color::Red, s)).collect();
/// assert_eq!(line_score(&reds[..3]), Ok(3));
/// assert_eq!(line_score(&reds), Ok(12));
/// ```
pub fn line_score(line: &[Tile]) -> PlacementResult<u32> {
    check_line(line)?;
    let len = line.len() as u32;
    Ok(if line.len() == MAX_LINE_LEN { len * 2 } else { len })
}

fn in_bounds(row: i32, col: i32) -> Option<Cell> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
}

fn neighbour((row, col): Cell, direction: Direction) -> Option<Cell> {
    in_bounds(
        row as i32 + direction.delta_row(),
        col as i32 + direction.delta_col(),
    )
}

fn offset(row: i32, col: i32, direction: Direction, steps: usize) -> Option<(i32, i32)> {
    let steps = i32::try_from(steps).ok()?;
    Some((
        row.checked_add(direction.delta_row() * steps)?,
        col.checked_add(direction.delta_col() * steps)?,
    ))
}

/// Direction that leads from `from` to `to`; both must share a row or column.
fn direction_between(from: &PlacedTile, to: &PlacedTile) -> PlacementResult<Direction> {
    if from.same_cell(to) {
        return Err(PlacementError::SameCell);
    }
    if from.row != to.row && from.col != to.col {
        return Err(PlacementError::Misaligned);
    }
    Ok(if to.row > from.row {
        Direction::Down
    } else if to.row < from.row {
        Direction::Up
    } else if to.col > from.col {
        Direction::Right
    } else {
        Direction::Left
    })
}

/// Direction of a free placement, taken from its first two tiles. Every pair,
/// in input order, has to agree with it.
fn free_placement_axis(placed: &[PlacedTile]) -> PlacementResult<Direction> {
    let direction = direction_between(&placed[0], &placed[1])?;
    for i in 0..placed.len() {
        for j in 0..i {
            if direction_between(&placed[j], &placed[i])? != direction {
                return Err(PlacementError::InconsistentDirection);
            }
        }
    }
    Ok(direction)
}

/// `true` if `current` sits one step along `axis` after `previous`.
fn follows(previous: &PlacedTile, current: &PlacedTile, axis: Direction) -> bool {
    if axis.is_vertical() {
        current.row - axis.delta_row() == previous.row
    } else {
        current.col - axis.delta_col() == previous.col
    }
}

/// The shared game surface.
///
/// Cells are addressed as `(row, col)` in `0..BOARD_SIZE`; the opening move is
/// anchored at `(CENTER, CENTER)`. Once a cell holds a tile it is never cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
    is_empty: bool,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Creates a board with no tile on it.
    pub fn new() -> Self {
        Board {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            is_empty: true,
        }
    }

    /// Tile at `(row, col)`; `None` for empty or off-board cells.
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        in_bounds(row, col).and_then(|(r, c)| self.grid[r][c])
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Every occupied cell as `(row, col, tile)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|tile| (r, c, tile)))
        })
    }

    /// Plays the opening move: `tiles[0]` lands on the center cell and every
    /// following tile one step further in `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::engine::{Board, Color, Direction, Shape, Tile};
    /// let mut board = Board::new();
    /// let tiles = [
    ///     Tile::new(Color::Red, Shape::Round),
    ///     Tile::new(Color::Red, Shape::Diamond),
    /// ];
    /// assert_eq!(board.first_add(Direction::Up, &tiles), Ok(2));
    /// assert_eq!(board.get(44, 45), Some(tiles[1]));
    /// assert!(board.first_add(Direction::Up, &tiles).is_err());
    /// ```
    pub fn first_add(&mut self, direction: Direction, tiles: &[Tile]) -> PlacementResult<u32> {
        if !self.is_empty {
            return Err(PlacementError::WrongPhase(WRONG_PHASE_FIRST));
        }
        let score = line_score(tiles)?;
        let mut writes = Vec::with_capacity(tiles.len());
        for (i, &tile) in tiles.iter().enumerate() {
            let (row, col) = offset(CENTER as i32, CENTER as i32, direction, i)
                .ok_or(PlacementError::OutOfBounds)?;
            writes.push((self.check_cell(row, col)?, tile));
        }
        Ok(self.commit(MovePlan { writes, score }))
    }

    /// Places a single tile next to the tiles already on the board.
    ///
    /// Every line the tile joins (at most one per axis) is validated and
    /// scored.
    pub fn add(&mut self, row: i32, col: i32, tile: Tile) -> PlacementResult<u32> {
        self.ensure_started()?;
        let plan = self.plan_single(row, col, tile)?;
        Ok(self.commit(plan))
    }

    /// Places `tiles` in a straight run starting at `(row, col)` and stepping
    /// in `direction`.
    ///
    /// The score is the main line the run ends up in plus every line it
    /// crosses.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::engine::{Board, Color, Direction, Shape, Tile};
    /// let red = |s| Tile::new(Color::Red, s);
    /// let mut board = Board::new();
    /// board
    ///     .first_add(Direction::Up, &[red(Shape::Round), red(Shape::Diamond), red(Shape::Plus)])
    ///     .unwrap();
    ///
    /// let squares = [
    ///     red(Shape::Square),
    ///     Tile::new(Color::Blue, Shape::Square),
    ///     Tile::new(Color::Purple, Shape::Square),
    /// ];
    /// // three new squares, plus the red column they extend to four tiles
    /// assert_eq!(board.add_line(46, 45, Direction::Right, &squares), Ok(7));
    /// assert_eq!(board.get(46, 47), Some(squares[2]));
    /// ```
    pub fn add_line(
        &mut self,
        row: i32,
        col: i32,
        direction: Direction,
        tiles: &[Tile],
    ) -> PlacementResult<u32> {
        self.ensure_started()?;
        let plan = self.plan_line(row, col, direction, tiles)?;
        Ok(self.commit(plan))
    }

    /// Places tiles at arbitrary cells that must still form one straight line.
    ///
    /// The order of `placed` matters: pairs must keep the direction set by the
    /// first two tiles, and a tile that touches nothing on the board must sit
    /// right after the tile listed before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::engine::{Board, Color, Direction, PlacedTile, Shape, Tile};
    /// use qwirkle::error::PlacementError;
    /// let mut board = Board::new();
    /// board
    ///     .first_add(Direction::Up, &[Tile::new(Color::Red, Shape::Round)])
    ///     .unwrap();
    ///
    /// let square = |row, col, color| PlacedTile::new(row, col, Tile::new(color, Shape::Square));
    /// let crooked = [square(46, 45, Color::Red), square(47, 46, Color::Blue)];
    /// assert_eq!(board.add_free(&crooked), Err(PlacementError::Misaligned));
    ///
    /// let row = [square(46, 45, Color::Red), square(46, 46, Color::Blue)];
    /// assert_eq!(board.add_free(&row), Ok(4));
    /// ```
    pub fn add_free(&mut self, placed: &[PlacedTile]) -> PlacementResult<u32> {
        self.ensure_started()?;
        let plan = self.plan_free(placed)?;
        Ok(self.commit(plan))
    }

    fn ensure_started(&self) -> PlacementResult<()> {
        if self.is_empty {
            Err(PlacementError::WrongPhase(WRONG_PHASE_LATER))
        } else {
            Ok(())
        }
    }

    fn check_cell(&self, row: i32, col: i32) -> PlacementResult<Cell> {
        let (r, c) = in_bounds(row, col).ok_or(PlacementError::OutOfBounds)?;
        if self.grid[r][c].is_some() {
            return Err(PlacementError::CellOccupied);
        }
        Ok((r, c))
    }

    /// Directions in which `cell` has an occupied neighbour.
    fn possible_directions(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| neighbour(cell, d).map_or(false, |(r, c)| self.grid[r][c].is_some()))
            .collect()
    }

    /// Contiguous run of occupied cells starting next to `cell` in `direction`.
    fn chunk(&self, cell: Cell, direction: Direction) -> PlacementResult<Vec<(Cell, Tile)>> {
        let mut run = Vec::with_capacity(MAX_LINE_LEN);
        let mut next = neighbour(cell, direction);
        while let Some((r, c)) = next {
            let Some(tile) = self.grid[r][c] else { break };
            if run.len() == MAX_LINE_LEN {
                return Err(PlacementError::TooLong);
            }
            run.push(((r, c), tile));
            next = neighbour((r, c), direction);
        }
        Ok(run)
    }

    fn chunk_tiles(&self, cell: Cell, direction: Direction) -> PlacementResult<Vec<Tile>> {
        Ok(self
            .chunk(cell, direction)?
            .into_iter()
            .map(|(_, tile)| tile)
            .collect())
    }

    fn plan_single(&self, row: i32, col: i32, tile: Tile) -> PlacementResult<MovePlan> {
        let cell = self.check_cell(row, col)?;
        let directions = self.possible_directions(cell);
        if directions.is_empty() {
            return Err(PlacementError::NotConnected(DETACHED_TILE));
        }

        let mut score = 0;
        for (i, &direction) in directions.iter().enumerate() {
            // already folded into the line built from the opposite side
            if directions[..i].contains(&direction.opposite()) {
                continue;
            }
            let mut line = self.chunk_tiles(cell, direction)?;
            line.push(tile);
            if directions.contains(&direction.opposite()) {
                line.extend(self.chunk_tiles(cell, direction.opposite())?);
            }
            score += line_score(&line)?;
        }

        Ok(MovePlan {
            writes: vec![(cell, tile)],
            score,
        })
    }

    /// Scores the lines crossing `axis` at `cell` and feeds the runs lying on
    /// `axis` into `main`.
    fn score_cross_lines(
        &self,
        cell: Cell,
        tile: Tile,
        directions: &[Direction],
        axis: Direction,
        main: &mut MainLine,
    ) -> PlacementResult<u32> {
        let mut score = 0;
        for (i, &direction) in directions.iter().enumerate() {
            if direction == axis || direction == axis.opposite() {
                main.absorb(self.chunk(cell, direction)?);
                continue;
            }
            if directions[..i].contains(&direction.opposite()) {
                continue;
            }
            let mut line = self.chunk_tiles(cell, direction)?;
            if directions.contains(&direction.opposite()) {
                line.extend(self.chunk_tiles(cell, direction.opposite())?);
            }
            line.push(tile);
            score += line_score(&line)?;
        }
        Ok(score)
    }

    fn plan_line(
        &self,
        row: i32,
        col: i32,
        direction: Direction,
        tiles: &[Tile],
    ) -> PlacementResult<MovePlan> {
        let mut main = MainLine::default();
        let mut writes = Vec::with_capacity(tiles.len());
        let mut score = 0;

        for (i, &tile) in tiles.iter().enumerate() {
            let (r, c) = offset(row, col, direction, i).ok_or(PlacementError::OutOfBounds)?;
            let cell = self.check_cell(r, c)?;
            let directions = self.possible_directions(cell);
            if i == 0 && directions.is_empty() {
                return Err(PlacementError::NotConnected(DETACHED_FIRST_TILE));
            }
            main.push(cell, tile);
            score += self.score_cross_lines(cell, tile, &directions, direction, &mut main)?;
            writes.push((cell, tile));
        }

        score += main.score()?;
        Ok(MovePlan { writes, score })
    }

    fn plan_free(&self, placed: &[PlacedTile]) -> PlacementResult<MovePlan> {
        let axis = match placed {
            [] => return Err(PlacementError::TooShort),
            [only] => return self.plan_single(only.row, only.col, only.tile),
            _ => free_placement_axis(placed)?,
        };

        let mut main = MainLine::default();
        let mut writes = Vec::with_capacity(placed.len());
        let mut score = 0;

        for (i, current) in placed.iter().enumerate() {
            let cell = self.check_cell(current.row, current.col)?;
            let directions = self.possible_directions(cell);
            if directions.is_empty() {
                if i == 0 {
                    return Err(PlacementError::NotConnected(DETACHED_FIRST_TILE));
                }
                if !follows(&placed[i - 1], current, axis) {
                    return Err(PlacementError::NotConnected(DETACHED_FROM_MOVE));
                }
            }
            main.push(cell, current.tile);
            score += self.score_cross_lines(cell, current.tile, &directions, axis, &mut main)?;
            writes.push((cell, current.tile));
        }

        score += main.score()?;
        Ok(MovePlan { writes, score })
    }

    fn commit(&mut self, plan: MovePlan) -> u32 {
        for &((r, c), tile) in &plan.writes {
            self.grid[r][c] = Some(tile);
        }
        self.is_empty = false;
        debug!(
            "committed {} tile(s) for {} point(s)",
            plan.writes.len(),
            plan.score
        );
        plan.score
    }

    /// Writes `tile` without any rule check. Used when restoring a snapshot,
    /// which has already been validated cell by cell.
    pub(crate) fn restore_cell(&mut self, row: usize, col: usize, tile: Tile) {
        self.grid[row][col] = Some(tile);
        self.is_empty = false;
    }
}

impl BoardView for Board {
    fn get(&self, row: i32, col: i32) -> Option<Tile> {
        Board::get(self, row, col)
    }

    fn is_empty(&self) -> bool {
        Board::is_empty(self)
    }
}
