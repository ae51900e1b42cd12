//! Turn orchestration: players, their hands and the order of play.
//!
//! `Game` resolves the hand indices a player picks into tiles, forwards the
//! move to the `Board`, and only touches hands and scores once the board has
//! accepted it. A rejected move keeps the turn with the same player.
use crate::bag::Bag;
use crate::engine::{Board, BoardView, Direction, PlacedTile, Tile};
use crate::error::{GameError, GameResult, PlacementResult};
use crate::snapshot::{self, GameSnapshot};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of tiles a full hand holds.
pub const HAND_SIZE: usize = 6;

/// Points earned by the player who empties their hand once the bag is empty.
pub const FINISH_BONUS: u32 = 6;

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    pub(crate) hand: Vec<Tile>,
    score: u32,
}

impl Player {
    /// Seats a player and deals them a full hand from `bag`.
    pub fn new(name: impl Into<String>, bag: &mut Bag) -> GameResult<Self> {
        Ok(Player {
            name: name.into(),
            hand: bag.draw(HAND_SIZE)?,
            score: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tops the hand back up to `HAND_SIZE`. Does nothing once the bag is
    /// empty.
    pub fn refill(&mut self, bag: &mut Bag) {
        let missing = HAND_SIZE.saturating_sub(self.hand.len());
        if missing == 0 || bag.is_empty() {
            return;
        }
        if let Ok(tiles) = bag.draw(missing) {
            self.hand.extend(tiles);
        }
    }

    /// Removes the given physical tiles from the hand.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) {
        self.hand.retain(|tile| !tiles.contains(tile));
    }

    /// Resolves hand indices into tiles, in the order given.
    fn select(&self, indexes: &[usize]) -> GameResult<Vec<Tile>> {
        if self.hand.len() < indexes.len() || self.hand.is_empty() {
            return Err(GameError::InsufficientTiles);
        }
        let mut tiles = Vec::with_capacity(indexes.len());
        for (i, &index) in indexes.iter().enumerate() {
            let tile = *self.hand.get(index).ok_or(GameError::UnknownTile)?;
            if indexes[..i].contains(&index) {
                return Err(GameError::RepeatedTile);
            }
            tiles.push(tile);
        }
        Ok(tiles)
    }
}

/// A whole game: board, bag, players and whose turn it is.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    bag: Bag,
    players: Vec<Player>,
    current: usize,
    pass_count: usize,
    finished: bool,
}

impl Game {
    /// Starts a game for `names`, dealing every player a hand from `bag`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::bag::Bag;
    /// use qwirkle::engine::Direction;
    /// use qwirkle::game::Game;
    ///
    /// let mut game = Game::new(vec!["Ada".into(), "Linus".into()], Bag::with_seed(1)).unwrap();
    /// assert_eq!(game.current_player().name(), "Ada");
    /// assert_eq!(game.bag_len(), 108 - 12);
    /// // a single tile is always a valid opening move
    /// assert_eq!(game.first(Direction::Up, &[0]).unwrap(), 1);
    /// assert_eq!(game.current_player().name(), "Linus");
    /// ```
    pub fn new(names: Vec<String>, mut bag: Bag) -> GameResult<Self> {
        if names.len() < 2 {
            return Err(GameError::NotEnoughPlayers(names.len()));
        }
        let players = names
            .into_iter()
            .map(|name| Player::new(name, &mut bag))
            .collect::<GameResult<Vec<_>>>()?;
        info!("new game with {} players", players.len());
        Ok(Game {
            board: Board::new(),
            bag,
            players,
            current: 0,
            pass_count: 0,
            finished: false,
        })
    }

    /// Read-only access to the board, for rendering.
    pub fn board(&self) -> &dyn BoardView {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    /// Opening move with the hand tiles at `indexes`, laid out from the center.
    pub fn first(&mut self, direction: Direction, indexes: &[usize]) -> GameResult<u32> {
        self.ensure_running()?;
        let tiles = self.current_player().select(indexes)?;
        let result = self.board.first_add(direction, &tiles);
        let score = self.reject_logged(result)?;
        Ok(self.finish_turn(&tiles, score))
    }

    /// Places the hand tile at `index` on `(row, col)`.
    pub fn play_single(&mut self, row: i32, col: i32, index: usize) -> GameResult<u32> {
        self.ensure_running()?;
        let tiles = self.current_player().select(&[index])?;
        let result = self.board.add(row, col, tiles[0]);
        let score = self.reject_logged(result)?;
        Ok(self.finish_turn(&tiles, score))
    }

    /// Places the hand tiles at `indexes` in a straight run from `(row, col)`.
    ///
    /// # Errors
    ///
    /// Hand selection is checked first: `InsufficientTiles`, `UnknownTile` or
    /// `RepeatedTile`. After that, the board's `PlacementError` is wrapped in
    /// `GameError::Placement`. In every case the turn stays with the same
    /// player and nothing changes.
    pub fn play_line(
        &mut self,
        row: i32,
        col: i32,
        direction: Direction,
        indexes: &[usize],
    ) -> GameResult<u32> {
        self.ensure_running()?;
        let tiles = self.current_player().select(indexes)?;
        let result = self.board.add_line(row, col, direction, &tiles);
        let score = self.reject_logged(result)?;
        Ok(self.finish_turn(&tiles, score))
    }

    /// Places hand tiles on arbitrary cells, given as `(row, col, index)`.
    pub fn play_free(&mut self, moves: &[(i32, i32, usize)]) -> GameResult<u32> {
        self.ensure_running()?;
        let indexes: Vec<usize> = moves.iter().map(|&(_, _, index)| index).collect();
        let tiles = self.current_player().select(&indexes)?;
        let placed: Vec<PlacedTile> = moves
            .iter()
            .zip(&tiles)
            .map(|(&(row, col, _), &tile)| PlacedTile::new(row, col, tile))
            .collect();
        let result = self.board.add_free(&placed);
        let score = self.reject_logged(result)?;
        Ok(self.finish_turn(&tiles, score))
    }

    /// Skips the current player's turn.
    ///
    /// Passes only count toward the end of the game once the bag is empty.
    pub fn pass(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        info!("{} passes", self.current_player().name());
        self.advance();
        if self.bag.is_empty() {
            self.pass_count += 1;
        }
        Ok(())
    }

    /// The game ends once the bag is empty and either a player has played
    /// their last tile or every player passed in a row.
    pub fn is_over(&self) -> bool {
        self.finished
            || (self.bag.is_empty()
                && (self.players.iter().any(|p| p.hand.is_empty())
                    || self.pass_count >= self.players.len()))
    }

    /// Player with the highest score; ties go to the earliest seat.
    pub fn winner(&self) -> &Player {
        self.players
            .iter()
            .fold(&self.players[0], |best, p| if p.score > best.score { p } else { best })
    }

    /// Writes the game to `path` as JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        snapshot::save(&self.snapshot(), path)
    }

    /// Restores a game written by [`Game::save`]. The bag is reseeded from
    /// `seed`, or from the operating system when `None`.
    pub fn load(path: impl AsRef<Path>, seed: Option<u64>) -> GameResult<Self> {
        Game::from_snapshot(snapshot::load(path)?, seed)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.snapshot(),
            players: self.players.clone(),
            current: self.current,
            pass_count: self.pass_count,
            finished: self.finished,
            bag: self.bag.tiles().to_vec(),
        }
    }

    pub fn from_snapshot(snapshot: GameSnapshot, seed: Option<u64>) -> GameResult<Self> {
        if snapshot.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(snapshot.players.len()));
        }
        if snapshot.current >= snapshot.players.len() {
            return Err(GameError::CorruptedSnapshot(format!(
                "current player {} out of {}",
                snapshot.current,
                snapshot.players.len()
            )));
        }
        if let Some(player) = snapshot.players.iter().find(|p| p.hand.len() > HAND_SIZE) {
            return Err(GameError::CorruptedSnapshot(format!(
                "{} holds {} tiles, more than {}",
                player.name,
                player.hand.len(),
                HAND_SIZE
            )));
        }
        snapshot.check_tiles()?;
        Ok(Game {
            board: Board::from_snapshot(&snapshot.board)?,
            bag: Bag::from_tiles(snapshot.bag, seed),
            players: snapshot.players,
            current: snapshot.current,
            pass_count: snapshot.pass_count,
            finished: snapshot.finished,
        })
    }

    fn ensure_running(&self) -> GameResult<()> {
        if self.is_over() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn reject_logged<T>(&self, result: PlacementResult<T>) -> GameResult<T> {
        result.map_err(|err| {
            warn!("move by {} rejected: {}", self.current_player().name(), err);
            GameError::from(err)
        })
    }

    /// Applies an accepted move to the mover's hand and score.
    fn finish_turn(&mut self, tiles: &[Tile], score: u32) -> u32 {
        let player = &mut self.players[self.current];
        player.remove_tiles(tiles);
        player.refill(&mut self.bag);
        player.score += score;
        info!("{} scores {} (total {})", player.name, score, player.score);
        if self.bag.is_empty() && player.hand.is_empty() {
            player.score += FINISH_BONUS;
            self.finished = true;
            info!("{} played their last tile", player.name);
        }
        self.pass_count = 0;
        self.advance();
        score
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Color, Shape};
    use crate::error::{BagError, PlacementError};

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{}", i)).collect()
    }

    fn game(n: usize) -> Game {
        Game::new(names(n), Bag::with_seed(11)).unwrap()
    }

    /// Game with hand-picked hands and a chosen bag, for deterministic moves.
    fn rigged(hands: Vec<Vec<Tile>>, bag: Vec<Tile>) -> Game {
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(i, hand)| Player {
                name: format!("p{}", i),
                hand,
                score: 0,
            })
            .collect();
        Game {
            board: Board::new(),
            bag: Bag::from_tiles(bag, Some(0)),
            players,
            current: 0,
            pass_count: 0,
            finished: false,
        }
    }

    fn t(color: Color, shape: Shape) -> Tile {
        Tile::new(color, shape)
    }

    #[test]
    fn test_new_game_deals_hands() {
        let game = game(3);
        assert_eq!(game.players().len(), 3);
        for p in game.players() {
            assert_eq!(p.hand().len(), HAND_SIZE);
            assert_eq!(p.score(), 0);
        }
        assert_eq!(game.bag_len(), 108 - 3 * HAND_SIZE);
        assert!(game.board().is_empty());
        assert!(!game.is_over());
    }

    #[test]
    fn test_new_game_needs_two_players() {
        assert!(matches!(
            Game::new(names(1), Bag::with_seed(0)),
            Err(GameError::NotEnoughPlayers(1))
        ));
    }

    #[test]
    fn test_too_many_players_exhaust_the_bag() {
        let err = Game::new(names(19), Bag::with_seed(0)).unwrap_err();
        assert!(matches!(err, GameError::Bag(BagError::Exhausted)));
    }

    #[test]
    fn test_hand_selection_errors() {
        let mut game = game(2);
        assert!(matches!(game.first(Direction::Up, &[6]), Err(GameError::UnknownTile)));
        assert!(matches!(game.first(Direction::Up, &[1, 1]), Err(GameError::RepeatedTile)));
        assert!(matches!(
            game.first(Direction::Up, &[0, 1, 2, 3, 4, 5, 0]),
            Err(GameError::InsufficientTiles)
        ));
        assert_eq!(game.current_player().name(), "p0");
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_accepted_move_updates_hand_score_and_turn() {
        let red_round = t(Color::Red, Shape::Round);
        let red_star = t(Color::Red, Shape::Star);
        let mut game = rigged(
            vec![
                vec![red_round, red_star, t(Color::Blue, Shape::Cross)],
                vec![t(Color::Red, Shape::Plus)],
            ],
            Tile::all().skip(100).collect(),
        );
        assert_eq!(game.first(Direction::Right, &[1, 0]).unwrap(), 2);
        let p0 = &game.players()[0];
        assert_eq!(p0.score(), 2);
        assert_eq!(p0.hand().len(), HAND_SIZE);
        assert!(!p0.hand().contains(&red_round));
        assert_eq!(game.board().get(45, 45), Some(red_star));
        assert_eq!(game.board().get(45, 46), Some(red_round));
        assert_eq!(game.current_player().name(), "p1");
        assert_eq!(game.bag_len(), 8 - 5);
    }

    #[test]
    fn test_rejected_move_keeps_the_turn() {
        let mut game = rigged(
            vec![
                vec![t(Color::Red, Shape::Round), t(Color::Blue, Shape::Cross)],
                vec![t(Color::Red, Shape::Plus)],
            ],
            Tile::all().skip(100).collect(),
        );
        let err = game.first(Direction::Right, &[0, 1]).unwrap_err();
        assert!(matches!(err, GameError::Placement(PlacementError::AttributeMismatch)));
        assert_eq!(game.current_player().name(), "p0");
        assert_eq!(game.current_player().hand().len(), 2);
        assert_eq!(game.current_player().score(), 0);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_regular_moves_after_opening() {
        let mut game = rigged(
            vec![
                vec![t(Color::Red, Shape::Round), t(Color::Green, Shape::Star)],
                vec![
                    t(Color::Red, Shape::Square),
                    t(Color::Red, Shape::Diamond),
                    t(Color::Green, Shape::Round),
                ],
            ],
            Tile::all().skip(90).collect(),
        );
        game.first(Direction::Up, &[0]).unwrap();
        // p1 builds down from the center: (46,45) then (47,45)
        assert_eq!(game.play_line(46, 45, Direction::Down, &[0, 1]).unwrap(), 3);
        // p0 places next to the red round
        let star = game.current_player().hand()[0];
        assert_eq!(star, t(Color::Green, Shape::Star));
        assert!(matches!(
            game.play_single(45, 46, 0),
            Err(GameError::Placement(PlacementError::AttributeMismatch))
        ));
        let green_round = game.players()[1]
            .hand()
            .iter()
            .position(|&tile| tile == t(Color::Green, Shape::Round));
        assert!(green_round.is_some());
        game.pass().unwrap();
        let index = green_round.unwrap();
        assert_eq!(game.play_free(&[(45, 46, index)]).unwrap(), 2);
        assert_eq!(game.players()[1].score(), 5);
    }

    #[test]
    fn test_passes_end_the_game_only_with_an_empty_bag() {
        let mut game = game(2);
        game.pass().unwrap();
        game.pass().unwrap();
        assert!(!game.is_over());

        let mut game = rigged(vec![vec![t(Color::Red, Shape::Round)], vec![t(Color::Blue, Shape::Star)]], vec![]);
        game.pass().unwrap();
        assert!(!game.is_over());
        game.pass().unwrap();
        assert!(game.is_over());
        assert!(matches!(game.pass(), Err(GameError::GameOver)));
    }

    #[test]
    fn test_emptying_hand_with_empty_bag_finishes_with_bonus() {
        let mut game = rigged(
            vec![
                vec![t(Color::Red, Shape::Round), t(Color::Red, Shape::Star)],
                vec![t(Color::Blue, Shape::Star)],
            ],
            vec![],
        );
        assert_eq!(game.first(Direction::Left, &[0, 1]).unwrap(), 2);
        assert!(game.is_over());
        assert_eq!(game.players()[0].score(), 2 + FINISH_BONUS);
        assert_eq!(game.winner().name(), "p0");
        assert!(matches!(game.play_single(44, 45, 0), Err(GameError::GameOver)));
    }

    #[test]
    fn test_winner_ties_go_to_earliest_seat() {
        let mut game = game(3);
        game.players[1].score = 4;
        game.players[2].score = 4;
        assert_eq!(game.winner().name(), "p1");
    }

    #[test]
    fn test_refill_stops_at_empty_bag() {
        let mut bag = Bag::from_tiles(Tile::all().take(2).collect(), Some(1));
        let mut player = Player {
            name: "solo".into(),
            hand: vec![],
            score: 0,
        };
        player.refill(&mut bag);
        assert_eq!(player.hand().len(), 2);
        player.refill(&mut bag);
        assert_eq!(player.hand().len(), 2);
    }

    #[test]
    fn test_remove_tiles_uses_identity() {
        let first = Tile::with_copy(Color::Yellow, Shape::Plus, 0).unwrap();
        let second = Tile::with_copy(Color::Yellow, Shape::Plus, 1).unwrap();
        let mut player = Player {
            name: "dup".into(),
            hand: vec![first, second],
            score: 0,
        };
        player.remove_tiles(&[second]);
        assert_eq!(player.hand(), &[first]);
    }
}
