//! The tile supply.
//!
//! A `Bag` is an ordinary value owned by whoever runs the game and handed to
//! the code that needs to draw from it. There is no global bag.
use crate::engine::Tile;
use crate::error::BagError;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Undrawn tiles plus the random source used to pick among them.
#[derive(Clone, Debug)]
pub struct Bag {
    tiles: Vec<Tile>,
    rng: SmallRng,
}

impl Default for Bag {
    fn default() -> Self {
        Bag::new()
    }
}

impl Bag {
    /// Full 108-tile bag seeded from the operating system.
    pub fn new() -> Self {
        Bag {
            tiles: Tile::all().collect(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Full bag with a fixed seed, so that the sequence of draws is
    /// reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwirkle::bag::Bag;
    /// let mut a = Bag::with_seed(7);
    /// let mut b = Bag::with_seed(7);
    /// assert_eq!(a.draw(6).unwrap(), b.draw(6).unwrap());
    /// assert_eq!(a.len(), 102);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Bag {
            tiles: Tile::all().collect(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Bag holding exactly `tiles`, e.g. the remainder stored in a snapshot.
    /// `None` seeds from the operating system.
    pub fn from_tiles(tiles: Vec<Tile>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Bag { tiles, rng }
    }

    /// Removes up to `n` random tiles from the bag.
    ///
    /// Fewer than `n` tiles come back when the bag runs low. Asking for zero
    /// tiles, or drawing from an empty bag, is an error.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Tile>, BagError> {
        if n == 0 {
            return Err(BagError::InvalidCount);
        }
        if self.tiles.is_empty() {
            return Err(BagError::Exhausted);
        }
        let count = n.min(self.tiles.len());
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.rng.gen_range(0..self.tiles.len());
            drawn.push(self.tiles.swap_remove(index));
        }
        debug!("drew {} tile(s), {} left in the bag", drawn.len(), self.tiles.len());
        Ok(drawn)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Undrawn tiles, in no particular order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
