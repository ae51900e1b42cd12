//! # Qwirkle Library
//!
//! This library provides the rules engine for a Qwirkle-style tile-placement
//! game (tiles with a color and a shape, placed in lines on a shared grid)
//! together with the thin game layer needed to play it from a console.
//!
//! It is used by the `qwirkle` binary, an interactive hot-seat game for two or
//! more players.
//!
//! ## Modules
//! - `engine`: tiles, directions, the `Board` with its placement rules and
//!   scoring, and the read-only `BoardView`.
//! - `bag`: the random tile supply.
//! - `game`: players, hands, turn order, passes and the end of the game.
//! - `snapshot`: saving and restoring games as JSON.
//! - `view`: terminal rendering of the board and of a hand.
//! - `utils`: tile notation and console command parsing.
//! - `error`: error types shared by all of the above.

pub mod bag;
pub mod engine;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod utils;
pub mod view;
