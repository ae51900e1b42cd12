//! Terminal rendering. Everything here reads the board through `BoardView`.
use crate::engine::{Board, BoardView, Color, Shape, Tile, BOARD_SIZE};
use crate::game::Player;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED_BOLD: &str = "\x1b[1;31m";
const BLUE_BOLD: &str = "\x1b[1;34m";

/// Width of one board cell in characters.
const CELL_WIDTH: usize = 3;

/// Console commands, as shown by `h`.
pub const HELP: &str = "\
Q W I R K L E
Commands:
- play 1 tile : o <row> <col> <i>
- play line   : l <row> <col> <direction> <i1> [<i2>...]
- play free   : m <row1> <col1> <i1> [<row2> <col2> <i2>...]
- play first  : f [<direction>] <i1> [<i2>...]
- pass        : p
- save game   : s <name>
- help        : h
- quit        : q
    i : index of a tile in your hand
    direction : u (up), d (down), l (left), r (right)";

fn ansi_color(color: Color) -> &'static str {
    match color {
        Color::Red => "\x1b[0;31m",
        Color::Orange => "\x1b[38;5;208m",
        Color::Yellow => "\x1b[38;5;226m",
        Color::Green => "\x1b[0;32m",
        Color::Blue => "\x1b[0;34m",
        Color::Purple => "\x1b[0;35m",
    }
}

fn glyph(shape: Shape) -> &'static str {
    match shape {
        Shape::Round => "O",
        Shape::Square => "[]",
        Shape::Diamond => "<>",
        Shape::Cross => "X",
        Shape::Star => "*",
        Shape::Plus => "+",
    }
}

/// A tile as its colored glyph, right-aligned in a board cell.
pub fn render_tile(tile: Tile) -> String {
    format!(
        "{}{:>width$}{}",
        ansi_color(tile.color()),
        glyph(tile.shape()),
        RESET,
        width = CELL_WIDTH
    )
}

/// Smallest `(min_row, min_col, max_row, max_col)` box holding every tile.
pub fn bounds(view: &dyn BoardView) -> Option<(i32, i32, i32, i32)> {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            if view.get(row, col).is_none() {
                continue;
            }
            bounds = Some(match bounds {
                None => (row, col, row, col),
                Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(col), r1.max(row), c1.max(col)),
            });
        }
    }
    bounds
}

/// Draws the smallest rectangle holding every tile, with row numbers on the
/// left and column numbers underneath. An empty board gives an empty string.
pub fn render_board(view: &dyn BoardView) -> String {
    let Some((min_row, min_col, max_row, max_col)) = bounds(view) else {
        return String::new();
    };
    let mut output = String::new();
    for row in min_row..=max_row {
        output.push_str(&format!("{:<3}|", row));
        for col in min_col..=max_col {
            match view.get(row, col) {
                Some(tile) => output.push_str(&render_tile(tile)),
                None => output.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        output.push('\n');
    }
    output.push_str("    ");
    for col in min_col..=max_col {
        output.push_str(&format!("{:>width$}", col, width = CELL_WIDTH));
    }
    output
}

/// The player's name, score and hand, each tile followed by its index.
pub fn render_hand(name: &str, hand: &[Tile], score: u32) -> String {
    let mut output = format!("{}{}'s turn ({} points):{}", BLUE_BOLD, name, score, RESET);
    for (i, &tile) in hand.iter().enumerate() {
        output.push_str(&format!("{} ({})", render_tile(tile), i));
    }
    output
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

pub fn render_winner(player: &Player) -> String {
    format!(
        "{}The winner is: {} with {} points{}",
        BOLD,
        player.name(),
        player.score(),
        RESET
    )
}

pub fn render_error(message: &str) -> String {
    format!("{}Error: {}{}", RED_BOLD, message, RESET)
}
