use crate::engine::{Color, Direction, Shape, Tile};
use crate::error::CommandError;

/// A parsed console command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `o <row> <col> <i>`
    Single { row: i32, col: i32, index: usize },
    /// `l <row> <col> <dir> <i>...`
    Line {
        row: i32,
        col: i32,
        direction: Direction,
        indexes: Vec<usize>,
    },
    /// `m <row> <col> <i> [<row> <col> <i>]...`
    Free(Vec<(i32, i32, usize)>),
    /// `f [<dir>] <i>...`
    First {
        direction: Direction,
        indexes: Vec<usize>,
    },
    Pass,
    Save(String),
    Quit,
    Help,
}

/// Parses tile notation: a color letter followed by a shape character.
///
/// Colors are `R O Y G B P`, shapes are `O` (round), `S` (square),
/// `D` (diamond), `X` (cross), `*` (star) and `+` (plus). Letters are
/// case-insensitive. The parsed tile is always copy 0.
///
/// # Examples
/// ```
/// use qwirkle::utils::parse_tile;
/// use qwirkle::engine::{Color, Shape, Tile};
///
/// assert_eq!(parse_tile("RO").unwrap(), Tile::new(Color::Red, Shape::Round));
/// assert_eq!(parse_tile("p*").unwrap(), Tile::new(Color::Purple, Shape::Star));
/// assert!(parse_tile("R").is_err());
/// assert!(parse_tile("ZO").is_err());
/// ```
pub fn parse_tile(s: &str) -> Result<Tile, CommandError> {
    let bad = || CommandError::BadTile(s.to_string());
    let mut chars = s.trim().chars();
    let (Some(c), Some(sh), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(bad());
    };
    let color = Color::from_char(c).ok_or_else(bad)?;
    let shape = Shape::from_char(sh).ok_or_else(bad)?;
    Ok(Tile::new(color, shape))
}

/// Parses every notation in `items` with [`parse_tile`].
///
/// # Examples
/// ```
/// use qwirkle::utils::parse_line;
/// use qwirkle::engine::line_score;
///
/// let line = parse_line(&["RO", "RD", "RS"]).unwrap();
/// assert_eq!(line_score(&line), Ok(3));
/// ```
pub fn parse_line(items: &[&str]) -> Result<Vec<Tile>, CommandError> {
    items.iter().map(|item| parse_tile(item)).collect()
}

fn malformed(command: char, reason: impl Into<String>) -> CommandError {
    CommandError::Malformed {
        command,
        reason: reason.into(),
    }
}

fn number<T: std::str::FromStr>(command: char, arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| malformed(command, format!("'{}' is not a valid number", arg)))
}

fn direction(command: char, arg: &str) -> Result<Direction, CommandError> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Direction::from_char(c),
        _ => None,
    }
    .ok_or_else(|| malformed(command, format!("'{}' is not a direction (u, d, l, r)", arg)))
}

fn indexes(command: char, args: &[&str]) -> Result<Vec<usize>, CommandError> {
    if args.is_empty() {
        return Err(malformed(command, "at least one tile index is required"));
    }
    args.iter().map(|arg| number(command, arg)).collect()
}

fn no_args(command: char, args: &[&str], parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(malformed(command, "takes no argument"))
    }
}

/// Save names stay inside the backup directory: no separators, no leading dot.
fn is_valid_save_name(name: &str) -> bool {
    !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Parses one line of console input.
///
/// # Examples
/// ```
/// use qwirkle::utils::{parse_command, Command};
/// use qwirkle::engine::Direction;
///
/// assert_eq!(
///     parse_command("f r 0 2").unwrap(),
///     Command::First { direction: Direction::Right, indexes: vec![0, 2] }
/// );
/// assert_eq!(parse_command("F 3").unwrap(), Command::First { direction: Direction::Up, indexes: vec![3] });
/// assert_eq!(parse_command("o 45 46 1").unwrap(), Command::Single { row: 45, col: 46, index: 1 });
/// assert!(parse_command("x").is_err());
/// ```
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let mut parts = input.split_whitespace();
    let head = parts.next().ok_or(CommandError::Unknown)?;
    let args: Vec<&str> = parts.collect();
    let mut head_chars = head.chars();
    let command = match (head_chars.next(), head_chars.next()) {
        (Some(c), None) => c.to_ascii_lowercase(),
        _ => return Err(CommandError::Unknown),
    };

    match command {
        'o' => {
            let [row, col, index] = args[..] else {
                return Err(malformed(command, "expected <row> <col> <i>"));
            };
            Ok(Command::Single {
                row: number(command, row)?,
                col: number(command, col)?,
                index: number(command, index)?,
            })
        }
        'l' => {
            if args.len() < 4 {
                return Err(malformed(command, "expected <row> <col> <dir> <i>..."));
            }
            Ok(Command::Line {
                row: number(command, args[0])?,
                col: number(command, args[1])?,
                direction: direction(command, args[2])?,
                indexes: indexes(command, &args[3..])?,
            })
        }
        'm' => {
            if args.is_empty() || args.len() % 3 != 0 {
                return Err(malformed(command, "expected <row> <col> <i> triples"));
            }
            let moves = args
                .chunks(3)
                .map(|triple| -> Result<(i32, i32, usize), CommandError> {
                    Ok((
                        number(command, triple[0])?,
                        number(command, triple[1])?,
                        number(command, triple[2])?,
                    ))
                })
                .collect::<Result<Vec<_>, CommandError>>()?;
            Ok(Command::Free(moves))
        }
        'f' => {
            let (direction, rest) = match args.first() {
                Some(first) if first.parse::<usize>().is_err() => {
                    (direction(command, first)?, &args[1..])
                }
                _ => (Direction::Up, &args[..]),
            };
            Ok(Command::First {
                direction,
                indexes: indexes(command, rest)?,
            })
        }
        's' => match args[..] {
            [name] if is_valid_save_name(name) => Ok(Command::Save(name.to_string())),
            [name] => Err(malformed(command, format!("'{}' is not a valid file name", name))),
            _ => Err(malformed(command, "expected a single file name")),
        },
        'p' => no_args(command, &args, Command::Pass),
        'q' => no_args(command, &args, Command::Quit),
        'h' => no_args(command, &args, Command::Help),
        _ => Err(CommandError::Unknown),
    }
}
