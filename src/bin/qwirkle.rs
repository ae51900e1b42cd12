use clap::Parser;
use log::info;
use qwirkle::bag::Bag;
use qwirkle::error::GameResult;
use qwirkle::game::Game;
use qwirkle::utils::{parse_command, Command};
use qwirkle::view::{render_board, render_error, render_hand, render_winner, HELP};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play Qwirkle in the terminal", long_about = None)]
struct Args {
    /// Names of the players, in turn order (at least two)
    #[clap(num_args = 2.., required_unless_present = "restore", conflicts_with = "restore")]
    players: Vec<String>,

    /// Seed for the tile bag, for reproducible games
    #[clap(short, long)]
    seed: Option<u64>,

    /// Resume a saved game; relative names are looked up in the backup directory
    #[clap(short, long, value_name = "FILE")]
    restore: Option<PathBuf>,

    /// Directory where `s <name>` writes saved games
    #[clap(long, value_name = "DIR", default_value = "backups")]
    backup_dir: PathBuf,
}

enum Flow {
    Continue,
    Quit,
}

fn start(args: &Args) -> GameResult<Game> {
    if let Some(file) = &args.restore {
        let game = Game::load(args.backup_dir.join(file), args.seed)?;
        println!("Game restored.");
        return Ok(game);
    }
    let bag = match args.seed {
        Some(seed) => Bag::with_seed(seed),
        None => Bag::new(),
    };
    Game::new(args.players.clone(), bag)
}

fn execute(game: &mut Game, command: Command, backup_dir: &Path) -> GameResult<Flow> {
    let score = match command {
        Command::Single { row, col, index } => game.play_single(row, col, index)?,
        Command::Line {
            row,
            col,
            direction,
            indexes,
        } => game.play_line(row, col, direction, &indexes)?,
        Command::Free(moves) => game.play_free(&moves)?,
        Command::First { direction, indexes } => game.first(direction, &indexes)?,
        Command::Pass => {
            game.pass()?;
            return Ok(Flow::Continue);
        }
        Command::Save(name) => {
            game.save(backup_dir.join(name))?;
            println!("Game saved.");
            return Ok(Flow::Continue);
        }
        Command::Help => {
            println!("{}", HELP);
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };
    println!("+{} points", score);
    Ok(Flow::Continue)
}

fn main() {
    let args = Args::parse();
    env_logger::init();

    let mut game = match start(&args) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{}", render_error(&e.to_string()));
            process::exit(1);
        }
    };
    info!("{} players, {} tiles in the bag", game.players().len(), game.bag_len());

    println!("{}", HELP);
    loop {
        if game.is_over() {
            println!("{}", render_board(game.board()));
            println!("{}", render_winner(game.winner()));
            break;
        }

        let player = game.current_player();
        println!("{}", render_hand(player.name(), player.hand(), player.score()));
        println!("{}", render_board(game.board()));
        print!("Enter a command: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                println!("{}", render_error(&e.to_string()));
                continue;
            }
        }

        let outcome = parse_command(&input)
            .map_err(|e| e.to_string())
            .and_then(|command| execute(&mut game, command, &args.backup_dir).map_err(|e| e.to_string()));
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => {
                println!("Game terminated.");
                break;
            }
            Err(message) => println!("{}", render_error(&message)),
        }
    }
}
