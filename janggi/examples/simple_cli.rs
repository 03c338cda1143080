// Simple command-line application to play janggi
//
// Type a square name to select it, or a whole move like `e7e6`. Type `pass` to pass the
// turn and `new` to start over. Set `RUST_LOG=janggi=debug` to see what the engine does.

use janggi::{
    board::PrettyStyle, GameState, Move, Rules, SelectEvent, Side, Square, Status,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let strict = std::env::args().any(|a| a == "--strict");
    let rules = if strict { Rules::strict() } else { Rules::default() };
    let mut game = GameState::with_rules(rules);
    let mut stdin = io::stdin().lock();

    loop {
        if let Status::Won(side) = game.status() {
            println!("{}", game.board().pretty(PrettyStyle::Ascii));
            println!("Game finished: {} wins", side.name());
            println!(
                "Moves: {}",
                game.history()
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            break;
        }

        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        if game.is_check() {
            println!("Check!");
        }
        let side = match game.side() {
            Side::Blue => "Blue",
            Side::Red => "Red",
        };
        match game.selected() {
            Some(sq) => print!("{} ({} selected, to {:?}): ", side, sq, game.highlight()),
            None => print!("{}: ", side),
        }
        io::stdout().flush()?;

        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }
        let s = s.trim();

        match s {
            "" => continue,
            "new" => {
                game.restart();
                continue;
            }
            "pass" => {
                if let Err(e) = game.pass() {
                    println!("Cannot pass: {}", e);
                }
                println!();
                continue;
            }
            _ => {}
        }

        if let Ok(sq) = s.parse::<Square>() {
            let res = game.select(sq);
            match res.event {
                SelectEvent::Moved(rec) => println!("Moved: {}", rec),
                SelectEvent::Rejected(reason) => println!("Rejected: {:?}", reason),
                SelectEvent::Ignored => println!("Not your piece"),
                SelectEvent::Selected(_) | SelectEvent::Deselected(_) => {}
            }
            println!();
            continue;
        }

        match Move::from_text(s) {
            Ok(mv) => match game.apply_move(mv) {
                Ok(rec) => println!("Moved: {}", rec),
                Err(e) => println!("Bad move: {}", e),
            },
            Err(e) => println!("Bad input: {}", e),
        }
        println!();
    }

    Ok(())
}
