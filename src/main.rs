use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context};
use chic_rules::chess_board::fen::INITIAL_POSITION;
use chic_rules::chess_board::perft::divide;
use chic_rules::chess_board::{ChessBoard, Color, Move, Position};
use chic_rules::engines::engine_greedy::GreedyEngine;
use chic_rules::engines::ChessEngine;
use chic_rules::game::{Game, GameConfig, GameEvent, Opponent};
use chic_rules::ui::render_board;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

fn main() -> anyhow::Result<()> {
    let matches = command!()
        .version("v0.0.1")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Print rejected clicks and search progress"
        ))
        .subcommand(Command::new("benchmark").about("Times full engine searches"))
        .subcommand(
            Command::new("play")
                .about("Play a game in the terminal")
                .arg(
                    arg!(
                    -c --color <COLOR> "Side the human plays"
                            )
                    .value_parser(["white", "black"])
                    .default_value("white"),
                )
                .arg(arg!(
                    --hotseat "Both sides are played by hand"
                ))
                .arg(
                    arg!(
                    -s --seed <SEED> "Seed for the engine's tie-break jitter"
                            )
                    .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(
                    -f --fen <FEN> "Starting position"
                ))
                .arg(arg!(
                    --scenario "Start from the checkmate demo position"
                )),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .get_matches();

    let debug = matches.get_flag("debug");

    match matches.subcommand() {
        Some(("benchmark", _)) => benchmark(),
        Some(("play", arg_matches)) => play(setup_game(arg_matches)?, debug),
        Some(("perft", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, |f| f.as_str());
            let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .filter(|&v| !v.is_empty())
                .collect::<Vec<_>>();
            perft(fen, moves, depth)
        }
        None => play(Game::new(GameConfig::default()), debug),
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn setup_game(arg_matches: &ArgMatches) -> anyhow::Result<Game> {
    let human_color = match arg_matches.get_one::<String>("color").map(|c| c.as_str()) {
        Some("black") => Color::Black,
        _ => Color::White,
    };
    let config = GameConfig {
        human_color,
        opponent: if arg_matches.get_flag("hotseat") {
            Opponent::Human
        } else {
            Opponent::Engine
        },
        seed: arg_matches.get_one::<u64>("seed").copied(),
        ..GameConfig::default()
    };

    let board = if arg_matches.get_flag("scenario") {
        ChessBoard::checkmate_scenario()
    } else if let Some(fen) = arg_matches.get_one::<String>("fen") {
        ChessBoard::from_fen(fen).with_context(|| format!("cannot set up position `{}`", fen))?
    } else {
        ChessBoard::standard()
    };
    Ok(Game::with_board(board, config)?)
}

fn play(mut game: Game, debug: bool) -> anyhow::Result<()> {
    let viewer = game.config().human_color;
    println!("Playing {} against {}", viewer, opponent_name(&game));
    report(&mut game, debug);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        while game.is_engine_turn() {
            game.poll_engine()?;
            report(&mut game, debug);
        }

        let highlights = game.highlights()?;
        println!("{}", render_board(game.board(), viewer, &highlights));
        for color in [Color::White, Color::Black] {
            let lost = game.captured().render(color);
            if !lost.is_empty() {
                println!("{} lost: {} ({})", color, lost, game.captured().material_lost(color));
            }
        }
        if game.outcome().is_some() {
            return Ok(());
        }

        print!("{} > ", game.board().active_color);
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        for token in line?.split_whitespace() {
            match token {
                "quit" | "q" => return Ok(()),
                "fen" => println!("{}", game.board().to_fen()),
                "history" => {
                    for record in game.history() {
                        println!("{} {}", record.color(), record);
                    }
                }
                square => match Position::from_algebraic(square) {
                    Ok(pos) => game.on_position_clicked(pos)?,
                    Err(err) => eprintln!("{}", err),
                },
            }
            report(&mut game, debug);
        }
    }
}

fn opponent_name(game: &Game) -> &str {
    match game.config().opponent {
        Opponent::Engine => game.engine_name(),
        Opponent::Human => "yourself",
    }
}

fn report(game: &mut Game, debug: bool) {
    for event in game.drain_events() {
        if event.is_diagnostic() {
            if debug {
                eprintln!("{}", event);
            }
        } else if let GameEvent::CheckmateDetected(color) = event {
            println!("Checkmate! {} wins", color.opposite());
        } else {
            println!("{}", event);
        }
    }
}

#[derive(Tabled)]
struct BenchmarkRow {
    position: &'static str,
    candidates: usize,
    elapsed_time: f32,
    candidates_per_sec: f32,
    best_move: String,
}

fn benchmark() -> anyhow::Result<()> {
    let positions = [
        ("initial", INITIAL_POSITION),
        ("middlegame", "1rb2rk1/p4ppp/1p1qp1n1/3n2N1/2pP4/2P3P1/PPQ2PBP/R1B1R1K1 w - - 4 17"),
        ("kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
        ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ];
    let mut engine = GreedyEngine::new(Some(0));
    let mut table_rows = Vec::new();
    for (name, fen) in positions {
        let mut chess_board = ChessBoard::from_fen(fen)?;
        let candidates = chess_board.all_legal_moves(chess_board.active_color)?.len();
        let start_time = Instant::now();
        let best_move = engine.find_best_move(&mut chess_board, candidates.max(1), |_, _| {})?;
        let elapsed = start_time.elapsed();
        table_rows.push(BenchmarkRow {
            position: name,
            candidates,
            elapsed_time: elapsed.as_secs_f32(),
            candidates_per_sec: candidates as f32 / elapsed.as_secs_f32(),
            best_move: best_move.map_or("-".to_string(), |m| m.as_algebraic()),
        });
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
    Ok(())
}

fn perft(fen: &str, moves: Vec<&String>, depth: u8) -> anyhow::Result<()> {
    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);
    let mut chess_board = ChessBoard::from_fen(fen)?;
    for m in moves {
        let mv = Move::from_algebraic(m)?;
        if chess_board.execute(mv).is_err() {
            bail!("Invalid move: {}", m);
        }
    }

    let mut result_moves: Vec<(String, u64)> = divide(&chess_board, depth)?
        .into_iter()
        .map(|(mv, count)| (mv.as_algebraic(), count))
        .collect();
    result_moves.sort();

    let mut num_nodes = 0;
    for (m, c) in result_moves {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}
