use minesweeper_core::{Action, CellView, GameConfig, GameEvent, GameSession, GameState, Pos};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = GameConfig {
        rows: 9,
        cols: 9,
        mines: 10,
    };
    let mut session = GameSession::with_seed(config, 2024);

    println!(
        "🎮 New game: {}x{} with {} mines",
        config.rows, config.cols, config.mines
    );
    display_board(&session.snapshot());

    // Flag a corner on a hunch, then take it back
    println!("\n=== Flagging cell (0, 0) ===");
    session.apply(Action::Flag {
        pos: Pos { row: 0, col: 0 },
    });
    display_board(&session.snapshot());

    println!("\n=== Unflagging cell (0, 0) ===");
    session.apply(Action::Flag {
        pos: Pos { row: 0, col: 0 },
    });

    // Probe across the board until the game ends
    let probes = [
        (4, 4),
        (0, 0),
        (0, 8),
        (8, 0),
        (8, 8),
        (2, 6),
        (6, 2),
        (2, 2),
        (6, 6),
    ];

    for (row, col) in probes {
        if session.state().is_terminal() {
            break;
        }

        println!("\n=== Revealing cell ({row}, {col}) ===");
        let event = session.apply(Action::Reveal {
            pos: Pos { row, col },
        });
        if let GameEvent::Updated { updates, state } = event {
            println!("📋 {} cells changed, state: {:?}", updates.len(), state);
        }
        display_board(&session.snapshot());
    }

    match session.state() {
        GameState::Won => println!("\n🎉 You won!"),
        GameState::Lost => println!(
            "\n💣 Game over! {} more mines were uncovered.",
            session.exposed_mines().len()
        ),
        state => println!("\nOut of moves, game still {state:?}"),
    }
}

fn display_board(board: &[Vec<CellView>]) {
    for (row, cells) in board.iter().enumerate() {
        print!("  ");
        for view in cells {
            let symbol = match view {
                CellView::Hidden => "·",
                CellView::Flagged => "F",
                CellView::Revealed { adjacent } => match adjacent {
                    0 => " ",
                    1 => "1",
                    2 => "2",
                    3 => "3",
                    4 => "4",
                    5 => "5",
                    6 => "6",
                    7 => "7",
                    8 => "8",
                    _ => "X",
                },
                CellView::Mine => "💣",
            };
            print!("{symbol:2}");
        }
        println!("  {row}");
    }

    print!("  ");
    for col in 0..board.first().map(Vec::len).unwrap_or(0) {
        print!("{col:2}");
    }
    println!();
}
