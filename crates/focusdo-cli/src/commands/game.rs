//! Break minigame commands.

use clap::Subcommand;
use focusdo_core::storage::Database;
use focusdo_core::Config;

use super::{load_engine, save_engine};

#[derive(Subcommand)]
pub enum GameAction {
    /// Open a game session (only valid during a break)
    Start,
    /// Register taps
    Tap {
        /// Points per tap before the multiplier
        #[arg(long, default_value = "1")]
        points: u64,
    },
    /// Close the game session
    End,
    /// Print the current game state as JSON
    Status,
}

pub fn run(action: GameAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        GameAction::Start => match engine.start_break_game() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no break in progress; the game only runs during breaks"),
        },
        GameAction::Tap { points } => match engine.add_game_points(points) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no game session open; run `focusdo game start` first"),
        },
        GameAction::End => match engine.end_break_game() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no game session open"),
        },
        GameAction::Status => match engine.game() {
            Some(game) => println!("{}", serde_json::to_string_pretty(game)?),
            None => println!("null"),
        },
    }

    save_engine(&db, &engine)?;
    Ok(())
}
