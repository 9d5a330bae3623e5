//! Session statistics commands.

use clap::Subcommand;
use focusdo_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's sessions
    Today,
    /// All-time totals
    All,
    /// Most recent sessions
    Recent {
        /// Number of sessions to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = db.stats()?;

    match action {
        StatsAction::Today => {
            let today = serde_json::json!({
                "sessions": stats.today_sessions,
                "work_secs": stats.today_work_secs,
            });
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent { limit } => {
            let sessions = db.recent_sessions(limit)?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
