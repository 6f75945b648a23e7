use clap::Subcommand;
use diesel::sqlite::SqliteConnection;
use scada_api::{
    models::LogEntry,
    orm::{
        log_entry::{DEFAULT_RECENT_LIMIT, recent},
        log_query::{SearchPolicy, search},
    },
};

#[derive(Subcommand)]
pub enum LogAction {
    #[command(about = "Search log type and details (empty term lists recent entries)")]
    Search {
        #[arg(help = "Search term")]
        term: Option<String>,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    #[command(about = "Show the most recent log entries")]
    Recent {
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_LIMIT, help = "Number of entries")]
        limit: i64,
        #[arg(long, help = "Print the entries as JSON")]
        json: bool,
    },
}

pub fn handle_log_command_with_conn(
    conn: &mut SqliteConnection,
    action: LogAction,
    policy: SearchPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LogAction::Search { term, json } => {
            let result = search(conn, term.as_deref().unwrap_or(""), policy)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            if let Some(warning) = &result.warning {
                eprintln!("Warning: {}", warning);
            }
            if term.as_deref().is_some_and(|t| t != result.filtered_term) {
                println!("Searched for: {:?}", result.filtered_term);
            }
            print_entries(&result.entries);
        }
        LogAction::Recent { limit, json } => {
            let entries = recent(conn, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }
    }
    Ok(())
}

pub fn format_entry(entry: &LogEntry) -> String {
    let device = entry.device_id.map(|id| format!(" device={}", id)).unwrap_or_default();
    let tech = entry.technician_id.map(|id| format!(" technician={}", id)).unwrap_or_default();
    format!(
        "{:>6}  {}  {}{}{}  {}",
        entry.id,
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.type_,
        device,
        tech,
        entry.details
    )
}

fn print_entries(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("No log entries found.");
        return;
    }
    for entry in entries {
        println!("{}", format_entry(entry));
    }
}
