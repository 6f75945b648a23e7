use clap::{Parser, Subcommand};
use scada_api::orm::log_query::SearchPolicy;

mod admin_cli;

use admin_cli::{
    dashboard_commands::handle_dashboard_command,
    device_commands::{DeviceAction, handle_device_command_with_conn},
    log_commands::{LogAction, handle_log_command_with_conn},
    technician_commands::{TechAction, handle_tech_command_with_conn},
    utils::establish_connection,
};

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser)]
#[command(name = "scada-admin")]
#[command(about = "Operator tool for the plant device database")]
#[command(version)]
struct Cli {
    /// Show extended version information
    #[arg(long, action = clap::ArgAction::SetTrue)]
    version_info: bool,

    #[arg(
        long,
        global = true,
        default_value_t = SearchPolicy::ExclusionList,
        help = "How log search terms are matched (exclusion-list or parameterized)"
    )]
    search_policy: SearchPolicy,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Device state management")]
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },
    #[command(about = "Technician assignments")]
    Tech {
        #[command(subcommand)]
        action: TechAction,
    },
    #[command(about = "Audit log queries")]
    Logs {
        #[command(subcommand)]
        action: LogAction,
    },
    #[command(about = "Show the plant status summary")]
    Dashboard {
        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.version_info {
        println!("scada-admin {}", built_info::PKG_VERSION);
        println!("Built: {}", built_info::BUILT_TIME_UTC);
        if let Some(commit) = built_info::GIT_COMMIT_HASH {
            println!("Git commit: {}", commit);
        }
        return;
    }

    let Some(command) = cli.command else {
        eprintln!("No command given. Run with --help for usage.");
        std::process::exit(2);
    };

    if let Err(e) = run(command, cli.search_policy) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, policy: SearchPolicy) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = establish_connection()?;
    match command {
        Commands::Device { action } => handle_device_command_with_conn(&mut conn, action),
        Commands::Tech { action } => handle_tech_command_with_conn(&mut conn, action),
        Commands::Logs { action } => handle_log_command_with_conn(&mut conn, action, policy),
        Commands::Dashboard { json } => handle_dashboard_command(&mut conn, json),
    }
}
