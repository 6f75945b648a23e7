pub mod dashboard_commands;
pub mod device_commands;
pub mod log_commands;
pub mod technician_commands;
pub mod utils;
