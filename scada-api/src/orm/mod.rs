pub mod dashboard;
mod db;
pub mod device;
pub mod log_entry;
pub mod log_query;
pub mod seed;
pub mod technician;
pub mod testing;

pub use db::*;
