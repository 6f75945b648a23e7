pub mod dashboard;
pub mod device;
pub mod log_entry;
pub mod technician;

// Re-export models for easier access
pub use dashboard::*;
pub use device::*;
pub use log_entry::*;
pub use technician::*;
