//! Utility modules for kubectl-multi

pub mod errors;
pub mod logger;
pub mod table;

// Re-export commonly used items
pub use errors::{FleetError, display_error_and_exit};
pub use logger::{log_debug, log_error, log_info, log_warn};
