// --- File: crates/slotcheck_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;   // Failure taxonomy and exit codes
pub mod http;    // HTTP client wrapper
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{excerpt, ExitStatusCode, SmokeError};

// Re-export HTTP utilities for easier access
pub use http::{
    accept,
    client::{create_client, ApiClient},
    ApiResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result, parse_level};
