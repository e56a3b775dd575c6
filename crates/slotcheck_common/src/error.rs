// --- File: crates/slotcheck_common/src/error.rs ---
use thiserror::Error;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_TRANSPORT: u8 = 2;
pub const EXIT_SLOT_LISTING: u8 = 3;
pub const EXIT_APPOINTMENT_CREATION: u8 = 4;
pub const EXIT_MISSING_CANCEL_TOKEN: u8 = 5;
pub const EXIT_CANCEL_PAGE: u8 = 6;
pub const EXIT_CANCELLATION: u8 = 7;
pub const EXIT_SLOT_REFETCH: u8 = 8;
pub const EXIT_SLOT_STILL_RESERVED: u8 = 9;

/// Every way a smoke run can fail, one variant per stage.
///
/// Variants carrying an `excerpt` hold the leading part of the response body
/// that triggered the failure, for the operator to read.
#[derive(Error, Debug)]
pub enum SmokeError {
    /// Connection refused, DNS failure, timeout, unreadable body or bad URL
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to list slots: {detail}")]
    SlotListing { detail: String, excerpt: String },

    #[error("Create failed: HTTP {status}")]
    AppointmentCreation { status: u16, excerpt: String },

    #[error("No cancel token in create response; aborting")]
    MissingCancelToken { excerpt: String },

    #[error("Cancel page returned bad status {status}")]
    CancelPageUnreachable { status: u16 },

    #[error("Cancel failed: HTTP {status}")]
    Cancellation { status: u16, excerpt: String },

    #[error("Failed to fetch slot {slot}: {detail}")]
    SlotRefetch { slot: String, detail: String },

    #[error("Slot {slot} still reserved after cancel; failure")]
    SlotStillReserved { slot: String, excerpt: String },
}

impl SmokeError {
    /// The response body excerpt attached to this failure, if any.
    pub fn excerpt(&self) -> Option<&str> {
        match self {
            SmokeError::SlotListing { excerpt, .. }
            | SmokeError::AppointmentCreation { excerpt, .. }
            | SmokeError::MissingCancelToken { excerpt }
            | SmokeError::Cancellation { excerpt, .. }
            | SmokeError::SlotStillReserved { excerpt, .. } => Some(excerpt.as_str()),
            SmokeError::Transport(_)
            | SmokeError::Config(_)
            | SmokeError::CancelPageUnreachable { .. }
            | SmokeError::SlotRefetch { .. } => None,
        }
    }
}

/// A trait for converting errors to process exit codes.
///
/// The exit code is the machine-readable result of a run: CI callers can tell
/// which stage failed without parsing output.
pub trait ExitStatusCode {
    /// Returns the process exit code for this error.
    fn exit_code(&self) -> u8;
}

impl ExitStatusCode for SmokeError {
    fn exit_code(&self) -> u8 {
        match self {
            SmokeError::Transport(_) => EXIT_TRANSPORT,
            // Same code clap uses for a bad command line
            SmokeError::Config(_) => EXIT_TRANSPORT,
            SmokeError::SlotListing { .. } => EXIT_SLOT_LISTING,
            SmokeError::AppointmentCreation { .. } => EXIT_APPOINTMENT_CREATION,
            SmokeError::MissingCancelToken { .. } => EXIT_MISSING_CANCEL_TOKEN,
            SmokeError::CancelPageUnreachable { .. } => EXIT_CANCEL_PAGE,
            SmokeError::Cancellation { .. } => EXIT_CANCELLATION,
            SmokeError::SlotRefetch { .. } => EXIT_SLOT_REFETCH,
            SmokeError::SlotStillReserved { .. } => EXIT_SLOT_STILL_RESERVED,
        }
    }
}

impl From<reqwest::Error> for SmokeError {
    fn from(err: reqwest::Error) -> Self {
        SmokeError::Transport(err.to_string())
    }
}

impl From<config::ConfigError> for SmokeError {
    fn from(err: config::ConfigError) -> Self {
        SmokeError::Config(err.to_string())
    }
}

/// Returns at most the first `max_chars` characters of `body`.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
