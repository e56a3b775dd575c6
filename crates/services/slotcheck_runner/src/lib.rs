// --- File: crates/services/slotcheck_runner/src/lib.rs ---

// Declare modules within this crate
pub mod cli;      // Command line surface
pub mod extract;  // JSON lookup strategies
#[cfg(test)]
mod extract_proptest;
pub mod slots;    // Slot discovery
pub mod workflow; // Reserve, cancel, verify

pub use workflow::{run, Outcome, RunSettings, Workflow};
