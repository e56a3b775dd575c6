// --- File: crates/services/slotcheck_runner/src/slots.rs ---
use serde_json::Value;
use slotcheck_common::http::LD_JSON;
use slotcheck_common::{accept, excerpt, ApiClient, SmokeError};
use tracing::{debug, info};

use crate::extract::{first_free_slot, slot_candidates};

/// Collection endpoint listing all slots.
pub const SLOTS_PATH: &str = "/api/slots";

/// Lists the slots and returns the identifier of the first free one.
///
/// `Ok(None)` means the backend has no free slot. That is not a failure; the
/// caller skips the run.
pub async fn find_free_slot(
    api: &ApiClient,
    excerpt_chars: usize,
) -> Result<Option<String>, SmokeError> {
    let response = api.get(SLOTS_PATH, accept(LD_JSON)).await?;
    info!("Slot list code {}", response.status);

    if response.status != 200 {
        return Err(SmokeError::SlotListing {
            detail: format!("HTTP {}", response.status),
            excerpt: excerpt(&response.body, excerpt_chars),
        });
    }

    select_free_slot(&response.body, excerpt_chars)
}

/// Picks the first free slot out of a collection response body.
pub fn select_free_slot(body: &str, excerpt_chars: usize) -> Result<Option<String>, SmokeError> {
    let payload: Value = serde_json::from_str(body).map_err(|e| SmokeError::SlotListing {
        detail: format!("response is not JSON: {e}"),
        excerpt: excerpt(body, excerpt_chars),
    })?;

    if !payload.is_object() && !payload.is_array() {
        return Err(SmokeError::SlotListing {
            detail: "response is neither a collection nor an object".to_string(),
            excerpt: excerpt(body, excerpt_chars),
        });
    }

    let candidates = slot_candidates(&payload);
    debug!("{} slot candidates", candidates.len());
    Ok(first_free_slot(candidates))
}
