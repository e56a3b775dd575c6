// --- File: crates/services/slotcheck_runner/src/workflow.rs ---
use serde::Serialize;
use serde_json::Value;
use slotcheck_common::error::{ExitStatusCode, EXIT_SUCCESS};
use slotcheck_common::http::{HTML, JSON, LD_JSON};
use slotcheck_common::{accept, excerpt, ApiClient, SmokeError};
use slotcheck_config::SmokeConfig;
use tracing::{debug, info};

use crate::extract::{cancel_token, is_reserved};
use crate::slots::find_free_slot;

pub const APPOINTMENTS_PATH: &str = "/api/appointments";
/// HTML page a customer lands on from the cancellation link.
pub const CANCEL_PAGE_PREFIX: &str = "/appointments/cancel/";
pub const CANCEL_API_PREFIX: &str = "/api/appointments/cancel/";

/// Inputs of a single smoke run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Slot path such as `/api/slots/2`; discovered from the listing when `None`.
    pub slot_id: Option<String>,
    pub tester_name: String,
    pub tester_email: String,
    pub excerpt_chars: usize,
}

impl RunSettings {
    pub fn from_config(config: &SmokeConfig, slot_id: Option<String>) -> Self {
        Self {
            // An empty --slot-id means "discover one"
            slot_id: slot_id.filter(|id| !id.is_empty()),
            tester_name: config.tester_name.clone(),
            tester_email: config.tester_email.clone(),
            excerpt_chars: config.excerpt_chars,
        }
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reserved, cancelled and saw the slot released.
    Passed { slot: String },
    /// The backend had no free slot, nothing was booked.
    Skipped,
}

impl ExitStatusCode for Outcome {
    fn exit_code(&self) -> u8 {
        EXIT_SUCCESS
    }
}

/// Body of `POST /api/appointments`.
#[derive(Serialize, Debug)]
pub struct AppointmentRequest<'a> {
    /// Absolute URL of the slot
    pub slot: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

/// Drives one reserve/cancel/verify cycle against the backend.
///
/// Every stage is gated on the previous one; the first failing stage ends the
/// run with its own [`SmokeError`] variant. Nothing is retried.
pub struct Workflow<'a> {
    api: &'a ApiClient,
    settings: &'a RunSettings,
}

impl<'a> Workflow<'a> {
    pub fn new(api: &'a ApiClient, settings: &'a RunSettings) -> Self {
        Self { api, settings }
    }

    pub async fn run(&self) -> Result<Outcome, SmokeError> {
        let slot_path = match self.resolve_slot().await? {
            Some(slot_path) => slot_path,
            None => {
                info!("No free slot available; aborting (not a failure)");
                return Ok(Outcome::Skipped);
            }
        };
        info!("Using slot {}", slot_path);

        let created = self.reserve(&slot_path).await?;
        let token = self.extract_token(&created)?;
        self.fetch_cancel_page(&token).await?;
        self.cancel(&token).await?;
        self.verify_release(&slot_path).await?;

        info!("E2E success");
        Ok(Outcome::Passed { slot: slot_path })
    }

    async fn resolve_slot(&self) -> Result<Option<String>, SmokeError> {
        match &self.settings.slot_id {
            Some(slot_id) => Ok(Some(slot_id.clone())),
            None => find_free_slot(self.api, self.settings.excerpt_chars).await,
        }
    }

    /// Books the slot and returns the raw creation response body.
    async fn reserve(&self, slot_path: &str) -> Result<String, SmokeError> {
        let slot_url = self.api.resolve(slot_path)?;
        let payload = AppointmentRequest {
            slot: slot_url.as_str(),
            name: &self.settings.tester_name,
            email: &self.settings.tester_email,
        };
        debug!("Creating appointment: {:?}", payload);

        let response = self
            .api
            .post(APPOINTMENTS_PATH, &payload, accept(LD_JSON))
            .await?;
        info!("Create code {}", response.status);

        match response.status {
            200 | 201 => Ok(response.body),
            status => Err(SmokeError::AppointmentCreation {
                status,
                excerpt: self.excerpt(&response.body),
            }),
        }
    }

    fn extract_token(&self, created_body: &str) -> Result<String, SmokeError> {
        let token = serde_json::from_str::<Value>(created_body)
            .ok()
            .as_ref()
            .and_then(cancel_token)
            .ok_or_else(|| SmokeError::MissingCancelToken {
                excerpt: self.excerpt(created_body),
            })?;
        debug!("Cancel token {}", token);
        Ok(token)
    }

    /// Only checks that the page is reachable: client errors pass, server errors fail.
    async fn fetch_cancel_page(&self, token: &str) -> Result<(), SmokeError> {
        let path = format!("{CANCEL_PAGE_PREFIX}{token}");
        let response = self.api.get(&path, accept(HTML)).await?;
        info!("Cancel page code {}", response.status);

        if !(200..=499).contains(&response.status) {
            return Err(SmokeError::CancelPageUnreachable {
                status: response.status,
            });
        }
        Ok(())
    }

    async fn cancel(&self, token: &str) -> Result<(), SmokeError> {
        let path = format!("{CANCEL_API_PREFIX}{token}");
        let response = self.api.delete(&path, accept(JSON)).await?;
        info!("DELETE cancel code {}", response.status);

        if !response.is_success() {
            return Err(SmokeError::Cancellation {
                status: response.status,
                excerpt: self.excerpt(&response.body),
            });
        }
        Ok(())
    }

    async fn verify_release(&self, slot_path: &str) -> Result<(), SmokeError> {
        let response = self.api.get(slot_path, accept(LD_JSON)).await?;
        info!("Slot GET code {}", response.status);

        if response.status != 200 {
            return Err(SmokeError::SlotRefetch {
                slot: slot_path.to_string(),
                detail: format!("HTTP {}", response.status),
            });
        }

        let slot: Value =
            serde_json::from_str(&response.body).map_err(|e| SmokeError::SlotRefetch {
                slot: slot_path.to_string(),
                detail: format!("response is not JSON: {e}"),
            })?;

        if !slot.is_object() {
            return Err(SmokeError::SlotRefetch {
                slot: slot_path.to_string(),
                detail: format!(
                    "response is not a JSON object: {}",
                    self.excerpt(&response.body)
                ),
            });
        }

        if is_reserved(&slot) {
            return Err(SmokeError::SlotStillReserved {
                slot: slot_path.to_string(),
                excerpt: self.excerpt(&response.body),
            });
        }
        Ok(())
    }

    fn excerpt(&self, body: &str) -> String {
        excerpt(body, self.settings.excerpt_chars)
    }
}

/// Runs the whole smoke test once.
pub async fn run(api: &ApiClient, settings: &RunSettings) -> Result<Outcome, SmokeError> {
    Workflow::new(api, settings).run().await
}
