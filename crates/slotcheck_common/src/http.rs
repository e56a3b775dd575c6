use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

// Include the client module
pub mod client;

/// JSON-LD, the hypermedia representation the booking API serves.
pub const LD_JSON: &str = "application/ld+json";
pub const JSON: &str = "application/json";
pub const HTML: &str = "text/html";

/// Status code and body text of a completed exchange.
///
/// 4xx and 5xx responses are returned as-is; interpreting them is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds a header map requesting the given representation.
pub fn accept(media_type: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(media_type));
    headers
}
