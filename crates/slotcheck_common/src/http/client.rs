use reqwest::header::HeaderMap;
use reqwest::{Client, Error as ReqwestError, Method, RequestBuilder, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::ApiResponse;
use crate::error::SmokeError;

/// Creates a new HTTP client with the given per-request timeout.
///
/// Redirects are followed, as a browser hitting the cancellation link would.
///
/// # Arguments
///
/// * `timeout` - Upper bound for a single request, connect and body included
///
/// # Returns
///
/// A new reqwest::Client instance, or the builder error
pub fn create_client(timeout: Duration) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::default())
        .build()
}

/// Issues requests against one booking backend.
///
/// Paths are resolved against the base URL the same way a browser resolves a
/// link, so `/api/slots` replaces any path on the base while `api/slots` is
/// appended to its last directory.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SmokeError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SmokeError::Transport(format!("invalid base URL {base_url:?}: {e}")))?;
        let client = create_client(timeout)?;
        Ok(Self { client, base_url })
    }

    /// Resolves `path` against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, SmokeError> {
        self.base_url
            .join(path)
            .map_err(|e| SmokeError::Transport(format!("cannot resolve {path:?}: {e}")))
    }

    /// Sends a request without a body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
    ) -> Result<ApiResponse, SmokeError> {
        let url = self.resolve(path)?;
        let request = self.client.request(method.clone(), url.clone()).headers(headers);
        self.execute(method, url, request).await
    }

    /// Sends a request with `payload` serialized as the JSON body.
    ///
    /// `Content-Type: application/json` is added only when `headers` does not
    /// already carry a content type.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - Path or URL, resolved against the base URL
    /// * `payload` - Value serialized as the request body
    /// * `headers` - Extra request headers, such as `Accept`
    ///
    /// # Returns
    ///
    /// The status and body for any HTTP status, including 4xx and 5xx.
    /// `SmokeError::Transport` when no response was received.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &T,
        headers: HeaderMap,
    ) -> Result<ApiResponse, SmokeError> {
        let url = self.resolve(path)?;
        // headers first: json() keeps an existing content type
        let request = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers)
            .json(payload);
        self.execute(method, url, request).await
    }

    pub async fn get(&self, path: &str, headers: HeaderMap) -> Result<ApiResponse, SmokeError> {
        self.send(Method::GET, path, headers).await
    }

    pub async fn delete(&self, path: &str, headers: HeaderMap) -> Result<ApiResponse, SmokeError> {
        self.send(Method::DELETE, path, headers).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
        headers: HeaderMap,
    ) -> Result<ApiResponse, SmokeError> {
        self.send_json(Method::POST, path, payload, headers).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResponse, SmokeError> {
        debug!("{} {}", method, url);
        let response = request.send().await.map_err(|e| {
            SmokeError::Transport(format!("{method} {url} failed: {e}"))
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            SmokeError::Transport(format!("reading response of {method} {url} failed: {e}"))
        })?;
        debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExitStatusCode, EXIT_TRANSPORT};
    use crate::http::{accept, JSON, LD_JSON};
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use axum::{
        http::{HeaderMap as AxumHeaders, StatusCode},
        routing::{get, post},
        Router,
    };
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resolve_follows_link_semantics() {
        let api = client("https://booking.example.com/app/");
        assert_eq!(
            api.resolve("/api/slots/2").unwrap().as_str(),
            "https://booking.example.com/api/slots/2"
        );
        assert_eq!(
            api.resolve("api/slots").unwrap().as_str(),
            "https://booking.example.com/app/api/slots"
        );
        assert_eq!(
            api.resolve("https://other.example.com/api/slots/3").unwrap().as_str(),
            "https://other.example.com/api/slots/3"
        );
    }

    #[test]
    fn test_invalid_base_url_is_transport_error() {
        let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_TRANSPORT);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let base = spawn(Router::new().route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;

        let response = client(&base).get("/broken", HeaderMap::new()).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_json_payload_sets_default_content_type() {
        let base = spawn(Router::new().route(
            "/echo",
            post(|headers: AxumHeaders, body: String| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                format!("{content_type}|{body}")
            }),
        ))
        .await;

        let response = client(&base)
            .post("/echo", &serde_json::json!({"a": 1}), accept(JSON))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "application/json|{\"a\":1}");
    }

    #[tokio::test]
    async fn test_json_payload_keeps_caller_content_type() {
        let base = spawn(Router::new().route(
            "/echo",
            post(|headers: AxumHeaders| async move {
                headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        ))
        .await;

        let mut headers = accept(LD_JSON);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(LD_JSON));
        let response = client(&base)
            .post("/echo", &serde_json::json!({"a": 1}), headers)
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, LD_JSON);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .get("/api/slots", HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SmokeError::Transport(_)));
        assert_eq!(err.exit_code(), EXIT_TRANSPORT);
    }
}
