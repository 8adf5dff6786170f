// SPDX-License-Identifier: MPL-2.0
//! Async HTTP client for the survivor directory backend.
//!
//! All methods are total with respect to toast handling: they map any
//! failure onto [`Error`](crate::error::Error) and the update loop decides
//! which toast id to trigger. Authorization is a plain `X-User-Id` header
//! carrying the caller's survivor id; there is no session state.

use crate::api::types::{Item, NewSurvivor, Survivor, TradeRequest};
use crate::error::{Error, Result};

/// Header identifying the calling survivor to the backend.
const USER_ID_HEADER: &str = "X-User-Id";

/// Cloneable handle to the backend. Cloning is cheap (the inner
/// `reqwest::Client` is reference-counted), which lets the update loop
/// move a copy into each spawned task.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Builds a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent("IcedOutpost/0.1.0")
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches the survivor list, optionally filtered by distance from the
    /// caller's own location (requires an identity for distances to be
    /// computed server-side).
    pub async fn survivors(
        &self,
        identity: Option<&str>,
        max_distance: Option<f64>,
    ) -> Result<Vec<Survivor>> {
        let mut request = self.http.get(self.url("/api/survivors/"));
        if let Some(id) = identity {
            request = request.header(USER_ID_HEADER, id);
        }
        if let Some(distance) = max_distance {
            request = request.query(&[("max_distance", distance)]);
        }
        decode(send(request).await?).await
    }

    /// Fetches a single survivor's profile.
    pub async fn survivor(&self, survivor_id: &str) -> Result<Survivor> {
        let request = self
            .http
            .get(self.url(&format!("/api/survivors/{survivor_id}/")));
        decode(send(request).await?).await
    }

    /// Registers a new survivor; the response carries the assigned id.
    pub async fn create_survivor(&self, survivor: NewSurvivor) -> Result<Survivor> {
        let request = self.http.post(self.url("/api/survivors/")).json(&survivor);
        decode(send(request).await?).await
    }

    /// Updates the caller's own last known location.
    pub async fn update_location(
        &self,
        identity: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Survivor> {
        let request = self
            .http
            .put(self.url(&format!("/api/survivors/{identity}/location/")))
            .header(USER_ID_HEADER, identity)
            .json(&serde_json::json!({
                "latitude": latitude,
                "longitude": longitude,
            }));
        decode(send(request).await?).await
    }

    /// Reports a survivor as infected on behalf of the caller.
    pub async fn report_infection(&self, identity: &str, reported_id: &str) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!("/api/survivors/{reported_id}/report/")))
            .header(USER_ID_HEADER, identity);
        // The ack body (the created report) is not needed by any screen.
        send(request).await?;
        Ok(())
    }

    /// Executes a trade between the caller and another survivor.
    pub async fn trade(&self, identity: &str, trade: TradeRequest) -> Result<Survivor> {
        let request = self
            .http
            .post(self.url("/api/survivors/trade/"))
            .header(USER_ID_HEADER, identity)
            .json(&trade);
        decode(send(request).await?).await
    }

    /// Fetches the shared item catalog.
    pub async fn items(&self) -> Result<Vec<Item>> {
        decode(send(self.http.get(self.url("/api/items/"))).await?).await
    }
}

/// Sends a request and maps HTTP status codes onto error variants.
async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Http(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
        reqwest::StatusCode::NOT_FOUND => Err(Error::NotFound),
        status if !status.is_success() => Err(Error::Http(format!("HTTP status: {status}"))),
        _ => Ok(response),
    }
}

/// Decodes a JSON body, mapping parse failures onto `DataCorrupted`.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| Error::DataCorrupted(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn new_strips_trailing_slashes_from_base_url() {
        let client = Client::new("http://localhost:8000//").expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/items/"), "http://localhost:8000/api/items/");
    }

    #[test]
    fn client_is_cloneable_for_task_spawning() {
        let client = Client::new("http://localhost:8000").expect("client builds");
        let clone = client.clone();
        assert_eq!(client.base_url(), clone.base_url());
    }

    /// Serves exactly one canned HTTP response, then closes the connection.
    /// Returns the base URL to point a [`Client`] at.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn status_401_maps_to_unauthorized() {
        let base_url = serve_once("401 Unauthorized", "{}").await;
        let client = Client::new(base_url).expect("client builds");

        let result = client.survivors(Some("some-id"), None).await;
        assert_eq!(result, Err(Error::Unauthorized));
    }

    #[tokio::test]
    async fn status_404_maps_to_not_found() {
        let base_url = serve_once("404 Not Found", "{}").await;
        let client = Client::new(base_url).expect("client builds");

        let result = client.survivor("no-such-id").await;
        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn other_error_statuses_map_to_http() {
        let base_url = serve_once("500 Internal Server Error", "{}").await;
        let client = Client::new(base_url).expect("client builds");

        let result = client.items().await;
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_data_corrupted() {
        let base_url = serve_once("200 OK", "not json at all").await;
        let client = Client::new(base_url).expect("client builds");

        let result = client.items().await;
        assert!(matches!(result, Err(Error::DataCorrupted(_))));
    }

    #[tokio::test]
    async fn successful_body_decodes() {
        let base_url = serve_once(
            "200 OK",
            r#"[{"id":"water","label":"Water","worth":4}]"#,
        )
        .await;
        let client = Client::new(base_url).expect("client builds");

        let items = client.items().await.expect("items decode");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "water");
        assert_eq!(items[0].worth, 4);
    }
}
