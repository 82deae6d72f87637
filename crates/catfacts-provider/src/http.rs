//! [`HttpFactProvider`] — a [`FactProvider`] over a JSON HTTP endpoint.

use catfacts_core::provider::{FactProvider, FetchError};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{Error, Result};

/// Public endpoint serving one random cat fact per request.
pub const DEFAULT_SOURCE_URL: &str = "https://catfact.ninja/fact";

/// Response shape expected from the source. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct FactPayload {
  fact: Option<String>,
}

/// Fetches candidate facts with `GET <url>`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. No client
/// timeout is configured here; the caller's
/// [`RetryPolicy`](catfacts_core::provider::RetryPolicy) bounds each attempt.
#[derive(Debug, Clone)]
pub struct HttpFactProvider {
  client: Client,
  url:    Url,
}

impl HttpFactProvider {
  pub fn new(url: &str) -> Result<Self> {
    let invalid = |reason: String| Error::InvalidUrl { url: url.to_owned(), reason };

    let url = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
      return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    let client = Client::builder()
      .user_agent(concat!("catfacts/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, url })
  }

  pub fn url(&self) -> &Url { &self.url }
}

impl FactProvider for HttpFactProvider {
  async fn fetch_once(&self) -> Result<String, FetchError> {
    let resp = self
      .client
      .get(self.url.clone())
      .send()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status(status.as_u16()));
    }

    let body = resp
      .bytes()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;
    let payload: FactPayload =
      serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    tracing::debug!(url = %self.url, "received fact payload");
    payload.fact.ok_or(FetchError::MissingFact)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use catfacts_core::provider::RetryPolicy;

  use super::*;

  async fn serve(status: usize, body: &str) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/fact")
      .with_status(status)
      .with_header("content-type", "application/json")
      .with_body(body)
      .create_async()
      .await;
    (server, mock)
  }

  fn provider(server: &mockito::ServerGuard) -> HttpFactProvider {
    HttpFactProvider::new(&format!("{}/fact", server.url())).unwrap()
  }

  #[test]
  fn rejects_unparsable_url() {
    assert!(matches!(HttpFactProvider::new("not a url"), Err(Error::InvalidUrl { .. })));
  }

  #[test]
  fn rejects_non_http_scheme() {
    assert!(matches!(
      HttpFactProvider::new("ftp://example.com/fact"),
      Err(Error::InvalidUrl { .. })
    ));
  }

  #[tokio::test]
  async fn returns_fact_field_untrimmed() {
    let (server, mock) =
      serve(200, r#"{"fact":"  Cats have 24 whiskers. ","length":24}"#).await;

    let got = provider(&server).fetch_once().await.unwrap();

    assert_eq!(got, "  Cats have 24 whiskers. ");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn error_status_is_reported() {
    let (server, _mock) = serve(500, r#"{"message":"boom"}"#).await;
    let err = provider(&server).fetch_once().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(500)));
  }

  #[tokio::test]
  async fn missing_fact_field_is_reported() {
    let (server, _mock) = serve(200, r#"{"length":0}"#).await;
    let err = provider(&server).fetch_once().await.unwrap_err();
    assert!(matches!(err, FetchError::MissingFact));
  }

  #[tokio::test]
  async fn non_string_fact_is_malformed() {
    let (server, _mock) = serve(200, r#"{"fact":42}"#).await;
    let err = provider(&server).fetch_once().await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
  }

  #[tokio::test]
  async fn invalid_json_is_malformed() {
    let (server, _mock) = serve(200, "<html>oops</html>").await;
    let err = provider(&server).fetch_once().await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
  }

  #[tokio::test]
  async fn fetch_gives_up_after_retries() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/fact")
      .with_status(503)
      .expect(3)
      .create_async()
      .await;

    let policy = RetryPolicy::new(Duration::from_secs(5), 3, Duration::ZERO).unwrap();
    let got = provider(&server).fetch(policy).await;

    assert_eq!(got, None);
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn fetch_returns_first_good_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/fact")
      .with_status(200)
      .with_body(r#"{"fact":"Cats can't climb down trees head-first."}"#)
      .expect(1)
      .create_async()
      .await;

    let got = provider(&server).fetch(RetryPolicy::default()).await;

    assert_eq!(got.as_deref(), Some("Cats can't climb down trees head-first."));
    mock.assert_async().await;
  }
}
