//! Facebook Graph API client.
//!
//! Covers the two calls the bot makes: a `GET /me` token check at startup and
//! a `POST /{page_id}/feed` to publish. The base URL is injectable so tests
//! can point the client at a local mock server instead of
//! `graph.facebook.com`.
//!
//! Failures are surfaced once and never retried; the bot runs again on the
//! next scheduler tick.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Production Graph API host.
pub const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Graph API error {code} ({kind}): {message}")]
    Api {
        code: i64,
        kind: String,
        message: String,
    },
    #[error("unexpected Graph API response ({status}): {body}")]
    UnexpectedResponse {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// The account a token authenticates as, from `GET /me`.
#[derive(Debug, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    id: String,
}

/// Error envelope the Graph API wraps failures in.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: i64,
}

/// Client for one page's feed.
pub struct PageClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl PageClient {
    /// Client against the production Graph API at the given version.
    pub fn new(access_token: impl Into<String>, api_version: &str) -> Result<Self, GraphError> {
        Self::with_base_url(format!("{GRAPH_BASE_URL}/{api_version}"), access_token)
    }

    /// Client against an arbitrary base URL. Tests use this with a mock
    /// server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fiew-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Check the token by fetching the account it authenticates as.
    pub async fn verify_token(&self) -> Result<Account, GraphError> {
        let url = format!("{}/me", self.base_url);
        debug!(%url, "verifying access token");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("fields", "id,name"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;
        read_json(response).await
    }

    /// Publish `message` to the page feed, optionally with an attached link.
    ///
    /// Returns the id of the created post.
    pub async fn publish(
        &self,
        page_id: &str,
        message: &str,
        link: Option<&str>,
    ) -> Result<String, GraphError> {
        let url = format!("{}/{}/feed", self.base_url, page_id);
        debug!(%url, "publishing to feed");

        let mut form = vec![
            ("message", message),
            ("access_token", self.access_token.as_str()),
        ];
        if let Some(link) = link {
            form.push(("link", link));
        }

        let response = self.http.post(&url).form(&form).send().await?;
        let published: PublishResponse = read_json(response).await?;
        Ok(published.id)
    }
}

/// Decode a Graph response, turning non-success statuses into typed errors.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GraphError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return Err(GraphError::Api {
                code: envelope.error.code,
                kind: envelope.error.kind,
                message: envelope.error.message,
            });
        }
        return Err(GraphError::UnexpectedResponse { status, body });
    }

    serde_json::from_str(&body).map_err(|_| GraphError::UnexpectedResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn verify_token_returns_account() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("access_token".into(), "tok".into()),
                Matcher::UrlEncoded("fields".into(), "id,name".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "42", "name": "Fiew"}"#)
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "tok").unwrap();
        let account = client.verify_token().await.unwrap();

        assert_eq!(account.id, "42");
        assert_eq!(account.name.as_deref(), Some("Fiew"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn publish_posts_form_to_feed() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/98765/feed")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("message".into(), "hello page".into()),
                Matcher::UrlEncoded("access_token".into(), "tok".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "98765_111"}"#)
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "tok").unwrap();
        let post_id = client.publish("98765", "hello page", None).await.unwrap();

        assert_eq!(post_id, "98765_111");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn publish_includes_link_when_given() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/98765/feed")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("message".into(), "with link".into()),
                Matcher::UrlEncoded("link".into(), "https://fiew.example".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "98765_112"}"#)
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "tok").unwrap();
        let post_id = client
            .publish("98765", "with link", Some("https://fiew.example"))
            .await
            .unwrap();

        assert_eq!(post_id, "98765_112");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_envelope_is_decoded() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/98765/feed")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {"message": "Invalid OAuth access token.", "type": "OAuthException", "code": 190}}"#,
            )
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "bad").unwrap();
        let err = client.publish("98765", "nope", None).await.unwrap_err();

        match err {
            GraphError::Api {
                code,
                kind,
                message,
            } => {
                assert_eq!(code, 190);
                assert_eq!(kind, "OAuthException");
                assert!(message.contains("Invalid OAuth"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_surfaced_raw() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/me")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "tok").unwrap();
        let err = client.verify_token().await.unwrap_err();

        match err {
            GraphError::UnexpectedResponse { status, body } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_with_malformed_body_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/98765/feed")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = PageClient::with_base_url(server.url(), "tok").unwrap();
        let err = client.publish("98765", "msg", None).await.unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedResponse { .. }));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = PageClient::with_base_url("http://localhost:1234/", "tok").unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
