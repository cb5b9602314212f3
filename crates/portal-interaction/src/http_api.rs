//! HttpPortalApi - REST implementation of the portal API.
//!
//! Every authorized call reads the bearer token fresh from the credential
//! store, so a logout or re-login is picked up by the next request.

use async_trait::async_trait;
use portal_core::api::{
    DataEnvelope, LoginRequest, LoginResponse, NewMessage, NewRecord, PortalApi, RecordReply,
    SummaryResponse,
};
use portal_core::message::{EntityId, Message};
use portal_core::record::Record;
use portal_core::session::{CredentialStore, SessionToken};
use portal_core::{PortalError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const LOGIN_FAILED: &str = "登入失敗";

/// Portal API client over HTTP.
#[derive(Clone)]
pub struct HttpPortalApi {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl HttpPortalApi {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            store,
        }
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            store,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends a request carrying the bearer token and a JSON content type.
    ///
    /// No token recovery happens here: a 401 surfaces as
    /// `PortalError::Unauthorized` for the caller to act on.
    pub async fn authorized_fetch<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let token = self.store.token()?.ok_or(PortalError::NotLoggedIn)?;

        debug!("{} {}", method, path);
        let mut request = self
            .client
            .request(method, self.endpoint(path))
            .headers(authorization_headers(&token)?);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.authorized_fetch::<()>(Method::GET, path, None)
            .await?
            .json::<T>()
            .await
            .map_err(map_transport_error)
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        debug!("POST /auth/login");
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortalError::rejected(
                status.as_u16(),
                server_message(&body).unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(map_transport_error)
    }

    async fn list_messages(&self) -> Result<Vec<Message>> {
        let envelope: DataEnvelope<Message> = self.get_json("/api/messages").await?;
        Ok(envelope.into_items())
    }

    async fn post_message(&self, text: &str) -> Result<()> {
        self.authorized_fetch(Method::POST, "/api/messages", Some(&NewMessage { message: text }))
            .await?;
        Ok(())
    }

    async fn message_summary(&self) -> Result<String> {
        let response: SummaryResponse = self.get_json("/api/messages/summary").await?;
        Ok(response.summary)
    }

    async fn list_records(&self) -> Result<Vec<Record>> {
        let envelope: DataEnvelope<Record> = self.get_json("/api/records").await?;
        Ok(envelope.into_items())
    }

    async fn create_record(&self, content: &str) -> Result<()> {
        self.authorized_fetch(Method::POST, "/api/records", Some(&NewRecord { content }))
            .await?;
        Ok(())
    }

    async fn reply_record(&self, id: &EntityId, reply: &str) -> Result<()> {
        let path = format!("/api/records/{id}");
        self.authorized_fetch(Method::PUT, &path, Some(&RecordReply { reply }))
            .await?;
        Ok(())
    }
}

/// `Authorization: Bearer <token>` plus `Content-Type: application/json`.
pub fn authorization_headers(token: &SessionToken) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|_| PortalError::internal("Session token is not a valid header value"))?;
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

/// Maps a non-2xx status of an authorized call to the error taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> PortalError {
    match status {
        StatusCode::UNAUTHORIZED => PortalError::Unauthorized,
        StatusCode::FORBIDDEN => PortalError::Forbidden,
        other => PortalError::rejected(
            other.as_u16(),
            server_message(body).unwrap_or_else(|| {
                other
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }),
        ),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The `message` field of a JSON error body, if any.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

fn map_transport_error(err: reqwest::Error) -> PortalError {
    if err.is_decode() {
        PortalError::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    } else {
        PortalError::connectivity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_headers() {
        let headers = authorization_headers(&SessionToken::new("t1")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer t1");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED, ""), PortalError::Unauthorized);
        assert_eq!(classify_status(StatusCode::FORBIDDEN, "{}"), PortalError::Forbidden);
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, r#"{"message":"內容不可為空"}"#),
            PortalError::rejected(400, "內容不可為空")
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>"),
            PortalError::rejected(500, "Internal Server Error")
        );
    }
}
