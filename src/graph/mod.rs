// src/graph/mod.rs

pub mod client;
pub mod types;

pub use client::{GraphClient, GraphSettings};
pub use types::{NewUser, PasswordProfile, SendMail};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{ApiError, AuthError, FetchError};
use crate::schema::Row;

/// Bearer token for the Graph API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// The identity, table and mail endpoints the pipeline talks to.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Client-credentials token exchange. No retry.
    async fn authenticate(&self) -> Result<AccessToken, AuthError>;

    /// Every row of the onboarding table, in table order. Single request, no paging.
    async fn fetch_rows(&self, token: &AccessToken) -> Result<Vec<Row>, FetchError>;

    async fn create_user(&self, token: &AccessToken, user: &NewUser) -> Result<(), ApiError>;

    /// Send `mail` from the given mailbox.
    async fn send_mail(
        &self,
        token: &AccessToken,
        mailbox: &str,
        mail: &SendMail,
    ) -> Result<(), ApiError>;
}

/// Decode a token endpoint body. A missing or empty `access_token` is malformed.
pub fn parse_token(body: &str) -> Result<AccessToken, AuthError> {
    let parsed: types::TokenResponse = serde_json::from_str(body)
        .map_err(|e| AuthError::MalformedResponse(format!("{}: {}", e, body)))?;
    match parsed.access_token {
        Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
        _ => Err(AuthError::MalformedResponse(body.to_string())),
    }
}

/// Rows from a complete rows response; any non-2xx status is malformed.
pub fn rows_response(status: StatusCode, body: &str) -> Result<Vec<Row>, FetchError> {
    if !status.is_success() {
        return Err(FetchError::MalformedResponse(format!("{}: {}", status, body)));
    }
    parse_rows(body)
}

/// Unwrap the rows envelope; each entry's first `values` sequence is the row.
pub fn parse_rows(body: &str) -> Result<Vec<Row>, FetchError> {
    let envelope: types::RowsEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    if envelope.value.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    envelope
        .value
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .values
                .first()
                .map(|cells| Row::from_cells(cells))
                .ok_or_else(|| FetchError::MalformedResponse(format!("row {} has no values", i)))
        })
        .collect()
}
