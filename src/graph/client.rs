use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::{parse_token, rows_response, AccessToken, GraphApi, NewUser, SendMail};
use crate::error::{ApiError, AuthError, FetchError};
use crate::schema::Row;

const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Where and as whom the client talks to Graph.
#[derive(Clone)]
pub struct GraphSettings {
    pub login_base: Url,
    pub graph_base: Url,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub drive_id: String,
    pub file_id: String,
    pub table: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GraphSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSettings")
            .field("login_base", &self.login_base.as_str())
            .field("graph_base", &self.graph_base.as_str())
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("drive_id", &self.drive_id)
            .field("file_id", &self.file_id)
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// reqwest-backed [`GraphApi`].
pub struct GraphClient {
    http: Client,
    settings: GraphSettings,
}

impl GraphClient {
    pub fn new(settings: GraphSettings) -> Result<Self> {
        for base in [&settings.login_base, &settings.graph_base] {
            if base.cannot_be_a_base() {
                anyhow::bail!("{} cannot be used as a base URL", base);
            }
        }
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, settings })
    }

    /// `base` with each of `segments` appended as one percent-encoded path segment.
    fn endpoint(base: &Url, segments: &[&str]) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn token_url(&self) -> Url {
        Self::endpoint(
            &self.settings.login_base,
            &[self.settings.tenant_id.as_str(), "oauth2", "v2.0", "token"],
        )
    }

    pub fn rows_url(&self) -> Url {
        Self::endpoint(
            &self.settings.graph_base,
            &[
                "drives",
                self.settings.drive_id.as_str(),
                "items",
                self.settings.file_id.as_str(),
                "workbook",
                "tables",
                self.settings.table.as_str(),
                "rows",
            ],
        )
    }

    pub fn users_url(&self) -> Url {
        Self::endpoint(&self.settings.graph_base, &["users"])
    }

    pub fn send_mail_url(&self, mailbox: &str) -> Url {
        Self::endpoint(&self.settings.graph_base, &["users", mailbox, "sendMail"])
    }

    /// Map a non-2xx response to [`ApiError::Status`], keeping the body for the log.
    async fn check(resp: Response) -> Result<String, ApiError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.as_u16() >= 300 {
            return Err(ApiError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let secret = self
            .settings
            .client_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSecret)?;

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", secret),
            ("scope", GRAPH_SCOPE),
        ];
        let body = self
            .http
            .post(self.token_url())
            .form(&form)
            .send()
            .await
            .map_err(AuthError::NetworkFailure)?
            .text()
            .await
            .map_err(AuthError::NetworkFailure)?;

        let token = parse_token(&body)?;
        debug!("obtained access token");
        Ok(token)
    }

    async fn fetch_rows(&self, token: &AccessToken) -> Result<Vec<Row>, FetchError> {
        let resp = self
            .http
            .get(self.rows_url())
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(FetchError::NetworkFailure)?;
        let status = resp.status();
        let body = resp.text().await.map_err(FetchError::NetworkFailure)?;

        let rows = rows_response(status, &body)?;
        info!(count = rows.len(), table = %self.settings.table, "found rows");
        Ok(rows)
    }

    async fn create_user(&self, token: &AccessToken, user: &NewUser) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.users_url())
            .bearer_auth(token.secret())
            .json(user)
            .send()
            .await?;
        let body = Self::check(resp).await?;
        debug!(upn = %user.user_principal_name, response = %body, "graph response");
        Ok(())
    }

    async fn send_mail(
        &self,
        token: &AccessToken,
        mailbox: &str,
        mail: &SendMail,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.send_mail_url(mailbox))
            .bearer_auth(token.secret())
            .json(mail)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
