use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::schema::Field;

/// Failure obtaining a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("client secret is not configured (AZURE_CLIENT_SECRET)")]
    MissingSecret,
    #[error("token request failed: {0}")]
    NetworkFailure(#[source] reqwest::Error),
    #[error("token response carried no access_token: {0}")]
    MalformedResponse(String),
}

/// Failure reading the onboarding table.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no rows found in table")]
    EmptyResult,
    #[error("rows request failed: {0}")]
    NetworkFailure(#[source] reqwest::Error),
    #[error("unexpected rows response: {0}")]
    MalformedResponse(String),
}

/// Failure of a single bearer-authenticated Graph call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("graph API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// A row that cannot be processed. Informational; the row is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing mandatory field {:?}", .0.header())]
    MissingField(Field),
}

#[derive(Debug, Error)]
#[error("failed to create account {upn}: {source}")]
pub struct ProvisionError {
    pub upn: String,
    #[source]
    pub source: ApiError,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("name and email are required")]
    MissingDetails,
    #[error("could not start contact script: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("contact script did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("contact script failed ({status}):\n{output}")]
    Failed { status: String, output: String },
}

/// Failure notifying a parent. The account has already been created.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to create parent contact {email}: {source}")]
    ContactFailed {
        email: String,
        #[source]
        source: ContactError,
    },
    #[error("failed to send email to {email}: {source}")]
    EmailFailed {
        email: String,
        #[source]
        source: ApiError,
    },
}

/// Failure that aborts the whole run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("fetching rows failed: {0}")]
    Fetch(#[from] FetchError),
}
