//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or as the environment variable named
//! beside it. A `.env` file in the working directory is read first.

use clap::Parser;
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::graph::GraphSettings;
use crate::pipeline::PipelineSettings;

/// Provision student accounts from onboarding-form responses.
#[derive(Clone, Parser)]
#[command(name = "student-onboarding", version)]
pub struct Cli {
    /// Directory tenant the app registration lives in.
    #[arg(long, env = "TENANT_ID")]
    pub tenant_id: String,

    /// App registration (client) id.
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: String,

    /// App registration secret. Required at run time; its absence fails authentication.
    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Drive holding the onboarding workbook.
    #[arg(long, env = "DRIVE_ID")]
    pub drive_id: String,

    /// Workbook item id.
    #[arg(long, env = "FILE_ID")]
    pub file_id: String,

    /// Workbook table holding the form responses.
    #[arg(long, env = "TABLE_NAME", default_value = "OfficeForms.Table")]
    pub table: String,

    /// Service account: mailbox for outgoing mail and identity for the contact script.
    #[arg(long, env = "SERVICE_ACCOUNT_UPN")]
    pub service_account: String,

    /// `from` address of credential emails.
    #[arg(long, env = "SENDER_ADDRESS")]
    pub sender_address: String,

    /// Domain appended to every student user principal name.
    #[arg(long, env = "UPN_DOMAIN", default_value = "ldv-muenchen.de")]
    pub upn_domain: String,

    /// Append-only log of processed user principal names.
    #[arg(long, env = "LEDGER_PATH", default_value = "processed.log")]
    pub ledger: PathBuf,

    /// Shell used to run the contact script.
    #[arg(long, env = "CONTACT_SHELL", default_value = "pwsh")]
    pub contact_shell: String,

    /// Contact provisioning script.
    #[arg(long, env = "CONTACT_SCRIPT", default_value = "cont.ps1")]
    pub contact_script: PathBuf,

    /// Seconds before an HTTP request is abandoned.
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Seconds before the contact script is killed.
    #[arg(long, env = "CONTACT_TIMEOUT_SECS", default_value_t = 120)]
    pub contact_timeout_secs: u64,

    #[arg(long, env = "LOGIN_BASE_URL", default_value = "https://login.microsoftonline.com")]
    pub login_base_url: Url,

    #[arg(long, env = "GRAPH_BASE_URL", default_value = "https://graph.microsoft.com/v1.0")]
    pub graph_base_url: Url,

    /// Default log directive when RUST_LOG is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("drive_id", &self.drive_id)
            .field("file_id", &self.file_id)
            .field("table", &self.table)
            .field("service_account", &self.service_account)
            .field("sender_address", &self.sender_address)
            .field("upn_domain", &self.upn_domain)
            .field("ledger", &self.ledger)
            .field("contact_shell", &self.contact_shell)
            .field("contact_script", &self.contact_script)
            .finish_non_exhaustive()
    }
}

impl Cli {
    pub fn graph_settings(&self) -> GraphSettings {
        GraphSettings {
            login_base: self.login_base_url.clone(),
            graph_base: self.graph_base_url.clone(),
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            drive_id: self.drive_id.clone(),
            file_id: self.file_id.clone(),
            table: self.table.clone(),
            timeout: Duration::from_secs(self.http_timeout_secs),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            domain: self.upn_domain.clone(),
            mailbox: self.service_account.clone(),
            sender: self.sender_address.clone(),
        }
    }

    pub fn contact_timeout(&self) -> Duration {
        Duration::from_secs(self.contact_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[&str] = &[
        "student-onboarding",
        "--tenant-id",
        "t",
        "--client-id",
        "c",
        "--drive-id",
        "d",
        "--file-id",
        "f",
        "--service-account",
        "svc@ldv-muenchen.de",
        "--sender-address",
        "it-admin@ldv-muenchen.de",
    ];

    const ENV_VARS: &[&str] = &[
        "TENANT_ID",
        "CLIENT_ID",
        "AZURE_CLIENT_SECRET",
        "DRIVE_ID",
        "FILE_ID",
        "TABLE_NAME",
        "SERVICE_ACCOUNT_UPN",
        "SENDER_ADDRESS",
        "UPN_DOMAIN",
        "LEDGER_PATH",
        "CONTACT_SHELL",
        "CONTACT_SCRIPT",
        "HTTP_TIMEOUT_SECS",
        "CONTACT_TIMEOUT_SECS",
        "LOGIN_BASE_URL",
        "GRAPH_BASE_URL",
        "LOG_LEVEL",
    ];

    /// Parse with none of the backing environment variables visible.
    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        Cli::try_parse_from(args.iter().copied())
    }

    #[test]
    fn test_defaults() {
        let cli = parse(REQUIRED).unwrap();

        assert_eq!(cli.table, "OfficeForms.Table");
        assert_eq!(cli.upn_domain, "ldv-muenchen.de");
        assert_eq!(cli.ledger, PathBuf::from("processed.log"));
        assert_eq!(cli.contact_shell, "pwsh");
        assert_eq!(cli.http_timeout_secs, 30);
        assert_eq!(cli.graph_base_url.as_str(), "https://graph.microsoft.com/v1.0");

        let pipeline = cli.pipeline_settings();
        assert_eq!(pipeline.mailbox, "svc@ldv-muenchen.de");
        assert_eq!(pipeline.sender, "it-admin@ldv-muenchen.de");
        assert_eq!(cli.graph_settings().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_service_account_is_required() {
        let args: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|a| !a.starts_with("svc") && *a != "--service-account")
            .collect();
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--graph-base-url", "not a url"]);
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--client-secret", "hunter2"]);
        let cli = parse(&args).unwrap();
        assert_eq!(cli.client_secret.as_deref(), Some("hunter2"));
        assert!(!format!("{:?}", cli).contains("hunter2"));
    }
}
