use async_trait::async_trait;
use std::{path::Path, time::Duration};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ContactError;

/// A mail contact to register for a parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentContact {
    pub name: String,
    pub email: String,
    pub class: String,
}

/// Registers a parent as a mail contact in the directory.
#[async_trait]
pub trait ContactProvisioner: Send + Sync {
    async fn create_contact(&self, contact: &ParentContact) -> Result<(), ContactError>;
}

/// Runs an external script as `<program> <args..> -Name <n> -Email <e> -Class <c>`.
///
/// The service account is handed to the child as `SERVICE_ACCOUNT_UPN`.
/// Success is the exit status; stdout and stderr are combined for the log.
pub struct ScriptContactProvisioner {
    program: String,
    args: Vec<String>,
    service_account: String,
    timeout: Duration,
}

impl ScriptContactProvisioner {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        service_account: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            service_account: service_account.into(),
            timeout,
        }
    }

    /// `<shell> -File <script>`, the PowerShell calling convention.
    pub fn powershell(
        shell: impl Into<String>,
        script: impl AsRef<Path>,
        service_account: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self::new(
            shell,
            vec!["-File".to_string(), script.as_ref().display().to_string()],
            service_account,
            timeout,
        )
    }
}

#[async_trait]
impl ContactProvisioner for ScriptContactProvisioner {
    async fn create_contact(&self, contact: &ParentContact) -> Result<(), ContactError> {
        if contact.name.trim().is_empty() || contact.email.trim().is_empty() {
            return Err(ContactError::MissingDetails);
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("-Name")
            .arg(&contact.name)
            .arg("-Email")
            .arg(&contact.email)
            .arg("-Class")
            .arg(&contact.class)
            .env("SERVICE_ACCOUNT_UPN", &self.service_account)
            .kill_on_drop(true);
        debug!(program = %self.program, email = %contact.email, "running contact script");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ContactError::TimedOut(self.timeout))?
            .map_err(ContactError::Spawn)?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !output.status.success() {
            return Err(ContactError::Failed {
                status: output.status.to_string(),
                output: combined,
            });
        }

        info!(email = %contact.email, output = %combined.trim_end(), "contact script output");
        Ok(())
    }
}
