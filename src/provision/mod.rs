// src/provision/mod.rs

pub mod password;

pub use password::TemporaryPassword;

use tracing::{error, info};

use crate::error::ProvisionError;
use crate::graph::{AccessToken, GraphApi, NewUser, PasswordProfile};
use crate::history::Ledger;
use crate::notify::ParentNotifier;
use crate::schema::StudentRecord;

/// Account fields derived from a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentIdentity {
    pub username: String,
    pub user_principal_name: String,
    pub display_name: String,
    pub password: TemporaryPassword,
}

impl StudentIdentity {
    /// Derive the identity with a freshly generated password.
    pub fn derive(record: &StudentRecord, domain: &str) -> Self {
        Self {
            username: record.username(),
            user_principal_name: record.user_principal_name(domain),
            display_name: record.display_name(),
            password: TemporaryPassword::generate(),
        }
    }

    pub fn new_user(&self, record: &StudentRecord) -> NewUser {
        NewUser {
            account_enabled: true,
            display_name: self.display_name.clone(),
            given_name: record.first_name.clone(),
            surname: record.last_name.clone(),
            mail_nickname: self.username.clone(),
            user_principal_name: self.user_principal_name.clone(),
            job_title: record.account_type.clone(),
            department: record.class.clone(),
            password_profile: PasswordProfile {
                force_change_password_next_sign_in: true,
                password: self.password.expose().to_string(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProvisionStatus {
    /// Account created and every present parent notified.
    Created { parents_notified: usize },
    /// Account created, parent notification stopped early.
    NotifyFailed,
    /// The ledger already had this account; nothing was called.
    AlreadyProcessed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provisioned {
    pub upn: String,
    /// For [`ProvisionStatus::AlreadyProcessed`] this was never set on the account.
    pub password: TemporaryPassword,
    pub status: ProvisionStatus,
}

impl Provisioned {
    pub fn created(&self) -> bool {
        !matches!(self.status, ProvisionStatus::AlreadyProcessed)
    }
}

/// Creates identity-provider accounts, at most once per user principal name.
pub struct AccountProvisioner<'a> {
    api: &'a dyn GraphApi,
    ledger: &'a dyn Ledger,
    notifier: ParentNotifier<'a>,
    domain: String,
}

impl<'a> AccountProvisioner<'a> {
    pub fn new(
        api: &'a dyn GraphApi,
        ledger: &'a dyn Ledger,
        notifier: ParentNotifier<'a>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            api,
            ledger,
            notifier,
            domain: domain.into(),
        }
    }

    /// Create the account for `record` and notify its parents.
    ///
    /// A ledger hit returns immediately without touching the API or the
    /// notifier. The ledger is written only after the API accepts the
    /// account, so a failed creation is retried on the next run. A
    /// notification failure is logged and does not fail provisioning.
    pub async fn provision(
        &self,
        token: &AccessToken,
        record: &StudentRecord,
    ) -> Result<Provisioned, ProvisionError> {
        let identity = StudentIdentity::derive(record, &self.domain);
        let upn = identity.user_principal_name.clone();

        if self.ledger.is_processed(&upn) {
            info!(upn = %upn, "skipping already processed user");
            return Ok(Provisioned {
                upn,
                password: identity.password,
                status: ProvisionStatus::AlreadyProcessed,
            });
        }

        self.api
            .create_user(token, &identity.new_user(record))
            .await
            .map_err(|source| ProvisionError {
                upn: upn.clone(),
                source,
            })?;
        info!(upn = %upn, "user created");
        self.ledger.mark_processed(&upn);

        let status = match self
            .notifier
            .notify(token, record, &upn, identity.password.expose())
            .await
        {
            Ok(parents_notified) => ProvisionStatus::Created { parents_notified },
            Err(e) => {
                error!(upn = %upn, error = %e, "error handling parents");
                ProvisionStatus::NotifyFailed
            }
        };

        Ok(Provisioned {
            upn,
            password: identity.password,
            status,
        })
    }
}
