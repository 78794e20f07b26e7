// src/pipeline.rs

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{ProvisionError, RowError, SetupError};
use crate::graph::{AccessToken, GraphApi};
use crate::history::Ledger;
use crate::notify::{ContactProvisioner, ParentNotifier};
use crate::provision::{AccountProvisioner, ProvisionStatus, Provisioned};
use crate::schema::{FieldMapping, Row, StudentRecord};

/// Per-deployment values the pipeline needs besides its collaborators.
#[derive(Clone, Debug)]
pub struct PipelineSettings {
    /// Suffix of every user principal name, without `@`.
    pub domain: String,
    /// Mailbox credential emails are posted from.
    pub mailbox: String,
    /// `from` address of credential emails.
    pub sender: String,
}

/// What happened to one row.
#[derive(Debug)]
pub enum RowOutcome {
    Skipped(RowError),
    Provisioned(Provisioned),
    Failed(ProvisionError),
}

/// Counts for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rows: usize,
    pub created: usize,
    pub already_processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub notify_failed: usize,
}

impl RunSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            rows: 0,
            created: 0,
            already_processed: 0,
            skipped: 0,
            failed: 0,
            notify_failed: 0,
        }
    }

    fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::Skipped(_) => self.skipped += 1,
            RowOutcome::Failed(_) => self.failed += 1,
            RowOutcome::Provisioned(p) => match p.status {
                ProvisionStatus::AlreadyProcessed => self.already_processed += 1,
                ProvisionStatus::Created { .. } => self.created += 1,
                ProvisionStatus::NotifyFailed => {
                    self.created += 1;
                    self.notify_failed += 1;
                }
            },
        }
    }
}

/// Single-pass, sequential driver over the onboarding table.
pub struct Pipeline<'a> {
    api: &'a dyn GraphApi,
    provisioner: AccountProvisioner<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        api: &'a dyn GraphApi,
        ledger: &'a dyn Ledger,
        contacts: &'a dyn ContactProvisioner,
        settings: PipelineSettings,
    ) -> Self {
        let notifier = ParentNotifier::new(api, contacts, settings.mailbox, settings.sender);
        Self {
            api,
            provisioner: AccountProvisioner::new(api, ledger, notifier, settings.domain),
        }
    }

    /// Authenticate, fetch, then process every row in table order.
    ///
    /// Setup failures abort the run. Row failures are logged and the run moves on.
    pub async fn run(&self) -> Result<RunSummary, SetupError> {
        let mut summary = RunSummary::start();

        let token = self.api.authenticate().await?;
        let rows = self.api.fetch_rows(&token).await?;

        for (index, row) in rows.iter().enumerate() {
            let outcome = self.process_row(&token, index, row).await;
            summary.record(&outcome);
        }

        summary.finished_at = Utc::now();
        info!(
            rows = summary.rows,
            created = summary.created,
            already_processed = summary.already_processed,
            skipped = summary.skipped,
            failed = summary.failed,
            notify_failed = summary.notify_failed,
            "run complete"
        );
        Ok(summary)
    }

    /// Map, validate and provision one row.
    #[instrument(level = "info", skip_all, fields(row = index))]
    pub async fn process_row(&self, token: &AccessToken, index: usize, row: &Row) -> RowOutcome {
        let mapping = FieldMapping::from_row(row);
        if mapping.ignored() > 0 {
            debug!(ignored = mapping.ignored(), "row has cells beyond the schema");
        }

        let record = match StudentRecord::decode(&mapping) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping row due to missing mandatory field");
                return RowOutcome::Skipped(e);
            }
        };
        debug!(
            account_type = %record.account_type,
            wifi_required = %record.wifi_required,
            "decoded row"
        );

        match self.provisioner.provision(token, &record).await {
            Ok(provisioned) => {
                info!(upn = %provisioned.upn, "processed user");
                RowOutcome::Provisioned(provisioned)
            }
            Err(e) => {
                error!(error = %e, "error creating user");
                RowOutcome::Failed(e)
            }
        }
    }
}
