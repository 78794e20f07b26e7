pub mod config;
pub mod error;
pub mod graph;
pub mod history;
pub mod notify;
pub mod pipeline;
pub mod provision;
pub mod schema;

pub use config::Cli;
pub use error::{
    ApiError, AuthError, ContactError, FetchError, NotifyError, ProvisionError, RowError, SetupError,
};
pub use graph::{AccessToken, GraphApi, GraphClient, GraphSettings};
pub use history::{FileLedger, Ledger, MemoryLedger};
pub use notify::{ContactProvisioner, ParentContact, ParentNotifier, ScriptContactProvisioner};
pub use pipeline::{Pipeline, PipelineSettings, RowOutcome, RunSummary};
pub use provision::{AccountProvisioner, ProvisionStatus, Provisioned, TemporaryPassword};
