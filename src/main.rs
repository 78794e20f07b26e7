use anyhow::{Context, Result};
use clap::Parser;
use student_onboarding::{
    Cli, FileLedger, GraphClient, Pipeline, ScriptContactProvisioner,
};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) config ───────────────────────────────────────────────────
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // ─── 2) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(cli.log_level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt().with_env_filter(env).with_target(false).init();
    info!(table = %cli.table, ledger = %cli.ledger.display(), "startup");

    // ─── 3) collaborators ────────────────────────────────────────────
    let graph = GraphClient::new(cli.graph_settings())?;
    let ledger = FileLedger::new(&cli.ledger);
    let contacts = ScriptContactProvisioner::powershell(
        &cli.contact_shell,
        &cli.contact_script,
        &cli.service_account,
        cli.contact_timeout(),
    );

    // ─── 4) run ──────────────────────────────────────────────────────
    let pipeline = Pipeline::new(&graph, &ledger, &contacts, cli.pipeline_settings());
    let summary = pipeline.run().await.context("onboarding run aborted")?;

    info!(
        elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds(),
        "all done"
    );
    Ok(())
}
