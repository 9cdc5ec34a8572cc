//! Transfer guard command-line runner
//!
//! Usage: `transfer-guard <opening-balance> <amount>...`
//!
//! Opens one account, applies each amount in order and prints the final
//! state and its recent transfers as JSON, followed by the metrics exposition.

use anyhow::{bail, Context};
use rust_decimal::Decimal;
use transfer_guard::{rollover, spawn_account_actor, Account, Config, Metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(opening) = args.next() else {
        bail!("usage: transfer-guard <opening-balance> <amount>...");
    };
    let opening: Decimal = opening
        .parse()
        .with_context(|| format!("invalid opening balance {:?}", opening))?;
    let amounts = args
        .map(|raw| {
            raw.parse::<Decimal>()
                .with_context(|| format!("invalid amount {:?}", raw))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Load configuration
    let config = Config::load().context("loading configuration")?;
    tracing::info!(
        service = %config.service_name,
        transaction_limit = %config.limits.transaction_limit,
        daily_limit = %config.limits.daily_limit,
        "Starting transfer guard"
    );

    let metrics = Metrics::new()?;
    let account = Account::with_limits(opening, config.limits)?;
    let handle = spawn_account_actor(
        account,
        config.mailbox_capacity,
        config.history_capacity,
        Some(metrics.clone()),
    );
    let rollover_task = rollover::spawn_daily_rollover(handle.clone(), &config.rollover)?;

    for amount in amounts {
        match handle.transfer(amount).await {
            Ok(receipt) => tracing::info!(
                transfer_id = %receipt.transfer_id,
                %amount,
                balance = %receipt.after.balance,
                daily_transferred = %receipt.after.daily_transferred,
                "transfer applied"
            ),
            Err(e) => match e.as_transfer() {
                Some(rejection) => tracing::warn!(kind = rejection.kind(), "{}", rejection),
                None => return Err(e.into()),
            },
        }
    }

    let snapshot = handle.snapshot().await?;
    let recent = handle.recent_transfers().await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "account": snapshot,
            "recent_transfers": recent,
        }))?
    );
    print!("{}", metrics.encode()?);

    if let Some(task) = rollover_task {
        task.abort();
    }
    handle.shutdown().await?;

    tracing::info!("Shutting down transfer guard");
    Ok(())
}
