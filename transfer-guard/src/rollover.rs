//! Daily rollover of transfer totals
//!
//! `Account::transfer` never clears the daily total on its own, so without
//! a rollover the daily limit behaves as a lifetime limit. The task here is
//! the explicit trigger: it sleeps until the next local midnight and sends a
//! reset to the account actor. Each boundary after the first is derived from
//! the one just reached, never from the clock, so one midnight resets once.

use crate::actor::AccountHandle;
use crate::config::RolloverConfig;
use crate::Result;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use tokio::task::JoinHandle;

/// Next midnight strictly after `now`, in the given offset
pub fn next_boundary(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    local
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| offset.from_local_datetime(&midnight).single())
        .map(|boundary| boundary.with_timezone(&Utc))
        .unwrap_or_else(|| now + Duration::days(1))
}

/// Spawn the rollover task for one account actor.
///
/// Returns `None` when rollover is disabled. The task ends once the actor
/// stops accepting messages.
pub fn spawn_daily_rollover(
    handle: AccountHandle,
    config: &RolloverConfig,
) -> Result<Option<JoinHandle<()>>> {
    if !config.enabled {
        tracing::debug!("daily rollover disabled");
        return Ok(None);
    }

    let offset = config.offset()?;
    let task = tokio::spawn(async move {
        let mut boundary = next_boundary(Utc::now(), offset);
        loop {
            let wait = (boundary - Utc::now()).to_std().unwrap_or_default();
            tracing::debug!(%boundary, "next daily rollover scheduled");

            tokio::time::sleep(wait).await;

            match handle.reset_daily_total().await {
                Ok(cleared) => tracing::info!(%cleared, %boundary, "daily rollover applied"),
                Err(e) => {
                    tracing::error!("Daily rollover stopped: {}", e);
                    break;
                }
            }
            boundary = next_boundary(boundary, offset);
        }
    });

    Ok(Some(task))
}
