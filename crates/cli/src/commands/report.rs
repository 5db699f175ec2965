use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use readoku_core::{LedgerConfig, UserId};
use readoku_service::{QuotaService, StatsService};
use readoku_storage::traits::UserStore;

use crate::connect_postgres;

pub(crate) async fn run_stats(user: i64, config: LedgerConfig) -> Result<()> {
    let storage = Arc::new(connect_postgres().await?);
    let stats = StatsService::new(storage, config.clock, config.stats_days);
    let snapshot = stats.compute_stats(UserId(user), Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

pub(crate) async fn run_quota(user: i64, config: LedgerConfig) -> Result<()> {
    let storage = Arc::new(connect_postgres().await?);
    let quota = QuotaService::new(storage, config.clock);
    let status = quota.generation_status(UserId(user), config.daily_limit, Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub(crate) async fn run_add_user(email: &str) -> Result<()> {
    let storage = connect_postgres().await?;
    match storage.create_user(email).await {
        Ok(id) => {
            println!("{id}");
            Ok(())
        },
        Err(e) if e.is_duplicate() => anyhow::bail!("a user with email {email} already exists"),
        Err(e) => Err(e.into()),
    }
}
