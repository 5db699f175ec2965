//! Apply the PostgreSQL schema.
//!
//! Migrations are idempotent and also run on every connect; this command
//! exists for deploy pipelines that migrate before starting the server.

use crate::connect_postgres;

pub(crate) async fn run() -> anyhow::Result<()> {
    connect_postgres().await?;
    println!("Migrations applied");
    Ok(())
}
