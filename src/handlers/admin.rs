// src/handlers/admin.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::ApiError;
use crate::services::backup::{recover, write_snapshot};
use crate::services::config::AppConfig;
use crate::services::store::DataStore;

/// Write a snapshot of the current dataset to the primary backup directory.
pub async fn run_backup(db: Arc<DataStore>, config: Arc<AppConfig>) -> Result<Json, Rejection> {
    let dir = config.backup_dirs.first().ok_or_else(|| {
        warp::reject::custom(ApiError::internal("no backup directory configured"))
    })?;
    let data = db.snapshot().await;
    let path = write_snapshot(&data, dir).map_err(|e| {
        error!("Backup failed: {}", e);
        warp::reject::custom(ApiError::internal("backup failed"))
    })?;
    Ok(warp::reply::json(&serde_json::json!({
        "path": path,
        "investors": data.investors.len(),
        "investments": data.investments.len(),
        "transactions": data.transactions.len(),
    })))
}

/// Run the recovery chain and swap the recovered dataset into the store.
/// The current in-memory dataset is offered to the chain as its stage-2
/// candidate, so unpersisted live data is not thrown away by a recover
/// against an empty disk.
pub async fn run_recovery(db: Arc<DataStore>, config: Arc<AppConfig>) -> Result<Json, Rejection> {
    let current = db.snapshot().await;
    let recovery = recover(
        &config.backup_dirs,
        Some(&current),
        &config.recovery_logs,
    );
    info!("Recovery produced dataset via {:?}", recovery.report.source);
    let report = recovery.report.clone();
    db.replace_dataset(recovery.dataset, recovery.report).await;
    Ok(warp::reply::json(&report))
}

pub async fn recovery_report(db: Arc<DataStore>) -> Result<Json, Rejection> {
    match db.last_recovery_report().await {
        Some(report) => Ok(warp::reply::json(&report)),
        None => Err(warp::reject::custom(ApiError::not_found(
            "no recovery has been run",
        ))),
    }
}
