// src/handlers/transactions.rs
use log::error;
use std::sync::Arc;
use warp::reply::Json;
use warp::{Rejection, Reply};

use crate::handlers::error::{reject, ApiError};
use crate::services::export::transactions_csv;
use crate::services::store::{DataStore, NewTransaction};

pub async fn list_transactions(investment_id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let transactions = db
        .list_transactions_for(investment_id)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&transactions))
}

pub async fn record_transaction(new: NewTransaction, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let transaction = db.record_transaction(new).await.map_err(reject)?;
    Ok(warp::reply::json(&transaction))
}

pub async fn export_transactions(
    investment_id: u64,
    db: Arc<DataStore>,
) -> Result<impl Reply, Rejection> {
    let transactions = db
        .list_transactions_for(investment_id)
        .await
        .map_err(reject)?;
    let csv = transactions_csv(&transactions).map_err(|e| {
        error!("Failed to build CSV export: {}", e);
        warp::reject::custom(ApiError::internal("could not build export"))
    })?;
    Ok(warp::reply::with_header(
        csv,
        "content-type",
        "text/csv; charset=utf-8",
    ))
}
