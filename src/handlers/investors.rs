// src/handlers/investors.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::reject;
use crate::services::store::{DataStore, InvestorUpdate, NewInvestor};

pub async fn list_investors(db: Arc<DataStore>) -> Result<Json, Rejection> {
    let investors = db.list_investors().await;
    Ok(warp::reply::json(&investors))
}

pub async fn get_investor(id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let investor = db.get_investor(id).await.map_err(reject)?;
    Ok(warp::reply::json(&investor))
}

pub async fn create_investor(new: NewInvestor, db: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to create investor {:?}", new.full_name);
    let investor = db.create_investor(new).await.map_err(reject)?;
    Ok(warp::reply::json(&investor))
}

pub async fn update_investor(
    id: u64,
    update: InvestorUpdate,
    db: Arc<DataStore>,
) -> Result<Json, Rejection> {
    let investor = db.update_investor(id, update).await.map_err(reject)?;
    Ok(warp::reply::json(&investor))
}

pub async fn list_investor_investments(id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let investments = db.list_investments_for(id).await.map_err(reject)?;
    Ok(warp::reply::json(&investments))
}
