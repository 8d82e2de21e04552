// src/handlers/investments.rs
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::{reject, ApiError};
use crate::services::interest::{accrued_interest, rate_for_year};
use crate::services::store::{DataStore, NewInvestment};

#[derive(Serialize)]
struct ReturnsResponse {
    principal: f64,
    year_of_holding: u32,
    rate: f64,
    interest: f64,
}

#[derive(Deserialize)]
pub struct ReturnsQuery {
    principal: f64,
    year: u32,
}

pub async fn create_investment(new: NewInvestment, db: Arc<DataStore>) -> Result<Json, Rejection> {
    info!(
        "Handling request to create investment for investor {}",
        new.investor_id
    );
    let investment = db.create_investment(new).await.map_err(reject)?;
    Ok(warp::reply::json(&investment))
}

pub async fn mature_investment(id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let investment = db.mature_investment(id).await.map_err(reject)?;
    Ok(warp::reply::json(&investment))
}

/// Returns for an existing investment: its principal run through the tier
/// table at its current year of holding.
pub async fn get_investment_returns(id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let investment = db.get_investment(id).await.map_err(reject)?;
    let response = build_returns(investment.principal, investment.year_of_holding)?;
    Ok(warp::reply::json(&response))
}

/// Standalone calculator, no stored investment required.
pub async fn calculate_returns(query: ReturnsQuery) -> Result<Json, Rejection> {
    if query.principal < 0.0 {
        return Err(warp::reject::custom(ApiError::invalid_input(
            "principal must not be negative",
        )));
    }
    let response = build_returns(query.principal, query.year)?;
    Ok(warp::reply::json(&response))
}

fn build_returns(principal: f64, year_of_holding: u32) -> Result<ReturnsResponse, Rejection> {
    let rate = rate_for_year(year_of_holding)
        .map_err(|e| warp::reject::custom(ApiError::invalid_input(e.to_string())))?;
    let interest = accrued_interest(principal, year_of_holding)
        .map_err(|e| warp::reject::custom(ApiError::invalid_input(e.to_string())))?;
    Ok(ReturnsResponse {
        principal,
        year_of_holding,
        rate,
        interest,
    })
}
