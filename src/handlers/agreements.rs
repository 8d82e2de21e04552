// src/handlers/agreements.rs
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::reject;
use crate::services::store::DataStore;

#[derive(Deserialize)]
pub struct NewAgreement {
    pub investor_id: u64,
    pub title: String,
}

/// Wire format for the signing endpoint is camelCase, matching the portal
/// frontend's payload.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub signature: String,
    pub signatory_name: String,
    pub signatory_email: String,
}

pub async fn create_agreement(new: NewAgreement, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let agreement = db
        .create_agreement(new.investor_id, new.title)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&agreement))
}

pub async fn get_agreement(id: u64, db: Arc<DataStore>) -> Result<Json, Rejection> {
    let agreement = db.get_agreement(id).await.map_err(reject)?;
    Ok(warp::reply::json(&agreement))
}

pub async fn sign_agreement(
    id: u64,
    req: SignRequest,
    db: Arc<DataStore>,
) -> Result<Json, Rejection> {
    let agreement = db
        .sign_agreement(id, req.signature, req.signatory_name, req.signatory_email)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&agreement))
}
