// src/handlers/emails.rs
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::handlers::error::{reject, ApiError};
use crate::services::config::AppConfig;
use crate::services::email::{compose, merge_fields, EmailKind};
use crate::services::store::DataStore;
use crate::services::templates::Templater;

#[derive(Deserialize)]
pub struct PreviewRequest {
    pub template: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct ComposeRequest {
    pub investment_id: Option<u64>,
    pub password: Option<String>,
}

/// Render an ad-hoc template body without touching the outbox. Admin staff
/// use this to check copy before a campaign.
pub async fn preview_email(
    req: PreviewRequest,
    config: Arc<AppConfig>,
) -> Result<Json, Rejection> {
    let templater = Templater::from_config(&config);
    let rendered = templater.render(&req.template, &req.fields);
    Ok(warp::reply::json(&serde_json::json!({ "rendered": rendered })))
}

pub async fn compose_email(
    investor_id: u64,
    kind: String,
    req: ComposeRequest,
    db: Arc<DataStore>,
    config: Arc<AppConfig>,
) -> Result<Json, Rejection> {
    let kind = EmailKind::parse(&kind).ok_or_else(|| {
        warp::reject::custom(ApiError::invalid_input(format!(
            "unknown email kind {:?}",
            kind
        )))
    })?;

    let investor = db.get_investor(investor_id).await.map_err(reject)?;
    let investment = match req.investment_id {
        Some(id) => Some(db.get_investment(id).await.map_err(reject)?),
        None => None,
    };

    let mut fields = merge_fields(&investor, investment.as_ref(), &config.investor_portal_url);
    if let Some(password) = req.password {
        fields.insert("password".to_string(), password);
    }

    let templater = Templater::from_config(&config);
    let message = compose(kind, &templater, &investor, fields);
    info!("Composed {:?} mail for investor {}", kind, investor.id);
    db.push_outbox(message.clone()).await;
    Ok(warp::reply::json(&message))
}

pub async fn list_outbox(db: Arc<DataStore>) -> Result<Json, Rejection> {
    let outbox = db.list_outbox().await;
    Ok(warp::reply::json(&outbox))
}
