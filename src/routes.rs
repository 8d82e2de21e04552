// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{
    admin::{recovery_report, run_backup, run_recovery},
    agreements::{create_agreement, get_agreement, sign_agreement},
    emails::{compose_email, list_outbox, preview_email},
    investments::{calculate_returns, create_investment, get_investment_returns, mature_investment},
    investors::{
        create_investor, get_investor, list_investor_investments, list_investors, update_investor,
    },
    transactions::{export_transactions, list_transactions, record_transaction},
};
use crate::services::config::AppConfig;
use crate::services::store::DataStore;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query parameters".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    db: Arc<DataStore>,
    config: Arc<AppConfig>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    info!("Configuring routes...");

    let db_filter = warp::any().map(move || db.clone());
    let config_filter = warp::any().map(move || config.clone());

    // Investors
    let list_investors_route = warp::path!("api" / "v1" / "investors")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(list_investors);

    let create_investor_route = warp::path!("api" / "v1" / "investors")
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(create_investor);

    let get_investor_route = warp::path!("api" / "v1" / "investors" / u64)
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(get_investor);

    let update_investor_route = warp::path!("api" / "v1" / "investors" / u64)
        .and(warp::put())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(update_investor);

    let investor_investments_route = warp::path!("api" / "v1" / "investors" / u64 / "investments")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(list_investor_investments);

    // Investments and the returns calculator
    let create_investment_route = warp::path!("api" / "v1" / "investments")
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(create_investment);

    let mature_investment_route = warp::path!("api" / "v1" / "investments" / u64 / "mature")
        .and(warp::post())
        .and(db_filter.clone())
        .and_then(mature_investment);

    let investment_returns_route = warp::path!("api" / "v1" / "investments" / u64 / "returns")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(get_investment_returns);

    let returns_route = warp::path!("api" / "v1" / "returns")
        .and(warp::get())
        .and(warp::query())
        .and_then(calculate_returns);

    // Transactions
    let list_transactions_route = warp::path!("api" / "v1" / "investments" / u64 / "transactions")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(list_transactions);

    let export_transactions_route =
        warp::path!("api" / "v1" / "investments" / u64 / "transactions" / "export")
            .and(warp::get())
            .and(db_filter.clone())
            .and_then(export_transactions);

    let record_transaction_route = warp::path!("api" / "v1" / "transactions")
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(record_transaction);

    // Agreements
    let create_agreement_route = warp::path!("api" / "v1" / "agreements")
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(create_agreement);

    let get_agreement_route = warp::path!("api" / "v1" / "agreements" / u64)
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(get_agreement);

    let sign_agreement_route = warp::path!("api" / "v1" / "agreements" / u64 / "sign")
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and_then(sign_agreement);

    // Email communications
    let preview_email_route = warp::path!("api" / "v1" / "emails" / "preview")
        .and(warp::post())
        .and(warp::body::json())
        .and(config_filter.clone())
        .and_then(preview_email);

    let compose_email_route = warp::path!("api" / "v1" / "investors" / u64 / "emails" / String)
        .and(warp::post())
        .and(warp::body::json())
        .and(db_filter.clone())
        .and(config_filter.clone())
        .and_then(compose_email);

    let outbox_route = warp::path!("api" / "v1" / "emails" / "outbox")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(list_outbox);

    // Backup administration
    let backup_route = warp::path!("api" / "v1" / "admin" / "backup")
        .and(warp::post())
        .and(db_filter.clone())
        .and(config_filter.clone())
        .and_then(run_backup);

    let recover_route = warp::path!("api" / "v1" / "admin" / "recover")
        .and(warp::post())
        .and(db_filter.clone())
        .and(config_filter.clone())
        .and_then(run_recovery);

    let recovery_report_route = warp::path!("api" / "v1" / "admin" / "recovery-report")
        .and(warp::get())
        .and(db_filter.clone())
        .and_then(recovery_report);

    info!("All routes configured successfully.");

    list_investors_route
        .or(create_investor_route)
        .or(get_investor_route)
        .or(update_investor_route)
        .or(investor_investments_route)
        .or(create_investment_route)
        .or(mature_investment_route)
        .or(investment_returns_route)
        .or(returns_route)
        .or(list_transactions_route)
        .or(export_transactions_route)
        .or(record_transaction_route)
        .or(create_agreement_route)
        .or(get_agreement_route)
        .or(sign_agreement_route)
        .or(preview_email_route)
        .or(compose_email_route)
        .or(outbox_route)
        .or(backup_route)
        .or(recover_route)
        .or(recovery_report_route)
        .recover(handle_rejection)
}
