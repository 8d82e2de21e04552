// tests/api.rs
//
// Request-level tests against the full route table.
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use irm_backend::models::Dataset;
use irm_backend::routes::routes;
use irm_backend::services::config::AppConfig;
use irm_backend::services::store::DataStore;

fn test_config(backup_dir: PathBuf) -> AppConfig {
    AppConfig {
        port: 0,
        backup_dirs: vec![backup_dir],
        recovery_logs: vec![],
        company_name: "Sterling Bond Partners".to_string(),
        support_email: "support@sterlingbond.example".to_string(),
        investor_portal_url: "https://portal.sterlingbond.example".to_string(),
        backup_cron: "0 0 3 * * *".to_string(),
    }
}

type Api = warp::filters::BoxedFilter<(warp::reply::Response,)>;

fn api(backup_dir: PathBuf) -> Api {
    use warp::{Filter, Reply};
    let db = Arc::new(DataStore::from_dataset(Dataset::default()));
    let config = Arc::new(test_config(backup_dir));
    fn into_response<R: Reply>(r: R) -> warp::reply::Response {
        r.into_response()
    }
    routes(db, config).map(into_response).boxed()
}

async fn post_json(api: &Api, path: &str, body: &Value) -> (u16, Value) {
    let resp = warp::test::request()
        .method("POST")
        .path(path)
        .json(body)
        .reply(api)
        .await;
    let status = resp.status().as_u16();
    let body: Value = serde_json::from_slice(resp.body()).unwrap_or(Value::Null);
    (status, body)
}

fn sample_investor() -> Value {
    json!({
        "full_name": "Ada Lovelace",
        "first_name": "Ada",
        "email": "ada@example.com",
        "phone": "+1-555-0199",
        "username": "ada.lovelace"
    })
}

fn sample_investment(investor_id: u64) -> Value {
    json!({
        "investor_id": investor_id,
        "principal": 10000.0,
        "bond_units": 10,
        "purchase_date": "2023-01-15",
        "maturity_date": "2028-01-15",
        "year_of_holding": 3
    })
}

#[tokio::test]
async fn investor_investment_and_returns_flow() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (status, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    assert_eq!(status, 200);
    let investor_id = investor["id"].as_u64().unwrap();

    let (status, investment) =
        post_json(&api, "/api/v1/investments", &sample_investment(investor_id)).await;
    assert_eq!(status, 200);
    let investment_id = investment["id"].as_u64().unwrap();
    assert_eq!(investment["status"], "Active");

    // Year 3 of holding on 10k principal is 9%.
    let resp = warp::test::request()
        .path(&format!("/api/v1/investments/{}/returns", investment_id))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);
    let returns: Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(returns["rate"].as_f64().unwrap(), 0.09);
    assert_eq!(returns["interest"].as_f64().unwrap(), 900.0);
}

#[tokio::test]
async fn standalone_calculator_and_validation() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let resp = warp::test::request()
        .path("/api/v1/returns?principal=50000&year=7")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["interest"].as_f64().unwrap(), 9000.0);

    let resp = warp::test::request()
        .path("/api/v1/returns?principal=50000&year=0")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn investment_rejects_unknown_investor() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (status, body) = post_json(&api, "/api/v1/investments", &sample_investment(999)).await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("investor 999"));
}

#[tokio::test]
async fn maturity_transition_conflicts_on_repeat() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let (_, investment) = post_json(
        &api,
        "/api/v1/investments",
        &sample_investment(investor["id"].as_u64().unwrap()),
    )
    .await;
    let path = format!(
        "/api/v1/investments/{}/mature",
        investment["id"].as_u64().unwrap()
    );

    let (status, matured) = post_json(&api, &path, &Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(matured["status"], "Matured");

    let (status, _) = post_json(&api, &path, &Value::Null).await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn transaction_listing_and_csv_export() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let (_, investment) = post_json(
        &api,
        "/api/v1/investments",
        &sample_investment(investor["id"].as_u64().unwrap()),
    )
    .await;
    let investment_id = investment["id"].as_u64().unwrap();

    let (status, txn) = post_json(
        &api,
        "/api/v1/transactions",
        &json!({
            "investment_id": investment_id,
            "date": "2025-04-01",
            "kind": "InterestCredit",
            "amount": 900.0,
            "mode": "Bank Transfer",
            "status": "Completed"
        }),
    )
    .await;
    assert_eq!(status, 200);
    let txn_id = txn["id"].as_u64().unwrap();

    let resp = warp::test::request()
        .path(&format!(
            "/api/v1/investments/{}/transactions/export",
            investment_id
        ))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let body = String::from_utf8(resp.body().to_vec()).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Type,Amount,Mode,Transaction ID,Status"
    );
    assert_eq!(
        lines.next().unwrap(),
        format!(
            "2025-04-01,Interest Credit,900.00,Bank Transfer,{},Completed",
            txn_id
        )
    );
}

#[tokio::test]
async fn agreement_signs_once_then_conflicts() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let (status, agreement) = post_json(
        &api,
        "/api/v1/agreements",
        &json!({
            "investor_id": investor["id"].as_u64().unwrap(),
            "title": "Bond Subscription Agreement"
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(agreement["status"], "Unsigned");

    let sign_path = format!("/api/v1/agreements/{}/sign", agreement["id"].as_u64().unwrap());
    let payload = json!({
        "signature": "data:image/png;base64,AAAA",
        "signatoryName": "Ada Lovelace",
        "signatoryEmail": "ada@example.com"
    });

    let (status, signed) = post_json(&api, &sign_path, &payload).await;
    assert_eq!(status, 200);
    assert_eq!(signed["status"], "Signed");
    assert_eq!(signed["signatory_name"], "Ada Lovelace");

    let (status, _) = post_json(&api, &sign_path, &payload).await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn email_preview_and_compose_to_outbox() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (status, preview) = post_json(
        &api,
        "/api/v1/emails/preview",
        &json!({
            "template": "Hi {{name}} from {{companyName}}, missing: [{{missing}}]",
            "fields": {"name": "Sam", "companyName": "Spoofed"}
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        preview["rendered"],
        "Hi Sam from Sterling Bond Partners, missing: []"
    );

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let compose_path = format!(
        "/api/v1/investors/{}/emails/welcome",
        investor["id"].as_u64().unwrap()
    );
    let (status, message) = post_json(&api, &compose_path, &json!({"password": "tmp-99"})).await;
    assert_eq!(status, 200);
    assert_eq!(message["to"], "ada@example.com");
    assert!(message["body"].as_str().unwrap().contains("tmp-99"));

    let resp = warp::test::request()
        .path("/api/v1/emails/outbox")
        .reply(&api)
        .await;
    let outbox: Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(outbox.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_email_kind_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let path = format!(
        "/api/v1/investors/{}/emails/newsletter",
        investor["id"].as_u64().unwrap()
    );
    let (status, _) = post_json(&api, &path, &json!({})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn backup_and_recover_round_trip_through_the_api() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let (_, investor) = post_json(&api, "/api/v1/investors", &sample_investor()).await;
    let investor_id = investor["id"].as_u64().unwrap();

    let (status, summary) = post_json(&api, "/api/v1/admin/backup", &Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(summary["investors"].as_u64().unwrap(), 1);

    let (status, report) = post_json(&api, "/api/v1/admin/recover", &Value::Null).await;
    assert_eq!(status, 200);
    assert!(report["source"].get("BackupFile").is_some());
    assert_eq!(report["investor_count"].as_u64().unwrap(), 1);

    // The recovered store still serves the investor.
    let resp = warp::test::request()
        .path(&format!("/api/v1/investors/{}", investor_id))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);

    let resp = warp::test::request()
        .path("/api/v1/admin/recovery-report")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let api = api(tmp.path().to_path_buf());

    let resp = warp::test::request().path("/api/v1/nope").reply(&api).await;
    assert_eq!(resp.status(), 404);
}
