use dotenv::dotenv;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use warp::Filter;

mod handlers;
mod models;
mod routes;
mod services;

use services::backup;
use services::config::AppConfig;
use services::store::DataStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = Arc::new(AppConfig::from_env());
    info!("Using PORT: {}", config.port);

    // Boot-time recovery: the chain always produces a dataset, so startup
    // cannot fail for lack of data.
    let recovery = backup::recover(&config.backup_dirs, None, &config.recovery_logs);
    info!(
        "Booting with {} investors via {:?}",
        recovery.dataset.investors.len(),
        recovery.report.source
    );
    let db = Arc::new(DataStore::from_recovery(recovery));

    // Scheduled snapshots to the primary backup directory.
    let scheduler = JobScheduler::new()
        .await
        .expect("failed to create backup scheduler");
    let job_db = db.clone();
    let job_dir = config.backup_dirs.first().cloned();
    let backup_job = Job::new_async(config.backup_cron.as_str(), move |_id, _sched| {
        let db = job_db.clone();
        let dir = job_dir.clone();
        Box::pin(async move {
            let Some(dir) = dir else { return };
            let data = db.snapshot().await;
            match backup::write_snapshot(&data, &dir) {
                Ok(path) => info!("Scheduled backup written to {}", path.display()),
                Err(e) => error!("Scheduled backup failed: {}", e),
            }
        })
    })
    .expect("BACKUP_CRON must be a valid cron expression");
    scheduler
        .add(backup_job)
        .await
        .expect("failed to schedule backup job");
    scheduler
        .start()
        .await
        .expect("failed to start backup scheduler");
    info!("Backup job scheduled: {}", config.backup_cron);

    // Bind to 0.0.0.0 so the container platform can route to us
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    // Set up routes
    let api = routes::routes(db, config).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
