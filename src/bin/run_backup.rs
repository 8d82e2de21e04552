// src/bin/run_backup.rs
//
// Recover the freshest available dataset and write it as a new snapshot to
// the primary backup directory. Useful for consolidating legacy snapshots
// into the stamped format without starting the server.
use dotenv::dotenv;
use irm_backend::services::backup::{recover, write_snapshot};
use irm_backend::services::config::AppConfig;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let recovery = recover(&config.backup_dirs, None, &config.recovery_logs);
    info!("Recovered dataset via {:?}", recovery.report.source);

    let dir = config
        .backup_dirs
        .first()
        .ok_or("BACKUP_DIRS must name at least one directory")?;
    let path = write_snapshot(&recovery.dataset, dir)?;

    println!("Snapshot written to {}", path.display());
    println!(
        "  {} investors, {} investments, {} transactions",
        recovery.dataset.investors.len(),
        recovery.dataset.investments.len(),
        recovery.dataset.transactions.len()
    );
    Ok(())
}
