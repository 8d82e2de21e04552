// src/bin/recovery_drill.rs
//
// Dry-run the recovery chain and print what it would load. Writes nothing.
use dotenv::dotenv;
use irm_backend::services::backup::recover;
use irm_backend::services::config::AppConfig;

fn main() {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    println!("Candidate directories:");
    for dir in &config.backup_dirs {
        println!("  {}", dir.display());
    }

    let recovery = recover(&config.backup_dirs, None, &config.recovery_logs);
    let report = &recovery.report;

    println!("Recovery source: {:?}", report.source);
    println!(
        "Dataset: {} investors, {} investments, {} transactions",
        report.investor_count, report.investment_count, report.transaction_count
    );
    if let Some(counts) = report.log_counts {
        println!(
            "Log reconstruction saw counts: investors={:?} investments={:?} transactions={:?}",
            counts.investors, counts.investments, counts.transactions
        );
        println!("(counts are a signal only; no records were recovered from logs)");
    }
}
