// src/services/config.rs
use log::warn;
use std::env;
use std::path::PathBuf;

/// Runtime configuration, gathered once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Ordered candidate directories for backup discovery; the first entry is
    /// also where new snapshots are written.
    pub backup_dirs: Vec<PathBuf>,
    /// Log files scanned by the count-reconstruction recovery stage.
    pub recovery_logs: Vec<PathBuf>,
    pub company_name: String,
    pub support_email: String,
    pub investor_portal_url: String,
    /// Cron expression for the automatic snapshot job.
    pub backup_cron: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("${} not set, defaulting to {:?}", key, default);
        default.to_string()
    })
}

fn path_list(key: &str, default: &str) -> Vec<PathBuf> {
    env_or(key, default)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env_or("PORT", "3030")
            .parse()
            .expect("PORT must be a number");

        AppConfig {
            port,
            backup_dirs: path_list("BACKUP_DIRS", "backups,data/backups"),
            recovery_logs: path_list("RECOVERY_LOGS", "logs/backup.log"),
            company_name: env_or("COMPANY_NAME", "Sterling Bond Partners"),
            support_email: env_or("SUPPORT_EMAIL", "support@sterlingbond.example"),
            investor_portal_url: env_or("INVESTOR_PORTAL_URL", "https://portal.sterlingbond.example"),
            // 03:00 UTC daily
            backup_cron: env_or("BACKUP_CRON", "0 0 3 * * *"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_list_splits_and_trims() {
        std::env::set_var("TEST_DIR_LIST", "a, b ,,c");
        let dirs = path_list("TEST_DIR_LIST", "");
        assert_eq!(
            dirs,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }
}
